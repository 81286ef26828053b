//! Inverse sensor model: from one set of range readings to per-cell evidence.
//!
//! A forward model predicts readings from a known map; this reasons the other
//! way, mapping a single reading to evidence about individual cells. Geometry
//! only constrains cells on the two axes through the agent, so most queries
//! are uninformative -- a designed "no update" signal, distinct from
//! zero-likelihood.

use crate::core::grid::GridGeometry;
use crate::core::types::{Position, RangeReadings};

/// What one step's readings say about a single candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellEvidence {
    /// The cell is almost certainly a wall.
    Wall,
    /// The cell is almost certainly free.
    Free,
    /// The readings carry no information about this cell.
    Uninformative,
}

/// Evidence the readings provide about `cell`, seen from `agent`.
///
/// - Boundary cells are walls by convention.
/// - The agent cannot be standing inside a wall.
/// - On the two aligned axes: cells strictly nearer than the measured range
///   are free, the cell exactly at the measured range is a wall, and cells
///   beyond it are unconstrained.
/// - Unmeasured directions and off-axis cells are unconstrained.
pub fn emission_model(
    geometry: &GridGeometry,
    agent: Position,
    ranges: &RangeReadings,
    cell: Position,
) -> CellEvidence {
    if geometry.on_edge(cell) {
        return CellEvidence::Wall;
    }
    if cell == agent {
        return CellEvidence::Free;
    }

    if cell.x == agent.x {
        let dy = cell.y - agent.y;
        if dy > 0 {
            axis_evidence(dy as u32, ranges.north)
        } else {
            axis_evidence((-dy) as u32, ranges.south)
        }
    } else if cell.y == agent.y {
        let dx = cell.x - agent.x;
        if dx > 0 {
            axis_evidence(dx as u32, ranges.east)
        } else {
            axis_evidence((-dx) as u32, ranges.west)
        }
    } else {
        CellEvidence::Uninformative
    }
}

fn axis_evidence(distance: u32, measured: Option<u32>) -> CellEvidence {
    match measured {
        Some(range) if distance < range => CellEvidence::Free,
        Some(range) if distance == range => CellEvidence::Wall,
        _ => CellEvidence::Uninformative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        GridGeometry::full(9, 9).unwrap()
    }

    fn agent_ranges() -> (Position, RangeReadings) {
        (Position::new(2, 2), RangeReadings::new(2, 3, 1, 4))
    }

    #[test]
    fn test_cell_at_measured_range_is_wall() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        // Two cells north, exactly at the measured north range.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(2, 4)),
            CellEvidence::Wall
        );
        // Three cells east.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(5, 2)),
            CellEvidence::Wall
        );
        // One cell south.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(2, 1)),
            CellEvidence::Wall
        );
    }

    #[test]
    fn test_cell_nearer_than_range_is_free() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(2, 3)),
            CellEvidence::Free
        );
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(4, 2)),
            CellEvidence::Free
        );
    }

    #[test]
    fn test_cell_beyond_range_is_uninformative() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        // Same row, four cells east, beyond the measured east range of 3.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(6, 2)),
            CellEvidence::Uninformative
        );
    }

    #[test]
    fn test_off_axis_cell_is_uninformative() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(5, 5)),
            CellEvidence::Uninformative
        );
    }

    #[test]
    fn test_boundary_cell_is_wall_despite_readings() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        // (2, 0) sits on the boundary; it would otherwise be two cells south,
        // beyond the measured south range.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(2, 0)),
            CellEvidence::Wall
        );
    }

    #[test]
    fn test_agent_cell_is_free() {
        let geom = geometry();
        let (agent, ranges) = agent_ranges();
        assert_eq!(
            emission_model(&geom, agent, &ranges, agent),
            CellEvidence::Free
        );
    }

    #[test]
    fn test_unmeasured_axis_is_uninformative() {
        let geom = geometry();
        let agent = Position::new(2, 2);
        let ranges = RangeReadings {
            east: Some(3),
            ..Default::default()
        };
        // North is unmeasured, so nothing is known about the column above.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(2, 4)),
            CellEvidence::Uninformative
        );
        // The east axis still constrains cells.
        assert_eq!(
            emission_model(&geom, agent, &ranges, Position::new(5, 2)),
            CellEvidence::Wall
        );
    }
}
