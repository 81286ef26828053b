//! Immutable grid geometry: dimensions plus the legal-position set.
//!
//! The geometry is supplied once by the world layer and never changes for
//! the lifetime of a filter. Legal positions get a dense index so occupancy
//! maps can be stored as flat vectors and cloned cheaply per particle.

use std::collections::HashMap;

use crate::core::types::Position;
use crate::error::{Result, SlamError};

/// Grid dimensions and the set of positions the filter reasons about.
///
/// Legal-position order is preserved from construction, which keeps every
/// derived iteration (occupancy updates, belief extraction) deterministic.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    width: i32,
    height: i32,
    legal: Vec<Position>,
    index: HashMap<Position, usize>,
}

impl GridGeometry {
    /// Create a geometry from grid dimensions and the legal-position set.
    ///
    /// Fails fast when the grid is too small to have an interior, or when a
    /// legal position lies outside the grid or appears twice.
    pub fn new(width: i32, height: i32, legal: Vec<Position>) -> Result<Self> {
        if width < 3 || height < 3 {
            return Err(SlamError::GridTooSmall { width, height });
        }

        let mut index = HashMap::with_capacity(legal.len());
        for (i, &pos) in legal.iter().enumerate() {
            if !(0..width).contains(&pos.x) || !(0..height).contains(&pos.y) {
                return Err(SlamError::PositionOutsideGrid(pos));
            }
            if index.insert(pos, i).is_some() {
                return Err(SlamError::DuplicateLegalPosition(pos));
            }
        }

        Ok(Self {
            width,
            height,
            legal,
            index,
        })
    }

    /// Geometry covering every cell of a `width x height` grid.
    pub fn full(width: i32, height: i32) -> Result<Self> {
        let mut legal = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
        for x in 0..width {
            for y in 0..height {
                legal.push(Position::new(x, y));
            }
        }
        Self::new(width, height, legal)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether a position lies inside the grid bounds.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Whether a position lies on the grid boundary.
    ///
    /// Boundary cells are walls by convention regardless of evidence.
    #[inline]
    pub fn on_edge(&self, pos: Position) -> bool {
        pos.x == 0 || pos.x == self.width - 1 || pos.y == 0 || pos.y == self.height - 1
    }

    /// Dense index of a legal position, if it is legal.
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.index.get(&pos).copied()
    }

    /// Whether the position is in the legal set.
    #[inline]
    pub fn is_legal(&self, pos: Position) -> bool {
        self.index.contains_key(&pos)
    }

    /// Number of legal positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.legal.len()
    }

    /// Whether the legal set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.legal.is_empty()
    }

    /// Legal positions in construction order.
    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.legal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_geometry_size() {
        let geom = GridGeometry::full(5, 4).unwrap();
        assert_eq!(geom.len(), 20);
        assert_eq!(geom.width(), 5);
        assert_eq!(geom.height(), 4);
    }

    #[test]
    fn test_edge_detection() {
        let geom = GridGeometry::full(5, 5).unwrap();
        assert!(geom.on_edge(Position::new(0, 2)));
        assert!(geom.on_edge(Position::new(4, 2)));
        assert!(geom.on_edge(Position::new(2, 0)));
        assert!(geom.on_edge(Position::new(2, 4)));
        assert!(!geom.on_edge(Position::new(2, 2)));
        assert!(!geom.on_edge(Position::new(1, 3)));
    }

    #[test]
    fn test_bounds() {
        let geom = GridGeometry::full(5, 5).unwrap();
        assert!(geom.in_bounds(Position::new(0, 0)));
        assert!(geom.in_bounds(Position::new(4, 4)));
        assert!(!geom.in_bounds(Position::new(5, 2)));
        assert!(!geom.in_bounds(Position::new(-1, 2)));
    }

    #[test]
    fn test_index_round_trip() {
        let geom = GridGeometry::full(4, 3).unwrap();
        for (i, &pos) in geom.positions().iter().enumerate() {
            assert_eq!(geom.index_of(pos), Some(i));
        }
        assert_eq!(geom.index_of(Position::new(9, 9)), None);
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert!(matches!(
            GridGeometry::full(2, 5),
            Err(SlamError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds_legal_position() {
        let err = GridGeometry::new(3, 3, vec![Position::new(3, 0)]);
        assert!(matches!(err, Err(SlamError::PositionOutsideGrid(_))));
    }

    #[test]
    fn test_rejects_duplicate_legal_position() {
        let err = GridGeometry::new(3, 3, vec![Position::new(1, 1), Position::new(1, 1)]);
        assert!(matches!(err, Err(SlamError::DuplicateLegalPosition(_))));
    }
}
