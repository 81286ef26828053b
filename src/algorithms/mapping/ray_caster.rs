//! Cardinal ray-casting through a hypothesized binary map.
//!
//! Simulates what the range sensor would measure if a particle's map were
//! the true map: from a position, step one cell at a time in each cardinal
//! direction and report the Manhattan distance to the first wall cell.

use crate::algorithms::mapping::OccupancyMap;
use crate::core::odds::is_wall;
use crate::core::types::{CardinalRanges, Direction, Position};

/// A thresholded occupancy map covering the full grid.
///
/// Cells with wall probability above the classification threshold are walls,
/// and boundary cells are forced to walls regardless of accumulated evidence.
/// That forcing is what guarantees every ray terminates.
#[derive(Debug, Clone)]
pub struct BinaryGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl BinaryGrid {
    /// Binarize an occupancy map.
    pub fn from_occupancy(map: &OccupancyMap) -> Self {
        let geometry = map.geometry();
        let (width, height) = (geometry.width(), geometry.height());
        let mut cells = vec![false; (width * height) as usize];

        for y in 0..height {
            for x in 0..width {
                let pos = Position::new(x, y);
                cells[(y * width + x) as usize] =
                    geometry.on_edge(pos) || is_wall(map.wall_probability(pos));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    /// Grid with boundary walls plus the listed interior wall cells.
    ///
    /// Convenience for world layers and tests that know the true map.
    pub fn from_walls(width: i32, height: i32, walls: &[Position]) -> Self {
        let mut cells = vec![false; (width * height).max(0) as usize];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || x == width - 1 || y == 0 || y == height - 1 {
                    cells[(y * width + x) as usize] = true;
                }
            }
        }
        for pos in walls {
            if (0..width).contains(&pos.x) && (0..height).contains(&pos.y) {
                cells[(pos.y * width + pos.x) as usize] = true;
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Whether a cell is a wall. Positions outside the grid count as walls,
    /// so ray-casting is total even on a malformed map.
    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        if !(0..self.width).contains(&pos.x) || !(0..self.height).contains(&pos.y) {
            return true;
        }
        self.cells[(pos.y * self.width + pos.x) as usize]
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
}

/// Ray-cast the four expected range measurements from a position.
///
/// Each range is the Manhattan distance to the nearest wall cell in that
/// direction; a position already on a wall reads 0 in every direction.
pub fn compute_range_measurement(grid: &BinaryGrid, position: Position) -> CardinalRanges {
    CardinalRanges {
        north: cast(grid, position, Direction::North),
        east: cast(grid, position, Direction::East),
        south: cast(grid, position, Direction::South),
        west: cast(grid, position, Direction::West),
    }
}

fn cast(grid: &BinaryGrid, start: Position, direction: Direction) -> u32 {
    let mut current = start;
    let mut distance = 0;
    while !grid.is_wall(current) {
        current = current.step(direction);
        distance += 1;
    }
    distance
}
