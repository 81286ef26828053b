//! Grid positions, movement actions, and range measurements.

use serde::{Deserialize, Serialize};

/// A position on the grid, in integer cell coordinates.
///
/// Follows the game convention: x grows eastward, y grows northward.
/// Coordinates are signed so that successor positions one step past the
/// boundary can be represented (and rejected) without overflow gymnastics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column index (east-positive).
    pub x: i32,
    /// Row index (north-positive).
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one cell away in the given direction.
    #[inline]
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Successor position for an action (`Stop` maps to self).
    #[inline]
    pub fn successor(&self, action: Action) -> Position {
        let (dx, dy) = action.offset();
        Position::new(self.x + dx, self.y + dy)
    }
}

/// One of the four cardinal directions a range sensor looks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in sensor order (N, E, S, W).
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit cell offset for this direction.
    #[inline]
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// An action the agent can attempt: move in a cardinal direction, or stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    North,
    East,
    South,
    West,
    Stop,
}

impl Action {
    /// All five actions.
    pub const ALL: [Action; 5] = [
        Action::North,
        Action::East,
        Action::South,
        Action::West,
        Action::Stop,
    ];

    /// Cell offset produced by this action when it succeeds.
    #[inline]
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Action::North => (0, 1),
            Action::East => (1, 0),
            Action::South => (0, -1),
            Action::West => (-1, 0),
            Action::Stop => (0, 0),
        }
    }
}

/// One step's noisy range observations, as Manhattan distances to the
/// nearest wall in each cardinal direction.
///
/// A direction is `None` when the sensor could not produce a reading there;
/// the filter treats such axes as uninformative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeReadings {
    pub north: Option<u32>,
    pub east: Option<u32>,
    pub south: Option<u32>,
    pub west: Option<u32>,
}

impl RangeReadings {
    /// Readings with all four directions measured.
    pub fn new(north: u32, east: u32, south: u32, west: u32) -> Self {
        Self {
            north: Some(north),
            east: Some(east),
            south: Some(south),
            west: Some(west),
        }
    }

    /// Reading for one direction.
    #[inline]
    pub fn get(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Exact ranges produced by ray-casting through a hypothesized map.
///
/// Unlike [`RangeReadings`] these are always defined: the boundary-wall
/// invariant guarantees every ray terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalRanges {
    pub north: u32,
    pub east: u32,
    pub south: u32,
    pub west: u32,
}

impl CardinalRanges {
    /// Range for one direction.
    #[inline]
    pub fn get(&self, direction: Direction) -> u32 {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_directions() {
        let p = Position::new(3, 3);
        assert_eq!(p.step(Direction::North), Position::new(3, 4));
        assert_eq!(p.step(Direction::East), Position::new(4, 3));
        assert_eq!(p.step(Direction::South), Position::new(3, 2));
        assert_eq!(p.step(Direction::West), Position::new(2, 3));
    }

    #[test]
    fn test_successor_stop_is_identity() {
        let p = Position::new(1, 5);
        assert_eq!(p.successor(Action::Stop), p);
    }

    #[test]
    fn test_range_readings_lookup() {
        let r = RangeReadings::new(1, 2, 3, 4);
        assert_eq!(r.get(Direction::North), Some(1));
        assert_eq!(r.get(Direction::East), Some(2));
        assert_eq!(r.get(Direction::South), Some(3));
        assert_eq!(r.get(Direction::West), Some(4));
    }

    #[test]
    fn test_unmeasured_direction() {
        let r = RangeReadings {
            north: Some(2),
            ..Default::default()
        };
        assert_eq!(r.get(Direction::North), Some(2));
        assert_eq!(r.get(Direction::South), None);
    }
}
