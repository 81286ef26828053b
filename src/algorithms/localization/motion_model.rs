//! Stochastic motion model over grid actions.
//!
//! Given an attempted action and a particle's current map beliefs, builds a
//! distribution over the five candidate successors (four cardinal moves plus
//! staying put). The intended direction gets most of the mass; every
//! candidate is scaled down by its own successor cell's wall probability, so
//! collisions are discouraged without being hard-blocked.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::algorithms::mapping::OccupancyMap;
use crate::core::types::{Action, Position};

/// Configuration for the motion model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionModelConfig {
    /// Probability mass given to the intended direction before wall scaling.
    /// The remaining mass is shared equally by the other four actions.
    /// Typical: 0.9
    pub action_fidelity: f64,
}

impl Default for MotionModelConfig {
    fn default() -> Self {
        Self {
            action_fidelity: 0.9,
        }
    }
}

/// Samples successor positions for particles during the motion update.
#[derive(Debug, Clone)]
pub struct MotionModel {
    config: MotionModelConfig,
}

impl MotionModel {
    /// Create a motion model with the given configuration.
    pub fn new(config: MotionModelConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &MotionModelConfig {
        &self.config
    }

    /// Normalized distribution over the five successor candidates.
    ///
    /// Every candidate's weight is scaled by `1 - P(wall)` of that
    /// candidate's own target cell. Successors outside the grid count as
    /// certain walls, so particles can never leave the grid.
    pub fn next_position_distribution(
        &self,
        map: &OccupancyMap,
        position: Position,
        intended: Action,
    ) -> Vec<(Position, f64)> {
        let geometry = map.geometry();
        let unintended_share = (1.0 - self.config.action_fidelity) / 4.0;

        let mut distribution: Vec<(Position, f64)> = Action::ALL
            .iter()
            .map(|&action| {
                let successor = position.successor(action);
                let wall_prob = if geometry.in_bounds(successor) {
                    map.wall_probability(successor)
                } else {
                    1.0
                };
                let share = if action == intended {
                    self.config.action_fidelity
                } else {
                    unintended_share
                };
                (successor, share * (1.0 - wall_prob))
            })
            .collect();

        let total: f64 = distribution.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            for (_, w) in &mut distribution {
                *w /= total;
            }
        } else {
            // Every candidate reads as a wall; stay in place.
            distribution = vec![(position, 1.0)];
        }
        distribution
    }

    /// Draw one successor from a normalized candidate distribution.
    ///
    /// Falls through to the last candidate on rounding; distributions from
    /// [`next_position_distribution`](Self::next_position_distribution) are
    /// never empty.
    pub fn sample<R: Rng>(&self, distribution: &[(Position, f64)], rng: &mut R) -> Position {
        let total: f64 = distribution.iter().map(|(_, w)| w).sum();
        let target = rng.random::<f64>() * total;
        let mut acc = 0.0;
        let mut chosen = Position::new(0, 0);
        for &(position, weight) in distribution {
            chosen = position;
            acc += weight;
            if target < acc {
                break;
            }
        }
        chosen
    }
}
