//! Odds-ratio arithmetic for occupancy beliefs.
//!
//! Wall beliefs are stored as odds ratios rather than probabilities:
//!
//! ```text
//! odds = p / (1 - p)        p = odds / (odds + 1)
//! ```
//!
//! Bayesian evidence then composes by multiplication, and clamping the odds
//! keeps repeated updates from overflowing or collapsing to exactly 0/1.

/// Smallest odds value a cell may hold (p ≈ 0.0001).
pub const ODDS_FLOOR: f64 = 1e-4;

/// Largest odds value a cell may hold (p ≈ 0.9999).
pub const ODDS_CEILING: f64 = 9999.0;

/// Likelihood used for "this cell is almost certainly a wall".
pub const NEAR_ONE: f64 = 0.9999;

/// Likelihood used for "this cell is almost certainly free".
pub const NEAR_ZERO: f64 = 0.0001;

/// Wall probability assigned to boundary cells in the prior.
pub const EDGE_WALL_PROB: f64 = 0.999;

/// Probability threshold above which a cell counts as a wall for ray-casting.
pub const WALL_THRESHOLD: f64 = 0.5;

/// Convert a probability to an odds ratio.
#[inline]
pub fn odds(p: f64) -> f64 {
    p / (1.0 - p)
}

/// Convert an odds ratio back to a probability.
#[inline]
pub fn prob(odds: f64) -> f64 {
    odds / (odds + 1.0)
}

/// Whether a wall probability classifies as a wall for ray-casting.
#[inline]
pub fn is_wall(p: f64) -> bool {
    p > WALL_THRESHOLD
}

/// Clamp an odds value into `[floor, ceiling]`.
///
/// Clamping is the sole recovery mechanism for numeric blow-up in odds
/// accumulation; it is logged, never raised.
#[inline]
pub fn clamp_odds(value: f64, floor: f64, ceiling: f64) -> f64 {
    if !value.is_finite() || value > ceiling {
        log::debug!("odds {value} clamped to ceiling {ceiling}");
        ceiling
    } else if value < floor {
        log::debug!("odds {value} clamped to floor {floor}");
        floor
    } else {
        value
    }
}
