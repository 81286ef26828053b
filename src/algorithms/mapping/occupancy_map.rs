//! Occupancy map with odds-ratio cell beliefs.
//!
//! Each particle owns one of these. Storage is a flat vector parallel to the
//! geometry's legal-position list, so per-particle clones during resampling
//! are a single memcpy plus an `Arc` bump.

use std::sync::Arc;

use crate::core::grid::GridGeometry;
use crate::core::odds::{clamp_odds, odds, prob, EDGE_WALL_PROB};
use crate::core::types::Position;

/// Per-cell wall odds over the legal-position set.
///
/// Positions outside the legal set read as odds 0 ("certainly free").
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    geometry: Arc<GridGeometry>,
    odds: Vec<f64>,
}

impl OccupancyMap {
    /// Build the prior map: boundary cells get near-certain wall odds,
    /// interior legal cells get the configured prior.
    ///
    /// Computed once per filter; reused unmutated as the normalizer in every
    /// future occupancy update, never as an additional data point.
    pub fn prior(geometry: Arc<GridGeometry>, wall_prior: f64) -> Self {
        let values = geometry
            .positions()
            .iter()
            .map(|&pos| {
                if geometry.on_edge(pos) {
                    odds(EDGE_WALL_PROB)
                } else {
                    odds(wall_prior)
                }
            })
            .collect();
        Self {
            geometry,
            odds: values,
        }
    }

    /// The geometry this map is defined over.
    #[inline]
    pub fn geometry(&self) -> &Arc<GridGeometry> {
        &self.geometry
    }

    /// Wall odds at a position (0 when the position is not legal).
    #[inline]
    pub fn odds_at(&self, pos: Position) -> f64 {
        match self.geometry.index_of(pos) {
            Some(i) => self.odds[i],
            None => 0.0,
        }
    }

    /// Wall odds by dense legal-position index.
    #[inline]
    pub fn odds_by_index(&self, index: usize) -> f64 {
        self.odds[index]
    }

    /// Wall probability at a position.
    #[inline]
    pub fn wall_probability(&self, pos: Position) -> f64 {
        prob(self.odds_at(pos))
    }

    /// Apply one piece of emission-model evidence to a cell.
    ///
    /// Bayesian odds update normalized against the prior so repeated
    /// observations compound without double-counting it:
    ///
    /// ```text
    /// new = clamp(old * (L / (1 - L)) / prior_odds, floor, ceiling)
    /// ```
    pub fn apply_evidence(
        &mut self,
        index: usize,
        likelihood: f64,
        prior_odds: f64,
        floor: f64,
        ceiling: f64,
    ) {
        let updated = self.odds[index] * (likelihood / (1.0 - likelihood)) / prior_odds;
        self.odds[index] = clamp_odds(updated, floor, ceiling);
    }

    /// Raw odds values, parallel to `geometry().positions()`.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.odds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odds::{ODDS_CEILING, ODDS_FLOOR};
    use approx::assert_relative_eq;

    fn prior_map(wall_prior: f64) -> OccupancyMap {
        let geometry = Arc::new(GridGeometry::full(5, 5).unwrap());
        OccupancyMap::prior(geometry, wall_prior)
    }

    #[test]
    fn test_prior_edges_near_certain() {
        let map = prior_map(0.3);
        let geometry = map.geometry().clone();
        for &pos in geometry.positions() {
            if geometry.on_edge(pos) {
                assert!(map.wall_probability(pos) >= 0.999 - 1e-9);
            } else {
                assert_relative_eq!(map.wall_probability(pos), 0.3, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_illegal_position_reads_free() {
        let geometry = Arc::new(
            GridGeometry::new(5, 5, vec![Position::new(1, 1), Position::new(2, 2)]).unwrap(),
        );
        let map = OccupancyMap::prior(geometry, 0.3);
        assert_eq!(map.odds_at(Position::new(3, 3)), 0.0);
        assert_eq!(map.wall_probability(Position::new(3, 3)), 0.0);
    }

    #[test]
    fn test_evidence_update_math() {
        let mut map = prior_map(0.5);
        let idx = map.geometry().index_of(Position::new(2, 2)).unwrap();
        let before = map.odds_by_index(idx); // odds(0.5) == 1.0
        let prior_odds = before;

        // Likelihood 0.9 -> multiplier (0.9/0.1) / 1.0 == 9.
        map.apply_evidence(idx, 0.9, prior_odds, ODDS_FLOOR, ODDS_CEILING);
        assert_relative_eq!(map.odds_by_index(idx), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_evidence_clamps_at_ceiling() {
        let mut map = prior_map(0.5);
        let idx = map.geometry().index_of(Position::new(2, 2)).unwrap();
        let prior_odds = map.odds_by_index(idx);
        for _ in 0..10 {
            map.apply_evidence(idx, 0.9999, prior_odds, ODDS_FLOOR, ODDS_CEILING);
        }
        assert_eq!(map.odds_by_index(idx), ODDS_CEILING);
    }

    #[test]
    fn test_evidence_clamps_at_floor() {
        let mut map = prior_map(0.5);
        let idx = map.geometry().index_of(Position::new(2, 2)).unwrap();
        let prior_odds = map.odds_by_index(idx);
        for _ in 0..10 {
            map.apply_evidence(idx, 0.0001, prior_odds, ODDS_FLOOR, ODDS_CEILING);
        }
        assert_eq!(map.odds_by_index(idx), ODDS_FLOOR);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = prior_map(0.4);
        let b = a.clone();
        let idx = a.geometry().index_of(Position::new(2, 2)).unwrap();
        a.apply_evidence(idx, 0.9999, 1.0, ODDS_FLOOR, ODDS_CEILING);
        assert_ne!(a.odds_by_index(idx), b.odds_by_index(idx));
    }
}
