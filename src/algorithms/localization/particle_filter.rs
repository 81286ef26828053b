//! Particle-filter SLAM over a bounded grid.
//!
//! Each particle is one joint hypothesis: a candidate agent position paired
//! with a full candidate occupancy map. One `observe` call runs the whole
//! recursive step -- motion update, per-particle map update, likelihood
//! reweighting against ray-cast expected ranges, and resampling -- before
//! control returns to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::emission_model::{emission_model, CellEvidence};
use super::motion_model::{MotionModel, MotionModelConfig};
use super::sensor_model::SensorNoiseModel;
use crate::algorithms::mapping::{compute_range_measurement, BinaryGrid, OccupancyMap};
use crate::core::grid::GridGeometry;
use crate::core::odds::{prob, NEAR_ONE, NEAR_ZERO, ODDS_CEILING, ODDS_FLOOR};
use crate::core::types::{Action, Direction, Position, RangeReadings};
use crate::error::{Result, SlamError};

/// A single particle: one joint (position, map) hypothesis.
///
/// The map is owned, never shared between particles, so resampling can clone
/// hypotheses without aliasing.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Hypothesized agent position.
    pub position: Position,
    /// Hypothesized occupancy map.
    pub map: OccupancyMap,
}

/// Configuration for the SLAM particle filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlamFilterConfig {
    /// Number of particles. Constant for the filter's lifetime.
    pub num_particles: usize,

    /// Random seed for deterministic behavior (0 for time-derived).
    pub seed: u64,

    /// Motion model configuration.
    pub motion: MotionModelConfig,

    /// Lower clamp for cell odds.
    pub odds_floor: f64,

    /// Upper clamp for cell odds.
    pub odds_ceiling: f64,

    /// Likelihood applied when the emission model says "wall".
    pub evidence_wall: f64,

    /// Likelihood applied when the emission model says "free".
    pub evidence_free: f64,

    /// Probability substituted when the noise kernel has no mass at a
    /// queried (measured, expected) pair.
    pub likelihood_floor: f64,
}

impl Default for SlamFilterConfig {
    fn default() -> Self {
        Self {
            num_particles: 1000,
            seed: 0,
            motion: MotionModelConfig::default(),
            odds_floor: ODDS_FLOOR,
            odds_ceiling: ODDS_CEILING,
            evidence_wall: NEAR_ONE,
            evidence_free: NEAR_ZERO,
            likelihood_floor: 1e-4,
        }
    }
}

impl SlamFilterConfig {
    /// Smaller population for interactive use.
    pub fn fast() -> Self {
        Self {
            num_particles: 200,
            ..Default::default()
        }
    }
}

/// Diagnostics for the filter.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Total number of `observe` calls.
    pub iterations: u64,
    /// Steps on which reweighting degenerated to the uniform fallback.
    pub degenerate_steps: u64,
    /// Whether the most recent step degenerated.
    pub last_step_degenerate: bool,
    /// Largest normalized particle weight from the most recent reweighting.
    pub max_weight: f64,
}

/// Position weights accumulated during reweighting.
///
/// Entries keep first-insertion order (particle order), which makes sampling
/// deterministic under a fixed seed. Normalized to sum 1 after every
/// reweighting pass.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    entries: Vec<(Position, f64)>,
    index: HashMap<Position, usize>,
}

impl WeightTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Accumulate weight for a position.
    pub fn add(&mut self, position: Position, weight: f64) {
        match self.index.get(&position) {
            Some(&i) => self.entries[i].1 += weight,
            None => {
                self.index.insert(position, self.entries.len());
                self.entries.push((position, weight));
            }
        }
    }

    /// Weight at a position (0 when absent).
    pub fn get(&self, position: Position) -> f64 {
        self.index
            .get(&position)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Number of distinct positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Scale weights to sum 1. Returns `false` when the total mass is zero
    /// or non-finite (the degenerate case; the table is left untouched).
    pub fn normalize(&mut self) -> bool {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return false;
        }
        for (_, w) in &mut self.entries {
            *w /= total;
        }
        true
    }

    /// Draw one position proportionally to its weight.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let target = rng.random::<f64>() * total;
        let mut acc = 0.0;
        for &(position, weight) in &self.entries {
            acc += weight;
            if target < acc {
                return Some(position);
            }
        }
        self.entries.last().map(|&(position, _)| position)
    }
}

/// SLAM particle filter: joint estimation of agent position and wall map.
///
/// Constructed once per episode; `observe` is called once per time step with
/// the previously attempted action and that step's noisy range readings.
pub struct SlamParticleFilter<R: Rng = SmallRng> {
    config: SlamFilterConfig,
    geometry: Arc<GridGeometry>,
    start: Position,
    /// Prior map, computed once; reused as the update normalizer.
    prior: OccupancyMap,
    motion_model: MotionModel,
    noise: Box<dyn SensorNoiseModel>,
    particles: Vec<Particle>,
    weights: WeightTable,
    rng: R,
    state: FilterState,
}

impl SlamParticleFilter<SmallRng> {
    /// Create a filter seeded from the configuration.
    pub fn new(
        config: SlamFilterConfig,
        geometry: GridGeometry,
        start: Position,
        wall_prior: f64,
        noise: Box<dyn SensorNoiseModel>,
    ) -> Result<Self> {
        let seed = if config.seed == 0 {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(12345)
        } else {
            config.seed
        };
        Self::with_rng(
            config,
            geometry,
            start,
            wall_prior,
            noise,
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> SlamParticleFilter<R> {
    /// Create a filter with an injected random-number generator.
    pub fn with_rng(
        config: SlamFilterConfig,
        geometry: GridGeometry,
        start: Position,
        wall_prior: f64,
        noise: Box<dyn SensorNoiseModel>,
        rng: R,
    ) -> Result<Self> {
        if config.num_particles == 0 {
            return Err(SlamError::EmptyPopulation);
        }
        if !(wall_prior > 0.0 && wall_prior < 1.0) {
            return Err(SlamError::WallPriorOutOfRange(wall_prior));
        }
        if !geometry.is_legal(start) {
            return Err(SlamError::IllegalStartPosition(start));
        }

        let geometry = Arc::new(geometry);
        let prior = OccupancyMap::prior(Arc::clone(&geometry), wall_prior);
        let motion_model = MotionModel::new(config.motion);

        let mut filter = Self {
            config,
            geometry,
            start,
            prior,
            motion_model,
            noise,
            particles: Vec::new(),
            weights: WeightTable::new(),
            rng,
            state: FilterState::default(),
        };
        filter.initialize();
        Ok(filter)
    }

    /// Seed the initial belief: every particle at the start position with
    /// the prior map, all position weight on the start position.
    pub fn initialize(&mut self) {
        self.particles = (0..self.config.num_particles)
            .map(|_| Particle {
                position: self.start,
                map: self.prior.clone(),
            })
            .collect();
        self.weights.clear();
        self.weights.add(self.start, 1.0);
        self.state = FilterState::default();
    }

    /// One full recursive estimation step.
    ///
    /// `prev_action` is the action the agent attempted since the last call
    /// (`None` on the first step); `ranges` are this step's noisy readings.
    pub fn observe(&mut self, prev_action: Option<Action>, ranges: &RangeReadings) {
        self.state.iterations += 1;
        self.state.last_step_degenerate = false;

        if let Some(action) = prev_action {
            self.apply_motion(action);
        }
        self.apply_map_update(ranges);
        let particle_weights = self.reweight(ranges);
        self.resample(&particle_weights);
    }

    /// Motion update: sample a successor position for every particle from
    /// its own map-conditioned action distribution.
    fn apply_motion(&mut self, action: Action) {
        for i in 0..self.particles.len() {
            let distribution = self.motion_model.next_position_distribution(
                &self.particles[i].map,
                self.particles[i].position,
                action,
            );
            let next = self.motion_model.sample(&distribution, &mut self.rng);
            self.particles[i].position = next;
        }
    }

    /// Map update: apply emission-model evidence to every legal cell of
    /// every particle's map, taking the particle's position as given.
    fn apply_map_update(&mut self, ranges: &RangeReadings) {
        let geometry = Arc::clone(&self.geometry);
        for particle in &mut self.particles {
            for (idx, &cell) in geometry.positions().iter().enumerate() {
                let likelihood = match emission_model(&geometry, particle.position, ranges, cell) {
                    CellEvidence::Wall => self.config.evidence_wall,
                    CellEvidence::Free => self.config.evidence_free,
                    CellEvidence::Uninformative => continue,
                };
                particle.map.apply_evidence(
                    idx,
                    likelihood,
                    self.prior.odds_by_index(idx),
                    self.config.odds_floor,
                    self.config.odds_ceiling,
                );
            }
        }
    }

    /// Importance reweighting: ray-cast each particle's binarized map and
    /// score the actual readings against the expected ranges.
    ///
    /// Returns normalized per-particle weights; the position-keyed table is
    /// refreshed as a side effect. All-zero weights are the degenerate case:
    /// logged, flagged in [`FilterState`], and replaced by uniform weights.
    fn reweight(&mut self, ranges: &RangeReadings) -> Vec<f64> {
        let mut particle_weights = Vec::with_capacity(self.particles.len());
        self.weights.clear();

        for particle in &self.particles {
            let binary = BinaryGrid::from_occupancy(&particle.map);
            let expected = compute_range_measurement(&binary, particle.position);

            let mut weight = 1.0;
            for direction in Direction::ALL {
                // Unmeasured directions scale every particle equally and are
                // skipped rather than penalized.
                if let Some(measured) = ranges.get(direction) {
                    weight *= self
                        .noise
                        .likelihood(measured, expected.get(direction))
                        .unwrap_or(self.config.likelihood_floor);
                }
            }
            particle_weights.push(weight);
            self.weights.add(particle.position, weight);
        }

        let total: f64 = particle_weights.iter().sum();
        if self.weights.normalize() && total > 0.0 {
            for weight in &mut particle_weights {
                *weight /= total;
            }
        } else {
            log::warn!(
                "estimation degenerate after {} steps: no particle explains the readings; \
                 falling back to uniform weights",
                self.state.iterations
            );
            self.state.last_step_degenerate = true;
            self.state.degenerate_steps += 1;

            let uniform = 1.0 / self.particles.len() as f64;
            for weight in &mut particle_weights {
                *weight = uniform;
            }
            self.weights.clear();
            for particle in &self.particles {
                self.weights.add(particle.position, uniform);
            }
            self.weights.normalize();
        }

        self.state.max_weight = particle_weights.iter().copied().fold(0.0, f64::max);
        particle_weights
    }

    /// Resample the population by drawing source particles proportionally to
    /// their individual weights.
    ///
    /// Position and map are drawn jointly, so the map that follows a
    /// resampled position is exactly the map of the particle that produced
    /// the draw; the position marginal matches the weight table.
    fn resample(&mut self, particle_weights: &[f64]) {
        let n = self.particles.len();
        let mut cumulative = Vec::with_capacity(n);
        let mut acc = 0.0;
        for &weight in particle_weights {
            acc += weight;
            cumulative.push(acc);
        }
        let total = acc;

        let mut next = Vec::with_capacity(n);
        for _ in 0..n {
            let target = self.rng.random::<f64>() * total;
            let idx = cumulative.partition_point(|&c| c <= target).min(n - 1);
            next.push(self.particles[idx].clone());
        }
        self.particles = next;
    }

    /// Per-cell wall probability, averaged over the particle population.
    ///
    /// Post-resample particle weights are uniform, so the average across
    /// particles is the importance-weighted belief. Each value is a genuine
    /// probability in [0, 1]; the map is not normalized across cells.
    pub fn wall_belief_distribution(&self) -> HashMap<Position, f64> {
        let n = self.particles.len() as f64;
        let mut acc = vec![0.0; self.geometry.len()];
        for particle in &self.particles {
            for (idx, &odds) in particle.map.values().iter().enumerate() {
                acc[idx] += prob(odds);
            }
        }
        self.geometry
            .positions()
            .iter()
            .enumerate()
            .map(|(idx, &position)| (position, acc[idx] / n))
            .collect()
    }

    /// Normalized histogram of particle positions. Sums to 1.
    pub fn position_belief_distribution(&self) -> HashMap<Position, f64> {
        let share = 1.0 / self.particles.len() as f64;
        let mut beliefs: HashMap<Position, f64> = HashMap::new();
        for particle in &self.particles {
            *beliefs.entry(particle.position).or_insert(0.0) += share;
        }
        beliefs
    }

    /// Get the configuration.
    pub fn config(&self) -> &SlamFilterConfig {
        &self.config
    }

    /// The grid geometry the filter was constructed with.
    pub fn geometry(&self) -> &Arc<GridGeometry> {
        &self.geometry
    }

    /// Current particles (for visualization).
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Position weight table from the most recent reweighting.
    pub fn weight_table(&self) -> &WeightTable {
        &self.weights
    }

    /// Diagnostics for the most recent step.
    pub fn state(&self) -> &FilterState {
        &self.state
    }
}
