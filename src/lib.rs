//! grid-slam - Particle-filter SLAM over bounded integer grids
//!
//! Joint estimation of an agent's discrete position and a per-cell wall
//! occupancy map from noisy 4-directional Manhattan range readings. The
//! agent never observes either ground truth directly; a fixed-size particle
//! population carries joint (position, map) hypotheses through a recursive
//! Bayesian loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  algorithms/                        │  ← Core algorithms
//! │            (mapping, localization)                  │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │              (types, grid, odds)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Estimation loop
//!
//! One [`SlamParticleFilter::observe`] call per time step:
//!
//! 1. **Motion update** - every particle samples a successor position from a
//!    distribution over the five candidate moves, conditioned on its own map
//!    beliefs.
//! 2. **Map update** - the inverse sensor model ([`emission_model`]) turns
//!    each range reading into per-cell evidence, folded into each particle's
//!    odds map normalized against the prior.
//! 3. **Reweighting** - each particle's map is binarized and ray-cast
//!    ([`compute_range_measurement`]); the noise kernel scores the actual
//!    readings against the expected ranges.
//! 4. **Resampling** - a fresh population is drawn proportionally to the
//!    particle weights, positions and maps jointly.
//!
//! [`SlamParticleFilter::wall_belief_distribution`] and
//! [`SlamParticleFilter::position_belief_distribution`] marginalize the
//! population into the two belief maps the agent layer renders.
//!
//! # Example
//!
//! ```
//! use grid_slam::{
//!     Action, DiscreteNoiseKernel, GridGeometry, Position, RangeReadings, SlamFilterConfig,
//!     SlamParticleFilter,
//! };
//!
//! let geometry = GridGeometry::full(7, 7)?;
//! let config = SlamFilterConfig {
//!     num_particles: 200,
//!     seed: 42,
//!     ..Default::default()
//! };
//! let mut filter = SlamParticleFilter::new(
//!     config,
//!     geometry,
//!     Position::new(3, 3),
//!     0.3,
//!     Box::new(DiscreteNoiseKernel::new(1)),
//! )?;
//!
//! // First step has no previous action.
//! filter.observe(None, &RangeReadings::new(3, 3, 3, 3));
//! filter.observe(Some(Action::North), &RangeReadings::new(2, 3, 4, 3));
//!
//! let walls = filter.wall_belief_distribution();
//! let positions = filter.position_belief_distribution();
//! # assert!(walls.values().all(|p| (0.0..=1.0).contains(p)));
//! # assert!((positions.values().sum::<f64>() - 1.0).abs() < 1e-9);
//! # Ok::<(), grid_slam::SlamError>(())
//! ```

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Algorithms (depends on core)
// ============================================================================
pub mod algorithms;

pub mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::grid::GridGeometry;
pub use crate::core::odds::{odds, prob};
pub use crate::core::types::{Action, CardinalRanges, Direction, Position, RangeReadings};

// Algorithms - Mapping
pub use crate::algorithms::mapping::{compute_range_measurement, BinaryGrid, OccupancyMap};

// Algorithms - Localization
pub use crate::algorithms::localization::{
    emission_model, CellEvidence, DiscreteNoiseKernel, FilterState, MotionModel,
    MotionModelConfig, Particle, SensorNoiseModel, SlamFilterConfig, SlamParticleFilter,
    TabulatedNoiseModel, WeightTable,
};

pub use crate::error::{Result, SlamError};
