//! Localization and joint state estimation.
//!
//! # Components
//!
//! - [`emission_model`]: inverse sensor model over individual cells
//! - [`MotionModel`]: stochastic action model with collision discouragement
//! - [`SensorNoiseModel`]: point-query contract for the range-noise kernel
//! - [`SlamParticleFilter`]: the full SLAM loop (motion, map update,
//!   reweighting, resampling, belief extraction)

mod emission_model;
mod motion_model;
mod particle_filter;
mod sensor_model;

pub use emission_model::{emission_model, CellEvidence};
pub use motion_model::{MotionModel, MotionModelConfig};
pub use particle_filter::{
    FilterState, Particle, SlamFilterConfig, SlamParticleFilter, WeightTable,
};
pub use sensor_model::{DiscreteNoiseKernel, SensorNoiseModel, TabulatedNoiseModel};
