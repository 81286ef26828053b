//! Occupancy mapping.
//!
//! # Components
//!
//! - [`OccupancyMap`]: per-cell wall odds over the legal-position set
//! - [`BinaryGrid`]: thresholded map used for ray-casting
//! - [`compute_range_measurement`]: expected ranges via cardinal ray-casting

mod occupancy_map;
mod ray_caster;

pub use occupancy_map::OccupancyMap;
pub use ray_caster::{compute_range_measurement, BinaryGrid};
