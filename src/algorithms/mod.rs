//! Core algorithms layer.
//!
//! - [`mapping`]: occupancy representation, priors, and ray-casting
//! - [`localization`]: motion model, sensor models, and the particle filter

pub mod localization;
pub mod mapping;
