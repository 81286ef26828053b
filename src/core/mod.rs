//! Core foundation layer.
//!
//! This is the bottom layer of the crate with no internal dependencies.
//! All other layers depend on core.
//!
//! # Contents
//!
//! - [`types`]: Grid positions, actions, and range measurements
//! - [`grid`]: Immutable grid geometry (dimensions + legal-position set)
//! - [`odds`]: Odds-ratio arithmetic for occupancy beliefs

pub mod grid;
pub mod odds;
pub mod types;
