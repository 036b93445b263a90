//! Domain logic and core data structures
//!
//! Geometry, measurement creation, hit-testing and statistics. Everything
//! here is pure; host services arrive through the traits in `crate::host`.

pub mod core;
pub mod factory;
pub mod image;
pub mod measurement;
pub mod statistics;
