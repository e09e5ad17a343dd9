//! Run loop, logging and presentation for the Colony simulation.

pub mod presenter;
pub mod render;
pub mod session;
pub mod telemetry;
