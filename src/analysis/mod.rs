//! Engine and result aggregation modules
//!
//! Combines the pipeline stages into the tick-driven engine:
//! - Detection engine (owns all cross-tick state)
//! - Result types

pub mod engine;
pub mod result;
