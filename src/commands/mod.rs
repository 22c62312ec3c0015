//! Top-level command orchestration.

pub mod setup;
