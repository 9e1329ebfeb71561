//! Core types and error definitions shared across the engine

pub mod error;
pub mod types;
