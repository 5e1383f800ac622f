//! # Pathing Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture builders for grids and terrain
//! - A brute-force reference solver for optimality checks
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod reference;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
