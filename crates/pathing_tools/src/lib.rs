//! # Pathing Development Tools
//!
//! Command-line helpers for inspecting the pathfinder:
//! - Route scenarios loaded from RON
//! - ASCII rendering of terrain, paths and visited nodes

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ascii;
pub mod route;
pub mod scenario;
