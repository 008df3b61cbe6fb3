//! Library entry point.
//!
//! Integration tests in `tests/` are compiled as separate crates and reach the
//! game through this public surface.

pub mod common;
pub mod game;
pub mod plugins;
