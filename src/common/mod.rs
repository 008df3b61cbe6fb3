//! Common, shared types.

pub mod element;
pub mod events;
pub mod layers;
pub mod schedule;
pub mod state;
pub mod tunables;
pub mod weighted;

#[cfg(test)]
pub mod test_utils;
