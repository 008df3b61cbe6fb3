//! Test helpers for driving systems against a bare `World`.
//!
//! `run_system_once` flushes queued commands after the run so structural changes
//! are visible to assertions.

use std::time::Duration;

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::events::{CombatEvent, CombatEvents};

pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// `Time<Fixed>` whose last step was `dt` seconds.
pub fn fixed_time(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// Replace the fixed clock so the next system run sees a step of `dt`.
pub fn step_fixed(world: &mut World, dt: f32) {
    world.insert_resource(fixed_time(dt));
}

/// Events queued so far this tick, without draining them.
pub fn queued_events(world: &World) -> Vec<CombatEvent> {
    world.resource::<CombatEvents>().iter().cloned().collect()
}
