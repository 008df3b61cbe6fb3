//! Integration test harness.
//!
//! Headless: `MinimalPlugins` + `StatesPlugin` provide the runtime and
//! `disco_cop::game::configure_headless` installs the gameplay plugins. Every
//! `update` advances virtual time by exactly one fixed step.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::ecs::message::{MessageCursor, Messages};
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use disco_cop::common::events::CombatEvent;
use disco_cop::common::tunables::Tunables;
use disco_cop::plugins::combat::{Faction, Health, Hit, MeleeStrike};
use disco_cop::plugins::core::CombatRng;
use disco_cop::plugins::player::Player;

/// One 64 Hz fixed step.
pub const STEP: Duration = Duration::from_nanos(15_625_000);

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(Tunables::default());
    app.insert_resource(CombatRng::seeded(42));

    disco_cop::game::configure_headless(&mut app);
    app.finish();
    app.cleanup();
    app
}

/// Outbound events collected across updates.
pub struct EventLog {
    cursor: MessageCursor<CombatEvent>,
    pub seen: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new(app: &App) -> Self {
        Self {
            cursor: app.world().resource::<Messages<CombatEvent>>().get_cursor(),
            seen: Vec::new(),
        }
    }

    pub fn update(&mut self, app: &mut App) {
        app.update();
        let msgs = app.world().resource::<Messages<CombatEvent>>();
        self.seen.extend(self.cursor.read(msgs).cloned());
    }

    pub fn count(&self, pred: impl Fn(&CombatEvent) -> bool) -> usize {
        self.seen.iter().filter(|e| pred(e)).count()
    }

    pub fn index_of(&self, pred: impl Fn(&CombatEvent) -> bool) -> Option<usize> {
        self.seen.iter().position(pred)
    }
}

pub fn first_player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .next()
        .expect("a player")
}

/// Make the player effectively unkillable and put them at `at`.
pub fn place_sturdy_player(app: &mut App, at: Vec2) -> Entity {
    let player = first_player(app);
    let mut e = app.world_mut().entity_mut(player);
    e.insert(Health::new(1.0e6));
    if let Some(mut tf) = e.get_mut::<Transform>() {
        tf.translation.x = at.x;
        tf.translation.y = at.y;
    }
    player
}

/// A party-side strike centred on `target` for `amount` damage.
pub fn strike(app: &mut App, attacker: Entity, target: Entity, amount: f32) {
    let Some(center) = app
        .world()
        .get::<Transform>(target)
        .map(|tf| tf.translation.truncate())
    else {
        return;
    };
    app.world_mut().write_message(MeleeStrike {
        attacker,
        faction: Faction::Party,
        center,
        radius: 16.0,
        hit: Hit::plain(amount, center),
    });
}
