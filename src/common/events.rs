//! Outbound combat events.
//!
//! Combat code never fans out side effects directly. Producers push onto
//! [`CombatEvents`] while the tick runs; [`publish_combat_events`] drains the queue
//! once, at the end of the tick, into `Messages<CombatEvent>` for UI/audio/etc.
//! Consumers therefore observe events in the exact order they were produced.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::element::Element;
use crate::plugins::loot::{LootDescriptor, WeaponKind};
use crate::plugins::player::PlayerSlot;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum CombatEvent {
    EntitySpawned {
        entity: Entity,
        position: Vec2,
    },
    EntityDied {
        entity: Entity,
        position: Vec2,
    },
    DamageDealt {
        target: Entity,
        position: Vec2,
        amount: f32,
        is_crit: bool,
        element: Element,
    },
    BossSpawned {
        boss: Entity,
        name: &'static str,
    },
    BossPhaseChanged {
        boss: Entity,
        phase: u8,
    },
    BossDefeated {
        boss: Entity,
    },
    WeaponFired {
        player: PlayerSlot,
        kind: WeaponKind,
    },
    WeaponReloadStarted {
        player: PlayerSlot,
    },
    WeaponReloadFinished {
        player: PlayerSlot,
    },
    ShieldBroken {
        entity: Entity,
        position: Vec2,
    },
    LootDropped {
        position: Vec2,
        loot: LootDescriptor,
    },
    ZoneEntered {
        zone: Entity,
    },
    ZoneCleared {
        zone: Entity,
    },
}

/// Per-tick outbound queue.
#[derive(Resource, Debug, Default)]
pub struct CombatEvents {
    queue: Vec<CombatEvent>,
}

impl CombatEvents {
    #[inline]
    pub fn push(&mut self, event: CombatEvent) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.queue.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = CombatEvent> + '_ {
        self.queue.drain(..)
    }
}

/// Commit: publish everything queued this tick, in order.
pub fn publish_combat_events(
    mut events: ResMut<CombatEvents>,
    mut writer: MessageWriter<CombatEvent>,
) {
    for ev in events.drain() {
        writer.write(ev);
    }
}
