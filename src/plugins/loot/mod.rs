//! Loot plugin: procedural weapons/shields, kill drops and pickups.
//!
//! Generation is plain functions over an `Rng` (see [`weapon::generate_weapon`],
//! [`shield::generate_shield`], [`drops::boss_drop`]). The plugin only wires them to
//! kills and to players walking over pickups.

pub mod drops;
pub mod manufacturer;
pub mod rarity;
pub mod shield;
pub mod weapon;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::layers::pickup_layers;
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{Killed, Shield};
use crate::plugins::core::{CombatRng, CurrentLevel};
use crate::plugins::player::{Downed, Player};
use crate::plugins::weapons::Loadout;

pub use drops::LootDescriptor;
pub use manufacturer::Manufacturer;
pub use rarity::Rarity;
pub use shield::ShieldInstance;
pub use weapon::{Forced, WeaponInstance, WeaponKind};

/// Which roll a combatant's death makes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootTable {
    Regular,
    Boss,
}

/// Item lying in the world, waiting for a player.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Pickup(pub LootDescriptor);

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        (drop_loot, collect_pickups)
            .chain()
            .in_set(CombatSet::Aftermath),
    );
}

pub fn spawn_pickup(commands: &mut Commands, position: Vec2, loot: LootDescriptor) -> Entity {
    let color = loot.rarity().color();
    commands
        .spawn((
            Name::new(format!("Pickup({})", loot.name())),
            Pickup(loot),
            Sprite::from_color(color, Vec2::new(18.0, 10.0)),
            Transform::from_translation(position.extend(1.5)),
            pickup_layers(),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

fn drop_loot(
    mut commands: Commands,
    mut killed: MessageReader<Killed>,
    q_tables: Query<&LootTable>,
    tunables: Res<Tunables>,
    level: Res<CurrentLevel>,
    mut rng: ResMut<CombatRng>,
    mut events: ResMut<CombatEvents>,
) {
    for k in killed.read() {
        let Ok(table) = q_tables.get(k.entity) else {
            continue;
        };
        let loot: Vec<LootDescriptor> = match table {
            LootTable::Regular => drops::roll_drop(level.0, tunables.loot_drop_chance, &mut rng.0)
                .into_iter()
                .collect(),
            LootTable::Boss => drops::boss_drop(level.0, &mut rng.0).into(),
        };

        for (i, item) in loot.into_iter().enumerate() {
            let position = k.position + Vec2::new(i as f32 * 24.0, 8.0);
            debug!("dropped '{}' at {position}", item.name());
            events.push(CombatEvent::LootDropped {
                position,
                loot: item.clone(),
            });
            spawn_pickup(&mut commands, position, item);
        }
    }
}

fn collect_pickups(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut q_players: Query<(Entity, &Transform, &mut Loadout), (With<Player>, Without<Downed>)>,
    q_pickups: Query<(Entity, &Pickup, &Transform)>,
) {
    let r2 = tunables.pickup_radius * tunables.pickup_radius;
    for (pickup_e, pickup, pickup_tf) in &q_pickups {
        let at = pickup_tf.translation.truncate();
        for (player_e, tf, mut loadout) in &mut q_players {
            if tf.translation.truncate().distance_squared(at) > r2 {
                continue;
            }
            if !loadout.accepts(&pickup.0) {
                continue;
            }
            if let LootDescriptor::Shield(s) = &pickup.0 {
                commands.entity(player_e).insert(Shield::from_instance(s));
            }
            loadout.take(pickup.0.clone());
            commands.entity(pickup_e).despawn();
            break;
        }
    }
}
