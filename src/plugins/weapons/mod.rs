//! Weapons plugin: turns player intents into shots, reloads and swaps.

pub mod loadout;
pub mod state;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::schedule::CombatSet;
use crate::plugins::core::CombatRng;
use crate::plugins::loot::WeaponInstance;
use crate::plugins::player::{Downed, Player, PlayerIntents, PlayerSlot};
use crate::plugins::projectiles::SpawnProjectileRequest;

pub use loadout::{Loadout, MAX_WEAPONS, SavedLoadout};
pub use state::{WeaponState, WeaponStep};

/// Distance in front of the player where shots appear.
const MUZZLE_OFFSET: f32 = 20.0;

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, fire_weapons.in_set(CombatSet::Think));
}

/// One projectile request per pellet, jittered inside the weapon's spread.
pub fn shots_for<R: Rng + ?Sized>(
    weapon: &WeaponInstance,
    owner: PlayerSlot,
    origin: Vec2,
    aim: Vec2,
    rng: &mut R,
) -> Vec<SpawnProjectileRequest> {
    let spread = weapon.spread();
    let aim = aim.try_normalize().unwrap_or(Vec2::X);
    (0..weapon.pellets.max(1))
        .map(|_| {
            let jitter = rng.random_range(-spread..=spread);
            let direction = Vec2::from_angle(jitter).rotate(aim);
            let crit = rng.random::<f32>() < weapon.crit_chance;
            SpawnProjectileRequest {
                origin: origin + aim * MUZZLE_OFFSET,
                direction,
                speed: weapon.projectile_speed,
                damage: weapon.damage,
                element: weapon.element,
                elemental: weapon.elemental,
                knockback: weapon.knockback,
                crit,
                crit_multiplier: weapon.crit_multiplier,
                owner: Some(owner),
                homing: None,
                lifetime: None,
            }
        })
        .collect()
}

fn fire_weapons(
    time: Res<Time<Fixed>>,
    intents: Res<PlayerIntents>,
    mut rng: ResMut<CombatRng>,
    mut events: ResMut<CombatEvents>,
    mut shots: MessageWriter<SpawnProjectileRequest>,
    mut q: Query<(&Player, &Transform, &mut Loadout, &mut WeaponState), Without<Downed>>,
) {
    let dt = time.delta_secs();
    for (player, tf, mut loadout, mut state) in &mut q {
        let intent = intents.get(player.slot);
        let step = state.step(&mut loadout, &intent, dt);
        let slot = player.slot;

        if step.reload_finished {
            events.push(CombatEvent::WeaponReloadFinished { player: slot });
        }
        if step.fired {
            if let Some(weapon) = loadout.active() {
                let aim = if intent.aim == Vec2::ZERO {
                    Vec2::new(player.facing, 0.0)
                } else {
                    intent.aim
                };
                let origin = tf.translation.truncate();
                shots.write_batch(shots_for(weapon, slot, origin, aim, &mut rng.0));
                events.push(CombatEvent::WeaponFired {
                    player: slot,
                    kind: weapon.kind,
                });
            }
        }
        if step.reload_started {
            events.push(CombatEvent::WeaponReloadStarted { player: slot });
        }
    }
}
