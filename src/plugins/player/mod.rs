//! Player plugin.
//!
//! Pipeline:
//! - Update: keyboard -> `PlayerIntents` for slot 0 (other devices write the same resource)
//! - FixedUpdate/Think: apply intents to velocity (damped instead while knocked back)
//! - FixedPostUpdate/Aftermath: down players that died, end the run on a party wipe

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{Layer, player_layers};
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{
    Combatant, Faction, Health, Killed, STAGGER_DAMPING, Shield, StatusEffects,
};
use crate::plugins::core::LevelLoad;
use crate::plugins::weapons::{Loadout, WeaponState};

pub const MAX_PLAYERS: usize = 4;
const PLAYER_HEALTH: f32 = 100.0;
const SPAWN_X: f32 = 120.0;

/// Logical player index, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerSlot(pub u8);

impl PlayerSlot {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Player {
    pub slot: PlayerSlot,
    /// -1 or 1.
    pub facing: f32,
}

/// Out of the fight until the level ends.
#[derive(Component, Debug, Clone, Copy)]
pub struct Downed;

/// What one player wants this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerIntent {
    pub move_axis: Vec2,
    /// Aim direction; zero means "where I'm facing".
    pub aim: Vec2,
    pub fire: bool,
    pub reload: bool,
    pub swap: bool,
}

#[derive(Resource, Debug, Default)]
pub struct PlayerIntents([PlayerIntent; MAX_PLAYERS]);

impl PlayerIntents {
    pub fn get(&self, slot: PlayerSlot) -> PlayerIntent {
        self.0.get(slot.index()).copied().unwrap_or_default()
    }

    pub fn set(&mut self, slot: PlayerSlot, intent: PlayerIntent) {
        if let Some(i) = self.0.get_mut(slot.index()) {
            *i = intent;
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerIntents>()
        .add_systems(OnEnter(GameState::InGame), spawn_party)
        .add_systems(
            Update,
            gather_keyboard_intents.run_if(resource_exists::<ButtonInput<KeyCode>>),
        )
        .add_systems(FixedUpdate, apply_movement.in_set(CombatSet::Think))
        .add_systems(
            FixedPostUpdate,
            (down_players, check_party_wipe)
                .chain()
                .in_set(CombatSet::Aftermath),
        );
}

fn spawn_party(mut commands: Commands, load: Res<LevelLoad>) {
    for i in 0..load.party_size() {
        let slot = PlayerSlot(i as u8);
        let loadout = load
            .loadouts
            .get(i)
            .map(Loadout::from_saved)
            .unwrap_or_else(|| Loadout::from_saved(&Default::default()));
        let shield = loadout.shield().map(Shield::from_instance);

        let mut e = commands.spawn((
            Name::new(format!("Player{}", i + 1)),
            Player { slot, facing: 1.0 },
            Combatant::new(Faction::Party),
            Health::new(PLAYER_HEALTH),
            StatusEffects::default(),
            WeaponState::default(),
            loadout,
            Sprite::from_color(Color::srgb(0.2, 0.75, 0.9), Vec2::new(24.0, 44.0)),
            Transform::from_xyz(SPAWN_X + i as f32 * 40.0, 60.0, 1.0),
            (
                RigidBody::Dynamic,
                Collider::rectangle(24.0, 44.0),
                LockedAxes::ROTATION_LOCKED,
                player_layers(),
                LinearVelocity::ZERO,
            ),
            DespawnOnExit(GameState::InGame),
        ));
        if let Some(shield) = shield {
            e.insert(shield);
        }
    }
}

fn gather_keyboard_intents(keys: Res<ButtonInput<KeyCode>>, mut intents: ResMut<PlayerIntents>) {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::Space) {
        axis.y += 1.0;
    }

    intents.set(
        PlayerSlot(0),
        PlayerIntent {
            move_axis: axis,
            aim: Vec2::ZERO,
            fire: keys.pressed(KeyCode::KeyJ),
            reload: keys.pressed(KeyCode::KeyR),
            swap: keys.pressed(KeyCode::KeyQ),
        },
    );
}

fn apply_movement(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    intents: Res<PlayerIntents>,
    mut q: Query<
        (
            &mut Player,
            &mut LinearVelocity,
            Option<&mut Combatant>,
            Option<&StatusEffects>,
        ),
        Without<Downed>,
    >,
) {
    let dt = time.delta_secs();
    for (mut player, mut vel, combatant, status) in &mut q {
        let intent = intents.get(player.slot);
        let scale = status.map_or(1.0, StatusEffects::speed_scale);

        // A fresh knockback has not been integrated yet; let it play out.
        let knocked = combatant.is_some_and(|mut c| c.recover(dt));
        if knocked {
            vel.x *= STAGGER_DAMPING;
        } else {
            vel.x = intent.move_axis.x.clamp(-1.0, 1.0) * tunables.player_speed * scale;
        }
        if intent.move_axis.x != 0.0 {
            player.facing = intent.move_axis.x.signum();
        }
        // Grounded approximation: not moving vertically.
        if !knocked && intent.move_axis.y > 0.5 && vel.y.abs() < 1.0 {
            vel.y = tunables.player_jump_speed;
        }
    }
}

fn down_players(
    mut commands: Commands,
    mut killed: MessageReader<Killed>,
    mut q: Query<(&Player, &mut LinearVelocity, &mut CollisionLayers), Without<Downed>>,
) {
    for k in killed.read() {
        let Ok((player, mut vel, mut layers)) = q.get_mut(k.entity) else {
            continue;
        };
        info!("player {} is down", player.slot.0 + 1);
        vel.0 = Vec2::ZERO;
        *layers = CollisionLayers::new(Layer::Player, [Layer::World]);
        commands.entity(k.entity).insert(Downed);
    }
}

fn check_party_wipe(
    q_players: Query<Has<Downed>, With<Player>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if q_players.is_empty() {
        return;
    }
    if q_players.iter().all(|downed| downed) {
        info!("party wiped");
        next.set(GameState::GameOver);
    }
}

#[cfg(test)]
mod tests;
