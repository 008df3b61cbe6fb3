//! Spawn consumer: lease projectiles from the pool and make them live.
//!
//! A freshly grown entity only exists once its spawn command is applied, so every
//! write here goes through `Commands` inserts. The components already exist on
//! recycled entities, so inserts overwrite values without an archetype move.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::element::Element;
use crate::common::layers::{Layer, enemy_projectile_layers, non_interacting, player_projectile_layers};
use crate::common::tunables::Tunables;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;
use super::pool::{EntityPool, PoolFactory, PoolId, PoolMember};

pub const PLAYER_SHOTS: PoolId = PoolId("player_shots");
pub const ENEMY_SHOTS: PoolId = PoolId("enemy_shots");

const SHOT_RADIUS: f32 = 4.0;
const SHOT_Z: f32 = 2.0;

/// Which pool a request leases from.
#[inline]
pub fn pool_for(req: &SpawnProjectileRequest) -> PoolId {
    if req.owner.is_some() { PLAYER_SHOTS } else { ENEMY_SHOTS }
}

pub fn membership(pool: PoolId) -> Layer {
    if pool == PLAYER_SHOTS {
        Layer::PlayerProjectile
    } else {
        Layer::EnemyProjectile
    }
}

fn shot_color(element: Element, hostile: bool) -> Color {
    match element {
        Element::Fire => Color::srgb(1.0, 0.45, 0.1),
        Element::Ice => Color::srgb(0.55, 0.85, 1.0),
        Element::Electric => Color::srgb(0.95, 0.95, 0.3),
        Element::Explosive => Color::srgb(1.0, 0.25, 0.6),
        Element::None if hostile => Color::srgb(1.0, 0.3, 0.3),
        Element::None => Color::srgb(1.0, 0.85, 0.3),
    }
}

/// Factory for an inactive projectile: hidden, still, colliding with nothing.
pub fn projectile_factory(pool: PoolId) -> PoolFactory {
    let layer = membership(pool);
    Box::new(move |commands: &mut Commands| {
        commands
            .spawn((
                Name::new(format!("Projectile({})", pool.0)),
                Projectile::default(),
                Sprite::from_color(shot_color(Element::None, pool != PLAYER_SHOTS), Vec2::splat(SHOT_RADIUS * 2.0)),
                Transform::from_xyz(0.0, 0.0, SHOT_Z),
                Visibility::Hidden,
                RigidBody::Dynamic,
                GravityScale(0.0),
                Sensor,
                Collider::circle(SHOT_RADIUS),
                non_interacting(layer),
                LinearVelocity::ZERO,
                CollisionEventsEnabled,
            ))
            .id()
    })
}

pub fn init_projectile_pools(
    mut commands: Commands,
    mut pool: ResMut<EntityPool>,
    tunables: Res<Tunables>,
) {
    pool.preload(
        &mut commands,
        PLAYER_SHOTS,
        projectile_factory(PLAYER_SHOTS),
        tunables.player_projectile_preload,
    );
    pool.preload(
        &mut commands,
        ENEMY_SHOTS,
        projectile_factory(ENEMY_SHOTS),
        tunables.enemy_projectile_preload,
    );
}

pub fn allocate_projectiles(
    mut commands: Commands,
    mut pool: ResMut<EntityPool>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    tunables: Res<Tunables>,
) {
    for req in reader.read() {
        let id = pool_for(req);
        let Some(handle) = pool.acquire(&mut commands, id) else {
            debug!("skipped projectile spawn: pool '{}' unavailable", id.0);
            continue;
        };

        let projectile = Projectile::from_request(req, tunables.projectile_lifetime);
        let layers = if id == PLAYER_SHOTS {
            player_projectile_layers()
        } else {
            enemy_projectile_layers()
        };

        commands.entity(handle.entity).insert((
            PoolMember(handle),
            Transform::from_translation(req.origin.extend(SHOT_Z)),
            LinearVelocity(projectile.velocity()),
            Sprite::from_color(
                shot_color(projectile.element, projectile.is_hostile()),
                Vec2::splat(SHOT_RADIUS * 2.0),
            ),
            Visibility::Visible,
            layers,
            projectile,
        ));
    }
}
