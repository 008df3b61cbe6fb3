//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Barrier,
    Player,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
    Pickup,
}

#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Layers for a body that should stop interacting with anything.
///
/// Membership is kept; clearing filters avoids a structural change.
#[inline]
pub fn non_interacting(membership: Layer) -> CollisionLayers {
    CollisionLayers::new(membership, [] as [Layer; 0])
}

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Barrier, Layer::EnemyProjectile],
    )
}

pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [Layer::World, Layer::Barrier, Layer::PlayerProjectile],
    )
}

/// An enemy out of play: still stands on the floor, nothing else touches it.
pub fn hidden_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::World])
}

pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Enemy,
            Layer::PlayerProjectile,
            Layer::EnemyProjectile,
        ],
    )
}

pub fn barrier_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Barrier, [Layer::Player, Layer::Enemy])
}

pub fn player_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerProjectile, [Layer::World, Layer::Enemy])
}

pub fn enemy_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyProjectile, [Layer::World, Layer::Player])
}

/// Pickups are found by distance, never by contact.
pub fn pickup_layers() -> CollisionLayers {
    non_interacting(Layer::Pickup)
}
