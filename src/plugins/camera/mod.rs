//! Camera plugin (render only).
//!
//! Follows the party's average position. While a zone is sealed the view is held
//! inside that zone's bounds so the scroll lock reads on screen.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_party (before transform propagation)
//! ```
//!
//! Players and the camera both carry `Transform`; the `Without` filters keep the
//! two queries provably disjoint.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::{Downed, Player};
use crate::plugins::zones::ScrollLockZone;

/// Used until the window reports a viewport.
const FALLBACK_HALF_WIDTH: f32 = 640.0;
/// Height above the party centre the view sits at.
const LOOK_UP: f32 = 120.0;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_party
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Camera x for a party centred at `x`, kept inside `bounds` when locked.
///
/// A zone narrower than the view centres on the zone.
pub fn clamp_to_zone(x: f32, half_width: f32, bounds: Option<(f32, f32)>) -> f32 {
    let Some((left, right)) = bounds else {
        return x;
    };
    let (lo, hi) = (left + half_width, right - half_width);
    if lo > hi {
        return (left + right) * 0.5;
    }
    x.clamp(lo, hi)
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, LOOK_UP, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_party(
    time: Res<Time>,
    q_players: Query<&Transform, (With<Player>, Without<Downed>, Without<MainCamera>)>,
    q_zones: Query<&ScrollLockZone>,
    mut q_cam: Query<(&mut Transform, &MainCamera, &Camera), Without<Player>>,
) {
    let Ok((mut tf_cam, main_cam, camera)) = q_cam.single_mut() else {
        return;
    };

    let (sum, n) = q_players
        .iter()
        .fold((Vec2::ZERO, 0u32), |(s, n), tf| (s + tf.translation.truncate(), n + 1));
    if n == 0 {
        return;
    }
    let center = sum / n as f32;

    let half_width = camera
        .logical_viewport_size()
        .map_or(FALLBACK_HALF_WIDTH, |size| size.x * 0.5);
    let bounds = q_zones
        .iter()
        .find(|z| z.is_sealed())
        .map(|z| (z.left, z.right));
    let goal = Vec2::new(
        clamp_to_zone(center.x, half_width, bounds),
        center.y + LOOK_UP,
    );

    let alpha = 1.0 - (-main_cam.responsiveness * time.delta_secs()).exp();
    let next = tf_cam.translation.truncate().lerp(goal, alpha);
    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}
