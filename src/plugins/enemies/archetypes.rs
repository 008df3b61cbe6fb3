//! Enemy roster: stats and behaviors layered on the shared machine.

use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};
use crate::plugins::combat::Hit;
use crate::plugins::projectiles::SpawnProjectileRequest;

use super::machine::{
    Body, EnemyBehavior, EnemyState, EnemyStats, MoveIntent, STAGGER_DAMPING, Strike, Tick,
    default_policy, desired_vx, face, steer,
};

const SKATE_ACCEL: f32 = 520.0;
/// Share of speed kept when a skater bounces off a barrier.
const SKATE_BOUNCE: f32 = 0.8;

const MARKSMAN_STANDOFF: f32 = 220.0;
const MARKSMAN_SHOT_SPEED: f32 = 420.0;

const HOVER_AMPLITUDE: f32 = 24.0;
const HOVER_FREQ: f32 = 2.5;
const HOVER_GAIN: f32 = 4.0;
const BOMB_SPEED: f32 = 260.0;

const WINDUP_SECS: f32 = 0.4;
const LUNGE_SECS: f32 = 0.35;
const STUN_SECS: f32 = 1.2;
const LUNGE_SPEED_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Grunt,
    RollerSkater,
    Shooter,
    Flyer,
    Bouncer,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Grunt,
        EnemyKind::RollerSkater,
        EnemyKind::Shooter,
        EnemyKind::Flyer,
        EnemyKind::Bouncer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Grunt => "Grunt",
            EnemyKind::RollerSkater => "RollerSkater",
            EnemyKind::Shooter => "Shooter",
            EnemyKind::Flyer => "Flyer",
            EnemyKind::Bouncer => "Bouncer",
        }
    }

    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Grunt => EnemyStats {
                max_health: 40.0,
                speed: 90.0,
                detection_range: 300.0,
                attack_range: 40.0,
                attack_cooldown: 1.0,
                hurt_duration: 0.3,
                damage: 10.0,
                knockback: 140.0,
                size: Vec2::new(28.0, 40.0),
            },
            EnemyKind::RollerSkater => EnemyStats {
                max_health: 35.0,
                speed: 200.0,
                detection_range: 360.0,
                attack_range: 36.0,
                attack_cooldown: 0.8,
                hurt_duration: 0.3,
                damage: 8.0,
                knockback: 160.0,
                size: Vec2::new(26.0, 38.0),
            },
            EnemyKind::Shooter => EnemyStats {
                max_health: 30.0,
                speed: 80.0,
                detection_range: 420.0,
                attack_range: 380.0,
                attack_cooldown: 1.4,
                hurt_duration: 0.25,
                damage: 9.0,
                knockback: 60.0,
                size: Vec2::new(26.0, 40.0),
            },
            EnemyKind::Flyer => EnemyStats {
                max_health: 25.0,
                speed: 110.0,
                detection_range: 380.0,
                attack_range: 200.0,
                attack_cooldown: 1.8,
                hurt_duration: 0.25,
                damage: 12.0,
                knockback: 90.0,
                size: Vec2::new(30.0, 22.0),
            },
            EnemyKind::Bouncer => EnemyStats {
                max_health: 60.0,
                speed: 120.0,
                detection_range: 320.0,
                attack_range: 120.0,
                attack_cooldown: 0.5,
                hurt_duration: 0.2,
                damage: 18.0,
                knockback: 260.0,
                size: Vec2::new(34.0, 44.0),
            },
        }
    }

    pub fn color(self) -> Color {
        match self {
            EnemyKind::Grunt => Color::srgb(0.85, 0.3, 0.3),
            EnemyKind::RollerSkater => Color::srgb(0.95, 0.45, 0.75),
            EnemyKind::Shooter => Color::srgb(0.9, 0.7, 0.25),
            EnemyKind::Flyer => Color::srgb(0.5, 0.85, 0.6),
            EnemyKind::Bouncer => Color::srgb(0.6, 0.35, 0.9),
        }
    }

    pub fn behavior(self) -> Box<dyn EnemyBehavior> {
        match self {
            EnemyKind::Grunt => Box::new(Brawler),
            EnemyKind::RollerSkater => Box::new(Skater::default()),
            EnemyKind::Shooter => Box::new(Marksman::default()),
            EnemyKind::Flyer => Box::new(Hoverer::default()),
            EnemyKind::Bouncer => Box::new(Charger::default()),
        }
    }
}

/// Area hit just ahead of the attacker.
fn melee(body: &Body, tick: &mut Tick) {
    let stats = tick.stats;
    let reach = stats.attack_range;
    tick.actions.strikes.push(Strike {
        center: body.position + Vec2::new(body.facing * reach * 0.5, 0.0),
        radius: reach * 0.75,
        hit: Hit::plain(stats.damage, body.position)
            .with_knockback(Vec2::new(stats.knockback, stats.knockback * 0.5)),
    });
}

/// Walks up and punches.
#[derive(Debug, Default)]
pub struct Brawler;

impl EnemyBehavior for Brawler {
    fn perform_attack(&mut self, body: &mut Body, tick: &mut Tick) {
        melee(body, tick);
    }
}

/// Accelerates toward its desired speed instead of snapping to it, and rebounds
/// off barriers.
#[derive(Debug)]
pub struct Skater {
    pub accel: f32,
}

impl Default for Skater {
    fn default() -> Self {
        Self { accel: SKATE_ACCEL }
    }
}

impl EnemyBehavior for Skater {
    fn on_tick_state(&mut self, state: EnemyState, body: &mut Body, tick: &mut Tick) {
        let intent = self.movement_policy(state, body, tick);
        match desired_vx(intent, body, tick) {
            Some(want) => {
                let max = self.accel * tick.dt;
                body.velocity.x += (want - body.velocity.x).clamp(-max, max);
            }
            None => body.velocity.x *= STAGGER_DAMPING,
        }
        face(intent, body, tick);
    }

    fn perform_attack(&mut self, body: &mut Body, tick: &mut Tick) {
        melee(body, tick);
    }

    fn on_barrier_contact(&mut self, body: &mut Body) {
        body.velocity.x = -body.velocity.x * SKATE_BOUNCE;
        if body.velocity.x.abs() > 1e-3 {
            body.facing = body.velocity.x.signum();
        }
    }
}

/// Keeps its distance and shoots.
#[derive(Debug)]
pub struct Marksman {
    pub standoff: f32,
}

impl Default for Marksman {
    fn default() -> Self {
        Self {
            standoff: MARKSMAN_STANDOFF,
        }
    }
}

impl EnemyBehavior for Marksman {
    fn movement_policy(&self, state: EnemyState, body: &Body, tick: &Tick) -> MoveIntent {
        match state {
            EnemyState::Chase | EnemyState::Attack => {
                if tick.sight.distance_from(body.position) < self.standoff {
                    MoveIntent::Retreat
                } else if state == EnemyState::Chase {
                    MoveIntent::Approach
                } else {
                    MoveIntent::Hold
                }
            }
            _ => default_policy(state),
        }
    }

    fn perform_attack(&mut self, body: &mut Body, tick: &mut Tick) {
        let Some(target) = tick.sight.target else {
            return;
        };
        let stats = tick.stats;
        let muzzle = body.position + Vec2::new(body.facing * stats.size.x * 0.5, stats.size.y * 0.2);
        let direction = (target - muzzle).normalize_or(Vec2::new(body.facing, 0.0));
        tick.actions.shots.push(
            SpawnProjectileRequest::hostile(muzzle, direction, MARKSMAN_SHOT_SPEED, stats.damage)
                .with_knockback(stats.knockback),
        );
    }
}

/// Ignores gravity, bobs around a fixed altitude and drops bombs.
#[derive(Debug, Default)]
pub struct Hoverer {
    phase: f32,
    altitude: Option<f32>,
}

impl EnemyBehavior for Hoverer {
    fn on_tick_state(&mut self, state: EnemyState, body: &mut Body, tick: &mut Tick) {
        let intent = self.movement_policy(state, body, tick);
        steer(intent, body, tick);

        let base = *self.altitude.get_or_insert(body.position.y);
        self.phase += tick.dt;
        let want_y = base + HOVER_AMPLITUDE * (self.phase * HOVER_FREQ).sin();
        body.velocity.y = (want_y - body.position.y) * HOVER_GAIN;
    }

    fn perform_attack(&mut self, body: &mut Body, tick: &mut Tick) {
        let stats = tick.stats;
        let payload = ElementalPayload {
            damage: stats.damage * 0.5,
            chance: 1.0,
            duration: 0.0,
        };
        tick.actions.shots.push(
            SpawnProjectileRequest::hostile(
                body.position - Vec2::Y * stats.size.y,
                Vec2::NEG_Y,
                BOMB_SPEED,
                stats.damage,
            )
            .with_element(Element::Explosive, payload)
            .with_knockback(stats.knockback),
        );
    }

    fn flies(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargePhase {
    Ready,
    Windup(f32),
    Lunge(f32),
    Stunned(f32),
}

/// Winds up, lunges, strikes once at the end of the lunge, then stands stunned.
#[derive(Debug)]
pub struct Charger {
    phase: ChargePhase,
}

impl Default for Charger {
    fn default() -> Self {
        Self {
            phase: ChargePhase::Ready,
        }
    }
}

impl Charger {
    pub fn phase(&self) -> ChargePhase {
        self.phase
    }
}

impl EnemyBehavior for Charger {
    fn on_exit_state(&mut self, state: EnemyState, _body: &mut Body) {
        if state == EnemyState::Attack {
            self.phase = ChargePhase::Ready;
        }
    }

    fn on_tick_state(&mut self, state: EnemyState, body: &mut Body, tick: &mut Tick) {
        if state != EnemyState::Attack || self.phase == ChargePhase::Ready {
            let intent = self.movement_policy(state, body, tick);
            steer(intent, body, tick);
            return;
        }

        let dt = tick.dt;
        let lunge_speed = body.facing * tick.stats.speed * LUNGE_SPEED_FACTOR;
        self.phase = match self.phase {
            ChargePhase::Windup(t) => {
                body.velocity.x = 0.0;
                let side = tick.sight.side_from(body.position);
                if side != 0.0 {
                    body.facing = side;
                }
                if t - dt <= 0.0 {
                    body.velocity.x = body.facing * tick.stats.speed * LUNGE_SPEED_FACTOR;
                    ChargePhase::Lunge(LUNGE_SECS)
                } else {
                    ChargePhase::Windup(t - dt)
                }
            }
            ChargePhase::Lunge(t) => {
                body.velocity.x = lunge_speed;
                if t - dt <= 0.0 {
                    melee(body, tick);
                    body.velocity.x = 0.0;
                    ChargePhase::Stunned(STUN_SECS)
                } else {
                    ChargePhase::Lunge(t - dt)
                }
            }
            ChargePhase::Stunned(t) => {
                body.velocity.x = 0.0;
                if t - dt <= 0.0 {
                    ChargePhase::Ready
                } else {
                    ChargePhase::Stunned(t - dt)
                }
            }
            ChargePhase::Ready => ChargePhase::Ready,
        };
    }

    fn perform_attack(&mut self, _body: &mut Body, _tick: &mut Tick) {
        self.phase = ChargePhase::Windup(WINDUP_SECS);
    }

    fn is_busy(&self) -> bool {
        self.phase != ChargePhase::Ready
    }
}
