//! Timed attack scripts.
//!
//! A [`PatternScript`] is a list of actions keyed by seconds into the pattern. A
//! [`PatternRun`] plays one script: each step fires exactly once, on the first
//! advance whose elapsed time has reached it, however coarse the steps are.

use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};
use crate::plugins::combat::Hit;
use crate::plugins::enemies::{ActionSink, Body, Sight, Strike};
use crate::plugins::projectiles::SpawnProjectileRequest;

/// Height above the target that rain starts from.
const RAIN_HEIGHT: f32 = 260.0;
const MUZZLE_OFFSET: Vec2 = Vec2::new(0.0, 16.0);

/// Projectile parameters shared by every shot of one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub speed: f32,
    pub damage: f32,
    pub element: Element,
}

impl Shot {
    pub const fn plain(speed: f32, damage: f32) -> Self {
        Self {
            speed,
            damage,
            element: Element::None,
        }
    }

    pub const fn elemental(speed: f32, damage: f32, element: Element) -> Self {
        Self {
            speed,
            damage,
            element,
        }
    }

    fn request(&self, origin: Vec2, direction: Vec2, damage_scale: f32) -> SpawnProjectileRequest {
        let damage = self.damage * damage_scale;
        let req = SpawnProjectileRequest::hostile(origin, direction, self.speed, damage);
        if self.element == Element::None {
            return req;
        }
        req.with_element(
            self.element,
            ElementalPayload {
                damage: damage * 0.3,
                chance: 0.35,
                duration: 2.0,
            },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternAction {
    /// `count` shots fanned over `arc` degrees around the aim.
    Spread { shot: Shot, count: u8, arc: f32 },
    Aimed { shot: Shot },
    /// `count` shots evenly around the boss.
    Ring { shot: Shot, count: u8 },
    /// `count` shots evenly from `from` to `to` degrees, measured from the facing
    /// direction and independent of the target.
    Beam { shot: Shot, count: u8, from: f32, to: f32 },
    /// `count` shots falling over a `width` wide strip centred on the target.
    Rain { shot: Shot, count: u8, width: f32 },
    Homing { shot: Shot, count: u8, turn_rate: f32 },
    /// One shot along the floor in each direction.
    GroundWave { shot: Shot },
    Stomp { radius: f32, damage: f32 },
    Lunge { speed: f32 },
}

impl PatternAction {
    /// Number of projectiles this action requests.
    pub fn projectile_count(&self) -> usize {
        match *self {
            PatternAction::Spread { count, .. }
            | PatternAction::Ring { count, .. }
            | PatternAction::Beam { count, .. }
            | PatternAction::Rain { count, .. }
            | PatternAction::Homing { count, .. } => count as usize,
            PatternAction::Aimed { .. } => 1,
            PatternAction::GroundWave { .. } => 2,
            PatternAction::Stomp { .. } | PatternAction::Lunge { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub at: f32,
    pub action: PatternAction,
}

#[derive(Debug, PartialEq)]
pub struct PatternScript {
    pub name: &'static str,
    pub duration: f32,
    /// Only ever offered in the final phase.
    pub enrage: bool,
    pub steps: &'static [ScriptStep],
}

/// One playback of a script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternRun {
    pub script: &'static PatternScript,
    elapsed: f32,
    /// Bit `i` is set once step `i` has fired.
    fired: u64,
}

impl PatternRun {
    pub fn new(script: &'static PatternScript) -> Self {
        debug_assert!(script.steps.len() <= 64);
        Self {
            script,
            elapsed: 0.0,
            fired: 0,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn fired_count(&self) -> u32 {
        self.fired.count_ones()
    }

    /// Fire every due step that has not fired yet, then advance by `dt`.
    /// Returns `true` once the script is over; nothing is skipped on the way out.
    pub fn advance(&mut self, dt: f32, mut fire: impl FnMut(&PatternAction)) -> bool {
        for (i, step) in self.script.steps.iter().enumerate() {
            let bit = 1u64 << i;
            if self.fired & bit == 0 && step.at <= self.elapsed {
                self.fired |= bit;
                fire(&step.action);
            }
        }
        if self.elapsed >= self.script.duration {
            return true;
        }
        self.elapsed += dt;
        false
    }
}

/// Turn one action into requests, strikes or movement.
pub fn perform(
    action: &PatternAction,
    body: &mut Body,
    sight: Sight,
    damage_scale: f32,
    sink: &mut ActionSink,
) {
    let origin = body.position + MUZZLE_OFFSET;
    let forward = Vec2::new(body.facing, 0.0);
    let aim = sight
        .target
        .map_or(forward, |t| (t - origin).normalize_or(forward));

    match *action {
        PatternAction::Spread { shot, count, arc } => {
            for i in 0..count {
                let offset = if count > 1 {
                    -arc * 0.5 + arc * i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                let dir = Vec2::from_angle(offset.to_radians()).rotate(aim);
                sink.shots.push(shot.request(origin, dir, damage_scale));
            }
        }
        PatternAction::Aimed { shot } => {
            sink.shots.push(shot.request(origin, aim, damage_scale));
        }
        PatternAction::Ring { shot, count } => {
            let step = std::f32::consts::TAU / count.max(1) as f32;
            for i in 0..count {
                let dir = Vec2::from_angle(step * i as f32);
                sink.shots.push(shot.request(origin, dir, damage_scale));
            }
        }
        PatternAction::Beam {
            shot,
            count,
            from,
            to,
        } => {
            for i in 0..count {
                let angle = if count > 1 {
                    from + (to - from) * i as f32 / (count - 1) as f32
                } else {
                    from
                };
                let dir = Vec2::from_angle(angle.to_radians()).rotate(forward);
                sink.shots.push(shot.request(origin, dir, damage_scale));
            }
        }
        PatternAction::Rain { shot, count, width } => {
            let center = sight.target.unwrap_or(body.position);
            for i in 0..count {
                let x = if count > 1 {
                    -width * 0.5 + width * i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                let from = center + Vec2::new(x, RAIN_HEIGHT);
                sink.shots.push(shot.request(from, Vec2::NEG_Y, damage_scale));
            }
        }
        PatternAction::Homing {
            shot,
            count,
            turn_rate,
        } => {
            // Fan out upward so the turn is visible.
            for i in 0..count {
                let spread = (i as f32 - (count as f32 - 1.0) * 0.5) * 0.35;
                let dir = Vec2::from_angle(spread).rotate(Vec2::new(body.facing, 1.0).normalize());
                sink.shots
                    .push(shot.request(origin, dir, damage_scale).with_homing(turn_rate));
            }
        }
        PatternAction::GroundWave { shot } => {
            for dir in [Vec2::X, Vec2::NEG_X] {
                sink.shots.push(
                    shot.request(body.position, dir, damage_scale)
                        .with_knockback(180.0),
                );
            }
        }
        PatternAction::Stomp { radius, damage } => {
            sink.strikes.push(Strike {
                center: body.position,
                radius,
                hit: Hit::plain(damage * damage_scale, body.position)
                    .with_knockback(Vec2::new(220.0, 160.0)),
            });
        }
        PatternAction::Lunge { speed } => {
            let mut side = sight.side_from(body.position);
            if side == 0.0 {
                side = body.facing;
            }
            body.facing = side;
            body.velocity.x = side * speed;
        }
    }
}
