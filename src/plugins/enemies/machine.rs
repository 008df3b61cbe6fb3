//! Shared enemy state machine.
//!
//! ```text
//!   Idle ──sees──> Chase ──in range──> Attack
//!    │  timeout      ^  │                │ out of range
//!    v               │  └── past leash ──┼──> Patrol ──sees──> Chase
//!   Patrol           └─────────────────  ┘
//!
//!   any live state ──hit──> Hurt ──expiry──> Chase | Idle
//!   any live state ──kill─> Dead (terminal)
//! ```
//!
//! The machine owns timers and transitions. Archetypes plug in through
//! [`EnemyBehavior`] and only decide movement and what an attack does. Nothing here
//! touches the ECS; systems copy a [`Body`] in and write it back.
//!
//! ---------------------------
//! WHY A PLAIN STRUCT
//! ---------------------------
//! - Transitions are pure functions of (state, timers, sight, dt). Keeping them off
//!   the ECS means unit tests drive a machine tick by tick with no `World`.
//! - Archetypes are trait objects, so a new enemy is one `impl EnemyBehavior`
//!   instead of another branch in every system.
//!
//! ---------------------------
//! STAGGER
//! ---------------------------
//! Hurt maps to [`MoveIntent::Stagger`], which damps the current velocity instead
//! of replacing it. Knockback was added to `vel.x` during the previous Resolve;
//! snapping to a desired speed here would cancel it before it was ever seen.

use bevy::prelude::*;

use crate::plugins::combat::Hit;
pub use crate::plugins::combat::STAGGER_DAMPING;
use crate::plugins::projectiles::SpawnProjectileRequest;

/// Time spent standing around before wandering off.
pub const IDLE_SECS: f32 = 0.8;
/// Half-width of the stretch a patrolling enemy paces.
pub const PATROL_SPAN: f32 = 120.0;
pub const PATROL_SPEED_FACTOR: f32 = 0.5;

const MIN_DX: f32 = 1.0;

// -----------------------------------------------------------------------------
// States and per-think inputs
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    Idle,
    Patrol,
    Chase,
    Attack,
    Hurt,
    Dead,
}

/// Per-archetype numbers, already scaled by difficulty.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: f32,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub hurt_duration: f32,
    pub damage: f32,
    pub knockback: f32,
    pub size: Vec2,
}

/// Kinematic view of an enemy for one think.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// -1 or 1.
    pub facing: f32,
}

/// Where the current target stood at the end of the previous step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sight {
    pub target: Option<Vec2>,
}

impl Sight {
    pub fn at(target: Vec2) -> Self {
        Self { target: Some(target) }
    }

    /// Infinite when there is no target.
    pub fn distance_from(&self, at: Vec2) -> f32 {
        self.target.map_or(f32::INFINITY, |t| t.distance(at))
    }

    /// -1, 0 or 1 toward the target along x.
    pub fn side_from(&self, at: Vec2) -> f32 {
        match self.target {
            Some(t) if (t.x - at.x).abs() >= MIN_DX => (t.x - at.x).signum(),
            _ => 0.0,
        }
    }
}

/// Melee area produced by an attack; the system fills in attacker and faction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub center: Vec2,
    pub radius: f32,
    pub hit: Hit,
}

/// Everything an attack wants to put into the world this tick.
#[derive(Debug, Default)]
pub struct ActionSink {
    pub shots: Vec<SpawnProjectileRequest>,
    pub strikes: Vec<Strike>,
}

impl ActionSink {
    pub fn is_empty(&self) -> bool {
        self.shots.is_empty() && self.strikes.is_empty()
    }
}

pub struct Tick<'a> {
    pub dt: f32,
    pub sight: Sight,
    pub stats: &'a EnemyStats,
    /// Chill and similar slows.
    pub speed_scale: f32,
    /// Set by the machine before `on_tick_state`.
    pub patrol_dir: f32,
    pub actions: &'a mut ActionSink,
}

// -----------------------------------------------------------------------------
// Archetype hooks and steering
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveIntent {
    Hold,
    Wander,
    Approach,
    Retreat,
    Stagger,
}

/// Archetype hooks. Every method has a default except the attack itself.
pub trait EnemyBehavior: Send + Sync + 'static {
    fn on_enter_state(&mut self, _state: EnemyState, _body: &mut Body) {}

    fn on_exit_state(&mut self, _state: EnemyState, _body: &mut Body) {}

    fn on_tick_state(&mut self, state: EnemyState, body: &mut Body, tick: &mut Tick) {
        let intent = self.movement_policy(state, body, tick);
        steer(intent, body, tick);
    }

    /// Called once per cooldown expiry while attacking.
    fn perform_attack(&mut self, body: &mut Body, tick: &mut Tick);

    fn movement_policy(&self, state: EnemyState, _body: &Body, _tick: &Tick) -> MoveIntent {
        default_policy(state)
    }

    /// A busy archetype stays in `Attack` even if the target walks away.
    fn is_busy(&self) -> bool {
        false
    }

    fn on_barrier_contact(&mut self, _body: &mut Body) {}

    fn flies(&self) -> bool {
        false
    }
}

pub fn default_policy(state: EnemyState) -> MoveIntent {
    match state {
        EnemyState::Idle | EnemyState::Attack | EnemyState::Dead => MoveIntent::Hold,
        EnemyState::Patrol => MoveIntent::Wander,
        EnemyState::Chase => MoveIntent::Approach,
        EnemyState::Hurt => MoveIntent::Stagger,
    }
}

/// Desired horizontal velocity for `intent`. `None` keeps the current one.
pub fn desired_vx(intent: MoveIntent, body: &Body, tick: &Tick) -> Option<f32> {
    let speed = tick.stats.speed * tick.speed_scale;
    let side = tick.sight.side_from(body.position);
    match intent {
        MoveIntent::Hold => Some(0.0),
        MoveIntent::Wander => Some(tick.patrol_dir * speed * PATROL_SPEED_FACTOR),
        MoveIntent::Approach => Some(side * speed),
        MoveIntent::Retreat => Some(-side * speed),
        MoveIntent::Stagger => None,
    }
}

/// Direct horizontal steering: velocity snaps to the desired value.
///
/// The one exception is `Stagger`, which keeps whatever knockback left behind
/// and lets it decay.
pub fn steer(intent: MoveIntent, body: &mut Body, tick: &Tick) {
    match desired_vx(intent, body, tick) {
        Some(vx) => body.velocity.x = vx,
        None => body.velocity.x *= STAGGER_DAMPING,
    }
    face(intent, body, tick);
}

pub fn face(intent: MoveIntent, body: &mut Body, tick: &Tick) {
    let side = tick.sight.side_from(body.position);
    match intent {
        MoveIntent::Stagger => {}
        MoveIntent::Wander => {
            if body.velocity.x.abs() > 1e-3 {
                body.facing = body.velocity.x.signum();
            }
        }
        _ => {
            if side != 0.0 {
                body.facing = side;
            }
        }
    }
}

// -----------------------------------------------------------------------------
// The machine
// -----------------------------------------------------------------------------

/// Timers and transitions shared by every enemy archetype.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyMachine {
    state: EnemyState,
    state_time: f32,
    cooldown: f32,
    hurt_left: f32,
    idle_left: f32,
    patrol_dir: f32,
    patrol_anchor: f32,
    leash_factor: f32,
}

impl EnemyMachine {
    pub fn new(leash_factor: f32) -> Self {
        Self {
            state: EnemyState::Idle,
            state_time: 0.0,
            cooldown: 0.0,
            hurt_left: 0.0,
            idle_left: IDLE_SECS,
            patrol_dir: 1.0,
            patrol_anchor: 0.0,
            leash_factor,
        }
    }

    #[inline]
    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    fn leash(&self, stats: &EnemyStats) -> f32 {
        stats.detection_range * self.leash_factor
    }

    fn enter(&mut self, to: EnemyState, behavior: &mut dyn EnemyBehavior, body: &mut Body) {
        behavior.on_exit_state(self.state, body);
        self.state = to;
        self.state_time = 0.0;
        match to {
            EnemyState::Idle => self.idle_left = IDLE_SECS,
            EnemyState::Patrol => self.patrol_anchor = body.position.x,
            _ => {}
        }
        behavior.on_enter_state(to, body);
    }

    /// Force `Hurt`, restarting its timer. Ignored once dead.
    pub fn hurt(&mut self, behavior: &mut dyn EnemyBehavior, body: &mut Body, duration: f32) {
        if self.is_dead() {
            return;
        }
        self.hurt_left = duration;
        self.enter(EnemyState::Hurt, behavior, body);
    }

    /// Enter `Dead`. Returns `false` if already dead.
    pub fn kill(&mut self, behavior: &mut dyn EnemyBehavior, body: &mut Body) -> bool {
        if self.is_dead() {
            return false;
        }
        body.velocity = Vec2::ZERO;
        self.enter(EnemyState::Dead, behavior, body);
        true
    }

    pub fn tick(&mut self, behavior: &mut dyn EnemyBehavior, body: &mut Body, tick: &mut Tick) {
        if self.is_dead() {
            return;
        }
        let dt = tick.dt;
        let stats = tick.stats;
        self.state_time += dt;
        self.cooldown = (self.cooldown - dt).max(0.0);

        let distance = tick.sight.distance_from(body.position);
        let sees = distance < stats.detection_range;

        match self.state {
            EnemyState::Idle => {
                self.idle_left -= dt;
                if sees {
                    self.enter(EnemyState::Chase, behavior, body);
                } else if self.idle_left <= 0.0 {
                    self.enter(EnemyState::Patrol, behavior, body);
                }
            }
            EnemyState::Patrol => {
                if sees {
                    self.enter(EnemyState::Chase, behavior, body);
                } else if (body.position.x - self.patrol_anchor) * self.patrol_dir > PATROL_SPAN {
                    self.patrol_dir = -self.patrol_dir;
                }
            }
            EnemyState::Chase => {
                if distance > self.leash(stats) {
                    self.enter(EnemyState::Patrol, behavior, body);
                } else if distance < stats.attack_range {
                    self.enter(EnemyState::Attack, behavior, body);
                }
            }
            EnemyState::Attack => {
                if !behavior.is_busy() {
                    if distance >= stats.attack_range {
                        self.enter(EnemyState::Chase, behavior, body);
                    } else if self.cooldown <= 0.0 {
                        behavior.perform_attack(body, tick);
                        self.cooldown = stats.attack_cooldown;
                    }
                }
            }
            EnemyState::Hurt => {
                self.hurt_left -= dt;
                if self.hurt_left <= 0.0 {
                    let next = if distance <= self.leash(stats) {
                        EnemyState::Chase
                    } else {
                        EnemyState::Idle
                    };
                    self.enter(next, behavior, body);
                }
            }
            EnemyState::Dead => {}
        }

        tick.patrol_dir = self.patrol_dir;
        behavior.on_tick_state(self.state, body, tick);
    }
}
