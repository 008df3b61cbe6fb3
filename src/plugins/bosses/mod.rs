//! Bosses plugin: phase-gated pattern engines.
//!
//! ```text
//! FixedUpdate
//!   Think      think_bosses: walk, roll a pattern, play it
//!              expose_pop_ups: pop-up bosses in and out of play
//!   Spawn      spawn_bosses
//! FixedPostUpdate
//!   Aftermath  promote_phases, announce_defeats
//! ```
//!
//! A boss shares the enemy body, targeting and corpse lifecycle but not the enemy
//! state machine. Between patterns it walks toward its target; when the attack
//! timer runs out it rolls the next pattern from its current phase's table and
//! plays it to the end.
//!
//! ---------------------------
//! WHY NOT THE ENEMY MACHINE
//! ---------------------------
//! A boss has no use for Idle, Patrol or Hurt, and its attacks last seconds rather
//! than one cooldown tick. Forcing patterns through `EnemyBehavior` would mean a
//! busy flag held for the whole script and a Hurt state that must never fire.
//! [`BossBrain`] reuses the pieces that do fit (Body, Sight, ActionSink and the
//! corpse lifecycle) and keeps its own timer.
//!
//! ---------------------------
//! KNOCKBACK AND POP-UPS
//! ---------------------------
//! Walking writes `vel.x` every tick, which would wipe out a knockback before
//! avian ever integrated it. While the hit's recovery window is open the boss
//! stops walking and lets the push decay, the same way player movement does.
//!
//! Pop-up bosses skip the walk. They wait hidden, out of reach of bullets and
//! damage, and appear beside their target only for the length of a pattern. The
//! brain decides the moment; `expose_pop_ups` swaps the collision layers,
//! visibility and [`Untargetable`] marker to match.

pub mod patterns;
pub mod phase;
pub mod roster;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::layers::{enemy_layers, hidden_enemy_layers};
use crate::common::schedule::CombatSet;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combat::{
    Combatant, Faction, Health, Killed, MeleeStrike, STAGGER_DAMPING, StatusEffects,
    Untargetable,
};
use crate::plugins::core::{CombatRng, Difficulty};
use crate::plugins::enemies::{
    ActionSink, Body, EnemyLifeState, Sight, SpawnEnemyRequest, Spawnable, TargetSnapshot,
    Targeting,
};
use crate::plugins::loot::LootTable;
use crate::plugins::projectiles::SpawnProjectileRequest;
use crate::plugins::zones::ZoneMember;

pub use patterns::{PatternAction, PatternRun, PatternScript, ScriptStep, Shot};
pub use phase::{PHASE_THRESHOLDS, PhasePromotion, PhaseTracker};
pub use roster::{BossKind, BossProfile, WeightedPattern};

/// Flying bosses hold this far above their target.
const HOVER_HEIGHT: f32 = 160.0;
const HOVER_GAIN: f32 = 2.0;
/// Per-second horizontal slowdown while a pattern plays.
const PLANTED_DRAG: f32 = 4.0;
/// How far beside its target a pop-up boss appears.
pub const POP_UP_DISTANCE: f32 = 180.0;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boss {
    pub kind: BossKind,
}

/// Pattern engine state of one boss.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct BossBrain {
    pub profile: BossProfile,
    /// Seconds until the next pattern is rolled.
    pub attack_timer: f32,
    pub running: Option<PatternRun>,
    pub speed_multiplier: f32,
    pub damage_scale: f32,
    pub facing: f32,
}

/// Inputs of one boss think.
#[derive(Debug, Clone, Copy)]
pub struct BossTick {
    pub dt: f32,
    pub sight: Sight,
    pub phase: u8,
    pub walk_factor: f32,
    /// Status slowdown.
    pub speed_scale: f32,
    /// A knockback landed recently; walking yields to it.
    pub staggered: bool,
}

impl BossBrain {
    pub fn new(profile: BossProfile, damage_scale: f32) -> Self {
        Self {
            attack_timer: profile.attack_interval,
            profile,
            running: None,
            speed_multiplier: 1.0,
            damage_scale,
            facing: -1.0,
        }
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.running.is_some()
    }

    /// Whether the boss is in play. Only pop-up bosses ever leave it.
    #[inline]
    pub fn is_exposed(&self) -> bool {
        !self.profile.pop_up || self.running.is_some()
    }

    pub fn current_pattern(&self) -> Option<&'static str> {
        self.running.map(|r| r.script.name)
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        body: &mut Body,
        tick: &BossTick,
        rng: &mut R,
        sink: &mut ActionSink,
    ) {
        if self.running.is_none() {
            if self.profile.pop_up {
                body.velocity.x = 0.0;
            } else if tick.staggered {
                body.velocity.x *= STAGGER_DAMPING;
            } else {
                self.walk(body, tick);
            }
            self.attack_timer -= tick.dt;
            if self.attack_timer <= 0.0 {
                self.running = self.profile.choose(tick.phase, rng).map(PatternRun::new);
                if let Some(name) = self.current_pattern() {
                    debug!("{} starts '{name}'", self.profile.name);
                    if self.profile.pop_up {
                        pop_up_beside(body, tick.sight, rng);
                    }
                }
            }
        }

        let Some(run) = self.running.as_mut() else {
            return;
        };
        body.velocity.x *= (1.0 - PLANTED_DRAG * tick.dt).max(0.0);
        let damage_scale = self.damage_scale;
        let done = run.advance(tick.dt, |action| {
            patterns::perform(action, body, tick.sight, damage_scale, sink)
        });
        if done {
            self.running = None;
            self.attack_timer = self.profile.attack_interval / self.speed_multiplier;
        }
    }

    fn walk(&self, body: &mut Body, tick: &BossTick) {
        let side = tick.sight.side_from(body.position);
        if side != 0.0 {
            body.facing = side;
        }
        let speed = self.profile.speed * tick.walk_factor * self.speed_multiplier * tick.speed_scale;
        body.velocity.x = side * speed;

        if self.profile.flies {
            body.velocity.y = tick
                .sight
                .target
                .map_or(0.0, |t| (t.y + HOVER_HEIGHT - body.position.y) * HOVER_GAIN);
        }
    }
}

/// Move a hidden boss next to its target, on a random side, facing it.
fn pop_up_beside<R: Rng + ?Sized>(body: &mut Body, sight: Sight, rng: &mut R) {
    let Some(target) = sight.target else {
        return;
    };
    let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    body.position.x = target.x + side * POP_UP_DISTANCE;
    body.velocity = Vec2::ZERO;
    body.facing = -side;
}

// -----------------------------------------------------------------------------
// Plugin and spawning
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            (think_bosses, expose_pop_ups)
                .chain()
                .in_set(CombatSet::Think),
            spawn_bosses.in_set(CombatSet::Spawn),
        ),
    );
    app.add_systems(
        FixedPostUpdate,
        (promote_phases, announce_defeats)
            .chain()
            .in_set(CombatSet::Aftermath),
    );
}

pub fn spawn_boss(
    commands: &mut Commands,
    kind: BossKind,
    position: Vec2,
    difficulty: &Difficulty,
) -> Entity {
    let profile = kind.profile();
    let health = profile.max_health * difficulty.hp_multiplier();
    let flies = profile.flies;
    let pop_up = profile.pop_up;

    let mut e = commands.spawn((
        Name::new(profile.name),
        Boss { kind },
        Combatant::new(Faction::Hostile),
        Health::new(health),
        StatusEffects::default(),
        PhaseTracker::default(),
        Targeting::default(),
        EnemyLifeState::Alive,
        LootTable::Boss,
        Sprite::from_color(profile.tint(1), profile.size),
        Transform::from_translation(position.extend(1.0)),
        (
            RigidBody::Dynamic,
            Collider::rectangle(profile.size.x, profile.size.y),
            LockedAxes::ROTATION_LOCKED,
            enemy_layers(),
            LinearVelocity::ZERO,
            CollisionEventsEnabled,
        ),
        BossBrain::new(profile, difficulty.damage_multiplier()),
        DespawnOnExit(GameState::InGame),
    ));
    if flies {
        e.insert(GravityScale(0.0));
    }
    if pop_up {
        e.insert((Untargetable, hidden_enemy_layers(), Visibility::Hidden));
    }
    e.id()
}

fn spawn_bosses(
    mut commands: Commands,
    mut requests: MessageReader<SpawnEnemyRequest>,
    difficulty: Res<Difficulty>,
    mut events: ResMut<CombatEvents>,
) {
    for req in requests.read() {
        let Spawnable::Boss(kind) = req.what else {
            continue;
        };
        let e = spawn_boss(&mut commands, kind, req.position, &difficulty);
        if let Some(zone) = req.zone {
            commands.entity(e).insert(ZoneMember(zone));
        }
        info!("boss '{}' enters at {}", kind.name(), req.position);
        events.push(CombatEvent::EntitySpawned {
            entity: e,
            position: req.position,
        });
        events.push(CombatEvent::BossSpawned {
            boss: e,
            name: kind.name(),
        });
    }
}

// -----------------------------------------------------------------------------
// Think
// -----------------------------------------------------------------------------

pub(crate) fn think_bosses(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    snapshot: Res<TargetSnapshot>,
    mut rng: ResMut<CombatRng>,
    mut shots: MessageWriter<SpawnProjectileRequest>,
    mut strikes: MessageWriter<MeleeStrike>,
    mut q: Query<(
        Entity,
        &mut BossBrain,
        &PhaseTracker,
        &Targeting,
        &EnemyLifeState,
        &mut Transform,
        &mut LinearVelocity,
        &mut Combatant,
        Option<&StatusEffects>,
    )>,
) {
    let mut sink = ActionSink::default();
    for (e, mut brain, phase, targeting, life, mut tf, mut vel, mut combatant, status) in &mut q {
        // Bosses never enter Hurt, but a push still has to play out.
        combatant.take_hit();
        let staggered = combatant.recover(time.delta_secs());
        if !life.is_alive() {
            continue;
        }

        let mut body = Body {
            position: tf.translation.truncate(),
            velocity: vel.0,
            facing: brain.facing,
        };
        let tick = BossTick {
            dt: time.delta_secs(),
            sight: Sight {
                target: targeting
                    .target
                    .and_then(|t| snapshot.get(t))
                    .map(|p| p.position),
            },
            phase: phase.current(),
            walk_factor: tunables.boss_walk_factor,
            speed_scale: status.map_or(1.0, StatusEffects::speed_scale),
            staggered,
        };
        brain.tick(&mut body, &tick, &mut rng.0, &mut sink);

        vel.0 = body.velocity;
        brain.facing = body.facing;
        if body.position != tf.translation.truncate() {
            tf.translation.x = body.position.x;
            tf.translation.y = body.position.y;
        }

        shots.write_batch(sink.shots.drain(..));
        strikes.write_batch(sink.strikes.drain(..).map(|s| MeleeStrike {
            attacker: e,
            faction: Faction::Hostile,
            center: s.center,
            radius: s.radius,
            hit: s.hit,
        }));
    }
}

/// Keep a pop-up boss's collision, visibility and targetability in step with
/// its brain. Dead bosses are left as they are for the corpse lifecycle.
fn expose_pop_ups(
    mut commands: Commands,
    mut q: Query<(
        Entity,
        &BossBrain,
        &EnemyLifeState,
        Has<Untargetable>,
        Option<&mut Visibility>,
    )>,
) {
    for (e, brain, life, hidden, visibility) in &mut q {
        if !brain.profile.pop_up || !life.is_alive() {
            continue;
        }
        let exposed = brain.is_exposed();
        if exposed != hidden {
            continue;
        }
        if exposed {
            commands
                .entity(e)
                .remove::<Untargetable>()
                .insert(enemy_layers());
        } else {
            commands
                .entity(e)
                .insert((Untargetable, hidden_enemy_layers()));
        }
        if let Some(mut visibility) = visibility {
            *visibility = if exposed {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
        debug!(
            "{} {}",
            brain.profile.name,
            if exposed { "pops up" } else { "ducks out" }
        );
    }
}

// -----------------------------------------------------------------------------
// Aftermath
// -----------------------------------------------------------------------------

/// Promote bosses whose health crossed a threshold this tick.
fn promote_phases(
    mut events: ResMut<CombatEvents>,
    mut q: Query<(
        Entity,
        &Health,
        &mut PhaseTracker,
        &mut BossBrain,
        Option<&mut Sprite>,
    )>,
) {
    for (e, health, mut tracker, mut brain, sprite) in &mut q {
        if health.is_dead() {
            continue;
        }
        let Some(promotion) = tracker.update(health.fraction()) else {
            continue;
        };
        for phase in promotion.entered() {
            events.push(CombatEvent::BossPhaseChanged { boss: e, phase });
        }
        brain.speed_multiplier = brain.profile.speed_multiplier(promotion.to);
        if let Some(mut sprite) = sprite {
            sprite.color = brain.profile.tint(promotion.to);
        }
        info!(
            "{} enters phase {} (speed x{})",
            brain.profile.name, promotion.to, brain.speed_multiplier
        );
    }
}

fn announce_defeats(
    mut killed: MessageReader<Killed>,
    mut events: ResMut<CombatEvents>,
    mut q: Query<&mut BossBrain, With<Boss>>,
) {
    for k in killed.read() {
        let Ok(mut brain) = q.get_mut(k.entity) else {
            continue;
        };
        brain.running = None;
        info!("{} defeated", brain.profile.name);
        events.push(CombatEvent::BossDefeated { boss: k.entity });
    }
}

#[cfg(test)]
mod tests;
