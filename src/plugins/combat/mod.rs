//! Combat plugin: health, shields, statuses and the shared damage path.
//!
//! Every source of damage (projectiles, melee strikes, statuses, shield novas)
//! goes through [`DamageWriter::apply`], which runs [`damage::resolve`] and turns the
//! outcome into knockback, outbound events and a [`Killed`] message.
//!
//! ---------------------------
//! ONE WRITE PATH
//! ---------------------------
//! - Shield absorption and the death latch are checked in exactly one place.
//!   A new damage source cannot forget the shield or report a second death.
//! - Shield novas are queued, not detonated inline: a nova can break another
//!   shield, and resolving that inside `apply` would need the query twice.
//!   `detonate_novas` drains the queue in bounded rounds instead.
//!
//! ---------------------------
//! KNOCKBACK WINDOW
//! ---------------------------
//! Damage lands in `FixedPostUpdate`, after avian has already integrated the step.
//! A knockback added to `LinearVelocity` here is only integrated on the *next*
//! step, and by then `Think` has run again. Brains that write velocity every tick
//! (players, walking bosses) would erase the push before it moved anything, so a
//! hit with a horizontal push also opens a short recovery window on the
//! [`Combatant`]. While it is open, movement damps `vel.x` by [`STAGGER_DAMPING`]
//! instead of overwriting it. Enemies get the same effect from their Hurt state.
//!
//! ```text
//! Advance:    recharge_shields
//! Resolve:    [projectile hits] + resolve_melee_strikes + tick_status_effects
//!             -> detonate_novas
//! ```

pub mod damage;
pub mod health;
pub mod shield;
pub mod status;

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::element::{Element, ElementalPayload};
use crate::common::events::{CombatEvent, CombatEvents};
use crate::common::schedule::CombatSet;
use crate::plugins::player::PlayerSlot;

pub use damage::{DamageOutcome, Hit, resolve};
pub use health::Health;
pub use shield::{Nova, Shield};
pub use status::StatusEffects;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

/// Which side a combatant fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Party,
    Hostile,
}

impl Faction {
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Faction::Party => Faction::Hostile,
            Faction::Hostile => Faction::Party,
        }
    }
}

/// Per-tick horizontal damping while a knockback owns the body.
pub const STAGGER_DAMPING: f32 = 0.85;
/// How long a horizontal knockback keeps self-propelled movement off `vel.x`.
pub const KNOCKBACK_RECOVERY_SECS: f32 = 0.2;

/// Anything that can be damaged.
///
/// `hit_pending` is raised by every damaging hit and consumed by the owner's brain
/// on its next think. `recovering` counts down the knockback window.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Combatant {
    pub faction: Faction,
    pub hit_pending: bool,
    pub recovering: f32,
}

impl Combatant {
    pub fn new(faction: Faction) -> Self {
        Self {
            faction,
            hit_pending: false,
            recovering: 0.0,
        }
    }

    /// Read and clear the pending-hit flag.
    #[inline]
    pub fn take_hit(&mut self) -> bool {
        std::mem::take(&mut self.hit_pending)
    }

    /// Count the knockback window down by `dt`. True while it was still open.
    pub fn recover(&mut self, dt: f32) -> bool {
        if self.recovering <= 0.0 {
            return false;
        }
        self.recovering = (self.recovering - dt).max(0.0);
        true
    }
}

/// Out of play: damage of any kind passes over it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Untargetable;

// -----------------------------------------------------------------------------
// Messages and queues
// -----------------------------------------------------------------------------

/// A combatant died this tick. Written once per death.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct Killed {
    pub entity: Entity,
    pub position: Vec2,
    pub source: Option<PlayerSlot>,
}

/// Area hit delivered by a melee attack.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MeleeStrike {
    pub attacker: Entity,
    pub faction: Faction,
    pub center: Vec2,
    pub radius: f32,
    pub hit: Hit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingNova {
    pub source: Entity,
    pub position: Vec2,
    pub faction: Faction,
    pub nova: Nova,
}

/// Novas released by breaking shields, detonated at the end of `Resolve`.
#[derive(Resource, Debug, Default)]
pub struct NovaQueue(pub Vec<PendingNova>);

/// Upper bound on chained nova rounds in one tick.
const MAX_NOVA_ROUNDS: usize = 4;

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.init_resource::<NovaQueue>()
        .add_message::<Killed>()
        .add_message::<MeleeStrike>();

    app.add_systems(FixedUpdate, recharge_shields.in_set(CombatSet::Advance));
    app.add_systems(
        FixedPostUpdate,
        (
            (resolve_melee_strikes, tick_status_effects),
            detonate_novas,
        )
            .chain()
            .in_set(CombatSet::Resolve),
    );
}

// -----------------------------------------------------------------------------
// Damage writer
// -----------------------------------------------------------------------------

type TargetData = (
    &'static mut Health,
    Option<&'static mut Shield>,
    Option<&'static mut LinearVelocity>,
    Option<&'static mut StatusEffects>,
    &'static Transform,
    &'static mut Combatant,
);

/// Single write path for damage. [`Untargetable`] entities are invisible to it.
#[derive(SystemParam)]
pub struct DamageWriter<'w, 's> {
    targets: Query<'w, 's, (Entity, TargetData), Without<Untargetable>>,
    events: ResMut<'w, CombatEvents>,
    killed: MessageWriter<'w, Killed>,
    novas: ResMut<'w, NovaQueue>,
}

impl DamageWriter<'_, '_> {
    pub fn position(&self, target: Entity) -> Option<Vec2> {
        self.targets
            .get(target)
            .ok()
            .map(|(_, (_, _, _, _, tf, _))| tf.translation.truncate())
    }

    pub fn is_alive(&self, target: Entity) -> bool {
        self.targets
            .get(target)
            .is_ok_and(|(_, (health, ..))| !health.is_dead())
    }

    /// Resolve `hit` against `target`. `None` when the target cannot take damage.
    pub fn apply(
        &mut self,
        target: Entity,
        hit: &Hit,
        source: Option<PlayerSlot>,
    ) -> Option<DamageOutcome> {
        let Ok((_, (mut health, mut shield, velocity, status, tf, mut combatant))) =
            self.targets.get_mut(target)
        else {
            return None;
        };
        if health.is_dead() {
            return None;
        }

        let position = tf.translation.truncate();
        let out = resolve(shield.as_deref_mut(), &mut health, hit, position);
        if out.is_noop() {
            return Some(out);
        }

        if let Some(mut vel) = velocity {
            vel.0 += out.knockback;
        }
        if out.knockback.x != 0.0 {
            combatant.recovering = KNOCKBACK_RECOVERY_SECS;
        }
        if out.dealt() > 0.0 {
            combatant.hit_pending = true;
            self.events.push(CombatEvent::DamageDealt {
                target,
                position,
                amount: out.dealt(),
                is_crit: hit.crit,
                element: hit.element,
            });
        }
        if out.shield_broken {
            self.events.push(CombatEvent::ShieldBroken {
                entity: target,
                position,
            });
            if let Some(nova) = out.nova {
                self.novas.0.push(PendingNova {
                    source: target,
                    position,
                    faction: combatant.faction,
                    nova,
                });
            }
        }
        if out.died {
            if let Some(mut status) = status {
                status.clear();
            }
            self.events.push(CombatEvent::EntityDied {
                entity: target,
                position,
            });
            self.killed.write(Killed {
                entity: target,
                position,
                source,
            });
        }
        Some(out)
    }

    /// Apply the lingering status of `element` to a living target.
    pub fn apply_status(&mut self, target: Entity, element: Element, payload: &ElementalPayload) {
        let Ok((_, (health, _, _, Some(mut status), ..))) = self.targets.get_mut(target) else {
            return;
        };
        if !health.is_dead() {
            status.apply(element, payload);
        }
    }

    /// Living members of `faction` whose centre lies within `radius` of `center`.
    pub fn in_radius(&self, center: Vec2, radius: f32, faction: Faction) -> Vec<Entity> {
        let r2 = radius * radius;
        self.targets
            .iter()
            .filter(|(_, (health, _, _, _, tf, c))| {
                c.faction == faction
                    && !health.is_dead()
                    && tf.translation.truncate().distance_squared(center) <= r2
            })
            .map(|(e, _)| e)
            .collect()
    }

    /// Hit every living member of `faction` in range except `except`.
    pub fn apply_radial(
        &mut self,
        center: Vec2,
        radius: f32,
        faction: Faction,
        hit: &Hit,
        except: Option<Entity>,
        source: Option<PlayerSlot>,
    ) -> usize {
        let victims = self.in_radius(center, radius, faction);
        let mut n = 0;
        for e in victims.into_iter().filter(|e| Some(*e) != except) {
            if self.apply(e, hit, source).is_some() {
                n += 1;
            }
        }
        n
    }

    /// Advance every status and apply the damage ticks that came due.
    pub fn tick_statuses(&mut self, dt: f32) {
        let mut due = Vec::new();
        for (e, (health, _, _, status, tf, _)) in &mut self.targets {
            let Some(mut status) = status else {
                continue;
            };
            if health.is_dead() {
                continue;
            }
            for tick in status.tick(dt).into_iter().flatten() {
                due.push((e, tf.translation.truncate(), tick));
            }
        }
        for (e, position, tick) in due {
            let hit = Hit::plain(tick.amount, position).with_element(tick.element);
            self.apply(e, &hit, None);
        }
    }

    fn take_novas(&mut self) -> Vec<PendingNova> {
        std::mem::take(&mut self.novas.0)
    }
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn recharge_shields(time: Res<Time<Fixed>>, mut q: Query<(&mut Shield, &Health)>) {
    let dt = time.delta_secs();
    for (mut shield, health) in &mut q {
        if !health.is_dead() {
            shield.tick_recharge(dt);
        }
    }
}

fn resolve_melee_strikes(mut strikes: MessageReader<MeleeStrike>, mut damage: DamageWriter) {
    for strike in strikes.read() {
        damage.apply_radial(
            strike.center,
            strike.radius,
            strike.faction.opponent(),
            &strike.hit,
            Some(strike.attacker),
            None,
        );
    }
}

fn tick_status_effects(time: Res<Time<Fixed>>, mut damage: DamageWriter) {
    damage.tick_statuses(time.delta_secs());
}

/// Detonate queued novas. A nova that breaks another shield chains into the next round.
pub fn detonate_novas(mut damage: DamageWriter) {
    for _ in 0..MAX_NOVA_ROUNDS {
        let batch = damage.take_novas();
        if batch.is_empty() {
            return;
        }
        for p in batch {
            let hit = Hit::plain(p.nova.damage, p.position)
                .with_element(p.nova.element)
                .with_knockback(Vec2::new(120.0, 60.0));
            damage.apply_radial(
                p.position,
                p.nova.radius,
                p.faction.opponent(),
                &hit,
                Some(p.source),
                None,
            );
        }
    }
    let dropped = damage.take_novas().len();
    if dropped > 0 {
        debug!("dropped {dropped} chained novas past the round limit");
    }
}
