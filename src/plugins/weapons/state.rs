use bevy::prelude::*;

use crate::plugins::player::PlayerIntent;

use super::loadout::{Loadout, MAX_WEAPONS};

/// What one weapon update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeaponStep {
    pub fired: bool,
    pub swapped: bool,
    pub reload_started: bool,
    pub reload_finished: bool,
}

/// Trigger, magazine and reload bookkeeping for one player's loadout.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct WeaponState {
    cooldown: f32,
    /// Rounds left per slot; `None` is a full magazine.
    rounds: [Option<u32>; MAX_WEAPONS],
    reload_left: Option<f32>,
    swap_held: bool,
    reload_held: bool,
}

impl WeaponState {
    pub fn rounds(&self, loadout: &Loadout, slot: usize) -> u32 {
        let magazine = loadout.slot(slot).map_or(0, |w| w.magazine);
        self.rounds[slot].unwrap_or(magazine)
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reload_left.is_some()
    }

    fn start_reload(&mut self, loadout: &Loadout, out: &mut WeaponStep) {
        if let Some(w) = loadout.active() {
            self.reload_left = Some(w.reload_time);
            out.reload_started = true;
        }
    }

    /// Advance by `dt` under `intent`. Fire is held-to-shoot; swap and reload act on press.
    pub fn step(&mut self, loadout: &mut Loadout, intent: &PlayerIntent, dt: f32) -> WeaponStep {
        let mut out = WeaponStep::default();
        self.cooldown = (self.cooldown - dt).max(0.0);

        let swap_pressed = intent.swap && !self.swap_held;
        self.swap_held = intent.swap;
        if swap_pressed && loadout.cycle() {
            out.swapped = true;
            self.reload_left = None;
        }

        let slot = loadout.active_slot();
        let Some(weapon) = loadout.active() else {
            return out;
        };
        let magazine = weapon.magazine;
        let fire_rate = weapon.fire_rate;

        if let Some(left) = self.reload_left.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.reload_left = None;
                self.rounds[slot] = Some(magazine);
                out.reload_finished = true;
            }
        }

        let reload_pressed = intent.reload && !self.reload_held;
        self.reload_held = intent.reload;
        let rounds = self.rounds(loadout, slot);
        if reload_pressed && !self.is_reloading() && rounds < magazine {
            self.start_reload(loadout, &mut out);
        }

        if intent.fire && !self.is_reloading() && self.cooldown <= 0.0 {
            if rounds > 0 {
                let left = rounds - 1;
                self.rounds[slot] = Some(left);
                self.cooldown = 1.0 / fire_rate.max(0.01);
                out.fired = true;
                if left == 0 {
                    self.start_reload(loadout, &mut out);
                }
            } else {
                self.start_reload(loadout, &mut out);
            }
        }
        out
    }
}
