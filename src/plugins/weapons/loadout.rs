use bevy::prelude::*;

use crate::plugins::loot::{LootDescriptor, ShieldInstance, WeaponInstance};

pub const MAX_WEAPONS: usize = 4;

/// Plain loadout value exchanged with the save subsystem.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SavedLoadout {
    pub weapons: Vec<WeaponInstance>,
    pub shield: Option<ShieldInstance>,
}

/// Equipped items of one player: up to four weapons and one shield.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Loadout {
    weapons: [Option<WeaponInstance>; MAX_WEAPONS],
    shield: Option<ShieldInstance>,
    active: usize,
}

impl Loadout {
    pub fn new(weapons: impl IntoIterator<Item = WeaponInstance>, shield: Option<ShieldInstance>) -> Self {
        let mut slots: [Option<WeaponInstance>; MAX_WEAPONS] = Default::default();
        for (slot, w) in slots.iter_mut().zip(weapons) {
            *slot = Some(w);
        }
        Self {
            weapons: slots,
            shield,
            active: 0,
        }
    }

    /// Saved loadout, or the starter kit when it holds no weapon.
    pub fn from_saved(saved: &SavedLoadout) -> Self {
        if saved.weapons.is_empty() {
            return Self::new(
                [WeaponInstance::starter()],
                Some(saved.shield.clone().unwrap_or_else(ShieldInstance::starter)),
            );
        }
        Self::new(saved.weapons.iter().cloned(), saved.shield.clone())
    }

    pub fn to_saved(&self) -> SavedLoadout {
        SavedLoadout {
            weapons: self.weapons().cloned().collect(),
            shield: self.shield.clone(),
        }
    }

    #[inline]
    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&WeaponInstance> {
        self.weapons[self.active].as_ref()
    }

    pub fn slot(&self, index: usize) -> Option<&WeaponInstance> {
        self.weapons.get(index).and_then(Option::as_ref)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponInstance> {
        self.weapons.iter().flatten()
    }

    pub fn shield(&self) -> Option<&ShieldInstance> {
        self.shield.as_ref()
    }

    pub fn accepts(&self, loot: &LootDescriptor) -> bool {
        match loot {
            LootDescriptor::Weapon(_) => self.weapons.iter().any(Option::is_none),
            LootDescriptor::Shield(_) => self.shield.is_none(),
        }
    }

    /// Put `loot` into the first free place. Returns `false` if there was none.
    pub fn take(&mut self, loot: LootDescriptor) -> bool {
        match loot {
            LootDescriptor::Weapon(w) => match self.weapons.iter_mut().find(|s| s.is_none()) {
                Some(slot) => {
                    *slot = Some(w);
                    true
                }
                None => false,
            },
            LootDescriptor::Shield(s) if self.shield.is_none() => {
                self.shield = Some(s);
                true
            }
            LootDescriptor::Shield(_) => false,
        }
    }

    /// Make the next occupied slot active. Returns `true` if the active slot changed.
    pub fn cycle(&mut self) -> bool {
        let next = (1..MAX_WEAPONS)
            .map(|step| (self.active + step) % MAX_WEAPONS)
            .find(|&i| self.weapons[i].is_some());
        match next {
            Some(i) => {
                self.active = i;
                true
            }
            None => false,
        }
    }
}
