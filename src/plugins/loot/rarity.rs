use std::fmt;

use bevy::prelude::*;
use rand::Rng;

use crate::common::weighted;

/// Quality tier of a generated item. Ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Drop weights, indexed like [`Rarity::ALL`].
    pub const WEIGHTS: [f32; 5] = [50.0, 28.0, 14.0, 7.0, 1.0];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `None` for anything outside the tier range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn weight(self) -> f32 {
        Self::WEIGHTS[self.index()]
    }

    pub fn multiplier(self) -> f32 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.15,
            Rarity::Rare => 1.3,
            Rarity::Epic => 1.5,
            Rarity::Legendary => 1.8,
        }
    }

    /// Probability that a generated weapon carries an elemental affix.
    pub fn element_chance(self) -> f32 {
        match self {
            Rarity::Common => 0.05,
            Rarity::Uncommon => 0.15,
            Rarity::Rare => 0.35,
            Rarity::Epic => 0.6,
            Rarity::Legendary => 0.85,
        }
    }

    pub fn name_fragment(self) -> &'static str {
        match self {
            Rarity::Common => "",
            Rarity::Uncommon => "Fine",
            Rarity::Rare => "Slick",
            Rarity::Epic => "Far-Out",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Rarity::Common => Color::srgb(0.85, 0.85, 0.85),
            Rarity::Uncommon => Color::srgb(0.3, 0.9, 0.35),
            Rarity::Rare => Color::srgb(0.3, 0.55, 1.0),
            Rarity::Epic => Color::srgb(0.7, 0.3, 0.95),
            Rarity::Legendary => Color::srgb(1.0, 0.6, 0.1),
        }
    }

    /// Cumulative weighted roll over every tier.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::roll_at_least(Rarity::Common, rng)
    }

    /// Weighted roll restricted to tiers at or above `floor`.
    pub fn roll_at_least<R: Rng + ?Sized>(floor: Rarity, rng: &mut R) -> Self {
        let mut weights = Self::WEIGHTS;
        for w in &mut weights[..floor.index()] {
            *w = 0.0;
        }
        weighted::pick(&weights, rng)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(floor)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
