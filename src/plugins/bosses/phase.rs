//! Health-gated boss phases.

use bevy::prelude::*;

/// Health fractions at which phases 2 and 3 begin.
pub const PHASE_THRESHOLDS: [f32; 2] = [0.66, 0.33];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePromotion {
    pub from: u8,
    pub to: u8,
}

impl PhasePromotion {
    /// Every phase entered by this promotion, in order.
    pub fn entered(&self) -> impl Iterator<Item = u8> {
        (self.from + 1)..=self.to
    }
}

/// Current phase of a boss. Starts at 1 and never goes back down.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PhaseTracker {
    current: u8,
    thresholds: Vec<f32>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new(&PHASE_THRESHOLDS)
    }
}

impl PhaseTracker {
    /// `thresholds` in descending order.
    pub fn new(thresholds: &[f32]) -> Self {
        Self {
            current: 1,
            thresholds: thresholds.to_vec(),
        }
    }

    #[inline]
    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn last_phase(&self) -> u8 {
        self.thresholds.len() as u8 + 1
    }

    /// Promote past every threshold `health_fraction` has reached.
    pub fn update(&mut self, health_fraction: f32) -> Option<PhasePromotion> {
        let from = self.current;
        for (i, &threshold) in self.thresholds.iter().enumerate() {
            let phase = i as u8 + 2;
            if health_fraction <= threshold && self.current < phase {
                self.current = phase;
            }
        }
        (self.current > from).then_some(PhasePromotion {
            from,
            to: self.current,
        })
    }
}
