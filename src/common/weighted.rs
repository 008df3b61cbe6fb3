//! Cumulative weighted selection.

use rand::Rng;

/// Index selected by a roll in `[0, total)` walking the cumulative weights.
///
/// Non-positive weights are never selected. Returns `None` when nothing has weight.
pub fn pick_with_roll(weights: &[f32], roll: f32) -> Option<usize> {
    let mut last = None;
    let mut acc = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        acc += w;
        last = Some(i);
        if roll < acc {
            return Some(i);
        }
    }
    // Float drift at the top end falls back to the last weighted entry.
    last
}

pub fn pick<R: Rng + ?Sized>(weights: &[f32], rng: &mut R) -> Option<usize> {
    let total: f32 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    pick_with_roll(weights, rng.random::<f32>() * total)
}
