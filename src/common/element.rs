//! Elements, elemental payloads and per-element resistances.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Element {
    #[default]
    None,
    Fire,
    Ice,
    Electric,
    Explosive,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::None,
        Element::Fire,
        Element::Ice,
        Element::Electric,
        Element::Explosive,
    ];

    /// Elements that can be rolled as an affix.
    pub const AFFIXES: [Element; 4] = [
        Element::Fire,
        Element::Ice,
        Element::Electric,
        Element::Explosive,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name_fragment(self) -> &'static str {
        match self {
            Element::None => "",
            Element::Fire => "Blazing",
            Element::Ice => "Frosty",
            Element::Electric => "Electric",
            Element::Explosive => "Explosive",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Element::None => "none",
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Electric => "electric",
            Element::Explosive => "explosive",
        };
        f.write_str(s)
    }
}

/// Secondary effect carried by a shot: chance to apply a status of `element`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementalPayload {
    pub damage: f32,
    pub chance: f32,
    pub duration: f32,
}

/// Fraction of incoming damage ignored, per element, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resistances([f32; 5]);

impl Resistances {
    pub fn get(&self, element: Element) -> f32 {
        self.0[element.index()]
    }

    pub fn set(&mut self, element: Element, value: f32) {
        self.0[element.index()] = value.clamp(0.0, 1.0);
    }

    pub fn with(mut self, element: Element, value: f32) -> Self {
        self.set(element, value);
        self
    }

    /// Elements with a non-zero resistance.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f32)> + '_ {
        Element::ALL
            .into_iter()
            .map(|e| (e, self.get(e)))
            .filter(|(_, v)| *v > 0.0)
    }
}
