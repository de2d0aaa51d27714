//! `Property` — a named numeric stat with an ordered modification chain.
//!
//! # Design
//!
//! A `Property` stores only its raw `current` value and a `min`/`max`
//! clamp; everything layered on top of it lives in an ordered
//! [`Modification`] list. [`Property::effective_value`] is recomputed by
//! folding the list over `current` each time it is read — cheap, since
//! modification chains are short (a handful of buffs/auras at most), and
//! it keeps the effective value always in sync with whatever modifiers are
//! active rather than requiring every modifier add/remove to patch a
//! cached total.

use tactics_core::ids::EntityId;

/// One entry in a property's modification chain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modification {
    /// `value += amount`
    Adjustment(f64),
    /// `value *= factor`
    Multiplier(f64),
    /// `value = amount`, discarding everything applied before it.
    Absolute(f64),
}

impl Modification {
    fn apply(&self, value: f64) -> f64 {
        match *self {
            Modification::Adjustment(amount) => value + amount,
            Modification::Multiplier(factor) => value * factor,
            Modification::Absolute(amount) => amount,
        }
    }
}

/// A named numeric stat belonging to exactly one entity.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    entity_id: EntityId,
    name: String,
    current: f64,
    min: f64,
    max: f64,
    modifications: Vec<Modification>,
}

impl Property {
    pub fn new(entity_id: EntityId, name: impl Into<String>, current: f64, min: f64, max: f64) -> Self {
        Self {
            entity_id,
            name: name.into(),
            current: current.clamp(min, max),
            min,
            max,
            modifications: Vec::new(),
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// The raw stored value, before the modification chain is applied.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Directly set the stored value (e.g. `HP.current -= damage`), clamped
    /// to `[min, max]`.
    pub fn set_current(&mut self, value: f64) {
        self.current = value.clamp(self.min, self.max);
    }

    /// Append a modification to the chain.
    pub fn push_modification(&mut self, modification: Modification) {
        self.modifications.push(modification);
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    pub fn clear_modifications(&mut self) {
        self.modifications.clear();
    }

    /// `current`, folded through every modification in list order, clamped
    /// to `[min, max]`. This is the value gameplay code should read.
    pub fn effective_value(&self) -> f64 {
        let value = self
            .modifications
            .iter()
            .fold(self.current, |value, modification| modification.apply(value));
        value.clamp(self.min, self.max)
    }
}
