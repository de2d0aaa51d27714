//! `Ability` — the pluggable action-generator trait (spec §4.5):
//! `cast(caster, {using, granted_by, target, params}) -> Event`. Abilities
//! build an ordered list of actions; they never execute inline. `Game`
//! queues whatever they produce, and the tick's FIFO drain runs it.
//!
//! Grounded on `dt-behavior`'s `BehaviorModel` trait: one required method
//! that turns a read-only view of state plus some per-call arguments into
//! a list of things to do, implemented `Send + Sync` so one instance can
//! be registered once and invoked repeatedly.

use tactics_core::ids::EntityId;
use tactics_core::using::UsingRef;

use crate::game::Game;

/// The per-call arguments `cast` receives beyond the caster itself (spec
/// §4.5, and the `CAST` message's `using`/`granted_by`/`target`/`params`
/// fields from spec §6).
#[derive(Clone, Debug, Default)]
pub struct CastArgs {
    pub using: Option<UsingRef>,
    pub granted_by: Option<EntityId>,
    pub target: Option<EntityId>,
    pub params: Option<serde_json::Value>,
}

/// Pluggable ability logic. An `Ability` only reads `Game` state to decide
/// what actions to build; it never mutates directly — that's what makes
/// `Event` queueing (rather than inline execution) safe to do uniformly.
pub trait Ability<T>: Send + Sync {
    /// The name abilities are registered and looked up by (spec §6's
    /// `CAST.ability_name`).
    fn name(&self) -> &str;

    fn cast(&self, game: &Game<T>, caster: EntityId, args: CastArgs) -> tactics_action::Event;
}

impl<T> Game<T> {
    /// Register an ability under its own `name()`. Replaces any ability
    /// previously registered under the same name.
    pub fn register_ability(&mut self, ability: Box<dyn Ability<T>>) {
        self.abilities.insert(ability.name().to_string(), ability);
    }

    pub fn has_ability_registered(&self, name: &str) -> bool {
        self.abilities.contains_key(name)
    }

    /// Look up `name`, run its `cast`, and queue the resulting `Event`.
    /// Returns `false` if no ability is registered under that name —
    /// callers validating a `CAST` message (spec §6) turn that into the
    /// human-readable rejection the message envelope asks for.
    pub fn cast(&mut self, name: &str, caster: EntityId, args: CastArgs) -> bool {
        let Some(ability) = self.abilities.get(name) else {
            return false;
        };
        let event = ability.cast(self, caster, args);
        self.queue.push_event(event);
        true
    }
}
