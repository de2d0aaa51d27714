//! paladin_heals_self — smallest end-to-end demo of the tactics-game
//! pipeline, wiring up scenario 1 and scenario 2 from the engine's literal
//! end-to-end test list: a Paladin healing itself via a registered
//! ability, then an `AuraOfProtection` modifier denying an incoming
//! attack.

use tactics_action::{Action, ActionKind, Event};
use tactics_component::{CapabilityScope, ComponentBehavior, RoleScopes};
use tactics_core::container::ContainerId;
use tactics_core::ids::EntityId;
use tactics_core::vector::Vector;
use tactics_core::EngineConfig;
use tactics_game::{Ability, CastArgs, Game};
use tactics_spatial::Layer;
use tactics_world::World;

struct Heal;

impl Ability<()> for Heal {
    fn name(&self) -> &str {
        "Heal"
    }

    fn cast(&self, _game: &Game<()>, caster: EntityId, _args: CastArgs) -> Event {
        Event::single(Action::new(ActionKind::PropertyAdjustment { name: "HP".into(), amount: 5.0 }).with_target(caster))
    }
}

/// Subscribed as a modifier at world scope: denies any action targeting
/// its protector, at a priority that beats the default allow.
struct AuraOfProtection {
    protector: EntityId,
}

impl ComponentBehavior<Action> for AuraOfProtection {
    fn modify(&self, action: &mut Action) -> Vec<Action> {
        if action.target == Some(self.protector) {
            action.deny(5, Some(ContainerId::Entity(self.protector)), None, Some("protected".into()));
        }
        Vec::new()
    }

    fn is_modifier(&self) -> bool {
        true
    }
}

fn main() {
    println!("=== paladin_heals_self ===");

    let mut game: Game<()> = Game::new(EngineConfig::default());
    let mut world = World::new(tactics_core::ids::WorldId::new());
    world.push_layer(Layer::new(()));
    let world_id = game.register_world(world);

    // 1. Paladin heals self.
    let paladin = game.create_entity("Paladin");
    let owner = game.create_player();
    game.own_entity(paladin, owner).expect("own_entity");
    game.entity_mut(paladin)
        .unwrap()
        .add_property("HP", tactics_component::Property::new(paladin, "HP", 10.0, 0.0, 20.0))
        .expect("add_property");
    game.execute(
        Action::new(ActionKind::PublishEntity { world: world_id, position: Vector::new(0, 0) }).with_target(paladin),
        false,
    );

    game.register_ability(Box::new(Heal));
    game.cast("Heal", paladin, CastArgs::default());
    let executed = game.run_tick();
    let hp = game.entity(paladin).unwrap().property("HP").unwrap().current();
    println!("after Heal: {executed} action(s) executed, Paladin HP = {hp}");
    assert_eq!(hp, 15.0);

    let outgoing = game.broadcast_all();
    println!("broadcast entries to Paladin's owner: {}", outgoing.get(&owner).map(Vec::len).unwrap_or(0));

    // 2. Aura modifier denies an attack on the Paladin. Owned by the
    // Paladin itself but declared at world scope, so it wires onto the
    // world's `subscribers[Modifier]` and sees every action targeting an
    // entity in that world, not just actions targeting the Paladin.
    game.attach_component(
        ContainerId::Entity(paladin),
        RoleScopes { modifier: Some(CapabilityScope::World), ..Default::default() },
        false,
        Box::new(AuraOfProtection { protector: paladin }),
    )
    .expect("attach_component");

    let zombie = game.create_entity("Zombie");
    game.execute(
        Action::new(ActionKind::PublishEntity { world: world_id, position: Vector::new(1, 1) }).with_target(zombie),
        false,
    );

    let attack = Action::new(ActionKind::PropertyAdjustment { name: "HP".into(), amount: -5.0 })
        .with_caster(zombie)
        .with_target(paladin);
    let applied = game.execute(attack, false);
    let hp_after_attack = game.entity(paladin).unwrap().property("HP").unwrap().current();
    println!("attack applied = {applied}, Paladin HP after aura = {hp_after_attack}");
    assert!(!applied);
    assert_eq!(hp_after_attack, 15.0);
}
