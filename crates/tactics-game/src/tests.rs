//! Unit tests for tactics-game.

#[cfg(test)]
mod support {
    use tactics_core::ids::WorldId;
    use tactics_core::EngineConfig;
    use tactics_spatial::Layer;
    use tactics_world::World;

    use crate::game::Game;

    pub fn game() -> Game<u8> {
        let mut game = Game::new(EngineConfig::default());
        let mut world = World::new(WorldId::new());
        world.push_layer(Layer::new(0u8));
        game.register_world(world);
        game
    }
}

#[cfg(test)]
mod registry {
    use tactics_core::EngineConfig;

    use crate::game::Game;

    #[test]
    fn construction_under_debug_assertions_never_panics() {
        // `cfg!(debug_assertions)` is true for test builds, so a second
        // instance logs a warning and proceeds rather than panicking
        // (spec §5's fatal-error rule is reserved for release builds).
        let _a: Game<u8> = Game::new(EngineConfig::default());
        let _b: Game<u8> = Game::new(EngineConfig::default());
    }

    #[test]
    fn create_entity_player_team_and_join() {
        let mut game = super::support::game();
        let entity = game.create_entity("goblin");
        let player = game.create_player();
        let team = game.create_team();
        assert!(game.entity(entity).is_some());
        assert!(game.join_team(player, team).is_ok());
        assert_eq!(game.player(player).unwrap().team(), Some(team));
        assert!(game.team(team).unwrap().has_player(player));
    }

    #[test]
    fn own_entity_registers_ownership_and_rolls_up_sensed() {
        let mut game = super::support::game();
        let entity = game.create_entity("pawn");
        let player = game.create_player();
        let changes = game.own_entity(entity, player).expect("own_entity");
        let _ = changes; // no prior sensed contents to roll up yet
        assert!(game.entity(entity).unwrap().is_owned_by(player));
        assert!(game.player(player).unwrap().owns(entity));
    }
}

#[cfg(test)]
mod pipeline {
    use tactics_action::{Action, ActionKind, BroadcastType};
    use tactics_core::ids::WorldId;
    use tactics_core::vector::Vector;

    use crate::game::Game;

    #[test]
    fn publish_then_move_reindexes_and_updates_scope() {
        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let entity = game.create_entity("scout");
        let player = game.create_player();
        game.own_entity(entity, player).unwrap();

        let publish = Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(entity);
        assert!(game.execute(publish, false));
        assert!(game.entity(entity).unwrap().is_published());

        // A move far enough to leave the view_distance square behind
        // should touch the player's scope.
        let far = Vector::new(1000, 1000);
        let mv = Action::new(ActionKind::Move { position: far }).with_target(entity);
        assert!(game.execute(mv, false));
        assert_eq!(game.entity(entity).unwrap().position(), far);
    }

    #[test]
    fn unpublished_target_still_runs_modify_and_permission() {
        let mut game = super::support::game();
        let entity = game.create_entity("hidden");
        let mut add_slot = Action::new(ActionKind::AddSlot { name: "weapon".into() }).with_target(entity);
        add_slot.permissions.record(0, tactics_action::Permission::deny(None, None));
        // The unpublished fast path skips collect_listeners (no world to
        // search), but still runs modify/decide_permission against the
        // target itself, so a recorded deny blocks apply same as ever.
        assert!(!game.execute(add_slot, false));
        assert!(game.entity(entity).unwrap().slot("weapon").is_none());
    }

    #[test]
    fn modifier_attached_to_unpublished_entity_gets_a_local_fallback_subscription() {
        use tactics_component::{CapabilityScope, ComponentBehavior, RoleScopes};
        use tactics_core::container::ContainerId;

        struct DenyEverything;
        impl ComponentBehavior<Action> for DenyEverything {
            fn modify(&self, action: &mut Action) -> Vec<Action> {
                action.deny(100, None, None, Some("no".into()));
                Vec::new()
            }
            fn is_modifier(&self) -> bool {
                true
            }
        }

        let mut game = super::support::game();
        let entity = game.create_entity("hidden");
        // Declared at World scope — normally valid for an entity-owned
        // component — but the entity has no world yet, so resolution
        // fails and wire_component must fall back to a local subscription
        // rather than skip wiring entirely (spec §4.1).
        let scopes = RoleScopes { modifier: Some(CapabilityScope::World), ..Default::default() };
        game.attach_component(ContainerId::Entity(entity), scopes, false, Box::new(DenyEverything))
            .unwrap();

        let add_slot = Action::new(ActionKind::AddSlot { name: "weapon".into() }).with_target(entity);
        assert!(!game.execute(add_slot, false));
        assert!(game.entity(entity).unwrap().slot("weapon").is_none());
    }

    #[test]
    fn counter_chain_halts_at_max_nested_depth() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        use tactics_component::{CapabilityScope, ComponentBehavior, RoleScopes};
        use tactics_core::container::ContainerId;

        struct CounterBounce(Arc<AtomicUsize>);
        impl ComponentBehavior<Action> for CounterBounce {
            fn modify(&self, action: &mut Action) -> Vec<Action> {
                self.0.fetch_add(1, Ordering::SeqCst);
                vec![Action::new(action.kind.clone()).with_target(action.target.unwrap())]
            }
            fn is_modifier(&self) -> bool {
                true
            }
        }

        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let entity = game.create_entity("bouncer");
        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(entity),
            false,
        );

        let calls = Arc::new(AtomicUsize::new(0));
        let scopes = RoleScopes { modifier: Some(CapabilityScope::Entity), ..Default::default() };
        game.attach_component(ContainerId::Entity(entity), scopes, false, Box::new(CounterBounce(calls.clone())))
            .unwrap();

        game.execute(Action::new(ActionKind::AddSlot { name: "x".into() }).with_target(entity), false);

        // modify runs once per nesting level from 0 through MAX_NESTED_DEPTH
        // inclusive, then `can_recurse` stops the chain (spec §8 scenario 5:
        // "any action chain terminates in ≤ 10 levels").
        assert_eq!(calls.load(Ordering::SeqCst), (tactics_action::MAX_NESTED_DEPTH + 1) as usize);
    }

    #[test]
    fn two_sensors_sensing_the_same_entity_dont_collide_on_removal() {
        use tactics_core::using::UsingRef;

        let mut game = super::support::game();
        let observer = game.create_entity("observer");
        let sensed = game.create_entity("prey");
        let sensor_a = tactics_core::ids::ComponentId::new();
        let sensor_b = tactics_core::ids::ComponentId::new();

        let mut sense_a = Action::new(ActionKind::SenseEntity { sensed }).with_target(observer);
        sense_a.using = Some(UsingRef::Component(sensor_a));
        assert!(game.execute(sense_a, false));

        let mut sense_b = Action::new(ActionKind::SenseEntity { sensed }).with_target(observer);
        sense_b.using = Some(UsingRef::Component(sensor_b));
        assert!(game.execute(sense_b, false));

        let mut lose_a = Action::new(ActionKind::LoseEntity { sensed }).with_target(observer);
        lose_a.using = Some(UsingRef::Component(sensor_a));
        game.execute(lose_a, false);

        // Sensor B still senses `prey`, so the entity's rolled-up node must
        // still contain it even though sensor A just lost it (spec §8's
        // NestedMap rollup invariant).
        let node = game.entity(observer).unwrap().sensed_node_id();
        assert!(game.sensed.contains(&node, &sensed));
    }

    #[test]
    fn publish_unknown_world_fails_and_entity_stays_unpublished() {
        let mut game = super::support::game();
        let entity = game.create_entity("lost");
        let bogus = WorldId::new();
        let publish = Action::new(ActionKind::PublishEntity { world: bogus, position: Vector::new(0, 0) }).with_target(entity);
        let action = game.execute(publish, false);
        assert!(!action);
        assert!(!game.entity(entity).unwrap().is_published());
    }

    #[test]
    fn modifier_deny_blocks_apply_but_react_still_runs() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        use tactics_component::{CapabilityScope, ComponentBehavior, RoleScopes};
        use tactics_core::container::ContainerId;

        struct DenyEverything;
        impl ComponentBehavior<Action> for DenyEverything {
            fn modify(&self, action: &mut Action) -> Vec<Action> {
                action.deny(100, None, None, Some("no".into()));
                Vec::new()
            }
            fn is_modifier(&self) -> bool {
                true
            }
        }

        struct ReactFlag(Arc<AtomicBool>);
        impl ComponentBehavior<Action> for ReactFlag {
            fn react(&self, _action: &Action) -> Vec<Action> {
                self.0.store(true, Ordering::SeqCst);
                Vec::new()
            }
            fn is_reacter(&self) -> bool {
                true
            }
        }

        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let entity = game.create_entity("ward");
        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(entity),
            false,
        );

        let scopes = RoleScopes { modifier: Some(CapabilityScope::Entity), ..Default::default() };
        game.attach_component(ContainerId::Entity(entity), scopes, false, Box::new(DenyEverything))
            .unwrap();

        let reacted = Arc::new(AtomicBool::new(false));
        let react_scopes = RoleScopes { reacter: Some(CapabilityScope::Entity), ..Default::default() };
        game.attach_component(ContainerId::Entity(entity), react_scopes, false, Box::new(ReactFlag(reacted.clone())))
            .unwrap();

        let add_slot = Action::new(ActionKind::AddSlot { name: "shield".into() }).with_target(entity);
        let applied = game.execute(add_slot, false);
        assert!(!applied, "modifier's deny should block apply");
        assert!(game.entity(entity).unwrap().slot("shield").is_none());
        assert!(reacted.load(Ordering::SeqCst), "react still runs on a denied action");
    }

    #[test]
    fn broadcast_full_reaches_every_player() {
        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let entity = game.create_entity("herald");
        let a = game.create_player();
        let b = game.create_player();
        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(entity),
            false,
        );

        let mut custom = Action::new(ActionKind::Custom { name: "announcement".into(), payload: None }).with_target(entity);
        custom.broadcast_type = BroadcastType::Full;
        game.execute(custom, false);

        let outgoing = game.broadcast_all();
        assert_eq!(outgoing.get(&a).map(Vec::len), Some(1));
        assert_eq!(outgoing.get(&b).map(Vec::len), Some(1));
    }
}

#[cfg(test)]
mod ability {
    use tactics_action::{Action, ActionKind, Event};
    use tactics_core::ids::EntityId;
    use tactics_core::vector::Vector;

    use crate::ability::{Ability, CastArgs};
    use crate::game::Game;

    struct HealSelf;
    impl Ability<u8> for HealSelf {
        fn name(&self) -> &str {
            "heal_self"
        }

        fn cast(&self, _game: &Game<u8>, caster: EntityId, _args: CastArgs) -> Event {
            Event::single(Action::new(ActionKind::PropertyAdjustment { name: "hp".into(), amount: 10.0 }).with_target(caster))
        }
    }

    #[test]
    fn cast_queues_event_and_run_tick_applies_it() {
        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let entity = game.create_entity("paladin");
        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(entity),
            false,
        );
        let property = tactics_component::Property::new(entity, "hp", 50.0, 0.0, 100.0);
        game.entity_mut(entity).unwrap().add_property("hp", property).unwrap();

        game.register_ability(Box::new(HealSelf));
        assert!(game.cast("heal_self", entity, CastArgs::default()));
        let executed = game.run_tick();
        assert_eq!(executed, 1);
        assert_eq!(game.entity(entity).unwrap().property("hp").unwrap().current(), 60.0);
    }

    #[test]
    fn cast_unknown_ability_returns_false() {
        let mut game = super::support::game();
        let entity = game.create_entity("nobody");
        assert!(!game.cast("does_not_exist", entity, CastArgs::default()));
    }
}

#[cfg(test)]
mod message {
    use crate::message::CastRejection;

    #[test]
    fn handle_cast_rejects_non_owner() {
        let mut game = super::support::game();
        let entity = game.create_entity("guarded");
        let owner = game.create_player();
        let intruder = game.create_player();
        game.own_entity(entity, owner).unwrap();

        let result = game.handle_cast(intruder, entity, "whatever", None, None, None, None);
        assert_eq!(result, Err(CastRejection::NotOwner));
    }

    #[test]
    fn handle_cast_rejects_unknown_client() {
        use tactics_core::ids::PlayerId;

        let mut game = super::support::game();
        let entity = game.create_entity("solo");
        let result = game.handle_cast(PlayerId::new(), entity, "whatever", None, None, None, None);
        assert_eq!(result, Err(CastRejection::UnknownClient));
    }
}

#[cfg(test)]
mod serialize {
    use tactics_action::{Action, ActionKind};
    use tactics_core::vector::Vector;

    #[test]
    fn serialize_for_scope_only_includes_owned_and_sensed_entities() {
        let mut game = super::support::game();
        let world = game.worlds.keys().next().copied().unwrap();
        let owned = game.create_entity("mine");
        let stranger = game.create_entity("theirs");
        let player = game.create_player();
        game.own_entity(owned, player).unwrap();

        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(owned),
            false,
        );
        game.execute(
            Action::new(ActionKind::PublishEntity { world, position: Vector::new(0, 0) }).with_target(stranger),
            false,
        );

        let snapshot = game.serialize_for_scope(player).expect("player exists");
        let ids: Vec<_> = snapshot.entities.iter().map(|e| e.id).collect();
        assert!(ids.contains(&owned));
        assert!(!ids.contains(&stranger));
    }
}
