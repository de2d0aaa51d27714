//! Unit tests for tactics-entity.

struct DummyAction;

#[cfg(test)]
mod entity {
    use tactics_component::{CapabilityScope, ComponentContainer, Property};
    use tactics_core::container::ContainerId;
    use tactics_core::ids::{EntityId, PlayerId, TeamId, WorldId};
    use tactics_core::vector::Vector;

    use crate::grant::Grant;
    use crate::Entity;

    use super::DummyAction;

    fn entity() -> Entity<DummyAction> {
        Entity::new(EntityId::new(), "zombie")
    }

    #[test]
    fn new_entity_is_unpublished_and_inactive() {
        let e = entity();
        assert!(!e.is_published());
        assert!(!e.active());
        assert_eq!(e.name(), "zombie");
    }

    #[test]
    fn publish_then_unpublish_round_trips() {
        let mut e = entity();
        let world = WorldId::new();
        e._publish(world, Vector::new(10, 10));
        assert!(e.is_published());
        assert_eq!(e.world(), Some(world));
        assert_eq!(e.position(), Vector::new(10, 10));

        e._unpublish();
        assert!(!e.is_published());
        assert_eq!(e.world(), None);
    }

    #[test]
    fn slot_lifecycle() {
        let mut e = entity();
        assert!(e.equip("R. Hand", EntityId::new()).is_err());

        e.add_slot("R. Hand");
        let sword = EntityId::new();
        e.equip("R. Hand", sword).unwrap();
        assert_eq!(e.slot("R. Hand"), Some(Some(sword)));

        assert!(e.equip("R. Hand", EntityId::new()).is_err());

        let removed = e.unequip("R. Hand").unwrap();
        assert_eq!(removed, Some(sword));
        assert_eq!(e.slot("R. Hand"), Some(None));
    }

    #[test]
    fn add_slot_is_idempotent() {
        let mut e = entity();
        e.add_slot("R. Hand");
        e.equip("R. Hand", EntityId::new()).unwrap();
        e.add_slot("R. Hand");
        assert!(e.slot("R. Hand").unwrap().is_some());
    }

    #[test]
    fn remove_unknown_slot_errors() {
        let mut e = entity();
        assert!(e.remove_slot("nope").is_err());
    }

    #[test]
    fn property_lifecycle() {
        let mut e = entity();
        let prop = Property::new(e.id(), "HP", 10.0, 0.0, 10.0);
        e.add_property("HP", prop).unwrap();
        assert!(e.add_property("HP", Property::new(e.id(), "HP", 5.0, 0.0, 5.0)).is_err());

        assert_eq!(e.property("HP").unwrap().current(), 10.0);
        let removed = e.remove_property("HP").unwrap();
        assert_eq!(removed.current(), 10.0);
        assert!(e.remove_property("HP").is_err());
    }

    #[test]
    fn learn_ability_is_idempotent_per_grant() {
        let mut e = entity();
        let granter = EntityId::new();
        e.learn_ability("heal", Grant::new("heal").granted_by(granter));
        e.learn_ability("heal", Grant::new("heal").granted_by(granter));
        assert_eq!(e.grants("heal").len(), 1);

        e.learn_ability("heal", Grant::new("heal"));
        assert_eq!(e.grants("heal").len(), 2);
    }

    #[test]
    fn forget_ability_removes_matching_grant_only() {
        let mut e = entity();
        let granter = EntityId::new();
        e.learn_ability("heal", Grant::new("heal").granted_by(granter));
        e.learn_ability("heal", Grant::new("heal"));

        let changed = e.forget_ability("heal", Some(granter), None);
        assert!(changed);
        assert_eq!(e.grants("heal").len(), 1);
        assert!(e.has_ability("heal"));

        e.forget_ability("heal", None, None);
        assert!(!e.has_ability("heal"));
    }

    #[test]
    fn ownership_round_trips_and_rejects_double_own() {
        let mut e = entity();
        let player = PlayerId::new();
        e._add_owner(player).unwrap();
        assert!(e.is_owned_by(player));
        assert!(e._add_owner(player).is_err());

        e._remove_owner(player).unwrap();
        assert!(!e.is_owned_by(player));
        assert!(e._remove_owner(player).is_err());
    }

    #[test]
    fn sensed_node_id_is_stable_for_same_entity() {
        let e = entity();
        assert_eq!(e.sensed_node_id(), e.sensed_node_id());
    }

    #[test]
    fn get_container_by_scope_resolves_known_edges() {
        let mut e = entity();
        let world = WorldId::new();
        let player = PlayerId::new();
        let team = TeamId::new();
        e._publish(world, Vector::new(0, 0));
        e._add_owner(player).unwrap();
        e._join_team(team);

        assert_eq!(e.get_container_by_scope(CapabilityScope::World), Some(ContainerId::World(world)));
        assert_eq!(e.get_container_by_scope(CapabilityScope::Player), Some(ContainerId::Player(player)));
        assert_eq!(e.get_container_by_scope(CapabilityScope::Team), Some(ContainerId::Team(team)));
        assert_eq!(e.get_container_by_scope(CapabilityScope::Game), Some(ContainerId::Game));
        assert_eq!(e.get_container_by_scope(CapabilityScope::Entity), None);
    }

    #[test]
    fn container_id_matches_entity_id() {
        let e = entity();
        assert_eq!(e.container_id(), ContainerId::Entity(e.id()));
        assert!(e.catalog().is_empty());
    }
}

#[cfg(test)]
mod player {
    use tactics_component::{CapabilityScope, ComponentContainer};
    use tactics_core::container::ContainerId;
    use tactics_core::ids::{EntityId, PlayerId, TeamId, WorldId};
    use tactics_core::vector::Vector;

    use crate::Player;

    use super::DummyAction;

    #[test]
    fn own_entity_is_idempotent() {
        let mut p: Player<DummyAction> = Player::new(PlayerId::new());
        let e = EntityId::new();
        assert!(p._own_entity(e));
        assert!(!p._own_entity(e));
        assert!(p.owns(e));
    }

    #[test]
    fn disown_removes_entity() {
        let mut p: Player<DummyAction> = Player::new(PlayerId::new());
        let e = EntityId::new();
        p._own_entity(e);
        assert!(p._disown_entity(e));
        assert!(!p.owns(e));
    }

    #[test]
    fn scope_mut_creates_and_reuses_per_world() {
        let mut p: Player<DummyAction> = Player::new(PlayerId::new());
        let world = WorldId::new();
        p.scope_mut(world).add_viewer("x", Vector::new(0, 0), None, 0);
        assert!(p.scope(world).unwrap().is_active("0,0"));
    }

    #[test]
    fn join_and_leave_team() {
        let mut p: Player<DummyAction> = Player::new(PlayerId::new());
        let team = TeamId::new();
        p._join_team(team);
        assert_eq!(p.team(), Some(team));
        assert_eq!(p.get_container_by_scope(CapabilityScope::Team), Some(ContainerId::Team(team)));

        p._leave_team();
        assert_eq!(p.team(), None);
        assert_eq!(p.get_container_by_scope(CapabilityScope::Team), None);
    }

    #[test]
    fn game_scope_is_always_reachable() {
        let p: Player<DummyAction> = Player::new(PlayerId::new());
        assert_eq!(p.get_container_by_scope(CapabilityScope::Game), Some(ContainerId::Game));
        assert!(p.is_published());
    }
}

#[cfg(test)]
mod team {
    use tactics_component::{CapabilityScope, ComponentContainer};
    use tactics_core::container::ContainerId;
    use tactics_core::ids::{PlayerId, TeamId};

    use crate::Team;

    use super::DummyAction;

    #[test]
    fn add_and_remove_player() {
        let mut t: Team<DummyAction> = Team::new(TeamId::new());
        let p = PlayerId::new();
        assert!(t._add_player(p));
        assert!(!t._add_player(p));
        assert!(t.has_player(p));

        assert!(t._remove_player(p));
        assert!(!t.has_player(p));
    }

    #[test]
    fn only_game_scope_is_reachable() {
        let t: Team<DummyAction> = Team::new(TeamId::new());
        assert_eq!(t.get_container_by_scope(CapabilityScope::Game), Some(ContainerId::Game));
        assert_eq!(t.get_container_by_scope(CapabilityScope::World), None);
        assert_eq!(t.container_id(), ContainerId::Team(t.id()));
    }
}
