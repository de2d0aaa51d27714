//! Unit tests for tactics-world.

#[cfg(test)]
mod world {
    use tactics_core::ids::{EntityId, WorldId};
    use tactics_core::vector::Vector;
    use tactics_spatial::Layer;

    use crate::World;

    struct DummyAction;

    #[test]
    fn publish_indexes_entity_in_exactly_one_chunk() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let e = EntityId::new();
        w.publish(e, Vector::new(5, 5)).unwrap();
        assert!(w.is_published(e));
        let found: Vec<_> = w.entities_in_chunk(Vector::new(0, 0)).collect();
        assert_eq!(found, vec![e]);
    }

    #[test]
    fn double_publish_errors() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let e = EntityId::new();
        w.publish(e, Vector::new(0, 0)).unwrap();
        assert!(w.publish(e, Vector::new(1, 1)).is_err());
    }

    #[test]
    fn unpublish_clears_index() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let e = EntityId::new();
        w.publish(e, Vector::new(0, 0)).unwrap();
        w.unpublish(e).unwrap();
        assert!(!w.is_published(e));
        assert_eq!(w.entities_in_chunk(Vector::new(0, 0)).count(), 0);
    }

    #[test]
    fn unpublish_not_published_errors() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        assert!(w.unpublish(EntityId::new()).is_err());
    }

    #[test]
    fn reindex_moves_between_chunks() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let e = EntityId::new();
        w.publish(e, Vector::new(0, 0)).unwrap();
        let changed = w.reindex(e, Vector::new(100, 100)).unwrap();
        assert!(changed);
        assert_eq!(w.entities_in_chunk(Vector::new(0, 0)).count(), 0);
        assert_eq!(w.entities_in_chunk(Vector::new(100, 100)).count(), 1);
    }

    #[test]
    fn reindex_within_same_chunk_reports_no_change() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let e = EntityId::new();
        w.publish(e, Vector::new(0, 0)).unwrap();
        let changed = w.reindex(e, Vector::new(1, 1)).unwrap();
        assert!(!changed);
    }

    #[test]
    fn entities_within_radius_excludes_given_id() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        let caster = EntityId::new();
        let other = EntityId::new();
        w.publish(caster, Vector::new(0, 0)).unwrap();
        w.publish(other, Vector::new(40, 40)).unwrap();

        let found = w.entities_within(Vector::new(0, 0), 1, Some(caster));
        assert!(found.is_empty());

        let found = w.entities_within(Vector::new(0, 0), 5, Some(caster));
        assert_eq!(found, vec![other]);
    }

    #[test]
    fn layers_push_and_access() {
        let mut w: World<u8, DummyAction> = World::new(WorldId::new());
        w.push_layer(Layer::new(0));
        assert_eq!(w.layer_count(), 1);
        assert!(w.terrain().is_some());
    }

    #[test]
    fn fresh_world_has_an_empty_catalog() {
        let w: World<u8, DummyAction> = World::new(WorldId::new());
        assert!(w.catalog().is_empty());
    }
}

#[cfg(test)]
mod scope {
    use tactics_core::ids::WorldId;
    use tactics_core::vector::Vector;

    use crate::Scope;

    #[test]
    fn view_distance_zero_activates_single_chunk() {
        let mut s = Scope::new(WorldId::new());
        let change = s.add_viewer("scout", Vector::new(0, 0), None, 0);
        assert_eq!(change.added, vec!["0,0".to_string()]);
        assert!(s.is_active("0,0"));
    }

    #[test]
    fn add_then_remove_restores_chunk_viewers_exactly() {
        let mut s = Scope::new(WorldId::new());
        s.add_viewer("scout", Vector::new(0, 0), None, 2);
        let active_before: Vec<&str> = s.active().collect();

        s.remove_viewer("scout", Vector::new(0, 0), None, 2);
        assert_eq!(s.active().count(), 0);
        assert!(!active_before.is_empty());
    }

    #[test]
    fn move_only_touches_delta_chunks() {
        let mut s = Scope::new(WorldId::new());
        s.add_viewer("scout", Vector::new(0, 0), None, 1);
        // Move one tile over — most of the 3x3 square overlaps.
        let change = s.add_viewer("scout", Vector::new(16, 0), Some(Vector::new(0, 0)), 1);
        // Only genuinely new chunks should be reported as added.
        assert!(!change.added.contains(&"0,0".to_string()));
    }

    #[test]
    fn second_viewer_does_not_reactivate_already_active_chunk() {
        let mut s = Scope::new(WorldId::new());
        s.add_viewer("a", Vector::new(0, 0), None, 0);
        let change = s.add_viewer("b", Vector::new(0, 0), None, 0);
        assert!(change.added.is_empty()); // already active, not a flip
    }

    #[test]
    fn chunk_stays_active_while_any_viewer_remains() {
        let mut s = Scope::new(WorldId::new());
        s.add_viewer("a", Vector::new(0, 0), None, 0);
        s.add_viewer("b", Vector::new(0, 0), None, 0);
        let change = s.remove_viewer("a", Vector::new(0, 0), None, 0);
        assert!(change.removed.is_empty());
        assert!(s.is_active("0,0"));

        let change = s.remove_viewer("b", Vector::new(0, 0), None, 0);
        assert_eq!(change.removed, vec!["0,0".to_string()]);
        assert!(!s.is_active("0,0"));
    }
}

#[cfg(test)]
mod legacy_visibility {
    use crate::legacy_visibility::{escalate, Visibility, VisibilityCheck};

    #[test]
    fn caster_and_target_unknown_join_to_visible() {
        assert_eq!(
            Visibility::CasterUnknown.join(Visibility::TargetUnknown),
            Visibility::Visible
        );
    }

    #[test]
    fn escalate_takes_resolved_maximum() {
        let result = escalate([
            VisibilityCheck::Resolved(Visibility::NotVisible),
            VisibilityCheck::Defer,
            VisibilityCheck::Resolved(Visibility::Visible),
        ]);
        assert_eq!(result, Visibility::Visible);
    }

    #[test]
    fn all_defer_yields_not_visible() {
        let result = escalate([VisibilityCheck::Defer, VisibilityCheck::Defer, VisibilityCheck::Defer]);
        assert_eq!(result, Visibility::NotVisible);
    }
}
