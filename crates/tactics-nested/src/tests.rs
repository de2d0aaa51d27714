//! Unit tests for tactics-nested.

#[cfg(test)]
mod nested_map {
    use crate::NestedMap;

    #[test]
    fn add_rolls_up_to_parent() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:goblin", "entity");
        map.add_node("player:arath", "player");
        map.add_parent("entity:goblin", "player:arath").unwrap();

        let changes = map.add("entity:goblin", "orc-camp", ()).unwrap();
        assert!(map.contains("entity:goblin", &"orc-camp"));
        assert!(map.contains("player:arath", &"orc-camp"));
        assert_eq!(
            changes.ids_at_node("player", "player:arath").unwrap().len(),
            1
        );
    }

    #[test]
    fn remove_clears_parent_once_last_source_gone() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:a", "entity");
        map.add_node("player:p", "player");
        map.add_parent("entity:a", "player:p").unwrap();

        map.add("entity:a", "thing", ()).unwrap();
        assert!(map.contains("player:p", &"thing"));

        let changes = map.remove("entity:a", &"thing").unwrap();
        assert!(!map.contains("entity:a", &"thing"));
        assert!(!map.contains("player:p", &"thing"));
        assert!(changes.ids_at_node("player", "player:p").is_some());
    }

    #[test]
    fn sibling_contribution_keeps_parent_populated() {
        // Two children of the same parent both sense "thing"; removing it
        // from one child must not clear it from the parent while the other
        // child still holds it.
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:a", "entity");
        map.add_node("entity:b", "entity");
        map.add_node("player:p", "player");
        map.add_parent("entity:a", "player:p").unwrap();
        map.add_parent("entity:b", "player:p").unwrap();

        map.add("entity:a", "thing", ()).unwrap();
        map.add("entity:b", "thing", ()).unwrap();
        assert!(map.contains("player:p", &"thing"));

        let changes = map.remove("entity:a", &"thing").unwrap();
        assert!(!map.contains("entity:a", &"thing"));
        assert!(map.contains("player:p", &"thing")); // still held via entity:b
        assert!(changes.ids_at_node("player", "player:p").is_none());

        map.remove("entity:b", &"thing").unwrap();
        assert!(!map.contains("player:p", &"thing"));
    }

    #[test]
    fn multi_level_rollup_entity_player_team() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:scout", "entity");
        map.add_node("player:p1", "player");
        map.add_node("team:red", "team");
        map.add_parent("entity:scout", "player:p1").unwrap();
        map.add_parent("player:p1", "team:red").unwrap();

        map.add("entity:scout", "enemy-keep", ()).unwrap();
        assert!(map.contains("entity:scout", &"enemy-keep"));
        assert!(map.contains("player:p1", &"enemy-keep"));
        assert!(map.contains("team:red", &"enemy-keep"));

        map.remove("entity:scout", &"enemy-keep").unwrap();
        assert!(!map.contains("team:red", &"enemy-keep"));
    }

    #[test]
    fn add_parent_rolls_up_preexisting_contents() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:a", "entity");
        map.add_node("player:p", "player");
        map.add("entity:a", "thing", ()).unwrap();

        // Parent relationship established after content already exists.
        let changes = map.add_parent("entity:a", "player:p").unwrap();
        assert!(map.contains("player:p", &"thing"));
        assert_eq!(changes.ids_at_node("player", "player:p").unwrap().len(), 1);
    }

    #[test]
    fn add_parent_rejects_cycle() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("a", "x");
        map.add_node("b", "x");
        map.add_node("c", "x");
        map.add_parent("a", "b").unwrap();
        map.add_parent("b", "c").unwrap();

        // c is already a descendant of a (a -> b -> c); making a a child of
        // c as well would close a loop.
        let err = map.add_parent("c", "a").unwrap_err();
        assert!(matches!(err, crate::NestedError::Cycle { .. }));
    }

    #[test]
    fn add_parent_self_loop_rejected() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("a", "x");
        let err = map.add_parent("a", "a").unwrap_err();
        assert!(matches!(err, crate::NestedError::Cycle { .. }));
    }

    #[test]
    fn remove_node_tears_down_edges_and_propagates() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:a", "entity");
        map.add_node("player:p", "player");
        map.add_parent("entity:a", "player:p").unwrap();
        map.add("entity:a", "thing", ()).unwrap();

        map.remove_node("entity:a").unwrap();
        assert!(!map.has_node("entity:a"));
        assert!(!map.contains("player:p", &"thing"));
    }

    #[test]
    fn operating_on_unknown_node_errors() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        let err = map.add("ghost", "thing", ()).unwrap_err();
        assert!(matches!(err, crate::NestedError::NodeNotFound(_)));
    }

    #[test]
    fn redundant_add_does_not_double_emit_changes() {
        let mut map: NestedMap<&str, ()> = NestedMap::new();
        map.add_node("entity:a", "entity");
        map.add("entity:a", "thing", ()).unwrap();
        let changes = map.add("entity:a", "thing", ()).unwrap();
        assert!(changes.is_empty());
    }
}

#[cfg(test)]
mod nested_changes {
    use crate::NestedChanges;

    #[test]
    fn extend_merges_ids_at_shared_node() {
        let mut a: NestedChanges<&str> = NestedChanges::new();
        a.record("player", "player:p", "x");
        let mut b: NestedChanges<&str> = NestedChanges::new();
        b.record("player", "player:p", "y");

        a.extend(b);
        assert_eq!(a.ids_at_node("player", "player:p").unwrap().len(), 2);
    }

    #[test]
    fn ids_at_scope_dedupes_across_nodes() {
        let mut c: NestedChanges<&str> = NestedChanges::new();
        c.record("team", "team:a", "x");
        c.record("team", "team:b", "x");
        c.record("team", "team:b", "y");

        let ids = c.ids_at_scope("team");
        assert_eq!(ids.len(), 2);
    }
}
