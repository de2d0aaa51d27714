//! Unit tests for tactics-core.

#[cfg(test)]
mod vector {
    use crate::vector::{chunk_key, parse_chunk_key, Vector};

    #[test]
    fn chunk_space_floors_toward_negative_infinity() {
        assert_eq!(Vector::new(0, 0).to_chunk_space(), Vector::new(0, 0));
        assert_eq!(Vector::new(15, 15).to_chunk_space(), Vector::new(0, 0));
        assert_eq!(Vector::new(16, 0).to_chunk_space(), Vector::new(1, 0));
        assert_eq!(Vector::new(-1, 0).to_chunk_space(), Vector::new(-1, 0));
        assert_eq!(Vector::new(-16, 0).to_chunk_space(), Vector::new(-1, 0));
        assert_eq!(Vector::new(-17, 0).to_chunk_space(), Vector::new(-2, 0));
    }

    #[test]
    fn chunk_relative_stays_in_bounds() {
        let rel = Vector::new(-1, 20).to_chunk_relative();
        assert_eq!(rel, Vector::new(15, 4));
    }

    #[test]
    fn different_chunk() {
        assert!(!Vector::new(0, 0).different_chunk(Vector::new(15, 15)));
        assert!(Vector::new(0, 0).different_chunk(Vector::new(16, 0)));
    }

    #[test]
    fn chebyshev_distance_is_max_of_axes() {
        assert_eq!(Vector::new(0, 0).chebyshev_distance(Vector::new(3, 1)), 3);
        assert_eq!(Vector::new(0, 0).chebyshev_distance(Vector::new(-2, 5)), 5);
    }

    #[test]
    fn within_chebyshev_is_inclusive() {
        let origin = Vector::new(0, 0);
        assert!(origin.within_chebyshev(Vector::new(6, 6), 6));
        assert!(!origin.within_chebyshev(Vector::new(7, 0), 6));
    }

    #[test]
    fn chunk_square_radius_zero_is_single_chunk() {
        let squares = Vector::new(0, 0).chunk_square(0);
        assert_eq!(squares, vec![Vector::new(0, 0)]);
    }

    #[test]
    fn chunk_square_count_matches_formula() {
        let squares = Vector::new(5, 5).chunk_square(2);
        assert_eq!(squares.len(), 25); // (2*2+1)^2
    }

    #[test]
    fn chunk_key_round_trip() {
        let v = Vector::new(-3, 12);
        let key = chunk_key(v);
        assert_eq!(key, "-3,12");
        assert_eq!(parse_chunk_key(&key), Some(v));
    }

    #[test]
    fn parse_chunk_key_rejects_malformed() {
        assert_eq!(parse_chunk_key("nonsense"), None);
        assert_eq!(parse_chunk_key("1"), None);
    }
}

#[cfg(test)]
mod ids {
    use crate::ids::EntityId;

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn default_is_also_fresh() {
        assert_ne!(EntityId::default(), EntityId::default());
    }

    #[test]
    fn display_includes_type_name() {
        let id = EntityId::new();
        assert!(format!("{id}").starts_with("EntityId("));
    }
}

#[cfg(test)]
mod config {
    use crate::config::{EngineConfig, PerceptionGrouping};

    #[test]
    fn defaults_match_spec() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.view_distance, 6);
        assert_eq!(cfg.inactive_view_distance, 1);
        assert_eq!(cfg.listen_distance, 25);
        assert_eq!(cfg.perception_grouping, PerceptionGrouping::Player);
    }
}

#[cfg(test)]
mod container {
    use crate::container::ContainerId;
    use crate::ids::EntityId;

    #[test]
    fn from_id_wraps_in_matching_variant() {
        let id = EntityId::new();
        assert_eq!(ContainerId::from(id), ContainerId::Entity(id));
    }

    #[test]
    fn game_display_has_no_payload() {
        assert_eq!(ContainerId::Game.to_string(), "game");
    }
}

#[cfg(test)]
mod using {
    use crate::ids::{ComponentId, EntityId};
    use crate::using::UsingRef;

    #[test]
    fn from_entity_and_component_wrap_distinctly() {
        let e = EntityId::new();
        let c = ComponentId::new();
        assert_eq!(UsingRef::from(e), UsingRef::Entity(e));
        assert_eq!(UsingRef::from(c), UsingRef::Component(c));
    }
}
