//! The action pipeline driver (spec §4.3): `execute` walks an `Action`
//! through initialize → collect listeners → sense → modify → decide
//! permission → apply → generate message → queue for broadcast → teardown →
//! react, in that fixed order. A single numbered-phase method, run
//! sequentially for determinism, rather than a generic middleware chain.
//!
//! `apply()`'s per-variant dispatch is the one phase that actually mutates
//! registry state; everything around it only reads/writes the `Action`
//! record itself or resolves listeners through the catalogs `Game` owns.

use tactics_action::{
    can_recurse, Action, ActionKind, BroadcastType, SensorReading, VisibilityChange, VisibilityChangeKind,
};
use tactics_component::Role;
use tactics_core::container::ContainerId;
use tactics_core::ids::{EntityId, PlayerId, TeamId};
use tactics_core::using::UsingRef;
use tactics_core::vector::Vector;
use tactics_core::PerceptionGrouping;

use crate::game::{Game, SENSED_SCOPE_PLAYER, SENSED_SCOPE_TEAM};

impl<T: Clone> Game<T> {
    /// Run `action` through the full pipeline. Returns `true` if `apply()`
    /// ran (either because the action was permitted, or `force` was set).
    ///
    /// Reactions and counter-actions built off this action (via
    /// `Action::nested_action`) recurse back through `execute` directly —
    /// they are not routed through the FIFO queue, which only holds
    /// top-level actions (spec §4.3 step 11, §5).
    pub fn execute(&mut self, mut action: Action, force: bool) -> bool {
        self.initialize(&mut action);

        // Unpublished fast path (spec §4.3 step 2): an action targeting an
        // entity that is not (yet) published skips `collect_listeners` (no
        // world to search for nearby entities) and goes straight to the
        // target itself. A component attached directly to that entity —
        // including one wired through the local fallback subscription
        // (spec §4.1) — still gets to sense/modify/react it; only the
        // broader listener search is skipped, not permission.
        let target_published = action
            .target
            .is_some_and(|t| self.entities.get(&t).is_some_and(|e| e.is_published()));
        if !target_published && !matches!(action.kind, ActionKind::PublishEntity { .. }) {
            if let Some(target) = action.target {
                let listener = ContainerId::Entity(target);
                let reading = self.sense(listener, &action);
                action.sensors.insert(listener, reading);
                self.dispatch_modify(listener, &mut action);
            }

            action.decide_permission();

            let applied = if action.should_apply(force) {
                self.run_apply(&mut action)
            } else {
                false
            };

            self.generate_message(&action);
            self.queue_for_broadcast(&mut action);
            self.teardown(&mut action);

            if let Some(target) = action.target {
                self.dispatch_react(ContainerId::Entity(target), &action);
            }
            self.react(&action);
            self.observer.on_action_executed(&action, applied);
            return applied;
        }

        self.collect_listeners(&mut action);

        let listeners = action.listeners.clone();
        for listener in &listeners {
            let reading = self.sense(*listener, &action);
            action.sensors.insert(*listener, reading);
        }
        if let Some(caster) = action.caster {
            action.sensors.insert(ContainerId::Entity(caster), SensorReading::Present(true));
        }

        for listener in &listeners {
            self.dispatch_modify(*listener, &mut action);
        }

        action.decide_permission();

        let applied = if action.should_apply(force) {
            self.run_apply(&mut action)
        } else {
            false
        };

        self.generate_message(&action);
        self.queue_for_broadcast(&mut action);
        self.teardown(&mut action);

        for listener in &listeners {
            self.dispatch_react(*listener, &action);
        }
        self.react(&action);
        self.observer.on_action_executed(&action, applied);

        applied
    }

    /// Drain the FIFO queue to a fixed point (spec §5): every action popped
    /// may itself enqueue follow-ups via `Ability::cast`, so this keeps
    /// popping until the queue is empty rather than processing one batch.
    pub fn run_tick(&mut self) -> usize {
        self.observer.on_tick_start(self.tick);
        let mut executed = 0;
        while let Some(action) = self.queue.pop() {
            self.execute(action, false);
            executed += 1;
        }
        self.observer.on_tick_end(self.tick, executed);
        self.tick += 1;
        executed
    }

    /// Hand back and clear every player's pending outgoing broadcast queue.
    /// Transport is out of scope (spec §1); this is as far as the engine
    /// goes.
    pub fn broadcast_all(&mut self) -> indexmap::IndexMap<PlayerId, Vec<Action>> {
        std::mem::take(&mut self.outgoing)
    }

    // ── Phase 1: initialize ─────────────────────────────────────────────

    /// `PublishEntityAction`'s own note (spec §4.4): preload the terrain
    /// chunk at the target position before listeners are collected, so a
    /// not-yet-published entity still has a populated chunk to appear in.
    fn initialize(&mut self, action: &mut Action) {
        if let ActionKind::PublishEntity { world, position } = &action.kind {
            let (world, position) = (*world, *position);
            if let Some(w) = self.worlds.get_mut(&world) {
                if let Some(layer) = w.layer_mut(0) {
                    layer.ensure_chunk(position.to_chunk_space());
                }
            }
        }
    }

    // ── Phase 2: collect_listeners (spec §4.3 step 3) ───────────────────

    /// Deterministic, deduplicated-by-id listener order: caster, entities
    /// near the caster, the caster's world, the game, the target's world,
    /// entities near the target, the target, additional listen points, and
    /// finally any listeners named explicitly.
    fn collect_listeners(&self, action: &mut Action) {
        let listen_distance = self.config.listen_distance;

        if let Some(caster) = action.caster {
            action.add_listener(ContainerId::Entity(caster));
            if let Some(entity) = self.entities.get(&caster) {
                if let Some(world_id) = entity.world() {
                    if let Some(world) = self.worlds.get(&world_id) {
                        for nearby in world.entities_within(entity.position(), listen_distance, Some(caster)) {
                            if Some(nearby) != action.target {
                                action.add_listener(ContainerId::Entity(nearby));
                            }
                        }
                    }
                    action.add_listener(ContainerId::World(world_id));
                }
            }
        }

        action.add_listener(ContainerId::Game);

        if let Some(target) = action.target {
            if Some(target) != action.caster {
                if let Some(entity) = self.entities.get(&target) {
                    if let Some(world_id) = entity.world() {
                        action.add_listener(ContainerId::World(world_id));
                        if let Some(world) = self.worlds.get(&world_id) {
                            for nearby in world.entities_within(entity.position(), listen_distance, None) {
                                action.add_listener(ContainerId::Entity(nearby));
                            }
                        }
                    }
                }
                action.add_listener(ContainerId::Entity(target));
            }
        }

        for (world_id, position) in action.additional_listen_points.clone() {
            action.add_listener(ContainerId::World(world_id));
            if let Some(world) = self.worlds.get(&world_id) {
                for nearby in world.entities_within(position, listen_distance, None) {
                    action.add_listener(ContainerId::Entity(nearby));
                }
            }
        }

        for listener in action.additional_listeners.clone() {
            action.add_listener(listener);
        }
    }

    // ── Phase 3: sense ──────────────────────────────────────────────────

    /// Aggregate every sensor subscribed to `listener` into a single
    /// reading: no sensors report anything → `Present(false)`; exactly one
    /// reports a value → that value, verbatim; more than one → the
    /// coarser `Present(true)` (spec §4.3 step 4 — only a lone sensor's
    /// structured reading survives intact).
    fn sense(&self, listener: ContainerId, action: &Action) -> SensorReading {
        let Some(cat) = self.catalog_for(listener) else {
            return SensorReading::Present(false);
        };
        let subs: Vec<_> = cat.subscribers(Role::Sensor).cloned().collect();
        let mut readings = Vec::new();
        for sub in subs {
            let Some(owner_cat) = self.catalog_for(sub.owner) else { continue };
            let Some(component) = owner_cat.get(sub.component) else { continue };
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| component.sense(action)));
            match result {
                Ok(Some(value)) => readings.push(value),
                Ok(None) => {}
                Err(_) => log::error!("sensor component {} panicked during sense()", sub.component),
            }
        }
        match readings.len() {
            0 => SensorReading::Present(false),
            1 => SensorReading::Info(readings.into_iter().next().unwrap()),
            _ => SensorReading::Present(true),
        }
    }

    // ── Phase 4: modify ─────────────────────────────────────────────────

    /// Run every modifier subscribed to `listener` against `action`, then
    /// recurse each returned counter-action one nesting level deeper (spec
    /// §4.3 step 5: "may call `counter(other_action)`").
    fn dispatch_modify(&mut self, listener: ContainerId, action: &mut Action) {
        let Some(cat) = self.catalog_for(listener) else { return };
        let subs: Vec<_> = cat.subscribers(Role::Modifier).cloned().collect();
        let mut counters = Vec::new();
        for sub in subs {
            let Some(owner_cat) = self.catalog_for(sub.owner) else { continue };
            let Some(component) = owner_cat.get(sub.component) else { continue };
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| component.modify(action)));
            match result {
                Ok(spawned) => counters.extend(spawned),
                Err(_) => log::error!("modifier component {} panicked during modify()", sub.component),
            }
        }
        let nested = action.nested;
        for counter in counters {
            self.recurse(nested, counter);
        }
    }

    /// Execute `action` as a reaction/counter-action one level deeper than
    /// `parent_nested`, unless that would exceed `MAX_NESTED_DEPTH` (spec
    /// §4.3 step 11, §8: "any action chain terminates in ≤ 10 levels").
    fn recurse(&mut self, parent_nested: u32, mut action: Action) {
        if !can_recurse(parent_nested) {
            return;
        }
        action.nested = parent_nested + 1;
        self.execute(action, false);
    }

    // ── Phase 7: apply ──────────────────────────────────────────────────

    fn run_apply(&mut self, action: &mut Action) -> bool {
        let applied = self.apply(action);
        action.applied = applied;
        applied
    }

    fn apply(&mut self, action: &mut Action) -> bool {
        match action.kind.clone() {
            ActionKind::AttachComponent { component } => self.apply_attach_component(action, component),
            ActionKind::PublishEntity { world, position } => self.apply_publish_entity(action, world, position),
            ActionKind::UnpublishEntity => self.apply_unpublish_entity(action),
            ActionKind::ChangeWorld { world, position } => self.apply_change_world(action, world, position),
            ActionKind::Move { position } => {
                let Some(target) = action.target else { return false };
                self.apply_move(action, target, position)
            }
            ActionKind::RelativeMove { delta } => self.apply_relative_move(action, delta),
            ActionKind::OwnEntity { player } => self.apply_own_entity(action, player),
            ActionKind::EquipItem { item, slot } => self.apply_equip_item(action, item, &slot),
            ActionKind::AddSlot { name } => self.apply_add_slot(action, &name),
            ActionKind::RemoveSlot { name } => self.apply_remove_slot(action, &name),
            ActionKind::AddProperty { name, spec } => self.apply_add_property(action, &name, spec),
            ActionKind::RemoveProperty { name } => self.apply_remove_property(action, &name),
            ActionKind::LearnAbility { ability, grant } => self.apply_learn_ability(action, &ability, grant),
            ActionKind::ForgetAbility { ability, granted_by, using } => {
                self.apply_forget_ability(action, &ability, granted_by, using)
            }
            ActionKind::ModifyProperty { name, modification } => self.apply_modify_property(action, &name, modification),
            ActionKind::PropertyAdjustment { name, amount } => self.apply_property_adjustment(action, &name, amount),
            ActionKind::SenseEntity { sensed } => self.apply_sense_entity(action, sensed),
            ActionKind::LoseEntity { sensed } => self.apply_lose_entity(action, sensed),
            // Opaque content payload — the embedding application interprets
            // `Custom` actions itself; the engine only routes and broadcasts
            // them.
            ActionKind::Custom { .. } => false,
        }
    }

    /// `target._attach(component)` itself (spec §4.4): moves the component
    /// [`Game::attach_component`] staged as pending out of that holding
    /// area and into the target's real catalog, wiring its subscriptions.
    /// Gated like any other apply — a modifier denying this action leaves
    /// the component pending forever, i.e. never attached.
    fn apply_attach_component(&mut self, action: &Action, component: tactics_core::ids::ComponentId) -> bool {
        let Some(target) = action.target else { return false };
        self.commit_attach_component(ContainerId::Entity(target), component)
    }

    fn apply_publish_entity(&mut self, action: &Action, world_id: tactics_core::ids::WorldId, position: Vector) -> bool {
        let Some(target) = action.target else { return false };
        if !self.worlds.contains_key(&world_id) {
            return false;
        }
        let Some(entity) = self.entities.get(&target) else { return false };
        if entity.is_published() {
            return false;
        }
        if self.worlds.get_mut(&world_id).unwrap().publish(target, position).is_err() {
            return false;
        }
        self.entities.get_mut(&target).unwrap()._publish(world_id, position);
        let _ = self.subscribe_to_all(ContainerId::Entity(target));

        let view_distance = self.config.view_distance;
        let owners: Vec<PlayerId> = self.entities[&target].owners().collect();
        for owner in owners {
            if let Some(player) = self.players.get_mut(&owner) {
                player.scope_mut(world_id).add_viewer(&target.0.to_string(), position, None, view_distance);
            }
        }
        true
    }

    fn apply_unpublish_entity(&mut self, action: &Action) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get(&target) else { return false };
        if !entity.is_published() {
            return false;
        }
        let world_id = entity.world().unwrap();
        let position = entity.position();

        if let Some(w) = self.worlds.get_mut(&world_id) {
            let _ = w.unpublish(target);
        }
        self.unsubscribe_from_all(ContainerId::Entity(target));

        let view_distance = self.config.view_distance;
        let owners: Vec<PlayerId> = self.entities[&target].owners().collect();
        for owner in owners {
            if let Some(player) = self.players.get_mut(&owner) {
                player.scope_mut(world_id).remove_viewer(&target.0.to_string(), position, None, view_distance);
            }
        }
        self.entities.get_mut(&target).unwrap()._unpublish();
        true
    }

    fn apply_change_world(&mut self, action: &Action, world_id: tactics_core::ids::WorldId, position: Vector) -> bool {
        let Some(target) = action.target else { return false };
        if !self.worlds.contains_key(&world_id) {
            return false;
        }
        let Some(entity) = self.entities.get(&target) else { return false };
        if !entity.is_published() {
            return false;
        }
        let old_world = entity.world().unwrap();
        let old_position = entity.position();

        if let Some(w) = self.worlds.get_mut(&old_world) {
            let _ = w.unpublish(target);
        }
        if self.worlds.get_mut(&world_id).unwrap().publish(target, position).is_err() {
            // Roll back: republish into the old world rather than leave the
            // entity unpublished.
            let _ = self.worlds.get_mut(&old_world).unwrap().publish(target, old_position);
            return false;
        }
        self.entities.get_mut(&target).unwrap()._publish(world_id, position);

        let view_distance = self.config.view_distance;
        let owners: Vec<PlayerId> = self.entities[&target].owners().collect();
        for owner in &owners {
            if let Some(player) = self.players.get_mut(owner) {
                player.scope_mut(old_world).remove_viewer(&target.0.to_string(), old_position, None, view_distance);
                player.drop_scope(old_world);
                player.scope_mut(world_id).add_viewer(&target.0.to_string(), position, None, view_distance);
            }
        }
        true
    }

    fn apply_move(&mut self, _action: &Action, target: EntityId, position: Vector) -> bool {
        let Some(entity) = self.entities.get(&target) else { return false };
        if !entity.is_published() {
            return false;
        }
        let world_id = entity.world().unwrap();
        let from = entity.position();
        if from == position {
            return false;
        }
        self.entities.get_mut(&target).unwrap()._move_to(position);
        let chunk_changed = self
            .worlds
            .get_mut(&world_id)
            .map(|w| w.reindex(target, position).unwrap_or(false))
            .unwrap_or(false);

        if chunk_changed {
            let view_distance = self.config.view_distance;
            let owners: Vec<PlayerId> = self.entities[&target].owners().collect();
            for owner in owners {
                if let Some(player) = self.players.get_mut(&owner) {
                    let scope = player.scope_mut(world_id);
                    scope.add_viewer(&target.0.to_string(), position, Some(from), view_distance);
                    scope.remove_viewer(&target.0.to_string(), from, Some(position), view_distance);
                }
            }
        }
        true
    }

    fn apply_relative_move(&mut self, action: &Action, delta: Vector) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get(&target) else { return false };
        let new_position = entity.position() + delta;
        self.apply_move(action, target, new_position)
    }

    fn apply_own_entity(&mut self, action: &mut Action, player_id: PlayerId) -> bool {
        let Some(target) = action.target else { return false };
        if !self.entities.contains_key(&target) || !self.players.contains_key(&player_id) {
            return false;
        }
        if self.entities[&target].is_owned_by(player_id) {
            return false;
        }
        match self.own_entity(target, player_id) {
            Ok(changes) if !changes.is_empty() => {
                action.visibility_changes = Some(VisibilityChange { kind: VisibilityChangeKind::Add, changes });
                true
            }
            Ok(_) => true,
            Err(e) => {
                log::warn!("apply OwnEntity({target}, {player_id}) failed: {e}");
                false
            }
        }
    }

    fn apply_equip_item(&mut self, action: &Action, item: EntityId, slot: &str) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        entity.equip(slot, item).is_ok()
    }

    fn apply_add_slot(&mut self, action: &Action, name: &str) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        if entity.slot(name).is_some() {
            return false;
        }
        entity.add_slot(name.to_string());
        true
    }

    fn apply_remove_slot(&mut self, action: &Action, name: &str) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        entity.remove_slot(name).is_ok()
    }

    fn apply_add_property(&mut self, action: &Action, name: &str, spec: tactics_action::PropertySpec) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        let property = tactics_component::Property::new(target, name, spec.current, spec.min, spec.max);
        entity.add_property(name.to_string(), property).is_ok()
    }

    fn apply_remove_property(&mut self, action: &Action, name: &str) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        entity.remove_property(name).is_ok()
    }

    fn apply_learn_ability(&mut self, action: &Action, ability: &str, grant: tactics_entity::Grant) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        let already = entity.grants(ability).iter().any(|g| g.matches(grant.granted_by, grant.using));
        if already {
            return false;
        }
        entity.learn_ability(ability.to_string(), grant);
        true
    }

    fn apply_forget_ability(
        &mut self,
        action: &Action,
        ability: &str,
        granted_by: Option<EntityId>,
        using: Option<tactics_core::using::UsingRef>,
    ) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        entity.forget_ability(ability, granted_by, using)
    }

    fn apply_modify_property(&mut self, action: &Action, name: &str, modification: tactics_component::Modification) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        let Some(property) = entity.property_mut(name) else { return false };
        property.push_modification(modification);
        true
    }

    fn apply_property_adjustment(&mut self, action: &Action, name: &str, amount: f64) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get_mut(&target) else { return false };
        let Some(property) = entity.property_mut(name) else { return false };
        let new_value = property.current() + amount;
        property.set_current(new_value);
        true
    }

    /// `using.sensed_entities.add(sensed)` (spec §4.4): when the action
    /// names the sensor that did the sensing, the id is added to *that
    /// sensor's* node rather than the target entity's own, rolling up into
    /// the entity node via `add_parent` (see [`Game::sensed_source_node`]).
    /// Two sensors sensing the same entity each hold their own refcounted
    /// contribution, so one losing it doesn't erase the other's. Only
    /// falls back to the entity's own node directly when no `using` is
    /// named at all.
    fn apply_sense_entity(&mut self, action: &mut Action, sensed: EntityId) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get(&target) else { return false };
        let entity_node = entity.sensed_node_id();
        let node = match action.using {
            Some(using) => self.sensed_source_node(&entity_node, using),
            None => entity_node,
        };
        match self.sensed.add(&node, sensed, ()) {
            Ok(changes) if !changes.is_empty() => {
                action.visibility_changes = Some(VisibilityChange { kind: VisibilityChangeKind::Add, changes });
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("apply SenseEntity({target}, {sensed}) failed: {e}");
                false
            }
        }
    }

    fn apply_lose_entity(&mut self, action: &mut Action, sensed: EntityId) -> bool {
        let Some(target) = action.target else { return false };
        let Some(entity) = self.entities.get(&target) else { return false };
        let entity_node = entity.sensed_node_id();
        let node = match action.using {
            Some(using) => self.sensed_source_node(&entity_node, using),
            None => entity_node,
        };
        match self.sensed.remove(&node, &sensed) {
            Ok(changes) if !changes.is_empty() => {
                action.visibility_changes = Some(VisibilityChange { kind: VisibilityChangeKind::Remove, changes });
                true
            }
            Ok(_) => false,
            Err(e) => {
                log::warn!("apply LoseEntity({target}, {sensed}) failed: {e}");
                false
            }
        }
    }

    /// The `NestedMap` node a given sensor (`using`) contributes through,
    /// created and parented to `entity_node` the first time that sensor is
    /// ever seen. Stable across calls — `add_parent` rolls up existing
    /// contents once and must not be re-invoked for an edge that already
    /// exists, so the node is only just-created the first time.
    fn sensed_source_node(&mut self, entity_node: &str, using: UsingRef) -> String {
        let node_id = format!("sensor:{}", sensor_key(using));
        if !self.sensed.has_node(&node_id) {
            self.sensed.add_node(node_id.clone(), "sensor");
            let _ = self.sensed.add_parent(&node_id, entity_node);
        }
        node_id
    }

    // ── Phase 8: generate_message ────────────────────────────────────────

    /// Build the wire-format record (spec §6) for this action. Serialization
    /// failures are logged rather than propagated — a malformed message
    /// should never abort an already-applied action.
    fn generate_message(&self, action: &Action) -> Option<serde_json::Value> {
        match serde_json::to_value(action) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("failed to serialize action for broadcast: {e}");
                None
            }
        }
    }

    // ── Phase 9: queue_for_broadcast (spec §4.6) ─────────────────────────

    fn queue_for_broadcast(&mut self, action: &mut Action) {
        if let Some(vc) = action.visibility_changes.take() {
            let scope = match self.config.perception_grouping {
                PerceptionGrouping::Player => SENSED_SCOPE_PLAYER,
                PerceptionGrouping::Team => SENSED_SCOPE_TEAM,
            };
            for (node_scope, node_id, ids) in vc.changes.iter() {
                if node_scope != scope {
                    continue;
                }
                for &entity_id in ids {
                    self.enqueue_synthetic_visibility(node_id, entity_id, vc.kind);
                }
            }
        }

        match action.broadcast_type {
            BroadcastType::None | BroadcastType::Direct => {}
            BroadcastType::Full => {
                let player_ids: Vec<PlayerId> = self.players.keys().copied().collect();
                for player_id in player_ids {
                    self.outgoing.entry(player_id).or_default().push(action.clone());
                }
            }
            BroadcastType::SenseGated => {
                let player_ids: Vec<PlayerId> = self.players.keys().copied().collect();
                for player_id in player_ids {
                    if self.player_senses_action(player_id, action) {
                        self.outgoing.entry(player_id).or_default().push(action.clone());
                    }
                }
            }
        }
    }

    /// `true` if `player_id` owns the caster/target or has either in view
    /// via the shared sensed-entity rollup (spec §4.6 sense-gated rule).
    fn player_senses_action(&self, player_id: PlayerId, action: &Action) -> bool {
        let Some(player) = self.players.get(&player_id) else { return false };
        let node = player.sensed_node_id();
        [action.caster, action.target].into_iter().flatten().any(|id| player.owns(id) || self.sensed.contains(&node, &id))
    }

    /// A rollup node gaining or losing an entity id means some viewer just
    /// started or stopped being able to see it — synthesize a
    /// publish/unpublish for every player fed by that node so their client
    /// state stays in sync, without re-running the full pipeline (spec
    /// §4.2/§4.6).
    fn enqueue_synthetic_visibility(&mut self, node_id: &str, entity_id: EntityId, kind: VisibilityChangeKind) {
        let player_ids: Vec<PlayerId> = match self.config.perception_grouping {
            PerceptionGrouping::Player => node_id.parse::<PlayerId>().ok().into_iter().collect(),
            PerceptionGrouping::Team => node_id
                .parse::<TeamId>()
                .ok()
                .and_then(|t| self.teams.get(&t))
                .map(|t| t.players().collect())
                .unwrap_or_default(),
        };
        let Some(entity) = self.entities.get(&entity_id) else { return };
        for player_id in player_ids {
            let mut synthetic = match kind {
                VisibilityChangeKind::Add => match entity.world() {
                    Some(world) => Action::new(ActionKind::PublishEntity { world, position: entity.position() }),
                    None => continue,
                },
                VisibilityChangeKind::Remove => Action::new(ActionKind::UnpublishEntity),
            };
            synthetic.target = Some(entity_id);
            synthetic.permitted = true;
            synthetic.applied = true;
            synthetic.broadcast_type = BroadcastType::Direct;
            self.outgoing.entry(player_id).or_default().push(synthetic);
        }
    }

    // ── Phase 10: teardown ────────────────────────────────────────────────

    /// Clear per-pass scratch state so a reused `Action` (a reaction built
    /// via `nested_action`) doesn't carry stale listener/sensor data. The
    /// fields that describe the outcome (`applied`, `permitted`, `kind`,
    /// identity) are left untouched.
    fn teardown(&self, action: &mut Action) {
        action.listeners.clear();
        action.listener_ids.clear();
        action.sensors.clear();
    }

    // ── Phase 11: react ───────────────────────────────────────────────────

    /// Run every reacter subscribed to `listener` against `action`, then
    /// recurse each returned follow-up action one nesting level deeper
    /// (spec §4.3 step 11: "react(a')/counter(a')").
    fn dispatch_react(&mut self, listener: ContainerId, action: &Action) {
        let Some(cat) = self.catalog_for(listener) else { return };
        let subs: Vec<_> = cat.subscribers(Role::Reacter).cloned().collect();
        let mut follow_ups = Vec::new();
        for sub in subs {
            let Some(owner_cat) = self.catalog_for(sub.owner) else { continue };
            let Some(component) = owner_cat.get(sub.component) else { continue };
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| component.react(action)));
            match result {
                Ok(spawned) => follow_ups.extend(spawned),
                Err(_) => log::error!("reacter component {} panicked during react()", sub.component),
            }
        }
        let nested = action.nested;
        for follow_up in follow_ups {
            self.recurse(nested, follow_up);
        }
    }

    /// Top-level reaction hook run once per `execute` call, after every
    /// listener's own `react()` — reserved for game-wide bookkeeping
    /// (nothing currently hooks it; kept symmetric with `initialize`).
    fn react(&mut self, _action: &Action) {}
}

/// Stable string key for a `sensed_source_node` id — a component and an
/// entity never share a numeric id, but the prefix keeps the two kinds of
/// `using` unambiguous regardless.
fn sensor_key(using: UsingRef) -> String {
    match using {
        UsingRef::Entity(id) => format!("entity:{id}"),
        UsingRef::Component(id) => format!("component:{id}"),
    }
}
