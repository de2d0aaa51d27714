//! `Game<T>` — the root registry every world, entity, player, and team is
//! reachable from (spec §2: "the only singleton is Game; all other state
//! is reachable from it").
//!
//! # Design
//!
//! `Game` is generic over `T`, the tile payload type `World<T, Action>`
//! carries, for the same reason `World` itself is generic: tile *contents*
//! are out of scope (spec §1), so the engine never fixes what a tile holds.
//! Everything else here is concrete: `Action` is `tactics_action::Action`,
//! plugged in as the `A` parameter every lower crate left abstract.
//!
//! Per Design Notes §9's own recommendation ("make the singleton an
//! explicit parameter ... reserving a convenience lookup only for test
//! setup"), `Game` is not a hidden global — callers hold and pass a
//! `&mut Game<T>` explicitly. The one-instance invariant (spec §5:
//! "Construction while an instance exists raises a fatal error except in
//! debug mode") is still enforced, via a process-wide flag, so the
//! documented behavior is testable without resurrecting a true global.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use tactics_action::{Action, ActionQueue};
use tactics_component::{CapabilityScope, Component, ComponentCatalog, ComponentContainer};
use tactics_core::container::ContainerId;
use tactics_core::ids::{ComponentId, EntityId, PlayerId, TeamId, WorldId};
use tactics_core::EngineConfig;
use tactics_entity::{Entity, EntityError, Player, Team};
use tactics_nested::{NestedChanges, NestedMap};
use tactics_world::World;

use crate::error::{GameError, GameResult};

static INSTANCE_EXISTS: AtomicBool = AtomicBool::new(false);

/// Scope tags used in the shared sensed-entity rollup (see
/// [`Game::sensed`]'s doc).
pub const SENSED_SCOPE_ENTITY: &str = "entity";
pub const SENSED_SCOPE_PLAYER: &str = "player";
pub const SENSED_SCOPE_TEAM: &str = "team";

pub struct Game<T> {
    pub(crate) config: EngineConfig,
    pub(crate) catalog: ComponentCatalog<Action>,

    /// Components staged by [`Game::attach_component`] but not yet moved
    /// into their owner's real catalog — held here until the gating
    /// `AttachComponentAction` applies (spec §4.4), or forever if a
    /// modifier denies it.
    pub(crate) pending_components: IndexMap<ComponentId, Component<Action>>,

    pub(crate) worlds: IndexMap<WorldId, World<T, Action>>,
    pub(crate) entities: IndexMap<EntityId, Entity<Action>>,
    pub(crate) players: IndexMap<PlayerId, Player<Action>>,
    pub(crate) teams: IndexMap<TeamId, Team<Action>>,

    /// The single shared sensed-entity rollup (spec §4.2): one node per
    /// entity/player/team, entity nodes parented to their owners' player
    /// nodes, player nodes parented to their team node when they join one.
    /// Owned centrally here rather than distributed across `Entity`/
    /// `Player`/`Team` — see `tactics-entity`'s `sensed_node_id` doc.
    pub(crate) sensed: NestedMap<EntityId, ()>,

    pub(crate) queue: ActionQueue,
    /// Per-player outgoing broadcast queue, flushed by `broadcast_all`
    /// (spec §4.6). The transport itself is out of scope (spec §1); this
    /// is as far as the engine goes.
    pub(crate) outgoing: IndexMap<PlayerId, Vec<Action>>,

    /// Abilities registered by name (spec §4.5); `cast` looks one up and
    /// queues the `Event` it produces rather than running it inline.
    pub(crate) abilities: IndexMap<String, Box<dyn crate::ability::Ability<T>>>,

    pub(crate) tick: u64,
    pub(crate) observer: Box<dyn crate::observer::GameObserver>,
}

impl<T> Game<T> {
    /// Construct a new `Game`. Panics (a fatal invariant violation, spec
    /// §7/§5) if an instance already exists, unless `cfg!(debug_assertions)`
    /// is set, in which case it logs a warning and proceeds anyway.
    pub fn new(config: EngineConfig) -> Self {
        if INSTANCE_EXISTS.swap(true, Ordering::SeqCst) {
            if cfg!(debug_assertions) {
                log::warn!("Game::new: an instance already exists; allowing under debug_assertions");
            } else {
                panic!("Game::new: a Game instance already exists (fatal invariant violation)");
            }
        }
        Self {
            config,
            catalog: ComponentCatalog::new(ContainerId::Game, CapabilityScope::Game),
            pending_components: IndexMap::new(),
            worlds: IndexMap::new(),
            entities: IndexMap::new(),
            players: IndexMap::new(),
            teams: IndexMap::new(),
            sensed: NestedMap::new(),
            queue: ActionQueue::new(),
            outgoing: IndexMap::new(),
            abilities: IndexMap::new(),
            tick: 0,
            observer: Box::new(crate::observer::NoopObserver),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn queue(&mut self) -> &mut ActionQueue {
        &mut self.queue
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Replace the tick-boundary instrumentation hook.
    pub fn set_observer(&mut self, observer: Box<dyn crate::observer::GameObserver>) {
        self.observer = observer;
    }

    // ── Registries ──────────────────────────────────────────────────────

    pub fn world(&self, id: WorldId) -> Option<&World<T, Action>> {
        self.worlds.get(&id)
    }

    pub fn world_mut(&mut self, id: WorldId) -> Option<&mut World<T, Action>> {
        self.worlds.get_mut(&id)
    }

    pub fn register_world(&mut self, world: World<T, Action>) -> WorldId {
        let id = world.id();
        self.worlds.insert(id, world);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity<Action>> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity<Action>> {
        self.entities.get_mut(&id)
    }

    /// Register a fresh entity and give it a node in the sensed-entity
    /// rollup.
    pub fn create_entity(&mut self, name: impl Into<String>) -> EntityId {
        let entity = Entity::new(EntityId::new(), name);
        let id = entity.id();
        self.sensed.add_node(entity.sensed_node_id(), SENSED_SCOPE_ENTITY);
        self.entities.insert(id, entity);
        id
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player<Action>> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player<Action>> {
        self.players.get_mut(&id)
    }

    pub fn create_player(&mut self) -> PlayerId {
        let player = Player::new(PlayerId::new());
        let id = player.id();
        self.sensed.add_node(player.sensed_node_id(), SENSED_SCOPE_PLAYER);
        self.players.insert(id, player);
        self.outgoing.insert(id, Vec::new());
        id
    }

    pub fn team(&self, id: TeamId) -> Option<&Team<Action>> {
        self.teams.get(&id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team<Action>> {
        self.teams.get_mut(&id)
    }

    pub fn create_team(&mut self) -> TeamId {
        let team = Team::new(TeamId::new());
        let id = team.id();
        self.sensed.add_node(team.sensed_node_id(), SENSED_SCOPE_TEAM);
        self.teams.insert(id, team);
        id
    }

    /// Add `player` to `team`, wiring the sensed-entity rollup edge so the
    /// team's view becomes the union of its players' (spec §3).
    pub fn join_team(&mut self, player_id: PlayerId, team_id: TeamId) -> GameResult<()> {
        let player = self.players.get_mut(&player_id).ok_or(GameError::PlayerNotFound(player_id))?;
        if !self.teams.contains_key(&team_id) {
            return Err(GameError::TeamNotFound(team_id));
        }
        player._join_team(team_id);
        let player_node = player.sensed_node_id();
        self.teams.get_mut(&team_id).unwrap()._add_player(player_id);
        self.sensed
            .add_parent(&player_node, &self.teams[&team_id].sensed_node_id())
            .map_err(GameError::Nested)?;
        Ok(())
    }

    /// Record `player_id` as an owner of `entity_id` and wire the entity's
    /// sensed-entity node as a child of the player's, rolling up whatever
    /// the entity already senses (spec §4.4 `OwnEntityAction`).
    pub fn own_entity(&mut self, entity_id: EntityId, player_id: PlayerId) -> GameResult<NestedChanges<EntityId>> {
        let entity = self.entities.get_mut(&entity_id).ok_or(GameError::EntityNotFound(entity_id))?;
        entity._add_owner(player_id).map_err(GameError::Entity)?;
        let entity_node = entity.sensed_node_id();
        let player = self.players.get_mut(&player_id).ok_or(GameError::PlayerNotFound(player_id))?;
        player._own_entity(entity_id);
        let player_node = player.sensed_node_id();
        self.sensed.add_parent(&entity_node, &player_node).map_err(GameError::Nested)
    }

    /// Reverse of [`Game::own_entity`]; the sensed-entity parent edge
    /// itself is left in place (an entity may regain the same owner), only
    /// ownership bookkeeping is undone.
    pub fn disown_entity(&mut self, entity_id: EntityId, player_id: PlayerId) -> GameResult<()> {
        let entity = self.entities.get_mut(&entity_id).ok_or(GameError::EntityNotFound(entity_id))?;
        match entity._remove_owner(player_id) {
            Ok(()) | Err(EntityError::NotOwned(_, _)) => {}
            Err(e) => return Err(GameError::Entity(e)),
        }
        if let Some(player) = self.players.get_mut(&player_id) {
            player._disown_entity(entity_id);
        }
        Ok(())
    }

    // ── Container resolution (the registry every cross-scope lookup needs) ──

    pub(crate) fn catalog_for(&self, id: ContainerId) -> Option<&ComponentCatalog<Action>> {
        match id {
            ContainerId::Entity(e) => self.entities.get(&e).map(ComponentContainer::catalog),
            ContainerId::World(w) => self.worlds.get(&w).map(ComponentContainer::catalog),
            ContainerId::Player(p) => self.players.get(&p).map(ComponentContainer::catalog),
            ContainerId::Team(t) => self.teams.get(&t).map(ComponentContainer::catalog),
            ContainerId::Game => Some(&self.catalog),
        }
    }

    pub(crate) fn catalog_for_mut(&mut self, id: ContainerId) -> Option<&mut ComponentCatalog<Action>> {
        match id {
            ContainerId::Entity(e) => self.entities.get_mut(&e).map(ComponentContainer::catalog_mut),
            ContainerId::World(w) => self.worlds.get_mut(&w).map(ComponentContainer::catalog_mut),
            ContainerId::Player(p) => self.players.get_mut(&p).map(ComponentContainer::catalog_mut),
            ContainerId::Team(t) => self.teams.get_mut(&t).map(ComponentContainer::catalog_mut),
            ContainerId::Game => Some(&mut self.catalog),
        }
    }

    pub(crate) fn is_published(&self, id: ContainerId) -> bool {
        match id {
            ContainerId::Entity(e) => self.entities.get(&e).is_some_and(ComponentContainer::is_published),
            ContainerId::World(w) => self.worlds.get(&w).is_some_and(ComponentContainer::is_published),
            ContainerId::Player(p) => self.players.get(&p).is_some_and(ComponentContainer::is_published),
            ContainerId::Team(t) => self.teams.get(&t).is_some_and(ComponentContainer::is_published),
            ContainerId::Game => true,
        }
    }

    pub(crate) fn get_container_by_scope(&self, id: ContainerId, scope: CapabilityScope) -> Option<ContainerId> {
        match id {
            ContainerId::Entity(e) => self.entities.get(&e)?.get_container_by_scope(scope),
            ContainerId::World(w) => self.worlds.get(&w)?.get_container_by_scope(scope),
            ContainerId::Player(p) => self.players.get(&p)?.get_container_by_scope(scope),
            ContainerId::Team(t) => self.teams.get(&t)?.get_container_by_scope(scope),
            ContainerId::Game => None,
        }
    }
}

impl<T> Drop for Game<T> {
    fn drop(&mut self) {
        INSTANCE_EXISTS.store(false, Ordering::SeqCst);
    }
}
