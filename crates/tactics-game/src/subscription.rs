//! The subscription-wiring algorithm (spec §4.1) deferred from
//! `tactics-component`: resolving a component's declared target scope to a
//! concrete remote container via the registry `Game` owns, or falling back
//! to a local subscription when the scope is invalid or unresolvable (an
//! unpublished container's world/player/team scopes simply fail to
//! resolve, which routes through the same fallback — see `wire_component`).

use tactics_action::{Action, ActionKind};
use tactics_component::{valid_target_scopes, Component, ComponentBehavior, RoleScopes, Subscription};
use tactics_core::container::ContainerId;
use tactics_core::ids::ComponentId;

use crate::error::{GameError, GameResult};
use crate::game::Game;

impl<T> Game<T> {
    /// Stage a component owned by `container` and run the action that
    /// gates its real attachment (spec §4.1 `add_component`, spec §4.4
    /// `AttachComponentAction`): `Action` is plain serializable data and
    /// can't carry a boxed behavior, so the component sits in
    /// [`Game::pending_components`] until [`Game::commit_attach_component`]
    /// (the action's `apply()`) moves it into the real catalog. Entity
    /// containers are the only ones `Action::target` can name, so that's
    /// the only case routed through `execute`; other container kinds
    /// attach immediately, same as before.
    pub fn attach_component(
        &mut self,
        container: ContainerId,
        target_scopes: RoleScopes,
        broadcast: bool,
        behavior: Box<dyn ComponentBehavior<Action>>,
    ) -> GameResult<ComponentId>
    where
        T: Clone,
    {
        if self.catalog_for(container).is_none() {
            return Err(GameError::ComponentNotFound(ComponentId::new()));
        }
        let component = Component::new(container, target_scopes, behavior).with_broadcast(broadcast);
        let id = component.id();
        self.pending_components.insert(id, component);

        match container {
            ContainerId::Entity(entity) => {
                self.execute(Action::new(ActionKind::AttachComponent { component: id }).with_target(entity), false);
            }
            _ => {
                if !self.commit_attach_component(container, id) {
                    self.pending_components.shift_remove(&id);
                    return Err(GameError::Validation(format!("failed to attach component {id}")));
                }
            }
        }
        // A modifier may have denied the AttachComponentAction, leaving the
        // component staged but never committed — don't let it linger.
        self.pending_components.shift_remove(&id);
        Ok(id)
    }

    /// `target._attach(component)`: move a staged component out of
    /// [`Game::pending_components`] into `container`'s real catalog and
    /// wire it, same as [`Game::subscribe_to_all`] would for an existing
    /// one. Returns `false` (a no-op) if nothing was pending for `id` —
    /// either it was never staged, or this is a second call after the
    /// first already committed it.
    pub(crate) fn commit_attach_component(&mut self, container: ContainerId, id: ComponentId) -> bool {
        let Some(component) = self.pending_components.shift_remove(&id) else {
            return false;
        };
        let Some(cat) = self.catalog_for_mut(container) else { return false };
        if cat.insert(component).is_err() {
            return false;
        }
        self.wire_component(container, id).is_ok()
    }

    /// Remove `component_id` from `owner`'s catalog and unwire every
    /// subscription it holds, on both sides (spec §4.1 `remove_component`).
    pub fn detach_component(&mut self, owner: ContainerId, component_id: ComponentId) -> GameResult<()> {
        self.unwire_component(owner, component_id);
        self.catalog_for_mut(owner)
            .ok_or(GameError::ComponentNotFound(component_id))?
            .take(component_id);
        Ok(())
    }

    /// Wire every component currently owned by `owner`, after first
    /// clearing existing outgoing subscriptions (spec §4.1
    /// `subscribe_to_all`, called when a container transitions to
    /// `published`).
    pub fn subscribe_to_all(&mut self, owner: ContainerId) -> GameResult<()> {
        self.unsubscribe_from_all(owner);
        let ids = self.component_ids_of(owner);
        for id in ids {
            self.wire_component(owner, id)?;
        }
        Ok(())
    }

    /// Symmetric teardown of every component's outgoing subscriptions,
    /// without removing the components themselves (spec §4.1
    /// `unsubscribe_from_all`, called on `unpublish`).
    pub fn unsubscribe_from_all(&mut self, owner: ContainerId) {
        for id in self.component_ids_of(owner) {
            self.unwire_component(owner, id);
        }
    }

    fn component_ids_of(&self, owner: ContainerId) -> Vec<ComponentId> {
        self.catalog_for(owner)
            .map(|c| c.all().map(|comp| comp.id()).collect())
            .unwrap_or_default()
    }

    fn unwire_component(&mut self, owner: ContainerId, component_id: ComponentId) {
        let subs = self
            .catalog_for_mut(owner)
            .map(|c| c.take_subscriptions_of(component_id))
            .unwrap_or_default();
        for sub in subs {
            if let Some(cat) = self.catalog_for_mut(sub.to) {
                cat.remove_subscriber(component_id, sub.role);
            }
        }
    }

    /// Resolve `component_id`'s declared target scope for every role it
    /// fills and record the matching `Subscription` on both sides. Falls
    /// back to a local subscription (owner listening to its own catalog)
    /// when the declared scope is outside [`valid_target_scopes`] for the
    /// owner's tier, or when the owner has no live container at that scope.
    fn wire_component(&mut self, owner: ContainerId, component_id: ComponentId) -> GameResult<()> {
        let owner_catalog = self.catalog_for(owner).ok_or(GameError::ComponentNotFound(component_id))?;
        let parent_scope = owner_catalog.parent_scope();
        let component = owner_catalog
            .get(component_id)
            .ok_or(GameError::ComponentNotFound(component_id))?;
        let declared: Vec<_> = component
            .roles()
            .into_iter()
            .filter_map(|role| component.target_scope(role).map(|scope| (role, scope)))
            .collect();

        for (role, scope) in declared {
            let valid = valid_target_scopes(parent_scope).contains(&scope);
            let resolved = if valid { self.get_container_by_scope(owner, scope) } else { None };
            let (to, scope) = resolved.map_or((owner, parent_scope), |to| (to, scope));
            let sub = Subscription { component: component_id, owner, to, role, scope };
            if let Some(cat) = self.catalog_for_mut(owner) {
                cat.add_subscription(sub.clone());
            }
            if let Some(cat) = self.catalog_for_mut(to) {
                cat.add_subscriber(sub);
            }
        }
        Ok(())
    }
}
