//! `NestedMap<K, V>` — the incremental rollup tree.
//!
//! # Why this exists
//!
//! Sensed-entity sets and scope memberships are aggregated across several
//! tiers (sensor → entity → player → team). Recomputing a team's full
//! sensed-entity set from scratch every time any of its players' sensors
//! changes would be O(everything) per event. `NestedMap` instead keeps a
//! reference count per id at every node: a node "contains" an id iff its
//! count is nonzero, and `add`/`remove` only walk the transitive parent
//! chain of the node that actually changed — O(depth), not O(population).
//!
//! Parent/child edges form a DAG (a player may roll up into more than one
//! team's view in principle), so nodes are stored in an arena keyed by a
//! stable string id rather than held via owning parent/child pointers —
//! the same cycle this workspace's component subscriptions face, solved
//! the same way (see Design Notes in `DESIGN.md`).

use indexmap::{IndexMap, IndexSet};

use crate::changes::NestedChanges;
use crate::error::{NestedError, NestedResult};

struct Node<K, V> {
    scope: String,
    local: IndexMap<K, V>,
    /// Number of contributing sources (local presence counts as one, plus
    /// one per child currently containing the id) currently keeping each id
    /// "present" at this node.
    refcount: IndexMap<K, u32>,
    parents: IndexSet<String>,
    children: IndexSet<String>,
}

impl<K, V> Node<K, V> {
    fn new(scope: String) -> Self {
        Self {
            scope,
            local: IndexMap::new(),
            refcount: IndexMap::new(),
            parents: IndexSet::new(),
            children: IndexSet::new(),
        }
    }
}

/// A tree (DAG) of overlapping id sets with incremental rollup.
pub struct NestedMap<K, V> {
    nodes: IndexMap<String, Node<K, V>>,
}

impl<K, V> Default for NestedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: std::hash::Hash + Eq + Clone, V> NestedMap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }

    /// Register a node. A no-op if `node_id` is already registered —
    /// existing local data and edges are left untouched, mirroring the
    /// idempotent-register idiom used for component registration elsewhere
    /// in this workspace.
    pub fn add_node(&mut self, node_id: impl Into<String>, scope: impl Into<String>) {
        let id = node_id.into();
        if !self.nodes.contains_key(&id) {
            self.nodes.insert(id, Node::new(scope.into()));
        }
    }

    /// `true` if `node_id` has been registered.
    pub fn has_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Declare `parent_id` as a parent of `child_id`: `child`'s contents
    /// (and everything already rolled up into it) now roll up into
    /// `parent` too.
    ///
    /// # Errors
    /// Returns [`NestedError::Cycle`] if `parent_id` is already a
    /// transitive descendant of `child_id` — adding the edge would make a
    /// node its own ancestor.
    pub fn add_parent(&mut self, child_id: &str, parent_id: &str) -> NestedResult<NestedChanges<K>> {
        if !self.nodes.contains_key(child_id) {
            return Err(NestedError::NodeNotFound(child_id.to_string()));
        }
        if !self.nodes.contains_key(parent_id) {
            return Err(NestedError::NodeNotFound(parent_id.to_string()));
        }
        if self.is_ancestor(child_id, parent_id) {
            return Err(NestedError::Cycle {
                child: child_id.to_string(),
                parent: parent_id.to_string(),
            });
        }

        self.nodes
            .get_mut(child_id)
            .unwrap()
            .parents
            .insert(parent_id.to_string());
        self.nodes
            .get_mut(parent_id)
            .unwrap()
            .children
            .insert(child_id.to_string());

        // Roll the child's existing contents into the new parent (and its
        // ancestors) so the invariant holds immediately, not just for
        // future adds.
        let mut changes = NestedChanges::new();
        let existing: Vec<K> = self.nodes[child_id].refcount.keys().cloned().collect();
        for key in existing {
            self.propagate_increment(parent_id, &key, &mut changes);
        }
        Ok(changes)
    }

    /// `true` iff `candidate` is `node` itself or a transitive parent of it.
    fn is_ancestor(&self, candidate: &str, node: &str) -> bool {
        if candidate == node {
            return true;
        }
        let Some(n) = self.nodes.get(node) else {
            return false;
        };
        n.parents.iter().any(|p| self.is_ancestor(candidate, p))
    }

    /// Insert `(key, value)` into `node_id`'s local map. Returns the set of
    /// nodes at which `key` became newly present.
    pub fn add(&mut self, node_id: &str, key: K, value: V) -> NestedResult<NestedChanges<K>> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| NestedError::NodeNotFound(node_id.to_string()))?;
        let newly_local = !node.local.contains_key(&key);
        node.local.insert(key.clone(), value);

        let mut changes = NestedChanges::new();
        if newly_local {
            self.propagate_increment(node_id, &key, &mut changes);
        }
        Ok(changes)
    }

    /// Remove `key` from `node_id`'s local map, if present. Returns the set
    /// of nodes from which `key` was actually removed (i.e. no remaining
    /// child or local entry kept it present).
    pub fn remove(&mut self, node_id: &str, key: &K) -> NestedResult<NestedChanges<K>> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| NestedError::NodeNotFound(node_id.to_string()))?;
        let was_local = node.local.shift_remove(key).is_some();

        let mut changes = NestedChanges::new();
        if was_local {
            self.propagate_decrement(node_id, key, &mut changes);
        }
        Ok(changes)
    }

    /// Tear a node down entirely: every locally-held key is removed (with
    /// the normal upward propagation), then the node's parent/child edges
    /// are severed and it is dropped from the arena.
    pub fn remove_node(&mut self, node_id: &str) -> NestedResult<NestedChanges<K>> {
        let keys: Vec<K> = self
            .nodes
            .get(node_id)
            .ok_or_else(|| NestedError::NodeNotFound(node_id.to_string()))?
            .local
            .keys()
            .cloned()
            .collect();

        let mut changes = NestedChanges::new();
        for key in keys {
            changes.extend(self.remove(node_id, &key)?);
        }

        let (parents, children) = {
            let node = &self.nodes[node_id];
            (node.parents.clone(), node.children.clone())
        };
        for parent in &parents {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.shift_remove(node_id);
            }
        }
        for child in &children {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parents.shift_remove(node_id);
            }
        }
        self.nodes.shift_remove(node_id);
        Ok(changes)
    }

    /// `true` iff `node_id` contains `key`, locally or via any descendant.
    pub fn contains(&self, node_id: &str, key: &K) -> bool {
        self.nodes
            .get(node_id)
            .is_some_and(|n| n.refcount.contains_key(key))
    }

    /// Shared access to `node_id`'s local map.
    pub fn local(&self, node_id: &str) -> Option<&IndexMap<K, V>> {
        self.nodes.get(node_id).map(|n| &n.local)
    }

    /// All ids currently rolled up into `node_id` (local or via any
    /// descendant).
    pub fn effective_ids(&self, node_id: &str) -> Vec<K> {
        self.nodes
            .get(node_id)
            .map(|n| n.refcount.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn propagate_increment(&mut self, node_id: &str, key: &K, changes: &mut NestedChanges<K>) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        let count = node.refcount.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            changes.record(&node.scope.clone(), node_id, key.clone());
            let parents: Vec<String> = node.parents.iter().cloned().collect();
            for parent in parents {
                self.propagate_increment(&parent, key, changes);
            }
        }
    }

    fn propagate_decrement(&mut self, node_id: &str, key: &K, changes: &mut NestedChanges<K>) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        let Some(count) = node.refcount.get_mut(key) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            node.refcount.shift_remove(key);
            changes.record(&node.scope.clone(), node_id, key.clone());
            let parents: Vec<String> = node.parents.iter().cloned().collect();
            for parent in parents {
                self.propagate_decrement(&parent, key, changes);
            }
        }
    }
}
