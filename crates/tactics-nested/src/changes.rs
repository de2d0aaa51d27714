//! `NestedChanges` — the incremental delta report returned by every
//! [`NestedMap`][crate::NestedMap] mutation.

use indexmap::{IndexMap, IndexSet};

/// Every node at which a mutation caused a set of ids to become newly
/// present (from `add`) or newly absent (from `remove`), grouped by scope
/// tag then by node id.
///
/// This is the trigger for publish/unpublish visibility side-effects
/// (spec §4.2/§4.6): when a player's sensed-entity rollup gains an id, the
/// game enqueues a synthetic publish for that player.
#[derive(Clone, Debug, Default)]
pub struct NestedChanges<K> {
    by_scope: IndexMap<String, IndexMap<String, IndexSet<K>>>,
}

impl<K: std::hash::Hash + Eq + Clone> NestedChanges<K> {
    pub fn new() -> Self {
        Self {
            by_scope: IndexMap::new(),
        }
    }

    /// Record that `id` changed at node `node_id`, which declares itself at
    /// `scope`.
    pub(crate) fn record(&mut self, scope: &str, node_id: &str, id: K) {
        self.by_scope
            .entry(scope.to_string())
            .or_default()
            .entry(node_id.to_string())
            .or_default()
            .insert(id);
    }

    /// `true` if no node was affected.
    pub fn is_empty(&self) -> bool {
        self.by_scope.is_empty()
    }

    /// Iterate `(scope, node_id, &ids)` triples in the order changes were
    /// recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &IndexSet<K>)> {
        self.by_scope.iter().flat_map(|(scope, nodes)| {
            nodes
                .iter()
                .map(move |(node_id, ids)| (scope.as_str(), node_id.as_str(), ids))
        })
    }

    /// All ids that changed at nodes declaring scope `scope`, deduplicated
    /// across nodes.
    pub fn ids_at_scope(&self, scope: &str) -> IndexSet<K> {
        let mut out = IndexSet::new();
        if let Some(nodes) = self.by_scope.get(scope) {
            for ids in nodes.values() {
                out.extend(ids.iter().cloned());
            }
        }
        out
    }

    /// Ids that changed specifically at `node_id`, if any.
    pub fn ids_at_node(&self, scope: &str, node_id: &str) -> Option<&IndexSet<K>> {
        self.by_scope.get(scope)?.get(node_id)
    }

    /// Merge another batch of changes into this one.
    pub fn extend(&mut self, other: NestedChanges<K>) {
        for (scope, nodes) in other.by_scope {
            let entry = self.by_scope.entry(scope).or_default();
            for (node_id, ids) in nodes {
                entry.entry(node_id).or_default().extend(ids);
            }
        }
    }
}
