//! `Permission` and the priority-keyed table `decide_permission` resolves
//! against (spec §4.3).

use indexmap::IndexMap;
use tactics_core::container::ContainerId;
use tactics_core::using::UsingRef;

/// One recorded permission decision at a given priority.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permission {
    pub permitted: bool,
    pub by: Option<ContainerId>,
    pub using: Option<UsingRef>,
    pub message: Option<String>,
}

impl Permission {
    pub fn allow() -> Self {
        Self {
            permitted: true,
            by: None,
            using: None,
            message: None,
        }
    }

    pub fn deny(by: Option<ContainerId>, message: Option<String>) -> Self {
        Self {
            permitted: false,
            by,
            using: None,
            message,
        }
    }
}

/// Permissions recorded by priority key, with highest priority winning and
/// denial sticky at equal priority.
///
/// A fresh table starts with `{0: allow}` — the default key 0 = "allow"
/// spec §4.3 names — so an action nobody objects to still resolves
/// `permitted`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermissionTable(IndexMap<i32, Permission>);

impl Default for PermissionTable {
    fn default() -> Self {
        let mut map = IndexMap::new();
        map.insert(0, Permission::allow());
        Self(map)
    }
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `perm` at `priority`. A deny replaces a prior allow at the
    /// same priority; an allow never replaces a prior deny there (denials
    /// are sticky at equal priority, per spec §4.3).
    pub fn record(&mut self, priority: i32, perm: Permission) {
        match self.0.get(&priority) {
            Some(existing) if !existing.permitted && perm.permitted => {}
            _ => {
                self.0.insert(priority, perm);
            }
        }
    }

    pub fn get(&self, priority: i32) -> Option<&Permission> {
        self.0.get(&priority)
    }

    /// The entry at the highest recorded priority, and whether it permits.
    pub fn decide(&self) -> (bool, Option<Permission>) {
        match self.0.keys().copied().max() {
            None => (true, None),
            Some(priority) => {
                let perm = self.0[&priority].clone();
                let permitted = perm.permitted;
                (permitted, Some(perm))
            }
        }
    }
}
