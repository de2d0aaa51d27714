//! `Grant` — a record of how an entity came to have an ability.

use tactics_core::ids::EntityId;
use tactics_core::using::UsingRef;

/// Records who (or what) gave an entity an ability it holds, so the
/// ability can later be revoked precisely (spec §3, §4.4
/// `LearnAbility`/`ForgetAbilityAction`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grant {
    pub ability: String,
    pub granted_by: Option<EntityId>,
    pub using: Option<UsingRef>,
}

impl Grant {
    pub fn new(ability: impl Into<String>) -> Self {
        Self {
            ability: ability.into(),
            granted_by: None,
            using: None,
        }
    }

    pub fn granted_by(mut self, granter: EntityId) -> Self {
        self.granted_by = Some(granter);
        self
    }

    pub fn using(mut self, using: impl Into<UsingRef>) -> Self {
        self.using = Some(using.into());
        self
    }

    /// `true` if this grant matches the `(granted_by, using)` key an
    /// `ForgetAbilityAction` names for removal.
    pub fn matches(&self, granted_by: Option<EntityId>, using: Option<UsingRef>) -> bool {
        self.granted_by == granted_by && self.using == using
    }
}
