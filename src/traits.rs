use std::collections::BTreeSet;

use crate::types::EntitlementSlug;

/// Source of the subject's sign-in state.
pub trait AuthProvider: Send + Sync {
    fn is_authenticated(&self) -> bool;

    /// True while the session is still being restored.
    fn is_loading(&self) -> bool;
}

/// Source of the subject's granted entitlements.
pub trait EntitlementStore: Send + Sync {
    /// Slugs of grants that are active and unexpired right now. Expiry
    /// filtering belongs here, not in the evaluator.
    fn entitlement_slugs(&self) -> BTreeSet<EntitlementSlug>;

    fn is_loading(&self) -> bool;

    /// True when the subject holds at least one entitlement of any kind.
    fn has_any_entitlement(&self) -> bool {
        !self.entitlement_slugs().is_empty()
    }
}

/// Admin preview override, substituting a fixed entitlement set for QA.
pub trait PreviewModeProvider: Send + Sync {
    fn is_preview_mode(&self) -> bool;

    fn preview_entitlements(&self) -> BTreeSet<EntitlementSlug>;
}
