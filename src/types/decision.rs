//! Access decisions and the reasons behind them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};
use utoipa::ToSchema;

use super::slug::EntitlementSlug;

/// Why access was granted, or `None` when it was denied.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessReason {
    /// The content is public.
    Public,
    /// No entitlement is required and the subject is signed in.
    Authenticated,
    /// The subject holds one of the required entitlements.
    Entitlement,
    /// A preview entitlement set matched one of the required entitlements.
    Preview,
    /// Access denied.
    None,
}

impl AccessReason {
    pub fn grants_access(&self) -> bool {
        !matches!(self, AccessReason::None)
    }

    /// Only an entitlement or preview grant names the slug that matched.
    pub fn carries_match(&self) -> bool {
        matches!(self, AccessReason::Entitlement | AccessReason::Preview)
    }
}

/// The outcome of a single access evaluation.
///
/// Fields are private so the reason always agrees with `has_access`, and a
/// loading decision never carries a reason or grants access.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq, Hash)]
pub struct AccessDecision {
    has_access: bool,
    is_loading: bool,
    matching_entitlement: Option<EntitlementSlug>,
    access_reason: Option<AccessReason>,
}

impl AccessDecision {
    /// Upstream data is still being fetched; nothing is decided yet.
    pub fn loading() -> Self {
        AccessDecision {
            has_access: false,
            is_loading: true,
            matching_entitlement: None,
            access_reason: None,
        }
    }

    /// A resolved decision for `reason`. `AccessReason::None` yields a denial.
    ///
    /// `matching_entitlement` is dropped unless `reason` names a matched slug.
    pub(crate) fn resolved(
        reason: AccessReason,
        matching_entitlement: Option<EntitlementSlug>,
    ) -> Self {
        AccessDecision {
            has_access: reason.grants_access(),
            is_loading: false,
            matching_entitlement: matching_entitlement.filter(|_| reason.carries_match()),
            access_reason: Some(reason),
        }
    }

    pub fn denied() -> Self {
        AccessDecision::resolved(AccessReason::None, None)
    }

    pub fn has_access(&self) -> bool {
        self.has_access
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// False while loading; such a decision must be re-evaluated, not cached.
    pub fn is_final(&self) -> bool {
        !self.is_loading
    }

    pub fn matching_entitlement(&self) -> Option<&EntitlementSlug> {
        self.matching_entitlement.as_ref()
    }

    pub fn access_reason(&self) -> Option<AccessReason> {
        self.access_reason
    }
}

impl Display for AccessDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.access_reason, &self.matching_entitlement) {
            (None, _) => write!(f, "Loading"),
            (Some(AccessReason::None), _) => write!(f, "Deny"),
            (Some(reason), Some(slug)) => write!(f, "Allow({reason}; {slug})"),
            (Some(reason), None) => write!(f, "Allow({reason})"),
        }
    }
}

/// The per-item result of a batch evaluation, sized for list rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct ItemAccess {
    pub has_access: bool,
    pub is_locked: bool,
    pub access_reason: AccessReason,
}

impl From<AccessReason> for ItemAccess {
    fn from(reason: AccessReason) -> Self {
        let has_access = reason.grants_access();
        ItemAccess {
            has_access,
            is_locked: !has_access,
            access_reason: reason,
        }
    }
}
