//! The requesting user, as seen by the evaluator.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::EntitlementSlug;

/// An immutable snapshot of the subject's auth, entitlement and preview state.
///
/// `entitlement_slugs` is expected to be already filtered to active, unexpired
/// grants. `preview_entitlements` only matters while `is_preview_mode` is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Subject {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub is_auth_loading: bool,
    #[serde(default)]
    pub is_entitlements_loading: bool,
    #[serde(default)]
    pub entitlement_slugs: BTreeSet<EntitlementSlug>,
    #[serde(default)]
    pub is_preview_mode: bool,
    #[serde(default)]
    pub preview_entitlements: BTreeSet<EntitlementSlug>,
}

impl Subject {
    /// A signed-out visitor with nothing loading.
    pub fn anonymous() -> Self {
        Subject::default()
    }

    /// A signed-in user holding `slugs`.
    pub fn authenticated<I>(slugs: I) -> Self
    where
        I: IntoIterator<Item = EntitlementSlug>,
    {
        Subject {
            is_authenticated: true,
            entitlement_slugs: slugs.into_iter().collect(),
            ..Subject::default()
        }
    }

    /// Switch on preview mode with a substitute entitlement set.
    pub fn with_preview<I>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = EntitlementSlug>,
    {
        self.is_preview_mode = true;
        self.preview_entitlements = slugs.into_iter().collect();
        self
    }

    pub fn auth_loading(mut self) -> Self {
        self.is_auth_loading = true;
        self
    }

    pub fn entitlements_loading(mut self) -> Self {
        self.is_entitlements_loading = true;
        self
    }

    /// True while either upstream collaborator is still fetching.
    pub fn is_loading(&self) -> bool {
        self.is_auth_loading || self.is_entitlements_loading
    }

    /// True when preview mode applies, i.e. it is on and has a non-empty set.
    pub fn preview_applies(&self) -> bool {
        self.is_preview_mode && !self.preview_entitlements.is_empty()
    }

    /// The entitlement set decisions are made against: the preview set when
    /// preview mode applies, the real grants otherwise.
    pub fn effective_entitlements(&self) -> &BTreeSet<EntitlementSlug> {
        if self.preview_applies() {
            &self.preview_entitlements
        } else {
            &self.entitlement_slugs
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let who = if self.is_authenticated {
            "authenticated"
        } else {
            "anonymous"
        };
        write!(f, "{who}[{}]", self.entitlement_slugs.iter().join(", "))?;
        if self.is_preview_mode {
            write!(f, " preview[{}]", self.preview_entitlements.iter().join(", "))?;
        }
        if self.is_loading() {
            write!(f, " (loading)")?;
        }
        Ok(())
    }
}
