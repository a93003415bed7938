//! What a piece of content or a feature needs before it can be shown.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AccessError;

use super::slug::EntitlementSlug;

/// Access requirements for a piece of content.
///
/// `required_entitlements` is ordered: the first slug the subject holds is
/// reported as the matching entitlement. Holding any one slug is enough.
/// An empty list means "any signed-in user", and `is_public` lifts every
/// requirement, including authentication.
///
/// Construction is where slugs are validated, so an `AccessRequirement` that
/// exists is always well formed. Duplicate slugs are collapsed, keeping the
/// first occurrence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(try_from = "RawRequirement")]
pub struct AccessRequirement {
    required_entitlements: Vec<EntitlementSlug>,
    is_public: bool,
}

// Unknown keys and a missing slug list are rejected. Defaulting either one
// would turn a gated requirement into an authentication-only one.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRequirement {
    required_entitlements: Vec<String>,
    #[serde(default)]
    is_public: bool,
}

impl TryFrom<RawRequirement> for AccessRequirement {
    type Error = AccessError;

    fn try_from(raw: RawRequirement) -> Result<Self, Self::Error> {
        AccessRequirement::new(raw.required_entitlements, raw.is_public)
    }
}

impl AccessRequirement {
    /// Build a requirement from raw slug strings.
    ///
    /// Fails with [`AccessError::MalformedRequirement`] if any slug is not a
    /// valid entitlement slug. A malformed entry is never skipped.
    pub fn new<I, S>(required_entitlements: I, is_public: bool) -> Result<Self, AccessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slugs = required_entitlements
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                EntitlementSlug::new(s.as_ref()).map_err(|e| {
                    AccessError::MalformedRequirement(format!("entry {idx}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_slugs(slugs, is_public))
    }

    /// Build a requirement from already validated slugs.
    pub fn from_slugs<I>(slugs: I, is_public: bool) -> Self
    where
        I: IntoIterator<Item = EntitlementSlug>,
    {
        AccessRequirement {
            required_entitlements: slugs.into_iter().unique().collect(),
            is_public,
        }
    }

    /// Content anyone can see, signed in or not.
    pub fn public() -> Self {
        AccessRequirement {
            required_entitlements: Vec::new(),
            is_public: true,
        }
    }

    /// Content any signed-in user can see.
    pub fn authenticated() -> Self {
        AccessRequirement::default()
    }

    /// Content gated behind holding at least one of `slugs`.
    pub fn any_of<I, S>(slugs: I) -> Result<Self, AccessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        AccessRequirement::new(slugs, false)
    }

    pub fn required_entitlements(&self) -> &[EntitlementSlug] {
        &self.required_entitlements
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// True when no specific entitlement is required.
    pub fn is_authentication_only(&self) -> bool {
        !self.is_public && self.required_entitlements.is_empty()
    }
}

impl Display for AccessRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_public {
            return write!(f, "public");
        }
        if self.required_entitlements.is_empty() {
            return write!(f, "authenticated");
        }
        write!(f, "any_of[{}]", self.required_entitlements.iter().join(", "))
    }
}
