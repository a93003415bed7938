//! Entitlement slugs.

use std::borrow::Borrow;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AccessError;

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:[_-][a-z0-9]+)*$").expect("slug pattern is a valid regex")
});

/// The unique identifier of an entitlement, e.g. `active_membership`.
///
/// Slugs are lowercase ASCII words joined by `_` or `-`. An `EntitlementSlug`
/// can only be obtained through validation, so anything holding one can
/// assume it is well formed.
#[derive(
    Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "active_membership")]
pub struct EntitlementSlug(String);

impl EntitlementSlug {
    pub fn new<S: Into<String>>(slug: S) -> Result<Self, AccessError> {
        let slug = slug.into();
        if !SLUG_PATTERN.is_match(&slug) {
            return Err(AccessError::MalformedSlug(format!(
                "'{slug}' (expected lowercase words joined by '_' or '-', e.g. active_membership)"
            )));
        }
        Ok(EntitlementSlug(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntitlementSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntitlementSlug {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntitlementSlug::new(s)
    }
}

impl TryFrom<String> for EntitlementSlug {
    type Error = AccessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntitlementSlug::new(value)
    }
}

impl TryFrom<&str> for EntitlementSlug {
    type Error = AccessError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        EntitlementSlug::new(value)
    }
}

impl From<EntitlementSlug> for String {
    fn from(slug: EntitlementSlug) -> Self {
        slug.0
    }
}

impl AsRef<str> for EntitlementSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntitlementSlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}
