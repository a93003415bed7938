//! Entitlement catalog records and per-user grants.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::slug::EntitlementSlug;

/// A named permission grant as maintained by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Entitlement {
    pub slug: EntitlementSlug,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive entitlements are never exposed to the evaluator, even if granted.
    pub is_active: bool,
    #[schema(value_type = String)]
    pub created_at: SystemTime,
    #[schema(value_type = String)]
    pub updated_at: SystemTime,
}

impl Entitlement {
    /// Create a new active entitlement, stamped with the current time.
    pub fn new<S: Into<String>>(slug: EntitlementSlug, display_name: S) -> Self {
        let now = SystemTime::now();
        Entitlement {
            slug,
            display_name: display_name.into(),
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self.updated_at = SystemTime::now();
        self
    }
}

/// An entitlement granted to a user, optionally until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct EntitlementGrant {
    pub slug: EntitlementSlug,
    #[schema(value_type = String)]
    pub granted_at: SystemTime,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub expires_at: Option<SystemTime>,
}

impl EntitlementGrant {
    /// A grant starting now and never expiring.
    pub fn new(slug: EntitlementSlug) -> Self {
        EntitlementGrant {
            slug,
            granted_at: SystemTime::now(),
            expires_at: None,
        }
    }

    pub fn expiring_at(mut self, expires_at: SystemTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// A grant is live from `granted_at` up to, but not including, `expires_at`.
    pub fn is_live_at(&self, now: SystemTime) -> bool {
        if now < self.granted_at {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => true,
        }
    }
}
