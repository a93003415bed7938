//! Data model types for access requirements, subjects and decisions.
//!
//! Canonical string forms:
//! - Slug: `active_membership`, lowercase words joined by `_` or `-`
//! - Requirement: `public`, `authenticated` or `any_of[active_membership, trial_access]`
//! - Decision: `Loading`, `Deny`, `Allow(reason)` or `Allow(reason; slug)`

mod decision;
mod entitlement;
mod prompt;
mod requirement;
mod slug;
mod subject;

pub use decision::{AccessDecision, AccessReason, ItemAccess};
pub use entitlement::{Entitlement, EntitlementGrant};
pub use prompt::AccessPrompt;
pub use requirement::AccessRequirement;
pub use slug::EntitlementSlug;
pub use subject::Subject;
