//! What a gated view should show in place of denied content.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use super::decision::AccessDecision;
use super::subject::Subject;

/// UI hint derived from a decision.
///
/// Loading is kept apart from denial so a view never flashes locked or
/// unlocked content while the subject is still being resolved.
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
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AccessPrompt {
    /// Access granted, render the content.
    None,
    /// Still loading, render a placeholder.
    Wait,
    /// Denied and signed out.
    SignIn,
    /// Denied while signed in: the subject lacks the entitlement.
    Upgrade,
}

impl AccessPrompt {
    pub fn for_decision(decision: &AccessDecision, subject: &Subject) -> Self {
        if decision.is_loading() {
            AccessPrompt::Wait
        } else if decision.has_access() {
            AccessPrompt::None
        } else if subject.is_authenticated {
            AccessPrompt::Upgrade
        } else {
            AccessPrompt::SignIn
        }
    }
}
