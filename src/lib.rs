//! Entitlement-based access decisions.
//!
//! [`evaluate()`] is a pure function from an [`AccessRequirement`] and a
//! [`Subject`] snapshot to an [`AccessDecision`]. [`AccessEvaluator`] wires
//! it to live auth, entitlement and (optional) preview collaborators.

pub use engine::AccessEvaluator;
pub use error::AccessError;
pub use evaluate::{Gated, evaluate, evaluate_many};
pub use providers::{MemoryEntitlementStore, StaticAuth, StaticPreview};
pub use traits::{AuthProvider, EntitlementStore, PreviewModeProvider};
pub use types::{
    AccessDecision, AccessPrompt, AccessReason, AccessRequirement, Entitlement, EntitlementGrant,
    EntitlementSlug, ItemAccess, Subject,
};

mod engine;
mod error;
mod evaluate;
#[cfg(feature = "observability")]
pub mod metrics;
mod providers;
#[cfg(feature = "observability")]
mod timers;
mod traits;
mod types;
