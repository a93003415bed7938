use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "observability")]
use std::time::Duration;

use tracing::debug;

use crate::evaluate::{self, Gated};
use crate::traits::{AuthProvider, EntitlementStore, PreviewModeProvider};
use crate::types::{AccessDecision, AccessPrompt, AccessRequirement, ItemAccess, Subject};

#[cfg(feature = "observability")]
use crate::timers::CheckTimer;

/// Access checks wired to live collaborators. Cloneable and thread-safe.
///
/// Each check takes a fresh [`Subject`] snapshot from the collaborators and
/// hands it to [`evaluate::evaluate`]. Nothing is cached between calls, so a
/// check made while loading is simply repeated once the data arrives.
///
/// The preview provider is optional. Without one, preview mode is off.
#[derive(Clone)]
pub struct AccessEvaluator {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn EntitlementStore>,
    preview: Option<Arc<dyn PreviewModeProvider>>,
}

impl AccessEvaluator {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn EntitlementStore>) -> Self {
        AccessEvaluator {
            auth,
            store,
            preview: None,
        }
    }

    pub fn with_preview_provider(mut self, preview: Arc<dyn PreviewModeProvider>) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn has_preview_provider(&self) -> bool {
        self.preview.is_some()
    }

    /// Snapshot the collaborators into a [`Subject`].
    pub fn subject(&self) -> Subject {
        let (is_preview_mode, preview_entitlements) = match &self.preview {
            Some(preview) if preview.is_preview_mode() => (true, preview.preview_entitlements()),
            _ => (false, Default::default()),
        };

        let subject = Subject {
            is_authenticated: self.auth.is_authenticated(),
            is_auth_loading: self.auth.is_loading(),
            is_entitlements_loading: self.store.is_loading(),
            entitlement_slugs: self.store.entitlement_slugs(),
            is_preview_mode,
            preview_entitlements,
        };

        debug!(
            event = "Access",
            phase = "Subject",
            subject = subject.to_string()
        );

        subject
    }

    pub fn has_any_entitlement(&self) -> bool {
        self.store.has_any_entitlement()
    }

    pub fn check(&self, requirement: &AccessRequirement) -> AccessDecision {
        self.check_snapshot(requirement).0
    }

    /// Check `requirement` and pick the prompt a gated view should show.
    pub fn check_with_prompt(
        &self,
        requirement: &AccessRequirement,
    ) -> (AccessDecision, AccessPrompt) {
        let (decision, subject) = self.check_snapshot(requirement);
        let prompt = AccessPrompt::for_decision(&decision, &subject);
        (decision, prompt)
    }

    // Every single-requirement check goes through here so that it is logged
    // and recorded once. The timing covers the snapshot and the evaluation.
    fn check_snapshot(&self, requirement: &AccessRequirement) -> (AccessDecision, Subject) {
        #[cfg(feature = "observability")]
        let mut elapsed = Duration::ZERO;

        let (decision, subject) = {
            #[cfg(feature = "observability")]
            let _timer = CheckTimer::start(&mut elapsed);

            let subject = self.subject();
            (evaluate::evaluate(requirement, &subject), subject)
        };

        debug!(
            event = "Access",
            phase = "Result",
            requirement = requirement.to_string(),
            decision = decision.to_string()
        );

        #[cfg(feature = "observability")]
        crate::metrics::record_evaluation(
            elapsed,
            decision.has_access(),
            decision.is_loading(),
            decision.access_reason(),
            requirement.to_string(),
        );

        (decision, subject)
    }

    /// Batch check for list rendering. Empty while the subject is loading.
    pub fn check_many<'a, T, I>(&self, items: I) -> HashMap<T::Id, ItemAccess>
    where
        T: Gated + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        #[cfg(feature = "observability")]
        let mut elapsed = Duration::ZERO;

        let subject = self.subject();
        let items: Vec<&T> = items.into_iter().collect();

        let result = {
            #[cfg(feature = "observability")]
            let _timer = CheckTimer::start(&mut elapsed);

            evaluate::evaluate_many(items.iter().copied(), &subject)
        };

        let locked = result.values().filter(|access| access.is_locked).count();
        debug!(
            event = "Access",
            phase = "Batch",
            items = items.len(),
            locked = locked,
            loading = subject.is_loading()
        );

        #[cfg(feature = "observability")]
        crate::metrics::record_batch(elapsed, items.len(), locked, subject.is_loading());

        result
    }
}
