use std::collections::HashMap;
use std::hash::Hash;

use crate::types::{
    AccessDecision, AccessReason, AccessRequirement, EntitlementSlug, ItemAccess, Subject,
};

/// Anything rendered behind an access gate, e.g. a module card in a grid.
pub trait Gated {
    /// Key under which the batch result for this item is reported.
    type Id: Eq + Hash;

    fn access_id(&self) -> Self::Id;

    fn access_requirement(&self) -> &AccessRequirement;
}

/// Decide whether `subject` may access content guarded by `requirement`.
///
/// Rules are applied in order and the first that applies wins:
///
/// 1. While auth or entitlements are loading, the decision is `loading`.
/// 2. Public content is granted with reason `public`.
/// 3. With no required entitlements, signed-in subjects are granted with
///    reason `authenticated`, everyone else is denied.
/// 4. If preview mode is on with a non-empty preview set, only the preview
///    set is checked (reason `preview`). Real grants are ignored.
/// 5. Otherwise the subject needs any one of the required entitlements
///    (reason `entitlement`).
///
/// The matching entitlement is the first required slug, in requirement
/// order, found in the set that was checked.
pub fn evaluate(requirement: &AccessRequirement, subject: &Subject) -> AccessDecision {
    match decide(requirement, subject) {
        Some((reason, matching)) => AccessDecision::resolved(reason, matching.cloned()),
        None => AccessDecision::loading(),
    }
}

/// Evaluate every item in `items` against one subject.
///
/// Returns an empty map while the subject is loading; a missing entry means
/// "not decided yet", never "denied".
pub fn evaluate_many<'a, T, I>(items: I, subject: &Subject) -> HashMap<T::Id, ItemAccess>
where
    T: Gated + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if subject.is_loading() {
        return HashMap::new();
    }

    items
        .into_iter()
        .filter_map(|item| {
            decide(item.access_requirement(), subject)
                .map(|(reason, _)| (item.access_id(), ItemAccess::from(reason)))
        })
        .collect()
}

/// Shared rule chain; `None` means the subject is still loading.
fn decide<'r>(
    requirement: &'r AccessRequirement,
    subject: &Subject,
) -> Option<(AccessReason, Option<&'r EntitlementSlug>)> {
    if subject.is_loading() {
        return None;
    }

    if requirement.is_public() {
        return Some((AccessReason::Public, None));
    }

    let required = requirement.required_entitlements();
    if required.is_empty() {
        let reason = if subject.is_authenticated {
            AccessReason::Authenticated
        } else {
            AccessReason::None
        };
        return Some((reason, None));
    }

    let (held, granted) = if subject.preview_applies() {
        (&subject.preview_entitlements, AccessReason::Preview)
    } else {
        (&subject.entitlement_slugs, AccessReason::Entitlement)
    };

    match required.iter().find(|slug| held.contains(*slug)) {
        Some(slug) => Some((granted, Some(slug))),
        None => Some((AccessReason::None, None)),
    }
}

#[cfg(test)]
mod tests;
