use super::*;
use crate::types::EntitlementSlug;
use yare::parameterized;


fn slugs(items: &[&str]) -> Vec<EntitlementSlug> {
    items.iter().map(|s| s.parse().unwrap()).collect()
}

fn member(items: &[&str]) -> Subject {
    Subject::authenticated(slugs(items))
}

const MEMBERSHIP_OR_TRIAL: &[&str] = &["active_membership", "trial_access"];

#[test]
fn test_public_content_for_anonymous_subject() {
    let requirement = AccessRequirement::new(["x"], true).unwrap();
    let decision = evaluate(&requirement, &Subject::anonymous());
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": true,
      "is_loading": false,
      "matching_entitlement": null,
      "access_reason": "public"
    }
    "#);
}

#[test]
fn test_authenticated_only_content() {
    let decision = evaluate(&AccessRequirement::authenticated(), &member(&[]));
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": true,
      "is_loading": false,
      "matching_entitlement": null,
      "access_reason": "authenticated"
    }
    "#);
}

#[test]
fn test_second_required_entitlement_matches() {
    let requirement = AccessRequirement::any_of(MEMBERSHIP_OR_TRIAL).unwrap();
    let decision = evaluate(&requirement, &member(&["trial_access"]));
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": true,
      "is_loading": false,
      "matching_entitlement": "trial_access",
      "access_reason": "entitlement"
    }
    "#);
}

#[test]
fn test_no_matching_entitlement_is_denied() {
    let requirement = AccessRequirement::any_of(MEMBERSHIP_OR_TRIAL).unwrap();
    let decision = evaluate(&requirement, &member(&[]));
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": false,
      "is_loading": false,
      "matching_entitlement": null,
      "access_reason": "none"
    }
    "#);
}

#[test]
fn test_preview_ignores_real_entitlements() {
    let requirement = AccessRequirement::any_of(["founding_member"]).unwrap();
    let subject = member(&["active_membership"]).with_preview(slugs(&["founding_member"]));
    let decision = evaluate(&requirement, &subject);
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": true,
      "is_loading": false,
      "matching_entitlement": "founding_member",
      "access_reason": "preview"
    }
    "#);
}

#[test]
fn test_entitlements_loading() {
    let requirement = AccessRequirement::any_of(MEMBERSHIP_OR_TRIAL).unwrap();
    let subject = member(&["active_membership"]).entitlements_loading();
    let decision = evaluate(&requirement, &subject);
    insta::assert_json_snapshot!(decision, @r#"
    {
      "has_access": false,
      "is_loading": true,
      "matching_entitlement": null,
      "access_reason": null
    }
    "#);
}

#[parameterized(
    auth_loading_public = { true, false, true },
    entitlements_loading_public = { false, true, true },
    both_loading_gated = { true, true, false },
    auth_loading_gated = { true, false, false },
)]
fn test_loading_wins_over_every_rule(auth_loading: bool, entitlements_loading: bool, public: bool) {
    let requirement = AccessRequirement::new(MEMBERSHIP_OR_TRIAL, public).unwrap();
    let mut subject = member(&["active_membership"]).with_preview(slugs(&["trial_access"]));
    subject.is_auth_loading = auth_loading;
    subject.is_entitlements_loading = entitlements_loading;

    let decision = evaluate(&requirement, &subject);
    assert_eq!(decision, AccessDecision::loading());
}

#[parameterized(
    signed_in = { true, true, AccessReason::Authenticated },
    signed_out = { false, false, AccessReason::None },
)]
fn test_authentication_only(authenticated: bool, expected_access: bool, reason: AccessReason) {
    let mut subject = member(&["active_membership"]);
    subject.is_authenticated = authenticated;

    let decision = evaluate(&AccessRequirement::authenticated(), &subject);
    assert_eq!(decision.has_access(), expected_access);
    assert_eq!(decision.access_reason(), Some(reason));
    assert_eq!(decision.matching_entitlement(), None);
}

#[parameterized(
    first_held = { &["active_membership"], Some("active_membership") },
    second_held = { &["trial_access"], Some("trial_access") },
    both_held_first_wins = { &["trial_access", "active_membership"], Some("active_membership") },
    unrelated_held = { &["founding_member"], None },
    nothing_held = { &[], None },
)]
fn test_or_semantics_and_first_match(held: &[&str], expected: Option<&str>) {
    let requirement = AccessRequirement::any_of(MEMBERSHIP_OR_TRIAL).unwrap();
    let decision = evaluate(&requirement, &member(held));

    assert_eq!(
        decision.matching_entitlement().map(|s| s.as_str()),
        expected
    );
    assert_eq!(decision.has_access(), expected.is_some());
    let reason = if expected.is_some() {
        AccessReason::Entitlement
    } else {
        AccessReason::None
    };
    assert_eq!(decision.access_reason(), Some(reason));
}

#[test]
fn test_public_wins_over_empty_entitlements_for_anonymous() {
    let decision = evaluate(&AccessRequirement::public(), &Subject::anonymous());
    assert!(decision.has_access());
    assert_eq!(decision.access_reason(), Some(AccessReason::Public));
}

#[test]
fn test_entitlement_holder_needs_no_sign_in_flag() {
    // Entitlement checks only look at grants; the store never hands grants to
    // signed-out visitors.
    let mut subject = member(&["trial_access"]);
    subject.is_authenticated = false;
    let requirement = AccessRequirement::any_of(["trial_access"]).unwrap();
    assert!(evaluate(&requirement, &subject).has_access());
}

#[test]
fn test_preview_mode_with_empty_set_uses_real_entitlements() {
    let requirement = AccessRequirement::any_of(["active_membership"]).unwrap();
    let subject = member(&["active_membership"]).with_preview(vec![]);

    let decision = evaluate(&requirement, &subject);
    assert_eq!(decision.access_reason(), Some(AccessReason::Entitlement));
}

#[test]
fn test_preview_denies_even_when_real_entitlement_matches() {
    let requirement = AccessRequirement::any_of(["active_membership"]).unwrap();
    let subject = member(&["active_membership"]).with_preview(slugs(&["trial_access"]));

    let decision = evaluate(&requirement, &subject);
    assert!(!decision.has_access());
    assert_eq!(decision.access_reason(), Some(AccessReason::None));
}

#[test]
fn test_preview_does_not_affect_public_or_authenticated_rules() {
    let subject = Subject::anonymous().with_preview(slugs(&["founding_member"]));

    let public = evaluate(&AccessRequirement::public(), &subject);
    assert_eq!(public.access_reason(), Some(AccessReason::Public));

    let authenticated = evaluate(&AccessRequirement::authenticated(), &subject);
    assert_eq!(authenticated.access_reason(), Some(AccessReason::None));
}

#[test]
fn test_preview_flag_off_ignores_preview_set() {
    let requirement = AccessRequirement::any_of(["founding_member"]).unwrap();
    let mut subject = member(&[]).with_preview(slugs(&["founding_member"]));
    subject.is_preview_mode = false;

    assert!(!evaluate(&requirement, &subject).has_access());
}
