use super::*;

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use futures::executor::block_on;
use futures::stream;

use crate::net::backend::{AuthChanges, IdentityBackend};
use crate::net::types::{IdentitySnapshot, PASSWORD_PROVIDER, ProviderDescriptor};
use crate::router::routes::access_for;

/// Backend double with a fixed current snapshot, or none at all when
/// `reachable` is false (the stream then ends before yielding).
struct FixedBackend {
    current: Option<IdentitySnapshot>,
    reachable: bool,
}

impl FixedBackend {
    fn signed_in() -> Self {
        Self {
            current: Some(IdentitySnapshot {
                id: "u1".to_owned(),
                email: "lea@example.com".to_owned(),
                providers: vec![ProviderDescriptor::new(PASSWORD_PROVIDER)],
            }),
            reachable: true,
        }
    }

    fn signed_out() -> Self {
        Self { current: None, reachable: true }
    }

    fn unreachable() -> Self {
        Self { current: None, reachable: false }
    }
}

#[async_trait(?Send)]
impl IdentityBackend for FixedBackend {
    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        Err(AuthError::Network("not scripted".to_owned()))
    }

    async fn register_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        Err(AuthError::Network("not scripted".to_owned()))
    }

    async fn sign_in_with_federated_provider(&self) -> Result<IdentitySnapshot, AuthError> {
        Err(AuthError::Network("not scripted".to_owned()))
    }

    async fn link_password_credential(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        Err(AuthError::Network("not scripted".to_owned()))
    }

    async fn link_federated_provider(&self) -> Result<IdentitySnapshot, AuthError> {
        Err(AuthError::Network("not scripted".to_owned()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn subscribe(&self) -> AuthChanges {
        if self.reachable {
            stream::iter(vec![self.current.clone()]).boxed_local()
        } else {
            stream::empty().boxed_local()
        }
    }
}

fn store_over(backend: FixedBackend) -> AuthStore {
    AuthStore::new(Arc::new(backend))
}

// =============================================================
// decide()
// =============================================================

#[test]
fn protected_target_without_auth_redirects_to_public_entry() {
    let decision = decide(&access_for("/dashboard/records"), false);
    assert_eq!(decision, GuardDecision::Redirect(PUBLIC_ENTRY_PATH));
}

#[test]
fn public_entry_while_authenticated_redirects_to_dashboard() {
    let decision = decide(&access_for("/auth"), true);
    assert_eq!(decision, GuardDecision::Redirect(PROTECTED_DEFAULT_PATH));
}

#[test]
fn protected_target_with_auth_is_allowed() {
    assert_eq!(decide(&access_for("/dashboard"), true), GuardDecision::Allow);
}

#[test]
fn public_entry_without_auth_is_allowed() {
    assert_eq!(decide(&access_for("/auth"), false), GuardDecision::Allow);
}

#[test]
fn unknown_target_is_allowed_either_way() {
    assert_eq!(decide(&access_for("/nowhere"), false), GuardDecision::Allow);
    assert_eq!(decide(&access_for("/nowhere"), true), GuardDecision::Allow);
}

// =============================================================
// check(): full guard cycles
// =============================================================

#[test]
fn unauthenticated_visitor_is_redirected_from_records() {
    let store = store_over(FixedBackend::signed_out());
    let decision =
        block_on(check(&store, &access_for("/dashboard/records"))).expect("guard cycle");
    assert_eq!(decision, GuardDecision::Redirect(PUBLIC_ENTRY_PATH));
}

#[test]
fn authenticated_visitor_is_redirected_from_auth_page() {
    let store = store_over(FixedBackend::signed_in());
    let decision = block_on(check(&store, &access_for("/auth"))).expect("guard cycle");
    assert_eq!(decision, GuardDecision::Redirect(PROTECTED_DEFAULT_PATH));
}

#[test]
fn check_resolves_before_deciding() {
    let store = store_over(FixedBackend::signed_in());
    assert!(!store.is_authenticated());

    let decision = block_on(check(&store, &access_for("/dashboard"))).expect("guard cycle");
    assert_eq!(decision, GuardDecision::Allow);
    // the decision was made against freshly resolved state
    assert!(store.is_authenticated());
}

#[test]
fn failed_resolution_blocks_without_a_decision() {
    let store = store_over(FixedBackend::unreachable());
    let err = block_on(check(&store, &access_for("/dashboard"))).expect_err("must fail closed");
    assert!(matches!(err, AuthError::Network(_)));
    assert!(!store.is_authenticated());
}
