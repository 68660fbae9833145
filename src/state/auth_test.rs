use super::*;

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::executor::block_on;
use futures::stream;

use crate::net::backend::AuthChanges;
use crate::net::types::{GOOGLE_PROVIDER, ProviderDescriptor};

fn snapshot(providers: &[&str]) -> IdentitySnapshot {
    IdentitySnapshot {
        id: "u1".to_owned(),
        email: "lea@example.com".to_owned(),
        providers: providers.iter().map(|p| ProviderDescriptor::new(*p)).collect(),
    }
}

/// Backend double with a settable current snapshot and scripted
/// failure modes; every unscripted operation reports a network error.
#[derive(Default)]
struct ScriptedBackend {
    current: Mutex<Option<IdentitySnapshot>>,
    subscribe_calls: AtomicUsize,
    fail_subscribe: bool,
    fail_sign_out: bool,
}

impl ScriptedBackend {
    fn with_current(current: Option<IdentitySnapshot>) -> Self {
        Self {
            current: Mutex::new(current),
            ..Self::default()
        }
    }

    fn set_current(&self, current: Option<IdentitySnapshot>) {
        *self.current.lock().expect("lock") = current;
    }
}

#[async_trait(?Send)]
impl IdentityBackend for ScriptedBackend {
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
        if self.fail_sign_out {
            return Err(AuthError::Network("sign-out endpoint unreachable".to_owned()));
        }
        self.set_current(None);
        Ok(())
    }

    fn subscribe(&self) -> AuthChanges {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_subscribe {
            return stream::empty().boxed_local();
        }
        let current = self.current.lock().expect("lock").clone();
        stream::iter(vec![current]).boxed_local()
    }
}

fn store_over(backend: ScriptedBackend) -> (AuthStore, Arc<ScriptedBackend>) {
    let backend = Arc::new(backend);
    (AuthStore::new(backend.clone()), backend)
}

// =============================================================
// AuthSession derivation
// =============================================================

#[test]
fn absent_identity_clears_both_flags() {
    let mut session = AuthSession::default();
    session.set_identity(Some(snapshot(&[PASSWORD_PROVIDER])));
    session.set_identity(None);
    assert!(session.identity().is_none());
    assert!(!session.is_authenticated());
    assert!(!session.needs_local_password());
}

#[test]
fn password_identity_is_authenticated_without_needing_password() {
    let mut session = AuthSession::default();
    session.set_identity(Some(snapshot(&[PASSWORD_PROVIDER])));
    assert!(session.is_authenticated());
    assert!(!session.needs_local_password());
}

#[test]
fn federated_only_identity_needs_local_password() {
    let mut session = AuthSession::default();
    session.set_identity(Some(snapshot(&[GOOGLE_PROVIDER])));
    assert!(session.is_authenticated());
    assert!(session.needs_local_password());
}

#[test]
fn linking_password_recomputes_needs_local_password() {
    let mut session = AuthSession::default();
    session.set_identity(Some(snapshot(&[GOOGLE_PROVIDER])));
    assert!(session.needs_local_password());

    session.set_identity(Some(snapshot(&[GOOGLE_PROVIDER, PASSWORD_PROVIDER])));
    assert!(!session.needs_local_password());
}

#[test]
fn identity_without_providers_needs_local_password() {
    let mut session = AuthSession::default();
    session.set_identity(Some(snapshot(&[])));
    assert!(session.needs_local_password());
}

// =============================================================
// resolve()
// =============================================================

#[test]
fn resolve_applies_snapshot_and_returns_it() {
    let (store, _) = store_over(ScriptedBackend::with_current(Some(snapshot(&[
        PASSWORD_PROVIDER,
    ]))));

    let resolved = block_on(store.resolve()).expect("resolve");
    assert_eq!(resolved, Some(snapshot(&[PASSWORD_PROVIDER])));
    assert!(store.is_authenticated());
    assert_eq!(store.current_identity(), Some(snapshot(&[PASSWORD_PROVIDER])));
}

#[test]
fn resolve_with_no_session_leaves_store_unauthenticated() {
    let (store, _) = store_over(ScriptedBackend::with_current(None));

    let resolved = block_on(store.resolve()).expect("resolve");
    assert_eq!(resolved, None);
    assert!(!store.is_authenticated());
}

#[test]
fn resolve_twice_yields_identical_identity_and_fresh_subscriptions() {
    let (store, backend) = store_over(ScriptedBackend::with_current(Some(snapshot(&[
        PASSWORD_PROVIDER,
    ]))));

    let first = block_on(store.resolve()).expect("first resolve");
    let second = block_on(store.resolve()).expect("second resolve");
    assert_eq!(first, second);
    // every call opens its own one-shot subscription
    assert_eq!(backend.subscribe_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn resolve_overwrites_previously_applied_state() {
    let (store, backend) = store_over(ScriptedBackend::with_current(Some(snapshot(&[
        GOOGLE_PROVIDER,
    ]))));

    block_on(store.resolve()).expect("first resolve");
    assert!(store.is_authenticated());

    backend.set_current(None);
    block_on(store.resolve()).expect("second resolve");
    assert!(!store.is_authenticated());
    assert!(store.current_identity().is_none());
}

#[test]
fn concurrent_resolves_each_settle_with_the_same_identity() {
    let (store, backend) = store_over(ScriptedBackend::with_current(Some(snapshot(&[
        PASSWORD_PROVIDER,
    ]))));

    let (first, second) = block_on(futures::future::join(store.resolve(), store.resolve()));
    assert_eq!(first.expect("first"), Some(snapshot(&[PASSWORD_PROVIDER])));
    assert_eq!(second.expect("second"), Some(snapshot(&[PASSWORD_PROVIDER])));
    assert_eq!(backend.subscribe_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn resolve_fails_when_stream_ends_without_a_snapshot() {
    let (store, _) = store_over(ScriptedBackend {
        fail_subscribe: true,
        ..ScriptedBackend::default()
    });

    let err = block_on(store.resolve()).expect_err("resolve should fail");
    assert!(matches!(err, AuthError::Network(_)));
    // the session is untouched
    assert!(!store.is_authenticated());
    assert!(store.current_identity().is_none());
}

// =============================================================
// logout()
// =============================================================

#[test]
fn logout_clears_the_session_on_success() {
    let (store, _) = store_over(ScriptedBackend::with_current(Some(snapshot(&[
        PASSWORD_PROVIDER,
    ]))));
    block_on(store.resolve()).expect("resolve");
    assert!(store.is_authenticated());

    block_on(store.logout()).expect("logout");
    assert!(!store.is_authenticated());
    assert!(store.current_identity().is_none());
}

#[test]
fn failed_logout_raises_and_leaves_session_intact() {
    let (store, _) = store_over(ScriptedBackend {
        current: Mutex::new(Some(snapshot(&[PASSWORD_PROVIDER]))),
        fail_sign_out: true,
        ..ScriptedBackend::default()
    });
    block_on(store.resolve()).expect("resolve");

    let err = block_on(store.logout()).expect_err("logout should fail");
    assert!(matches!(err, AuthError::LogoutFailed(_)));
    assert!(store.is_authenticated());
    assert_eq!(store.current_identity(), Some(snapshot(&[PASSWORD_PROVIDER])));
}
