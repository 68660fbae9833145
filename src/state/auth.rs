//! Auth-session state and the store that synchronizes it.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard forces a resolution through [`AuthStore`]
//! before every route transition, and identity-aware components read
//! the session through it. The store is constructed once in `App` and
//! handed to the router and views via context — there is no ambient
//! global.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use futures::StreamExt;
use leptos::prelude::*;

use crate::net::backend::IdentityBackend;
use crate::net::error::AuthError;
use crate::net::types::{IdentitySnapshot, PASSWORD_PROVIDER};

/// Session state derived from the latest identity snapshot.
///
/// `is_authenticated` and `needs_local_password` are pure functions of
/// `identity`. The fields are private so every mutation flows through
/// [`AuthSession::set_identity`], which replaces the identity and
/// recomputes both flags in one indivisible update — readers can never
/// observe the flags apart from the identity they derive from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSession {
    identity: Option<IdentitySnapshot>,
    is_authenticated: bool,
    needs_local_password: bool,
}

impl AuthSession {
    /// Replace the cached identity and recompute both derived flags.
    pub fn set_identity(&mut self, identity: Option<IdentitySnapshot>) {
        self.is_authenticated = identity.is_some();
        self.needs_local_password = identity
            .as_ref()
            .is_some_and(|i| !i.has_provider(PASSWORD_PROVIDER));
        self.identity = identity;
    }

    #[must_use]
    pub fn identity(&self) -> Option<&IdentitySnapshot> {
        self.identity.as_ref()
    }

    /// True iff an identity is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// True iff an identity is present and none of its linked
    /// credentials is the local password provider. Informational for
    /// the UI; the navigation guard ignores it.
    #[must_use]
    pub fn needs_local_password(&self) -> bool {
        self.needs_local_password
    }
}

/// Process-wide auth store wrapping the identity backend.
///
/// Cloning shares the same session signal and backend handle.
#[derive(Clone)]
pub struct AuthStore {
    backend: Arc<dyn IdentityBackend>,
    session: ArcRwSignal<AuthSession>,
}

impl AuthStore {
    /// Create a store with an absent identity. Called once at
    /// application start; the session lives for the whole app.
    #[must_use]
    pub fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        Self {
            backend,
            session: ArcRwSignal::new(AuthSession::default()),
        }
    }

    /// Resolve the current identity: open a one-shot subscription,
    /// await its first snapshot, apply it to the session, and drop the
    /// subscription. Safe to call repeatedly and concurrently — every
    /// call runs its own subscribe/first/unsubscribe cycle against the
    /// latest backend truth, with no shared in-flight state.
    ///
    /// # Errors
    ///
    /// `Network` when the change stream ends before delivering a first
    /// snapshot (backend unreachable). The session is left untouched.
    pub async fn resolve(&self) -> Result<Option<IdentitySnapshot>, AuthError> {
        let mut changes = self.backend.subscribe();
        let Some(snapshot) = changes.next().await else {
            return Err(AuthError::Network(
                "auth change stream closed before the first snapshot".to_owned(),
            ));
        };
        self.session
            .update(|session| session.set_identity(snapshot.clone()));
        Ok(snapshot)
        // `changes` drops here, releasing the one-shot subscription
    }

    /// Sign out through the backend, then clear the session.
    ///
    /// # Errors
    ///
    /// `LogoutFailed` when the backend call fails; the session is left
    /// untouched so the UI keeps presenting a consistent signed-in
    /// view, and the failure is logged at this boundary.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Err(err) = self.backend.sign_out().await {
            log::error!("logout failed: {err}");
            return Err(AuthError::LogoutFailed(err.to_string()));
        }
        self.session.update(|session| session.set_identity(None));
        Ok(())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.with(AuthSession::is_authenticated)
    }

    #[must_use]
    pub fn needs_local_password(&self) -> bool {
        self.session.with(AuthSession::needs_local_password)
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<IdentitySnapshot> {
        self.session.with(|session| session.identity().cloned())
    }

    /// The session signal, for reactive reads in views.
    #[must_use]
    pub fn session(&self) -> ArcRwSignal<AuthSession> {
        self.session.clone()
    }

    /// The backend handle, for the sign-in and credential-link flows.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn IdentityBackend> {
        Arc::clone(&self.backend)
    }
}
