//! HTTP implementation of the identity backend.
//!
//! Client-side (hydrate): real calls via `gloo-net` against the
//! dashboard's identity endpoints. Server-side (SSR) and native test
//! builds: stubs returning `Network` errors and an already-ended
//! change stream, since identity requests are only meaningful in the
//! browser.
//!
//! Subscriptions are plain unbounded channels: every mutation
//! broadcasts the fresh snapshot to all live subscribers, and each new
//! subscription performs its own session fetch so its first item is
//! fresh truth rather than a cached value.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc;

use super::backend::{AuthChanges, IdentityBackend};
use super::error::AuthError;
use super::types::IdentitySnapshot;

/// Current-session endpoint: `GET` fetches, `DELETE` signs out.
#[cfg(feature = "hydrate")]
const SESSION_ENDPOINT: &str = "/api/identity/session";
#[cfg(feature = "hydrate")]
const PASSWORD_SIGN_IN_ENDPOINT: &str = "/api/identity/password/sign-in";
#[cfg(feature = "hydrate")]
const PASSWORD_REGISTER_ENDPOINT: &str = "/api/identity/password/register";
#[cfg(feature = "hydrate")]
const PASSWORD_LINK_ENDPOINT: &str = "/api/identity/password/link";
#[cfg(feature = "hydrate")]
const FEDERATED_SIGN_IN_ENDPOINT: &str = "/api/identity/federated/sign-in";
#[cfg(feature = "hydrate")]
const FEDERATED_LINK_ENDPOINT: &str = "/api/identity/federated/link";

type Subscriber = mpsc::UnboundedSender<Option<IdentitySnapshot>>;

/// Identity provider client backed by the `/api/identity` endpoints.
#[derive(Clone, Default)]
pub struct HttpIdentityBackend {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl HttpIdentityBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn register_subscriber(&self, tx: Subscriber) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
    }

    /// Push a fresh snapshot to every live subscription, pruning
    /// subscriptions whose receiving end has been dropped.
    fn broadcast(&self, snapshot: &Option<IdentitySnapshot>) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| !tx.is_closed());
            for tx in subscribers.iter() {
                let _ = tx.unbounded_send(snapshot.clone());
            }
        }
    }
}

/// Map a provider failure code to the error taxonomy. Unknown codes
/// degrade to `Network` with the status attached for display.
#[cfg(any(test, feature = "hydrate"))]
fn auth_failure(status: u16, code: &str) -> AuthError {
    match code {
        "invalid-credentials" => AuthError::InvalidCredentials,
        "conflicting-provider" => AuthError::ConflictingProvider,
        "popup-closed" => AuthError::PopupClosed,
        "no-active-session" => AuthError::NoActiveSession,
        _ => AuthError::Network(format!("identity request failed: {status} ({code})")),
    }
}

#[cfg(feature = "hydrate")]
#[derive(serde::Deserialize)]
struct FailureBody {
    error: Option<String>,
}

#[cfg(feature = "hydrate")]
#[derive(serde::Deserialize)]
struct SessionBody {
    identity: Option<IdentitySnapshot>,
}

#[cfg(feature = "hydrate")]
async fn failure_from(resp: gloo_net::http::Response) -> AuthError {
    let status = resp.status();
    let code = resp
        .json::<FailureBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_default();
    auth_failure(status, &code)
}

#[cfg(feature = "hydrate")]
async fn fetch_session() -> Result<Option<IdentitySnapshot>, AuthError> {
    let resp = gloo_net::http::Request::get(SESSION_ENDPOINT)
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(failure_from(resp).await);
    }
    let body: SessionBody = resp
        .json()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    Ok(body.identity)
}

#[cfg(feature = "hydrate")]
async fn post_snapshot(
    endpoint: &str,
    payload: Option<&serde_json::Value>,
) -> Result<IdentitySnapshot, AuthError> {
    let builder = gloo_net::http::Request::post(endpoint);
    let resp = match payload {
        Some(payload) => builder
            .json(payload)
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| AuthError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(failure_from(resp).await);
    }
    resp.json::<IdentitySnapshot>()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> AuthError {
    AuthError::Network("identity requests are not available outside the browser".to_owned())
}

#[async_trait(?Send)]
impl IdentityBackend for HttpIdentityBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let snapshot = post_snapshot(PASSWORD_SIGN_IN_ENDPOINT, Some(&payload)).await?;
            self.broadcast(&Some(snapshot.clone()));
            Ok(snapshot)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn register_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let snapshot = post_snapshot(PASSWORD_REGISTER_ENDPOINT, Some(&payload)).await?;
            self.broadcast(&Some(snapshot.clone()));
            Ok(snapshot)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn sign_in_with_federated_provider(&self) -> Result<IdentitySnapshot, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let snapshot = post_snapshot(FEDERATED_SIGN_IN_ENDPOINT, None).await?;
            self.broadcast(&Some(snapshot.clone()));
            Ok(snapshot)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    async fn link_password_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let snapshot = post_snapshot(PASSWORD_LINK_ENDPOINT, Some(&payload)).await?;
            self.broadcast(&Some(snapshot.clone()));
            Ok(snapshot)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(unavailable())
        }
    }

    async fn link_federated_provider(&self) -> Result<IdentitySnapshot, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let snapshot = post_snapshot(FEDERATED_LINK_ENDPOINT, None).await?;
            self.broadcast(&Some(snapshot.clone()));
            Ok(snapshot)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(SESSION_ENDPOINT)
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            if !resp.ok() {
                let err = failure_from(resp).await;
                // signing out twice is a no-op, not an error
                if err != AuthError::NoActiveSession {
                    return Err(err);
                }
            }
            self.broadcast(&None);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    fn subscribe(&self) -> AuthChanges {
        let (tx, rx) = mpsc::unbounded();
        #[cfg(feature = "hydrate")]
        {
            let backend = self.clone();
            leptos::task::spawn_local(async move {
                // Each subscription fetches the session itself so its
                // first item reflects the provider right now.
                match fetch_session().await {
                    Ok(snapshot) => {
                        if tx.unbounded_send(snapshot).is_ok() {
                            backend.register_subscriber(tx);
                        }
                    }
                    Err(err) => {
                        // Dropping the sender ends the stream without a
                        // first item; resolve() reports the failure.
                        log::warn!("identity session fetch failed: {err}");
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        drop(tx);
        rx.boxed_local()
    }
}
