//! Identity backend capability contract.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth store and the sign-in/link flows depend only on this trait;
//! the provider behind it (HTTP endpoints, a vendor SDK, a scripted
//! test double) is opaque. Methods return non-`Send` futures because
//! browser futures are not `Send`; the trait object itself stays
//! `Send + Sync` so it can travel through Leptos context.

use async_trait::async_trait;
use futures::stream::LocalBoxStream;

use super::error::AuthError;
use super::types::IdentitySnapshot;

/// Ordered auth-change events for one subscription. The first item is
/// the current snapshot (or `None` when signed out); every later item
/// is a change — sign-in, sign-out, credential link, or background
/// expiry. Dropping the stream cancels the subscription. A stream that
/// ends without yielding means the backend could not determine the
/// current session; consumers treat that as a failure.
pub type AuthChanges = LocalBoxStream<'static, Option<IdentitySnapshot>>;

/// Capabilities the identity provider offers to this client.
#[async_trait(?Send)]
pub trait IdentityBackend: Send + Sync {
    /// Sign in with a local email + password credential.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` when the pair is rejected; `Network` on
    /// transport failure.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError>;

    /// Create an account with a local email + password credential.
    ///
    /// The provider first checks whether the email is already bound to
    /// a federated-only account and refuses to create a duplicate.
    ///
    /// # Errors
    ///
    /// `ConflictingProvider` when the email belongs to a federated-only
    /// account; `Network` on transport failure.
    async fn register_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError>;

    /// Sign in through the federated provider's popup flow.
    ///
    /// # Errors
    ///
    /// `PopupClosed` when the user dismisses the window; `Network` on
    /// transport failure.
    async fn sign_in_with_federated_provider(&self) -> Result<IdentitySnapshot, AuthError>;

    /// Attach a local password credential to the signed-in principal
    /// and return the refreshed snapshot.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` when nobody is signed in; `Network` on
    /// transport failure.
    async fn link_password_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IdentitySnapshot, AuthError>;

    /// Attach the federated provider to the signed-in principal and
    /// return the refreshed snapshot.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` when nobody is signed in; `PopupClosed` or
    /// `Network` otherwise.
    async fn link_federated_provider(&self) -> Result<IdentitySnapshot, AuthError>;

    /// Terminate the session. Signing out with no active session is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Open a new auth-change subscription (see [`AuthChanges`]).
    fn subscribe(&self) -> AuthChanges;
}
