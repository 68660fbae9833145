//! Failure taxonomy for identity operations.
//!
//! ERROR HANDLING
//! ==============
//! Sign-in, registration, and link failures surface unchanged to the
//! pages for display; nothing here is retried automatically. The
//! navigation guard treats any resolution failure as fail-closed.

/// Errors produced by the identity backend and the auth store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The email/password pair was rejected by the provider.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// The email is already bound to a federated-only account; sign in
    /// with the federated provider and add a password in settings.
    #[error("this email is linked to a Google account; sign in with Google and add a password in settings")]
    ConflictingProvider,
    /// The federated sign-in window was dismissed before completing.
    #[error("sign-in window was closed before completing")]
    PopupClosed,
    /// Transport failure or an unrecognized provider response.
    #[error("network error: {0}")]
    Network(String),
    /// A linking operation was attempted with no signed-in principal.
    #[error("no user is currently signed in")]
    NoActiveSession,
    /// Sign-out failed; the session state was left untouched.
    #[error("logout failed: {0}")]
    LogoutFailed(String),
}
