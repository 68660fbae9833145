//! Shared identity DTOs for the client/provider boundary.
//!
//! DESIGN
//! ======
//! These types mirror the identity endpoints' payloads so serde
//! round-trips stay lossless. A snapshot is immutable once received;
//! the auth store replaces it wholesale on every change notification.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Provider tag for a local email + password credential.
pub const PASSWORD_PROVIDER: &str = "password";

/// Provider tag for the Google federated credential.
pub const GOOGLE_PROVIDER: &str = "google.com";

/// One credential linked to a principal, identified by its provider tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Provider tag (e.g. `"password"`, `"google.com"`).
    pub provider_id: String,
}

impl ProviderDescriptor {
    #[must_use]
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self { provider_id: provider_id.into() }
    }
}

/// The signed-in principal at a point in time. Absence of a session is
/// modeled as `Option<IdentitySnapshot>` being `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    /// Provider-assigned unique identifier.
    pub id: String,
    /// Primary email address of the principal.
    pub email: String,
    /// Credentials linked to the principal, one descriptor each.
    #[serde(default)]
    pub providers: Vec<ProviderDescriptor>,
}

impl IdentitySnapshot {
    /// True when any linked credential carries the given provider tag.
    #[must_use]
    pub fn has_provider(&self, provider_id: &str) -> bool {
        self.providers.iter().any(|p| p.provider_id == provider_id)
    }
}
