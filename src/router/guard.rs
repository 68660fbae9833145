//! Navigation guard over route transitions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route transition forces a fresh auth resolution before the
//! target view may mount: the guard suspends the transition on
//! [`AuthStore::resolve`], then either allows it or redirects. When
//! resolution itself fails it blocks the transition and surfaces the
//! error; the guard never falls back to a permissive default.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::routes::{self, PROTECTED_DEFAULT_PATH, PUBLIC_ENTRY_PATH, RouteTarget};
use crate::net::error::AuthError;
use crate::state::auth::AuthStore;

/// Outcome of one guard cycle for a settled resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Complete the transition unchanged.
    Allow,
    /// Abandon the transition and navigate to the given path instead.
    Redirect(&'static str),
}

/// Guard state the view tree renders against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardStatus {
    /// A resolution is in flight; the transition stays suspended.
    Checking,
    /// The last transition was allowed; the routed views may mount.
    Allowed,
    /// Resolution failed; nothing mounts and the reason is shown.
    Blocked(String),
}

/// Decide a settled transition. Rule order matters only for reading:
/// the two redirect rules are mutually exclusive on `authenticated`.
#[must_use]
pub fn decide(target: &RouteTarget, authenticated: bool) -> GuardDecision {
    if target.requires_auth && !authenticated {
        GuardDecision::Redirect(PUBLIC_ENTRY_PATH)
    } else if authenticated && target.is_public_entry() {
        GuardDecision::Redirect(PROTECTED_DEFAULT_PATH)
    } else {
        GuardDecision::Allow
    }
}

/// Run one full guard cycle: resolve the current identity, then decide.
///
/// # Errors
///
/// Propagates the resolution failure unchanged; no decision is made
/// and the transition must stay blocked (fail closed).
pub async fn check(store: &AuthStore, target: &RouteTarget) -> Result<GuardDecision, AuthError> {
    store.resolve().await?;
    Ok(decide(target, store.is_authenticated()))
}

/// Install the guard over the router's reactive pathname. Each
/// transition starts its own independent resolve/decide cycle; a
/// generation counter keeps a superseded cycle from publishing a stale
/// outcome. Redirects re-enter the guard as new transitions.
pub fn install_route_guard<F>(
    store: AuthStore,
    pathname: Memo<String>,
    navigate: F,
) -> RwSignal<GuardStatus>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let status = RwSignal::new(GuardStatus::Checking);
    let generation = StoredValue::new(0u64);

    Effect::new(move || {
        let target = routes::access_for(&pathname.get());
        let run = generation.get_value() + 1;
        generation.set_value(run);
        status.set(GuardStatus::Checking);

        #[cfg(feature = "hydrate")]
        {
            let store = store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = check(&store, &target).await;
                if generation.get_value() != run {
                    // a newer transition owns the guard now
                    return;
                }
                match outcome {
                    Ok(GuardDecision::Allow) => status.set(GuardStatus::Allowed),
                    Ok(GuardDecision::Redirect(to)) => navigate(to, NavigateOptions::default()),
                    Err(err) => {
                        log::error!("navigation guard: auth resolution failed: {err}");
                        status.set(GuardStatus::Blocked(err.to_string()));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&store, &navigate, target, run);
        }
    });

    status
}
