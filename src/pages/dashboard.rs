//! Dashboard shell for the protected section.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It renders the topbar and
//! the nested section views; the navigation guard has already resolved
//! auth state before anything here mounts. A failed logout keeps the
//! signed-in view and shows the error instead of guessing.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::state::auth::AuthStore;
use crate::state::ui::UiState;
use crate::util::theme;

/// Shell with topbar, needs-password banner, and the section outlet.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let ui = expect_context::<RwSignal<UiState>>();
    let session = store.session();
    let error = RwSignal::new(String::new());

    let email = {
        let session = session.clone();
        move || {
            session.with(|s| s.identity().map(|i| i.email.clone()).unwrap_or_default())
        }
    };

    let logout_store = store.clone();
    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = logout_store.clone();
            leptos::task::spawn_local(async move {
                match store.logout().await {
                    Ok(()) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/auth");
                        }
                    }
                    Err(err) => error.set(err.to_string()),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &logout_store;
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__topbar toolbar">
                <span class="toolbar__brand">"Rollbook"</span>
                <nav class="toolbar__nav">
                    <A href="/dashboard">"Home"</A>
                    <A href="/dashboard/records">"Records"</A>
                    <A href="/dashboard/settings">"Settings"</A>
                </nav>
                <span class="toolbar__spacer"></span>
                <button
                    class="btn toolbar__dark-toggle"
                    on:click=move |_| {
                        let next = theme::toggle(ui.get().dark_mode);
                        ui.update(|u| u.dark_mode = next);
                    }
                    title="Toggle dark mode"
                >
                    {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                </button>
                <span class="toolbar__self">{email}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Log out">
                    "Log Out"
                </button>
            </header>
            <Show when={
                let session = session.clone();
                move || session.with(|s| s.needs_local_password())
            }>
                <div class="dashboard-page__banner">
                    "Your account has no local password yet. "
                    <A href="/dashboard/settings">"Add one in settings."</A>
                </div>
            </Show>
            <Show when=move || !error.get().is_empty()>
                <p class="dashboard-page__error">{move || error.get()}</p>
            </Show>
            <main class="dashboard-page__content">
                <Outlet/>
            </main>
        </div>
    }
}
