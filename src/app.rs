//! Root application component with routing, guard wiring, and context
//! providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs the auth store (the single source of identity
//! truth) and the shared state signals, provides them via context, and
//! mounts the router. `GuardedRoutes` keeps the routed view tree
//! behind the navigation guard: nothing under it renders until the
//! guard has resolved and allowed the current transition.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
    hooks::{use_location, use_navigate},
};

use crate::net::backend::IdentityBackend;
use crate::net::http::HttpIdentityBackend;
use crate::pages::auth::AuthPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::records::RecordsPage;
use crate::pages::settings::SettingsPage;
use crate::router::guard::{GuardStatus, install_route_guard};
use crate::state::auth::AuthStore;
use crate::state::records::RecordsState;
use crate::state::ui::UiState;
use crate::util::theme;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the auth store over the HTTP identity backend, provides all
/// shared contexts, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let backend: Arc<dyn IdentityBackend> = Arc::new(HttpIdentityBackend::new());
    let store = AuthStore::new(backend);

    let dark_mode = theme::read_preference();
    theme::apply(dark_mode);

    provide_context(store);
    provide_context(RwSignal::new(UiState { dark_mode }));
    provide_context(RwSignal::new(RecordsState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/rollbook.css"/>
        <Title text="Rollbook"/>

        <Router>
            <GuardedRoutes/>
        </Router>
    }
}

/// Route tree behind the navigation guard. Must live inside `Router`
/// so the guard can observe the reactive pathname.
#[component]
fn GuardedRoutes() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let location = use_location();
    let navigate = use_navigate();
    let status = install_route_guard(store, location.pathname, navigate);

    view! {
        <Show
            when=move || status.get() == GuardStatus::Allowed
            fallback=move || {
                view! {
                    <div class="guard-screen">
                        <p>
                            {move || match status.get() {
                                GuardStatus::Blocked(reason) => format!("Access blocked: {reason}"),
                                _ => "Checking session...".to_owned(),
                            }}
                        </p>
                    </div>
                }
            }
        >
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/auth"/> }/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <ParentRoute path=StaticSegment("dashboard") view=DashboardPage>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("records") view=RecordsPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                </ParentRoute>
            </Routes>
        </Show>
    }
}
