//! Sign-in and registration page for the public entry route.
//!
//! Errors from the identity backend surface verbatim — a registration
//! against a federated-bound email shows the conflicting-provider
//! guidance instead of creating a duplicate account.

use leptos::prelude::*;

use crate::state::auth::AuthStore;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    Register,
}

/// Public entry page with email/password and Google sign-in.
#[component]
pub fn AuthPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();

    let mode = RwSignal::new(AuthMode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit_store = store.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            info.set("Enter both email and password.".to_owned());
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let backend = submit_store.backend();
            let selected = mode.get();
            leptos::task::spawn_local(async move {
                let result = match selected {
                    AuthMode::SignIn => {
                        backend.sign_in_with_password(&email_value, &password_value).await
                    }
                    AuthMode::Register => {
                        backend.register_with_password(&email_value, &password_value).await
                    }
                };
                match result {
                    Ok(_) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/dashboard");
                        }
                    }
                    Err(err) => {
                        info.set(err.to_string());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&submit_store, email_value, password_value);
            busy.set(false);
        }
    };

    let google_store = store.clone();
    let on_google = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let backend = google_store.backend();
            leptos::task::spawn_local(async move {
                match backend.sign_in_with_federated_provider().await {
                    Ok(_) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/dashboard");
                        }
                    }
                    Err(err) => {
                        info.set(err.to_string());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &google_store;
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Rollbook"</h1>
                <p class="auth-card__subtitle">
                    {move || match mode.get() {
                        AuthMode::SignIn => "Sign in to your dashboard",
                        AuthMode::Register => "Create an account",
                    }}
                </p>
                <div class="auth-tabs">
                    <button
                        class=move || tab_class(mode.get() == AuthMode::SignIn)
                        on:click=move |_| {
                            mode.set(AuthMode::SignIn);
                            info.set(String::new());
                        }
                    >
                        "Sign In"
                    </button>
                    <button
                        class=move || tab_class(mode.get() == AuthMode::Register)
                        on:click=move |_| {
                            mode.set(AuthMode::Register);
                            info.set(String::new());
                        }
                    >
                        "Register"
                    </button>
                </div>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || match mode.get() {
                            AuthMode::SignIn => "Sign In",
                            AuthMode::Register => "Create Account",
                        }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <div class="auth-divider"></div>
                <button
                    class="auth-button auth-button--google"
                    on:click=on_google
                    disabled=move || busy.get()
                >
                    "Continue with Google"
                </button>
            </div>
        </div>
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "auth-tab auth-tab--active" } else { "auth-tab" }
}
