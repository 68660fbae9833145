//! Settings section: credential linking for the signed-in principal.
//!
//! A federated-only account is prompted to add a local password here;
//! successful linking re-resolves the session so the prompt clears as
//! soon as the fresh snapshot carries the password provider.

use leptos::prelude::*;

use crate::state::auth::AuthStore;

/// Credential management for the signed-in principal.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let session = store.session();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Prefill the link form with the signed-in email.
    {
        let session = session.clone();
        Effect::new(move || {
            let current = session.with(|s| s.identity().map(|i| i.email.clone()));
            if let Some(value) = current {
                if email.get_untracked().is_empty() {
                    email.set(value);
                }
            }
        });
    }

    let link_password_store = store.clone();
    let on_link_password = move |ev: leptos::ev::SubmitEvent| {
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
            let store = link_password_store.clone();
            leptos::task::spawn_local(async move {
                let result = store
                    .backend()
                    .link_password_credential(&email_value, &password_value)
                    .await;
                match result {
                    Ok(_) => {
                        // pick up the refreshed provider list
                        match store.resolve().await {
                            Ok(_) => info.set("Password added to your account.".to_owned()),
                            Err(err) => info.set(err.to_string()),
                        }
                        password.set(String::new());
                    }
                    Err(err) => info.set(err.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&link_password_store, email_value, password_value);
            busy.set(false);
        }
    };

    let link_google_store = store.clone();
    let on_link_google = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let store = link_google_store.clone();
            leptos::task::spawn_local(async move {
                match store.backend().link_federated_provider().await {
                    Ok(_) => match store.resolve().await {
                        Ok(_) => info.set("Google account linked.".to_owned()),
                        Err(err) => info.set(err.to_string()),
                    },
                    Err(err) => info.set(err.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &link_google_store;
            busy.set(false);
        }
    };

    view! {
        <section class="settings-panel">
            <h2>"Account"</h2>
            <Show when={
                let session = session.clone();
                move || session.with(|s| s.needs_local_password())
            }>
                <p class="settings-panel__hint">
                    "Your account signs in with Google only. Add a password to also sign in directly."
                </p>
            </Show>
            <h3>"Linked Sign-In Methods"</h3>
            <ul class="settings-panel__providers">
                {
                    let session = session.clone();
                    move || {
                        session
                            .with(|s| {
                                s.identity().map(|i| i.providers.clone()).unwrap_or_default()
                            })
                            .into_iter()
                            .map(|provider| view! { <li>{provider.provider_id}</li> })
                            .collect::<Vec<_>>()
                    }
                }
            </ul>
            <h3>"Add a Password"</h3>
            <form class="settings-form" on:submit=on_link_password>
                <input
                    class="settings-input"
                    type="email"
                    placeholder="you@example.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="settings-input"
                    type="password"
                    placeholder="New password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn" type="submit" disabled=move || busy.get()>
                    "Add Password"
                </button>
            </form>
            <h3>"Link Google"</h3>
            <button
                class="btn settings-panel__google"
                on:click=on_link_google
                disabled=move || busy.get()
            >
                "Link Google Account"
            </button>
            <Show when=move || !info.get().is_empty()>
                <p class="settings-panel__message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
