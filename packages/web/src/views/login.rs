//! Login page with a username/password form.

use dioxus::prelude::*;
use ui::{use_auth, AuthState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let nav = use_navigator();

    // Already signed in: go straight to the map
    if !auth().loading && auth().session.is_authenticated() {
        nav.replace(Route::MapScreen {});
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let user = username().trim().to_string();
            let pass = password();

            if user.is_empty() || pass.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            match api::login(user, pass).await {
                Ok(info) => {
                    auth.set(AuthState::signed_in(info));
                    nav.push(Route::MapScreen {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "login-page",

            h1 { class: "login-title", "PinMap" }
            p { class: "login-subtitle", "Sign in to drop pins on the map" }

            form {
                class: "login-form",
                onsubmit: handle_submit,

                if let Some(err) = error() {
                    div { class: "login-error", "{err}" }
                }

                input {
                    class: "login-input",
                    r#type: "text",
                    name: "username",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt| username.set(evt.value()),
                }

                input {
                    class: "login-input",
                    r#type: "password",
                    name: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt| password.set(evt.value()),
                }

                button {
                    class: "login-button",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Login" }
                }
            }

            p {
                class: "login-back",
                Link { to: Route::MapScreen {}, "Back to the map" }
            }
        }
    }
}
