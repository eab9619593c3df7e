//! Authentication context and hooks for the UI.
//!
//! One [`AuthState`] per mounted app, provided by [`AuthProvider`] and read
//! through [`use_auth`]. The contained [`store::SessionState`] is the value
//! passed explicitly to guarded board operations; there is no ambient
//! authentication flag anywhere else.

use api::UserInfo;
use dioxus::prelude::*;
use store::{SessionState, SessionToken};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub session: SessionState,
    /// True until the initial session check against the server resolves.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            session: SessionState::anonymous(),
            loading: true,
        }
    }
}

impl AuthState {
    /// State after a successful login or session check. The session cookie
    /// itself is HttpOnly; the user id stands in as the opaque local token.
    pub fn signed_in(user: UserInfo) -> Self {
        let session = SessionState::authenticated(SessionToken::new(user.id.clone()));
        Self {
            user: Some(user),
            session,
            loading: false,
        }
    }

    /// State after logout or a session check that found nobody.
    pub fn signed_out() -> Self {
        Self {
            user: None,
            session: SessionState::anonymous(),
            loading: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Check the server session on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(Some(user)) => auth_state.set(AuthState::signed_in(user)),
            Ok(None) => auth_state.set(AuthState::signed_out()),
            Err(err) => {
                tracing::debug!("session check failed: {err}");
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                // Back to the read-only map
                #[cfg(target_arch = "wasm32")]
                {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
            }
            Err(err) => tracing::error!("logout failed: {err}"),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
