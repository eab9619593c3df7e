//! Shared UI for the PinMap workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod navbar;
pub use navbar::Navbar;

mod map;
pub use map::MapView;

mod pin_list;
pub use pin_list::{ImageUpload, PinList};

mod sync;
pub use sync::outcome_of;
