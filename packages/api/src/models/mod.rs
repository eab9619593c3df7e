pub mod marker;
pub mod user;

pub use marker::MarkerInfo;
pub use user::UserInfo;

#[cfg(feature = "server")]
pub use marker::Marker;
#[cfg(feature = "server")]
pub use user::User;
