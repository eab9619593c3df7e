//! Platform-agnostic domain logic for PinMap.
//!
//! Everything in this crate is plain data and synchronous state transitions:
//! the marker board (the view-local collection of points of interest), the
//! client session state, the classification of remote writes, and the map
//! view configuration. No I/O happens here; the `api` crate mirrors board
//! mutations to the document store, and the `ui`/`web` crates own the views.

pub mod board;
pub mod config;
pub mod models;
pub mod outcome;
pub mod session;

pub use board::{BoardError, MarkerBoard, Removed, Updated};
pub use config::MapConfig;
pub use models::{MarkerId, PointOfInterest, Position};
pub use outcome::WriteOutcome;
pub use session::{SessionState, SessionToken};
