//! Terminal front end for the item picker.
//!
//! [`App`] owns an [`ItemSelector`](crate::selector::ItemSelector), the fetch
//! worker, and the query being edited. Key presses become selector events and
//! finished fetches are drained back into the selector once per frame.

mod actions;
mod config;
pub mod input;
mod render;
mod runtime;
mod search;
mod state;
pub mod style;

pub use config::UiConfig;
pub use runtime::run;
pub use state::{App, EditorOutcome};
