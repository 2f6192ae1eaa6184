//! App lifecycle
//!
//! `Lifecycle` is the only way into an app: host messages, renders and
//! vibrations all go through it. Apps implement [`App`] and talk back
//! through the [`AppContext`] handed to each callback.

mod app;
mod controller;

pub use app::{App, AppContext, MAX_PENDING_VIBRATIONS};
pub use controller::Lifecycle;
