//! Sample app: next arrivals at a transit stop
//!
//! Exercises the whole lifecycle the way a real app would. Fetching the
//! predictions is left to whoever hosts the app; results come back in as
//! `NextStopEvent::FetchCompleted`.

mod next_stop;
mod predictions;

pub use next_stop::{FetchState, NextStop, NextStopEvent, DEFAULT_STOP_NAME, REFRESH_INTERVAL};
pub use predictions::{Prediction, PredictionSet};
