//! Terminal state display
//!
//! Beat and bar progress plus a transport spinner, refreshed from the
//! shared transport state while the input loop and clock run on their own
//! threads. Built on the indicatif library.

mod inspector;
mod progress;

pub use inspector::run_state_inspector;
pub use progress::{create_bar_progress, create_beat_progress, create_transport_spinner};
