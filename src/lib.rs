//! midistreamrs - raw MIDI stream decoding with realtime clock sync
//!
//! The crate decodes raw bytes from a MIDI endpoint into typed events and
//! forwards realtime synchronization bytes to a tempo/clock subsystem. The
//! center is [`midi::MidiParser`], a per-byte finite-state machine; around
//! it sit the midir device layer, a crossbeam event queue, and a transport
//! state display.

pub mod cli;
pub mod config;
pub mod logging;
pub mod midi;
pub mod scheduler;
pub mod state;
pub mod ui;

use std::sync::{Arc, Mutex};

pub use cli::{validate_device, Args};
pub use scheduler::{Scheduler, ThreadScheduler};

/// Transport state shared between the clock subsystem and its readers.
pub type SharedState = Arc<Mutex<state::TransportState>>;

pub fn create_shared_state() -> SharedState {
    Arc::new(Mutex::new(state::TransportState::new()))
}

pub fn create_scheduler() -> ThreadScheduler {
    ThreadScheduler::new()
}

#[cfg(not(feature = "test-mock"))]
pub fn handle_device_list() -> Vec<String> {
    midi::MidirEngine::list_devices()
}

#[cfg(feature = "test-mock")]
pub fn handle_device_list() -> Vec<String> {
    midi::MockMidiEngine::list_devices()
}
