//! MIDI stream decoding and device I/O
//!
//! This module turns raw MIDI byte streams into typed events:
//! - [`MidiParser`] - the per-byte finite-state machine at the center of
//!   the crate
//! - [`MidiEvent`] - the decoded event model, SysEx payload included
//! - [`MidiEngine`] trait with [`MidirEngine`] for real devices and
//!   [`MockMidiEngine`] for tests
//! - [`run_input_loop`] - drives one stream from device to event queue
//! - [`BpmCalculator`] and [`ClockCore`] - the tempo subsystem fed by
//!   realtime bytes
//!
mod clock;
mod engine;
mod event;
mod input_loop;
pub mod midir_engine;
pub mod mock_engine;
mod parser;

// Re-export the data model and parser
pub use event::{system_common_length, MidiEvent, SysExPayload, VoiceKind, MAX_SYSEX_BYTES};
pub use parser::MidiParser;

// Re-export device-layer types
pub use engine::{MidiEngine, MidiError, Result};
pub use midir_engine::MidirEngine;
pub use mock_engine::MockMidiEngine;

// Re-export clock functionality
pub use clock::core::ClockCore;
pub use clock::{BpmCalculator, ClockMessage, ClockMessageHandler};

// Re-export the stream loop
pub use input_loop::{run_input_loop, StreamEvent};

// Set default engine type
pub type DefaultMidiEngine = MidirEngine;
