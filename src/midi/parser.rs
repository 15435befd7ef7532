//! Byte-at-a-time MIDI stream parser.
//!
//! The parser is a finite-state machine fed one byte per call with no
//! lookahead. Real-time bytes may interleave with an in-progress message
//! without disturbing it, running status attributes status-less data bytes
//! to the previous channel-voice message, and SysEx data is bounded by a
//! fixed buffer. Malformed input is never an error: the parser silently
//! re-synchronizes on the next status byte.

use super::clock::{ClockMessage, ClockMessageHandler};
use super::event::{MidiEvent, SysExPayload, VoiceKind, MAX_SYSEX_BYTES};
use std::sync::Arc;

const SYSEX_START: u8 = 0xF0;
const TIMING_CLOCK: u8 = 0xF8;
const START: u8 = 0xFA;
const STOP: u8 = 0xFC;
const SYSTEM_RESET: u8 = 0xFF;

/// What the parser is in the middle of receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// No active message; data bytes are discarded.
    Idle,
    /// Accumulating data bytes for a channel-voice message.
    Voice {
        kind: VoiceKind,
        channel: u8,
        expected: u8,
        received: u8,
    },
    /// Accumulating SysEx data; only a status byte completes it.
    SysEx { received: usize },
}

/// Stateful decoder for one MIDI input stream.
///
/// One instance is owned by a single stream reader for the stream's whole
/// lifetime. `feed` is synchronous and does bounded work per byte; events
/// come out in exactly the order their terminating bytes arrive.
pub struct MidiParser {
    state: ParserState,
    data: [u8; MAX_SYSEX_BYTES],
    dispatcher: Option<Arc<dyn ClockMessageHandler>>,
}

impl MidiParser {
    /// A parser with no realtime dispatch target; Sync/Start/Stop bytes are
    /// dropped. Decoding behavior is otherwise identical.
    pub fn new() -> Self {
        MidiParser {
            state: ParserState::Idle,
            data: [0; MAX_SYSEX_BYTES],
            dispatcher: None,
        }
    }

    /// A parser that forwards Sync/Start/Stop bytes to `dispatcher`
    /// synchronously from inside `feed`.
    pub fn with_dispatcher(dispatcher: Arc<dyn ClockMessageHandler>) -> Self {
        MidiParser {
            state: ParserState::Idle,
            data: [0; MAX_SYSEX_BYTES],
            dispatcher: Some(dispatcher),
        }
    }

    /// Consumes one byte from the stream, producing at most one decoded
    /// event.
    pub fn feed(&mut self, byte: u8) -> Option<MidiEvent> {
        // Real-time bytes (0xF8-0xFF) can occur anywhere, even in the middle
        // of another message, and never touch its accumulation state.
        if byte >= 0xF8 {
            return self.feed_realtime(byte);
        }
        if byte & 0x80 != 0 {
            return self.feed_status(byte);
        }
        self.feed_data(byte)
    }

    fn feed_realtime(&mut self, byte: u8) -> Option<MidiEvent> {
        match byte {
            TIMING_CLOCK => self.dispatch(ClockMessage::Tick),
            START => self.dispatch(ClockMessage::Start),
            STOP => self.dispatch(ClockMessage::Stop),
            SYSTEM_RESET => {
                // Whatever was in flight is abandoned, not emitted.
                self.state = ParserState::Idle;
                return Some(MidiEvent::SystemReset);
            }
            // 0xF9, 0xFB, 0xFE: nothing downstream wants these
            _ => {}
        }
        None
    }

    fn feed_status(&mut self, byte: u8) -> Option<MidiEvent> {
        // A status byte ends whatever message was in progress (re-sync); a
        // SysEx that accumulated data is the one case that still emits.
        let finished = self.take_pending_sysex();

        self.state = if let Some(kind) = VoiceKind::from_status(byte) {
            ParserState::Voice {
                kind,
                channel: byte & 0x0F,
                expected: kind.message_length() - 1,
                received: 0,
            }
        } else if byte == SYSEX_START {
            ParserState::SysEx { received: 0 }
        } else {
            // Remaining System Common bytes (0xF1-0xF7) are not decoded;
            // tracking is cleared entirely.
            ParserState::Idle
        };

        finished
    }

    fn take_pending_sysex(&mut self) -> Option<MidiEvent> {
        match self.state {
            ParserState::SysEx { received } if received > 0 => Some(MidiEvent::SysEx(
                SysExPayload::from_slice(&self.data[..received]),
            )),
            _ => None,
        }
    }

    fn feed_data(&mut self, byte: u8) -> Option<MidiEvent> {
        match self.state {
            // No active message to attach the byte to.
            ParserState::Idle => None,

            ParserState::SysEx { received } => {
                if received == MAX_SYSEX_BYTES {
                    // Cap hit: drop the rest of this message.
                    self.state = ParserState::Idle;
                    return None;
                }
                self.data[received] = byte;
                self.state = ParserState::SysEx {
                    received: received + 1,
                };
                // SysEx never completes by count, only on the next status
                // byte.
                None
            }

            ParserState::Voice {
                kind,
                channel,
                expected,
                received,
            } => {
                self.data[received as usize] = byte;
                let received = received + 1;
                if received < expected {
                    self.state = ParserState::Voice {
                        kind,
                        channel,
                        expected,
                        received,
                    };
                    return None;
                }
                // Complete. The byte count resets while kind and channel
                // stay tracked, so running status keeps working.
                self.state = ParserState::Voice {
                    kind,
                    channel,
                    expected,
                    received: 0,
                };
                Some(self.finish_voice(kind, channel))
            }
        }
    }

    fn finish_voice(&self, kind: VoiceKind, channel: u8) -> MidiEvent {
        match kind {
            VoiceKind::NoteOff => MidiEvent::NoteOff {
                channel,
                key: self.data[0],
                velocity: self.data[1],
            },
            VoiceKind::NoteOn => MidiEvent::NoteOn {
                channel,
                key: self.data[0],
                velocity: self.data[1],
            },
            VoiceKind::KeyPressure => MidiEvent::KeyPressure {
                channel,
                key: self.data[0],
                pressure: self.data[1],
            },
            VoiceKind::ControlChange => MidiEvent::ControlChange {
                channel,
                controller: self.data[0],
                value: self.data[1],
            },
            VoiceKind::ProgramChange => MidiEvent::ProgramChange {
                channel,
                program: self.data[0],
            },
            VoiceKind::ChannelPressure => MidiEvent::ChannelPressure {
                channel,
                pressure: self.data[0],
            },
            VoiceKind::PitchBend => MidiEvent::PitchBend {
                channel,
                // 14-bit value from the little-endian 7-bit pair
                value: (u16::from(self.data[1]) << 7) | u16::from(self.data[0]),
            },
        }
    }

    fn dispatch(&self, msg: ClockMessage) {
        if let Some(handler) = &self.dispatcher {
            handler.handle_message(msg);
        }
    }
}

impl Default for MidiParser {
    fn default() -> Self {
        Self::new()
    }
}
