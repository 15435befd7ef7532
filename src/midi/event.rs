//! Decoded MIDI event types and the wire-length table.

use std::fmt;

/// Maximum number of data bytes kept for a single message. Only SysEx can
/// ever approach this; channel-voice messages carry at most two data bytes.
pub const MAX_SYSEX_BYTES: usize = 1024;

/// Channel-voice status kinds, identified by the upper nibble of the status
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceKind {
    NoteOff,
    NoteOn,
    KeyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
}

impl VoiceKind {
    /// Classifies a status byte. Returns `None` for anything outside the
    /// channel-voice range 0x80-0xEF.
    pub fn from_status(byte: u8) -> Option<Self> {
        match byte & 0xF0 {
            0x80 => Some(VoiceKind::NoteOff),
            0x90 => Some(VoiceKind::NoteOn),
            0xA0 => Some(VoiceKind::KeyPressure),
            0xB0 => Some(VoiceKind::ControlChange),
            0xC0 => Some(VoiceKind::ProgramChange),
            0xD0 => Some(VoiceKind::ChannelPressure),
            0xE0 => Some(VoiceKind::PitchBend),
            _ => None,
        }
    }

    /// Total message length on the wire, status byte included.
    pub fn message_length(self) -> u8 {
        match self {
            VoiceKind::NoteOff
            | VoiceKind::NoteOn
            | VoiceKind::KeyPressure
            | VoiceKind::ControlChange
            | VoiceKind::PitchBend => 3,
            VoiceKind::ProgramChange | VoiceKind::ChannelPressure => 2,
        }
    }
}

/// Wire length of a System Common message (0xF1-0xF7), status byte included.
///
/// The parser never accumulates these messages (their status clears tracking
/// entirely), but the lengths are part of the protocol table.
pub fn system_common_length(status: u8) -> u8 {
    match status {
        0xF1 | 0xF3 | 0xF4 | 0xF5 => 2, // time code, song select, undefined
        0xF2 => 3,                      // song position
        _ => 1,                         // tune request, EOX
    }
}

/// System-exclusive payload: inline bounded storage plus the filled length.
/// No heap allocation; the cap matches the parser's accumulation buffer.
#[derive(Clone)]
pub struct SysExPayload {
    data: [u8; MAX_SYSEX_BYTES],
    len: usize,
}

impl SysExPayload {
    /// Copies `bytes` into a fresh payload.
    ///
    /// Panics if `bytes` exceeds the 1024-byte cap; the parser never
    /// accumulates more than that.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut data = [0u8; MAX_SYSEX_BYTES];
        data[..bytes.len()].copy_from_slice(bytes);
        SysExPayload {
            data,
            len: bytes.len(),
        }
    }

    /// The accumulated data bytes, excluding the 0xF0 marker.
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PartialEq for SysExPayload {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl Eq for SysExPayload {}

impl fmt::Debug for SysExPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SysExPayload({:02X?})", self.bytes())
    }
}

/// A fully decoded MIDI message. Each variant carries only the fields that
/// apply to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MidiEvent {
    NoteOff { channel: u8, key: u8, velocity: u8 },
    NoteOn { channel: u8, key: u8, velocity: u8 },
    KeyPressure { channel: u8, key: u8, pressure: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    /// 14-bit bend value reassembled from the two 7-bit data bytes.
    PitchBend { channel: u8, value: u16 },
    SysEx(SysExPayload),
    SystemReset,
}

impl MidiEvent {
    /// Channel of a channel-voice event, `None` for system events.
    pub fn channel(&self) -> Option<u8> {
        match self {
            MidiEvent::NoteOff { channel, .. }
            | MidiEvent::NoteOn { channel, .. }
            | MidiEvent::KeyPressure { channel, .. }
            | MidiEvent::ControlChange { channel, .. }
            | MidiEvent::ProgramChange { channel, .. }
            | MidiEvent::ChannelPressure { channel, .. }
            | MidiEvent::PitchBend { channel, .. } => Some(*channel),
            MidiEvent::SysEx(_) | MidiEvent::SystemReset => None,
        }
    }

    /// Total wire length for channel-voice kinds, status byte included.
    /// Used for bookkeeping when events are forwarded downstream; system
    /// events have no fixed length to report.
    pub fn message_length(&self) -> Option<u8> {
        match self {
            MidiEvent::NoteOff { .. }
            | MidiEvent::NoteOn { .. }
            | MidiEvent::KeyPressure { .. }
            | MidiEvent::ControlChange { .. }
            | MidiEvent::PitchBend { .. } => Some(3),
            MidiEvent::ProgramChange { .. } | MidiEvent::ChannelPressure { .. } => Some(2),
            MidiEvent::SysEx(_) | MidiEvent::SystemReset => None,
        }
    }
}
