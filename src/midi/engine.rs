use std::error::Error;
use std::fmt;

/// Custom error type for MIDI device operations
#[derive(Debug)]
pub enum MidiError {
    /// Error when writing raw bytes to a device
    SendError(String),
    /// Error when receiving raw bytes from a device
    RecvError(String),
    /// Error when connecting to a MIDI device
    ConnectionError(String),
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MidiError::SendError(msg) => write!(f, "MIDI send error: {}", msg),
            MidiError::RecvError(msg) => write!(f, "MIDI receive error: {}", msg),
            MidiError::ConnectionError(msg) => write!(f, "MIDI connection error: {}", msg),
        }
    }
}

impl Error for MidiError {}

impl From<&str> for MidiError {
    fn from(msg: &str) -> Self {
        MidiError::ConnectionError(msg.to_string())
    }
}

impl From<midir::InitError> for MidiError {
    fn from(err: midir::InitError) -> Self {
        MidiError::ConnectionError(err.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for MidiError {
    fn from(err: midir::ConnectError<midir::MidiInput>) -> Self {
        MidiError::ConnectionError(err.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for MidiError {
    fn from(err: midir::ConnectError<midir::MidiOutput>) -> Self {
        MidiError::ConnectionError(err.to_string())
    }
}

impl From<midir::SendError> for MidiError {
    fn from(err: midir::SendError) -> Self {
        MidiError::SendError(err.to_string())
    }
}

impl From<std::sync::mpsc::RecvError> for MidiError {
    fn from(err: std::sync::mpsc::RecvError) -> Self {
        MidiError::RecvError(err.to_string())
    }
}

/// Result type for MIDI device operations
pub type Result<T> = std::result::Result<T, MidiError>;

/// Interface to one MIDI transport endpoint.
///
/// Implementations deliver the stream as raw byte chunks in arrival order;
/// decoding is entirely the parser's job. `recv` blocks until the device
/// produces bytes or the connection dies.
pub trait MidiEngine: Send {
    /// Returns the next chunk of raw bytes from the device.
    fn recv(&mut self) -> Result<Vec<u8>>;

    /// Writes raw bytes to the device.
    fn send(&mut self, bytes: &[u8]) -> Result<()>;
}
