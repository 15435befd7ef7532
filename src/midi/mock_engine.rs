use crate::midi::{MidiEngine, MidiError, Result};
use std::collections::VecDeque;

/// Scripted engine for tests: hands out prepared byte chunks in order and
/// fails with a receive error once the script is exhausted, which ends the
/// input loop the same way a disconnected device would.
pub struct MockMidiEngine {
    script: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
}

impl MockMidiEngine {
    pub fn new(_device_name: Option<String>) -> Result<Self> {
        Ok(MockMidiEngine {
            script: VecDeque::new(),
            sent: Vec::new(),
        })
    }

    pub fn with_script(chunks: Vec<Vec<u8>>) -> Self {
        MockMidiEngine {
            script: chunks.into(),
            sent: Vec::new(),
        }
    }

    pub fn list_devices() -> Vec<String> {
        vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()]
    }

    /// Bytes written through `send`, in call order.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }
}

impl MidiEngine for MockMidiEngine {
    fn recv(&mut self) -> Result<Vec<u8>> {
        self.script
            .pop_front()
            .ok_or_else(|| MidiError::RecvError("Script exhausted".to_string()))
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.sent.push(bytes.to_vec());
        Ok(())
    }
}
