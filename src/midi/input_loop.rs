use crate::midi::{MidiEngine, MidiEvent, MidiParser};
use crossbeam::channel::Sender;
use log::{debug, error, info};

/// A decoded event tagged with its originating stream, as pushed onto the
/// process-wide event queue.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub stream_id: usize,
    pub event: MidiEvent,
    /// Total wire length of the message for channel-voice kinds, reported
    /// for bookkeeping only.
    pub message_length: Option<u8>,
}

/// Drives one input stream to completion: pulls raw chunks from the engine,
/// feeds the parser one byte at a time in strict arrival order, and forwards
/// every decoded event to the queue.
///
/// Returns when the engine reports a receive failure (device gone, script
/// exhausted) or when the queue has no receivers left. Realtime dispatch
/// happens inside `parser.feed`, so a parser built with a dispatcher keeps
/// notifying the clock while this loop runs.
pub fn run_input_loop<E>(
    stream_id: usize,
    mut engine: E,
    mut parser: MidiParser,
    events: Sender<StreamEvent>,
) where
    E: MidiEngine,
{
    info!("MIDI input loop started for stream {}", stream_id);

    loop {
        let chunk = match engine.recv() {
            Ok(chunk) => chunk,
            Err(e) => {
                error!("MIDI engine receive error on stream {}: {}", stream_id, e);
                break;
            }
        };

        for byte in chunk {
            if let Some(event) = parser.feed(byte) {
                let record = StreamEvent {
                    stream_id,
                    message_length: event.message_length(),
                    event,
                };
                debug!("stream {}: decoded {:?}", stream_id, record.event);
                if events.send(record).is_err() {
                    error!("Event queue disconnected - stopping stream {}", stream_id);
                    return;
                }
            }
        }
    }

    info!("MIDI input loop stopped for stream {}", stream_id);
}
