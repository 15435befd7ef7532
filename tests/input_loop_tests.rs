use crossbeam::channel::unbounded;
use midistreamrs::midi::{
    run_input_loop, ClockMessage, ClockMessageHandler, MidiEvent, MidiParser, MockMidiEngine,
    StreamEvent, SysExPayload,
};
use std::sync::{Arc, Mutex};

struct RecordingDispatcher {
    messages: Mutex<Vec<ClockMessage>>,
}

impl RecordingDispatcher {
    fn new() -> Arc<Self> {
        Arc::new(RecordingDispatcher {
            messages: Mutex::new(Vec::new()),
        })
    }
}

impl ClockMessageHandler for RecordingDispatcher {
    fn handle_message(&self, msg: ClockMessage) -> Option<f64> {
        self.messages.lock().unwrap().push(msg);
        None
    }
}

#[test]
fn test_messages_spanning_chunk_boundaries() {
    // A message split across read chunks must decode the same as one
    // delivered whole
    let engine = MockMidiEngine::with_script(vec![
        vec![0x90, 0x40],
        vec![0x7F, 0x91],
        vec![0x3C, 0x60],
    ]);
    let (tx, rx) = unbounded();

    run_input_loop(7, engine, MidiParser::new(), tx);

    let records: Vec<StreamEvent> = rx.try_iter().collect();
    assert_eq!(
        records,
        vec![
            StreamEvent {
                stream_id: 7,
                event: MidiEvent::NoteOn {
                    channel: 0,
                    key: 0x40,
                    velocity: 0x7F,
                },
                message_length: Some(3),
            },
            StreamEvent {
                stream_id: 7,
                event: MidiEvent::NoteOn {
                    channel: 1,
                    key: 0x3C,
                    velocity: 0x60,
                },
                message_length: Some(3),
            },
        ]
    );
}

#[test]
fn test_message_length_bookkeeping() {
    let engine = MockMidiEngine::with_script(vec![vec![
        0xC5, 0x0C, // program change: 2 bytes on the wire
        0xF0, 0x01, 0x02, 0xF7, // sysex: no fixed length
        0xFF, // system reset
    ]]);
    let (tx, rx) = unbounded();

    run_input_loop(0, engine, MidiParser::new(), tx);

    let records: Vec<StreamEvent> = rx.try_iter().collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].message_length, Some(2));
    assert_eq!(
        records[1].event,
        MidiEvent::SysEx(SysExPayload::from_slice(&[0x01, 0x02]))
    );
    assert_eq!(records[1].message_length, None);
    assert_eq!(records[2].event, MidiEvent::SystemReset);
    assert_eq!(records[2].message_length, None);
}

#[test]
fn test_realtime_bytes_dispatch_but_never_queue() {
    let dispatcher = RecordingDispatcher::new();
    let engine = MockMidiEngine::with_script(vec![vec![0xFA, 0xF8, 0xF8, 0xFC]]);
    let (tx, rx) = unbounded();

    run_input_loop(
        0,
        engine,
        MidiParser::with_dispatcher(dispatcher.clone()),
        tx,
    );

    // Sync/Start/Stop went to the dispatcher, not the event queue
    assert!(rx.try_iter().next().is_none());
    assert_eq!(
        *dispatcher.messages.lock().unwrap(),
        vec![
            ClockMessage::Start,
            ClockMessage::Tick,
            ClockMessage::Tick,
            ClockMessage::Stop,
        ]
    );
}

#[test]
fn test_loop_ends_when_script_exhausted() {
    let engine = MockMidiEngine::with_script(vec![vec![0x90, 0x40, 0x7F]]);
    let (tx, rx) = unbounded();

    // Returns instead of blocking once the engine errors
    run_input_loop(3, engine, MidiParser::new(), tx);
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn test_loop_ends_when_queue_disconnected() {
    let engine = MockMidiEngine::with_script(vec![vec![0x90, 0x40, 0x7F], vec![0x91, 0x41, 0x7F]]);
    let (tx, rx) = unbounded();
    drop(rx);

    // The first decoded event fails to send; the loop must return rather
    // than keep decoding
    run_input_loop(0, engine, MidiParser::new(), tx);
}

#[test]
fn test_stream_id_tagging() {
    for stream_id in [0usize, 1, 42] {
        let engine = MockMidiEngine::with_script(vec![vec![0xD0, 0x22]]);
        let (tx, rx) = unbounded();
        run_input_loop(stream_id, engine, MidiParser::new(), tx);

        let records: Vec<StreamEvent> = rx.try_iter().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stream_id, stream_id);
    }
}
