use midistreamrs::create_shared_state;
use midistreamrs::midi::{BpmCalculator, ClockCore, ClockMessage, ClockMessageHandler, MidiParser};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Increased tolerance to account for system timing variations
const BPM_TOLERANCE: f64 = 5.0;

#[test]
fn test_bpm_calculator_start_stop() {
    let calc = BpmCalculator::new();

    // Initially no BPM
    assert_eq!(calc.process_message(ClockMessage::Tick), None);

    assert_eq!(calc.process_message(ClockMessage::Start), None);
    assert!(calc.is_playing());

    assert_eq!(calc.process_message(ClockMessage::Stop), None);
    assert!(!calc.is_playing());

    // Ticks while stopped should return None
    assert_eq!(calc.process_message(ClockMessage::Tick), None);
}

#[test]
fn test_bpm_calculation_120bpm() {
    let calc = BpmCalculator::new();
    calc.process_message(ClockMessage::Start);

    // At 120 BPM with 24 PPQ:
    // - One quarter note = 500ms
    // - One tick = 500ms/24 ≈ 20.833ms
    let tick_interval = Duration::from_micros(20_833);

    for _ in 0..48 {
        calc.process_message(ClockMessage::Tick);
        thread::sleep(tick_interval);
    }

    if let Some(bpm) = calc.process_message(ClockMessage::Tick) {
        assert!(
            (bpm - 120.0).abs() < BPM_TOLERANCE,
            "Expected ~120 BPM, got {}",
            bpm
        );
    } else {
        panic!("Expected BPM calculation, got None");
    }
}

#[test]
fn test_transport_state_transitions() {
    let calc = BpmCalculator::new();

    assert!(!calc.is_playing());

    calc.process_message(ClockMessage::Start);
    assert!(calc.is_playing());

    // Start while already running should reset but stay running
    calc.process_message(ClockMessage::Start);
    assert!(calc.is_playing());

    calc.process_message(ClockMessage::Stop);
    assert!(!calc.is_playing());

    calc.process_message(ClockMessage::Continue);
    assert!(calc.is_playing());

    calc.process_message(ClockMessage::Stop);
    assert!(!calc.is_playing());
}

#[test]
fn test_clock_core_updates_transport() {
    let shared_state = create_shared_state();
    let core = ClockCore::new(shared_state.clone());

    core.process_message(ClockMessage::Start);
    assert!(shared_state.lock().unwrap().is_playing());
    assert!(core.is_playing());

    for _ in 0..10 {
        core.process_message(ClockMessage::Tick);
    }
    assert_eq!(shared_state.lock().unwrap().get_tick_count(), 10);

    core.process_message(ClockMessage::Stop);
    assert!(!shared_state.lock().unwrap().is_playing());

    // Ticks while stopped do not advance the transport
    core.process_message(ClockMessage::Tick);
    assert_eq!(shared_state.lock().unwrap().get_tick_count(), 10);
}

#[test]
fn test_clock_core_as_handler() {
    let shared_state = create_shared_state();
    let core: Arc<dyn ClockMessageHandler> = Arc::new(ClockCore::new(shared_state.clone()));

    core.handle_message(ClockMessage::Start);
    assert!(shared_state.lock().unwrap().is_playing());
}

#[test]
fn test_parser_drives_clock_core() {
    let shared_state = create_shared_state();
    let mut parser = MidiParser::with_dispatcher(Arc::new(ClockCore::new(shared_state.clone())));

    // Wire bytes straight through the parser into the clock subsystem
    assert_eq!(parser.feed(0xFA), None); // start
    assert!(shared_state.lock().unwrap().is_playing());

    for _ in 0..5 {
        assert_eq!(parser.feed(0xF8), None); // sync
    }
    assert_eq!(shared_state.lock().unwrap().get_tick_count(), 5);

    assert_eq!(parser.feed(0xFC), None); // stop
    assert!(!shared_state.lock().unwrap().is_playing());
}

#[test]
fn test_no_bpm_until_enough_intervals() {
    let calc = BpmCalculator::new();
    calc.process_message(ClockMessage::Start);
    assert_eq!(calc.current_bpm(), None);

    // Back-to-back ticks have sub-millisecond spacing, which the interval
    // filter drops, so no estimate forms
    for _ in 0..10 {
        calc.process_message(ClockMessage::Tick);
    }
    assert_eq!(calc.current_bpm(), None);
}
