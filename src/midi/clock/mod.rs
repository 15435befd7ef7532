//! Realtime clock notifications and BPM estimation.
pub mod core;

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A realtime synchronization notification. The parser dispatches `Tick`,
/// `Start` and `Stop` for the corresponding wire bytes; `Continue` exists
/// for the transport's own API surface.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClockMessage {
    Tick,
    Start,
    Stop,
    Continue,
}

/// Receiver for realtime notifications.
///
/// Called synchronously from inside the parser's `feed`, so implementations
/// must not block and must not call back into the parser. The returned BPM
/// estimate is ignored by the parser.
pub trait ClockMessageHandler: Send + Sync {
    fn handle_message(&self, msg: ClockMessage) -> Option<f64>;
}

/// Estimates tempo from the spacing of incoming clock ticks.
///
/// Standard MIDI timing: 24 pulses per quarter note. Intervals are kept in
/// a sliding window and the middle two quartiles are averaged, so a single
/// late tick does not swing the estimate.
#[derive(Debug)]
pub struct BpmCalculator {
    state: Mutex<BpmState>,
    ppq: u32,
    window_size: usize,
}

#[derive(Debug)]
struct BpmState {
    last_tick_time: Option<Instant>,
    is_playing: bool,
    intervals: Vec<Duration>,
}

impl Default for BpmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockMessageHandler for BpmCalculator {
    fn handle_message(&self, msg: ClockMessage) -> Option<f64> {
        self.process_message(msg)
    }
}

impl BpmCalculator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BpmState {
                last_tick_time: None,
                is_playing: false,
                intervals: Vec::with_capacity(32),
            }),
            ppq: 24,
            window_size: 24, // one quarter note worth of ticks
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().is_playing
    }

    /// Processes a clock message and returns the current BPM estimate once
    /// enough tick intervals have been observed.
    pub fn process_message(&self, msg: ClockMessage) -> Option<f64> {
        let mut state = self.state.lock().unwrap();
        match msg {
            ClockMessage::Start => {
                state.is_playing = true;
                state.last_tick_time = None;
                state.intervals.clear();
                None
            }
            ClockMessage::Stop => {
                state.is_playing = false;
                None
            }
            ClockMessage::Continue => {
                state.is_playing = true;
                None
            }
            ClockMessage::Tick => {
                if !state.is_playing {
                    return None;
                }

                let now = Instant::now();
                if let Some(last_time) = state.last_tick_time {
                    let interval = now.duration_since(last_time);

                    // Ignore implausible intervals (device hiccups, thread
                    // stalls)
                    if interval.as_micros() > 1000 && interval.as_micros() < 100_000 {
                        state.intervals.push(interval);
                        while state.intervals.len() > self.window_size {
                            state.intervals.remove(0);
                        }
                    }
                }
                state.last_tick_time = Some(now);

                Self::estimate(&state.intervals, self.ppq)
            }
        }
    }

    /// The current BPM estimate without consuming a tick.
    pub fn current_bpm(&self) -> Option<f64> {
        let state = self.state.lock().unwrap();
        Self::estimate(&state.intervals, self.ppq)
    }

    fn estimate(intervals: &[Duration], ppq: u32) -> Option<f64> {
        // Need a few intervals before the estimate means anything
        if intervals.len() < 3 {
            return None;
        }

        let mut sorted = intervals.to_vec();
        sorted.sort_by_key(|d| d.as_nanos());

        // Middle two quartiles only
        let start_idx = sorted.len() / 4;
        let end_idx = (sorted.len() * 3) / 4;
        let trimmed = &sorted[start_idx..end_idx];

        let avg_interval: Duration = trimmed.iter().sum::<Duration>() / trimmed.len() as u32;
        let ticks_per_minute = 60.0 / avg_interval.as_secs_f64();
        Some(ticks_per_minute / f64::from(ppq))
    }
}
