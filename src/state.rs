use crate::config::{BEATS_PER_BAR, TICKS_PER_BEAT};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Musical transport position driven by the clock subsystem.
///
/// Counters are atomic so the clock thread can tick while the inspector
/// reads; tempo goes through the surrounding mutex.
pub struct TransportState {
    bpm: f64, // TODO: Replace with AtomicF64 once available
    pub tick_count: AtomicU64,
    pub beat: AtomicU32,
    pub bar: AtomicU32,
    pub is_playing: AtomicBool,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            tick_count: AtomicU64::new(0),
            beat: AtomicU32::new(1),
            bar: AtomicU32::new(1),
            is_playing: AtomicBool::new(false),
        }
    }
}

impl TransportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tempo(&mut self, bpm: f64) {
        self.bpm = bpm;
    }

    pub fn tempo(&self) -> f64 {
        self.bpm
    }

    pub fn set_playing(&self, playing: bool) {
        self.is_playing.store(playing, Ordering::SeqCst);
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing.load(Ordering::SeqCst)
    }

    /// Advances the transport by one clock tick, rolling beat and bar over
    /// at 24 ticks/beat and 4 beats/bar. Ignored while stopped.
    pub fn tick(&self) {
        if !self.is_playing() {
            return;
        }

        let new_tick = self.tick_count.fetch_add(1, Ordering::SeqCst);

        if (new_tick + 1) % TICKS_PER_BEAT == 0 {
            let current_beat = self.beat.fetch_add(1, Ordering::SeqCst);

            if u64::from(current_beat) + 1 > BEATS_PER_BAR {
                self.beat.store(1, Ordering::SeqCst);
                self.bar.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    pub fn get_tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::SeqCst)
    }

    pub fn get_beat(&self) -> u32 {
        self.beat.load(Ordering::SeqCst)
    }

    pub fn get_bar(&self) -> u32 {
        self.bar.load(Ordering::SeqCst)
    }
}
