//! Timing constants shared by the transport and the inspector.

pub const TICKS_PER_BEAT: u64 = 24;
pub const BEATS_PER_BAR: u64 = 4;
