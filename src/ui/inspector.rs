use super::progress::{create_bar_progress, create_beat_progress, create_transport_spinner};
use crate::SharedState;
use indicatif::{MultiProgress, ProgressDrawTarget};
use std::thread;
use std::time::Duration;

const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the transport state until the process exits: current beat and
/// bar as progress bars, tempo and tick count on the spinner line.
pub fn run_state_inspector(shared_state: SharedState) {
    let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());
    let beat_pb = create_beat_progress(&multi_progress);
    let bar_pb = create_bar_progress(&multi_progress);
    let transport_pb = create_transport_spinner(&multi_progress);

    loop {
        thread::sleep(REFRESH_INTERVAL);

        let (beat, bar, bpm, tick_count, playing) = match shared_state.lock() {
            Ok(state) => (
                state.get_beat(),
                state.get_bar(),
                state.tempo(),
                state.get_tick_count(),
                state.is_playing(),
            ),
            Err(_) => continue,
        };

        beat_pb.set_position(u64::from(beat));
        bar_pb.set_position(u64::from(bar));

        transport_pb.set_message(format!(
            "BPM: {:.1}, Tick Count: {}, {}",
            bpm,
            tick_count,
            if playing { "Playing" } else { "Stopped" }
        ));
        transport_pb.tick();
    }
}
