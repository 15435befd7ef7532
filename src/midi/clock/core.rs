use super::{BpmCalculator, ClockMessage, ClockMessageHandler};
use crate::SharedState;
use log::info;
use std::sync::Arc;

/// Applies realtime clock notifications to the shared transport state.
///
/// This is the subsystem behind the parser's dispatch interface: Start and
/// Stop toggle playback, ticks advance the transport counters and feed the
/// BPM estimate. All interior state is lock-protected, so a `ClockCore` can
/// be handed to the parser as an `Arc<dyn ClockMessageHandler>` directly.
pub struct ClockCore {
    bpm_calculator: Arc<BpmCalculator>,
    shared_state: SharedState,
}

impl ClockCore {
    pub fn new(shared_state: SharedState) -> Self {
        Self {
            bpm_calculator: Arc::new(BpmCalculator::new()),
            shared_state,
        }
    }

    fn handle_transport_state(&self, msg: &ClockMessage) {
        let (playing, action) = match msg {
            ClockMessage::Start => (true, "started"),
            ClockMessage::Stop => (false, "stopped"),
            ClockMessage::Continue => (true, "resumed"),
            ClockMessage::Tick => return,
        };

        if let Ok(transport) = self.shared_state.lock() {
            transport.set_playing(playing);
            info!("Clock {} playback", action);
        }
    }

    pub fn process_message(&self, msg: ClockMessage) -> Option<f64> {
        self.handle_transport_state(&msg);

        if let ClockMessage::Tick = msg {
            if let Ok(transport) = self.shared_state.lock() {
                transport.tick();
            }
        }

        let bpm = self.bpm_calculator.process_message(msg);
        if let Some(bpm) = bpm {
            if let Ok(mut transport) = self.shared_state.lock() {
                transport.set_tempo(bpm);
            }
        }
        bpm
    }

    pub fn is_playing(&self) -> bool {
        self.shared_state
            .lock()
            .map(|transport| transport.is_playing())
            .unwrap_or(false)
    }

    pub fn current_bpm(&self) -> Option<f64> {
        self.bpm_calculator.current_bpm()
    }

    pub fn bpm_calculator(&self) -> Arc<BpmCalculator> {
        self.bpm_calculator.clone()
    }
}

impl ClockMessageHandler for ClockCore {
    fn handle_message(&self, msg: ClockMessage) -> Option<f64> {
        self.process_message(msg)
    }
}
