use crate::midi::{MidiEngine, Result};
use midir::{Ignore, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use std::sync::mpsc::{channel, Receiver};

/// Real MIDI device access via midir.
///
/// The input callback forwards every received chunk through a channel
/// untouched; no byte is filtered at this level, clock and sensing bytes
/// included. `recv` hands those chunks to the caller in arrival order.
pub struct MidirEngine {
    #[allow(dead_code)]
    input: Option<MidiInputConnection<()>>,
    output: Option<MidiOutputConnection>,
    rx: Option<Receiver<Vec<u8>>>,
}

impl MidirEngine {
    pub fn new(device_name: Option<String>) -> Result<Self> {
        let (input, rx) = if let Some(name) = &device_name {
            let mut midi_in = MidiInput::new("midistreamrs-in")?;
            midi_in.ignore(Ignore::None);

            let in_ports = midi_in.ports();
            let in_port = in_ports
                .iter()
                .find(|p| midi_in.port_name(p).unwrap_or_default().contains(name))
                .ok_or("Input device not found")?;

            let (tx, rx) = channel();
            let input = midi_in.connect(
                in_port,
                "midistreamrs-input",
                move |_stamp, message, _| {
                    let _ = tx.send(message.to_vec());
                },
                (),
            )?;
            (Some(input), Some(rx))
        } else {
            (None, None)
        };

        let output = if let Some(name) = device_name {
            let midi_out = MidiOutput::new("midistreamrs-out")?;

            let out_ports = midi_out.ports();
            let out_port = out_ports
                .iter()
                .find(|p| midi_out.port_name(p).unwrap_or_default().contains(&name))
                .ok_or("Output device not found")?;
            Some(midi_out.connect(out_port, "midistreamrs-output")?)
        } else {
            None
        };

        Ok(MidirEngine { input, output, rx })
    }

    /// Enumerates the names of all MIDI input ports on the system.
    pub fn list_devices() -> Vec<String> {
        let mut devices = Vec::new();

        if let Ok(midi_in) = MidiInput::new("midistreamrs-list") {
            let ports = midi_in.ports();
            for port in ports {
                if let Ok(name) = midi_in.port_name(&port) {
                    devices.push(name);
                }
            }
        }

        devices
    }
}

impl MidiEngine for MidirEngine {
    fn recv(&mut self) -> Result<Vec<u8>> {
        if let Some(rx) = &self.rx {
            Ok(rx.recv()?)
        } else {
            Err("No input connection".into())
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(output) = &mut self.output {
            output.send(bytes)?;
        }
        Ok(())
    }
}
