use clap::Parser;
use crossbeam::channel::{unbounded, Receiver};
use midistreamrs::{
    cli::{validate_device, Args},
    create_scheduler, create_shared_state, handle_device_list,
    midi::{run_input_loop, ClockCore, DefaultMidiEngine, MidiParser, StreamEvent},
    ui::run_state_inspector,
    Scheduler, SharedState,
};
use std::sync::Arc;
use std::{thread, time::Duration};

fn main() {
    initialize_logging();
    let args = Args::parse();
    let devices = handle_device_list();

    if args.device_list {
        list_available_devices(&devices);
        return;
    }

    let device_name = match &args.bind_to_device {
        Some(name) => name.clone(),
        None => {
            // Nothing to decode without a device; show what is available
            list_available_devices(&devices);
            println!("\nUse --bind-to-device <DEVICE> to decode a stream.");
            return;
        }
    };

    if let Err(error_msg) = validate_device(&device_name, &devices) {
        log::error!("{}", error_msg);
        eprintln!("{}", error_msg);
        std::process::exit(1);
    }

    let scheduler = create_scheduler();
    let shared_state = create_shared_state();

    initialize_stream(device_name, &scheduler, &shared_state);

    run_application_loop();
}

fn initialize_logging() {
    midistreamrs::logging::init_logger().expect("Logger initialization failed");
    log::info!("Application starting");
}

fn list_available_devices(devices: &[String]) {
    println!("Available MIDI devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

fn initialize_stream<T: Scheduler>(device_name: String, scheduler: &T, shared_state: &SharedState) {
    match DefaultMidiEngine::new(Some(device_name.clone())) {
        Ok(engine) => {
            log::info!("Successfully connected to MIDI device: {}", device_name);
            println!("Successfully connected to MIDI device: {}", device_name);

            let (event_tx, event_rx) = unbounded();

            // The clock subsystem receives Sync/Start/Stop from inside the
            // parser; decoded events travel through the queue instead.
            let dispatcher = Arc::new(ClockCore::new(shared_state.clone()));
            let parser = MidiParser::with_dispatcher(dispatcher);

            scheduler.spawn(move || {
                run_input_loop(0, engine, parser, event_tx);
            });

            scheduler.spawn(move || {
                run_event_consumer(event_rx);
            });

            let inspector_state = shared_state.clone();
            scheduler.spawn(move || {
                run_state_inspector(inspector_state);
            });
        }
        Err(e) => {
            let error_msg = format!("Error connecting to MIDI device: {}", e);
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    }
}

fn run_event_consumer(events: Receiver<StreamEvent>) {
    for record in events.iter() {
        log::info!(
            "stream {}: {:?} (wire length: {:?})",
            record.stream_id,
            record.event,
            record.message_length
        );
    }
    log::info!("Event queue closed");
}

fn run_application_loop() {
    log::info!("Application running. Press Ctrl+C to exit...");
    println!("\nPress Ctrl+C to exit...");
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
