use std::{num::NonZeroUsize, sync::Arc, time::Duration};

use deskclock_core::{
    ModuleContext,
    analog_clock::ClockFace,
    cities::{City, dump_cities, read_cities, save_cities},
    clock_source::SystemClockSource,
    config::Config,
    event_bus::EventBus,
    preferences::TomlPreferences,
    signals::MinuteTickSource,
    timer_display::{TimerDigits, TimerDisplay, TimerLayout},
};
use deskclock_proto::{
    geometry::Size,
    ports::preferences::{PreferenceError, PreferenceStore},
};
use log::{error, info};
use masterror::AppError;
use tokio::runtime::Handle;

use crate::{
    cli::{AnalogArgs, CitiesCommand},
    runner::Runner,
    trace_renderer::TraceRenderer,
};

const BUS_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Attach an analog clock to the system clock and trace its frames until
/// Ctrl-C.
pub async fn run_analog(config: &Config, args: AnalogArgs) -> Result<(), AppError> {
    let clock_config = &config.analog_clock;
    let bus = EventBus::new(BUS_CAPACITY);
    let ctx = ModuleContext::new(bus.sender(), Handle::current());

    let mut face = ClockFace::from_config(Arc::new(SystemClockSource::new()), clock_config);
    if let Some(zone) = &args.zone {
        face.set_time_zone(zone);
    }
    if args.no_seconds {
        face.enable_seconds(false);
    }

    let signals = MinuteTickSource::new();
    face.attach(&ctx, &signals);
    info!(
        "Analog clock running at {}x{}, zone {}",
        clock_config.width,
        clock_config.height,
        face.time_zone_id().unwrap_or("system")
    );

    let runner = Runner::new(
        face,
        bus.receiver(),
        TraceRenderer::new(),
        Size::new(clock_config.width, clock_config.height),
    );
    let runner = runner
        .run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {err}");
            }
        })
        .await;

    info!("Rendered {} frames", runner.surface().frames());

    Ok(())
}

/// Text shown by a countdown timer with `seconds` remaining.
pub fn timer_text(seconds: u64) -> String {
    let mut display = TimerDisplay::new(TimerLayout::default());
    display.set_time(TimerDigits::from_duration(Duration::from_secs(seconds)));

    display.text()
}

pub fn run_cities(config: &Config, command: CitiesCommand) -> Result<(), AppError> {
    let mut store = TomlPreferences::open(&config.world_clock.preferences_path)
        .map_err(|err| AppError::internal(err.to_string()))?;

    apply_cities_command(&mut store, command)
        .map_err(|err| AppError::internal(err.to_string()))?
        .into_iter()
        .for_each(|line| println!("{line}"));

    Ok(())
}

/// Execute `command` against `store`, returning the lines to print.
fn apply_cities_command(
    store: &mut dyn PreferenceStore,
    command: CitiesCommand,
) -> Result<Vec<String>, PreferenceError> {
    let mut cities = read_cities(store);

    match command {
        CitiesCommand::List => {
            dump_cities(store, "preferences");
            Ok(cities
                .values()
                .map(|city| format!("{}\t{}\t{}", city.id, city.name, city.time_zone))
                .collect())
        }
        CitiesCommand::Add {
            id,
            name,
            time_zone,
        } => {
            let city = City::new(id, name, time_zone);
            let line = format!("Added {}", city.name);
            cities.insert(city.id.clone(), city);
            save_cities(store, &cities)?;

            Ok(vec![line])
        }
        CitiesCommand::Remove { id } => match cities.remove(&id) {
            Some(city) => {
                save_cities(store, &cities)?;
                Ok(vec![format!("Removed {}", city.name)])
            }
            None => Ok(vec![format!("No city with id {id}")]),
        },
    }
}
