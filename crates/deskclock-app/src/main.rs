mod cli;
mod commands;
mod logging;
mod poll_ticker;
mod runner;
mod trace_renderer;

use clap::Parser;
use deskclock_core::config::get_config;
use log::{debug, error};

use crate::{
    cli::{Args, Command},
    logging::{get_log_spec, init_logger},
};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let logger = init_logger().unwrap_or_else(|err| {
        eprintln!("Failed to start logger: {err}");

        std::process::exit(1);
    });
    debug!("args: {args:?}");

    let (config, config_path) = get_config(args.config_path).unwrap_or_else(|err| {
        error!("Failed to read config: {err}");

        std::process::exit(1);
    });
    debug!("Using config {config_path:?}");

    logger.set_new_spec(get_log_spec(&config.log_level));

    let result = match args.command.unwrap_or_default() {
        Command::Analog(analog) => commands::run_analog(&config, analog).await,
        Command::Timer { seconds } => {
            println!("{}", commands::timer_text(seconds));
            Ok(())
        }
        Command::Cities(cities) => commands::run_cities(&config, cities),
    };

    if let Err(err) = result {
        error!("{err}");

        std::process::exit(1);
    }
}
