use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the analog clock until interrupted (default).
    Analog(AnalogArgs),
    /// Print the countdown timer digits for a duration.
    Timer {
        /// Remaining time in seconds.
        seconds: u64,
    },
    /// Manage the world clock city list.
    #[command(subcommand)]
    Cities(CitiesCommand),
}

impl Default for Command {
    fn default() -> Self {
        Self::Analog(AnalogArgs::default())
    }
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalogArgs {
    /// Time zone override, e.g. `Europe/Paris`.
    #[arg(short, long)]
    pub zone: Option<String>,

    /// Hide the second hand.
    #[arg(long)]
    pub no_seconds: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CitiesCommand {
    List,
    Add {
        id:        String,
        name:      String,
        time_zone: String,
    },
    Remove {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn no_subcommand_runs_the_analog_clock() {
        let args = Args::try_parse_from(["deskclock"]).expect("args");

        assert_eq!(args.command.unwrap_or_default(), Command::Analog(AnalogArgs::default()));
    }

    #[test]
    fn analog_options_are_parsed() {
        let args = Args::try_parse_from([
            "deskclock",
            "--config-path",
            "/tmp/clock.toml",
            "analog",
            "--zone",
            "Asia/Tokyo",
            "--no-seconds",
        ])
        .expect("args");

        assert_eq!(args.config_path, Some(PathBuf::from("/tmp/clock.toml")));
        assert_eq!(
            args.command,
            Some(Command::Analog(AnalogArgs {
                zone:       Some("Asia/Tokyo".to_owned()),
                no_seconds: true,
            }))
        );
    }

    #[test]
    fn cities_add_takes_three_values() {
        let args =
            Args::try_parse_from(["deskclock", "cities", "add", "C1", "Lisbon", "Europe/Lisbon"])
                .expect("args");

        assert_eq!(
            args.command,
            Some(Command::Cities(CitiesCommand::Add {
                id:        "C1".to_owned(),
                name:      "Lisbon".to_owned(),
                time_zone: "Europe/Lisbon".to_owned(),
            }))
        );
    }
}
