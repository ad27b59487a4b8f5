use std::{fs::read_to_string, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use lorry_core::{
    day::{CollectionDay, WeekdayBitmask},
    delay::Delays,
    error::InitError,
    grid::CalendarGrid,
    sequencer::{Mode, Sequencer},
    simulation::Simulation,
};

mod driver;

#[derive(Debug, Parser)]
#[command(version, about = "Drive the bin lorry across a collection calendar")]
pub struct Arguments {
    /// collection day indices as the calendar page declares them, Monday being 0
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub days: Option<Vec<i64>>,
    /// collect on Mondays
    #[arg(long)]
    pub monday: bool,
    /// collect on Tuesdays
    #[arg(long)]
    pub tuesday: bool,
    /// collect on Wednesdays
    #[arg(long)]
    pub wednesday: bool,
    /// collect on Thursdays
    #[arg(long)]
    pub thursday: bool,
    /// collect on Fridays
    #[arg(long)]
    pub friday: bool,
    /// collect on Saturdays
    #[arg(long)]
    pub saturday: bool,
    /// collect on Sundays
    #[arg(long)]
    pub sunday: bool,
    /// the number of week lines in the calendar
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub weeks: u64,
    /// the width of the lorry in pixels
    #[arg(long, default_value_t = 40.0)]
    pub lorry_width: f64,
    /// the width of a day cell in pixels
    #[arg(long, default_value_t = 100.0)]
    pub day_width: f64,
    /// a JSON file overriding the delay table
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// the number of circuits to drive, 0 drives until interrupted in real time
    #[arg(long, default_value_t = 1)]
    pub circuits: usize,
    /// drive in real time instead of printing the timeline
    #[arg(long)]
    pub realtime: bool,
    /// log more, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<&Arguments> for WeekdayBitmask {
    fn from(value: &Arguments) -> Self {
        let mut weekday_bitmask = WeekdayBitmask::none();
        if value.monday {
            weekday_bitmask |= WeekdayBitmask::Monday;
        }
        if value.tuesday {
            weekday_bitmask |= WeekdayBitmask::Tuesday;
        }
        if value.wednesday {
            weekday_bitmask |= WeekdayBitmask::Wednesday;
        }
        if value.thursday {
            weekday_bitmask |= WeekdayBitmask::Thursday;
        }
        if value.friday {
            weekday_bitmask |= WeekdayBitmask::Friday;
        }
        if value.saturday {
            weekday_bitmask |= WeekdayBitmask::Saturday;
        }
        if value.sunday {
            weekday_bitmask |= WeekdayBitmask::Sunday;
        }
        weekday_bitmask
    }
}

/// Get the collection days, the raw page indices taking precedence over the weekday flags.
fn collection_days(args: &Arguments) -> Result<Vec<CollectionDay>, InitError> {
    match &args.days {
        Some(days) => CollectionDay::parse_all(days),
        None => Ok(WeekdayBitmask::from(args).collection_days()),
    }
}

/// Build the lorry for the calendar described by the arguments.
fn sequencer(args: &Arguments, delays: Delays) -> Result<Sequencer<CalendarGrid>, InitError> {
    let days = collection_days(args)?;
    debug!(
        "collecting on {}",
        days.iter()
            .map(|day| day.weekday().to_string())
            .collect::<Vec<String>>()
            .join(", ")
    );
    let (grid, mode) = if args.weeks == 1 {
        (
            CalendarGrid::week(&days, args.day_width, args.lorry_width),
            Mode::Week,
        )
    } else {
        (
            CalendarGrid::weeks(args.weeks as usize, &days, args.day_width, args.lorry_width),
            Mode::Lines,
        )
    };
    Sequencer::new(grid, mode, delays)
}

fn load_delays(config: Option<&PathBuf>) -> Result<Delays> {
    let Some(path) = config else {
        return Ok(Delays::default());
    };
    let delays = serde_json::from_str(&read_to_string(path)?)?;
    Ok(delays)
}

fn init_logger(verbose: u8) -> Result<()> {
    let log_level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);
    log_config.set_thread_level(log::LevelFilter::Off);
    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    init_logger(args.verbose)?;
    let delays = load_delays(args.config.as_ref())?;
    log::trace!("{:#?}", delays);
    let sequencer = match sequencer(&args, delays) {
        Ok(sequencer) => sequencer,
        Err(err) if err.is_silent() => {
            debug!("the lorry stays in the depot: {err}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    if args.realtime {
        tokio::select! {
            circuits = driver::run(sequencer, args.circuits) => {
                info!("drove {circuits} circuits");
            }
            _ = tokio::signal::ctrl_c() => info!("interrupted"),
        }
    } else {
        for entry in Simulation::new(sequencer).run_circuits(args.circuits.max(1)) {
            println!("{entry}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lorry_core::{
        day::WeekdayBitmask, delay::Delays, error::InitError, sequencer::Mode, stage::Stage,
    };

    use crate::{collection_days, sequencer, Arguments};

    #[test]
    fn test_from_arguments_for_weekday_bitmask() {
        let args = Arguments::parse_from(["bin-lorry"]);
        assert_eq!(WeekdayBitmask::from(&args), WeekdayBitmask::none());
        let args = Arguments::parse_from(["bin-lorry", "--tuesday"]);
        assert_eq!(WeekdayBitmask::from(&args), WeekdayBitmask::Tuesday);
        let args = Arguments::parse_from(["bin-lorry", "--saturday", "--monday", "--sunday"]);
        assert_eq!(
            WeekdayBitmask::from(&args),
            WeekdayBitmask::Monday
                .or(WeekdayBitmask::Saturday)
                .or(WeekdayBitmask::Sunday)
        );
    }

    #[test]
    fn test_collection_days() {
        let args = Arguments::parse_from(["bin-lorry", "--friday", "--days", "3,1"]);
        let indices: Vec<usize> = collection_days(&args)
            .unwrap()
            .into_iter()
            .map(|day| day.index())
            .collect();
        assert_eq!(indices, vec![3, 1]);
        let args = Arguments::parse_from(["bin-lorry", "--days", "1,-1"]);
        assert_eq!(collection_days(&args), Err(InitError::DayOutOfRange(-1)));
    }

    #[test]
    fn test_sequencer() {
        let args = Arguments::parse_from(["bin-lorry"]);
        let err = sequencer(&args, Delays::default()).unwrap_err();
        assert_eq!(err, InitError::EmptyRoute);
        assert!(err.is_silent());

        let args = Arguments::parse_from(["bin-lorry", "--days", "1,3,5", "--weeks", "1"]);
        let lorry = sequencer(&args, Delays::default()).unwrap();
        assert_eq!(lorry.mode(), Mode::Week);
        assert_eq!(lorry.stage().stop_count(), 3);

        let args = Arguments::parse_from(["bin-lorry", "--wednesday", "--weeks", "4"]);
        let lorry = sequencer(&args, Delays::default()).unwrap();
        assert_eq!(lorry.mode(), Mode::Lines);
        assert_eq!(lorry.stage().line_count(), 4);
        assert_eq!(lorry.stage().stop_count(), 4);
    }

    #[test]
    fn test_weeks_range() {
        assert!(Arguments::try_parse_from(["bin-lorry", "--monday", "--weeks", "0"]).is_err());
        assert!(Arguments::try_parse_from(["bin-lorry", "--weeks", "-2"]).is_err());
        let args = Arguments::parse_from(["bin-lorry", "--monday"]);
        assert_eq!(args.weeks, 1);
    }
}
