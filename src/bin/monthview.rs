extern crate monthview as lib;

use flexi_logger::{FileSpec, Logger};
use lib::clock::{Clock, ClockZone};
use lib::config::Config;
use lib::coordinator::RenderCoordinator;
use lib::datetime::YearMonth;
use lib::events::Dispatcher;
use lib::source::open_source;
use lib::state::CalendarState;
use lib::ui::{App, Context, Mount};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "monthview",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Monthview - a month calendar with event markers, search and a scratch task list."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(
        short = "e",
        long = "events",
        help = "event source (http(s) URL, file:// URL or path), overrides config"
    )]
    pub events: Option<String>,

    #[structopt(
        short = "t",
        long = "timezone",
        help = "timezone of the clock display, overrides config"
    )]
    pub timezone: Option<ClockZone>,

    #[structopt(
        short = "m",
        long = "month",
        help = "month to show first (YYYY-MM), defaults to the current month"
    )]
    pub month: Option<YearMonth>,
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(events) = &args.events {
        config.events_url = Some(events.clone());
    }
    if let Some(zone) = args.timezone {
        config.timezone = zone;
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        println!("{}", termion::cursor::Show);
        println!("Monthview ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = apply_overrides(
        lib::config::load_suitable_config(args.configfile.as_deref())?,
        &args,
    );

    let state = args.month.map(CalendarState::new).unwrap_or_default();
    let mut coordinator = RenderCoordinator::new(state, Clock::new(config.timezone));

    match config.events_url.as_deref().map(open_source) {
        Some(Ok(source)) => {
            // Fail open: the calendar renders without events when loading fails.
            let _ = coordinator.init(source.as_ref());
        }
        Some(Err(err)) => {
            log::error!("Error loading events: {}", err);
            coordinator.init_empty();
        }
        None => {
            log::warn!("No event source configured");
            coordinator.init_empty();
        }
    }

    let mut app = App::new(
        Context::new(coordinator),
        Mount::from_selector(&config.selector),
    );

    if args.show {
        app.draw()?;
        return Ok(());
    }

    let dispatcher = Dispatcher::from_config(&config).with_stdin();
    app.run(dispatcher)?;

    Ok(())
}
