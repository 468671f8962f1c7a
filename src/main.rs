mod api;
mod app;
mod calendar;
mod config;
mod custom;
mod dates;
mod events;
mod help;
mod logging;
mod period;
mod summary;
mod theme;
use crate::api::{ApiClient, Fetcher};
use crate::app::App;
use crate::config::Config;
use crate::dates::{parse_ymd, Clock};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use time::Date;
use tracing::info;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        config: Option<PathBuf>,
        today: Option<Date>,
        offline: bool,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = None;
        let mut today = None;
        let mut offline = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("today") => {
                    let value = parser.value()?.string()?;
                    match parse_ymd(&value) {
                        Ok(d) => today = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                Arg::Long("offline") => offline = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            config,
            today,
            offline,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                config,
                today,
                offline,
            } => {
                let config = Config::load(config.as_deref()).context("failed to load configuration")?;
                logging::init(&config.log).context("failed to set up logging")?;
                // Must happen before the first fetch thread is spawned
                let clock = match today {
                    Some(d) => Clock::Fixed(d),
                    None => Clock::local().context("failed to determine local time zone")?,
                };
                let fetcher = if offline {
                    info!("starting in offline mode");
                    Fetcher::offline()
                } else {
                    let client = ApiClient::new(&config.api).context("failed to set up API client")?;
                    info!(base_url = client.base_url(), "starting");
                    Fetcher::new(Arc::new(client))
                };
                let app = App::new(clock, fetcher, config.ui.initial_period);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: moneycal [<options>]");
                println!();
                println!("Terminal dashboard of income & expenses by date and period");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Read configuration from the given file");
                println!("      --today <YYYY-MM-DD>");
                println!("                        Treat the given date as today");
                println!("      --offline         Don't contact the server");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
