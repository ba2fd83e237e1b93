// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod inspect;
pub mod pipeline;

use anyhow::{anyhow, Error};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use config::Config;
use inspect::Source;
use simplelog::{LevelFilter, SimpleLogger, TermLogger, TerminalMode};

fn app() -> App<'static, 'static> {
    App::new("movies-etl")
        .version(crate_version!())
        .about("Extract, clean and load Wikipedia, Kaggle and MovieLens movie data")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .default_value("movies-etl.toml")
                .help("Configuration file"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug messages"),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Run the whole pipeline and load the result")
                .arg(
                    Arg::with_name("skip-load")
                        .long("skip-load")
                        .help("Transform everything but don't touch the database"),
                ),
        )
        .subcommand(
            SubCommand::with_name("inspect")
                .about("Report on the quality of one source")
                .arg(
                    Arg::with_name("source")
                        .required(true)
                        .possible_values(&["wiki", "kaggle", "ratings"]),
                )
                .arg(
                    Arg::with_name("rows")
                        .short("n")
                        .value_name("N")
                        .default_value("5")
                        .help("Cleaned rows to preview"),
                ),
        )
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = simplelog::Config::default();
    if TermLogger::init(level, config.clone(), TerminalMode::Mixed).is_err() {
        let _ = SimpleLogger::init(level, config);
    }
}

fn dispatch(matches: &ArgMatches) -> Result<(), Error> {
    let path = matches.value_of("config").unwrap_or("movies-etl.toml");
    let cfg = Config::load(path).map_err(|e| anyhow!("Couldn't load {}: {}", path, e))?;

    match matches.subcommand() {
        ("run", Some(sub)) => {
            let outcome = pipeline::run(&cfg, sub.is_present("skip-load"))?;
            println!(
                "Loaded {} movies and {} ratings",
                outcome.movies, outcome.ratings
            );
        }

        ("inspect", Some(sub)) => {
            let name = sub.value_of("source").unwrap_or_default();
            let source =
                Source::from_name(name).ok_or_else(|| anyhow!("Unknown source {}", name))?;
            let rows: usize = sub.value_of("rows").unwrap_or("5").parse()?;

            inspect::inspect(&cfg, source, rows)?;
        }

        (other, _) => return Err(anyhow!("Unknown command {}", other)),
    }

    Ok(())
}

fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();

    let matches = app().get_matches();
    init_logger(matches.is_present("verbose"));

    dispatch(&matches)
}
