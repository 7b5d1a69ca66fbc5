mod odds;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use odds::config::OddsConfig;
use odds::fetch::UreqFetcher;
use odds::odds_api::OddsApi;
use odds::output::{write_json, OutputSink, DEFAULT_OUTPUT_FILE};
use odds::params::Sport;
use odds::SourceKind;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct OddsCli {
    /// Sport code such as nhl, nba or nfl. Defaults to NHL
    sport: Option<String>,

    #[clap(short, long, arg_enum, default_value = "scoreboard")]
    source: SourceKind,

    /// Scoreboard day as YYYY-MM-DD, today when omitted
    #[clap(short, long)]
    date: Option<String>,

    /// Write pretty JSON to nhl_odds.json instead of stdout
    #[clap(long)]
    save: bool,

    /// Write pretty JSON to this file instead of stdout
    #[clap(short, long, parse(from_os_str))]
    out: Option<PathBuf>,

    /// Print the Odds API in-season sports and exit
    #[clap(long)]
    list_sports: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = OddsCli::parse();
    debug!("{:?}", args);

    let config = OddsConfig::from_env().context("failed to load configuration")?;
    let sink = match (args.out, args.save) {
        (Some(path), _) => OutputSink::File(path),
        (None, true) => OutputSink::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
        (None, false) => OutputSink::Stdout,
    };
    let fetcher = UreqFetcher;

    if args.list_sports {
        let api = OddsApi::new(&config, &fetcher)?;
        let sports = api.list_sports()?;
        write_json(&sports, &sink)?;
        return Ok(());
    }

    let sport = match args.sport {
        Some(code) => code.parse::<Sport>()?,
        None => Sport::default(),
    };
    let source = odds::build_source(args.source, &config, &fetcher, args.date)?;
    let games = odds::collect_games(source.as_ref(), sport)
        .with_context(|| format!("failed to collect {} games", sport))?;
    write_json(&games, &sink)?;
    Ok(())
}
