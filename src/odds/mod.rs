pub mod config;
pub mod error;
pub mod fetch;
pub mod odds_api;
pub mod output;
pub mod params;
pub mod records;
pub mod scoreboard;

use clap::ArgEnum;
use log::{info, warn};

use config::OddsConfig;
use error::Result;
use fetch::Fetch;
use odds_api::OddsApi;
use params::Sport;
use records::{normalize, NormalizedGameRecord, RawGameRecord};
use scoreboard::Scoreboard;

/// Anything that can list the current games for a sport.
pub trait GameSource {
    fn list_games(&self, sport: Sport) -> Result<Vec<RawGameRecord>>;
}

#[derive(ArgEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Scoreboard,
    OddsApi,
}

impl Default for SourceKind {
    fn default() -> Self { SourceKind::Scoreboard }
}

/// Credentials and arguments are checked here, before the source can
/// issue a request.
pub fn build_source<'a>(
    kind: SourceKind,
    config: &OddsConfig,
    fetcher: &'a dyn Fetch,
    date: Option<String>,
) -> Result<Box<dyn GameSource + 'a>> {
    match kind {
        SourceKind::Scoreboard => Ok(Box::new(Scoreboard::new(config, fetcher, date)?)),
        SourceKind::OddsApi => {
            if date.is_some() {
                warn!("--date only applies to the scoreboard source, ignoring it");
            }
            Ok(Box::new(OddsApi::new(config, fetcher)?))
        }
    }
}

/// One upstream fetch for `sport`, then normalization in source order.
pub fn collect_games(source: &dyn GameSource, sport: Sport) -> Result<Vec<NormalizedGameRecord>> {
    let raw_games = source.list_games(sport)?;
    let games = normalize(raw_games)?;
    info!("normalized {} {} games", games.len(), sport);
    Ok(games)
}
