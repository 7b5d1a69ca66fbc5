use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::odds::config::OddsConfig;
use crate::odds::error::{OddsError, Result};
use crate::odds::fetch::{Fetch, FetchedPage};
use crate::odds::params::{DateFormat, Markets, OddsFormat, Regions, Sport};
use crate::odds::records::RawGameRecord;
use crate::odds::GameSource;

const H2H_MARKET: &str = "h2h";

/// Client for the Odds API v4. Every call costs quota
/// (markets x regions per odds request), so each one is a single GET.
pub struct OddsApi<'a> {
    fetcher: &'a dyn Fetch,
    api_key: String,
    base_url: String,
    regions: Regions,
    markets: Markets,
    odds_format: OddsFormat,
    date_format: DateFormat,
    bookmaker: String,
}

/// One entry of the in-season sports list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportListing {
    pub key: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_outrights: bool,
}

#[derive(Debug, Deserialize)]
struct OddsEvent {
    id: String,
    #[serde(default)]
    commence_time: Option<Value>,
    #[serde(default)]
    home_team: Option<String>,
    #[serde(default)]
    away_team: Option<String>,
    #[serde(default)]
    bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Deserialize)]
struct Bookmaker {
    key: String,
    #[serde(default)]
    markets: Vec<Market>,
}

#[derive(Debug, Deserialize)]
struct Market {
    key: String,
    #[serde(default)]
    outcomes: Vec<Outcome>,
}

#[derive(Debug, Deserialize)]
struct Outcome {
    name: String,
    price: Value,
}

impl<'a> OddsApi<'a> {
    /// Fails with a configuration error when no API key is configured, so
    /// no request is ever sent without one.
    pub fn new(config: &OddsConfig, fetcher: &'a dyn Fetch) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(OddsApi {
            fetcher,
            api_key,
            base_url: config.odds_api_base_url.clone(),
            regions: config.regions.clone(),
            markets: config.markets.clone(),
            odds_format: config.odds_format,
            date_format: config.date_format,
            bookmaker: config.bookmaker.clone(),
        })
    }

    pub fn odds_url(&self, sport: Sport) -> String {
        format!(
            "{}/sports/{}/odds/?apiKey={}&{}&{}&{}&{}",
            self.base_url,
            sport.odds_api_key(),
            self.api_key,
            self.regions,
            self.markets,
            self.odds_format,
            self.date_format
        )
    }

    pub fn sports_url(&self) -> String {
        format!("{}/sports/?apiKey={}", self.base_url, self.api_key)
    }

    pub fn list_sports(&self) -> Result<Vec<SportListing>> {
        let page = self.fetcher.fetch(&self.sports_url())?;
        log_quota(&page);
        serde_json::from_str(&page.body)
            .map_err(|e| OddsError::Upstream(format!("malformed sports list: {}", e)))
    }
}

impl<'a> GameSource for OddsApi<'a> {
    fn list_games(&self, sport: Sport) -> Result<Vec<RawGameRecord>> {
        let page = self.fetcher.fetch(&self.odds_url(sport))?;
        log_quota(&page);
        let events: Vec<OddsEvent> = serde_json::from_str(&page.body)
            .map_err(|e| OddsError::Upstream(format!("malformed odds response: {}", e)))?;
        info!("odds api listed {} {} events", events.len(), sport);
        let now = Utc::now();
        events
            .into_iter()
            .map(|event| event_to_raw(event, &self.bookmaker, now))
            .collect()
    }
}

fn log_quota(page: &FetchedPage) {
    let remaining = page.header("x-requests-remaining").unwrap_or("?");
    let used = page.header("x-requests-used").unwrap_or("?");
    info!("odds api quota: {} requests remaining, {} used", remaining, used);
}

fn commence_instant(commence_time: &Value) -> Option<DateTime<Utc>> {
    match commence_time {
        Value::String(iso) => DateTime::parse_from_rfc3339(iso)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        _ => None,
    }
}

/// Moneyline for `team` in the bookmaker's h2h market, if it quoted one.
fn h2h_price(event: &OddsEvent, bookmaker: &str, team: &str) -> Option<Value> {
    event
        .bookmakers
        .iter()
        .find(|b| b.key == bookmaker)?
        .markets
        .iter()
        .find(|m| m.key == H2H_MARKET)?
        .outcomes
        .iter()
        .find(|o| o.name == team)
        .map(|o| o.price.clone())
}

/// The odds feed carries no scores, so both are an explicit null. Status is
/// `upcoming` before commence time and `live` after it.
fn event_to_raw(event: OddsEvent, bookmaker: &str, now: DateTime<Utc>) -> Result<RawGameRecord> {
    let status = match &event.commence_time {
        Some(commence_time) => {
            let start = commence_instant(commence_time).ok_or_else(|| {
                OddsError::Upstream(format!(
                    "event {} has unreadable commence_time {}",
                    event.id, commence_time
                ))
            })?;
            Some(Value::from(if start > now { "upcoming" } else { "live" }))
        }
        None => None,
    };
    let home_ml = event
        .home_team
        .as_deref()
        .and_then(|team| h2h_price(&event, bookmaker, team));
    let away_ml = event
        .away_team
        .as_deref()
        .and_then(|team| h2h_price(&event, bookmaker, team));
    if home_ml.is_none() || away_ml.is_none() {
        warn!("event {} has no complete {} h2h line from {}", event.id, H2H_MARKET, bookmaker);
    }
    Ok(RawGameRecord {
        home_team: event.home_team.map(Value::from),
        away_team: event.away_team.map(Value::from),
        date: event.commence_time,
        status,
        home_score: Some(Value::Null),
        away_score: Some(Value::Null),
        home_ml,
        away_ml,
    })
}
