use std::env;

use crate::odds::error::{OddsError, Result};
use crate::odds::params::{DateFormat, Markets, OddsFormat, Regions};

pub const API_KEY_ENV: &str = "ODDS_API_KEY";
pub const ODDS_API_BASE_URL: &str = "https://api.the-odds-api.com/v4";
pub const SCOREBOARD_BASE_URL: &str = "https://www.sportsbookreview.com";

/// Everything the upstream sources need, resolved once at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct OddsConfig {
    pub api_key: Option<String>,
    pub regions: Regions,
    pub markets: Markets,
    pub odds_format: OddsFormat,
    pub date_format: DateFormat,
    /// Bookmaker whose h2h prices become the money lines for Odds API games.
    pub bookmaker: String,
    pub odds_api_base_url: String,
    pub scoreboard_base_url: String,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            regions: Default::default(),
            markets: Default::default(),
            odds_format: Default::default(),
            date_format: Default::default(),
            bookmaker: "fanduel".to_string(),
            odds_api_base_url: ODDS_API_BASE_URL.to_string(),
            scoreboard_base_url: SCOREBOARD_BASE_URL.to_string(),
        }
    }
}

impl OddsConfig {
    /// Loads `.env` if one exists, then reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();
        config.api_key = get(API_KEY_ENV);
        if let Some(regions) = get("ODDS_REGIONS") {
            config.regions = Regions::R(regions.to_lowercase());
        }
        if let Some(markets) = get("ODDS_MARKETS") {
            config.markets = Markets::M(markets.to_lowercase());
        }
        if let Some(odds_format) = get("ODDS_FORMAT") {
            config.odds_format = odds_format.parse()?;
        }
        if let Some(date_format) = get("ODDS_DATE_FORMAT") {
            config.date_format = date_format.parse()?;
        }
        if let Some(bookmaker) = get("ODDS_BOOKMAKER") {
            config.bookmaker = bookmaker.to_lowercase();
        }
        if let Some(url) = get("ODDS_API_BASE_URL") {
            config.odds_api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get("SCOREBOARD_BASE_URL") {
            config.scoreboard_base_url = url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            OddsError::Configuration(format!("{} is not set", API_KEY_ENV))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_odds_api_h2h_setup() {
        let config = OddsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.regions, Regions::R("us".to_string()));
        assert_eq!(config.markets, Markets::M("h2h".to_string()));
        assert_eq!(config.odds_format, OddsFormat::American);
        assert_eq!(config.date_format, DateFormat::Iso);
        assert_eq!(config.bookmaker, "fanduel");
        assert_eq!(config.odds_api_base_url, ODDS_API_BASE_URL);
    }

    #[test]
    fn overrides_are_read_from_the_lookup() {
        let config = OddsConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "  secret "),
            ("ODDS_REGIONS", "US,UK"),
            ("ODDS_FORMAT", "decimal"),
            ("ODDS_BOOKMAKER", "DraftKings"),
            ("ODDS_API_BASE_URL", "http://localhost:8080/v4/"),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "secret");
        assert_eq!(config.regions, Regions::R("us,uk".to_string()));
        assert_eq!(config.odds_format, OddsFormat::Decimal);
        assert_eq!(config.bookmaker, "draftkings");
        assert_eq!(config.odds_api_base_url, "http://localhost:8080/v4");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = OddsConfig::from_lookup(lookup_from(&[(API_KEY_ENV, "   ")])).unwrap();
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, OddsError::Configuration(_)));
    }

    #[test]
    fn bad_odds_format_is_rejected() {
        let err = OddsConfig::from_lookup(lookup_from(&[("ODDS_FORMAT", "fractional")])).unwrap_err();
        assert!(matches!(err, OddsError::Configuration(_)));
    }
}
