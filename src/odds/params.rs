use core::fmt;
use std::fmt::Display;
use std::str::FromStr;

use crate::odds::error::OddsError;

/// League selector passed to the upstream fetch. Parsed from a
/// case-insensitive code such as `nhl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sport {
    NBA,
    NFL,
    NHL,
    MLB,
    NCAAB,
    NCAAF,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Regions {
    R(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markets {
    M(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsFormat {
    American,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Iso,
    Unix,
}

impl Sport {
    pub fn code(&self) -> &'static str {
        match self {
            Sport::NBA => "NBA",
            Sport::NFL => "NFL",
            Sport::NHL => "NHL",
            Sport::MLB => "MLB",
            Sport::NCAAB => "NCAAB",
            Sport::NCAAF => "NCAAF",
        }
    }

    /// Path segment used by the sportsbookreview odds board.
    pub fn scoreboard_slug(&self) -> &'static str {
        match self {
            Sport::NBA => "nba-basketball",
            Sport::NFL => "nfl-football",
            Sport::NHL => "nhl-hockey",
            Sport::MLB => "mlb-baseball",
            Sport::NCAAB => "ncaa-basketball",
            Sport::NCAAF => "college-football",
        }
    }

    /// Sport key understood by the Odds API.
    pub fn odds_api_key(&self) -> &'static str {
        match self {
            Sport::NBA => "basketball_nba",
            Sport::NFL => "americanfootball_nfl",
            Sport::NHL => "icehockey_nhl",
            Sport::MLB => "baseball_mlb",
            Sport::NCAAB => "basketball_ncaab",
            Sport::NCAAF => "americanfootball_ncaaf",
        }
    }
}

impl FromStr for Sport {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NBA" => Ok(Sport::NBA),
            "NFL" => Ok(Sport::NFL),
            "NHL" => Ok(Sport::NHL),
            "MLB" => Ok(Sport::MLB),
            "NCAAB" => Ok(Sport::NCAAB),
            "NCAAF" => Ok(Sport::NCAAF),
            other => Err(OddsError::Configuration(format!("unknown sport code `{}`", other))),
        }
    }
}

impl FromStr for OddsFormat {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "american" => Ok(OddsFormat::American),
            "decimal" => Ok(OddsFormat::Decimal),
            other => Err(OddsError::Configuration(format!("unsupported odds format `{}`", other))),
        }
    }
}

impl FromStr for DateFormat {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iso" => Ok(DateFormat::Iso),
            "unix" => Ok(DateFormat::Unix),
            other => Err(OddsError::Configuration(format!("unsupported date format `{}`", other))),
        }
    }
}

impl Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Display for Regions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Regions::R(regions) => write!(f, "regions={}", regions),
        }
    }
}

impl Display for Markets {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Markets::M(markets) => write!(f, "markets={}", markets),
        }
    }
}

impl Display for OddsFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OddsFormat::American => write!(f, "oddsFormat=american"),
            OddsFormat::Decimal => write!(f, "oddsFormat=decimal"),
        }
    }
}

impl Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DateFormat::Iso => write!(f, "dateFormat=iso"),
            DateFormat::Unix => write!(f, "dateFormat=unix"),
        }
    }
}

impl Default for Sport {
    fn default() -> Self { Sport::NHL }
}

impl Default for Regions {
    fn default() -> Self { Regions::R("us".to_string()) }
}

impl Default for Markets {
    fn default() -> Self { Markets::M("h2h".to_string()) }
}

impl Default for OddsFormat {
    fn default() -> Self { OddsFormat::American }
}

impl Default for DateFormat {
    fn default() -> Self { DateFormat::Iso }
}
