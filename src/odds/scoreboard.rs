use chrono::NaiveDate;
use log::info;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::odds::config::OddsConfig;
use crate::odds::error::{OddsError, Result};
use crate::odds::fetch::Fetch;
use crate::odds::params::Sport;
use crate::odds::records::{present, RawGameRecord};
use crate::odds::GameSource;

/// The sportsbookreview.com money-line board for one sport and day.
pub struct Scoreboard<'a> {
    fetcher: &'a dyn Fetch,
    base_url: String,
    date: String,
}

#[derive(Deserialize)]
struct NextData {
    props: NextProps,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NextProps {
    page_props: PageProps,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageProps {
    #[serde(default)]
    odds_tables: Vec<OddsTable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OddsTable {
    odds_table_model: OddsTableModel,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OddsTableModel {
    #[serde(default)]
    game_rows: Vec<GameRow>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameRow {
    game_view: GameView,
    #[serde(default)]
    odds_views: Vec<Option<OddsView>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameView {
    #[serde(default, deserialize_with = "present")]
    start_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    game_status_text: Option<Value>,
    #[serde(default)]
    home_team: Option<TeamView>,
    #[serde(default)]
    away_team: Option<TeamView>,
    #[serde(default, deserialize_with = "present")]
    home_team_score: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    away_team_score: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamView {
    #[serde(default, deserialize_with = "present")]
    full_name: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OddsView {
    sportsbook: String,
    #[serde(default)]
    current_line: Option<MoneyLine>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyLine {
    #[serde(default)]
    home_odds: Value,
    #[serde(default)]
    away_odds: Value,
}

fn row_to_raw(row: GameRow) -> RawGameRecord {
    let mut home_ml = Map::new();
    let mut away_ml = Map::new();
    for view in row.odds_views.into_iter().flatten() {
        if let Some(line) = view.current_line {
            let book = view.sportsbook.to_lowercase();
            home_ml.insert(book.clone(), line.home_odds);
            away_ml.insert(book, line.away_odds);
        }
    }
    let game = row.game_view;
    RawGameRecord {
        home_team: game.home_team.and_then(|t| t.full_name),
        away_team: game.away_team.and_then(|t| t.full_name),
        date: game.start_date,
        status: game.game_status_text,
        home_score: game.home_team_score,
        away_score: game.away_team_score,
        home_ml: Some(Value::Object(home_ml)),
        away_ml: Some(Value::Object(away_ml)),
    }
}

impl<'a> Scoreboard<'a> {
    /// `date` is `YYYY-MM-DD`; today's local date when omitted.
    pub fn new(config: &OddsConfig, fetcher: &'a dyn Fetch, date: Option<String>) -> Result<Self> {
        let date = match date {
            Some(d) => {
                NaiveDate::parse_from_str(&d, "%Y-%m-%d").map_err(|e| {
                    OddsError::Configuration(format!("invalid date `{}`: {}", d, e))
                })?;
                d
            }
            None => chrono::Local::now().format("%Y-%m-%d").to_string(),
        };
        Ok(Scoreboard {
            fetcher,
            base_url: config.scoreboard_base_url.clone(),
            date,
        })
    }

    pub fn page_url(&self, sport: Sport) -> String {
        format!(
            "{}/betting-odds/{}/money-line/full-game/?date={}",
            self.base_url,
            sport.scoreboard_slug(),
            self.date
        )
    }
}

impl<'a> GameSource for Scoreboard<'a> {
    fn list_games(&self, sport: Sport) -> Result<Vec<RawGameRecord>> {
        let page = self.fetcher.fetch(&self.page_url(sport))?;
        let games = parse_scoreboard_page(&page.body)?;
        info!("scoreboard listed {} {} games for {}", games.len(), sport, self.date);
        Ok(games)
    }
}

/// Pulls the game rows out of the page's embedded `__NEXT_DATA__` JSON.
/// Only the first odds table is read; a page without tables has no games.
pub fn parse_scoreboard_page(html: &str) -> Result<Vec<RawGameRecord>> {
    let document = Html::parse_document(html);
    let next_data_selector = Selector::parse("script#__NEXT_DATA__")
        .map_err(|e| OddsError::Upstream(format!("failed to build __NEXT_DATA__ selector: {:?}", e)))?;
    let script = document
        .select(&next_data_selector)
        .next()
        .ok_or_else(|| OddsError::Upstream("scoreboard page has no __NEXT_DATA__ block".to_string()))?;
    let raw_json: String = script.text().collect();
    let next_data: NextData = serde_json::from_str(&raw_json)
        .map_err(|e| OddsError::Upstream(format!("malformed scoreboard data: {}", e)))?;

    Ok(next_data
        .props
        .page_props
        .odds_tables
        .into_iter()
        .next()
        .map(|table| {
            table
                .odds_table_model
                .game_rows
                .into_iter()
                .map(row_to_raw)
                .collect()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::fetch::testing::StubFetcher;
    use serde_json::json;

    fn page_with(next_data: Value) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>NHL Odds</title></head><body>
<div id="__next"></div>
<script id="__NEXT_DATA__" type="application/json">{}</script>
</body></html>"#,
            next_data
        )
    }

    fn board() -> Value {
        json!({
            "props": { "pageProps": { "oddsTables": [ { "oddsTableModel": { "gameRows": [
                {
                    "gameView": {
                        "startDate": "2024-01-05T19:00:00+00:00",
                        "gameStatusText": "Final",
                        "homeTeam": { "fullName": "Boston Bruins", "shortName": "Bruins" },
                        "awayTeam": { "fullName": "Toronto Maple Leafs", "shortName": "Leafs" },
                        "homeTeamScore": 3,
                        "awayTeamScore": 2
                    },
                    "oddsViews": [
                        { "sportsbook": "FanDuel", "currentLine": { "homeOdds": -150, "awayOdds": 130 } },
                        null,
                        { "sportsbook": "betmgm", "currentLine": { "homeOdds": -145, "awayOdds": 125 } }
                    ]
                },
                {
                    "gameView": {
                        "startDate": "2024-01-06T00:00:00+00:00",
                        "gameStatusText": "7:00 PM",
                        "homeTeam": { "fullName": "Montreal Canadiens" },
                        "awayTeam": { "fullName": "Ottawa Senators" },
                        "homeTeamScore": null,
                        "awayTeamScore": null
                    },
                    "oddsViews": []
                }
            ] } } ] } }
        })
    }

    #[test]
    fn parses_game_rows_in_page_order() {
        let games = parse_scoreboard_page(&page_with(board())).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].home_team, Some(json!("Boston Bruins")));
        assert_eq!(games[0].away_team, Some(json!("Toronto Maple Leafs")));
        assert_eq!(games[0].status, Some(json!("Final")));
        assert_eq!(games[0].home_score, Some(json!(3)));
        assert_eq!(games[1].home_team, Some(json!("Montreal Canadiens")));
    }

    #[test]
    fn money_lines_are_keyed_by_sportsbook() {
        let games = parse_scoreboard_page(&page_with(board())).unwrap();
        assert_eq!(games[0].home_ml, Some(json!({ "fanduel": -150, "betmgm": -145 })));
        assert_eq!(games[0].away_ml, Some(json!({ "fanduel": 130, "betmgm": 125 })));
        assert_eq!(games[1].home_ml, Some(json!({})));
    }

    #[test]
    fn scores_of_unstarted_games_stay_null() {
        let games = parse_scoreboard_page(&page_with(board())).unwrap();
        assert_eq!(games[1].home_score, Some(Value::Null));
        assert_eq!(games[1].away_score, Some(Value::Null));
    }

    #[test]
    fn missing_team_becomes_an_absent_field() {
        let mut data = board();
        data["props"]["pageProps"]["oddsTables"][0]["oddsTableModel"]["gameRows"][0]["gameView"]
            .as_object_mut()
            .unwrap()
            .remove("homeTeam");
        let games = parse_scoreboard_page(&page_with(data)).unwrap();
        assert_eq!(games[0].home_team, None);
    }

    #[test]
    fn page_without_tables_has_no_games() {
        let games = parse_scoreboard_page(&page_with(json!({ "props": { "pageProps": {} } }))).unwrap();
        assert!(games.is_empty());
    }

    #[test]
    fn page_without_next_data_is_an_upstream_error() {
        let err = parse_scoreboard_page("<html><body>Access denied</body></html>").unwrap_err();
        assert!(matches!(err, OddsError::Upstream(_)));
    }

    #[test]
    fn list_games_requests_the_money_line_board_for_the_day() {
        let fetcher = StubFetcher::with_body(&page_with(board()));
        let config = OddsConfig::default();
        let scoreboard = Scoreboard::new(&config, &fetcher, Some("2024-01-05".to_string())).unwrap();
        let games = scoreboard.list_games(Sport::NHL).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(
            fetcher.requested.borrow().as_slice(),
            ["https://www.sportsbookreview.com/betting-odds/nhl-hockey/money-line/full-game/?date=2024-01-05"]
        );
    }

    #[test]
    fn bad_date_is_rejected_before_fetching() {
        let fetcher = StubFetcher::with_body("");
        let err = Scoreboard::new(&OddsConfig::default(), &fetcher, Some("05/01/2024".to_string()))
            .err()
            .unwrap();
        assert!(matches!(err, OddsError::Configuration(_)));
        assert_eq!(fetcher.calls(), 0);
    }
}
