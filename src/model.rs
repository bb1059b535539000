//! The in-memory world model: `Match`, `Market`, `Selection`, and the
//! `MatchUpdate` change events the State Manager emits for each delta.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    #[serde(rename = "pre-match")]
    PreMatch,
    #[serde(rename = "in-play")]
    InPlay,
}

impl MatchStatus {
    pub fn from_es(es: &str) -> Self {
        if es.is_empty() {
            MatchStatus::PreMatch
        } else {
            MatchStatus::InPlay
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub selection_id: String,
    pub fractional_odds: String,
    pub decimal_odds: f64,
    pub position: i32,
    pub suspended: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Market {
    pub market_id: String,
    pub name: String,
    pub suspended: bool,
    pub selections: IndexMap<String, Selection>,
}

impl Market {
    pub fn new(market_id: impl Into<String>, name: impl Into<String>, suspended: bool) -> Self {
        Self {
            market_id: market_id.into(),
            name: name.into(),
            suspended,
            selections: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub event_id: String,
    pub fixture_id: String,
    pub item_id: String,
    pub full_name: String,
    pub sport_id: String,
    pub sport_name: String,
    pub team1: String,
    pub team2: String,
    pub tournament_name: String,
    pub tournament_code: String,
    pub status: MatchStatus,
    pub score_raw: String,
    pub sets: Vec<(i32, i32)>,
    pub current_game: (String, String),
    pub serving: u8,
    pub last_updated: String,
    pub scheduled_start: i64,
    pub markets: IndexMap<String, Market>,
}

/// The kind of change a [`MatchUpdate`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Score,
    Odds,
    Delete,
}

impl std::fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UpdateKind::Score => "score",
            UpdateKind::Odds => "odds",
            UpdateKind::Delete => "delete",
        };
        write!(f, "{label}")
    }
}

/// One emitted change event: the result of applying a single incremental
/// delta to the world model.
#[derive(Debug, Clone, Serialize)]
pub struct MatchUpdate {
    pub kind: UpdateKind,
    pub event_id: String,
    #[serde(rename = "match")]
    pub match_snapshot: Match,
    pub changes: Vec<String>,
}
