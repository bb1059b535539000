//! Renders a match snapshot or change event to a one-line human string.
//! Deliberately thin: no JSON, no tabular layout, no color.

use crate::model::{Match, MatchStatus, MatchUpdate};
use crate::parse;

/// `"<team1> v <team2> (<tournament>) [<status>] <score>"`.
pub fn format_match(m: &Match) -> String {
    let status = match m.status {
        MatchStatus::PreMatch => "pre-match",
        MatchStatus::InPlay => "in-play",
    };
    let score = if !m.sets.is_empty() {
        parse::serialize_set_scores(&m.sets)
    } else if !m.score_raw.is_empty() {
        m.score_raw.clone()
    } else {
        "-".to_string()
    };
    format!(
        "{} v {} ({}) [{}] {}",
        m.team1, m.team2, m.tournament_name, status, score
    )
}

/// `"[<kind>] <eventId>: <changes joined by ", ">"`.
pub fn format_update(update: &MatchUpdate) -> String {
    format!(
        "[{}] {}: {}",
        update.kind,
        update.event_id,
        update.changes.join(", ")
    )
}
