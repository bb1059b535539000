//! The central component: owns the indexed world model, dispatches full
//! dumps and incremental deltas to it, and emits a typed stream of change
//! events.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::field_parser::{self, FieldMap};
use crate::frame_splitter::{self, SubMessage};
use crate::item_id::{self, ItemId};
use crate::model::{Market, Match, MatchStatus, MatchUpdate, Selection, UpdateKind};
use crate::parse;
use crate::registry;

static EMPTY_HEADER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^EMPTY[FUD]$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IncrementalAction {
    Update,
    Delete,
}

enum HeaderKind {
    Full,
    Incremental(IncrementalAction),
    Skip,
}

fn classify_header(header: &str) -> HeaderKind {
    if header.starts_with('#') || header.eq_ignore_ascii_case("__time") {
        return HeaderKind::Skip;
    }
    if EMPTY_HEADER_RE.is_match(header) {
        return HeaderKind::Skip;
    }
    match header.chars().last() {
        Some('F') => HeaderKind::Full,
        Some('D') => HeaderKind::Incremental(IncrementalAction::Delete),
        Some('U') | Some('I') => HeaderKind::Incremental(IncrementalAction::Update),
        _ => HeaderKind::Skip,
    }
}

/// Cross-reference the selection-update path rebuilds on every full dump:
/// the odds-side key a PA record registers for its selection.
#[derive(Debug, Clone)]
pub struct SelectionInfo {
    pub fixture_id: String,
    pub position: i32,
}

/// Parse-context carried across records within a single full-dump
/// sub-message. Reset at the start of each `F` sub-message.
#[derive(Default)]
struct FullDumpContext {
    current_sport_id: String,
    in_supported_sport: bool,
    current_tournament: String,
    current_tournament_code: String,
    #[allow(dead_code)]
    current_category: String,
    last_event_id: String,
}

#[derive(Default)]
pub struct StateManager {
    matches: IndexMap<String, Match>,
    fixture_to_event: HashMap<String, String>,
    item_to_event: HashMap<String, String>,
    selection_info: HashMap<String, SelectionInfo>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sole entry point: runs the frame splitter over `payload`, applies
    /// every sub-message to the world model, and returns the change events
    /// produced in wire order.
    pub fn process(&mut self, payload: &[u8]) -> Vec<MatchUpdate> {
        let mut updates = Vec::new();
        for sub in frame_splitter::split(payload) {
            self.apply_sub_message(sub, &mut updates);
        }
        updates
    }

    fn apply_sub_message(&mut self, sub: SubMessage, updates: &mut Vec<MatchUpdate>) {
        match classify_header(&sub.header) {
            HeaderKind::Full => {
                if sub.header.contains("InPlay") {
                    debug!(header = %sub.header, "global full dump, resetting state");
                    self.clear_all();
                } else {
                    trace!(header = %sub.header, "detail full dump");
                }
                self.apply_full_dump(&sub.parts);
            }
            HeaderKind::Incremental(action) => {
                let fields = match sub.parts.first() {
                    Some(first) => field_parser::parse_fields(first),
                    None => FieldMap::new(),
                };
                let effective_header = sub.header.rsplit('/').next().unwrap_or(&sub.header);
                match item_id::classify(effective_header) {
                    ItemId::Event { event_id, .. } => {
                        if let Some(update) = self.apply_event_update(&event_id, action, &fields) {
                            updates.push(update);
                        }
                    }
                    ItemId::Selection {
                        fixture_id,
                        selection_id,
                    } => {
                        updates.extend(self.apply_selection_update(
                            &fixture_id,
                            &selection_id,
                            &fields,
                        ));
                    }
                    ItemId::Market { .. } | ItemId::Unknown => {
                        trace!(header = %sub.header, "dropping market/unknown incremental item");
                    }
                }
            }
            HeaderKind::Skip => {}
        }
    }

    fn clear_all(&mut self) {
        self.matches.clear();
        self.fixture_to_event.clear();
        self.item_to_event.clear();
        self.selection_info.clear();
    }

    // ---- full-dump application (spec-equivalent of §4.5.1) ----

    fn apply_full_dump(&mut self, parts: &[String]) {
        let mut ctx = FullDumpContext::default();
        for part in parts {
            let fields = field_parser::parse_fields(part);
            match field_parser::record_type(&fields) {
                Some("CL") => self.apply_cl(&fields, &mut ctx),
                Some("EV") => self.apply_ev(&fields, &mut ctx),
                Some("CT") => self.apply_ct(&fields, &mut ctx),
                Some("MA") => self.apply_ma(&fields, &ctx),
                Some("PA") => self.apply_pa(&fields, &ctx),
                _ => {}
            }
        }
    }

    fn apply_cl(&mut self, fields: &FieldMap, ctx: &mut FullDumpContext) {
        if let Some(cl) = fields.get("CL") {
            ctx.current_sport_id = cl.clone();
            ctx.in_supported_sport = registry::is_supported(cl);
        }
    }

    fn apply_ct(&mut self, fields: &FieldMap, ctx: &mut FullDumpContext) {
        if !ctx.in_supported_sport {
            return;
        }
        if let Some(na) = fields.get("NA") {
            ctx.current_tournament = na.clone();
        }
        if let Some(code) = fields.get("CC").or_else(|| fields.get("ID")) {
            ctx.current_tournament_code = code.clone();
        }
        if let Some(l3) = fields.get("L3") {
            ctx.current_category = l3.clone();
        }
    }

    fn apply_ev(&mut self, fields: &FieldMap, ctx: &mut FullDumpContext) {
        if let Some(cl) = fields.get("CL") {
            if registry::is_supported(cl) {
                ctx.in_supported_sport = true;
                ctx.current_sport_id = cl.clone();
            }
        }
        if !ctx.in_supported_sport {
            return;
        }
        let Some(id_field) = fields.get("ID") else {
            return;
        };
        let Some(event_id) = item_id::extract_event_id(id_field) else {
            return;
        };

        let cfg = registry::lookup(&ctx.current_sport_id);
        let full_name = fields.get("NA").cloned().unwrap_or_default();
        let (team1, team2) = match cfg {
            Some(cfg) => parse::parse_teams(&full_name, cfg.separators),
            None => (full_name.clone(), String::new()),
        };
        let tournament_name = fields
            .get("CN")
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| ctx.current_tournament.clone());
        let tournament_code = fields
            .get("CC")
            .filter(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| ctx.current_tournament_code.clone());
        let status = MatchStatus::from_es(fields.get("ES").map(String::as_str).unwrap_or(""));

        let set_scoring = cfg.map(|c| c.set_scoring).unwrap_or(false);
        let has_point = cfg.map(|c| c.has_point_score).unwrap_or(false);
        let has_serving = cfg.map(|c| c.has_serving).unwrap_or(false);

        let score_raw = fields.get("SS").cloned().unwrap_or_default();
        let sets = if set_scoring {
            parse::parse_set_scores(&score_raw)
        } else {
            Vec::new()
        };
        let current_game = if has_point {
            parse::parse_point_score(fields.get("XP").map(String::as_str).unwrap_or(""))
        } else {
            ("0".to_string(), "0".to_string())
        };
        let serving = if has_serving {
            parse::parse_serving(fields.get("PI").map(String::as_str).unwrap_or(""))
        } else {
            0
        };

        let fixture_id = fields.get("OI").cloned().unwrap_or_default();
        let item_id = id_field.clone();

        let m = Match {
            event_id: event_id.clone(),
            fixture_id: fixture_id.clone(),
            item_id: item_id.clone(),
            full_name,
            sport_id: ctx.current_sport_id.clone(),
            sport_name: cfg.map(|c| c.name.to_string()).unwrap_or_default(),
            team1,
            team2,
            tournament_name,
            tournament_code,
            status,
            score_raw,
            sets,
            current_game,
            serving,
            last_updated: String::new(),
            scheduled_start: 0,
            markets: IndexMap::new(),
        };

        if !fixture_id.is_empty() {
            self.fixture_to_event.insert(fixture_id, event_id.clone());
        }
        self.item_to_event.insert(item_id, event_id.clone());
        self.matches.insert(event_id.clone(), m);
        ctx.last_event_id = event_id;
    }

    fn apply_ma(&mut self, fields: &FieldMap, ctx: &FullDumpContext) {
        if ctx.last_event_id.is_empty() {
            return;
        }
        let Some(m) = self.matches.get_mut(&ctx.last_event_id) else {
            return;
        };
        let market_id = fields
            .get("MA")
            .or_else(|| fields.get("ID"))
            .cloned()
            .unwrap_or_default();
        let name = fields.get("NA").cloned().unwrap_or_default();
        let suspended = fields.get("SU").map(|s| s == "1").unwrap_or(false);
        m.markets
            .insert(market_id.clone(), Market::new(market_id, name, suspended));
    }

    fn apply_pa(&mut self, fields: &FieldMap, ctx: &FullDumpContext) {
        if ctx.last_event_id.is_empty() {
            return;
        }
        let Some(m) = self.matches.get_mut(&ctx.last_event_id) else {
            return;
        };
        if m.markets.is_empty() {
            return;
        }
        let last = m.markets.len() - 1;
        let (_, market) = m.markets.get_index_mut(last).expect("checked non-empty");

        let selection_id = fields.get("ID").cloned().unwrap_or_default();
        let fractional_odds = fields.get("OD").cloned().unwrap_or_default();
        let decimal_odds = parse::fractional_to_decimal(&fractional_odds);
        let position: i32 = fields.get("OR").and_then(|s| s.parse().ok()).unwrap_or(0);
        let suspended = fields.get("SU").map(|s| s == "1").unwrap_or(false);

        market.selections.insert(
            selection_id.clone(),
            Selection {
                selection_id: selection_id.clone(),
                fractional_odds,
                decimal_odds,
                position,
                suspended,
            },
        );

        if let Some(fi) = fields.get("FI") {
            if !fi.is_empty() {
                self.selection_info.insert(
                    selection_id,
                    SelectionInfo {
                        fixture_id: fi.clone(),
                        position,
                    },
                );
            }
        }
    }

    // ---- incremental application (spec-equivalent of §4.5.2) ----

    fn apply_event_update(
        &mut self,
        event_id: &str,
        action: IncrementalAction,
        fields: &FieldMap,
    ) -> Option<MatchUpdate> {
        let sport_id = self.matches.get(event_id)?.sport_id.clone();
        if !registry::is_supported(&sport_id) {
            return None;
        }

        let mut changes = Vec::new();
        {
            let cfg = registry::lookup(&sport_id);
            let set_scoring = cfg.map(|c| c.set_scoring).unwrap_or(false);
            let has_point = cfg.map(|c| c.has_point_score).unwrap_or(false);
            let has_serving = cfg.map(|c| c.has_serving).unwrap_or(false);
            let m = self.matches.get_mut(event_id)?;

            if let Some(ss) = fields.get("SS") {
                let prev_score_raw = std::mem::replace(&mut m.score_raw, ss.clone());
                if set_scoring {
                    let prev_serialized = parse::serialize_set_scores(&m.sets);
                    let new_sets = parse::parse_set_scores(ss);
                    let new_serialized = parse::serialize_set_scores(&new_sets);
                    m.sets = new_sets;
                    if new_serialized != prev_serialized {
                        changes.push(format!("sets: {new_serialized}"));
                    }
                } else if prev_score_raw != *ss {
                    changes.push(format!("score: {ss}"));
                }
            }

            if has_point {
                if let Some(xp) = fields.get("XP") {
                    let new_game = parse::parse_point_score(xp);
                    if new_game != m.current_game {
                        changes.push(format!("game: {}-{}", new_game.0, new_game.1));
                        m.current_game = new_game;
                    }
                }
            }

            if has_serving {
                if let Some(pi) = fields.get("PI") {
                    let new_serving = parse::parse_serving(pi);
                    if new_serving != m.serving {
                        m.serving = new_serving;
                        changes.push(format!("serving: P{new_serving}"));
                    }
                }
            }

            if let Some(tu) = fields.get("TU") {
                m.last_updated = tu.clone();
            }

            if let Some(es) = fields.get("ES") {
                m.status = MatchStatus::from_es(es);
            }
        }

        if action == IncrementalAction::Delete {
            let removed = self.matches.shift_remove(event_id)?;
            self.forget_event(event_id, &removed);
            Some(MatchUpdate {
                kind: UpdateKind::Delete,
                event_id: event_id.to_string(),
                match_snapshot: removed,
                changes: vec!["deleted".to_string()],
            })
        } else if !changes.is_empty() {
            let snapshot = self.matches.get(event_id)?.clone();
            Some(MatchUpdate {
                kind: UpdateKind::Score,
                event_id: event_id.to_string(),
                match_snapshot: snapshot,
                changes,
            })
        } else {
            None
        }
    }

    fn forget_event(&mut self, event_id: &str, removed: &Match) {
        if !removed.fixture_id.is_empty()
            && self.fixture_to_event.get(&removed.fixture_id).map(String::as_str) == Some(event_id)
        {
            self.fixture_to_event.remove(&removed.fixture_id);
        }
        if self.item_to_event.get(&removed.item_id).map(String::as_str) == Some(event_id) {
            self.item_to_event.remove(&removed.item_id);
        }
        for market in removed.markets.values() {
            for selection_id in market.selections.keys() {
                self.selection_info.remove(selection_id);
            }
        }
    }

    fn apply_selection_update(
        &mut self,
        fixture_id: &str,
        selection_id: &str,
        fields: &FieldMap,
    ) -> Vec<MatchUpdate> {
        let Some(event_id) = self.fixture_to_event.get(fixture_id).cloned() else {
            return Vec::new();
        };
        let Some(m) = self.matches.get_mut(&event_id) else {
            return Vec::new();
        };

        let team1 = m.team1.clone();
        let team2 = m.team2.clone();
        let mut hits: Vec<Vec<String>> = Vec::new();

        for market in m.markets.values_mut() {
            let selection_count = market.selections.len();
            let Some(selection) = market.selections.get_mut(selection_id) else {
                continue;
            };
            let mut changes = Vec::new();

            if let Some(od) = fields.get("OD") {
                if &selection.fractional_odds != od {
                    let old = selection.fractional_odds.clone();
                    selection.fractional_odds = od.clone();
                    selection.decimal_odds = parse::fractional_to_decimal(od);
                    let label = match selection.position {
                        0 => team1.clone(),
                        1 if selection_count >= 3 => "Draw".to_string(),
                        _ => team2.clone(),
                    };
                    changes.push(format!("{label}: {old} → {od}"));
                }
            }

            if let Some(su) = fields.get("SU") {
                selection.suspended = su == "1";
            }

            if !changes.is_empty() {
                hits.push(changes);
            }
        }

        if hits.is_empty() {
            return Vec::new();
        }
        let snapshot = m.clone();
        hits.into_iter()
            .map(|changes| MatchUpdate {
                kind: UpdateKind::Odds,
                event_id: event_id.clone(),
                match_snapshot: snapshot.clone(),
                changes,
            })
            .collect()
    }

    // ---- queries (§6) ----

    pub fn all_matches(&self) -> Vec<&Match> {
        self.matches.values().collect()
    }

    pub fn live_matches(&self) -> Vec<&Match> {
        self.matches
            .values()
            .filter(|m| m.status == MatchStatus::InPlay)
            .collect()
    }

    pub fn matches_by_sport(&self, sport_id: &str) -> Vec<&Match> {
        self.matches
            .values()
            .filter(|m| m.sport_id == sport_id)
            .collect()
    }

    pub fn match_by_event(&self, event_id: &str) -> Option<&Match> {
        self.matches.get(event_id)
    }

    pub fn event_id_for_fixture(&self, fixture_id: &str) -> Option<&str> {
        self.fixture_to_event.get(fixture_id).map(String::as_str)
    }

    pub fn event_id_for_item(&self, item_id: &str) -> Option<&str> {
        self.item_to_event.get(item_id).map(String::as_str)
    }

    pub fn selection_info(&self, selection_id: &str) -> Option<&SelectionInfo> {
        self.selection_info.get(selection_id)
    }
}
