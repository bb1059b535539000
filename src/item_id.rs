//! Classifies an entity identifier (event, market, or selection) and
//! extracts its numeric components. IDs are kept as strings throughout to
//! avoid precision loss on numbers that can exceed 53 bits.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemId {
    Event {
        event_id: String,
        category_id: String,
    },
    Market {
        event_id: String,
        category_id: String,
        market_num: String,
    },
    Selection {
        fixture_id: String,
        selection_id: String,
    },
    Unknown,
}

static SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(_32_0|_32)[UDF]?$").unwrap());
static EVENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:OV|6V)(\d+)C(\d+)A$").unwrap());
static MARKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:OV|6V)(\d+)C(\d+)-(\d+)$").unwrap());
static SELECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:OV|6VP?|OVES)(\d+)-0?(\d+)$").unwrap());

/// Strips a trailing `_32` or `_32_0`, optionally followed by `U`/`D`/`F`.
fn strip_platform_suffix(raw: &str) -> &str {
    match SUFFIX.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    }
}

/// Classifies `raw`, which may already have its trailing action suffix
/// stripped by the caller. See spec §4.2 for the three recognized shapes.
pub fn classify(raw: &str) -> ItemId {
    let trimmed = strip_platform_suffix(raw);

    if let Some(caps) = EVENT_RE.captures(trimmed) {
        return ItemId::Event {
            event_id: caps[1].to_string(),
            category_id: caps[2].to_string(),
        };
    }
    if let Some(caps) = MARKET_RE.captures(trimmed) {
        return ItemId::Market {
            event_id: caps[1].to_string(),
            category_id: caps[2].to_string(),
            market_num: caps[3].to_string(),
        };
    }
    if let Some(caps) = SELECTION_RE.captures(trimmed) {
        return ItemId::Selection {
            fixture_id: caps[1].to_string(),
            selection_id: caps[2].to_string(),
        };
    }
    ItemId::Unknown
}

/// Extracts the eventId from an EV record's `ID` field by matching
/// `^(OV|6V)?<digits>C`; returns `None` if the field doesn't start that way.
pub fn extract_event_id(id_field: &str) -> Option<String> {
    static ID_FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:OV|6V)?(\d+)C").unwrap());
    ID_FIELD_RE
        .captures(id_field)
        .map(|caps| caps[1].to_string())
}
