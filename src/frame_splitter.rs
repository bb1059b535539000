//! Recognizes the control bytes embedded in a raw transport payload,
//! normalizes them, and yields a sequence of sub-messages, each headed by a
//! topic string with an action suffix.

use once_cell::sync::Lazy;
use regex::Regex;

const NAK: u8 = 0x15;
const DC4: u8 = 0x14;
const SOH: u8 = 0x01;
const BS: u8 = 0x08;
const NUL: u8 = 0x00;
const INTERNAL_SEP: u8 = 0x1E;

/// One sub-message: a topic header plus the raw record parts that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMessage {
    pub header: String,
    pub parts: Vec<String>,
}

static HEADER_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:_32_0|_32)[FUD]$").unwrap());
static EMPTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^EMPTY[FUD]$").unwrap());

fn is_header(part: &str) -> bool {
    HEADER_SUFFIX_RE.is_match(part)
        || EMPTY_RE.is_match(part)
        || part == "__time"
        || part.starts_with('#')
}

/// Splits a raw transport payload into sub-messages per spec §4.3.
pub fn split(payload: &[u8]) -> Vec<SubMessage> {
    let mut normalized = Vec::with_capacity(payload.len());
    for &b in payload {
        match b {
            NAK | DC4 => normalized.push(INTERNAL_SEP),
            NUL | SOH | BS => {}
            other => normalized.push(other),
        }
    }

    let text = String::from_utf8_lossy(&normalized);
    let pieces: Vec<&str> = text
        .split(INTERNAL_SEP as char)
        .filter(|p| !p.is_empty())
        .collect();

    if pieces.len() == 1 {
        if let Some(messages) = fallback_split(pieces[0]) {
            return messages;
        }
    }

    pieces.iter().map(|piece| split_piece(piece)).collect()
}

fn split_piece(piece: &str) -> SubMessage {
    let mut parts = piece.split('|');
    let header = parts.next().unwrap_or("").to_string();
    let rest = parts.map(|s| s.to_string()).collect();
    SubMessage {
        header,
        parts: rest,
    }
}

/// Pipe-only fallback for clean inputs (no control bytes at all): re-groups
/// parts by scanning for header-shaped parts and attaching everything after
/// one header to it, until the next header.
fn fallback_split(piece: &str) -> Option<Vec<SubMessage>> {
    let parts: Vec<&str> = piece.split('|').collect();
    if !parts.iter().any(|p| !p.is_empty() && is_header(p)) {
        return None;
    }

    let mut messages = Vec::new();
    let mut current: Option<SubMessage> = None;
    for part in parts {
        if !part.is_empty() && is_header(part) {
            if let Some(msg) = current.take() {
                messages.push(msg);
            }
            current = Some(SubMessage {
                header: part.to_string(),
                parts: Vec::new(),
            });
        } else if let Some(msg) = current.as_mut() {
            msg.parts.push(part.to_string());
        }
    }
    if let Some(msg) = current.take() {
        messages.push(msg);
    }
    Some(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_control_bytes() {
        let payload = b"\x15HEADER1F|REC1;|\x08\x15HEADER2U|F=1;|";
        let messages = split(payload);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].header, "HEADER1F");
        assert_eq!(messages[0].parts, vec!["REC1;".to_string()]);
        assert_eq!(messages[1].header, "HEADER2U");
        assert_eq!(messages[1].parts, vec!["F=1;".to_string()]);
    }

    #[test]
    fn strips_soh_bs_nul() {
        let payload = b"\x15OVInPlay_32_0F\x01|CL;CL=13;\x00|";
        let messages = split(payload);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].header, "OVInPlay_32_0F");
        assert_eq!(messages[0].parts, vec!["CL;CL=13;".to_string()]);
    }

    #[test]
    fn fallback_matches_control_byte_equivalent() {
        let with_control = b"\x15HEADER1_32_0F|REC1;|\x08\x15HEADER2_32_0U|F=1;|".to_vec();
        let without_control = b"HEADER1_32_0F|REC1;|HEADER2_32_0U|F=1;|".to_vec();

        let a = split(&with_control);
        let b = split(&without_control);
        assert_eq!(a.len(), b.len());
        for (msg_a, msg_b) in a.iter().zip(b.iter()) {
            assert_eq!(msg_a.header, msg_b.header);
            assert_eq!(msg_a.parts.first(), msg_b.parts.first());
        }
    }

    #[test]
    fn fallback_recognizes_empty_and_time_and_hash_headers() {
        let payload = b"__time|1700000000|#P__time,xyz|a;|EMPTYU|";
        let messages = split(payload);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].header, "__time");
        assert_eq!(messages[0].parts, vec!["1700000000".to_string()]);
        assert_eq!(messages[1].header, "#P__time,xyz");
        assert_eq!(messages[1].parts, vec!["a;".to_string()]);
        assert_eq!(messages[2].header, "EMPTYU");
        assert_eq!(messages[2].parts, vec!["".to_string()]);
    }

    #[test]
    fn no_recognizable_header_yields_single_raw_piece() {
        let messages = split(b"plain|text|no|control|bytes");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].header, "plain");
        assert_eq!(messages[0].parts, vec!["text", "no", "control", "bytes"]);
    }
}
