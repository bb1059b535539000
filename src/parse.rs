//! Parsers for the score-string and odds micro-grammars embedded in record
//! field values. Every function here is total: malformed input coerces to a
//! default rather than propagating an error, per the decoder's silent-ignore
//! philosophy.

/// Parses `"3-6,1-0"` into `[(3,6),(1,0)]`. Each side is a decimal integer;
/// parse failure on either side coerces that side to 0.
pub fn parse_set_scores(raw: &str) -> Vec<(i32, i32)> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|pair| {
            let mut halves = pair.splitn(2, '-');
            let p1 = halves.next().unwrap_or("").trim().parse().unwrap_or(0);
            let p2 = halves.next().unwrap_or("").trim().parse().unwrap_or(0);
            (p1, p2)
        })
        .collect()
}

/// Re-serializes a set-score list to the wire's `"p1-p2,p1-p2"` shape, the
/// inverse of [`parse_set_scores`] for well-formed input.
pub fn serialize_set_scores(sets: &[(i32, i32)]) -> String {
    sets.iter()
        .map(|(p1, p2)| format!("{p1}-{p2}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses `"40-15"` into `("40","15")`. Empty or missing halves default to
/// `"0"`. Values are free strings (e.g. `"A"` for advantage), not integers.
pub fn parse_point_score(raw: &str) -> (String, String) {
    let mut halves = raw.splitn(2, '-');
    let p1 = halves.next().unwrap_or("");
    let p2 = halves.next().unwrap_or("");
    (
        if p1.is_empty() { "0".to_string() } else { p1.to_string() },
        if p2.is_empty() { "0".to_string() } else { p2.to_string() },
    )
}

/// Parses `"1,0"` into `2` if the first digit is `"1"`, else `1`. Empty
/// input defaults to `1`. Player 1 serving (leading digit `1`) reports as
/// `serving == 2` on the Match — an offset quirk of this wire format.
pub fn parse_serving(raw: &str) -> u8 {
    if raw.is_empty() {
        return 1;
    }
    let first = raw.split(',').next().unwrap_or("");
    if first == "1" {
        2
    } else {
        1
    }
}

/// Converts `"n/d"` fractional odds to decimal: `n/d + 1`. Absent `/`,
/// non-numeric sides, or a zero denominator all coerce to `0.0`.
pub fn fractional_to_decimal(raw: &str) -> f64 {
    let mut sides = raw.splitn(2, '/');
    let n = sides.next().unwrap_or("");
    let d = sides.next();
    match d {
        None => 0.0,
        Some(d) => {
            let n: f64 = match n.trim().parse() {
                Ok(v) => v,
                Err(_) => return 0.0,
            };
            let d: f64 = match d.trim().parse() {
                Ok(v) => v,
                Err(_) => return 0.0,
            };
            if d == 0.0 {
                0.0
            } else {
                n / d + 1.0
            }
        }
    }
}

/// Tries each separator from the sport config in order; on first match,
/// splits into `(left, right)`, trimming surrounding whitespace. Falls back
/// to `[" v ", " vs ", " @ "]` if none of the sport's separators match, and
/// finally to `(name, "")` if nothing matches at all.
pub fn parse_teams(name: &str, separators: &[&str]) -> (String, String) {
    const FALLBACK: [&str; 3] = [" v ", " vs ", " @ "];

    for sep in separators.iter().chain(FALLBACK.iter()) {
        if let Some(idx) = name.find(sep) {
            let (left, right) = name.split_at(idx);
            let right = &right[sep.len()..];
            return (left.trim().to_string(), right.trim().to_string());
        }
    }
    (name.to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_set_scores() {
        assert_eq!(parse_set_scores("3-6,1-0"), vec![(3, 6), (1, 0)]);
    }

    #[test]
    fn empty_set_scores_is_empty_vec() {
        assert_eq!(parse_set_scores(""), Vec::<(i32, i32)>::new());
    }

    #[test]
    fn malformed_set_score_side_coerces_to_zero() {
        assert_eq!(parse_set_scores("x-6"), vec![(0, 6)]);
    }

    #[test]
    fn set_scores_round_trip() {
        let original = "3-6,1-0";
        let reserialized = serialize_set_scores(&parse_set_scores(original));
        assert_eq!(parse_set_scores(&reserialized), parse_set_scores(original));
    }

    #[test]
    fn parses_point_score_with_defaults() {
        assert_eq!(parse_point_score("40-15"), ("40".to_string(), "15".to_string()));
        assert_eq!(parse_point_score("-15"), ("0".to_string(), "15".to_string()));
        assert_eq!(parse_point_score("40-"), ("40".to_string(), "0".to_string()));
        assert_eq!(parse_point_score(""), ("0".to_string(), "0".to_string()));
    }

    #[test]
    fn parses_serving_indicator() {
        assert_eq!(parse_serving("1,0"), 2);
        assert_eq!(parse_serving("0,1"), 1);
        assert_eq!(parse_serving(""), 1);
    }

    #[test]
    fn converts_fractional_odds_to_decimal() {
        assert!((fractional_to_decimal("9/2") - 5.5).abs() < 1e-9);
        assert!((fractional_to_decimal("1/7") - 1.1428571428571428).abs() < 1e-9);
    }

    #[test]
    fn fractional_edge_cases_coerce_to_zero() {
        assert_eq!(fractional_to_decimal("9/0"), 0.0);
        assert_eq!(fractional_to_decimal("nope"), 0.0);
        assert_eq!(fractional_to_decimal(""), 0.0);
    }

    #[test]
    fn parses_teams_with_sport_separator() {
        let (left, right) = parse_teams("Mariano Navone v Luciano Darderi", &[" v "]);
        assert_eq!(left, "Mariano Navone");
        assert_eq!(right, "Luciano Darderi");
    }

    #[test]
    fn parses_teams_falls_back_to_default_separators() {
        let (left, right) = parse_teams("Team A @ Team B", &[" v "]);
        assert_eq!(left, "Team A");
        assert_eq!(right, "Team B");
    }

    #[test]
    fn parses_teams_with_no_separator_returns_whole_name() {
        let (left, right) = parse_teams("Solo Entrant", &[" v "]);
        assert_eq!(left, "Solo Entrant");
        assert_eq!(right, "");
    }
}
