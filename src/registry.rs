//! Static mapping from sport code to a capability descriptor. Discovery of
//! new sports is a non-goal, so the table is compiled in rather than loaded.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportConfig {
    pub sport_id: &'static str,
    pub name: &'static str,
    pub folder: &'static str,
    pub separators: &'static [&'static str],
    pub set_scoring: bool,
    pub has_serving: bool,
    pub has_point_score: bool,
}

static REGISTRY: Lazy<HashMap<&'static str, SportConfig>> = Lazy::new(|| {
    let configs = [
        SportConfig {
            sport_id: "1",
            name: "Soccer",
            folder: "soccer",
            separators: &[" v ", " vs "],
            set_scoring: false,
            has_serving: false,
            has_point_score: false,
        },
        SportConfig {
            sport_id: "12",
            name: "Football",
            folder: "american-football",
            separators: &[" @ ", " v "],
            set_scoring: false,
            has_serving: false,
            has_point_score: false,
        },
        SportConfig {
            sport_id: "13",
            name: "Tennis",
            folder: "tennis",
            separators: &[" v "],
            set_scoring: true,
            has_serving: true,
            has_point_score: true,
        },
        SportConfig {
            sport_id: "14",
            name: "Snooker",
            folder: "snooker",
            separators: &[" v "],
            set_scoring: true,
            has_serving: false,
            has_point_score: false,
        },
        SportConfig {
            sport_id: "17",
            name: "Hockey",
            folder: "hockey",
            separators: &[" @ ", " v ", " vs "],
            set_scoring: false,
            has_serving: false,
            has_point_score: false,
        },
        SportConfig {
            sport_id: "18",
            name: "Basketball",
            folder: "basketball",
            separators: &[" @ ", " vs ", " v "],
            set_scoring: false,
            has_serving: false,
            has_point_score: false,
        },
        SportConfig {
            sport_id: "92",
            name: "Table Tennis",
            folder: "table-tennis",
            separators: &[" v "],
            set_scoring: true,
            has_serving: true,
            has_point_score: true,
        },
    ];
    configs
        .into_iter()
        .map(|c| (c.sport_id, c))
        .collect()
});

pub fn lookup(sport_id: &str) -> Option<&'static SportConfig> {
    REGISTRY.get(sport_id)
}

pub fn is_supported(sport_id: &str) -> bool {
    REGISTRY.contains_key(sport_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tennis_has_set_serve_and_point_scoring() {
        let cfg = lookup("13").expect("tennis must be registered");
        assert!(cfg.set_scoring);
        assert!(cfg.has_serving);
        assert!(cfg.has_point_score);
        assert_eq!(cfg.name, "Tennis");
    }

    #[test]
    fn soccer_has_none_of_the_scoring_flags() {
        let cfg = lookup("1").expect("soccer must be registered");
        assert!(!cfg.set_scoring);
        assert!(!cfg.has_serving);
        assert!(!cfg.has_point_score);
    }

    #[test]
    fn unknown_sport_is_unsupported() {
        assert!(!is_supported("999"));
        assert!(lookup("999").is_none());
    }

    #[test]
    fn all_seven_seed_sports_are_present() {
        for id in ["1", "12", "13", "14", "17", "18", "92"] {
            assert!(is_supported(id), "sportId {id} should be supported");
        }
    }
}
