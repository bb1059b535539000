use liveodds_decoder::model::UpdateKind;
use liveodds_decoder::{parse, StateManager};

const FULL_DUMP: &[u8] = b"OVInPlay_32_0F|CL;CL=13;NA=Tennis;|CT;NA=ATP Santiago;CC=21124106;L3=ATP3-R2;|EV;ID=190321250C13A_32_0;NA=Mariano Navone v Luciano Darderi;OI=190340113;SS=3-6,0-0;XP=40-15;PI=1,0;ES=2;CL=13;|MA;ID=1763;NA=Money Line;SU=0;|PA;ID=701873422;FI=190340113;OD=9/2;OR=0;SU=0;|PA;ID=701873420;FI=190340113;OD=1/7;OR=1;SU=0;|";

#[test]
fn control_byte_framing_splits_two_sub_messages() {
    let payload = b"\x15HEADER1_32_0F|REC1;|\x08\x15HEADER2_32_0U|F=1;|";
    let mut sm = StateManager::new();
    // Unknown header shapes (no recognized item id) are silently dropped;
    // this just exercises that processing the combined payload doesn't panic
    // and that no spurious updates are produced from garbage records.
    let updates = sm.process(payload);
    assert!(updates.is_empty());
}

#[test]
fn full_session_through_public_api() {
    let mut sm = StateManager::new();
    assert!(sm.process(FULL_DUMP).is_empty());

    let odds_updates = sm.process(b"OV190340113-701873422_32_0U|OD=4/1;|");
    assert_eq!(odds_updates.len(), 1);
    assert_eq!(odds_updates[0].kind, UpdateKind::Odds);

    let score_updates = sm.process(b"OV190321250C13A_32_0U|SS=3-6,1-0;XP=0-0;PI=0,1;|");
    assert_eq!(score_updates.len(), 1);
    assert_eq!(score_updates[0].kind, UpdateKind::Score);

    let live = sm.live_matches();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].event_id, "190321250");

    let by_sport = sm.matches_by_sport("13");
    assert_eq!(by_sport.len(), 1);

    let delete_updates = sm.process(b"OV190321250C13A_32_0D||");
    assert_eq!(delete_updates.len(), 1);
    assert_eq!(delete_updates[0].kind, UpdateKind::Delete);
    assert!(sm.all_matches().is_empty());
}

#[test]
fn invariant_concatenation_equivalence() {
    let delta = b"OV190321250C13A_32_0U|SS=3-6,1-0;|" as &[u8];
    let combined = [FULL_DUMP, delta].concat();

    let mut combined_sm = StateManager::new();
    combined_sm.process(&combined);

    let mut separate_sm = StateManager::new();
    separate_sm.process(FULL_DUMP);
    separate_sm.process(delta);

    let a = combined_sm.match_by_event("190321250").unwrap();
    let b = separate_sm.match_by_event("190321250").unwrap();
    assert_eq!(a.sets, b.sets);
    assert_eq!(a.score_raw, b.score_raw);
}

#[test]
fn invariant_fractional_to_decimal_for_positive_integers() {
    for (n, d) in [(1, 2), (9, 2), (3, 7), (100, 3)] {
        let raw = format!("{n}/{d}");
        let expected = n as f64 / d as f64 + 1.0;
        assert!((parse::fractional_to_decimal(&raw) - expected).abs() < 1e-9);
    }
}

#[test]
fn invariant_set_score_idempotence() {
    for raw in ["3-6,1-0", "0-0", "6-4,3-6,7-5"] {
        let once = parse::parse_set_scores(raw);
        let twice = parse::parse_set_scores(&parse::serialize_set_scores(&once));
        assert_eq!(once, twice);
    }
}

#[test]
fn global_dump_resets_to_exactly_the_dumps_events() {
    let mut sm = StateManager::new();
    sm.process(FULL_DUMP);
    assert_eq!(sm.all_matches().len(), 1);

    sm.process(b"OVInPlay_32_0F|CL;CL=1;NA=Soccer;|EV;ID=190000010C1A_32_0;NA=X v Y;OI=190000011;|");
    let matches = sm.all_matches();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].event_id, "190000010");
}
