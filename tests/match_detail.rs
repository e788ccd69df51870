use std::fs;
use std::path::PathBuf;

use epl_extract::match_detail::{parse_match_detail, EventKind};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_match_detail_fixture() {
    let raw = read_fixture("match_74920.html");
    let record = parse_match_detail(&raw, 74920).expect("fixture should parse");
    assert_eq!(record.match_id, 74920);
    assert_eq!(record.stadium, "Anfield");
    assert_eq!(record.referee, "Anthony Taylor");
    assert_eq!(record.half_time_score_home, 1);
    assert_eq!(record.half_time_score_away, 0);
    assert_eq!(record.attendance, 53112);
}

#[test]
fn goal_timeline_skips_non_goal_entries() {
    let raw = read_fixture("match_74920.html");
    let record = parse_match_detail(&raw, 74920).expect("fixture should parse");
    // The card and the substitution never make it into the timeline.
    assert!(record
        .events
        .home
        .iter()
        .all(|e| e.player != "Yellow Card Robertson"));
    assert!(!record.events.away.iter().any(|e| e.player.contains("Olise") && e.kind == EventKind::Goal));
    let home_goals = record
        .events
        .home
        .iter()
        .filter(|e| e.kind == EventKind::Goal)
        .count();
    assert_eq!(home_goals, 2);
}

#[test]
fn goals_precede_assists_within_a_side() {
    let raw = read_fixture("match_74920.html");
    let record = parse_match_detail(&raw, 74920).expect("fixture should parse");
    let home_kinds = record.events.home.iter().map(|e| e.kind).collect::<Vec<_>>();
    assert_eq!(
        home_kinds,
        [EventKind::Goal, EventKind::Goal, EventKind::Assist]
    );
    let away_kinds = record.events.away.iter().map(|e| e.kind).collect::<Vec<_>>();
    assert_eq!(
        away_kinds,
        [EventKind::Goal, EventKind::Goal, EventKind::Assist]
    );
}

#[test]
fn event_names_and_minutes_are_parsed() {
    let raw = read_fixture("match_74920.html");
    let record = parse_match_detail(&raw, 74920).expect("fixture should parse");
    let salah = &record.events.home[0];
    assert_eq!(salah.player, "Salah");
    assert_eq!(salah.time, 32);
    let assist = record.events.home.last().expect("home assist present");
    assert_eq!(assist.player, "Alexander-Arnold");
    assert_eq!(assist.time, 32);
}

#[test]
fn compact_goal_text_parses_player_and_minute() {
    let raw = read_fixture("match_74920.html");
    let record = parse_match_detail(&raw, 74920).expect("fixture should parse");
    let smith = &record.events.away[0];
    assert_eq!(smith.kind, EventKind::Goal);
    assert_eq!(smith.player, "Smith");
    assert_eq!(smith.time, 45);
}

#[test]
fn missing_attendance_is_fatal() {
    let raw = read_fixture("match_74920.html").replace("class=\"attendance\"", "class=\"crowd\"");
    let err = parse_match_detail(&raw, 74920).expect_err("attendance is required");
    assert!(format!("{err:#}").contains("attendance"), "{err:#}");
}

#[test]
fn missing_half_time_block_is_fatal() {
    let raw = read_fixture("match_74920.html").replace("class=\"halfTime\"", "class=\"fullTime\"");
    assert!(parse_match_detail(&raw, 74920).is_err());
}

#[test]
fn malformed_event_text_is_fatal() {
    let raw = read_fixture("match_74920.html").replace("GoalSmith45", "Goal45Smith");
    let err = parse_match_detail(&raw, 74920).expect_err("minute-first event text cannot parse");
    assert!(format!("{err:#}").contains("name-then-minute"), "{err:#}");
}
