use std::fs;
use std::path::PathBuf;

use liga_terminal::league_fetch::{
    parse_calendar_days_json, parse_competitions_json, parse_match_detail_json,
    parse_matches_json, parse_rounds_json, parse_standings_json, parse_zones_json,
};
use liga_terminal::state::{EventKind, MatchStatus, RecentResult};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_competitions_fixture() {
    let raw = read_fixture("competitions.json");
    let rows = parse_competitions_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, 12);
    assert_eq!(rows[0].full_name, "Primera División - Clausura 2025");
}

#[test]
fn competition_without_full_name_falls_back_to_name_and_season() {
    let raw = read_fixture("competitions.json");
    let rows = parse_competitions_json(&raw).expect("fixture should parse");
    assert_eq!(rows[1].full_name, "Sub 20 2025");
    // blank full_name counts as absent
    assert_eq!(rows[2].full_name, "Primera División 2024");
}

#[test]
fn zones_are_trimmed_and_blanks_dropped() {
    let rows = parse_zones_json(r#"["NORTE", " SUR ", ""]"#).expect("payload should parse");
    assert_eq!(rows, vec!["NORTE".to_string(), "SUR".to_string()]);
}

#[test]
fn parses_standings_fixture() {
    let raw = read_fixture("standings_extended.json");
    let rows = parse_standings_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].team, "SAN JOSE OBRERO");
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].points, 23);
    assert_eq!(rows[0].goal_diff(), 13);
}

#[test]
fn standings_recent_results_skip_unknown_codes() {
    let raw = read_fixture("standings_extended.json");
    let rows = parse_standings_json(&raw).expect("fixture should parse");
    // "X" is not an outcome code and is dropped
    assert_eq!(rows[0].recent.len(), 4);
    assert_eq!(rows[0].recent[0], RecentResult::Win);
    assert_eq!(rows[1].recent[3], RecentResult::Loss);
    // the plain endpoint ships no recent_results at all
    assert!(rows[2].recent.is_empty());
}

#[test]
fn parses_matches_fixture() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].status, MatchStatus::Finished);
    assert_eq!(rows[0].home_score, Some(2));
    assert!(rows[0].date.is_some());
    assert_eq!(rows[0].facility.as_deref(), Some("Estadio Municipal"));

    assert_eq!(rows[1].status, MatchStatus::InProgress);
    assert_eq!(rows[1].round.as_deref(), Some("Fecha 2"));
    assert!(rows[1].facility.is_none());

    assert_eq!(rows[2].status, MatchStatus::Scheduled);
    assert!(rows[2].round.is_none());
    assert!(rows[2].date.is_none());
    assert!(rows[2].home_score.is_none());
}

#[test]
fn bare_iso_dates_read_as_utc() {
    let raw = read_fixture("matches.json");
    let rows = parse_matches_json(&raw).expect("fixture should parse");
    let date = rows[1].date.expect("bare ISO datetime should parse");
    assert_eq!(date.format("%Y-%m-%d %H:%M").to_string(), "2025-03-23 19:00");
}

#[test]
fn parses_match_detail_fixture() {
    let raw = read_fixture("match_detail.json");
    let detail = parse_match_detail_json(&raw).expect("fixture should parse");
    assert_eq!(detail.id, 101);
    assert_eq!(detail.status, MatchStatus::Finished);
    assert_eq!(detail.round.as_deref(), Some("Fecha 1"));

    // the "Lineup" bookkeeping row is dropped, the rest sort by minute
    assert_eq!(detail.events.len(), 4);
    let minutes: Vec<u32> = detail.events.iter().map(|event| event.minute).collect();
    assert_eq!(minutes, vec![12, 45, 58, 70]);
    assert_eq!(detail.events[0].kind, EventKind::Goal);
    assert_eq!(detail.events[1].kind, EventKind::Penalty);
    assert_eq!(detail.events[1].stoppage_time, Some(2));
    assert_eq!(detail.events[2].accumulated_yellow, Some(4));
    assert_eq!(
        detail.events[3].detail.as_deref(),
        Some("Entra por D. Paredes")
    );
}

#[test]
fn match_detail_null_is_an_error() {
    assert!(parse_match_detail_json("null").is_err());
    assert!(parse_match_detail_json("  ").is_err());
}

#[test]
fn list_payloads_treat_null_as_empty() {
    assert!(parse_competitions_json("null").expect("null should parse").is_empty());
    assert!(parse_zones_json("").expect("empty should parse").is_empty());
    assert!(parse_matches_json("null").expect("null should parse").is_empty());
    assert!(parse_standings_json("null").expect("null should parse").is_empty());
    assert!(parse_rounds_json("null").expect("null should parse").is_empty());
    assert!(parse_calendar_days_json("null").expect("null should parse").is_empty());
}

#[test]
fn message_objects_read_as_no_rows() {
    // a miss answers with an object, not an array
    let raw = r#"{"message": "No se encontraron partidos"}"#;
    assert!(parse_matches_json(raw).expect("object should parse").is_empty());
    let raw = r#"{"error": "competition not found"}"#;
    assert!(parse_standings_json(raw).expect("object should parse").is_empty());
}

#[test]
fn calendar_days_sort_and_dedup() {
    let days = parse_calendar_days_json("[15, 3, 3, 22, 8]").expect("payload should parse");
    assert_eq!(days, vec![3, 8, 15, 22]);
}

#[test]
fn rounds_keep_order_and_drop_blanks() {
    let rounds =
        parse_rounds_json(r#"["Fecha 1", "  ", "Fecha 2"]"#).expect("payload should parse");
    assert_eq!(rounds, vec!["Fecha 1".to_string(), "Fecha 2".to_string()]);
}
