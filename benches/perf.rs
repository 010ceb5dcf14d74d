use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{TimeZone, Utc};
use liga_terminal::league_fetch::{
    parse_match_detail_json, parse_matches_json, parse_standings_json,
};
use liga_terminal::state::{AppState, CardTotals, MatchRow, MatchStatus};
use liga_terminal::stats_fetch::parse_streaks_json;

fn sample_match(id: i64, round: u32, day: u32) -> MatchRow {
    MatchRow {
        id,
        home_team_id: id % 14,
        away_team_id: (id + 1) % 14,
        home: format!("EQUIPO {}", id % 14),
        away: format!("EQUIPO {}", (id + 1) % 14),
        date: Utc
            .with_ymd_and_hms(2025, 1 + (round % 12), 1 + day, 20, 0, 0)
            .single(),
        status: MatchStatus::Finished,
        round: Some(format!("Fecha {round}")),
        home_score: Some(2),
        away_score: Some(1),
        facility: Some("Estadio Municipal".to_string()),
    }
}

fn season_state() -> AppState {
    let mut state = AppState::new();
    state.matches = (0..240)
        .map(|idx| sample_match(idx, (idx % 30) as u32 + 1, (idx % 27) as u32))
        .collect();
    state.cards = (0..16)
        .map(|idx| CardTotals {
            team: format!("EQUIPO {idx}"),
            yellow: (idx * 3) as u32 % 29,
            red: idx as u32 % 5,
        })
        .collect();
    state
}

fn bench_standings_parse(c: &mut Criterion) {
    c.bench_function("standings_parse", |b| {
        b.iter(|| {
            let rows = parse_standings_json(black_box(STANDINGS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_matches_parse(c: &mut Criterion) {
    c.bench_function("matches_parse", |b| {
        b.iter(|| {
            let rows = parse_matches_json(black_box(MATCHES_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_match_detail_parse(c: &mut Criterion) {
    c.bench_function("match_detail_parse", |b| {
        b.iter(|| {
            let detail = parse_match_detail_json(black_box(MATCH_DETAIL_JSON)).unwrap();
            black_box(detail.events.len());
        })
    });
}

fn bench_streaks_parse(c: &mut Criterion) {
    c.bench_function("streaks_parse", |b| {
        b.iter(|| {
            let rows = parse_streaks_json(black_box(STREAKS_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_round_tabs(c: &mut Criterion) {
    let state = season_state();
    c.bench_function("round_tabs", |b| {
        b.iter(|| {
            let tabs = black_box(&state).round_tabs();
            black_box(tabs.len());
        })
    });
}

fn bench_almanac_groups(c: &mut Criterion) {
    let state = season_state();
    c.bench_function("almanac_groups", |b| {
        b.iter(|| {
            let groups = black_box(&state).almanac_groups();
            black_box(groups.len());
        })
    });
}

fn bench_cards_rows(c: &mut Criterion) {
    let state = season_state();
    c.bench_function("cards_rows", |b| {
        b.iter(|| {
            let rows = black_box(&state).cards_rows();
            black_box(rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_standings_parse,
    bench_matches_parse,
    bench_match_detail_parse,
    bench_streaks_parse,
    bench_round_tabs,
    bench_almanac_groups,
    bench_cards_rows
);
criterion_main!(perf);

static STANDINGS_JSON: &str = include_str!("../tests/fixtures/standings_extended.json");
static MATCHES_JSON: &str = include_str!("../tests/fixtures/matches.json");
static MATCH_DETAIL_JSON: &str = include_str!("../tests/fixtures/match_detail.json");
static STREAKS_JSON: &str = include_str!("../tests/fixtures/streaks.json");
