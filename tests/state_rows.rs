use chrono::{DateTime, TimeZone, Utc};
use liga_terminal::state::{
    apply_delta, AppState, CardTotals, CardsColumn, Delta, LoadState, MatchRow, MatchStatus,
    SanctionRank, StreakRow,
};

fn fixture(id: i64, round: Option<&str>, date: Option<DateTime<Utc>>) -> MatchRow {
    MatchRow {
        id,
        home_team_id: 1,
        away_team_id: 2,
        home: "SAN JOSE OBRERO".to_string(),
        away: "LA FLORIDA".to_string(),
        date,
        status: MatchStatus::Scheduled,
        round: round.map(str::to_string),
        home_score: None,
        away_score: None,
        facility: None,
    }
}

fn cards(team: &str, yellow: u32, red: u32) -> CardTotals {
    CardTotals {
        team: team.to_string(),
        yellow,
        red,
    }
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 20, 0, 0).unwrap()
}

#[test]
fn round_tabs_merge_endpoint_and_observed_labels() {
    let mut state = AppState::new();
    state.rounds = vec!["Fecha 10".to_string(), "Fecha 2".to_string()];
    state.matches = vec![
        fixture(1, Some("Fecha 1"), None),
        fixture(2, None, None),
    ];
    assert_eq!(
        state.round_tabs(),
        vec![
            "Fecha 1".to_string(),
            "Fecha 2".to_string(),
            "Fecha 10".to_string(),
            "N/A".to_string(),
        ]
    );
}

#[test]
fn fixture_rows_follow_the_active_tab() {
    let mut state = AppState::new();
    state.matches = vec![
        fixture(1, Some("Fecha 1"), None),
        fixture(2, Some("Fecha 2"), None),
        fixture(3, Some("Fecha 1"), None),
    ];
    let ids: Vec<i64> = state.fixture_rows().iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![1, 3]);

    state.select_round_next();
    let ids: Vec<i64> = state.fixture_rows().iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn unlabelled_matches_gather_in_the_trailing_tab() {
    let mut state = AppState::new();
    state.matches = vec![fixture(1, Some("Fecha 1"), None), fixture(2, None, None)];
    state.round_selected = 1;
    assert_eq!(state.current_round_label().as_deref(), Some("N/A"));
    let ids: Vec<i64> = state.fixture_rows().iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn fixture_selection_clamps_when_the_list_shrinks() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetMatches {
            rows: vec![
                fixture(1, Some("Fecha 1"), None),
                fixture(2, Some("Fecha 1"), None),
                fixture(3, Some("Fecha 1"), None),
            ],
            rounds: Vec::new(),
        },
    );
    state.select_fixture_next();
    state.select_fixture_next();
    assert_eq!(state.selected_fixture().map(|row| row.id), Some(3));

    apply_delta(
        &mut state,
        Delta::SetMatches {
            rows: vec![
                fixture(1, Some("Fecha 1"), None),
                fixture(2, Some("Fecha 1"), None),
            ],
            rounds: Vec::new(),
        },
    );
    assert_eq!(state.selected_fixture().map(|row| row.id), Some(2));
}

#[test]
fn cards_rows_rank_by_total_by_default() {
    let mut state = AppState::new();
    state.cards = vec![
        cards("SANTA ANA", 21, 0),
        cards("CHACARITA", 24, 3),
        cards("FERROCARRIL", 19, 5),
    ];
    let teams: Vec<&str> = state
        .cards_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["CHACARITA", "FERROCARRIL", "SANTA ANA"]);
}

#[test]
fn cards_sort_ties_keep_server_order() {
    let mut state = AppState::new();
    state.cards = vec![cards("CHACARITA", 10, 2), cards("FERROCARRIL", 9, 3)];
    let teams: Vec<&str> = state
        .cards_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["CHACARITA", "FERROCARRIL"]);

    // flipping direction must not reorder equal totals either
    state.toggle_cards_sort(CardsColumn::Total);
    let teams: Vec<&str> = state
        .cards_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["CHACARITA", "FERROCARRIL"]);
}

#[test]
fn toggling_the_active_cards_column_flips_direction() {
    let mut state = AppState::new();
    state.cards = vec![cards("CHACARITA", 24, 3), cards("SANTA ANA", 21, 0)];

    state.toggle_cards_sort(CardsColumn::Total);
    let teams: Vec<&str> = state
        .cards_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["SANTA ANA", "CHACARITA"]);

    // a new column starts descending again
    state.toggle_cards_sort(CardsColumn::Team);
    let teams: Vec<&str> = state
        .cards_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["SANTA ANA", "CHACARITA"]);
}

#[test]
fn streak_rows_hide_streaks_not_worth_announcing() {
    let mut state = AppState::new();
    state.streaks = vec![
        StreakRow {
            team: "SAN JOSE OBRERO".to_string(),
            winning: 2,
            unbeaten: 2,
        },
        StreakRow {
            team: "SANTA ROSA".to_string(),
            winning: 1,
            unbeaten: 2,
        },
    ];
    let teams: Vec<&str> = state
        .streak_rows()
        .iter()
        .map(|row| row.team.as_str())
        .collect();
    assert_eq!(teams, vec!["SAN JOSE OBRERO"]);
}

#[test]
fn almanac_groups_newest_month_first_and_dateless_last() {
    let mut state = AppState::new();
    state.matches = vec![
        fixture(1, None, Some(at(2025, 3, 16))),
        fixture(2, None, Some(at(2025, 4, 6))),
        fixture(3, None, None),
        fixture(4, None, Some(at(2025, 4, 13))),
    ];
    let groups = state.almanac_groups();
    let labels: Vec<&str> = groups.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec!["ABRIL 2025", "MARZO 2025", "SIN FECHA"]);
    assert_eq!(groups[0].1.len(), 2);
    // inside a month, newest first
    assert_eq!(groups[0].1[0].id, 4);
}

#[test]
fn sanction_selection_wraps_both_ways() {
    let mut state = AppState::new();
    state.sanctions = vec![
        SanctionRank {
            player_id: 501,
            player: "D. Paredes".to_string(),
            team: "CHACARITA".to_string(),
            yellow: 7,
            red: 1,
            total: 8,
        },
        SanctionRank {
            player_id: 502,
            player: "E. Sosa".to_string(),
            team: "FERROCARRIL".to_string(),
            yellow: 5,
            red: 2,
            total: 7,
        },
    ];
    state.select_sanction_prev();
    assert_eq!(state.selected_sanction().map(|r| r.player_id), Some(502));
    state.select_sanction_next();
    assert_eq!(state.selected_sanction().map(|r| r.player_id), Some(501));
}

#[test]
fn zone_cycle_drops_zone_scoped_panels_only() {
    let mut state = AppState::new();
    state.zones = vec!["NORTE".to_string()];
    state.standings_load = LoadState::Loaded;
    state.scorers_load = LoadState::Loaded;
    state.cards_load = LoadState::Loaded;
    state.streaks_load = LoadState::Loaded;

    state.cycle_zone_next();
    assert_eq!(state.current_zone(), Some("NORTE"));
    assert_eq!(state.standings_load, LoadState::Idle);
    assert_eq!(state.scorers_load, LoadState::Idle);
    // league-wide panels survive a zone change
    assert_eq!(state.cards_load, LoadState::Loaded);
    assert_eq!(state.streaks_load, LoadState::Loaded);
}

#[test]
fn calendar_months_wrap_across_year_ends() {
    let mut state = AppState::new();
    state.calendar_year = 2025;
    state.calendar_month = 12;
    state.calendar_days = vec![7, 14];
    state.calendar_load = LoadState::Loaded;

    state.calendar_next_month();
    assert_eq!((state.calendar_year, state.calendar_month), (2026, 1));
    assert!(state.calendar_days.is_empty());
    assert_eq!(state.calendar_load, LoadState::Idle);

    state.calendar_prev_month();
    assert_eq!((state.calendar_year, state.calendar_month), (2025, 12));
}
