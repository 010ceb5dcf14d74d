use liga_terminal::state::{
    apply_delta, AppState, Competition, Delta, LoadState, MatchDetailData, MatchRow, MatchStatus,
    PlayerInfo, Screen, StandingRow,
};

fn primera() -> Competition {
    Competition {
        id: 12,
        name: "Primera División".to_string(),
        season: "2025".to_string(),
        full_name: "Primera División - Clausura 2025".to_string(),
    }
}

fn sub20() -> Competition {
    Competition {
        id: 9,
        name: "Sub 20".to_string(),
        season: "2025".to_string(),
        full_name: "Sub 20 2025".to_string(),
    }
}

fn standing(team: &str, position: u32) -> StandingRow {
    StandingRow {
        team_id: position as i64,
        team: team.to_string(),
        played: 10,
        won: 5,
        drawn: 3,
        lost: 2,
        goals_for: 15,
        goals_against: 10,
        points: 18,
        position,
        recent: Vec::new(),
    }
}

fn fixture(id: i64, round: Option<&str>) -> MatchRow {
    MatchRow {
        id,
        home_team_id: 1,
        away_team_id: 2,
        home: "SAN JOSE OBRERO".to_string(),
        away: "LA FLORIDA".to_string(),
        date: None,
        status: MatchStatus::Scheduled,
        round: round.map(str::to_string),
        home_score: None,
        away_score: None,
        facility: None,
    }
}

fn detail(id: i64) -> MatchDetailData {
    MatchDetailData {
        id,
        home: "SAN JOSE OBRERO".to_string(),
        away: "LA FLORIDA".to_string(),
        home_score: Some(1),
        away_score: Some(0),
        date: None,
        status: MatchStatus::Finished,
        round: Some("Fecha 1".to_string()),
        facility: None,
        events: Vec::new(),
    }
}

fn seeded_state() -> AppState {
    let mut state = AppState::new();
    state.season = "2025".to_string();
    apply_delta(&mut state, Delta::SetCompetitions(vec![primera(), sub20()]));
    state
}

#[test]
fn competitions_land_on_the_primary_for_the_season() {
    let mut state = AppState::new();
    state.season = "2025".to_string();
    apply_delta(&mut state, Delta::SetCompetitions(vec![sub20(), primera()]));
    assert_eq!(state.current_competition_id(), Some(12));
}

#[test]
fn competitions_refresh_keeps_the_current_selection_by_id() {
    let mut state = seeded_state();
    state.cycle_competition_next();
    assert_eq!(state.current_competition_id(), Some(9));

    // same list, reordered; the selection follows the id, not the index
    apply_delta(&mut state, Delta::SetCompetitions(vec![sub20(), primera()]));
    assert_eq!(state.current_competition_id(), Some(9));
}

#[test]
fn competition_convention_miss_falls_back_to_the_first_entry() {
    let mut state = AppState::new();
    state.season = "2024".to_string();
    // no name-and-season match for 2024, so the first entry wins
    apply_delta(&mut state, Delta::SetCompetitions(vec![sub20(), primera()]));
    assert_eq!(state.current_competition_id(), Some(9));
}

#[test]
fn an_empty_competition_list_leaves_no_selection() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::SetCompetitions(Vec::new()));
    assert_eq!(state.competitions_load, LoadState::Loaded);
    assert!(state.current_competition().is_none());
}

#[test]
fn standings_for_a_left_competition_are_discarded() {
    let mut state = seeded_state();
    state.cycle_competition_next();

    // late answer for the competition the user already left
    apply_delta(
        &mut state,
        Delta::SetStandings {
            competition_id: 12,
            zone: None,
            rows: vec![standing("SAN JOSE OBRERO", 1)],
        },
    );
    assert!(state.standings.is_empty());
    assert_eq!(state.standings_load, LoadState::Idle);

    apply_delta(
        &mut state,
        Delta::SetStandings {
            competition_id: 9,
            zone: None,
            rows: vec![standing("LA FLORIDA", 1)],
        },
    );
    assert_eq!(state.standings.len(), 1);
    assert_eq!(state.standings_load, LoadState::Loaded);
}

#[test]
fn standings_for_a_left_zone_are_discarded() {
    let mut state = seeded_state();
    apply_delta(
        &mut state,
        Delta::SetZones {
            competition_id: 12,
            zones: vec!["NORTE".to_string(), "SUR".to_string()],
        },
    );
    state.cycle_zone_next();
    assert_eq!(state.current_zone(), Some("NORTE"));

    apply_delta(
        &mut state,
        Delta::SetStandings {
            competition_id: 12,
            zone: None,
            rows: vec![standing("SAN JOSE OBRERO", 1)],
        },
    );
    assert!(state.standings.is_empty());

    apply_delta(
        &mut state,
        Delta::SetStandings {
            competition_id: 12,
            zone: Some("NORTE".to_string()),
            rows: vec![standing("SAN JOSE OBRERO", 1)],
        },
    );
    assert_eq!(state.standings.len(), 1);
}

#[test]
fn failure_deltas_are_tagged_like_results() {
    let mut state = seeded_state();
    state.cycle_competition_next();

    apply_delta(
        &mut state,
        Delta::StandingsFailed {
            competition_id: 12,
            zone: None,
            error: "http 500".to_string(),
        },
    );
    assert_eq!(state.standings_load, LoadState::Idle);

    apply_delta(
        &mut state,
        Delta::StandingsFailed {
            competition_id: 9,
            zone: None,
            error: "http 500".to_string(),
        },
    );
    assert_eq!(state.standings_load.error(), Some("http 500"));
}

#[test]
fn zones_refresh_clamps_a_stale_zone_selection() {
    let mut state = seeded_state();
    apply_delta(
        &mut state,
        Delta::SetZones {
            competition_id: 12,
            zones: vec!["NORTE".to_string(), "SUR".to_string()],
        },
    );
    state.zone_selected = 2;

    apply_delta(
        &mut state,
        Delta::SetZones {
            competition_id: 12,
            zones: vec!["NORTE".to_string()],
        },
    );
    assert_eq!(state.zone_selected, 0);
    assert_eq!(state.current_zone(), None);
}

#[test]
fn matches_refresh_keeps_the_active_round_tab() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::SetMatches {
            rows: vec![fixture(1, Some("Fecha 1")), fixture(2, Some("Fecha 2"))],
            rounds: Vec::new(),
        },
    );
    state.select_round_next();
    assert_eq!(state.current_round_label().as_deref(), Some("Fecha 2"));

    apply_delta(
        &mut state,
        Delta::SetMatches {
            rows: vec![
                fixture(1, Some("Fecha 1")),
                fixture(2, Some("Fecha 2")),
                fixture(3, Some("Fecha 3")),
            ],
            rounds: Vec::new(),
        },
    );
    assert_eq!(state.current_round_label().as_deref(), Some("Fecha 2"));
}

#[test]
fn day_matches_for_a_left_day_are_discarded() {
    let mut state = AppState::new();
    state.calendar_year = 2025;
    state.calendar_month = 3;
    apply_delta(
        &mut state,
        Delta::SetCalendarDays {
            year: 2025,
            month: 3,
            days: vec![3, 8],
        },
    );
    assert_eq!(state.selected_calendar_date().as_deref(), Some("2025-03-03"));

    apply_delta(
        &mut state,
        Delta::SetDayMatches {
            date: "2025-03-03".to_string(),
            rows: vec![fixture(1, None)],
        },
    );
    assert_eq!(state.day_matches.len(), 1);

    state.select_calendar_day_next();
    assert_eq!(state.selected_calendar_date().as_deref(), Some("2025-03-08"));
    assert!(state.day_matches.is_empty());

    // the old day's answer straggles in after the cursor moved
    apply_delta(
        &mut state,
        Delta::SetDayMatches {
            date: "2025-03-03".to_string(),
            rows: vec![fixture(1, None), fixture(2, None)],
        },
    );
    assert!(state.day_matches.is_empty());
    assert_eq!(state.day_matches_load, LoadState::Idle);
}

#[test]
fn calendar_days_for_a_left_month_are_discarded() {
    let mut state = AppState::new();
    state.calendar_year = 2025;
    state.calendar_month = 3;
    apply_delta(
        &mut state,
        Delta::SetCalendarDays {
            year: 2025,
            month: 2,
            days: vec![9, 16],
        },
    );
    assert!(state.calendar_days.is_empty());
    assert_eq!(state.calendar_load, LoadState::Idle);
}

#[test]
fn match_detail_memoizes_even_after_the_user_left() {
    let mut state = AppState::new();
    state.screen = Screen::Fixture;
    apply_delta(
        &mut state,
        Delta::SetMatchDetail {
            match_id: 7,
            detail: detail(7),
        },
    );
    // the memo fills, the visible pane does not change
    assert!(state.detail_for(7).is_some());
    assert_eq!(state.match_detail_load, LoadState::Idle);
}

#[test]
fn match_detail_failure_for_another_match_is_ignored() {
    let mut state = AppState::new();
    state.screen = Screen::MatchDetail { match_id: 9 };
    apply_delta(
        &mut state,
        Delta::MatchDetailFailed {
            match_id: 7,
            error: "http 500".to_string(),
        },
    );
    assert_eq!(state.match_detail_load, LoadState::Idle);

    apply_delta(
        &mut state,
        Delta::MatchDetailFailed {
            match_id: 9,
            error: "http 500".to_string(),
        },
    );
    assert_eq!(state.match_detail_load.error(), Some("http 500"));
}

#[test]
fn player_answers_for_a_superseded_request_are_discarded() {
    let mut state = AppState::new();
    state.player_last_id = Some(2);

    apply_delta(
        &mut state,
        Delta::SetPlayer {
            player_id: 1,
            info: PlayerInfo {
                id: 1,
                name: "L. Gomez".to_string(),
            },
            goals: Vec::new(),
            sanctions: Vec::new(),
        },
    );
    assert!(state.player.is_none());

    apply_delta(
        &mut state,
        Delta::SetPlayer {
            player_id: 2,
            info: PlayerInfo {
                id: 2,
                name: "D. Paredes".to_string(),
            },
            goals: Vec::new(),
            sanctions: Vec::new(),
        },
    );
    assert_eq!(state.player.as_ref().map(|p| p.id), Some(2));
    assert_eq!(state.player_load, LoadState::Loaded);
}

#[test]
fn dismiss_clears_failures_on_the_active_screen_only() {
    let mut state = AppState::new();
    state.screen = Screen::Standings;
    state.standings_load = LoadState::Failed("http 500".to_string());
    state.zones_load = LoadState::Loaded;
    state.matches_load = LoadState::Failed("timeout".to_string());

    state.dismiss_failures();
    assert_eq!(state.standings_load, LoadState::Idle);
    assert_eq!(state.zones_load, LoadState::Loaded);
    // another screen's failure stays until dismissed there
    assert_eq!(state.matches_load.error(), Some("timeout"));
}

#[test]
fn log_deltas_append_to_the_console() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::Log("[INFO] Partidos: 42".to_string()));
    assert_eq!(state.logs.back().map(String::as_str), Some("[INFO] Partidos: 42"));
}
