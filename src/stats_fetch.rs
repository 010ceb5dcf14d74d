use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::{get_text, non_null_json};
use crate::league_fetch::{parse_api_date, parse_event_kind};
use crate::state::{
    CardTotals, CleanSheetRow, GoalsByMinute, PlayerGoalRow, PlayerInfo, PlayerSanctionEvent,
    SanctionRank, ScorerRow, StreakRow,
};

pub const TOP_SCORERS_LIMIT: u32 = 10;

pub fn fetch_top_scorers(
    competition_id: i64,
    zone: Option<&str>,
    limit: u32,
) -> Result<Vec<ScorerRow>> {
    let body = get_text(
        &format!("/api/top-scorers/{competition_id}"),
        &[
            ("zone", zone.map(str::to_string)),
            ("limit", Some(limit.to_string())),
        ],
    )?;
    parse_top_scorers_json(&body)
}

pub fn fetch_card_totals(competition_id: i64) -> Result<Vec<CardTotals>> {
    let body = get_text(
        "/api/stats/cards-by-team",
        &[("competition_id", Some(competition_id.to_string()))],
    )?;
    parse_card_totals_json(&body)
}

pub fn fetch_sanction_ranking(
    competition_id: i64,
    zone: Option<&str>,
) -> Result<Vec<SanctionRank>> {
    let body = get_text(
        &format!("/api/stats/player-sanctions/{competition_id}"),
        &[("zone", zone.map(str::to_string))],
    )?;
    parse_sanction_ranking_json(&body)
}

pub fn fetch_clean_sheets(
    competition_id: i64,
    zone: Option<&str>,
) -> Result<Vec<CleanSheetRow>> {
    let body = get_text(
        &format!("/api/stats/clean-sheets/{competition_id}"),
        &[("zone", zone.map(str::to_string))],
    )?;
    parse_clean_sheets_json(&body)
}

pub fn fetch_streaks(competition_id: i64) -> Result<Vec<StreakRow>> {
    let body = get_text(
        "/api/stats/streaks",
        &[("competition_id", Some(competition_id.to_string()))],
    )?;
    parse_streaks_json(&body)
}

pub fn fetch_goals_by_minute() -> Result<GoalsByMinute> {
    let body = get_text("/api/stats/goals-by-minute", &[])?;
    parse_goals_by_minute_json(&body)
}

pub fn fetch_player(player_id: i64) -> Result<PlayerInfo> {
    let body = get_text(&format!("/api/player/{player_id}"), &[])?;
    parse_player_json(&body)
}

pub fn fetch_player_goals(player_id: i64) -> Result<Vec<PlayerGoalRow>> {
    let body = get_text(&format!("/api/player/{player_id}/goals"), &[])?;
    parse_player_goals_json(&body)
}

pub fn fetch_player_sanctions(player_id: i64) -> Result<Vec<PlayerSanctionEvent>> {
    let body = get_text(&format!("/api/player/{player_id}/sanctions"), &[])?;
    parse_player_sanctions_json(&body)
}

#[derive(Debug, Deserialize)]
struct ApiScorer {
    player_name: String,
    team_name: String,
    goals: u32,
}

#[derive(Debug, Deserialize)]
struct ApiCardTotals {
    team_name: String,
    #[serde(default)]
    yellow_cards: u32,
    #[serde(default)]
    red_cards: u32,
}

#[derive(Debug, Deserialize)]
struct ApiSanctionRank {
    player_id: i64,
    player_name: String,
    team_name: String,
    #[serde(default)]
    yellow_cards: u32,
    #[serde(default)]
    red_cards: u32,
    #[serde(default)]
    total_cards: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiCleanSheet {
    team_id: i64,
    team_name: String,
    #[serde(default)]
    clean_sheets: u32,
    #[serde(default)]
    played: u32,
}

#[derive(Debug, Deserialize)]
struct ApiStreak {
    #[serde(default)]
    ganando: u32,
    #[serde(default)]
    invicto: u32,
}

#[derive(Debug, Deserialize)]
struct ApiGoalsByMinute {
    #[serde(default)]
    minutes: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiPlayer {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiPlayerGoal {
    match_id: i64,
    #[serde(default)]
    match_date: Option<String>,
    #[serde(default)]
    opponent_name: String,
    #[serde(default)]
    minute: u32,
    event_type: String,
    #[serde(default)]
    is_home_game: bool,
}

#[derive(Debug, Deserialize)]
struct ApiPlayerSanction {
    match_id: i64,
    #[serde(default)]
    match_date: Option<String>,
    #[serde(default)]
    opponent_name: String,
    #[serde(default)]
    minute: Option<u32>,
    event_type: String,
    #[serde(default)]
    sub_type: Option<String>,
    #[serde(default)]
    is_home_game: bool,
}

pub fn parse_top_scorers_json(raw: &str) -> Result<Vec<ScorerRow>> {
    let Some(value) = non_null_json(raw, "invalid top scorers payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiScorer> =
        serde_json::from_value(value).context("invalid top scorers payload")?;

    Ok(parsed
        .into_iter()
        .map(|scorer| ScorerRow {
            player: scorer.player_name,
            team: scorer.team_name,
            goals: scorer.goals,
        })
        .collect())
}

/// The server also ships per-team display fields here; those are dropped in
/// favor of the client-side display table.
pub fn parse_card_totals_json(raw: &str) -> Result<Vec<CardTotals>> {
    let Some(value) = non_null_json(raw, "invalid cards payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiCardTotals> =
        serde_json::from_value(value).context("invalid cards payload")?;

    Ok(parsed
        .into_iter()
        .map(|entry| CardTotals {
            team: entry.team_name,
            yellow: entry.yellow_cards,
            red: entry.red_cards,
        })
        .collect())
}

pub fn parse_sanction_ranking_json(raw: &str) -> Result<Vec<SanctionRank>> {
    let Some(value) = non_null_json(raw, "invalid sanctions payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiSanctionRank> =
        serde_json::from_value(value).context("invalid sanctions payload")?;

    Ok(parsed
        .into_iter()
        .map(|entry| {
            let total = entry
                .total_cards
                .unwrap_or(entry.yellow_cards + entry.red_cards);
            SanctionRank {
                player_id: entry.player_id,
                player: entry.player_name,
                team: entry.team_name,
                yellow: entry.yellow_cards,
                red: entry.red_cards,
                total,
            }
        })
        .collect())
}

pub fn parse_clean_sheets_json(raw: &str) -> Result<Vec<CleanSheetRow>> {
    let Some(value) = non_null_json(raw, "invalid clean sheets payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiCleanSheet> =
        serde_json::from_value(value).context("invalid clean sheets payload")?;

    Ok(parsed
        .into_iter()
        .map(|entry| CleanSheetRow {
            team_id: entry.team_id,
            team: entry.team_name,
            clean_sheets: entry.clean_sheets,
            played: entry.played,
        })
        .collect())
}

/// The wire shape is a map keyed by team name, so arrival order carries no
/// meaning; rows are ordered here: longest unbeaten run first, then longest
/// winning run, then name.
pub fn parse_streaks_json(raw: &str) -> Result<Vec<StreakRow>> {
    let Some(value) = non_null_json(raw, "invalid streaks payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_object() {
        return Ok(Vec::new());
    }
    let parsed: HashMap<String, ApiStreak> =
        serde_json::from_value(value).context("invalid streaks payload")?;

    let mut rows: Vec<StreakRow> = parsed
        .into_iter()
        .map(|(team, streak)| StreakRow {
            team,
            winning: streak.ganando,
            unbeaten: streak.invicto,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.unbeaten
            .cmp(&a.unbeaten)
            .then_with(|| b.winning.cmp(&a.winning))
            .then_with(|| a.team.cmp(&b.team))
    });
    Ok(rows)
}

pub fn parse_goals_by_minute_json(raw: &str) -> Result<GoalsByMinute> {
    let Some(value) = non_null_json(raw, "invalid goals by minute payload")? else {
        return Ok(GoalsByMinute::default());
    };
    let parsed: ApiGoalsByMinute =
        serde_json::from_value(value).context("invalid goals by minute payload")?;
    Ok(GoalsByMinute {
        minutes: parsed.minutes,
    })
}

pub fn parse_player_json(raw: &str) -> Result<PlayerInfo> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        anyhow::bail!("empty player payload");
    }
    let parsed: ApiPlayer = serde_json::from_str(trimmed).context("invalid player payload")?;
    Ok(PlayerInfo {
        id: parsed.id,
        name: parsed.name,
    })
}

pub fn parse_player_goals_json(raw: &str) -> Result<Vec<PlayerGoalRow>> {
    let Some(value) = non_null_json(raw, "invalid player goals payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiPlayerGoal> =
        serde_json::from_value(value).context("invalid player goals payload")?;

    Ok(parsed
        .into_iter()
        .filter_map(|entry| {
            let kind = parse_event_kind(&entry.event_type)?;
            Some(PlayerGoalRow {
                match_id: entry.match_id,
                date: entry.match_date.as_deref().and_then(parse_api_date),
                opponent: entry.opponent_name,
                minute: entry.minute,
                kind,
                home_game: entry.is_home_game,
            })
        })
        .collect())
}

pub fn parse_player_sanctions_json(raw: &str) -> Result<Vec<PlayerSanctionEvent>> {
    let Some(value) = non_null_json(raw, "invalid player sanctions payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiPlayerSanction> =
        serde_json::from_value(value).context("invalid player sanctions payload")?;

    Ok(parsed
        .into_iter()
        .filter_map(|entry| {
            let kind = parse_event_kind(&entry.event_type)?;
            Some(PlayerSanctionEvent {
                match_id: entry.match_id,
                date: entry.match_date.as_deref().and_then(parse_api_date),
                opponent: entry.opponent_name,
                minute: entry.minute,
                kind,
                detail: entry.sub_type,
                home_game: entry.is_home_game,
            })
        })
        .collect())
}
