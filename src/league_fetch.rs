use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::api::{get_text, non_null_json};
use crate::state::{
    Competition, EventKind, MatchDetailData, MatchEvent, MatchRow, MatchStatus, RecentResult,
    StandingRow,
};

pub fn fetch_competitions() -> Result<Vec<Competition>> {
    let body = get_text("/api/competitions", &[])?;
    parse_competitions_json(&body)
}

pub fn fetch_zones(competition_id: i64) -> Result<Vec<String>> {
    let body = get_text(&format!("/api/competitions/{competition_id}/zones"), &[])?;
    parse_zones_json(&body)
}

/// Plain standings, optionally narrowed to one zone. Which matches count
/// toward a zone (including interzonal pairings) is the server's call; the
/// client only forwards the filter.
pub fn fetch_standings(competition_id: i64, zone: Option<&str>) -> Result<Vec<StandingRow>> {
    let body = get_text(
        &format!("/api/standings/{competition_id}"),
        &[("zone", zone.map(str::to_string))],
    )?;
    parse_standings_json(&body)
}

/// Standings with the trailing-results sequence per team.
pub fn fetch_standings_extended(competition_id: i64) -> Result<Vec<StandingRow>> {
    let body = get_text(&format!("/api/standings-extended/{competition_id}"), &[])?;
    parse_standings_json(&body)
}

pub fn fetch_matches(date: Option<&str>, team_id: Option<i64>) -> Result<Vec<MatchRow>> {
    let body = get_text(
        "/api/matches",
        &[
            ("date", date.map(str::to_string)),
            ("team_id", team_id.map(|id| id.to_string())),
        ],
    )?;
    parse_matches_json(&body)
}

pub fn fetch_rounds() -> Result<Vec<String>> {
    let body = get_text("/api/rounds", &[])?;
    parse_rounds_json(&body)
}

/// Days of the given month that have at least one scheduled match.
pub fn fetch_calendar_days(year: i32, month: u32) -> Result<Vec<u32>> {
    let body = get_text(
        "/api/calendar-matches",
        &[
            ("year", Some(year.to_string())),
            ("month", Some(month.to_string())),
        ],
    )?;
    parse_calendar_days_json(&body)
}

pub fn fetch_match_detail(match_id: i64) -> Result<MatchDetailData> {
    let body = get_text(&format!("/api/match-detail/{match_id}"), &[])?;
    parse_match_detail_json(&body)
}

#[derive(Debug, Deserialize)]
struct ApiCompetition {
    id: i64,
    name: String,
    season: String,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiTeamRef {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiStanding {
    team: ApiTeamRef,
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    points: i32,
    position: u32,
    #[serde(default)]
    recent_results: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    id: i64,
    home_team: ApiTeamRef,
    away_team: ApiTeamRef,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    round: Option<String>,
    #[serde(default)]
    home_score: Option<u32>,
    #[serde(default)]
    away_score: Option<u32>,
    #[serde(default)]
    facility: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMatchDetail {
    #[serde(rename = "match")]
    info: ApiMatchInfo,
    #[serde(default)]
    events: Vec<ApiMatchEvent>,
}

#[derive(Debug, Deserialize)]
struct ApiMatchInfo {
    id: i64,
    home_team: String,
    away_team: String,
    #[serde(default)]
    home_score: Option<u32>,
    #[serde(default)]
    away_score: Option<u32>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    round: Option<String>,
    #[serde(default)]
    facility: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMatchEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    minute: Option<u32>,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    player: Option<String>,
    #[serde(default)]
    team: Option<String>,
    #[serde(default)]
    is_home: Option<bool>,
    #[serde(default)]
    sub_type: Option<String>,
    #[serde(default)]
    stoppage_time: Option<u32>,
    #[serde(default)]
    accumulated_yellow: Option<u32>,
}

pub fn parse_competitions_json(raw: &str) -> Result<Vec<Competition>> {
    let Some(value) = non_null_json(raw, "invalid competitions payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiCompetition> =
        serde_json::from_value(value).context("invalid competitions payload")?;

    Ok(parsed
        .into_iter()
        .map(|comp| {
            let full_name = comp
                .full_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| format!("{} {}", comp.name, comp.season));
            Competition {
                id: comp.id,
                name: comp.name,
                season: comp.season,
                full_name,
            }
        })
        .collect())
}

pub fn parse_zones_json(raw: &str) -> Result<Vec<String>> {
    let Some(value) = non_null_json(raw, "invalid zones payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let zones: Vec<String> = serde_json::from_value(value).context("invalid zones payload")?;
    Ok(zones
        .into_iter()
        .map(|zone| zone.trim().to_string())
        .filter(|zone| !zone.is_empty())
        .collect())
}

/// Covers both the plain and the extended endpoints; rows without a
/// `recent_results` field parse with an empty sequence.
pub fn parse_standings_json(raw: &str) -> Result<Vec<StandingRow>> {
    let Some(value) = non_null_json(raw, "invalid standings payload")? else {
        return Ok(Vec::new());
    };
    // a lookup miss answers with an error object instead of rows
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiStanding> =
        serde_json::from_value(value).context("invalid standings payload")?;

    Ok(parsed.into_iter().map(build_standing_row).collect())
}

pub fn parse_matches_json(raw: &str) -> Result<Vec<MatchRow>> {
    let Some(value) = non_null_json(raw, "invalid matches payload")? else {
        return Ok(Vec::new());
    };
    // filters with no hits answer with a message object instead of rows
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let parsed: Vec<ApiMatch> = serde_json::from_value(value).context("invalid matches payload")?;

    Ok(parsed.into_iter().map(build_match_row).collect())
}

pub fn parse_rounds_json(raw: &str) -> Result<Vec<String>> {
    let Some(value) = non_null_json(raw, "invalid rounds payload")? else {
        return Ok(Vec::new());
    };
    let Some(items) = value.as_array() else {
        return Ok(Vec::new());
    };

    let mut labels = Vec::new();
    for item in items {
        if let Some(label) = item.as_str() {
            let label = label.trim();
            if !label.is_empty() {
                labels.push(label.to_string());
            }
        }
    }
    Ok(labels)
}

pub fn parse_calendar_days_json(raw: &str) -> Result<Vec<u32>> {
    let Some(value) = non_null_json(raw, "invalid calendar payload")? else {
        return Ok(Vec::new());
    };
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let mut days: Vec<u32> = serde_json::from_value(value).context("invalid calendar payload")?;
    days.sort_unstable();
    days.dedup();
    Ok(days)
}

pub fn parse_match_detail_json(raw: &str) -> Result<MatchDetailData> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        anyhow::bail!("empty match detail payload");
    }
    let parsed: ApiMatchDetail =
        serde_json::from_str(trimmed).context("invalid match detail payload")?;

    let mut events: Vec<MatchEvent> = parsed
        .events
        .into_iter()
        .filter_map(build_match_event)
        .collect();
    events.sort_by_key(|event| event.minute);

    let info = parsed.info;
    Ok(MatchDetailData {
        id: info.id,
        home: info.home_team,
        away: info.away_team,
        home_score: info.home_score,
        away_score: info.away_score,
        date: info.date.as_deref().and_then(parse_api_date),
        status: parse_match_status(info.status.as_deref()),
        round: info.round,
        facility: info.facility,
        events,
    })
}

fn build_standing_row(entry: ApiStanding) -> StandingRow {
    let recent = entry
        .recent_results
        .iter()
        .filter_map(|code| parse_recent_result(code))
        .collect();

    StandingRow {
        team_id: entry.team.id,
        team: entry.team.name,
        played: entry.played,
        won: entry.won,
        drawn: entry.drawn,
        lost: entry.lost,
        goals_for: entry.goals_for,
        goals_against: entry.goals_against,
        points: entry.points,
        position: entry.position,
        recent,
    }
}

fn build_match_row(fixture: ApiMatch) -> MatchRow {
    let round = fixture
        .round
        .map(|label| label.trim().to_string())
        .filter(|label| !label.is_empty());

    MatchRow {
        id: fixture.id,
        home_team_id: fixture.home_team.id,
        away_team_id: fixture.away_team.id,
        home: fixture.home_team.name,
        away: fixture.away_team.name,
        date: fixture.date.as_deref().and_then(parse_api_date),
        status: parse_match_status(fixture.status.as_deref()),
        round,
        home_score: fixture.home_score,
        away_score: fixture.away_score,
        facility: fixture.facility,
    }
}

fn build_match_event(event: ApiMatchEvent) -> Option<MatchEvent> {
    let kind = parse_event_kind(&event.event_type)?;
    Some(MatchEvent {
        kind,
        minute: event.minute.unwrap_or(0),
        stoppage_time: event.stoppage_time,
        phase: event.phase,
        player: event.player.unwrap_or_default(),
        team: event.team.unwrap_or_default(),
        is_home: event.is_home.unwrap_or(true),
        detail: event.sub_type,
        accumulated_yellow: event.accumulated_yellow,
    })
}

/// Event feeds carry bookkeeping rows besides the six timeline kinds; those
/// are dropped here, not surfaced.
pub fn parse_event_kind(event_type: &str) -> Option<EventKind> {
    match event_type.trim() {
        "Goal" => Some(EventKind::Goal),
        "Own goal" => Some(EventKind::OwnGoal),
        "Penalty" => Some(EventKind::Penalty),
        "Yellow card" => Some(EventKind::YellowCard),
        "Red card" => Some(EventKind::RedCard),
        "Substitution" => Some(EventKind::Substitution),
        _ => None,
    }
}

pub fn parse_recent_result(code: &str) -> Option<RecentResult> {
    match code.trim() {
        "G" => Some(RecentResult::Win),
        "E" => Some(RecentResult::Draw),
        "P" => Some(RecentResult::Loss),
        _ => None,
    }
}

pub fn parse_match_status(raw: Option<&str>) -> MatchStatus {
    let lowered = raw.unwrap_or_default().to_lowercase();
    if lowered.contains("live") || lowered.contains("playing") || lowered.contains("progress") {
        MatchStatus::InProgress
    } else if lowered.contains("played")
        || lowered.contains("finished")
        || lowered.contains("final")
    {
        MatchStatus::Finished
    } else {
        MatchStatus::Scheduled
    }
}

/// Upstream timestamps come either as RFC 3339 or as a bare ISO datetime with
/// no offset; the bare form is taken as UTC.
pub fn parse_api_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
