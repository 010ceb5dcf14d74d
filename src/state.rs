use std::collections::{HashMap, VecDeque};
use std::env;

use chrono::{DateTime, Datelike, Utc};

use crate::aggregate::{
    TableSort, UNKNOWN_DATE, UNKNOWN_ROUND, group_by, month_key, month_label, sort_round_labels,
    sort_rows_by,
};
use crate::team_display::TeamDisplayTable;

pub const DEFAULT_SEASON: &str = "2025";
/// Competition the UI lands on when the fetched list contains it for the
/// configured season.
pub const PRIMARY_COMPETITION_NAME: &str = "PRIMERA DIVISIÓN";

pub fn season_env_or_default() -> String {
    env::var("LIGA_SEASON")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|season| !season.is_empty())
        .unwrap_or_else(|| DEFAULT_SEASON.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Standings,
    Fixture,
    Stats,
    Calendar,
    MatchDetail { match_id: i64 },
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsTab {
    Cards,
    Scorers,
    Sanctions,
    Streaks,
    CleanSheets,
    Minutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    Month,
    Almanac,
}

/// Lifecycle of one fetched panel. `Failed` keeps the message until the user
/// dismisses it or a new request supersedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardsColumn {
    Team,
    Yellow,
    Red,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentResult {
    Win,
    Draw,
    Loss,
}

impl RecentResult {
    pub fn code(self) -> &'static str {
        match self {
            RecentResult::Win => "G",
            RecentResult::Draw => "E",
            RecentResult::Loss => "P",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Goal,
    OwnGoal,
    Penalty,
    YellowCard,
    RedCard,
    Substitution,
}

impl EventKind {
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Goal => "GOL",
            EventKind::OwnGoal => "GOL (EC)",
            EventKind::Penalty => "PENAL",
            EventKind::YellowCard => "AMARILLA",
            EventKind::RedCard => "ROJA",
            EventKind::Substitution => "CAMBIO",
        }
    }

    pub fn is_goal(self) -> bool {
        matches!(
            self,
            EventKind::Goal | EventKind::OwnGoal | EventKind::Penalty
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub season: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: i64,
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: i32,
    pub position: u32,
    /// Outcome codes of the trailing matches, oldest first, most recent last.
    pub recent: Vec<RecentResult>,
}

impl StandingRow {
    pub fn goal_diff(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home: String,
    pub away: String,
    pub date: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    pub round: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub facility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvent {
    pub kind: EventKind,
    pub minute: u32,
    pub stoppage_time: Option<u32>,
    pub phase: Option<String>,
    pub player: String,
    pub team: String,
    pub is_home: bool,
    pub detail: Option<String>,
    pub accumulated_yellow: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetailData {
    pub id: i64,
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub date: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    pub round: Option<String>,
    pub facility: Option<String>,
    pub events: Vec<MatchEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRow {
    pub player: String,
    pub team: String,
    pub goals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTotals {
    pub team: String,
    pub yellow: u32,
    pub red: u32,
}

impl CardTotals {
    pub fn total(&self) -> u32 {
        self.yellow + self.red
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanctionRank {
    pub player_id: i64,
    pub player: String,
    pub team: String,
    pub yellow: u32,
    pub red: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSheetRow {
    pub team_id: i64,
    pub team: String,
    pub clean_sheets: u32,
    pub played: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakRow {
    pub team: String,
    pub winning: u32,
    pub unbeaten: u32,
}

impl StreakRow {
    /// A streak earns a row once it is worth announcing: two straight wins or
    /// three matches unbeaten.
    pub fn is_notable(&self) -> bool {
        self.winning >= 2 || self.unbeaten >= 3
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalsByMinute {
    pub minutes: Vec<u32>,
}

impl GoalsByMinute {
    pub fn peak(&self) -> u32 {
        self.minutes.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerGoalRow {
    pub match_id: i64,
    pub date: Option<DateTime<Utc>>,
    pub opponent: String,
    pub minute: u32,
    pub kind: EventKind,
    pub home_game: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSanctionEvent {
    pub match_id: i64,
    pub date: Option<DateTime<Utc>>,
    pub opponent: String,
    pub minute: Option<u32>,
    pub kind: EventKind,
    pub detail: Option<String>,
    pub home_game: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub season: String,
    pub display: TeamDisplayTable,

    pub competitions: Vec<Competition>,
    pub competitions_load: LoadState,
    pub competition_selected: usize,

    pub zones: Vec<String>,
    pub zones_load: LoadState,
    /// 0 is the General table; `n > 0` selects `zones[n - 1]`.
    pub zone_selected: usize,

    pub standings: Vec<StandingRow>,
    pub standings_load: LoadState,

    pub matches: Vec<MatchRow>,
    pub matches_load: LoadState,
    pub rounds: Vec<String>,
    pub round_selected: usize,
    pub fixture_selected: usize,

    pub stats_tab: StatsTab,
    pub cards: Vec<CardTotals>,
    pub cards_load: LoadState,
    pub cards_sort: TableSort<CardsColumn>,
    pub scorers: Vec<ScorerRow>,
    pub scorers_load: LoadState,
    pub sanctions: Vec<SanctionRank>,
    pub sanctions_load: LoadState,
    pub sanctions_selected: usize,
    pub streaks: Vec<StreakRow>,
    pub streaks_load: LoadState,
    pub clean_sheets: Vec<CleanSheetRow>,
    pub clean_sheets_load: LoadState,
    pub goal_minutes: GoalsByMinute,
    pub goal_minutes_load: LoadState,

    pub calendar_mode: CalendarMode,
    pub calendar_year: i32,
    pub calendar_month: u32,
    pub calendar_days: Vec<u32>,
    pub calendar_load: LoadState,
    pub calendar_day_selected: usize,
    pub day_matches: Vec<MatchRow>,
    pub day_matches_load: LoadState,
    pub day_match_selected: usize,
    pub almanac_scroll: u16,

    /// One-session memo: a detail fetched once is not fetched again until the
    /// program restarts or a manual refresh clears it.
    pub match_detail: HashMap<i64, MatchDetailData>,
    pub match_detail_load: LoadState,
    pub detail_back: Screen,
    pub detail_scroll: u16,

    pub player: Option<PlayerInfo>,
    pub player_goals: Vec<PlayerGoalRow>,
    pub player_sanctions: Vec<PlayerSanctionEvent>,
    pub player_load: LoadState,
    pub player_last_id: Option<i64>,

    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let today = Utc::now();
        Self {
            screen: Screen::Standings,
            season: season_env_or_default(),
            display: TeamDisplayTable::default(),
            competitions: Vec::new(),
            competitions_load: LoadState::Idle,
            competition_selected: 0,
            zones: Vec::new(),
            zones_load: LoadState::Idle,
            zone_selected: 0,
            standings: Vec::new(),
            standings_load: LoadState::Idle,
            matches: Vec::with_capacity(128),
            matches_load: LoadState::Idle,
            rounds: Vec::new(),
            round_selected: 0,
            fixture_selected: 0,
            stats_tab: StatsTab::Cards,
            cards: Vec::new(),
            cards_load: LoadState::Idle,
            cards_sort: TableSort::descending(CardsColumn::Total),
            scorers: Vec::new(),
            scorers_load: LoadState::Idle,
            sanctions: Vec::new(),
            sanctions_load: LoadState::Idle,
            sanctions_selected: 0,
            streaks: Vec::new(),
            streaks_load: LoadState::Idle,
            clean_sheets: Vec::new(),
            clean_sheets_load: LoadState::Idle,
            goal_minutes: GoalsByMinute::default(),
            goal_minutes_load: LoadState::Idle,
            calendar_mode: CalendarMode::Month,
            calendar_year: today.year(),
            calendar_month: today.month(),
            calendar_days: Vec::new(),
            calendar_load: LoadState::Idle,
            calendar_day_selected: 0,
            day_matches: Vec::new(),
            day_matches_load: LoadState::Idle,
            day_match_selected: 0,
            almanac_scroll: 0,
            match_detail: HashMap::with_capacity(16),
            match_detail_load: LoadState::Idle,
            detail_back: Screen::Fixture,
            detail_scroll: 0,
            player: None,
            player_goals: Vec::new(),
            player_sanctions: Vec::new(),
            player_load: LoadState::Idle,
            player_last_id: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn current_competition(&self) -> Option<&Competition> {
        self.competitions.get(self.competition_selected)
    }

    pub fn current_competition_id(&self) -> Option<i64> {
        self.current_competition().map(|comp| comp.id)
    }

    /// `None` is the General table; zone standings otherwise.
    pub fn current_zone(&self) -> Option<&str> {
        if self.zone_selected == 0 {
            None
        } else {
            self.zones
                .get(self.zone_selected - 1)
                .map(String::as_str)
        }
    }

    pub fn zone_label(&self) -> String {
        match self.current_zone() {
            Some(zone) => zone.to_string(),
            None => "GENERAL".to_string(),
        }
    }

    pub fn cycle_competition_next(&mut self) {
        let total = self.competitions.len();
        if total == 0 {
            return;
        }
        self.competition_selected = (self.competition_selected + 1) % total;
        self.reset_competition_scope();
    }

    pub fn cycle_competition_prev(&mut self) {
        let total = self.competitions.len();
        if total == 0 {
            return;
        }
        self.competition_selected = if self.competition_selected == 0 {
            total - 1
        } else {
            self.competition_selected - 1
        };
        self.reset_competition_scope();
    }

    /// Everything scoped to a competition is dropped when the selection moves;
    /// the zone filter snaps back to General.
    fn reset_competition_scope(&mut self) {
        self.zones.clear();
        self.zones_load = LoadState::Idle;
        self.zone_selected = 0;
        self.standings.clear();
        self.standings_load = LoadState::Idle;
        self.reset_stats_scope();
        if let Some(comp) = self.current_competition() {
            let label = comp.full_name.clone();
            self.push_log(format!("[INFO] Competición: {label}"));
        }
    }

    fn reset_stats_scope(&mut self) {
        self.cards.clear();
        self.cards_load = LoadState::Idle;
        self.cards_sort = TableSort::descending(CardsColumn::Total);
        self.scorers.clear();
        self.scorers_load = LoadState::Idle;
        self.sanctions.clear();
        self.sanctions_load = LoadState::Idle;
        self.sanctions_selected = 0;
        self.streaks.clear();
        self.streaks_load = LoadState::Idle;
        self.clean_sheets.clear();
        self.clean_sheets_load = LoadState::Idle;
        self.goal_minutes = GoalsByMinute::default();
        self.goal_minutes_load = LoadState::Idle;
    }

    pub fn cycle_zone_next(&mut self) {
        let total = self.zones.len() + 1;
        self.zone_selected = (self.zone_selected + 1) % total;
        self.reset_zone_scope();
    }

    pub fn cycle_zone_prev(&mut self) {
        let total = self.zones.len() + 1;
        self.zone_selected = if self.zone_selected == 0 {
            total - 1
        } else {
            self.zone_selected - 1
        };
        self.reset_zone_scope();
    }

    fn reset_zone_scope(&mut self) {
        self.standings.clear();
        self.standings_load = LoadState::Idle;
        // zone-filtered stats drop with the filter; league-wide ones stay
        self.scorers.clear();
        self.scorers_load = LoadState::Idle;
        self.sanctions.clear();
        self.sanctions_load = LoadState::Idle;
        self.sanctions_selected = 0;
        self.clean_sheets.clear();
        self.clean_sheets_load = LoadState::Idle;
    }

    pub fn cycle_stats_tab_next(&mut self) {
        self.stats_tab = match self.stats_tab {
            StatsTab::Cards => StatsTab::Scorers,
            StatsTab::Scorers => StatsTab::Sanctions,
            StatsTab::Sanctions => StatsTab::Streaks,
            StatsTab::Streaks => StatsTab::CleanSheets,
            StatsTab::CleanSheets => StatsTab::Minutes,
            StatsTab::Minutes => StatsTab::Cards,
        };
    }

    pub fn cycle_stats_tab_prev(&mut self) {
        self.stats_tab = match self.stats_tab {
            StatsTab::Cards => StatsTab::Minutes,
            StatsTab::Scorers => StatsTab::Cards,
            StatsTab::Sanctions => StatsTab::Scorers,
            StatsTab::Streaks => StatsTab::Sanctions,
            StatsTab::CleanSheets => StatsTab::Streaks,
            StatsTab::Minutes => StatsTab::CleanSheets,
        };
    }

    pub fn toggle_calendar_mode(&mut self) {
        self.calendar_mode = match self.calendar_mode {
            CalendarMode::Month => CalendarMode::Almanac,
            CalendarMode::Almanac => CalendarMode::Month,
        };
        self.almanac_scroll = 0;
    }

    pub fn calendar_next_month(&mut self) {
        if self.calendar_month == 12 {
            self.calendar_month = 1;
            self.calendar_year += 1;
        } else {
            self.calendar_month += 1;
        }
        self.reset_calendar_scope();
    }

    pub fn calendar_prev_month(&mut self) {
        if self.calendar_month == 1 {
            self.calendar_month = 12;
            self.calendar_year -= 1;
        } else {
            self.calendar_month -= 1;
        }
        self.reset_calendar_scope();
    }

    fn reset_calendar_scope(&mut self) {
        self.calendar_days.clear();
        self.calendar_load = LoadState::Idle;
        self.calendar_day_selected = 0;
        self.reset_day_scope();
    }

    /// The day-match list follows the selected day; moving the cursor
    /// invalidates it so the shell refetches for the new date.
    fn reset_day_scope(&mut self) {
        self.day_matches.clear();
        self.day_matches_load = LoadState::Idle;
        self.day_match_selected = 0;
    }

    pub fn select_calendar_day_next(&mut self) {
        let total = self.calendar_days.len();
        if total == 0 {
            self.calendar_day_selected = 0;
            return;
        }
        self.calendar_day_selected = (self.calendar_day_selected + 1) % total;
        self.reset_day_scope();
    }

    pub fn select_calendar_day_prev(&mut self) {
        let total = self.calendar_days.len();
        if total == 0 {
            self.calendar_day_selected = 0;
            return;
        }
        if self.calendar_day_selected == 0 {
            self.calendar_day_selected = total - 1;
        } else {
            self.calendar_day_selected -= 1;
        }
        self.reset_day_scope();
    }

    pub fn select_day_match_next(&mut self) {
        let total = self.day_matches.len();
        if total == 0 {
            self.day_match_selected = 0;
            return;
        }
        self.day_match_selected = (self.day_match_selected + 1) % total;
    }

    pub fn select_day_match_prev(&mut self) {
        let total = self.day_matches.len();
        if total == 0 {
            self.day_match_selected = 0;
            return;
        }
        if self.day_match_selected == 0 {
            self.day_match_selected = total - 1;
        } else {
            self.day_match_selected -= 1;
        }
    }

    pub fn selected_day_match(&self) -> Option<&MatchRow> {
        self.day_matches.get(self.day_match_selected)
    }

    /// Date filter for the selected day, as the API expects it.
    pub fn selected_calendar_date(&self) -> Option<String> {
        let day = self.calendar_days.get(self.calendar_day_selected)?;
        Some(format!(
            "{:04}-{:02}-{:02}",
            self.calendar_year, self.calendar_month, day
        ))
    }

    /// Round tabs are the union of the labels the rounds endpoint advertises
    /// and the labels observed on fetched matches, numerically ordered. A tab
    /// for unlabelled matches shows up last, only when such matches exist.
    pub fn round_tabs(&self) -> Vec<String> {
        let mut labels = self.rounds.clone();
        for row in &self.matches {
            match &row.round {
                Some(label) => {
                    if !labels.iter().any(|known| known == label) {
                        labels.push(label.clone());
                    }
                }
                None => {
                    if !labels.iter().any(|known| known == UNKNOWN_ROUND) {
                        labels.push(UNKNOWN_ROUND.to_string());
                    }
                }
            }
        }
        sort_round_labels(&mut labels);
        labels
    }

    pub fn current_round_label(&self) -> Option<String> {
        self.round_tabs().get(self.round_selected).cloned()
    }

    pub fn select_round_next(&mut self) {
        let total = self.round_tabs().len();
        if total == 0 {
            self.round_selected = 0;
            return;
        }
        self.round_selected = (self.round_selected + 1) % total;
        self.fixture_selected = 0;
    }

    pub fn select_round_prev(&mut self) {
        let total = self.round_tabs().len();
        if total == 0 {
            self.round_selected = 0;
            return;
        }
        if self.round_selected == 0 {
            self.round_selected = total - 1;
        } else {
            self.round_selected -= 1;
        }
        self.fixture_selected = 0;
    }

    /// Matches of the active round tab, in fetch order.
    pub fn fixture_rows(&self) -> Vec<&MatchRow> {
        let Some(tab) = self.current_round_label() else {
            return Vec::new();
        };
        let groups = group_by(self.matches.iter(), UNKNOWN_ROUND, |row| row.round.clone());
        groups
            .into_iter()
            .find(|(label, _)| *label == tab)
            .map(|(_, rows)| rows)
            .unwrap_or_default()
    }

    pub fn selected_fixture(&self) -> Option<&MatchRow> {
        let rows = self.fixture_rows();
        rows.get(self.fixture_selected).copied()
    }

    pub fn select_fixture_next(&mut self) {
        let total = self.fixture_rows().len();
        if total == 0 {
            self.fixture_selected = 0;
            return;
        }
        self.fixture_selected = (self.fixture_selected + 1) % total;
    }

    pub fn select_fixture_prev(&mut self) {
        let total = self.fixture_rows().len();
        if total == 0 {
            self.fixture_selected = 0;
            return;
        }
        if self.fixture_selected == 0 {
            self.fixture_selected = total - 1;
        } else {
            self.fixture_selected -= 1;
        }
    }

    pub fn clamp_fixture_selection(&mut self) {
        let total = self.fixture_rows().len();
        if total == 0 {
            self.fixture_selected = 0;
        } else if self.fixture_selected >= total {
            self.fixture_selected = total - 1;
        }
    }

    pub fn select_sanction_next(&mut self) {
        let total = self.sanctions.len();
        if total == 0 {
            self.sanctions_selected = 0;
            return;
        }
        self.sanctions_selected = (self.sanctions_selected + 1) % total;
    }

    pub fn select_sanction_prev(&mut self) {
        let total = self.sanctions.len();
        if total == 0 {
            self.sanctions_selected = 0;
            return;
        }
        if self.sanctions_selected == 0 {
            self.sanctions_selected = total - 1;
        } else {
            self.sanctions_selected -= 1;
        }
    }

    pub fn selected_sanction(&self) -> Option<&SanctionRank> {
        self.sanctions.get(self.sanctions_selected)
    }

    /// Card rows under the active column sort. Ties keep the server's order.
    pub fn cards_rows(&self) -> Vec<&CardTotals> {
        let mut rows: Vec<&CardTotals> = self.cards.iter().collect();
        match self.cards_sort.column {
            CardsColumn::Team => {
                sort_rows_by(&mut rows, self.cards_sort.direction, |row| {
                    row.team.clone()
                });
            }
            CardsColumn::Yellow => {
                sort_rows_by(&mut rows, self.cards_sort.direction, |row| row.yellow);
            }
            CardsColumn::Red => {
                sort_rows_by(&mut rows, self.cards_sort.direction, |row| row.red);
            }
            CardsColumn::Total => {
                sort_rows_by(&mut rows, self.cards_sort.direction, |row| row.total());
            }
        }
        rows
    }

    pub fn toggle_cards_sort(&mut self, column: CardsColumn) {
        self.cards_sort.toggle(column);
    }

    /// Streak rows worth showing, in the order the parser fixed.
    pub fn streak_rows(&self) -> Vec<&StreakRow> {
        self.streaks
            .iter()
            .filter(|row| row.is_notable())
            .collect()
    }

    /// All matches grouped by month, newest month first, for the almanac
    /// view. Matches without a date gather in a trailing bucket.
    pub fn almanac_groups(&self) -> Vec<(String, Vec<&MatchRow>)> {
        let mut rows: Vec<&MatchRow> = self.matches.iter().collect();
        rows.sort_by(|a, b| match (a.date, b.date) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        group_by(rows, UNKNOWN_DATE, |row| {
            row.date.map(|date| {
                let (year, month) = month_key(&date);
                month_label(year, month)
            })
        })
    }

    pub fn detail_for(&self, match_id: i64) -> Option<&MatchDetailData> {
        self.match_detail.get(&match_id)
    }

    /// Clears failure panes on the active screen back to Idle. Loaded and
    /// Loading panes are untouched.
    pub fn dismiss_failures(&mut self) {
        match self.screen {
            Screen::Standings => {
                dismiss(&mut self.competitions_load);
                dismiss(&mut self.zones_load);
                dismiss(&mut self.standings_load);
            }
            Screen::Fixture => {
                dismiss(&mut self.matches_load);
            }
            Screen::Stats => {
                dismiss(&mut self.cards_load);
                dismiss(&mut self.scorers_load);
                dismiss(&mut self.sanctions_load);
                dismiss(&mut self.streaks_load);
                dismiss(&mut self.clean_sheets_load);
                dismiss(&mut self.goal_minutes_load);
            }
            Screen::Calendar => {
                dismiss(&mut self.calendar_load);
                dismiss(&mut self.day_matches_load);
                dismiss(&mut self.matches_load);
            }
            Screen::MatchDetail { .. } => {
                dismiss(&mut self.match_detail_load);
            }
            Screen::Player => {
                dismiss(&mut self.player_load);
            }
        }
    }
}

fn dismiss(slot: &mut LoadState) {
    if matches!(slot, LoadState::Failed(_)) {
        *slot = LoadState::Idle;
    }
}

/// Index of the competition the UI should land on: the primary competition
/// for the configured season when present, the first entry otherwise.
pub fn default_competition_index(competitions: &[Competition], season: &str) -> usize {
    competitions
        .iter()
        .position(|comp| {
            comp.name.to_uppercase().contains(PRIMARY_COMPETITION_NAME) && comp.season == season
        })
        .unwrap_or(0)
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetCompetitions(Vec<Competition>),
    CompetitionsFailed(String),
    SetZones {
        competition_id: i64,
        zones: Vec<String>,
    },
    ZonesFailed {
        competition_id: i64,
        error: String,
    },
    SetStandings {
        competition_id: i64,
        zone: Option<String>,
        rows: Vec<StandingRow>,
    },
    StandingsFailed {
        competition_id: i64,
        zone: Option<String>,
        error: String,
    },
    SetMatches {
        rows: Vec<MatchRow>,
        rounds: Vec<String>,
    },
    MatchesFailed(String),
    SetDayMatches {
        date: String,
        rows: Vec<MatchRow>,
    },
    DayMatchesFailed {
        date: String,
        error: String,
    },
    SetCalendarDays {
        year: i32,
        month: u32,
        days: Vec<u32>,
    },
    CalendarDaysFailed {
        year: i32,
        month: u32,
        error: String,
    },
    SetCardTotals {
        competition_id: i64,
        rows: Vec<CardTotals>,
    },
    CardTotalsFailed {
        competition_id: i64,
        error: String,
    },
    SetScorers {
        competition_id: i64,
        zone: Option<String>,
        rows: Vec<ScorerRow>,
    },
    ScorersFailed {
        competition_id: i64,
        zone: Option<String>,
        error: String,
    },
    SetSanctions {
        competition_id: i64,
        zone: Option<String>,
        rows: Vec<SanctionRank>,
    },
    SanctionsFailed {
        competition_id: i64,
        zone: Option<String>,
        error: String,
    },
    SetStreaks {
        competition_id: i64,
        rows: Vec<StreakRow>,
    },
    StreaksFailed {
        competition_id: i64,
        error: String,
    },
    SetCleanSheets {
        competition_id: i64,
        zone: Option<String>,
        rows: Vec<CleanSheetRow>,
    },
    CleanSheetsFailed {
        competition_id: i64,
        zone: Option<String>,
        error: String,
    },
    SetGoalMinutes(GoalsByMinute),
    GoalMinutesFailed(String),
    SetMatchDetail {
        match_id: i64,
        detail: MatchDetailData,
    },
    MatchDetailFailed {
        match_id: i64,
        error: String,
    },
    SetPlayer {
        player_id: i64,
        info: PlayerInfo,
        goals: Vec<PlayerGoalRow>,
        sanctions: Vec<PlayerSanctionEvent>,
    },
    PlayerFailed {
        player_id: i64,
        error: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchCompetitions,
    FetchZones {
        competition_id: i64,
    },
    /// `zone: None` asks for the extended General table; a zone asks for the
    /// plain zone table.
    FetchStandings {
        competition_id: i64,
        zone: Option<String>,
    },
    FetchMatches,
    FetchDayMatches {
        date: String,
    },
    FetchCalendarDays {
        year: i32,
        month: u32,
    },
    FetchStats {
        competition_id: i64,
        zone: Option<String>,
    },
    FetchMatchDetail {
        match_id: i64,
    },
    FetchPlayer {
        player_id: i64,
    },
}

/// Folds one provider result into the state. Every result carries the filter
/// it was requested under; a result whose filter no longer matches the
/// current selection is stale and dropped here, the single place that rule
/// lives.
pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetCompetitions(competitions) => {
            // keep the current competition if it survived the refresh
            let previous_id = state.current_competition_id();
            state.competitions = competitions;
            state.competitions_load = LoadState::Loaded;
            state.competition_selected = previous_id
                .and_then(|id| state.competitions.iter().position(|comp| comp.id == id))
                .unwrap_or_else(|| {
                    default_competition_index(&state.competitions, &state.season)
                });
            state.zone_selected = 0;
        }
        Delta::CompetitionsFailed(error) => {
            state.competitions_load = LoadState::Failed(error);
        }
        Delta::SetZones {
            competition_id,
            zones,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.zones = zones;
            state.zones_load = LoadState::Loaded;
            if state.zone_selected > state.zones.len() {
                state.zone_selected = 0;
            }
        }
        Delta::ZonesFailed {
            competition_id,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.zones_load = LoadState::Failed(error);
        }
        Delta::SetStandings {
            competition_id,
            zone,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.standings = rows;
            state.standings_load = LoadState::Loaded;
        }
        Delta::StandingsFailed {
            competition_id,
            zone,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.standings_load = LoadState::Failed(error);
        }
        Delta::SetMatches { rows, rounds } => {
            let previous_tab = state.current_round_label();
            state.matches = rows;
            state.rounds = rounds;
            state.matches_load = LoadState::Loaded;
            let tabs = state.round_tabs();
            state.round_selected = previous_tab
                .and_then(|label| tabs.iter().position(|tab| *tab == label))
                .unwrap_or(0);
            state.clamp_fixture_selection();
        }
        Delta::MatchesFailed(error) => {
            state.matches_load = LoadState::Failed(error);
        }
        Delta::SetDayMatches { date, rows } => {
            if state.selected_calendar_date().as_deref() != Some(date.as_str()) {
                return;
            }
            state.day_matches = rows;
            state.day_matches_load = LoadState::Loaded;
            state.day_match_selected = 0;
        }
        Delta::DayMatchesFailed { date, error } => {
            if state.selected_calendar_date().as_deref() != Some(date.as_str()) {
                return;
            }
            state.day_matches_load = LoadState::Failed(error);
        }
        Delta::SetCalendarDays { year, month, days } => {
            if year != state.calendar_year || month != state.calendar_month {
                return;
            }
            state.calendar_days = days;
            state.calendar_load = LoadState::Loaded;
            state.calendar_day_selected = 0;
            state.reset_day_scope();
        }
        Delta::CalendarDaysFailed { year, month, error } => {
            if year != state.calendar_year || month != state.calendar_month {
                return;
            }
            state.calendar_load = LoadState::Failed(error);
        }
        Delta::SetCardTotals {
            competition_id,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.cards = rows;
            state.cards_load = LoadState::Loaded;
        }
        Delta::CardTotalsFailed {
            competition_id,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.cards_load = LoadState::Failed(error);
        }
        Delta::SetScorers {
            competition_id,
            zone,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.scorers = rows;
            state.scorers_load = LoadState::Loaded;
        }
        Delta::ScorersFailed {
            competition_id,
            zone,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.scorers_load = LoadState::Failed(error);
        }
        Delta::SetSanctions {
            competition_id,
            zone,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.sanctions = rows;
            state.sanctions_load = LoadState::Loaded;
            state.sanctions_selected = 0;
        }
        Delta::SanctionsFailed {
            competition_id,
            zone,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.sanctions_load = LoadState::Failed(error);
        }
        Delta::SetStreaks {
            competition_id,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.streaks = rows;
            state.streaks_load = LoadState::Loaded;
        }
        Delta::StreaksFailed {
            competition_id,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id() {
                return;
            }
            state.streaks_load = LoadState::Failed(error);
        }
        Delta::SetCleanSheets {
            competition_id,
            zone,
            rows,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.clean_sheets = rows;
            state.clean_sheets_load = LoadState::Loaded;
        }
        Delta::CleanSheetsFailed {
            competition_id,
            zone,
            error,
        } => {
            if Some(competition_id) != state.current_competition_id()
                || zone.as_deref() != state.current_zone()
            {
                return;
            }
            state.clean_sheets_load = LoadState::Failed(error);
        }
        Delta::SetGoalMinutes(data) => {
            state.goal_minutes = data;
            state.goal_minutes_load = LoadState::Loaded;
        }
        Delta::GoalMinutesFailed(error) => {
            state.goal_minutes_load = LoadState::Failed(error);
        }
        Delta::SetMatchDetail { match_id, detail } => {
            // Memoize regardless of where the user is now; the visible pane
            // only updates if they are still on this match.
            state.match_detail.insert(match_id, detail);
            if state.screen == (Screen::MatchDetail { match_id }) {
                state.match_detail_load = LoadState::Loaded;
            }
        }
        Delta::MatchDetailFailed { match_id, error } => {
            if state.screen != (Screen::MatchDetail { match_id }) {
                return;
            }
            state.match_detail_load = LoadState::Failed(error);
        }
        Delta::SetPlayer {
            player_id,
            info,
            goals,
            sanctions,
        } => {
            if state.player_last_id != Some(player_id) {
                return;
            }
            state.player = Some(info);
            state.player_goals = goals;
            state.player_sanctions = sanctions;
            state.player_load = LoadState::Loaded;
        }
        Delta::PlayerFailed { player_id, error } => {
            if state.player_last_id != Some(player_id) {
                return;
            }
            state.player_load = LoadState::Failed(error);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn screen_label(screen: &Screen) -> &'static str {
    match screen {
        Screen::Standings => "POSICIONES",
        Screen::Fixture => "FIXTURE",
        Screen::Stats => "ESTADÍSTICAS",
        Screen::Calendar => "CALENDARIO",
        Screen::MatchDetail { .. } => "PARTIDO",
        Screen::Player => "JUGADOR",
    }
}

pub fn stats_tab_label(tab: StatsTab) -> &'static str {
    match tab {
        StatsTab::Cards => "TARJETAS",
        StatsTab::Scorers => "GOLEADORES",
        StatsTab::Sanctions => "SANCIONADOS",
        StatsTab::Streaks => "RACHAS",
        StatsTab::CleanSheets => "VALLAS INVICTAS",
        StatsTab::Minutes => "GOLES POR MINUTO",
    }
}

pub fn status_label(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Scheduled => "PROGRAMADO",
        MatchStatus::InProgress => "EN JUEGO",
        MatchStatus::Finished => "FINALIZADO",
    }
}

pub fn calendar_mode_label(mode: CalendarMode) -> &'static str {
    match mode {
        CalendarMode::Month => "MES",
        CalendarMode::Almanac => "ALMANAQUE",
    }
}
