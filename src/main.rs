use std::env;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use liga_terminal::aggregate::{month_label, SortDirection, TableSort, UNKNOWN_DATE};
use liga_terminal::feed::spawn_provider;
use liga_terminal::state::{
    apply_delta, calendar_mode_label, screen_label, stats_tab_label, status_label, AppState,
    CalendarMode, CardsColumn, Delta, EventKind, LoadState, MatchEvent, MatchRow, MatchStatus,
    ProviderCommand, RecentResult, Screen, StatsTab,
};

const PROVIDER_DOWN: &str = "proveedor de datos detenido";

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    matches_refresh: Duration,
    last_matches_refresh: Instant,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> App {
        let poll_secs = env::var("MATCHES_POLL_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(60)
            .max(10);
        App {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
            matches_refresh: Duration::from_secs(poll_secs),
            last_matches_refresh: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('x') => self.state.dismiss_failures(),
            KeyCode::Char('1') => self.state.screen = Screen::Standings,
            KeyCode::Char('2') => self.state.screen = Screen::Fixture,
            KeyCode::Char('3') => self.state.screen = Screen::Stats,
            KeyCode::Char('4') => self.state.screen = Screen::Calendar,
            KeyCode::Char('c') => self.state.cycle_competition_next(),
            KeyCode::Char('C') => self.state.cycle_competition_prev(),
            KeyCode::Char('R') => self.refresh_current_screen(),
            _ => self.on_screen_key(key),
        }
    }

    fn on_screen_key(&mut self, key: KeyEvent) {
        match self.state.screen.clone() {
            Screen::Standings => match key.code {
                KeyCode::Char('z') | KeyCode::Right => self.state.cycle_zone_next(),
                KeyCode::Char('Z') | KeyCode::Left => self.state.cycle_zone_prev(),
                _ => {}
            },
            Screen::Fixture => match key.code {
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                    self.state.select_round_next()
                }
                KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                    self.state.select_round_prev()
                }
                KeyCode::Char('j') | KeyCode::Down => self.state.select_fixture_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_fixture_prev(),
                KeyCode::Enter => self.open_selected_fixture(),
                _ => {}
            },
            Screen::Stats => match key.code {
                KeyCode::Tab | KeyCode::Right => self.state.cycle_stats_tab_next(),
                KeyCode::BackTab | KeyCode::Left => self.state.cycle_stats_tab_prev(),
                KeyCode::Char('z') => self.state.cycle_zone_next(),
                KeyCode::Char('Z') => self.state.cycle_zone_prev(),
                KeyCode::Char('j') | KeyCode::Down
                    if self.state.stats_tab == StatsTab::Sanctions =>
                {
                    self.state.select_sanction_next()
                }
                KeyCode::Char('k') | KeyCode::Up
                    if self.state.stats_tab == StatsTab::Sanctions =>
                {
                    self.state.select_sanction_prev()
                }
                KeyCode::Enter if self.state.stats_tab == StatsTab::Sanctions => {
                    self.open_selected_player()
                }
                KeyCode::Char('n') if self.state.stats_tab == StatsTab::Cards => {
                    self.state.toggle_cards_sort(CardsColumn::Team)
                }
                KeyCode::Char('y') if self.state.stats_tab == StatsTab::Cards => {
                    self.state.toggle_cards_sort(CardsColumn::Yellow)
                }
                KeyCode::Char('r') if self.state.stats_tab == StatsTab::Cards => {
                    self.state.toggle_cards_sort(CardsColumn::Red)
                }
                KeyCode::Char('t') if self.state.stats_tab == StatsTab::Cards => {
                    self.state.toggle_cards_sort(CardsColumn::Total)
                }
                _ => {}
            },
            Screen::Calendar => match key.code {
                KeyCode::Char('m') => self.state.toggle_calendar_mode(),
                KeyCode::Char('n') => self.state.calendar_next_month(),
                KeyCode::Char('p') => self.state.calendar_prev_month(),
                KeyCode::Char('l') | KeyCode::Right => {
                    if self.state.calendar_mode == CalendarMode::Month {
                        self.state.select_calendar_day_next();
                    }
                }
                KeyCode::Char('h') | KeyCode::Left => {
                    if self.state.calendar_mode == CalendarMode::Month {
                        self.state.select_calendar_day_prev();
                    }
                }
                KeyCode::Char('j') | KeyCode::Down => match self.state.calendar_mode {
                    CalendarMode::Month => self.state.select_day_match_next(),
                    CalendarMode::Almanac => {
                        self.state.almanac_scroll = self.state.almanac_scroll.saturating_add(1)
                    }
                },
                KeyCode::Char('k') | KeyCode::Up => match self.state.calendar_mode {
                    CalendarMode::Month => self.state.select_day_match_prev(),
                    CalendarMode::Almanac => {
                        self.state.almanac_scroll = self.state.almanac_scroll.saturating_sub(1)
                    }
                },
                KeyCode::Enter => {
                    if self.state.calendar_mode == CalendarMode::Month {
                        self.open_selected_day_match();
                    }
                }
                _ => {}
            },
            Screen::MatchDetail { .. } => match key.code {
                KeyCode::Esc | KeyCode::Char('b') => {
                    self.state.screen = self.state.detail_back.clone()
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.state.detail_scroll = self.state.detail_scroll.saturating_add(1)
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.state.detail_scroll = self.state.detail_scroll.saturating_sub(1)
                }
                _ => {}
            },
            Screen::Player => match key.code {
                KeyCode::Esc | KeyCode::Char('b') => self.state.screen = Screen::Stats,
                _ => {}
            },
        }
    }

    fn open_selected_fixture(&mut self) {
        let Some(row) = self.state.selected_fixture() else {
            return;
        };
        let match_id = row.id;
        self.open_match_detail(match_id, Screen::Fixture);
    }

    fn open_selected_day_match(&mut self) {
        let Some(row) = self.state.selected_day_match() else {
            return;
        };
        let match_id = row.id;
        self.open_match_detail(match_id, Screen::Calendar);
    }

    fn open_match_detail(&mut self, match_id: i64, back: Screen) {
        self.state.detail_back = back;
        self.state.detail_scroll = 0;
        self.state.screen = Screen::MatchDetail { match_id };
        self.request_match_detail(match_id);
    }

    fn open_selected_player(&mut self) {
        let Some(rank) = self.state.selected_sanction() else {
            return;
        };
        let player_id = rank.player_id;
        let player = rank.player.clone();
        self.state.screen = Screen::Player;
        self.state.push_log(format!("[INFO] Jugador: {player}"));
        self.request_player(player_id);
    }

    /// Requests whatever the active screen still misses. Runs once per frame;
    /// every helper bails out while its load is underway, so a slot left
    /// `Idle` (fresh scope, or a dismissed failure) is fetched exactly once.
    fn ensure_screen_data(&mut self) {
        if matches!(self.state.competitions_load, LoadState::Idle) {
            self.request_competitions();
        }
        if self.state.current_competition_id().is_some()
            && matches!(self.state.zones_load, LoadState::Idle)
        {
            self.request_zones();
        }
        match self.state.screen.clone() {
            Screen::Standings => {
                if self.state.current_competition_id().is_some()
                    && matches!(self.state.standings_load, LoadState::Idle)
                {
                    self.request_standings();
                }
            }
            Screen::Fixture => {
                if matches!(self.state.matches_load, LoadState::Idle) {
                    self.request_matches(false);
                }
            }
            Screen::Stats => {
                if self.state.current_competition_id().is_some() && self.stats_idle() {
                    self.request_stats();
                }
            }
            Screen::Calendar => {
                if matches!(self.state.calendar_load, LoadState::Idle) {
                    self.request_calendar();
                }
                if matches!(self.state.day_matches_load, LoadState::Idle)
                    && self.state.selected_calendar_date().is_some()
                {
                    self.request_day_matches();
                }
                if self.state.calendar_mode == CalendarMode::Almanac
                    && matches!(self.state.matches_load, LoadState::Idle)
                {
                    self.request_matches(false);
                }
            }
            Screen::MatchDetail { match_id } => {
                if matches!(self.state.match_detail_load, LoadState::Idle) {
                    self.request_match_detail(match_id);
                }
            }
            Screen::Player => {
                if matches!(self.state.player_load, LoadState::Idle) {
                    if let Some(player_id) = self.state.player_last_id {
                        self.request_player(player_id);
                    }
                }
            }
        }
    }

    fn maybe_refresh_matches(&mut self) {
        let wants_matches = matches!(self.state.screen, Screen::Fixture)
            || (matches!(self.state.screen, Screen::Calendar)
                && self.state.calendar_mode == CalendarMode::Almanac);
        if wants_matches {
            self.request_matches(false);
        }
    }

    fn refresh_current_screen(&mut self) {
        match self.state.screen.clone() {
            Screen::Standings => {
                self.request_zones();
                self.request_standings();
            }
            Screen::Fixture => self.request_matches(true),
            Screen::Stats => self.request_stats(),
            Screen::Calendar => {
                self.request_calendar();
                self.request_day_matches();
                if self.state.calendar_mode == CalendarMode::Almanac {
                    self.request_matches(true);
                }
            }
            Screen::MatchDetail { match_id } => {
                self.state.match_detail.remove(&match_id);
                self.request_match_detail(match_id);
            }
            Screen::Player => {
                if let Some(player_id) = self.state.player_last_id {
                    self.request_player(player_id);
                }
            }
        }
    }

    fn request_competitions(&mut self) {
        if self.state.competitions_load.is_loading() {
            return;
        }
        self.state.competitions_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchCompetitions) {
            self.state.competitions_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_zones(&mut self) {
        let Some(competition_id) = self.state.current_competition_id() else {
            return;
        };
        if self.state.zones_load.is_loading() {
            return;
        }
        self.state.zones_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchZones { competition_id }) {
            self.state.zones_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_standings(&mut self) {
        let Some(competition_id) = self.state.current_competition_id() else {
            return;
        };
        if self.state.standings_load.is_loading() {
            return;
        }
        let zone = self.state.current_zone().map(str::to_string);
        self.state.standings_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchStandings {
            competition_id,
            zone,
        }) {
            self.state.standings_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    /// Fixture refetches are throttled so the poll loop does not hammer the
    /// API: a loaded list younger than the window stays as it is. First loads
    /// and retries after a dismissed failure skip the window.
    fn request_matches(&mut self, announce: bool) {
        if self.state.matches_load.is_loading() {
            return;
        }
        if !announce && self.state.matches_load.error().is_some() {
            return;
        }
        if self.state.matches_load == LoadState::Loaded
            && self.last_matches_refresh.elapsed() < self.matches_refresh
        {
            if announce {
                let secs = self.matches_refresh.as_secs();
                self.state
                    .push_log(format!("[INFO] Partidos al día (ventana de {secs}s)"));
            }
            return;
        }
        self.state.matches_load = LoadState::Loading;
        self.last_matches_refresh = Instant::now();
        if announce {
            self.state.push_log("[INFO] Actualizando partidos");
        }
        if !self.send(ProviderCommand::FetchMatches) {
            self.state.matches_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_stats(&mut self) {
        let Some(competition_id) = self.state.current_competition_id() else {
            return;
        };
        if self.stats_loading() {
            return;
        }
        let zone = self.state.current_zone().map(str::to_string);
        self.state.cards_load = LoadState::Loading;
        self.state.scorers_load = LoadState::Loading;
        self.state.sanctions_load = LoadState::Loading;
        self.state.streaks_load = LoadState::Loading;
        self.state.clean_sheets_load = LoadState::Loading;
        self.state.goal_minutes_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchStats {
            competition_id,
            zone,
        }) {
            let failed = LoadState::Failed(PROVIDER_DOWN.to_string());
            self.state.cards_load = failed.clone();
            self.state.scorers_load = failed.clone();
            self.state.sanctions_load = failed.clone();
            self.state.streaks_load = failed.clone();
            self.state.clean_sheets_load = failed.clone();
            self.state.goal_minutes_load = failed;
        }
    }

    fn request_calendar(&mut self) {
        if self.state.calendar_load.is_loading() {
            return;
        }
        let year = self.state.calendar_year;
        let month = self.state.calendar_month;
        self.state.calendar_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchCalendarDays { year, month }) {
            self.state.calendar_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_day_matches(&mut self) {
        let Some(date) = self.state.selected_calendar_date() else {
            return;
        };
        if self.state.day_matches_load.is_loading() {
            return;
        }
        self.state.day_matches_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchDayMatches { date }) {
            self.state.day_matches_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_match_detail(&mut self, match_id: i64) {
        if self.state.detail_for(match_id).is_some() {
            self.state.match_detail_load = LoadState::Loaded;
            return;
        }
        self.state.match_detail_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchMatchDetail { match_id }) {
            self.state.match_detail_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn request_player(&mut self, player_id: i64) {
        self.state.player_last_id = Some(player_id);
        self.state.player = None;
        self.state.player_goals.clear();
        self.state.player_sanctions.clear();
        self.state.player_load = LoadState::Loading;
        if !self.send(ProviderCommand::FetchPlayer { player_id }) {
            self.state.player_load = LoadState::Failed(PROVIDER_DOWN.to_string());
        }
    }

    fn stats_idle(&self) -> bool {
        self.stats_slots()
            .iter()
            .any(|slot| matches!(slot, LoadState::Idle))
    }

    fn stats_loading(&self) -> bool {
        self.stats_slots().iter().any(|slot| slot.is_loading())
    }

    fn stats_slots(&self) -> [&LoadState; 6] {
        [
            &self.state.cards_load,
            &self.state.scorers_load,
            &self.state.sanctions_load,
            &self.state.streaks_load,
            &self.state.clean_sheets_load,
            &self.state.goal_minutes_load,
        ]
    }

    fn send(&mut self, cmd: ProviderCommand) -> bool {
        if self.cmd_tx.send(cmd).is_err() {
            self.state.push_log("[WARN] El proveedor de datos se detuvo");
            return false;
        }
        true
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_provider(tx, cmd_rx);

    let mut app = App::new(cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.ensure_screen_data();
        app.maybe_refresh_matches();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_header(frame, sections[0], app);
    match &app.state.screen {
        Screen::Standings => render_standings(frame, sections[1], app),
        Screen::Fixture => render_fixture(frame, sections[1], app),
        Screen::Stats => render_stats(frame, sections[1], app),
        Screen::Calendar => render_calendar(frame, sections[1], app),
        Screen::MatchDetail { match_id } => render_match_detail(frame, sections[1], app, *match_id),
        Screen::Player => render_player(frame, sections[1], app),
    }
    render_console(frame, sections[2], app);
    render_footer(frame, sections[3], app);

    if app.state.help_overlay {
        render_help(frame, frame.size());
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let screen_name = match &state.screen {
        Screen::Calendar => format!(
            "{} · {}",
            screen_label(&state.screen),
            calendar_mode_label(state.calendar_mode)
        ),
        other => screen_label(other).to_string(),
    };
    let competition = state
        .current_competition()
        .map(|comp| comp.full_name.clone())
        .unwrap_or_else(|| "SIN COMPETICIÓN".to_string());
    let line = Line::from(vec![
        Span::styled(
            "LIGA TERMINAL",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            screen_name,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(competition),
        Span::styled(
            format!("  ZONA {}", state.zone_label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  TEMPORADA {}", state.season),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match &app.state.screen {
        Screen::Standings => {
            "1-4 pantalla | c/C competición | z/Z zona | R actualizar | x descartar error | ? ayuda | q salir"
        }
        Screen::Fixture => {
            "h/l fecha | j/k partido | Enter detalle | R actualizar | ? ayuda | q salir"
        }
        Screen::Stats => "Tab panel | z/Z zona | j/k + Enter sancionados | n/y/r/t orden | ? ayuda",
        Screen::Calendar => "m modo | n/p mes | h/l día | j/k partido | Enter detalle | ? ayuda",
        Screen::MatchDetail { .. } => "Esc volver | j/k desplazar | R recargar | ? ayuda | q salir",
        Screen::Player => "Esc volver | R recargar | ? ayuda | q salir",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_console(frame: &mut Frame, area: Rect, app: &App) {
    let logs = &app.state.logs;
    let skip = logs.len().saturating_sub(3);
    let text = logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    frame.render_widget(
        Paragraph::new(text).block(Block::default().title("CONSOLA").borders(Borders::ALL)),
        area,
    );
}

fn render_standings(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.competitions_load.error() {
        render_error(frame, area, msg);
        return;
    }
    if state.competitions.is_empty() {
        render_placeholder(
            frame,
            area,
            &state.competitions_load,
            "Sin competiciones para la temporada",
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = standings_columns();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let headers = [
        "#", "EQUIPO", "PJ", "PG", "PE", "PP", "GF", "GC", "DIF", "PTS", "ÚLTIMOS 5",
    ];
    render_columns(
        frame,
        chunks[0],
        &widths,
        headers
            .iter()
            .map(|text| Line::styled(text.to_string(), header_style))
            .collect(),
        Style::default(),
    );

    if let Some(msg) = state.standings_load.error() {
        render_error(frame, chunks[1], msg);
        return;
    }
    if state.standings.is_empty() {
        render_placeholder(frame, chunks[1], &state.standings_load, "Sin posiciones");
        return;
    }

    let rows_area = chunks[1];
    for (offset, row) in state
        .standings
        .iter()
        .take(rows_area.height as usize)
        .enumerate()
    {
        let display = state.display.resolve(&row.team);
        let mut recent_spans: Vec<Span> = Vec::with_capacity(row.recent.len() * 2);
        for result in &row.recent {
            recent_spans.push(Span::styled(
                result.code().to_string(),
                Style::default()
                    .fg(recent_color(*result))
                    .add_modifier(Modifier::BOLD),
            ));
            recent_spans.push(Span::raw(" "));
        }
        let cells = vec![
            Line::raw(row.position.to_string()),
            Line::raw(format!("{} {}", display.abbr, row.team)),
            Line::raw(row.played.to_string()),
            Line::raw(row.won.to_string()),
            Line::raw(row.drawn.to_string()),
            Line::raw(row.lost.to_string()),
            Line::raw(row.goals_for.to_string()),
            Line::raw(row.goals_against.to_string()),
            Line::raw(format!("{:+}", row.goal_diff())),
            Line::styled(
                row.points.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(recent_spans),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            Style::default(),
        );
    }
}

fn render_fixture(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let tabs = state.round_tabs();
    let tab_line = match state.current_round_label() {
        Some(label) => Line::from(vec![
            Span::styled("◀ h  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{})", state.round_selected + 1, tabs.len()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("  l ▶", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::styled(
            "Sin fechas".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(tab_line), chunks[0]);

    let widths = match_columns();
    render_columns(
        frame,
        chunks[1],
        &widths,
        match_header_cells(),
        Style::default(),
    );

    if let Some(msg) = state.matches_load.error() {
        render_error(frame, chunks[2], msg);
        return;
    }
    let rows = state.fixture_rows();
    if rows.is_empty() {
        render_placeholder(
            frame,
            chunks[2],
            &state.matches_load,
            "Sin partidos en esta fecha",
        );
        return;
    }
    render_match_rows(frame, chunks[2], app, &rows, state.fixture_selected);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tabs = [
        StatsTab::Cards,
        StatsTab::Scorers,
        StatsTab::Sanctions,
        StatsTab::Streaks,
        StatsTab::CleanSheets,
        StatsTab::Minutes,
    ];
    let mut spans: Vec<Span> = Vec::with_capacity(tabs.len() * 2);
    for (idx, tab) in tabs.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *tab == state.stats_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(stats_tab_label(*tab), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match state.stats_tab {
        StatsTab::Cards => render_cards(frame, chunks[1], app),
        StatsTab::Scorers => render_scorers(frame, chunks[1], app),
        StatsTab::Sanctions => render_sanctions(frame, chunks[1], app),
        StatsTab::Streaks => render_streaks(frame, chunks[1], app),
        StatsTab::CleanSheets => render_clean_sheets(frame, chunks[1], app),
        StatsTab::Minutes => render_goal_minutes(frame, chunks[1], app),
    }
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.cards_load.error() {
        render_error(frame, area, msg);
        return;
    }
    let rows = state.cards_rows();
    if rows.is_empty() {
        render_placeholder(frame, area, &state.cards_load, "Sin tarjetas registradas");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = cards_columns();
    let sort = &state.cards_sort;
    let headers = [
        (sort_header("EQUIPO", CardsColumn::Team, sort), Color::Cyan),
        (
            sort_header("AMARILLAS", CardsColumn::Yellow, sort),
            Color::Yellow,
        ),
        (sort_header("ROJAS", CardsColumn::Red, sort), Color::Red),
        (sort_header("TOTAL", CardsColumn::Total, sort), Color::Cyan),
    ];
    render_columns(
        frame,
        chunks[0],
        &widths,
        headers
            .into_iter()
            .map(|(text, color)| {
                Line::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
            })
            .collect(),
        Style::default(),
    );

    let rows_area = chunks[1];
    for (offset, row) in rows.iter().take(rows_area.height as usize).enumerate() {
        let cells = vec![
            Line::raw(row.team.clone()),
            Line::raw(row.yellow.to_string()),
            Line::raw(row.red.to_string()),
            Line::styled(
                row.total().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            Style::default(),
        );
    }
}

fn render_scorers(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.scorers_load.error() {
        render_error(frame, area, msg);
        return;
    }
    if state.scorers.is_empty() {
        render_placeholder(frame, area, &state.scorers_load, "Sin goleadores");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = scorers_columns();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    render_columns(
        frame,
        chunks[0],
        &widths,
        ["#", "JUGADOR", "EQUIPO", "GOLES"]
            .iter()
            .map(|text| Line::styled(text.to_string(), header_style))
            .collect(),
        Style::default(),
    );

    let rows_area = chunks[1];
    for (offset, row) in state
        .scorers
        .iter()
        .take(rows_area.height as usize)
        .enumerate()
    {
        let cells = vec![
            Line::raw(format!("{}", offset + 1)),
            Line::raw(row.player.clone()),
            Line::raw(row.team.clone()),
            Line::styled(
                row.goals.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            Style::default(),
        );
    }
}

fn render_sanctions(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.sanctions_load.error() {
        render_error(frame, area, msg);
        return;
    }
    if state.sanctions.is_empty() {
        render_placeholder(frame, area, &state.sanctions_load, "Sin sancionados");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = sanctions_columns();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    render_columns(
        frame,
        chunks[0],
        &widths,
        ["#", "JUGADOR", "EQUIPO", "AM", "RJ", "TOT"]
            .iter()
            .map(|text| Line::styled(text.to_string(), header_style))
            .collect(),
        Style::default(),
    );

    let rows_area = chunks[1];
    let visible = rows_area.height as usize;
    let (start, end) = visible_range(state.sanctions_selected, state.sanctions.len(), visible);
    for (offset, idx) in (start..end).enumerate() {
        let row = &state.sanctions[idx];
        let row_style = if idx == state.sanctions_selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let cells = vec![
            Line::raw(format!("{}", idx + 1)),
            Line::raw(row.player.clone()),
            Line::raw(row.team.clone()),
            Line::styled(row.yellow.to_string(), Style::default().fg(Color::Yellow)),
            Line::styled(row.red.to_string(), Style::default().fg(Color::Red)),
            Line::styled(
                row.total.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            row_style,
        );
    }
}

fn render_streaks(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.streaks_load.error() {
        render_error(frame, area, msg);
        return;
    }
    let rows = state.streak_rows();
    if rows.is_empty() {
        render_placeholder(frame, area, &state.streaks_load, "Sin rachas destacadas");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = streaks_columns();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    render_columns(
        frame,
        chunks[0],
        &widths,
        ["EQUIPO", "GANANDO", "SIN PERDER"]
            .iter()
            .map(|text| Line::styled(text.to_string(), header_style))
            .collect(),
        Style::default(),
    );

    let rows_area = chunks[1];
    for (offset, row) in rows.iter().take(rows_area.height as usize).enumerate() {
        let cells = vec![
            Line::raw(row.team.clone()),
            Line::styled(
                format!("{}", row.winning),
                Style::default().fg(Color::Green),
            ),
            Line::raw(format!("{}", row.unbeaten)),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            Style::default(),
        );
    }
}

fn render_clean_sheets(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.clean_sheets_load.error() {
        render_error(frame, area, msg);
        return;
    }
    if state.clean_sheets.is_empty() {
        render_placeholder(frame, area, &state.clean_sheets_load, "Sin vallas invictas");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = clean_sheet_columns();
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    render_columns(
        frame,
        chunks[0],
        &widths,
        ["#", "EQUIPO", "VALLAS", "PJ"]
            .iter()
            .map(|text| Line::styled(text.to_string(), header_style))
            .collect(),
        Style::default(),
    );

    let rows_area = chunks[1];
    for (offset, row) in state
        .clean_sheets
        .iter()
        .take(rows_area.height as usize)
        .enumerate()
    {
        let cells = vec![
            Line::raw(format!("{}", offset + 1)),
            Line::raw(row.team.clone()),
            Line::styled(
                row.clean_sheets.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(row.played.to_string()),
        ];
        render_columns(
            frame,
            row_rect(rows_area, offset),
            &widths,
            cells,
            Style::default(),
        );
    }
}

fn render_goal_minutes(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.goal_minutes_load.error() {
        render_error(frame, area, msg);
        return;
    }
    if state.goal_minutes.peak() == 0 {
        render_placeholder(
            frame,
            area,
            &state.goal_minutes_load,
            "Sin goles registrados",
        );
        return;
    }

    let buckets = minute_buckets(&state.goal_minutes.minutes, 5);
    let bars: Vec<Bar> = buckets
        .iter()
        .map(|(label, count)| {
            Bar::default()
                .value(u64::from(*count))
                .label(Line::from(label.clone()))
                .style(Style::default().fg(Color::Green))
        })
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .title("GOLES POR MINUTO (tramos de 5')")
                .borders(Borders::ALL),
        )
        .bar_width(3)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_calendar(frame: &mut Frame, area: Rect, app: &App) {
    match app.state.calendar_mode {
        CalendarMode::Month => render_calendar_month(frame, area, app),
        CalendarMode::Almanac => render_almanac(frame, area, app),
    }
}

fn render_calendar_month(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled("◀ p  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            month_label(state.calendar_year, state.calendar_month),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  n ▶   [m] almanaque",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    if let Some(msg) = state.calendar_load.error() {
        render_error(frame, chunks[1], msg);
        return;
    }
    if state.calendar_days.is_empty() {
        render_placeholder(
            frame,
            chunks[1],
            &state.calendar_load,
            "Sin partidos este mes",
        );
        return;
    }
    let mut day_spans: Vec<Span> = Vec::with_capacity(state.calendar_days.len());
    for (idx, day) in state.calendar_days.iter().enumerate() {
        let style = if idx == state.calendar_day_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        day_spans.push(Span::styled(format!(" {day:02} "), style));
    }
    frame.render_widget(Paragraph::new(Line::from(day_spans)), chunks[1]);

    let widths = match_columns();
    render_columns(
        frame,
        chunks[2],
        &widths,
        match_header_cells(),
        Style::default(),
    );

    if let Some(msg) = state.day_matches_load.error() {
        render_error(frame, chunks[3], msg);
        return;
    }
    if state.day_matches.is_empty() {
        render_placeholder(
            frame,
            chunks[3],
            &state.day_matches_load,
            "Sin partidos para el día",
        );
        return;
    }
    let rows: Vec<&MatchRow> = state.day_matches.iter().collect();
    render_match_rows(frame, chunks[3], app, &rows, state.day_match_selected);
}

fn render_almanac(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.matches_load.error() {
        render_error(frame, area, msg);
        return;
    }
    let groups = state.almanac_groups();
    if groups.is_empty() {
        render_placeholder(
            frame,
            area,
            &state.matches_load,
            "Sin partidos en la temporada",
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (label, rows) in &groups {
        lines.push(Line::styled(
            label.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        for row in rows {
            lines.push(Line::raw(format!(
                "  {}  {}  {}  {}",
                fmt_short_date(row.date),
                row.home,
                score_text(row.home_score, row.away_score),
                row.away
            )));
        }
        lines.push(Line::raw(String::new()));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title("ALMANAQUE  [m] mes")
                    .borders(Borders::ALL),
            )
            .scroll((state.almanac_scroll, 0)),
        area,
    );
}

fn render_match_detail(frame: &mut Frame, area: Rect, app: &App, match_id: i64) {
    let state = &app.state;
    let Some(detail) = state.detail_for(match_id) else {
        if let Some(msg) = state.match_detail_load.error() {
            render_error(frame, area, msg);
        } else {
            render_placeholder(
                frame,
                area,
                &state.match_detail_load,
                "Sin datos del partido",
            );
        }
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let home = state.display.resolve(&detail.home);
    let away = state.display.resolve(&detail.away);
    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", home.abbr, detail.home),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  ", score_text(detail.home_score, detail.away_score)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} {}", away.abbr, detail.away),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(format!(
            "{}  |  {}",
            fmt_long_date(detail.date),
            detail
                .facility
                .clone()
                .unwrap_or_else(|| "Estadio a confirmar".to_string())
        )),
        Line::raw(format!(
            "{}  |  {}",
            detail
                .round
                .clone()
                .unwrap_or_else(|| "Sin fecha asignada".to_string()),
            status_label(detail.status)
        )),
    ];
    frame.render_widget(
        Paragraph::new(header_lines).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    if detail.events.is_empty() {
        frame.render_widget(
            Paragraph::new("Sin eventos registrados").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
        return;
    }
    let lines: Vec<Line> = detail.events.iter().map(event_line).collect();
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().title("EVENTOS").borders(Borders::ALL))
            .scroll((state.detail_scroll, 0)),
        chunks[1],
    );
}

fn render_player(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    if let Some(msg) = state.player_load.error() {
        render_error(frame, area, msg);
        return;
    }
    let Some(player) = &state.player else {
        render_placeholder(frame, area, &state.player_load, "Sin datos del jugador");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let yellow = state
        .player_sanctions
        .iter()
        .filter(|event| event.kind == EventKind::YellowCard)
        .count();
    let red = state
        .player_sanctions
        .iter()
        .filter(|event| event.kind == EventKind::RedCard)
        .count();
    let info = vec![
        Line::styled(
            player.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!(
            "Goles: {}   Amarillas: {}   Rojas: {}",
            state.player_goals.len(),
            yellow,
            red
        )),
    ];
    frame.render_widget(
        Paragraph::new(info).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let goal_lines: Vec<Line> = if state.player_goals.is_empty() {
        vec![Line::styled(
            "Sin goles en la temporada".to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        state
            .player_goals
            .iter()
            .map(|goal| {
                let venue = if goal.home_game { "L" } else { "V" };
                Line::raw(format!(
                    "{}  ({venue}) vs {}  {}'  {}",
                    fmt_day(goal.date),
                    goal.opponent,
                    goal.minute,
                    goal.kind.tag()
                ))
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(goal_lines).block(Block::default().title("GOLES").borders(Borders::ALL)),
        halves[0],
    );

    let sanction_lines: Vec<Line> = if state.player_sanctions.is_empty() {
        vec![Line::styled(
            "Sin sanciones".to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        state
            .player_sanctions
            .iter()
            .map(|event| {
                let minute = event
                    .minute
                    .map(|minute| format!("{minute}'"))
                    .unwrap_or_default();
                let detail = event.detail.clone().unwrap_or_default();
                Line::raw(format!(
                    "{}  vs {}  {}  {}  {}",
                    fmt_day(event.date),
                    event.opponent,
                    minute,
                    event.kind.tag(),
                    detail
                ))
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(sanction_lines)
            .block(Block::default().title("SANCIONES").borders(Borders::ALL)),
        halves[1],
    );
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(62, 70, area);
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::styled(
            "ATAJOS".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("1/2/3/4   posiciones / fixture / estadísticas / calendario"),
        Line::raw("c, C      competición siguiente / anterior"),
        Line::raw("z, Z      zona siguiente / anterior"),
        Line::raw("Tab       panel de estadísticas"),
        Line::raw("h, l      fecha o día anterior / siguiente"),
        Line::raw("j, k      mover selección o desplazar"),
        Line::raw("Enter     abrir detalle (partido o jugador)"),
        Line::raw("Esc, b    volver"),
        Line::raw("m         mes / almanaque"),
        Line::raw("n, p      mes siguiente / anterior (calendario)"),
        Line::raw("n/y/r/t   orden de tarjetas: equipo/amarillas/rojas/total"),
        Line::raw("R         recargar la pantalla actual"),
        Line::raw("x         descartar errores de la pantalla"),
        Line::raw("?         esta ayuda"),
        Line::raw("q         salir"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("AYUDA").borders(Borders::ALL)),
        popup,
    );
}

fn render_match_rows(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    rows: &[&MatchRow],
    selected: usize,
) {
    let widths = match_columns();
    let visible = area.height as usize;
    let (start, end) = visible_range(selected, rows.len(), visible);
    for (offset, idx) in (start..end).enumerate() {
        let row = rows[idx];
        let row_style = if idx == selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        render_columns(
            frame,
            row_rect(area, offset),
            &widths,
            match_row_cells(app, row),
            row_style,
        );
    }
}

fn match_row_cells(app: &App, row: &MatchRow) -> Vec<Line<'static>> {
    let state = &app.state;
    let home = state.display.resolve(&row.home);
    let away = state.display.resolve(&row.away);
    let status_style = match row.status {
        MatchStatus::InProgress => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        MatchStatus::Finished => Style::default().fg(Color::DarkGray),
        MatchStatus::Scheduled => Style::default(),
    };
    vec![
        Line::raw(fmt_short_date(row.date)),
        Line::raw(format!("{} {}", home.abbr, row.home)),
        Line::styled(
            score_text(row.home_score, row.away_score),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!("{} {}", away.abbr, row.away)),
        Line::styled(status_label(row.status).to_string(), status_style),
        Line::raw(row.facility.clone().unwrap_or_default()),
    ]
}

fn match_header_cells() -> Vec<Line<'static>> {
    let style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    ["FECHA", "LOCAL", "RES", "VISITA", "ESTADO", "ESTADIO"]
        .into_iter()
        .map(|text| Line::styled(text.to_string(), style))
        .collect()
}

fn event_line(event: &MatchEvent) -> Line<'static> {
    let side = if event.is_home { "● " } else { "○ " };
    let minute = match event.stoppage_time {
        Some(extra) => format!("{:>3}'+{extra}", event.minute),
        None => format!("{:>3}'  ", event.minute),
    };
    let mut spans = vec![
        Span::styled(side.to_string(), Style::default().fg(Color::DarkGray)),
        Span::styled(minute, Style::default().fg(Color::DarkGray)),
    ];
    if let Some(phase) = &event.phase {
        spans.push(Span::styled(
            format!(" {phase}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans.push(Span::styled(
        format!("  {:<10}", event.kind.tag()),
        Style::default()
            .fg(event_color(event.kind))
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::raw(format!(" {}", event.player)));
    spans.push(Span::styled(
        format!(" ({})", event.team),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(count) = event.accumulated_yellow {
        spans.push(Span::styled(
            format!("  {count}ª amarilla"),
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(detail) = &event.detail {
        spans.push(Span::styled(
            format!("  {detail}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_columns(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    cells: Vec<Line>,
    base: Style,
) {
    let rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.to_vec())
        .split(area);
    for (rect, cell) in rects.iter().zip(cells) {
        frame.render_widget(Paragraph::new(cell).style(base), *rect);
    }
}

fn render_error(frame: &mut Frame, area: Rect, msg: &str) {
    frame.render_widget(
        Paragraph::new(format!("ERROR: {msg}  (x para descartar)"))
            .style(Style::default().fg(Color::Red)),
        area,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, slot: &LoadState, empty_text: &str) {
    let text = if slot.is_loading() {
        "Cargando..."
    } else {
        empty_text
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn standings_columns() -> [Constraint; 11] {
    [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(12),
    ]
}

fn match_columns() -> [Constraint; 6] {
    [
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Min(12),
    ]
}

fn cards_columns() -> [Constraint; 4] {
    [
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(9),
    ]
}

fn scorers_columns() -> [Constraint; 4] {
    [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Min(16),
        Constraint::Length(6),
    ]
}

fn sanctions_columns() -> [Constraint; 6] {
    [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(6),
    ]
}

fn streaks_columns() -> [Constraint; 3] {
    [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(14),
    ]
}

fn clean_sheet_columns() -> [Constraint; 4] {
    [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
    ]
}

fn sort_header(base: &str, column: CardsColumn, sort: &TableSort<CardsColumn>) -> String {
    if sort.column == column {
        let arrow = match sort.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        };
        format!("{base} {arrow}")
    } else {
        base.to_string()
    }
}

fn minute_buckets(minutes: &[u32], size: usize) -> Vec<(String, u32)> {
    minutes
        .chunks(size)
        .enumerate()
        .map(|(idx, chunk)| {
            let upper = (idx + 1) * size;
            (upper.to_string(), chunk.iter().copied().sum::<u32>())
        })
        .collect()
}

fn row_rect(area: Rect, offset: usize) -> Rect {
    Rect {
        x: area.x,
        y: area.y + offset as u16,
        width: area.width,
        height: 1,
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total <= visible {
        return (0, total);
    }
    let half = visible / 2;
    let start = selected.saturating_sub(half).min(total - visible);
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup[1])[1]
}

fn recent_color(result: RecentResult) -> Color {
    match result {
        RecentResult::Win => Color::Green,
        RecentResult::Draw => Color::Yellow,
        RecentResult::Loss => Color::Red,
    }
}

fn event_color(kind: EventKind) -> Color {
    match kind {
        EventKind::Goal | EventKind::OwnGoal | EventKind::Penalty => Color::Green,
        EventKind::YellowCard => Color::Yellow,
        EventKind::RedCard => Color::Red,
        EventKind::Substitution => Color::Cyan,
    }
}

fn fmt_short_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%d/%m %H:%M").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn fmt_long_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%Y %H:%M").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn fmt_day(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%d/%m/%y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn score_text(home_score: Option<u32>, away_score: Option<u32>) -> String {
    match (home_score, away_score) {
        (Some(home), Some(away)) => format!("{home}-{away}"),
        _ => "vs".to_string(),
    }
}
