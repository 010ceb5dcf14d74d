use std::collections::HashSet;
use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use crate::league_fetch;
use crate::state::{Delta, ProviderCommand};
use crate::stats_fetch::{self, TOP_SCORERS_LIMIT};

type FetchJob = Box<dyn FnOnce() + Send>;

/// Runs the network side of the app on its own thread. Commands arrive from
/// the UI, results go back as deltas; the UI thread never touches the wire.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let pool = build_fetch_pool();
        let inflight_max = env::var("DETAILS_INFLIGHT_MAX")
            .ok()
            .and_then(|val| val.parse::<usize>().ok())
            .unwrap_or(8)
            .clamp(1, 64);
        let inflight_details: Arc<Mutex<HashSet<i64>>> = Arc::new(Mutex::new(HashSet::new()));
        let inflight_players: Arc<Mutex<HashSet<i64>>> = Arc::new(Mutex::new(HashSet::new()));

        for cmd in cmd_rx.iter() {
            match cmd {
                ProviderCommand::FetchCompetitions => match league_fetch::fetch_competitions() {
                    Ok(competitions) => {
                        let _ = tx.send(Delta::SetCompetitions(competitions));
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!("[WARN] Competiciones: {err}")));
                        let _ = tx.send(Delta::CompetitionsFailed(err.to_string()));
                    }
                },
                ProviderCommand::FetchZones { competition_id } => {
                    match league_fetch::fetch_zones(competition_id) {
                        Ok(zones) => {
                            let _ = tx.send(Delta::SetZones {
                                competition_id,
                                zones,
                            });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Zonas: {err}")));
                            let _ = tx.send(Delta::ZonesFailed {
                                competition_id,
                                error: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::FetchStandings {
                    competition_id,
                    zone,
                } => {
                    // The general view gets the extended table with recent form;
                    // zone views use the plain per-zone table.
                    let result = match zone.as_deref() {
                        Some(zone_name) => {
                            league_fetch::fetch_standings(competition_id, Some(zone_name))
                        }
                        None => league_fetch::fetch_standings_extended(competition_id),
                    };
                    match result {
                        Ok(rows) => {
                            let _ = tx.send(Delta::SetStandings {
                                competition_id,
                                zone,
                                rows,
                            });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Posiciones: {err}")));
                            let _ = tx.send(Delta::StandingsFailed {
                                competition_id,
                                zone,
                                error: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::FetchMatches => {
                    match league_fetch::fetch_matches(None, None) {
                        Ok(rows) => {
                            // Round labels are supplementary; the fixture tabs can
                            // be rebuilt from the matches alone if this call fails.
                            let rounds = match league_fetch::fetch_rounds() {
                                Ok(rounds) => rounds,
                                Err(err) => {
                                    let _ = tx.send(Delta::Log(format!("[WARN] Fechas: {err}")));
                                    Vec::new()
                                }
                            };
                            let _ = tx.send(Delta::SetMatches { rows, rounds });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Partidos: {err}")));
                            let _ = tx.send(Delta::MatchesFailed(err.to_string()));
                        }
                    }
                }
                ProviderCommand::FetchDayMatches { date } => {
                    match league_fetch::fetch_matches(Some(&date), None) {
                        Ok(rows) => {
                            let _ = tx.send(Delta::SetDayMatches { date, rows });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Partidos del día: {err}")));
                            let _ = tx.send(Delta::DayMatchesFailed {
                                date,
                                error: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::FetchCalendarDays { year, month } => {
                    match league_fetch::fetch_calendar_days(year, month) {
                        Ok(days) => {
                            let _ = tx.send(Delta::SetCalendarDays { year, month, days });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!("[WARN] Calendario: {err}")));
                            let _ = tx.send(Delta::CalendarDaysFailed {
                                year,
                                month,
                                error: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::FetchStats {
                    competition_id,
                    zone,
                } => {
                    // Six independent tables; one slow or broken endpoint must
                    // not hold the others back.
                    for job in stats_jobs(&tx, competition_id, zone) {
                        spawn_fetch(&pool, job);
                    }
                }
                ProviderCommand::FetchMatchDetail { match_id } => {
                    {
                        let mut inflight = inflight_details
                            .lock()
                            .expect("inflight detail lock poisoned");
                        if inflight.contains(&match_id) {
                            continue;
                        }
                        if inflight.len() >= inflight_max {
                            let _ = tx.send(Delta::MatchDetailFailed {
                                match_id,
                                error: "demasiadas consultas en curso".to_string(),
                            });
                            continue;
                        }
                        inflight.insert(match_id);
                    }

                    let tx = tx.clone();
                    let inflight_details = inflight_details.clone();
                    spawn_fetch(
                        &pool,
                        Box::new(move || {
                            match league_fetch::fetch_match_detail(match_id) {
                                Ok(detail) => {
                                    let _ = tx.send(Delta::SetMatchDetail { match_id, detail });
                                }
                                Err(err) => {
                                    let _ = tx.send(Delta::Log(format!(
                                        "[WARN] Detalle del partido {match_id}: {err}"
                                    )));
                                    let _ = tx.send(Delta::MatchDetailFailed {
                                        match_id,
                                        error: err.to_string(),
                                    });
                                }
                            }
                            let mut inflight = inflight_details
                                .lock()
                                .expect("inflight detail lock poisoned");
                            inflight.remove(&match_id);
                        }),
                    );
                }
                ProviderCommand::FetchPlayer { player_id } => {
                    {
                        let mut inflight = inflight_players
                            .lock()
                            .expect("inflight player lock poisoned");
                        if inflight.contains(&player_id) {
                            continue;
                        }
                        if inflight.len() >= inflight_max {
                            let _ = tx.send(Delta::PlayerFailed {
                                player_id,
                                error: "demasiadas consultas en curso".to_string(),
                            });
                            continue;
                        }
                        inflight.insert(player_id);
                    }

                    let tx = tx.clone();
                    let inflight_players = inflight_players.clone();
                    spawn_fetch(
                        &pool,
                        Box::new(move || {
                            // The player view needs all three payloads; a miss on
                            // any of them fails the whole load.
                            let result = stats_fetch::fetch_player(player_id).and_then(|info| {
                                let goals = stats_fetch::fetch_player_goals(player_id)?;
                                let sanctions = stats_fetch::fetch_player_sanctions(player_id)?;
                                Ok((info, goals, sanctions))
                            });
                            match result {
                                Ok((info, goals, sanctions)) => {
                                    let _ = tx.send(Delta::SetPlayer {
                                        player_id,
                                        info,
                                        goals,
                                        sanctions,
                                    });
                                }
                                Err(err) => {
                                    let _ = tx.send(Delta::Log(format!(
                                        "[WARN] Jugador {player_id}: {err}"
                                    )));
                                    let _ = tx.send(Delta::PlayerFailed {
                                        player_id,
                                        error: err.to_string(),
                                    });
                                }
                            }
                            let mut inflight = inflight_players
                                .lock()
                                .expect("inflight player lock poisoned");
                            inflight.remove(&player_id);
                        }),
                    );
                }
            }
        }
    });
}

fn stats_jobs(tx: &Sender<Delta>, competition_id: i64, zone: Option<String>) -> Vec<FetchJob> {
    vec![
        Box::new({
            let tx = tx.clone();
            move || match stats_fetch::fetch_card_totals(competition_id) {
                Ok(rows) => {
                    let _ = tx.send(Delta::SetCardTotals {
                        competition_id,
                        rows,
                    });
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Tarjetas: {err}")));
                    let _ = tx.send(Delta::CardTotalsFailed {
                        competition_id,
                        error: err.to_string(),
                    });
                }
            }
        }),
        Box::new({
            let tx = tx.clone();
            let zone = zone.clone();
            move || {
                match stats_fetch::fetch_top_scorers(
                    competition_id,
                    zone.as_deref(),
                    TOP_SCORERS_LIMIT,
                ) {
                    Ok(rows) => {
                        let _ = tx.send(Delta::SetScorers {
                            competition_id,
                            zone,
                            rows,
                        });
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!("[WARN] Goleadores: {err}")));
                        let _ = tx.send(Delta::ScorersFailed {
                            competition_id,
                            zone,
                            error: err.to_string(),
                        });
                    }
                }
            }
        }),
        Box::new({
            let tx = tx.clone();
            let zone = zone.clone();
            move || {
                match stats_fetch::fetch_sanction_ranking(competition_id, zone.as_deref()) {
                    Ok(rows) => {
                        let _ = tx.send(Delta::SetSanctions {
                            competition_id,
                            zone,
                            rows,
                        });
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!("[WARN] Sancionados: {err}")));
                        let _ = tx.send(Delta::SanctionsFailed {
                            competition_id,
                            zone,
                            error: err.to_string(),
                        });
                    }
                }
            }
        }),
        Box::new({
            let tx = tx.clone();
            move || match stats_fetch::fetch_streaks(competition_id) {
                Ok(rows) => {
                    let _ = tx.send(Delta::SetStreaks {
                        competition_id,
                        rows,
                    });
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Rachas: {err}")));
                    let _ = tx.send(Delta::StreaksFailed {
                        competition_id,
                        error: err.to_string(),
                    });
                }
            }
        }),
        Box::new({
            let tx = tx.clone();
            move || {
                match stats_fetch::fetch_clean_sheets(competition_id, zone.as_deref()) {
                    Ok(rows) => {
                        let _ = tx.send(Delta::SetCleanSheets {
                            competition_id,
                            zone,
                            rows,
                        });
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!("[WARN] Vallas: {err}")));
                        let _ = tx.send(Delta::CleanSheetsFailed {
                            competition_id,
                            zone,
                            error: err.to_string(),
                        });
                    }
                }
            }
        }),
        Box::new({
            let tx = tx.clone();
            move || match stats_fetch::fetch_goals_by_minute() {
                Ok(dist) => {
                    let _ = tx.send(Delta::SetGoalMinutes(dist));
                }
                Err(err) => {
                    let _ = tx.send(Delta::Log(format!("[WARN] Goles por minuto: {err}")));
                    let _ = tx.send(Delta::GoalMinutesFailed(err.to_string()));
                }
            }
        }),
    ]
}

fn spawn_fetch(pool: &Option<rayon::ThreadPool>, job: FetchJob) {
    if let Some(pool) = pool.as_ref() {
        pool.spawn(job);
    } else {
        thread::spawn(job);
    }
}

fn build_fetch_pool() -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(fetch_parallelism())
        .build()
        .ok()
}

fn fetch_parallelism() -> usize {
    env::var("FETCH_PARALLELISM")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(6)
        .clamp(2, 32)
}
