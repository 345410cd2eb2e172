use clap::Parser;
use maze_chase::autopilot::Autopilot;
use maze_chase::engine::GameSimulation;
use maze_chase::types::{Direction, RuntimeEvent, SimConfig, Snapshot};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    single: bool,
    #[arg(long)]
    ticks: Option<u64>,
    #[arg(long)]
    opening: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Serialize)]
struct Scenario {
    name: String,
    #[serde(rename = "maxTicks")]
    max_ticks: u64,
    opening: Direction,
    seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum EndReason {
    MazeCleared,
    GameOver,
    TickCap,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioResultLine {
    scenario: String,
    seed: u64,
    #[serde(rename = "maxTicks")]
    max_ticks: u64,
    reason: EndReason,
    #[serde(rename = "ticksRun")]
    ticks_run: u64,
    #[serde(rename = "finalScore")]
    final_score: i32,
    lives: i32,
    #[serde(rename = "pelletsEaten")]
    pellets_eaten: i32,
    #[serde(rename = "powerPelletsEaten")]
    power_pellets_eaten: i32,
    captures: i32,
    #[serde(rename = "lifeLosses")]
    life_losses: i32,
    resumes: i32,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug, Serialize)]
struct ScenarioRunResult {
    #[serde(flatten)]
    result: ScenarioResultLine,
    #[serde(rename = "anomalyRecords")]
    anomaly_records: Vec<AnomalyRecord>,
    finished_tick: u64,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(rename = "startedAtMs")]
    started_at_ms: u64,
    #[serde(rename = "finishedAtMs")]
    finished_at_ms: u64,
    #[serde(rename = "scenarioCount")]
    scenario_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averageTicksRun")]
    average_ticks_run: u64,
    #[serde(rename = "reasonCounts")]
    reason_counts: BTreeMap<String, usize>,
    scenarios: Vec<ScenarioResultLine>,
}

#[derive(Clone, Debug, Serialize)]
struct StructuredLogLine {
    #[serde(rename = "timestampMs")]
    timestamp_ms: u64,
    level: String,
    event: String,
    #[serde(rename = "matchId")]
    match_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

fn main() {
    let cli = Cli::parse();
    let scenarios = resolve_scenarios(&cli);
    let run_started_at_ms = now_ms();
    let seed_hint = scenarios.first().map(|scenario| scenario.seed).unwrap_or(0);
    let match_id = cli
        .match_id
        .clone()
        .unwrap_or_else(|| default_match_id(seed_hint, run_started_at_ms));
    let mut has_anomaly = false;
    let mut scenario_results = Vec::new();
    let mut reason_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_ticks = 0u64;
    let mut total_anomalies = 0usize;

    for scenario in scenarios {
        emit_log(
            "info",
            "scenario_started",
            &match_id,
            Some(&scenario.name),
            Some(scenario.seed),
            None,
            json!({
                "maxTicks": scenario.max_ticks,
                "opening": scenario.opening,
            }),
        );
        let scenario_run = run_scenario(&scenario);

        for anomaly in &scenario_run.anomaly_records {
            emit_log(
                "warn",
                "anomaly_detected",
                &match_id,
                Some(&scenario.name),
                Some(scenario.seed),
                Some(anomaly.tick),
                json!({
                    "message": anomaly.message,
                }),
            );
        }

        if !scenario_run.result.anomalies.is_empty() {
            has_anomaly = true;
        }
        total_anomalies += scenario_run.anomaly_records.len();
        total_ticks += scenario_run.result.ticks_run;
        *reason_counts
            .entry(end_reason_key(scenario_run.result.reason))
            .or_insert(0) += 1;

        emit_log(
            "info",
            "scenario_finished",
            &match_id,
            Some(&scenario.name),
            Some(scenario.seed),
            Some(scenario_run.finished_tick),
            json!({
                "reason": scenario_run.result.reason,
                "ticksRun": scenario_run.result.ticks_run,
                "finalScore": scenario_run.result.final_score,
                "anomalyCount": scenario_run.anomaly_records.len(),
            }),
        );

        println!(
            "{}",
            serde_json::to_string(&scenario_run.result).expect("scenario result should serialize")
        );
        scenario_results.push(scenario_run.result);
    }

    let run_finished_at_ms = now_ms();
    let summary = build_run_summary(
        match_id.clone(),
        run_started_at_ms,
        run_finished_at_ms,
        scenario_results.clone(),
        reason_counts,
        total_anomalies,
        total_ticks,
    );

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &match_id,
                None,
                None,
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &match_id,
        None,
        None,
        None,
        json!({
            "scenarioCount": summary.scenario_count,
            "anomalyCount": summary.anomaly_count,
            "averageTicksRun": summary.average_ticks_run,
            "reasonCounts": summary.reason_counts,
            "summaryOut": summary_out_written,
        }),
    );

    if has_anomaly {
        std::process::exit(1);
    }
}

fn run_scenario(scenario: &Scenario) -> ScenarioRunResult {
    let config = SimConfig::default();
    let mut sim =
        GameSimulation::new(config.clone()).expect("default simulation config should build");
    let mut pilot = Autopilot::new(scenario.seed);
    let mut opening = scenario.opening;

    let mut pellets_eaten = 0;
    let mut power_pellets_eaten = 0;
    let mut captures = 0;
    let mut life_losses = 0;
    let mut resumes = 0;
    let mut maze_cleared = false;
    let mut game_over = false;
    let mut anomalies = Vec::new();
    let mut anomaly_records = Vec::new();
    let mut anomaly_seen = HashSet::new();
    let mut last_tick = 0u64;

    while !sim.is_ended() && sim.tick_count() < scenario.max_ticks {
        if opening == Direction::None {
            sim.set_player_intent(pilot.choose_intent(&sim));
        } else {
            sim.set_player_intent(opening);
            opening = Direction::None;
        }
        if !sim.is_running() && !sim.is_ended() {
            sim.resume();
            resumes += 1;
        }
        sim.tick();

        let snapshot = sim.build_snapshot(true);
        last_tick = snapshot.tick;
        for message in collect_snapshot_anomalies(&snapshot, &config) {
            push_anomaly(
                &mut anomalies,
                &mut anomaly_records,
                &mut anomaly_seen,
                snapshot.tick,
                message,
            );
        }

        for event in &snapshot.events {
            match event {
                RuntimeEvent::PelletEaten { .. } => pellets_eaten += 1,
                RuntimeEvent::PowerPelletEaten { .. } => power_pellets_eaten += 1,
                RuntimeEvent::AdversaryCaptured { .. } => captures += 1,
                RuntimeEvent::LifeLost { .. } => life_losses += 1,
                RuntimeEvent::MazeCleared => maze_cleared = true,
                RuntimeEvent::GameOver => game_over = true,
                _ => {}
            }
        }
    }

    let reason = if maze_cleared {
        EndReason::MazeCleared
    } else if game_over {
        EndReason::GameOver
    } else {
        EndReason::TickCap
    };

    ScenarioRunResult {
        result: ScenarioResultLine {
            scenario: scenario.name.clone(),
            seed: scenario.seed,
            max_ticks: scenario.max_ticks,
            reason,
            ticks_run: sim.tick_count(),
            final_score: sim.score(),
            lives: sim.lives(),
            pellets_eaten,
            power_pellets_eaten,
            captures,
            life_losses,
            resumes,
            anomalies,
        },
        anomaly_records,
        finished_tick: last_tick,
    }
}

fn collect_snapshot_anomalies(snapshot: &Snapshot, config: &SimConfig) -> Vec<String> {
    let mut anomalies = Vec::new();
    if snapshot.score < 0 {
        anomalies.push(format!("negative score: {}", snapshot.score));
    }
    if snapshot.lives < 0 || snapshot.lives > config.initial_lives {
        anomalies.push(format!(
            "lives out of range: {} of {}",
            snapshot.lives, config.initial_lives
        ));
    }
    if snapshot.power_ticks_remaining > config.power_mode_ticks {
        anomalies.push(format!(
            "power timer above window: {}/{}",
            snapshot.power_ticks_remaining, config.power_mode_ticks
        ));
    }
    if !snapshot.power_active && snapshot.power_ticks_remaining != 0 {
        anomalies.push(format!(
            "power timer running while inactive: {}",
            snapshot.power_ticks_remaining
        ));
    }

    let rows = snapshot.grid.len() as i32;
    let cols = snapshot
        .grid
        .first()
        .map(|row| row.chars().count() as i32)
        .unwrap_or(0);
    let tile_size = config.tile_size;
    for entity in &snapshot.entities {
        let speed = if entity.is_player {
            config.player_speed
        } else {
            config.adversary_speed
        };
        if entity.x % speed != 0 || entity.y % speed != 0 {
            anomalies.push(format!(
                "entity off the speed lattice: ({}, {})",
                entity.x, entity.y
            ));
        }
        if entity.x < 0
            || entity.y < 0
            || entity.x > (cols - 1) * tile_size
            || entity.y > (rows - 1) * tile_size
        {
            anomalies.push(format!("entity out of bounds: ({}, {})", entity.x, entity.y));
            continue;
        }
        let row = (entity.y + tile_size / 2) / tile_size;
        let col = (entity.x + tile_size / 2) / tile_size;
        let cell = snapshot
            .grid
            .get(row as usize)
            .and_then(|line| line.chars().nth(col as usize));
        if cell == Some('#') {
            anomalies.push(format!("entity centered on a wall at ({row}, {col})"));
        }
    }

    let pellet_cells: i32 = snapshot
        .grid
        .iter()
        .map(|row| row.chars().filter(|tile| matches!(tile, '.' | 'o')).count() as i32)
        .sum();
    if pellet_cells != snapshot.pellets_remaining {
        anomalies.push(format!(
            "pellet count mismatch: grid has {} but counter says {}",
            pellet_cells, snapshot.pellets_remaining
        ));
    }
    anomalies
}

fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
    let seed = cli.seed.unwrap_or_else(now_ms);
    let opening = cli
        .opening
        .as_deref()
        .and_then(Direction::parse_move)
        .unwrap_or(Direction::None);

    if cli.single || cli.ticks.is_some() || cli.opening.is_some() {
        let max_ticks = clamp_u64(cli.ticks.unwrap_or(2_000), 1, 200_000);
        return vec![Scenario {
            name: format!("custom-{max_ticks}t"),
            max_ticks,
            opening,
            seed,
        }];
    }

    vec![
        Scenario {
            name: "quick-check-2k".to_string(),
            max_ticks: 2_000,
            opening: Direction::None,
            seed,
        },
        Scenario {
            name: "endurance-check-20k".to_string(),
            max_ticks: 20_000,
            opening: Direction::None,
            seed: seed.wrapping_add(1),
        },
    ]
}

fn clamp_u64(value: u64, min: u64, max: u64) -> u64 {
    value.clamp(min, max)
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    tick: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        tick,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_match_id(seed: u64, timestamp_ms: u64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    match_id: String,
    started_at_ms: u64,
    finished_at_ms: u64,
    scenarios: Vec<ScenarioResultLine>,
    reason_counts: BTreeMap<String, usize>,
    anomaly_count: usize,
    total_ticks: u64,
) -> RunSummary {
    let scenario_count = scenarios.len();
    let average_ticks_run = if scenario_count == 0 {
        0
    } else {
        total_ticks / scenario_count as u64
    };
    RunSummary {
        match_id,
        started_at_ms,
        finished_at_ms,
        scenario_count,
        anomaly_count,
        average_ticks_run,
        reason_counts,
        scenarios,
    }
}

fn emit_log(
    level: &str,
    event: &str,
    match_id: &str,
    scenario: Option<&str>,
    seed: Option<u64>,
    tick: Option<u64>,
    details: Value,
) {
    let log_line = StructuredLogLine {
        timestamp_ms: now_ms(),
        level: level.to_string(),
        event: event.to_string(),
        match_id: match_id.to_string(),
        scenario: scenario.map(|value| value.to_string()),
        seed,
        tick,
        details,
    };
    eprintln!(
        "{}",
        serde_json::to_string(&log_line).expect("structured log should serialize")
    );
}

fn end_reason_key(reason: EndReason) -> String {
    match reason {
        EndReason::MazeCleared => "maze_cleared",
        EndReason::GameOver => "game_over",
        EndReason::TickCap => "tick_cap",
    }
    .to_string()
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).expect("run summary should serialize");
    std::fs::write(path, summary_text)
}
