//! Route command - plan the moves of a scenario file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_scenario(), plan_all(), report_results()
//! - Level 3: describe_plan()
//! - Level 4: scenario format and configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use hexpath_core::{Area, AreaMap, Hex, MoveError, MovePlan, MoveRequest, Pathfinder, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RouteArgs {
    /// Scenario JSON file (areas and move requests)
    #[arg(long, value_name = "FILE")]
    pub scenario: PathBuf,

    /// Stop each search after this many expansions
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Per-search time limit in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Accepted coordinate range (±limit)
    #[arg(long)]
    pub coordinate_limit: Option<i32>,

    /// Plan moves in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// Scenario file: world state plus the moves to check against it
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SearchConfig,
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub moves: Vec<MoveRequest>,
}

impl Scenario {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// One line of the report
#[derive(Clone, Debug, Serialize)]
struct MoveReport {
    index: usize,
    area_id: i64,
    from: Hex,
    to: Hex,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u64>,
    expanded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    travel_time_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Vec<Hex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run route command
///
/// This function reads like a table of contents:
/// 1. Load the scenario
/// 2. Plan every move
/// 3. Report results
pub fn run(args: RouteArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let config = build_config(&scenario.config, &args);

    tracing::info!(
        "Planning {} moves across {} areas (parallel={})",
        scenario.moves.len(),
        scenario.areas.len(),
        args.parallel
    );

    let world = AreaMap::from_areas(scenario.areas);
    let pathfinder = Pathfinder::new(config);
    let plans = plan_all(&pathfinder, &world, &scenario.moves, args.parallel);

    report_results(&scenario.moves, &plans, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_scenario(path: &Path) -> Result<Scenario> {
    Scenario::load(path).with_context(|| format!("Failed to load scenario: {}", path.display()))
}

fn plan_all(
    pathfinder: &Pathfinder,
    world: &AreaMap,
    moves: &[MoveRequest],
    parallel: bool,
) -> Vec<Result<MovePlan, MoveError>> {
    if parallel {
        pathfinder.plan_moves(world, moves)
    } else {
        moves.iter().map(|m| pathfinder.plan_move(world, m)).collect()
    }
}

fn report_results(
    moves: &[MoveRequest],
    plans: &[Result<MovePlan, MoveError>],
    json: bool,
) -> Result<()> {
    let reports: Vec<MoveReport> = moves
        .iter()
        .zip(plans)
        .enumerate()
        .map(|(i, (request, plan))| describe_plan(i, request, plan))
        .collect();

    if json {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
        return Ok(());
    }

    println!("\n=== Move Plans ===");
    for report in &reports {
        print!(
            "#{:<3} area {:<4} {} -> {}  {}",
            report.index, report.area_id, report.from, report.to, report.status
        );
        if let (Some(steps), Some(cost)) = (report.steps, report.cost) {
            print!("  steps={} cost={}", steps, cost);
        }
        if let Some(secs) = report.travel_time_secs {
            print!("  eta={:.2}s", secs);
        }
        if let Some(error) = &report.error {
            print!("  ({})", error);
        }
        println!("  expanded={}", report.expanded);
    }

    let reachable = reports.iter().filter(|r| r.status == "reached").count();
    println!("\n{} of {} moves reachable", reachable, reports.len());

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn describe_plan(index: usize, request: &MoveRequest, plan: &Result<MovePlan, MoveError>) -> MoveReport {
    let mut report = MoveReport {
        index,
        area_id: request.area_id,
        from: request.from,
        to: request.to,
        status: "error",
        steps: None,
        cost: None,
        expanded: 0,
        travel_time_secs: None,
        route: None,
        error: None,
    };

    match plan {
        Ok(plan) => {
            report.status = plan.outcome.label();
            report.expanded = plan.outcome.expanded();
            if let Some(route) = plan.outcome.route() {
                report.steps = Some(route.steps());
                report.cost = Some(route.cost);
                report.route = Some(route.cells.clone());
            }
            report.travel_time_secs = plan.travel_time.map(|d| d.as_secs_f64());
        }
        Err(err) => {
            report.status = match err {
                MoveError::ObstaclesUnavailable { .. } => "unavailable",
                MoveError::InvalidInput(_) => "invalid_input",
            };
            report.error = Some(error_chain(err));
        }
    }

    report
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Merge command-line overrides into the scenario's configuration
fn build_config(base: &SearchConfig, args: &RouteArgs) -> SearchConfig {
    let mut config = base.clone();
    if let Some(n) = args.max_expansions {
        config.max_expansions = Some(n);
    }
    if let Some(ms) = args.time_limit_ms {
        config.time_limit_ms = Some(ms);
    }
    if let Some(limit) = args.coordinate_limit {
        config.coordinate_limit = limit;
    }
    config
}

/// Render an error and its sources as `outer: inner: ...`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        rendered.push_str(": ");
        rendered.push_str(&inner.to_string());
        source = inner.source();
    }
    rendered
}

// ============================================================================
// TESTS
// ============================================================================
