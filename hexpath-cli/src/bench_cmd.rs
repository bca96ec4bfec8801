//! Bench command - time searches on a random obstacle field
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_area(), run_sequential(), run_parallel(), report_results()
//! - Level 3: random_requests(), tally()
//! - Level 4: configuration and formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hexpath_core::{
    Area, AreaBounds, AreaMap, AreaObject, Hex, MoveError, MovePlan, MoveRequest, ObjectKind, Pathfinder,
    SearchConfig, SearchOutcome,
};

const BENCH_AREA: i64 = 1;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Area width and height in cells
    #[arg(long, default_value = "64")]
    pub size: i32,

    /// Fraction of cells occupied by obstacles
    #[arg(long, default_value = "0.3")]
    pub density: f64,

    /// Number of searches to run
    #[arg(long, default_value = "500")]
    pub searches: usize,

    /// Stop each search after this many expansions
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Outcome counts for one batch
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Tally {
    reached: usize,
    blocked_goal: usize,
    no_path: usize,
    limit_reached: usize,
    errors: usize,
    expanded: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
///
/// This function reads like a table of contents:
/// 1. Generate a random area and move requests
/// 2. Time them sequentially and in parallel
/// 3. Report results
pub fn run(args: BenchArgs) -> Result<()> {
    validate_args(&args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    tracing::info!(
        "Starting benchmark: {}x{} area, density {:.2}, {} searches, seed {}",
        args.size,
        args.size,
        args.density,
        args.searches,
        seed
    );

    let area = generate_area(&mut rng, args.size, args.density);
    let requests = random_requests(&mut rng, args.size, args.searches);
    let world = AreaMap::from_areas([area]);

    let mut config = SearchConfig::default();
    if let Some(n) = args.max_expansions {
        config = config.with_max_expansions(n);
    }
    let pathfinder = Pathfinder::new(config);

    let (seq_plans, seq_time) = run_sequential(&pathfinder, &world, &requests);
    let (par_plans, par_time) = run_parallel(&pathfinder, &world, &requests);

    let seq_tally = tally(&seq_plans);
    if seq_tally != tally(&par_plans) {
        tracing::warn!("Sequential and parallel runs disagree");
    }

    report_results(&seq_tally, requests.len(), seq_time, par_time);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Random obstacle field; each occupied cell is its own neutral object
fn generate_area<R: Rng>(rng: &mut R, size: i32, density: f64) -> Area {
    let bounds = AreaBounds::new(size, size);
    let mut area = Area::new(BENCH_AREA).with_bounds(bounds);

    for (i, cell) in bounds.cells().enumerate() {
        if rng.gen_bool(density) {
            area.objects.push(AreaObject::new(i as i64, ObjectKind::Neutral, vec![cell]));
        }
    }

    area
}

fn run_sequential(
    pathfinder: &Pathfinder,
    world: &AreaMap,
    requests: &[MoveRequest],
) -> (Vec<Result<MovePlan, MoveError>>, Duration) {
    let start = Instant::now();
    let plans = requests
        .iter()
        .map(|r| pathfinder.plan_move(world, r))
        .collect();
    (plans, start.elapsed())
}

fn run_parallel(
    pathfinder: &Pathfinder,
    world: &AreaMap,
    requests: &[MoveRequest],
) -> (Vec<Result<MovePlan, MoveError>>, Duration) {
    let start = Instant::now();
    let plans = pathfinder.plan_moves(world, requests);
    (plans, start.elapsed())
}

fn report_results(tally: &Tally, searches: usize, seq_time: Duration, par_time: Duration) {
    println!("\n=== Benchmark Results ===");
    println!("Searches:       {}", searches);
    println!("Reached:        {}", tally.reached);
    println!("Blocked goal:   {}", tally.blocked_goal);
    println!("No path:        {}", tally.no_path);
    println!("Limit reached:  {}", tally.limit_reached);
    println!("Errors:         {}", tally.errors);
    println!(
        "Avg expansions: {:.1}",
        tally.expanded as f64 / searches.max(1) as f64
    );
    println!(
        "Sequential:     {} ({})",
        format_duration(seq_time),
        format_rate(searches, seq_time)
    );
    println!(
        "Parallel:       {} ({})",
        format_duration(par_time),
        format_rate(searches, par_time)
    );
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn random_requests<R: Rng>(rng: &mut R, size: i32, count: usize) -> Vec<MoveRequest> {
    (0..count)
        .map(|_| {
            let from = Hex::new(rng.gen_range(0..size), rng.gen_range(0..size));
            let to = Hex::new(rng.gen_range(0..size), rng.gen_range(0..size));
            MoveRequest::new(from, to, BENCH_AREA)
        })
        .collect()
}

fn tally(plans: &[Result<MovePlan, MoveError>]) -> Tally {
    let mut t = Tally::default();
    for plan in plans {
        match plan {
            Ok(plan) => {
                t.expanded += plan.outcome.expanded();
                match plan.outcome {
                    SearchOutcome::Reached { .. } => t.reached += 1,
                    SearchOutcome::BlockedGoal => t.blocked_goal += 1,
                    SearchOutcome::Exhausted { .. } => t.no_path += 1,
                    SearchOutcome::LimitReached { .. } => t.limit_reached += 1,
                }
            }
            Err(_) => t.errors += 1,
        }
    }
    t
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn validate_args(args: &BenchArgs) -> Result<()> {
    if args.size <= 0 {
        anyhow::bail!("Area size must be positive, got {}", args.size);
    }
    if !(0.0..=1.0).contains(&args.density) {
        anyhow::bail!("Density must be within 0..=1, got {}", args.density);
    }
    SearchConfig::default()
        .with_bounds(AreaBounds::new(args.size, args.size))
        .validate()
        .context("Area size exceeds the supported coordinate range")?;
    Ok(())
}

fn format_duration(d: Duration) -> String {
    if d.as_secs() > 0 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{:.2}ms", d.as_secs_f64() * 1000.0)
    }
}

fn format_rate(searches: usize, d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs > 0.0 {
        format!("{:.0} searches/s", searches as f64 / secs)
    } else {
        "n/a".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================
