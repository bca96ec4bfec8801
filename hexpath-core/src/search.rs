//! A* search over the hex grid
//!
//! Implements the core search:
//! 1. Validation - reject coordinates outside the configured region
//! 2. Early exit - a blocked goal is never searched for
//! 3. Expansion - pop the cheapest frontier node, relax its neighbours
//! 4. Reconstruction - walk predecessor links back from the goal
//!
//! ## Architecture
//! - Level 1: move planning (fetch obstacles, search, travel time)
//! - Level 2: search coordination and validation
//! - Level 3: the A* loop
//! - Level 4: route reconstruction and utilities

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::{validate_bounds, AreaBounds, SearchConfig};
use crate::error::{MoveError, SearchError};
use crate::frontier::{Frontier, SearchNode};
use crate::hex::{distance, heuristic, Cost, Hex, STEP_COST};
use crate::obstacles::{AreaId, ObstacleSet, ObstacleSource};

/// Expansions between deadline checks
const DEADLINE_CHECK_INTERVAL: usize = 256;

// ============================================================================
// RESULTS
// ============================================================================

/// A path from start to goal, both inclusive
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub cells: Vec<Hex>,
    pub cost: Cost,
}

impl Route {
    /// Number of moves along the route
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Hex> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Hex> {
        self.cells.last().copied()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.cells.contains(&hex)
    }

    /// Time to walk the route at `speed` cells per second.
    ///
    /// `None` for non-positive or non-finite speeds, or when the result does
    /// not fit in a `Duration`.
    pub fn duration_at(&self, speed: f64) -> Option<Duration> {
        if !speed.is_finite() || speed <= 0.0 {
            return None;
        }
        Duration::try_from_secs_f64(self.steps() as f64 / speed).ok()
    }
}

/// Which configured limit stopped a search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchLimit {
    Expansions(usize),
    Deadline(Duration),
}

impl fmt::Display for SearchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLimit::Expansions(n) => write!(f, "expansion limit {}", n),
            SearchLimit::Deadline(d) => write!(f, "time limit {}ms", d.as_millis()),
        }
    }
}

/// How a search ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Goal popped from the frontier
    Reached { route: Route, expanded: usize },
    /// Goal is occupied; no search was attempted
    BlockedGoal,
    /// Frontier emptied without reaching the goal
    Exhausted { expanded: usize },
    /// A configured limit stopped the search before it finished
    LimitReached { limit: SearchLimit, expanded: usize },
}

impl SearchOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, SearchOutcome::Reached { .. })
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Reached { route, .. } => Some(route),
            _ => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            SearchOutcome::Reached { route, .. } => Some(route),
            _ => None,
        }
    }

    /// Nodes expanded before the search ended
    pub fn expanded(&self) -> usize {
        match self {
            SearchOutcome::Reached { expanded, .. }
            | SearchOutcome::Exhausted { expanded }
            | SearchOutcome::LimitReached { expanded, .. } => *expanded,
            SearchOutcome::BlockedGoal => 0,
        }
    }

    /// Short machine-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            SearchOutcome::Reached { .. } => "reached",
            SearchOutcome::BlockedGoal => "blocked_goal",
            SearchOutcome::Exhausted { .. } => "no_path",
            SearchOutcome::LimitReached { .. } => "limit_reached",
        }
    }
}

/// A request to move an object across an area
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Hex,
    pub to: Hex,
    pub area_id: AreaId,
    /// Cells per second
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl MoveRequest {
    pub fn new(from: Hex, to: Hex, area_id: AreaId) -> Self {
        Self {
            from,
            to,
            area_id,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Result of serving a [`MoveRequest`]
#[derive(Clone, Debug, PartialEq)]
pub struct MovePlan {
    pub request: MoveRequest,
    pub outcome: SearchOutcome,
    /// Set when a route exists and the request carried a usable speed
    pub travel_time: Option<Duration>,
}

// ============================================================================
// PATHFINDER
// ============================================================================

/// A* engine. Holds configuration only, so one instance can serve any number
/// of concurrent searches.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    config: SearchConfig,
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Level 1 - move planning
    // ------------------------------------------------------------------------

    /// Serve one move request against an injected obstacle source.
    ///
    /// Source failures come back as [`MoveError::ObstaclesUnavailable`], kept
    /// apart from searches that ran and found nothing.
    pub fn plan_move<S>(&self, source: &S, request: &MoveRequest) -> Result<MovePlan, MoveError>
    where
        S: ObstacleSource + ?Sized,
    {
        self.config.validate()?;

        let coordinates = source.obstacles(request.area_id).map_err(|err| {
            tracing::warn!("Obstacle lookup for area {} failed: {}", request.area_id, err);
            MoveError::ObstaclesUnavailable {
                area: request.area_id,
                source: err,
            }
        })?;

        let limit = self.config.coordinate_limit;
        if let Some(&hex) = coordinates.iter().find(|h| !h.within_limit(limit)) {
            return Err(SearchError::CoordinateOutOfRange { hex, limit }.into());
        }

        let obstacles = ObstacleSet::build(coordinates);
        let bounds = source.bounds(request.area_id).or(self.config.bounds);
        let outcome = self.search_within(request.from, request.to, &obstacles, bounds)?;

        let travel_time = match (outcome.route(), request.speed) {
            (Some(route), Some(speed)) => route.duration_at(speed),
            _ => None,
        };

        Ok(MovePlan {
            request: request.clone(),
            outcome,
            travel_time,
        })
    }

    /// Serve many move requests in parallel. Results keep request order.
    pub fn plan_moves<S>(&self, source: &S, requests: &[MoveRequest]) -> Vec<Result<MovePlan, MoveError>>
    where
        S: ObstacleSource + Sync + ?Sized,
    {
        requests
            .par_iter()
            .map(|request| self.plan_move(source, request))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Level 2 - search coordination
    // ------------------------------------------------------------------------

    /// Search from `start` to `goal` around `obstacles`.
    ///
    /// The start cell may be occupied (usually by the mover itself); only the
    /// goal and intermediate cells are checked against the obstacle set.
    pub fn search(&self, start: Hex, goal: Hex, obstacles: &ObstacleSet) -> Result<SearchOutcome, SearchError> {
        self.search_within(start, goal, obstacles, self.config.bounds)
    }

    /// Reachability only
    pub fn find_path(&self, start: Hex, goal: Hex, obstacles: &ObstacleSet) -> Result<bool, SearchError> {
        Ok(self.search(start, goal, obstacles)?.is_reachable())
    }

    /// Reconstructed route, if the goal is reachable
    pub fn find_route(&self, start: Hex, goal: Hex, obstacles: &ObstacleSet) -> Result<Option<Route>, SearchError> {
        Ok(self.search(start, goal, obstacles)?.into_route())
    }

    fn search_within(
        &self,
        start: Hex,
        goal: Hex,
        obstacles: &ObstacleSet,
        bounds: Option<AreaBounds>,
    ) -> Result<SearchOutcome, SearchError> {
        self.config.validate()?;
        if let Some(bounds) = bounds {
            validate_bounds(bounds, self.config.coordinate_limit)?;
        }

        let region = Region {
            limit: self.config.coordinate_limit,
            bounds,
        };
        region.check(start)?;
        region.check(goal)?;

        if obstacles.is_blocked(goal) {
            tracing::debug!("Goal {} is occupied, skipping search", goal);
            return Ok(SearchOutcome::BlockedGoal);
        }

        tracing::debug!(
            "Searching {} -> {} ({} obstacles)",
            start,
            goal,
            obstacles.len()
        );

        let limits = Limits {
            max_expansions: self.config.max_expansions,
            time_limit: self.config.time_limit(),
        };
        let outcome = run_astar(start, goal, obstacles, &region, &limits);

        match &outcome {
            SearchOutcome::Reached { route, expanded } => tracing::debug!(
                "Reached {} in {} steps after {} expansions",
                goal,
                route.steps(),
                expanded
            ),
            SearchOutcome::Exhausted { expanded } => {
                tracing::debug!("No path to {} after {} expansions", goal, expanded)
            }
            SearchOutcome::LimitReached { limit, expanded } => tracing::warn!(
                "Search {} -> {} stopped by {} after {} expansions",
                start,
                goal,
                limit,
                expanded
            ),
            SearchOutcome::BlockedGoal => {}
        }

        Ok(outcome)
    }
}

/// Reachability from `start` to `goal` with the default configuration.
///
/// An unreachable goal on the open plane stops at the default expansion cap
/// and reports `false`.
pub fn find_path(start: Hex, goal: Hex, obstacles: &ObstacleSet) -> Result<bool, SearchError> {
    Pathfinder::default().find_path(start, goal, obstacles)
}

/// Route from `start` to `goal` with the default configuration
pub fn find_route(start: Hex, goal: Hex, obstacles: &ObstacleSet) -> Result<Option<Route>, SearchError> {
    Pathfinder::default().find_route(start, goal, obstacles)
}

// ============================================================================
// A* LOOP (Level 3)
// ============================================================================

/// Cells a search may visit
struct Region {
    limit: i32,
    bounds: Option<AreaBounds>,
}

impl Region {
    fn allows(&self, hex: Hex) -> bool {
        hex.within_limit(self.limit) && self.bounds.map_or(true, |b| b.contains(hex))
    }

    fn check(&self, hex: Hex) -> Result<(), SearchError> {
        if !hex.within_limit(self.limit) {
            return Err(SearchError::CoordinateOutOfRange {
                hex,
                limit: self.limit,
            });
        }
        match self.bounds {
            Some(bounds) if !bounds.contains(hex) => Err(SearchError::OutsideArea { hex, bounds }),
            _ => Ok(()),
        }
    }
}

struct Limits {
    max_expansions: Option<usize>,
    time_limit: Option<Duration>,
}

fn run_astar(start: Hex, goal: Hex, obstacles: &ObstacleSet, region: &Region, limits: &Limits) -> SearchOutcome {
    let deadline = limits
        .time_limit
        .and_then(|t| Instant::now().checked_add(t).map(|at| (at, t)));

    let mut frontier = Frontier::new();
    let mut cost_so_far: FxHashMap<Hex, Cost> = FxHashMap::default();
    let mut came_from: FxHashMap<Hex, Hex> = FxHashMap::default();

    frontier.push(SearchNode::new(start, 0, heuristic(start, goal)));
    cost_so_far.insert(start, 0);
    came_from.insert(start, start);

    let mut expanded = 0usize;

    while let Some(current) = frontier.pop() {
        // Stale copy left behind by a cheaper rediscovery.
        if cost_so_far
            .get(&current.hex)
            .is_some_and(|&best| current.cost > best)
        {
            continue;
        }

        if current.hex == goal {
            let route = reconstruct_route(&came_from, start, goal, current.cost);
            return SearchOutcome::Reached { route, expanded };
        }

        if let Some(max) = limits.max_expansions {
            if expanded >= max {
                return SearchOutcome::LimitReached {
                    limit: SearchLimit::Expansions(max),
                    expanded,
                };
            }
        }
        if let Some((deadline, time_limit)) = deadline {
            if expanded % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return SearchOutcome::LimitReached {
                    limit: SearchLimit::Deadline(time_limit),
                    expanded,
                };
            }
        }
        expanded += 1;

        for next in current.hex.neighbours() {
            if obstacles.is_blocked(next) || !region.allows(next) {
                continue;
            }

            let new_cost = current.cost + distance(current.hex, next);
            let improved = cost_so_far.get(&next).map_or(true, |&known| new_cost < known);
            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current.hex);
                frontier.push(SearchNode::new(next, new_cost, new_cost + heuristic(next, goal)));
            }
        }
    }

    SearchOutcome::Exhausted { expanded }
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

/// Walk predecessor links from `goal` back to `start` (which links to itself)
fn reconstruct_route(came_from: &FxHashMap<Hex, Hex>, start: Hex, goal: Hex, cost: Cost) -> Route {
    let mut cells = vec![goal];
    let mut at = goal;
    while at != start {
        match came_from.get(&at) {
            Some(&prev) => {
                cells.push(prev);
                at = prev;
            }
            None => break,
        }
    }
    cells.reverse();

    debug_assert_eq!(cost, STEP_COST * (cells.len() as Cost - 1));
    Route { cells, cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_EXPANSIONS;
    use crate::hex::neighbours;
    use crate::obstacles::{Area, AreaMap, AreaObject, ObjectKind, SourceError};

    fn blocked(cells: &[(i32, i32)]) -> ObstacleSet {
        cells.iter().map(|&c| Hex::from(c)).collect()
    }

    fn small_world() -> Pathfinder {
        Pathfinder::new(SearchConfig::default().with_coordinate_limit(8))
    }

    fn assert_valid_route(route: &Route, start: Hex, goal: Hex, obstacles: &ObstacleSet) {
        assert_eq!(route.start(), Some(start));
        assert_eq!(route.goal(), Some(goal));
        assert_eq!(route.cost, STEP_COST * route.steps() as Cost);
        for pair in route.cells.windows(2) {
            assert_eq!(distance(pair[0], pair[1]), STEP_COST, "{} -> {}", pair[0], pair[1]);
        }
        for cell in &route.cells[1..] {
            assert!(!obstacles.is_blocked(*cell), "route crosses obstacle {}", cell);
        }
    }

    #[test]
    fn test_open_grid_is_reachable() {
        let obstacles = ObstacleSet::default();
        let start = Hex::new(0, 0);
        let goal = Hex::new(3, 4);

        assert!(find_path(start, goal, &obstacles).unwrap());

        let route = find_route(start, goal, &obstacles).unwrap().unwrap();
        assert_valid_route(&route, start, goal, &obstacles);
        assert_eq!(route.cost, distance(start, goal));
        assert_eq!(route.steps(), 7);
    }

    #[test]
    fn test_blocked_goal() {
        let obstacles = blocked(&[(2, 2)]);
        let outcome = Pathfinder::default()
            .search(Hex::new(0, 0), Hex::new(2, 2), &obstacles)
            .unwrap();
        assert_eq!(outcome, SearchOutcome::BlockedGoal);
        assert!(!outcome.is_reachable());

        // Adjacent or far, a blocked goal is never reachable
        assert!(!find_path(Hex::new(2, 1), Hex::new(2, 2), &obstacles).unwrap());
        assert!(!find_path(Hex::new(-500, 900), Hex::new(2, 2), &obstacles).unwrap());
    }

    #[test]
    fn test_start_equals_goal() {
        let obstacles = blocked(&[(1, 0), (0, 1)]);
        let outcome = Pathfinder::default()
            .search(Hex::new(4, 4), Hex::new(4, 4), &obstacles)
            .unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(route.cells, vec![Hex::new(4, 4)]);
        assert_eq!(route.cost, 0);
        assert_eq!(outcome.expanded(), 0);
    }

    #[test]
    fn test_occupied_start_can_still_move() {
        let obstacles = blocked(&[(0, 0)]);
        let route = find_route(Hex::new(0, 0), Hex::new(2, 0), &obstacles).unwrap().unwrap();
        assert_eq!(route.cells, vec![Hex::new(0, 0), Hex::new(1, 0), Hex::new(2, 0)]);
    }

    #[test]
    fn test_complete_ring_exhausts() {
        let goal = Hex::new(0, 0);
        let obstacles: ObstacleSet = neighbours(goal).into_iter().collect();

        let outcome = small_world().search(Hex::new(4, -2), goal, &obstacles).unwrap();
        match outcome {
            SearchOutcome::Exhausted { expanded } => {
                // Every open cell of the 17x17 region gets expanded once
                assert_eq!(expanded, 17 * 17 - 7);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[test]
    fn test_enclosed_goal_on_open_plane_terminates() {
        let goal = Hex::new(0, 0);
        let obstacles: ObstacleSet = neighbours(goal).into_iter().collect();
        let start = Hex::new(3, 0);

        let outcome = Pathfinder::default().search(start, goal, &obstacles).unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::LimitReached {
                limit: SearchLimit::Expansions(DEFAULT_MAX_EXPANSIONS),
                expanded: DEFAULT_MAX_EXPANSIONS
            }
        );
        assert!(!find_path(start, goal, &obstacles).unwrap());
    }

    #[test]
    fn test_ring_with_gap() {
        let goal = Hex::new(0, 0);
        let gap = Hex::new(-1, 1);
        let obstacles: ObstacleSet = neighbours(goal).into_iter().filter(|&h| h != gap).collect();
        let start = Hex::new(4, -2);

        let route = small_world().find_route(start, goal, &obstacles).unwrap().unwrap();
        assert_valid_route(&route, start, goal, &obstacles);
        assert!(route.contains(gap));
        assert_eq!(route.cells[route.cells.len() - 2], gap);
        assert!(route.cost > distance(start, goal));
    }

    #[test]
    fn test_wall_detour_is_shortest() {
        // Vertical wall at q = 2 from r = -3..=3, start and goal on either side
        let wall: Vec<(i32, i32)> = (-3..=3).map(|r| (2, r)).collect();
        let obstacles = blocked(&wall);
        let start = Hex::new(0, 0);
        let goal = Hex::new(4, 0);

        let route = small_world().find_route(start, goal, &obstacles).unwrap().unwrap();
        assert_valid_route(&route, start, goal, &obstacles);
        // Every crossing of column q = 2 is at r <= -4 or r >= 4
        assert_eq!(route.steps(), 10);
        assert!(route.cells.iter().any(|h| h.q == 2 && h.r.abs() >= 4));
    }

    #[test]
    fn test_idempotent() {
        let obstacles = blocked(&[(1, 0), (1, -1), (0, 1), (3, 3), (2, 2)]);
        let finder = small_world();
        let first = finder.search(Hex::new(-2, 0), Hex::new(4, 1), &obstacles).unwrap();
        let second = finder.search(Hex::new(-2, 0), Hex::new(4, 1), &obstacles).unwrap();
        assert_eq!(first, second);
        assert!(first.is_reachable());
    }

    #[test]
    fn test_expansion_limit() {
        let finder = Pathfinder::new(SearchConfig::default().with_max_expansions(3));
        let outcome = finder
            .search(Hex::new(0, 0), Hex::new(40, 0), &ObstacleSet::default())
            .unwrap();
        assert_eq!(
            outcome,
            SearchOutcome::LimitReached {
                limit: SearchLimit::Expansions(3),
                expanded: 3
            }
        );

        // A goal within the cap is still found
        let outcome = finder
            .search(Hex::new(0, 0), Hex::new(1, 0), &ObstacleSet::default())
            .unwrap();
        assert!(outcome.is_reachable());
    }

    #[test]
    fn test_time_limit() {
        let finder = Pathfinder::new(SearchConfig::default().with_time_limit_ms(0));
        let outcome = finder
            .search(Hex::new(0, 0), Hex::new(10, 0), &ObstacleSet::default())
            .unwrap();
        assert!(matches!(
            outcome,
            SearchOutcome::LimitReached {
                limit: SearchLimit::Deadline(_),
                ..
            }
        ));
        assert_eq!(outcome.label(), "limit_reached");
    }

    #[test]
    fn test_rejects_out_of_range() {
        let finder = small_world();
        let err = finder
            .search(Hex::new(0, 0), Hex::new(9, 0), &ObstacleSet::default())
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::CoordinateOutOfRange {
                hex: Hex::new(9, 0),
                limit: 8
            }
        );

        assert!(finder
            .search(Hex::new(0, -20), Hex::new(0, 0), &ObstacleSet::default())
            .is_err());
    }

    #[test]
    fn test_bounds_limit_expansion() {
        let bounds = AreaBounds::new(4, 4);
        let finder = Pathfinder::new(SearchConfig::default().with_bounds(bounds));

        let err = finder
            .search(Hex::new(0, 0), Hex::new(-1, 0), &ObstacleSet::default())
            .unwrap_err();
        assert_eq!(err, SearchError::OutsideArea { hex: Hex::new(-1, 0), bounds });

        // Wall across the whole area width cuts it in two
        let wall = blocked(&[(0, 2), (1, 2), (2, 2), (3, 2)]);
        let outcome = finder.search(Hex::new(0, 0), Hex::new(3, 3), &wall).unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted { expanded: 8 });
    }

    #[test]
    fn test_route_duration() {
        let route = Route {
            cells: vec![Hex::new(0, 0), Hex::new(1, 0), Hex::new(2, 0)],
            cost: 4,
        };
        assert_eq!(route.duration_at(2.0), Some(Duration::from_secs(1)));
        assert_eq!(route.duration_at(0.0), None);
        assert_eq!(route.duration_at(-1.0), None);
        assert_eq!(route.duration_at(f64::NAN), None);
    }

    // ------------------------------------------------------------------------
    // move planning
    // ------------------------------------------------------------------------

    fn arena() -> AreaMap {
        AreaMap::from_areas([Area::new(1)
            .with_bounds(AreaBounds::new(6, 6))
            .with_object(AreaObject::new(1, ObjectKind::Hero, vec![Hex::new(0, 0)]))
            .with_object(AreaObject::new(
                2,
                ObjectKind::Building,
                vec![Hex::new(2, 1), Hex::new(2, 2), Hex::new(2, 3)],
            ))
            .with_object(AreaObject::new(3, ObjectKind::Neutral, vec![Hex::new(5, 5)]))])
    }

    #[test]
    fn test_plan_move() {
        let request = MoveRequest::new(Hex::new(0, 0), Hex::new(4, 2), 1).with_speed(4.0);
        let plan = Pathfinder::default().plan_move(&arena(), &request).unwrap();

        let route = plan.outcome.route().unwrap();
        assert!(!route.contains(Hex::new(2, 2)));
        assert_eq!(plan.travel_time, route.duration_at(4.0));
        assert!(plan.travel_time.is_some());
    }

    #[test]
    fn test_plan_move_uses_area_bounds() {
        let request = MoveRequest::new(Hex::new(0, 0), Hex::new(6, 0), 1);
        let err = Pathfinder::default().plan_move(&arena(), &request).unwrap_err();
        assert!(matches!(err, MoveError::InvalidInput(SearchError::OutsideArea { .. })));

        let request = MoveRequest::new(Hex::new(0, 0), Hex::new(5, 5), 1);
        let plan = Pathfinder::default().plan_move(&arena(), &request).unwrap();
        assert_eq!(plan.outcome, SearchOutcome::BlockedGoal);
        assert_eq!(plan.travel_time, None);
    }

    #[test]
    fn test_plan_move_source_failure() {
        let source = |_: AreaId| -> Result<Vec<Hex>, SourceError> {
            Err(SourceError::Unavailable("storage offline".to_string()))
        };
        let request = MoveRequest::new(Hex::new(0, 0), Hex::new(1, 0), 9);
        let err = Pathfinder::default().plan_move(&source, &request).unwrap_err();
        match err {
            MoveError::ObstaclesUnavailable { area, source } => {
                assert_eq!(area, 9);
                assert_eq!(source, SourceError::Unavailable("storage offline".to_string()));
            }
            other => panic!("expected source failure, got {:?}", other),
        }

        let err = Pathfinder::default()
            .plan_move(&arena(), &MoveRequest::new(Hex::new(0, 0), Hex::new(1, 0), 2))
            .unwrap_err();
        assert!(matches!(err, MoveError::ObstaclesUnavailable { area: 2, .. }));
    }

    #[test]
    fn test_plan_move_rejects_malformed_obstacles() {
        let source = |_: AreaId| -> Result<Vec<Hex>, SourceError> { Ok(vec![Hex::new(0, 100)]) };
        let finder = small_world();
        let err = finder
            .plan_move(&source, &MoveRequest::new(Hex::new(0, 0), Hex::new(1, 0), 1))
            .unwrap_err();
        assert!(matches!(
            err,
            MoveError::InvalidInput(SearchError::CoordinateOutOfRange { limit: 8, .. })
        ));
    }

    #[test]
    fn test_plan_move_accepts_empty_obstacle_list() {
        let source = |_: AreaId| -> Result<Vec<Hex>, SourceError> { Ok(Vec::new()) };
        let plan = small_world()
            .plan_move(&source, &MoveRequest::new(Hex::new(0, 0), Hex::new(3, 0), 1))
            .unwrap();
        assert_eq!(plan.outcome.route().map(Route::steps), Some(3));
    }

    #[test]
    fn test_plan_moves_keeps_order() {
        let requests = vec![
            MoveRequest::new(Hex::new(0, 0), Hex::new(4, 2), 1),
            MoveRequest::new(Hex::new(0, 0), Hex::new(5, 5), 1),
            MoveRequest::new(Hex::new(0, 0), Hex::new(1, 0), 7),
            MoveRequest::new(Hex::new(1, 0), Hex::new(3, 0), 1),
        ];
        let plans = Pathfinder::default().plan_moves(&arena(), &requests);
        assert_eq!(plans.len(), 4);
        assert!(plans[0].as_ref().unwrap().outcome.is_reachable());
        assert_eq!(plans[1].as_ref().unwrap().outcome, SearchOutcome::BlockedGoal);
        assert!(plans[2].is_err());
        assert_eq!(plans[3].as_ref().unwrap().request, requests[3]);
    }
}
