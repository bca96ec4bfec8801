//! hexpath Core - A* pathfinding on hex grids
//!
//! This crate provides the movement check for hex-grid areas:
//! - Hex geometry (axial coordinates, distance metric, neighbours)
//! - Obstacle sets built from injected obstacle sources
//! - A priority frontier with deterministic tie-breaking
//! - The A* engine, route reconstruction and batch move planning

pub mod hex;
pub mod obstacles;
pub mod frontier;
pub mod search;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use hex::{distance, heuristic, neighbours, Cost, Hex, DIRECTIONS, STEP_COST};
pub use obstacles::{Area, AreaId, AreaMap, AreaObject, ObjectKind, ObstacleSet, ObstacleSource, SourceError};
pub use frontier::{Frontier, SearchNode};
pub use search::{find_path, find_route, MovePlan, MoveRequest, Pathfinder, Route, SearchLimit, SearchOutcome};
pub use config::{AreaBounds, SearchConfig, DEFAULT_COORDINATE_LIMIT, DEFAULT_MAX_EXPANSIONS};
pub use error::{MoveError, SearchError};
