//! Search configuration
//!
//! Defaults: no deadline, no area bounds, and an expansion cap large enough
//! to exhaust any realistic area while still ending a search on an open plane.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::hex::Hex;

/// Default `±` range accepted for any coordinate
pub const DEFAULT_COORDINATE_LIMIT: i32 = 1 << 20;

/// Largest accepted coordinate limit. Keeps neighbour arithmetic clear of
/// `i32` overflow.
pub const MAX_COORDINATE_LIMIT: i32 = 1 << 30;

/// Default expansion cap: every cell of a 512x512 area
pub const DEFAULT_MAX_EXPANSIONS: usize = 1 << 18;

/// Rectangular area in axial space: `0 <= q < width`, `0 <= r < height`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaBounds {
    pub width: i32,
    pub height: i32,
}

impl AreaBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, hex: Hex) -> bool {
        (0..self.width).contains(&hex.q) && (0..self.height).contains(&hex.r)
    }

    /// Number of cells in the area
    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Iterate all cells row by row
    pub fn cells(&self) -> impl Iterator<Item = Hex> {
        let width = self.width;
        (0..self.height).flat_map(move |r| (0..width).map(move |q| Hex::new(q, r)))
    }
}

impl fmt::Display for AreaBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for a [`Pathfinder`](crate::Pathfinder)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Coordinates beyond `±coordinate_limit` are rejected as input and never expanded
    pub coordinate_limit: i32,
    /// Stop after this many node expansions (None = unlimited)
    pub max_expansions: Option<usize>,
    /// Optional time limit in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Restrict the search to an area (None = open plane)
    pub bounds: Option<AreaBounds>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            coordinate_limit: DEFAULT_COORDINATE_LIMIT,
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
            time_limit_ms: None,
            bounds: None,
        }
    }
}

impl SearchConfig {
    /// Set an expansion cap
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Drop the expansion cap. On an open plane an unreachable goal then
    /// keeps the search running until the whole coordinate range is exhausted.
    pub fn without_expansion_limit(mut self) -> Self {
        self.max_expansions = None;
        self
    }

    /// Set a time limit
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = Some(time_limit_ms);
        self
    }

    /// Restrict searches to an area
    pub fn with_bounds(mut self, bounds: AreaBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the accepted coordinate range
    pub fn with_coordinate_limit(mut self, limit: i32) -> Self {
        self.coordinate_limit = limit;
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Reject settings the engine cannot honour
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.coordinate_limit <= 0 || self.coordinate_limit > MAX_COORDINATE_LIMIT {
            return Err(SearchError::InvalidConfig(format!(
                "coordinate_limit must be in 1..={}, got {}",
                MAX_COORDINATE_LIMIT, self.coordinate_limit
            )));
        }
        if let Some(bounds) = self.bounds {
            validate_bounds(bounds, self.coordinate_limit)?;
        }
        Ok(())
    }
}

/// Check that `bounds` is non-empty and fits inside the coordinate range
pub(crate) fn validate_bounds(bounds: AreaBounds, coordinate_limit: i32) -> Result<(), SearchError> {
    if bounds.width <= 0 || bounds.height <= 0 {
        return Err(SearchError::InvalidConfig(format!(
            "area bounds must be non-empty, got {}",
            bounds
        )));
    }
    if bounds.width > coordinate_limit || bounds.height > coordinate_limit {
        return Err(SearchError::InvalidConfig(format!(
            "area bounds {} exceed coordinate limit {}",
            bounds, coordinate_limit
        )));
    }
    Ok(())
}
