//! Hex grid geometry with axial coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path cost. Adjacent cells are always `STEP_COST` apart.
pub type Cost = u64;

/// Cost of a single move between adjacent hexes under [`distance`]
pub const STEP_COST: Cost = 2;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Check that both components lie within `±limit`
    pub fn within_limit(&self, limit: i32) -> bool {
        self.q.unsigned_abs() <= limit.unsigned_abs() && self.r.unsigned_abs() <= limit.unsigned_abs()
    }

    /// Exact hex distance to `other`, see [`distance`]
    pub fn distance_to(&self, other: Hex) -> Cost {
        distance(*self, other)
    }

    /// Get neighbor in direction (0-5).
    ///
    /// Components wrap at the `i32` extremes; use [`Hex::checked_neighbor`]
    /// when `self` may sit on the edge of the coordinate space.
    pub fn neighbor(&self, direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(self.q.wrapping_add(dq), self.r.wrapping_add(dr))
    }

    /// Neighbor in direction (0-5), or `None` if it falls outside `i32`
    pub fn checked_neighbor(&self, direction: u8) -> Option<Hex> {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Some(Hex::new(self.q.checked_add(dq)?, self.r.checked_add(dr)?))
    }

    /// All six neighbors in [`DIRECTIONS`] order
    pub fn neighbours(&self) -> [Hex; 6] {
        neighbours(*self)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Hex::new(q, r)
    }
}

/// Direction vectors in axial coordinates (dq, dr).
///
/// The order is fixed so that tie-broken searches are reproducible.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, -1),
    (-1, 1),
];

/// Hex-grid distance `|dq| + |dr| + |dq + dr|`.
///
/// This is twice the step count between the two cells, so it is always even
/// and adjacent cells are [`STEP_COST`] apart. Computed in `i64` so any pair
/// of `i32` coordinates is safe.
pub fn distance(a: Hex, b: Hex) -> Cost {
    let dq = i64::from(a.q) - i64::from(b.q);
    let dr = i64::from(a.r) - i64::from(b.r);
    dq.unsigned_abs() + dr.unsigned_abs() + (dq + dr).unsigned_abs()
}

/// A* estimate of the remaining cost: half of [`distance`].
///
/// Never exceeds the true remaining cost, and drops by at most one
/// [`STEP_COST`] per move, so closed nodes never need reopening.
pub fn heuristic(a: Hex, b: Hex) -> Cost {
    distance(a, b) / 2
}

/// The six axial neighbours of `h`.
///
/// Only meaningful when both components are strictly inside the `i32` range.
/// Searches never get near the edge because coordinates are capped at
/// [`MAX_COORDINATE_LIMIT`](crate::config::MAX_COORDINATE_LIMIT); at the
/// extremes the components wrap instead of panicking.
pub fn neighbours(h: Hex) -> [Hex; 6] {
    DIRECTIONS.map(|(dq, dr)| Hex::new(h.q.wrapping_add(dq), h.r.wrapping_add(dr)))
}
