//! Obstacles - occupied cells and where they come from
//!
//! An [`ObstacleSet`] is built once per search from whatever an
//! [`ObstacleSource`] reports for an area. [`AreaMap`] is the in-memory
//! source used by the CLI and tests.

use std::path::Path;

use anyhow::Context;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::config::AreaBounds;
use crate::hex::Hex;

/// Identifier of a playing area
pub type AreaId = i64;

// ============================================================================
// OBSTACLE SET
// ============================================================================

/// Cells that cannot be entered during one search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleSet {
    cells: FxHashSet<Hex>,
}

impl ObstacleSet {
    /// Index the given coordinates. Duplicates are collapsed.
    pub fn build<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Hex>,
    {
        Self {
            cells: coordinates.into_iter().collect(),
        }
    }

    pub fn is_blocked(&self, hex: Hex) -> bool {
        self.cells.contains(&hex)
    }

    /// Number of distinct blocked cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hex> {
        self.cells.iter()
    }
}

impl FromIterator<Hex> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Hex>>(iter: I) -> Self {
        Self::build(iter)
    }
}

// ============================================================================
// OBSTACLE SOURCES
// ============================================================================

/// Why a source could not produce obstacles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("unknown area {0}")]
    UnknownArea(AreaId),

    #[error("obstacle source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only query capability for the occupied cells of an area
pub trait ObstacleSource {
    /// Every cell currently occupied in `area`. May contain duplicates.
    ///
    /// An empty list is accepted as an open field, not rejected as malformed;
    /// only coordinates outside the configured range are invalid input.
    fn obstacles(&self, area: AreaId) -> Result<Vec<Hex>, SourceError>;

    /// Dimensions of `area`, if the source knows them
    fn bounds(&self, _area: AreaId) -> Option<AreaBounds> {
        None
    }
}

impl<F> ObstacleSource for F
where
    F: Fn(AreaId) -> Result<Vec<Hex>, SourceError>,
{
    fn obstacles(&self, area: AreaId) -> Result<Vec<Hex>, SourceError> {
        self(area)
    }
}

// ============================================================================
// IN-MEMORY WORLD
// ============================================================================

/// Kind of object occupying cells in an area
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Neutral,
    Building,
    Hero,
    Unit,
    Enemy,
}

/// An object placed in an area; large objects cover several cells
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaObject {
    pub id: i64,
    pub kind: ObjectKind,
    pub coordinates: Vec<Hex>,
}

impl AreaObject {
    pub fn new(id: i64, kind: ObjectKind, coordinates: Vec<Hex>) -> Self {
        Self { id, kind, coordinates }
    }
}

/// A playing area and everything standing on it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: AreaId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<AreaBounds>,
    #[serde(default)]
    pub objects: Vec<AreaObject>,
}

impl Area {
    pub fn new(id: AreaId) -> Self {
        Self {
            id,
            bounds: None,
            objects: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: AreaBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_object(mut self, object: AreaObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Occupied cells of every object, in object order
    pub fn occupied(&self) -> impl Iterator<Item = Hex> + '_ {
        self.objects.iter().flat_map(|o| o.coordinates.iter().copied())
    }
}

/// In-memory [`ObstacleSource`] keyed by area id
#[derive(Clone, Debug, Default)]
pub struct AreaMap {
    areas: FxHashMap<AreaId, Area>,
}

impl AreaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of areas. Later areas replace earlier ones with the same id.
    pub fn from_areas<I>(areas: I) -> Self
    where
        I: IntoIterator<Item = Area>,
    {
        let mut map = Self::new();
        for area in areas {
            map.insert(area);
        }
        map
    }

    /// Insert an area, returning the one it replaced
    pub fn insert(&mut self, area: Area) -> Option<Area> {
        self.areas.insert(area.id, area)
    }

    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Load a JSON array of areas
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read area file: {}", path.display()))?;
        let areas: Vec<Area> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse area file: {}", path.display()))?;
        Ok(Self::from_areas(areas))
    }
}

impl ObstacleSource for AreaMap {
    fn obstacles(&self, area: AreaId) -> Result<Vec<Hex>, SourceError> {
        self.areas
            .get(&area)
            .map(|a| a.occupied().collect())
            .ok_or(SourceError::UnknownArea(area))
    }

    fn bounds(&self, area: AreaId) -> Option<AreaBounds> {
        self.areas.get(&area).and_then(|a| a.bounds)
    }
}
