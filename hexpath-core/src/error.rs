//! Error types
//!
//! "No path" is never an error: blocked goals and exhausted searches are
//! ordinary [`SearchOutcome`](crate::SearchOutcome) values.

use crate::config::AreaBounds;
use crate::hex::Hex;
use crate::obstacles::{AreaId, SourceError};

/// Input the engine refuses to search with
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("coordinate {hex} is outside the supported range ±{limit}")]
    CoordinateOutOfRange { hex: Hex, limit: i32 },

    #[error("coordinate {hex} lies outside area bounds {bounds}")]
    OutsideArea { hex: Hex, bounds: AreaBounds },

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to serve a move request
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// The search could not be attempted at all
    #[error("obstacles for area {area} could not be loaded")]
    ObstaclesUnavailable {
        area: AreaId,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    InvalidInput(#[from] SearchError),
}
