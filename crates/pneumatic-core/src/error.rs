//! Error types.
//!
//! A failed resolve pass is not an error: resolvers report it through
//! [`Resolution::success`](crate::resolver::Resolution::success). These types
//! cover configuration loading and the commit phase only.

use pneumatic_grid::Coordinate;
use thiserror::Error;

/// Invalid resolver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `max_push` must allow at least one cell.
    #[error("max_push must be at least 1")]
    ZeroMaxPush,

    /// `line_reach` must inspect at least one cell.
    #[error("line_reach must be at least 1")]
    ZeroLineReach,

    /// The configuration text could not be parsed.
    #[error("failed to parse resolver config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to apply a push plan to a grid.
///
/// Every variant is raised before the grid is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The plan was built from a failed resolution.
    #[error("cannot commit a failed resolution")]
    Unresolved,

    /// A cell the plan expected to move is no longer there.
    #[error("planned cell at ({pos}) is gone")]
    Stale {
        /// Missing cell
        pos: Coordinate,
    },

    /// A cell would move outside the world.
    #[error("cell would leave the world at ({pos})")]
    OutOfBounds {
        /// Destination outside the bounds
        pos: Coordinate,
    },
}
