//! # Pneumatic Core
//!
//! Push and obstruction resolution for pneumatic pumps.
//!
//! A pump is a base cell that extends a head into the cell in front of it,
//! shoving, breaking or refusing to move whatever is there. This crate decides
//! what a push does without knowing anything about the host world beyond the
//! [`GridQuery`](query::GridQuery) trait.
//!
//! ## Architecture
//!
//! Resolution and mutation are separate phases:
//!
//! - **Resolve**: a [`PushResolver`](resolver::PushResolver) reads the grid
//!   and produces a [`Resolution`](resolver::Resolution) listing the cells to
//!   break and the cells to move
//! - **Commit**: a [`PushPlan`](plan::PushPlan) applies a successful
//!   resolution to a [`VoxelGrid`](pneumatic_grid::VoxelGrid)
//! - **Drive**: a [`Pump`](pump::Pump) turns a powered flag into extend and
//!   retract actions; a [`PumpBank`](bank::PumpBank) plans many pumps in
//!   parallel and commits them in a fixed order
//!
//! ## Usage
//!
//! ```
//! use pneumatic_core::config::ResolverConfig;
//! use pneumatic_core::resolver::{resolve_push, ResolverKind};
//! use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(Bounds::default());
//! let base = Coordinate::new(0, 0, 0);
//! grid.set(base, Cell::pump_base(false));
//! grid.set(Coordinate::new(1, 0, 0), Cell::slime());
//! grid.set(Coordinate::new(1, 1, 0), Cell::stone());
//!
//! let resolution = resolve_push(
//!     &grid,
//!     base,
//!     Coordinate::new(1, 0, 0),
//!     Direction::East,
//!     ResolverKind::Sticky,
//!     &ResolverConfig::default(),
//! );
//! assert!(resolution.success);
//! assert_eq!(resolution.to_push.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the grid crate for downstream users
pub use pneumatic_grid;

pub mod bank;
pub mod config;
pub mod error;
pub mod plan;
pub mod pump;
pub mod pushability;
pub mod query;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use bank::{PumpBank, PumpOutcome, StepReport};
pub use config::ResolverConfig;
pub use error::{CommitError, ConfigError};
pub use plan::{CommitReport, PushPlan};
pub use pump::{Pump, PumpAction};
pub use pushability::is_pushable;
pub use query::{ClearedCell, GridQuery};
pub use resolver::{
    resolve_push, LineResolver, PushRequest, PushResolver, Resolution, ResolverKind,
    StickyResolver,
};
