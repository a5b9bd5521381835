//! Line resolver for plain (non-sticky) pumps.
//!
//! The plain pump only looks straight ahead. It extends into empty space,
//! breaks a single fragile cell, and otherwise refuses. With a longer
//! `line_reach` it may shove a short run of cells, but never drags anything
//! sideways.

use pneumatic_grid::{Coordinate, PushReaction};
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::pushability::is_pushable;
use crate::query::GridQuery;

use super::{PushRequest, PushResolver, Resolution};

/// Resolver for a pump without adhesion.
///
/// # Example
///
/// ```
/// use pneumatic_core::config::ResolverConfig;
/// use pneumatic_core::resolver::{LineResolver, PushRequest, PushResolver};
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let base = Coordinate::new(0, 0, 0);
/// grid.set(base, Cell::pump_base(false));
/// grid.set(Coordinate::new(1, 0, 0), Cell::stone());
///
/// let resolver = LineResolver::new(&ResolverConfig::default());
/// let resolution = resolver.resolve(&grid, &PushRequest::extend(base, Direction::East));
///
/// // A single-cell reach cannot shove the stone anywhere
/// assert!(!resolution.success);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LineResolver {
    reach: usize,
}

impl LineResolver {
    /// Creates a line resolver with the reach from `config`.
    #[must_use]
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            reach: config.line_reach,
        }
    }

    /// Number of cells inspected ahead of the head.
    #[must_use]
    pub fn reach(&self) -> usize {
        self.reach
    }
}

impl Default for LineResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl PushResolver for LineResolver {
    fn resolve(&self, grid: &dyn GridQuery, request: &PushRequest) -> Resolution {
        let PushRequest {
            anchor,
            start,
            direction,
            facing,
            extending,
        } = *request;

        if !is_pushable(grid, start, direction, false, facing) {
            if extending && start != anchor && grid.push_reaction_at(start) == PushReaction::Destroy
            {
                trace!(?start, "start cell breaks");
                return Resolution::resolved(direction, vec![start], Vec::new());
            }
            debug!(?start, %direction, "start cell blocks the pump");
            return Resolution::blocked(direction);
        }

        let mut to_push: Vec<Coordinate> = Vec::new();
        let mut pos = start;
        for offset in 0..self.reach {
            if !grid.is_within_bounds(pos) {
                debug!(?pos, "line would leave the world");
                return Resolution::blocked(direction);
            }
            if grid.is_empty_at(pos) || pos == anchor {
                return Resolution::resolved(direction, Vec::new(), to_push);
            }
            if !is_pushable(grid, pos, direction, true, direction) {
                debug!(?pos, "line blocked");
                return Resolution::blocked(direction);
            }
            if grid.push_reaction_at(pos) == PushReaction::Destroy {
                trace!(?pos, "line ends in a breaking cell");
                return Resolution::resolved(direction, vec![pos], to_push);
            }
            if offset + 1 == self.reach {
                debug!(?pos, reach = self.reach, "line longer than reach");
                return Resolution::blocked(direction);
            }
            to_push.push(pos);
            pos = pos.relative(direction);
        }

        Resolution::blocked(direction)
    }
}
