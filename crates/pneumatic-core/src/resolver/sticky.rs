//! Sticky resolver for glued structures.
//!
//! A sticky pump moves every cell held to the pushed line by glue. The
//! resolver builds the push list one line at a time:
//!
//! 1. A line starts at an entry cell, drags any glued cells behind it, then
//!    walks forward until it meets empty space, a breaking cell or a blocker.
//! 2. Each sticky cell in the list branches sideways into glued neighbours,
//!    each of which starts a new line.
//! 3. When a line runs into a cell already in the list, the new line is moved
//!    in front of the cell it hit so that the list stays in push order.
//!
//! The push list is capped at `max_push` cells.

use pneumatic_grid::{Coordinate, Direction, PushReaction};
use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::pushability::is_pushable;
use crate::query::GridQuery;

use super::{PushRequest, PushResolver, Resolution};

/// Resolver for a pump that moves glued structures.
///
/// # Example
///
/// ```
/// use pneumatic_core::config::ResolverConfig;
/// use pneumatic_core::resolver::{PushRequest, PushResolver, StickyResolver};
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let base = Coordinate::new(0, 0, 0);
/// grid.set(base, Cell::pump_base(false));
/// grid.set(Coordinate::new(1, 0, 0), Cell::slime());
/// grid.set(Coordinate::new(1, 1, 0), Cell::stone());
///
/// let resolver = StickyResolver::new(&ResolverConfig::default());
/// let resolution = resolver.resolve(&grid, &PushRequest::extend(base, Direction::East));
///
/// assert!(resolution.success);
/// assert_eq!(
///     resolution.to_push,
///     vec![Coordinate::new(1, 0, 0), Coordinate::new(1, 1, 0)]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StickyResolver {
    max_push: usize,
}

impl StickyResolver {
    /// Creates a sticky resolver with the push limit from `config`.
    #[must_use]
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            max_push: config.max_push,
        }
    }

    /// Maximum number of cells moved in one push.
    #[must_use]
    pub fn max_push(&self) -> usize {
        self.max_push
    }
}

impl Default for StickyResolver {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl PushResolver for StickyResolver {
    fn resolve(&self, grid: &dyn GridQuery, request: &PushRequest) -> Resolution {
        let mut walk = StructureWalk {
            grid,
            anchor: request.anchor,
            direction: request.direction,
            max_push: self.max_push,
            to_push: Vec::new(),
            to_destroy: Vec::new(),
        };

        if walk.run(request) {
            Resolution::resolved(request.direction, walk.to_destroy, walk.to_push)
        } else {
            Resolution::blocked(request.direction)
        }
    }
}

/// State of one resolve pass.
struct StructureWalk<'g> {
    grid: &'g dyn GridQuery,
    anchor: Coordinate,
    direction: Direction,
    max_push: usize,
    to_push: Vec<Coordinate>,
    to_destroy: Vec<Coordinate>,
}

impl StructureWalk<'_> {
    fn run(&mut self, request: &PushRequest) -> bool {
        let start = request.start;

        if !is_pushable(self.grid, start, self.direction, false, request.facing) {
            if request.extending
                && start != self.anchor
                && self.grid.push_reaction_at(start) == PushReaction::Destroy
            {
                trace!(?start, "start cell breaks");
                self.to_destroy.push(start);
                return true;
            }
            debug!(?start, direction = %self.direction, "start cell blocks the pump");
            return false;
        }

        if !self.add_block_line(start, self.direction) {
            return false;
        }

        // The list grows while we iterate; later additions branch too
        let mut i = 0;
        while i < self.to_push.len() {
            let pos = self.to_push[i];
            if self.grid.is_sticky(pos) && !self.add_branching_blocks(pos) {
                return false;
            }
            i += 1;
        }

        true
    }

    /// Whether the cells at `a` and `b` hold each other.
    fn glued(&self, a: Coordinate, b: Coordinate) -> bool {
        self.grid.stick_to(a, b) && self.grid.stick_to(b, a)
    }

    fn over_limit(&self, extra: usize) -> bool {
        self.to_push.len() + extra > self.max_push
    }

    /// Add the line entered at `origin`. `facing` is the direction the line
    /// was entered from (the push direction for the main line, the lateral
    /// direction for a branch).
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn add_block_line(&mut self, origin: Coordinate, facing: Direction) -> bool {
        if self.grid.is_empty_at(origin)
            || !is_pushable(self.grid, origin, self.direction, false, facing)
            || origin == self.anchor
            || self.to_push.contains(&origin)
        {
            return true;
        }

        let back = self.direction.opposite();

        // Drag glued cells behind the origin
        let mut dragged: usize = 1;
        if self.over_limit(dragged) {
            debug!(?origin, max_push = self.max_push, "push limit reached");
            return false;
        }
        let mut current = origin;
        while self.grid.is_sticky(current) {
            let behind = origin.relative_by(back, dragged as i32);
            if self.grid.is_empty_at(behind)
                || !self.glued(behind, current)
                || !is_pushable(self.grid, behind, self.direction, false, back)
                || behind == self.anchor
            {
                break;
            }
            trace!(?behind, "dragged along");
            current = behind;
            dragged += 1;
            if self.over_limit(dragged) {
                debug!(?origin, max_push = self.max_push, "push limit reached");
                return false;
            }
        }

        let mut line_len = 0;
        for offset in (0..dragged).rev() {
            self.to_push.push(origin.relative_by(back, offset as i32));
            line_len += 1;
        }

        let mut step: i32 = 1;
        loop {
            let next = origin.relative_by(self.direction, step);

            if let Some(hit) = self.to_push.iter().position(|pos| *pos == next) {
                trace!(?next, hit, line_len, "line collided with the structure");
                self.reorder_list_at_collision(line_len, hit);
                for k in 0..=hit + line_len {
                    let pos = self.to_push[k];
                    if self.grid.is_sticky(pos) && !self.add_branching_blocks(pos) {
                        return false;
                    }
                }
                return true;
            }

            if self.grid.is_empty_at(next) {
                if !self.grid.is_within_bounds(next) {
                    debug!(?next, "line would leave the world");
                    return false;
                }
                return true;
            }

            if !is_pushable(self.grid, next, self.direction, true, self.direction)
                || next == self.anchor
            {
                debug!(?next, "line blocked");
                return false;
            }

            if self.grid.push_reaction_at(next) == PushReaction::Destroy {
                if !self.to_destroy.contains(&next) {
                    self.to_destroy.push(next);
                }
                return true;
            }

            if self.to_push.len() >= self.max_push {
                debug!(?next, max_push = self.max_push, "push limit reached");
                return false;
            }

            self.to_push.push(next);
            line_len += 1;
            step += 1;
        }
    }

    /// Move the last `line_len` entries so they sit just before index `hit`.
    fn reorder_list_at_collision(&mut self, line_len: usize, hit: usize) {
        reorder_at_collision(&mut self.to_push, line_len, hit);
    }

    fn add_branching_blocks(&mut self, pos: Coordinate) -> bool {
        for lateral in self.direction.lateral() {
            let neighbour = pos.relative(lateral);
            if self.glued(neighbour, pos) && !self.add_block_line(neighbour, lateral) {
                return false;
            }
        }
        true
    }
}

/// Rearrange `list` as `[0, hit) + [len - line_len, len) + [hit, len - line_len)`.
fn reorder_at_collision<T>(list: &mut [T], line_len: usize, hit: usize) {
    let len = list.len();
    list[hit..].rotate_right(line_len.min(len - hit));
}
