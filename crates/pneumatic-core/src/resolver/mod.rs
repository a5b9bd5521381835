//! Push resolvers.
//!
//! A resolver inspects the grid in front of a pump and decides whether a push
//! can happen. It never mutates the grid: it produces a [`Resolution`] that the
//! commit phase ([`PushPlan`](crate::plan::PushPlan)) applies afterwards, so a
//! failed push leaves the world untouched.
//!
//! # Architecture
//!
//! Each resolver implements [`PushResolver`]. During a resolve pass:
//! 1. The start cell is classified (push, destroy, or blocked)
//! 2. Lines of cells are walked along the push direction
//! 3. The sticky variant branches sideways through glued neighbours
//!
//! # Invariants
//!
//! - Resolvers MUST NOT mutate the grid
//! - The anchor (pump base) never appears in either output list
//! - The destroy and push lists never share a coordinate
//! - A failed resolution has both lists empty
//!
//! # Available Resolvers
//!
//! - [`LineResolver`]: Single line, no adhesion (plain pump)
//! - [`StickyResolver`]: Glued structures with collision reordering (sticky pump)

mod line;
mod sticky;

pub use line::LineResolver;
pub use sticky::StickyResolver;

use pneumatic_grid::{Coordinate, Direction};
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::query::GridQuery;

/// One candidate push.
///
/// # Example
///
/// ```
/// use pneumatic_core::resolver::PushRequest;
/// use pneumatic_grid::{Coordinate, Direction};
///
/// let base = Coordinate::new(0, 0, 0);
///
/// let extend = PushRequest::extend(base, Direction::East);
/// assert_eq!(extend.start, Coordinate::new(1, 0, 0));
/// assert_eq!(extend.direction, Direction::East);
///
/// let retract = PushRequest::retract(base, Direction::East);
/// assert_eq!(retract.start, Coordinate::new(2, 0, 0));
/// assert_eq!(retract.direction, Direction::West);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Pump base; never pushed
    pub anchor: Coordinate,
    /// First cell the push meets
    pub start: Coordinate,
    /// Direction cells move
    pub direction: Direction,
    /// Facing of the pump
    pub facing: Direction,
    /// Whether the pump is extending (pushing) rather than retracting (pulling)
    pub extending: bool,
}

impl PushRequest {
    /// Push from `anchor`, starting at `start`, along `direction`.
    #[must_use]
    pub fn new(anchor: Coordinate, start: Coordinate, direction: Direction) -> Self {
        Self {
            anchor,
            start,
            direction,
            facing: direction,
            extending: true,
        }
    }

    /// Extension of a pump at `base` facing `facing`.
    #[must_use]
    pub fn extend(base: Coordinate, facing: Direction) -> Self {
        Self {
            anchor: base,
            start: base.relative(facing),
            direction: facing,
            facing,
            extending: true,
        }
    }

    /// Retraction pull of a pump at `base` facing `facing`.
    ///
    /// The pull starts two cells out (just beyond the head) and moves back
    /// toward the base.
    #[must_use]
    pub fn retract(base: Coordinate, facing: Direction) -> Self {
        Self {
            anchor: base,
            start: base.relative_by(facing, 2),
            direction: facing.opposite(),
            facing,
            extending: false,
        }
    }
}

/// Outcome of a resolve pass.
///
/// Callers must check [`Resolution::success`] before trusting the lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Whether the push can proceed
    pub success: bool,
    /// Direction the pushed cells move
    pub direction: Direction,
    /// Cells that break, nearest the pushing front first
    pub to_destroy: Vec<Coordinate>,
    /// Cells that move, in push order
    pub to_push: Vec<Coordinate>,
}

impl Resolution {
    /// A successful resolution.
    #[must_use]
    pub fn resolved(
        direction: Direction,
        to_destroy: Vec<Coordinate>,
        to_push: Vec<Coordinate>,
    ) -> Self {
        Self {
            success: true,
            direction,
            to_destroy,
            to_push,
        }
    }

    /// A failed resolution with empty lists.
    #[must_use]
    pub fn blocked(direction: Direction) -> Self {
        Self {
            success: false,
            direction,
            to_destroy: Vec::new(),
            to_push: Vec::new(),
        }
    }

    /// Whether nothing moves or breaks.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_destroy.is_empty() && self.to_push.is_empty()
    }
}

/// Decides whether a push is structurally valid.
///
/// # Implementation Guidelines
///
/// 1. **Read only**: The grid is borrowed immutably; all mutation is deferred
///    to the caller.
/// 2. **Fresh state**: Every call starts from empty lists; nothing carries over
///    between calls.
/// 3. **Determinism**: The same grid and request always produce the same
///    lists in the same order.
///
/// # Example
///
/// ```
/// use pneumatic_core::query::GridQuery;
/// use pneumatic_core::resolver::{PushRequest, PushResolver, Resolution};
///
/// struct NeverPush;
///
/// impl PushResolver for NeverPush {
///     fn resolve(&self, _grid: &dyn GridQuery, request: &PushRequest) -> Resolution {
///         Resolution::blocked(request.direction)
///     }
/// }
/// ```
pub trait PushResolver {
    /// Resolve `request` against `grid`.
    fn resolve(&self, grid: &dyn GridQuery, request: &PushRequest) -> Resolution;
}

/// Which resolver a pump uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResolverKind {
    /// Plain pump: [`LineResolver`]
    #[default]
    Line,
    /// Sticky pump: [`StickyResolver`]
    Sticky,
}

impl ResolverKind {
    /// Resolve `request` with the resolver of this kind.
    #[must_use]
    pub fn resolve(
        self,
        grid: &dyn GridQuery,
        request: &PushRequest,
        config: &ResolverConfig,
    ) -> Resolution {
        match self {
            ResolverKind::Line => LineResolver::new(config).resolve(grid, request),
            ResolverKind::Sticky => StickyResolver::new(config).resolve(grid, request),
        }
    }
}

/// Resolve a push from `anchor` starting at `start` along `direction`.
///
/// # Example
///
/// ```
/// use pneumatic_core::config::ResolverConfig;
/// use pneumatic_core::resolver::{resolve_push, ResolverKind};
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let anchor = Coordinate::new(0, 0, 0);
/// let start = Coordinate::new(1, 0, 0);
/// grid.set(anchor, Cell::pump_base(false));
/// grid.set(start, Cell::torch());
///
/// let resolution = resolve_push(
///     &grid,
///     anchor,
///     start,
///     Direction::East,
///     ResolverKind::Line,
///     &ResolverConfig::default(),
/// );
/// assert!(resolution.success);
/// assert_eq!(resolution.to_destroy, vec![start]);
/// ```
#[must_use]
pub fn resolve_push(
    grid: &dyn GridQuery,
    anchor: Coordinate,
    start: Coordinate,
    direction: Direction,
    kind: ResolverKind,
    config: &ResolverConfig,
) -> Resolution {
    kind.resolve(grid, &PushRequest::new(anchor, start, direction), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_is_object_safe() {
        fn _accepts_boxed(_resolver: Box<dyn PushResolver>) {}
        fn _accepts_slice(_resolvers: &[Box<dyn PushResolver>]) {}
    }

    #[test]
    fn blocked_resolution_is_empty() {
        let resolution = Resolution::blocked(Direction::Up);
        assert!(!resolution.success);
        assert!(resolution.is_noop());
    }

    #[test]
    fn request_serde_roundtrip() {
        let request = PushRequest::retract(Coordinate::new(3, 4, 5), Direction::North);
        let json = serde_json::to_string(&request).unwrap();
        let back: PushRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
