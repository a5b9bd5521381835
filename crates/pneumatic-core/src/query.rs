//! Read-only grid access for push resolution.
//!
//! [`GridQuery`] is the only thing a resolver knows about the world. It answers
//! per-cell questions by coordinate and never exposes mutation, so a resolve
//! pass cannot change the grid it inspects.
//!
//! # Implementations
//!
//! - [`VoxelGrid`]: the in-crate sparse grid
//! - [`ClearedCell`]: any grid viewed with one cell treated as empty
//!
//! # Example
//!
//! ```
//! use pneumatic_core::query::GridQuery;
//! use pneumatic_grid::{Bounds, Cell, Coordinate, PushReaction, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(Bounds::default());
//! let pos = Coordinate::new(0, 0, 0);
//! grid.set(pos, Cell::torch());
//!
//! let view: &dyn GridQuery = &grid;
//! assert!(!view.is_empty_at(pos));
//! assert_eq!(view.push_reaction_at(pos), PushReaction::Destroy);
//! ```

use pneumatic_grid::{CellFlags, Coordinate, PushReaction, VoxelGrid};

/// Per-cell questions a push resolver asks of the world.
///
/// All methods take a coordinate and must answer for any coordinate, including
/// ones outside the world bounds (which report empty, non-sticky cells).
pub trait GridQuery {
    /// Whether the cell holds nothing.
    fn is_empty_at(&self, pos: Coordinate) -> bool;

    /// Whether the cell lies inside the build height and the world border.
    fn is_within_bounds(&self, pos: Coordinate) -> bool;

    /// Whether the cell is on the lowest buildable layer.
    fn is_at_floor(&self, pos: Coordinate) -> bool;

    /// Whether the cell is on the highest buildable layer.
    fn is_at_ceiling(&self, pos: Coordinate) -> bool;

    /// Push reaction of the cell. Empty cells report `Normal`.
    fn push_reaction_at(&self, pos: Coordinate) -> PushReaction;

    /// Whether the cell is an indestructible material (obsidian-like).
    fn is_indestructible_material(&self, pos: Coordinate) -> bool;

    /// Whether the cell carries attached state (a block entity).
    fn has_attached_state(&self, pos: Coordinate) -> bool;

    /// Whether the cell is a pump or piston part.
    fn is_machine_like(&self, pos: Coordinate) -> bool;

    /// Whether the cell is an extended pump or piston.
    fn is_extended_machine(&self, pos: Coordinate) -> bool;

    /// Whether the cell can never be broken.
    fn destroy_speed_is_infinite(&self, pos: Coordinate) -> bool;

    /// Whether the cell drags its neighbours along.
    fn is_sticky(&self, pos: Coordinate) -> bool;

    /// Whether the cell at `a` holds on to the cell at `b`.
    fn stick_to(&self, a: Coordinate, b: Coordinate) -> bool;
}

fn has_flag(grid: &VoxelGrid, pos: Coordinate, flag: CellFlags) -> bool {
    grid.get(pos).is_some_and(|cell| cell.flags.contains(flag))
}

impl GridQuery for VoxelGrid {
    fn is_empty_at(&self, pos: Coordinate) -> bool {
        VoxelGrid::is_empty_at(self, pos)
    }

    fn is_within_bounds(&self, pos: Coordinate) -> bool {
        self.bounds().contains(pos)
    }

    fn is_at_floor(&self, pos: Coordinate) -> bool {
        self.bounds().is_bottom(pos.y())
    }

    fn is_at_ceiling(&self, pos: Coordinate) -> bool {
        self.bounds().is_top(pos.y())
    }

    fn push_reaction_at(&self, pos: Coordinate) -> PushReaction {
        self.get(pos).map_or(PushReaction::Normal, |cell| cell.reaction)
    }

    fn is_indestructible_material(&self, pos: Coordinate) -> bool {
        has_flag(self, pos, CellFlags::INDESTRUCTIBLE_MATERIAL)
    }

    fn has_attached_state(&self, pos: Coordinate) -> bool {
        has_flag(self, pos, CellFlags::BLOCK_ENTITY)
    }

    fn is_machine_like(&self, pos: Coordinate) -> bool {
        has_flag(self, pos, CellFlags::MACHINE)
    }

    fn is_extended_machine(&self, pos: Coordinate) -> bool {
        self.get(pos).is_some_and(pneumatic_grid::Cell::is_extended_machine)
    }

    fn destroy_speed_is_infinite(&self, pos: Coordinate) -> bool {
        has_flag(self, pos, CellFlags::UNBREAKABLE)
    }

    fn is_sticky(&self, pos: Coordinate) -> bool {
        self.get(pos).is_some_and(pneumatic_grid::Cell::is_sticky)
    }

    fn stick_to(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(cell_a), Some(cell_b)) => cell_a.sticks_to(cell_b),
            _ => false,
        }
    }
}

/// A grid viewed with one cell treated as empty.
///
/// Retraction resolves its pull as if the pump head were already gone, without
/// touching the real grid.
pub struct ClearedCell<'a> {
    inner: &'a dyn GridQuery,
    cleared: Coordinate,
}

impl<'a> ClearedCell<'a> {
    /// View `inner` with `cleared` emptied.
    #[must_use]
    pub fn new(inner: &'a dyn GridQuery, cleared: Coordinate) -> Self {
        Self { inner, cleared }
    }
}

impl GridQuery for ClearedCell<'_> {
    fn is_empty_at(&self, pos: Coordinate) -> bool {
        pos == self.cleared || self.inner.is_empty_at(pos)
    }

    fn is_within_bounds(&self, pos: Coordinate) -> bool {
        self.inner.is_within_bounds(pos)
    }

    fn is_at_floor(&self, pos: Coordinate) -> bool {
        self.inner.is_at_floor(pos)
    }

    fn is_at_ceiling(&self, pos: Coordinate) -> bool {
        self.inner.is_at_ceiling(pos)
    }

    fn push_reaction_at(&self, pos: Coordinate) -> PushReaction {
        if pos == self.cleared {
            PushReaction::Normal
        } else {
            self.inner.push_reaction_at(pos)
        }
    }

    fn is_indestructible_material(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.is_indestructible_material(pos)
    }

    fn has_attached_state(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.has_attached_state(pos)
    }

    fn is_machine_like(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.is_machine_like(pos)
    }

    fn is_extended_machine(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.is_extended_machine(pos)
    }

    fn destroy_speed_is_infinite(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.destroy_speed_is_infinite(pos)
    }

    fn is_sticky(&self, pos: Coordinate) -> bool {
        pos != self.cleared && self.inner.is_sticky(pos)
    }

    fn stick_to(&self, a: Coordinate, b: Coordinate) -> bool {
        a != self.cleared && b != self.cleared && self.inner.stick_to(a, b)
    }
}
