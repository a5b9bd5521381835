//! # Pneumatic Grid
//!
//! Integer voxel substrate for pneumatic pump push resolution.
//!
//! The grid stores a sparse set of occupied cells inside world [`Bounds`].
//! Every cell carries the facts a push resolver needs to classify it:
//!
//! - **Push reaction**: normal, push-only, block or destroy
//! - **Flags**: indestructible material, unbreakable, block entity, machine, extended
//! - **Glue**: slime or honey adhesion between neighbours
//!
//! ## Quick Start
//!
//! ```
//! use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(Bounds::default());
//! let base = Coordinate::new(0, 0, 0);
//! grid.set(base, Cell::pump_base(false));
//! grid.set(base.relative(Direction::East), Cell::slime());
//!
//! assert!(grid.is_empty_at(base.relative_by(Direction::East, 2)));
//! assert_eq!(grid.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod coord;
pub mod grid;
pub mod hash;

// Re-exports for convenience
pub use cell::{Cell, CellFlags, Glue, PushReaction};
pub use coord::{Axis, Coordinate, Direction};
pub use grid::{FillPalette, VoxelGrid};
pub use hash::hash_grid;

/// Build limits of a world.
///
/// Vertical limits are `min_y..max_y` (top exclusive). The horizontal world
/// border is a square of half-width `border_radius` centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Lowest buildable layer
    pub min_y: i32,
    /// One past the highest buildable layer
    pub max_y: i32,
    /// Horizontal border half-width
    pub border_radius: i32,
}

impl Bounds {
    /// Create bounds from vertical limits and a border half-width.
    #[must_use]
    pub const fn new(min_y: i32, max_y: i32, border_radius: i32) -> Self {
        Self {
            min_y,
            max_y,
            border_radius,
        }
    }

    /// Check if a cell lies inside the build limits and the world border.
    #[must_use]
    pub fn contains(&self, pos: Coordinate) -> bool {
        pos.y() >= self.min_y
            && pos.y() < self.max_y
            && pos.x() >= -self.border_radius
            && pos.x() < self.border_radius
            && pos.z() >= -self.border_radius
            && pos.z() < self.border_radius
    }

    /// Whether `y` is the lowest buildable layer.
    #[must_use]
    pub fn is_bottom(&self, y: i32) -> bool {
        y == self.min_y
    }

    /// Whether `y` is the highest buildable layer.
    #[must_use]
    pub fn is_top(&self, y: i32) -> bool {
        y == self.max_y - 1
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(-64, 320, 29_999_984)
    }
}
