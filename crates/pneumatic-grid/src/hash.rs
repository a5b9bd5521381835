//! State hashing for determinism verification.
//!
//! Two grids that went through the same pushes from the same starting state
//! must produce identical hashes. Cells are visited in coordinate order, so the
//! hash does not depend on insertion history.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::VoxelGrid;

/// Compute a deterministic hash of grid state.
///
/// This hash includes:
/// - The world bounds
/// - Every occupied coordinate and its cell
#[must_use]
pub fn hash_grid(grid: &VoxelGrid) -> u64 {
    let mut hasher = DefaultHasher::new();

    grid.bounds().hash(&mut hasher);
    grid.len().hash(&mut hasher);

    for (pos, cell) in grid.iter() {
        pos.hash(&mut hasher);
        cell.hash(&mut hasher);
    }

    hasher.finish()
}
