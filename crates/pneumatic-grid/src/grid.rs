//! Sparse voxel grid.
//!
//! [`VoxelGrid`] stores occupied cells in a `BTreeMap` so that iteration order
//! is deterministic. Coordinates with no entry are empty.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::coord::Coordinate;
use crate::Bounds;

/// Weighted set of cells used by [`VoxelGrid::random_fill`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillPalette {
    entries: Vec<(Cell, u32)>,
}

impl FillPalette {
    /// Create a palette from `(cell, weight)` pairs. Zero weights are dropped.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (Cell, u32)>) -> Self {
        Self {
            entries: entries.into_iter().filter(|(_, w)| *w > 0).collect(),
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.entries.iter().map(|(_, w)| *w).sum()
    }

    fn pick(&self, roll: u32) -> Option<Cell> {
        let mut remaining = roll;
        for (cell, weight) in &self.entries {
            if remaining < *weight {
                return Some(*cell);
            }
            remaining -= weight;
        }
        None
    }
}

impl Default for FillPalette {
    /// A mix of every kind of cell a push can meet.
    fn default() -> Self {
        Self::new([
            (Cell::stone(), 40),
            (Cell::slime(), 12),
            (Cell::honey(), 6),
            (Cell::torch(), 10),
            (Cell::glazed_terracotta(), 6),
            (Cell::obsidian(), 4),
            (Cell::bedrock(), 2),
            (Cell::barrier(), 2),
            (Cell::chest(), 4),
        ])
    }
}

/// Sparse voxel grid bounded by world [`Bounds`].
///
/// # Example
///
/// ```
/// use pneumatic_grid::{Bounds, Cell, Coordinate, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::new(0, 16, 16));
/// let pos = Coordinate::new(1, 2, 3);
///
/// assert!(grid.set(pos, Cell::stone()).is_none());
/// assert_eq!(grid.get(pos), Some(&Cell::stone()));
/// assert_eq!(grid.remove(pos), Some(Cell::stone()));
/// assert!(grid.is_empty_at(pos));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoxelGrid {
    bounds: Bounds,
    #[serde(with = "cell_list")]
    cells: BTreeMap<Coordinate, Cell>,
}

/// Serializes the cell map as a list of `(coordinate, cell)` pairs, since
/// coordinates are not valid map keys in text formats.
mod cell_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::cell::Cell;
    use crate::coord::Coordinate;

    pub fn serialize<S: Serializer>(
        cells: &BTreeMap<Coordinate, Cell>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<(&Coordinate, &Cell)> = cells.iter().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Coordinate, Cell>, D::Error> {
        let list: Vec<(Coordinate, Cell)> = Vec::deserialize(deserializer)?;
        Ok(list.into_iter().collect())
    }
}

impl VoxelGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: BTreeMap::new(),
        }
    }

    /// World bounds of this grid.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Cell at `pos`, if occupied.
    #[must_use]
    pub fn get(&self, pos: Coordinate) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// Occupy `pos` with `cell`, returning the previous occupant.
    pub fn set(&mut self, pos: Coordinate, cell: Cell) -> Option<Cell> {
        self.cells.insert(pos, cell)
    }

    /// Empty `pos`, returning the previous occupant.
    pub fn remove(&mut self, pos: Coordinate) -> Option<Cell> {
        self.cells.remove(&pos)
    }

    /// Whether `pos` holds no cell.
    #[must_use]
    pub fn is_empty_at(&self, pos: Coordinate) -> bool {
        !self.cells.contains_key(&pos)
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Cell)> {
        self.cells.iter().map(|(pos, cell)| (*pos, cell))
    }

    /// Scatter cells from `palette` over the box `min..=max`.
    ///
    /// Each in-bounds coordinate of the box is occupied with probability
    /// `density` (clamped to `0.0..=1.0`). The same seed always produces the
    /// same grid. Existing cells inside the box are overwritten or cleared.
    /// Returns the number of cells placed.
    pub fn random_fill(
        &mut self,
        min: Coordinate,
        max: Coordinate,
        density: f64,
        palette: &FillPalette,
        seed: u64,
    ) -> usize {
        let total = palette.total_weight();
        if total == 0 {
            return 0;
        }
        let density = density.clamp(0.0, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut placed = 0;

        for y in min.y()..=max.y() {
            for z in min.z()..=max.z() {
                for x in min.x()..=max.x() {
                    let pos = Coordinate::new(x, y, z);
                    if !self.bounds.contains(pos) {
                        continue;
                    }
                    if rng.gen_bool(density) {
                        if let Some(cell) = palette.pick(rng.gen_range(0..total)) {
                            self.cells.insert(pos, cell);
                            placed += 1;
                        }
                    } else {
                        self.cells.remove(&pos);
                    }
                }
            }
        }

        tracing::debug!(seed, placed, "random fill complete");
        placed
    }
}
