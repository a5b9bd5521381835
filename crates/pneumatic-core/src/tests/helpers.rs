//! Grid builders and proptest strategies.

use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
use proptest::prelude::*;

use crate::config::ResolverConfig;
use crate::resolver::{resolve_push, Resolution, ResolverKind};

/// Base of the pump used by most scenarios.
pub const BASE: Coordinate = Coordinate::new(0, 0, 0);

/// Shorthand coordinate constructor.
pub fn at(x: i32, y: i32, z: i32) -> Coordinate {
    Coordinate::new(x, y, z)
}

/// Empty default-bounds grid with a retracted pump base at [`BASE`].
pub fn pump_grid() -> VoxelGrid {
    let mut grid = VoxelGrid::new(Bounds::default());
    grid.set(BASE, Cell::pump_base(false));
    grid
}

/// [`pump_grid`] with `cells` placed on top.
pub fn grid_with(cells: &[(Coordinate, Cell)]) -> VoxelGrid {
    let mut grid = pump_grid();
    for &(pos, cell) in cells {
        grid.set(pos, cell);
    }
    grid
}

/// Push east from [`BASE`] starting at `(1, 0, 0)` with default limits.
pub fn push_east(grid: &VoxelGrid, kind: ResolverKind) -> Resolution {
    resolve_push(
        grid,
        BASE,
        at(1, 0, 0),
        Direction::East,
        kind,
        &ResolverConfig::default(),
    )
}

/// Cells used when generating grids.
pub const PALETTE: [Cell; 10] = [
    Cell::stone(),
    Cell::slime(),
    Cell::honey(),
    Cell::obsidian(),
    Cell::bedrock(),
    Cell::torch(),
    Cell::glazed_terracotta(),
    Cell::barrier(),
    Cell::chest(),
    Cell::pump_head(),
];

pub fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

pub fn arb_kind() -> impl Strategy<Value = ResolverKind> {
    prop_oneof![Just(ResolverKind::Line), Just(ResolverKind::Sticky)]
}

/// Up to 40 cells scattered in a small box around [`BASE`].
pub fn arb_cells() -> impl Strategy<Value = Vec<(Coordinate, Cell)>> {
    prop::collection::vec(
        (-3i32..=3, -3i32..=3, -3i32..=3, 0..PALETTE.len()),
        0..40,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(x, y, z, index)| (at(x, y, z), PALETTE[index]))
            .filter(|(pos, _)| *pos != BASE)
            .collect()
    })
}
