//! Worked push scenarios.

use pneumatic_grid::{hash_grid, Cell, Direction};

use crate::config::ResolverConfig;
use crate::plan::PushPlan;
use crate::pump::{Pump, PumpAction};
use crate::resolver::{resolve_push, PushRequest, ResolverKind};

use super::helpers::{at, grid_with, pump_grid, push_east, BASE};

const KINDS: [ResolverKind; 2] = [ResolverKind::Line, ResolverKind::Sticky];

// =============================================================================
// Start cell classification
// =============================================================================

#[test]
fn air_in_front_extends_freely() {
    let grid = pump_grid();
    for kind in KINDS {
        let resolution = push_east(&grid, kind);
        assert!(resolution.success, "{kind:?}");
        assert!(resolution.to_destroy.is_empty());
        assert!(resolution.to_push.is_empty());
    }
}

#[test]
fn fragile_start_is_destroyed_without_looking_further() {
    let grid = grid_with(&[(at(1, 0, 0), Cell::torch()), (at(2, 0, 0), Cell::barrier())]);
    for kind in KINDS {
        let resolution = push_east(&grid, kind);
        assert!(resolution.success, "{kind:?}");
        assert_eq!(resolution.to_destroy, vec![at(1, 0, 0)]);
        assert!(resolution.to_push.is_empty());
    }
}

#[test]
fn blocking_start_fails() {
    for blocker in [Cell::barrier(), Cell::pump_head(), Cell::pump_base(true)] {
        let grid = grid_with(&[(at(1, 0, 0), blocker)]);
        for kind in KINDS {
            let resolution = push_east(&grid, kind);
            assert!(!resolution.success, "{kind:?} against {blocker:?}");
            assert!(resolution.is_noop());
        }
    }
}

#[test]
fn push_only_cell_moves_only_along_its_pump() {
    let grid = grid_with(&[(at(1, 0, 0), Cell::glazed_terracotta())]);
    assert!(push_east(&grid, ResolverKind::Sticky).success);

    // Beside a slime cell pushed upward it stays put
    let grid = grid_with(&[
        (at(0, 1, 0), Cell::slime()),
        (at(1, 1, 0), Cell::glazed_terracotta()),
    ]);
    let resolution = resolve_push(
        &grid,
        BASE,
        at(0, 1, 0),
        Direction::Up,
        ResolverKind::Sticky,
        &ResolverConfig::default(),
    );
    assert!(resolution.success);
    assert_eq!(resolution.to_push, vec![at(0, 1, 0)]);
}

// =============================================================================
// Sticky structures
// =============================================================================

#[test]
fn sticky_chain_is_pushed_front_to_back() {
    let grid = grid_with(&[
        (at(1, 0, 0), Cell::slime()),
        (at(2, 0, 0), Cell::slime()),
        (at(3, 0, 0), Cell::slime()),
    ]);
    let resolution = push_east(&grid, ResolverKind::Sticky);
    assert!(resolution.success);
    assert_eq!(
        resolution.to_push,
        vec![at(1, 0, 0), at(2, 0, 0), at(3, 0, 0)]
    );
    assert!(resolution.to_destroy.is_empty());
}

#[test]
fn lateral_neighbour_follows_its_branch_root() {
    let grid = grid_with(&[(at(1, 0, 0), Cell::slime()), (at(1, 0, 1), Cell::slime())]);
    let resolution = push_east(&grid, ResolverKind::Sticky);
    assert!(resolution.success);

    let root = resolution.to_push.iter().position(|p| *p == at(1, 0, 0));
    let branch = resolution.to_push.iter().position(|p| *p == at(1, 0, 1));
    assert!(root.is_some() && branch.is_some());
    assert!(root < branch);
}

#[test]
fn plain_pump_ignores_glue() {
    let grid = grid_with(&[(at(1, 0, 0), Cell::slime()), (at(1, 0, 1), Cell::slime())]);
    let config = ResolverConfig::with_line_reach(2);
    let resolution = resolve_push(
        &grid,
        BASE,
        at(1, 0, 0),
        Direction::East,
        ResolverKind::Line,
        &config,
    );
    assert!(resolution.success);
    assert_eq!(resolution.to_push, vec![at(1, 0, 0)]);
}

/// A branch line that runs into an earlier entry is moved in front of it.
///
/// Layout, pushing east from the base at the origin:
///
/// ```text
///   y=1, z=0:  O(1,1,0) stone    R(2,1,0) stone
///   y=0, z=0:  A(1,0,0) stone    B(2,0,0) slime
///   y=1, z=1:  P(1,1,1) slime    W(2,1,1) slime
///   y=0, z=1:                    V(2,0,1) slime
/// ```
///
/// The walk lists `[A, B, R, V, P, W]`; then `O`, reached sideways from `P`,
/// walks east into `R` at index 2. The single-cell line `[O]` is moved to sit
/// at index 2, giving `[A, B] + [O] + [R, V, P, W]`.
#[test]
fn colliding_branch_is_reordered() {
    let a = at(1, 0, 0);
    let b = at(2, 0, 0);
    let r = at(2, 1, 0);
    let v = at(2, 0, 1);
    let w = at(2, 1, 1);
    let p = at(1, 1, 1);
    let o = at(1, 1, 0);
    let grid = grid_with(&[
        (a, Cell::stone()),
        (b, Cell::slime()),
        (r, Cell::stone()),
        (v, Cell::slime()),
        (w, Cell::slime()),
        (p, Cell::slime()),
        (o, Cell::stone()),
    ]);

    let resolution = push_east(&grid, ResolverKind::Sticky);
    assert!(resolution.success);
    assert_eq!(resolution.to_push, vec![a, b, o, r, v, p, w]);
    assert!(resolution.to_destroy.is_empty());
}

#[test]
fn reordered_structure_commits_intact() {
    let cells = [
        (at(1, 0, 0), Cell::stone()),
        (at(2, 0, 0), Cell::slime()),
        (at(2, 1, 0), Cell::stone()),
        (at(2, 0, 1), Cell::slime()),
        (at(2, 1, 1), Cell::slime()),
        (at(1, 1, 1), Cell::slime()),
        (at(1, 1, 0), Cell::stone()),
    ];
    let mut grid = grid_with(&cells);

    let request = PushRequest::extend(BASE, Direction::East);
    let resolution = ResolverKind::Sticky.resolve(&grid, &request, &ResolverConfig::default());
    let plan = PushPlan::from_resolution(&request, &resolution).unwrap();
    let report = plan.apply(&mut grid).unwrap();

    assert_eq!(report.moved, cells.len());
    for (pos, cell) in cells {
        assert_eq!(grid.get(pos.relative(Direction::East)), Some(&cell));
    }
    assert_eq!(grid.get(at(1, 0, 0)), Some(&Cell::pump_head()));
}

// =============================================================================
// Pumps
// =============================================================================

#[test]
fn sticky_pump_round_trip_restores_grid() {
    let mut grid = grid_with(&[(at(1, 0, 0), Cell::slime()), (at(1, 1, 0), Cell::stone())]);
    let before = hash_grid(&grid);
    let config = ResolverConfig::default();
    let mut pump = Pump::new(BASE, Direction::East, ResolverKind::Sticky);

    let action = pump.react(&grid, true, &config);
    assert!(matches!(action, PumpAction::Extend(_)));
    pump.apply(action, &mut grid).unwrap();
    assert_ne!(hash_grid(&grid), before);

    let action = pump.react(&grid, false, &config);
    pump.apply(action, &mut grid).unwrap();
    assert_eq!(hash_grid(&grid), before);
}

