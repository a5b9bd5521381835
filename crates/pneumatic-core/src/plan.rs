//! Commit phase: applying a resolution to the grid.
//!
//! A [`PushPlan`] is built from a successful [`Resolution`] and applied to a
//! [`VoxelGrid`] in three steps:
//!
//! 1. Break every cell in the destroy list, last entry first
//! 2. Lift every pushed cell, then set each down one step along the push
//! 3. Place the pump head in front of the base (extension only)
//!
//! All checks run before the first mutation, so a rejected plan leaves the grid
//! exactly as it was.

use std::collections::BTreeSet;

use pneumatic_grid::{Cell, Coordinate, Direction, VoxelGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CommitError;
use crate::resolver::{PushRequest, Resolution};

/// Mutations derived from one successful resolution.
///
/// # Example
///
/// ```
/// use pneumatic_core::plan::PushPlan;
/// use pneumatic_core::resolver::{PushRequest, PushResolver, StickyResolver};
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let base = Coordinate::new(0, 0, 0);
/// grid.set(base, Cell::pump_base(false));
/// grid.set(Coordinate::new(1, 0, 0), Cell::stone());
///
/// let request = PushRequest::extend(base, Direction::East);
/// let resolution = StickyResolver::default().resolve(&grid, &request);
/// let plan = PushPlan::from_resolution(&request, &resolution).unwrap();
/// plan.apply(&mut grid).unwrap();
///
/// assert_eq!(grid.get(Coordinate::new(1, 0, 0)), Some(&Cell::pump_head()));
/// assert_eq!(grid.get(Coordinate::new(2, 0, 0)), Some(&Cell::stone()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPlan {
    /// Request the plan was resolved for
    pub request: PushRequest,
    /// Cells to break, in resolution order
    pub destroy: Vec<Coordinate>,
    /// Cells to move one step along `request.direction`, in resolution order
    pub moves: Vec<Coordinate>,
}

/// What a committed plan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Broken cells with their former contents, in the order they broke
    pub destroyed: Vec<(Coordinate, Cell)>,
    /// Number of cells moved
    pub moved: usize,
}

impl PushPlan {
    /// Build a plan from a resolution of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::Unresolved`] if the resolution failed.
    pub fn from_resolution(
        request: &PushRequest,
        resolution: &Resolution,
    ) -> Result<Self, CommitError> {
        if !resolution.success {
            return Err(CommitError::Unresolved);
        }
        Ok(Self {
            request: *request,
            destroy: resolution.to_destroy.clone(),
            moves: resolution.to_push.clone(),
        })
    }

    /// Direction cells move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.request.direction
    }

    /// Where the pump head goes, if this plan places one.
    #[must_use]
    pub fn head_position(&self) -> Option<Coordinate> {
        self.request
            .extending
            .then(|| self.request.anchor.relative(self.request.facing))
    }

    /// Every cell this plan writes: broken cells, move sources and
    /// destinations, and the head position.
    #[must_use]
    pub fn touched(&self) -> BTreeSet<Coordinate> {
        let direction = self.direction();
        self.destroy
            .iter()
            .copied()
            .chain(self.moves.iter().copied())
            .chain(self.moves.iter().map(|pos| pos.relative(direction)))
            .chain(self.head_position())
            .collect()
    }

    /// Check the plan still fits `grid` without changing it.
    ///
    /// # Errors
    ///
    /// - [`CommitError::Stale`] if a cell to move has disappeared
    /// - [`CommitError::OutOfBounds`] if a cell or the head would leave the world
    pub fn validate(&self, grid: &VoxelGrid) -> Result<(), CommitError> {
        let direction = self.direction();
        for &pos in &self.moves {
            if grid.is_empty_at(pos) {
                return Err(CommitError::Stale { pos });
            }
            let target = pos.relative(direction);
            if !grid.bounds().contains(target) {
                return Err(CommitError::OutOfBounds { pos: target });
            }
        }
        if let Some(head) = self.head_position() {
            if !grid.bounds().contains(head) {
                return Err(CommitError::OutOfBounds { pos: head });
            }
        }
        Ok(())
    }

    /// Apply the plan to `grid`.
    ///
    /// # Errors
    ///
    /// Any error from [`PushPlan::validate`]; the grid is unchanged in that case.
    pub fn apply(&self, grid: &mut VoxelGrid) -> Result<CommitReport, CommitError> {
        self.validate(grid)?;

        let mut report = CommitReport::default();

        for &pos in self.destroy.iter().rev() {
            if let Some(cell) = grid.remove(pos) {
                report.destroyed.push((pos, cell));
            }
        }

        let direction = self.direction();
        let lifted: Vec<(Coordinate, Cell)> = self
            .moves
            .iter()
            .filter_map(|&pos| grid.remove(pos).map(|cell| (pos, cell)))
            .collect();
        for (pos, cell) in lifted.into_iter().rev() {
            grid.set(pos.relative(direction), cell);
            report.moved += 1;
        }

        if let Some(head) = self.head_position() {
            grid.set(head, Cell::pump_head());
        }

        debug!(
            anchor = ?self.request.anchor,
            moved = report.moved,
            destroyed = report.destroyed.len(),
            "push committed"
        );
        Ok(report)
    }
}
