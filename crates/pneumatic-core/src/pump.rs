//! Pump state machine.
//!
//! A pump is a base cell facing one direction with an optional head cell in
//! front of it. Each tick the host hands it a powered flag:
//!
//! | State     | Powered | Action                                     |
//! |-----------|---------|--------------------------------------------|
//! | retracted | yes     | resolve an extension; extend or stall      |
//! | extended  | no      | drop the head; sticky pumps pull one cell  |
//! | otherwise |         | idle                                       |
//!
//! Deciding ([`Pump::react`]) only reads the grid. Committing
//! ([`Pump::apply`]) is the only step that writes.

use std::collections::BTreeSet;

use pneumatic_grid::{Cell, Coordinate, Direction, VoxelGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::CommitError;
use crate::plan::{CommitReport, PushPlan};
use crate::query::{ClearedCell, GridQuery};
use crate::resolver::{PushRequest, ResolverKind};

/// What a pump wants to do this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpAction {
    /// Nothing to do
    Idle,
    /// Powered but the extension is blocked
    Stalled,
    /// Push the structure in front and place the head
    Extend(PushPlan),
    /// Remove the head, optionally pulling a structure back with it
    Retract {
        /// Pull toward the base; `None` leaves everything in place
        pull: Option<PushPlan>,
    },
}

/// A single pump.
///
/// # Example
///
/// ```
/// use pneumatic_core::config::ResolverConfig;
/// use pneumatic_core::pump::{Pump, PumpAction};
/// use pneumatic_core::resolver::ResolverKind;
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let mut pump = Pump::new(Coordinate::new(0, 0, 0), Direction::Up, ResolverKind::Sticky);
/// pump.place(&mut grid);
///
/// let action = pump.react(&grid, true, &ResolverConfig::default());
/// assert!(matches!(action, PumpAction::Extend(_)));
/// pump.apply(action, &mut grid).unwrap();
///
/// assert!(pump.is_extended());
/// assert_eq!(grid.get(Coordinate::new(0, 1, 0)), Some(&Cell::pump_head()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pump {
    base: Coordinate,
    facing: Direction,
    extended: bool,
    kind: ResolverKind,
}

impl Pump {
    /// Creates a retracted pump.
    #[must_use]
    pub fn new(base: Coordinate, facing: Direction, kind: ResolverKind) -> Self {
        Self {
            base,
            facing,
            extended: false,
            kind,
        }
    }

    /// Base coordinate.
    #[must_use]
    pub fn base(&self) -> Coordinate {
        self.base
    }

    /// Direction the head extends.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Head coordinate while extended.
    #[must_use]
    pub fn head(&self) -> Coordinate {
        self.base.relative(self.facing)
    }

    /// Whether the head is out.
    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Resolver used for pushes.
    #[must_use]
    pub fn kind(&self) -> ResolverKind {
        self.kind
    }

    /// Write the pump's current cells into `grid`.
    pub fn place(&self, grid: &mut VoxelGrid) {
        grid.set(self.base, Cell::pump_base(self.extended));
        if self.extended {
            grid.set(self.head(), Cell::pump_head());
        }
    }

    /// Decide this tick's action without touching the grid.
    #[must_use]
    pub fn react(&self, grid: &dyn GridQuery, powered: bool, config: &ResolverConfig) -> PumpAction {
        // A base is a machine with attached state; a bare head is not
        if !grid.is_machine_like(self.base) || !grid.has_attached_state(self.base) {
            debug!(base = ?self.base, "pump base missing");
            return PumpAction::Idle;
        }

        match (powered, self.extended) {
            (true, false) => {
                let request = PushRequest::extend(self.base, self.facing);
                let resolution = self.kind.resolve(grid, &request, config);
                match PushPlan::from_resolution(&request, &resolution) {
                    Ok(plan) => PumpAction::Extend(plan),
                    Err(_) => {
                        debug!(base = ?self.base, facing = %self.facing, "pump stalled");
                        PumpAction::Stalled
                    }
                }
            }
            (false, true) => PumpAction::Retract {
                pull: self.plan_pull(grid, config),
            },
            _ => PumpAction::Idle,
        }
    }

    /// Plan the pull of a sticky pump, resolved as though the head were
    /// already gone.
    fn plan_pull(&self, grid: &dyn GridQuery, config: &ResolverConfig) -> Option<PushPlan> {
        if self.kind != ResolverKind::Sticky {
            return None;
        }
        let without_head = ClearedCell::new(grid, self.head());
        let request = PushRequest::retract(self.base, self.facing);
        let resolution = self.kind.resolve(&without_head, &request, config);
        if !resolution.success {
            debug!(base = ?self.base, "pull blocked, structure left behind");
            return None;
        }
        if resolution.is_noop() {
            return None;
        }
        PushPlan::from_resolution(&request, &resolution).ok()
    }

    /// Every cell `action` may write, including the pump's own cells.
    #[must_use]
    pub fn footprint(&self, action: &PumpAction) -> BTreeSet<Coordinate> {
        let mut cells = BTreeSet::new();
        match action {
            PumpAction::Idle | PumpAction::Stalled => return cells,
            PumpAction::Extend(plan) | PumpAction::Retract { pull: Some(plan) } => {
                cells.extend(plan.touched());
            }
            PumpAction::Retract { pull: None } => {}
        }
        cells.insert(self.base);
        cells.insert(self.head());
        cells
    }

    /// Commit `action` to `grid` and update the pump's state.
    ///
    /// # Errors
    ///
    /// Any [`CommitError`] from the push plan. The grid and the pump are left
    /// unchanged in that case.
    pub fn apply(
        &mut self,
        action: PumpAction,
        grid: &mut VoxelGrid,
    ) -> Result<CommitReport, CommitError> {
        match action {
            PumpAction::Idle | PumpAction::Stalled => Ok(CommitReport::default()),
            PumpAction::Extend(plan) => {
                let report = plan.apply(grid)?;
                self.extended = true;
                grid.set(self.base, Cell::pump_base(true));
                debug!(base = ?self.base, facing = %self.facing, "pump extended");
                Ok(report)
            }
            PumpAction::Retract { pull } => {
                if let Some(plan) = &pull {
                    plan.validate(grid)?;
                }
                let head = self.head();
                if grid.get(head).is_some_and(Cell::is_machine) {
                    grid.remove(head);
                }
                self.extended = false;
                grid.set(self.base, Cell::pump_base(false));
                let report = match pull {
                    Some(plan) => plan.apply(grid)?,
                    None => CommitReport::default(),
                };
                debug!(base = ?self.base, pulled = report.moved, "pump retracted");
                Ok(report)
            }
        }
    }
}
