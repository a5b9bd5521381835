//! Multi-pump scheduling.
//!
//! A [`PumpBank`] advances many pumps through one tick in two phases:
//!
//! 1. **PLAN**: every pump reacts to the frozen grid in parallel
//! 2. **COMMIT**: actions are applied one at a time in base-coordinate order
//!
//! An earlier commit may invalidate a later plan. Before committing, a plan is
//! resolved again against the current grid when any cell it read has been
//! written during this tick. A successful resolution only reads the cells it
//! writes and their face neighbours, so that set is compared against the
//! cells written so far. Failed resolutions may have read anywhere and are
//! always re-planned once something has changed. An idle pump only looked at
//! its own base.
//!
//! # Determinism
//!
//! Planning is parallel but commit order is fixed by the `BTreeMap` key, and
//! every committed action is equivalent to one resolved against the grid as
//! it stands at that point. The result matches running the pumps one after
//! another.

use std::collections::{BTreeMap, BTreeSet};

use pneumatic_grid::{Coordinate, Direction, VoxelGrid};
use rayon::prelude::*;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{CommitError, ConfigError};
use crate::pump::{Pump, PumpAction};
use crate::resolver::ResolverKind;

/// What happened to one pump during a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpOutcome {
    /// No change
    Idle,
    /// Powered but blocked
    Stalled,
    /// Head extended
    Extended {
        /// Cells pushed
        moved: usize,
        /// Cells broken
        destroyed: usize,
    },
    /// Head retracted
    Retracted {
        /// Cells pulled back
        pulled: usize,
    },
    /// The action could not be committed
    Failed(CommitError),
}

/// Per-pump outcomes of one [`PumpBank::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Outcome keyed by pump base
    pub outcomes: BTreeMap<Coordinate, PumpOutcome>,
    /// Number of plans resolved again during commit
    pub replanned: usize,
}

impl StepReport {
    /// Outcome for the pump at `base`.
    #[must_use]
    pub fn outcome(&self, base: Coordinate) -> Option<&PumpOutcome> {
        self.outcomes.get(&base)
    }

    /// Number of pumps that changed the grid.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.outcomes
            .values()
            .filter(|outcome| {
                matches!(
                    outcome,
                    PumpOutcome::Extended { .. } | PumpOutcome::Retracted { .. }
                )
            })
            .count()
    }
}

/// A set of pumps stepped together.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use pneumatic_core::bank::{PumpBank, PumpOutcome};
/// use pneumatic_core::config::ResolverConfig;
/// use pneumatic_core::pump::Pump;
/// use pneumatic_core::resolver::ResolverKind;
/// use pneumatic_grid::{Bounds, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let mut bank = PumpBank::new(ResolverConfig::default()).unwrap();
/// let base = Coordinate::new(0, 0, 0);
/// bank.insert(Pump::new(base, Direction::North, ResolverKind::Line));
/// bank.place_all(&mut grid);
///
/// let report = bank.step(&mut grid, &BTreeSet::from([base]));
/// assert!(matches!(report.outcome(base), Some(PumpOutcome::Extended { .. })));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PumpBank {
    pumps: BTreeMap<Coordinate, Pump>,
    config: ResolverConfig,
}

impl PumpBank {
    /// Creates an empty bank.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pumps: BTreeMap::new(),
            config,
        })
    }

    /// Resolver limits used by every pump.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Add a pump, replacing any pump with the same base.
    pub fn insert(&mut self, pump: Pump) -> Option<Pump> {
        self.pumps.insert(pump.base(), pump)
    }

    /// Remove the pump at `base`.
    pub fn remove(&mut self, base: Coordinate) -> Option<Pump> {
        self.pumps.remove(&base)
    }

    /// Pump at `base`.
    #[must_use]
    pub fn get(&self, base: Coordinate) -> Option<&Pump> {
        self.pumps.get(&base)
    }

    /// Number of pumps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pumps.len()
    }

    /// Whether the bank has no pumps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pumps.is_empty()
    }

    /// Pumps in base order.
    pub fn iter(&self) -> impl Iterator<Item = &Pump> {
        self.pumps.values()
    }

    /// Write every pump's cells into `grid`.
    pub fn place_all(&self, grid: &mut VoxelGrid) {
        for pump in self.pumps.values() {
            pump.place(grid);
        }
    }

    /// Advance every pump by one tick. Pumps whose base is in `powered` are
    /// powered; all others are not.
    pub fn step(&mut self, grid: &mut VoxelGrid, powered: &BTreeSet<Coordinate>) -> StepReport {
        let config = self.config;

        // PLAN: parallel, read only
        let planned: Vec<(Coordinate, PumpAction)> = {
            let frozen: &VoxelGrid = grid;
            let pumps: Vec<&Pump> = self.pumps.values().collect();
            pumps
                .par_iter()
                .map(|pump| {
                    let action = pump.react(frozen, powered.contains(&pump.base()), &config);
                    (pump.base(), action)
                })
                .collect()
        };

        // COMMIT: sequential, base order
        let mut report = StepReport::default();
        let mut dirty: BTreeSet<Coordinate> = BTreeSet::new();

        for (base, mut action) in planned {
            let Some(pump) = self.pumps.get_mut(&base) else {
                continue;
            };

            if needs_replan(pump, &action, &dirty) {
                debug!(?base, "re-planning against updated grid");
                action = pump.react(&*grid, powered.contains(&base), &config);
                report.replanned += 1;
            }

            let footprint = pump.footprint(&action);
            let outcome = match action {
                PumpAction::Idle => PumpOutcome::Idle,
                PumpAction::Stalled => PumpOutcome::Stalled,
                action @ PumpAction::Extend(_) => match pump.apply(action, grid) {
                    Ok(commit) => PumpOutcome::Extended {
                        moved: commit.moved,
                        destroyed: commit.destroyed.len(),
                    },
                    Err(err) => PumpOutcome::Failed(err),
                },
                action @ PumpAction::Retract { .. } => match pump.apply(action, grid) {
                    Ok(commit) => PumpOutcome::Retracted {
                        pulled: commit.moved,
                    },
                    Err(err) => PumpOutcome::Failed(err),
                },
            };

            if let PumpOutcome::Failed(err) = &outcome {
                debug!(?base, %err, "pump action rejected");
            } else {
                dirty.extend(footprint);
            }
            report.outcomes.insert(base, outcome);
        }

        debug!(
            pumps = self.pumps.len(),
            changed = report.changed(),
            replanned = report.replanned,
            "bank stepped"
        );
        report
    }
}

/// Whether `action`, planned before this tick's commits, may differ from a
/// plan made against the grid now.
fn needs_replan(pump: &Pump, action: &PumpAction, dirty: &BTreeSet<Coordinate>) -> bool {
    if dirty.is_empty() {
        return false;
    }
    match action {
        PumpAction::Idle => dirty.contains(&pump.base()),
        PumpAction::Stalled => true,
        PumpAction::Retract { pull: None } if pump.kind() == ResolverKind::Sticky => true,
        _ => pump.footprint(action).iter().any(|&pos| {
            dirty.contains(&pos)
                || Direction::ALL
                    .iter()
                    .any(|&dir| dirty.contains(&pos.relative(dir)))
        }),
    }
}
