//! The pushability predicate.
//!
//! [`is_pushable`] decides whether one cell may take part in a push. `false`
//! means the cell either blocks the push or, for `Destroy` cells when
//! destruction is not allowed, would have to break.

use pneumatic_grid::{Coordinate, Direction, PushReaction};

use crate::query::GridQuery;

/// Whether the cell at `pos` can move along `move_dir`.
///
/// # Arguments
///
/// * `grid` - World being resolved
/// * `pos` - Candidate cell
/// * `move_dir` - Direction the cell would move
/// * `allow_destroy` - Whether a `Destroy` cell counts as pushable (it breaks)
/// * `facing` - Facing of the pump, or the lateral direction a branch enters
///   from. `PushOnly` cells move only when `move_dir == facing`.
///
/// # Example
///
/// ```
/// use pneumatic_core::pushability::is_pushable;
/// use pneumatic_grid::{Bounds, Cell, Coordinate, Direction, VoxelGrid};
///
/// let mut grid = VoxelGrid::new(Bounds::default());
/// let pos = Coordinate::new(0, 0, 0);
/// grid.set(pos, Cell::torch());
///
/// assert!(!is_pushable(&grid, pos, Direction::East, false, Direction::East));
/// assert!(is_pushable(&grid, pos, Direction::East, true, Direction::East));
/// ```
#[must_use]
pub fn is_pushable(
    grid: &dyn GridQuery,
    pos: Coordinate,
    move_dir: Direction,
    allow_destroy: bool,
    facing: Direction,
) -> bool {
    if !grid.is_within_bounds(pos) {
        return false;
    }
    if grid.is_empty_at(pos) {
        return true;
    }
    if grid.is_indestructible_material(pos) {
        return false;
    }
    if (move_dir == Direction::Down && grid.is_at_floor(pos))
        || (move_dir == Direction::Up && grid.is_at_ceiling(pos))
    {
        return false;
    }

    if grid.is_extended_machine(pos) || grid.destroy_speed_is_infinite(pos) {
        return false;
    }

    match grid.push_reaction_at(pos) {
        PushReaction::Block => return false,
        PushReaction::Destroy => return allow_destroy,
        PushReaction::PushOnly if move_dir != facing => return false,
        PushReaction::PushOnly | PushReaction::Normal => {}
    }

    // Pump and piston parts carry state but still move while retracted
    !grid.has_attached_state(pos) || grid.is_machine_like(pos)
}
