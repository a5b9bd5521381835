//! Integer coordinates and axis-aligned directions.
//!
//! A [`Coordinate`] names one cell of the voxel grid. A [`Direction`] is one of
//! the six unit steps between face-adjacent cells.

use std::cmp::Ordering;
use std::fmt;

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Integer cell coordinate.
///
/// Coordinates are plain `Copy` values. They order by `y`, then `z`, then `x`
/// so that a `BTreeMap` keyed by coordinate iterates layer by layer.
///
/// # Example
///
/// ```
/// use pneumatic_grid::{Coordinate, Direction};
///
/// let pos = Coordinate::new(1, 0, 0);
/// assert_eq!(pos.relative(Direction::East), Coordinate::new(2, 0, 0));
/// assert_eq!(pos.relative_by(Direction::Up, 3), Coordinate::new(1, 3, 0));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate(IVec3);

impl Coordinate {
    /// Creates a coordinate from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    /// X component.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0.x
    }

    /// Y (vertical) component.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.0.y
    }

    /// Z component.
    #[must_use]
    pub const fn z(self) -> i32 {
        self.0.z
    }

    /// The neighbouring cell one step along `direction`.
    #[must_use]
    pub fn relative(self, direction: Direction) -> Self {
        Self(self.0 + direction.unit())
    }

    /// The cell `steps` unit steps along `direction`. Negative steps walk backwards.
    #[must_use]
    pub fn relative_by(self, direction: Direction, steps: i32) -> Self {
        Self(self.0 + direction.unit() * steps)
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0.y, self.0.z, self.0.x).cmp(&(other.0.y, other.0.z, other.0.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.0.x, self.0.y, self.0.z)
    }
}

/// Cartesian axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// West/east
    X,
    /// Down/up
    Y,
    /// North/south
    Z,
}

/// One of the six axis-aligned unit steps.
///
/// Variants are declared in the order used whenever all directions are
/// visited ([`Direction::ALL`]); lateral branching relies on that order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// The axis this direction varies.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Down | Self::Up => Axis::Y,
            Self::North | Self::South => Axis::Z,
            Self::West | Self::East => Axis::X,
        }
    }

    /// Unit vector of this direction.
    #[must_use]
    pub const fn unit(self) -> IVec3 {
        match self {
            Self::Down => IVec3::new(0, -1, 0),
            Self::Up => IVec3::new(0, 1, 0),
            Self::North => IVec3::new(0, 0, -1),
            Self::South => IVec3::new(0, 0, 1),
            Self::West => IVec3::new(-1, 0, 0),
            Self::East => IVec3::new(1, 0, 0),
        }
    }

    /// The four directions perpendicular to this one, in canonical order.
    pub fn lateral(self) -> impl Iterator<Item = Direction> {
        let axis = self.axis();
        Self::ALL.into_iter().filter(move |d| d.axis() != axis)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
            Self::North => write!(f, "north"),
            Self::South => write!(f, "south"),
            Self::West => write!(f, "west"),
            Self::East => write!(f, "east"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn opposite_is_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
            assert_eq!(dir.unit() + dir.opposite().unit(), IVec3::ZERO);
        }
    }

    #[test]
    fn lateral_excludes_push_axis() {
        let lateral: Vec<_> = Direction::East.lateral().collect();
        assert_eq!(
            lateral,
            vec![
                Direction::Down,
                Direction::Up,
                Direction::North,
                Direction::South
            ]
        );

        let lateral: Vec<_> = Direction::Up.lateral().collect();
        assert_eq!(
            lateral,
            vec![
                Direction::North,
                Direction::South,
                Direction::West,
                Direction::East
            ]
        );
    }

    #[test]
    fn relative_by_walks_multiple_steps() {
        let pos = Coordinate::new(4, 10, -2);
        assert_eq!(pos.relative_by(Direction::North, 2), Coordinate::new(4, 10, -4));
        assert_eq!(pos.relative_by(Direction::West, -1), Coordinate::new(5, 10, -2));
        assert_eq!(pos.relative_by(Direction::Down, 0), pos);
    }

    #[test]
    fn ordering_is_layer_major() {
        let low = Coordinate::new(100, 0, 100);
        let high = Coordinate::new(-100, 1, -100);
        assert!(low < high);
        assert!(Coordinate::new(5, 0, 0) < Coordinate::new(0, 0, 1));
    }

    #[test]
    fn coordinate_serde_roundtrip() {
        let pos = Coordinate::new(-3, 64, 7);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }

    proptest! {
        #[test]
        fn stepping_back_undoes_a_walk(
            x in -1000i32..1000, y in -64i32..320, z in -1000i32..1000,
            dir_index in 0usize..6,
            steps in -16i32..16,
        ) {
            let pos = Coordinate::new(x, y, z);
            let dir = Direction::ALL[dir_index];
            let there = pos.relative_by(dir, steps);
            prop_assert_eq!(there.relative_by(dir.opposite(), steps), pos);
            prop_assert_eq!(there.relative_by(dir, -steps), pos);
        }

        #[test]
        fn ordering_follows_height_first(
            a in (-50i32..50, -50i32..50, -50i32..50),
            b in (-50i32..50, -50i32..50, -50i32..50),
        ) {
            let pa = Coordinate::new(a.0, a.1, a.2);
            let pb = Coordinate::new(b.0, b.1, b.2);
            prop_assert_eq!(pa.cmp(&pb), (a.1, a.2, a.0).cmp(&(b.1, b.2, b.0)));
        }
    }
}
