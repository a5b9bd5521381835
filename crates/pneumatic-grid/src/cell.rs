//! Cell contents: push reaction, flags and glue.
//!
//! The grid stores one [`Cell`] per occupied coordinate. A cell carries exactly
//! the facts a push resolver needs to classify it; everything else about a block
//! belongs to whoever owns the world.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// How a cell responds to being pushed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PushReaction {
    /// Moves with the push.
    #[default]
    Normal,
    /// Moves only when pushed along the pump's own facing.
    PushOnly,
    /// Never moves; blocks the push.
    Block,
    /// Is destroyed by the push instead of moving.
    Destroy,
}

bitflags! {
    /// Per-cell classification flags.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CellFlags: u8 {
        /// Obsidian-like material that never moves.
        const INDESTRUCTIBLE_MATERIAL = 1 << 0;
        /// Infinite destroy speed (bedrock-like).
        const UNBREAKABLE = 1 << 1;
        /// Carries an attached block entity.
        const BLOCK_ENTITY = 1 << 2;
        /// Pump or piston part (base or head).
        const MACHINE = 1 << 3;
        /// Machine that is currently extended.
        const EXTENDED = 1 << 4;
    }
}

/// Adhesive behaviour of a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Glue {
    /// Not sticky.
    #[default]
    None,
    /// Slime-like glue.
    Slime,
    /// Honey-like glue. Does not stick to slime.
    Honey,
}

impl Glue {
    /// Whether two glues hold together.
    ///
    /// At least one side must be sticky, and slime never sticks to honey.
    #[must_use]
    pub fn sticks_to(self, other: Glue) -> bool {
        match (self, other) {
            (Glue::Slime, Glue::Honey) | (Glue::Honey, Glue::Slime) => false,
            (Glue::None, Glue::None) => false,
            _ => true,
        }
    }
}

/// One occupied grid cell.
///
/// # Example
///
/// ```
/// use pneumatic_grid::{Cell, PushReaction};
///
/// let torch = Cell::torch();
/// assert_eq!(torch.reaction, PushReaction::Destroy);
/// assert!(Cell::slime().is_sticky());
/// assert!(!Cell::slime().sticks_to(&Cell::honey()));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Push reaction
    pub reaction: PushReaction,
    /// Classification flags
    pub flags: CellFlags,
    /// Adhesion
    pub glue: Glue,
}

impl Cell {
    /// Creates a cell from its parts.
    #[must_use]
    pub const fn new(reaction: PushReaction, flags: CellFlags, glue: Glue) -> Self {
        Self {
            reaction,
            flags,
            glue,
        }
    }

    /// Ordinary movable block.
    #[must_use]
    pub const fn stone() -> Self {
        Self::new(PushReaction::Normal, CellFlags::empty(), Glue::None)
    }

    /// Sticky block that drags neighbours along.
    #[must_use]
    pub const fn slime() -> Self {
        Self::new(PushReaction::Normal, CellFlags::empty(), Glue::Slime)
    }

    /// Sticky block that does not stick to slime.
    #[must_use]
    pub const fn honey() -> Self {
        Self::new(PushReaction::Normal, CellFlags::empty(), Glue::Honey)
    }

    /// Indestructible material.
    #[must_use]
    pub const fn obsidian() -> Self {
        Self::new(
            PushReaction::Normal,
            CellFlags::INDESTRUCTIBLE_MATERIAL,
            Glue::None,
        )
    }

    /// Unbreakable foundation block.
    #[must_use]
    pub const fn bedrock() -> Self {
        Self::new(PushReaction::Normal, CellFlags::UNBREAKABLE, Glue::None)
    }

    /// Fragile block destroyed by any push.
    #[must_use]
    pub const fn torch() -> Self {
        Self::new(PushReaction::Destroy, CellFlags::empty(), Glue::None)
    }

    /// Block that moves only straight ahead of a pump.
    #[must_use]
    pub const fn glazed_terracotta() -> Self {
        Self::new(PushReaction::PushOnly, CellFlags::empty(), Glue::None)
    }

    /// Block that refuses to move at all.
    #[must_use]
    pub const fn barrier() -> Self {
        Self::new(PushReaction::Block, CellFlags::empty(), Glue::None)
    }

    /// Container with attached state.
    #[must_use]
    pub const fn chest() -> Self {
        Self::new(PushReaction::Normal, CellFlags::BLOCK_ENTITY, Glue::None)
    }

    /// Pump base. An extended base reacts `Block`.
    #[must_use]
    pub const fn pump_base(extended: bool) -> Self {
        if extended {
            Self::new(
                PushReaction::Block,
                CellFlags::MACHINE
                    .union(CellFlags::BLOCK_ENTITY)
                    .union(CellFlags::EXTENDED),
                Glue::None,
            )
        } else {
            Self::new(
                PushReaction::Normal,
                CellFlags::MACHINE.union(CellFlags::BLOCK_ENTITY),
                Glue::None,
            )
        }
    }

    /// Pump head placed in front of an extended base.
    #[must_use]
    pub const fn pump_head() -> Self {
        Self::new(PushReaction::Block, CellFlags::MACHINE, Glue::None)
    }

    /// Whether this cell carries any glue.
    #[must_use]
    pub fn is_sticky(&self) -> bool {
        self.glue != Glue::None
    }

    /// Whether this cell holds on to `other`.
    #[must_use]
    pub fn sticks_to(&self, other: &Cell) -> bool {
        self.glue.sticks_to(other.glue)
    }

    /// Whether the cell is a pump/piston part.
    #[must_use]
    pub fn is_machine(&self) -> bool {
        self.flags.contains(CellFlags::MACHINE)
    }

    /// Whether the cell is an extended pump/piston part.
    #[must_use]
    pub fn is_extended_machine(&self) -> bool {
        self.flags.contains(CellFlags::MACHINE | CellFlags::EXTENDED)
    }
}
