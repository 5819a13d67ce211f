//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for regions (arena index into the region graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Turn counter (one turn = one in-game month)
pub type Turn = u32;

/// Vertical level index within the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelId(pub u32);

impl LevelId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// What kind of layer a level is; drives terrain selection and reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelKind {
    Surface,
    Underworld,
    Underdeep,
    Nexus,
}

/// The six hex compass directions, in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    Northeast = 1,
    Southeast = 2,
    South = 3,
    Southwest = 4,
    Northwest = 5,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::Northeast,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::Northwest,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(i: usize) -> Option<Direction> {
        Direction::ALL.get(i).copied()
    }

    pub fn opposite(&self) -> Direction {
        Direction::ALL[(self.index() + 3) % 6]
    }

    /// Grid offset on the brick-parity lattice: cells live at (x, y) with
    /// x + y even, so N/S are two rows away and the diagonals are one
    /// column and one row away.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -2),
            Direction::Northeast => (1, -1),
            Direction::Southeast => (1, 1),
            Direction::South => (0, 2),
            Direction::Southwest => (-1, 1),
            Direction::Northwest => (-1, -1),
        }
    }

    pub fn abbr(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::Northeast => "NE",
            Direction::Southeast => "SE",
            Direction::South => "S",
            Direction::Southwest => "SW",
            Direction::Northwest => "NW",
        }
    }
}

/// Which side of a market listing the region is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSide {
    /// The region buys this item from the world (player sells to it)
    Buy,
    /// The region sells this item to the world (player buys from it)
    Sell,
}
