use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::core::battle::{
    check::check, execute::execute, manager::GameManager, state::State,
};

pub mod actions;
pub mod ai;
pub mod building;
pub mod check;
pub mod combat;
pub mod command;
pub mod component;
pub mod execute;
pub mod manager;
pub mod movement;
pub mod player;
pub mod rules;
pub mod scenario;
pub mod sequence;
pub mod state;
pub mod terrain;
pub mod tile;
pub mod unit;

#[cfg(test)]
mod tests;

/// Players are numbered from one. `0` is never a valid player.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub i32);

impl PlayerId {
    /// Position of the player's status in per-player arrays.
    pub fn index(self) -> usize {
        assert!(self.0 >= 1, "bad player id: {}", self.0);
        (self.0 - 1) as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[derive(
    Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash,
)]
pub struct UnitId(i32);

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct HitPoints(pub i32);

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MovePoints(pub i32);

#[derive(
    Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(transparent)]
pub struct Points(pub i32);

/// Selects the column of a terrain's move cost table.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveClass {
    Standard,
    Vehicle,
    Air,
}

impl MoveClass {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            MoveClass::Standard => 0,
            MoveClass::Vehicle => 1,
            MoveClass::Air => 2,
        }
    }
}

impl fmt::Display for MoveClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MoveClass::Standard => write!(f, "Standard"),
            MoveClass::Vehicle => write!(f, "Vehicle"),
            MoveClass::Air => write!(f, "Air"),
        }
    }
}
