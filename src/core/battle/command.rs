use crate::core::{
    battle::{component::UnitType, PlayerId},
    map::Coords,
};

#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Command {
    Create(Create),
    MoveTo(MoveTo),
    Attack(Attack),
    Capture(Capture),
    Buy(Buy),
    EndTurn(EndTurn),
}

/// Places a new unit. Used to set a scenario up, never by the players.
#[derive(Debug, Clone, PartialEq)]
pub struct Create {
    pub owner: PlayerId,
    pub pos: Coords,
    pub unit_type: UnitType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveTo {
    pub from: Coords,
    pub to: Coords,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attack {
    pub attacker: Coords,
    pub target: Coords,
}

/// Claims the building under the unit at `pos` for the active player.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub pos: Coords,
}

/// Recruits a new unit next to the headquarters at `hq`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buy {
    pub hq: Coords,
    pub pos: Coords,
    pub unit_type: UnitType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndTurn;
