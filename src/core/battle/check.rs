use log::trace;

use crate::core::{
    battle::{
        command::{self, Command},
        movement,
        state::{self, State},
        UnitId,
    },
    map::{self, Coords},
};

pub fn check(state: &State, command: &Command) -> Result<(), Error> {
    trace!("check: {:?}", command);
    let is_setup = matches!(*command, Command::Create(_));
    if state.battle_result().is_some() && !is_setup {
        return Err(Error::BattleEnded);
    }
    match *command {
        Command::Create(ref command) => check_command_create(state, command),
        Command::MoveTo(ref command) => check_command_move_to(state, command),
        Command::Attack(ref command) => check_command_attack(state, command),
        Command::Capture(ref command) => check_command_capture(state, command),
        Command::Buy(ref command) => check_command_buy(state, command),
        Command::EndTurn(ref command) => check_command_end_turn(state, command),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    BattleEnded,
    BadPos,
    BadOwner,
    NoUnit,
    NoTarget,
    CanNotAttack,
    CanNotCommandEnemyUnits,
    UnitIsBusy,
    TargetIsBusy,
    AlreadyMoved,
    AlreadyActed,
    BadDestination,
    TargetIsNotAdjacent,
    TargetIsFriendly,
    NothingToCapture,
    CanNotRecruit,
    NotForSale,
    NotEnoughPoints,
    TileIsOccupied,
}

fn check_command_create(state: &State, command: &command::Create) -> Result<(), Error> {
    check_is_inboard(state, command.pos)?;
    if !state::is_tile_free(state, command.pos) {
        return Err(Error::TileIsOccupied);
    }
    if command.owner.0 < 1 || command.owner.index() >= state.players().len() {
        return Err(Error::BadOwner);
    }
    Ok(())
}

fn check_command_move_to(state: &State, command: &command::MoveTo) -> Result<(), Error> {
    let id = try_get_actor(state, command.from)?;
    let unit = state.unit(id);
    if unit.has_moved() {
        return Err(Error::AlreadyMoved);
    }
    if unit.has_acted() {
        return Err(Error::AlreadyActed);
    }
    check_is_inboard(state, command.to)?;
    if !movement::reachable_destinations(state, id).contains_key(&command.to) {
        return Err(Error::BadDestination);
    }
    Ok(())
}

fn check_command_attack(state: &State, command: &command::Attack) -> Result<(), Error> {
    let id = try_get_actor(state, command.attacker)?;
    if state.unit(id).attack() <= 0 {
        return Err(Error::CanNotAttack);
    }
    if state.unit(id).has_acted() {
        return Err(Error::AlreadyActed);
    }
    check_is_inboard(state, command.target)?;
    let target_id = match state::unit_at(state, command.target) {
        Some(target_id) => target_id,
        None => return Err(Error::NoTarget),
    };
    if state::is_unit_belong_to(state, state.player_id(), target_id) {
        return Err(Error::TargetIsFriendly);
    }
    if map::manhattan_distance(command.attacker, command.target).0 != 1 {
        return Err(Error::TargetIsNotAdjacent);
    }
    if state.unit(target_id).is_busy() {
        return Err(Error::TargetIsBusy);
    }
    Ok(())
}

fn check_command_capture(state: &State, command: &command::Capture) -> Result<(), Error> {
    let id = try_get_actor(state, command.pos)?;
    if state.unit(id).has_acted() {
        return Err(Error::AlreadyActed);
    }
    if !state::can_capture_at(state, id, command.pos) {
        return Err(Error::NothingToCapture);
    }
    Ok(())
}

fn check_command_buy(state: &State, command: &command::Buy) -> Result<(), Error> {
    let id = try_get_actor(state, command.hq)?;
    let hq = state.unit(id);
    if !hq.can_recruit() {
        return Err(Error::CanNotRecruit);
    }
    if hq.has_acted() {
        return Err(Error::AlreadyActed);
    }
    let cost = match state.rules().prototypes.cost(command.unit_type) {
        Some(cost) => cost,
        None => return Err(Error::NotForSale),
    };
    if state.player(state.player_id()).points() < cost {
        return Err(Error::NotEnoughPoints);
    }
    check_is_inboard(state, command.pos)?;
    if map::manhattan_distance(command.hq, command.pos).0 != 1 {
        return Err(Error::BadDestination);
    }
    if !state::is_tile_free(state, command.pos) {
        return Err(Error::TileIsOccupied);
    }
    Ok(())
}

fn check_command_end_turn(_: &State, _: &command::EndTurn) -> Result<(), Error> {
    Ok(())
}

/// A non-busy unit of the active player.
fn try_get_actor(state: &State, pos: Coords) -> Result<UnitId, Error> {
    check_is_inboard(state, pos)?;
    let id = match state::unit_at(state, pos) {
        Some(id) => id,
        None => return Err(Error::NoUnit),
    };
    if !state::is_unit_belong_to(state, state.player_id(), id) {
        return Err(Error::CanNotCommandEnemyUnits);
    }
    if state.unit(id).is_busy() {
        return Err(Error::UnitIsBusy);
    }
    Ok(id)
}

fn check_is_inboard(state: &State, pos: Coords) -> Result<(), Error> {
    if state.map().is_inboard(pos) {
        Ok(())
    } else {
        Err(Error::BadPos)
    }
}
