use log::{debug, error, trace};

use crate::core::{
    battle::{
        check::check,
        command::{self, Command},
        movement,
        state::{self, State},
        unit::Unit,
        PlayerId, Points, UnitId,
    },
    map::Coords,
};

/// Applies a command that the caller has already validated through the
/// legality queries. An illegal command is a caller bug: it's logged and
/// then the call panics.
pub fn execute(state: &mut State, command: &Command) {
    trace!("execute: {:?}", command);
    if let Err(err) = check(state, command) {
        error!("Check failed: {:?}", err);
        panic!("Can't execute {:?}: {:?}", command, err);
    }
    match *command {
        Command::Create(ref command) => execute_create(state, command),
        Command::MoveTo(ref command) => execute_move_to(state, command),
        Command::Attack(ref command) => execute_attack(state, command),
        Command::Capture(ref command) => execute_capture(state, command),
        Command::Buy(ref command) => execute_buy(state, command),
        Command::EndTurn(ref command) => execute_end_turn(state, command),
    }
}

fn unit_at(state: &State, pos: Coords) -> UnitId {
    state::unit_at(state, pos).expect("No unit at the checked position")
}

fn execute_create(state: &mut State, command: &command::Create) {
    let rules = state.rules();
    let stats = rules.prototypes.stats(command.unit_type);
    let mut unit = Unit::new(
        command.unit_type,
        command.owner,
        stats,
        rules.base_hit_points,
    );
    unit.place(command.pos);
    let is_hq = command.unit_type.is_headquarters();
    let id = state.add_unit(unit);
    state.map_mut().tile_mut(command.pos).set_unit(Some(id));
    let player = state.player_mut(command.owner);
    if is_hq {
        player.add_hq(id);
    } else {
        player.add_unit(id);
    }
}

fn execute_move_to(state: &mut State, command: &command::MoveTo) {
    let id = unit_at(state, command.from);
    let mut destinations = movement::reachable_destinations(state, id);
    let path = destinations
        .remove(&command.to)
        .expect("The checked destination is unreachable");
    let duration = state.rules().move_duration;
    let map = state.map_mut();
    map.tile_mut(command.from).set_unit(None);
    map.tile_mut(command.to).set_unit(Some(id));
    state.unit_mut(id).start_move(&path, duration);
}

fn execute_attack(state: &mut State, command: &command::Attack) {
    let id = unit_at(state, command.attacker);
    let target_id = unit_at(state, command.target);
    let attacker = state.unit_mut(id);
    attacker.deactivate();
    attacker.start_attack(command.target);
    state.unit_mut(target_id).set_busy(true);
}

fn execute_capture(state: &mut State, command: &command::Capture) {
    let id = unit_at(state, command.pos);
    let player_id = state.player_id();
    let building = state
        .map_mut()
        .tile_mut(command.pos)
        .building_mut()
        .expect("No building to capture");
    building.set_owner(player_id);
    state.unit_mut(id).deactivate();
    debug!("{} captured the flag at {}", player_id, command.pos);
}

fn execute_buy(state: &mut State, command: &command::Buy) {
    let hq_id = unit_at(state, command.hq);
    let player_id = state.player_id();
    let cost = state
        .rules()
        .prototypes
        .cost(command.unit_type)
        .expect("The checked unit type isn't for sale");
    state.unit_mut(hq_id).deactivate();
    state.player_mut(player_id).spend_points(cost);
    let create = command::Create {
        owner: player_id,
        pos: command.pos,
        unit_type: command.unit_type,
    };
    execute_create(state, &create);
}

fn execute_end_turn(state: &mut State, _: &command::EndTurn) {
    let old_player_id = state.player_id();
    end_turn(state, old_player_id);
    let new_player_id = state.next_player_id();
    state.set_player_id(new_player_id);
    start_turn(state, new_player_id);
}

fn end_turn(state: &mut State, player_id: PlayerId) {
    for id in state::players_unit_ids(state, player_id) {
        state.unit_mut(id).deactivate();
    }
}

/// Activates the player's units and pays out for every flag the player holds.
pub(in crate::core) fn start_turn(state: &mut State, player_id: PlayerId) {
    for id in state::players_unit_ids(state, player_id) {
        state.unit_mut(id).activate();
    }
    let flags = state::owned_flags_count(state, player_id) as i32;
    let award = Points(state.rules().flag_points.0 * flags);
    state.player_mut(player_id).add_points(award);
    debug!("{}'s turn, {} flag(s) gave {} points", player_id, flags, award.0);
}

/// Drops destroyed units from their owners' rosters at once and takes
/// them off the grid once their sequence is over.
pub(in crate::core) fn remove_destroyed(state: &mut State) -> Vec<UnitId> {
    let destroyed: Vec<UnitId> = state::unit_ids(state)
        .into_iter()
        .filter(|&id| state.unit(id).is_destroyed())
        .collect();
    for &id in &destroyed {
        let player_id = state.unit(id).player_id();
        state.player_mut(player_id).prune(|other| other == id);
    }
    let dead: Vec<UnitId> = destroyed
        .into_iter()
        .filter(|&id| !state.unit(id).is_busy())
        .collect();
    for &id in &dead {
        let unit = state.remove_unit(id);
        debug!("{} lost its {}", unit.player_id(), unit.unit_type());
        state.map_mut().tile_mut(unit.pos()).set_unit(None);
    }
    dead
}
