use std::fmt;

use crate::core::{
    battle::{
        component::UnitType,
        movement,
        state::{self, State},
        Points, UnitId,
    },
    map::Coords,
};

/// An entry of a unit's action menu.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Move { destinations: Vec<Coords> },
    Attack { targets: Vec<Coords> },
    Capture,
    Recruit {
        unit_type: UnitType,
        cost: Points,
        coords: Vec<Coords>,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Action::Move { .. } => write!(f, "Move"),
            Action::Attack { .. } => write!(f, "Attack"),
            Action::Capture => write!(f, "Capture"),
            Action::Recruit {
                unit_type, cost, ..
            } => write!(f, "{} ({})", unit_type, cost.0),
        }
    }
}

/// Tiles the unit may move to right now.
pub fn destinations(state: &State, id: UnitId) -> Vec<Coords> {
    let unit = state.unit(id);
    if unit.has_moved() || unit.move_range().0 <= 0 {
        return Vec::new();
    }
    movement::reachable_destinations(state, id)
        .keys()
        .cloned()
        .collect()
}

/// Adjacent enemies that aren't busy. Units without attack have none.
pub fn attack_targets(state: &State, id: UnitId) -> Vec<Coords> {
    let unit = state.unit(id);
    if unit.attack() <= 0 {
        return Vec::new();
    }
    let pos = unit.pos();
    state::attack_targets_from(state, id, pos)
        .into_iter()
        .filter(|&pos| match state::unit_at(state, pos) {
            Some(target_id) => !state.unit(target_id).is_busy(),
            None => false,
        })
        .collect()
}

/// Unit types the owner of the headquarters can afford, in menu order.
pub fn affordable_unit_types(state: &State, id: UnitId) -> Vec<(UnitType, Points)> {
    let unit = state.unit(id);
    if !unit.can_recruit() {
        return Vec::new();
    }
    let points = state.player(unit.player_id()).points();
    let prototypes = &state.rules().prototypes;
    UnitType::RECRUITABLE
        .iter()
        .filter_map(|&unit_type| prototypes.cost(unit_type).map(|cost| (unit_type, cost)))
        .filter(|&(_, cost)| cost <= points)
        .collect()
}

/// Everything the unit can do now. Empty once the unit has acted.
pub fn actions(state: &State, id: UnitId) -> Vec<Action> {
    let unit = state.unit(id);
    let mut actions = Vec::new();
    if unit.has_acted() {
        return actions;
    }
    let destinations = destinations(state, id);
    if !destinations.is_empty() {
        actions.push(Action::Move { destinations });
    }
    let targets = attack_targets(state, id);
    if !targets.is_empty() {
        actions.push(Action::Attack { targets });
    }
    if state::can_capture_at(state, id, unit.pos()) {
        actions.push(Action::Capture);
    }
    let build_coords = state::build_coords(state, id);
    if !build_coords.is_empty() {
        for (unit_type, cost) in affordable_unit_types(state, id) {
            actions.push(Action::Recruit {
                unit_type,
                cost,
                coords: build_coords.clone(),
            });
        }
    }
    actions
}
