use std::time::Duration;

use log::{debug, trace};

use crate::core::{
    battle::{
        combat,
        state::{self, State},
        unit::{AttackSequence, AttackStep, Sequence},
        UnitId,
    },
    map::Coords,
};

/// Advances every unit's animation and its running move or attack.
/// Units are visited in the grid's iteration order.
pub(in crate::core) fn update(state: &mut State, dtime: Duration) {
    for id in state::unit_ids(state) {
        state.unit_mut(id).update_animation(dtime);
        let sequence = state.unit(id).sequence();
        let is_moving = matches!(sequence, Sequence::Moving(_));
        let is_attacking = matches!(sequence, Sequence::Attacking(_));
        if is_moving {
            state.unit_mut(id).update_move(dtime);
        } else if is_attacking {
            update_attack(state, id, dtime);
        }
    }
}

fn update_attack(state: &mut State, id: UnitId, dtime: Duration) {
    let mut attack = match state.unit_mut(id).take_attack() {
        Some(attack) => attack,
        None => return,
    };
    let step_duration = state.rules().attack_duration;
    attack.progress += dtime;
    while attack.progress >= step_duration {
        attack.progress -= step_duration;
        if !do_attack_step(state, id, &mut attack) {
            finish_attack(state, id, attack.target);
            return;
        }
    }
    update_attack_offsets(state, id, &attack);
    state.unit_mut(id).resume_attack(attack);
}

fn defender_id(state: &State, attack: &AttackSequence) -> UnitId {
    state::unit_at(state, attack.target).expect("The defender has left its tile")
}

/// Returns `false` once the whole sequence is over.
fn do_attack_step(state: &mut State, id: UnitId, attack: &mut AttackSequence) -> bool {
    let defender_id = defender_id(state, attack);
    match attack.step {
        AttackStep::Strike { dealt: false } => {
            let damage = combat::modified_attack(state, id);
            combat::deal_damage(state, defender_id, damage);
            attack.step = AttackStep::Strike { dealt: true };
            true
        }
        AttackStep::Strike { dealt: true } => {
            state.unit_mut(id).set_offset([0.0, 0.0]);
            let defender = state.unit(defender_id);
            if defender.is_destroyed() || defender.attack() == 0 {
                return false;
            }
            attack.step = AttackStep::Counter { dealt: false };
            true
        }
        AttackStep::Counter { dealt: false } => {
            let modifier = state.rules().counter_attack_modifier;
            let damage = combat::modified_attack(state, defender_id) as f32 * modifier;
            debug!("{:?} strikes back at {:?}", defender_id, id);
            combat::deal_damage(state, id, damage as i32);
            attack.step = AttackStep::Counter { dealt: true };
            true
        }
        AttackStep::Counter { dealt: true } => false,
    }
}

fn finish_attack(state: &mut State, id: UnitId, target: Coords) {
    trace!("finish_attack: {:?}", id);
    let defender_id = state::unit_at(state, target);
    for id in Some(id).into_iter().chain(defender_id) {
        let unit = state.unit_mut(id);
        unit.set_busy(false);
        unit.set_offset([0.0, 0.0]);
    }
}

/// The striking unit lunges a third of a tile toward its opponent and back.
fn update_attack_offsets(state: &mut State, id: UnitId, attack: &AttackSequence) {
    let step_duration = state.rules().attack_duration.as_secs_f32();
    let mut k = attack.progress.as_secs_f32() / step_duration / 3.0;
    let dealt = match attack.step {
        AttackStep::Strike { dealt } | AttackStep::Counter { dealt } => dealt,
    };
    if dealt {
        k = 1.0 / 3.0 - k;
    }
    let from = state.unit(id).pos();
    let to = attack.target;
    let dir = [(to.x - from.x) as f32, (to.y - from.y) as f32];
    match attack.step {
        AttackStep::Strike { .. } => {
            state.unit_mut(id).set_offset([dir[0] * k, dir[1] * k]);
        }
        AttackStep::Counter { .. } => {
            let defender_id = defender_id(state, attack);
            state
                .unit_mut(defender_id)
                .set_offset([-dir[0] * k, -dir[1] * k]);
        }
    }
}
