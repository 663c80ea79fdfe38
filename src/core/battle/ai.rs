use std::{collections::VecDeque, time::Duration};

use log::{debug, trace, warn};
use rand::rngs::StdRng;

use crate::core::{
    battle::{
        actions,
        check::check,
        command::{self, Command},
        manager::GameManager,
        movement,
        state::{self, State},
        PlayerId, UnitId,
    },
    map::Coords,
    utils::{self, roll_dice},
};

#[derive(Clone, Debug, PartialEq)]
enum Phase {
    /// Idling before the turn's snapshot is taken.
    Waiting(Duration),

    /// Working through the snapshot: units first, then headquarters.
    Acting {
        units: VecDeque<UnitId>,
        hqs: VecDeque<UnitId>,
    },
}

/// A command held back until its dependent unit is idle.
#[derive(Clone, Debug)]
struct Pending {
    command: Command,
    dependent: Option<UnitId>,
}

/// Rule-driven opponent. Issues at most one command per update.
#[derive(Debug)]
pub struct Ai {
    id: PlayerId,
    phase: Phase,
    pending: Option<Pending>,

    /// The current unit's last command is issued: pop it once it's idle.
    last_action: bool,

    rng: StdRng,
}

impl Ai {
    pub fn new(id: PlayerId, seed: Option<u64>) -> Self {
        Self {
            id,
            phase: Phase::Waiting(Duration::new(0, 0)),
            pending: None,
            last_action: false,
            rng: utils::zrng(seed),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    fn reset(&mut self) {
        self.phase = Phase::Waiting(Duration::new(0, 0));
        self.pending = None;
        self.last_action = false;
    }

    /// Does nothing while a text is pending, the match is over or it's not this AI's turn.
    pub fn update(&mut self, manager: &mut GameManager, dtime: Duration) {
        if manager.info().is_some() || manager.battle_result().is_some() {
            return;
        }
        if manager.state().player_id() != self.id {
            return;
        }
        let wait_duration = manager.state().rules().ai_wait_duration;
        let (units_left, hqs_left) = match &mut self.phase {
            Phase::Waiting(progress) => {
                *progress += dtime;
                let is_ready = *progress >= wait_duration;
                if is_ready {
                    self.take_snapshot(manager.state());
                }
                return;
            }
            Phase::Acting { units, hqs } => (!units.is_empty(), !hqs.is_empty()),
        };
        if units_left {
            self.update_units(manager);
        } else if hqs_left {
            self.update_hqs(manager);
        } else {
            debug!("AI: {} ends its turn", self.id);
            manager.end_turn();
            self.reset();
        }
    }

    fn take_snapshot(&mut self, state: &State) {
        let status = state.player(self.id);
        self.phase = Phase::Acting {
            units: status.units().iter().cloned().collect(),
            hqs: status.hqs().iter().cloned().collect(),
        };
    }

    fn front_unit(&self) -> Option<UnitId> {
        match &self.phase {
            Phase::Acting { units, .. } => units.front().cloned(),
            Phase::Waiting(_) => None,
        }
    }

    fn pop_unit(&mut self) {
        if let Phase::Acting { units, .. } = &mut self.phase {
            units.pop_front();
        }
        self.pending = None;
        self.last_action = false;
    }

    fn update_units(&mut self, manager: &mut GameManager) {
        let id = match self.front_unit() {
            Some(id) => id,
            None => return,
        };
        let unit = match manager.state().unit_opt(id) {
            Some(unit) => unit,
            None => {
                trace!("AI: {:?} is gone", id);
                self.pop_unit();
                return;
            }
        };
        if unit.is_busy() {
            return;
        }
        if self.last_action {
            self.pop_unit();
            return;
        }
        if let Some(pending) = self.pending.clone() {
            let is_dependent_busy = pending
                .dependent
                .and_then(|dependent| manager.state().unit_opt(dependent))
                .map_or(false, |dependent| dependent.is_busy());
            if is_dependent_busy {
                return;
            }
            self.try_execute(manager, &pending.command);
            self.last_action = true;
            return;
        }
        self.decide(manager, id);
    }

    /// The state could change since the command was staged.
    fn try_execute(&mut self, manager: &mut GameManager, command: &Command) {
        match check(manager.state(), command) {
            Ok(()) => manager.execute(command),
            Err(err) => warn!("AI: dropping {:?}: {:?}", command, err),
        }
    }

    fn decide(&mut self, manager: &mut GameManager, id: UnitId) {
        let destinations = actions::destinations(manager.state(), id);
        if self.try_capture(manager, id, &destinations) {
            return;
        }
        if self.try_attack(manager, id, &destinations) {
            return;
        }
        self.move_toward_objective(manager, id, &destinations);
        self.last_action = true;
    }

    fn try_capture(
        &mut self,
        manager: &mut GameManager,
        id: UnitId,
        destinations: &[Coords],
    ) -> bool {
        let pos = manager.state().unit(id).pos();
        if state::can_capture_at(manager.state(), id, pos) {
            self.stage(command::Capture { pos }.into(), None);
            return true;
        }
        for &destination in destinations {
            if state::can_capture_at(manager.state(), id, destination) {
                debug!("AI: {:?} goes to capture {}", id, destination);
                self.stage(command::Capture { pos: destination }.into(), None);
                manager.move_unit(pos, destination);
                return true;
            }
        }
        false
    }

    fn try_attack(
        &mut self,
        manager: &mut GameManager,
        id: UnitId,
        destinations: &[Coords],
    ) -> bool {
        let pos = manager.state().unit(id).pos();
        let targets = state::attack_targets_from(manager.state(), id, pos);
        if self.choose_target(manager.state(), pos, &targets) {
            return true;
        }
        for &destination in destinations {
            let targets = state::attack_targets_from(manager.state(), id, destination);
            if self.choose_target(manager.state(), destination, &targets) {
                debug!("AI: {:?} goes to attack from {}", id, destination);
                manager.move_unit(pos, destination);
                return true;
            }
        }
        false
    }

    fn choose_target(&mut self, state: &State, attacker: Coords, targets: &[Coords]) -> bool {
        let target = match utils::choose(&mut self.rng, targets) {
            Some(target) => target,
            None => return false,
        };
        let dependent = state::unit_at(state, target);
        self.stage(command::Attack { attacker, target }.into(), dependent);
        true
    }

    fn stage(&mut self, command: Command, dependent: Option<UnitId>) {
        trace!("AI: staging {:?}", command);
        self.pending = Some(Pending { command, dependent });
    }

    /// Heads for the flags while the enemy holds most of them, for the enemy HQs otherwise.
    fn move_toward_objective(
        &mut self,
        manager: &mut GameManager,
        id: UnitId,
        destinations: &[Coords],
    ) {
        let state = manager.state();
        let status = state.player(self.id);
        let unowned = state::unowned_flags(state, self.id);
        let targets: Vec<Coords> = if unowned.len() > status.flags().len() / 2 {
            unowned
        } else {
            state
                .players()
                .iter()
                .filter(|other| other.player_id() != self.id)
                .flat_map(|other| other.hqs().iter())
                .filter_map(|&hq| state.unit_opt(hq).map(|hq| hq.pos()))
                .collect()
        };
        let mut shortest: Option<movement::Path> = None;
        for target in targets {
            if let Some(path) = movement::shortest_path(state, id, target) {
                if shortest.as_ref().map_or(true, |best| best.len() > path.len()) {
                    shortest = Some(path);
                }
            }
        }
        let shortest = match shortest {
            Some(path) => path,
            None => return,
        };
        let move_target = shortest
            .traversed()
            .iter()
            .rev()
            .find(|&&pos| destinations.contains(&pos))
            .cloned();
        if let Some(to) = move_target {
            let from = state.unit(id).pos();
            debug!("AI: {:?} moves {} -> {}", id, from, to);
            manager.move_unit(from, to);
        }
    }

    fn update_hqs(&mut self, manager: &mut GameManager) {
        let id = match &mut self.phase {
            Phase::Acting { hqs, .. } => hqs.pop_front(),
            Phase::Waiting(_) => None,
        };
        let id = match id {
            Some(id) => id,
            None => return,
        };
        if manager.state().unit_opt(id).is_none() {
            return;
        }
        let hq = manager.state().unit(id).pos();
        let build_coords = state::build_coords(manager.state(), id);
        let pos = match utils::choose(&mut self.rng, &build_coords) {
            Some(pos) => pos,
            None => return,
        };
        let options = actions::affordable_unit_types(manager.state(), id);
        let index: usize = roll_dice(&mut self.rng, 0..=3);
        if let Some(&(unit_type, _)) = options.get(index) {
            debug!("AI: {} recruits a {} at {}", self.id, unit_type, pos);
            self.try_execute(manager, &command::Buy { hq, pos, unit_type }.into());
        }
    }
}
