use std::time::Duration;

use log::{debug, info, trace};

use crate::core::{
    battle::{
        actions::{self, Action},
        command::{self, Command},
        component::UnitType,
        execute::{self, execute},
        rules::Rules,
        scenario::{self, Scenario},
        sequence,
        state::{self, BattleResult, State},
    },
    map::Coords,
};

/// What a staged selection turns into once a tile is picked.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCommand {
    MoveFrom(Coords),
    AttackFrom(Coords),
    Recruit { hq: Coords, unit_type: UnitType },
}

impl PendingCommand {
    pub fn complete(&self, pos: Coords) -> Command {
        match *self {
            PendingCommand::MoveFrom(from) => command::MoveTo { from, to: pos }.into(),
            PendingCommand::AttackFrom(attacker) => command::Attack {
                attacker,
                target: pos,
            }
            .into(),
            PendingCommand::Recruit { hq, unit_type } => command::Buy { hq, pos, unit_type }.into(),
        }
    }
}

#[derive(Clone, Debug)]
struct Selection {
    coords: Vec<Coords>,
    pending: PendingCommand,
}

/// The turn authority: the only owner of the battle state.
#[derive(Debug)]
pub struct GameManager {
    state: State,
    scenario: Scenario,
    selection: Option<Selection>,
    highlighted: Option<Coords>,

    /// Modal text. Nobody acts while it's shown.
    info: Option<String>,
}

impl GameManager {
    /// Starts with the scenario's intro pending. The first turn starts once it's dismissed.
    pub fn new(scenario: Scenario, rules: Rules) -> Result<Self, scenario::Error> {
        scenario.check()?;
        let state = State::new(&scenario, rules);
        let info = Some(scenario.intro.clone());
        Ok(Self {
            state,
            scenario,
            selection: None,
            highlighted: None,
            info,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    #[cfg(test)]
    pub(in crate::core) fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn battle_result(&self) -> Option<&BattleResult> {
        self.state.battle_result()
    }

    /// The match is over and its end text has been seen.
    pub fn is_over(&self) -> bool {
        self.state.battle_result().is_some() && self.info.is_none()
    }

    /// Closes the pending text. Closing the intro starts the first player's turn.
    pub fn dismiss_info(&mut self) {
        if self.info.take().is_none() {
            return;
        }
        if self.state.battle_result().is_none() {
            let player_id = self.state.player_id();
            execute::start_turn(&mut self.state, player_id);
        }
    }

    pub fn execute(&mut self, command: &Command) {
        execute(&mut self.state, command);
        if let Command::EndTurn(_) = *command {
            self.clear_selection();
        }
    }

    pub fn move_unit(&mut self, from: Coords, to: Coords) {
        self.execute(&command::MoveTo { from, to }.into());
    }

    pub fn attack(&mut self, attacker: Coords, target: Coords) {
        self.execute(&command::Attack { attacker, target }.into());
    }

    pub fn capture(&mut self, pos: Coords) {
        self.execute(&command::Capture { pos }.into());
    }

    pub fn buy(&mut self, hq: Coords, pos: Coords, unit_type: UnitType) {
        self.execute(&command::Buy { hq, pos, unit_type }.into());
    }

    pub fn end_turn(&mut self) {
        self.execute(&command::EndTurn.into());
    }

    /// Advances all running sequences, clears the dead away and
    /// latches the end of the match.
    pub fn update(&mut self, dtime: Duration) {
        sequence::update(&mut self.state, dtime);
        execute::remove_destroyed(&mut self.state);
        if self.state.battle_result().is_some() {
            return;
        }
        let players = self.state.players();
        if !players.iter().any(|status| status.has_lost()) {
            return;
        }
        let winner = players.iter().find(|status| !status.has_lost());
        if let Some(winner) = winner {
            let winner_id = winner.player_id();
            info!("{} won", winner_id);
            self.info = Some(self.scenario.win_text(winner_id));
            self.state.set_battle_result(BattleResult { winner_id });
            self.clear_selection();
        }
    }

    /// Marks the tiles a pending command may be completed with.
    pub fn set_selectable(&mut self, coords: Vec<Coords>, pending: PendingCommand) {
        self.clear_selection();
        let player_id = self.state.player_id();
        for &pos in &coords {
            self.state
                .map_mut()
                .tile_mut(pos)
                .set_selectable(Some(player_id));
        }
        self.selection = Some(Selection { coords, pending });
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// A click on the grid. Completes a staged selection if there is one,
    /// otherwise lists the actions of the active player's idle unit at `pos`.
    pub fn select(&mut self, pos: Coords) -> Vec<Action> {
        if self.info.is_some() || self.state.battle_result().is_some() {
            return Vec::new();
        }
        if let Some(selection) = self.selection.clone() {
            self.clear_selection();
            if selection.coords.contains(&pos) {
                let command = selection.pending.complete(pos);
                trace!("select: completing {:?}", command);
                self.execute(&command);
            }
            return Vec::new();
        }
        match state::unit_at(&self.state, pos) {
            Some(id) => {
                let unit = self.state.unit(id);
                if unit.player_id() == self.state.player_id() && !unit.is_busy() {
                    actions::actions(&self.state, id)
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    }

    /// Starts one of the actions `select` listed for the unit at `pos`.
    pub fn begin_action(&mut self, pos: Coords, action: &Action) {
        debug!("begin_action: {} at {}", action, pos);
        match action {
            Action::Capture => self.capture(pos),
            Action::Move { destinations } => {
                self.set_selectable(destinations.clone(), PendingCommand::MoveFrom(pos))
            }
            Action::Attack { targets } => {
                self.set_selectable(targets.clone(), PendingCommand::AttackFrom(pos))
            }
            Action::Recruit {
                unit_type, coords, ..
            } => {
                let pending = PendingCommand::Recruit {
                    hq: pos,
                    unit_type: *unit_type,
                };
                self.set_selectable(coords.clone(), pending);
            }
        }
    }

    /// Hover feedback. Only tiles of the staged selection light up while there is one.
    pub fn highlight(&mut self, pos: Option<Coords>) {
        if let Some(old) = self.highlighted.take() {
            self.state.map_mut().tile_mut(old).set_highlighted(false);
        }
        if self.info.is_some() {
            return;
        }
        let pos = match pos {
            Some(pos) if self.state.map().is_inboard(pos) => pos,
            _ => return,
        };
        let allowed = match &self.selection {
            Some(selection) => selection.coords.contains(&pos),
            None => true,
        };
        if allowed {
            self.state.map_mut().tile_mut(pos).set_highlighted(true);
            self.highlighted = Some(pos);
        }
    }

    fn clear_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            for pos in selection.coords {
                self.state.map_mut().tile_mut(pos).set_selectable(None);
            }
        }
    }
}
