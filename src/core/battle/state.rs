use crate::core::{
    battle::{PlayerId, UnitId},
    map::Coords,
};

pub use self::private::{BattleResult, State};

mod private {
    use std::collections::HashMap;

    use crate::core::{
        battle::{
            building::Building,
            command::{self, Command},
            execute::execute,
            player::PlayerStatus,
            rules::Rules,
            scenario::Scenario,
            terrain::Terrain,
            tile::Tile,
            unit::Unit,
            PlayerId, UnitId,
        },
        map::{Coords, SquareMap},
    };

    #[derive(Clone, Debug, PartialEq)]
    pub struct BattleResult {
        pub winner_id: PlayerId,
    }

    #[derive(Clone, Debug)]
    pub struct State {
        map: SquareMap<Tile>,
        units: HashMap<UnitId, Unit>,
        next_unit_id: UnitId,
        players: Vec<PlayerStatus>,
        player_id: PlayerId,
        rules: Rules,
        battle_result: Option<BattleResult>,
    }

    impl State {
        /// Lays the scenario's terrain, flags and units out. Nobody's turn
        /// has been started yet: every unit is inactive.
        pub fn new(scenario: &Scenario, rules: Rules) -> Self {
            let default_tile = Tile::new(Terrain::new(scenario.default_terrain));
            let mut map = SquareMap::new(scenario.map_size, default_tile);
            for &(pos, terrain) in &scenario.terrain {
                map.set_tile(pos, Tile::new(Terrain::new(terrain)));
            }
            let mut players = Vec::new();
            for i in 0..scenario.players_count {
                let status = PlayerStatus::new(PlayerId(i + 1), rules.starting_points);
                players.push(status);
            }
            for &pos in &scenario.flags {
                let flag = Building::new(rules.flag_boost, rules.flag_protection);
                map.tile_mut(pos).set_building(flag);
                for status in &mut players {
                    status.add_flag(pos);
                }
            }
            let mut state = Self {
                map,
                units: HashMap::new(),
                next_unit_id: UnitId::default(),
                players,
                player_id: PlayerId(1),
                rules,
                battle_result: None,
            };
            for object in &scenario.objects {
                let command = command::Create {
                    owner: object.owner,
                    pos: object.pos,
                    unit_type: object.unit_type,
                };
                execute(&mut state, &Command::Create(command));
            }
            state
        }

        pub fn player_id(&self) -> PlayerId {
            self.player_id
        }

        pub fn next_player_id(&self) -> PlayerId {
            let next = self.player_id.0 + 1;
            if next as usize <= self.players.len() {
                PlayerId(next)
            } else {
                PlayerId(1)
            }
        }

        pub fn map(&self) -> &SquareMap<Tile> {
            &self.map
        }

        pub fn rules(&self) -> &Rules {
            &self.rules
        }

        pub fn players(&self) -> &[PlayerStatus] {
            &self.players
        }

        pub fn player(&self, player_id: PlayerId) -> &PlayerStatus {
            &self.players[player_id.index()]
        }

        pub fn unit(&self, id: UnitId) -> &Unit {
            &self.units[&id]
        }

        pub fn unit_opt(&self, id: UnitId) -> Option<&Unit> {
            self.units.get(&id)
        }

        pub fn battle_result(&self) -> Option<&BattleResult> {
            self.battle_result.as_ref()
        }
    }

    /// Mutators. Be careful with them!
    impl State {
        pub(in crate::core) fn map_mut(&mut self) -> &mut SquareMap<Tile> {
            &mut self.map
        }

        pub(in crate::core) fn unit_mut(&mut self, id: UnitId) -> &mut Unit {
            self.units
                .get_mut(&id)
                .unwrap_or_else(|| panic!("No unit with {:?}", id))
        }

        pub(in crate::core) fn player_mut(&mut self, player_id: PlayerId) -> &mut PlayerStatus {
            &mut self.players[player_id.index()]
        }

        pub(in crate::core) fn set_player_id(&mut self, new_value: PlayerId) {
            self.player_id = new_value;
        }

        pub(in crate::core) fn set_battle_result(&mut self, result: BattleResult) {
            self.battle_result = Some(result);
        }

        pub(in crate::core) fn add_unit(&mut self, unit: Unit) -> UnitId {
            let id = self.next_unit_id;
            self.next_unit_id = UnitId(id.0 + 1);
            self.units.insert(id, unit);
            id
        }

        pub(in crate::core) fn remove_unit(&mut self, id: UnitId) -> Unit {
            self.units
                .remove(&id)
                .unwrap_or_else(|| panic!("No unit with {:?}", id))
        }
    }
}

pub fn unit_at(state: &State, pos: Coords) -> Option<UnitId> {
    if !state.map().is_inboard(pos) {
        return None;
    }
    state.map().tile(pos).unit()
}

pub fn is_tile_free(state: &State, pos: Coords) -> bool {
    state.map().is_inboard(pos) && state.map().tile(pos).unit().is_none()
}

pub fn is_unit_belong_to(state: &State, player_id: PlayerId, id: UnitId) -> bool {
    state.unit(id).player_id() == player_id
}

/// Units of the player in the grid's iteration order, headquarters included.
pub fn players_unit_ids(state: &State, player_id: PlayerId) -> Vec<UnitId> {
    unit_ids(state)
        .into_iter()
        .filter(|&id| is_unit_belong_to(state, player_id, id))
        .collect()
}

/// Every unit on the grid, column by column.
pub fn unit_ids(state: &State) -> Vec<UnitId> {
    let map = state.map();
    map.iter().filter_map(|pos| map.tile(pos).unit()).collect()
}

/// Positions of every flag on the map.
pub fn flags(state: &State) -> Vec<Coords> {
    let map = state.map();
    map.iter()
        .filter(|&pos| map.tile(pos).building().is_some())
        .collect()
}

pub fn unowned_flags(state: &State, player_id: PlayerId) -> Vec<Coords> {
    let map = state.map();
    flags(state)
        .into_iter()
        .filter(|&pos| !map.tile(pos).building().map_or(false, |b| b.is_owned_by(player_id)))
        .collect()
}

pub fn owned_flags_count(state: &State, player_id: PlayerId) -> usize {
    let map = state.map();
    flags(state)
        .into_iter()
        .filter(|&pos| map.tile(pos).building().map_or(false, |b| b.is_owned_by(player_id)))
        .count()
}

/// Adjacent tiles with an enemy of the unit, as if it stood at `from`.
pub fn attack_targets_from(state: &State, id: UnitId, from: Coords) -> Vec<Coords> {
    let player_id = state.unit(id).player_id();
    state
        .map()
        .neighbors(from)
        .into_iter()
        .filter(|&pos| match state.map().tile(pos).unit() {
            Some(other) => !is_unit_belong_to(state, player_id, other),
            None => false,
        })
        .collect()
}

/// Empty neighbors of a headquarters.
pub fn build_coords(state: &State, id: UnitId) -> Vec<Coords> {
    let pos = state.unit(id).pos();
    state
        .map()
        .neighbors(pos)
        .into_iter()
        .filter(|&pos| is_tile_free(state, pos))
        .collect()
}

/// Is there a building under the unit that its owner doesn't own yet?
pub fn can_capture_at(state: &State, id: UnitId, pos: Coords) -> bool {
    let player_id = state.unit(id).player_id();
    match state.map().tile(pos).building() {
        Some(building) => !building.is_owned_by(player_id),
        None => false,
    }
}
