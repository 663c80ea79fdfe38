use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    battle::{component::UnitType, terrain::TerrainType, PlayerId},
    map::{self, Coords},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExactObject {
    pub owner: PlayerId,
    pub unit_type: UnitType,
    pub pos: Coords,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default = "default")]
pub struct Scenario {
    pub map_size: map::Distance,
    pub players_count: i32,

    /// Terrain of every tile not listed in `terrain`.
    pub default_terrain: TerrainType,

    /// Applied in order: a later entry overrides an earlier one.
    pub terrain: Vec<(Coords, TerrainType)>,

    pub objects: Vec<ExactObject>,
    pub flags: Vec<Coords>,

    /// Shown before the first turn.
    pub intro: String,

    /// Shown at the end, indexed by the winner's `PlayerId::index`.
    pub win_texts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    MapIsTooSmall,
    UnsupportedPlayersCount(i32),
    PosOutsideOfMap(Coords),
    PosIsOccupied(Coords),
    BadOwner(PlayerId),
    NoHeadquarters(PlayerId),
}

impl Scenario {
    pub fn check(&self) -> Result<(), Error> {
        if self.players_count != 2 {
            return Err(Error::UnsupportedPlayersCount(self.players_count));
        }
        if self.map_size.0 < 2 {
            return Err(Error::MapIsTooSmall);
        }
        let is_inboard = |pos: Coords| {
            let size = self.map_size.0;
            pos.x >= 0 && pos.y >= 0 && pos.x < size && pos.y < size
        };
        for &(pos, _) in &self.terrain {
            if !is_inboard(pos) {
                return Err(Error::PosOutsideOfMap(pos));
            }
        }
        let mut flags = HashSet::new();
        for &pos in &self.flags {
            if !is_inboard(pos) {
                return Err(Error::PosOutsideOfMap(pos));
            }
            if !flags.insert(pos) {
                return Err(Error::PosIsOccupied(pos));
            }
        }
        let mut occupied = HashSet::new();
        for obj in &self.objects {
            if !is_inboard(obj.pos) {
                return Err(Error::PosOutsideOfMap(obj.pos));
            }
            if !occupied.insert(obj.pos) {
                return Err(Error::PosIsOccupied(obj.pos));
            }
            if obj.owner.0 < 1 || obj.owner.0 > self.players_count {
                return Err(Error::BadOwner(obj.owner));
            }
        }
        for i in 1..=self.players_count {
            let player_id = PlayerId(i);
            let has_hq = self
                .objects
                .iter()
                .any(|obj| obj.owner == player_id && obj.unit_type.is_headquarters());
            if !has_hq {
                return Err(Error::NoHeadquarters(player_id));
            }
        }
        Ok(())
    }

    pub fn from_str(s: &str) -> Result<Self, ron::de::Error> {
        ron::de::from_str(s)
    }

    /// Text for the end of the match, with a generic fallback.
    pub fn win_text(&self, winner_id: PlayerId) -> String {
        match self.win_texts.get(winner_id.index()) {
            Some(text) => text.clone(),
            None => format!("{} Wins!", winner_id),
        }
    }

    pub fn with_terrain(mut self, pos: Coords, terrain: TerrainType) -> Self {
        self.terrain.push((pos, terrain));
        self
    }

    /// Fills the `[from, to)` rectangle.
    pub fn with_terrain_rect(mut self, from: Coords, to: Coords, terrain: TerrainType) -> Self {
        for x in from.x..to.x {
            for y in from.y..to.y {
                self.terrain.push((Coords::new(x, y), terrain));
            }
        }
        self
    }

    pub fn with_object(mut self, owner: PlayerId, unit_type: UnitType, pos: Coords) -> Self {
        self.objects.push(ExactObject {
            owner,
            unit_type,
            pos,
        });
        self
    }

    pub fn with_flag(mut self, pos: Coords) -> Self {
        self.flags.push(pos);
        self
    }
}

/// An empty field of plains.
pub fn default() -> Scenario {
    Scenario {
        map_size: map::Distance(10),
        players_count: 2,
        default_terrain: TerrainType::Plains,
        terrain: Vec::new(),
        objects: Vec::new(),
        flags: Vec::new(),
        intro: String::new(),
        win_texts: Vec::new(),
    }
}

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

fn road(straight: bool, rotations: i32) -> TerrainType {
    TerrainType::Road {
        straight,
        rotations,
    }
}

fn c(x: i32, y: i32) -> Coords {
    Coords::new(x, y)
}

/// Two headquarters in opposite corners of a mirrored map with six flags.
pub fn symmetric() -> Scenario {
    let mut scenario = default()
        .with_terrain_rect(c(1, 4), c(9, 6), TerrainType::Water)
        .with_terrain_rect(c(3, 4), c(7, 6), TerrainType::Mountain);
    for i in 1..9 {
        scenario = scenario
            .with_terrain(c(i, 2), road(true, 0))
            .with_terrain(c(i, 7), road(true, 0));
    }
    for j in 3..7 {
        scenario = scenario
            .with_terrain(c(0, j), road(true, 1))
            .with_terrain(c(9, j), road(true, 1));
    }
    let mut scenario = scenario
        .with_terrain(c(0, 2), road(false, 0))
        .with_terrain(c(9, 2), road(false, 1))
        .with_terrain(c(0, 7), road(false, 3))
        .with_terrain(c(9, 7), road(false, 2))
        .with_object(P1, UnitType::Headquarters, c(0, 0))
        .with_object(P2, UnitType::Headquarters, c(9, 9))
        .with_object(P1, UnitType::Snake, c(1, 0))
        .with_object(P2, UnitType::Snake, c(8, 9));
    for &pos in &[c(0, 9), c(9, 0), c(6, 3), c(3, 6), c(3, 0), c(6, 9)] {
        scenario = scenario.with_flag(pos);
    }
    scenario.intro = "Take turns to try and destroy the enemy HQ!".into();
    scenario.win_texts = vec!["Player 1 Wins!".into(), "Player 2 Wins!".into()];
    scenario
}

/// A fixed army against a fixed army.
pub fn level_1() -> Scenario {
    let mut scenario = default()
        .with_terrain_rect(c(2, 4), c(5, 6), TerrainType::Mountain)
        .with_terrain_rect(c(5, 4), c(10, 6), TerrainType::Water);
    for j in 0..10 {
        scenario = scenario.with_terrain(c(1, j), road(true, 1));
    }
    let mut scenario = scenario
        .with_object(P1, UnitType::Headquarters, c(8, 8))
        .with_object(P2, UnitType::Headquarters, c(8, 1))
        .with_object(P2, UnitType::Snake, c(9, 1))
        .with_object(P2, UnitType::Snake, c(7, 1))
        .with_object(P2, UnitType::WheelSnake, c(8, 2))
        .with_object(P1, UnitType::Snake, c(7, 6))
        .with_object(P1, UnitType::WheelSnake, c(5, 9))
        .with_object(P1, UnitType::TankSnake, c(4, 8))
        .with_object(P1, UnitType::JetSnake, c(3, 7));
    scenario.intro = "Level 1\nDestroy the enemy HQ while protecting your own.".into();
    scenario.win_texts = vec!["Level 1 Complete!".into(), "Game Over".into()];
    scenario
}

/// Flags and recruiting.
pub fn level_2() -> Scenario {
    let mut scenario = default();
    for i in 7..10 {
        for j in 5..10 {
            if i != 8 || j != 7 {
                scenario = scenario.with_terrain(c(i, j), TerrainType::Water);
            }
        }
    }
    let mut scenario = scenario
        .with_terrain_rect(c(7, 0), c(8, 5), TerrainType::Mountain)
        .with_terrain_rect(c(2, 5), c(3, 9), TerrainType::Mountain)
        .with_terrain_rect(c(0, 5), c(2, 6), TerrainType::Mountain)
        .with_terrain_rect(c(0, 1), c(2, 2), TerrainType::Mountain)
        .with_terrain(c(1, 0), TerrainType::Mountain)
        .with_terrain(c(4, 2), road(false, 0))
        .with_terrain(c(4, 9), road(false, 2));
    for i in 5..9 {
        scenario = scenario.with_terrain(c(i, 2), road(true, 0));
    }
    for j in 3..9 {
        scenario = scenario.with_terrain(c(4, j), road(true, 1));
    }
    for i in 1..4 {
        scenario = scenario.with_terrain(c(i, 9), road(true, 0));
    }
    let mut scenario = scenario
        .with_object(P1, UnitType::Headquarters, c(0, 9))
        .with_object(P2, UnitType::Headquarters, c(9, 2))
        .with_object(P1, UnitType::Snake, c(0, 8))
        .with_object(P2, UnitType::Snake, c(8, 2));
    for &pos in &[c(0, 6), c(1, 6), c(8, 7), c(0, 0), c(9, 0), c(3, 3)] {
        scenario = scenario.with_flag(pos);
    }
    scenario.intro = "Level 2\nCapture flags to earn points, then recruit from your HQ.".into();
    scenario.win_texts = vec!["Level 2 Complete!".into(), "Game Over".into()];
    scenario
}

/// The enemy has two headquarters.
pub fn level_3() -> Scenario {
    let mut scenario = default().with_terrain_rect(c(0, 5), c(10, 6), TerrainType::Water);
    for i in 0..7 {
        if i != 4 {
            scenario = scenario.with_terrain(c(i, 8), road(true, 0));
        }
    }
    for i in 1..8 {
        scenario = scenario.with_terrain(c(i, 0), road(true, 0));
    }
    for j in 1..7 {
        if j != 3 {
            scenario = scenario.with_terrain(c(8, j), road(true, 1));
        }
    }
    let mut scenario = scenario
        .with_terrain(c(7, 8), road(false, 2))
        .with_terrain(c(7, 7), road(false, 0))
        .with_terrain(c(8, 7), road(false, 2))
        .with_terrain(c(8, 0), road(false, 1))
        .with_terrain_rect(c(3, 1), c(5, 5), TerrainType::Mountain)
        .with_terrain_rect(c(0, 5), c(4, 6), TerrainType::Mountain)
        .with_object(P1, UnitType::Headquarters, c(4, 8))
        .with_object(P2, UnitType::Headquarters, c(8, 3))
        .with_object(P2, UnitType::Headquarters, c(0, 0))
        .with_object(P1, UnitType::Snake, c(3, 8))
        .with_object(P1, UnitType::Snake, c(5, 8))
        .with_object(P2, UnitType::Snake, c(7, 3))
        .with_object(P2, UnitType::Snake, c(0, 1));
    for &pos in &[c(1, 9), c(8, 9), c(1, 3), c(9, 1), c(2, 6), c(5, 4)] {
        scenario = scenario.with_flag(pos);
    }
    scenario.intro = "Level 3\nThe enemy has two HQs. Destroy them both to win!".into();
    scenario.win_texts = vec!["Level 3 Complete!".into(), "Game Over".into()];
    scenario
}

/// Looks a built-in scenario up by name.
pub fn builtin(name: &str) -> Option<Scenario> {
    match name {
        "symmetric" => Some(symmetric()),
        "level_1" => Some(level_1()),
        "level_2" => Some(level_2()),
        "level_3" => Some(level_3()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{builtin, default, Error, Scenario};
    use crate::core::{
        battle::{component::UnitType, PlayerId},
        map::Coords,
    };

    #[test]
    fn builtin_scenarios_are_valid() {
        for name in &["symmetric", "level_1", "level_2", "level_3"] {
            let scenario = builtin(name).expect("No such scenario");
            assert_eq!(scenario.check(), Ok(()), "{}", name);
        }
        assert!(builtin("level_4").is_none());
    }

    #[test]
    fn every_player_needs_an_hq() {
        let scenario = default().with_object(PlayerId(1), UnitType::Headquarters, Coords::new(0, 0));
        assert_eq!(scenario.check(), Err(Error::NoHeadquarters(PlayerId(2))));
    }

    #[test]
    fn objects_are_not_stacked() {
        let pos = Coords::new(3, 3);
        let scenario = default()
            .with_object(PlayerId(1), UnitType::Headquarters, pos)
            .with_object(PlayerId(2), UnitType::Headquarters, pos);
        assert_eq!(scenario.check(), Err(Error::PosIsOccupied(pos)));
    }

    #[test]
    fn objects_are_inboard() {
        let pos = Coords::new(10, 0);
        let scenario = default().with_flag(pos);
        assert_eq!(scenario.check(), Err(Error::PosOutsideOfMap(pos)));
    }

    #[test]
    fn win_text_fallback() {
        let scenario = default();
        assert_eq!(scenario.win_text(PlayerId(2)), "Player 2 Wins!");
    }

    #[test]
    fn parse_from_ron() {
        let s = r#"(
            map_size: (4),
            objects: [
                (owner: (1), unit_type: Headquarters, pos: (x: 0, y: 0)),
                (owner: (2), unit_type: Headquarters, pos: (x: 3, y: 3)),
            ],
            flags: [(x: 1, y: 2)],
            terrain: [((x: 2, y: 2), Water)],
        )"#;
        let scenario = Scenario::from_str(s).expect("Can't parse the scenario");
        assert_eq!(scenario.check(), Ok(()));
        assert_eq!(scenario.objects.len(), 2);
        assert_eq!(scenario.players_count, 2);
    }
}
