use serde::{Deserialize, Serialize};

use crate::core::battle::{MoveClass, MovePoints};

/// Move cost meaning "this move class can't enter the tile".
pub const IMPASSABLE: MovePoints = MovePoints(-1);

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainType {
    /// Slows vehicles down and gives a bit of cover.
    Plains,

    /// Fast for everyone, no cover.
    Road { straight: bool, rotations: i32 },

    /// Impassable for vehicles, significant cover.
    Mountain,

    /// Only air units can cross it.
    Water,
}

impl Default for TerrainType {
    fn default() -> Self {
        TerrainType::Plains
    }
}

/// Immutable movement and combat properties of a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Terrain {
    kind: TerrainType,

    /// Indexed by `MoveClass::index`.
    move_costs: [MovePoints; MoveClass::COUNT],

    /// Fraction of the incoming damage absorbed, in `[0, 1]`.
    cover: f32,
}

impl Terrain {
    pub fn new(kind: TerrainType) -> Self {
        let (costs, cover) = match kind {
            TerrainType::Plains => ([1, 2, 1], 0.1),
            TerrainType::Road { .. } => ([1, 1, 1], 0.0),
            TerrainType::Mountain => ([2, IMPASSABLE.0, 1], 0.5),
            TerrainType::Water => ([IMPASSABLE.0, IMPASSABLE.0, 1], 0.0),
        };
        Self::with_stats(kind, costs, cover)
    }

    pub fn with_stats(kind: TerrainType, costs: [i32; MoveClass::COUNT], cover: f32) -> Self {
        assert!((0.0..=1.0).contains(&cover), "bad cover: {}", cover);
        // Any negative cost means impassable.
        let cost = |n: i32| if n < 0 { IMPASSABLE } else { MovePoints(n) };
        Self {
            kind,
            move_costs: [cost(costs[0]), cost(costs[1]), cost(costs[2])],
            cover,
        }
    }

    pub fn kind(&self) -> TerrainType {
        self.kind
    }

    pub fn is_passable(&self, class: MoveClass) -> bool {
        self.move_costs[class.index()].0 >= 0
    }

    pub fn move_cost(&self, class: MoveClass) -> MovePoints {
        self.move_costs[class.index()]
    }

    pub fn cover(&self) -> f32 {
        self.cover
    }

    /// Frame of the terrain sheet used to draw this tile.
    pub fn clip(&self) -> i32 {
        match self.kind {
            TerrainType::Plains => 1,
            TerrainType::Road { straight: true, .. } => 2,
            TerrainType::Road { straight: false, .. } => 3,
            TerrainType::Mountain => 4,
            TerrainType::Water => 5,
        }
    }
}

impl From<TerrainType> for Terrain {
    fn from(kind: TerrainType) -> Self {
        Terrain::new(kind)
    }
}
