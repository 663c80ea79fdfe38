use crate::core::battle::{building::Building, terrain::Terrain, PlayerId, UnitId};

/// One cell of the grid. Holds at most one unit and at most one building.
#[derive(Clone, Debug)]
pub struct Tile {
    terrain: Terrain,
    unit: Option<UnitId>,
    building: Option<Building>,

    /// Set while the tile is a valid choice for the given player's pending selection.
    selectable: Option<PlayerId>,

    highlighted: bool,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            unit: None,
            building: None,
            selectable: None,
            highlighted: false,
        }
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    pub fn building(&self) -> Option<&Building> {
        self.building.as_ref()
    }

    pub fn selectable(&self) -> Option<PlayerId> {
        self.selectable
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Mutators. Only the turn authority may call them.
impl Tile {
    pub(in crate::core) fn set_unit(&mut self, unit: Option<UnitId>) {
        assert!(
            unit.is_none() || self.unit.is_none(),
            "two units can't share a tile"
        );
        self.unit = unit;
    }

    pub(in crate::core) fn set_building(&mut self, building: Building) {
        assert!(self.building.is_none(), "two buildings can't share a tile");
        self.building = Some(building);
    }

    pub(in crate::core) fn building_mut(&mut self) -> Option<&mut Building> {
        self.building.as_mut()
    }

    pub(in crate::core) fn set_selectable(&mut self, player_id: Option<PlayerId>) {
        self.selectable = player_id;
    }

    pub(in crate::core) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}
