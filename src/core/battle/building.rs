use crate::core::battle::PlayerId;

/// A capturable structure. Its modifiers only help units of its owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    owner: Option<PlayerId>,

    /// Attack multiplier added for units standing on an owned building.
    boost: f32,

    /// Fraction of the damage absorbed for units standing on an owned building.
    protection: f32,
}

impl Building {
    pub fn new(boost: f32, protection: f32) -> Self {
        Self {
            owner: None,
            boost,
            protection,
        }
    }

    /// `None` if the building hasn't been captured yet.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.owner == Some(player_id)
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    pub fn protection(&self) -> f32 {
        self.protection
    }

    /// Frame of the building sheet: `0` for unclaimed, else the owner's id.
    pub fn clip(&self) -> i32 {
        self.owner.map(|id| id.0).unwrap_or(0)
    }

    pub(in crate::core) fn set_owner(&mut self, player_id: PlayerId) {
        self.owner = Some(player_id);
    }
}
