use crate::core::{
    battle::{PlayerId, Points, UnitId},
    map::Coords,
};

/// Per-player bookkeeping: points, rosters and the known flags.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStatus {
    player_id: PlayerId,
    points: Points,
    hqs: Vec<UnitId>,
    units: Vec<UnitId>,

    /// Every flag of the map, owned or not.
    flags: Vec<Coords>,
}

impl PlayerStatus {
    pub fn new(player_id: PlayerId, points: Points) -> Self {
        Self {
            player_id,
            points,
            hqs: Vec::new(),
            units: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn points(&self) -> Points {
        self.points
    }

    pub fn hqs(&self) -> &[UnitId] {
        &self.hqs
    }

    pub fn units(&self) -> &[UnitId] {
        &self.units
    }

    pub fn flags(&self) -> &[Coords] {
        &self.flags
    }

    /// A player with no headquarters left has lost.
    pub fn has_lost(&self) -> bool {
        self.hqs.is_empty()
    }

    pub fn text(&self) -> String {
        format!("{}: {} Points", self.player_id, self.points.0)
    }
}

impl PlayerStatus {
    pub(in crate::core) fn add_hq(&mut self, id: UnitId) {
        self.hqs.push(id);
    }

    pub(in crate::core) fn add_unit(&mut self, id: UnitId) {
        self.units.push(id);
    }

    pub(in crate::core) fn add_flag(&mut self, pos: Coords) {
        self.flags.push(pos);
    }

    pub(in crate::core) fn add_points(&mut self, points: Points) {
        self.points.0 += points.0;
    }

    pub(in crate::core) fn spend_points(&mut self, points: Points) {
        assert!(
            self.points >= points,
            "{} can't afford {} points",
            self.player_id,
            points.0
        );
        self.points.0 -= points.0;
    }

    /// Forgets every unit or headquarters that `is_gone` reports.
    pub(in crate::core) fn prune(&mut self, is_gone: impl Fn(UnitId) -> bool) {
        self.hqs.retain(|&id| !is_gone(id));
        self.units.retain(|&id| !is_gone(id));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PlayerStatus;
    use crate::core::battle::{PlayerId, Points, UnitId};

    #[test]
    fn text_and_points() {
        let mut status = PlayerStatus::new(PlayerId(2), Points(0));
        status.add_points(Points(1500));
        status.spend_points(Points(1000));
        assert_eq!(status.text(), "Player 2: 500 Points");
    }

    #[test]
    #[should_panic]
    fn overspending() {
        let mut status = PlayerStatus::new(PlayerId(1), Points(999));
        status.spend_points(Points(1000));
    }

    #[test]
    fn losing_the_last_hq() {
        let mut status = PlayerStatus::new(PlayerId(1), Points(0));
        let hq = UnitId::default();
        status.add_hq(hq);
        assert!(!status.has_lost());
        status.prune(|id| id == hq);
        assert!(status.has_lost());
    }
}
