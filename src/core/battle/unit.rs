use std::{collections::VecDeque, time::Duration};

use crate::core::{
    battle::{
        component::{AnimationInfo, Stats, UnitType},
        movement::Path,
        HitPoints, MoveClass, MovePoints, PlayerId,
    },
    map::Coords,
};

/// Moving across the tiles of a precomputed path, one tile per `duration`.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveSequence {
    /// The tile the unit is currently leaving.
    from: Coords,

    /// Tiles still to be entered. Never empty while the sequence is running.
    path: VecDeque<Coords>,

    progress: Duration,
    duration: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStep {
    /// The attacker strikes, then pauses.
    Strike { dealt: bool },

    /// The defender strikes back, then pauses.
    Counter { dealt: bool },
}

/// Stored on the attacker; the defender only has its `busy` flag raised.
#[derive(Clone, Debug, PartialEq)]
pub struct AttackSequence {
    pub target: Coords,
    pub step: AttackStep,
    pub progress: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Sequence {
    Idle,
    Moving(MoveSequence),
    Attacking(AttackSequence),
}

#[derive(Clone, Debug)]
struct Animation {
    info: AnimationInfo,

    /// Each player's frames follow the previous player's ones on the sheet.
    player_offset: i32,

    time: Duration,
}

impl Animation {
    fn new(info: AnimationInfo, player_id: PlayerId) -> Self {
        let frames = info.end_clip - info.start_clip + 1;
        Self {
            info,
            player_offset: (player_id.0 - 1) * frames,
            time: Duration::new(0, 0),
        }
    }

    fn update(&mut self, dtime: Duration) {
        self.time += dtime;
        if self.info.duration > Duration::new(0, 0) {
            while self.time >= self.info.duration {
                self.time -= self.info.duration;
            }
        }
    }

    fn clip(&self) -> i32 {
        let frames = self.info.end_clip - self.info.start_clip + 1;
        let duration = self.info.duration.as_secs_f32();
        let frame = if duration > 0.0 {
            ((self.time.as_secs_f32() / duration) * frames as f32) as i32
        } else {
            0
        };
        self.info.start_clip + self.player_offset + frame.min(frames - 1)
    }
}

#[derive(Clone, Debug)]
pub struct Unit {
    unit_type: UnitType,
    player_id: PlayerId,

    // static
    attack: i32,
    defense: f32,
    move_range: MovePoints,
    move_class: MoveClass,
    can_recruit: bool,

    // dynamic
    hit_points: HitPoints,
    pos: Option<Coords>,
    moved: bool,
    acted: bool,
    busy: bool,
    sequence: Sequence,

    /// Visual displacement from the unit's tile, in tiles.
    offset: [f32; 2],

    animation: Option<Animation>,
}

impl Unit {
    /// New units can't do anything until their owner's next turn starts.
    pub fn new(
        unit_type: UnitType,
        player_id: PlayerId,
        stats: &Stats,
        hit_points: HitPoints,
    ) -> Self {
        Self {
            unit_type,
            player_id,
            attack: stats.attack,
            defense: stats.defense,
            move_range: stats.move_range,
            move_class: stats.move_class,
            can_recruit: stats.can_recruit,
            hit_points,
            pos: None,
            moved: true,
            acted: true,
            busy: false,
            sequence: Sequence::Idle,
            offset: [0.0, 0.0],
            animation: stats.animation.map(|info| Animation::new(info, player_id)),
        }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Unmodified base attack.
    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> f32 {
        self.defense
    }

    pub fn move_range(&self) -> MovePoints {
        self.move_range
    }

    pub fn move_class(&self) -> MoveClass {
        self.move_class
    }

    pub fn can_recruit(&self) -> bool {
        self.can_recruit
    }

    pub fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    pub fn is_destroyed(&self) -> bool {
        self.hit_points.0 <= 0
    }

    /// `None` only before the unit is placed on the grid.
    pub fn pos_opt(&self) -> Option<Coords> {
        self.pos
    }

    pub fn pos(&self) -> Coords {
        self.pos.expect("The unit isn't placed on the grid")
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    /// Frame of the unit's sprite sheet to draw.
    pub fn clip(&self) -> i32 {
        match &self.animation {
            Some(animation) => animation.clip(),
            None => self.player_id.0,
        }
    }

    /// Hit points label.
    pub fn health_text(&self) -> String {
        format!("HP: {}", self.hit_points.0)
    }

    /// "M" while a move is left, "A" while an action is left.
    pub fn action_text(&self) -> String {
        let mut s = String::new();
        if !self.moved {
            s.push('M');
        }
        if !self.acted {
            s.push('A');
        }
        s
    }
}

/// Mutators. Only the turn authority and the sequencer may call them.
impl Unit {
    /// Resets the turn-scoped flags. Units without move range count as moved.
    pub(in crate::core) fn activate(&mut self) {
        self.moved = self.move_range.0 <= 0;
        self.acted = false;
    }

    pub(in crate::core) fn deactivate(&mut self) {
        self.moved = true;
        self.acted = true;
    }

    pub(in crate::core) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub(in crate::core) fn set_offset(&mut self, offset: [f32; 2]) {
        self.offset = offset;
    }

    pub(in crate::core) fn take_damage(&mut self, damage: i32) {
        self.hit_points.0 -= damage;
    }

    pub(in crate::core) fn place(&mut self, pos: Coords) {
        assert!(self.pos.is_none(), "The unit is already placed");
        self.pos = Some(pos);
    }

    /// Jumps to the path's end and starts walking the path visually.
    pub(in crate::core) fn start_move(&mut self, path: &Path, duration: Duration) {
        assert!(!self.moved && !self.acted && !self.busy);
        assert_eq!(Some(path.from()), self.pos);
        let tiles: VecDeque<Coords> = path.traversed().iter().cloned().collect();
        assert!(!tiles.is_empty());
        self.pos = Some(path.to());
        self.busy = true;
        self.moved = true;
        self.sequence = Sequence::Moving(MoveSequence {
            from: path.from(),
            path: tiles,
            progress: Duration::new(0, 0),
            duration,
        });
        self.update_move_offset();
    }

    pub(in crate::core) fn start_attack(&mut self, target: Coords) {
        assert!(!self.busy);
        self.busy = true;
        self.sequence = Sequence::Attacking(AttackSequence {
            target,
            step: AttackStep::Strike { dealt: false },
            progress: Duration::new(0, 0),
        });
    }

    /// Hands the running attack over to the sequencer.
    pub(in crate::core) fn take_attack(&mut self) -> Option<AttackSequence> {
        match std::mem::replace(&mut self.sequence, Sequence::Idle) {
            Sequence::Attacking(attack) => Some(attack),
            other => {
                self.sequence = other;
                None
            }
        }
    }

    pub(in crate::core) fn resume_attack(&mut self, attack: AttackSequence) {
        assert_eq!(self.sequence, Sequence::Idle);
        self.sequence = Sequence::Attacking(attack);
    }

    pub(in crate::core) fn update_animation(&mut self, dtime: Duration) {
        if let Some(animation) = &mut self.animation {
            animation.update(dtime);
        }
    }

    /// Advances a running move. Several tiles may be consumed by one big step.
    pub(in crate::core) fn update_move(&mut self, dtime: Duration) {
        let finished = match &mut self.sequence {
            Sequence::Moving(sequence) => {
                sequence.progress += dtime;
                while !sequence.path.is_empty() && sequence.progress >= sequence.duration {
                    sequence.progress -= sequence.duration;
                    if let Some(next) = sequence.path.pop_front() {
                        sequence.from = next;
                    }
                }
                sequence.path.is_empty()
            }
            _ => return,
        };
        if finished {
            self.sequence = Sequence::Idle;
            self.busy = false;
            self.offset = [0.0, 0.0];
        } else {
            self.update_move_offset();
        }
    }

    fn update_move_offset(&mut self) {
        let pos = self.pos();
        if let Sequence::Moving(sequence) = &self.sequence {
            let next = match sequence.path.front() {
                Some(&next) => next,
                None => return,
            };
            let k = sequence.progress.as_secs_f32() / sequence.duration.as_secs_f32();
            let from = sequence.from;
            self.offset = [
                (from.x - pos.x) as f32 + (next.x - from.x) as f32 * k,
                (from.y - pos.y) as f32 + (next.y - from.y) as f32 * k,
            ];
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::{Sequence, Unit};
    use crate::core::{
        battle::{
            component::{Prototypes, UnitType},
            movement::Path,
            HitPoints, PlayerId,
        },
        map::Coords,
    };

    fn unit(unit_type: UnitType) -> Unit {
        let prototypes = Prototypes::default();
        Unit::new(
            unit_type,
            PlayerId(2),
            prototypes.stats(unit_type),
            HitPoints(100),
        )
    }

    #[test]
    fn new_units_wait_for_their_turn() {
        let unit = unit(UnitType::Snake);
        assert!(unit.has_moved());
        assert!(unit.has_acted());
        assert_eq!(unit.action_text(), "");
    }

    #[test]
    fn activation_of_immobile_units() {
        let mut hq = unit(UnitType::Headquarters);
        hq.activate();
        assert!(hq.has_moved());
        assert!(!hq.has_acted());
        assert_eq!(hq.action_text(), "A");
        let mut snake = unit(UnitType::Snake);
        snake.activate();
        assert_eq!(snake.action_text(), "MA");
        snake.deactivate();
        assert_eq!(snake.action_text(), "");
    }

    #[test]
    fn destroyed_at_zero() {
        let mut snake = unit(UnitType::Snake);
        snake.take_damage(99);
        assert!(!snake.is_destroyed());
        snake.take_damage(1);
        assert!(snake.is_destroyed());
        assert_eq!(snake.health_text(), "HP: 0");
    }

    #[test]
    fn move_offset_follows_the_path() {
        let mut snake = unit(UnitType::Snake);
        snake.place(Coords::new(0, 0));
        snake.activate();
        let path = Path::new(vec![
            Coords::new(0, 0),
            Coords::new(1, 0),
            Coords::new(2, 0),
        ]);
        snake.start_move(&path, Duration::from_millis(500));
        assert_eq!(snake.pos(), Coords::new(2, 0));
        assert_eq!(snake.offset(), [-2.0, 0.0]);
        snake.update_move(Duration::from_millis(250));
        assert_eq!(snake.offset(), [-1.5, 0.0]);
        snake.update_move(Duration::from_millis(500));
        assert_eq!(snake.offset(), [-0.5, 0.0]);
        assert!(snake.is_busy());
        snake.update_move(Duration::from_millis(250));
        assert!(!snake.is_busy());
        assert_eq!(snake.offset(), [0.0, 0.0]);
        assert_eq!(snake.sequence(), &Sequence::Idle);
    }

    #[test]
    fn animation_loops_per_player() {
        let mut snake = unit(UnitType::Snake);
        // Frames 1..=6, the second player's frames start right after the first's.
        assert_eq!(snake.clip(), 7);
        snake.update_animation(Duration::from_millis(1300 / 6 + 1));
        assert_eq!(snake.clip(), 8);
        snake.update_animation(Duration::from_millis(1300));
        assert_eq!(snake.clip(), 8);
        let hq = unit(UnitType::Headquarters);
        assert_eq!(hq.clip(), 2);
    }
}
