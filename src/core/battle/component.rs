use std::{collections::HashMap, fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::core::battle::{MoveClass, MovePoints, Points};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitType {
    Snake,
    WheelSnake,
    TankSnake,
    JetSnake,
    Headquarters,
}

impl UnitType {
    /// Everything a headquarters can recruit, in menu order.
    pub const RECRUITABLE: [UnitType; 4] = [
        UnitType::Snake,
        UnitType::WheelSnake,
        UnitType::TankSnake,
        UnitType::JetSnake,
    ];

    pub const ALL: [UnitType; 5] = [
        UnitType::Snake,
        UnitType::WheelSnake,
        UnitType::TankSnake,
        UnitType::JetSnake,
        UnitType::Headquarters,
    ];

    pub fn is_headquarters(self) -> bool {
        self == UnitType::Headquarters
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            UnitType::Snake => write!(f, "Snake"),
            UnitType::WheelSnake => write!(f, "Roller"),
            UnitType::TankSnake => write!(f, "Tank"),
            UnitType::JetSnake => write!(f, "Jet"),
            UnitType::Headquarters => write!(f, "HQ"),
        }
    }
}

/// A looping range of sprite sheet frames.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationInfo {
    pub start_clip: i32,
    pub end_clip: i32,
    pub duration: Duration,
}

/// Combat record of a unit type.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    /// `None` for units that can't be bought.
    #[serde(default)]
    pub cost: Option<Points>,

    pub attack: i32,

    /// Fraction of the incoming damage absorbed, in `[0, 1]`.
    pub defense: f32,

    pub move_range: MovePoints,
    pub move_class: MoveClass,

    /// Can recruit new units onto adjacent empty tiles.
    #[serde(default)]
    pub can_recruit: bool,

    #[serde(default)]
    pub animation: Option<AnimationInfo>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prototypes(pub HashMap<UnitType, Stats>);

fn anim(start_clip: i32, end_clip: i32, millis: u64) -> Option<AnimationInfo> {
    Some(AnimationInfo {
        start_clip,
        end_clip,
        duration: Duration::from_millis(millis),
    })
}

impl Prototypes {
    pub fn from_str(s: &str) -> Result<Self, ron::de::Error> {
        ron::de::from_str(s)
    }

    pub fn stats(&self, unit_type: UnitType) -> &Stats {
        &self.0[&unit_type]
    }

    pub fn cost(&self, unit_type: UnitType) -> Option<Points> {
        self.stats(unit_type).cost
    }

    /// Returns the first unit type that has no record.
    pub fn check(&self) -> Result<(), UnitType> {
        for &unit_type in &UnitType::ALL {
            if !self.0.contains_key(&unit_type) {
                return Err(unit_type);
            }
        }
        Ok(())
    }
}

impl Default for Prototypes {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(
            UnitType::Snake,
            Stats {
                cost: Some(Points(1000)),
                attack: 50,
                defense: 0.0,
                move_range: MovePoints(3),
                move_class: MoveClass::Standard,
                can_recruit: false,
                animation: anim(1, 6, 1300),
            },
        );
        map.insert(
            UnitType::WheelSnake,
            Stats {
                cost: Some(Points(2000)),
                attack: 60,
                defense: 0.1,
                move_range: MovePoints(6),
                move_class: MoveClass::Vehicle,
                can_recruit: false,
                animation: anim(1, 12, 600),
            },
        );
        map.insert(
            UnitType::TankSnake,
            Stats {
                cost: Some(Points(3000)),
                attack: 90,
                defense: 0.4,
                move_range: MovePoints(4),
                move_class: MoveClass::Vehicle,
                can_recruit: false,
                animation: anim(1, 3, 300),
            },
        );
        map.insert(
            UnitType::JetSnake,
            Stats {
                cost: Some(Points(3000)),
                attack: 50,
                defense: 0.0,
                move_range: MovePoints(5),
                move_class: MoveClass::Air,
                can_recruit: false,
                animation: anim(1, 3, 700),
            },
        );
        map.insert(
            UnitType::Headquarters,
            Stats {
                cost: None,
                attack: 0,
                defense: 0.6,
                move_range: MovePoints(0),
                move_class: MoveClass::Standard,
                can_recruit: true,
                animation: None,
            },
        );
        Prototypes(map)
    }
}
