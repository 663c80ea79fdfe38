use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::battle::{component::Prototypes, HitPoints, Points};

/// Tunable constants of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Time a unit spends crossing one tile.
    pub move_duration: Duration,

    /// Time one step of an attack sequence takes.
    pub attack_duration: Duration,

    /// Fraction of the defender's modified attack dealt back as a counter-attack.
    pub counter_attack_modifier: f32,

    pub base_hit_points: HitPoints,

    /// Awarded at the start of its owner's turn for every flag owned.
    pub flag_points: Points,

    pub flag_boost: f32,
    pub flag_protection: f32,

    pub starting_points: Points,

    /// The AI idles this long before acting on its turn.
    pub ai_wait_duration: Duration,

    /// Lets the reachable-tile expansion walk through tiles occupied by
    /// allies. The allies' tiles are never valid destinations either way.
    pub pass_through_allies: bool,

    /// Seeds the AI's random choices. Entropy is used when `None`.
    pub ai_seed: Option<u64>,

    pub prototypes: Prototypes,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            move_duration: Duration::from_millis(500),
            attack_duration: Duration::from_millis(250),
            counter_attack_modifier: 0.6,
            base_hit_points: HitPoints(100),
            flag_points: Points(500),
            flag_boost: 0.2,
            flag_protection: 0.3,
            starting_points: Points(0),
            ai_wait_duration: Duration::from_secs(1),
            pass_through_allies: false,
            ai_seed: None,
            prototypes: Prototypes::default(),
        }
    }
}

impl Rules {
    pub fn from_str(s: &str) -> Result<Self, ron::de::Error> {
        ron::de::from_str(s)
    }
}
