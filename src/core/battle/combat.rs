use log::trace;

use crate::core::battle::{state::State, UnitId};

/// Damage left after the defender's modifiers are applied, in this order:
/// the tile's cover, the protection of an owned building, the unit's defense.
pub fn damage(attack: i32, cover: f32, protection: Option<f32>, defense: f32) -> i32 {
    let mut damage = attack as f32;
    damage -= damage * cover;
    if let Some(protection) = protection {
        damage -= damage * protection;
    }
    damage -= damage * defense;
    damage as i32
}

/// Base attack amplified by the boost of a building the unit's owner holds.
pub fn modified_attack(state: &State, id: UnitId) -> i32 {
    let unit = state.unit(id);
    let attack = unit.attack();
    match state.map().tile(unit.pos()).building() {
        Some(building) if building.is_owned_by(unit.player_id()) => {
            (attack as f32 + attack as f32 * building.boost()) as i32
        }
        _ => attack,
    }
}

/// Damage the unit would take from the given attack where it stands now.
pub fn damage_to(state: &State, id: UnitId, attack: i32) -> i32 {
    let unit = state.unit(id);
    let tile = state.map().tile(unit.pos());
    let protection = match tile.building() {
        Some(building) if building.is_owned_by(unit.player_id()) => Some(building.protection()),
        _ => None,
    };
    damage(attack, tile.terrain().cover(), protection, unit.defense())
}

pub(in crate::core) fn deal_damage(state: &mut State, id: UnitId, attack: i32) {
    let damage = damage_to(state, id, attack);
    trace!("deal_damage: {:?} takes {} from {}", id, damage, attack);
    state.unit_mut(id).take_damage(damage);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::damage;

    #[test]
    fn cover_halves_the_damage() {
        assert_eq!(damage(50, 0.5, None, 0.0), 25);
    }

    #[test]
    fn modifiers_stack_multiplicatively() {
        // 100 -> 90 -> 63 -> 37.8
        assert_eq!(damage(100, 0.1, Some(0.3), 0.4), 37);
    }

    #[test]
    fn more_cover_never_hurts() {
        let mut previous = damage(90, 0.0, None, 0.1);
        for i in 1..=10 {
            let cover = i as f32 / 10.0;
            let current = damage(90, cover, None, 0.1);
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn more_protection_never_hurts() {
        let mut previous = damage(90, 0.1, None, 0.1);
        for i in 0..=10 {
            let protection = i as f32 / 10.0;
            let current = damage(90, 0.1, Some(protection), 0.1);
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn more_defense_never_hurts() {
        let mut previous = damage(90, 0.1, Some(0.3), 0.0);
        for i in 1..=10 {
            let defense = i as f32 / 10.0;
            let current = damage(90, 0.1, Some(0.3), defense);
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn no_attack_no_damage() {
        assert_eq!(damage(0, 0.0, None, 0.0), 0);
    }
}
