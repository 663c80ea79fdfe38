use std::time::Duration;

use pretty_assertions::assert_eq;

use crate::core::{
    battle::{
        actions::{self, Action},
        ai::Ai,
        check::{check, Error},
        combat,
        command::{self, Command},
        component::UnitType,
        manager::GameManager,
        movement,
        rules::Rules,
        scenario::{self, Scenario},
        state::{self, BattleResult},
        terrain::TerrainType,
        MovePoints, PlayerId, Points, UnitId,
    },
    map::{manhattan_distance, Coords, Distance},
};

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

const HQ1: Coords = Coords::new(0, 9);
const HQ2: Coords = Coords::new(9, 9);

const TICK: Duration = Duration::from_millis(250);

trait ScenarioConstructor {
    fn unit(self, owner: PlayerId, unit_type: UnitType, pos: Coords) -> Self;
    fn tile(self, pos: Coords, terrain: TerrainType) -> Self;
}

impl ScenarioConstructor for Scenario {
    fn unit(self, owner: PlayerId, unit_type: UnitType, pos: Coords) -> Self {
        self.with_object(owner, unit_type, pos)
    }

    fn tile(self, pos: Coords, terrain: TerrainType) -> Self {
        self.with_terrain(pos, terrain)
    }
}

fn c(x: i32, y: i32) -> Coords {
    Coords::new(x, y)
}

/// Plains with both headquarters along the bottom edge.
fn scenario() -> Scenario {
    scenario::default()
        .unit(P1, UnitType::Headquarters, HQ1)
        .unit(P2, UnitType::Headquarters, HQ2)
}

fn manager_with_rules(scenario: Scenario, rules: Rules) -> GameManager {
    let mut manager = GameManager::new(scenario, rules).expect("Bad scenario");
    manager.dismiss_info();
    manager
}

fn manager(scenario: Scenario) -> GameManager {
    manager_with_rules(scenario, Rules::default())
}

fn id_at(manager: &GameManager, pos: Coords) -> UnitId {
    state::unit_at(manager.state(), pos).expect("No unit")
}

fn hp_at(manager: &GameManager, pos: Coords) -> i32 {
    manager.state().unit(id_at(manager, pos)).hit_points().0
}

fn tick(manager: &mut GameManager, count: usize) {
    for _ in 0..count {
        manager.update(TICK);
    }
}

#[test]
fn reachable_from_corner() {
    let manager = manager(scenario().unit(P1, UnitType::Snake, c(0, 0)));
    let id = id_at(&manager, c(0, 0));
    let destinations = movement::reachable_destinations(manager.state(), id);
    assert_eq!(destinations.len(), 9);
    assert!(!destinations.contains_key(&c(0, 0)));
    assert!(destinations.contains_key(&c(3, 0)));
    assert!(destinations.contains_key(&c(1, 2)));
    assert!(!destinations.contains_key(&c(2, 2)));
}

#[test]
fn reachable_in_the_open() {
    let manager = manager(scenario().unit(P1, UnitType::Snake, c(5, 4)));
    let id = id_at(&manager, c(5, 4));
    let destinations = movement::reachable_destinations(manager.state(), id);
    assert_eq!(destinations.len(), 24);
    for (&pos, path) in &destinations {
        assert_eq!(path.from(), c(5, 4));
        assert_eq!(path.to(), pos);
        assert!(path.cost_for(manager.state(), id).0 <= 3);
        assert!(manhattan_distance(c(5, 4), pos) <= Distance(3));
    }
}

#[test]
fn occupied_tiles_are_never_destinations() {
    let manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(4, 4))
            .unit(P1, UnitType::Snake, c(4, 5))
            .unit(P2, UnitType::Snake, c(5, 4)),
    );
    let id = id_at(&manager, c(4, 4));
    let destinations = movement::reachable_destinations(manager.state(), id);
    assert!(!destinations.contains_key(&c(4, 5)));
    assert!(!destinations.contains_key(&c(5, 4)));
    for pos in destinations.keys() {
        assert!(state::is_tile_free(manager.state(), *pos));
    }
}

#[test]
fn vehicles_pay_double_on_plains() {
    let manager = manager(scenario().unit(P1, UnitType::WheelSnake, c(5, 4)));
    let id = id_at(&manager, c(5, 4));
    let destinations = movement::reachable_destinations(manager.state(), id);
    // Six move points buy three plains tiles.
    assert_eq!(destinations.len(), 24);
}

fn walled_in() -> Scenario {
    scenario()
        .unit(P1, UnitType::Snake, c(0, 0))
        .unit(P1, UnitType::Snake, c(1, 0))
        .tile(c(0, 1), TerrainType::Water)
}

#[test]
fn allies_block_by_default() {
    let manager = manager(walled_in());
    let id = id_at(&manager, c(0, 0));
    let destinations = movement::reachable_destinations(manager.state(), id);
    assert!(destinations.is_empty());
    assert_eq!(actions::destinations(manager.state(), id), Vec::<Coords>::new());
}

#[test]
fn allies_can_be_passed_when_allowed() {
    let rules = Rules {
        pass_through_allies: true,
        ..Rules::default()
    };
    let manager = manager_with_rules(walled_in(), rules);
    let id = id_at(&manager, c(0, 0));
    let destinations = movement::reachable_destinations(manager.state(), id);
    let expected = vec![c(1, 1), c(1, 2), c(2, 0), c(2, 1), c(3, 0)];
    assert_eq!(destinations.keys().cloned().collect::<Vec<_>>(), expected);
    assert_eq!(destinations[&c(2, 0)].traversed(), &[c(1, 0), c(2, 0)]);
}

#[test]
fn shortest_path_in_a_straight_line() {
    let manager = manager(scenario().unit(P1, UnitType::Snake, c(0, 0)));
    let id = id_at(&manager, c(0, 0));
    let path = movement::shortest_path(manager.state(), id, c(3, 0)).expect("No path");
    assert_eq!(path.traversed(), &[c(1, 0), c(2, 0), c(3, 0)]);
}

#[test]
fn shortest_path_goes_around_water_and_ignores_units() {
    let manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(0, 0))
            .unit(P2, UnitType::Snake, c(1, 1))
            .tile(c(0, 1), TerrainType::Water),
    );
    let id = id_at(&manager, c(0, 0));
    let path = movement::shortest_path(manager.state(), id, c(0, 2)).expect("No path");
    assert_eq!(path.len(), 4);
    assert_eq!(path.to(), c(0, 2));
    assert!(!path.traversed().contains(&c(0, 1)));
    // Beyond the move range and over other units: it's only a direction.
    let far = movement::shortest_path(manager.state(), id, c(8, 8)).expect("No path");
    assert_eq!(far.len(), 16);
}

#[test]
fn shortest_path_takes_the_cheaper_detour() {
    let road = TerrainType::Road {
        straight: true,
        rotations: 0,
    };
    let manager = manager(
        scenario()
            .unit(P1, UnitType::WheelSnake, c(0, 0))
            .with_terrain_rect(c(0, 1), c(6, 2), road),
    );
    let id = id_at(&manager, c(0, 0));
    let path = movement::shortest_path(manager.state(), id, c(5, 0)).expect("No path");
    // Five plains tiles cost ten, the road costs eight.
    assert_eq!(path.cost_for(manager.state(), id), MovePoints(8));
    assert_eq!(path.len(), 7);
    assert!(path.traversed().contains(&c(3, 1)));
}

#[test]
fn no_path_into_water_for_walkers() {
    let manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(0, 0))
            .unit(P1, UnitType::JetSnake, c(5, 0))
            .tile(c(3, 3), TerrainType::Water),
    );
    let snake = id_at(&manager, c(0, 0));
    assert_eq!(movement::shortest_path(manager.state(), snake, c(3, 3)), None);
    let jet = id_at(&manager, c(5, 0));
    assert!(movement::shortest_path(manager.state(), jet, c(3, 3)).is_some());
}

#[test]
fn move_takes_one_step_per_tile() {
    let mut manager = manager(scenario().unit(P1, UnitType::Snake, c(2, 2)));
    let id = id_at(&manager, c(2, 2));
    manager.move_unit(c(2, 2), c(2, 5));
    assert_eq!(state::unit_at(manager.state(), c(2, 2)), None);
    assert_eq!(state::unit_at(manager.state(), c(2, 5)), Some(id));
    assert!(manager.state().unit(id).is_busy());
    assert_eq!(manager.state().unit(id).offset(), [0.0, -3.0]);
    tick(&mut manager, 5);
    assert!(manager.state().unit(id).is_busy());
    tick(&mut manager, 1);
    let unit = manager.state().unit(id);
    assert!(!unit.is_busy());
    assert_eq!(unit.offset(), [0.0, 0.0]);
    assert!(unit.has_moved());
    assert!(!unit.has_acted());
}

#[test]
fn commands_to_busy_units_are_rejected() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(2, 2))
            .unit(P2, UnitType::Snake, c(3, 5)),
    );
    manager.move_unit(c(2, 2), c(2, 5));
    let attack = command::Attack {
        attacker: c(2, 5),
        target: c(3, 5),
    };
    let command: Command = attack.into();
    assert_eq!(check(manager.state(), &command), Err(Error::UnitIsBusy));
}

#[test]
#[should_panic]
fn executing_an_illegal_command_panics() {
    let mut manager = manager(scenario().unit(P1, UnitType::Snake, c(2, 2)));
    manager.move_unit(c(2, 2), c(2, 5));
    manager.move_unit(c(2, 5), c(2, 6));
}

#[test]
fn enemy_units_can_not_be_commanded() {
    let manager = manager(scenario().unit(P2, UnitType::Snake, c(2, 2)));
    let command = command::MoveTo {
        from: c(2, 2),
        to: c(2, 3),
    };
    assert_eq!(
        check(manager.state(), &command.into()),
        Err(Error::CanNotCommandEnemyUnits)
    );
}

#[test]
fn attack_with_counter_attack() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(4, 4))
            .unit(P2, UnitType::Snake, c(5, 4))
            .tile(c(5, 4), TerrainType::Mountain),
    );
    let attacker = id_at(&manager, c(4, 4));
    let defender = id_at(&manager, c(5, 4));
    manager.attack(c(4, 4), c(5, 4));
    assert!(manager.state().unit(attacker).is_busy());
    assert!(manager.state().unit(defender).is_busy());
    assert!(manager.state().unit(attacker).has_acted());
    tick(&mut manager, 1);
    // 50 through the mountain's 0.5 cover.
    assert_eq!(hp_at(&manager, c(5, 4)), 75);
    assert_eq!(hp_at(&manager, c(4, 4)), 100);
    tick(&mut manager, 2);
    let counter = (50.0 * manager.state().rules().counter_attack_modifier) as i32;
    let expected = 100 - combat::damage(counter, 0.1, None, 0.0);
    assert_eq!(hp_at(&manager, c(4, 4)), expected);
    assert!(manager.state().unit(attacker).is_busy());
    tick(&mut manager, 1);
    assert!(!manager.state().unit(attacker).is_busy());
    assert!(!manager.state().unit(defender).is_busy());
    assert_eq!(manager.state().unit(attacker).offset(), [0.0, 0.0]);
    assert_eq!(manager.state().unit(defender).offset(), [0.0, 0.0]);
}

#[test]
fn headquarters_do_not_strike_back() {
    let hq_pos = c(8, 9);
    let mut manager = manager(
        scenario::default()
            .unit(P1, UnitType::Headquarters, HQ1)
            .unit(P2, UnitType::Headquarters, hq_pos)
            .unit(P1, UnitType::Snake, c(7, 9)),
    );
    let attacker = id_at(&manager, c(7, 9));
    let hq = id_at(&manager, hq_pos);
    let expected = 100 - combat::damage_to(manager.state(), hq, 50);
    manager.attack(c(7, 9), hq_pos);
    tick(&mut manager, 2);
    assert!(!manager.state().unit(attacker).is_busy());
    assert!(!manager.state().unit(hq).is_busy());
    assert_eq!(hp_at(&manager, c(7, 9)), 100);
    assert_eq!(hp_at(&manager, hq_pos), expected);
}

#[test]
fn owned_flags_boost_and_protect() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(4, 4))
            .unit(P2, UnitType::Snake, c(5, 4))
            .with_flag(c(4, 4)),
    );
    let attacker = id_at(&manager, c(4, 4));
    assert_eq!(combat::modified_attack(manager.state(), attacker), 50);
    let plain = combat::damage_to(manager.state(), attacker, 100);
    manager.capture(c(4, 4));
    assert_eq!(combat::modified_attack(manager.state(), attacker), 60);
    let protected = combat::damage_to(manager.state(), attacker, 100);
    assert!(protected < plain);
}

#[test]
fn destroyed_units_are_removed_when_idle() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::TankSnake, c(4, 4))
            .unit(P2, UnitType::Snake, c(5, 4)),
    );
    let defender = id_at(&manager, c(5, 4));
    manager.state_mut().unit_mut(defender).take_damage(90);
    manager.attack(c(4, 4), c(5, 4));
    tick(&mut manager, 1);
    // Destroyed, but still busy with the sequence.
    assert!(manager.state().unit(defender).is_destroyed());
    assert_eq!(state::unit_at(manager.state(), c(5, 4)), Some(defender));
    assert!(!manager.state().player(P2).units().contains(&defender));
    tick(&mut manager, 1);
    assert_eq!(state::unit_at(manager.state(), c(5, 4)), None);
    assert!(manager.state().unit_opt(defender).is_none());
    assert!(!manager.state().player(P2).units().contains(&defender));
    assert!(!manager.state().unit(id_at(&manager, c(4, 4))).is_busy());
}

#[test]
fn turns_alternate_and_flags_pay() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(3, 3))
            .with_flag(c(3, 3))
            .with_flag(c(6, 6)),
    );
    let snake = id_at(&manager, c(3, 3));
    assert_eq!(manager.state().unit(snake).action_text(), "MA");
    manager.capture(c(3, 3));
    let building = manager.state().map().tile(c(3, 3)).building().cloned();
    assert_eq!(building.and_then(|b| b.owner()), Some(P1));
    assert!(manager.state().unit(snake).has_acted());
    manager.end_turn();
    assert_eq!(manager.state().player_id(), P2);
    assert_eq!(manager.state().player(P2).points(), Points(0));
    assert_eq!(manager.state().unit(snake).action_text(), "");
    manager.end_turn();
    assert_eq!(manager.state().player_id(), P1);
    assert_eq!(manager.state().player(P1).points(), Points(500));
    assert_eq!(manager.state().player(P1).text(), "Player 1: 500 Points");
    assert_eq!(manager.state().unit(snake).action_text(), "MA");
}

#[test]
fn intro_comes_first() {
    let mut scenario = scenario().unit(P1, UnitType::Snake, c(3, 3));
    scenario.intro = "Hello".into();
    let mut manager = GameManager::new(scenario, Rules::default()).expect("Bad scenario");
    assert_eq!(manager.info(), Some("Hello"));
    assert!(manager.select(c(3, 3)).is_empty());
    assert!(manager.state().unit(id_at(&manager, c(3, 3))).has_acted());
    manager.dismiss_info();
    assert_eq!(manager.info(), None);
    assert!(!manager.select(c(3, 3)).is_empty());
}

#[test]
fn bad_scenarios_are_rejected() {
    let scenario = scenario::default().unit(P1, UnitType::Headquarters, HQ1);
    let result = GameManager::new(scenario, Rules::default());
    assert_eq!(
        result.err(),
        Some(scenario::Error::NoHeadquarters(PlayerId(2)))
    );
}

#[test]
fn losing_the_last_hq_ends_the_game() {
    let hq_pos = c(8, 9);
    let mut scenario = scenario::default()
        .unit(P1, UnitType::Headquarters, HQ1)
        .unit(P2, UnitType::Headquarters, hq_pos)
        .unit(P1, UnitType::TankSnake, c(7, 9));
    scenario.win_texts = vec!["You win".into(), "You lose".into()];
    let mut manager = manager(scenario);
    let hq = id_at(&manager, hq_pos);
    manager.state_mut().unit_mut(hq).take_damage(99);
    manager.attack(c(7, 9), hq_pos);
    tick(&mut manager, 1);
    // Latched by the lethal strike, while the HQ still stands on its tile.
    assert_eq!(manager.battle_result(), Some(&BattleResult { winner_id: P1 }));
    assert_eq!(state::unit_at(manager.state(), hq_pos), Some(hq));
    tick(&mut manager, 1);
    assert_eq!(state::unit_at(manager.state(), hq_pos), None);
    assert!(manager.state().player(P2).has_lost());
    assert_eq!(manager.info(), Some("You win"));
    assert!(!manager.is_over());
    let end_turn: Command = command::EndTurn.into();
    assert_eq!(check(manager.state(), &end_turn), Err(Error::BattleEnded));
    manager.dismiss_info();
    assert!(manager.is_over());
}

#[test]
fn buying_a_unit() {
    let rules = Rules {
        starting_points: Points(1000),
        ..Rules::default()
    };
    let mut manager = manager_with_rules(scenario(), rules);
    let hq = id_at(&manager, HQ1);
    let menu = actions::actions(manager.state(), hq);
    assert_eq!(
        menu,
        vec![Action::Recruit {
            unit_type: UnitType::Snake,
            cost: Points(1000),
            coords: vec![c(1, 9), c(0, 8)],
        }]
    );
    assert_eq!(menu[0].to_string(), "Snake (1000)");
    manager.buy(HQ1, c(1, 9), UnitType::Snake);
    assert_eq!(manager.state().player(P1).points(), Points(0));
    assert!(manager.state().unit(hq).has_acted());
    let recruit = id_at(&manager, c(1, 9));
    assert_eq!(manager.state().unit(recruit).unit_type(), UnitType::Snake);
    assert!(manager.state().unit(recruit).has_moved());
    assert!(manager.state().unit(recruit).has_acted());
    assert!(manager.state().player(P1).units().contains(&recruit));
    assert!(actions::actions(manager.state(), hq).is_empty());
}

#[test]
fn recruiting_needs_points() {
    let manager = manager(scenario());
    let hq = id_at(&manager, HQ1);
    assert!(actions::actions(manager.state(), hq).is_empty());
    let buy: Command = command::Buy {
        hq: HQ1,
        pos: c(1, 9),
        unit_type: UnitType::Snake,
    }
    .into();
    assert_eq!(check(manager.state(), &buy), Err(Error::NotEnoughPoints));
}

#[test]
fn headquarters_can_not_attack() {
    let manager = manager(
        scenario()
            .unit(P1, UnitType::Headquarters, c(4, 4))
            .unit(P2, UnitType::Snake, c(5, 4)),
    );
    let hq = id_at(&manager, c(4, 4));
    assert!(actions::attack_targets(manager.state(), hq).is_empty());
    let menu = actions::actions(manager.state(), hq);
    assert!(!menu
        .iter()
        .any(|action| matches!(action, Action::Attack { .. })));
    let attack: Command = command::Attack {
        attacker: c(4, 4),
        target: c(5, 4),
    }
    .into();
    assert_eq!(check(manager.state(), &attack), Err(Error::CanNotAttack));
}

#[test]
fn action_menu() {
    let manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(4, 4))
            .unit(P2, UnitType::Snake, c(5, 4))
            .with_flag(c(4, 4)),
    );
    let id = id_at(&manager, c(4, 4));
    let menu = actions::actions(manager.state(), id);
    let labels: Vec<String> = menu.iter().map(|action| action.to_string()).collect();
    assert_eq!(labels, vec!["Move", "Attack", "Capture"]);
    assert_eq!(
        menu[1],
        Action::Attack {
            targets: vec![c(5, 4)]
        }
    );
}

#[test]
fn busy_enemies_are_not_targets() {
    let mut manager = manager(
        scenario()
            .unit(P1, UnitType::Snake, c(4, 4))
            .unit(P1, UnitType::Snake, c(6, 4))
            .unit(P2, UnitType::Snake, c(5, 4)),
    );
    manager.attack(c(4, 4), c(5, 4));
    let other = id_at(&manager, c(6, 4));
    assert!(actions::attack_targets(manager.state(), other).is_empty());
    tick(&mut manager, 4);
    assert_eq!(actions::attack_targets(manager.state(), other), vec![c(5, 4)]);
}

#[test]
fn selecting_a_move() {
    let mut manager = manager(scenario().unit(P1, UnitType::Snake, c(2, 2)));
    let menu = manager.select(c(2, 2));
    assert_eq!(menu.len(), 1);
    manager.begin_action(c(2, 2), &menu[0]);
    assert!(manager.has_selection());
    assert_eq!(manager.state().map().tile(c(2, 3)).selectable(), Some(P1));
    assert_eq!(manager.state().map().tile(c(9, 0)).selectable(), None);
    assert!(manager.select(c(2, 3)).is_empty());
    assert!(!manager.has_selection());
    assert_eq!(manager.state().map().tile(c(2, 3)).selectable(), None);
    let id = id_at(&manager, c(2, 3));
    assert!(manager.state().unit(id).has_moved());
}

#[test]
fn selecting_outside_the_set_cancels() {
    let mut manager = manager(scenario().unit(P1, UnitType::Snake, c(2, 2)));
    let menu = manager.select(c(2, 2));
    manager.begin_action(c(2, 2), &menu[0]);
    manager.select(c(9, 0));
    assert!(!manager.has_selection());
    assert!(state::unit_at(manager.state(), c(2, 2)).is_some());
    assert_eq!(manager.state().map().tile(c(2, 3)).selectable(), None);
}

#[test]
fn highlight_follows_the_selection() {
    let mut manager = manager(scenario().unit(P1, UnitType::Snake, c(2, 2)));
    manager.highlight(Some(c(9, 0)));
    assert!(manager.state().map().tile(c(9, 0)).is_highlighted());
    let menu = manager.select(c(2, 2));
    manager.begin_action(c(2, 2), &menu[0]);
    manager.highlight(Some(c(9, 0)));
    assert!(!manager.state().map().tile(c(9, 0)).is_highlighted());
    manager.highlight(Some(c(2, 3)));
    assert!(manager.state().map().tile(c(2, 3)).is_highlighted());
    manager.highlight(None);
    assert!(!manager.state().map().tile(c(2, 3)).is_highlighted());
}

fn run_ai(manager: &mut GameManager, ai: &mut Ai, ticks: usize) {
    for _ in 0..ticks {
        ai.update(manager, TICK);
        manager.update(TICK);
    }
}

fn seeded_rules() -> Rules {
    Rules {
        ai_seed: Some(7),
        ai_wait_duration: TICK,
        ..Rules::default()
    }
}

#[test]
fn ai_waits_for_its_turn() {
    let mut manager = manager_with_rules(scenario(), seeded_rules());
    let mut ai = Ai::new(P2, Some(7));
    run_ai(&mut manager, &mut ai, 10);
    assert_eq!(manager.state().player_id(), P1);
}

#[test]
fn ai_with_nothing_to_do_ends_its_turn() {
    let mut manager = manager_with_rules(scenario(), seeded_rules());
    manager.end_turn();
    let mut ai = Ai::new(P2, Some(7));
    // The wait, then the HQ.
    run_ai(&mut manager, &mut ai, 2);
    assert_eq!(manager.state().player_id(), P2);
    run_ai(&mut manager, &mut ai, 1);
    assert_eq!(manager.state().player_id(), P1);
}

#[test]
fn ai_captures_a_reachable_flag() {
    let mut manager = manager_with_rules(
        scenario()
            .unit(P2, UnitType::Snake, c(5, 5))
            .with_flag(c(5, 7)),
        seeded_rules(),
    );
    manager.end_turn();
    let mut ai = Ai::new(P2, Some(7));
    run_ai(&mut manager, &mut ai, 40);
    let building = manager.state().map().tile(c(5, 7)).building().cloned();
    assert_eq!(building.and_then(|b| b.owner()), Some(P2));
    assert_eq!(manager.state().player_id(), P1);
}

#[test]
fn ai_attacks_an_adjacent_enemy() {
    let mut manager = manager_with_rules(
        scenario()
            .unit(P2, UnitType::Snake, c(5, 5))
            .unit(P1, UnitType::Snake, c(5, 4)),
        seeded_rules(),
    );
    manager.end_turn();
    let mut ai = Ai::new(P2, Some(7));
    run_ai(&mut manager, &mut ai, 40);
    assert!(hp_at(&manager, c(5, 4)) < 100);
    assert!(hp_at(&manager, c(5, 5)) < 100);
    assert_eq!(manager.state().player_id(), P1);
}

#[test]
fn ai_heads_for_the_enemy_hq() {
    let mut manager = manager_with_rules(
        scenario().unit(P2, UnitType::Snake, c(5, 0)),
        seeded_rules(),
    );
    manager.end_turn();
    let snake = id_at(&manager, c(5, 0));
    let mut ai = Ai::new(P2, Some(7));
    run_ai(&mut manager, &mut ai, 40);
    let pos = manager.state().unit(snake).pos();
    assert_eq!(manhattan_distance(pos, HQ1), Distance(11));
    assert_eq!(manager.state().player_id(), P1);
}
