use std::env;

use log::{info, warn};

use snake_advance::{
    core::battle::{
        ai::Ai,
        manager::GameManager,
        rules::Rules,
        scenario::{self, Scenario},
        PlayerId,
    },
    error::ZError,
    utils::{deserialize_from_file, time_s},
    ZResult,
};

const DEFAULT_SCENARIO: &str = "symmetric";

/// One hour of simulated time.
const MAX_TICKS: u64 = 60 * 60 * 60;

fn load_scenario(name: &str) -> ZResult<Scenario> {
    match scenario::builtin(name) {
        Some(scenario) => Ok(scenario),
        None => deserialize_from_file(name),
    }
}

fn load_rules(path: Option<&str>) -> ZResult<Rules> {
    let rules: Rules = match path {
        Some(path) => deserialize_from_file(path)?,
        None => Rules::default(),
    };
    rules.prototypes.check()?;
    Ok(rules)
}

/// Usage: `snake-advance [scenario name or RON path] [rules RON path]`
fn main() -> Result<(), ZError> {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    let scenario_name = args.first().map_or(DEFAULT_SCENARIO, |s| s.as_str());
    let scenario = load_scenario(scenario_name)?;
    let rules = load_rules(args.get(1).map(|s| s.as_str()))?;
    let seed = rules.ai_seed;
    let mut manager = GameManager::new(scenario, rules)?;
    let mut ais = vec![
        Ai::new(PlayerId(1), seed),
        Ai::new(PlayerId(2), seed.map(|seed| seed + 1)),
    ];
    let dtime = time_s(1.0 / 60.0);
    let mut ticks = 0;
    while !manager.is_over() {
        if ticks >= MAX_TICKS {
            warn!("No winner after {} ticks", ticks);
            return Ok(());
        }
        if let Some(text) = manager.info() {
            info!("{}", text);
            manager.dismiss_info();
        }
        for ai in &mut ais {
            ai.update(&mut manager, dtime);
        }
        manager.update(dtime);
        ticks += 1;
    }
    if let Some(result) = manager.battle_result() {
        info!("{} won after {} ticks", result.winner_id, ticks);
        for status in manager.state().players() {
            info!("{}", status.text());
        }
    }
    Ok(())
}
