//! RoboCup Env - native demo
//!
//! Plays one seeded episode with random controllers in every slot and logs
//! the result. Pass a JSON settings file as the first argument to override
//! the reference 2v2 KidSize layout.

use robocup_env::{EnvSettings, RandomPolicy, RoboCupEnv};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> robocup_env::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => EnvSettings::load(path)?,
        None => EnvSettings::default(),
    };
    let seed = settings.seed;
    let mut env = RoboCupEnv::new(settings)?;
    log::info!("RoboCup env (native) starting, seed {seed}");

    let mut trained = RandomPolicy::new(seed);
    let mut others: Vec<RandomPolicy> = (1..4)
        .map(|i| RandomPolicy::new(seed.wrapping_add(i)))
        .collect();

    env.reset();
    let mut total_reward = 0;
    loop {
        let additional: Vec<_> = others.iter_mut().map(RandomPolicy::act).collect();
        let result = env.step(trained.act(), &additional)?;
        total_reward += result.reward;

        if result.outcome.scorer.is_some() {
            log::info!(
                "score {} - {} at {:.1}s",
                result.info.team_left_points,
                result.info.team_right_points,
                env.elapsed_seconds()
            );
        }
        if result.done {
            log::info!(
                "episode finished after {} ticks: {} - {}, trained agent reward {}",
                env.ticks(),
                result.info.team_left_points,
                result.info.team_right_points,
                total_reward
            );
            break;
        }
    }

    let events = env.take_events();
    log::info!("{} match events recorded", events.len());
    Ok(())
}
