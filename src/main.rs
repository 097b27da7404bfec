//! Sky Hopper headless runner
//!
//! Plays one session with the autopilot at a simulated 60 fps and prints the
//! final player state as JSON. Useful for soak-testing tuning changes.
//!
//! Usage: `sky-hopper [seed] [frames] [config.json]`

use std::error::Error;

use sky_hopper::consts::SIM_DT;
use sky_hopper::{Autopilot, FixedStepper, Game, GameEvent, GameStatus, SimConfig};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_SEED,
    };
    let frames = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded config from {path}");
            SimConfig::from_json(&json)?
        }
        None => SimConfig::default(),
    };

    let mut game = Game::new(config, seed)?;
    let mut stepper = FixedStepper::new();
    let mut pilot = Autopilot::new();

    log::info!("Seed {seed}, running up to {frames} frames");
    game.start();

    for frame in 0..frames {
        pilot.drive(&mut game);
        stepper.advance(&mut game, SIM_DT);

        for event in stepper.drain_events() {
            match event {
                GameEvent::Scored { score, .. } if score % 10 == 0 => {
                    log::info!("Frame {frame}: score {score}");
                }
                GameEvent::GameOver { score } => {
                    log::info!("Frame {frame}: game over with score {score}");
                }
                _ => {}
            }
        }

        if game.status() == GameStatus::GameOver {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&game.player())?);
    Ok(())
}
