use anyhow::{Result, bail};
use clap::Parser;
use log::{debug, info};
use mindrunner_core::{LevelState, PathOutcome, PlacementError, WorldTuning, generate_level};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    /// Highest level index to draw from
    #[arg(long, default_value_t = 30)]
    max_level: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let tuning = WorldTuning::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut infeasible = 0_u32;
    let mut unreachable = 0_u32;

    for run in 0..args.runs {
        let run_seed = rng.next_u64();
        let level_index = (rng.next_u64() % (u64::from(args.max_level) + 1)) as u32;
        let level = match generate_level(run_seed, level_index, &tuning) {
            Ok(level) => level,
            Err(err @ PlacementError::Infeasible { .. }) => {
                debug!("run {run}: {err}");
                infeasible += 1;
                continue;
            }
            Err(err) => bail!("run {run} (seed {run_seed}, level {level_index}): {err}"),
        };

        // Assert invariants
        if let Err(violation) = level.layout.check_invariants() {
            bail!("Invariant failed on seed {run_seed} level {level_index}: {violation}");
        }

        let player = level.layout.player_start;
        let mut state = LevelState::new(level.layout, &tuning);
        for spawn in &level.enemy_spawns {
            match state.plan_path(spawn.cell, player) {
                PathOutcome::Found { path, .. } => {
                    if path.first() != Some(&spawn.cell) || path.last() != Some(&player) {
                        bail!("Invariant failed: path endpoints wrong on seed {run_seed}");
                    }
                    if path.windows(2).any(|pair| pair[0].manhattan(pair[1]) != 1) {
                        bail!("Invariant failed: path not contiguous on seed {run_seed}");
                    }
                }
                PathOutcome::Unreachable => unreachable += 1,
                PathOutcome::TrivialAtStart => {
                    bail!("Invariant failed: enemy spawned on the player, seed {run_seed}");
                }
            }
        }
    }

    info!("{infeasible} infeasible placements, {unreachable} unreachable enemies");
    println!(
        "Fuzzing complete. {} runs, {infeasible} infeasible, {unreachable} unreachable enemies.",
        args.runs
    );
    Ok(())
}
