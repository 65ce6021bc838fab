use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mindrunner_core::{
    EnemyArchetype, GeneratedLevel, GridCell, LevelState, ObstacleKind, PathOutcome, RewardCard,
    WorldTuning, generate_level,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Generate one level and print its layout", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 0)]
    level: u32,
    /// Print a JSON report instead of the ASCII grid
    #[arg(long)]
    json: bool,
    /// TOML file overriding the default world tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
}

#[derive(Serialize)]
struct ObstacleReport {
    cell: GridCell,
    kind: ObstacleKind,
    health: i32,
    is_goal_guard: bool,
}

#[derive(Serialize)]
struct EnemyReport {
    archetype: EnemyArchetype,
    cell: GridCell,
    /// Planned route towards the player start, empty when unreachable.
    path: Vec<GridCell>,
    cost: Option<String>,
}

#[derive(Serialize)]
struct LevelReport {
    seed: u64,
    level: u32,
    grid_size: usize,
    fingerprint: String,
    reward: RewardCard,
    player_start: GridCell,
    goal_cell: GridCell,
    enemy_distance: u32,
    obstacles: Vec<ObstacleReport>,
    items: Vec<GridCell>,
    enemies: Vec<EnemyReport>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => WorldTuning::load(path)
            .with_context(|| format!("Failed to load tuning file: {}", path.display()))?,
        None => WorldTuning::default(),
    };
    let level = generate_level(args.seed, args.level, &tuning)
        .with_context(|| format!("Failed to generate level {} for seed {}", args.level, args.seed))?;
    info!("generated level {} with fingerprint {:016x}", args.level, level.layout.fingerprint());

    let report = build_report(&args, &level, &tuning);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode level report")?;
        println!("{json}");
    } else {
        print_grid(&level);
        println!("Seed: {}  Level: {}  Reward: {}", report.seed, report.level, report.reward.key());
        println!("Fingerprint: {}", report.fingerprint);
        for enemy in &report.enemies {
            let cost = enemy.cost.as_deref().unwrap_or("unreachable");
            println!("Enemy {} at {:?}: cost {cost}", enemy.archetype.key(), enemy.cell);
        }
    }
    Ok(())
}

fn build_report(args: &Args, level: &GeneratedLevel, tuning: &WorldTuning) -> LevelReport {
    let layout = &level.layout;
    let mut state = LevelState::new(layout.clone(), tuning);
    let enemies = level
        .enemy_spawns
        .iter()
        .map(|spawn| {
            let outcome = state.plan_path(spawn.cell, layout.player_start);
            let path = match &outcome {
                PathOutcome::Found { path, .. } => path.clone(),
                PathOutcome::TrivialAtStart => vec![spawn.cell],
                PathOutcome::Unreachable => Vec::new(),
            };
            EnemyReport {
                archetype: spawn.archetype,
                cell: spawn.cell,
                path,
                cost: outcome.cost().map(|cost| cost.to_string()),
            }
        })
        .collect();

    LevelReport {
        seed: args.seed,
        level: args.level,
        grid_size: layout.grid_size,
        fingerprint: format!("{:016x}", layout.fingerprint()),
        reward: level.config.reward,
        player_start: layout.player_start,
        goal_cell: layout.goal_cell,
        enemy_distance: layout.enemy_distance,
        obstacles: layout
            .obstacles
            .values()
            .map(|o| ObstacleReport {
                cell: o.cell,
                kind: o.kind,
                health: o.health,
                is_goal_guard: o.is_goal_guard,
            })
            .collect(),
        items: layout.items.iter().map(|item| item.cell).collect(),
        enemies,
    }
}

fn print_grid(level: &GeneratedLevel) {
    let layout = &level.layout;
    let size = layout.grid_size as i32;
    for y in 0..size {
        let row: String = (0..size)
            .map(|x| {
                let cell = GridCell::new(x, y);
                if cell == layout.player_start {
                    'P'
                } else if layout.enemy_starts.contains(&cell) {
                    'E'
                } else if let Some(obstacle) = layout.obstacles.get(&cell) {
                    match (obstacle.kind, obstacle.is_goal_guard) {
                        (_, true) => 'G',
                        (ObstacleKind::Destructible, false) => '+',
                        (ObstacleKind::Indestructible, false) => '#',
                    }
                } else if layout.items.iter().any(|item| item.cell == cell) {
                    '*'
                } else {
                    '.'
                }
            })
            .collect();
        println!("{row}");
    }
}
