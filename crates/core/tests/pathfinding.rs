use mindrunner_core::content::ENEMY_ATTACK;
use mindrunner_core::nav::destructible_step_cost;
use mindrunner_core::{
    GridCell, Obstacle, ObstacleKind, ObstacleMap, PathCost, PathOutcome, WorldRng, build_graph,
    find_path,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

const SMALL_GRID: usize = 4;

fn wall_row_with_breach() -> ObstacleMap {
    let mut obstacles = ObstacleMap::new();
    for x in 0..6 {
        let cell = GridCell::new(x, 3);
        let obstacle =
            if x == 3 { Obstacle::destructible(cell, 5) } else { Obstacle::indestructible(cell) };
        obstacles.insert(cell, obstacle);
    }
    obstacles
}

#[test]
fn breach_in_a_wall_is_crossed_at_its_live_cost() {
    let obstacles = wall_row_with_breach();
    let graph = build_graph(6, &obstacles);
    let start = GridCell::new(3, 0);
    let goal = GridCell::new(3, 5);

    let outcome = find_path(&graph, start, goal, &obstacles, ENEMY_ATTACK);
    let path = outcome.path().expect("the breach keeps the goal reachable");
    assert!(path.contains(&GridCell::new(3, 3)));
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    // Four plain steps plus 1.1 for the breach.
    assert_eq!(outcome.cost(), Some(PathCost::from_tenths(51)));
    assert_eq!(outcome.cost().map(|c| c.to_string()), Some("5.1".to_string()));
    assert_eq!(outcome.next_step(), Some(GridCell::new(3, 1)));
}

#[test]
fn sealed_wall_leaves_the_goal_unreachable() {
    let mut obstacles = wall_row_with_breach();
    obstacles.insert(GridCell::new(3, 3), Obstacle::indestructible(GridCell::new(3, 3)));
    let graph = build_graph(6, &obstacles);

    let outcome = find_path(&graph, GridCell::new(3, 0), GridCell::new(3, 5), &obstacles, 10);
    assert_eq!(outcome, PathOutcome::Unreachable);
    assert_eq!(outcome.next_step(), None);
}

fn random_small_grid(rng: &mut WorldRng) -> (ObstacleMap, GridCell, GridCell) {
    let size = SMALL_GRID as i32;
    let start = GridCell::new(rng.index(SMALL_GRID) as i32, rng.index(SMALL_GRID) as i32);
    let goal = GridCell::new(rng.index(SMALL_GRID) as i32, rng.index(SMALL_GRID) as i32);

    let mut obstacles = ObstacleMap::new();
    for x in 0..size {
        for y in 0..size {
            let cell = GridCell::new(x, y);
            if cell == start {
                continue;
            }
            match rng.index(6) {
                0 => {
                    obstacles.insert(cell, Obstacle::indestructible(cell));
                }
                1 | 2 => {
                    let health = rng.index(60) as i32 + 1;
                    obstacles.insert(cell, Obstacle::destructible(cell, health));
                }
                _ => {}
            }
        }
    }
    (obstacles, start, goal)
}

fn step_cost(obstacles: &ObstacleMap, cell: GridCell) -> Option<PathCost> {
    match obstacles.get(&cell) {
        Some(o) if o.kind == ObstacleKind::Indestructible => None,
        Some(o) => Some(destructible_step_cost(o.health, ENEMY_ATTACK)),
        None => Some(PathCost::STEP),
    }
}

/// Exhaustive search over every simple path; only viable on tiny grids.
fn brute_force_cost(obstacles: &ObstacleMap, start: GridCell, goal: GridCell) -> Option<PathCost> {
    fn walk(
        obstacles: &ObstacleMap,
        cell: GridCell,
        goal: GridCell,
        spent: PathCost,
        visited: &mut Vec<GridCell>,
        best: &mut Option<PathCost>,
    ) {
        if cell == goal {
            if best.is_none_or(|b| spent < b) {
                *best = Some(spent);
            }
            return;
        }
        for next in cell.neighbors() {
            if !next.in_bounds(SMALL_GRID) || visited.contains(&next) {
                continue;
            }
            let Some(step) = step_cost(obstacles, next) else {
                continue;
            };
            visited.push(next);
            walk(obstacles, next, goal, spent + step, visited, best);
            visited.pop();
        }
    }

    let mut best = None;
    let mut visited = vec![start];
    walk(obstacles, start, goal, PathCost::ZERO, &mut visited, &mut best);
    best
}

fn check_against_brute_force(seed: u64) -> Result<(), String> {
    let mut rng = WorldRng::seed_from_u64(seed);
    let (obstacles, start, goal) = random_small_grid(&mut rng);
    let graph = build_graph(SMALL_GRID, &obstacles);
    let outcome = find_path(&graph, start, goal, &obstacles, ENEMY_ATTACK);

    if start == goal {
        return match outcome {
            PathOutcome::TrivialAtStart => Ok(()),
            other => Err(format!("expected TrivialAtStart, got {other:?}")),
        };
    }

    let expected = brute_force_cost(&obstacles, start, goal);
    match (&outcome, expected) {
        (PathOutcome::Found { path, cost }, Some(best)) => {
            if *cost != best {
                return Err(format!("seed {seed}: A* cost {cost}, exhaustive best {best}"));
            }
            let mut walked = PathCost::ZERO;
            for pair in path.windows(2) {
                if pair[0].manhattan(pair[1]) != 1 {
                    return Err(format!("seed {seed}: path jumps from {:?} to {:?}", pair[0], pair[1]));
                }
                walked = walked
                    + step_cost(&obstacles, pair[1])
                        .ok_or_else(|| format!("seed {seed}: path enters {:?}", pair[1]))?;
            }
            if walked != *cost {
                return Err(format!("seed {seed}: path sums to {walked}, reported {cost}"));
            }
            Ok(())
        }
        (PathOutcome::Unreachable, None) => Ok(()),
        (other, expected) => {
            Err(format!("seed {seed}: A* returned {other:?}, exhaustive best {expected:?}"))
        }
    }
}

#[test]
fn astar_matches_exhaustive_search_on_small_grids() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(200));
    runner
        .run(&any::<u64>(), |seed| {
            check_against_brute_force(seed).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("A* should agree with exhaustive search");
}

#[test]
fn tougher_obstacles_never_make_a_route_cheaper() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(100));
    runner
        .run(&(any::<u64>(), 1_i32..200), |(seed, extra)| {
            let mut rng = WorldRng::seed_from_u64(seed);
            let (mut obstacles, start, goal) = random_small_grid(&mut rng);
            let Some(target) = obstacles.values().find(|o| o.is_destructible()).map(|o| o.cell)
            else {
                return Ok(());
            };

            let graph = build_graph(SMALL_GRID, &obstacles);
            let before = find_path(&graph, start, goal, &obstacles, ENEMY_ATTACK).cost();
            if let Some(obstacle) = obstacles.get_mut(&target) {
                obstacle.health += extra;
            }
            let after = find_path(&graph, start, goal, &obstacles, ENEMY_ATTACK).cost();

            match (before, after) {
                (Some(before), Some(after)) if after < before => Err(TestCaseError::fail(format!(
                    "seed {seed}: cost fell from {before} to {after}"
                ))),
                (None, Some(_)) | (Some(_), None) => Err(TestCaseError::fail(format!(
                    "seed {seed}: reachability changed with health alone"
                ))),
                _ => Ok(()),
            }
        })
        .expect("cost should be monotone in obstacle health");
}
