mod recur_backtrack;

use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::MazeConfig,
    error::{MazeError, Result},
    maze::{Cell, Coord, Grid, Maze},
};
pub use recur_backtrack::recursive_backtrack;

/// Lattice cell the carving starts from.
pub const CARVE_ORIGIN: Coord = (1, 1);

/// Get a random number generator seeded for reproducibility.
pub fn get_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Use the given seed, or draw a fresh one from the OS.
fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => s,
        None => StdRng::from_os_rng().random(),
    }
}

/// Generate a perfect maze shaped by `config`.
///
/// The seed actually used is stored on the returned maze, so a layout drawn
/// from a fresh seed can be reproduced later with [`MazeConfig::with_seed`].
pub fn generate_maze(config: &MazeConfig) -> Result<Maze> {
    config.validate()?;

    let (width, height) = config.grid_dims();
    if (width, height) != (config.width, config.height) {
        tracing::debug!(
            "[generator] Rounded {}x{} up to odd dimensions {}x{}",
            config.width,
            config.height,
            width,
            height
        );
    }

    let seed = resolve_seed(config.seed);
    let mut rng = get_rng(seed);
    let mut grid = Grid::new(width, height, Cell::Wall);
    recursive_backtrack(&mut grid, CARVE_ORIGIN, &mut rng);

    let (start, goal) = (config.start_cell(), config.goal_cell());
    // Pin the endpoints regardless of how carving went
    grid[start] = Cell::Free;
    grid[goal] = Cell::Free;

    let mut maze = Maze::from_grid(grid, start, goal)?;
    maze.set_seed(seed);

    if !is_reachable(&maze, start, goal) {
        tracing::error!("[generator] Goal {:?} not reachable from {:?} (seed {})", goal, start, seed);
        return Err(MazeError::GenerationFailure(format!(
            "goal {:?} is not reachable from start {:?} with seed {}",
            goal, start, seed
        )));
    }

    tracing::info!(
        "[generator] Generated {}x{} maze with seed {} ({} free cells)",
        width,
        height,
        seed,
        maze.free_cells().count()
    );
    Ok(maze)
}

/// Flood fill from `from` over free cells.
fn is_reachable(maze: &Maze, from: Coord, to: Coord) -> bool {
    let mut seen = Grid::new(maze.width(), maze.height(), false);
    let mut queue = VecDeque::from([from]);
    seen[from] = true;
    while let Some(coord) = queue.pop_front() {
        if coord == to {
            return true;
        }
        for next in maze.neighbors(coord) {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}
