pub mod frontier;
pub mod node;

use std::time::{Duration, Instant};

use crate::maze::{Coord, Grid, Maze};
use frontier::{Frontier, FrontierKey};
use node::{Node, NodeArena};

/// The four search strategies. They share one stepping state machine and only
/// differ in how the frontier is ordered, see [`Solver::frontier_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    Bfs,
    Dfs,
    Greedy,
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Greedy => write!(f, "Greedy Best-First Search"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl Solver {
    /// Available solvers, in menu order
    pub const ALL: [Solver; 4] = [Solver::Bfs, Solver::Dfs, Solver::Greedy, Solver::AStar];

    /// Short name for narrow displays.
    pub fn label(self) -> &'static str {
        match self {
            Solver::Bfs => "BFS",
            Solver::Dfs => "DFS",
            Solver::Greedy => "Greedy",
            Solver::AStar => "A*",
        }
    }

    /// Whether nodes carry a heuristic estimate.
    pub fn is_informed(self) -> bool {
        matches!(self, Solver::Greedy | Solver::AStar)
    }

    /// Frontier ordering for this strategy:
    /// * BFS: insertion order (FIFO)
    /// * DFS: reverse insertion order (LIFO)
    /// * Greedy: smallest `h`, then insertion order
    /// * A*: smallest `f`, then smallest `h`, then insertion order
    pub fn frontier_key(self, node: &Node, seq: u64) -> FrontierKey {
        let (primary, secondary, order) = match self {
            Solver::Bfs => (0, 0, seq),
            Solver::Dfs => (0, 0, u64::MAX - seq),
            Solver::Greedy => (node.h, 0, seq),
            Solver::AStar => (node.f(), node.h, seq),
        };
        FrontierKey {
            primary,
            secondary,
            order,
        }
    }
}

/// Manhattan distance, the heuristic of the informed solvers. Admissible and
/// consistent for unit-cost orthogonal moves.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) as usize + a.1.abs_diff(b.1) as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    GoalFound,
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SearchStatus::Running)
    }
}

/// What a single call to [`Search::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new cell was expanded and its neighbors pushed.
    Expanded(Coord),
    /// The popped cell was already explored; nothing changed.
    Skipped(Coord),
    /// The goal was expanded (now or earlier) and the path is available.
    GoalFound,
    /// The frontier ran dry (now or earlier) without reaching the goal.
    Exhausted,
}

/// Counters shown next to the animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Steps that expanded a cell, including the goal
    pub nodes_expanded: usize,
    /// Number of cells on the path, both endpoints included. 0 when no path.
    pub path_length: usize,
    /// Wall-clock time from initialization to the terminal state
    pub elapsed: Duration,
}

/// Outcome of a finished search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub solver: Solver,
    pub status: SearchStatus,
    /// Start to goal, empty when no path exists.
    pub path: Vec<Coord>,
    /// Expanded cells in expansion order
    pub exploration_order: Vec<Coord>,
    pub metrics: Metrics,
}

impl SearchResult {
    pub fn path_found(&self) -> bool {
        self.status == SearchStatus::GoalFound
    }
}

/// One search in progress over a maze.
///
/// Created by [`Search::new`] (frontier holds only the start node) and advanced
/// one expansion at a time with [`Search::step`]. The search never keeps a
/// borrow of the maze; the caller passes the same maze to every step.
pub struct Search {
    solver: Solver,
    goal: Coord,
    arena: NodeArena,
    frontier: Frontier,
    explored: Grid<bool>,
    exploration_order: Vec<Coord>,
    path: Vec<Coord>,
    status: SearchStatus,
    started_at: Instant,
    elapsed: Option<Duration>,
}

impl Search {
    pub fn new(maze: &Maze, solver: Solver) -> Self {
        let (start, goal) = (maze.start(), maze.goal());
        let h = if solver.is_informed() {
            manhattan(start, goal)
        } else {
            0
        };

        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new();
        let root = Node::root(start, h);
        let key = solver.frontier_key(&root, frontier.next_seq());
        frontier.push(key, arena.push(root));

        tracing::debug!(
            "[search] Initialized {} from {:?} to {:?}",
            solver,
            start,
            goal
        );

        Search {
            solver,
            goal,
            arena,
            frontier,
            explored: Grid::new(maze.width(), maze.height(), false),
            exploration_order: Vec::new(),
            path: Vec::new(),
            status: SearchStatus::Running,
            started_at: Instant::now(),
            elapsed: None,
        }
    }

    /// Perform one expansion.
    pub fn step(&mut self, maze: &Maze) -> StepOutcome {
        debug_assert_eq!(
            (maze.width(), maze.height()),
            (self.explored.width(), self.explored.height()),
            "a search must be stepped with the maze it was created for"
        );

        match self.status {
            SearchStatus::GoalFound => return StepOutcome::GoalFound,
            SearchStatus::Exhausted => return StepOutcome::Exhausted,
            SearchStatus::Running => {}
        }

        let Some(id) = self.frontier.pop() else {
            self.finish(SearchStatus::Exhausted);
            return StepOutcome::Exhausted;
        };

        let (coord, g) = {
            let node = self.arena.get(id);
            (node.coord, node.g)
        };
        if self.explored[coord] {
            return StepOutcome::Skipped(coord);
        }
        self.explored[coord] = true;
        self.exploration_order.push(coord);

        if coord == self.goal {
            self.path = self.arena.path_to(id);
            self.finish(SearchStatus::GoalFound);
            return StepOutcome::GoalFound;
        }

        let mut neighbors: Vec<Coord> = maze
            .neighbors(coord)
            .filter(|&n| !self.explored[n])
            .collect();
        // LIFO pops the last push, so DFS pushes backwards to dive right first
        if self.solver == Solver::Dfs {
            neighbors.reverse();
        }
        for neighbor in neighbors {
            let h = if self.solver.is_informed() {
                manhattan(neighbor, self.goal)
            } else {
                0
            };
            let child = Node {
                coord: neighbor,
                parent: Some(id),
                g: g + 1,
                h,
            };
            let key = self.solver.frontier_key(&child, self.frontier.next_seq());
            let child_id = self.arena.push(child);
            self.frontier.push(key, child_id);
        }
        StepOutcome::Expanded(coord)
    }

    /// Step until a terminal state is reached.
    pub fn run_to_end(&mut self, maze: &Maze) -> SearchStatus {
        while !self.status.is_terminal() {
            self.step(maze);
        }
        self.status
    }

    fn finish(&mut self, status: SearchStatus) {
        self.status = status;
        self.elapsed = Some(self.started_at.elapsed());
        tracing::debug!(
            "[search] {} finished with {:?}: {} expanded, path of {} cells, {} nodes created",
            self.solver,
            status,
            self.exploration_order.len(),
            self.path.len(),
            self.arena.len()
        );
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Reconstructed path, empty until the goal is found.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Expanded cells in expansion order.
    pub fn explored(&self) -> &[Coord] {
        &self.exploration_order
    }

    /// Cells waiting in the frontier that have not been expanded yet, each
    /// listed once.
    pub fn frontier_positions(&self) -> Vec<Coord> {
        let mut listed = Grid::new(self.explored.width(), self.explored.height(), false);
        let mut positions = Vec::new();
        for id in self.frontier.iter() {
            let coord = self.arena.get(id).coord;
            if !self.explored[coord] && !listed[coord] {
                listed[coord] = true;
                positions.push(coord);
            }
        }
        positions
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            nodes_expanded: self.exploration_order.len(),
            path_length: self.path.len(),
            elapsed: self.elapsed.unwrap_or_else(|| self.started_at.elapsed()),
        }
    }

    /// Consume the search into its result.
    pub fn into_result(self) -> SearchResult {
        let metrics = self.metrics();
        SearchResult {
            solver: self.solver,
            status: self.status,
            path: self.path,
            exploration_order: self.exploration_order,
            metrics,
        }
    }
}

/// Run `solver` on `maze` to completion.
pub fn solve_maze(maze: &Maze, solver: Solver) -> SearchResult {
    let mut search = Search::new(maze, solver);
    search.run_to_end(maze);
    let result = search.into_result();
    tracing::info!(
        "[search] {}: found={} expanded={} path_length={} time={:.4}s",
        solver,
        result.path_found(),
        result.metrics.nodes_expanded,
        result.metrics.path_length,
        result.metrics.elapsed.as_secs_f64()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "
        .####
        .####
        .####
        .####
        .####
    ";

    fn corridor() -> Maze {
        Maze::parse(CORRIDOR, (0, 0), (0, 4)).unwrap()
    }

    #[test]
    fn test_corridor_all_solvers() {
        let maze = corridor();
        let expected = vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)];
        for solver in Solver::ALL {
            let result = solve_maze(&maze, solver);
            assert_eq!(result.status, SearchStatus::GoalFound, "{solver}");
            assert_eq!(result.path, expected, "{solver}");
            assert_eq!(result.metrics.path_length, 5, "{solver}");
            assert_eq!(result.metrics.nodes_expanded, 5, "{solver}");
        }
    }

    #[test]
    fn test_walled_off_goal_exhausts() {
        // Start's component is the 2x2 block top-left; the goal is sealed in
        let maze = Maze::parse(
            "
            ..#.#
            ..###
            ###..
            .....
            ",
            (0, 0),
            (3, 0),
        )
        .unwrap();
        for solver in Solver::ALL {
            let result = solve_maze(&maze, solver);
            assert_eq!(result.status, SearchStatus::Exhausted, "{solver}");
            assert!(result.path.is_empty());
            assert_eq!(result.metrics.path_length, 0);
            assert_eq!(result.metrics.nodes_expanded, 4, "{solver}");
        }
    }

    #[test]
    fn test_step_state_machine() {
        let maze = corridor();
        let mut search = Search::new(&maze, Solver::Bfs);
        assert_eq!(search.status(), SearchStatus::Running);
        assert_eq!(search.frontier_positions(), vec![(0, 0)]);
        assert_eq!(search.step(&maze), StepOutcome::Expanded((0, 0)));
        assert_eq!(search.frontier_positions(), vec![(0, 1)]);
        assert_eq!(search.explored(), &[(0, 0)]);
        for _ in 0..3 {
            assert!(matches!(search.step(&maze), StepOutcome::Expanded(_)));
        }
        assert_eq!(search.step(&maze), StepOutcome::GoalFound);
        assert_eq!(search.status(), SearchStatus::GoalFound);
        // Terminal states are sticky
        assert_eq!(search.step(&maze), StepOutcome::GoalFound);
        assert_eq!(search.metrics().nodes_expanded, 5);
    }

    #[test]
    fn test_skips_already_explored() {
        // (1,1) is pushed from both (1,0) and (0,1); the second copy is skipped
        let maze = Maze::parse(
            "
            ...
            ...
            ",
            (0, 0),
            (2, 1),
        )
        .unwrap();
        let mut search = Search::new(&maze, Solver::Bfs);
        let mut outcomes = Vec::new();
        while !search.status().is_terminal() {
            outcomes.push(search.step(&maze));
        }
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Expanded((0, 0)),
                StepOutcome::Expanded((1, 0)),
                StepOutcome::Expanded((0, 1)),
                StepOutcome::Expanded((2, 0)),
                StepOutcome::Expanded((1, 1)),
                StepOutcome::Skipped((1, 1)),
                StepOutcome::GoalFound,
            ]
        );
        assert_eq!(search.metrics().nodes_expanded, 6);
        assert_eq!(search.path(), &[(0, 0), (1, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_dfs_goes_deep_bfs_goes_wide() {
        let maze = Maze::parse(
            "
            ....
            ....
            ",
            (0, 0),
            (3, 1),
        )
        .unwrap();
        // Both take the right neighbor first. DFS then keeps going right, BFS
        // comes back for the cell below the start.
        let mut dfs = Search::new(&maze, Solver::Dfs);
        dfs.step(&maze);
        assert_eq!(dfs.step(&maze), StepOutcome::Expanded((1, 0)));
        assert_eq!(dfs.step(&maze), StepOutcome::Expanded((2, 0)));
        let mut bfs = Search::new(&maze, Solver::Bfs);
        bfs.step(&maze);
        assert_eq!(bfs.step(&maze), StepOutcome::Expanded((1, 0)));
        assert_eq!(bfs.step(&maze), StepOutcome::Expanded((0, 1)));
    }

    #[test]
    fn test_astar_tie_breaks_on_h() {
        let node = |g, h| Node {
            coord: (0, 0),
            parent: None,
            g,
            h,
        };
        let deep = Solver::AStar.frontier_key(&node(6, 2), 10);
        let shallow = Solver::AStar.frontier_key(&node(2, 6), 1);
        assert!(deep < shallow);
        let older = Solver::Greedy.frontier_key(&node(9, 3), 1);
        let newer = Solver::Greedy.frontier_key(&node(0, 3), 2);
        assert!(older < newer);
        let lifo_old = Solver::Dfs.frontier_key(&node(0, 0), 1);
        let lifo_new = Solver::Dfs.frontier_key(&node(0, 0), 2);
        assert!(lifo_new < lifo_old);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((1, 1), (4, 5)), 7);
        assert_eq!(manhattan((4, 5), (1, 1)), 7);
        assert_eq!(manhattan((2, 2), (2, 2)), 0);
    }

    #[test]
    fn test_greedy_heads_for_goal() {
        let maze = Maze::parse(
            "
            .....
            .....
            .....
            ",
            (0, 1),
            (4, 1),
        )
        .unwrap();
        let result = solve_maze(&maze, Solver::Greedy);
        assert_eq!(result.path, vec![(0, 1), (1, 1), (2, 1), (3, 1), (4, 1)]);
        assert_eq!(result.metrics.nodes_expanded, 5);
    }
}
