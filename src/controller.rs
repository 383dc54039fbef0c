use std::time::{Duration, Instant};

use crate::{
    config::{Config, MazeConfig, PaceConfig},
    error::Result,
    generators::generate_maze,
    maze::{Coord, Maze},
    solvers::{Metrics, Search, SearchStatus, Solver, StepOutcome},
};

/// Upper bound on steps performed by one [`RunController::tick`], so a long
/// stall in the caller does not replay the whole backlog at once.
pub const MAX_STEPS_PER_TICK: usize = 64;

/// Control signals accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Start the given solver on the current maze
    Select(Solver),
    /// Replace the maze with a freshly generated one
    Generate,
    /// Halve the delay between steps
    SpeedUp,
    /// Double the delay between steps
    SlowDown,
    /// Stop or restart stepping on ticks
    TogglePause,
    /// Advance by one expansion, even while paused
    Step,
    /// Drop the current run
    Reset,
}

/// Snapshot of everything the renderer draws for one frame.
#[derive(Debug, Clone)]
pub struct RunView<'a> {
    pub maze: &'a Maze,
    pub solver: Option<Solver>,
    pub status: Option<SearchStatus>,
    /// Discovered but not yet expanded cells
    pub frontier: Vec<Coord>,
    /// Expanded cells in expansion order
    pub explored: &'a [Coord],
    /// Reconstructed path, empty until the goal is found
    pub path: &'a [Coord],
    pub metrics: Metrics,
    pub paused: bool,
    pub delay: Duration,
}

/// Drives one search at a caller-controlled pace.
///
/// The controller never sleeps: the caller reports the current time through
/// [`RunController::tick`] and the controller performs whatever steps are due.
pub struct RunController {
    maze: Maze,
    maze_config: MazeConfig,
    pace: PaceConfig,
    /// Current delay between two steps, always within the pace bounds
    delay: Duration,
    paused: bool,
    search: Option<Search>,
    /// When the last paced step happened. `None` restarts the cadence on the
    /// next tick.
    last_step_at: Option<Instant>,
}

impl RunController {
    /// Wrap an existing maze. `config.maze` is used for later regeneration.
    pub fn new(maze: Maze, config: Config) -> Result<Self> {
        config.pace.validate()?;
        Ok(RunController {
            maze,
            maze_config: config.maze,
            pace: config.pace,
            delay: config.pace.default_delay,
            paused: false,
            search: None,
            last_step_at: None,
        })
    }

    /// Generate a first maze from `config` and wrap it.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let maze = generate_maze(&config.maze)?;
        RunController::new(maze, config)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn solver(&self) -> Option<Solver> {
        self.search.as_ref().map(Search::solver)
    }

    pub fn status(&self) -> Option<SearchStatus> {
        self.search.as_ref().map(Search::status)
    }

    /// Whether a search exists and has not reached a terminal state.
    pub fn is_running(&self) -> bool {
        self.status() == Some(SearchStatus::Running)
    }

    pub fn apply(&mut self, signal: Signal) -> Result<()> {
        tracing::debug!("[controller] Applying {:?}", signal);
        match signal {
            Signal::Select(solver) => self.select(solver),
            Signal::Generate => self.generate()?,
            Signal::SpeedUp => self.speed_up(),
            Signal::SlowDown => self.slow_down(),
            Signal::TogglePause => self.toggle_pause(),
            Signal::Step => {
                self.step_once();
            }
            Signal::Reset => self.reset(),
        }
        Ok(())
    }

    /// Cancel any current run and start `solver` on the current maze.
    pub fn select(&mut self, solver: Solver) {
        if self.is_running() {
            tracing::info!("[controller] Cancelling running {:?} to start {}", self.solver(), solver);
        }
        self.search = Some(Search::new(&self.maze, solver));
        self.paused = false;
        self.last_step_at = None;
    }

    /// Generate a new maze from the stored configuration and switch to it.
    pub fn generate(&mut self) -> Result<()> {
        let maze = generate_maze(&self.maze_config)?;
        self.regenerate(maze);
        Ok(())
    }

    /// Replace the maze. All search state is dropped; a selected solver is
    /// started again from scratch on the new maze.
    pub fn regenerate(&mut self, maze: Maze) {
        let solver = self.solver();
        self.maze = maze;
        self.search = None;
        self.last_step_at = None;
        if let Some(solver) = solver {
            self.select(solver);
        }
    }

    /// Drop the current run.
    pub fn reset(&mut self) {
        if self.search.take().is_some() {
            tracing::info!("[controller] Run reset");
        }
        self.last_step_at = None;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        // Do not replay the time spent paused
        self.last_step_at = None;
        tracing::info!(
            "[controller] Animation {}",
            if self.paused { "paused" } else { "resumed" }
        );
    }

    pub fn speed_up(&mut self) {
        self.delay = (self.delay / 2).max(self.pace.min_delay);
        tracing::debug!("[controller] Step delay now {:?}", self.delay);
    }

    pub fn slow_down(&mut self) {
        self.delay = self.delay.saturating_mul(2).min(self.pace.max_delay);
        tracing::debug!("[controller] Step delay now {:?}", self.delay);
    }

    /// Advance the search to its next expansion, passing over stale frontier
    /// entries. Returns `None` when no search is selected.
    pub fn step_once(&mut self) -> Option<StepOutcome> {
        let search = self.search.as_mut()?;
        let was_running = search.status() == SearchStatus::Running;
        let outcome = loop {
            match search.step(&self.maze) {
                StepOutcome::Skipped(_) => continue,
                outcome => break outcome,
            }
        };
        if was_running && search.status().is_terminal() {
            let metrics = search.metrics();
            tracing::info!(
                "[controller] {} finished: {:?}, {} expanded, path length {}, {:.4}s",
                search.solver(),
                search.status(),
                metrics.nodes_expanded,
                metrics.path_length,
                metrics.elapsed.as_secs_f64()
            );
        }
        Some(outcome)
    }

    /// Perform the steps that are due at `now`. Returns how many were done.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.paused || !self.is_running() {
            return 0;
        }
        let Some(last) = self.last_step_at else {
            self.last_step_at = Some(now);
            return 0;
        };

        let since = now.saturating_duration_since(last);
        let due = (since.as_nanos() / self.delay.as_nanos().max(1)) as usize;
        if due == 0 {
            return 0;
        }
        let due = due.min(MAX_STEPS_PER_TICK);

        let mut performed = 0;
        while performed < due && self.is_running() {
            self.step_once();
            performed += 1;
        }

        self.last_step_at = Some(if due == MAX_STEPS_PER_TICK {
            now
        } else {
            last + self.delay * due as u32
        });
        performed
    }

    /// Time left until the next step is due, `None` when nothing will step.
    pub fn next_step_in(&self, now: Instant) -> Option<Duration> {
        if self.paused || !self.is_running() {
            return None;
        }
        match self.last_step_at {
            Some(last) => Some((last + self.delay).saturating_duration_since(now)),
            None => Some(Duration::ZERO),
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.search
            .as_ref()
            .map(Search::metrics)
            .unwrap_or_default()
    }

    pub fn view(&self) -> RunView<'_> {
        let search = self.search.as_ref();
        RunView {
            maze: &self.maze,
            solver: search.map(Search::solver),
            status: search.map(Search::status),
            frontier: search.map(Search::frontier_positions).unwrap_or_default(),
            explored: search.map(Search::explored).unwrap_or_default(),
            path: search.map(Search::path).unwrap_or_default(),
            metrics: self.metrics(),
            paused: self.paused,
            delay: self.delay,
        }
    }
}
