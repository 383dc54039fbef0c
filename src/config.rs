use std::time::Duration;

use crate::error::ConfigError;
use crate::maze::Coord;

/// Default maze width in grid cells (walls included).
pub const DEFAULT_WIDTH: u16 = 41;
/// Default maze height in grid cells (walls included).
pub const DEFAULT_HEIGHT: u16 = 41;
/// Smallest grid that still leaves room for distinct start and goal cells
/// inside the outer wall.
pub const MIN_GRID_SIZE: u16 = 5;
/// Largest grid side accepted for generated mazes.
pub const MAX_GRID_SIZE: u16 = 4095;
/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;
/// Fastest allowed pace between two search steps.
pub const MIN_STEP_DELAY: Duration = Duration::from_millis(1);
/// Pace used when a run starts.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(40);
/// Slowest allowed pace between two search steps.
pub const MAX_STEP_DELAY: Duration = Duration::from_millis(1000);
/// Upper bound on how long the front-end waits for input before ticking again.
pub const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Log file written by the binary, since the terminal itself is in raw mode.
pub const LOG_FILE_NAME: &str = "mazeseek.log";

/// Shape of the maze to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: u16,
    pub height: u16,
    /// Start cell. Defaults to the top-left carving origin `(1, 1)`. Custom
    /// endpoints must have odd coordinates.
    pub start: Option<Coord>,
    /// Goal cell. Defaults to the bottom-right inner corner.
    pub goal: Option<Coord>,
    /// Fixed seed for reproducible layouts. `None` draws a fresh seed per maze.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start: None,
            goal: None,
            seed: None,
        }
    }
}

impl MazeConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_endpoints(mut self, start: Coord, goal: Coord) -> Self {
        self.start = Some(start);
        self.goal = Some(goal);
        self
    }

    /// Dimensions rounded up to the next odd number, so that the carving
    /// lattice of odd coordinates is enclosed by a wall border.
    pub fn grid_dims(&self) -> (u16, u16) {
        let odd = |n: u16| if n % 2 == 0 { n.saturating_add(1) } else { n };
        (odd(self.width), odd(self.height))
    }

    /// Start cell after defaults are applied.
    pub fn start_cell(&self) -> Coord {
        self.start.unwrap_or((1, 1))
    }

    /// Goal cell after defaults are applied.
    pub fn goal_cell(&self) -> Coord {
        let (width, height) = self.grid_dims();
        self.goal.unwrap_or((width - 2, height - 2))
    }

    /// Reject dimensions and endpoints that can never produce a solvable maze.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIZE || self.height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID_SIZE,
            });
        }
        if self.width > MAX_GRID_SIZE || self.height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width: self.width as usize,
                height: self.height as usize,
                max: MAX_GRID_SIZE as usize,
            });
        }
        let (width, height) = self.grid_dims();
        for (which, (x, y)) in [("start", self.start_cell()), ("goal", self.goal_cell())] {
            if x >= width || y >= height {
                return Err(ConfigError::EndpointOutOfBounds {
                    which,
                    x,
                    y,
                    width,
                    height,
                });
            }
            if x % 2 == 0 || y % 2 == 0 {
                return Err(ConfigError::EndpointOffLattice { which, x, y });
            }
        }
        let start = self.start_cell();
        if start == self.goal_cell() {
            return Err(ConfigError::StartIsGoal {
                x: start.0,
                y: start.1,
            });
        }
        Ok(())
    }
}

/// Bounds on the delay between two animation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaceConfig {
    pub min_delay: Duration,
    pub default_delay: Duration,
    pub max_delay: Duration,
}

impl Default for PaceConfig {
    fn default() -> Self {
        Self {
            min_delay: MIN_STEP_DELAY,
            default_delay: DEFAULT_STEP_DELAY,
            max_delay: MAX_STEP_DELAY,
        }
    }
}

impl PaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.min_delay <= self.default_delay && self.default_delay <= self.max_delay;
        if self.min_delay.is_zero() || !ordered {
            return Err(ConfigError::DelayBounds {
                min_ms: self.min_delay.as_millis(),
                default_ms: self.default_delay.as_millis(),
                max_ms: self.max_delay.as_millis(),
            });
        }
        Ok(())
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub maze: MazeConfig,
    pub pace: PaceConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.maze.validate()?;
        self.pace.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
        let maze = MazeConfig::default();
        assert_eq!(maze.start_cell(), (1, 1));
        assert_eq!(maze.goal_cell(), (39, 39));
    }

    #[test]
    fn test_even_dimensions_round_up() {
        let maze = MazeConfig::new(10, 7);
        assert_eq!(maze.grid_dims(), (11, 7));
        assert_eq!(maze.goal_cell(), (9, 5));
    }

    #[test]
    fn test_rejects_tiny_grid() {
        assert!(matches!(
            MazeConfig::new(0, 9).validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
        assert!(matches!(
            MazeConfig::new(9, 4).validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_huge_grid() {
        assert_eq!(
            MazeConfig::new(40001, 5).validate(),
            Err(ConfigError::GridTooLarge {
                width: 40001,
                height: 5,
                max: MAX_GRID_SIZE as usize
            })
        );
        assert_eq!(MazeConfig::new(MAX_GRID_SIZE, 5).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let out = MazeConfig::new(9, 9).with_endpoints((1, 1), (9, 3));
        assert!(matches!(
            out.validate(),
            Err(ConfigError::EndpointOutOfBounds { which: "goal", .. })
        ));
        let same = MazeConfig::new(9, 9).with_endpoints((3, 3), (3, 3));
        assert_eq!(same.validate(), Err(ConfigError::StartIsGoal { x: 3, y: 3 }));
        let even = MazeConfig::new(9, 9).with_endpoints((2, 1), (7, 7));
        assert_eq!(
            even.validate(),
            Err(ConfigError::EndpointOffLattice {
                which: "start",
                x: 2,
                y: 1
            })
        );
    }

    #[test]
    fn test_rejects_unordered_delays() {
        let pace = PaceConfig {
            min_delay: Duration::from_millis(50),
            default_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
        };
        assert!(matches!(pace.validate(), Err(ConfigError::DelayBounds { .. })));
    }
}
