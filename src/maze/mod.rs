pub mod cell;
pub mod grid;

use std::fmt;

use crate::error::{ConfigError, MazeError, Result};
pub use cell::Cell;
pub use grid::Grid;

/// A grid position as `(x, y)`, with `x` the column and `y` the row.
pub type Coord = (u16, u16);

/// A rectangular grid of walls and free cells with a start and a goal.
///
/// Built either by [`crate::generators::generate_maze`] or by hand through
/// [`Maze::from_rows`] / [`Maze::parse`]. The layout never changes after
/// construction; a new maze replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid<Cell>,
    start: Coord,
    goal: Coord,
    /// Seed the layout was carved with, if it was generated.
    seed: Option<u64>,
}

impl Maze {
    /// Wrap a finished grid, checking that start and goal are distinct free
    /// cells inside it.
    pub fn from_grid(grid: Grid<Cell>, start: Coord, goal: Coord) -> Result<Self> {
        if grid.width() == 0 || grid.height() == 0 {
            return Err(ConfigError::GridTooSmall {
                width: grid.width(),
                height: grid.height(),
                min: 1,
            }
            .into());
        }
        for (which, coord) in [("start", start), ("goal", goal)] {
            match grid.get(coord) {
                None => {
                    return Err(ConfigError::EndpointOutOfBounds {
                        which,
                        x: coord.0,
                        y: coord.1,
                        width: grid.width(),
                        height: grid.height(),
                    }
                    .into());
                }
                Some(Cell::Wall) => {
                    return Err(ConfigError::EndpointOnWall {
                        which,
                        x: coord.0,
                        y: coord.1,
                    }
                    .into());
                }
                Some(Cell::Free) => {}
            }
        }
        if start == goal {
            return Err(ConfigError::StartIsGoal {
                x: start.0,
                y: start.1,
            }
            .into());
        }
        Ok(Maze {
            grid,
            start,
            goal,
            seed: None,
        })
    }

    /// Build a maze from rows of cells, top row first. All rows must have the
    /// same length.
    pub fn from_rows(rows: &[Vec<Cell>], start: Coord, goal: Coord) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ConfigError::RaggedRows {
                row,
                found: cells.len(),
                expected: width,
            }
            .into());
        }
        let too_large = ConfigError::GridTooLarge {
            width,
            height,
            max: u16::MAX as usize,
        };
        let (Ok(width), Ok(height)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(too_large.into());
        };
        let mut grid = Grid::new(width, height, Cell::Wall);
        for (y, row) in (0..height).zip(rows) {
            for (x, &cell) in (0..width).zip(row) {
                grid[(x, y)] = cell;
            }
        }
        Maze::from_grid(grid, start, goal)
    }

    /// Build a maze from an ASCII picture where `#` is a wall and `.` is free.
    /// Blank lines and surrounding whitespace are ignored.
    pub fn parse(picture: &str, start: Coord, goal: Coord) -> Result<Self> {
        let rows = picture
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, c)| {
                        Cell::from_symbol(c).ok_or(ConfigError::BadTile { row, col, found: c })
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Maze::from_rows(&rows, start, goal)
    }

    pub(crate) fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Seed used to carve this maze, `None` for hand-built mazes.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.grid.contains(coord)
    }

    /// Whether `coord` is a wall. Fails with [`MazeError::InvalidPosition`]
    /// for coordinates outside the grid.
    pub fn is_wall(&self, coord: Coord) -> Result<bool> {
        self.grid
            .get(coord)
            .map(|cell| cell.is_wall())
            .ok_or(MazeError::InvalidPosition {
                x: coord.0,
                y: coord.1,
                width: self.width(),
                height: self.height(),
            })
    }

    /// Free cells one orthogonal step away from `coord`, always in the order
    /// right, down, left, up. Empty for out-of-bounds coordinates.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let candidates = if self.in_bounds(coord) {
            let (x, y) = coord;
            // x - 1 wraps to u16::MAX and x + 1 saturates at u16::MAX; neither
            // is a valid index, so the bounds check drops them.
            vec![
                (x.saturating_add(1), y),
                (x, y.saturating_add(1)),
                (x.wrapping_sub(1), y),
                (x, y.wrapping_sub(1)),
            ]
        } else {
            vec![]
        };
        candidates
            .into_iter()
            .filter(move |&c| matches!(self.grid.get(c), Some(Cell::Free)))
    }

    /// All free cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height()).flat_map(move |y| {
            (0..self.width())
                .filter(move |&x| self.grid[(x, y)] == Cell::Free)
                .map(move |x| (x, y))
        })
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let symbol = if (x, y) == self.start {
                    'S'
                } else if (x, y) == self.goal {
                    'G'
                } else {
                    self.grid[(x, y)].symbol()
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
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

    #[test]
    fn test_parse_and_query() {
        let maze = Maze::parse(CORRIDOR, (0, 0), (0, 4)).unwrap();
        assert_eq!((maze.width(), maze.height()), (5, 5));
        assert_eq!(maze.is_wall((1, 0)), Ok(true));
        assert_eq!(maze.is_wall((0, 3)), Ok(false));
        assert_eq!(maze.free_cells().count(), 5);
    }

    #[test]
    fn test_out_of_bounds() {
        let maze = Maze::parse(CORRIDOR, (0, 0), (0, 4)).unwrap();
        assert!(!maze.in_bounds((5, 5)));
        assert!(!maze.in_bounds((0, 5)));
        assert!(maze.in_bounds((4, 4)));
        assert_eq!(
            maze.is_wall((5, 0)),
            Err(MazeError::InvalidPosition {
                x: 5,
                y: 0,
                width: 5,
                height: 5
            })
        );
        assert_eq!(maze.neighbors((9, 9)).count(), 0);
    }

    #[test]
    fn test_neighbor_order() {
        let maze = Maze::parse(
            "
            ...
            ...
            ...
            ",
            (0, 0),
            (2, 2),
        )
        .unwrap();
        let neighbors = maze.neighbors((1, 1)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(2, 1), (1, 2), (0, 1), (1, 0)]);
        // Corner: left and up fall off the grid
        let neighbors = maze.neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_neighbors_skip_walls() {
        let maze = Maze::parse(CORRIDOR, (0, 0), (0, 4)).unwrap();
        let neighbors = maze.neighbors((0, 2)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(0, 3), (0, 1)]);
    }

    #[test]
    fn test_rejects_start_on_wall() {
        let err = Maze::parse(CORRIDOR, (1, 0), (0, 4)).unwrap_err();
        assert_eq!(
            err,
            MazeError::Config(ConfigError::EndpointOnWall {
                which: "start",
                x: 1,
                y: 0
            })
        );
    }

    #[test]
    fn test_rejects_ragged_and_bad_input() {
        let rows = vec![vec![Cell::Free, Cell::Free], vec![Cell::Free]];
        assert!(matches!(
            Maze::from_rows(&rows, (0, 0), (1, 0)),
            Err(MazeError::Config(ConfigError::RaggedRows { row: 1, .. }))
        ));
        assert!(matches!(
            Maze::parse("..x", (0, 0), (1, 0)),
            Err(MazeError::Config(ConfigError::BadTile { found: 'x', .. }))
        ));
        assert!(matches!(
            Maze::parse("...", (0, 0), (0, 0)),
            Err(MazeError::Config(ConfigError::StartIsGoal { .. }))
        ));
        assert!(matches!(
            Maze::parse("...", (0, 0), (3, 0)),
            Err(MazeError::Config(ConfigError::EndpointOutOfBounds { which: "goal", .. }))
        ));
    }

    #[test]
    fn test_rejects_rows_wider_than_u16() {
        let rows = vec![vec![Cell::Free; 70_000]];
        assert_eq!(
            Maze::from_rows(&rows, (0, 0), (1, 0)),
            Err(MazeError::Config(ConfigError::GridTooLarge {
                width: 70_000,
                height: 1,
                max: u16::MAX as usize
            }))
        );
    }

    #[test]
    fn test_display() {
        let maze = Maze::parse("..#\n#..", (0, 0), (2, 1)).unwrap();
        assert_eq!(maze.to_string(), "S.#\n#.G\n");
    }
}
