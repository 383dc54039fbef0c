use std::io::{Stdout, Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::tile::Tile,
    config::CELL_WIDTH,
    controller::RunView,
    maze::{Cell, Grid},
    solvers::{SearchStatus, Solver},
};

/// Draws [`RunView`] snapshots to the terminal, only touching tiles that
/// changed since the previous frame.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Tiles currently on screen, `None` when the next frame must be drawn in full
    on_screen: Option<Grid<Tile>>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Rows below the maze reserved for the status panel
    pub const NUM_STATUS_ROWS: u16 = 5;

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
            on_screen: None,
        }
    }

    /// Forget what is on screen, e.g. after a terminal resize.
    pub fn invalidate(&mut self) {
        self.on_screen = None;
    }

    /// Layer the run state over the maze: walls and free cells first, then
    /// explored cells, the frontier, the path, and finally start and goal.
    pub fn compose(view: &RunView) -> Grid<Tile> {
        let maze = view.maze;
        let mut tiles = Grid::new(maze.width(), maze.height(), Tile::Free);
        for y in 0..maze.height() {
            for x in 0..maze.width() {
                if maze.grid()[(x, y)] == Cell::Wall {
                    tiles[(x, y)] = Tile::Wall;
                }
            }
        }
        for &coord in view.explored {
            tiles[coord] = Tile::Explored;
        }
        for &coord in &view.frontier {
            tiles[coord] = Tile::Frontier;
        }
        for &coord in view.path {
            tiles[coord] = Tile::Path;
        }
        tiles[maze.start()] = Tile::Start;
        tiles[maze.goal()] = Tile::Goal;
        tiles
    }

    /// Plain-text status panel lines.
    pub fn status_lines(view: &RunView) -> Vec<String> {
        let algorithm = view
            .solver
            .map_or_else(|| "-".to_string(), |solver| solver.to_string());
        let status = match view.status {
            None => "Idle",
            Some(SearchStatus::Running) => "Running",
            Some(SearchStatus::GoalFound) => "Path found",
            Some(SearchStatus::Exhausted) => "No path found",
        };
        let pace = format!(
            "Step delay: {}ms{}",
            view.delay.as_millis(),
            if view.paused { "  [paused]" } else { "" }
        );
        let seed = view
            .maze
            .seed()
            .map_or_else(String::new, |seed| format!("  Seed: {}", seed));
        let menu = Solver::ALL
            .iter()
            .enumerate()
            .map(|(i, solver)| format!("{} {}", i + 1, solver.label()))
            .collect::<Vec<_>>()
            .join("  ");
        vec![
            format!("Algorithm: {}  Status: {}", algorithm, status),
            format!(
                "Nodes expanded: {}  Path length: {}  Time: {:.4}s",
                view.metrics.nodes_expanded,
                view.metrics.path_length,
                view.metrics.elapsed.as_secs_f64()
            ),
            format!("{}{}", pace, seed),
            format!("{}  g: new maze  r: reset", menu),
            "Space: pause/resume  →: step when paused  ↑/↓: faster/slower  Esc/q: quit"
                .to_string(),
        ]
    }

    /// Whether the terminal can hold the maze plus the status panel.
    fn fits(width: u16, height: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        Ok(term_width >= width.saturating_mul(CELL_WIDTH)
            && term_height >= height.saturating_add(Renderer::NUM_STATUS_ROWS))
    }

    fn draw_too_small(&mut self, width: u16, height: u16) -> std::io::Result<()> {
        let msg = format!(
            "Terminal size is too small for the {}x{} maze (needs {}x{}). Please resize the terminal.\r\n",
            width,
            height,
            width.saturating_mul(CELL_WIDTH),
            height.saturating_add(Renderer::NUM_STATUS_ROWS)
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()
    }

    /// Draw one frame.
    pub fn draw(&mut self, view: &RunView) -> std::io::Result<()> {
        let (width, height) = (view.maze.width(), view.maze.height());
        if !Renderer::fits(width, height)? {
            self.on_screen = None;
            return self.draw_too_small(width, height);
        }

        let tiles = Renderer::compose(view);
        match self.on_screen.as_ref() {
            Some(previous) if (previous.width(), previous.height()) == (width, height) => {
                for y in 0..height {
                    for x in 0..width {
                        let tile = tiles[(x, y)];
                        if previous[(x, y)] != tile {
                            queue!(
                                self.stdout,
                                cursor::MoveTo(x * CELL_WIDTH, y),
                                style::Print(tile)
                            )?;
                        }
                    }
                }
            }
            _ => {
                tracing::debug!("[render] Full redraw of {}x{} maze", width, height);
                queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
                for y in 0..height {
                    queue!(self.stdout, cursor::MoveTo(0, y))?;
                    for &tile in tiles.row(y) {
                        queue!(self.stdout, style::Print(tile))?;
                    }
                }
            }
        }

        let (term_width, _) = terminal::size()?;
        let color = match view.status {
            Some(SearchStatus::GoalFound) => Color::Green,
            Some(SearchStatus::Exhausted) => Color::Red,
            Some(SearchStatus::Running) => Color::Cyan,
            None => Color::Grey,
        };
        for (i, line) in Renderer::status_lines(view).into_iter().enumerate() {
            let (line, _) = line.unicode_truncate(term_width as usize);
            let styled = match i {
                0 => line.to_string().with(color).attribute(Attribute::Bold),
                1 | 2 => line.to_string().with(Color::White),
                _ => line.to_string().with(Color::DarkGrey),
            };
            queue!(
                self.stdout,
                cursor::MoveTo(0, height + i as u16),
                terminal::Clear(ClearType::UntilNewLine),
                style::PrintStyledContent(styled)
            )?;
        }
        self.stdout.flush()?;
        self.on_screen = Some(tiles);
        Ok(())
    }
}
