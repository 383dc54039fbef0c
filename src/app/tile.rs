use std::fmt;

use crossterm::style::{Color, Stylize};

/// What one maze cell looks like on screen in the current frame.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    #[default]
    Free,
    /// Discovered, waiting in the frontier
    Frontier,
    /// Already expanded
    Explored,
    /// On the reconstructed path
    Path,
    Start,
    Goal,
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Free => "  ".with(Color::Reset),
            Tile::Frontier => "░░".with(Color::Magenta),
            Tile::Explored => "* ".with(Color::Blue),
            Tile::Path => "██".with(Color::Yellow),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                crate::config::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
