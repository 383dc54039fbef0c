/// State of one grid cell as far as the search is concerned.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Wall,
    Free,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    /// ASCII symbol used by [`crate::maze::Maze::parse`] and the `Display` impl.
    pub fn symbol(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Free => '.',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Free),
            _ => None,
        }
    }
}
