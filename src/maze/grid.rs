/// Row-major rectangular storage addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Box<[T]>,
    width: u16,
    height: u16,
}

impl<T: Copy> Grid<T> {
    pub fn new(width: u16, height: u16, value: T) -> Self {
        let data = vec![value; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }

    /// Replace every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.iter_mut().for_each(|cell| *cell = value);
    }
}

impl<T> Grid<T> {
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn contains(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Cell at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: (u16, u16)) -> Option<&T> {
        if self.contains(coord) {
            Some(&self.data[self.ravel_index(coord.0, coord.1)])
        } else {
            None
        }
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: u16) -> &[T] {
        let start = self.ravel_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    pub fn cells(&self) -> &[T] {
        &self.data
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }
}

impl<T> std::ops::Index<(u16, u16)> for Grid<T> {
    type Output = T;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<(u16, u16)> for Grid<T> {
    fn index_mut(&mut self, index: (u16, u16)) -> &mut Self::Output {
        let idx = self.ravel_index(index.0, index.1);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_indexing() {
        let mut grid = Grid::new(4, 3, 0u8);
        grid[(3, 2)] = 7;
        assert_eq!(grid[(3, 2)], 7);
        assert_eq!(grid.row(2), &[0, 0, 0, 7]);
        assert_eq!(grid.get((4, 0)), None);
        assert_eq!(grid.get((3, 2)), Some(&7));
    }

    #[test]
    fn test_fill() {
        let mut grid = Grid::new(3, 2, false);
        grid.fill(true);
        assert!(grid.cells().iter().all(|&c| c));
        assert!(grid.contains((2, 1)));
        assert!(!grid.contains((3, 1)));
    }
}
