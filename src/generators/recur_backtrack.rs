use rand::Rng;

use crate::maze::{Cell, Coord, Grid};

/// Carve a perfect maze into `grid` by randomized depth-first backtracking.
///
/// The grid is first filled with walls. Cells two steps apart form the carving
/// lattice: starting at `origin`, each step opens a random unvisited lattice
/// neighbor and the wall cell between them. The stack only ever holds carved
/// cells, so its depth is bounded by the number of lattice cells.
pub fn recursive_backtrack<R: Rng + ?Sized>(grid: &mut Grid<Cell>, origin: Coord, rng: &mut R) {
    grid.fill(Cell::Wall);
    if !grid.contains(origin) {
        return;
    }

    grid[origin] = Cell::Free;

    // Initialize the stack with the starting point
    let mut stack = vec![origin];

    while let Some(cell) = stack.pop() {
        let neighbors = get_unvisited_neighbors(cell, grid);

        if !neighbors.is_empty() {
            let neighbor = neighbors[rng.random_range(0..neighbors.len())];
            // The wall sits halfway between two lattice cells
            let wall = (midpoint(cell.0, neighbor.0), midpoint(cell.1, neighbor.1));
            grid[wall] = Cell::Free;
            grid[neighbor] = Cell::Free;
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }
}

/// Halfway between `a` and `b` without overflowing near `u16::MAX`.
fn midpoint(a: u16, b: u16) -> u16 {
    a.min(b) + a.abs_diff(b) / 2
}

/// Lattice cells two steps away (right, down, left, up) that are still walls.
fn get_unvisited_neighbors(coord: Coord, grid: &Grid<Cell>) -> Vec<Coord> {
    let (x, y) = coord;
    [
        // When x < 2 or y < 2, map x - 2 or y - 2 to u16::MAX, which is never
        // in bounds. Likewise x + 2 saturates at u16::MAX.
        (x.saturating_add(2), y),
        (x, y.saturating_add(2)),
        (x.checked_sub(2).unwrap_or(u16::MAX), y),
        (x, y.checked_sub(2).unwrap_or(u16::MAX)),
    ]
    .into_iter()
    .filter(|&c| grid.get(c) == Some(&Cell::Wall))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_get_unvisited_neighbors() {
        let grid = Grid::new(7, 7, Cell::Wall);
        let neighbors = get_unvisited_neighbors((3, 3), &grid);
        assert_eq!(neighbors, vec![(5, 3), (3, 5), (1, 3), (3, 1)]);
        let neighbors = get_unvisited_neighbors((1, 1), &grid);
        assert_eq!(neighbors, vec![(3, 1), (1, 3)]);
    }

    #[test]
    fn test_carves_every_lattice_cell() {
        let mut grid = Grid::new(9, 7, Cell::Free);
        let mut rng = StdRng::seed_from_u64(7);
        recursive_backtrack(&mut grid, (1, 1), &mut rng);
        for y in (1..7).step_by(2) {
            for x in (1..9).step_by(2) {
                assert_eq!(grid[(x, y)], Cell::Free, "lattice cell ({x}, {y}) not carved");
            }
        }
        // Outer border and even-even cells are never carved
        for x in 0..9 {
            assert_eq!(grid[(x, 0)], Cell::Wall);
            assert_eq!(grid[(x, 6)], Cell::Wall);
        }
        for y in (0..7).step_by(2) {
            for x in (0..9).step_by(2) {
                assert_eq!(grid[(x, y)], Cell::Wall);
            }
        }
    }

    #[test]
    fn test_carves_past_half_of_u16_range() {
        // One lattice row reaching beyond 32767, where x + neighbor_x overflows
        let mut grid = Grid::new(40001, 3, Cell::Wall);
        let mut rng = StdRng::seed_from_u64(1);
        recursive_backtrack(&mut grid, (1, 1), &mut rng);
        assert!((1..40000).all(|x| grid[(x, 1)] == Cell::Free));
        assert_eq!(grid[(40000, 1)], Cell::Wall);
        assert!((0..40001).all(|x| grid[(x, 0)] == Cell::Wall && grid[(x, 2)] == Cell::Wall));
        assert_eq!(midpoint(65533, 65531), 65532);
        assert_eq!(midpoint(3, 3), 3);
    }

    #[test]
    fn test_origin_out_of_bounds_leaves_walls() {
        let mut grid = Grid::new(5, 5, Cell::Free);
        let mut rng = StdRng::seed_from_u64(0);
        recursive_backtrack(&mut grid, (9, 9), &mut rng);
        assert!(grid.cells().iter().all(|c| *c == Cell::Wall));
    }
}
