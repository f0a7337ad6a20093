//! Sprite grid sizing and cell allocation.
//!
//! Every emoji and every skin variant gets one cell of a near-square grid.
//! Cells are handed out row-major from a single cursor, so the order of
//! `allocate` calls fixes every position.

use crate::types::Position;

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub cols: u32,
    pub rows: u32,
}

impl GridSize {
    /// Size a grid for `count` cells.
    ///
    /// Starts from a `floor(sqrt(count))` square, then widens by one column
    /// and, if that is still too small, grows by one row.
    pub fn for_count(count: usize) -> Self {
        let count = count as u64;
        let side = count.isqrt();
        let mut rows = side;
        let mut cols = side;

        if rows * cols < count {
            cols += 1;
        }
        if rows * cols < count {
            rows += 1;
        }

        Self {
            cols: cols as u32,
            rows: rows as u32,
        }
    }

    pub fn cells(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.col < self.cols && pos.row < self.rows
    }
}

/// Row-major cell allocator.
#[derive(Debug, Clone)]
pub struct GridAllocator {
    size: GridSize,
    col: u32,
    row: u32,
    allocated: usize,
}

impl GridAllocator {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            col: 0,
            row: 0,
            allocated: 0,
        }
    }

    /// Allocator for a grid sized to hold `count` cells.
    pub fn for_count(count: usize) -> Self {
        Self::new(GridSize::for_count(count))
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cells handed out so far.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Return the cursor cell and advance the cursor.
    pub fn allocate(&mut self) -> Position {
        let pos = Position::new(self.col, self.row);
        self.col += 1;
        if self.col >= self.size.cols {
            self.col = 0;
            self.row += 1;
        }
        self.allocated += 1;
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_size_exact_square() {
        assert_eq!(GridSize::for_count(9), GridSize { cols: 3, rows: 3 });
        assert_eq!(GridSize::for_count(1), GridSize { cols: 1, rows: 1 });
    }

    #[test]
    fn test_size_widens_first() {
        // 3x3 = 9 < 10, so widen to 4 columns
        assert_eq!(GridSize::for_count(10), GridSize { cols: 4, rows: 3 });
        assert_eq!(GridSize::for_count(12), GridSize { cols: 4, rows: 3 });
    }

    #[test]
    fn test_size_then_grows_a_row() {
        // 3x4 = 12 < 13, so add a row
        assert_eq!(GridSize::for_count(13), GridSize { cols: 4, rows: 4 });
        assert_eq!(GridSize::for_count(15), GridSize { cols: 4, rows: 4 });
    }

    #[test]
    fn test_size_empty() {
        assert_eq!(GridSize::for_count(0), GridSize { cols: 0, rows: 0 });
    }

    #[test]
    fn test_size_always_fits() {
        for n in 0..2000 {
            let size = GridSize::for_count(n);
            assert!(size.cells() >= n as u64, "grid too small for {}", n);
            assert!(size.rows <= size.cols);
        }
    }

    #[test]
    fn test_size_large_counts() {
        // 3,700-ish is the size of a full emojibase release
        let size = GridSize::for_count(3_745);
        assert_eq!(size, GridSize { cols: 62, rows: 61 });
    }

    #[test]
    fn test_size_around_perfect_squares() {
        assert_eq!(GridSize::for_count(15), GridSize { cols: 4, rows: 4 });
        assert_eq!(GridSize::for_count(16), GridSize { cols: 4, rows: 4 });
        assert_eq!(GridSize::for_count(17), GridSize { cols: 5, rows: 4 });
        assert_eq!(GridSize::for_count(65_536), GridSize { cols: 256, rows: 256 });
    }

    #[test]
    fn test_allocate_row_major() {
        let mut grid = GridAllocator::for_count(5);
        assert_eq!(grid.size(), GridSize { cols: 3, rows: 2 });

        let cells: Vec<Position> = (0..5).map(|_| grid.allocate()).collect();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
        assert_eq!(grid.allocated(), 5);
    }

    #[test]
    fn test_allocations_are_unique_and_in_bounds() {
        for n in [1usize, 2, 7, 10, 64, 101] {
            let mut grid = GridAllocator::for_count(n);
            let size = grid.size();
            let cells: HashSet<Position> = (0..n).map(|_| grid.allocate()).collect();
            assert_eq!(cells.len(), n);
            assert!(cells.iter().all(|&p| size.contains(p)));
        }
    }
}
