use super::Coord;

/// Flat column-major storage addressed by `(column, row)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    data: Box<[T]>,
    width: usize,
    height: usize,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: usize, height: usize, cell: T) -> Self {
        let data = vec![cell; width * height].into_boxed_slice();
        Grid {
            data,
            width,
            height,
        }
    }
}

impl<T> Grid<T> {
    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Cells of each column, top to bottom, from the leftmost column.
    pub fn columns(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.width).map(move |x| &self.data[x * self.height..(x + 1) * self.height])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.data.iter_mut()
    }
}

impl<T> std::ops::Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "Coordinate {:?} is out of bounds for a {}x{} grid",
            index,
            self.width,
            self.height
        );
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl<T> std::ops::IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        assert!(
            self.is_in_bounds(index),
            "Coordinate {:?} is out of bounds for a {}x{} grid",
            index,
            self.width,
            self.height
        );
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
        grid[(2, 1)] = 7;
        assert_eq!(grid[(2, 1)], 7);
        assert_eq!(grid.columns().flatten().filter(|&&v| v == 7).count(), 1);
    }

    #[test]
    fn test_columns_are_column_major() {
        let mut grid = Grid::new(3, 2, 0u8);
        grid[(1, 0)] = 1;
        grid[(1, 1)] = 2;
        let columns = grid.columns().collect::<Vec<_>>();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[1], &[1, 2]);
        assert!(columns.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_columns_with_zero_rows() {
        let grid = Grid::new(3, 0, 0u8);
        assert_eq!(grid.columns().count(), 3);
        assert!(grid.columns().all(|c| c.is_empty()));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_index_panics() {
        let grid = Grid::new(2, 2, 0u8);
        let _ = grid[(0, 2)];
    }
}
