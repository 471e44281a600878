use std::fmt;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;

/// Row-major walk over every coordinate of a grid.
#[derive(Clone)]
pub struct RectGridCellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(dimensions: RectGridDimensions) -> RectGridCellIter {
        RectGridCellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl fmt::Debug for RectGridCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.dimensions.row_length());
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// Yields one row of coordinates at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RectRowIter {
    dimensions: RectGridDimensions,
    current_row: usize,
}

impl RectRowIter {
    pub fn new(dimensions: RectGridDimensions) -> RectRowIter {
        RectRowIter {
            dimensions,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RectRowIter {}
impl Iterator for RectRowIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.dimensions.rows().0 {
            let y = self.current_row as u32;
            let row = (0..self.dimensions.row_length().0)
                .map(|x| Cartesian2DCoordinate::new(x as u32, y))
                .collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimensions.rows().0 - self.current_row;
        (remaining, Some(remaining))
    }
}
