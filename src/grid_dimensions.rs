use crate::cells::Cartesian2DCoordinate;
use crate::errors::{ErrorKind, Result};
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


/// Fixed width and height of a rectangular grid. Immutable once built.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    /// Fails on a zero width or height.
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> Result<RectGridDimensions> {
        if row_width.0 == 0 || column_height.0 == 0 {
            return Err(ErrorKind::InvalidDimensions(row_width.0, column_height.0).into());
        }
        let (w, h) = (row_width.0, column_height.0);
        let cells = w.saturating_mul(h);
        if cells > u32::MAX as usize {
            let edges = (w - 1).saturating_mul(h).saturating_add(w.saturating_mul(h - 1));
            return Err(ErrorKind::GridTooLarge(cells, edges).into());
        }

        Ok(RectGridDimensions {
            row_width,
            column_height,
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Cells and grid adjacencies: a w*h grid has (w-1)*h horizontal and w*(h-1) vertical pairs.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let (w, h) = (self.row_width.0, self.column_height.0);
        (self.size(), EdgesCount((w - 1) * h + w * (h - 1)))
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.row_width.0 && (coord.y as usize) < self.column_height.0
    }

    /// Row-major index of a coordinate, None when outside the grid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.row_width.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index_to_coordinate(&self, index: usize) -> Option<Cartesian2DCoordinate> {
        if index < self.size().0 {
            Some(Cartesian2DCoordinate::from_row_major_index(index, self.row_width))
        } else {
            None
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::errors::ErrorKind;

    fn dims(w: usize, h: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowLength(w), ColumnLength(h)).expect("valid dimensions")
    }

    #[test]
    fn zero_sized_dimensions_are_rejected() {
        for &(w, h) in &[(0, 0), (0, 4), (4, 0)] {
            let err = RectGridDimensions::new(RowLength(w), ColumnLength(h)).unwrap_err();
            match *err.kind() {
                ErrorKind::InvalidDimensions(ew, eh) => assert_eq!((ew, eh), (w, h)),
                ref other => panic!("unexpected error kind {:?}", other),
            }
        }
    }

    #[test]
    fn edge_counts() {
        assert_eq!(dims(1, 1).graph_size(), (NodesCount(1), EdgesCount(0)));
        assert_eq!(dims(2, 2).graph_size(), (NodesCount(4), EdgesCount(4)));
        assert_eq!(dims(5, 1).graph_size(), (NodesCount(5), EdgesCount(4)));
        assert_eq!(dims(4, 3).graph_size(), (NodesCount(12), EdgesCount(17)));
    }

    #[test]
    fn coordinate_index_round_trip() {
        let d = dims(3, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(d.coordinate_to_index(gc(0, 0)), Some(0));
        assert_eq!(d.coordinate_to_index(gc(2, 1)), Some(5));
        assert_eq!(d.coordinate_to_index(gc(3, 0)), None);
        assert_eq!(d.coordinate_to_index(gc(0, 2)), None);
        assert_eq!(d.index_to_coordinate(4), Some(gc(1, 1)));
        assert_eq!(d.index_to_coordinate(6), None);
    }
}
