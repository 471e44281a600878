use crate::errors::Result;
use crate::grid::Grid;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnLength, RowLength};

pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

// These build grids without any links. See `generators::build_grid` for the fully linked grid a
// maze is carved from.

pub fn small_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<SmallRectangularGrid> {
    SmallRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}

pub fn medium_rect_grid(row_width: RowLength,
                        column_height: ColumnLength)
                        -> Result<MediumRectangularGrid> {
    MediumRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}

pub fn large_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<LargeRectangularGrid> {
    LargeRectangularGrid::new(RectGridDimensions::new(row_width, column_height)?)
}
