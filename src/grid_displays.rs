//! Box drawing text rendering of a maze and whatever the solvers and the player have marked on it.
//!
//! Each cell is three characters wide. Cell bodies come from the `CellState` flags. `Display` draws
//! walls where the grid has no link, `render_maze` takes any other notion of an open way.

use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::grid::{Grid, IndexType};
use crate::units::{ColumnsCount, RowsCount};

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// The three character body of a cell. The player hides every other mark, then the start and goal
/// labels, then the solution path, then explored cells.
pub fn cell_body<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                           coord: Cartesian2DCoordinate)
                                           -> &'static str {
    match grid.cell(coord) {
        Some(&CellState { player: true, .. }) => " @ ",
        Some(_) if coord == grid.start() => " S ",
        Some(_) if coord == grid.goal() => " E ",
        Some(&CellState { on_path: true, .. }) => " * ",
        Some(&CellState { checked: true, .. }) => " ~ ",
        _ => "   ",
    }
}

/// Draw the maze with `is_open` deciding whether two grid-adjacent cells have a way between them.
pub fn render_maze<GridIndexType, F>(grid: &Grid<GridIndexType>, is_open: F) -> String
    where GridIndexType: IndexType,
          F: Fn(Cartesian2DCoordinate, Cartesian2DCoordinate) -> bool
{
    let open = |coord: Cartesian2DCoordinate, dir: CompassPrimary| {
        grid.neighbour_at_direction(coord, dir)
            .map_or(false, |neighbour| is_open(coord, neighbour))
    };
    let ColumnsCount(columns_count) = grid.columns();
    let RowsCount(rows_count) = grid.rows();

    // The north boundary is drawn on its own, every row below draws its south walls.
    let mut output = String::from(WALL_RD);
    for x in 0..columns_count {
        let coord = Cartesian2DCoordinate::new(x as u32, 0);
        output.push_str(WALL_LR_3);
        output.push_str(if open(coord, CompassPrimary::East) {
            WALL_LR
        } else if x == columns_count - 1 {
            WALL_LD
        } else {
            WALL_LRD
        });
    }
    output.push('\n');

    for (row_index, row) in grid.iter_row().enumerate() {
        let is_last_row = row_index == rows_count - 1;
        let mut middle = String::from(WALL_UD);
        let mut bottom = String::new();

        for (column_index, cell_coord) in row.into_iter().enumerate() {
            let is_last_column = column_index == columns_count - 1;
            let east_open = open(cell_coord, CompassPrimary::East);
            let south_open = open(cell_coord, CompassPrimary::South);

            middle.push_str(cell_body(grid, cell_coord));
            middle.push_str(if east_open { " " } else { WALL_UD });

            if column_index == 0 {
                bottom.push_str(if is_last_row {
                    WALL_RU
                } else if south_open {
                    WALL_UD
                } else {
                    WALL_RUD
                });
            }
            bottom.push_str(if south_open { "   " } else { WALL_LR_3 });
            bottom.push_str(match (is_last_row, is_last_column) {
                (true, true) => WALL_LU,
                (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                (false, false) => inner_corner(&open, cell_coord, east_open, south_open),
            });
        }

        output.push_str(&middle);
        output.push('\n');
        output.push_str(&bottom);
        output.push('\n');
    }

    output
}

impl<GridIndexType: IndexType> fmt::Display for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_maze(self, |a, b| self.is_linked(a, b)))
    }
}

// The corner south east of `coord`, joining whichever of the four walls meeting there exist.
fn inner_corner<F>(open: &F,
                   coord: Cartesian2DCoordinate,
                   east_open: bool,
                   south_open: bool)
                   -> &'static str
    where F: Fn(Cartesian2DCoordinate, CompassPrimary) -> bool
{
    let open_from = |dir: CompassPrimary, onward| coord.offset(dir).map_or(false, |c| open(c, onward));
    let left = !south_open;
    let right = !open_from(CompassPrimary::East, CompassPrimary::South);
    let up = !east_open;
    let down = !open_from(CompassPrimary::South, CompassPrimary::East);

    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid_dimensions::RectGridDimensions;
    use crate::grids::{small_rect_grid, SmallRectangularGrid};
    use crate::units::{ColumnLength, RowLength};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn unlinked_grid_is_all_walls() {
        let g = small_rect_grid(RowLength(2), ColumnLength(2)).unwrap();
        let expected = "┌───┬───┐\n\
                        │ S │   │\n\
                        ├───┼───┤\n\
                        │   │ E │\n\
                        └───┴───┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn open_grid_has_only_a_boundary() {
        let dims = RectGridDimensions::new(RowLength(2), ColumnLength(2)).unwrap();
        let g = SmallRectangularGrid::fully_linked(dims).unwrap();
        let expected = "┌───────┐\n\
                        │ S     │\n\
                        │       │\n\
                        │     E │\n\
                        └───────┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn cell_marks_are_rendered() {
        let mut g = small_rect_grid(RowLength(4), ColumnLength(1)).unwrap();
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(2, 0)).unwrap();
        g.link(gc(2, 0), gc(3, 0)).unwrap();
        g.cell_mut(gc(1, 0)).unwrap().on_path = true;
        g.cell_mut(gc(2, 0)).unwrap().checked = true;
        let boundary = WALL_LR.repeat(15);
        let expected = format!("┌{}┐\n│ S   *   ~   E │\n└{}┘\n", boundary, boundary);
        assert_eq!(g.to_string(), expected);

        g.cell_mut(gc(0, 0)).unwrap().player = true;
        assert_eq!(cell_body(&g, gc(0, 0)), " @ ");
        assert_eq!(cell_body(&g, gc(9, 9)), "   ");
    }

    #[test]
    fn render_maze_draws_walls_from_the_given_openings() {
        // The grid is fully linked but the rendering only opens the east way out of the start.
        let dims = RectGridDimensions::new(RowLength(2), ColumnLength(2)).unwrap();
        let g = SmallRectangularGrid::fully_linked(dims).unwrap();
        let start_east = |a: Cartesian2DCoordinate, b: Cartesian2DCoordinate| {
            (a, b) == (gc(0, 0), gc(1, 0)) || (a, b) == (gc(1, 0), gc(0, 0))
        };
        let expected = "┌───────┐\n\
                        │ S     │\n\
                        ├───┬───┤\n\
                        │   │ E │\n\
                        └───┴───┘\n";
        assert_eq!(render_maze(&g, start_east), expected);
        assert_eq!(render_maze(&g, |a, b| g.is_linked(a, b)), g.to_string());
    }
}
