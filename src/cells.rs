use smallvec::SmallVec;

use crate::units::RowLength;

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Grid position: `x` is the column and `y` the row, row 0 being the top of the maze.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_length: RowLength) -> Cartesian2DCoordinate {
        let RowLength(width) = row_length;
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    /// The coordinate one step away in `dir`.
    /// Returns None if that would step below zero on either axis; the upper bounds are a grid concern.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Cartesian2DCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Cartesian2DCoordinate::new(x, y)),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Order in which a cell's neighbours are enumerated and scanned by the solvers.
    /// South first: the goal sits in the bottom right corner.
    pub const SCAN_ORDER: [CompassPrimary; 4] = [CompassPrimary::South,
                                                 CompassPrimary::East,
                                                 CompassPrimary::West,
                                                 CompassPrimary::North];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// The mutable state carried by each grid node.
///
/// `group` is only meaningful while a maze is being generated: two cells with the same group are
/// already joined by walkways. The three flags are what a renderer shows.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CellState {
    pub group: usize,
    /// Visited by a solver, either on its path or in an explored dead end.
    pub checked: bool,
    /// Part of the final solution path.
    pub on_path: bool,
    /// The player is standing here.
    pub player: bool,
}

impl CellState {
    pub fn new(group: usize) -> CellState {
        CellState { group, ..CellState::default() }
    }

    pub fn clear_marks(&mut self) {
        self.checked = false;
        self.on_path = false;
        self.player = false;
    }
}
