use petgraph::graph;
use petgraph::{Graph, Undirected};
pub use petgraph::graph::IndexType;
use std::fmt;
use std::slice;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary, CoordinateSmallVec};
use crate::errors::{ErrorKind, Result};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{RectGridCellIter, RectRowIter};
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


/// A rectangular grid of cells whose passages are the edges of an undirected graph.
///
/// A link between two cells means there is no wall between them. Links are graph edges, so a link
/// is always visible from both of its cells.
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<CellState, (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}",
               self.graph, self.rows(), self.columns())
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// A grid without any links, each cell in a group of its own numbered by its row-major index.
    ///
    /// Fails if the cells or the full set of grid adjacencies cannot be indexed by `GridIndexType`.
    pub fn new(dimensions: RectGridDimensions) -> Result<Grid<GridIndexType>> {

        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();
        // petgraph reserves the maximum index value as its "end" marker
        let capacity = <GridIndexType as IndexType>::max().index();
        if nodes > capacity || edges > capacity {
            return Err(ErrorKind::GridTooLarge(nodes, edges).into());
        }

        let mut graph = Graph::with_capacity(nodes, edges);
        for index in 0..nodes {
            let _ = graph.add_node(CellState::new(index));
        }

        Ok(Grid { graph, dimensions })
    }

    /// A grid with every pair of grid-adjacent cells linked.
    pub fn fully_linked(dimensions: RectGridDimensions) -> Result<Grid<GridIndexType>> {
        let mut grid = Grid::new(dimensions)?;

        for index in 0..grid.size() {
            let coord = Cartesian2DCoordinate::from_row_major_index(index, grid.row_length());
            for dir in &[CompassPrimary::South, CompassPrimary::East] {
                let neighbour_index = grid.neighbour_at_direction(coord, *dir)
                    .and_then(|neighbour| grid.grid_coordinate_to_index(neighbour));
                if let Some(neighbour_index) = neighbour_index {
                    let _ = grid.graph.add_edge(graph::NodeIndex::new(index),
                                                graph::NodeIndex::new(neighbour_index),
                                                ());
                }
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn dimensions(&self) -> RectGridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.dimensions.row_length()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.dimensions.column_length()
    }

    /// Top left corner.
    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// Bottom right corner.
    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.columns().0 as u32 - 1, self.rows().0 as u32 - 1)
    }

    /// Link two grid-adjacent cells. Linking an already linked pair is a no-op.
    pub fn link(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate)
                -> std::result::Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        match (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            (Some(a_index), Some(b_index)) => {
                if !self.is_neighbour(a, b) {
                    return Err(CellLinkError::NotNeighbours);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Unlink two cells, if the grid coordinates are valid and a link exists between them.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Invalidates the last edge index in the graph; edge indices are never stored.
                let _ = self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Cells linked to `coord` by a passage, in graph order.
    /// None if the coordinate is outside the grid.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord).map(|node_index| {
            self.graph
                .neighbors(node_index)
                .map(|linked| Cartesian2DCoordinate::from_row_major_index(linked.index(),
                                                                          self.row_length()))
                .collect()
        })
    }

    /// Cells reachable in one step from `coord`, in `CompassPrimary::SCAN_ORDER`.
    pub fn adjacent(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::SCAN_ORDER
            .iter()
            .filter_map(|dir| self.linked_neighbour(coord, *dir))
            .collect()
    }

    /// Cells next to `coord` on the grid whether or not a wall separates them,
    /// in `CompassPrimary::SCAN_ORDER`.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::SCAN_ORDER
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// The neighbour in `direction` if a passage leads there.
    pub fn linked_neighbour(&self,
                            coord: Cartesian2DCoordinate,
                            direction: CompassPrimary)
                            -> Option<Cartesian2DCoordinate> {
        self.neighbour_at_direction(coord, direction)
            .filter(|neighbour| self.is_linked(coord, *neighbour))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.linked_neighbour(coord, direction).is_some()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        self.dimensions.coordinate_to_index(coord)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&CellState> {
        self.grid_coordinate_graph_index(coord)
            .and_then(move |node_index| self.graph.node_weight(node_index))
    }

    pub fn cell_mut(&mut self, coord: Cartesian2DCoordinate) -> Option<&mut CellState> {
        match self.grid_coordinate_graph_index(coord) {
            Some(node_index) => self.graph.node_weight_mut(node_index),
            None => None,
        }
    }

    /// Every cell state in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, &CellState)> {
        let row_length = self.row_length();
        self.graph
            .raw_nodes()
            .iter()
            .enumerate()
            .map(move |(index, node)| {
                (Cartesian2DCoordinate::from_row_major_index(index, row_length), &node.weight)
            })
    }

    /// Reset the checked, on-path and player flags of every cell.
    pub fn clear_marks(&mut self) {
        for node_index in self.graph.node_indices() {
            if let Some(state) = self.graph.node_weight_mut(node_index) {
                state.clear_marks();
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RectRowIter {
        RectRowIter::new(self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_length: self.row_length(),
        }
    }

    fn is_neighbour(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    row_length: RowLength,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                  self.row_length);
            let dst = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                  self.row_length);
            (src, dst)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {}

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
