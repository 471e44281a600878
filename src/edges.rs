use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::RectGridCellIter;

/// A wall between two grid-adjacent cells that generation may knock down.
///
/// The weight is random and decides the order in which the generator considers edges.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Edge {
    pub from: Cartesian2DCoordinate,
    pub to: Cartesian2DCoordinate,
    pub weight: u32,
}

impl Edge {
    pub fn new(from: Cartesian2DCoordinate, to: Cartesian2DCoordinate, weight: u32) -> Edge {
        Edge { from, to, weight }
    }

    /// Direction from `from` to `to`, None if they are not grid-adjacent.
    pub fn direction(&self) -> Option<CompassPrimary> {
        CompassPrimary::SCAN_ORDER
            .iter()
            .cloned()
            .find(|dir| self.from.offset(*dir) == Some(self.to))
    }

    /// A wall across a horizontal step is drawn as a vertical line.
    pub fn is_vertical_wall(&self) -> bool {
        self.from.y == self.to.y
    }
}

/// Every grid adjacency once, each cell paired with its south and east neighbours,
/// with uniformly random weights.
pub fn adjacency_edges<R: Rng>(dimensions: RectGridDimensions, rng: &mut R) -> Vec<Edge> {
    let (_, edges_count) = dimensions.graph_size();
    let mut edges = Vec::with_capacity(edges_count.0);

    for from in RectGridCellIter::new(dimensions) {
        for dir in &[CompassPrimary::South, CompassPrimary::East] {
            if let Some(to) = from.offset(*dir).filter(|c| dimensions.is_valid_coordinate(*c)) {
                edges.push(Edge::new(from, to, rng.gen()));
            }
        }
    }

    edges
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{ColumnLength, RowLength};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn adjacency_edge_count_and_shape() {
        let mut rng = XorShiftRng::seed_from_u64(11);
        for &(w, h) in &[(1, 1), (1, 5), (5, 1), (2, 2), (7, 4)] {
            let dims = RectGridDimensions::new(RowLength(w), ColumnLength(h)).unwrap();
            let edges = adjacency_edges(dims, &mut rng);
            assert_eq!(edges.len(), (w - 1) * h + w * (h - 1));
            for edge in &edges {
                assert!(dims.is_valid_coordinate(edge.from));
                assert!(dims.is_valid_coordinate(edge.to));
                assert!(edge.direction().is_some());
            }
        }
    }

    #[test]
    fn edge_directions() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(Edge::new(gc(0, 0), gc(0, 1), 0).direction(), Some(CompassPrimary::South));
        assert_eq!(Edge::new(gc(1, 0), gc(0, 0), 0).direction(), Some(CompassPrimary::West));
        assert_eq!(Edge::new(gc(0, 0), gc(1, 1), 0).direction(), None);
        assert!(Edge::new(gc(0, 0), gc(1, 0), 0).is_vertical_wall());
        assert!(!Edge::new(gc(0, 0), gc(0, 1), 0).is_vertical_wall());
    }
}
