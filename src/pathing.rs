// Flood fills over a grid's links.
//
// `reachable_set` is the workhorse of the solvers: it answers "what can be reached from here without
// walking through these cells". `Distances` is a breadth first flood from one cell that records the
// number of steps to every reachable cell, which gives shortest paths and the longest path of a
// perfect maze.

use itertools::Itertools;
use smallvec::SmallVec;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::{Grid, IndexType};
use crate::utils;
use crate::utils::FnvHashMap;

/// Every cell reachable from `start` by following links, never entering a cell in `excluding`.
///
/// `start` is always the first element when it is a valid coordinate, even if it is also listed in
/// `excluding`. The rest follow in discovery order. An invalid start gives an empty set.
pub fn reachable_set<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                               start: Cartesian2DCoordinate,
                                               excluding: &[Cartesian2DCoordinate])
                                               -> Vec<Cartesian2DCoordinate> {
    if !grid.is_valid_coordinate(start) {
        return vec![];
    }

    let mut visited = utils::fnv_hashset(grid.size());
    visited.extend(excluding.iter().cloned());
    visited.insert(start);

    let mut reached = vec![start];
    let mut stack = vec![start];
    while let Some(coord) = stack.pop() {
        for next in grid.adjacent(coord) {
            if visited.insert(next) {
                reached.push(next);
                stack.push(next);
            }
        }
    }

    reached
}

/// A perfect maze has exactly one path between any two cells: it is connected and has one link
/// fewer than it has cells.
pub fn is_perfect_maze<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> bool {
    grid.links_count() + 1 == grid.size() &&
    reachable_set(grid, grid.start(), &[]).len() == grid.size()
}

#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Breadth first flood from `start_coordinate`. None if the start is not on the grid.
    pub fn new<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                         start_coordinate: Cartesian2DCoordinate)
                                         -> Option<Distances> {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max_distance = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Unweighted links: the first time a cell is reached is along a shortest path, so the
        // distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances.get(cell_coord).cloned().unwrap_or(0);
                max_distance = max_distance.max(distance_to_cell);

                for link_coord in grid.adjacent(*cell_coord) {
                    if !distances.contains_key(&link_coord) {
                        distances.insert(link_coord, distance_to_cell + 1);
                        new_frontier.push(link_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance,
        })
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// Cells at the maximum distance, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .sorted_by_key(|coord| (coord.y, coord.x))
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour one step closer. None if the end point was never reached.
pub fn shortest_path<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                               distances_from_start: &Distances,
                                               end_point: Cartesian2DCoordinate)
                                               -> Option<Vec<Cartesian2DCoordinate>> {
    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let start = distances_from_start.start();
    let mut current_coord = end_point;
    let mut path = vec![end_point];

    while current_coord != start {
        let closer = grid.adjacent(current_coord)
            .into_iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(coord).map(|distance| (coord, distance))
            })
            .min_by_key(|&(_, distance)| distance);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // No way closer, the distances were computed on some other grid
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze: the cell furthest from the top left corner is one end, the
/// cell furthest from that is the other.
pub fn dijkstra_longest_path<GridIndexType: IndexType>(grid: &Grid<GridIndexType>)
                                                       -> Option<Vec<Cartesian2DCoordinate>> {
    let first_distances = Distances::new(grid, grid.start())?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
