//! Randomized Kruskal maze generation over a grid graph.
//!
//! Every cell starts in a group of its own. Edges are drawn in random order; an edge joining two
//! different groups becomes a walkway and the higher numbered group is relabelled with the lower
//! number by flood filling it. An edge inside one group would close a cycle, so it stays a wall.
//! Once a single group remains, every wall is removed from the grid's links and what is left is a
//! spanning tree: a perfect maze.
//!
//! Relabelling costs O(group size) per merge, O(n^2) in the worst case over a whole maze, which is
//! fine for interactive maze sizes and avoids keeping a separate union-find forest.

use log::{debug, info, trace, warn};
use rand::Rng;

use crate::cells::Cartesian2DCoordinate;
use crate::edges::{adjacency_edges, Edge};
use crate::errors::Result;
use crate::grid::{Grid, IndexType};
use crate::grid_dimensions::RectGridDimensions;
use crate::utils;

/// The group every cell ends up in when the grid's groups are the fresh row-major indices.
pub const ROOT_GROUP: usize = 0;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationState {
    Carving,
    Complete,
}

/// A fully linked grid plus every grid adjacency as a randomly weighted edge, ready to be carved.
pub fn build_grid<GridIndexType, R>(dimensions: RectGridDimensions,
                                    rng: &mut R)
                                    -> Result<(Grid<GridIndexType>, Vec<Edge>)>
    where GridIndexType: IndexType,
          R: Rng
{
    let grid = Grid::fully_linked(dimensions)?;
    let edges = adjacency_edges(dimensions, rng);
    Ok((grid, edges))
}

/// Carve a whole maze into `grid` in one go.
pub fn randomized_kruskal<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                            rng: &mut R)
                                            -> KruskalGenerator
    where GridIndexType: IndexType,
          R: Rng
{
    let edges = adjacency_edges(grid.dimensions(), rng);
    let mut generator = KruskalGenerator::new(grid, edges);
    generator.run(grid);
    generator
}

/// Resumable Kruskal generation, one edge decision per `step`.
#[derive(Debug, Clone)]
pub struct KruskalGenerator {
    // Sorted heaviest first so popping yields the lightest, i.e. a uniformly random, edge.
    unprocessed: Vec<Edge>,
    rejected: Vec<Edge>,
    walkways: Vec<Edge>,
    components: usize,
    pruned: bool,
}

impl KruskalGenerator {
    pub fn new<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                         edges: Vec<Edge>)
                                         -> KruskalGenerator {
        let mut unprocessed = edges;
        unprocessed.sort_by(|a, b| b.weight.cmp(&a.weight));

        let mut groups = utils::fnv_hashset(grid.size());
        groups.extend(grid.cells().map(|(_, state)| state.group));

        KruskalGenerator {
            rejected: Vec::with_capacity(unprocessed.len()),
            walkways: Vec::with_capacity(grid.size()),
            unprocessed,
            components: groups.len(),
            pruned: false,
        }
    }

    pub fn state(&self) -> GenerationState {
        if self.pruned {
            GenerationState::Complete
        } else {
            GenerationState::Carving
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.pruned
    }

    /// Edges turned into passages so far.
    #[inline]
    pub fn walkways(&self) -> &[Edge] {
        &self.walkways
    }

    /// Every wall still standing: the edges not yet considered and those kept as walls.
    pub fn walls(&self) -> impl Iterator<Item = &Edge> {
        self.unprocessed.iter().chain(self.rejected.iter())
    }

    #[inline]
    pub fn unprocessed_count(&self) -> usize {
        self.unprocessed.len()
    }

    /// Number of distinct groups left.
    #[inline]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Decide one edge, or prune the grid once a single group remains.
    pub fn step<GridIndexType: IndexType>(&mut self,
                                          grid: &mut Grid<GridIndexType>)
                                          -> GenerationState {
        if self.pruned {
            return GenerationState::Complete;
        }

        let edge = match self.unprocessed.pop() {
            Some(edge) if self.components > 1 => edge,
            popped => {
                if let Some(edge) = popped {
                    self.unprocessed.push(edge);
                } else if self.components > 1 {
                    warn!("Ran out of edges with {} groups left, the maze will be disconnected",
                          self.components);
                }
                self.prune(grid);
                return GenerationState::Complete;
            }
        };

        let group_of = |coord| grid.cell(coord).map(|state| state.group);
        match (group_of(edge.from), group_of(edge.to)) {
            (Some(from_group), Some(to_group)) if from_group != to_group => {
                let (kept_group, relabel_start) = if from_group < to_group {
                    (from_group, edge.to)
                } else {
                    (to_group, edge.from)
                };
                let relabelled = relabel_group(grid, relabel_start, kept_group);
                self.components -= 1;
                debug!("Walkway {:?} <> {:?}: {} cells joined group {}, {} groups left",
                       edge.from, edge.to, relabelled, kept_group, self.components);
                self.walkways.push(edge);
            }
            _ => {
                trace!("Wall {:?} <> {:?} kept", edge.from, edge.to);
                self.rejected.push(edge);
            }
        }

        GenerationState::Carving
    }

    /// Step until the maze is complete.
    pub fn run<GridIndexType: IndexType>(&mut self, grid: &mut Grid<GridIndexType>) {
        while self.step(grid) == GenerationState::Carving {}
    }

    // Leaves exactly the walkways as links: each walkway linked, each wall unlinked.
    fn prune<GridIndexType: IndexType>(&mut self, grid: &mut Grid<GridIndexType>) {
        self.rejected.append(&mut self.unprocessed);

        for walkway in &self.walkways {
            if let Err(link_error) = grid.link(walkway.from, walkway.to) {
                warn!("Walkway {:?} <> {:?} could not be linked: {:?}",
                      walkway.from, walkway.to, link_error);
            }
        }
        for wall in &self.rejected {
            let _ = grid.unlink(wall.from, wall.to);
        }

        self.pruned = true;
        info!("Maze carved: {} cells, {} walkways, {} walls",
              grid.size(), self.walkways.len(), self.rejected.len());
    }
}

/// Do all cells share one group id?
pub fn is_single_group<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> bool {
    let mut groups = grid.cells().map(|(_, state)| state.group);
    match groups.next() {
        Some(first) => groups.all(|group| group == first),
        None => true,
    }
}

/// Flood fill the group containing `start` with `new_group`, moving between grid neighbours that
/// carry the same old group id. Returns the number of cells relabelled.
fn relabel_group<GridIndexType: IndexType>(grid: &mut Grid<GridIndexType>,
                                           start: Cartesian2DCoordinate,
                                           new_group: usize)
                                           -> usize {
    let old_group = match grid.cell(start) {
        Some(state) if state.group != new_group => state.group,
        _ => return 0,
    };

    let mut relabelled = 0;
    let mut stack = vec![start];
    while let Some(coord) = stack.pop() {
        match grid.cell_mut(coord) {
            Some(state) if state.group == old_group => {
                state.group = new_group;
                relabelled += 1;
            }
            _ => continue,
        }

        for neighbour in grid.neighbours(coord) {
            if grid.cell(neighbour).map_or(false, |state| state.group == old_group) {
                stack.push(neighbour);
            }
        }
    }

    relabelled
}
