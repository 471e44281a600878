//! Incremental maze solvers.
//!
//! A `PathSolver` grows a path from the start cell one step per call. At a junction it flood fills
//! each way forward (never back through the current cell) and walks into the one whose reachable
//! set holds the goal. A perfect maze is a tree, so exactly one way can lead there and the path
//! never has to backtrack.
//!
//! The three strategies only differ in what they mark as checked on the way:
//!
//! - `Guided` marks the cells the path enters, plus the first cell of each way it considered when
//!   `show_checked` is set.
//! - `DepthFirst` marks the whole of every dead end it meets before the right way.
//! - `BreadthFirst` marks the whole of every dead end at the junction, before or after the right way.
//!
//! The two explorers also mark the junction a dead end branches off.
//!
//! All three build the same path.

use log::{debug, info, warn};

use crate::cells::{Cartesian2DCoordinate, CoordinateSmallVec};
use crate::grid::{Grid, IndexType};
use crate::pathing::reachable_set;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolverState {
    Exploring,
    Solved,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveStrategy {
    Guided { show_checked: bool },
    DepthFirst,
    BreadthFirst,
}

#[derive(Debug, Clone)]
pub struct PathSolver {
    // Never empty, the first cell is the start.
    path: Vec<Cartesian2DCoordinate>,
    goal: Cartesian2DCoordinate,
    finished: bool,
}

impl PathSolver {
    pub fn new(start: Cartesian2DCoordinate, goal: Cartesian2DCoordinate) -> PathSolver {
        PathSolver {
            path: vec![start],
            goal,
            finished: false,
        }
    }

    /// A solver from the grid's start corner to its goal corner.
    pub fn for_grid<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> PathSolver {
        PathSolver::new(grid.start(), grid.goal())
    }

    #[inline]
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    /// The cell at the end of the path.
    #[inline]
    pub fn frontier(&self) -> Cartesian2DCoordinate {
        self.path[self.path.len() - 1]
    }

    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.goal
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn state(&self) -> SolverState {
        if self.finished {
            SolverState::Solved
        } else {
            SolverState::Exploring
        }
    }

    pub fn step<GridIndexType: IndexType>(&mut self,
                                          grid: &mut Grid<GridIndexType>,
                                          strategy: SolveStrategy)
                                          -> SolverState {
        match strategy {
            SolveStrategy::Guided { show_checked } => self.guided_step(grid, show_checked),
            SolveStrategy::DepthFirst => self.depth_first_step(grid),
            SolveStrategy::BreadthFirst => self.breadth_first_step(grid),
        }
    }

    /// Step with the shortcut that a corridor, a single way forward, is entered without a flood
    /// fill.
    pub fn guided_step<GridIndexType: IndexType>(&mut self,
                                                 grid: &mut Grid<GridIndexType>,
                                                 show_checked: bool)
                                                 -> SolverState {
        let candidates = match self.ways_forward(grid) {
            Ok(candidates) => candidates,
            Err(state) => return state,
        };

        if candidates.len() == 1 {
            self.advance(grid, candidates[0]);
            return SolverState::Exploring;
        }

        let frontier = self.frontier();
        for candidate in candidates {
            let reach = reachable_set(grid, candidate, &[frontier]);
            if show_checked {
                mark_checked(grid, &reach[..1]);
            }
            if reach.contains(&self.goal) {
                self.advance(grid, candidate);
                break;
            }
        }

        SolverState::Exploring
    }

    pub fn depth_first_step<GridIndexType: IndexType>(&mut self,
                                                      grid: &mut Grid<GridIndexType>)
                                                      -> SolverState {
        self.explore_step(grid, true)
    }

    pub fn breadth_first_step<GridIndexType: IndexType>(&mut self,
                                                        grid: &mut Grid<GridIndexType>)
                                                        -> SolverState {
        self.explore_step(grid, false)
    }

    /// Step until solved. Returns the number of steps taken, or None if a step made no progress,
    /// which only happens when the goal cannot be reached from the path.
    pub fn solve_to_completion<GridIndexType: IndexType>(&mut self,
                                                         grid: &mut Grid<GridIndexType>,
                                                         strategy: SolveStrategy)
                                                         -> Option<usize> {
        let mut steps = 0;
        while !self.finished {
            let path_length = self.path.len();
            self.step(grid, strategy);
            steps += 1;
            if !self.finished && self.path.len() == path_length {
                warn!("Solver stuck at {:?} after {} steps, the goal {:?} is unreachable",
                      self.frontier(), steps, self.goal);
                return None;
            }
        }
        Some(steps)
    }

    fn explore_step<GridIndexType: IndexType>(&mut self,
                                              grid: &mut Grid<GridIndexType>,
                                              stop_at_goal_way: bool)
                                              -> SolverState {
        let candidates = match self.ways_forward(grid) {
            Ok(candidates) => candidates,
            Err(state) => return state,
        };

        let frontier = self.frontier();
        let mut next = None;
        for candidate in candidates {
            let reach = reachable_set(grid, candidate, &[frontier]);
            if next.is_none() && reach.contains(&self.goal) {
                next = Some(candidate);
                if stop_at_goal_way {
                    break;
                }
            } else {
                debug!("Dead end of {} cells at {:?}", reach.len(), candidate);
                mark_checked(grid, &reach);
                mark_checked(grid, &[frontier]);
            }
        }

        if let Some(candidate) = next {
            self.advance(grid, candidate);
        }
        SolverState::Exploring
    }

    // The adjacent cells other than the one the path came from, or the state to report when there
    // is nothing left to explore.
    fn ways_forward<GridIndexType: IndexType>(&mut self,
                                              grid: &mut Grid<GridIndexType>)
                                              -> Result<CoordinateSmallVec, SolverState> {
        if self.finished {
            return Err(SolverState::Solved);
        }

        let frontier = self.frontier();
        if frontier == self.goal {
            for coord in &self.path {
                if let Some(state) = grid.cell_mut(*coord) {
                    state.on_path = true;
                }
            }
            self.finished = true;
            info!("Solved: {} cells from {:?} to {:?}", self.path.len(), self.path[0], self.goal);
            return Err(SolverState::Solved);
        }

        let predecessor = self.path.len().checked_sub(2).map(|index| self.path[index]);
        Ok(grid.adjacent(frontier)
            .into_iter()
            .filter(|coord| Some(*coord) != predecessor)
            .collect())
    }

    fn advance<GridIndexType: IndexType>(&mut self,
                                         grid: &mut Grid<GridIndexType>,
                                         next: Cartesian2DCoordinate) {
        mark_checked(grid, &[next]);
        self.path.push(next);
    }
}

fn mark_checked<GridIndexType: IndexType>(grid: &mut Grid<GridIndexType>,
                                          coords: &[Cartesian2DCoordinate]) {
    for coord in coords {
        if let Some(state) = grid.cell_mut(*coord) {
            state.checked = true;
        }
    }
}


#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::generators::randomized_kruskal;
    use crate::grids::{large_rect_grid, small_rect_grid, LargeRectangularGrid,
                       SmallRectangularGrid};
    use crate::pathing::{shortest_path, Distances};
    use crate::units::{ColumnLength, RowLength};

    const ALL_STRATEGIES: [SolveStrategy; 4] = [SolveStrategy::Guided { show_checked: false },
                                                SolveStrategy::Guided { show_checked: true },
                                                SolveStrategy::DepthFirst,
                                                SolveStrategy::BreadthFirst];

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    // Start, down the left column, then along the bottom row to the goal. The top right cell is a
    // one cell dead end off the start.
    fn l_shaped_maze() -> SmallRectangularGrid {
        let mut g = small_rect_grid(RowLength(2), ColumnLength(2)).unwrap();
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(0, 0), gc(0, 1)).unwrap();
        g.link(gc(0, 1), gc(1, 1)).unwrap();
        g
    }

    // A 3x3 maze with a junction at the start: east leads to a two cell dead end, south to the goal.
    //
    //  S - x - x
    //  |
    //  x - x - x
    //          |
    //  x - x - E
    fn junction_maze() -> SmallRectangularGrid {
        let mut g = small_rect_grid(RowLength(3), ColumnLength(3)).unwrap();
        for &(a, b) in &[(gc(0, 0), gc(1, 0)), (gc(1, 0), gc(2, 0)), (gc(0, 0), gc(0, 1)),
                         (gc(0, 1), gc(1, 1)), (gc(1, 1), gc(2, 1)), (gc(2, 1), gc(2, 2)),
                         (gc(2, 2), gc(1, 2)), (gc(1, 2), gc(0, 2))] {
            g.link(a, b).unwrap();
        }
        g
    }

    fn generated_maze(w: usize, h: usize, seed: u64) -> LargeRectangularGrid {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut g = large_rect_grid(RowLength(w), ColumnLength(h)).unwrap();
        randomized_kruskal(&mut g, &mut rng);
        g
    }

    #[test]
    fn guided_solver_walks_the_l() {
        let mut g = l_shaped_maze();
        let mut solver = PathSolver::for_grid(&g);
        assert_eq!(solver.state(), SolverState::Exploring);

        assert_eq!(solver.guided_step(&mut g, false), SolverState::Exploring);
        assert_eq!(solver.frontier(), gc(0, 1));
        assert_eq!(solver.guided_step(&mut g, false), SolverState::Exploring);
        assert_eq!(solver.frontier(), gc(1, 1));
        assert!(!solver.is_finished());

        assert_eq!(solver.guided_step(&mut g, false), SolverState::Solved);
        assert_eq!(solver.path(), &[gc(0, 0), gc(0, 1), gc(1, 1)]);
        let on_path = g.cells().filter(|(_, state)| state.on_path).map(|(c, _)| c).collect::<Vec<_>>();
        assert_eq!(on_path, vec![gc(0, 0), gc(0, 1), gc(1, 1)]);
        assert!(!g.cell(gc(1, 0)).unwrap().checked);
    }

    #[test]
    fn stepping_when_solved_changes_nothing() {
        for strategy in ALL_STRATEGIES.iter() {
            let mut g = l_shaped_maze();
            let mut solver = PathSolver::for_grid(&g);
            assert_eq!(solver.solve_to_completion(&mut g, *strategy), Some(3));

            let path = solver.path().to_vec();
            let cells = g.cells().map(|(_, state)| *state).collect::<Vec<_>>();
            assert_eq!(solver.step(&mut g, *strategy), SolverState::Solved);
            assert_eq!(solver.path(), &path[..]);
            assert_eq!(g.cells().map(|(_, state)| *state).collect::<Vec<_>>(), cells);
        }
    }

    #[test]
    fn guided_solver_marks_considered_ways_when_asked() {
        let mut g = junction_maze();
        let mut solver = PathSolver::for_grid(&g);
        solver.guided_step(&mut g, true);
        assert_eq!(solver.frontier(), gc(0, 1));
        // South is scanned first and leads to the goal, so east is never considered
        assert!(g.cell(gc(0, 1)).unwrap().checked);
        assert!(!g.cell(gc(1, 0)).unwrap().checked);

        let mut g = junction_maze();
        let mut solver = PathSolver::for_grid(&g);
        solver.guided_step(&mut g, false);
        assert!(g.cell(gc(0, 1)).unwrap().checked);
        assert!(!g.cell(gc(1, 0)).unwrap().checked);
    }

    #[test]
    fn explorers_mark_dead_ends() {
        let mut g = junction_maze();
        g.unlink(gc(0, 0), gc(0, 1));
        g.link(gc(1, 0), gc(1, 1)).unwrap();
        // Now the junction is at (1, 0): south leads to the goal, east is a one cell dead end,
        // and east is scanned after south.
        let mut depth_first = PathSolver::for_grid(&g);
        let mut dfs_grid = clone_grid(&g);
        depth_first.depth_first_step(&mut dfs_grid);
        depth_first.depth_first_step(&mut dfs_grid);
        assert_eq!(depth_first.frontier(), gc(1, 1));
        assert!(!dfs_grid.cell(gc(2, 0)).unwrap().checked);

        let mut breadth_first = PathSolver::for_grid(&g);
        let mut bfs_grid = clone_grid(&g);
        breadth_first.breadth_first_step(&mut bfs_grid);
        breadth_first.breadth_first_step(&mut bfs_grid);
        assert_eq!(breadth_first.frontier(), gc(1, 1));
        assert!(bfs_grid.cell(gc(2, 0)).unwrap().checked);
    }

    #[test]
    fn explorers_mark_the_junction_of_a_dead_end() {
        // The start's south neighbour is a dead end, the goal is east then south.
        let mut g = small_rect_grid(RowLength(2), ColumnLength(2)).unwrap();
        g.link(gc(0, 0), gc(0, 1)).unwrap();
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(1, 1)).unwrap();

        for strategy in &[SolveStrategy::DepthFirst, SolveStrategy::BreadthFirst] {
            let mut grid = clone_grid(&g);
            let mut solver = PathSolver::for_grid(&grid);
            assert_eq!(solver.step(&mut grid, *strategy), SolverState::Exploring);
            assert_eq!(solver.frontier(), gc(1, 0));
            assert!(grid.cell(gc(0, 1)).unwrap().checked);
            assert!(grid.cell(gc(0, 0)).unwrap().checked);
        }

        // No dead end met before the way to the goal, the start stays unmarked.
        let mut grid = l_shaped_maze();
        let mut solver = PathSolver::for_grid(&grid);
        solver.depth_first_step(&mut grid);
        assert_eq!(solver.frontier(), gc(0, 1));
        assert!(!grid.cell(gc(0, 0)).unwrap().checked);
        assert!(!grid.cell(gc(1, 0)).unwrap().checked);
    }

    #[test]
    fn unreachable_goal_is_reported() {
        let mut g = l_shaped_maze();
        g.unlink(gc(0, 1), gc(1, 1));
        for strategy in ALL_STRATEGIES.iter() {
            let mut solver = PathSolver::for_grid(&g);
            assert_eq!(solver.solve_to_completion(&mut g, *strategy), None);
            assert!(!solver.is_finished());
        }
    }

    #[test]
    fn single_cell_maze_is_solved_immediately() {
        let mut g = small_rect_grid(RowLength(1), ColumnLength(1)).unwrap();
        let mut solver = PathSolver::for_grid(&g);
        assert_eq!(solver.breadth_first_step(&mut g), SolverState::Solved);
        assert!(g.cell(gc(0, 0)).unwrap().on_path);
    }

    #[test]
    fn quickcheck_all_solvers_find_the_shortest_path() {
        fn prop(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let maze = generated_maze(w, h, seed);
            let distances = Distances::new(&maze, maze.start()).unwrap();
            let expected = shortest_path(&maze, &distances, maze.goal()).unwrap();

            ALL_STRATEGIES.iter().all(|strategy| {
                let mut g = clone_grid(&maze);
                let mut solver = PathSolver::for_grid(&g);
                solver.solve_to_completion(&mut g, *strategy) == Some(expected.len()) &&
                solver.path() == &expected[..] &&
                expected.iter().all(|c| g.cell(*c).map_or(false, |s| s.on_path)) &&
                expected[1..].iter().all(|c| g.cell(*c).map_or(false, |s| s.checked)) &&
                g.cells().filter(|(_, s)| s.on_path).count() == expected.len()
            })
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }

    fn clone_grid<GridIndexType: IndexType>(g: &Grid<GridIndexType>) -> Grid<GridIndexType> {
        let mut copy = Grid::new(g.dimensions()).unwrap();
        for (a, b) in g.iter_links() {
            copy.link(a, b).unwrap();
        }
        copy
    }
}
