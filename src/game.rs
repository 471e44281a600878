//! The tick and key driven game around a maze: generation, the auto-solver and the player.
//!
//! Input is left to the caller, which feeds `on_tick` and `on_key` and reads the grid back through
//! the query methods. `Display` draws the current frame.

use std::fmt;
use std::str::FromStr;

use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::edges::Edge;
use crate::errors::{Error, ErrorKind, Result};
use crate::generators::{build_grid, KruskalGenerator};
use crate::grid::IndexType;
use crate::grid_displays::render_maze;
use crate::grid_dimensions::RectGridDimensions;
use crate::grids::LargeRectangularGrid;
use crate::solvers::{PathSolver, SolveStrategy, SolverState};
use crate::units::{ColumnLength, EdgesCount, NodesCount, RowLength};
use crate::utils;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum AutoSolveMode {
    None,
    DepthFirst,
    BreadthFirst,
    Optimized,
}

impl AutoSolveMode {
    /// The solver strategy run once per tick, None when the player solves the maze.
    pub fn strategy(self) -> Option<SolveStrategy> {
        match self {
            AutoSolveMode::None => None,
            AutoSolveMode::DepthFirst => Some(SolveStrategy::DepthFirst),
            AutoSolveMode::BreadthFirst => Some(SolveStrategy::BreadthFirst),
            AutoSolveMode::Optimized => Some(SolveStrategy::Guided { show_checked: true }),
        }
    }
}

impl Default for AutoSolveMode {
    fn default() -> AutoSolveMode {
        AutoSolveMode::None
    }
}

impl FromStr for AutoSolveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<AutoSolveMode> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(AutoSolveMode::None),
            "d" | "depth-first" => Ok(AutoSolveMode::DepthFirst),
            "b" | "breadth-first" => Ok(AutoSolveMode::BreadthFirst),
            "o" | "optimized" => Ok(AutoSolveMode::Optimized),
            _ => Err(ErrorKind::UnknownAutoSolveMode(s.to_string()).into()),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GameConfig {
    dimensions: RectGridDimensions,
    incremental_generation: bool,
    auto_solve: AutoSolveMode,
    seed: Option<u64>,
}

impl GameConfig {
    /// Fails on a zero width or height, or a maze too big for the game's grid.
    pub fn new(width: usize,
               height: usize,
               incremental_generation: bool,
               auto_solve: AutoSolveMode)
               -> Result<GameConfig> {
        let dimensions = RectGridDimensions::new(RowLength(width), ColumnLength(height))?;

        let (NodesCount(cells), EdgesCount(edges)) = dimensions.graph_size();
        let capacity = <u32 as IndexType>::max().index();
        if cells > capacity || edges > capacity {
            return Err(ErrorKind::GridTooLarge(cells, edges).into());
        }

        Ok(GameConfig {
            dimensions,
            incremental_generation,
            auto_solve,
            seed: None,
        })
    }

    /// Seed the game's random source, making its mazes reproducible.
    pub fn with_seed(self, seed: u64) -> GameConfig {
        GameConfig { seed: Some(seed), ..self }
    }

    #[inline]
    pub fn dimensions(&self) -> RectGridDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.row_length().0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.column_length().0
    }

    #[inline]
    pub fn incremental_generation(&self) -> bool {
        self.incremental_generation
    }

    #[inline]
    pub fn auto_solve(&self) -> AutoSolveMode {
        self.auto_solve
    }

    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GameKey {
    Up,
    Down,
    Left,
    Right,
    Reset,
}

impl GameKey {
    pub fn direction(self) -> Option<CompassPrimary> {
        match self {
            GameKey::Up => Some(CompassPrimary::North),
            GameKey::Down => Some(CompassPrimary::South),
            GameKey::Left => Some(CompassPrimary::West),
            GameKey::Right => Some(CompassPrimary::East),
            GameKey::Reset => None,
        }
    }
}

/// What a tick did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum TickOutcome {
    Generating,
    Solving(SolverState),
    Idle,
}

#[derive(Debug)]
pub struct MazeGame {
    config: GameConfig,
    rng: XorShiftRng,
    grid: LargeRectangularGrid,
    generator: KruskalGenerator,
    solver: PathSolver,
    player: Option<Cartesian2DCoordinate>,
    ticks: u64,
}

impl MazeGame {
    pub fn new(config: GameConfig) -> Result<MazeGame> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = XorShiftRng::seed_from_u64(seed);
        debug!("New {}x{} game, seed {}", config.width(), config.height(), seed);

        let (grid, generator) = generate(&config, &mut rng)?;
        let mut game = MazeGame {
            solver: PathSolver::for_grid(&grid),
            config,
            rng,
            grid,
            generator,
            player: None,
            ticks: 0,
        };
        game.place_player();
        Ok(game)
    }

    /// Throw the current maze away and start over with a new one of the same configuration.
    pub fn reset(&mut self) -> Result<()> {
        let (grid, generator) = generate(&self.config, &mut self.rng)?;
        self.solver = PathSolver::for_grid(&grid);
        self.grid = grid;
        self.generator = generator;
        self.ticks = 0;
        self.place_player();
        debug!("Game reset");
        Ok(())
    }

    /// One generation step while the maze is still being carved, otherwise one step of the
    /// auto-solver if there is one.
    pub fn on_tick(&mut self) -> TickOutcome {
        self.ticks += 1;

        if !self.generator.is_complete() {
            self.generator.step(&mut self.grid);
            return TickOutcome::Generating;
        }

        match self.config.auto_solve.strategy() {
            Some(strategy) => TickOutcome::Solving(self.solver.step(&mut self.grid, strategy)),
            None => TickOutcome::Idle,
        }
    }

    /// Reset, or move the player. Moves into a wall, moves while the maze is still being carved
    /// and moves after the maze is solved are ignored.
    pub fn on_key(&mut self, key: GameKey) -> Result<()> {
        match key.direction() {
            None => self.reset(),
            Some(direction) => {
                self.move_player(direction);
                Ok(())
            }
        }
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &LargeRectangularGrid {
        &self.grid
    }

    #[inline]
    pub fn dimensions(&self) -> RectGridDimensions {
        self.grid.dimensions()
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.grid.start()
    }

    #[inline]
    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.grid.goal()
    }

    /// Every wall standing between two cells. While the maze is carved this shrinks tick by tick.
    pub fn walls(&self) -> impl Iterator<Item = &Edge> {
        self.generator.walls()
    }

    pub fn walkways(&self) -> &[Edge] {
        self.generator.walkways()
    }

    /// The solver's path from the start, complete once the game is finished.
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        self.solver.path()
    }

    /// Where the player stands, None when the game solves itself.
    #[inline]
    pub fn player(&self) -> Option<Cartesian2DCoordinate> {
        self.player
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.solver.is_finished()
    }

    #[inline]
    pub fn is_generating(&self) -> bool {
        !self.generator.is_complete()
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn place_player(&mut self) {
        self.player = match self.config.auto_solve {
            AutoSolveMode::None => {
                let start = self.grid.start();
                if let Some(state) = self.grid.cell_mut(start) {
                    state.player = true;
                }
                Some(start)
            }
            _ => None,
        };
    }

    fn move_player(&mut self, direction: CompassPrimary) {
        let goal = self.grid.goal();
        let current = match self.player {
            Some(current) if current != goal => current,
            _ => return,
        };
        if self.is_generating() || self.is_finished() {
            return;
        }

        let next = match self.grid.linked_neighbour(current, direction) {
            Some(next) => next,
            None => {
                trace!("Player at {:?} blocked to the {:?}", current, direction);
                return;
            }
        };

        if let Some(state) = self.grid.cell_mut(current) {
            state.player = false;
        }
        if let Some(state) = self.grid.cell_mut(next) {
            state.player = true;
        }
        self.player = Some(next);

        if next == goal {
            info!("Player reached the goal");
            let strategy = SolveStrategy::Guided { show_checked: false };
            if self.solver.solve_to_completion(&mut self.grid, strategy).is_none() {
                warn!("No solution path from {:?} to {:?}", self.grid.start(), goal);
            }
        }
    }
}

impl fmt::Display for MazeGame {
    /// While the maze is carved the grid stays fully linked, so the frame is drawn from the walls
    /// still standing. Afterwards the grid's links are the maze.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_generating() {
            return write!(f, "{}", self.grid);
        }

        let mut walls = utils::fnv_hashset(self.generator.unprocessed_count());
        for wall in self.walls() {
            walls.insert(ordered_pair(wall.from, wall.to));
        }
        write!(f, "{}", render_maze(&self.grid, |a, b| !walls.contains(&ordered_pair(a, b))))
    }
}

fn ordered_pair(a: Cartesian2DCoordinate,
                b: Cartesian2DCoordinate)
                -> (Cartesian2DCoordinate, Cartesian2DCoordinate) {
    if a <= b { (a, b) } else { (b, a) }
}

fn generate(config: &GameConfig,
            rng: &mut XorShiftRng)
            -> Result<(LargeRectangularGrid, KruskalGenerator)> {
    let (mut grid, edges) = build_grid(config.dimensions, rng)?;
    let mut generator = KruskalGenerator::new(&grid, edges);
    if !config.incremental_generation {
        generator.run(&mut grid);
    }
    Ok((grid, generator))
}
