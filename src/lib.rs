//! **maze_game** carves perfect mazes with randomized Kruskal, solves them step by step and wraps
//! both in a tick and key driven game.

pub mod cells;
pub mod edges;
pub mod errors;
pub mod game;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grids;
pub mod pathing;
pub mod solvers;
pub mod units;
mod utils;
