use docopt::Docopt;
use error_chain::bail;
use log::debug;
use maze_game::{
    game::{AutoSolveMode, GameConfig, GameKey, MazeGame, TickOutcome},
    pathing,
    solvers::SolverState,
    units::{EdgesCount, NodesCount},
};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze Game

Usage:
    maze_game -h | --help
    maze_game [--width=<w>] [--height=<h>] [--incremental] [--auto-solve=<mode>] [--seed=<n>] [--show-steps] [--text-out=<path>]
    maze_game play [--width=<w>] [--height=<h>] [--incremental] [--seed=<n>]

Options:
    -h --help              Show this screen.
    --width=<w>            The maze width in cells [default: 10].
    --height=<h>           The maze height in cells [default: 10].
    --incremental          Carve the maze one edge per tick instead of all at once.
    --auto-solve=<mode>    Solver stepped once per tick: d, b, o or none [default: o].
    --seed=<n>             Seed for the random source, making the maze reproducible.
    --show-steps           Print the maze after every tick, not only the final state.
    --text-out=<path>      Write the final maze to a text file instead of standard output.

The solvers are d (depth first), b (breadth first) and o (optimized guided search).
In play mode every line read from standard input is one tick. The keys w, a, s and d move the
player up, left, down and right, r starts a new maze and q quits.
";
#[derive(Debug, Deserialize)]
struct GameArgs {
    cmd_play: bool,
    flag_width: usize,
    flag_height: usize,
    flag_incremental: bool,
    flag_auto_solve: String,
    flag_seed: Option<u64>,
    flag_show_steps: bool,
    flag_text_out: String,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Game(::maze_game::errors::Error, ::maze_game::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: GameArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let auto_solve = if args.cmd_play {
        AutoSolveMode::None
    } else {
        args.flag_auto_solve.parse::<AutoSolveMode>()?
    };
    let mut config = GameConfig::new(args.flag_width,
                                     args.flag_height,
                                     args.flag_incremental,
                                     auto_solve)?;
    if let Some(seed) = args.flag_seed {
        config = config.with_seed(seed);
    }
    debug!("{:?}", config);

    let mut game = MazeGame::new(config)?;
    if args.cmd_play {
        play(&mut game)
    } else {
        watch(&mut game, &args)
    }
}

/// Tick until the auto-solver is done, or until the maze is carved when there is no solver.
fn watch(game: &mut MazeGame, args: &GameArgs) -> Result<()> {
    let (NodesCount(cells), EdgesCount(edges)) = game.dimensions().graph_size();
    let tick_limit = (cells + edges + 2) as u64;

    loop {
        let outcome = game.on_tick();
        if args.flag_show_steps {
            println!("{}", game);
        }
        match outcome {
            TickOutcome::Generating | TickOutcome::Solving(SolverState::Exploring) => {
                if game.ticks() > tick_limit {
                    bail!("no solution after {} ticks", game.ticks());
                }
            }
            TickOutcome::Solving(SolverState::Solved) | TickOutcome::Idle => break,
        }
    }

    let mut report = game.to_string();
    if game.is_finished() {
        report.push_str(&format!("Solved in {} ticks, {} cells from start to goal.\n",
                                 game.ticks(),
                                 game.path().len()));
    } else if let Some(longest) = pathing::dijkstra_longest_path(game.grid()) {
        report.push_str(&format!("Carved in {} ticks, the longest path is {} cells.\n",
                                 game.ticks(),
                                 longest.len()));
    }

    if args.flag_text_out.is_empty() {
        print!("{}", report);
    } else {
        write_text_to_file(&report, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn play(game: &mut MazeGame) -> Result<()> {
    println!("{}", game);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        for key_char in line?.chars() {
            let key = match key_char.to_ascii_lowercase() {
                'w' => GameKey::Up,
                'a' => GameKey::Left,
                's' => GameKey::Down,
                'd' => GameKey::Right,
                'r' => GameKey::Reset,
                'q' => return Ok(()),
                _ => continue,
            };
            game.on_key(key)?;
        }

        game.on_tick();
        println!("{}", game);
        if game.is_finished() {
            println!("Solved! {} cells from start to goal. Press r for a new maze or q to quit.",
                     game.path().len());
        }
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
