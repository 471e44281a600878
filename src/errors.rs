//! Library error types.
//!
//! `error_chain!` creates the `Error`, `ErrorKind`, `ResultExt` and `Result` types. Other modules
//! `use errors::*;` or name the kinds directly.

use error_chain::error_chain;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must both be at least 1",
                    width, height)
        }

        GridTooLarge(cells: usize, edges: usize) {
            description("grid too large for its graph index type")
            display("a grid of {} cells and {} edges exceeds the capacity of its graph index type",
                    cells, edges)
        }

        UnknownAutoSolveMode(token: String) {
            description("unrecognised auto-solve mode")
            display("unrecognised auto-solve mode '{}': expected one of none, d, b or o", token)
        }
    }
}
