//! Penjualan entry point
//!
//! Parses arguments, runs the command, prints any error to stderr and exits
//! non-zero on failure. Everything else lives in the `cli` module.

use penjualan::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
