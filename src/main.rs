mod app;
mod cli;
mod output;

use std::env;
use std::process;

// Usage: regraph [--tokens] [--dot] [--color=WHEN] [PATTERN]...
fn main() {
    let code = match cli::parse_args(env::args().collect()).and_then(app::run) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("regraph: {err:#}");
            2
        }
    };
    process::exit(code);
}
