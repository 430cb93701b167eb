use std::io::{self, BufRead};

use anyhow::{Context, Result};
use bytes::Bytes;
use regraph::regex::dump::{render_dot, render_tokens, render_tree};
use regraph::regex::{build, tokenize};

use crate::cli::{Config, Format, resolve_use_color};
use crate::output::render_error;

/// Compiles every pattern, printing graphs to stdout and diagnostics to
/// stderr. Returns the process exit code: 0 when all patterns compiled.
pub fn run(cfg: Config) -> Result<i32> {
    let use_color = resolve_use_color(&cfg.color);

    let patterns = if cfg.patterns.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("reading patterns from stdin")?
    } else {
        cfg.patterns.clone()
    };

    let mut failed = false;
    for pattern in &patterns {
        if !compile_one(&cfg, pattern, use_color) {
            failed = true;
        }
    }

    Ok(if failed { 1 } else { 0 })
}

fn compile_one(cfg: &Config, pattern: &str, use_color: bool) -> bool {
    let compiled = tokenize(pattern).and_then(|tokens| {
        if cfg.show_tokens {
            print!("{}", render_tokens(pattern, &tokens));
        }
        build(Bytes::copy_from_slice(pattern.as_bytes()), &tokens)
    });

    match compiled {
        Ok(graph) => {
            match cfg.format {
                Format::Tree => print!("{}", render_tree(&graph)),
                Format::Dot => print!("{}", render_dot(&graph)),
            }
            true
        }
        Err(err) => {
            eprintln!("{}", render_error(pattern, &err, use_color));
            false
        }
    }
}
