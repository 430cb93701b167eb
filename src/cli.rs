use std::io;
use std::io::IsTerminal;

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Tree,
    Dot,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub patterns: Vec<String>,
    pub show_tokens: bool,
    pub format: Format,
    pub color: ColorWhen,
}

pub const USAGE: &str = "usage: regraph [--tokens] [--dot] [--color=always|never|auto] [PATTERN]...";

/// Reads flags and patterns from `args` (program name first). Everything
/// after `--` is a pattern, even if it looks like a flag.
pub fn parse_args(args: Vec<String>) -> Result<Config> {
    let mut cfg = Config {
        patterns: Vec::new(),
        show_tokens: false,
        format: Format::Tree,
        color: ColorWhen::Never,
    };

    let mut rest = args.into_iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--" => {
                cfg.patterns.extend(rest);
                break;
            }
            "--tokens" => cfg.show_tokens = true,
            "--dot" => cfg.format = Format::Dot,
            "--color=always" => cfg.color = ColorWhen::Always,
            "--color=never" => cfg.color = ColorWhen::Never,
            "--color=auto" => cfg.color = ColorWhen::Auto,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ => cfg.patterns.push(arg),
        }
    }

    Ok(cfg)
}

pub fn resolve_use_color(color: &ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stderr().is_terminal(),
    }
}
