use regraph::regex::ParseError;

const COLOR_START: &str = "\x1b[01;31m";
const COLOR_RESET: &str = "\x1b[m";

pub fn maybe_colorize(s: &str, use_color: bool) -> String {
    if use_color {
        format!("{COLOR_START}{s}{COLOR_RESET}")
    } else {
        s.to_string()
    }
}

/// Error message, the pattern, and a caret under the failing offset.
pub fn render_error(pattern: &str, err: &ParseError, use_color: bool) -> String {
    let caret = maybe_colorize("^", use_color);
    let header = maybe_colorize("error", use_color);
    format!(
        "{header}: {} (code {})\n  {pattern}\n  {:pad$}{caret}",
        err.kind,
        err.code(),
        "",
        pad = err.pos,
    )
}

#[cfg(test)]
mod tests {
    use regraph::regex::parse_regex;

    use super::*;

    #[test]
    fn caret_points_at_offset() {
        let err = parse_regex("ab)").unwrap_err();
        assert_eq!(
            render_error("ab)", &err, false),
            "error: Extra parenthesis (code 9)\n  ab)\n    ^"
        );
    }

    #[test]
    fn colorized_caret() {
        assert_eq!(maybe_colorize("^", true), "\x1b[01;31m^\x1b[m");
    }
}
