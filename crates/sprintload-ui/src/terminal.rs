//! Terminal detection utilities.

use std::env;

/// Returns `true` if stdout is connected to a terminal (TTY).
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Determines if ANSI color codes should be used.
///
/// - `NO_COLOR` (any value) disables color (<https://no-color.org/>)
/// - `CLICOLOR=0` or `TERM=dumb` disables color
/// - `CLICOLOR_FORCE` (any value) forces color even without a TTY
/// - otherwise color follows TTY detection
pub fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("TERM").as_deref() == Ok("dumb") {
        return false;
    }
    if env::var_os("CLICOLOR_FORCE").is_some() {
        return true;
    }
    is_tty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_wins() {
        // NO_COLOR is checked before any TTY probing.
        if env::var_os("NO_COLOR").is_some() {
            assert!(!supports_color());
        }
    }
}
