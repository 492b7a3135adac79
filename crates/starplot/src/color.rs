use crate::cli::ColorChoice;
use std::io::IsTerminal;

/// What the process can see about its terminal when deciding on colour
#[derive(Debug, Clone, Copy)]
struct Terminal {
    /// `NO_COLOR` set to a non-empty value (https://no-color.org/)
    no_color: bool,
    stdout_tty: bool,
    stderr_tty: bool,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
        }
    }
}

/// The summary goes to stdout and errors to stderr, so `auto` needs both on a terminal
fn should_colorize(choice: ColorChoice, terminal: Terminal) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !terminal.no_color && terminal.stdout_tty && terminal.stderr_tty,
    }
}

pub fn init(choice: ColorChoice) {
    colored::control::set_override(should_colorize(choice, Terminal::detect()));
}
