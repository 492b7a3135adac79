use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "starplot",
    version,
    about = "Chart the most-starred GitHub repositories for a language"
)]
pub struct Cli {
    /// Programming language to search for [default: Java]
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Number of repositories to chart, 1-100 [default: 30]
    #[arg(long, short = 'n', value_name = "N")]
    pub per_page: Option<u32>,

    /// Write the chart to a file (.svg or .html) instead of opening it
    #[arg(long, short = 'O', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the chart page but do not launch a browser
    #[arg(long)]
    pub no_open: bool,

    /// API root URL (for GitHub Enterprise) [default: https://api.github.com]
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Output format for the summary printed after rendering
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "STARPLOT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}
