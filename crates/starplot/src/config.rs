use crate::cli::Cli;
use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use star_chart::{ChartOptions, ExportFormat, OutputMode};
use star_search::{DEFAULT_BASE_URL, MAX_PER_PAGE};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Per-run settings: defaults, then config files, then `STARPLOT_*` env, then CLI flags
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub language: String,
    pub per_page: u32,
    pub api_url: String,
    pub timeout_secs: u64,
    pub width: u32,
    pub height: u32,
    /// Export path; when unset the chart is displayed
    pub output: Option<PathBuf>,
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        let chart = ChartOptions::default();
        Self {
            language: "Java".to_string(),
            per_page: 30,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            width: chart.width,
            height: chart.height,
            output: None,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                debug!(path = %path.display(), "loading config file");
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("STARPLOT_").ignore(&["config"]));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli: &Cli) {
        if let Some(language) = &cli.language {
            self.language = language.clone();
        }
        if let Some(per_page) = cli.per_page {
            self.per_page = per_page;
        }
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if cli.no_open {
            self.open_browser = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(anyhow!(
                "Language not configured. Set via --language, STARPLOT_LANGUAGE env var, or config file"
            ));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(anyhow!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE,
                self.per_page
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout must be at least 1 second"));
        }
        self.chart_options()
            .validate()
            .map_err(|e| anyhow!("{}", e))?;
        if let Some(path) = &self.output {
            ExportFormat::from_path(path).map_err(|e| anyhow!("{}", e))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        match &self.output {
            Some(path) => OutputMode::Export(path.clone()),
            None => OutputMode::Display {
                open_browser: self.open_browser,
            },
        }
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "starplot").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("starplot").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("starplot")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join("starplot.toml"))
}
