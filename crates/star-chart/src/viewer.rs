use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ChartError, Result};
use crate::render::RenderedChart;

/// What to do with a rendered chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write an HTML page to the temp dir and, if `open_browser`, launch the system viewer
    Display { open_browser: bool },
    /// Write the chart to a file; format follows the extension
    Export(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Html,
}

impl ExportFormat {
    /// `.svg` exports the bare SVG; `.html`, `.htm` or no extension the HTML page
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(ext) = path.extension() else {
            return Ok(ExportFormat::Html);
        };
        let ext = ext.to_string_lossy();
        if ext.eq_ignore_ascii_case("svg") {
            Ok(ExportFormat::Svg)
        } else if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") {
            Ok(ExportFormat::Html)
        } else {
            Err(ChartError::InvalidOptions(format!(
                "cannot export to `.{}` ({}); use .svg or .html",
                ext,
                path.display()
            )))
        }
    }
}

impl RenderedChart {
    /// Write the chart to `path` in the format implied by its extension
    pub fn export(&self, path: &Path) -> Result<PathBuf> {
        let contents = match ExportFormat::from_path(path)? {
            ExportFormat::Svg => self.svg.clone(),
            ExportFormat::Html => self.html(),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)?;
        info!(path = %path.display(), "chart written");
        Ok(path.to_path_buf())
    }

    /// Write the HTML page to the temp dir and optionally open it
    pub fn display(&self, open_browser: bool) -> Result<PathBuf> {
        let path = std::env::temp_dir().join(display_file_name(&self.title));
        self.export(&path)?;

        if open_browser {
            debug!(path = %path.display(), "opening chart");
            open::that(&path).map_err(|e| ChartError::Open(format!("{}: {}", path.display(), e)))?;
        }
        Ok(path)
    }

    pub fn show(&self, mode: &OutputMode) -> Result<PathBuf> {
        match mode {
            OutputMode::Display { open_browser } => self.display(*open_browser),
            OutputMode::Export(path) => self.export(path),
        }
    }
}

/// `Most-Starred C++ Projects on GitHub` -> `starplot-most-starred-c-projects-on-github.html`
fn display_file_name(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    format!("starplot-{}.html", slug.trim_matches('-'))
}
