use plotters::prelude::*;
use star_search::ChartSeries;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::page::{escape_xml, html_page};

const BAR_COLOR: RGBColor = RGBColor(99, 110, 250);
/// Gap on each side of a bar, in category units
const BAR_GAP: f64 = 0.1;
const TICK_FONT_SIZE: u32 = 13;
const TICK_ANGLE: i32 = 45;

/// Chart dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
        }
    }
}

impl ChartOptions {
    /// Smallest canvas that still leaves room for the caption, axes and rotated labels
    pub const MIN_SIDE: u32 = 200;

    pub fn validate(&self) -> Result<()> {
        if self.width < Self::MIN_SIDE || self.height < Self::MIN_SIDE {
            return Err(ChartError::InvalidOptions(format!(
                "chart must be at least {min}x{min} pixels, got {}x{}",
                self.width,
                self.height,
                min = Self::MIN_SIDE
            )));
        }
        Ok(())
    }
}

/// Pixel rectangle of one bar in the SVG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry {
    pub left: i32,
    pub right: i32,
    /// Top of the bar itself (equals `bottom` for a zero-star bar)
    pub top: i32,
    pub bottom: i32,
    /// Top of the plotting area above this bar; the hover region spans up to here
    pub column_top: i32,
}

impl BarGeometry {
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> i32 {
        (self.left + self.right) / 2
    }
}

/// A rendered chart, ready to display or export
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub title: String,
    pub svg: String,
    pub bars: Vec<BarGeometry>,
}

impl RenderedChart {
    /// Self-contained HTML page embedding the SVG
    pub fn html(&self) -> String {
        html_page(&self.title, &self.svg, self.bars.len())
    }
}

pub fn chart_title(language: &str) -> String {
    format!("Most-Starred {} Projects on GitHub", language)
}

/// Draws one bar per repository: x = repository, y = stars
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, series: &ChartSeries, language: &str) -> Result<RenderedChart> {
        self.options.validate()?;

        let title = chart_title(language);
        let (width, height) = (self.options.width, self.options.height);
        let x_max = series.len().max(1) as f64;
        let y_max = y_axis_max(series.max_stars());
        let label_area = x_label_area_size(series, height);

        let mut svg = String::new();
        let bars = {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&title, ("sans-serif", 28).into_font())
                .margin(20)
                .x_label_area_size(label_area)
                .y_label_area_size(70)
                .build_cartesian_2d(0f64..x_max, 0f64..y_max)
                .map_err(draw_err)?;

            // Tick labels are drawn by the overlay, rotated and linked
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(series.len().max(1))
                .x_label_formatter(&|_| String::new())
                .y_label_formatter(&|y| format_stars(*y))
                .x_desc("Repository")
                .y_desc("Stars")
                .axis_desc_style(("sans-serif", 16).into_font())
                .label_style(("sans-serif", 13).into_font())
                .draw()
                .map_err(draw_err)?;

            chart
                .draw_series(series.stars().iter().enumerate().map(|(i, &stars)| {
                    let x0 = i as f64 + BAR_GAP;
                    let x1 = i as f64 + 1.0 - BAR_GAP;
                    Rectangle::new([(x0, 0.0), (x1, stars as f64)], BAR_COLOR.filled())
                }))
                .map_err(draw_err)?;

            let bars: Vec<BarGeometry> = series
                .stars()
                .iter()
                .enumerate()
                .map(|(i, &stars)| {
                    let (left, top) = chart.backend_coord(&(i as f64 + BAR_GAP, stars as f64));
                    let (right, bottom) = chart.backend_coord(&(i as f64 + 1.0 - BAR_GAP, 0.0));
                    let (_, column_top) = chart.backend_coord(&(i as f64, y_max));
                    BarGeometry {
                        left,
                        right,
                        top,
                        bottom,
                        column_top,
                    }
                })
                .collect();

            root.present().map_err(draw_err)?;
            bars
        };

        let overlay = overlay_group(series, &bars);
        match svg.rfind("</svg>") {
            Some(end) => svg.insert_str(end, &overlay),
            None => return Err(ChartError::Draw("SVG backend produced no document".to_string())),
        }

        debug!(bars = bars.len(), bytes = svg.len(), "rendered chart");
        Ok(RenderedChart { title, svg, bars })
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(ChartOptions::default())
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Headroom above the tallest bar; never a zero-height axis
fn y_axis_max(max_stars: u64) -> f64 {
    ((max_stars as f64) * 1.1).max(1.0)
}

/// Room below the axis for labels rotated 45 degrees plus the axis description
fn x_label_area_size(series: &ChartSeries, height: u32) -> u32 {
    let longest = series
        .labels()
        .iter()
        .map(|l| l.name.chars().count())
        .max()
        .unwrap_or(0) as f64;
    let rotated = longest * (TICK_FONT_SIZE as f64 * 0.6) * 0.71;
    ((rotated as u32) + 48).clamp(60, height / 2)
}

fn format_stars(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}

/// Hover regions and rotated, linked tick labels, one of each per bar
fn overlay_group(series: &ChartSeries, bars: &[BarGeometry]) -> String {
    let mut out = String::from("<g class=\"starplot-overlay\">\n");

    for ((label, stars, hover), bar) in series.iter().zip(bars) {
        let url = escape_xml(&label.url);
        let tooltip = escape_xml(&format!(
            "{}\n{}\nStars: {}",
            label.name,
            hover.replace("<br />", "\n"),
            stars
        ));

        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\"><rect class=\"bar-hover\" data-stars=\"{stars}\" x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"transparent\"><title>{tooltip}</title></rect></a>\n",
            x = bar.left,
            y = bar.column_top,
            w = (bar.right - bar.left).max(1),
            h = (bar.bottom - bar.column_top).max(1),
        ));

        let (tx, ty) = (bar.center_x(), bar.bottom + 8);
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\"><text class=\"tick-label\" x=\"{tx}\" y=\"{ty}\" transform=\"rotate({TICK_ANGLE} {tx} {ty})\" font-family=\"sans-serif\" font-size=\"{TICK_FONT_SIZE}\" fill=\"#2a3f5f\" dominant-baseline=\"middle\">{name}</text></a>\n",
            name = escape_xml(&label.name),
        ));
    }

    out.push_str("</g>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use star_search::extract_series;

    fn sample_series() -> ChartSeries {
        extract_series(&json!({"items": [
            {"name": "guava", "html_url": "https://github.com/google/guava", "owner": {"login": "google"}, "stargazers_count": 50000, "description": "Google core libraries"},
            {"name": "tiny<lib>", "html_url": "https://x/tiny?a=1&b=2", "owner": {"login": "amy"}, "stargazers_count": 1200, "description": null},
            {"name": "fresh", "html_url": "https://x/fresh", "owner": {"login": "bo"}, "stargazers_count": 0, "description": "brand new"}
        ]}))
        .unwrap()
    }

    #[test]
    fn test_one_hover_region_and_label_per_bar() {
        let chart = ChartRenderer::default().render(&sample_series(), "Java").unwrap();

        assert_eq!(chart.bars.len(), 3);
        assert_eq!(chart.svg.matches("class=\"bar-hover\"").count(), 3);
        assert_eq!(chart.svg.matches("class=\"tick-label\"").count(), 3);
        assert_eq!(chart.svg.matches("rotate(45 ").count(), 3);
    }

    #[test]
    fn test_title_contains_language() {
        let chart = ChartRenderer::default().render(&sample_series(), "Java").unwrap();

        assert_eq!(chart.title, "Most-Starred Java Projects on GitHub");
        assert!(chart.svg.contains("Most-Starred Java Projects on GitHub"));
        assert!(chart.svg.contains("Repository"));
        assert!(chart.svg.contains("Stars"));
    }

    #[test]
    fn test_zero_star_bar_has_zero_height() {
        let chart = ChartRenderer::default().render(&sample_series(), "Java").unwrap();

        let fresh = chart.bars[2];
        assert_eq!(fresh.height(), 0);
        assert!(fresh.right > fresh.left);
        assert!(chart.bars[0].height() > chart.bars[1].height());
        assert!(chart.svg.contains("data-stars=\"0\""));
    }

    #[test]
    fn test_bars_follow_series_order() {
        let chart = ChartRenderer::default().render(&sample_series(), "Java").unwrap();

        assert!(chart.bars[0].left < chart.bars[1].left);
        assert!(chart.bars[1].left < chart.bars[2].left);
        let first = chart.svg.find("https://github.com/google/guava").unwrap();
        let last = chart.svg.find("https://x/fresh").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_hover_text_and_labels_are_escaped() {
        let chart = ChartRenderer::default().render(&sample_series(), "Java").unwrap();

        assert!(chart.svg.contains("tiny&lt;lib&gt;"));
        assert!(chart.svg.contains("https://x/tiny?a=1&amp;b=2"));
        assert!(chart.svg.contains("amy\nNo description provided.\nStars: 1200"));
        assert!(!chart.svg.contains("<br />"));
    }

    #[test]
    fn test_empty_series_renders_axes_only() {
        let chart = ChartRenderer::default()
            .render(&ChartSeries::default(), "Haskell")
            .unwrap();

        assert!(chart.bars.is_empty());
        assert!(chart.svg.contains("starplot-overlay"));
        assert_eq!(chart.svg.matches("class=\"bar-hover\"").count(), 0);
    }

    #[test]
    fn test_rejects_tiny_canvas() {
        let renderer = ChartRenderer::new(ChartOptions {
            width: 100,
            height: 700,
        });
        let result = renderer.render(&sample_series(), "Java");
        assert!(matches!(result, Err(ChartError::InvalidOptions(_))));
    }

    #[test]
    fn test_minimum_canvas_bounds() {
        let options = |width, height| ChartOptions { width, height };

        assert!(options(200, 200).validate().is_ok());
        assert!(options(199, 700).validate().is_err());
        assert!(options(1200, 199).validate().is_err());
        assert!(options(0, 0).validate().is_err());
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(950.0), "950");
        assert_eq!(format_stars(12_500.0), "12.5K");
        assert_eq!(format_stars(2_300_000.0), "2.3M");
    }

    #[test]
    fn test_y_axis_never_collapses() {
        assert_eq!(y_axis_max(0), 1.0);
        assert!(y_axis_max(1000) > 1000.0);
    }
}
