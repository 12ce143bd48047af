//! Core types and traits for the composable plotting system.
//!
//! Plot elements describe *what* to draw as plotly traces (and, for
//! highlighted intervals, layout shapes). A [`Figure`](super::Figure) decides
//! *where* they go.

use plotly::common::{DashType, Font, Line, Marker, MarkerSymbol, Title};
use plotly::layout::{Axis, Layout, Shape};
use plotly::{Bar, HeatMap, Histogram, Pie, Plot, Scatter, Scatter3D};
use serde::{Deserialize, Serialize};

/// Colour cycle used when several series share a panel.
pub const SERIES_COLORS: [&str; 8] = [
    "#1f77b4", // blue
    "#ff7f0e", // orange
    "#2ca02c", // green
    "#d62728", // red
    "#9467bd", // purple
    "#8c564b", // brown
    "#e377c2", // pink
    "#7f7f7f", // gray
];

/// Colour for the `index`-th series, cycling through [`SERIES_COLORS`].
pub const fn series_color(index: usize) -> &'static str {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Bounds for plot data in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotBounds {
    /// Smallest x value.
    pub x_min: f64,
    /// Largest x value.
    pub x_max: f64,
    /// Smallest y value.
    pub y_min: f64,
    /// Largest y value.
    pub y_max: f64,
}

impl PlotBounds {
    /// Create bounds from explicit limits.
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds of paired `x`/`y` samples, ignoring non-finite values.
    pub fn from_points(x: &[f64], y: &[f64]) -> Option<Self> {
        let (x_min, x_max) = crate::utils::finite_min_max(x)?;
        let (y_min, y_max) = crate::utils::finite_min_max(y)?;
        Some(Self::new(x_min, x_max, y_min, y_max))
    }

    /// Grow these bounds to also cover `other`.
    pub fn expand_to_include(&mut self, other: &PlotBounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }

    /// Pad every side by a fixed amount.
    pub fn padded(&self, pad: f64) -> Self {
        Self {
            x_min: self.x_min - pad,
            x_max: self.x_max + pad,
            y_min: self.y_min - pad,
            y_max: self.y_max + pad,
        }
    }
}

/// Metadata about a plot element
#[derive(Debug, Clone, Default)]
pub struct PlotMetadata {
    /// Title used for traces that carry one (pie, heatmap).
    pub title: Option<String>,
    /// Legend entry; `None` keeps the element out of the legend.
    pub legend_label: Option<String>,
    /// Drawing order; higher values are drawn on top.
    pub z_order: i32,
}

impl PlotMetadata {
    /// Metadata with only a legend label set.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            legend_label: Some(label.into()),
            ..Self::default()
        }
    }
}

/// A plotly trace produced by a plot element.
#[derive(Debug)]
pub enum PlotTrace {
    /// Markers, lines or text on 2-D axes.
    Scatter(Box<Scatter<f64, f64>>),
    /// Bars at categorical positions.
    Bar(Box<Bar<String, f64>>),
    /// Histogram binned by plotly.
    Histogram(Box<Histogram<f64>>),
    /// Pie slices.
    Pie(Box<Pie<f64>>),
    /// Matrix heatmap.
    HeatMap(Box<HeatMap<f64, f64, Vec<f64>>>),
    /// Markers in 3-D space.
    Scatter3D(Box<Scatter3D<f64, f64, f64>>),
}

impl PlotTrace {
    /// Short name of the trace kind, as plotly spells it.
    pub const fn kind(&self) -> &'static str {
        match self {
            PlotTrace::Scatter(_) => "scatter",
            PlotTrace::Bar(_) => "bar",
            PlotTrace::Histogram(_) => "histogram",
            PlotTrace::Pie(_) => "pie",
            PlotTrace::HeatMap(_) => "heatmap",
            PlotTrace::Scatter3D(_) => "scatter3d",
        }
    }

    /// Route the trace to the `cell`-th subplot of a grid (0-based).
    ///
    /// Only cartesian traces have axes; pie, heatmap and 3-D traces are returned unchanged.
    pub fn on_cell(self, cell: usize) -> Self {
        if cell == 0 {
            return self;
        }
        let x = format!("x{}", cell + 1);
        let y = format!("y{}", cell + 1);
        match self {
            PlotTrace::Scatter(t) => PlotTrace::Scatter(t.x_axis(&x).y_axis(&y)),
            PlotTrace::Bar(t) => PlotTrace::Bar(t.x_axis(&x).y_axis(&y)),
            PlotTrace::Histogram(t) => PlotTrace::Histogram(t.x_axis(&x).y_axis(&y)),
            other => other,
        }
    }

    /// Add this trace to a plotly Plot
    pub fn add_to_plot(self, plot: &mut Plot) {
        match self {
            PlotTrace::Scatter(trace) => plot.add_trace(trace),
            PlotTrace::Bar(trace) => plot.add_trace(trace),
            PlotTrace::Histogram(trace) => plot.add_trace(trace),
            PlotTrace::Pie(trace) => plot.add_trace(trace),
            PlotTrace::HeatMap(trace) => plot.add_trace(trace),
            PlotTrace::Scatter3D(trace) => plot.add_trace(trace),
        }
    }
}

/// Core trait for all plot elements
pub trait PlotElement: Send + Sync {
    /// Data bounds of this element, if it lives on 2-D cartesian axes.
    fn data_bounds(&self) -> Option<PlotBounds>;

    /// Get metadata about this element
    fn metadata(&self) -> &PlotMetadata;

    /// Generate Plotly traces for this element
    fn to_plotly_traces(&self) -> Vec<PlotTrace>;

    /// Layout shapes drawn behind the traces, such as highlighted spans.
    fn layout_shapes(&self) -> Vec<Shape> {
        Vec::new()
    }

    /// Check if this element should be included in legend
    fn has_legend(&self) -> bool {
        self.metadata().legend_label.is_some()
    }

    /// Get the z-order for layering (higher values drawn on top)
    fn z_order(&self) -> i32 {
        self.metadata().z_order
    }
}

/// How the elements of a figure are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutConfig {
    /// Single panel with all elements overlaid
    #[default]
    Single,
    /// One element per cell, filled row by row
    Grid {
        /// Number of grid rows.
        rows: usize,
        /// Number of grid columns.
        cols: usize,
    },
}

/// Style configuration for line elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Hex colour or CSS colour name.
    pub color: String,
    /// Line width in pixels.
    pub width: f64,
    /// Dash pattern.
    pub style: LineStyleType,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#1f77b4".to_string(),
            width: 2.0,
            style: LineStyleType::Solid,
        }
    }
}

impl LineStyle {
    /// A solid line of the given colour and width.
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            style: LineStyleType::Solid,
        }
    }

    /// Convert to a plotly line.
    pub fn to_plotly_line(&self) -> Line {
        Line::new()
            .color(self.color.clone())
            .width(self.width)
            .dash(match self.style {
                LineStyleType::Solid => DashType::Solid,
                LineStyleType::Dashed => DashType::Dash,
                LineStyleType::Dotted => DashType::Dot,
                LineStyleType::DashDot => DashType::DashDot,
            })
    }
}

/// Line style types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyleType {
    /// Continuous line.
    Solid,
    /// Long dashes.
    Dashed,
    /// Dots.
    Dotted,
    /// Alternating dashes and dots.
    DashDot,
}

/// Style configuration for marker elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Hex colour or CSS colour name.
    pub color: String,
    /// Marker size in pixels.
    pub size: f64,
    /// Marker symbol.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: "#1f77b4".to_string(),
            size: 6.0,
            shape: MarkerShape::Circle,
        }
    }
}

impl MarkerStyle {
    /// Create a marker style.
    pub fn new(color: &str, size: f64, shape: MarkerShape) -> Self {
        Self {
            color: color.to_string(),
            size,
            shape,
        }
    }

    /// The plotly symbol for this shape.
    pub const fn plotly_symbol(&self) -> MarkerSymbol {
        match self.shape {
            MarkerShape::Circle => MarkerSymbol::Circle,
            MarkerShape::Square => MarkerSymbol::Square,
            MarkerShape::Triangle => MarkerSymbol::TriangleUp,
            MarkerShape::Diamond => MarkerSymbol::Diamond,
            MarkerShape::Cross => MarkerSymbol::Cross,
            MarkerShape::Plus => MarkerSymbol::X,
        }
    }

    /// Convert to a plotly marker.
    pub fn to_plotly_marker(&self) -> Marker {
        Marker::new()
            .color(self.color.clone())
            .size(self.size as usize)
            .symbol(self.plotly_symbol())
    }
}

/// Marker shape types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    /// Filled circle.
    Circle,
    /// Filled square.
    Square,
    /// Upward triangle.
    Triangle,
    /// Diamond.
    Diamond,
    /// Plus-shaped cross.
    Cross,
    /// Diagonal cross.
    Plus,
}

/// Theme configuration for plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotTheme {
    /// Paper and plot background colour.
    pub background_color: String,
    /// Grid line colour.
    pub grid_color: String,
    /// Colour of titles, labels and ticks.
    pub text_color: String,
    /// CSS font family.
    pub font_family: String,
    /// Base font size.
    pub font_size: f64,
    /// Figure title font size.
    pub title_font_size: f64,
    /// Axis title font size.
    pub label_font_size: f64,
    /// Tick label font size.
    pub tick_font_size: f64,
    /// Grid line width in pixels.
    pub grid_line_width: f64,
}

impl PlotTheme {
    /// Base plotly layout with this theme's fonts and colours.
    pub fn to_plotly_layout(&self, title: Option<&str>) -> Layout {
        let mut layout = Layout::new()
            .font(
                Font::new()
                    .family(&self.font_family)
                    .size(self.font_size as usize)
                    .color(self.text_color.clone()),
            )
            .paper_background_color(self.background_color.clone())
            .plot_background_color(self.background_color.clone());

        if let Some(title_text) = title {
            layout = layout.title(
                Title::with_text(title_text).font(
                    Font::new()
                        .family(&self.font_family)
                        .size(self.title_font_size as usize)
                        .color(self.text_color.clone()),
                ),
            );
        }

        layout
    }

    /// A themed axis with the given title, optionally with grid lines.
    pub fn create_axis(&self, title: &str, grid: bool) -> Axis {
        Axis::new()
            .title(
                Title::with_text(title).font(
                    Font::new()
                        .family(&self.font_family)
                        .size(self.label_font_size as usize)
                        .color(self.text_color.clone()),
                ),
            )
            .tick_font(
                Font::new()
                    .family(&self.font_family)
                    .size(self.tick_font_size as usize)
                    .color(self.text_color.clone()),
            )
            .grid_color(self.grid_color.clone())
            .grid_width(self.grid_line_width as usize)
            .show_grid(grid)
    }
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            grid_color: "#f0f0f0".to_string(),
            text_color: "#000000".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 14.0,
            title_font_size: 18.0,
            label_font_size: 16.0,
            tick_font_size: 12.0,
            grid_line_width: 1.0,
        }
    }
}

/// Theme variants
impl PlotTheme {
    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self {
            background_color: "#191919".to_string(),
            grid_color: "#3c3c3c".to_string(),
            text_color: "#f0f0f0".to_string(),
            title_font_size: 20.0,
            ..Self::default()
        }
    }

    /// Default theme with fainter grid lines.
    pub fn scientific() -> Self {
        Self {
            grid_color: "#ebebeb".to_string(),
            ..Self::default()
        }
    }

    /// Larger type for presentations and publications
    pub fn high_quality() -> Self {
        Self {
            grid_color: "#f5f5f5".to_string(),
            text_color: "#282828".to_string(),
            font_size: 16.0,
            title_font_size: 22.0,
            label_font_size: 18.0,
            tick_font_size: 14.0,
            ..Self::default()
        }
    }
}
