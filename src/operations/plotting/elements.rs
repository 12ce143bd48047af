//! Individual plot element implementations.
//!
//! This module contains concrete implementations of the PlotElement trait
//! for the chart kinds the helpers produce.

use ndarray::Array2;
use plotly::common::{ColorScale, ColorScalePalette, Marker, Mode, Position};
use plotly::layout::{Shape, ShapeLayer, ShapeLine, ShapeType};
use plotly::{Bar, HeatMap, Histogram, Pie, Scatter, Scatter3D};

use super::core::*;
use crate::operations::types::ColorMapPalette;
use crate::spans::Span;

/// Scatter markers, optionally coloured per point.
#[derive(Debug, Clone)]
pub struct ScatterPoints {
    x: Vec<f64>,
    y: Vec<f64>,
    style: MarkerStyle,
    point_colors: Option<Vec<String>>,
    metadata: PlotMetadata,
}

impl ScatterPoints {
    /// Markers at `(x[i], y[i])`.
    pub fn new(x: Vec<f64>, y: Vec<f64>, style: MarkerStyle, metadata: PlotMetadata) -> Self {
        Self {
            x,
            y,
            style,
            point_colors: None,
            metadata,
        }
    }

    /// Colour each point individually; overrides the style colour.
    pub fn with_point_colors(mut self, colors: Vec<String>) -> Self {
        self.point_colors = Some(colors);
        self
    }
}

impl PlotElement for ScatterPoints {
    fn data_bounds(&self) -> Option<PlotBounds> {
        PlotBounds::from_points(&self.x, &self.y)
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let marker = match &self.point_colors {
            Some(colors) => Marker::new()
                .size(self.style.size as usize)
                .symbol(self.style.plotly_symbol())
                .color_array(colors.clone()),
            None => self.style.to_plotly_marker(),
        };

        let mut trace = Scatter::new(self.x.clone(), self.y.clone())
            .mode(Mode::Markers)
            .marker(marker);

        trace = match self.metadata.legend_label {
            Some(ref name) => trace.name(name),
            None => trace.show_legend(false),
        };

        vec![PlotTrace::Scatter(trace)]
    }
}

/// A connected line series.
#[derive(Debug, Clone)]
pub struct LineSeries {
    x: Vec<f64>,
    y: Vec<f64>,
    style: LineStyle,
    metadata: PlotMetadata,
}

impl LineSeries {
    /// A line through `(x[i], y[i])` in order.
    pub fn new(x: Vec<f64>, y: Vec<f64>, style: LineStyle, metadata: PlotMetadata) -> Self {
        Self {
            x,
            y,
            style,
            metadata,
        }
    }
}

impl PlotElement for LineSeries {
    fn data_bounds(&self) -> Option<PlotBounds> {
        PlotBounds::from_points(&self.x, &self.y)
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let mut trace = Scatter::new(self.x.clone(), self.y.clone())
            .mode(Mode::Lines)
            .line(self.style.to_plotly_line());

        if let Some(ref name) = self.metadata.legend_label {
            trace = trace.name(name);
        }

        vec![PlotTrace::Scatter(trace)]
    }
}

/// A series drawn with per-point text labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSeries {
    /// Trace name.
    pub name: String,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// One label per point, or empty for none.
    pub text: Vec<String>,
    /// Connect the points with lines.
    pub show_lines: bool,
    /// Draw a marker at each point.
    pub show_markers: bool,
    /// Put labels above the points instead of below.
    pub text_above: bool,
}

impl LabelledSeries {
    /// A series drawn with lines, markers and labels above the points.
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>, text: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            text,
            show_lines: true,
            show_markers: true,
            text_above: true,
        }
    }

    /// Plotly drawing mode for the enabled parts.
    pub const fn mode(&self) -> Mode {
        match (self.show_lines, self.show_markers) {
            (true, true) => Mode::LinesMarkersText,
            (true, false) => Mode::LinesText,
            (false, true) => Mode::MarkersText,
            (false, false) => Mode::Text,
        }
    }
}

/// Plot element wrapping a [`LabelledSeries`].
#[derive(Debug, Clone)]
pub struct TextScatter {
    series: LabelledSeries,
    metadata: PlotMetadata,
}

impl TextScatter {
    /// Wrap a series; its name becomes the legend label.
    pub fn new(series: LabelledSeries) -> Self {
        let metadata = PlotMetadata::labelled(series.name.clone());
        Self { series, metadata }
    }
}

impl PlotElement for TextScatter {
    fn data_bounds(&self) -> Option<PlotBounds> {
        PlotBounds::from_points(&self.series.x, &self.series.y)
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let position = if self.series.text_above {
            Position::TopCenter
        } else {
            Position::BottomCenter
        };
        let trace = Scatter::new(self.series.x.clone(), self.series.y.clone())
            .mode(self.series.mode())
            .name(&self.series.name)
            .text_array(self.series.text.clone())
            .text_position(position);

        vec![PlotTrace::Scatter(trace)]
    }
}

/// Bars at categorical positions.
#[derive(Debug, Clone)]
pub struct BarSeries {
    labels: Vec<String>,
    values: Vec<f64>,
    color: String,
    metadata: PlotMetadata,
}

impl BarSeries {
    /// One bar of height `values[i]` at each label.
    pub fn new(labels: Vec<String>, values: Vec<f64>, color: &str, metadata: PlotMetadata) -> Self {
        Self {
            labels,
            values,
            color: color.to_string(),
            metadata,
        }
    }

    /// Bar labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Bar heights.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl PlotElement for BarSeries {
    fn data_bounds(&self) -> Option<PlotBounds> {
        let (y_min, y_max) = crate::utils::finite_min_max(&self.values)?;
        Some(PlotBounds::new(
            0.0,
            self.values.len() as f64,
            y_min.min(0.0),
            y_max.max(0.0),
        ))
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let mut trace = Bar::new(self.labels.clone(), self.values.clone())
            .marker(Marker::new().color(self.color.clone()));

        if let Some(ref name) = self.metadata.legend_label {
            trace = trace.name(name);
        }

        vec![PlotTrace::Bar(trace)]
    }
}

/// Histogram of raw values, binned by plotly.
#[derive(Debug, Clone)]
pub struct HistogramBars {
    values: Vec<f64>,
    color: String,
    metadata: PlotMetadata,
}

impl HistogramBars {
    /// Histogram of `values` with plotly's automatic binning.
    pub fn new(values: Vec<f64>, color: &str) -> Self {
        Self {
            values,
            color: color.to_string(),
            metadata: PlotMetadata::default(),
        }
    }
}

impl PlotElement for HistogramBars {
    fn data_bounds(&self) -> Option<PlotBounds> {
        let (x_min, x_max) = crate::utils::finite_min_max(&self.values)?;
        Some(PlotBounds::new(x_min, x_max, 0.0, self.values.len() as f64))
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let trace = Histogram::new(self.values.clone())
            .marker(Marker::new().color(self.color.clone()))
            .show_legend(false);

        vec![PlotTrace::Histogram(trace)]
    }
}

/// Pie chart slices.
#[derive(Debug, Clone)]
pub struct PieSlices {
    labels: Vec<String>,
    values: Vec<f64>,
    metadata: PlotMetadata,
}

impl PieSlices {
    /// One slice per label, sized by `values`.
    pub fn new(labels: Vec<String>, values: Vec<f64>, metadata: PlotMetadata) -> Self {
        Self {
            labels,
            values,
            metadata,
        }
    }

    /// Slice labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl PlotElement for PieSlices {
    fn data_bounds(&self) -> Option<PlotBounds> {
        None
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let labels: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        let mut trace = Pie::new(self.values.clone()).labels(labels);

        if let Some(ref name) = self.metadata.title {
            trace = trace.name(name);
        }

        vec![PlotTrace::Pie(trace)]
    }
}

impl ColorMapPalette {
    /// The plotly colour scale for this palette. `Bone` is drawn as `Greys`.
    pub const fn to_plotly_colorscale(self) -> ColorScale {
        let palette = match self {
            ColorMapPalette::Bone => ColorScalePalette::Greys,
            ColorMapPalette::Hot => ColorScalePalette::Hot,
            ColorMapPalette::Greens => ColorScalePalette::Greens,
            ColorMapPalette::Blues => ColorScalePalette::Blues,
            ColorMapPalette::Viridis => ColorScalePalette::Viridis,
        };
        ColorScale::Palette(palette)
    }
}

/// Heatmap of a matrix; row 0 is drawn at the top.
#[derive(Debug, Clone)]
pub struct MatrixHeatmap {
    matrix: Array2<f64>,
    palette: ColorMapPalette,
    metadata: PlotMetadata,
}

impl MatrixHeatmap {
    /// `matrix` values are expected to be already clamped to the colour range.
    pub fn new(matrix: Array2<f64>, palette: ColorMapPalette, metadata: PlotMetadata) -> Self {
        Self {
            matrix,
            palette,
            metadata,
        }
    }

    /// Rows of the matrix, top row first.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.matrix.outer_iter().map(|row| row.to_vec()).collect()
    }
}

impl PlotElement for MatrixHeatmap {
    fn data_bounds(&self) -> Option<PlotBounds> {
        let (rows, cols) = self.matrix.dim();
        Some(PlotBounds::new(0.0, cols as f64, 0.0, rows as f64))
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let (rows, cols) = self.matrix.dim();
        let x: Vec<f64> = (0..cols).map(|c| c as f64).collect();
        // Plotly draws row 0 at the bottom; label rows so the first one ends on top.
        let y: Vec<f64> = (0..rows).map(|r| (rows - 1 - r) as f64).collect();

        let mut heatmap = HeatMap::new_z(self.rows())
            .x(x)
            .y(y)
            .color_scale(self.palette.to_plotly_colorscale());

        if let Some(ref title) = self.metadata.title {
            heatmap = heatmap.name(title);
        }

        vec![PlotTrace::HeatMap(heatmap)]
    }
}

/// Markers in 3-D space.
#[derive(Debug, Clone)]
pub struct PointCloud3D {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    style: MarkerStyle,
    metadata: PlotMetadata,
}

impl PointCloud3D {
    /// Markers at `(x[i], y[i], z[i])`.
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>, style: MarkerStyle) -> Self {
        Self {
            x,
            y,
            z,
            style,
            metadata: PlotMetadata::default(),
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl PlotElement for PointCloud3D {
    fn data_bounds(&self) -> Option<PlotBounds> {
        None
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        let trace = Scatter3D::new(self.x.clone(), self.y.clone(), self.z.clone())
            .mode(Mode::Markers)
            .marker(self.style.to_plotly_marker());

        vec![PlotTrace::Scatter3D(trace)]
    }
}

/// Translucent vertical bands marking spans on the x axis.
#[derive(Debug, Clone)]
pub struct SpanHighlights {
    spans: Vec<Span<f64>>,
    color: String,
    opacity: f64,
    metadata: PlotMetadata,
}

impl SpanHighlights {
    /// Bands spanning the full plot height, drawn below the traces.
    pub fn new(spans: Vec<Span<f64>>, color: &str, opacity: f64) -> Self {
        let metadata = PlotMetadata {
            z_order: -10,
            ..PlotMetadata::default()
        };
        Self {
            spans,
            color: color.to_string(),
            opacity,
            metadata,
        }
    }

    /// The highlighted spans.
    pub fn spans(&self) -> &[Span<f64>] {
        &self.spans
    }
}

impl PlotElement for SpanHighlights {
    fn data_bounds(&self) -> Option<PlotBounds> {
        let first = self.spans.first()?;
        let last = self.spans.last()?;
        Some(PlotBounds::new(first.start, last.stop, 0.0, 0.0))
    }

    fn metadata(&self) -> &PlotMetadata {
        &self.metadata
    }

    fn to_plotly_traces(&self) -> Vec<PlotTrace> {
        Vec::new()
    }

    fn layout_shapes(&self) -> Vec<Shape> {
        self.spans
            .iter()
            .map(|span| {
                Shape::new()
                    .shape_type(ShapeType::Rect)
                    .x_ref("x")
                    .y_ref("paper")
                    .x0(span.start)
                    .x1(span.stop)
                    .y0(0.0)
                    .y1(1.0)
                    .fill_color(self.color.clone())
                    .opacity(self.opacity)
                    .layer(ShapeLayer::Below)
                    .line(ShapeLine::new().width(0.0))
            })
            .collect()
    }
}
