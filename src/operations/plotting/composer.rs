//! Figure composition and rendering.
//!
//! A [`Figure`] collects plot elements, arranges them in a single panel or a
//! grid, and hands the result to plotly for rendering. It is the handle every
//! helper returns; there is no global "current figure".

use std::path::{Path, PathBuf};

use plotly::Plot;
use plotly::layout::{AxisRange, AxisType, GridPattern, Layout, LayoutGrid};

use super::core::*;
use crate::{PlotError, PlotResult};

/// A composed plot ready to be rendered.
pub struct Figure {
    elements: Vec<Box<dyn PlotElement>>,
    layout: LayoutConfig,
    theme: PlotTheme,
    title: Option<String>,
    size: (u32, u32),
    axis_labels: Option<(String, String)>,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    log_y: bool,
    grid: bool,
    show_legend: bool,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("elements", &self.elements.len())
            .field("layout", &self.layout)
            .field("title", &self.title)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Figure {
    /// Create an empty figure
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            layout: LayoutConfig::Single,
            theme: PlotTheme::default(),
            title: None,
            size: (900, 600),
            axis_labels: None,
            x_range: None,
            y_range: None,
            log_y: false,
            grid: false,
            show_legend: true,
        }
    }

    /// Add a plot element to the figure
    pub fn add_element(mut self, element: impl PlotElement + 'static) -> Self {
        self.elements.push(Box::new(element));
        self
    }

    /// Set the layout configuration
    pub const fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: PlotTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the overall title
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the output size in pixels
    pub const fn with_size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }

    /// Label the x and y axes of a single-panel figure
    pub fn with_axis_labels(mut self, x: &str, y: &str) -> Self {
        self.axis_labels = Some((x.to_string(), y.to_string()));
        self
    }

    /// Fix the x axis range instead of autoscaling
    pub const fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some((min, max));
        self
    }

    /// Fix the y axis range instead of autoscaling
    pub const fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    /// Use a logarithmic y axis
    pub const fn with_log_y(mut self, log_y: bool) -> Self {
        self.log_y = log_y;
        self
    }

    /// Draw grid lines
    pub const fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Show or hide the legend
    pub const fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Number of elements in the figure
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the figure has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The layout configuration
    pub const fn layout(&self) -> LayoutConfig {
        self.layout
    }

    /// The figure title, if set
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Combined data bounds of every cartesian element
    pub fn data_bounds(&self) -> Option<PlotBounds> {
        self.elements
            .iter()
            .filter_map(|e| e.data_bounds())
            .reduce(|mut acc, b| {
                acc.expand_to_include(&b);
                acc
            })
    }

    /// Gets the display title for the plot, using a default if none is set.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| "Figure".to_string())
    }

    /// Build the plotly plot for this figure.
    ///
    /// # Errors
    /// Returns [`PlotError::Render`] if the figure is empty or a grid is too small
    /// for its elements.
    pub fn to_plotly_plot(&self) -> PlotResult<Plot> {
        if self.elements.is_empty() {
            return Err(PlotError::Render {
                reason: "no plot elements to render".to_string(),
            });
        }

        let mut plot = Plot::new();
        let mut layout = self
            .theme
            .to_plotly_layout(self.title.as_deref())
            .width(self.size.0 as usize)
            .height(self.size.1 as usize)
            .show_legend(self.show_legend);

        match self.layout {
            LayoutConfig::Single => self.create_single_panel_plot(&mut plot, &mut layout),
            LayoutConfig::Grid { rows, cols } => {
                self.create_grid_plot(&mut plot, &mut layout, rows, cols)?
            }
        }

        for element in &self.elements {
            for shape in element.layout_shapes() {
                layout.add_shape(shape);
            }
        }

        plot.set_layout(layout);
        Ok(plot)
    }

    /// Create single panel plot with all elements overlaid
    fn create_single_panel_plot(&self, plot: &mut Plot, layout: &mut Layout) {
        let mut ordered: Vec<&Box<dyn PlotElement>> = self.elements.iter().collect();
        ordered.sort_by_key(|elem| elem.z_order());

        for element in ordered {
            for trace in element.to_plotly_traces() {
                trace.add_to_plot(plot);
            }
        }

        let (x_label, y_label) = self.axis_labels.clone().unwrap_or_default();
        let mut x_axis = self.theme.create_axis(&x_label, self.grid);
        let mut y_axis = self.theme.create_axis(&y_label, self.grid);

        if let Some((lo, hi)) = self.x_range {
            x_axis = x_axis.range(AxisRange::new(lo, hi));
        }
        if let Some((lo, hi)) = self.y_range {
            y_axis = y_axis.range(AxisRange::new(lo, hi));
        }
        if self.log_y {
            y_axis = y_axis.type_(AxisType::Log);
        }

        *layout = layout.clone().x_axis(x_axis).y_axis(y_axis);
    }

    /// Create grid plot, one element per cell in row-major order
    fn create_grid_plot(
        &self,
        plot: &mut Plot,
        layout: &mut Layout,
        rows: usize,
        cols: usize,
    ) -> PlotResult<()> {
        if rows == 0 || cols == 0 {
            return Err(PlotError::Render {
                reason: format!("grid must have at least one cell, got {rows}x{cols}"),
            });
        }
        if self.elements.len() > rows * cols {
            return Err(PlotError::Render {
                reason: format!(
                    "{} elements do not fit a {rows}x{cols} grid",
                    self.elements.len()
                ),
            });
        }

        for (cell, element) in self.elements.iter().enumerate() {
            for trace in element.to_plotly_traces() {
                trace.on_cell(cell).add_to_plot(plot);
            }
        }

        *layout = layout.clone().grid(
            LayoutGrid::new()
                .rows(rows)
                .columns(cols)
                .pattern(GridPattern::Independent),
        );
        Ok(())
    }

    /// Render to a standalone HTML string
    pub fn to_html(&self) -> PlotResult<String> {
        Ok(self.to_plotly_plot()?.to_html())
    }

    /// Render the plot description as plotly JSON
    pub fn to_json(&self) -> PlotResult<String> {
        Ok(self.to_plotly_plot()?.to_json())
    }

    /// Render to an HTML file (interactive)
    pub fn render_to_html<P: AsRef<Path>>(&self, path: P, create_parent: bool) -> PlotResult<()> {
        let path = path.as_ref();
        let html = self.to_html()?;

        if create_parent && let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, html)?;
        tracing::debug!(path = %path.display(), "wrote figure");
        Ok(())
    }

    /// Render to a file, returning the path actually written.
    ///
    /// Only HTML output is supported; any other extension is replaced by `.html`.
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        create_parent: bool,
    ) -> PlotResult<PathBuf> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let target = if ext.eq_ignore_ascii_case("html") {
            path.to_path_buf()
        } else {
            let html_path = path.with_extension("html");
            tracing::warn!(
                requested = %path.display(),
                written = %html_path.display(),
                "only HTML output is supported, writing HTML instead"
            );
            html_path
        };

        self.render_to_html(&target, create_parent)?;
        Ok(target)
    }

    /// Write the figure to a preview file in the system temp directory.
    ///
    /// Failures are logged and reported as `None` rather than returned as errors,
    /// so a headless environment never aborts a pipeline that also plots.
    pub fn show(&self) -> Option<PathBuf> {
        let file_name = format!(
            "plot_helpers_{}_{}.html",
            std::process::id(),
            sanitize(&self.display_title())
        );
        let path = std::env::temp_dir().join(file_name);

        match self.render_to_html(&path, false) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "figure preview written");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "no display available for figure preview");
                None
            }
        }
    }
}

fn sanitize(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
