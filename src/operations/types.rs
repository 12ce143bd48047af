//! Supporting configuration types for the plotting helpers.
//!
//! Every helper that takes more than a couple of knobs has a config struct
//! here. Configs implement `Default` with the conventional settings and a
//! `validate()` that rejects nonsensical values before any work is done.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{PlotError, PlotResult};

/// Histogram binning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    /// Number of equal-width bins when `edges` is not given.
    pub nbins: usize,
    /// Explicit lower bin edges, ascending. Overrides `nbins`.
    pub edges: Option<Vec<f64>>,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            nbins: 5,
            edges: None,
        }
    }
}

impl HistogramConfig {
    /// Equal-width binning with `nbins` bins.
    pub const fn with_bins(nbins: usize) -> Self {
        Self { nbins, edges: None }
    }

    /// Binning with explicit lower edges.
    pub fn with_edges(edges: Vec<f64>) -> Self {
        Self {
            nbins: edges.len(),
            edges: Some(edges),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        match &self.edges {
            Some(edges) => {
                if edges.is_empty() {
                    return Err(PlotError::invalid_value("edges", "must not be empty"));
                }
                if edges.iter().any(|e| !e.is_finite()) {
                    return Err(PlotError::invalid_value("edges", "must be finite"));
                }
                if edges.windows(2).any(|w| w[1] < w[0]) {
                    return Err(PlotError::invalid_value("edges", "must be non-decreasing"));
                }
            }
            None => {
                if self.nbins == 0 {
                    return Err(PlotError::invalid_value("nbins", "must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// Colour scales available for colour maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMapPalette {
    /// Black to white through blue-grey.
    #[default]
    Bone,
    /// Black, red, yellow, white.
    Hot,
    /// White to dark green.
    Greens,
    /// White to dark blue.
    Blues,
    /// Perceptually uniform purple-green-yellow.
    Viridis,
}

/// Configuration for [`ColorMap`](crate::operations::plotting::ColorMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMapConfig {
    /// Value mapped to the bottom of the colour scale. Defaults to the matrix minimum.
    pub vmin: Option<f64>,
    /// Value mapped to the top of the colour scale. Defaults to the matrix maximum.
    pub vmax: Option<f64>,
    /// Colour scale.
    pub palette: ColorMapPalette,
}

impl Default for ColorMapConfig {
    fn default() -> Self {
        Self {
            vmin: None,
            vmax: None,
            palette: ColorMapPalette::Bone,
        }
    }
}

impl ColorMapConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo > hi {
                return Err(PlotError::InvalidRange(format!(
                    "vmin ({lo}) must not exceed vmax ({hi})"
                )));
            }
        }
        if self.vmin.is_some_and(|v| !v.is_finite()) || self.vmax.is_some_and(|v| !v.is_finite())
        {
            return Err(PlotError::invalid_value("vmin/vmax", "must be finite"));
        }
        Ok(())
    }
}

/// Configuration for scatter matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterMatrixConfig {
    /// Marker colours, indexed by `category % colors.len()`.
    pub colors: Vec<String>,
    /// Maximum number of figures produced.
    pub num_plots: usize,
    /// Maximum number of feature columns considered.
    pub num_topics: usize,
    /// Columns shown per figure.
    pub num_columns: usize,
    /// Write each figure as HTML under `data_path`.
    pub save: bool,
    /// Output directory used when `save` is set.
    pub data_path: PathBuf,
    /// Marker size in pixels.
    pub marker_size: f64,
}

impl Default for ScatterMatrixConfig {
    fn default() -> Self {
        Self {
            colors: ["#d62728", "#2ca02c", "#ff7f0e", "#1f77b4"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            num_plots: 4,
            num_topics: 100,
            num_columns: 4,
            save: false,
            data_path: PathBuf::from("data"),
            marker_size: 6.0,
        }
    }
}

impl ScatterMatrixConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        if self.colors.is_empty() {
            return Err(PlotError::invalid_value("colors", "must not be empty"));
        }
        if self.num_plots == 0 {
            return Err(PlotError::invalid_value("num_plots", "must be > 0"));
        }
        if self.num_topics == 0 {
            return Err(PlotError::invalid_value("num_topics", "must be > 0"));
        }
        if self.num_columns == 0 {
            return Err(PlotError::invalid_value("num_columns", "must be > 0"));
        }
        if self.marker_size <= 0.0 {
            return Err(PlotError::invalid_value("marker_size", "must be > 0"));
        }
        Ok(())
    }
}

/// Configuration for 3-D point clouds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloudConfig {
    /// Column positions used for the x, y and z coordinates.
    pub columns: [usize; 3],
    /// Marker size in pixels.
    pub marker_size: f64,
    /// Marker colour.
    pub color: String,
}

impl Default for PointCloudConfig {
    fn default() -> Self {
        Self {
            columns: [0, 1, 2],
            marker_size: 4.0,
            color: "#1f77b4".to_string(),
        }
    }
}

impl PointCloudConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        if self.marker_size <= 0.0 {
            return Err(PlotError::invalid_value("marker_size", "must be > 0"));
        }
        Ok(())
    }
}

/// Configuration for time-series plots with highlighted spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesConfig {
    /// X axis title.
    pub x_title: String,
    /// Y axis title.
    pub y_title: String,
    /// Plot the y axis on a logarithmic scale.
    pub log_y: bool,
    /// Fill colour of highlighted spans.
    pub span_color: String,
    /// Opacity of highlighted spans, in `[0, 1]`.
    pub span_opacity: f64,
}

impl Default for TimeSeriesConfig {
    fn default() -> Self {
        Self {
            x_title: "Date-Time".to_string(),
            y_title: "Monitor Value".to_string(),
            log_y: true,
            span_color: "#d62728".to_string(),
            span_opacity: 0.2,
        }
    }
}

impl TimeSeriesConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> PlotResult<()> {
        if !(0.0..=1.0).contains(&self.span_opacity) {
            return Err(PlotError::invalid_value(
                "span_opacity",
                format!("{} is outside [0, 1]", self.span_opacity),
            ));
        }
        Ok(())
    }
}
