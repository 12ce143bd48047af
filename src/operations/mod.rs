//! Numeric preprocessing and plotting operations.
//!
//! ## Module Organization
//!
//! - [`histogram`] - Histogram binning and per-bin averages
//! - [`regression`] - Least-squares line fitting
//! - [`plotting`] - Plot elements, figures and the chart helpers
//! - [`types`] - Configuration types shared by the helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use plot_helpers::operations::*;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [1.0, 2.9, 5.1, 7.0];
//!
//! let fit = regress(&x, Some(&y))?;
//! let overlay = regression_plot(&x, &y, &fit)?;
//! assert_eq!(overlay.y_regression.len(), 4);
//!
//! let (averages, _figure) = barchart(&x, &y, Some(2))?;
//! assert_eq!(averages.counts, vec![2, 2]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod histogram;
pub mod plotting;
pub mod regression;
pub mod types;

pub use histogram::{BinnedAverages, HistogramBins, binned_averages, histogram_bins};
pub use plotting::{
    CategorySource, ColorMap, Figure, RegressionOverlay, barchart, barplot, histplot,
    labelled_scatter, piechart, point_cloud, regression_plot, scatter_matrix, scatterplot,
    timeseries_plot, timeseries_to_html,
};
pub use regression::{LinearFit, regress};
pub use types::{
    ColorMapConfig, ColorMapPalette, HistogramConfig, PointCloudConfig, ScatterMatrixConfig,
    TimeSeriesConfig,
};
