// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::box_collection)] // Warns on boxed `Vec`, `String`, etc.
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![deny(missing_docs)] // Documentation is a must for release

//! # plot_helpers
//!
//! Quick-look plotting for numeric data, built on [plotly](https://docs.rs/plotly),
//! plus the span extractor used to highlight intervals on time axes.
//!
//! ## Overview
//!
//! Every helper takes plain slices, an `ndarray` matrix or a [`Table`], validates
//! it, and returns a [`Figure`] value. Figures are independent of each other;
//! nothing is drawn until a figure is rendered to HTML, JSON or a file.
//!
//! - Charts: [`scatterplot`], [`barplot`], [`histplot`], [`barchart`], [`piechart`]
//! - Fitting: [`regress`] and [`regression_plot`]
//! - Matrices and tables: [`ColorMap`], [`scatter_matrix`], [`point_cloud`],
//!   [`labelled_scatter`], [`timeseries_plot`]
//! - Spans: [`extract_spans`], [`extract_spans_with_index`], [`join_spans`]
//!
//! ## Spans
//!
//! A span is an inclusive `[start, stop]` run of consecutive truthy samples.
//! Overlapping spans, or spans sharing a boundary label, are merged.
//!
//! ```rust
//! use plot_helpers::{Span, extract_spans};
//!
//! let spans = extract_spans(&[0, 1, 1, 0, 0, 1, 0]).unwrap();
//! assert_eq!(spans, vec![Span::new(1, 2), Span::new(5, 5)]);
//!
//! let spans = extract_spans(&[true, true, false, true, true]).unwrap();
//! assert_eq!(spans, vec![Span::new(0, 1), Span::new(3, 4)]);
//! ```
//!
//! ## Plotting
//!
//! ```rust
//! use plot_helpers::{TimeSeriesConfig, Table, timeseries_plot};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Table::from_columns(vec![("load".to_string(), vec![1.0, 4.0, 9.0, 2.0])])?;
//! let time = [0.0, 60.0, 120.0, 180.0];
//! let alarm = [false, true, true, false];
//!
//! let figure = timeseries_plot(&table, &time, Some(&alarm[..]), &TimeSeriesConfig::default())?;
//! let html = figure.to_html()?;
//! assert!(html.contains("load"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`PlotResult`]. Invalid input is rejected before
//! anything is drawn; see [`PlotError`] for the variants.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug!` for the numeric steps, `warn!`
//! for recoverable oddities such as empty bins or unsupported output formats).
//! Install any `tracing` subscriber to see them.
//!
//! ## License
//!
//! MIT License

mod error;
pub mod operations;
mod repr;
pub mod spans;
/// Traits for values that can be read as a boolean flag.
pub mod traits;
pub mod utils;

pub use crate::error::{PlotError, PlotResult};
pub use crate::operations::plotting::{
    CategorySource, ColorMap, Figure, LabelledSeries, LayoutConfig, PlotTheme,
    RegressionOverlay, barchart, barplot, histplot, labelled_scatter, piechart, point_cloud,
    regression_plot, scatter_matrix, scatterplot, timeseries_plot, timeseries_to_html,
};
pub use crate::operations::{
    BinnedAverages, ColorMapConfig, ColorMapPalette, HistogramBins, HistogramConfig, LinearFit,
    PointCloudConfig, ScatterMatrixConfig, TimeSeriesConfig, binned_averages, histogram_bins,
    regress,
};
pub use crate::repr::{ColumnRef, Table};
pub use crate::spans::{
    Span, SpanList, extract_spans, extract_spans_with_index, join_spans, spans_to_mask,
};
pub use crate::traits::BoolLike;
