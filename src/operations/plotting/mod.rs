//! Composable plotting on top of plotly.
//!
//! Helpers build plot elements from raw data and hand back a [`Figure`]. A figure
//! can be rendered to HTML or JSON, written to a file, or previewed. Nothing is
//! shared between figures, so helpers can be called from any thread.
//!
//! # Quick Start
//!
//! ```rust
//! use plot_helpers::operations::plotting::*;
//! use plot_helpers::operations::types::HistogramConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let figure = scatterplot(&[1.0, 2.0, 3.0], &[2.0, 4.0, 8.0])?;
//! assert_eq!(figure.len(), 1);
//!
//! let (bins, histogram) = histplot(&[1, 2, 2, 3, 3, 3, 4], &HistogramConfig::with_bins(3))?;
//! assert_eq!(bins.counts.iter().sum::<usize>(), 7);
//! let html = histogram.to_html()?;
//! assert!(html.contains("plotly"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! - **PlotElement trait**: what to draw, as plotly traces and layout shapes
//! - **Elements**: scatter points, lines, bars, pies, heatmaps, 3-D clouds, span bands
//! - **Figure**: single-panel or grid composition and rendering
//! - **Builders**: one function per chart kind

pub mod builders;
pub mod composer;
pub mod core;
pub mod elements;

// Re-export the main types for easy access
pub use builders::*;
pub use composer::*;
pub use core::*;
pub use elements::*;

#[cfg(test)]
mod tests;
