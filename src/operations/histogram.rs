//! Histogram binning and per-bin averaging.
//!
//! These are the numeric halves of the histogram and bar-chart helpers; the
//! plotting side lives in [`crate::operations::plotting`].

use serde::{Deserialize, Serialize};

use crate::error::ensure_paired;
use crate::operations::types::HistogramConfig;
use crate::utils::{finite_min_max, format_general};
use crate::{PlotError, PlotResult};

/// Result of [`histogram_bins`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBins {
    /// Lower edge of each bin, ascending.
    pub edges: Vec<f64>,
    /// Number of values in each bin.
    pub counts: Vec<usize>,
    /// Representative bin width, used to pick the label format.
    pub space: f64,
    /// Formatted edges followed by the data maximum (`edges.len() + 1` entries).
    pub edge_labels: Vec<String>,
    /// One display label per bin.
    pub bar_labels: Vec<String>,
}

/// Bin `data` for a histogram.
///
/// Values are placed by bisecting (right) over the lower edges: a value lands
/// in the last bin whose edge is `<=` the value, values below the first edge
/// are dropped, and values beyond the last edge are counted in the last bin.
/// Non-finite values are ignored.
///
/// # Errors
/// - [`PlotError::EmptyInput`] if `data` is empty.
/// - [`PlotError::InvalidParameter`] for an invalid config or no finite data.
/// - [`PlotError::InvalidRange`] if equal-width bins are requested for constant data.
pub fn histogram_bins(data: &[f64], config: &HistogramConfig) -> PlotResult<HistogramBins> {
    if data.is_empty() {
        return Err(PlotError::empty("histogram_bins"));
    }
    config.validate()?;

    let (min, max) = finite_min_max(data)
        .ok_or_else(|| PlotError::invalid_value("data", "contains no finite values"))?;

    let (edges, space) = match &config.edges {
        Some(edges) => {
            let space = match (edges.first(), edges.last()) {
                (Some(first), Some(last)) if edges.len() > 1 => {
                    (last - first) / (edges.len() - 1) as f64
                }
                (Some(first), _) => max - first,
                _ => 0.0,
            };
            (edges.clone(), space)
        }
        None => {
            if max <= min {
                return Err(PlotError::InvalidRange(format!(
                    "cannot split constant data ({min}) into {} bins",
                    config.nbins
                )));
            }
            let space = (max - min) / config.nbins as f64;
            let edges = (0..config.nbins).map(|i| min + i as f64 * space).collect();
            (edges, space)
        }
    };

    let mut counts = vec![0usize; edges.len()];
    for &x in data.iter().filter(|x| x.is_finite()) {
        let slot = edges.partition_point(|e| *e <= x);
        if slot > 0 {
            counts[slot - 1] += 1;
        }
    }

    let edge_labels: Vec<String> = edges
        .iter()
        .chain(std::iter::once(&max))
        .map(|&v| format_edge(v, space))
        .collect();
    let bar_labels = bar_labels(&edge_labels);

    tracing::debug!(bins = edges.len(), space, "binned histogram data");

    Ok(HistogramBins {
        edges,
        counts,
        space,
        edge_labels,
        bar_labels,
    })
}

fn format_edge(value: f64, space: f64) -> String {
    if space < 1.0 || space > 1000.0 {
        format_general(value, 1)
    } else {
        (value.trunc() as i64).to_string()
    }
}

/// Long edge labels are shown alone; short ones as `lo-hi` ranges on two lines.
fn bar_labels(edge_labels: &[String]) -> Vec<String> {
    let bins = edge_labels.len().saturating_sub(1);
    let too_long = edge_labels.len() >= 3
        && edge_labels[1].chars().count() + 1 + edge_labels[2].chars().count() > 10;
    if too_long {
        edge_labels[..bins].to_vec()
    } else {
        edge_labels
            .windows(2)
            .map(|w| format!("{}-<br>{}", w[0], w[1]))
            .collect()
    }
}

/// Result of [`binned_averages`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedAverages {
    /// Bin edges; `edges.len() == counts.len() + 1`.
    pub edges: Vec<f64>,
    /// Number of `x` values in each bin.
    pub counts: Vec<usize>,
    /// Mean of the `y` values whose `x` falls in each bin; `NaN` for empty bins.
    pub averages: Vec<f64>,
}

/// Bin `x` into `numbins` equal-width bins and average the paired `y` values per bin.
///
/// `numbins` defaults to `floor(len^0.75) + 1`. Bin `i` holds
/// `edges[i] <= x < edges[i + 1]`; the final edge is `max(x) + 1` so the
/// maximum is included.
///
/// # Errors
/// - [`PlotError::EmptyInput`] / [`PlotError::LengthMismatch`] on bad pairing.
/// - [`PlotError::InvalidParameter`] if `numbins == 0` or `x` has non-finite values.
pub fn binned_averages(x: &[f64], y: &[f64], numbins: Option<usize>) -> PlotResult<BinnedAverages> {
    ensure_paired("binned_averages", x.len(), y.len())?;

    let numbins = numbins.unwrap_or_else(|| (x.len() as f64).powf(0.75) as usize + 1);
    if numbins == 0 {
        return Err(PlotError::invalid_value("numbins", "must be > 0"));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(PlotError::invalid_value("x", "must be finite"));
    }

    let (min, max) = finite_min_max(x).ok_or_else(|| PlotError::empty("binned_averages"))?;
    let width = (max - min) / numbins as f64;

    let mut edges: Vec<f64> = (0..numbins).map(|i| min + i as f64 * width).collect();
    edges.push(max + 1.0);

    let mut counts = vec![0usize; numbins];
    let mut sums = vec![0.0f64; numbins];
    for (&xv, &yv) in x.iter().zip(y) {
        if let Some(bin) = edges.windows(2).position(|w| xv >= w[0] && xv < w[1]) {
            counts[bin] += 1;
            sums[bin] += yv;
        }
    }

    let empty = counts.iter().filter(|&&c| c == 0).count();
    if empty > 0 {
        tracing::warn!(empty, numbins, "binned averages contain empty bins");
    }

    let averages = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c == 0 { f64::NAN } else { s / c as f64 })
        .collect();

    Ok(BinnedAverages {
        edges,
        counts,
        averages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx_eq::assert_approx_eq;

    #[test]
    fn equal_width_bins_count_every_value() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins = histogram_bins(&data, &HistogramConfig::default()).unwrap();
        assert_eq!(bins.edges, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert_eq!(bins.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(bins.counts.iter().sum::<usize>(), data.len());
        assert_approx_eq!(bins.space, 2.0, 1e-12);
    }

    #[test]
    fn integer_labels_for_moderate_widths() {
        let data = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
        let bins = histogram_bins(&data, &HistogramConfig::default()).unwrap();
        assert_eq!(bins.edge_labels, vec!["0", "10", "20", "30", "40", "50"]);
        assert_eq!(bins.bar_labels[0], "0-<br>10");
        assert_eq!(bins.bar_labels.len(), 5);
    }

    #[test]
    fn general_labels_for_narrow_bins() {
        let data = [0.0, 0.1, 0.4, 0.6];
        let bins = histogram_bins(&data, &HistogramConfig::with_bins(2)).unwrap();
        assert_eq!(bins.edge_labels, vec!["0", "0.3", "0.6"]);
        assert_eq!(bins.counts, vec![2, 2]);
    }

    #[test]
    fn long_labels_use_lower_edges_only() {
        let data = [0.0, 250_000.0, 700_000.0, 1_200_000.0];
        let bins = histogram_bins(&data, &HistogramConfig::with_bins(4)).unwrap();
        assert_eq!(bins.edge_labels[1], "3e+05");
        assert_eq!(bins.edge_labels[4], "1e+06");
        assert_eq!(bins.bar_labels.len(), 4);
        assert_eq!(bins.bar_labels, bins.edge_labels[..4].to_vec());
    }

    #[test]
    fn explicit_edges_drop_values_below_first_edge() {
        let data = [-5.0, 1.0, 2.5, 3.0, 99.0];
        let bins = histogram_bins(&data, &HistogramConfig::with_edges(vec![0.0, 2.0, 4.0])).unwrap();
        assert_eq!(bins.counts, vec![1, 2, 1]);
    }

    #[test]
    fn constant_data_cannot_be_split() {
        let err = histogram_bins(&[3.0, 3.0], &HistogramConfig::default()).unwrap_err();
        assert!(matches!(err, PlotError::InvalidRange(_)));
        assert!(matches!(
            histogram_bins(&[], &HistogramConfig::default()),
            Err(PlotError::EmptyInput { .. })
        ));
    }

    #[test]
    fn averages_per_bin() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [10.0, 20.0, 30.0, 50.0];
        let result = binned_averages(&x, &y, Some(2)).unwrap();
        assert_eq!(result.edges, vec![0.0, 1.5, 4.0]);
        assert_eq!(result.counts, vec![2, 2]);
        assert_approx_eq!(result.averages[0], 15.0, 1e-12);
        assert_approx_eq!(result.averages[1], 40.0, 1e-12);
    }

    #[test]
    fn default_bin_count_and_empty_bins() {
        let x = [0.0, 0.1, 0.2, 10.0];
        let y = [1.0, 1.0, 1.0, 5.0];
        let result = binned_averages(&x, &y, None).unwrap();
        // floor(4^0.75) + 1
        assert_eq!(result.counts.len(), 3);
        assert_eq!(result.counts, vec![3, 0, 1]);
        assert!(result.averages[1].is_nan());
        assert_approx_eq!(result.averages[2], 5.0, 1e-12);
    }

    #[test]
    fn averages_require_paired_input() {
        assert!(matches!(
            binned_averages(&[1.0, 2.0], &[1.0], None),
            Err(PlotError::LengthMismatch { .. })
        ));
        assert!(binned_averages(&[1.0], &[1.0], Some(0)).is_err());
    }
}
