//! Helper functions that turn raw data into ready-made figures.
//!
//! Each helper validates its input, builds the plot elements from
//! [`super::elements`] and returns a [`Figure`] (plus any numeric results the
//! caller may want to inspect). Nothing is rendered until the caller asks for
//! it through [`Figure::render_to_file`], [`Figure::show`] or similar.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use num_traits::ToPrimitive;

use super::composer::Figure;
use super::core::*;
use super::elements::*;
use crate::error::ensure_paired;
use crate::operations::histogram::{BinnedAverages, HistogramBins, binned_averages, histogram_bins};
use crate::operations::regression::LinearFit;
use crate::operations::types::{
    ColorMapConfig, HistogramConfig, PointCloudConfig, ScatterMatrixConfig, TimeSeriesConfig,
};
use crate::repr::{ColumnRef, Table};
use crate::spans::{Span, extract_spans_with_index};
use crate::traits::BoolLike;
use crate::utils::{finite_min_max, format_general, format_general_signed, to_f64_vec};
use crate::{PlotError, PlotResult};

/// Point markers of `y` against `x`, both axes padded by one unit.
///
/// # Errors
/// [`PlotError::EmptyInput`], [`PlotError::LengthMismatch`], or
/// [`PlotError::InvalidParameter`] when no value is finite.
pub fn scatterplot<X, Y>(x: &[X], y: &[Y]) -> PlotResult<Figure>
where
    X: ToPrimitive,
    Y: ToPrimitive,
{
    ensure_paired("scatterplot", x.len(), y.len())?;
    let x = to_f64_vec(x, "x")?;
    let y = to_f64_vec(y, "y")?;

    let bounds = PlotBounds::from_points(&x, &y)
        .ok_or_else(|| PlotError::invalid_value("x/y", "contain no finite values"))?
        .padded(1.0);

    let points = ScatterPoints::new(
        x,
        y,
        MarkerStyle::new("blue", 6.0, MarkerShape::Circle),
        PlotMetadata::default(),
    );

    Ok(Figure::new()
        .add_element(points)
        .with_x_range(bounds.x_min, bounds.x_max)
        .with_y_range(bounds.y_min, bounds.y_max))
}

/// One bar per value, placed at the given labels.
///
/// # Errors
/// [`PlotError::EmptyInput`] or [`PlotError::LengthMismatch`] when the labels
/// and values do not pair up.
pub fn barplot<S, T>(labels: &[S], data: &[T]) -> PlotResult<Figure>
where
    S: AsRef<str>,
    T: ToPrimitive,
{
    ensure_paired("barplot", labels.len(), data.len())?;
    let values = to_f64_vec(data, "data")?;
    let labels = labels.iter().map(|l| l.as_ref().to_string()).collect();

    let bars = BarSeries::new(labels, values, series_color(0), PlotMetadata::default());
    Ok(Figure::new().add_element(bars).with_grid(true))
}

/// Histogram of `data` drawn as labelled bars.
///
/// Returns the binning alongside the figure so callers can reuse the counts.
pub fn histplot<T: ToPrimitive>(
    data: &[T],
    config: &HistogramConfig,
) -> PlotResult<(HistogramBins, Figure)> {
    let values = to_f64_vec(data, "data")?;
    let bins = histogram_bins(&values, config)?;

    let counts = bins.counts.iter().map(|&c| c as f64).collect();
    let bars = BarSeries::new(
        bins.bar_labels.clone(),
        counts,
        series_color(0),
        PlotMetadata::default(),
    );

    let figure = Figure::new()
        .add_element(bars)
        .with_grid(true)
        .with_axis_labels("Bin", "Count");
    Ok((bins, figure))
}

/// Average of `y` within equal-width bins of `x`, drawn as bars labelled
/// `0..numbins`.
///
/// Empty bins have a `NaN` average and show as gaps.
pub fn barchart(
    x: &[f64],
    y: &[f64],
    numbins: Option<usize>,
) -> PlotResult<(BinnedAverages, Figure)> {
    let averages = binned_averages(x, y, numbins)?;

    let labels = (0..averages.averages.len()).map(|i| i.to_string()).collect();
    let bars = BarSeries::new(
        labels,
        averages.averages.clone(),
        series_color(0),
        PlotMetadata::default(),
    );

    let figure = Figure::new().add_element(bars).with_grid(true);
    Ok((averages, figure))
}

/// Percentage share of each value, formatted with two decimals (`"25.00%"`).
///
/// Returns `None` when the values do not sum to a positive finite total.
pub fn pie_percentages(values: &[f64]) -> Option<Vec<String>> {
    let total: f64 = values.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(
        values
            .iter()
            .map(|v| format!("{:.2}%", v / total * 100.0))
            .collect(),
    )
}

/// Pie chart of `data` with one slice per label.
///
/// # Errors
/// [`PlotError::LengthMismatch`] / [`PlotError::EmptyInput`] on bad pairing,
/// [`PlotError::InvalidParameter`] for negative or non-finite values.
pub fn piechart<S, T>(labels: &[S], data: &[T]) -> PlotResult<Figure>
where
    S: AsRef<str>,
    T: ToPrimitive,
{
    ensure_paired("piechart", labels.len(), data.len())?;
    let values = to_f64_vec(data, "data")?;
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(PlotError::invalid_value(
            "data",
            "pie values must be finite and non-negative",
        ));
    }
    let labels: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();

    if let Some(shares) = pie_percentages(&values) {
        tracing::trace!(?labels, ?shares, "pie slice shares");
    }

    let slices = PieSlices::new(labels, values, PlotMetadata::default());
    Ok(Figure::new().add_element(slices))
}

/// Output of [`regression_plot`].
#[derive(Debug)]
pub struct RegressionOverlay {
    /// The fitted line evaluated at every `x`.
    pub y_regression: Vec<f64>,
    /// Samples as markers with the fitted line drawn over them.
    pub figure: Figure,
}

/// Legend text for a fitted line, such as `"+2 * x + 1"`.
pub fn fit_label(fit: &LinearFit) -> String {
    format!(
        "{} * x + {}",
        format_general_signed(fit.slope, 2),
        format_general(fit.intercept, 2)
    )
}

/// Overlay a fitted line on the samples it was fitted to.
///
/// # Errors
/// [`PlotError::EmptyInput`] or [`PlotError::LengthMismatch`].
pub fn regression_plot(x: &[f64], y: &[f64], fit: &LinearFit) -> PlotResult<RegressionOverlay> {
    ensure_paired("regression_plot", x.len(), y.len())?;
    let y_regression = fit.predict_all(x);

    let line = LineSeries::new(
        x.to_vec(),
        y_regression.clone(),
        LineStyle::solid("red", 2.0),
        PlotMetadata {
            legend_label: Some(fit_label(fit)),
            z_order: 1,
            ..PlotMetadata::default()
        },
    );
    let samples = ScatterPoints::new(
        x.to_vec(),
        y.to_vec(),
        MarkerStyle::default(),
        PlotMetadata::labelled("Samples"),
    );

    let figure = Figure::new().add_element(samples).add_element(line);
    Ok(RegressionOverlay {
        y_regression,
        figure,
    })
}

/// Heatmap of a numeric matrix with a fixed colour range.
#[derive(Debug, Clone)]
pub struct ColorMap {
    matrix: Array2<f64>,
    vmin: f64,
    vmax: f64,
    config: ColorMapConfig,
}

impl ColorMap {
    /// Build a colour map, resolving the colour range and clamping every
    /// value into it.
    ///
    /// # Errors
    /// - [`PlotError::EmptyInput`] if the matrix has no cells.
    /// - [`PlotError::InvalidParameter`] if the config is invalid or no value is finite.
    /// - [`PlotError::InvalidRange`] if the resolved `vmin` exceeds `vmax`.
    pub fn new(matrix: Array2<f64>, config: ColorMapConfig) -> PlotResult<Self> {
        if matrix.is_empty() {
            return Err(PlotError::empty("ColorMap::new"));
        }
        config.validate()?;

        let data_range = finite_min_max(matrix.iter());
        let (vmin, vmax) = match (config.vmin, config.vmax, data_range) {
            (Some(lo), Some(hi), _) => (lo, hi),
            (lo, hi, Some((min, max))) => (lo.unwrap_or(min), hi.unwrap_or(max)),
            (_, _, None) => {
                return Err(PlotError::invalid_value(
                    "matrix",
                    "contains no finite values",
                ));
            }
        };
        if vmin > vmax {
            return Err(PlotError::InvalidRange(format!(
                "vmin ({vmin}) must not exceed vmax ({vmax})"
            )));
        }

        let matrix = matrix.mapv(|v| if v.is_nan() { v } else { v.clamp(vmin, vmax) });
        tracing::debug!(shape = ?matrix.dim(), vmin, vmax, "built colour map");

        Ok(Self {
            matrix,
            vmin,
            vmax,
            config,
        })
    }

    /// Lower end of the colour range.
    pub const fn vmin(&self) -> f64 {
        self.vmin
    }

    /// Upper end of the colour range.
    pub const fn vmax(&self) -> f64 {
        self.vmax
    }

    /// The clamped matrix.
    pub const fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// The heatmap as a figure.
    pub fn figure(&self) -> Figure {
        let heatmap = MatrixHeatmap::new(
            self.matrix.clone(),
            self.config.palette,
            PlotMetadata::default(),
        );
        Figure::new().add_element(heatmap)
    }

    /// Write a preview file; see [`Figure::show`].
    pub fn show(&self) -> Option<PathBuf> {
        self.figure().show()
    }

    /// Save the heatmap, returning the path written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PlotResult<PathBuf> {
        self.figure().render_to_file(path, true)
    }
}

/// Where the category of each row comes from in [`scatter_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub enum CategorySource {
    /// A column of the table. It is excluded from the plotted features.
    Column(ColumnRef),
    /// One value per row, supplied separately.
    Values(Vec<f64>),
}

impl From<ColumnRef> for CategorySource {
    fn from(column: ColumnRef) -> Self {
        CategorySource::Column(column)
    }
}

impl From<Vec<f64>> for CategorySource {
    fn from(values: Vec<f64>) -> Self {
        CategorySource::Values(values)
    }
}

/// Pairwise scatter plots of the table's columns, coloured by category.
///
/// Feature columns are split into groups of `num_columns`; each group becomes
/// one `n x n` grid figure with histograms on the diagonal and scatter plots
/// of column `c` against column `r` elsewhere. At most `num_plots` figures
/// are produced from at most `num_topics` columns. With `category = None`
/// the last column holds the categories.
///
/// # Errors
/// - [`PlotError::EmptyInput`] for an empty table.
/// - [`PlotError::MissingColumn`] if the category column does not exist.
/// - [`PlotError::LengthMismatch`] if category values do not match the row count.
/// - [`PlotError::InvalidParameter`] for an invalid config or no feature columns.
/// - [`PlotError::Io`] if saving fails.
pub fn scatter_matrix(
    table: &Table,
    category: Option<CategorySource>,
    config: &ScatterMatrixConfig,
) -> PlotResult<Vec<Figure>> {
    config.validate()?;
    if table.is_empty() {
        return Err(PlotError::empty("scatter_matrix"));
    }

    let category = category
        .unwrap_or_else(|| CategorySource::Column(ColumnRef::Position(table.ncols() - 1)));
    let (categories, excluded) = match category {
        CategorySource::Column(column) => {
            let values = table.column(&column)?.to_vec();
            (values, table.position(&column))
        }
        CategorySource::Values(values) => {
            ensure_paired("scatter_matrix", table.nrows(), values.len())?;
            (values, None)
        }
    };

    let features: Vec<usize> = (0..table.ncols())
        .filter(|&c| Some(c) != excluded)
        .take(config.num_topics)
        .collect();
    if features.is_empty() {
        return Err(PlotError::invalid_value(
            "table",
            "has no feature columns besides the category",
        ));
    }

    let point_colors: Vec<String> = categories
        .iter()
        .map(|&c| category_color(c, &config.colors).to_string())
        .collect();

    let mut figures = Vec::new();
    for (group_index, group) in features
        .chunks(config.num_columns)
        .take(config.num_plots)
        .enumerate()
    {
        let first = group_index * config.num_columns;
        let last = first + group.len();
        let figure = scatter_matrix_group(table, group, &point_colors, config)?
            .with_title(&format!("Columns {first}-{last}"));

        if config.save {
            let file_name = format!(
                "scatmat_topics_{first}-{last}_{}x{}.html",
                table.nrows(),
                table.ncols()
            );
            let path = config.data_path.join(file_name);
            figure.render_to_html(&path, true)?;
            tracing::info!(path = %path.display(), "saved scatter matrix");
        }
        figures.push(figure);
    }

    tracing::debug!(
        figures = figures.len(),
        features = features.len(),
        "built scatter matrices"
    );
    Ok(figures)
}

fn category_color(category: f64, colors: &[String]) -> &str {
    let code = if category.is_finite() { category as i64 } else { 0 };
    let slot = code.rem_euclid(colors.len() as i64) as usize;
    &colors[slot]
}

fn scatter_matrix_group(
    table: &Table,
    group: &[usize],
    point_colors: &[String],
    config: &ScatterMatrixConfig,
) -> PlotResult<Figure> {
    let n = group.len();
    let columns: Vec<Vec<f64>> = group
        .iter()
        .map(|&c| table.column(&ColumnRef::Position(c)).map(|col| col.to_vec()))
        .collect::<PlotResult<_>>()?;

    let mut figure = Figure::new()
        .with_layout(LayoutConfig::Grid { rows: n, cols: n })
        .with_size((250 * n as u32, 250 * n as u32))
        .with_legend(false);

    for r in 0..n {
        for c in 0..n {
            if r == c {
                figure = figure.add_element(HistogramBars::new(
                    columns[c].clone(),
                    &config.colors[0],
                ));
            } else {
                let points = ScatterPoints::new(
                    columns[c].clone(),
                    columns[r].clone(),
                    MarkerStyle::new(&config.colors[0], config.marker_size, MarkerShape::Cross),
                    PlotMetadata::default(),
                )
                .with_point_colors(point_colors.to_vec());
                figure = figure.add_element(points);
            }
        }
    }
    Ok(figure)
}

/// 3-D marker scatter of three table columns.
///
/// When any requested column does not exist, the first three columns are used
/// instead.
///
/// # Errors
/// [`PlotError::EmptyInput`] for an empty table, or
/// [`PlotError::InvalidParameter`] if the table has fewer than three columns.
pub fn point_cloud(table: &Table, config: &PointCloudConfig) -> PlotResult<Figure> {
    config.validate()?;
    if table.is_empty() {
        return Err(PlotError::empty("point_cloud"));
    }
    if table.ncols() < 3 {
        return Err(PlotError::invalid_value(
            "table",
            format!("needs at least 3 columns, has {}", table.ncols()),
        ));
    }

    let columns = if config.columns.iter().all(|&c| c < table.ncols()) {
        config.columns
    } else {
        tracing::warn!(
            requested = ?config.columns,
            "point cloud columns not found, using the first three"
        );
        [0, 1, 2]
    };

    let [x, y, z] = columns.map(|c| table.as_array().column(c).to_vec());
    let cloud = PointCloud3D::new(
        x,
        y,
        z,
        MarkerStyle::new(&config.color, config.marker_size, MarkerShape::Circle),
    );
    Ok(Figure::new().add_element(cloud).with_legend(false))
}

/// One trace per series, each with per-point text labels.
///
/// # Errors
/// [`PlotError::EmptyInput`] when there are no series, and
/// [`PlotError::LengthMismatch`] when a series' coordinates or labels do not pair up.
pub fn labelled_scatter(series: Vec<LabelledSeries>) -> PlotResult<Figure> {
    if series.is_empty() {
        return Err(PlotError::empty("labelled_scatter"));
    }

    let mut figure = Figure::new().with_legend(false);
    for s in series {
        ensure_paired("labelled_scatter", s.x.len(), s.y.len())?;
        if !s.text.is_empty() {
            ensure_paired("labelled_scatter", s.x.len(), s.text.len())?;
        }
        figure = figure.add_element(TextScatter::new(s));
    }
    Ok(figure)
}

/// Every table column as a line over `index`, with the spans where `mask`
/// is truthy drawn as translucent bands.
///
/// # Errors
/// - [`PlotError::EmptyInput`] for an empty table.
/// - [`PlotError::LengthMismatch`] if `index` or `mask` does not match the row count.
/// - [`PlotError::InvalidParameter`] for an invalid config.
pub fn timeseries_plot<B: BoolLike>(
    table: &Table,
    index: &[f64],
    mask: Option<&[B]>,
    config: &TimeSeriesConfig,
) -> PlotResult<Figure> {
    config.validate()?;
    if table.is_empty() {
        return Err(PlotError::empty("timeseries_plot"));
    }
    ensure_paired("timeseries_plot", table.nrows(), index.len())?;

    let mut figure = Figure::new()
        .with_axis_labels(&config.x_title, &config.y_title)
        .with_log_y(config.log_y)
        .with_grid(true);

    for (position, name) in table.column_names().iter().enumerate() {
        let values = table.as_array().column(position).to_vec();
        figure = figure.add_element(LineSeries::new(
            index.to_vec(),
            values,
            LineStyle::solid(series_color(position), 1.5),
            PlotMetadata::labelled(name.as_str()),
        ));
    }

    if let Some(mask) = mask {
        let spans: Vec<Span<f64>> = extract_spans_with_index(mask, index)?;
        tracing::debug!(spans = spans.len(), "highlighting masked spans");
        if !spans.is_empty() {
            figure = figure.add_element(SpanHighlights::new(
                spans,
                &config.span_color,
                config.span_opacity,
            ));
        }
    }

    Ok(figure)
}

/// Build a [`timeseries_plot`] and write it to `filename`, returning the path written.
pub fn timeseries_to_html<B: BoolLike, P: AsRef<Path>>(
    table: &Table,
    index: &[f64],
    mask: Option<&[B]>,
    config: &TimeSeriesConfig,
    filename: P,
) -> PlotResult<PathBuf> {
    timeseries_plot(table, index, mask, config)?.render_to_file(filename, true)
}
