use approx_eq::assert_approx_eq;
use ndarray::array;

use super::*;
use crate::PlotError;
use crate::operations::plotting::*;
use crate::operations::regression::regress;
use crate::operations::types::*;
use crate::repr::ColumnRef;

#[test]
fn scatterplot_pads_both_axes() {
    let figure = scatterplot(&[1, 2, 3], &[4.0, 5.0, 6.0]).unwrap();
    let json = plot_json(&figure);
    assert_eq!(json["layout"]["xaxis"]["range"][0].as_f64(), Some(0.0));
    assert_eq!(json["layout"]["xaxis"]["range"][1].as_f64(), Some(4.0));
    assert_eq!(json["layout"]["yaxis"]["range"][0].as_f64(), Some(3.0));
    assert_eq!(json["layout"]["yaxis"]["range"][1].as_f64(), Some(7.0));
    assert_eq!(json["data"][0]["mode"], "markers");
}

#[test]
fn scatterplot_rejects_unpaired_input() {
    assert!(matches!(
        scatterplot(&[1.0, 2.0], &[1.0]),
        Err(PlotError::LengthMismatch { .. })
    ));
    assert!(matches!(
        scatterplot::<f64, f64>(&[], &[]),
        Err(PlotError::EmptyInput { .. })
    ));
}

#[test]
fn barplot_uses_labels_as_categories() {
    let figure = barplot(&["north", "south"], &[3u32, 7]).unwrap();
    let data = traces(&figure);
    assert_eq!(data[0]["type"], "bar");
    assert_eq!(data[0]["x"][1], "south");
    assert_eq!(data[0]["y"][1].as_f64(), Some(7.0));
    assert!(barplot(&["only"], &[1.0, 2.0]).is_err());
}

#[test]
fn histplot_labels_bars_with_bin_ranges() {
    let data = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
    let (bins, figure) = histplot(&data, &HistogramConfig::default()).unwrap();
    assert_eq!(bins.counts, vec![1, 1, 1, 1, 2]);

    let trace = &traces(&figure)[0];
    assert_eq!(trace["x"][0], "0-<br>10");
    assert_eq!(trace["y"][4].as_f64(), Some(2.0));
}

#[test]
fn barchart_leaves_gaps_for_empty_bins() {
    let x = [0.0, 0.1, 0.2, 10.0];
    let y = [1.0, 2.0, 3.0, 5.0];
    let (averages, figure) = barchart(&x, &y, Some(3)).unwrap();
    assert_approx_eq!(averages.averages[0], 2.0, 1e-12);
    assert!(averages.averages[1].is_nan());

    let trace = &traces(&figure)[0];
    assert_eq!(trace["x"][2], "2");
    assert!(trace["y"][1].is_null());
}

#[test]
fn pie_shares_use_two_decimals() {
    assert_eq!(
        pie_percentages(&[1.0, 3.0]).unwrap(),
        vec!["25.00%".to_string(), "75.00%".to_string()]
    );
    assert!(pie_percentages(&[0.0, 0.0]).is_none());

    let figure = piechart(&["a", "b"], &[1, 3]).unwrap();
    let trace = &traces(&figure)[0];
    assert_eq!(trace["type"], "pie");
    assert_eq!(trace["labels"][0], "a");
    assert!(piechart(&["a"], &[-1.0]).is_err());
}

#[test]
fn regression_overlay_draws_line_over_samples() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [1.0, 3.0, 5.0, 7.0];
    let fit = regress(&x, Some(&y)).unwrap();
    let overlay = regression_plot(&x, &y, &fit).unwrap();

    assert_eq!(overlay.y_regression.len(), 4);
    assert_approx_eq!(overlay.y_regression[3], 7.0, 1e-9);
    assert_eq!(fit_label(&fit), "+2 * x + 1");

    let data = traces(&overlay.figure);
    assert_eq!(data[0]["name"], "Samples");
    assert_eq!(data[1]["name"], "+2 * x + 1");
    assert_eq!(data[1]["line"]["color"], "red");
}

#[test]
fn regression_label_handles_negative_slopes() {
    let fit = regress(&[3.0, 1.0, -1.0], None).unwrap();
    assert_eq!(fit_label(&fit), "-2 * x + 3");
}

#[test]
fn color_map_defaults_to_data_range() {
    let map = ColorMap::new(array![[1.0, 5.0], [3.0, f64::NAN]], ColorMapConfig::default()).unwrap();
    assert_eq!(map.vmin(), 1.0);
    assert_eq!(map.vmax(), 5.0);
    assert!(map.matrix()[[1, 1]].is_nan());
}

#[test]
fn color_map_clamps_into_explicit_range() {
    let config = ColorMapConfig {
        vmin: Some(0.0),
        vmax: Some(2.0),
        palette: ColorMapPalette::Viridis,
    };
    let map = ColorMap::new(array![[-4.0, 1.0], [2.5, 9.0]], config).unwrap();
    assert_eq!(map.matrix(), &array![[0.0, 1.0], [2.0, 2.0]]);

    let data = traces(&map.figure());
    assert_eq!(data[0]["type"], "heatmap");
}

#[test]
fn color_map_resolves_one_sided_range() {
    let config = ColorMapConfig {
        vmin: Some(2.0),
        ..ColorMapConfig::default()
    };
    let map = ColorMap::new(array![[1.0, 4.0]], config).unwrap();
    assert_eq!((map.vmin(), map.vmax()), (2.0, 4.0));

    let config = ColorMapConfig {
        vmin: Some(10.0),
        ..ColorMapConfig::default()
    };
    assert!(matches!(
        ColorMap::new(array![[1.0, 4.0]], config),
        Err(PlotError::InvalidRange(_))
    ));
}

#[test]
fn color_map_rejects_empty_matrix_and_saves_html() {
    let empty = ndarray::Array2::<f64>::zeros((0, 3));
    assert!(matches!(
        ColorMap::new(empty, ColorMapConfig::default()),
        Err(PlotError::EmptyInput { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let map = ColorMap::new(array![[1.0, 2.0]], ColorMapConfig::default()).unwrap();
    let path = map.save(dir.path().join("map.svg")).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
    assert!(path.exists());
}

#[test]
fn scatter_matrix_grid_has_histograms_on_the_diagonal() {
    let figures = scatter_matrix(&feature_table(), None, &ScatterMatrixConfig::default()).unwrap();
    assert_eq!(figures.len(), 1);
    assert_eq!(figures[0].len(), 16);
    assert_eq!(figures[0].layout(), LayoutConfig::Grid { rows: 4, cols: 4 });

    let data = traces(&figures[0]);
    assert_eq!(data[0]["type"], "histogram");
    assert_eq!(data[1]["type"], "scatter");
    assert_eq!(data[5]["type"], "histogram");
    assert_eq!(data[15]["type"], "histogram");
}

#[test]
fn scatter_matrix_colours_follow_category_modulo_palette() {
    let figures = scatter_matrix(&feature_table(), None, &ScatterMatrixConfig::default()).unwrap();
    let data = traces(&figures[0]);
    let colors = &data[1]["marker"]["color"];
    // categories [0, 1, 2, 3, 5] over four colours
    assert_eq!(colors[0], "#d62728");
    assert_eq!(colors[3], "#1f77b4");
    assert_eq!(colors[4], "#2ca02c");
}

#[test]
fn scatter_matrix_groups_columns_and_limits_figures() {
    let config = ScatterMatrixConfig {
        num_columns: 3,
        ..ScatterMatrixConfig::default()
    };
    let figures = scatter_matrix(&feature_table(), None, &config).unwrap();
    assert_eq!(figures.len(), 2);
    assert_eq!(figures[0].len(), 9);
    assert_eq!(figures[1].len(), 1);
    assert_eq!(figures[1].title(), Some("Columns 3-4"));

    let config = ScatterMatrixConfig {
        num_columns: 1,
        num_plots: 2,
        ..ScatterMatrixConfig::default()
    };
    assert_eq!(scatter_matrix(&feature_table(), None, &config).unwrap().len(), 2);

    let config = ScatterMatrixConfig {
        num_topics: 2,
        ..ScatterMatrixConfig::default()
    };
    let figures = scatter_matrix(&feature_table(), None, &config).unwrap();
    assert_eq!(figures[0].len(), 4);
}

#[test]
fn scatter_matrix_accepts_external_categories() {
    let categories = CategorySource::Values(vec![1.0; 5]);
    let figures =
        scatter_matrix(&feature_table(), Some(categories), &ScatterMatrixConfig::default()).unwrap();
    // All five columns are features now; four fit in the first figure.
    assert_eq!(figures.len(), 2);
    assert_eq!(figures[0].len(), 16);

    let short = CategorySource::Values(vec![1.0; 2]);
    assert!(matches!(
        scatter_matrix(&feature_table(), Some(short), &ScatterMatrixConfig::default()),
        Err(PlotError::LengthMismatch { .. })
    ));

    let missing = CategorySource::from(ColumnRef::from("nope"));
    assert!(matches!(
        scatter_matrix(&feature_table(), Some(missing), &ScatterMatrixConfig::default()),
        Err(PlotError::MissingColumn(_))
    ));
}

#[test]
fn scatter_matrix_saves_each_group() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScatterMatrixConfig {
        save: true,
        num_columns: 2,
        data_path: dir.path().join("out"),
        ..ScatterMatrixConfig::default()
    };
    scatter_matrix(&feature_table(), None, &config).unwrap();
    assert!(dir.path().join("out/scatmat_topics_0-2_5x5.html").exists());
    assert!(dir.path().join("out/scatmat_topics_2-4_5x5.html").exists());
}

#[test]
fn point_cloud_falls_back_to_first_columns() {
    let config = PointCloudConfig {
        columns: [0, 1, 42],
        ..PointCloudConfig::default()
    };
    let figure = point_cloud(&feature_table(), &config).unwrap();
    let trace = &traces(&figure)[0];
    assert_eq!(trace["type"], "scatter3d");
    assert_eq!(trace["z"][0].as_f64(), Some(0.5));

    let config = PointCloudConfig {
        columns: [3, 2, 1],
        ..PointCloudConfig::default()
    };
    let trace = &traces(&point_cloud(&feature_table(), &config).unwrap())[0];
    assert_eq!(trace["x"][1].as_f64(), Some(20.0));

    let narrow = Table::from_columns(vec![
        ("a".to_string(), vec![1.0]),
        ("b".to_string(), vec![2.0]),
    ])
    .unwrap();
    assert!(point_cloud(&narrow, &PointCloudConfig::default()).is_err());
}

#[test]
fn labelled_scatter_hides_the_legend() {
    let mut quiet = LabelledSeries::new("b", vec![3.0], vec![4.0], vec!["q".into()]);
    quiet.text_above = false;
    let series = vec![
        LabelledSeries::new("a", vec![1.0, 2.0], vec![1.0, 2.0], vec!["x".into(), "y".into()]),
        quiet,
    ];
    let figure = labelled_scatter(series).unwrap();
    let json = plot_json(&figure);
    assert_eq!(json["layout"]["showlegend"], false);
    assert_eq!(json["data"][0]["text"][1], "y");
    assert_eq!(json["data"][1]["textposition"], "bottom center");

    assert!(labelled_scatter(Vec::new()).is_err());
    let bad = LabelledSeries::new("c", vec![1.0], vec![1.0], vec!["a".into(), "b".into()]);
    assert!(labelled_scatter(vec![bad]).is_err());
}

fn monitor_table() -> Table {
    Table::from_columns(vec![
        ("cpu".to_string(), vec![1.0, 2.0, 50.0, 60.0, 3.0, 70.0]),
        ("mem".to_string(), vec![5.0, 5.0, 6.0, 6.0, 5.0, 9.0]),
    ])
    .unwrap()
}

#[test]
fn timeseries_highlights_masked_spans() {
    let index = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
    let mask = [false, false, true, true, false, true];
    let figure = timeseries_plot(
        &monitor_table(),
        &index,
        Some(&mask[..]),
        &TimeSeriesConfig::default(),
    )
    .unwrap();

    let json = plot_json(&figure);
    let shapes = json["layout"]["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0]["x0"].as_f64(), Some(12.0));
    assert_eq!(shapes[0]["x1"].as_f64(), Some(13.0));
    assert_eq!(shapes[1]["x0"].as_f64(), Some(15.0));
    assert_eq!(shapes[1]["x1"].as_f64(), Some(15.0));

    assert_eq!(json["layout"]["yaxis"]["type"], "log");
    assert_eq!(json["layout"]["xaxis"]["title"]["text"], "Date-Time");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"][1]["name"], "mem");
}

#[test]
fn timeseries_without_mask_has_no_shapes() {
    let index = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let config = TimeSeriesConfig {
        log_y: false,
        ..TimeSeriesConfig::default()
    };
    let figure = timeseries_plot::<bool>(&monitor_table(), &index, None, &config).unwrap();
    let json = plot_json(&figure);
    assert!(json["layout"].get("shapes").is_none());
    assert!(json["layout"]["yaxis"].get("type").is_none());
}

#[test]
fn timeseries_rejects_mismatched_lengths() {
    let config = TimeSeriesConfig::default();
    assert!(matches!(
        timeseries_plot::<bool>(&monitor_table(), &[0.0, 1.0], None, &config),
        Err(PlotError::LengthMismatch { .. })
    ));

    let index = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let short_mask = [true, false];
    assert!(timeseries_plot(&monitor_table(), &index, Some(&short_mask[..]), &config).is_err());
}

#[test]
fn timeseries_to_html_writes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let index = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let mask = [0.0, 1.0, f64::NAN, 1.0, 1.0, 0.0];
    let path = timeseries_to_html(
        &monitor_table(),
        &index,
        Some(&mask[..]),
        &TimeSeriesConfig::default(),
        dir.path().join("monitor.html"),
    )
    .unwrap();
    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("rect"));
}
