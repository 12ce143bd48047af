//! Tests for the plotting elements, figure composition and chart helpers.
//!
//! Figures are checked through the plotly JSON they produce rather than through
//! rendered output.

use serde_json::Value;

use crate::operations::plotting::Figure;
use crate::repr::Table;

mod builder_tests;

/// Parse the plotly JSON of a figure.
pub(crate) fn plot_json(figure: &Figure) -> Value {
    let json = figure.to_json().expect("figure should render");
    serde_json::from_str(&json).expect("plotly output should be valid JSON")
}

/// The `data` array of a rendered figure.
pub(crate) fn traces(figure: &Figure) -> Vec<Value> {
    plot_json(figure)["data"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

/// Five rows of four feature columns plus a trailing `category` column.
pub(crate) fn feature_table() -> Table {
    Table::from_columns(vec![
        ("a".to_string(), vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ("b".to_string(), vec![5.0, 4.0, 3.0, 2.0, 1.0]),
        ("c".to_string(), vec![0.5, 0.1, 0.9, 0.3, 0.7]),
        ("d".to_string(), vec![10.0, 20.0, 10.0, 20.0, 10.0]),
        ("category".to_string(), vec![0.0, 1.0, 2.0, 3.0, 5.0]),
    ])
    .expect("columns have equal length")
}
