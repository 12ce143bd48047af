//! Columnar numeric data.
//!
//! [`Table`] is the tabular input accepted by the multi-column helpers
//! (scatter matrices, point clouds, time series). It pairs column names with an
//! `ndarray` matrix laid out as `(rows, columns)`.
//!
//! ```rust
//! use plot_helpers::{ColumnRef, Table};
//!
//! let table = Table::from_columns(vec![
//!     ("x".to_string(), vec![1.0, 2.0, 3.0]),
//!     ("y".to_string(), vec![4.0, 5.0, 6.0]),
//! ])
//! .unwrap();
//!
//! assert_eq!(table.shape(), (3, 2));
//! assert_eq!(table.column(&ColumnRef::from("y")).unwrap().to_vec(), vec![4.0, 5.0, 6.0]);
//! ```

use ndarray::{Array2, ArrayView1, Axis};

use crate::{PlotError, PlotResult};

/// How a column is addressed: by name or by zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Column addressed by its name.
    Name(String),
    /// Column addressed by its position.
    Position(usize),
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ColumnRef {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

/// Named numeric columns stored as a `(rows, columns)` matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Table {
    /// Create a table from column names and a `(rows, columns)` matrix.
    ///
    /// # Errors
    /// Returns [`PlotError::LengthMismatch`] if the number of names differs from
    /// the number of matrix columns.
    pub fn new(columns: Vec<String>, data: Array2<f64>) -> PlotResult<Self> {
        if columns.len() != data.ncols() {
            return Err(PlotError::length_mismatch(
                "Table::new",
                data.ncols(),
                columns.len(),
            ));
        }
        Ok(Self { columns, data })
    }

    /// Create a table with positional names `"0"`, `"1"`, ... for each column.
    pub fn from_array(data: Array2<f64>) -> Self {
        let columns = (0..data.ncols()).map(|i| i.to_string()).collect();
        Self { columns, data }
    }

    /// Create a table from `(name, values)` pairs. All columns must share one length.
    ///
    /// # Errors
    /// - [`PlotError::EmptyInput`] if no columns are given.
    /// - [`PlotError::LengthMismatch`] if the columns differ in length.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> PlotResult<Self> {
        let rows = columns
            .first()
            .map(|(_, values)| values.len())
            .ok_or(PlotError::empty("Table::from_columns"))?;

        let mut names = Vec::with_capacity(columns.len());
        let mut data = Array2::<f64>::zeros((rows, columns.len()));
        for (col, (name, values)) in columns.into_iter().enumerate() {
            if values.len() != rows {
                return Err(PlotError::length_mismatch(
                    "Table::from_columns",
                    rows,
                    values.len(),
                ));
            }
            data.column_mut(col)
                .iter_mut()
                .zip(values)
                .for_each(|(dst, v)| *dst = v);
            names.push(name);
        }

        Ok(Self {
            columns: names,
            data,
        })
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    /// `true` if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying matrix.
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    /// Resolve a column reference to a position, if it exists.
    pub fn position(&self, column: &ColumnRef) -> Option<usize> {
        match column {
            ColumnRef::Name(name) => self.columns.iter().position(|c| c == name),
            ColumnRef::Position(pos) => (*pos < self.columns.len()).then_some(*pos),
        }
    }

    /// Whether the referenced column exists.
    pub fn contains(&self, column: &ColumnRef) -> bool {
        self.position(column).is_some()
    }

    /// A view of one column.
    ///
    /// # Errors
    /// Returns [`PlotError::MissingColumn`] if the column does not exist.
    pub fn column(&self, column: &ColumnRef) -> PlotResult<ArrayView1<'_, f64>> {
        let pos = self
            .position(column)
            .ok_or_else(|| PlotError::MissingColumn(format!("{column:?}")))?;
        Ok(self.data.column(pos))
    }

    /// Name of the column at `position`.
    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.columns.get(position).map(String::as_str)
    }

    /// A new table holding only the columns at `positions`, in that order.
    ///
    /// # Errors
    /// Returns [`PlotError::MissingColumn`] if any position is out of range.
    pub fn select(&self, positions: &[usize]) -> PlotResult<Self> {
        if let Some(bad) = positions.iter().find(|&&p| p >= self.ncols()) {
            return Err(PlotError::MissingColumn(format!("Position({bad})")));
        }
        Ok(Self {
            columns: positions.iter().map(|&p| self.columns[p].clone()).collect(),
            data: self.data.select(Axis(1), positions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn columns_by_name_and_position() {
        let table = sample();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.column(&"b".into()).unwrap().to_vec(), vec![2.0, 5.0]);
        assert_eq!(
            table.column(&ColumnRef::Position(2)).unwrap().to_vec(),
            vec![3.0, 6.0]
        );
        assert!(matches!(
            table.column(&"z".into()),
            Err(PlotError::MissingColumn(_))
        ));
        assert!(!table.contains(&ColumnRef::Position(3)));
    }

    #[test]
    fn names_must_match_width() {
        let err = Table::new(vec!["a".into()], array![[1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { .. }));
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let err = Table::from_columns(vec![
            ("a".into(), vec![1.0, 2.0]),
            ("b".into(), vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { .. }));
        assert!(Table::from_columns(Vec::new()).is_err());
    }

    #[test]
    fn select_reorders_columns() {
        let table = sample().select(&[2, 0]).unwrap();
        assert_eq!(table.column_names(), &["c".to_string(), "a".to_string()]);
        assert_eq!(table.as_array(), &array![[3.0, 1.0], [6.0, 4.0]]);
        assert!(sample().select(&[5]).is_err());
    }

    #[test]
    fn positional_names() {
        let table = Table::from_array(Array2::zeros((4, 2)));
        assert_eq!(table.name_at(1), Some("1"));
        assert_eq!(table.nrows(), 4);
    }
}
