//! Row set wrapper that keeps each row's original input position.

use polars::prelude::{
    BooleanChunked, DataFrame, DataType, IdxCa, IdxSize, NamedFrom, NewChunkedArray, Series,
};

use hx_model::Result;

/// A report table together with the raw-report ordinal of every row.
///
/// Filtering and reordering go through this type so the ordinals never fall
/// out of step with the frame.
#[derive(Debug, Clone)]
pub struct RowSet {
    frame: DataFrame,
    ordinals: Vec<usize>,
}

impl RowSet {
    /// Wraps a raw report; ordinals are the row positions `0..height`.
    pub fn new(frame: DataFrame) -> Self {
        let ordinals = (0..frame.height()).collect();
        Self { frame, ordinals }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals
    }

    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    pub fn into_parts(self) -> (DataFrame, Vec<usize>) {
        (self.frame, self.ordinals)
    }

    /// Cell values of `column` as strings; nulls become empty strings.
    pub fn values(&self, column: &str) -> Result<Vec<String>> {
        string_values(&self.frame, column)
    }

    /// Keeps the rows whose `keep` flag is set, preserving relative order.
    pub fn retain(self, keep: &[bool]) -> Result<Self> {
        debug_assert_eq!(keep.len(), self.len());
        if keep.iter().all(|flag| *flag) {
            return Ok(self);
        }
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        let frame = self.frame.filter(&mask)?;
        let ordinals = self
            .ordinals
            .into_iter()
            .zip(keep)
            .filter_map(|(ordinal, flag)| flag.then_some(ordinal))
            .collect();
        Ok(Self { frame, ordinals })
    }

    /// Reorders rows so that position `i` holds the row previously at `order[i]`.
    pub fn reorder(self, order: &[usize]) -> Result<Self> {
        debug_assert_eq!(order.len(), self.len());
        let indices: Vec<IdxSize> = order.iter().map(|&index| index as IdxSize).collect();
        let frame = self.frame.take(&IdxCa::from_vec("order".into(), indices))?;
        let ordinals = order.iter().map(|&index| self.ordinals[index]).collect();
        Ok(Self { frame, ordinals })
    }

    /// Adds (or replaces) a string column.
    pub fn with_column(mut self, name: &str, values: Vec<String>) -> Result<Self> {
        self.frame.with_column(Series::new(name.into(), values))?;
        Ok(self)
    }
}

/// Extracts a column as strings; nulls become empty strings.
pub fn string_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let column = df.column(column)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect();
    Ok(values)
}

/// Actual column names of a frame, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn};

    fn test_df(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(name, values)| {
                Series::new(
                    name.into(),
                    values.iter().copied().map(String::from).collect::<Vec<_>>(),
                )
                .into_column()
            })
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_retain_keeps_ordinals_in_step() {
        let rows = RowSet::new(test_df(vec![("A", vec!["a", "b", "c", "d"])]));
        let rows = rows.retain(&[true, false, true, false]).unwrap();
        assert_eq!(rows.ordinals(), &[0, 2]);
        assert_eq!(rows.values("A").unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn test_reorder_moves_ordinals_with_rows() {
        let rows = RowSet::new(test_df(vec![("A", vec!["a", "b", "c"])]));
        let rows = rows.reorder(&[2, 0, 1]).unwrap();
        assert_eq!(rows.ordinals(), &[2, 0, 1]);
        assert_eq!(rows.values("A").unwrap(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_values_turn_nulls_into_empty_strings() {
        let series = Series::new("A".into(), vec![Some("x"), None]);
        let df = DataFrame::new(vec![series.into_column()]).unwrap();
        assert_eq!(string_values(&df, "A").unwrap(), vec!["x", ""]);
    }

    #[test]
    fn test_with_column_appends() {
        let rows = RowSet::new(test_df(vec![("A", vec!["a", "b"])]));
        let rows = rows
            .with_column("B", vec!["1".to_string(), "2".to_string()])
            .unwrap();
        assert_eq!(column_names(rows.frame()), vec!["A", "B"]);
    }
}
