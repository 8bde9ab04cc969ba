//! Shared frame helpers

use polars::prelude::*;

use crate::error::FeatureError;

/// Look up a column as a series, with a readable error for missing columns.
pub(crate) fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series, FeatureError> {
    Ok(df
        .column(name)
        .map_err(|_| FeatureError::MissingColumn(name.to_string()))?
        .as_materialized_series())
}

/// Drop every column that still contains missing values.
pub(crate) fn drop_null_columns(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let keep: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| c.null_count() == 0)
        .map(|c| c.name().to_string())
        .collect();

    Ok(df.select(keep)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_error() {
        let df = DataFrame::new(vec![Series::new("a".into(), &[1i64, 2]).into()]).unwrap();
        let err = series(&df, "b").unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(name) if name == "b"));
    }

    #[test]
    fn test_drop_null_columns() {
        let df = DataFrame::new(vec![
            Series::new("full".into(), &[1i64, 2]).into(),
            Series::new("holes".into(), &[Some(1i64), None]).into(),
        ])
        .unwrap();

        let out = drop_null_columns(&df).unwrap();
        assert!(out.column("full").is_ok());
        assert!(out.column("holes").is_err());
    }
}
