//! Article Feature Preparation

use polars::prelude::*;
use tracing::debug;

use crate::error::FeatureError;
use crate::frame::{drop_null_columns, series};

/// Prepare the articles frame: cast `article_id` to text, derive text-length
/// features for `prod_name` and `detail_desc`, then drop every column that
/// still contains missing values.
pub fn prepare_articles(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let mut out = df.clone();

    let article_id = series(&out, "article_id")?.cast(&DataType::String)?;
    out.with_column(article_id)?;

    let prod_name_length = text_length(series(&out, "prod_name")?, "prod_name_length")?;
    out.with_column(prod_name_length)?;

    let detail_desc_length = text_length(series(&out, "detail_desc")?, "detail_desc_length")?;
    out.with_column(detail_desc_length)?;

    let out = drop_null_columns(&out)?;
    debug!(
        "prepared articles: {} rows, {} columns",
        out.height(),
        out.width()
    );
    Ok(out)
}

/// Character length of each value's text rendering. Missing values count as
/// length zero so the feature survives the null-column drop.
fn text_length(s: &Series, name: &str) -> Result<Series, FeatureError> {
    let text = s.cast(&DataType::String)?;
    let text = text.str()?;

    let lengths: Vec<u32> = text
        .into_iter()
        .map(|v| v.map_or(0, |t| t.chars().count() as u32))
        .collect();

    Ok(Series::new(name.into(), lengths))
}
