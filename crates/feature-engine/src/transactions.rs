//! Transaction Feature Preparation

use chrono::{Datelike, NaiveDate, NaiveTime};
use polars::prelude::*;
use tracing::debug;

use crate::error::FeatureError;
use crate::frame::series;

/// Radians per month on the yearly cycle (2π / 12)
pub const MONTH_CYCLE: f64 = std::f64::consts::TAU / 12.0;

/// The `article_id` column cast to text.
pub fn article_ids_as_str(df: &DataFrame) -> Result<Series, FeatureError> {
    Ok(series(df, "article_id")?.cast(&DataType::String)?)
}

/// Transaction dates parsed once from the `t_dat` column.
///
/// Accessors emit the derived date columns so the frame is only scanned a
/// single time, whichever subset of features a caller needs.
pub struct TransactionDates {
    dates: Vec<Option<NaiveDate>>,
}

impl TransactionDates {
    /// Parse `t_dat` from a frame. Accepts a text column in `YYYY-MM-DD`
    /// form or a native date column.
    pub fn from_frame(df: &DataFrame) -> Result<Self, FeatureError> {
        let col = series(df, "t_dat")?;

        let dates = match col.dtype() {
            DataType::String => col
                .str()?
                .into_iter()
                .map(|v| {
                    v.map(|s| {
                        NaiveDate::parse_from_str(s, "%Y-%m-%d")
                            .map_err(|_| FeatureError::InvalidDate(s.to_string()))
                    })
                    .transpose()
                })
                .collect::<Result<Vec<_>, _>>()?,
            DataType::Date => col.date()?.as_date_iter().collect(),
            other => {
                return Err(FeatureError::UnsupportedDtype {
                    column: "t_dat".to_string(),
                    dtype: other.to_string(),
                    operation: "date decomposition",
                })
            }
        };

        Ok(Self { dates })
    }

    /// Number of parsed rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the frame had no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Calendar year as an integer column
    pub fn years(&self) -> Series {
        let v: Vec<Option<i32>> = self.dates.iter().map(|d| d.map(|d| d.year())).collect();
        Series::new("year".into(), v)
    }

    /// Calendar month (1-12) as an integer column
    pub fn months(&self) -> Series {
        let v: Vec<Option<i32>> = self
            .dates
            .iter()
            .map(|d| d.map(|d| d.month() as i32))
            .collect();
        Series::new("month".into(), v)
    }

    /// Day of month as an integer column
    pub fn days(&self) -> Series {
        let v: Vec<Option<i32>> = self
            .dates
            .iter()
            .map(|d| d.map(|d| d.day() as i32))
            .collect();
        Series::new("day".into(), v)
    }

    /// Day of week as an integer column, Monday = 0
    pub fn days_of_week(&self) -> Series {
        let v: Vec<Option<i32>> = self
            .dates
            .iter()
            .map(|d| d.map(|d| d.weekday().num_days_from_monday() as i32))
            .collect();
        Series::new("day_of_week".into(), v)
    }

    /// Millisecond Unix epoch of midnight UTC, named `t_dat` so it replaces
    /// the source column.
    pub fn epoch_millis(&self) -> Series {
        let v: Vec<Option<i64>> = self
            .dates
            .iter()
            .map(|d| d.map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp_millis()))
            .collect();
        Series::new("t_dat".into(), v)
    }
}

/// Add `month_sin` / `month_cos` cyclical encodings of the `month` column.
pub fn month_cyclical(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let months = series(df, "month")?.cast(&DataType::Float64)?;
    let months = months.f64()?;

    let sin: Vec<Option<f64>> = months
        .into_iter()
        .map(|m| m.map(|m| (m * MONTH_CYCLE).sin()))
        .collect();
    let cos: Vec<Option<f64>> = months
        .into_iter()
        .map(|m| m.map(|m| (m * MONTH_CYCLE).cos()))
        .collect();

    let mut out = df.clone();
    out.with_column(Series::new("month_sin".into(), sin))?;
    out.with_column(Series::new("month_cos".into(), cos))?;
    Ok(out)
}

/// Prepare the transactions frame: cast `article_id` to text, decompose
/// `t_dat` into year/month/day/day-of-week, add the cyclical month encoding,
/// and finally replace `t_dat` with its millisecond-epoch integer encoding.
pub fn prepare_transactions(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let mut out = df.clone();

    let ids = article_ids_as_str(&out)?;
    out.with_column(ids)?;

    let dates = TransactionDates::from_frame(&out)?;
    out.with_column(dates.years())?;
    out.with_column(dates.months())?;
    out.with_column(dates.days())?;
    out.with_column(dates.days_of_week())?;

    out = month_cyclical(&out)?;

    out.with_column(dates.epoch_millis())?;

    debug!(
        "prepared transactions: {} rows, {} columns",
        out.height(),
        out.width()
    );
    Ok(out)
}
