//! Customer Feature Preparation

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeatureError;
use crate::frame::{drop_null_columns, series};

/// Sentinel for customers with no recorded club membership status
pub const ABSENT_MEMBER_STATUS: &str = "ABSENT";

/// Ordered age bucket derived from the fixed bin edges
/// `[0, 18, 25, 35, 45, 55, 65, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-18")]
    UpTo18,
    #[serde(rename = "19-25")]
    From19To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "56-65")]
    From56To65,
    #[serde(rename = "66+")]
    Over65,
}

impl AgeGroup {
    /// Bucket an age. Bins are left-open: an age lands in the bucket whose
    /// upper edge is the first one at or above it. Ages outside (0, 100]
    /// are unbucketable and yield `None`.
    pub fn from_age(age: f64) -> Option<Self> {
        if !age.is_finite() || age <= 0.0 || age > 100.0 {
            return None;
        }

        Some(if age <= 18.0 {
            AgeGroup::UpTo18
        } else if age <= 25.0 {
            AgeGroup::From19To25
        } else if age <= 35.0 {
            AgeGroup::From26To35
        } else if age <= 45.0 {
            AgeGroup::From36To45
        } else if age <= 55.0 {
            AgeGroup::From46To55
        } else if age <= 65.0 {
            AgeGroup::From56To65
        } else {
            AgeGroup::Over65
        })
    }

    /// Get the bucket label
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::UpTo18 => "0-18",
            AgeGroup::From19To25 => "19-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To45 => "36-45",
            AgeGroup::From46To55 => "46-55",
            AgeGroup::From56To65 => "56-65",
            AgeGroup::Over65 => "66+",
        }
    }
}

/// Prepare the customers frame: fill missing `club_member_status` with the
/// `ABSENT` sentinel, drop rows with missing `age`, derive the `age_group`
/// bucket column, then drop every column that still contains missing values.
pub fn prepare_customers(df: &DataFrame) -> Result<DataFrame, FeatureError> {
    let mut out = df.clone();

    let status = series(&out, "club_member_status")?.cast(&DataType::String)?;
    let filled: Vec<&str> = status
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(ABSENT_MEMBER_STATUS))
        .collect();
    out.with_column(Series::new("club_member_status".into(), filled))?;

    let with_age = series(&out, "age")?.is_not_null();
    out = out.filter(&with_age)?;

    let ages = series(&out, "age")?.cast(&DataType::Float64)?;
    let groups: Vec<Option<&str>> = ages
        .f64()?
        .into_iter()
        .map(|a| a.and_then(AgeGroup::from_age).map(|g| g.as_str()))
        .collect();
    out.with_column(Series::new("age_group".into(), groups))?;

    let out = drop_null_columns(&out)?;
    debug!(
        "prepared customers: {} rows, {} columns",
        out.height(),
        out.width()
    );
    Ok(out)
}
