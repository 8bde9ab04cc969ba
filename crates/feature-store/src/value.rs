//! Feature Scalars and Model Schemas

use serde::{Deserialize, Serialize};

/// A single feature value as stored in a feature view row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Whether the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, FeatureValue::Null)
    }
}

impl From<i64> for FeatureValue {
    fn from(v: i64) -> Self {
        FeatureValue::Int(v)
    }
}

impl From<f64> for FeatureValue {
    fn from(v: f64) -> Self {
        FeatureValue::Float(v)
    }
}

impl From<&str> for FeatureValue {
    fn from(v: &str) -> Self {
        FeatureValue::Text(v.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(v: String) -> Self {
        FeatureValue::Text(v)
    }
}

/// One column of a model's declared input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: String,
    /// Declared dtype, as the registry reports it
    pub dtype: String,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, dtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
        }
    }
}

/// Columnar input schema a ranking model declares in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    pub inputs: Vec<ColumnSpec>,
}

impl ModelSchema {
    pub fn new(inputs: Vec<ColumnSpec>) -> Self {
        Self { inputs }
    }

    /// Expected input column names, in model order
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().map(|c| c.name.clone()).collect()
    }
}
