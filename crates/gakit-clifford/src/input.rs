//! Construction inputs for blades and multivectors.
//!
//! Callers hand coefficients over in whatever shape they have (a single
//! number, a list, a range, a set) and the shape is resolved here, once,
//! into a flat `Vec<f64>` in iteration order.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

#[cfg(feature = "serde")]
use gakit_core::{checked_dim, GakitError, Result};

/// Coefficients for one blade or one flat multivector.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficients {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Coefficients {
    pub fn len(&self) -> usize {
        match self {
            Coefficients::Scalar(_) => 1,
            Coefficients::Sequence(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The coefficients as a vector; a scalar becomes a one-element vector.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Coefficients::Scalar(c) => vec![c],
            Coefficients::Sequence(v) => v,
        }
    }

    /// Flatten a JSON number or (nested) array of numbers.
    #[cfg(feature = "serde")]
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(_) => Ok(Coefficients::Scalar(json_number(value)?)),
            serde_json::Value::Array(_) => {
                let mut out = Vec::new();
                flatten_json(value, &mut out)?;
                Ok(Coefficients::Sequence(out))
            }
            other => Err(GakitError::type_mismatch("number or array of numbers", other.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
fn json_number(value: &serde_json::Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| GakitError::type_mismatch("number", value.to_string()))
}

#[cfg(feature = "serde")]
fn flatten_json(value: &serde_json::Value, out: &mut Vec<f64>) -> Result<()> {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                flatten_json(item, out)?;
            }
            Ok(())
        }
        other => {
            out.push(json_number(other)?);
            Ok(())
        }
    }
}

impl From<f64> for Coefficients {
    fn from(value: f64) -> Self {
        Coefficients::Scalar(value)
    }
}

impl From<Vec<f64>> for Coefficients {
    fn from(values: Vec<f64>) -> Self {
        Coefficients::Sequence(values)
    }
}

impl From<&[f64]> for Coefficients {
    fn from(values: &[f64]) -> Self {
        Coefficients::Sequence(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Coefficients {
    fn from(values: [f64; N]) -> Self {
        Coefficients::Sequence(values.to_vec())
    }
}

impl From<Range<i64>> for Coefficients {
    fn from(range: Range<i64>) -> Self {
        range.map(|i| i as f64).collect()
    }
}

impl From<BTreeSet<i64>> for Coefficients {
    fn from(set: BTreeSet<i64>) -> Self {
        set.into_iter().map(|i| i as f64).collect()
    }
}

impl FromIterator<f64> for Coefficients {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Coefficients::Sequence(iter.into_iter().collect())
    }
}

/// The two ways to describe a multivector.
#[derive(Debug, Clone, PartialEq)]
pub enum MultivectorInput {
    /// Flat coefficients split by grade, with an optional larger dimension.
    FromScalars {
        coefficients: Coefficients,
        dim: Option<usize>,
    },
    /// Explicit grade → coefficients mapping. Keys are signed so negative
    /// grades can be reported instead of silently wrapping.
    FromMapping(BTreeMap<i64, Coefficients>),
}

impl MultivectorInput {
    /// Parse a JSON description.
    ///
    /// Accepted shapes:
    /// - `[1, 2, 3, 4]` or `5`: flat coefficients
    /// - `{"coefficients": [...], "dim": 3}`: flat coefficients with a dimension
    /// - `{"0": [1], "2": [0, 0, 4]}`: grade mapping; keys naming the same
    ///   grade (`"1"` and `"01"`) are a `Domain` error
    #[cfg(feature = "serde")]
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(map) = value else {
            return Ok(MultivectorInput::FromScalars {
                coefficients: Coefficients::from_json(value)?,
                dim: None,
            });
        };

        if let Some(coeffs) = map.get("coefficients") {
            let dim = match map.get("dim") {
                None | Some(serde_json::Value::Null) => None,
                Some(d) => {
                    let d = d
                        .as_i64()
                        .ok_or_else(|| GakitError::type_mismatch("integer dim", d.to_string()))?;
                    Some(checked_dim(d)?)
                }
            };
            return Ok(MultivectorInput::FromScalars {
                coefficients: Coefficients::from_json(coeffs)?,
                dim,
            });
        }

        let mut mapping = BTreeMap::new();
        for (key, val) in map {
            let grade: i64 = key
                .trim()
                .parse()
                .map_err(|_| GakitError::type_mismatch("integer grade key", key.clone()))?;
            if mapping.insert(grade, Coefficients::from_json(val)?).is_some() {
                return Err(GakitError::domain(format!("grade {grade} given twice")));
            }
        }
        Ok(MultivectorInput::FromMapping(mapping))
    }
}
