// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// A homogeneous list of numbers as entered for a sequence parameter.
///
/// Deserializes from a plain JSON array; an array of integers stays integral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericArray {
    Integer64(Vec<i64>),
    Float64(Vec<f64>),
}

impl NumericArray {
    /// `num` evenly spaced values from `start` to `stop`, both ends included.
    pub fn linspace(start: f64, stop: f64, num: usize) -> Self {
        let values = match num {
            0 => vec![],
            1 => vec![start],
            _ => {
                let step = (stop - start) / (num - 1) as f64;
                (0..num).map(|i| start + step * i as f64).collect()
            }
        };
        NumericArray::Float64(values)
    }

    pub fn value_at_index(&self, index: usize) -> Option<f64> {
        match self {
            NumericArray::Integer64(vec) => vec.get(index).map(|x| *x as f64),
            NumericArray::Float64(vec) => vec.get(index).copied(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NumericArray::Integer64(vec) => vec.len(),
            NumericArray::Float64(vec) => vec.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            NumericArray::Integer64(vec) => vec.is_empty(),
            NumericArray::Float64(vec) => vec.is_empty(),
        }
    }
}

impl From<Vec<i64>> for NumericArray {
    fn from(value: Vec<i64>) -> Self {
        NumericArray::Integer64(value)
    }
}

impl From<Vec<f64>> for NumericArray {
    fn from(value: Vec<f64>) -> Self {
        NumericArray::Float64(value)
    }
}
