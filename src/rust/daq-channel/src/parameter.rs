// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use numeric_array::NumericArray;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sequence::Combination;

/// A user-editable stimulus parameter.
///
/// `default` is used when the parameter is not part of the current
/// combination, e.g. when previewing the single-mode waveform. `sequence`
/// holds the values the parameter steps through when the protocol is run as a
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceParameter {
    pub default: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<NumericArray>,
}

impl SequenceParameter {
    pub fn new(default: f64) -> Self {
        Self {
            default,
            sequence: None,
        }
    }

    pub fn with_sequence<T: Into<NumericArray>>(mut self, values: T) -> Self {
        self.sequence = Some(values.into());
        self
    }

    /// Number of sequence values, zero for a fixed parameter.
    pub fn len(&self) -> usize {
        self.sequence.as_ref().map_or(0, |values| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The parameter value for the given sequence index.
    ///
    /// Fixed parameters ignore the index.
    pub fn value(&self, index: Option<usize>) -> Result<f64> {
        match (&self.sequence, index) {
            (Some(values), Some(index)) if !values.is_empty() => {
                values.value_at_index(index).ok_or_else(|| {
                    Error::new(format!(
                        "Sequence index {index} out of range for {} values.",
                        values.len()
                    ))
                })
            }
            _ => Ok(self.default),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueOrParameter<T> {
    Value(T),
    Parameter(String),
}

impl<T: Default> Default for ValueOrParameter<T> {
    fn default() -> Self {
        ValueOrParameter::Value(T::default())
    }
}

impl From<f64> for ValueOrParameter<f64> {
    fn from(value: f64) -> Self {
        ValueOrParameter::Value(value)
    }
}

impl From<&str> for ValueOrParameter<f64> {
    fn from(value: &str) -> Self {
        ValueOrParameter::Parameter(value.to_string())
    }
}

/// Resolves parameter references against a combination of sequence indices.
pub struct ParameterResolver<'a> {
    parameters: &'a IndexMap<String, SequenceParameter>,
    combination: Option<&'a Combination>,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(
        parameters: &'a IndexMap<String, SequenceParameter>,
        combination: Option<&'a Combination>,
    ) -> Self {
        Self {
            parameters,
            combination,
        }
    }

    pub fn get_value(&self, value: &ValueOrParameter<f64>) -> Result<f64> {
        let resolved = match value {
            ValueOrParameter::Value(v) => *v,
            ValueOrParameter::Parameter(name) => {
                let parameter = self
                    .parameters
                    .get(name)
                    .ok_or_else(|| Error::new(format!("Undefined parameter '{name}'.")))?;
                let index = self
                    .combination
                    .and_then(|combination| combination.get(name).copied());
                parameter.value(index).map_err(|e| {
                    Error::new(format!("Cannot resolve parameter '{name}': {e}"))
                })?
            }
        };
        if !resolved.is_finite() {
            return Err(Error::new(format!("Value {resolved} is not finite.")));
        }
        Ok(resolved)
    }
}
