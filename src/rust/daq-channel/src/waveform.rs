// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// Samples of a command waveform, aligned 1:1 with the time axis of the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waveform(Vec<f64>);

impl Waveform {
    pub fn zeros(num_samples: usize) -> Self {
        Waveform(vec![0.0; num_samples])
    }

    /// Add a constant to every sample.
    pub fn add_offset(&mut self, offset: f64) {
        self.0.iter_mut().for_each(|sample| *sample += offset);
    }

    /// A copy of the waveform with every sample multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Waveform(self.0.iter().map(|sample| sample * factor).collect())
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Waveform {
    fn from(value: Vec<f64>) -> Self {
        Waveform(value)
    }
}

impl Deref for Waveform {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Waveform {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
