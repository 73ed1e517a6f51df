// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use daq_units::{Duration, Seconds, seconds, time_axis};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sampling parameters reported by the DAQ device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionParams {
    /// Sample rate in Hz.
    rate: f64,
    num_pts: usize,
}

impl AcquisitionParams {
    pub fn new(rate: f64, num_pts: usize) -> Result<Self> {
        let params = AcquisitionParams { rate, num_pts };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.rate.is_finite() && self.rate > 0.0) {
            return Err(Error::InvalidAcquisition { rate: self.rate });
        }
        Ok(())
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn num_pts(&self) -> usize {
        self.num_pts
    }

    /// Length of the record, `num_pts / rate`.
    pub fn duration(&self) -> Duration<Seconds> {
        seconds(self.num_pts as f64 / self.rate)
    }

    /// Sample times of the record, one per point.
    pub fn time_axis(&self) -> Vec<f64> {
        time_axis(self.rate, self.num_pts)
    }
}
