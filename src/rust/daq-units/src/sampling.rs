// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;

use crate::duration::{Duration, Seconds};

/// Converts a length of time into a number of samples, rounding to the nearest sample.
pub fn length_to_samples(t: Duration<Seconds>, sampling_rate: f64) -> i64 {
    (t.value() * sampling_rate).round() as i64
}

/// Sample times `i / sampling_rate` for `i in 0..num_samples`.
///
/// The axis starts at zero and stops one sample period short of
/// `num_samples / sampling_rate`.
pub fn time_axis(sampling_rate: f64, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| i as f64 / sampling_rate)
        .collect()
}

/// Indices of the samples covered by the interval `[start, stop)`, clipped to `0..num_samples`.
pub fn sample_index_range(
    start: Duration<Seconds>,
    stop: Duration<Seconds>,
    sampling_rate: f64,
    num_samples: usize,
) -> Range<usize> {
    let clip = |t: Duration<Seconds>| -> usize {
        length_to_samples(t, sampling_rate).clamp(0, num_samples as i64) as usize
    };
    let first = clip(start);
    let last = clip(stop).max(first);
    first..last
}
