// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Time units and sample-grid helpers for DAQ waveforms.

pub mod duration;
pub mod sampling;

pub use duration::{Duration, Seconds, milliseconds, seconds};
pub use sampling::{length_to_samples, sample_index_range, time_axis};
