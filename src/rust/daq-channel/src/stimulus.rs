// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Stimulus programs: command waveforms built from parameterized segments.
//!
//! A program is a list of [`Segment`]s that are summed on top of each other.
//! Every numeric field of a segment is either a literal or the name of a
//! [`SequenceParameter`], which allows stepping e.g. a pulse amplitude through
//! a list of values when the protocol runs as a sequence.
//!
//! Times and durations are given in generator time units, converted to seconds
//! with the generator's time scale (milliseconds by default). Amplitudes are in
//! the physical units of the channel.

use std::f64::consts::TAU;
use std::ops::Range;

use daq_units::{Duration, Seconds, length_to_samples, milliseconds, sample_index_range};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::parameter::{ParameterResolver, SequenceParameter, ValueOrParameter};
use crate::sequence::Combination;
use crate::waveform::Waveform;

type Value = ValueOrParameter<f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Square pulse of constant amplitude.
    Pulse {
        start: Value,
        duration: Value,
        amplitude: Value,
    },
    /// `count` square pulses, `period` apart.
    PulseTrain {
        start: Value,
        duration: Value,
        amplitude: Value,
        period: Value,
        count: Value,
    },
    /// Linear ramp from `from` to `to`; the end point itself is not reached.
    Ramp {
        start: Value,
        duration: Value,
        from: Value,
        to: Value,
    },
    /// Sine wave; `frequency` in Hz and `phase` in radians.
    Sine {
        start: Value,
        duration: Value,
        amplitude: Value,
        frequency: Value,
        #[serde(default)]
        phase: Value,
    },
}

fn default_time_scale() -> f64 {
    milliseconds(1.0).to_seconds().value()
}

/// Sampling context shared by all segments of a program.
struct Sampler<'a> {
    resolver: ParameterResolver<'a>,
    time_scale: f64,
    rate: f64,
}

impl Sampler<'_> {
    fn value(&self, value: &Value) -> Result<f64> {
        self.resolver.get_value(value)
    }

    fn time(&self, value: &Value) -> Result<Duration<Seconds>> {
        Ok(daq_units::seconds(self.value(value)? * self.time_scale))
    }

    fn length(&self, value: &Value, field: &str) -> Result<Duration<Seconds>> {
        let length = self.time(value)?;
        if length.value() < 0.0 {
            return Err(Error::new(format!(
                "Segment {field} must not be negative, got {length}."
            )));
        }
        Ok(length)
    }

    fn fill_constant(
        &self,
        wave: &mut Waveform,
        start: Duration<Seconds>,
        duration: Duration<Seconds>,
        amplitude: f64,
    ) {
        let range = sample_index_range(start, start + duration, self.rate, wave.len());
        wave[range].iter_mut().for_each(|sample| *sample += amplitude);
    }

    fn fill_with<F>(
        &self,
        wave: &mut Waveform,
        start: Duration<Seconds>,
        duration: Duration<Seconds>,
        f: F,
    ) where
        F: Fn(f64) -> f64,
    {
        let range = sample_index_range(start, start + duration, self.rate, wave.len());
        for index in range {
            let elapsed = index as f64 / self.rate - start.value();
            wave[index] += f(elapsed);
        }
    }

    /// Indices of the pulses of a train that overlap the record.
    fn pulses_in_record(
        &self,
        start: Duration<Seconds>,
        duration: Duration<Seconds>,
        period: Duration<Seconds>,
        count: f64,
        num_samples: usize,
    ) -> Range<usize> {
        if count <= 1.0 {
            return 0..count as usize;
        }
        let record_end = num_samples as f64 / self.rate;
        let first = (-(start + duration).value() / period.value()).ceil();
        let last = ((record_end - start.value()) / period.value()).ceil();
        let first = first.clamp(0.0, count) as usize;
        let last = last.clamp(0.0, count) as usize;
        first..last.max(first)
    }

    fn render(&self, segment: &Segment, wave: &mut Waveform) -> Result<()> {
        match segment {
            Segment::Pulse {
                start,
                duration,
                amplitude,
            } => {
                let start = self.time(start)?;
                let duration = self.length(duration, "duration")?;
                let amplitude = self.value(amplitude)?;
                self.fill_constant(wave, start, duration, amplitude);
            }
            Segment::PulseTrain {
                start,
                duration,
                amplitude,
                period,
                count,
            } => {
                let start = self.time(start)?;
                let duration = self.length(duration, "duration")?;
                let amplitude = self.value(amplitude)?;
                let period = self.length(period, "period")?;
                let count = self.value(count)?;
                if count < 0.0 || count.fract() != 0.0 {
                    return Err(Error::new(format!(
                        "Pulse count must be a non-negative integer, got {count}."
                    )));
                }
                if count > 1.0 && (period < duration || length_to_samples(period, self.rate) < 1)
                {
                    return Err(Error::new(format!(
                        "Pulse period must span at least one sample and the pulse duration ({duration}), got {period}."
                    )));
                }
                for pulse in self.pulses_in_record(start, duration, period, count, wave.len()) {
                    let pulse_start = start + period * pulse as f64;
                    self.fill_constant(wave, pulse_start, duration, amplitude);
                }
            }
            Segment::Ramp {
                start,
                duration,
                from,
                to,
            } => {
                let start = self.time(start)?;
                let duration = self.length(duration, "duration")?;
                let from = self.value(from)?;
                let to = self.value(to)?;
                let span = duration.value();
                self.fill_with(wave, start, duration, |elapsed| {
                    from + (to - from) * elapsed / span
                });
            }
            Segment::Sine {
                start,
                duration,
                amplitude,
                frequency,
                phase,
            } => {
                let start = self.time(start)?;
                let duration = self.length(duration, "duration")?;
                let amplitude = self.value(amplitude)?;
                let frequency = self.value(frequency)?;
                let phase = self.value(phase)?;
                self.fill_with(wave, start, duration, |elapsed| {
                    amplitude * (TAU * frequency * elapsed + phase).sin()
                });
            }
        }
        Ok(())
    }
}

/// A programmable stimulus: sequence parameters plus the segments using them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusGenerator {
    /// Seconds per generator time unit.
    #[serde(default = "default_time_scale")]
    time_scale: f64,
    #[serde(default)]
    parameters: IndexMap<String, SequenceParameter>,
    #[serde(default)]
    segments: Vec<Segment>,
}

impl Default for StimulusGenerator {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            parameters: IndexMap::new(),
            segments: vec![],
        }
    }
}

impl StimulusGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, name: impl Into<String>, parameter: SequenceParameter) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Duration of one generator time unit.
    pub fn time_scale(&self) -> Duration<Seconds> {
        daq_units::seconds(self.time_scale)
    }

    pub fn set_time_scale(&mut self, scale: Duration<Seconds>) {
        self.time_scale = scale.value();
    }

    pub fn parameters(&self) -> &IndexMap<String, SequenceParameter> {
        &self.parameters
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether any waveform is programmed at all.
    pub fn is_configured(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Names of the sequenced parameters and their number of values.
    pub fn list_sequences(&self) -> IndexMap<String, usize> {
        self.parameters
            .iter()
            .filter(|(_, parameter)| !parameter.is_empty())
            .map(|(name, parameter)| (name.clone(), parameter.len()))
            .collect()
    }

    /// Sample the program for one parameter combination.
    ///
    /// Parameters missing from `params` (or all of them, when `params` is
    /// `None`) take their default value. Returns `None` if no waveform is
    /// programmed or the program cannot be evaluated.
    pub fn get_single(
        &self,
        rate: f64,
        num_pts: usize,
        params: Option<&Combination>,
    ) -> Option<Waveform> {
        if !self.is_configured() {
            return None;
        }
        match self.sample(rate, num_pts, params) {
            Ok(wave) => Some(wave),
            Err(e) => {
                daq_log::warn!("Cannot generate waveform: {}", e);
                None
            }
        }
    }

    /// Sample the program, reporting why it cannot be evaluated.
    pub fn sample(
        &self,
        rate: f64,
        num_pts: usize,
        params: Option<&Combination>,
    ) -> Result<Waveform> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(Error::new(format!("Invalid sample rate {rate} Hz.")));
        }
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Err(Error::new(format!(
                "Invalid time scale {} s.",
                self.time_scale
            )));
        }
        let sampler = Sampler {
            resolver: ParameterResolver::new(&self.parameters, params),
            time_scale: self.time_scale,
            rate,
        };
        let mut wave = Waveform::zeros(num_pts);
        for segment in &self.segments {
            sampler.render(segment, &mut wave)?;
        }
        Ok(wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_approx_eq {
        ($left:expr, $right:expr, $tolerance:expr) => {
            let left = $left;
            let right = $right;
            let tolerance = $tolerance;
            let diff = (left - right).abs();
            if diff >= tolerance {
                panic!(
                    "assertion failed: values are not approximately equal\n  left: {}\n  right: {}\n  difference: {}\n  tolerance: {}",
                    left, right, diff, tolerance
                );
            }
        };
        ($left:expr, $right:expr) => {
            assert_approx_eq!($left, $right, 1e-10);
        };
    }

    fn pulse(start: f64, duration: f64, amplitude: impl Into<Value>) -> Segment {
        Segment::Pulse {
            start: start.into(),
            duration: duration.into(),
            amplitude: amplitude.into(),
        }
    }

    #[test]
    fn test_unconfigured_generator() {
        let generator = StimulusGenerator::new();
        assert!(!generator.is_configured());
        assert_eq!(generator.get_single(1e3, 10, None), None);
        assert!(generator.list_sequences().is_empty());
    }

    #[test]
    fn test_pulse() {
        // 1 kHz, 10 samples: pulse from 2 ms to 5 ms
        let generator = StimulusGenerator::new().with_segment(pulse(2.0, 3.0, -10.0));
        let wave = generator.get_single(1e3, 10, None).unwrap();
        assert_eq!(
            wave.into_inner(),
            vec![0.0, 0.0, -10.0, -10.0, -10.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_time_scale() {
        let mut generator = StimulusGenerator::new().with_segment(pulse(0.002, 0.001, 1.0));
        assert_eq!(generator.time_scale(), daq_units::seconds(1e-3));
        generator.set_time_scale(daq_units::seconds(1.0));
        let wave = generator.get_single(1e3, 4, None).unwrap();
        assert_eq!(wave.into_inner(), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_pulse_clipped_to_record() {
        let generator = StimulusGenerator::new().with_segment(pulse(8.0, 100.0, 1.0));
        let wave = generator.get_single(1e3, 10, None).unwrap();
        assert_eq!(&wave[7..], &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_overlapping_segments_add() {
        let generator = StimulusGenerator::new()
            .with_segment(pulse(0.0, 4.0, 1.0))
            .with_segment(pulse(2.0, 4.0, 2.0));
        let wave = generator.get_single(1e3, 8, None).unwrap();
        assert_eq!(
            wave.into_inner(),
            vec![1.0, 1.0, 3.0, 3.0, 2.0, 2.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_pulse_train() {
        let generator = StimulusGenerator::new().with_segment(Segment::PulseTrain {
            start: 1.0.into(),
            duration: 1.0.into(),
            amplitude: 5.0.into(),
            period: 3.0.into(),
            count: 3.0.into(),
        });
        let wave = generator.get_single(1e3, 10, None).unwrap();
        assert_eq!(
            wave.into_inner(),
            vec![0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_pulse_train_degenerate_period() {
        let train = |duration: f64, period: f64, count: f64| {
            StimulusGenerator::new().with_segment(Segment::PulseTrain {
                start: 0.0.into(),
                duration: duration.into(),
                amplitude: 1.0.into(),
                period: period.into(),
                count: count.into(),
            })
        };
        let started = std::time::Instant::now();
        assert_eq!(train(1.0, 0.0, 1e10).get_single(1e3, 10, None), None);
        // Shorter than the pulse duration
        assert_eq!(train(1.0, 0.5, 4.0).get_single(1e3, 10, None), None);
        // Shorter than one sample
        assert_eq!(train(0.0, 0.4, 4.0).get_single(1e3, 10, None), None);
        // A single pulse does not need a period
        assert_eq!(
            train(1.0, 0.0, 1.0).get_single(1e3, 3, None).unwrap().into_inner(),
            vec![1.0, 0.0, 0.0]
        );
        // Only the pulses inside the record are rendered
        let wave = train(1.0, 2.0, 1e15).get_single(1e3, 6, None).unwrap();
        assert_eq!(wave.into_inner(), vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_pulse_train_starting_before_record() {
        let generator = StimulusGenerator::new().with_segment(Segment::PulseTrain {
            start: (-1e12).into(),
            duration: 1.0.into(),
            amplitude: 1.0.into(),
            period: 2.0.into(),
            count: 1e15.into(),
        });
        let wave = generator.get_single(1e3, 4, None).unwrap();
        assert_eq!(wave.into_inner(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_ramp() {
        let generator = StimulusGenerator::new().with_segment(Segment::Ramp {
            start: 2.0.into(),
            duration: 4.0.into(),
            from: 0.0.into(),
            to: 8.0.into(),
        });
        let wave = generator.get_single(1e3, 8, None).unwrap();
        let expected = [0.0, 0.0, 0.0, 2.0, 4.0, 6.0, 0.0, 0.0];
        for (sample, expected) in wave.iter().zip(expected) {
            assert_approx_eq!(*sample, expected);
        }
    }

    #[test]
    fn test_sine() {
        // 250 Hz sampled at 1 kHz: a quarter period per sample
        let generator = StimulusGenerator::new().with_segment(Segment::Sine {
            start: 0.0.into(),
            duration: 4.0.into(),
            amplitude: 2.0.into(),
            frequency: 250.0.into(),
            phase: Value::default(),
        });
        let wave = generator.get_single(1e3, 5, None).unwrap();
        let expected = [0.0, 2.0, 0.0, -2.0, 0.0];
        for (sample, expected) in wave.iter().zip(expected) {
            assert_approx_eq!(*sample, expected);
        }
    }

    #[test]
    fn test_sequence_parameters() {
        let generator = StimulusGenerator::new()
            .with_parameter(
                "amp",
                SequenceParameter::new(1.0).with_sequence(vec![10.0, 20.0]),
            )
            .with_parameter("fixed", SequenceParameter::new(3.0))
            .with_segment(pulse(0.0, 1.0, "amp"));
        assert_eq!(
            generator.list_sequences(),
            IndexMap::from([("amp".to_string(), 2)])
        );

        let single = generator.get_single(1e3, 2, None).unwrap();
        assert_eq!(single.into_inner(), vec![1.0, 0.0]);

        let combination = Combination::from([("amp".to_string(), 1)]);
        let wave = generator.get_single(1e3, 2, Some(&combination)).unwrap();
        assert_eq!(wave.into_inner(), vec![20.0, 0.0]);
    }

    #[test]
    fn test_invalid_program_yields_no_waveform() {
        let undefined = StimulusGenerator::new().with_segment(pulse(0.0, 1.0, "missing"));
        assert_eq!(undefined.get_single(1e3, 4, None), None);
        assert!(undefined.sample(1e3, 4, None).is_err());

        let negative = StimulusGenerator::new().with_segment(pulse(0.0, -1.0, 1.0));
        assert_eq!(negative.get_single(1e3, 4, None), None);

        let valid = StimulusGenerator::new().with_segment(pulse(0.0, 1.0, 1.0));
        assert_eq!(valid.get_single(0.0, 4, None), None);
        assert_eq!(valid.get_single(f64::NAN, 4, None), None);

        let fractional = StimulusGenerator::new().with_segment(Segment::PulseTrain {
            start: 0.0.into(),
            duration: 1.0.into(),
            amplitude: 1.0.into(),
            period: 2.0.into(),
            count: 1.5.into(),
        });
        assert_eq!(fractional.get_single(1e3, 4, None), None);

        let out_of_range = StimulusGenerator::new()
            .with_parameter("amp", SequenceParameter::new(1.0).with_sequence(vec![1_i64, 2]))
            .with_segment(pulse(0.0, 1.0, "amp"));
        let combination = Combination::from([("amp".to_string(), 5)]);
        assert_eq!(out_of_range.get_single(1e3, 4, Some(&combination)), None);
    }

    #[test]
    fn test_deserialize_program() {
        let generator: StimulusGenerator = serde_json::from_str(
            r#"{
                "parameters": {"amp": {"default": -5, "sequence": [-10, 0, 10]}},
                "segments": [
                    {"kind": "pulse", "start": 1, "duration": 2, "amplitude": "amp"},
                    {"kind": "sine", "start": 0, "duration": 1, "amplitude": 1, "frequency": 10}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(generator.time_scale(), daq_units::seconds(1e-3));
        assert_eq!(generator.segments().len(), 2);
        assert_eq!(generator.parameters()["amp"].default, -5.0);
        assert_eq!(generator.list_sequences()["amp"], 3);
    }
}
