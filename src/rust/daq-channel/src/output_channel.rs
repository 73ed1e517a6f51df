// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Analog and digital output channels.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::acquisition::AcquisitionParams;
use crate::channel_config::ChannelConfig;
use crate::error::{Error, Result};
use crate::protocol::OutputProtocol;
use crate::sequence::{Combination, combination_count, run_sequence, sequence_ranges};
use crate::stimulus::StimulusGenerator;
use crate::waveform::Waveform;

/// User-controlled settings of an output channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputChannelState {
    /// Level applied before the protocol starts.
    pub preset: Option<f64>,
    /// Holding level, in physical units, added to the command waveform.
    pub holding: Option<f64>,
    /// Whether the programmed waveform is sent as command.
    pub function_enabled: bool,
    pub display: bool,
    pub generator: StimulusGenerator,
}

impl Default for OutputChannelState {
    fn default() -> Self {
        Self {
            preset: None,
            holding: None,
            function_enabled: true,
            display: true,
            generator: StimulusGenerator::default(),
        }
    }
}

/// Waveforms to show for an output channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveDisplay {
    pub time: Vec<f64>,
    /// One waveform per sequence combination.
    pub sequence: Vec<Waveform>,
    /// The single-mode waveform.
    pub single: Option<Waveform>,
}

pub struct OutputChannel {
    config: ChannelConfig,
    daq: AcquisitionParams,
    time_axis: Vec<f64>,
    state: OutputChannelState,
}

impl OutputChannel {
    pub fn new(config: ChannelConfig, daq: AcquisitionParams) -> Result<Self> {
        if !config.channel_type().is_output() {
            return Err(Error::ChannelKindMismatch {
                channel: config.name().to_string(),
                expected: "output",
            });
        }
        config.validate()?;
        daq.validate()?;
        daq_log::debug!(
            "Created {} channel '{}' on '{}'",
            config.channel_type(),
            config.name(),
            config.device()
        );
        Ok(Self {
            time_axis: daq.time_axis(),
            config,
            daq,
            state: OutputChannelState::default(),
        })
    }

    pub fn with_state(mut self, state: OutputChannelState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn acquisition(&self) -> &AcquisitionParams {
        &self.daq
    }

    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    pub fn state(&self) -> &OutputChannelState {
        &self.state
    }

    pub fn set_state(&mut self, state: OutputChannelState) {
        self.state = state;
    }

    /// New sample rate or record length reported by the DAQ device.
    pub fn daq_changed(&mut self, daq: AcquisitionParams) -> Result<WaveDisplay> {
        daq.validate()?;
        self.daq = daq;
        self.time_axis = daq.time_axis();
        Ok(self.update_waves())
    }

    pub fn list_sequence(&self) -> IndexMap<String, usize> {
        self.state.generator.list_sequences()
    }

    /// The command waveform in physical units, including the holding level.
    pub fn single_wave(&self, params: Option<&Combination>) -> Option<Waveform> {
        let mut wave =
            self.state
                .generator
                .get_single(self.daq.rate(), self.daq.num_pts(), params)?;
        if let Some(holding) = self.state.holding {
            wave.add_offset(holding / self.config.scale());
        }
        Some(wave)
    }

    /// Waveforms for all sequence combinations plus the single-mode waveform.
    pub fn update_waves(&self) -> WaveDisplay {
        let params = sequence_ranges(&self.list_sequence());
        let total = combination_count(&params);
        let mut sequence = Vec::with_capacity(total);
        run_sequence(&params, |combination: &Combination| {
            if let Some(wave) = self.single_wave(Some(combination)) {
                sequence.push(wave);
            }
        });
        daq_log::diagnostic!(
            "Channel '{}': {} of {} sequence combinations produced a waveform",
            self.config.name(),
            sequence.len(),
            total
        );
        WaveDisplay {
            time: self.time_axis.clone(),
            sequence,
            single: self.single_wave(None),
        }
    }

    pub fn generate_protocol(&self, params: Option<&Combination>) -> OutputProtocol {
        let command = if self.state.function_enabled {
            self.single_wave(params)
                .map(|wave| wave.scaled(self.config.scale()))
        } else {
            None
        };
        OutputProtocol {
            preset: self.state.preset,
            holding: self.state.holding,
            command,
        }
    }

    /// The command trace of the protocol run that just started, if displayed.
    pub fn protocol_started(&self, params: Option<&Combination>) -> Option<Waveform> {
        if !self.state.display {
            return None;
        }
        self.single_wave(params)
    }
}
