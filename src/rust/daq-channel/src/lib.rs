// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Command-waveform engine for DAQ channels.
//!
//! Output channels build their command waveform from a programmable
//! [`StimulusGenerator`] plus an optional holding level, and expand the
//! sequenced generator parameters into one waveform per protocol trial.
//! Input channels only describe what to record.

pub mod acquisition;
pub mod channel_config;
pub mod error;
pub mod input_channel;
pub mod output_channel;
pub mod parameter;
pub mod protocol;
pub mod sequence;
pub mod stimulus;
pub mod waveform;

use indexmap::IndexMap;

pub use acquisition::AcquisitionParams;
pub use channel_config::{ChannelConfig, ChannelType};
pub use error::{Error, Result};
pub use input_channel::{InputChannel, InputChannelState, Trace};
pub use output_channel::{OutputChannel, OutputChannelState, WaveDisplay};
pub use parameter::{SequenceParameter, ValueOrParameter};
pub use protocol::{ChannelProtocol, InputProtocol, OutputProtocol};
pub use sequence::{Combination, run_sequence};
pub use stimulus::{Segment, StimulusGenerator};
pub use waveform::Waveform;

/// A channel of a DAQ device, as controlled by the host application.
pub enum DaqChannel {
    Output(OutputChannel),
    Input(InputChannel),
}

impl DaqChannel {
    /// Build the channel matching the configured type.
    pub fn from_config(config: ChannelConfig, daq: AcquisitionParams) -> Result<Self> {
        if config.channel_type().is_output() {
            Ok(DaqChannel::Output(OutputChannel::new(config, daq)?))
        } else {
            Ok(DaqChannel::Input(InputChannel::new(config)?))
        }
    }

    pub fn config(&self) -> &ChannelConfig {
        match self {
            DaqChannel::Output(channel) => channel.config(),
            DaqChannel::Input(channel) => channel.config(),
        }
    }

    pub fn name(&self) -> &str {
        self.config().name()
    }

    pub fn list_sequence(&self) -> IndexMap<String, usize> {
        match self {
            DaqChannel::Output(channel) => channel.list_sequence(),
            DaqChannel::Input(channel) => channel.list_sequence(),
        }
    }

    pub fn generate_protocol(&self, params: Option<&Combination>) -> ChannelProtocol {
        match self {
            DaqChannel::Output(channel) => {
                ChannelProtocol::Output(channel.generate_protocol(params))
            }
            DaqChannel::Input(channel) => ChannelProtocol::Input(channel.generate_protocol()),
        }
    }
}
