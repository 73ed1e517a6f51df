// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! The JSON document describing one channel as edited in the host application.

use std::path::Path;

use anyhow::{Context, Result, bail};
use daq_channel::sequence::{Combinations, sequence_ranges};
use daq_channel::{
    AcquisitionParams, ChannelConfig, ChannelProtocol, Combination, DaqChannel,
    InputChannelState, OutputChannelState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelDocument {
    pub channel: ChannelConfig,
    pub daq: AcquisitionParams,
    #[serde(default)]
    pub output: OutputChannelState,
    #[serde(default)]
    pub input: InputChannelState,
}

impl ChannelDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid channel document '{}'", path.display()))
    }

    pub fn into_channel(self) -> Result<DaqChannel> {
        let name = self.channel.name().to_string();
        let channel = DaqChannel::from_config(self.channel, self.daq)
            .with_context(|| format!("Cannot create channel '{name}'"))?;
        Ok(match channel {
            DaqChannel::Output(channel) => DaqChannel::Output(channel.with_state(self.output)),
            DaqChannel::Input(channel) => DaqChannel::Input(channel.with_state(self.input)),
        })
    }
}

/// One protocol trial of a sequence.
#[derive(Debug, Serialize)]
pub struct Trial {
    pub params: Combination,
    pub protocol: ChannelProtocol,
}

/// Protocol fragments for every combination of the channel's sequence.
pub fn expand_protocols(channel: &DaqChannel) -> Vec<Trial> {
    let params = sequence_ranges(&channel.list_sequence());
    Combinations::new(&params)
        .map(|params| Trial {
            protocol: channel.generate_protocol(Some(&params)),
            params,
        })
        .collect()
}

/// Parse a `name=index` command-line parameter.
pub fn parse_param(s: &str) -> Result<(String, usize)> {
    let Some((name, index)) = s.split_once('=') else {
        bail!("Expected 'name=index', got '{s}'");
    };
    let index = index
        .trim()
        .parse()
        .with_context(|| format!("Invalid sequence index in '{s}'"))?;
    Ok((name.trim().to_string(), index))
}
