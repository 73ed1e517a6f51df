// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::channel_config::ChannelConfig;
use crate::error::{Error, Result};
use crate::protocol::InputProtocol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputChannelState {
    pub record: bool,
    /// Record the channel value before the protocol starts.
    pub record_init: bool,
    pub display: bool,
}

impl Default for InputChannelState {
    fn default() -> Self {
        Self {
            record: true,
            record_init: false,
            display: true,
        }
    }
}

/// A recorded trace with its time values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

pub struct InputChannel {
    config: ChannelConfig,
    state: InputChannelState,
    traces: Vec<Trace>,
}

impl InputChannel {
    pub fn new(config: ChannelConfig) -> Result<Self> {
        if config.channel_type().is_output() {
            return Err(Error::ChannelKindMismatch {
                channel: config.name().to_string(),
                expected: "input",
            });
        }
        config.validate()?;
        Ok(Self {
            config,
            state: InputChannelState::default(),
            traces: vec![],
        })
    }

    pub fn with_state(mut self, state: InputChannelState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    pub fn state(&self) -> &InputChannelState {
        &self.state
    }

    pub fn set_state(&mut self, state: InputChannelState) {
        self.state = state;
    }

    /// Input channels are never sequenced.
    pub fn list_sequence(&self) -> IndexMap<String, usize> {
        IndexMap::new()
    }

    pub fn generate_protocol(&self) -> InputProtocol {
        InputProtocol {
            record: self.state.record,
            record_init: self.state.record_init,
        }
    }

    /// Drop the traces of previous runs.
    pub fn protocol_started(&mut self) {
        self.traces.clear();
    }

    /// Keep a recorded trace for display.
    pub fn handle_result(&mut self, trace: Trace) {
        if !self.state.display {
            return;
        }
        if trace.time.len() != trace.values.len() {
            daq_log::warn!(
                "Channel '{}': trace has {} time values but {} samples",
                self.config.name(),
                trace.time.len(),
                trace.values.len()
            );
        }
        self.traces.push(trace);
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace() -> Trace {
        Trace {
            time: vec![0.0, 1e-3],
            values: vec![-65.0, -64.0],
        }
    }

    #[test]
    fn test_rejects_output_config() {
        let config = ChannelConfig::new("command", "DAQ", "ao", None).unwrap();
        assert!(matches!(
            InputChannel::new(config),
            Err(Error::ChannelKindMismatch { .. })
        ));
    }

    #[test]
    fn test_protocol() {
        let config = ChannelConfig::new("primary", "DAQ", "ai", None).unwrap();
        let mut channel = InputChannel::new(config).unwrap();
        assert!(channel.list_sequence().is_empty());
        assert_eq!(
            channel.generate_protocol(),
            InputProtocol {
                record: true,
                record_init: false
            }
        );
        channel.set_state(InputChannelState {
            record_init: true,
            ..*channel.state()
        });
        assert!(channel.generate_protocol().record_init);
    }

    #[test]
    fn test_results_kept_for_display() {
        let config = ChannelConfig::new("primary", "DAQ", "ai", None).unwrap();
        let mut channel = InputChannel::new(config).unwrap();
        channel.handle_result(trace());
        channel.handle_result(trace());
        assert_eq!(channel.traces().len(), 2);
        channel.protocol_started();
        assert!(channel.traces().is_empty());

        channel.set_state(InputChannelState {
            display: false,
            ..*channel.state()
        });
        channel.handle_result(trace());
        assert!(channel.traces().is_empty());
    }
}
