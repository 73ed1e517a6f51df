// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Protocol fragments handed to the device execution layer.

use serde::{Deserialize, Serialize};

use crate::waveform::Waveform;

/// Protocol of an output channel.
///
/// Only the enabled entries are present. `command` is in raw device units,
/// i.e. already multiplied by the channel scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputProtocol {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Waveform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputProtocol {
    pub record: bool,
    pub record_init: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChannelProtocol {
    Output(OutputProtocol),
    Input(InputProtocol),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_output_protocol() {
        let empty = OutputProtocol::default();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");

        let protocol = OutputProtocol {
            preset: None,
            holding: Some(-65.0),
            command: Some(Waveform::from(vec![1.0, 2.0])),
        };
        assert_eq!(
            serde_json::to_string(&ChannelProtocol::Output(protocol)).unwrap(),
            r#"{"holding":-65.0,"command":[1.0,2.0]}"#
        );
    }

    #[test]
    fn test_serialize_input_protocol() {
        let protocol = ChannelProtocol::Input(InputProtocol {
            record: true,
            record_init: false,
        });
        assert_eq!(
            serde_json::to_string(&protocol).unwrap(),
            r#"{"record":true,"recordInit":false}"#
        );
    }
}
