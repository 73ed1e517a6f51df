// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Static configuration of a DAQ channel as given in the device configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Kind of DAQ channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChannelType {
    AnalogOut,
    DigitalOut,
    AnalogIn,
}

impl ChannelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::AnalogOut => "ao",
            ChannelType::DigitalOut => "do",
            ChannelType::AnalogIn => "ai",
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, ChannelType::AnalogOut | ChannelType::DigitalOut)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ao" => Ok(ChannelType::AnalogOut),
            "do" => Ok(ChannelType::DigitalOut),
            "ai" => Ok(ChannelType::AnalogIn),
            other => Err(Error::UnsupportedChannelType(other.to_string())),
        }
    }
}

impl TryFrom<String> for ChannelType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ChannelType> for String {
    fn from(value: ChannelType) -> Self {
        value.as_str().to_string()
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Configuration of a single channel.
///
/// The configuration is immutable once created. `scale` relates the physical
/// units of the command waveform to the raw units sent to the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    name: String,
    device: String,
    #[serde(rename = "type")]
    channel_type: ChannelType,
    #[serde(default = "default_scale")]
    scale: f64,
}

impl ChannelConfig {
    /// Create a channel configuration.
    ///
    /// Fails on an unknown `channel_type` or a scale factor that is zero or not finite.
    pub fn new(
        name: impl Into<String>,
        device: impl Into<String>,
        channel_type: &str,
        scale: Option<f64>,
    ) -> Result<Self> {
        let config = ChannelConfig {
            name: name.into(),
            device: device.into(),
            channel_type: channel_type.parse()?,
            scale: scale.unwrap_or_else(default_scale),
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants that deserialization alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return Err(Error::InvalidScale {
                channel: self.name.clone(),
                scale: self.scale,
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the DAQ device the channel belongs to.
    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_type() {
        assert_eq!("ao".parse::<ChannelType>().unwrap(), ChannelType::AnalogOut);
        assert_eq!("do".parse::<ChannelType>().unwrap(), ChannelType::DigitalOut);
        assert_eq!("ai".parse::<ChannelType>().unwrap(), ChannelType::AnalogIn);
        let err = "counter".parse::<ChannelType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedChannelType(ref t) if t == "counter"));
        assert!(err.to_string().contains("Unsupported channel type 'counter'"));
    }

    #[test]
    fn test_new_config() {
        let config = ChannelConfig::new("command", "DAQ", "ao", None).unwrap();
        assert_eq!(config.scale(), 1.0);
        assert_eq!(config.device(), "DAQ");
        assert!(config.channel_type().is_output());

        assert!(matches!(
            ChannelConfig::new("command", "DAQ", "xx", None),
            Err(Error::UnsupportedChannelType(_))
        ));
        assert!(matches!(
            ChannelConfig::new("command", "DAQ", "ao", Some(0.0)),
            Err(Error::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_deserialize_config() {
        let config: ChannelConfig = serde_json::from_str(
            r#"{"name": "primary", "device": "DAQ", "type": "ai", "scale": 0.05}"#,
        )
        .unwrap();
        assert_eq!(config.channel_type(), ChannelType::AnalogIn);
        assert_eq!(config.scale(), 0.05);

        let config: ChannelConfig =
            serde_json::from_str(r#"{"name": "ttl", "device": "DAQ", "type": "do"}"#).unwrap();
        assert_eq!(config.scale(), 1.0);

        let err = serde_json::from_str::<ChannelConfig>(
            r#"{"name": "x", "device": "DAQ", "type": "pwm"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported channel type 'pwm'"));
    }
}
