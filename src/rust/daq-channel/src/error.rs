// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unsupported channel type '{0}'. Expected one of 'ao', 'do' or 'ai'.")]
    UnsupportedChannelType(String),
    #[error("Channel '{channel}' is not an {expected} channel.")]
    ChannelKindMismatch {
        channel: String,
        expected: &'static str,
    },
    #[error("Channel '{channel}' has an invalid scale factor: {scale}.")]
    InvalidScale { channel: String, scale: f64 },
    #[error("Invalid sample rate: {rate} Hz.")]
    InvalidAcquisition { rate: f64 },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    pub fn new<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Anyhow(anyhow::anyhow!(msg.to_string()))
    }
}
