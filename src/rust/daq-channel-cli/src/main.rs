// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Command-line host for DAQ channel documents.
//!
//! Loads a channel document and prints the requested result as JSON.

mod document;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use daq_channel::{Combination, DaqChannel};

use crate::document::{ChannelDocument, expand_protocols, parse_param};

#[derive(Parser, Debug)]
#[command(version, about = "Generate DAQ channel command waveforms and protocols")]
struct Cli {
    /// Channel document (JSON).
    document: PathBuf,
    /// Log diagnostic messages.
    #[arg(long)]
    diagnostics: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the sequenced parameters and their number of values.
    Sequences,
    /// Waveforms of every sequence combination and the single-mode waveform.
    Waves,
    /// Protocol fragment for a single combination.
    Protocol {
        /// Sequence index of a parameter, e.g. `--param amp=2`.
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, usize)>,
    },
    /// Protocol fragments of all combinations.
    Expand,
}

fn run(command: Command, channel: &DaqChannel) -> Result<serde_json::Value> {
    let value = match command {
        Command::Sequences => serde_json::to_value(channel.list_sequence())?,
        Command::Waves => match channel {
            DaqChannel::Output(output) => serde_json::to_value(output.update_waves())?,
            DaqChannel::Input(_) => bail!(
                "Channel '{}' is an input channel and has no command waveforms",
                channel.name()
            ),
        },
        Command::Protocol { params } => {
            let combination: Combination = params.into_iter().collect();
            let params = (!combination.is_empty()).then_some(&combination);
            serde_json::to_value(channel.generate_protocol(params))?
        }
        Command::Expand => serde_json::to_value(expand_protocols(channel))?,
    };
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    daq_log::init_logging(cli.diagnostics);

    let channel = ChannelDocument::load(&cli.document)?.into_channel()?;
    let output = run(cli.command, &channel)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
