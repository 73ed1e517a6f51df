// Copyright 2026 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logging macros shared by the DAQ channel crates.
//!
//! All records are emitted through the `log` facade with a target of the form
//! `daqchan::<module path>`, so that the host can filter the channel engine
//! independently of its own logging.

use std::sync::{atomic::AtomicBool, atomic::Ordering};

#[doc(hidden)]
pub use log as _log;


#[macro_export]
macro_rules! debug {
    ($msg:literal, $($arg:tt)+) => {
        daq_log::_log::debug!(target: concat!("daqchan::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        daq_log::_log::debug!(target: concat!("daqchan::", module_path!()), $msg);
    };
}

#[macro_export]
macro_rules! info {
    ($msg:literal, $($arg:tt)+) => {
        daq_log::_log::info!(target: concat!("daqchan::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        daq_log::_log::info!(target: concat!("daqchan::", module_path!()), $msg);
    };
}

#[macro_export]
macro_rules! warn {
    ($msg:literal, $($arg:tt)+) => {
        daq_log::_log::warn!(target: concat!("daqchan::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        daq_log::_log::warn!(target: concat!("daqchan::", module_path!()), $msg);
    };
}

/// Log a diagnostic message at info level if diagnostics logging is enabled.
#[macro_export]
macro_rules! diagnostic {
    ($msg:literal, $($arg:tt)+) => {
        if daq_log::is_diagnostics_enabled() {
             daq_log::_log::info!(target: concat!("daqchan::", module_path!()), $msg, $($arg)+);
        }
    };
    ($msg:literal) => {
        if daq_log::is_diagnostics_enabled() {
            daq_log::_log::info!(target: concat!("daqchan::", module_path!()), $msg);
        }
    };
}

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::Acquire)
}

/// Initialize the logging.
///
/// Only toggles the diagnostics switch. Installing a concrete logger is left to
/// the host application, e.g. `env_logger` in the command-line shell.
pub fn init_logging(with_diagnostics: bool) {
    DIAGNOSTICS_ENABLED.store(with_diagnostics, Ordering::Release);
}
