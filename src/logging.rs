// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Log output to the console and a log file.
//!
//! Both sinks receive the same lines: timestamp, level and message. The level
//! defaults to `info` and can be changed through `RUST_LOG`.

use std::path::Path;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file written in the working directory.
pub const LOG_FILE: &str = "bitaxe-notifier.log";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened.
    #[error("failed to open log file: {0}")]
    File(#[from] InitError),

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Installs the global subscriber, appending to `directory/file_name`.
///
/// The returned guard flushes the file writer on drop and must be kept
/// alive for as long as the process logs.
///
/// # Errors
///
/// Returns error if the file cannot be opened or a subscriber is already set.
pub fn init(directory: impl AsRef<Path>, file_name: &str) -> Result<WorkerGuard, LoggingError> {
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()?;

    Ok(guard)
}
