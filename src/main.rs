// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bitaxe Notifier daemon.
//!
//! Reads its settings from the environment (and a `.env` file in the working
//! directory), then watches the configured miners until interrupted.

use std::process::ExitCode;

use bitaxe_notifier::logging;
use bitaxe_notifier::{DeviceClient, EmailNotifier, Monitor, Notifier, Settings, StatusSource};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::from_filename(".env").ok();

    let _guard = match logging::init(".", logging::LOG_FILE) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting Bitaxe Notifier.");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match DeviceClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let monitor = Monitor::new(&settings, client, EmailNotifier::new(settings.smtp.clone()));

    tokio::select! {
        code = watch(&monitor) => code,
        () = interrupted() => {
            tracing::info!("Stopped by user.");
            ExitCode::SUCCESS
        }
    }
}

/// Initializes the monitor and runs it until it fails.
async fn watch<S, N>(monitor: &Monitor<S, N>) -> ExitCode
where
    S: StatusSource,
    N: Notifier,
{
    let mut store = match monitor.initialize().await {
        Ok(store) => store,
        Err(_) => return ExitCode::FAILURE,
    };

    if let Err(e) = monitor.run(&mut store).await {
        tracing::error!("Unexpected error: {e}");
    }
    ExitCode::SUCCESS
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
