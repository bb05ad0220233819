//! `ledger` command: drives the people and transactions screens over HTTP.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use ledger_client::config::GatewaySettings;
use ledger_client::inbound::TerminalNotifier;
use ledger_client::inbound::cli::{self, Cli, RunError};
use ledger_client::outbound::gateway::HttpLedgerGateway;
use ledger_client::telemetry;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::fmt;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(telemetry::filter_from_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Cli::parse();
    let settings = GatewaySettings::from_environment()
        .wrap_err("failed to load gateway settings")?
        .with_overrides(args.base_url.clone(), args.timeout_seconds);
    let endpoint = settings
        .resolve()
        .wrap_err("invalid gateway settings")?;

    let gateway = HttpLedgerGateway::new(endpoint.base_url, endpoint.timeout)
        .wrap_err("failed to build gateway HTTP client")?;
    let notifier = TerminalNotifier::stderr();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build ledger runtime")?;

    let mut stdout = io::stdout().lock();
    let outcome = runtime.block_on(cli::run(
        &args.command,
        Arc::new(gateway),
        Arc::new(notifier),
        &mut stdout,
    ));
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(RunError::Sync(failure)) => {
            debug!(code = ?failure.code(), error = %failure, "command failed");
            Ok(ExitCode::FAILURE)
        }
        Err(failure @ RunError::Output(_)) => Err(failure.into()),
    }
}
