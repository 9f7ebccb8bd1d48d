//! Call the halliday account API from the command line

/// Subcommands, one per endpoint
mod command;

/// Configuration and argument parsing
mod config;

/// Keeping the session cookie between runs
mod session;

use clap::Parser;
use command::Report;
use halliday_core::{api, Client};
use session::Session;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let config = config::Config::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(config).await {
        Ok(code) => code,
        Err(problem) => {
            tracing::error!(?problem, "could not run command");
            eprintln!("{problem}");
            ExitCode::FAILURE
        }
    }
}

/// Run one command against the API, keeping the session up to date.
async fn run(config: config::Config) -> Result<ExitCode, Problem> {
    let api_config = config.api()?;

    let session = Session::load(&config.data_dir(), &api_config.base_url).await?;
    let client = Client::with_cookie_jar(api_config, session.jar())?;

    let report = config.command.run(&client).await;

    // Whatever happened, the server may have set or cleared cookies.
    session.save().await?;

    print(&report)?;

    Ok(if report.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Show the result on stdout: envelopes as JSON, page outcomes as a line.
fn print(report: &Report) -> Result<(), Problem> {
    let mut out = io::stdout().lock();

    match report {
        Report::Envelope(envelope) => {
            serde_json::to_writer_pretty(&mut out, envelope)?;
            writeln!(out)?;
        }
        Report::Page(page) => {
            if let Some(to) = &page.navigated_to {
                writeln!(out, "navigate: {to}")?;
            }
            if let Some(message) = &page.error {
                writeln!(out, "error: {message}")?;
            }
        }
    }

    Ok(())
}

/// Problems that can happen outside of the API calls themselves.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem reading or writing the session file or stdout.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We had a problem loading or saving JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client couldn't be set up, for example because of a bad base URL.
    #[error("Could not set up the client: {0}")]
    Client(#[from] api::Error),

    /// The server set a cookie we can't store as text.
    #[error("Unreadable cookie: {0}")]
    Cookie(#[from] reqwest::header::ToStrError),
}
