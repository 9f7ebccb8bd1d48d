use crate::command::Command;
use clap::{Parser, ValueEnum};
use halliday_core::api::{self, Environment};
use std::path::PathBuf;

/// Talk to the halliday account API from the command line
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Which deployment of the API to talk to
    #[clap(long, env = "HALLIDAY_ENVIRONMENT", value_enum, default_value_t = Target::Production)]
    environment: Target,

    /// Talk to this server instead (e.g. `http://localhost:8080`.) Overrides
    /// `--environment`.
    #[clap(long, env = "HALLIDAY_BASE_URL")]
    base_url: Option<String>,

    /// Where should we store the session?
    #[clap(long, env = "HALLIDAY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// What to do
    #[clap(subcommand)]
    pub command: Command,
}

/// The deployments you can pick with `--environment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// `http://localhost:3000`
    Development,

    /// `https://api.halliday.dev`
    Production,
}

impl From<Target> for Environment {
    fn from(target: Target) -> Self {
        match target {
            Target::Development => Self::Development,
            Target::Production => Self::Production,
        }
    }
}

impl Config {
    /// The client configuration these options describe.
    ///
    /// ## Errors
    ///
    /// If `--base-url` isn't an absolute URL.
    pub fn api(&self) -> api::error::Result<api::Config> {
        match &self.base_url {
            Some(base_url) => api::Config::new(base_url),
            None => Ok(api::Config::for_environment(self.environment.into())),
        }
    }

    /// Get either the configured or a default data directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("dev", "halliday", "halliday")
                    .map(|dirs| dirs.data_local_dir().to_owned())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
