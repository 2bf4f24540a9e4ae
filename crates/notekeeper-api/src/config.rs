use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required value: {0}")]
    MissingValue(&'static str),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line options; every flag can also come from the environment.
#[derive(Debug, Parser)]
#[command(name = "notekeeper-api")]
#[command(about = "Serve a directory of text notes over HTTP")]
#[command(version)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Address to bind the server to
    #[arg(short = 'h', long, env = "NOTEKEEPER_HOST", value_name = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "NOTEKEEPER_PORT", value_name = "PORT")]
    pub port: u16,

    /// Directory holding one file per note
    #[arg(short, long, env = "NOTEKEEPER_CACHE_DIR", value_name = "DIR")]
    pub cache: PathBuf,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cache_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let host = cli.host.trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::MissingValue("--host"));
        }

        if cli.port == 0 {
            return Err(ConfigError::Invalid(
                "--port must be in [1, 65535]".to_string(),
            ));
        }

        if cli.cache.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("--cache"));
        }
        if !cli.cache.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "--cache must be an existing directory: {}",
                cli.cache.display()
            )));
        }

        Ok(Self {
            host,
            port: cli.port,
            cache_dir: cli.cache,
        })
    }

    /// Socket address accepted by `TcpListener::bind`; works for IPv6 hosts too.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
