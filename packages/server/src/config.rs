//! Startup configuration, read once from flags or the environment.

use clap::Parser;
use thiserror::Error;

use crate::domain::AdminToken;

#[derive(Parser, Debug, Clone)]
#[command(name = "onair-server")]
#[command(about = "Broadcast state relay pushing widget state to overlay clients", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Shared secret controllers must send with every mutating command.
    /// A random one is generated when absent or empty.
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,
}

/// Where the admin token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Provided,
    Generated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ADMIN_TOKEN must not be blank")]
    BlankAdminToken,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_token: AdminToken,
    pub token_source: TokenSource,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Result<Self, ConfigError> {
        let (admin_token, token_source) = match args.admin_token {
            None => (AdminToken::generate(), TokenSource::Generated),
            Some(token) if token.is_empty() => (AdminToken::generate(), TokenSource::Generated),
            Some(token) => (
                AdminToken::new(token).ok_or(ConfigError::BlankAdminToken)?,
                TokenSource::Provided,
            ),
        };

        Ok(Self {
            host: args.host,
            port: args.port,
            admin_token,
            token_source,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
