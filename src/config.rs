use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::ai::DEFAULT_MAX_INPUT_CHARS;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3-0324";
pub const DEFAULT_MODEL_BASE_URL: &str = "https://api.bytez.com/models/v2";

#[derive(Debug, Clone, Parser)]
#[command(name = "codeshell", version, about = "AI gateway proxy for the codeshell workspace")]
pub struct Cli {
    /// Listen address, e.g. 127.0.0.1:3001.
    #[arg(long, env = "CODESHELL_BIND_ADDR")]
    pub bind: Option<String>,

    /// Port on the loopback interface; ignored when --bind is given.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, env = "BYTEZ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "CODESHELL_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "CODESHELL_MODEL_BASE_URL", default_value = DEFAULT_MODEL_BASE_URL)]
    pub base_url: String,

    #[arg(long, env = "CODESHELL_MAX_INPUT_CHARS", default_value_t = DEFAULT_MAX_INPUT_CHARS)]
    pub max_input_chars: usize,

    /// Also write daily-rotated logs here.
    #[arg(long, env = "CODESHELL_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BYTEZ_API_KEY (or --api-key) is required")]
    MissingApiKey,
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
    #[error("max input chars must be greater than zero")]
    ZeroInputLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_input_chars: usize,
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let bind_addr = match (cli.bind.as_deref().map(str::trim), cli.port) {
            (Some(value), _) if !value.is_empty() => {
                value
                    .parse()
                    .map_err(|source| ConfigError::InvalidBindAddr {
                        value: value.to_string(),
                        source,
                    })?
            }
            (_, Some(port)) => SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port),
            _ => SocketAddr::from(([127, 0, 0, 1], 3001)),
        };

        let api_key = cli
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        if cli.max_input_chars == 0 {
            return Err(ConfigError::ZeroInputLimit);
        }

        Ok(Self {
            bind_addr,
            api_key,
            model: cli.model,
            base_url: cli.base_url,
            max_input_chars: cli.max_input_chars,
            log_dir: cli.log_dir,
        })
    }
}
