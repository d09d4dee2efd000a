//! Configuration management for `issue_board`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables
//! 3. Config file (`--config` or `ISSUE_BOARD_CONFIG`, YAML)
//! 4. Defaults

use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Port used when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "ISSUE_BOARD_CONFIG";
/// Environment variable overriding the bind address.
pub const BIND_ENV: &str = "ISSUE_BOARD_BIND";
/// Environment variable toggling CORS.
pub const CORS_ENV: &str = "ISSUE_BOARD_CORS";
/// Conventional platform port variable; binds all interfaces.
pub const PORT_ENV: &str = "PORT";

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            cors: true,
        }
    }
}

/// Keys accepted in the YAML config file. All are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    bind_addr: Option<String>,
    cors: Option<bool>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub bind: Option<String>,
    pub cors: Option<bool>,
}

/// Resolve configuration from the process environment.
///
/// # Errors
///
/// Returns an error if the config file is missing or invalid, or any
/// setting cannot be parsed.
pub fn load_config(cli: &CliOverrides) -> Result<ServerConfig> {
    load_config_with_env(cli, |key| env::var(key).ok())
}

/// Resolve configuration with an explicit environment lookup.
///
/// # Errors
///
/// Returns an error if the config file is missing or invalid, or any
/// setting cannot be parsed.
pub fn load_config_with_env<F>(cli: &CliOverrides, env_lookup: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env_lookup(key).filter(|value| !value.trim().is_empty());
    let mut config = ServerConfig::default();

    let file_path = cli
        .config_path
        .clone()
        .or_else(|| lookup(CONFIG_ENV).map(PathBuf::from));
    if let Some(path) = file_path {
        let file = read_config_file(&path)?;
        if let Some(value) = file.bind_addr {
            config.bind_addr = parse_bind(&value, "config file bind_addr")?;
        }
        if let Some(value) = file.cors {
            config.cors = value;
        }
    }

    if let Some(value) = lookup(PORT_ENV) {
        let port: u16 = value
            .trim()
            .parse()
            .map_err(|_| BoardError::config(format!("{PORT_ENV}: invalid port '{value}'")))?;
        config.bind_addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    }
    if let Some(value) = lookup(BIND_ENV) {
        config.bind_addr = parse_bind(&value, BIND_ENV)?;
    }
    if let Some(value) = lookup(CORS_ENV) {
        config.cors = parse_bool(&value, CORS_ENV)?;
    }

    if let Some(value) = &cli.bind {
        config.bind_addr = parse_bind(value, "--bind")?;
    }
    if let Some(value) = cli.cors {
        config.cors = value;
    }

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.is_file() {
        return Err(BoardError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(&contents)?)
}

fn parse_bind(value: &str, source: &str) -> Result<SocketAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| BoardError::config(format!("{source}: invalid socket address '{value}'")))
}

fn parse_bool(value: &str, source: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BoardError::config(format!(
            "{source}: expected true/false, got '{value}'"
        ))),
    }
}
