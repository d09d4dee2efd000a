//! Show the resolved server configuration.

use crate::config::{self, CliOverrides};
use crate::error::Result;
use tracing::debug;

/// Execute the config command.
///
/// Prints YAML by default, JSON with `--json`.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or serialized.
pub fn execute(json: bool, cli: &CliOverrides) -> Result<()> {
    let resolved = config::load_config(cli)?;
    debug!(config = ?resolved, "Resolved configuration");

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", serde_yaml::to_string(&resolved)?);
    }
    Ok(())
}
