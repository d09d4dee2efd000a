//! Print the JSON Schema of an issue record.

use crate::error::Result;
use crate::model::Issue;
use schemars::schema_for;

/// Execute the schema command.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn execute() -> Result<()> {
    let schema = schema_for!(Issue);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
