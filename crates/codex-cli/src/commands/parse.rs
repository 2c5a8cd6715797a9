use anyhow::Result;

use crate::cli::OutputFormat;

/// Execute parse command
///
/// Only checks syntax, so queries outside the supported subset still print.
pub fn execute(query: &str, format: OutputFormat) -> Result<()> {
    let tree = codex_query::parse(query)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Text => println!("{}", tree),
    }

    Ok(())
}
