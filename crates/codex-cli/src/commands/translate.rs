use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::OutputFormat;
use codex_config::CodexConfig;
use codex_query::{IdentifierType, Translation, Translator};

/// JSON shape of `codex translate`
#[derive(Debug, Serialize)]
struct TranslateOutput<'a> {
    query: &'a str,
    offset: u32,
    limit: u32,
    queries: Vec<String>,
    instance_index: usize,
    pages: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier_type: Option<IdentifierType>,
}

/// Execute translate command
pub fn execute(
    config: &CodexConfig,
    query: &str,
    offset: u32,
    limit: Option<u32>,
    format: OutputFormat,
    urls: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(config.translate.default_limit);
    let translation = Translator::from_config(&config.translate).translate(query, offset, limit)?;

    let queries = if urls {
        endpoint_urls(config, &translation)?
    } else {
        translation.queries.clone()
    };

    match format {
        OutputFormat::Json => {
            let output = TranslateOutput {
                query,
                offset,
                limit,
                queries,
                instance_index: translation.instance_index,
                pages: translation.plan.pages(),
                identifier_type: translation.identifier_type,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for query in &queries {
                println!("{}", query);
            }
            println!("instance index: {}", translation.instance_index);
            if let Some(kind) = translation.identifier_type {
                println!("identifier type: {}", describe(kind));
            }
        }
    }

    Ok(())
}

fn describe(kind: IdentifierType) -> &'static str {
    match kind {
        IdentifierType::Unknown => "unrecognised",
        known => known.display_name(),
    }
}

fn endpoint_urls(config: &CodexConfig, translation: &Translation) -> Result<Vec<String>> {
    let rmapi = config
        .rmapi
        .as_ref()
        .context("--urls needs an [rmapi] section in the config file or CODEX_RMAPI_* variables")?;
    rmapi.validate().context("Invalid RM API configuration")?;
    let rmapi = rmapi.normalized();

    Ok(translation
        .queries
        .iter()
        .map(|query| rmapi.titles_url(query))
        .collect())
}
