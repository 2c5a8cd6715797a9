//! RM API query renderer.
//!
//! Renders a [`TranslationContext`] to the RM API titles query string:
//!
//! ```text
//! search=<value>&searchfield=<field>[&resourcetype=<type>][&selection=<sel>]&orderby=<key>&count=<limit>&offset=<page>
//! ```
//!
//! Key order is fixed. The search value is form encoded.

use crate::error::{TranslationError, TranslationResult};
use crate::fields::{self, DEFAULT_ORDER_BY};
use crate::ir::TranslationContext;
use crate::render::QueryRenderer;

/// Form encoding: UTF-8 percent-encoding with space as `+`
pub fn form_encode(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// RM API titles query renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct RmApiRenderer;

impl RmApiRenderer {
    /// Create the renderer
    pub fn new() -> Self {
        Self
    }

    /// `selection` parameter for the raw `ext.selected` value
    fn selection(raw: &str) -> TranslationResult<&'static str> {
        fields::selection(raw).ok_or_else(|| TranslationError::UnsupportedValue {
            field: "Selected".to_string(),
            value: raw.to_string(),
        })
    }
}

impl QueryRenderer for RmApiRenderer {
    fn name(&self) -> &str {
        "rmapi"
    }

    fn render(&self, ctx: &TranslationContext, limit: u32, page: u64) -> TranslationResult<String> {
        let search = ctx
            .search()
            .ok_or_else(|| TranslationError::empty("Invalid query format, unsupported search parameters"))?;

        let mut params = vec![
            ("search", form_encode(&search.value)),
            ("searchfield", search.field.rm_api_name().to_string()),
        ];

        if let Some(filter) = ctx.filter() {
            params.push(("resourcetype", form_encode(&filter.resource_type)));
        }

        if let Some(raw) = ctx.selection() {
            params.push(("selection", Self::selection(raw)?.to_string()));
        }

        params.push(("orderby", ctx.sort().unwrap_or(DEFAULT_ORDER_BY).to_string()));
        params.push(("count", limit.to_string()));
        params.push(("offset", page.to_string()));

        Ok(params
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&"))
    }
}
