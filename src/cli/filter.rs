//! Keep the elements of a JSON array that satisfy a query

use super::CliError;
use crate::{
    DEFAULT_MAX_DEPTH, ParseOptions, Value,
    convert::{batch_from_str, json_to_document, value_to_json},
    evaluate, parse_with,
};

/// Options for the filter command
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub query: String,
    /// JSON array input
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    pub max_depth: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            query: String::new(),
            input: None,
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Returns the matching elements, in input order, as a JSON array.
///
/// Elements that are not decodable documents are skipped with a warning.
/// Evaluation errors abort the whole run. Kept elements are re-encoded from
/// the decoded document, so integers beyond `i64` come back as floats.
pub fn execute_filter(options: &FilterOptions) -> Result<serde_json::Value, CliError> {
    let parse_options = ParseOptions::default().with_max_depth(options.max_depth);
    let expr = parse_with(&options.query, parse_options)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let items = batch_from_str(json_str)?;

    let mut kept = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let document = match json_to_document(item) {
            Ok(document) => document,
            Err(e) => {
                log::warn!("skipping element {}: {}", index, e);
                continue;
            }
        };
        if evaluate(&expr, &document)? {
            kept.push(value_to_json(&Value::Object(document)));
        }
    }

    log::debug!("filter kept {} element(s)", kept.len());
    Ok(serde_json::Value::Array(kept))
}
