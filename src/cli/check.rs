//! Evaluate one query against JSON input

use super::CliError;
use crate::{
    DEFAULT_MAX_DEPTH, ParseOptions, any_match_parsed, convert::json_to_document, evaluate,
    parse_with,
};

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// The filter expression
    pub query: String,
    /// JSON input string, either one object or an array of objects
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Nesting limit handed to the parser
    pub max_depth: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            query: String::new(),
            input: None,
            syntax_only: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of a check operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The expression was evaluated; for an array, whether any element matched
    Matched(bool),
}

/// Execute a mapq check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let parse_options = ParseOptions::default().with_max_depth(options.max_depth);
    let expr = parse_with(&options.query, parse_options)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let input: serde_json::Value = serde_json::from_str(json_str)?;

    let matched = match input {
        serde_json::Value::Array(items) => any_match_parsed(&expr, items)?,
        other => {
            let document = json_to_document(other)?;
            evaluate(&expr, &document)?
        }
    };
    Ok(CheckResult::Matched(matched))
}
