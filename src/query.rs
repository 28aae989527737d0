//! One-shot entry points composing parse, decode and evaluate.

use thiserror::Error;

use crate::{
    ast::Expr,
    convert::{self, DecodeError},
    evaluator::{EvalError, evaluate},
    lexer::Lexer,
    parser::{ParseError, ParseOptions, Parser},
    value::Document,
};

/// Any failure of the one-shot entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Parses an expression with the default options.
///
/// # Examples
///
/// ```
/// use mapq::{parse, ParseError};
///
/// assert!(parse("a.b == 'x' && n > 2").is_ok());
/// assert!(matches!(parse("a =="), Err(ParseError::EndOfStream { .. })));
/// ```
pub fn parse(expression: &str) -> Result<Expr, ParseError> {
    parse_with(expression, ParseOptions::default())
}

/// Parses an expression with explicit options.
pub fn parse_with(expression: &str, options: ParseOptions) -> Result<Expr, ParseError> {
    let mut parser = Parser::with_options(Lexer::new(expression), options);
    let expr = parser.parse()?;
    log::debug!("parsed expression {:?}", expression);
    Ok(expr)
}

/// Parses `expression` and evaluates it against `document`.
///
/// # Examples
///
/// ```
/// use mapq::{Document, Value, query};
///
/// let mut inner = Document::new();
/// inner.insert("c".to_string(), Value::Integer(3));
/// let mut doc = Document::new();
/// doc.insert("a".to_string(), Value::Object(inner));
///
/// assert!(query(&doc, "a.c == 3").unwrap());
/// assert!(!query(&doc, "a.missing == 3").unwrap());
/// ```
pub fn query(document: &Document, expression: &str) -> Result<bool, Error> {
    let expr = parse(expression)?;
    Ok(evaluate(&expr, document)?)
}

/// Decodes one JSON object and queries it.
pub fn query_json(json: &str, expression: &str) -> Result<bool, Error> {
    let document = convert::document_from_str(json)?;
    query(&document, expression)
}

/// True if any element decodes to a document that satisfies `expr`.
///
/// Elements that fail to decode count as non-matches. Evaluation errors are
/// returned.
pub fn any_match_parsed<I>(expr: &Expr, documents: I) -> Result<bool, EvalError>
where
    I: IntoIterator<Item = serde_json::Value>,
{
    for (index, item) in documents.into_iter().enumerate() {
        let document = match convert::json_to_document(item) {
            Ok(document) => document,
            Err(e) => {
                log::debug!("skipping element {}: {}", index, e);
                continue;
            }
        };
        if evaluate(expr, &document)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Parses `expression` once and tests it against every element in turn.
///
/// # Examples
///
/// ```
/// use mapq::any_match;
/// use serde_json::json;
///
/// let records = vec![json!({"a": 1}), json!("not a document"), json!({"a": 2})];
/// assert!(any_match(records.clone(), "a == 2").unwrap());
/// assert!(!any_match(records, "a == 3").unwrap());
/// ```
pub fn any_match<I>(documents: I, expression: &str) -> Result<bool, Error>
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let expr = parse(expression)?;
    Ok(any_match_parsed(&expr, documents)?)
}

/// Decodes a JSON array and runs [`any_match`] over its elements.
pub fn any_match_json(json: &str, expression: &str) -> Result<bool, Error> {
    let items = convert::batch_from_str(json)?;
    any_match(items, expression)
}
