//! mapq - boolean filter expressions over nested key/value documents.
//!
//! ```
//! use mapq::query_json;
//!
//! let doc = r#"{"user": {"age": 30, "name": "ann"}, "active": true}"#;
//! assert!(query_json(doc, "user.age >= 18 && active == true").unwrap());
//! ```
pub mod ast;
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod query;
pub mod value;

pub use ast::{BinOp, Expr, FieldPath, Token, TokenKind, UnaryOp};
pub use convert::{DecodeError, json_to_document, value_to_json};
pub use evaluator::{EvalError, Evaluator, PathFailure, evaluate};
pub use lexer::{Checkpoint, LexError, Lexer};
pub use parser::{DEFAULT_MAX_CHAIN_LENGTH, DEFAULT_MAX_DEPTH, ParseError, ParseOptions, Parser};
pub use query::{
    Error, any_match, any_match_json, any_match_parsed, parse, parse_with, query, query_json,
};
pub use value::{Document, Value};
