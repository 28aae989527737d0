//! # mapq - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) of the
//! mapq filter language, a tiny boolean expression language evaluated against
//! nested key/value documents.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes and dotted field paths
//! - **[operators]** - Binary and unary operators
//!
//! ## Quick Start
//!
//! ```text
//! user.age >= 18 && status == 'active'
//! ```
//!
//! This expression is true for documents whose nested `user.age` is at least
//! 18 and whose `status` field equals the string `active`.
//!
//! ## Core Concepts
//!
//! ### Field Paths
//!
//! Bare identifiers select fields of the document. Dots walk into nested
//! objects: `a.b.c` reads `c` inside `b` inside `a`. A missing final key reads
//! as `null`; a missing or non-object intermediate key is an evaluation error.
//!
//! ### Precedence
//!
//! From loosest to tightest binding:
//!
//! - `&&` and `||` (same level, folded left to right)
//! - `==`, `!=`, `>`, `<`, `>=`, `<=` (folded left to right)
//! - `+`, `-`
//! - `*`, `/`
//! - unary `+`/`-`, `!`, literals, paths and parentheses
//!
//! ### Numbers
//!
//! Every numeric literal is held as an `f64`. Arithmetic and ordering coerce
//! non-numeric operands to `0.0`.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, FieldPath};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Token, TokenKind};
