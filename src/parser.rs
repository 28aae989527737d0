//! Backtracking recursive-descent parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! boolexp     := compare ( ("&&" | "||") compare )*
//! compare     := boolean ( relop boolean )*
//! boolean     := "true" | "false" | addedFactor | "!" boolean | "(" boolexp ")"
//! addedFactor := factor ( ("+" | "-") factor )*
//! factor      := symbol ( ("*" | "/") symbol )*
//! symbol      := ("+" | "-")? number
//! number      := string | fieldPath | "null" | FLOAT | INT | "(" boolexp ")"
//! fieldPath   := VAR ( "." fieldPath )?
//! ```
//!
//! Alternatives are tried in the order written. A production that fails puts
//! the lexer back where it started, so the next alternative sees the same
//! input.

use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, FieldPath, Token, TokenKind, UnaryOp},
    lexer::{LexError, Lexer},
};

/// Default bound on expression nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Default bound on the operators of one chain and the dots of one path.
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 4096;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of groups, negations and signs
    pub max_depth: usize,
    /// Maximum operators in one left-folded chain, and dots in one field path
    pub max_chain_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_chain_length(mut self, max_chain_length: usize) -> Self {
        self.max_chain_length = max_chain_length;
        self
    }
}

/// Errors that can occur while parsing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input ended where a token was required
    #[error("Unexpected end of expression at position {position}")]
    EndOfStream { position: usize },

    /// A token of the wrong type was found
    #[error("Expected {expected}, found {found} '{text}' at position {position}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        position: usize,
    },

    /// The lexer rejected the input
    #[error("Scan error: {0}")]
    Scan(LexError),

    /// No alternative of an operand matched
    #[error("No expression matches at position {position}: {source}")]
    NoAlternative {
        position: usize,
        #[source]
        source: Box<ParseError>,
    },

    /// A numeric literal could not be converted
    #[error("Invalid number literal '{literal}' at position {position}")]
    InvalidNumber { literal: String, position: usize },

    /// A complete expression was followed by more input
    #[error("Unexpected trailing input '{text}' at position {position}")]
    TrailingInput { text: String, position: usize },

    /// The expression nests deeper than `ParseOptions::max_depth`
    #[error("Expression nesting exceeds the maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },

    /// An operator chain or field path is longer than
    /// `ParseOptions::max_chain_length`
    #[error("Operator chain exceeds the maximum length of {max_chain_length}")]
    ChainTooLong { max_chain_length: usize },
}

impl ParseError {
    /// True when a sibling production may still match at the same position.
    pub fn is_backtrackable(&self) -> bool {
        matches!(
            self,
            ParseError::EndOfStream { .. }
                | ParseError::UnexpectedToken { .. }
                | ParseError::NoAlternative { .. }
        )
    }

    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ParseError::EndOfStream { .. })
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        match e {
            LexError::EndOfStream { position } => ParseError::EndOfStream { position },
            LexError::TypeMismatch {
                expected,
                found,
                text,
                position,
            } => ParseError::UnexpectedToken {
                expected,
                found,
                text,
                position,
            },
            other => ParseError::Scan(other),
        }
    }
}

/// Maps a backtrackable failure to `None`; fatal errors pass through.
fn optional<T, E: Into<ParseError>>(result: Result<T, E>) -> Result<Option<T>, ParseError> {
    match result.map_err(Into::into) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_backtrackable() => Ok(None),
        Err(e) => Err(e),
    }
}

fn logical_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::And => Some(BinOp::And),
        TokenKind::Or => Some(BinOp::Or),
        _ => None,
    }
}

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Eq => Some(BinOp::Equal),
        TokenKind::Neq => Some(BinOp::NotEqual),
        TokenKind::Gt => Some(BinOp::GreaterThan),
        TokenKind::Lt => Some(BinOp::LessThan),
        TokenKind::Geq => Some(BinOp::GreaterEqual),
        TokenKind::Leq => Some(BinOp::LessEqual),
        _ => None,
    }
}

fn additive_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Plus => Some(BinOp::Add),
        TokenKind::Minus => Some(BinOp::Subtract),
        _ => None,
    }
}

fn multiplicative_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::Mul => Some(BinOp::Multiply),
        TokenKind::Div => Some(BinOp::Divide),
        _ => None,
    }
}

fn parse_int(token: &Token) -> Result<f64, ParseError> {
    let text = token.text.as_str();
    let (digits, radix) = match text.get(..2) {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ => (text, 10),
    };
    i64::from_str_radix(digits, radix)
        .map(|n| n as f64)
        .map_err(|_| ParseError::InvalidNumber {
            literal: token.text.clone(),
            position: token.position,
        })
}

fn parse_float(token: &Token) -> Result<f64, ParseError> {
    token
        .text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            literal: token.text.clone(),
            position: token.position,
        })
}

/// Operand parser used by the left folds.
type Production = fn(&mut Parser, usize) -> Result<Expr, ParseError>;

pub struct Parser {
    lexer: Lexer,
    options: ParseOptions,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self::with_options(lexer, ParseOptions::default())
    }

    pub fn with_options(lexer: Lexer, options: ParseOptions) -> Self {
        Parser { lexer, options }
    }

    /// Parses the complete input as one boolean expression.
    ///
    /// Fails unless every token of the input is part of the expression.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.boolexp(0)?;

        match self.lexer.scan() {
            Err(LexError::EndOfStream { .. }) => Ok(expr),
            Ok(token) => Err(ParseError::TrailingInput {
                text: token.text,
                position: token.position,
            }),
            Err(e) => Err(ParseError::Scan(e)),
        }
    }

    /// Runs a production, rewinding the lexer if it fails.
    fn attempt<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let checkpoint = self.lexer.checkpoint();
        let result = production(self);
        if let Err(e) = &result {
            log::trace!(
                "backtracking from position {} to {:?}: {}",
                self.lexer.position(),
                checkpoint,
                e
            );
            self.lexer.restore(checkpoint);
        }
        result
    }

    fn deeper(&self, depth: usize) -> Result<usize, ParseError> {
        if depth >= self.options.max_depth {
            Err(ParseError::TooDeep {
                max_depth: self.options.max_depth,
            })
        } else {
            Ok(depth + 1)
        }
    }

    fn check_chain(&self, length: usize) -> Result<(), ParseError> {
        if length >= self.options.max_chain_length {
            Err(ParseError::ChainTooLong {
                max_chain_length: self.options.max_chain_length,
            })
        } else {
            Ok(())
        }
    }

    /// `operand ( op operand )*`, folded to the left.
    ///
    /// Operands of one chain stay at the caller's depth; only the chain
    /// length is bounded.
    fn fold_left(
        &mut self,
        depth: usize,
        operand: Production,
        operator: fn(TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        self.attempt(|p| {
            let mut left = operand(p, depth)?;
            let mut length = 0;

            loop {
                let checkpoint = p.lexer.checkpoint();
                let op = match p.lexer.scan() {
                    Ok(token) => operator(token.kind),
                    Err(_) => None,
                };
                let Some(op) = op else {
                    p.lexer.restore(checkpoint);
                    return Ok(left);
                };

                p.check_chain(length)?;
                length += 1;
                let right = operand(p, depth)?;
                left = Expr::binary(op, left, right);
            }
        })
    }

    fn boolexp(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.fold_left(depth, Self::compare, logical_op)
    }

    fn compare(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.fold_left(depth, Self::boolean, relational_op)
    }

    fn boolean(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.attempt(|p| {
            if optional(p.lexer.scan_expecting(TokenKind::True))?.is_some() {
                return Ok(Expr::Boolean(true));
            }
            if optional(p.lexer.scan_expecting(TokenKind::False))?.is_some() {
                return Ok(Expr::Boolean(false));
            }

            // Arithmetic first: `(a+b)` and `(a==1)` both start with '('
            let arithmetic = match p.added_factor(depth) {
                Ok(expr) => return Ok(expr),
                Err(e) if e.is_backtrackable() => e,
                Err(e) => return Err(e),
            };

            let token = p.lexer.scan()?;
            match token.kind {
                TokenKind::Not => {
                    let depth = p.deeper(depth)?;
                    let operand = p.boolean(depth)?;
                    Ok(Expr::not(operand))
                }
                // `number` already tried `"(" boolexp ")"` at this position and
                // depth; a second attempt cannot complete the parse and would
                // double the work per nesting level.
                TokenKind::LParen => Err(arithmetic),
                _ => Err(ParseError::NoAlternative {
                    position: token.position,
                    source: Box::new(arithmetic),
                }),
            }
        })
    }

    fn added_factor(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.fold_left(depth, Self::factor, additive_op)
    }

    fn factor(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.fold_left(depth, Self::symbol, multiplicative_op)
    }

    fn symbol(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.attempt(|p| {
            let checkpoint = p.lexer.checkpoint();
            let sign = match p.lexer.scan()?.kind {
                TokenKind::Plus => Some(UnaryOp::Plus),
                TokenKind::Minus => Some(UnaryOp::Minus),
                _ => None,
            };

            match sign {
                Some(op) => {
                    let depth = p.deeper(depth)?;
                    let operand = p.number(depth)?;
                    Ok(Expr::unary(op, operand))
                }
                None => {
                    p.lexer.restore(checkpoint);
                    p.number(depth)
                }
            }
        })
    }

    fn number(&mut self, depth: usize) -> Result<Expr, ParseError> {
        self.attempt(|p| {
            if let Some(token) = optional(p.lexer.scan_expecting(TokenKind::Str))? {
                return Ok(Expr::String(token.text));
            }
            if let Some(path) = optional(p.field_path())? {
                return Ok(Expr::Field(path));
            }
            if optional(p.lexer.scan_expecting(TokenKind::Null))?.is_some() {
                return Ok(Expr::Null);
            }

            let checkpoint = p.lexer.checkpoint();
            let token = p.lexer.scan()?;
            match token.kind {
                TokenKind::Float => return parse_float(&token).map(Expr::Number),
                TokenKind::Int => return parse_int(&token).map(Expr::Number),
                _ => p.lexer.restore(checkpoint),
            }

            p.lexer.scan_expecting(TokenKind::LParen)?;
            let depth = p.deeper(depth)?;
            let inner = p.boolexp(depth)?;
            p.lexer.scan_expecting(TokenKind::RParen)?;
            Ok(inner)
        })
    }

    fn field_path(&mut self) -> Result<FieldPath, ParseError> {
        self.attempt(|p| {
            let first = p.lexer.scan_expecting(TokenKind::Var)?.text;
            let mut rest = Vec::new();

            while p.lexer.scan_expecting(TokenKind::Dot).is_ok() {
                p.check_chain(rest.len())?;
                rest.push(p.lexer.scan_expecting(TokenKind::Var)?.text);
            }

            Ok(FieldPath::chain(first, rest))
        })
    }
}
