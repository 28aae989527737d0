use std::fmt;

/// The closed set of token tags produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Arithmetic
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,

    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `.` separating field path segments
    Dot,

    /// Field name
    ///
    /// Starts with an ASCII letter, followed by letters, digits or underscores.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// v2
    /// ```
    Var,

    // Reserved words
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Logical
    /// `&&`
    And,
    /// `||`, and also a single `|`
    Or,
    /// `!`
    Not,

    // Comparison
    /// `==`
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Geq,
    /// `<=`
    Leq,
    /// `!=`
    Neq,

    // Literals
    /// String literal enclosed in single quotes
    ///
    /// # Examples
    /// ```text
    /// 'active'
    /// 'it\'s'
    /// ```
    Str,
    /// Integer literal, optionally with a `0x`, `0o` or `0b` prefix
    Int,
    /// Decimal literal with a fractional part
    Float,

    /// A character sequence with no meaning in the language (bare `=` or `&`)
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Dot => "'.'",
            TokenKind::Var => "identifier",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'null'",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Not => "'!'",
            TokenKind::Eq => "'=='",
            TokenKind::Gt => "'>'",
            TokenKind::Lt => "'<'",
            TokenKind::Geq => "'>='",
            TokenKind::Leq => "'<='",
            TokenKind::Neq => "'!='",
            TokenKind::Str => "string",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Unknown => "unknown token",
        };
        f.write_str(s)
    }
}

/// A token: its tag, its lexeme and the character offset where it starts.
///
/// For [`TokenKind::Str`] the text is the unescaped string content, without
/// the surrounding quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }
}
