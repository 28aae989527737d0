use thiserror::Error;

use crate::ast::{Token, TokenKind};

/// Errors reported by the lexer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// No token remains in the input
    #[error("Unexpected end of input at position {position}")]
    EndOfStream { position: usize },

    /// `scan_expecting` found a token with a different tag
    #[error("Expected {expected}, found {found} '{text}' at position {position}")]
    TypeMismatch {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        position: usize,
    },

    /// A string literal is missing its closing quote
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// A backslash escape other than `\'`, `\t`, `\n`, `\r`, `\\` or `\0`
    #[error("Invalid escape sequence '\\{escape}' at position {position}")]
    InvalidEscape { escape: char, position: usize },

    /// A character that starts no token; no further tokens are scanned
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
}

impl LexError {
    /// True when scanning cannot continue past this point.
    ///
    /// Exhausted input, an unterminated string and an unrecognised character
    /// all terminate the token stream; a bad escape or a tag mismatch do not.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(
            self,
            LexError::EndOfStream { .. }
                | LexError::UnterminatedString { .. }
                | LexError::UnexpectedChar { .. }
        )
    }

    /// Character offset where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            LexError::EndOfStream { position }
            | LexError::TypeMismatch { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::UnexpectedChar { position, .. } => *position,
        }
    }
}

/// A saved cursor position.
///
/// Restoring a checkpoint and scanning again yields exactly the tokens that
/// were produced the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// On-demand tokenizer with checkpoint based backtracking.
///
/// The lexer keeps no token buffer: the only state is the input and the
/// cursor.
///
/// # Examples
///
/// ```
/// use mapq::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("a.b >= 2");
/// let start = lexer.checkpoint();
/// assert_eq!(lexer.scan().unwrap().kind, TokenKind::Var);
///
/// lexer.restore(start);
/// assert_eq!(lexer.scan().unwrap().text, "a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Replaces the input and rewinds the cursor.
    pub fn set_input(&mut self, input: &str) {
        self.input = input.chars().collect();
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// The next raw character, without consuming it or skipping whitespace.
    pub fn peek(&self) -> Option<char> {
        self.current_char()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    // Newlines are deliberately not skipped.
    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t') = self.current_char() {
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        loop {
            match self.current_char() {
                None => return Err(LexError::UnterminatedString { position: start }),
                Some('\'') => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    let escape_at = self.position;
                    self.advance(); // backslash
                    let unescaped = match self.current_char() {
                        Some('\'') => '\'',
                        Some('t') => '\t',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('\\') => '\\',
                        Some('0') => '\0',
                        Some(escape) => {
                            return Err(LexError::InvalidEscape {
                                escape,
                                position: escape_at,
                            });
                        }
                        None => return Err(LexError::UnterminatedString { position: start }),
                    };
                    result.push(unescaped);
                    self.advance();
                }
                Some(ch) => {
                    result.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        let mut number = String::new();

        // 0x / 0o / 0b: keep the prefix, take only digits of that radix
        if self.current_char() == Some('0')
            && let Some(marker @ ('x' | 'o' | 'b')) = self.peek_char(1)
        {
            let radix = match marker {
                'x' => 16,
                'o' => 8,
                _ => 2,
            };
            number.push('0');
            number.push(marker);
            self.advance();
            self.advance();
            while let Some(ch) = self.current_char() {
                if ch.is_digit(radix) {
                    number.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            return Token::new(TokenKind::Int, number, start);
        }

        let mut is_float = false;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
            } else if ch == '.' && !is_float {
                is_float = true;
                number.push(ch);
            } else {
                break;
            }
            self.advance();
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, number, start)
    }

    /// Single character operator, or its two character form when the next
    /// character is `second`.
    fn one_or_two(
        &mut self,
        second: char,
        double: (TokenKind, &str),
        single: (TokenKind, &str),
    ) -> Token {
        let start = self.position;
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            Token::new(double.0, double.1, start)
        } else {
            Token::new(single.0, single.1, start)
        }
    }

    fn single(&mut self, kind: TokenKind, text: &str) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, text, start)
    }

    /// Scans the next token.
    pub fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;

        let token = match self.current_char() {
            None => return Err(LexError::EndOfStream { position: start }),
            Some('\'') => {
                let text = self.read_string()?;
                Token::new(TokenKind::Str, text, start)
            }
            Some(ch) if ch.is_ascii_alphabetic() => {
                let ident = self.read_identifier();
                let kind = match ident.as_str() {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "null" => TokenKind::Null,
                    _ => TokenKind::Var,
                };
                Token::new(kind, ident, start)
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('+') => self.single(TokenKind::Plus, "+"),
            Some('-') => self.single(TokenKind::Minus, "-"),
            Some('*') => self.single(TokenKind::Mul, "*"),
            Some('/') => self.single(TokenKind::Div, "/"),
            Some('(') => self.single(TokenKind::LParen, "("),
            Some(')') => self.single(TokenKind::RParen, ")"),
            Some('.') => self.single(TokenKind::Dot, "."),
            Some('=') => self.one_or_two('=', (TokenKind::Eq, "=="), (TokenKind::Unknown, "=")),
            Some('&') => self.one_or_two('&', (TokenKind::And, "&&"), (TokenKind::Unknown, "&")),
            // A lone '|' is accepted as OR, unlike a lone '&'
            Some('|') => self.one_or_two('|', (TokenKind::Or, "||"), (TokenKind::Or, "|")),
            Some('>') => self.one_or_two('=', (TokenKind::Geq, ">="), (TokenKind::Gt, ">")),
            Some('<') => self.one_or_two('=', (TokenKind::Leq, "<="), (TokenKind::Lt, "<")),
            Some('!') => self.one_or_two('=', (TokenKind::Neq, "!="), (TokenKind::Not, "!")),
            // The stream ends at an unrecognised character
            Some(ch) => {
                self.position = self.input.len();
                return Err(LexError::UnexpectedChar {
                    ch,
                    position: start,
                });
            }
        };

        Ok(token)
    }

    /// Consumes the next token only if it has the expected tag.
    ///
    /// On any failure the cursor is left where it was.
    pub fn scan_expecting(&mut self, expected: TokenKind) -> Result<Token, LexError> {
        let checkpoint = self.checkpoint();
        match self.scan() {
            Ok(token) if token.kind == expected => Ok(token),
            Ok(token) => {
                self.restore(checkpoint);
                Err(LexError::TypeMismatch {
                    expected,
                    found: token.kind,
                    text: token.text,
                    position: token.position,
                })
            }
            Err(e) => {
                self.restore(checkpoint);
                Err(e)
            }
        }
    }
}

/// Scans the whole input into a token list.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        match lexer.scan() {
            Ok(token) => tokens.push(token),
            Err(LexError::EndOfStream { .. }) => return Ok(tokens),
            Err(e) => return Err(e),
        }
    }
}
