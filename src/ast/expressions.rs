use std::fmt;

use crate::ast::{BinOp, UnaryOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Every node owns its children, so a tree is immutable once built and may be
/// shared between threads and evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary operation (arithmetic, comparison, logical)
    ///
    /// # Examples
    /// ```text
    /// a + 1
    /// a.b == 'x'
    /// a && b
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Numeric sign applied to an operand
    ///
    /// # Examples
    /// ```text
    /// -a
    /// +1.5
    /// ```
    UnaryOp { op: UnaryOp, operand: Box<Expr> },

    /// Logical negation (`!`)
    Not(Box<Expr>),

    // Literals
    /// Boolean literal
    Boolean(bool),

    /// Numeric literal; integers and floats alike are held as `f64`
    Number(f64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// 'hello'
    /// ```
    String(String),

    /// Null literal
    Null,

    /// Dotted field access into the document
    ///
    /// # Examples
    /// ```text
    /// status
    /// user.address.city
    /// ```
    Field(FieldPath),
}

impl Expr {
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }
}

/// One segment of a dotted path, linked to the rest of the chain.
///
/// `next == None` marks the final segment, whose value is the result of the
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub segment: String,
    pub next: Option<Box<FieldPath>>,
}

impl FieldPath {
    /// A single-segment path.
    pub fn new(segment: impl Into<String>) -> Self {
        FieldPath {
            segment: segment.into(),
            next: None,
        }
    }

    /// Builds a chain from its first segment and the segments that follow.
    pub fn chain<I, S>(first: impl Into<String>, rest: I) -> Self
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        let next = rest.into_iter().rev().fold(None, |next, segment| {
            Some(Box::new(FieldPath {
                segment: segment.into(),
                next,
            }))
        });
        FieldPath {
            segment: first.into(),
            next,
        }
    }

    /// Iterates the segment names in order.
    pub fn segments(&self) -> Segments<'_> {
        Segments { next: Some(self) }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Iterator over the segment names of a [`FieldPath`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    next: Option<&'a FieldPath>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(current.segment.as_str())
    }
}
