use thiserror::Error;

use crate::{
    ast::{BinOp, Expr, FieldPath, UnaryOp},
    value::{Document, Value},
};

/// Why a field path could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathFailure {
    /// An intermediate segment is absent from its object
    #[error("'{segment}' is missing")]
    Missing { segment: String },

    /// An intermediate segment holds something other than an object
    #[error("'{segment}' is {found}, not an object")]
    NotAnObject { segment: String, found: &'static str },
}

/// Errors that can occur during expression evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// An operand's type does not satisfy the operator
    #[error("Type error: {0}")]
    TypeError(String),

    /// A dotted path walked through a missing or non-object value
    #[error("Path error: cannot resolve '{path}': {reason}")]
    PathError { path: String, reason: PathFailure },
}

/// Walks an expression tree against one document.
///
/// Evaluation never mutates the document, so one tree can be evaluated any
/// number of times, from any number of threads.
///
/// # Examples
///
/// ```
/// use mapq::{Document, Evaluator, Value, parse};
///
/// let mut doc = Document::new();
/// doc.insert("price".to_string(), Value::Integer(100));
///
/// let expr = parse("price * 2 > 150").unwrap();
/// let evaluator = Evaluator::new(&doc);
/// assert_eq!(evaluator.eval(&expr).unwrap(), Value::Boolean(true));
/// assert!(evaluator.matches(&expr).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    document: &'a Document,
}

impl<'a> Evaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Evaluator { document }
    }

    /// Evaluates an expression whose result must be a boolean.
    pub fn matches(&self, expr: &Expr) -> Result<bool, EvalError> {
        match self.eval(expr)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::TypeError(format!(
                "expression must evaluate to a boolean, got {}",
                other.type_name()
            ))),
        }
    }

    /// Evaluates an expression to a value.
    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Number(n) => Ok(Value::Float(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Null => Ok(Value::Null),
            Expr::Field(path) => self.resolve(path),
            Expr::Not(operand) => {
                let value = self.eval(operand)?;
                match value {
                    Value::Boolean(b) => Ok(Value::Boolean(!b)),
                    other => Err(EvalError::TypeError(format!(
                        "'!' requires a boolean operand, got {}",
                        other.type_name()
                    ))),
                }
            }
            Expr::UnaryOp { op, operand } => {
                let n = self.eval(operand)?.to_number();
                Ok(Value::Float(match op {
                    UnaryOp::Plus => n,
                    UnaryOp::Minus => -n,
                }))
            }
            Expr::BinaryOp { .. } => self.eval_chain(expr),
        }
    }

    /// Evaluates the left spine of binary operations iteratively, in source
    /// order. Recursion only happens into right operands.
    fn eval_chain(&self, expr: &Expr) -> Result<Value, EvalError> {
        let mut pending = Vec::new();
        let mut leftmost = expr;
        while let Expr::BinaryOp { op, left, right } = leftmost {
            pending.push((*op, right.as_ref()));
            leftmost = left.as_ref();
        }

        let mut acc = self.eval(leftmost)?;
        for (op, right) in pending.into_iter().rev() {
            acc = self.apply(op, acc, right)?;
        }
        Ok(acc)
    }

    fn apply(&self, op: BinOp, left_val: Value, right: &Expr) -> Result<Value, EvalError> {
        // && and || decide on the left operand alone when they can
        match op {
            BinOp::And => {
                if !require_bool(op, &left_val)? {
                    return Ok(Value::Boolean(false));
                }
            }
            BinOp::Or => {
                if require_bool(op, &left_val)? {
                    return Ok(Value::Boolean(true));
                }
            }
            _ => {}
        }

        let right_val = self.eval(right)?;
        apply_binop(op, &left_val, &right_val)
    }

    /// Looks a path up in the document.
    ///
    /// A missing final segment reads as `null`; a missing or non-object
    /// intermediate segment is an error.
    fn resolve(&self, path: &FieldPath) -> Result<Value, EvalError> {
        let mut current = self.document;
        let mut node = path;

        loop {
            let value = current.get(&node.segment);
            let Some(next) = node.next.as_deref() else {
                return Ok(value.cloned().unwrap_or(Value::Null));
            };

            current = match value {
                Some(value) => value.as_object().ok_or_else(|| EvalError::PathError {
                    path: path.to_string(),
                    reason: PathFailure::NotAnObject {
                        segment: node.segment.clone(),
                        found: value.type_name(),
                    },
                })?,
                None => {
                    return Err(EvalError::PathError {
                        path: path.to_string(),
                        reason: PathFailure::Missing {
                            segment: node.segment.clone(),
                        },
                    });
                }
            };
            node = next;
        }
    }
}

fn require_bool(op: BinOp, value: &Value) -> Result<bool, EvalError> {
    value.as_bool().ok_or_else(|| {
        EvalError::TypeError(format!(
            "'{}' requires boolean operands, got {}",
            op,
            value.type_name()
        ))
    })
}

fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let result = match op {
        BinOp::Equal => Value::Boolean(left.loose_eq(right)),
        BinOp::NotEqual => Value::Boolean(!left.loose_eq(right)),

        // Ordering and arithmetic coerce non-numbers to 0.0 instead of failing
        BinOp::GreaterThan => Value::Boolean(left.to_number() > right.to_number()),
        BinOp::LessThan => Value::Boolean(left.to_number() < right.to_number()),
        BinOp::GreaterEqual => Value::Boolean(left.to_number() >= right.to_number()),
        BinOp::LessEqual => Value::Boolean(left.to_number() <= right.to_number()),

        BinOp::Add => Value::Float(left.to_number() + right.to_number()),
        BinOp::Subtract => Value::Float(left.to_number() - right.to_number()),
        BinOp::Multiply => Value::Float(left.to_number() * right.to_number()),
        BinOp::Divide => Value::Float(left.to_number() / right.to_number()),

        BinOp::And => Value::Boolean(require_bool(op, left)? && require_bool(op, right)?),
        BinOp::Or => Value::Boolean(require_bool(op, left)? || require_bool(op, right)?),
    };
    Ok(result)
}

/// Evaluates a parsed expression against a document.
///
/// The expression must produce a boolean.
pub fn evaluate(expr: &Expr, document: &Document) -> Result<bool, EvalError> {
    Evaluator::new(document).matches(expr)
}
