//! Formula Evaluator
//!
//! Safe arithmetic over a named-variable environment: no code execution, only
//! numbers, identifiers, `+ - * /`, parentheses, and unary minus.
//!
//! ```ignore
//! let evaluator = FormulaEvaluator::new(
//!     Variables::new().with("width", 0.6).with("legLength", 0.6),
//! );
//! evaluator.evaluate("width / 2")?;                  // 0.3
//! evaluator.evaluate("(width + legLength) * 0.5")?;  // 0.6
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{EvalFault, FormulaError, FormulaResult};
use super::parser::{RpnItem, to_rpn};
use super::tokenizer::{parse_number, tokenize};
use super::variables::Variables;

/// A catalog formula: either a literal number or expression text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formula {
    Number(f32),
    Expr(String),
}

impl Formula {
    /// Expression text as it would be shown in an error.
    pub fn text(&self) -> String {
        match self {
            Formula::Number(v) => v.to_string(),
            Formula::Expr(s) => s.clone(),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Number(v) => write!(f, "{v}"),
            Formula::Expr(s) => f.write_str(s),
        }
    }
}

impl From<f32> for Formula {
    fn from(v: f32) -> Self {
        Formula::Number(v)
    }
}

impl From<&str> for Formula {
    fn from(s: &str) -> Self {
        Formula::Expr(s.to_string())
    }
}

impl From<String> for Formula {
    fn from(s: String) -> Self {
        Formula::Expr(s)
    }
}

impl From<&Formula> for Formula {
    fn from(f: &Formula) -> Self {
        f.clone()
    }
}

/// Evaluates formulas against an immutable variable environment.
#[derive(Debug, Clone, Default)]
pub struct FormulaEvaluator {
    variables: Variables,
}

impl FormulaEvaluator {
    /// Create an evaluator bound to `variables`.
    pub fn new(variables: Variables) -> Self {
        Self { variables }
    }

    /// Evaluate one formula.
    ///
    /// Numbers, and strings that parse directly as a finite number, are
    /// returned unchanged. Anything else goes through tokenize → RPN →
    /// stack evaluation; every failure is reported as
    /// [`FormulaError::InvalidFormula`] with the original text.
    pub fn evaluate(&self, formula: impl Into<Formula>) -> FormulaResult<f32> {
        match formula.into() {
            Formula::Number(value) => Ok(value),
            Formula::Expr(text) => self.evaluate_text(&text),
        }
    }

    fn evaluate_text(&self, text: &str) -> FormulaResult<f32> {
        if let Some(value) = parse_number(text.trim()) {
            return Ok(value);
        }

        tokenize(text)
            .and_then(to_rpn)
            .and_then(|rpn| self.evaluate_rpn(&rpn))
            .map_err(|fault| FormulaError::invalid(text, fault))
    }

    fn evaluate_rpn(&self, rpn: &[RpnItem]) -> Result<f32, EvalFault> {
        let mut stack: Vec<f32> = Vec::with_capacity(rpn.len());

        for item in rpn {
            match item {
                RpnItem::Number(value) => stack.push(*value),
                RpnItem::Variable(name) => {
                    let value = self
                        .variables
                        .get(name)
                        .ok_or_else(|| EvalFault::UnknownVariable(name.clone()))?;
                    stack.push(value);
                }
                RpnItem::Op(op) => {
                    // Right operand is on top.
                    let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                        return Err(EvalFault::InsufficientOperands(op.symbol()));
                    };
                    stack.push(op.apply(a, b)?);
                }
            }
        }

        match stack.as_slice() {
            [result] => Ok(*result),
            [] => Err(EvalFault::Empty),
            values => Err(EvalFault::UnbalancedStack(values.len())),
        }
    }

    /// Evaluate several formulas independently, preserving order. Fails on the
    /// first formula that fails.
    pub fn evaluate_batch<I>(&self, formulas: I) -> FormulaResult<Vec<f32>>
    where
        I: IntoIterator,
        I::Item: Into<Formula>,
    {
        formulas.into_iter().map(|f| self.evaluate(f)).collect()
    }

    /// Return a new evaluator with `name` bound to `value`. This evaluator is
    /// left untouched.
    pub fn update_variable(&self, name: impl Into<String>, value: f32) -> Self {
        Self {
            variables: self.variables.clone().with(name, value),
        }
    }

    /// A copy of the current environment.
    pub fn variables(&self) -> Variables {
        self.variables.clone()
    }
}

/// Evaluate `formula` against `variables` in one call.
pub fn evaluate(formula: impl Into<Formula>, variables: &Variables) -> FormulaResult<f32> {
    FormulaEvaluator::new(variables.clone()).evaluate(formula)
}
