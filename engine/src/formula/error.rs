//! Formula Errors
//!
//! Every failure inside the tokenizer, parser, or RPN evaluator surfaces to
//! callers as a single `FormulaError::InvalidFormula` carrying the original
//! formula text. The concrete fault is kept as the error source.

use thiserror::Error;

/// What went wrong while turning a formula into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalFault {
    /// The formula contained no tokens.
    #[error("empty formula")]
    Empty,

    /// A token is neither a number, an identifier, nor an operator.
    #[error("unknown token: {0}")]
    UnknownToken(String),

    /// An opening or closing parenthesis has no partner.
    #[error("mismatched parenthesis")]
    MismatchedParenthesis,

    /// An identifier is not bound in the variable environment.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// An operator found fewer than two operands on the stack.
    #[error("insufficient operands for operator: {0}")]
    InsufficientOperands(char),

    /// Right-hand side of a division was exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Evaluation finished with a stack size other than one.
    #[error("expression left {0} values on the stack (expected exactly 1)")]
    UnbalancedStack(usize),
}

/// Errors produced by the formula evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Malformed expression, unknown variable, or division by zero.
    #[error("Invalid formula: {formula}")]
    InvalidFormula {
        /// The formula text exactly as the caller supplied it.
        formula: String,
        /// The underlying fault.
        #[source]
        source: EvalFault,
    },
}

impl FormulaError {
    pub(crate) fn invalid(formula: &str, source: EvalFault) -> Self {
        FormulaError::InvalidFormula {
            formula: formula.to_string(),
            source,
        }
    }

    /// The formula text that failed.
    pub fn formula(&self) -> &str {
        match self {
            FormulaError::InvalidFormula { formula, .. } => formula,
        }
    }

    /// The fault that caused the failure.
    pub fn fault(&self) -> &EvalFault {
        match self {
            FormulaError::InvalidFormula { source, .. } => source,
        }
    }
}

/// Result type for formula evaluation.
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;
