//! Formula Module
//!
//! A small, safe expression language used by catalog geometry parts so a
//! model's shape follows the element's real width/height/depth.
//!
//! Pipeline: [`tokenizer`] → [`parser`] (shunting-yard to RPN) →
//! [`evaluator`] (stack evaluation against [`Variables`]).

pub mod error;
pub mod evaluator;
pub mod parser;
pub mod tokenizer;
pub mod variables;

pub use error::{EvalFault, FormulaError, FormulaResult};
pub use evaluator::{Formula, FormulaEvaluator, evaluate};
pub use tokenizer::{Operator, Token};
pub use variables::{
    ElementDimensions, StandardOptions, Variables, evaluate_condition, flag, standard_variables,
};
