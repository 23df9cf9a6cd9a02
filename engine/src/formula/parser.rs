//! Shunting-Yard Parser
//!
//! Converts an infix token stream into Reverse Polish Notation. All four
//! operators are left-associative; parentheses override precedence.

use super::error::EvalFault;
use super::tokenizer::{Operator, Token};

/// One entry of the RPN output queue.
#[derive(Debug, Clone, PartialEq)]
pub enum RpnItem {
    Number(f32),
    Variable(String),
    Op(Operator),
}

/// Entries that live on the operator stack while parsing.
#[derive(Debug, Clone, Copy, PartialEq)]
enum StackEntry {
    Op(Operator),
    LParen,
}

/// Convert infix tokens to RPN.
///
/// ```text
/// [width, /, 2]         => [width, 2, /]
/// [2, +, 3, *, 4]       => [2, 3, 4, *, +]
/// ```
pub fn to_rpn(tokens: Vec<Token>) -> Result<Vec<RpnItem>, EvalFault> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(value) => output.push(RpnItem::Number(value)),
            Token::Ident(name) => output.push(RpnItem::Variable(name)),
            Token::Op(op) => {
                // Left-associative: pop while the top binds at least as tightly.
                while let Some(StackEntry::Op(top)) = operators.last().copied() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(RpnItem::Op(top));
                    operators.pop();
                }
                operators.push(StackEntry::Op(op));
            }
            Token::LParen => operators.push(StackEntry::LParen),
            Token::RParen => loop {
                match operators.pop() {
                    Some(StackEntry::Op(op)) => output.push(RpnItem::Op(op)),
                    Some(StackEntry::LParen) => break,
                    None => return Err(EvalFault::MismatchedParenthesis),
                }
            },
        }
    }

    while let Some(entry) = operators.pop() {
        match entry {
            StackEntry::Op(op) => output.push(RpnItem::Op(op)),
            StackEntry::LParen => return Err(EvalFault::MismatchedParenthesis),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::tokenizer::tokenize;

    fn rpn(formula: &str) -> Result<Vec<RpnItem>, EvalFault> {
        to_rpn(tokenize(formula)?)
    }

    #[test]
    fn test_precedence_orders_multiplication_first() {
        assert_eq!(
            rpn("2 + 3 * 4").unwrap(),
            vec![
                RpnItem::Number(2.0),
                RpnItem::Number(3.0),
                RpnItem::Number(4.0),
                RpnItem::Op(Operator::Mul),
                RpnItem::Op(Operator::Add),
            ]
        );
    }

    #[test]
    fn test_left_associativity() {
        // 10 - 4 - 3 must be (10 - 4) - 3
        assert_eq!(
            rpn("10 - 4 - 3").unwrap(),
            vec![
                RpnItem::Number(10.0),
                RpnItem::Number(4.0),
                RpnItem::Op(Operator::Sub),
                RpnItem::Number(3.0),
                RpnItem::Op(Operator::Sub),
            ]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(
            rpn("(a + b) * c").unwrap(),
            vec![
                RpnItem::Variable("a".into()),
                RpnItem::Variable("b".into()),
                RpnItem::Op(Operator::Add),
                RpnItem::Variable("c".into()),
                RpnItem::Op(Operator::Mul),
            ]
        );
    }

    #[test]
    fn test_mismatched_parentheses() {
        assert_eq!(rpn("(1 + 2"), Err(EvalFault::MismatchedParenthesis));
        assert_eq!(rpn("1 + 2)"), Err(EvalFault::MismatchedParenthesis));
    }
}
