//! Formula Tokenizer
//!
//! Splits formula text into numbers, identifiers, operators, and parentheses.
//! Whitespace only separates tokens. A `-` that appears at the start of the
//! stream, after another operator, or after `(` is rewritten as `0 -`, so the
//! parser never sees a unary operator.

use super::error::EvalFault;

/// The four binary operators understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Map an operator character to its variant.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    /// Source character for this operator.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Binding strength: `*` and `/` bind tighter than `+` and `-`.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    /// Apply the operator to `a op b`. Division by exactly zero is a fault.
    pub fn apply(self, a: f32, b: f32) -> Result<f32, EvalFault> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mul => Ok(a * b),
            Operator::Div => {
                if b == 0.0 {
                    Err(EvalFault::DivisionByZero)
                } else {
                    Ok(a / b)
                }
            }
        }
    }
}

/// A single lexical unit of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f32),
    Ident(String),
    Op(Operator),
    LParen,
    RParen,
}

/// True if `word` is a variable identifier: a letter or underscore followed by
/// letters, digits, or underscores.
pub fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `word` as a finite numeric literal. Words must start with a digit or
/// a decimal point so identifiers such as `inf` or `NaN` stay identifiers.
pub fn parse_number(word: &str) -> Option<f32> {
    let first = word.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    word.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn classify(word: &str) -> Result<Token, EvalFault> {
    if let Some(value) = parse_number(word) {
        Ok(Token::Number(value))
    } else if is_identifier(word) {
        Ok(Token::Ident(word.to_string()))
    } else {
        Err(EvalFault::UnknownToken(word.to_string()))
    }
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) -> Result<(), EvalFault> {
    if !current.is_empty() {
        tokens.push(classify(current)?);
        current.clear();
    }
    Ok(())
}

/// Tokenize formula text.
///
/// ```text
/// "width/2 + 0.01" => [width, /, 2, +, 0.01]
/// "-height"        => [0, -, height]
/// ```
pub fn tokenize(formula: &str) -> Result<Vec<Token>, EvalFault> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in formula.chars() {
        if c.is_whitespace() {
            flush(&mut current, &mut tokens)?;
            continue;
        }

        if let Some(op) = Operator::from_char(c) {
            flush(&mut current, &mut tokens)?;
            if op == Operator::Sub
                && matches!(tokens.last(), None | Some(Token::Op(_)) | Some(Token::LParen))
            {
                tokens.push(Token::Number(0.0));
            }
            tokens.push(Token::Op(op));
            continue;
        }

        match c {
            '(' => {
                flush(&mut current, &mut tokens)?;
                tokens.push(Token::LParen);
            }
            ')' => {
                flush(&mut current, &mut tokens)?;
                tokens.push(Token::RParen);
            }
            _ => current.push(c),
        }
    }

    flush(&mut current, &mut tokens)?;
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Ident(name.to_string())
    }

    #[test]
    fn test_tokenize_without_whitespace() {
        let tokens = tokenize("width/2+0.01").unwrap();
        assert_eq!(
            tokens,
            vec![
                ident("width"),
                Token::Op(Operator::Div),
                Token::Number(2.0),
                Token::Op(Operator::Add),
                Token::Number(0.01),
            ]
        );
    }

    #[test]
    fn test_leading_minus_becomes_subtraction_from_zero() {
        let tokens = tokenize("-height").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(0.0), Token::Op(Operator::Sub), ident("height")]
        );
    }

    #[test]
    fn test_minus_after_operator_and_paren() {
        let tokens = tokenize("2 * (-x)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Op(Operator::Mul),
                Token::LParen,
                Token::Number(0.0),
                Token::Op(Operator::Sub),
                ident("x"),
                Token::RParen,
            ]
        );

        let tokens = tokenize("a * -b").unwrap();
        assert_eq!(tokens[2], Token::Number(0.0));
        assert_eq!(tokens[3], Token::Op(Operator::Sub));
    }

    #[test]
    fn test_binary_minus_is_not_rewritten() {
        let tokens = tokenize("a - b").unwrap();
        assert_eq!(tokens, vec![ident("a"), Token::Op(Operator::Sub), ident("b")]);
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            tokenize("2 $ 3"),
            Err(EvalFault::UnknownToken("$".to_string()))
        );
        assert!(matches!(tokenize("1.2.3"), Err(EvalFault::UnknownToken(_))));
        assert!(matches!(tokenize("2abc"), Err(EvalFault::UnknownToken(_))));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("legLength"));
        assert!(is_identifier("_tmp1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_non_finite_words_are_identifiers() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(tokenize("NaN").unwrap(), vec![ident("NaN")]);
    }

    #[test]
    fn test_operator_precedence_order() {
        assert!(Operator::Mul.precedence() > Operator::Add.precedence());
        assert_eq!(Operator::Div.precedence(), Operator::Mul.precedence());
        assert_eq!(Operator::Sub.precedence(), Operator::Add.precedence());
    }

    #[test]
    fn test_division_by_zero_fault() {
        assert_eq!(Operator::Div.apply(1.0, 0.0), Err(EvalFault::DivisionByZero));
        assert_eq!(Operator::Div.apply(1.0, -0.0), Err(EvalFault::DivisionByZero));
        assert_eq!(Operator::Div.apply(1.0, 4.0), Ok(0.25));
    }
}
