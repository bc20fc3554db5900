//! Arithmetic expressions over the rule placeholders.
//!
//! Grammar: decimal literals (comma or point as separator), the placeholders
//! `ABS_AMOUNT`, `ORIGINAL_AMOUNT` and `TOTAL` (alias of `ABS_AMOUNT`),
//! `+ - * /`, unary minus and parentheses. Evaluation is decimal and checked.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Longest expression accepted, in bytes.
pub const MAX_EXPRESSION_LEN: usize = 256;

/// Errors from parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The text does not follow the grammar.
    #[error("syntax error {0}")]
    Syntax(String),
    /// Input exceeds [`MAX_EXPRESSION_LEN`].
    #[error("expression longer than {MAX_EXPRESSION_LEN} characters")]
    TooLong,
    /// Division by zero.
    #[error("division by zero")]
    DivideByZero,
    /// Result does not fit in a decimal.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Named values available to rule expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Absolute value of the transaction amount (`ABS_AMOUNT`, `TOTAL`).
    AbsAmount,
    /// The signed transaction amount (`ORIGINAL_AMOUNT`).
    OriginalAmount,
}

/// Placeholder values for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholders {
    /// Value of `ABS_AMOUNT`.
    pub abs_amount: Decimal,
    /// Value of `ORIGINAL_AMOUNT`.
    pub original_amount: Decimal,
}

impl Placeholders {
    /// Placeholder values for a signed transaction amount.
    #[must_use]
    pub fn for_amount(amount: Decimal) -> Self {
        Self {
            abs_amount: amount.abs(),
            original_amount: amount,
        }
    }

    fn value(&self, placeholder: Placeholder) -> Decimal {
        match placeholder {
            Placeholder::AbsAmount => self.abs_amount,
            Placeholder::OriginalAmount => self.original_amount,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Decimal literal.
    Number(Decimal),
    /// Placeholder reference.
    Placeholder(Placeholder),
    /// Unary minus.
    Negate(Box<Expr>),
    /// Binary operation.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Evaluates the tree with checked decimal arithmetic.
    pub fn evaluate(&self, vars: &Placeholders) -> Result<Decimal, ExpressionError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Placeholder(placeholder) => Ok(vars.value(*placeholder)),
            Self::Negate(inner) => Ok(-inner.evaluate(vars)?),
            Self::Binary(op, left, right) => {
                let left = left.evaluate(vars)?;
                let right = right.evaluate(vars)?;
                let result = match op {
                    BinaryOp::Add => left.checked_add(right),
                    BinaryOp::Subtract => left.checked_sub(right),
                    BinaryOp::Multiply => left.checked_mul(right),
                    BinaryOp::Divide => {
                        if right.is_zero() {
                            return Err(ExpressionError::DivideByZero);
                        }
                        left.checked_div(right)
                    }
                };
                result.ok_or(ExpressionError::Overflow)
            }
        }
    }
}

peg::parser! {
    grammar amount_expression() for str {
        rule _() = quiet!{[' ' | '\t' | '\r' | '\n']*}

        // e.g. '12', '0.25', '0,25'
        rule number() -> Decimal
            = n:$(['0'..='9']+ ([',' | '.'] ['0'..='9']+)?) {?
                Decimal::from_str(&n.replacen(',', ".", 1)).or(Err("decimal number"))
            }

        rule placeholder() -> Placeholder
            = "ABS_AMOUNT" { Placeholder::AbsAmount }
            / "ORIGINAL_AMOUNT" { Placeholder::OriginalAmount }
            / "TOTAL" { Placeholder::AbsAmount }

        pub rule expression() -> Expr
            = _ e:arithmetic() _ { e }

        rule arithmetic() -> Expr = precedence!{
            a:(@) _ "+" _ b:@ { Expr::binary(BinaryOp::Add, a, b) }
            a:(@) _ "-" _ b:@ { Expr::binary(BinaryOp::Subtract, a, b) }
            --
            a:(@) _ "*" _ b:@ { Expr::binary(BinaryOp::Multiply, a, b) }
            a:(@) _ "/" _ b:@ { Expr::binary(BinaryOp::Divide, a, b) }
            --
            "-" _ e:(@) { Expr::Negate(Box::new(e)) }
            "+" _ e:(@) { e }
            --
            n:number() { Expr::Number(n) }
            p:placeholder() { Expr::Placeholder(p) }
            "(" _ e:arithmetic() _ ")" { e }
        }
    }
}

/// Parses an expression.
pub fn parse_expression(input: &str) -> Result<Expr, ExpressionError> {
    if input.len() > MAX_EXPRESSION_LEN {
        return Err(ExpressionError::TooLong);
    }
    amount_expression::expression(input).map_err(|e| ExpressionError::Syntax(e.to_string()))
}

/// Parses and evaluates an expression. Blank input evaluates to zero.
///
/// ```
/// use bokforing_core::rules::expression::{Placeholders, evaluate_expression};
/// use rust_decimal_macros::dec;
///
/// let vars = Placeholders::for_amount(dec!(-1250));
/// assert_eq!(evaluate_expression("ABS_AMOUNT * 0,2", &vars).unwrap(), dec!(250));
/// ```
pub fn evaluate_expression(input: &str, vars: &Placeholders) -> Result<Decimal, ExpressionError> {
    if input.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_expression(input)?.evaluate(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn vars() -> Placeholders {
        Placeholders::for_amount(dec!(-1000))
    }

    #[rstest]
    #[case("ABS_AMOUNT", dec!(1000))]
    #[case("ORIGINAL_AMOUNT", dec!(-1000))]
    #[case("TOTAL", dec!(1000))]
    #[case("ABS_AMOUNT * 0.8", dec!(800))]
    #[case("ABS_AMOUNT*0,2", dec!(200))]
    #[case("ABS_AMOUNT / 1.25", dec!(800))]
    #[case("-ORIGINAL_AMOUNT", dec!(1000))]
    #[case("1 + 2 * 3", dec!(7))]
    #[case("(1 + 2) * 3", dec!(9))]
    #[case("10 - 4 - 3", dec!(3))]
    #[case("-2 * -3", dec!(6))]
    #[case("  42  ", dec!(42))]
    #[case("", dec!(0))]
    #[case("   ", dec!(0))]
    fn test_evaluate(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(evaluate_expression(input, &vars()).unwrap(), expected);
    }

    #[rstest]
    #[case("ABS_AMOUNT +")]
    #[case("(1 + 2")]
    #[case("AMOUNT")]
    #[case("1,2,3")]
    #[case("__import__('os')")]
    #[case("2 ** 3")]
    fn test_syntax_errors(#[case] input: &str) {
        assert!(matches!(
            evaluate_expression(input, &vars()),
            Err(ExpressionError::Syntax(_))
        ));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            evaluate_expression("ABS_AMOUNT / (1 - 1)", &vars()),
            Err(ExpressionError::DivideByZero)
        );
    }

    #[test]
    fn test_overflow() {
        let huge = "79228162514264337593543950335 * 10";
        assert_eq!(
            evaluate_expression(huge, &vars()),
            Err(ExpressionError::Overflow)
        );
    }

    #[test]
    fn test_too_long() {
        let input = "1+".repeat(200) + "1";
        assert_eq!(evaluate_expression(&input, &vars()), Err(ExpressionError::TooLong));
    }

    #[test]
    fn test_parse_tree() {
        let expr = parse_expression("TOTAL - 1").unwrap();
        assert_eq!(
            expr,
            Expr::Binary(
                BinaryOp::Subtract,
                Box::new(Expr::Placeholder(Placeholder::AbsAmount)),
                Box::new(Expr::Number(dec!(1))),
            )
        );
    }
}
