//! AST evaluator and the live preview pipeline
//!
//! `preview` is what the display calls after every key press. It tolerates
//! half-typed input: a dangling operator or decimal point is dropped and the
//! completed prefix is evaluated instead.

use crate::core::operations::check_finite;
use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcError, CalcResult};

/// Scale applied by a postfix `%`
pub const PERCENT_SCALE: f64 = 0.01;

/// Characters dropped from the end of the buffer before evaluation
const TRAILING_NOISE: [char; 6] = ['+', '-', '*', '/', '.', ' '];

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => check_finite(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::Percent(inner) => check_finite(self.evaluate(inner)? * PERCENT_SCALE),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                op.apply(left_val, right_val)
            }
        }
    }

    /// Evaluates a complete expression string
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    /// Evaluates the raw input buffer, dropping any dangling suffix first
    pub fn evaluate_buffer(&self, buffer: &str) -> CalcResult<f64> {
        if buffer.trim().is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let normalized = normalize(buffer);
        let completed = strip_trailing(&normalized);
        if completed.trim().is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.evaluate_str(completed)
    }
}

/// Best-effort value of the buffer, `None` when nothing sensible can be shown
#[must_use]
pub fn preview(buffer: &str) -> Option<f64> {
    let result = Evaluator::new().evaluate_buffer(buffer);
    if let Err(err) = &result {
        tracing::trace!(buffer, %err, "no preview");
    }
    result.ok()
}

/// Rewrites display glyphs to their ASCII operators
#[must_use]
pub fn normalize(buffer: &str) -> String {
    buffer
        .chars()
        .map(|ch| match ch {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            other => other,
        })
        .collect()
}

/// Drops a trailing run of operator, decimal point and space characters
#[must_use]
pub fn strip_trailing(expr: &str) -> &str {
    expr.trim_end_matches(TRAILING_NOISE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    // ===== AST evaluation tests =====

    #[test]
    fn test_evaluate_number() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::number(42.0)), Ok(42.0));
    }

    #[test]
    fn test_evaluate_negate() {
        let eval = Evaluator::new();
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(eval.evaluate(&ast), Ok(5.0));
    }

    #[test]
    fn test_evaluate_percent() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::percent(AstNode::number(50.0))), Ok(0.5));
    }

    #[test]
    fn test_evaluate_error_propagates_from_right() {
        let eval = Evaluator::new();
        let ast = AstNode::binary(
            AstNode::number(5.0),
            Operation::Add,
            AstNode::binary(AstNode::number(1.0), Operation::Divide, AstNode::number(0.0)),
        );
        assert_eq!(eval.evaluate(&ast), Err(CalcError::DivisionByZero));
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_str_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2 + 2 × 2"), Ok(6.0));
        assert_eq!(eval.evaluate_str("2 × 3 + 4"), Ok(10.0));
    }

    #[test]
    fn test_evaluate_str_left_associative() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("10 − 4 − 3"), Ok(3.0));
        assert_eq!(eval.evaluate_str("100 ÷ 10 ÷ 5"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_str_percent_scales_literal_only() {
        let eval = Evaluator::new();
        // 200 + (10 * 0.01), not (200 + 10) * 0.01
        assert_eq!(eval.evaluate_str("200 + 10%"), Ok(200.1));
    }

    // ===== Buffer pipeline tests =====

    #[test]
    fn test_normalize_glyphs() {
        assert_eq!(normalize("1 × 2 ÷ 3 − 4 + 5"), "1 * 2 / 3 - 4 + 5");
    }

    #[test]
    fn test_strip_trailing_operator_run() {
        assert_eq!(strip_trailing("3 + "), "3");
        assert_eq!(strip_trailing("3 * ."), "3");
        assert_eq!(strip_trailing("3.5"), "3.5");
        assert_eq!(strip_trailing("50%"), "50%");
    }

    #[test]
    fn test_evaluate_buffer_empty() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_buffer(""), Err(CalcError::EmptyExpression));
        assert_eq!(eval.evaluate_buffer("   "), Err(CalcError::EmptyExpression));
        assert_eq!(eval.evaluate_buffer(" . "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_evaluate_buffer_division_by_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_buffer("3 ÷ 0"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_preview_dangling_operator_uses_prefix() {
        assert_eq!(preview("12 + "), Some(12.0));
        assert_eq!(preview("12 + 3 × "), Some(15.0));
    }

    #[test]
    fn test_preview_trailing_decimal() {
        assert_eq!(preview("7."), Some(7.0));
        assert_eq!(preview("7 + ."), Some(7.0));
    }

    #[test]
    fn test_preview_percent() {
        assert_eq!(preview("50%"), Some(0.5));
        assert_eq!(preview("-50%"), Some(-0.5));
    }

    #[test]
    fn test_preview_none_cases() {
        assert_eq!(preview(""), None);
        assert_eq!(preview("3 ÷ 0"), None);
        assert_eq!(preview("50%5"), None);
        assert_eq!(preview("1e5"), None);
    }

    #[test]
    fn test_preview_negative_literal() {
        assert_eq!(preview("3 × -2"), Some(-6.0));
    }

    #[test]
    fn test_preview_overflow_is_none() {
        let huge = format!("{:.0}", f64::MAX);
        assert_eq!(preview(&format!("{huge} × 10")), None);
    }
}
