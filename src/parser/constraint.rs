//! `constraint` production: WHERE boolean-expression parsing.
//!
//! Precedence follows spec.md §4.2 directly: NOT binds tightest, then
//! AND, then OR; comparisons never nest. `AND` is kept as a first-class
//! [`Constraint::And`] variant rather than rewritten to
//! `Not(Or(Not(L), Not(R)))` — spec.md §9 allows collapsing the reference's
//! De Morgan rewrite back for clarity with unchanged behavior.

use super::Cursor;
use crate::ast::{Constraint, ConstraintValue};
use crate::error::SyntaxError;
use crate::tokenizer::TokenKind;

pub(super) fn parse_constraint(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    parse_or(cursor)
}

fn parse_or(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    let mut left = parse_and(cursor)?;
    while matches!(cursor.peek_kind(), Some(TokenKind::Or)) {
        cursor.advance();
        let right = parse_and(cursor)?;
        left = Constraint::Or(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn parse_and(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    let mut left = parse_not(cursor)?;
    while matches!(cursor.peek_kind(), Some(TokenKind::And)) {
        cursor.advance();
        let right = parse_not(cursor)?;
        left = Constraint::And(Box::new(left), Box::new(right));
    }
    Ok(left)
}

fn parse_not(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    if matches!(cursor.peek_kind(), Some(TokenKind::Not)) {
        cursor.advance();
        let inner = parse_not(cursor)?;
        Ok(Constraint::Not(Box::new(inner)))
    } else {
        parse_atom(cursor)
    }
}

fn parse_atom(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    if matches!(cursor.peek_kind(), Some(TokenKind::LParen)) {
        cursor.advance();
        let inner = parse_or(cursor)?;
        cursor.expect(TokenKind::RParen, ")")?;
        Ok(inner)
    } else {
        parse_comparison(cursor)
    }
}

fn parse_comparison(cursor: &mut Cursor<'_, '_>) -> Result<Constraint, SyntaxError> {
    let keypath = super::parse_keypath(cursor)?;
    let op = parse_comparison_op(cursor)?;
    let value = parse_constraint_value(cursor)?;
    Ok(Constraint::Comparison { keypath, op, value })
}

fn parse_comparison_op(
    cursor: &mut Cursor<'_, '_>,
) -> Result<crate::ast::ComparisonOp, SyntaxError> {
    use crate::ast::ComparisonOp::*;
    let op = match cursor.peek_kind() {
        Some(TokenKind::Eq) => Eq,
        Some(TokenKind::NotEq) => NotEq,
        Some(TokenKind::Gt) => Gt,
        Some(TokenKind::Lt) => Lt,
        Some(TokenKind::Ge) => Ge,
        Some(TokenKind::Le) => Le,
        Some(_) => {
            return Err(SyntaxError::UnexpectedToken {
                found: cursor
                    .peek()
                    .map(|t| t.kind.to_string())
                    .unwrap_or_default(),
                expected: "a comparison operator".to_string(),
            })
        }
        None => {
            return Err(SyntaxError::UnexpectedEof {
                expected: "a comparison operator".to_string(),
            })
        }
    };
    cursor.advance();
    Ok(op)
}

fn parse_constraint_value(cursor: &mut Cursor<'_, '_>) -> Result<ConstraintValue, SyntaxError> {
    match cursor.peek_kind().copied() {
        Some(TokenKind::String(s)) => {
            cursor.advance();
            Ok(ConstraintValue::String(s.to_string()))
        }
        Some(TokenKind::Integer(n)) => {
            cursor.advance();
            Ok(ConstraintValue::Integer(n))
        }
        Some(_) => Err(SyntaxError::UnexpectedToken {
            found: cursor
                .peek()
                .map(|t| t.kind.to_string())
                .unwrap_or_default(),
            expected: "a string or integer literal".to_string(),
        }),
        None => Err(SyntaxError::UnexpectedEof {
            expected: "a string or integer literal".to_string(),
        }),
    }
}
