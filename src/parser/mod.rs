//! Recursive-descent parser: token stream → [`crate::ast::Query`].
//!
//! One `parse_x` function per grammar production, the way
//! `open_cypher_parser/mod.rs` and `match_clause.rs` lay out their
//! combinators — just over a `&[Token]` cursor instead of `nom` over
//! `&str`, since spec.md's component table specifies tokenizing and
//! parsing as separate subsystems.

mod constraint;
mod pattern;

use crate::ast::{Clause, Keypath, Projection, Query, ReturnClause};
use crate::error::SyntaxError;
use crate::tokenizer::{Token, TokenKind};

/// Parse a complete query from its token stream.
pub fn parse(tokens: &[Token<'_>]) -> Result<Query, SyntaxError> {
    let mut cursor = Cursor::new(tokens);
    let query = parse_query(&mut cursor)?;
    if let Some(tok) = cursor.peek() {
        return Err(SyntaxError::UnexpectedToken {
            found: tok.kind.to_string(),
            expected: "end of input".to_string(),
        });
    }
    Ok(query)
}

/// A read-only position over the token slice, with the small set of
/// lookahead/consume primitives every production needs.
pub(super) struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(super) fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(super) fn peek_kind(&self) -> Option<&TokenKind<'a>> {
        self.peek().map(|t| &t.kind)
    }

    pub(super) fn advance(&mut self) -> Option<&Token<'a>> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn describe_next(&self) -> String {
        match self.peek() {
            Some(tok) => tok.kind.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// Consume the next token if it matches `kind`, else raise a syntax
    /// error naming what was expected.
    pub(super) fn expect(&mut self, kind: TokenKind<'static>, expected: &str) -> Result<(), SyntaxError> {
        match self.peek_kind() {
            Some(found) if *found == kind => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(SyntaxError::UnexpectedToken {
                found: self.describe_next(),
                expected: expected.to_string(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    /// Consume a `Key` token, returning its text.
    pub(super) fn expect_key(&mut self, expected: &str) -> Result<&'a str, SyntaxError> {
        match self.peek_kind().copied() {
            Some(TokenKind::Key(s)) => {
                self.advance();
                Ok(s)
            }
            Some(_) => Err(SyntaxError::UnexpectedToken {
                found: self.describe_next(),
                expected: expected.to_string(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }

    /// Consume a `Name` token, returning its text.
    pub(super) fn expect_name(&mut self, expected: &str) -> Result<&'a str, SyntaxError> {
        match self.peek_kind().copied() {
            Some(TokenKind::Name(s)) => {
                self.advance();
                Ok(s)
            }
            Some(_) => Err(SyntaxError::UnexpectedToken {
                found: self.describe_next(),
                expected: expected.to_string(),
            }),
            None => Err(SyntaxError::UnexpectedEof {
                expected: expected.to_string(),
            }),
        }
    }
}

fn parse_query(cursor: &mut Cursor<'_, '_>) -> Result<Query, SyntaxError> {
    let mut clauses = Vec::new();
    match cursor.peek_kind() {
        Some(TokenKind::Match) | Some(TokenKind::Create) => {}
        _ => return Err(SyntaxError::NoLeadingClause),
    }
    while cursor.peek().is_some() {
        clauses.push(parse_clause(cursor)?);
    }
    Ok(Query { clauses })
}

fn parse_clause(cursor: &mut Cursor<'_, '_>) -> Result<Clause, SyntaxError> {
    match cursor.peek_kind() {
        Some(TokenKind::Match) => {
            cursor.advance();
            let pattern = pattern::parse_pattern(cursor)?;
            let where_clause = if matches!(cursor.peek_kind(), Some(TokenKind::Where)) {
                cursor.advance();
                Some(constraint::parse_constraint(cursor)?)
            } else {
                None
            };
            Ok(Clause::MatchWhere(crate::ast::MatchWhereClause {
                pattern,
                where_clause,
            }))
        }
        Some(TokenKind::Create) => {
            cursor.advance();
            let pattern = pattern::parse_pattern(cursor)?;
            Ok(Clause::Create(crate::ast::CreateClause { pattern }))
        }
        Some(TokenKind::Return) => {
            cursor.advance();
            Ok(Clause::Return(parse_return_clause(cursor)?))
        }
        Some(_) => Err(SyntaxError::UnexpectedToken {
            found: cursor.describe_next(),
            expected: "MATCH, CREATE, or RETURN".to_string(),
        }),
        None => Err(SyntaxError::UnexpectedEof {
            expected: "MATCH, CREATE, or RETURN".to_string(),
        }),
    }
}

fn parse_return_clause(cursor: &mut Cursor<'_, '_>) -> Result<ReturnClause, SyntaxError> {
    let mut projections = vec![parse_projection(cursor)?];
    while matches!(cursor.peek_kind(), Some(TokenKind::Comma)) {
        cursor.advance();
        projections.push(parse_projection(cursor)?);
    }
    Ok(ReturnClause { projections })
}

fn parse_projection(cursor: &mut Cursor<'_, '_>) -> Result<Projection, SyntaxError> {
    Ok(Projection {
        keypath: parse_keypath(cursor)?,
    })
}

/// `KEY (. KEY)*` — spec.md's `proj` collapses to this since a bare `KEY`
/// is just a one-segment keypath.
pub(super) fn parse_keypath(cursor: &mut Cursor<'_, '_>) -> Result<Keypath, SyntaxError> {
    let first = cursor.expect_key("a variable name")?;
    let mut segments = vec![first.to_string()];
    while matches!(cursor.peek_kind(), Some(TokenKind::Dot)) {
        cursor.advance();
        segments.push(cursor.expect_key("a key name")?.to_string());
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use crate::tokenizer::tokenize;

    fn parse_str(q: &str) -> Query {
        let tokens = tokenize(q).unwrap();
        parse(&tokens).unwrap()
    }

    #[test]
    fn parses_match_return() {
        let q = parse_str("MATCH (n) RETURN n.foo");
        assert_eq!(q.clauses.len(), 2);
        match &q.clauses[0] {
            Clause::MatchWhere(mw) => {
                assert_eq!(mw.pattern.nodes.len(), 1);
                assert_eq!(mw.pattern.nodes[0].designation.as_deref(), Some("n"));
                assert!(mw.where_clause.is_none());
            }
            _ => panic!("expected MatchWhere"),
        }
        match &q.clauses[1] {
            Clause::Return(r) => {
                assert_eq!(r.projections.len(), 1);
                assert_eq!(r.projections[0].keypath, vec!["n", "foo"]);
            }
            _ => panic!("expected Return"),
        }
    }

    #[test]
    fn parses_create_return() {
        let q = parse_str("CREATE (n:SOMECLASS) RETURN n");
        assert_eq!(q.clauses.len(), 2);
        assert!(matches!(q.clauses[0], Clause::Create(_)));
    }

    #[test]
    fn multi_projection_return() {
        let q = parse_str("MATCH (n)-->(m) RETURN n, m");
        match &q.clauses[1] {
            Clause::Return(r) => assert_eq!(r.projections.len(), 2),
            _ => panic!("expected Return"),
        }
    }

    #[test]
    fn missing_leading_clause_is_an_error() {
        let tokens = tokenize("RETURN n").unwrap();
        assert!(matches!(parse(&tokens), Err(SyntaxError::NoLeadingClause)));
    }

    #[test]
    fn unclosed_paren_is_an_error() {
        let tokens = tokenize("MATCH (").unwrap();
        assert!(parse(&tokens).is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let tokens = tokenize("MATCH (n) RETURN n EXTRA").unwrap();
        assert!(matches!(
            parse(&tokens),
            Err(SyntaxError::UnexpectedToken { .. })
        ));
    }
}
