//! `literals`, `node`, and `cond_list` productions: pattern parsing for
//! both MATCH and CREATE.

use super::Cursor;
use crate::ast::{EdgeConnection, NodePattern, Pattern};
use crate::error::SyntaxError;
use crate::tokenizer::TokenKind;
use serde_json::Value as JsonValue;

struct EdgeSpec {
    forward: bool,
    designation: Option<String>,
    edge_label: Option<String>,
}

/// `node (connector node | , node)*` — a flat sequence of nodes chained by
/// the edges attached to their source node, with comma starting an
/// independent component (no edge to the previous node).
pub(super) fn parse_pattern(cursor: &mut Cursor<'_, '_>) -> Result<Pattern, SyntaxError> {
    let mut pattern = Pattern::default();
    let first = parse_node(cursor)?;
    let mut current = pattern.push(first);

    loop {
        match cursor.peek_kind() {
            Some(TokenKind::Comma) => {
                cursor.advance();
                let node = parse_node(cursor)?;
                current = pattern.push(node);
            }
            Some(TokenKind::ArrowRight)
            | Some(TokenKind::ArrowLeft)
            | Some(TokenKind::Dash)
            | Some(TokenKind::Lt) => {
                let spec = parse_connector(cursor)?;
                let node = parse_node(cursor)?;
                let next = pattern.push(node);
                let (source, target) = if spec.forward {
                    (current, next)
                } else {
                    (next, current)
                };
                pattern.nodes[source].connecting_edges.push(EdgeConnection {
                    designation: spec.designation,
                    target_index: target,
                    edge_label: spec.edge_label,
                });
                current = next;
            }
            _ => break,
        }
    }
    Ok(pattern)
}

/// `( KEY )` / `( : NAME )` / `( KEY : NAME )` / `( KEY : NAME cond_list )`.
fn parse_node(cursor: &mut Cursor<'_, '_>) -> Result<NodePattern, SyntaxError> {
    cursor.expect(TokenKind::LParen, "(")?;

    let designation = match cursor.peek_kind().copied() {
        Some(TokenKind::Key(k)) => {
            cursor.advance();
            Some(k.to_string())
        }
        _ => None,
    };

    let node_class = if matches!(cursor.peek_kind(), Some(TokenKind::Colon)) {
        cursor.advance();
        Some(cursor.expect_name("a class name")?.to_string())
    } else {
        None
    };

    let mut node = NodePattern::new(designation, node_class);
    if matches!(cursor.peek_kind(), Some(TokenKind::LBrace)) {
        node.attribute_conditions = parse_document(cursor)?;
    }

    cursor.expect(TokenKind::RParen, ")")?;
    Ok(node)
}

/// `-->` / `<--` / `-[:LABEL]->` / `-[e:LABEL]->` / `<-[:LABEL]-` /
/// `<-[e:LABEL]-`. Caller has already confirmed the next token can start
/// one of these.
fn parse_connector(cursor: &mut Cursor<'_, '_>) -> Result<EdgeSpec, SyntaxError> {
    match cursor.peek_kind() {
        Some(TokenKind::ArrowRight) => {
            cursor.advance();
            Ok(EdgeSpec {
                forward: true,
                designation: None,
                edge_label: None,
            })
        }
        Some(TokenKind::ArrowLeft) => {
            cursor.advance();
            Ok(EdgeSpec {
                forward: false,
                designation: None,
                edge_label: None,
            })
        }
        Some(TokenKind::Dash) => {
            cursor.advance();
            let (designation, edge_label) = parse_edge_bracket(cursor)?;
            cursor.expect(TokenKind::Dash, "-")?;
            cursor.expect(TokenKind::Gt, ">")?;
            Ok(EdgeSpec {
                forward: true,
                designation,
                edge_label,
            })
        }
        Some(TokenKind::Lt) => {
            cursor.advance();
            cursor.expect(TokenKind::Dash, "-")?;
            let (designation, edge_label) = parse_edge_bracket(cursor)?;
            cursor.expect(TokenKind::Dash, "-")?;
            Ok(EdgeSpec {
                forward: false,
                designation,
                edge_label,
            })
        }
        Some(_) => Err(SyntaxError::UnexpectedToken {
            found: cursor
                .peek()
                .map(|t| t.kind.to_string())
                .unwrap_or_default(),
            expected: "an edge connector".to_string(),
        }),
        None => Err(SyntaxError::UnexpectedEof {
            expected: "an edge connector".to_string(),
        }),
    }
}

/// `[ : NAME ]` / `[ KEY : NAME ]`.
fn parse_edge_bracket(
    cursor: &mut Cursor<'_, '_>,
) -> Result<(Option<String>, Option<String>), SyntaxError> {
    cursor.expect(TokenKind::LBracket, "[")?;
    let designation = match cursor.peek_kind().copied() {
        Some(TokenKind::Key(k)) => {
            cursor.advance();
            Some(k.to_string())
        }
        _ => None,
    };
    cursor.expect(TokenKind::Colon, ":")?;
    let label = cursor.expect_name("an edge label")?.to_string();
    cursor.expect(TokenKind::RBracket, "]")?;
    Ok((designation, Some(label)))
}

/// `{ KEY : value (, KEY : value)* }` where `value` is a `STRING` or a
/// nested document.
fn parse_document(cursor: &mut Cursor<'_, '_>) -> Result<crate::value::Document, SyntaxError> {
    cursor.expect(TokenKind::LBrace, "{")?;
    let mut doc = crate::value::Document::new();
    loop {
        let key = cursor.expect_key("a property key")?.to_string();
        cursor.expect(TokenKind::Colon, ":")?;
        let value = parse_document_value(cursor)?;
        doc.insert(key, value);
        if matches!(cursor.peek_kind(), Some(TokenKind::Comma)) {
            cursor.advance();
            continue;
        }
        break;
    }
    cursor.expect(TokenKind::RBrace, "}")?;
    Ok(doc)
}

fn parse_document_value(cursor: &mut Cursor<'_, '_>) -> Result<JsonValue, SyntaxError> {
    match cursor.peek_kind().copied() {
        Some(TokenKind::String(s)) => {
            cursor.advance();
            Ok(JsonValue::String(s.to_string()))
        }
        Some(TokenKind::LBrace) => Ok(JsonValue::Object(parse_document(cursor)?)),
        Some(_) => Err(SyntaxError::UnexpectedToken {
            found: cursor
                .peek()
                .map(|t| t.kind.to_string())
                .unwrap_or_default(),
            expected: "a string literal or a nested document".to_string(),
        }),
        None => Err(SyntaxError::UnexpectedEof {
            expected: "a string literal or a nested document".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use serde_json::json;

    fn pattern_of(q: &str) -> Pattern {
        let tokens = tokenize(q).unwrap();
        let mut cursor = Cursor::new(&tokens);
        parse_pattern(&mut cursor).unwrap()
    }

    #[test]
    fn bare_node() {
        let p = pattern_of("(n)");
        assert_eq!(p.nodes.len(), 1);
        assert_eq!(p.nodes[0].designation.as_deref(), Some("n"));
        assert!(p.nodes[0].node_class.is_none());
    }

    #[test]
    fn classed_node_with_document() {
        let p = pattern_of(r#"(n:A {foo: {goo: "bar"}})"#);
        assert_eq!(p.nodes[0].node_class.as_deref(), Some("A"));
        assert_eq!(
            p.nodes[0].attribute_conditions.get("foo"),
            Some(&json!({"goo": "bar"}))
        );
    }

    #[test]
    fn plain_forward_edge_attaches_to_source() {
        let p = pattern_of("(n)-->(m)");
        assert_eq!(p.nodes.len(), 2);
        assert_eq!(p.nodes[0].connecting_edges.len(), 1);
        assert_eq!(p.nodes[0].connecting_edges[0].target_index, 1);
        assert!(p.nodes[1].connecting_edges.is_empty());
    }

    #[test]
    fn labeled_backward_edge_attaches_to_target_as_source() {
        let p = pattern_of("(n)<-[e:R]-(m)");
        // <-[e:R]- : m is the source, n is the target.
        assert_eq!(p.nodes[1].connecting_edges.len(), 1);
        assert_eq!(p.nodes[1].connecting_edges[0].target_index, 0);
        assert_eq!(
            p.nodes[1].connecting_edges[0].edge_label.as_deref(),
            Some("R")
        );
        assert_eq!(
            p.nodes[1].connecting_edges[0].designation.as_deref(),
            Some("e")
        );
    }

    #[test]
    fn comma_starts_independent_component() {
        let p = pattern_of("(n), (m)");
        assert_eq!(p.nodes.len(), 2);
        assert!(p.nodes[0].connecting_edges.is_empty());
        assert!(p.nodes[1].connecting_edges.is_empty());
    }
}
