//! Scalar/document value model.
//!
//! spec.md's data model allows a vertex or edge document value to be a
//! scalar (string or integer) or a nested document. `serde_json::Value`
//! (with the `preserve_order` feature, so two structurally-equal documents
//! built in different key orders still compare equal via insertion-order
//! `Map`) is the teacher's universal currency for exactly this shape
//! across `graph_catalog` and `render_plan`, so it's reused here rather
//! than hand-rolling a parallel enum.

use serde_json::{Map, Value as JsonValue};

/// A property document: string keys to scalar or nested-document values.
pub type Document = Map<String, JsonValue>;

/// Comparison operators wired into WHERE constraints (spec.md §4.4 and the
/// Open Question resolved in DESIGN.md: `>=`, `<`, `<=`, `!=` follow the
/// same comparison-function dispatch as `=`/`>`).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl ComparisonOp {
    /// Evaluate this operator over two already-resolved values. Numeric
    /// comparisons apply when both sides are integers; string equality is
    /// value equality; mixed-type comparisons yield `false` for ordering
    /// operators, and for `=`/`!=` fall back to structural (in)equality.
    pub fn evaluate(self, lhs: &JsonValue, rhs: &JsonValue) -> bool {
        match self {
            ComparisonOp::Eq => lhs == rhs,
            ComparisonOp::NotEq => lhs != rhs,
            ComparisonOp::Gt | ComparisonOp::Lt | ComparisonOp::Ge | ComparisonOp::Le => {
                match (lhs.as_i64(), rhs.as_i64()) {
                    (Some(a), Some(b)) => match self {
                        ComparisonOp::Gt => a > b,
                        ComparisonOp::Lt => a < b,
                        ComparisonOp::Ge => a >= b,
                        ComparisonOp::Le => a <= b,
                        _ => unreachable!(),
                    },
                    _ => match (lhs.as_str(), rhs.as_str()) {
                        (Some(a), Some(b)) => match self {
                            ComparisonOp::Gt => a > b,
                            ComparisonOp::Lt => a < b,
                            ComparisonOp::Ge => a >= b,
                            ComparisonOp::Le => a <= b,
                            _ => unreachable!(),
                        },
                        // mixed-type ordering comparison: spec.md says false
                        _ => false,
                    },
                }
            }
        }
    }
}

/// Resolve a dotted keypath against a document-like JSON value. A missing
/// key at any segment, or a non-object dead end, yields `Null` rather than
/// an error (spec.md §8: "WHERE over a missing nested key: predicate is
/// false, not an error").
pub fn resolve_keypath<'a>(root: &'a JsonValue, keypath: &[&str]) -> JsonValue {
    let mut current = root;
    for segment in keypath {
        match current.get(segment) {
            Some(next) => current = next,
            None => return JsonValue::Null,
        }
    }
    current.clone()
}

/// The vertex/edge document with the reserved `class`/`edge_label` key
/// removed, for comparison against a pattern's attribute conditions
/// (spec.md: "vertex document minus `class` equals the specified
/// document").
pub fn document_without_key(doc: &Document, reserved_key: &str) -> Document {
    let mut out = doc.clone();
    out.remove(reserved_key);
    out
}
