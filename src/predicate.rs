//! Recursive evaluation of a WHERE [`Constraint`] tree against a binding.
//!
//! Grounded on `python_cypher.py::eval_boolean`/`eval_constraint`, restated
//! as a match over the tagged `Constraint` union instead of the
//! reference's `isinstance` dispatch chain (spec.md §9).

use crate::ast::{Constraint, ConstraintValue, Keypath};
use crate::value::ComparisonOp;
use serde_json::{json, Value as JsonValue};

/// Evaluate `constraint` against a binding, resolving each comparison's
/// keypath via `resolve`. `resolve` is handed the full keypath (its first
/// segment names the bound designation) and returns the value found there,
/// or `Value::Null` if any segment is missing — the matcher supplies this
/// by looking up the designation's document through the graph adapter.
pub fn evaluate(constraint: &Constraint, resolve: &impl Fn(&Keypath) -> JsonValue) -> bool {
    match constraint {
        Constraint::Comparison { keypath, op, value } => {
            let lhs = resolve(keypath);
            let rhs = constraint_value_to_json(value);
            ComparisonOp::from(*op).evaluate(&lhs, &rhs)
        }
        Constraint::And(left, right) => evaluate(left, resolve) && evaluate(right, resolve),
        Constraint::Or(left, right) => evaluate(left, resolve) || evaluate(right, resolve),
        Constraint::Not(inner) => !evaluate(inner, resolve),
    }
}

fn constraint_value_to_json(value: &ConstraintValue) -> JsonValue {
    match value {
        ConstraintValue::String(s) => json!(s),
        ConstraintValue::Integer(n) => json!(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ComparisonOp as AstOp;
    use std::collections::HashMap;

    fn comparison(keypath: &[&str], op: AstOp, value: ConstraintValue) -> Constraint {
        Constraint::Comparison {
            keypath: keypath.iter().map(|s| s.to_string()).collect(),
            op,
            value,
        }
    }

    fn resolver(docs: HashMap<&'static str, JsonValue>) -> impl Fn(&Keypath) -> JsonValue {
        move |kp: &Keypath| {
            let root = docs
                .get(kp[0].as_str())
                .cloned()
                .unwrap_or(JsonValue::Null);
            let segments: Vec<&str> = kp[1..].iter().map(|s| s.as_str()).collect();
            crate::value::resolve_keypath(&root, &segments)
        }
    }

    #[test]
    fn simple_equality() {
        let mut docs = HashMap::new();
        docs.insert("n", json!({"foo": "bar"}));
        let c = comparison(&["n", "foo"], AstOp::Eq, ConstraintValue::String("bar".into()));
        assert!(evaluate(&c, &resolver(docs)));
    }

    #[test]
    fn not_and_or_demorgan_scenario() {
        // NOT (n.foo = "baz" AND n.foo = "bar") with n.foo == "bar" -> true,
        // because the conjunction is false (spec.md §8 scenario 5).
        let mut docs = HashMap::new();
        docs.insert("n", json!({"foo": "bar"}));
        let c = Constraint::Not(Box::new(Constraint::And(
            Box::new(comparison(&["n", "foo"], AstOp::Eq, ConstraintValue::String("baz".into()))),
            Box::new(comparison(&["n", "foo"], AstOp::Eq, ConstraintValue::String("bar".into()))),
        )));
        assert!(evaluate(&c, &resolver(docs)));
    }

    #[test]
    fn missing_nested_key_is_false_not_error() {
        let mut docs = HashMap::new();
        docs.insert("n", json!({"foo": "bar"}));
        let c = comparison(&["n", "missing", "deep"], AstOp::Eq, ConstraintValue::String("x".into()));
        assert!(!evaluate(&c, &resolver(docs)));
    }

    #[test]
    fn or_short_circuits_on_first_true() {
        let mut docs = HashMap::new();
        docs.insert("n", json!({"foo": "bar"}));
        let c = Constraint::Or(
            Box::new(comparison(&["n", "foo"], AstOp::Eq, ConstraintValue::String("bar".into()))),
            Box::new(comparison(&["n", "nonexistent"], AstOp::Eq, ConstraintValue::String("x".into()))),
        );
        assert!(evaluate(&c, &resolver(docs)));
    }
}
