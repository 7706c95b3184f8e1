//! MATCH / WHERE / RETURN evaluation: Cartesian-product enumeration over
//! the vertex domain, filtered by atomic facts, projected via RETURN.
//!
//! Grounded on `python_cypher.py::query`'s `_test_match_where` closure and
//! `yield_var_to_element` (the domain product generator), restated as a
//! lazy [`Iterator`] per spec.md §5's "lazy producer, pull-based" model
//! instead of the reference's generator-and-callback shape.

use crate::ast::{Keypath, Projection};
use crate::binding::{document_of, project_one, Bound};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::facts::{AtomicFact, Extraction};
use crate::graph::{EdgeId, GraphAdapter, VertexId};
use crate::value::{document_without_key, resolve_keypath};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Build the lazy row sequence for a MATCH query. Fails fast if the
/// graph's vertex universe exceeds `config.max_domain_size` rather than
/// starting an enumeration that would never finish.
///
/// `extraction` and `projections` are taken by value rather than
/// borrowed: `Matches` owns them, so its only remaining lifetime
/// parameter is the one tied to `graph` — letting a caller build the
/// `Extraction`/`Vec<Projection>` from a `Query` that itself doesn't
/// outlive the call (as `lib.rs`'s dispatch does) and still return the
/// resulting `Matches<'g>`.
pub fn evaluate<'g>(
    graph: &'g dyn GraphAdapter,
    extraction: Extraction,
    projections: Vec<Projection>,
    config: &EngineConfig,
) -> Result<Matches<'g>, EngineError> {
    let universe = graph.vertices();
    if universe.len() > config.max_domain_size {
        return Err(EngineError::DomainTooLarge {
            size: universe.len(),
            max: config.max_domain_size,
        });
    }

    let designations = extraction.designations;
    let exhausted = universe.is_empty() && !designations.is_empty();
    let idx = vec![0usize; designations.len()];

    Ok(Matches {
        graph,
        universe,
        designations,
        facts: extraction.facts,
        projections,
        idx,
        exhausted,
        started: false,
    })
}

pub struct Matches<'g> {
    graph: &'g dyn GraphAdapter,
    universe: Vec<VertexId>,
    designations: Vec<String>,
    facts: Vec<AtomicFact>,
    projections: Vec<Projection>,
    idx: Vec<usize>,
    exhausted: bool,
    started: bool,
}

impl<'g> Matches<'g> {
    /// Advance the odometer to the next candidate assignment, in
    /// lexicographic order over `designations` (leftmost varies slowest).
    fn advance(&mut self) {
        if !self.started {
            self.started = true;
            return;
        }
        for slot in self.idx.iter_mut().rev() {
            *slot += 1;
            if *slot < self.universe.len() {
                return;
            }
            *slot = 0;
        }
        self.exhausted = true;
    }

    fn current_binding(&self) -> HashMap<String, Bound> {
        self.designations
            .iter()
            .zip(&self.idx)
            .map(|(d, &i)| (d.clone(), Bound::Vertex(self.universe[i].clone())))
            .collect()
    }

    /// Evaluate every fact against `binding` in extraction order. Returns
    /// `Ok(true)` if every fact holds (mutating `binding` with any edge
    /// witnesses along the way), `Ok(false)` if some fact doesn't hold
    /// (not an error — just a non-matching candidate), or `Err` if the
    /// adapter itself failed.
    fn satisfies(&self, binding: &mut HashMap<String, Bound>) -> Result<bool, EngineError> {
        for fact in &self.facts {
            let holds = match fact {
                AtomicFact::ClassIs {
                    designation,
                    class_name,
                } => {
                    let doc = document_of(self.graph, &binding[designation])?;
                    match class_name {
                        Some(class) => doc.get("class") == Some(&JsonValue::String(class.clone())),
                        None => true,
                    }
                }
                AtomicFact::NodeHasDocument {
                    designation,
                    document,
                } => {
                    let doc = document_of(self.graph, &binding[designation])?;
                    match doc.as_object() {
                        Some(obj) => document_without_key(obj, "class") == *document,
                        None => false,
                    }
                }
                AtomicFact::EdgeExists {
                    source_designation,
                    target_designation,
                    edge_label,
                    edge_designation,
                } => {
                    let source_id = match &binding[source_designation] {
                        Bound::Vertex(id) => id.clone(),
                        Bound::Edge(_) => return Ok(false),
                    };
                    let target_id = match &binding[target_designation] {
                        Bound::Vertex(id) => id.clone(),
                        Bound::Edge(_) => return Ok(false),
                    };
                    let candidates = self.graph.edges_between(&source_id, &target_id);
                    let witness = self.find_edge_witness(&candidates, edge_label)?;
                    match witness {
                        Some(edge_id) => {
                            if let Some(edge_designation) = edge_designation {
                                binding.insert(edge_designation.clone(), Bound::Edge(edge_id));
                            }
                            true
                        }
                        None => false,
                    }
                }
                AtomicFact::WhereClause(constraint) => {
                    let resolve = |keypath: &Keypath| -> JsonValue {
                        match binding.get(&keypath[0]) {
                            Some(bound) => match document_of(self.graph, bound) {
                                Ok(doc) => {
                                    let rest: Vec<&str> =
                                        keypath[1..].iter().map(|s| s.as_str()).collect();
                                    resolve_keypath(&doc, &rest)
                                }
                                Err(_) => JsonValue::Null,
                            },
                            None => JsonValue::Null,
                        }
                    };
                    crate::predicate::evaluate(constraint, &resolve)
                }
            };
            if !holds {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// First candidate edge whose label matches, in the adapter's stable
    /// order (spec.md §4.4's witness-selection rule).
    fn find_edge_witness(
        &self,
        candidates: &[EdgeId],
        edge_label: &Option<String>,
    ) -> Result<Option<EdgeId>, EngineError> {
        for id in candidates {
            match edge_label {
                Some(label) => {
                    let doc = self.graph.get_edge(id).map_err(EngineError::adapter)?;
                    if doc.get("edge_label") == Some(&JsonValue::String(label.clone())) {
                        return Ok(Some(id.clone()));
                    }
                }
                None => return Ok(Some(id.clone())),
            }
        }
        Ok(None)
    }

    fn project(&self, binding: &HashMap<String, Bound>) -> Result<Vec<JsonValue>, EngineError> {
        self.projections
            .iter()
            .map(|proj| project_one(self.graph, binding, &proj.keypath))
            .collect()
    }
}

impl<'g> Iterator for Matches<'g> {
    type Item = Result<Vec<JsonValue>, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.advance();
            if self.exhausted {
                return None;
            }
            let mut binding = self.current_binding();
            match self.satisfies(&mut binding) {
                Ok(true) => return Some(self.project(&binding)),
                Ok(false) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts;
    use crate::graph::InMemoryGraph;
    use crate::parser::parse;
    use crate::tokenizer::tokenize;
    use serde_json::json;

    fn run(graph: &dyn GraphAdapter, query_text: &str) -> Vec<Vec<JsonValue>> {
        let tokens = tokenize(query_text).unwrap();
        let query = parse(&tokens).unwrap();
        let facts = facts::extract(&query);
        let projections = query.return_clause().unwrap().projections.clone();
        let config = EngineConfig::default();
        evaluate(graph, facts, projections, &config)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn empty_graph_yields_no_rows() {
        let g = InMemoryGraph::new();
        assert!(run(&g, "MATCH (n) RETURN n").is_empty());
    }

    #[test]
    fn projects_nested_keypath() {
        let mut g = InMemoryGraph::new();
        let mut doc = crate::value::Document::new();
        doc.insert("foo".to_string(), json!("bar"));
        g.add_vertex(Some("SOMECLASS".to_string()), doc);
        let rows = run(&g, "MATCH (n) RETURN n.foo");
        assert_eq!(rows, vec![vec![json!("bar")]]);
    }

    #[test]
    fn full_scenario_with_edge_and_where() {
        let mut g = InMemoryGraph::new();
        let mut a_doc = crate::value::Document::new();
        a_doc.insert("foo".to_string(), json!({"goo": "bar"}));
        let a = g.add_vertex(Some("A".to_string()), a_doc);
        let mut b_doc = crate::value::Document::new();
        b_doc.insert("qux".to_string(), json!("foobar"));
        b_doc.insert("bar".to_string(), json!(10));
        let b = g.add_vertex(Some("B".to_string()), b_doc);
        let e = g.add_edge(&a, &b, Some("EDGECLASS".to_string()));

        let rows = run(
            &g,
            r#"MATCH (n:A {foo:{goo:"bar"}})-[e:EDGECLASS]->(m:B) WHERE m.bar = 10 RETURN n.foo.goo, m.qux, e"#,
        );
        assert_eq!(rows, vec![vec![json!("bar"), json!("foobar"), json!(e)]]);
    }

    #[test]
    fn return_of_unbound_designation_is_a_binding_error() {
        let mut g = InMemoryGraph::new();
        g.add_vertex(Some("A".to_string()), crate::value::Document::new());
        let tokens = tokenize("MATCH (:A) RETURN n").unwrap();
        let query = parse(&tokens).unwrap();
        let facts = facts::extract(&query);
        let projections = query.return_clause().unwrap().projections.clone();
        let config = EngineConfig::default();
        let result = evaluate(&g, facts, projections, &config)
            .unwrap()
            .collect::<Result<Vec<_>, _>>();
        assert!(matches!(result, Err(EngineError::Binding { .. })));
    }

    #[test]
    fn parallel_edges_filtered_by_label() {
        let mut g = InMemoryGraph::new();
        let a = g.add_vertex(None, crate::value::Document::new());
        let b = g.add_vertex(None, crate::value::Document::new());
        g.add_edge(&a, &b, Some("X".to_string()));
        let wanted = g.add_edge(&a, &b, Some("Y".to_string()));
        let rows = run(&g, "MATCH (n)-[e:Y]->(m) RETURN e");
        assert_eq!(rows, vec![vec![json!(wanted)]]);
    }
}
