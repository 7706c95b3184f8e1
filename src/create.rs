//! CREATE / RETURN execution: materialize a pattern into the graph, then
//! evaluate RETURN once against the freshly bound designations.
//!
//! Grounded on spec.md §4.5; the edge-designation bookkeeping follows
//! `python_cypher.py::head_create_query`, fixed up (per spec.md §9's note
//! on the reference's module-level state) to thread bindings through an
//! explicit map rather than leaving a `'placeholder'` key half-wired, as
//! the reference does.

use crate::ast::{CreateClause, Query};
use crate::binding::{project_one, Bound};
use crate::error::EngineError;
use crate::facts::{self, AtomicFact};
use crate::graph::GraphAdapter;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Execute `create` against `graph`, then project `query`'s RETURN list
/// using the new vertices'/edges' bindings. Returns the query's single
/// result row (spec.md §4.5 step 4).
pub fn execute(
    graph: &mut dyn GraphAdapter,
    query: &Query,
    create: &CreateClause,
) -> Result<Vec<JsonValue>, EngineError> {
    let mut counter = 0usize;
    let node_designations = facts::resolve_node_designations(&create.pattern.nodes, &mut counter);

    let mut binding: HashMap<String, Bound> = HashMap::new();
    for (index, node) in create.pattern.nodes.iter().enumerate() {
        let id = graph.add_vertex(node.node_class.clone(), node.attribute_conditions.clone());
        binding.insert(node_designations[index].clone(), Bound::Vertex(id));
    }

    let extraction = facts::extract(query);
    for fact in &extraction.facts {
        if let AtomicFact::EdgeExists {
            source_designation,
            target_designation,
            edge_label,
            edge_designation,
        } = fact
        {
            let source_id = match &binding[source_designation] {
                Bound::Vertex(id) => id.clone(),
                Bound::Edge(_) => unreachable!("pattern edges always source from a node"),
            };
            let target_id = match &binding[target_designation] {
                Bound::Vertex(id) => id.clone(),
                Bound::Edge(_) => unreachable!("pattern edges always target a node"),
            };
            let edge_id = graph.add_edge(&source_id, &target_id, edge_label.clone());
            if let Some(edge_designation) = edge_designation {
                binding.insert(edge_designation.clone(), Bound::Edge(edge_id));
            }
        }
    }

    let return_clause = query
        .return_clause()
        .ok_or(EngineError::MissingReturnClause)?;
    return_clause
        .projections
        .iter()
        .map(|proj| project_one(graph, &binding, &proj.keypath))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Clause;
    use crate::graph::InMemoryGraph;
    use crate::parser::parse;
    use crate::tokenizer::tokenize;
    use serde_json::json;

    fn run(graph: &mut dyn GraphAdapter, query_text: &str) -> Vec<JsonValue> {
        let tokens = tokenize(query_text).unwrap();
        let query = parse(&tokens).unwrap();
        let create = query
            .clauses
            .iter()
            .find_map(|c| match c {
                Clause::Create(cc) => Some(cc.clone()),
                _ => None,
            })
            .unwrap();
        execute(graph, &query, &create).unwrap()
    }

    #[test]
    fn creates_classed_vertex() {
        let mut g = InMemoryGraph::new();
        let row = run(&mut g, "CREATE (n:SOMECLASS) RETURN n");
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(row.len(), 1);
        let id = row[0].as_str().unwrap();
        assert_eq!(g.get_vertex(id).unwrap().get("class"), Some(&json!("SOMECLASS")));
    }

    #[test]
    fn creates_edge_between_two_new_vertices() {
        let mut g = InMemoryGraph::new();
        let row = run(&mut g, "CREATE (n)-->(m) RETURN n, m");
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        let n_id = row[0].as_str().unwrap().to_string();
        let m_id = row[1].as_str().unwrap().to_string();
        assert_eq!(g.edges_between(&n_id, &m_id).len(), 1);
    }

    #[test]
    fn missing_return_clause_is_an_error_not_a_panic() {
        // execute() is handed a Query directly rather than going through
        // the parser, so it can't lean on grammar-level guarantees about
        // RETURN being present.
        let query = Query { clauses: vec![] };
        let create = CreateClause {
            pattern: crate::ast::Pattern::default(),
        };
        let mut g = InMemoryGraph::new();
        let result = execute(&mut g, &query, &create);
        assert!(matches!(result, Err(EngineError::MissingReturnClause)));
    }
}
