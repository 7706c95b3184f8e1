//! End-to-end coverage of spec.md §8's "Concrete scenarios", run against
//! `InMemoryGraph` through the crate's public `query` entry point.

use cyphergraph::graph::{GraphAdapter, InMemoryGraph};
use cyphergraph::value::Document;
use cyphergraph::{query, EngineError};
use serde_json::json;

fn rows(graph: &mut dyn GraphAdapter, text: &str) -> Vec<Vec<serde_json::Value>> {
    query(graph, text)
        .unwrap()
        .rows()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Scenario 1: `CREATE (n:SOMECLASS) RETURN n` on an empty graph adds one
/// vertex labeled `SOMECLASS`.
#[test]
fn scenario_1_create_single_classed_vertex() {
    let mut g = InMemoryGraph::new();
    let result = rows(&mut g, "CREATE (n:SOMECLASS) RETURN n");
    assert_eq!(g.vertex_count(), 1);
    assert_eq!(result.len(), 1);
    let id = result[0][0].as_str().unwrap();
    assert_eq!(g.get_vertex(id).unwrap().get("class"), Some(&json!("SOMECLASS")));
}

/// Scenario 2: `CREATE (n)-->(m) RETURN n, m` adds two vertices and
/// exactly one edge from `n`'s id to `m`'s id.
#[test]
fn scenario_2_create_edge_between_two_fresh_vertices() {
    let mut g = InMemoryGraph::new();
    let result = rows(&mut g, "CREATE (n)-->(m) RETURN n, m");
    assert_eq!(g.vertex_count(), 2);
    let n_id = result[0][0].as_str().unwrap().to_string();
    let m_id = result[0][1].as_str().unwrap().to_string();
    assert_eq!(g.edges_between(&n_id, &m_id).len(), 1);
}

/// Scenario 3: `MATCH (n) RETURN n.foo` over a graph with one vertex
/// `{class: "SOMECLASS", foo: "bar"}` yields exactly `["bar"]`.
#[test]
fn scenario_3_match_projects_scalar_attribute() {
    let mut g = InMemoryGraph::new();
    let mut doc = Document::new();
    doc.insert("foo".to_string(), json!("bar"));
    g.add_vertex(Some("SOMECLASS".to_string()), doc);

    let result = rows(&mut g, "MATCH (n) RETURN n.foo");
    assert_eq!(result, vec![vec![json!("bar")]]);
}

/// Scenario 4: nested attribute condition, labeled edge, WHERE on the
/// target, and a bare edge designation in RETURN.
#[test]
fn scenario_4_full_pattern_with_where_and_edge_designation() {
    let mut g = InMemoryGraph::new();
    let mut a_doc = Document::new();
    a_doc.insert("foo".to_string(), json!({"goo": "bar"}));
    let a = g.add_vertex(Some("A".to_string()), a_doc);

    let mut b_doc = Document::new();
    b_doc.insert("qux".to_string(), json!("foobar"));
    b_doc.insert("bar".to_string(), json!(10));
    let b = g.add_vertex(Some("B".to_string()), b_doc);

    let e = g.add_edge(&a, &b, Some("EDGECLASS".to_string()));

    let result = rows(
        &mut g,
        r#"MATCH (n:A {foo:{goo:"bar"}})-[e:EDGECLASS]->(m:B) WHERE m.bar = 10 RETURN n.foo.goo, m.qux, e"#,
    );
    assert_eq!(result, vec![vec![json!("bar"), json!("foobar"), json!(e)]]);
}

/// Scenario 5: `NOT (a AND b)` over a vertex where only one side holds
/// yields the vertex, because the conjunction as a whole is false.
#[test]
fn scenario_5_not_and_demorgan() {
    let mut g = InMemoryGraph::new();
    let mut doc = Document::new();
    doc.insert("foo".to_string(), json!("bar"));
    g.add_vertex(None, doc);

    let result = rows(
        &mut g,
        r#"MATCH (n) WHERE NOT (n.foo = "baz" AND n.foo = "bar") RETURN n"#,
    );
    assert_eq!(result.len(), 1);
}

/// Scenario 6: a malformed query raises a parse error before any row is
/// produced.
#[test]
fn scenario_6_malformed_query_is_a_parse_error() {
    let mut g = InMemoryGraph::new();
    let result = query(&mut g, "MATCH (");
    assert!(matches!(result, Err(EngineError::Parse(_))));
}

/// Boundary: an empty graph under MATCH yields no rows at all.
#[test]
fn boundary_empty_graph_match_yields_nothing() {
    let mut g = InMemoryGraph::new();
    assert!(rows(&mut g, "MATCH (n) RETURN n").is_empty());
}

/// Boundary: parallel edges with distinct labels only match the label
/// actually asked for.
#[test]
fn boundary_parallel_edges_distinguished_by_label() {
    let mut g = InMemoryGraph::new();
    let a = g.add_vertex(None, Document::new());
    let b = g.add_vertex(None, Document::new());
    g.add_edge(&a, &b, Some("X".to_string()));
    let wanted = g.add_edge(&a, &b, Some("Y".to_string()));

    let result = rows(&mut g, "MATCH (n)-[e:Y]->(m) RETURN e");
    assert_eq!(result, vec![vec![json!(wanted)]]);
}

/// Boundary: WHERE over a key that doesn't exist on the bound vertex is
/// false, not an error.
#[test]
fn boundary_where_over_missing_key_is_false_not_error() {
    let mut g = InMemoryGraph::new();
    let mut doc = Document::new();
    doc.insert("foo".to_string(), json!("bar"));
    g.add_vertex(None, doc);

    let result = rows(&mut g, r#"MATCH (n) WHERE n.nonexistent = "x" RETURN n"#);
    assert!(result.is_empty());
}

/// Round-trip: creating `(n:A)-[:R]->(m:B)` then matching
/// `(x:A)-[:R]->(y:B)` yields at least the created pair.
#[test]
fn round_trip_create_then_match_labeled_edge() {
    let mut g = InMemoryGraph::new();
    rows(&mut g, "CREATE (n:A)-[:R]->(m:B) RETURN n, m");

    let result = rows(&mut g, "MATCH (x:A)-[:R]->(y:B) RETURN x, y");
    assert_eq!(result.len(), 1);
}
