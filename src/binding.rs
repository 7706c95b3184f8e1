//! The small piece shared by the matcher and the create executor: what a
//! designation is currently bound to, and how to turn that into a
//! projected RETURN value.

use crate::ast::Keypath;
use crate::error::EngineError;
use crate::graph::{EdgeId, GraphAdapter, VertexId};
use crate::value::resolve_keypath;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// What a designation resolves to: a vertex (from the matcher's
/// Cartesian-product domain, or freshly created), or an edge (an
/// `EdgeExists` witness, or freshly created).
#[derive(Clone)]
pub enum Bound {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl Bound {
    fn id(&self) -> &str {
        match self {
            Bound::Vertex(id) => id,
            Bound::Edge(id) => id,
        }
    }
}

pub fn document_of(graph: &dyn GraphAdapter, bound: &Bound) -> Result<JsonValue, EngineError> {
    let doc = match bound {
        Bound::Vertex(id) => graph.get_vertex(id),
        Bound::Edge(id) => graph.get_edge(id),
    }
    .map_err(EngineError::adapter)?;
    Ok(JsonValue::Object(doc.clone()))
}

/// Resolve a single RETURN projection entry: a bare designation yields its
/// bound identifier, a longer keypath traverses into its document
/// (spec.md §4.4's RETURN semantics, shared verbatim by CREATE's
/// single-row RETURN in spec.md §4.5 step 4).
pub fn project_one(
    graph: &dyn GraphAdapter,
    binding: &HashMap<String, Bound>,
    keypath: &Keypath,
) -> Result<JsonValue, EngineError> {
    let bound = binding.get(&keypath[0]).ok_or_else(|| EngineError::Binding {
        designation: keypath[0].clone(),
    })?;
    if keypath.len() == 1 {
        return Ok(JsonValue::String(bound.id().to_string()));
    }
    let doc = document_of(graph, bound)?;
    let rest: Vec<&str> = keypath[1..].iter().map(|s| s.as_str()).collect();
    Ok(resolve_keypath(&doc, &rest))
}
