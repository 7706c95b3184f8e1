//! The graph capability layer: [`GraphAdapter`] is the boundary between
//! this crate and whatever store actually holds vertices and edges, and
//! [`InMemoryGraph`] is a reference implementation over an owned `Vec`.
//!
//! Grounded on spec.md §6.2 for the trait surface and on
//! `python_cypher.py::CypherToNetworkx` for the reference semantics
//! (multigraph, stable `edges_between` order, `class`/`edge_label` as
//! reserved document keys) — reimplemented over an owned `Vec`-backed
//! store rather than wrapping a graph-library type, since no such crate
//! is in the dependency set this crate inherited.

use crate::value::Document;
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

pub type VertexId = String;
pub type EdgeId = String;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AdapterError {
    #[error("no vertex with id `{0}`")]
    MissingVertex(VertexId),
    #[error("no edge with id `{0}`")]
    MissingEdge(EdgeId),
}

/// Capability set a concrete graph store exposes to the engine. The
/// matcher only ever calls the read methods; the create executor calls
/// `add_vertex`/`add_edge`/`fresh_id` too.
#[cfg_attr(test, mockall::automock)]
pub trait GraphAdapter {
    /// Every vertex id currently in the graph, in the store's stable
    /// iteration order.
    fn vertices(&self) -> Vec<VertexId>;

    fn get_vertex(&self, id: &str) -> Result<&Document, AdapterError>;

    fn get_edge(&self, id: &str) -> Result<&Document, AdapterError>;

    /// Edge ids running from `source` to `target`, in the store's stable
    /// order — the matcher's witness-selection determinism (spec.md §4.4)
    /// depends on this being consistent across calls.
    fn edges_between(&self, source: &str, target: &str) -> Vec<EdgeId>;

    /// Insert a vertex carrying `document` plus the reserved `class` key
    /// when `class` is given, and return its freshly minted id.
    fn add_vertex(&mut self, class: Option<String>, document: Document) -> VertexId;

    /// Insert an edge from `source` to `target` carrying the reserved
    /// `edge_label` key when `edge_label` is given, and return its freshly
    /// minted id.
    fn add_edge(&mut self, source: &str, target: &str, edge_label: Option<String>) -> EdgeId;

    /// Mint a process-unique opaque identifier.
    fn fresh_id(&mut self) -> String;
}

struct StoredEdge {
    id: EdgeId,
    source: VertexId,
    target: VertexId,
    document: Document,
}

/// An owned, process-local labeled property multigraph.
#[derive(Default)]
pub struct InMemoryGraph {
    vertex_order: Vec<VertexId>,
    vertex_docs: HashMap<VertexId, Document>,
    edges: Vec<StoredEdge>,
    edge_index: HashMap<EdgeId, usize>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl GraphAdapter for InMemoryGraph {
    fn vertices(&self) -> Vec<VertexId> {
        self.vertex_order.clone()
    }

    fn get_vertex(&self, id: &str) -> Result<&Document, AdapterError> {
        self.vertex_docs
            .get(id)
            .ok_or_else(|| AdapterError::MissingVertex(id.to_string()))
    }

    fn get_edge(&self, id: &str) -> Result<&Document, AdapterError> {
        self.edge_index
            .get(id)
            .map(|&idx| &self.edges[idx].document)
            .ok_or_else(|| AdapterError::MissingEdge(id.to_string()))
    }

    fn edges_between(&self, source: &str, target: &str) -> Vec<EdgeId> {
        self.edges
            .iter()
            .filter(|e| e.source == source && e.target == target)
            .map(|e| e.id.clone())
            .collect()
    }

    fn add_vertex(&mut self, class: Option<String>, mut document: Document) -> VertexId {
        if let Some(class) = class {
            document.insert("class".to_string(), json!(class));
        }
        let id = self.fresh_id();
        self.vertex_order.push(id.clone());
        self.vertex_docs.insert(id.clone(), document);
        id
    }

    fn add_edge(&mut self, source: &str, target: &str, edge_label: Option<String>) -> EdgeId {
        let mut document = Document::new();
        if let Some(label) = edge_label {
            document.insert("edge_label".to_string(), json!(label));
        }
        let id = self.fresh_id();
        self.edge_index.insert(id.clone(), self.edges.len());
        self.edges.push(StoredEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            document,
        });
        id
    }

    fn fresh_id(&mut self) -> String {
        format!("_id_{}", Uuid::new_v4().simple())
    }
}
