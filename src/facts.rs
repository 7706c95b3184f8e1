//! Atomic-fact extraction: flattens a parsed pattern into the constraint
//! list the matcher and create executor walk.
//!
//! Grounded on `python_cypher.py::extract_atomic_facts`'s recursive
//! designation-assigning walk, restated per spec.md §9's redesign note as
//! a pure function over an immutable AST rather than a walk that mutates
//! module-level state: this returns a fresh `Vec<AtomicFact>` and never
//! touches the `Query` it reads.

use crate::ast::{Clause, Constraint, NodePattern, Pattern, Query};
use crate::value::Document;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum AtomicFact {
    ClassIs {
        designation: String,
        class_name: Option<String>,
    },
    NodeHasDocument {
        designation: String,
        document: Document,
    },
    EdgeExists {
        source_designation: String,
        target_designation: String,
        edge_label: Option<String>,
        edge_designation: Option<String>,
    },
    WhereClause(Constraint),
}

/// The result of flattening a query's patterns. `designations` is every
/// pattern node's resolved designation, sorted and deduplicated — the
/// matcher's Cartesian-product domain (spec.md §4.4 step 1). It can't be
/// recovered from `facts` alone: a pattern node with no class, no
/// attribute conditions, and no edges produces zero atomic facts (the
/// Open Question resolution in spec.md §9 skips its no-op `ClassIs`), but
/// still needs a domain slot to be bindable at all (spec.md §8 scenario 3,
/// `MATCH (n) RETURN n.foo`, has exactly this shape).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
    pub facts: Vec<AtomicFact>,
    pub designations: Vec<String>,
}

/// Flatten every clause's pattern (and WHERE tree) into a document-order
/// list of atomic facts. The anonymous-designation counter is scoped to
/// this one call, per spec.md §4.3.
pub fn extract(query: &Query) -> Extraction {
    let mut facts = Vec::new();
    let mut all_designations = BTreeSet::new();
    let mut counter = 0usize;
    for clause in &query.clauses {
        match clause {
            Clause::MatchWhere(mw) => {
                let designations =
                    extract_pattern(&mw.pattern, &mut counter, &mut facts);
                all_designations.extend(designations);
                if let Some(where_clause) = &mw.where_clause {
                    facts.push(AtomicFact::WhereClause(where_clause.clone()));
                }
            }
            Clause::Create(create) => {
                let designations =
                    extract_pattern(&create.pattern, &mut counter, &mut facts);
                all_designations.extend(designations);
            }
            Clause::Return(_) => {}
        }
    }
    Extraction {
        facts,
        designations: all_designations.into_iter().collect(),
    }
}

/// Designation each pattern node resolves to: the user-supplied name, or
/// a freshly minted `_v<N>` for nodes that didn't have one. Pattern edges
/// without a designation stay anonymous (`None`) — unlike nodes, an edge
/// with no designation is never bound to anything, so minting one would
/// only inflate the matcher's enumeration domain for no observable effect.
pub(crate) fn resolve_node_designations(nodes: &[NodePattern], counter: &mut usize) -> Vec<String> {
    nodes
        .iter()
        .map(|node| match &node.designation {
            Some(d) => d.clone(),
            None => {
                let d = format!("_v{counter}");
                *counter += 1;
                d
            }
        })
        .collect()
}

/// Emit this pattern's atomic facts and return its nodes' resolved
/// designations (in pattern order).
fn extract_pattern(
    pattern: &Pattern,
    counter: &mut usize,
    facts: &mut Vec<AtomicFact>,
) -> Vec<String> {
    let designations = resolve_node_designations(&pattern.nodes, counter);

    for (index, node) in pattern.nodes.iter().enumerate() {
        let designation = designations[index].clone();

        // Open Question resolution: a node with no class filters nothing,
        // so no ClassIs fact is emitted for it at all (spec.md §9).
        if let Some(class_name) = &node.node_class {
            facts.push(AtomicFact::ClassIs {
                designation: designation.clone(),
                class_name: Some(class_name.clone()),
            });
        }

        if !node.attribute_conditions.is_empty() {
            facts.push(AtomicFact::NodeHasDocument {
                designation: designation.clone(),
                document: node.attribute_conditions.clone(),
            });
        }

        for edge in &node.connecting_edges {
            facts.push(AtomicFact::EdgeExists {
                source_designation: designation.clone(),
                target_designation: designations[edge.target_index].clone(),
                edge_label: edge.edge_label.clone(),
                edge_designation: edge.designation.clone(),
            });
        }
    }

    designations
}
