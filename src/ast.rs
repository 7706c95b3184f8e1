//! Abstract syntax tree for the supported Cypher subset.
//!
//! One struct/enum per grammar production, named after what it represents
//! rather than how it's parsed — the same shape as
//! `open_cypher_parser/ast.rs`, scaled down to spec.md §3's restricted
//! grammar (no WITH/UNWIND/CALL/ORDER BY/paths/variable-length edges).
//! The node/edge shape below follows spec.md §3's data model directly
//! (and `original_source/python_cypher`'s `Node`/`EdgeExists` classes):
//! a pattern is a flat, parse-order list of nodes, and each node carries
//! the edges it is the *source* of in `connecting_edges` — direction is
//! resolved once, at parse time, into which node owns which edge, and is
//! not retained past that point (spec.md §3: "Direction is encoded by
//! which endpoint is `source`").

use crate::value::Document;

/// An edge attached to the node that is its source, pointing at another
/// node in the same [`Pattern`].
///
/// The target is recorded by its position in `Pattern::nodes` rather than
/// by designation: a target node may itself be anonymous at parse time
/// (designations are only guaranteed assigned after fact extraction, per
/// spec.md §4.3), so the parser links structurally and the fact extractor
/// resolves `target_index` to the target's (possibly freshly-minted)
/// designation when it builds `EdgeExists` facts.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeConnection {
    pub designation: Option<String>,
    pub target_index: usize,
    pub edge_label: Option<String>,
}

/// `(v)`, `(:Label)`, `(v:Label)`, `(v:Label {k: "s", k2: {k3: "s2"}})`,
/// plus whatever edges originate here (`connecting_edges`).
#[derive(Debug, Clone, PartialEq)]
pub struct NodePattern {
    pub designation: Option<String>,
    pub node_class: Option<String>,
    pub attribute_conditions: Document,
    pub connecting_edges: Vec<EdgeConnection>,
}

impl NodePattern {
    pub fn new(designation: Option<String>, node_class: Option<String>) -> Self {
        Self {
            designation,
            node_class,
            attribute_conditions: Document::new(),
            connecting_edges: Vec::new(),
        }
    }
}

/// A pattern literal: nodes in the order they were written, chained by
/// the edges attached to each node. A top-level comma simply appends more
/// nodes with no edge between the two sides (spec.md §4.2's `literals`
/// production allows comma-joined independent components).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    pub nodes: Vec<NodePattern>,
}

impl Pattern {
    pub fn push(&mut self, node: NodePattern) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

/// A dotted keypath, e.g. `n.foo.goo`. Always non-empty (spec.md §3
/// invariant: "Keypaths ... have length >= 1").
pub type Keypath = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    Ge,
    Le,
}

impl From<ComparisonOp> for crate::value::ComparisonOp {
    fn from(op: ComparisonOp) -> Self {
        match op {
            ComparisonOp::Eq => crate::value::ComparisonOp::Eq,
            ComparisonOp::NotEq => crate::value::ComparisonOp::NotEq,
            ComparisonOp::Gt => crate::value::ComparisonOp::Gt,
            ComparisonOp::Lt => crate::value::ComparisonOp::Lt,
            ComparisonOp::Ge => crate::value::ComparisonOp::Ge,
            ComparisonOp::Le => crate::value::ComparisonOp::Le,
        }
    }
}

/// A literal compared against on the right-hand side of a WHERE
/// comparison. spec.md's grammar only admits `STRING` there
/// (`constraint := keypath EQ STRING`); `INTEGER` is accepted too since
/// the comparison-operator extension (`>`, and the Open Question's
/// `>=`/`<`/`<=`/`!=`) is specified to compare numerically when both
/// sides are integers, which requires an integer literal to exist at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    String(String),
    Integer(i64),
}

/// Boolean constraint tree (spec.md §3). `And` is kept as a first-class
/// variant rather than the reference's De Morgan-rewritten
/// `Not(Or(Not(L), Not(R)))` — spec.md §9 explicitly allows collapsing
/// this back for clarity, with unchanged behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Comparison {
        keypath: Keypath,
        op: ComparisonOp,
        value: ConstraintValue,
    },
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
    Not(Box<Constraint>),
}

/// A single entry in a RETURN projection list: a bare designation or a
/// dotted keypath rooted at one.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub keypath: Keypath,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchWhereClause {
    pub pattern: Pattern,
    pub where_clause: Option<Constraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateClause {
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnClause {
    pub projections: Vec<Projection>,
}

/// One of the three clause kinds a query's top-level sequence is built
/// from (spec.md §3: "Clause: one of {MatchWhere, Create, Return}").
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    MatchWhere(MatchWhereClause),
    Create(CreateClause),
    Return(ReturnClause),
}

/// A full parsed query: an ordered list of clauses. The first clause's
/// kind selects the top-level dispatch (spec.md §3).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub clauses: Vec<Clause>,
}

impl Query {
    /// The single RETURN clause a well-formed query of this subset has.
    /// `None` only for a malformed query the parser should have already
    /// rejected; callers past the parser can treat its absence as a bug.
    pub fn return_clause(&self) -> Option<&ReturnClause> {
        self.clauses.iter().find_map(|c| match c {
            Clause::Return(r) => Some(r),
            _ => None,
        })
    }
}
