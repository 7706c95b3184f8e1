//! A tokenizer, parser, and matcher for a small Cypher subset, run
//! against a host-supplied in-memory labeled property multigraph.
//!
//! The crate exposes two entry points, [`query`] and
//! [`query_with_config`], each of which tokenizes, parses, and dispatches
//! on the parsed query's leading clause: a `MATCH` query drives
//! [`matcher::evaluate`] and yields a lazy row sequence; a `CREATE` query
//! drives [`create::execute`] and yields the single row its `RETURN`
//! projects over the newly created vertices/edges. See `SPEC_FULL.md` for
//! the full component breakdown (`open_cypher_parser::parse_cypher_statement`
//! and `python_cypher.py::CypherParserBaseClass.query` are this crate's
//! grounding for that tokenize -> parse -> dispatch control flow).

pub mod ast;
pub mod binding;
pub mod config;
pub mod create;
pub mod error;
pub mod facts;
pub mod graph;
pub mod matcher;
mod parser;
pub mod predicate;
pub mod tokenizer;
pub mod value;

use ast::Clause;
use graph::GraphAdapter;
use serde_json::Value as JsonValue;

pub use config::EngineConfig;
pub use error::EngineError;

/// The result of running a query: either a lazy `MATCH` row sequence or a
/// `CREATE` query's single materialized row.
pub enum QueryOutcome<'g> {
    Matched(matcher::Matches<'g>),
    Created(Vec<JsonValue>),
}

impl<'g> QueryOutcome<'g> {
    /// Drain the outcome into its row sequence. A `CREATE` outcome always
    /// yields exactly one row (spec.md §6.3: "A CREATE query returns a
    /// single-row sequence").
    pub fn rows(self) -> Box<dyn Iterator<Item = Result<Vec<JsonValue>, EngineError>> + 'g> {
        match self {
            QueryOutcome::Matched(matches) => Box::new(matches),
            QueryOutcome::Created(row) => Box::new(std::iter::once(Ok(row))),
        }
    }
}

/// Run `text` against `graph` using [`EngineConfig::default`].
pub fn query<'g>(
    graph: &'g mut dyn GraphAdapter,
    text: &str,
) -> Result<QueryOutcome<'g>, EngineError> {
    query_with_config(graph, text, &EngineConfig::default())
}

/// Run `text` against `graph` under an explicit [`EngineConfig`].
///
/// Control flow (spec.md §2): tokenize the full query text, parse the
/// token stream into an AST, then dispatch on the first clause's kind.
/// `MATCH` drives a read-only evaluation whose rows are exhausted lazily
/// by the caller (spec.md §5's "lazy producer, pull-based" model);
/// `CREATE` takes the graph exclusively until its one RETURN row is
/// produced (spec.md §5's "CREATE query takes exclusive access until
/// completion").
pub fn query_with_config<'g>(
    graph: &'g mut dyn GraphAdapter,
    text: &str,
    config: &EngineConfig,
) -> Result<QueryOutcome<'g>, EngineError> {
    let config = config.clone().validated()?;

    log::debug!("tokenizing query ({} bytes)", text.len());
    let tokens = tokenizer::tokenize(text)?;
    log::trace!("tokenized into {} token(s)", tokens.len());

    let parsed = parser::parse(&tokens)?;
    log::debug!("parsed {} clause(s)", parsed.clauses.len());

    match parsed.clauses.first() {
        Some(Clause::MatchWhere(_)) => {
            log::debug!("dispatching to matcher");
            let extraction = facts::extract(&parsed);
            let projections = parsed
                .return_clause()
                .ok_or(EngineError::MissingReturnClause)?
                .projections
                .clone();
            let matches = matcher::evaluate(graph, extraction, projections, &config)?;
            Ok(QueryOutcome::Matched(matches))
        }
        Some(Clause::Create(create_clause)) => {
            log::debug!("dispatching to create executor");
            let create_clause = create_clause.clone();
            let row = create::execute(graph, &parsed, &create_clause)?;
            Ok(QueryOutcome::Created(row))
        }
        // The parser only ever accepts MATCH or CREATE as a leading
        // clause (`SyntaxError::NoLeadingClause`), so a RETURN-first or
        // empty clause list here would mean the parser's own invariant
        // broke, not a user-facing error condition.
        _ => unreachable!("parser guarantees a leading MATCH or CREATE clause"),
    }
}
