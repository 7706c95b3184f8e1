//! Lexical analyzer: turns query text into a flat token stream.
//!
//! Grounded on `open_cypher_parser/common.rs`'s `nom` character-class
//! combinators for the scanning primitives, and on
//! `examples/original_source/python_cypher/cypher_tokenizer.py` (the
//! `ply.lex` token table actually wired into that project's parser) for
//! the token set itself and the keyword-before-identifier priority rule.

use crate::error::TokenizeError;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{opt, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    ArrowRight, // -->
    ArrowLeft,  // <--
    Dash,       // -
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    NotEq,
    Match,
    Create,
    Where,
    Return,
    And,
    Or,
    Not,
    Name(&'a str),
    Key(&'a str),
    String(&'a str),
    Integer(i64),
}

impl std::fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::ArrowRight => write!(f, "-->"),
            TokenKind::ArrowLeft => write!(f, "<--"),
            TokenKind::Dash => write!(f, "-"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Ge => write!(f, ">="),
            TokenKind::Le => write!(f, "<="),
            TokenKind::Eq => write!(f, "="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Match => write!(f, "MATCH"),
            TokenKind::Create => write!(f, "CREATE"),
            TokenKind::Where => write!(f, "WHERE"),
            TokenKind::Return => write!(f, "RETURN"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Name(s) => write!(f, "{s}"),
            TokenKind::Key(s) => write!(f, "{s}"),
            TokenKind::String(s) => write!(f, "\"{s}\""),
            TokenKind::Integer(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub offset: usize,
}

const KEYWORDS: &[(&str, TokenKind<'static>)] = &[
    ("MATCH", TokenKind::Match),
    ("CREATE", TokenKind::Create),
    ("WHERE", TokenKind::Where),
    ("RETURN", TokenKind::Return),
    ("AND", TokenKind::And),
    ("OR", TokenKind::Or),
    ("NOT", TokenKind::Not),
];

fn identifier_run(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        many0(satisfy(|c: char| c.is_ascii_alphabetic())),
    ))(input)
}

fn identifier_or_keyword(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    let (rest, letters) = identifier_run(input)?;
    let (rest, digits) = opt(digit1)(rest)?;
    Ok((rest, (letters, digits)))
}

/// Parse a `"..."`-delimited string literal. The caller guarantees `input`
/// starts with `"`. Returns the text after the closing quote and the
/// payload with both quotes stripped.
fn string_literal(input: &str) -> Result<(&str, &str), TokenizeError> {
    let after_quote = &input[1..];
    let (rest, payload): (&str, &str) =
        recognize(many0(satisfy(|c: char| c.is_ascii_alphanumeric())))(after_quote)
            .expect("many0 over a predicate never fails");
    match rest.strip_prefix('"') {
        Some(rest) => Ok((rest, payload)),
        None => Err(TokenizeError::UnterminatedString { offset: 0 }),
    }
}

fn str_offset(original: &str, current: &str) -> usize {
    original.len() - current.len()
}

fn punctuation(input: &str) -> IResult<&str, TokenKind<'_>> {
    alt((
        // longest match first: arrows and two-char comparisons before
        // their single-char prefixes
        |i| tag("-->")(i).map(|(r, _)| (r, TokenKind::ArrowRight)),
        |i| tag("<--")(i).map(|(r, _)| (r, TokenKind::ArrowLeft)),
        |i| tag(">=")(i).map(|(r, _)| (r, TokenKind::Ge)),
        |i| tag("<=")(i).map(|(r, _)| (r, TokenKind::Le)),
        |i| tag("!=")(i).map(|(r, _)| (r, TokenKind::NotEq)),
        |i| char('(')(i).map(|(r, _)| (r, TokenKind::LParen)),
        |i| char(')')(i).map(|(r, _)| (r, TokenKind::RParen)),
        |i| char('[')(i).map(|(r, _)| (r, TokenKind::LBracket)),
        |i| char(']')(i).map(|(r, _)| (r, TokenKind::RBracket)),
        |i| char('{')(i).map(|(r, _)| (r, TokenKind::LBrace)),
        |i| char('}')(i).map(|(r, _)| (r, TokenKind::RBrace)),
        |i| char(',')(i).map(|(r, _)| (r, TokenKind::Comma)),
        |i| char(':')(i).map(|(r, _)| (r, TokenKind::Colon)),
        |i| char('.')(i).map(|(r, _)| (r, TokenKind::Dot)),
        |i| char('-')(i).map(|(r, _)| (r, TokenKind::Dash)),
        |i| char('>')(i).map(|(r, _)| (r, TokenKind::Gt)),
        |i| char('<')(i).map(|(r, _)| (r, TokenKind::Lt)),
        |i| char('=')(i).map(|(r, _)| (r, TokenKind::Eq)),
    ))(input)
}

/// Tokenize `input` in full, returning every token in document order.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, TokenizeError> {
    let mut tokens = Vec::new();
    let (mut rest, _) = multispace0::<_, nom::error::Error<&str>>(input).expect("infallible");

    while !rest.is_empty() {
        let offset = str_offset(input, rest);

        if rest.starts_with('"') {
            let (next, payload) = string_literal(rest)
                .map_err(|_| TokenizeError::UnterminatedString { offset })?;
            tokens.push(Token {
                kind: TokenKind::String(payload),
                offset,
            });
            rest = next;
        } else if let Ok((next, digits)) = digit1::<_, nom::error::Error<&str>>(rest) {
            let value: i64 = digits
                .parse()
                .expect("digit1 only yields ASCII decimal digits");
            tokens.push(Token {
                kind: TokenKind::Integer(value),
                offset,
            });
            rest = next;
        } else if rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            let (next, (letters, digits)) =
                identifier_or_keyword(rest).expect("leading char confirmed alphabetic");
            rest = next;
            if digits.is_none() {
                if let Some((_, kind)) = KEYWORDS.iter().find(|(kw, _)| *kw == letters) {
                    tokens.push(Token { kind: *kind, offset });
                    continue;
                }
            }
            let text = &input[offset..str_offset(input, rest)];
            let kind = if letters.starts_with(|c: char| c.is_ascii_uppercase()) {
                TokenKind::Name(text)
            } else {
                TokenKind::Key(text)
            };
            tokens.push(Token { kind, offset });
        } else if let Ok((next, kind)) = punctuation(rest) {
            tokens.push(Token { kind, offset });
            rest = next;
        } else {
            let ch = rest.chars().next().expect("rest is non-empty");
            return Err(TokenizeError::UnrecognizedCharacter { ch, offset });
        }

        let (next, _) = multispace0::<_, nom::error::Error<&str>>(rest).expect("infallible");
        rest = next;
    }

    Ok(tokens)
}
