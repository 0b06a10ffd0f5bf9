//! Statement grammar over the token stream.
//!
//! A document is a sequence of lines; blank lines are skipped. Each line is one statement:
//!
//! ```text
//! statement  := state_spec edge edge*
//! edge       := arrow word
//! state_spec := word | '[' word (',' word)* ']'
//! arrow      := '-->' | '--name-->'
//! ```
//!
//! The rules are engine parsers over `[TokenSpan]` and yield a [`Statement`] per line.
//! [`build_transitions`] then expands statements into transitions: a bracketed left-hand
//! side fans out into one transition per listed state, and every further edge continues
//! the chain from the previous target.
//!
//! Errors carry the byte offset of the offending token, or the end of the line when the
//! line stops short.

use crate::engine::{parse_items, select, Chain, End, OneOf, ParseOutcome, Parser, ParserExt};
use crate::{chain, one_of};

use super::tokenizer::{Token, TokenSpan};
use super::transition::Transition;

/// The item stream the statement rules read.
pub type Tokens = [TokenSpan];

/// One parsed line: the left-hand states and the edges that follow them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub sources: Vec<String>,
    pub edges: Vec<Edge>,
}

/// `--name--> target` or `--> target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub name: Option<String>,
    pub target: String,
}

impl Statement {
    /// The sources fan out into the first edge; each later edge starts at the previous
    /// target.
    pub fn transitions(&self) -> Vec<Transition> {
        let mut transitions = Vec::new();
        let mut from: &[String] = &self.sources;
        for edge in &self.edges {
            transitions.extend(from.iter().map(|state| Transition {
                from: state.clone(),
                to: edge.target.clone(),
                name: edge.name.clone(),
            }));
            from = std::slice::from_ref(&edge.target);
        }
        transitions
    }

    fn from_parts(parts: Vec<Part>) -> Self {
        let mut statement = Statement::default();
        let mut name = None;
        for part in parts {
            match part {
                Part::Sources(states) => statement.sources = states,
                Part::Arrow(arrow) => name = arrow,
                Part::Target(target) => statement.edges.push(Edge {
                    name: name.take(),
                    target,
                }),
            }
        }
        statement
    }
}

/// Pieces of a statement as the rules produce them.
enum Part {
    Sources(Vec<String>),
    Arrow(Option<String>),
    Target(String),
}

fn state() -> impl Parser<String, Tokens> + Send + Sync + 'static {
    select(|(token, _): &TokenSpan| match token {
        Token::Word(state) => Some(state.clone()),
        _ => None,
    })
}

fn symbol(expected: Token) -> impl Parser<(), Tokens> + Send + Sync + 'static {
    select(move |(token, _): &TokenSpan| (*token == expected).then_some(()))
}

fn arrow() -> impl Parser<Option<String>, Tokens> + Send + Sync + 'static {
    select(|(token, _): &TokenSpan| match token {
        Token::Arrow => Some(None),
        Token::NamedArrow(name) => Some(Some(name.clone())),
        _ => None,
    })
}

fn state_spec() -> OneOf<Part, Tokens> {
    let list = chain![
        symbol(Token::LeftBracket).drop(),
        state().separated_by(symbol(Token::Comma)),
        symbol(Token::RightBracket).drop(),
    ];
    one_of![
        state().map(|state: String| Part::Sources(vec![state])),
        list.map_all(Part::Sources),
    ]
}

/// Right-hand sides are always a single state.
fn edge() -> Chain<Part, Tokens> {
    chain![arrow().map(Part::Arrow), state().map(Part::Target)]
}

/// A whole line: one statement and nothing after it.
pub fn line(allow_chains: bool) -> Chain<Statement, Tokens> {
    let statement = if allow_chains {
        chain![state_spec(), edge(), edge().many0()]
    } else {
        chain![state_spec(), edge()]
    };
    chain![statement.map_all(Statement::from_parts), End]
}

/// Run `line` over every non-blank line of `tokens`, in order.
pub fn parse_lines(
    tokens: &Tokens,
    line: &impl Parser<Statement, Tokens>,
) -> Result<Vec<Statement>, usize> {
    let mut statements = Vec::new();
    for current in tokens
        .split(|(token, _)| *token == Token::Newline)
        .filter(|current| !current.is_empty())
    {
        match parse_items(current, line) {
            ParseOutcome::Success { values, .. } => statements.extend(values),
            ParseOutcome::Failure { rest } => return Err(byte_offset(current, rest.offset())),
        }
    }
    Ok(statements)
}

/// Expand statements into transitions, in source order.
pub fn build_transitions(statements: &[Statement]) -> Vec<Transition> {
    statements.iter().flat_map(Statement::transitions).collect()
}

fn byte_offset(tokens: &Tokens, index: usize) -> usize {
    match tokens.get(index) {
        Some((_, span)) => span.start,
        None => tokens.last().map_or(0, |(_, span)| span.end),
    }
}
