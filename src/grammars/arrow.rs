//! Arrow-notation state machine grammar
//!
//! One transition statement per line:
//!
//! ```text
//! OnChecks --checksDone--> Signatures
//! Signatures --> OnIssue
//! [A, B] --> C
//! ```
//!
//! Parsing runs in two layers. The `tokenizer` layer is a combinator grammar over characters
//! that yields spanned tokens. The `statements` layer is a combinator grammar over those
//! tokens that yields one [`Statement`] per line, which is then expanded into [`Transition`]
//! records. [`ArrowGrammar`] wraps both as a single [`Parser`] so it can be run with
//! [`crate::engine::parse`] like any other grammar.

pub mod statements;
pub mod tokenizer;
pub mod transition;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::diagnostics::ParseError;
use crate::engine::{parse, Chain, Input, ParseOutcome, Parser};
use crate::settings::{ArrowConfig, ArrowparseConfig};

pub use self::statements::{Edge, Statement};
pub use self::tokenizer::Token;
pub use self::transition::{Transition, TransitionTable};

use self::statements::{build_transitions, line, parse_lines, Tokens};
use self::tokenizer::{tokenizer, TokenSpan};

static DEFAULT_GRAMMAR: Lazy<ArrowGrammar> = Lazy::new(ArrowGrammar::default);

/// The complete arrow-notation grammar: a whole document in, transitions out.
pub struct ArrowGrammar {
    tokenizer: Chain<TokenSpan>,
    line: Chain<Statement, Tokens>,
}

impl ArrowGrammar {
    pub fn new(config: &ArrowConfig) -> Self {
        trace!(allow_chains = config.allow_chains, "building arrow grammar");
        Self {
            tokenizer: tokenizer(),
            line: line(config.allow_chains),
        }
    }

    /// The shared grammar built from default settings.
    pub fn shared() -> &'static ArrowGrammar {
        &DEFAULT_GRAMMAR
    }

    /// Run only the tokenizer layer.
    pub fn tokenize<'a>(&self, source: &'a str) -> ParseOutcome<'a, TokenSpan> {
        parse(source, &self.tokenizer)
    }

    /// Run both layers, stopping before expansion.
    ///
    /// A failure is the input positioned at the character or token that could not be
    /// matched.
    #[allow(clippy::type_complexity)]
    pub fn statements<'a>(
        &self,
        input: Input<'a>,
    ) -> Result<(Vec<Statement>, Input<'a>), Input<'a>> {
        let (tokens, rest) = self.tokenizer.apply(input).into_result()?;
        let statements = parse_lines(&tokens, &self.line)
            .map_err(|offset| input.at(offset))?;
        Ok((statements, rest))
    }
}

impl Default for ArrowGrammar {
    fn default() -> Self {
        Self::new(&ArrowConfig::default())
    }
}

impl Parser<Transition> for ArrowGrammar {
    fn apply<'a>(&self, input: Input<'a>) -> ParseOutcome<'a, Transition> {
        match self.statements(input) {
            Ok((statements, rest)) => ParseOutcome::success(build_transitions(&statements), rest),
            Err(rest) => ParseOutcome::failure(rest),
        }
    }
}

/// Parse a whole document with default settings.
pub fn parse_transitions(source: &str) -> Result<Vec<Transition>, ParseError> {
    let snippet_width = ArrowparseConfig::default().diagnostics.snippet_width;
    run(ArrowGrammar::shared(), source, snippet_width)
}

/// Parse a whole document with explicit settings.
pub fn parse_transitions_with(
    source: &str,
    config: &ArrowparseConfig,
) -> Result<Vec<Transition>, ParseError> {
    run(
        &ArrowGrammar::new(&config.arrow),
        source,
        config.diagnostics.snippet_width,
    )
}

/// Parse a whole document into its statements without expanding them.
pub fn parse_statements(source: &str) -> Result<Vec<Statement>, ParseError> {
    let snippet_width = ArrowparseConfig::default().diagnostics.snippet_width;
    debug!(grammar = "arrow", input_len = source.len(), "parsing statements");
    ArrowGrammar::shared()
        .statements(Input::new(source))
        .map(|(statements, _)| statements)
        .map_err(|rest| ParseError::no_match("arrow", rest, snippet_width))
}

/// Parse a whole document into a [`TransitionTable`].
pub fn parse_table(source: &str) -> Result<TransitionTable, ParseError> {
    parse_transitions(source).map(TransitionTable::new)
}

fn run(
    grammar: &ArrowGrammar,
    source: &str,
    snippet_width: usize,
) -> Result<Vec<Transition>, ParseError> {
    debug!(grammar = "arrow", input_len = source.len(), "parsing transitions");
    match parse(source, grammar) {
        ParseOutcome::Success { values, .. } => {
            debug!(grammar = "arrow", transitions = values.len(), "parsed");
            Ok(values)
        }
        ParseOutcome::Failure { rest } => {
            debug!(grammar = "arrow", offset = rest.offset(), "no match");
            Err(ParseError::no_match("arrow", rest, snippet_width))
        }
    }
}
