//! Arrow-notation tokenizer
//!
//! At every position the alternatives are tried in this order:
//!   1. named arrow      `--name-->`
//!   2. nameless arrow   `-->`
//!   3. structural symbol `[` `]` `,` or a line break
//!   4. a run of whitespace (other than line breaks), dropped
//!   5. a run of ASCII letters (a word)
//!
//! The whole input must be consumed; a position matching none of them fails tokenization.

use crate::engine::{
    char_of, inline_whitespace, letter, literal, Chain, Char, ConcatExt, End, Many, MapConcat,
    ParserExt, WithSpan,
};
use crate::{chain, one_of};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    NamedArrow(String),
    Arrow,
    LeftBracket,
    RightBracket,
    Comma,
    Newline,
    Word(String),
}

/// A token with the byte range it was read from.
pub type TokenSpan = WithSpan<Token>;

/// A run of letters as one string.
pub fn word() -> MapConcat<Many<Char>> {
    letter().many().concat()
}

/// The full-input tokenizer.
pub fn tokenizer() -> Chain<TokenSpan> {
    let named_arrow =
        chain![literal("--").drop(), word(), literal("-->").drop()].map(Token::NamedArrow);
    let nameless_arrow = literal("-->").map(|_| Token::Arrow);
    let symbol = one_of![
        char_of('[').map(|_| Token::LeftBracket),
        char_of(']').map(|_| Token::RightBracket),
        char_of(',').map(|_| Token::Comma),
        char_of('\n').map(|_| Token::Newline),
    ];
    let space = inline_whitespace().many().drop();
    let word = word().map(Token::Word);

    let token = one_of![named_arrow, nameless_arrow, symbol, space, word].spanned();
    chain![token.many0(), End]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse;

    fn kinds(source: &str) -> Option<Vec<Token>> {
        parse(source, &tokenizer())
            .into_values()
            .map(|tokens| tokens.into_iter().map(|(token, _)| token).collect())
    }

    #[test]
    fn test_named_arrow_before_nameless() {
        assert_eq!(
            kinds("A --go--> B"),
            Some(vec![
                Token::Word("A".into()),
                Token::NamedArrow("go".into()),
                Token::Word("B".into()),
            ])
        );
        assert_eq!(
            kinds("A-->B"),
            Some(vec![
                Token::Word("A".into()),
                Token::Arrow,
                Token::Word("B".into()),
            ])
        );
    }

    #[test]
    fn test_bracket_list_tokens() {
        assert_eq!(
            kinds("[A, B]\n"),
            Some(vec![
                Token::LeftBracket,
                Token::Word("A".into()),
                Token::Comma,
                Token::Word("B".into()),
                Token::RightBracket,
                Token::Newline,
            ])
        );
    }

    #[test]
    fn test_whitespace_keeps_line_breaks() {
        assert_eq!(
            kinds("A \t\r\n B"),
            Some(vec![
                Token::Word("A".into()),
                Token::Newline,
                Token::Word("B".into()),
            ])
        );
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let tokens = parse("  Idle --> Busy", &tokenizer())
            .into_values()
            .unwrap();
        assert_eq!(tokens[0], (Token::Word("Idle".into()), 2..6));
        assert_eq!(tokens[1], (Token::Arrow, 7..10));
        assert_eq!(tokens[2], (Token::Word("Busy".into()), 11..15));
    }

    #[test]
    fn test_unknown_character_fails() {
        let outcome = parse("A --> B2", &tokenizer());
        assert!(outcome.is_failure());
        assert_eq!(outcome.rest().as_str(), "2");
        assert_eq!(kinds("A -> B"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kinds(""), Some(vec![]));
    }
}
