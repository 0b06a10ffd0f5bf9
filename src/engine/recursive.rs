//! Recursive rules
//!
//! Grammars such as JSON refer to themselves: a value can be an array, whose elements are
//! values. A [`Recursive`] rule is declared first, referenced through clones while its body
//! is built, and defined afterwards:
//!
//! ```text
//! let value = Recursive::declare();
//! let array = chain![open, value.clone().separated_by0(comma), close];
//! value.define(one_of![number, array]);
//! ```
//!
//! The declared rule owns the definition. Clones are non-owning handles, so a rule whose body
//! mentions itself does not keep itself alive. Applying a rule that is not defined yet, or
//! whose owner has been dropped, fails at the entry input.

use std::fmt;
use std::sync::{Arc, Weak};

use once_cell::sync::OnceCell;

use super::input::{Input, Stream};
use super::outcome::ParseOutcome;
use super::parser::{BoxedParser, Parser};

struct Rule<T, I: ?Sized + Stream> {
    body: OnceCell<BoxedParser<T, I>>,
    depth_limit: Option<usize>,
}

impl<T, I: ?Sized + Stream> Rule<T, I> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        let Some(body) = self.body.get() else {
            return ParseOutcome::failure(input);
        };
        if self.depth_limit.is_some_and(|limit| input.depth() >= limit) {
            return ParseOutcome::failure(input);
        }
        let depth = input.depth();
        body.apply(input.descend())
            .map_rest(|rest| rest.with_depth(depth))
    }
}

enum Handle<T, I: ?Sized + Stream> {
    Owned(Arc<Rule<T, I>>),
    Unowned(Weak<Rule<T, I>>),
}

/// A rule that can be referenced before it is defined.
pub struct Recursive<T, I: ?Sized + Stream = str> {
    handle: Handle<T, I>,
}

impl<T, I: ?Sized + Stream> Recursive<T, I> {
    /// Declare an undefined rule.
    pub fn declare() -> Self {
        Self::owned(None)
    }

    /// Declare an undefined rule that refuses to nest deeper than `limit` levels.
    ///
    /// The limit counts how many applications of depth-limited rules are active on the
    /// current path; entering one more at the limit fails.
    pub fn declare_with_depth_limit(limit: usize) -> Self {
        Self::owned(Some(limit))
    }

    fn owned(depth_limit: Option<usize>) -> Self {
        Self {
            handle: Handle::Owned(Arc::new(Rule {
                body: OnceCell::new(),
                depth_limit,
            })),
        }
    }

    /// Resolve the rule. A rule can be defined once; a second body is handed back.
    pub fn define<P>(&self, body: P) -> Result<(), BoxedParser<T, I>>
    where
        P: Parser<T, I> + Send + Sync + 'static,
    {
        let body: BoxedParser<T, I> = Box::new(body);
        match self.rule() {
            Some(rule) => rule.body.set(body),
            None => Err(body),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.rule().is_some_and(|rule| rule.body.get().is_some())
    }

    fn rule(&self) -> Option<Arc<Rule<T, I>>> {
        match &self.handle {
            Handle::Owned(rule) => Some(Arc::clone(rule)),
            Handle::Unowned(rule) => rule.upgrade(),
        }
    }
}

impl<T, I: ?Sized + Stream> Clone for Recursive<T, I> {
    /// A non-owning handle to the same rule.
    fn clone(&self) -> Self {
        let weak = match &self.handle {
            Handle::Owned(rule) => Arc::downgrade(rule),
            Handle::Unowned(rule) => Weak::clone(rule),
        };
        Self {
            handle: Handle::Unowned(weak),
        }
    }
}

impl<T, I: ?Sized + Stream> Parser<T, I> for Recursive<T, I> {
    fn apply<'a>(&self, input: Input<'a, I>) -> ParseOutcome<'a, T, I> {
        match &self.handle {
            Handle::Owned(rule) => rule.apply(input),
            Handle::Unowned(rule) => match rule.upgrade() {
                Some(rule) => rule.apply(input),
                None => ParseOutcome::failure(input),
            },
        }
    }
}

impl<T, I: ?Sized + Stream> fmt::Debug for Recursive<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.handle {
            Handle::Owned(_) => "owned",
            Handle::Unowned(_) => "unowned",
        };
        f.debug_struct("Recursive")
            .field("handle", &kind)
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// Build a self-referencing rule in one step.
///
/// `f` receives a handle to the rule being defined and returns its body.
pub fn recursive<T, I, P, F>(f: F) -> Recursive<T, I>
where
    I: ?Sized + Stream,
    P: Parser<T, I> + Send + Sync + 'static,
    F: FnOnce(Recursive<T, I>) -> P,
{
    recursive_rule(Recursive::declare(), f)
}

/// [`recursive`] with a nesting limit.
pub fn recursive_with_depth_limit<T, I, P, F>(limit: usize, f: F) -> Recursive<T, I>
where
    I: ?Sized + Stream,
    P: Parser<T, I> + Send + Sync + 'static,
    F: FnOnce(Recursive<T, I>) -> P,
{
    recursive_rule(Recursive::declare_with_depth_limit(limit), f)
}

fn recursive_rule<T, I, P, F>(rule: Recursive<T, I>, f: F) -> Recursive<T, I>
where
    I: ?Sized + Stream,
    P: Parser<T, I> + Send + Sync + 'static,
    F: FnOnce(Recursive<T, I>) -> P,
{
    let body = f(rule.clone());
    // the cell is fresh, so this define cannot be rejected
    let _ = rule.define(body);
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parser::{parse, ParserExt};
    use crate::engine::primitives::{char_of, letter};

    /// nested := '(' nested? ')' | letter
    fn nested(limit: Option<usize>) -> Recursive<String> {
        let build = |rule: Recursive<String>| {
            crate::one_of![
                crate::chain![char_of('(').drop(), rule.opt(), char_of(')').drop()],
                letter(),
            ]
        };
        match limit {
            Some(limit) => recursive_with_depth_limit(limit, build),
            None => recursive(build),
        }
    }

    #[test]
    fn test_recursive_rule() {
        let rule = nested(None);
        let outcome = parse("((a))!", &rule);
        assert_eq!(outcome.values(), Some(&["a".to_string()][..]));
        assert_eq!(outcome.rest().as_str(), "!");
    }

    #[test]
    fn test_depth_limit() {
        let rule = nested(Some(3));
        assert!(parse("((a))", &rule).is_success());
        let too_deep = parse("(((a)))", &rule);
        assert!(too_deep.is_failure());
    }

    #[test]
    fn test_remainder_depth_is_restored() {
        let rule = nested(Some(8));
        let outcome = parse("(a)", &rule);
        assert_eq!(outcome.rest().depth(), 0);
    }

    #[test]
    fn test_undefined_rule_fails() {
        let rule: Recursive<String> = Recursive::declare();
        assert!(!rule.is_defined());
        let outcome = parse("a", &rule);
        assert!(outcome.is_failure());
        assert_eq!(outcome.rest().as_str(), "a");
    }

    #[test]
    fn test_define_twice_is_rejected() {
        let rule: Recursive<String> = Recursive::declare();
        assert!(rule.define(letter()).is_ok());
        assert!(rule.define(letter()).is_err());
    }

    #[test]
    fn test_handle_outliving_owner_fails() {
        let handle = {
            let rule = nested(None);
            rule.clone()
        };
        assert!(parse("a", &handle).is_failure());
    }

    #[test]
    fn test_mutual_recursion() {
        // a := 'a' b? ; b := 'b' a?
        let a: Recursive<String> = Recursive::declare();
        let b: Recursive<String> = Recursive::declare();
        assert!(a.define(crate::chain![char_of('a'), b.clone().opt()]).is_ok());
        assert!(b.define(crate::chain![char_of('b'), a.clone().opt()]).is_ok());

        let outcome = parse("abab!", &a);
        assert_eq!(outcome.rest().as_str(), "!");
        assert_eq!(outcome.into_values().unwrap(), ["a", "b", "a", "b"]);
    }
}
