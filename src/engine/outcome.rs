//! Parse results
//!
//! Every parser returns a [`ParseOutcome`]: either a list of produced values plus the
//! unconsumed remainder, or a failure carrying only the remainder where matching stopped.
//! There is no error message and no partial success.
//!
//! Two joining rules are shared by the combinators:
//! - [`ParseOutcome::join_if_both`]: both steps must succeed (sequences).
//! - [`ParseOutcome::join_if_first`]: the first step must succeed, the second only
//!   extends it (greedy repetition).

use super::input::{Input, Stream};

#[derive(Debug, PartialEq)]
pub enum ParseOutcome<'a, T, I: ?Sized + Stream = str> {
    /// A prefix was consumed, producing `values`; `rest` is what is left.
    Success { values: Vec<T>, rest: Input<'a, I> },
    /// No match. `rest` is the input at the point matching stopped.
    Failure { rest: Input<'a, I> },
}

impl<'a, T, I: ?Sized + Stream> ParseOutcome<'a, T, I> {
    pub fn success(values: Vec<T>, rest: Input<'a, I>) -> Self {
        ParseOutcome::Success { values, rest }
    }

    /// A success producing nothing and consuming nothing.
    pub fn empty(rest: Input<'a, I>) -> Self {
        ParseOutcome::Success {
            values: Vec::new(),
            rest,
        }
    }

    pub fn failure(rest: Input<'a, I>) -> Self {
        ParseOutcome::Failure { rest }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn rest(&self) -> Input<'a, I> {
        match self {
            ParseOutcome::Success { rest, .. } | ParseOutcome::Failure { rest } => *rest,
        }
    }

    pub fn values(&self) -> Option<&[T]> {
        match self {
            ParseOutcome::Success { values, .. } => Some(values),
            ParseOutcome::Failure { .. } => None,
        }
    }

    pub fn into_values(self) -> Option<Vec<T>> {
        match self {
            ParseOutcome::Success { values, .. } => Some(values),
            ParseOutcome::Failure { .. } => None,
        }
    }

    /// Convert into a `Result`, keeping the remainder on both sides.
    #[allow(clippy::type_complexity)]
    pub fn into_result(self) -> Result<(Vec<T>, Input<'a, I>), Input<'a, I>> {
        match self {
            ParseOutcome::Success { values, rest } => Ok((values, rest)),
            ParseOutcome::Failure { rest } => Err(rest),
        }
    }

    /// Rewrite the whole value list of a success.
    pub fn map_values<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> ParseOutcome<'a, U, I> {
        match self {
            ParseOutcome::Success { values, rest } => ParseOutcome::Success {
                values: f(values),
                rest,
            },
            ParseOutcome::Failure { rest } => ParseOutcome::Failure { rest },
        }
    }

    /// Rewrite the remainder, whatever the outcome.
    pub(crate) fn map_rest(self, f: impl FnOnce(Input<'a, I>) -> Input<'a, I>) -> Self {
        match self {
            ParseOutcome::Success { values, rest } => ParseOutcome::Success {
                values,
                rest: f(rest),
            },
            ParseOutcome::Failure { rest } => ParseOutcome::Failure { rest: f(rest) },
        }
    }

    /// Sequence two steps where both must match.
    ///
    /// `next` runs on this outcome's remainder. Both succeeding concatenates the value
    /// lists and keeps the second remainder. Any failure fails the pair with the remainder
    /// where the failing step started (as reported by that step).
    pub fn join_if_both(self, next: impl FnOnce(Input<'a, I>) -> Self) -> Self {
        match self {
            ParseOutcome::Success { mut values, rest } => match next(rest) {
                ParseOutcome::Success { values: more, rest } => {
                    values.extend(more);
                    ParseOutcome::Success { values, rest }
                }
                ParseOutcome::Failure { rest } => ParseOutcome::Failure { rest },
            },
            failure => failure,
        }
    }

    /// Sequence two steps where only the first must match.
    ///
    /// A failing first step is returned unchanged and `next` never runs. A failing second
    /// step is ignored: the first step's values and remainder win.
    pub fn join_if_first(self, next: impl FnOnce(Input<'a, I>) -> Self) -> Self {
        match self {
            ParseOutcome::Success { mut values, rest } => match next(rest) {
                ParseOutcome::Success {
                    values: more,
                    rest: extended,
                } => {
                    values.extend(more);
                    ParseOutcome::Success {
                        values,
                        rest: extended,
                    }
                }
                ParseOutcome::Failure { .. } => ParseOutcome::Success { values, rest },
            },
            failure => failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after<'a>(input: Input<'a>, prefix: &str) -> Input<'a> {
        input.strip_prefix(prefix).unwrap()
    }

    #[test]
    fn test_join_if_both_concatenates() {
        let input = Input::new("abc");
        let a = ParseOutcome::success(vec!["a"], after(input, "a"));
        let joined = a.join_if_both(|rest| ParseOutcome::success(vec!["b"], after(rest, "b")));
        assert_eq!(joined.values(), Some(&["a", "b"][..]));
        assert_eq!(joined.rest().as_str(), "c");
    }

    #[test]
    fn test_join_if_both_reports_failing_step_position() {
        let input = Input::new("abc");
        let a = ParseOutcome::success(vec!["a"], after(input, "a"));
        let joined: ParseOutcome<&str> = a.join_if_both(ParseOutcome::failure);
        assert!(joined.is_failure());
        assert_eq!(joined.rest().as_str(), "bc");
    }

    #[test]
    fn test_join_if_both_skips_second_after_failure() {
        let input = Input::new("abc");
        let mut ran = false;
        let joined = ParseOutcome::<&str>::failure(input).join_if_both(|rest| {
            ran = true;
            ParseOutcome::empty(rest)
        });
        assert!(!ran);
        assert_eq!(joined, ParseOutcome::failure(input));
    }

    #[test]
    fn test_join_if_first_keeps_shorter_match() {
        let input = Input::new("abc");
        let a = ParseOutcome::success(vec!["a"], after(input, "a"));
        let joined: ParseOutcome<&str> =
            a.join_if_first(|rest| ParseOutcome::failure(after(rest, "b")));
        assert_eq!(joined.values(), Some(&["a"][..]));
        assert_eq!(joined.rest().as_str(), "bc");
    }

    #[test]
    fn test_join_if_first_propagates_first_failure() {
        let failed = ParseOutcome::<&str>::failure(Input::new("abc"));
        let joined = failed.join_if_first(|rest| ParseOutcome::success(vec!["x"], rest));
        assert!(joined.is_failure());
    }

    #[test]
    fn test_into_result() {
        let input = Input::new("x");
        let matched = ParseOutcome::success(vec![1], input);
        assert_eq!(matched.into_result(), Ok((vec![1], input)));
        assert_eq!(ParseOutcome::<i32>::failure(input).into_result(), Err(input));
    }

    #[test]
    fn test_item_stream_outcome() {
        let items = [1, 2];
        let start = Input::new(&items[..]);
        let outcome: ParseOutcome<i32, [i32]> = ParseOutcome::success(vec![1], start.at(1));
        let joined = outcome.join_if_both(ParseOutcome::failure);
        assert_eq!(joined.rest().offset(), 1);
        assert_eq!(joined.rest().as_slice(), &[2]);
    }
}
