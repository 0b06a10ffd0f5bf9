//! Transition records produced by the arrow grammar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One edge of a state-transition table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            name: None,
        }
    }

    pub fn named(from: impl Into<String>, to: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for Transition {
    /// Arrow notation: `A --> B` or `A --name--> B`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} --{}--> {}", self.from, name, self.to),
            None => write!(f, "{} --> {}", self.from, self.to),
        }
    }
}

/// Transitions in source order, duplicates kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new(transitions: Vec<Transition>) -> Self {
        Self { transitions }
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn into_transitions(self) -> Vec<Transition> {
        self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Distinct state names in order of first appearance.
    pub fn states(&self) -> Vec<&str> {
        let mut states: Vec<&str> = Vec::new();
        for transition in &self.transitions {
            for state in [transition.from.as_str(), transition.to.as_str()] {
                if !states.contains(&state) {
                    states.push(state);
                }
            }
        }
        states
    }

    /// Transitions leaving `state`.
    pub fn outgoing<'t>(&'t self, state: &'t str) -> impl Iterator<Item = &'t Transition> + 't {
        self.transitions.iter().filter(move |t| t.from == state)
    }
}

impl From<Vec<Transition>> for TransitionTable {
    fn from(transitions: Vec<Transition>) -> Self {
        Self::new(transitions)
    }
}

impl fmt::Display for TransitionTable {
    /// One transition per line, in arrow notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in &self.transitions {
            writeln!(f, "{transition}")?;
        }
        Ok(())
    }
}
