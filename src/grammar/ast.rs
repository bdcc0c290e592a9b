use std::fmt;

use serde::{Deserialize, Serialize};

/// `identifier = 'terminal'`. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    identifier: String,
    terminal: char,
}

impl Rule {
    pub fn new(identifier: impl Into<String>, terminal: char) -> Self {
        Self {
            identifier: identifier.into(),
            terminal,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn terminal(&self) -> char {
        self.terminal
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.terminal == '\'' { '"' } else { '\'' };
        write!(
            f,
            "{} = {}{}{}",
            self.identifier, quote, self.terminal, quote
        )
    }
}

/// Rules in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule bound to `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.identifier == identifier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl IntoIterator for Grammar {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a Grammar {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
