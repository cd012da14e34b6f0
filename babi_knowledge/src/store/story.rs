//! What happened at each timestep.

use babi_world::Clause;
use std::collections::BTreeMap;

use crate::Rule;

/// Timestep -> event recorded there. Timesteps start at 1.
pub type Story = BTreeMap<usize, StoryEntry>;

/// One recorded event.
#[derive(Debug, Clone)]
pub enum StoryEntry {
    Clause(Clause),
    /// A rule was registered; only its name is kept in the story.
    Rule { name: String },
}

impl StoryEntry {
    pub fn as_clause(&self) -> Option<&Clause> {
        match self {
            StoryEntry::Clause(clause) => Some(clause),
            StoryEntry::Rule { .. } => None,
        }
    }
}

impl std::fmt::Display for StoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoryEntry::Clause(clause) => write!(f, "{}", clause),
            StoryEntry::Rule { name } => write!(f, "rule {}", name),
        }
    }
}

/// Input to [`Knowledge::update`](crate::Knowledge::update).
#[derive(Debug)]
pub enum Event {
    Clause(Clause),
    Rule(Box<dyn Rule>),
}

impl Event {
    pub fn rule(rule: impl Rule + 'static) -> Self {
        Event::Rule(Box::new(rule))
    }
}

impl From<Clause> for Event {
    fn from(clause: Clause) -> Self {
        Event::Clause(clause)
    }
}

impl From<Box<dyn Rule>> for Event {
    fn from(rule: Box<dyn Rule>) -> Self {
        Event::Rule(rule)
    }
}
