//! Fact definitions - one believed (or disbelieved) value and its justification.

use babi_world::{Arg, ClauseId, EntityId, RelationValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The clauses that justify a fact.
pub type Support = BTreeSet<ClauseId>;

/// Build a support set from clause ids.
pub fn support<I: IntoIterator<Item = ClauseId>>(ids: I) -> Support {
    ids.into_iter().collect()
}

/// A value a property can be believed to hold.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    Entity(EntityId),
    Int(i64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn entity(id: impl Into<String>) -> Self {
        Value::Entity(EntityId::new(id))
    }

    pub fn as_entity(&self) -> Option<&EntityId> {
        match self {
            Value::Entity(id) => Some(id),
            _ => None,
        }
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::Entity(id)
    }
}

impl From<&EntityId> for Value {
    fn from(id: &EntityId) -> Self {
        Value::Entity(id.clone())
    }
}

impl From<RelationValue> for Value {
    fn from(value: RelationValue) -> Self {
        match value {
            RelationValue::Flag(b) => Value::Bool(b),
            RelationValue::Number(n) => Value::Int(n),
            RelationValue::Entity(id) => Value::Entity(id),
        }
    }
}

impl From<&Arg> for Value {
    fn from(arg: &Arg) -> Self {
        match arg {
            Arg::Entity(id) => Value::Entity(id.clone()),
            Arg::Number(n) => Value::Int(n.trunc() as i64),
            Arg::Text(s) => Value::Text(s.clone()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Entity(id) => write!(f, "{}", id),
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of a property's fact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub value: Value,
    /// Whether the value is believed to hold (`true`) or not to hold (`false`).
    pub truth_value: bool,
    pub support: Support,
}

impl Fact {
    pub fn new(value: Value, truth_value: bool, support: Support) -> Self {
        Self {
            value,
            truth_value,
            support,
        }
    }

    /// Add clauses to this fact's justification.
    pub fn with_support(mut self, extra: &Support) -> Self {
        self.support.extend(extra.iter().copied());
        self
    }
}
