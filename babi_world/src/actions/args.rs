//! Positional arguments bound into a clause.

use serde::{Deserialize, Serialize};

use crate::{EntityId, World, WorldError};

/// One argument of an action: an entity, or a literal passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    Entity(EntityId),
    Number(f64),
    Text(String),
}

impl Arg {
    pub fn entity(id: impl Into<String>) -> Self {
        Arg::Entity(EntityId::new(id))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Arg::Text(text.into())
    }

    pub fn number(value: f64) -> Self {
        Arg::Number(value)
    }

    /// Resolve a command token: an existing entity id wins over a literal.
    pub fn resolve(world: &World, token: &str) -> Self {
        let id = EntityId::new(token);
        if world.contains(&id) {
            Arg::Entity(id)
        } else if let Ok(number) = token.parse::<f64>() {
            Arg::Number(number)
        } else {
            Arg::Text(token.to_string())
        }
    }

    pub fn as_entity(&self) -> Option<&EntityId> {
        match self {
            Arg::Entity(id) => Some(id),
            _ => None,
        }
    }

    /// Numeric view of the argument; text is accepted if it parses.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Arg::Number(n) => Some(*n),
            Arg::Text(s) => s.trim().parse::<f64>().ok(),
            Arg::Entity(_) => None,
        };
        number.filter(|n| n.is_finite())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Arg::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the literal keyword `word`.
    pub fn is_word(&self, word: &str) -> bool {
        self.as_text() == Some(word)
    }
}

impl From<EntityId> for Arg {
    fn from(id: EntityId) -> Self {
        Arg::Entity(id)
    }
}

impl From<&EntityId> for Arg {
    fn from(id: &EntityId) -> Self {
        Arg::Entity(id.clone())
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Entity(id) => write!(f, "{}", id),
            Arg::Number(n) => write!(f, "{}", n),
            Arg::Text(s) => f.write_str(s),
        }
    }
}

/// Fetch the entity argument at `position`, as `perform` needs it.
pub(crate) fn entity_at<'a>(
    args: &'a [Arg],
    position: usize,
    action: &'static str,
) -> Result<&'a EntityId, WorldError> {
    match args.get(position) {
        Some(Arg::Entity(id)) => Ok(id),
        Some(other) => Err(WorldError::InvalidArgument {
            action,
            position,
            reason: format!("'{}' is not an entity", other),
        }),
        None => Err(WorldError::MissingArgument { action, position }),
    }
}

/// Fetch the numeric argument at `position`, truncated to an integer.
pub(crate) fn integer_at(
    args: &[Arg],
    position: usize,
    action: &'static str,
) -> Result<i64, WorldError> {
    let arg = args
        .get(position)
        .ok_or(WorldError::MissingArgument { action, position })?;
    arg.as_number()
        .map(|n| n.trunc() as i64)
        .ok_or_else(|| WorldError::InvalidArgument {
            action,
            position,
            reason: format!("'{}' is not a number", arg),
        })
}
