//! Errors raised by the world and its command loader.

use thiserror::Error;

use crate::EntityId;

/// Failures while building the world or interpreting commands.
///
/// An action that is merely not valid in the current state is not an error;
/// see [`Action::is_valid`](crate::Action::is_valid).
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity id '{0}' already exists")]
    DuplicateEntity(EntityId),

    #[error("no entity with id '{0}'")]
    UnknownEntity(EntityId),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    #[error("unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("{action} expects argument {position}")]
    MissingArgument {
        action: &'static str,
        position: usize,
    },

    #[error("{action}: argument {position} {reason}")]
    InvalidArgument {
        action: &'static str,
        position: usize,
        reason: String,
    },

    #[error("empty command")]
    EmptyCommand,

    #[error("unterminated quote in command: {0}")]
    UnterminatedQuote(String),

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<WorldError>,
    },

    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
}
