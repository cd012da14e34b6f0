//! Errors raised by the belief store.

use babi_world::{EntityId, Relation, WorldError};
use thiserror::Error;

/// Failures of belief queries and updates.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// More than one value is believed true where one was expected. This
    /// means the exclusivity configuration or an update rule is wrong; the
    /// story being generated cannot be trusted past this point.
    #[error("'{entity}' has {count} true values for '{relation}'")]
    MultipleValues {
        entity: EntityId,
        relation: Relation,
        count: usize,
    },

    #[error("no belief table at timestep {0}")]
    UnsetTimestep(usize),

    #[error("invalid knowledge config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("rule '{rule}' failed: {reason}")]
    Rule { rule: String, reason: String },

    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
