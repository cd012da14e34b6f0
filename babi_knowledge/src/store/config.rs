//! Store configuration.

use babi_world::Relation;
use serde::{Deserialize, Serialize};

use crate::{Exclusivity, KnowledgeError};

/// Which relations hold at most one true value per entity.
///
/// ```toml
/// exclusive = ["is_in"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub exclusive: Vec<Relation>,
}

impl KnowledgeConfig {
    /// Location is exclusive: nothing is in two places at once.
    pub fn standard() -> Self {
        Self {
            exclusive: vec![Relation::IsIn],
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, KnowledgeError> {
        Ok(toml::from_str(source)?)
    }

    pub fn exclusivity(&self) -> Exclusivity {
        self.exclusive.iter().copied().collect()
    }
}
