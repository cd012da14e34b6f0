//! Belief tables - the complete per-entity belief state at one timestep.

use babi_world::{EntityId, Relation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EntityBeliefs, EntityBeliefsMut, EntityProperties, Exclusivity, Value};
use crate::KnowledgeError;

/// Snapshot of everything believed at one timestep.
///
/// `Clone` is a deep copy: a cloned table shares no state with its source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeliefTable {
    exclusive: Exclusivity,
    entities: BTreeMap<EntityId, EntityProperties>,
}

impl BeliefTable {
    /// Create an empty table under the given exclusivity configuration.
    pub fn new(exclusive: Exclusivity) -> Self {
        Self {
            exclusive,
            entities: BTreeMap::new(),
        }
    }

    pub fn exclusivity(&self) -> &Exclusivity {
        &self.exclusive
    }

    pub(crate) fn set_exclusivity(&mut self, exclusive: Exclusivity) {
        self.exclusive = exclusive;
    }

    /// Beliefs about `entity`; an entity never mentioned reads as empty.
    pub fn entity<'a>(&'a self, entity: &'a EntityId) -> EntityBeliefs<'a> {
        let properties = self
            .entities
            .get(entity)
            .unwrap_or(EntityProperties::empty());
        EntityBeliefs::new(entity, properties, &self.exclusive)
    }

    /// Mutable beliefs about `entity`, creating its entry on first use.
    pub fn entity_mut<'a>(&'a mut self, entity: &'a EntityId) -> EntityBeliefsMut<'a> {
        let properties = self.entities.entry(entity.clone()).or_default();
        EntityBeliefsMut::new(entity, properties, &self.exclusive)
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    /// Entities with at least one entry.
    pub fn entities(&self) -> impl Iterator<Item = &EntityId> {
        self.entities.keys()
    }

    /// Entities whose single true value of `relation` is known, and equals
    /// `value` when one is given.
    pub fn find(&self, relation: Relation, value: Option<&Value>) -> Result<Vec<&EntityId>, KnowledgeError> {
        let mut matches = Vec::new();
        for id in self.entities.keys() {
            if let Some((found, _)) = self.entity(id).get_value(relation)? {
                if value.map_or(true, |v| v == found) {
                    matches.push(id);
                }
            }
        }
        Ok(matches)
    }

    /// Dump the table as pretty JSON.
    pub fn to_json(&self) -> Result<String, KnowledgeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
