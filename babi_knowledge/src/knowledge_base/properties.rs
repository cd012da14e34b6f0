//! Per-entity belief state and the truth-maintenance operations over it.

use babi_world::{EntityId, Relation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Fact, Support, Value};
use crate::KnowledgeError;

static NO_PROPERTIES: EntityProperties = EntityProperties {
    values: BTreeMap::new(),
};

/// Relations for which at most one value may be true per entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusivity(BTreeSet<Relation>);

impl Exclusivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exclusive(&self, relation: Relation) -> bool {
        self.0.contains(&relation)
    }

    pub fn set(&mut self, relation: Relation, exclusive: bool) {
        if exclusive {
            self.0.insert(relation);
        } else {
            self.0.remove(&relation);
        }
    }

    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Relation> for Exclusivity {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything believed about one entity: relation -> ordered fact list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityProperties {
    values: BTreeMap<Relation, Vec<Fact>>,
}

impl EntityProperties {
    /// Shared empty instance for entities nothing is known about.
    pub fn empty() -> &'static EntityProperties {
        &NO_PROPERTIES
    }

    /// The raw fact list of a relation, in insertion order.
    pub fn facts(&self, relation: Relation) -> &[Fact] {
        self.values.get(&relation).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.values.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Read-only view of one entity's beliefs under an exclusivity configuration.
#[derive(Debug, Clone, Copy)]
pub struct EntityBeliefs<'a> {
    entity: &'a EntityId,
    properties: &'a EntityProperties,
    exclusive: &'a Exclusivity,
}

impl<'a> EntityBeliefs<'a> {
    pub fn new(
        entity: &'a EntityId,
        properties: &'a EntityProperties,
        exclusive: &'a Exclusivity,
    ) -> Self {
        Self {
            entity,
            properties,
            exclusive,
        }
    }

    pub fn entity(&self) -> &'a EntityId {
        self.entity
    }

    pub fn facts(&self, relation: Relation) -> &'a [Fact] {
        self.properties.facts(relation)
    }

    /// Support of the first fact asserting `value`, if any.
    pub fn true_support(&self, relation: Relation, value: &Value) -> Option<&'a Support> {
        self.facts(relation)
            .iter()
            .find(|f| f.truth_value && &f.value == value)
            .map(|f| &f.support)
    }

    /// Support for `value` being false: either an explicit denial, or (for an
    /// exclusive relation) some other value believed true. The last matching
    /// fact wins.
    pub fn false_support(&self, relation: Relation, value: &Value) -> Option<&'a Support> {
        let exclusive = self.exclusive.is_exclusive(relation);
        self.facts(relation)
            .iter()
            .filter(|f| {
                if &f.value == value {
                    !f.truth_value
                } else {
                    exclusive && f.truth_value
                }
            })
            .last()
            .map(|f| &f.support)
    }

    pub fn is_true(&self, relation: Relation, value: &Value) -> bool {
        self.true_support(relation, value).is_some()
    }

    pub fn is_false(&self, relation: Relation, value: &Value) -> bool {
        self.false_support(relation, value).is_some()
    }

    /// `Some(true)`, `Some(false)` or unknown, with the support of both checks.
    pub fn get_truth_value(&self, relation: Relation, value: &Value) -> (Option<bool>, Support) {
        let is_true = self.true_support(relation, value);
        let is_false = self.false_support(relation, value);

        let support = is_true
            .into_iter()
            .chain(is_false)
            .flat_map(|s| s.iter().copied())
            .collect();
        let truth = match (is_true, is_false) {
            (Some(_), _) => Some(true),
            (None, Some(_)) => Some(false),
            (None, None) => None,
        };
        (truth, support)
    }

    /// Every value currently believed true, with its support.
    pub fn get_values(&self, relation: Relation) -> Vec<(&'a Value, &'a Support)> {
        self.facts(relation)
            .iter()
            .filter(|f| self.is_true(relation, &f.value))
            .map(|f| (&f.value, &f.support))
            .collect()
    }

    /// Every value currently believed false, with its support.
    pub fn get_non_values(&self, relation: Relation) -> Vec<(&'a Value, &'a Support)> {
        self.facts(relation)
            .iter()
            .filter(|f| self.is_false(relation, &f.value))
            .map(|f| (&f.value, &f.support))
            .collect()
    }

    /// The single value believed true, if any.
    ///
    /// More than one true value is an invariant violation and is reported as
    /// [`KnowledgeError::MultipleValues`]; callers must not recover from it.
    pub fn get_value(&self, relation: Relation) -> Result<Option<(&'a Value, &'a Support)>, KnowledgeError> {
        let mut values = self.get_values(relation);
        if values.len() > 1 {
            return Err(KnowledgeError::MultipleValues {
                entity: self.entity.clone(),
                relation,
                count: values.len(),
            });
        }
        Ok(values.pop())
    }
}

/// Mutable view of one entity's beliefs.
#[derive(Debug)]
pub struct EntityBeliefsMut<'a> {
    entity: &'a EntityId,
    properties: &'a mut EntityProperties,
    exclusive: &'a Exclusivity,
}

impl<'a> EntityBeliefsMut<'a> {
    pub fn new(
        entity: &'a EntityId,
        properties: &'a mut EntityProperties,
        exclusive: &'a Exclusivity,
    ) -> Self {
        Self {
            entity,
            properties,
            exclusive,
        }
    }

    /// Query through this view.
    pub fn beliefs(&self) -> EntityBeliefs<'_> {
        EntityBeliefs::new(self.entity, self.properties, self.exclusive)
    }

    /// Replace the whole fact list with a single fact.
    pub fn set(&mut self, relation: Relation, value: Value, truth_value: bool, support: Support) {
        self.properties
            .values
            .insert(relation, vec![Fact::new(value, truth_value, support)]);
    }

    /// Append a fact, first dropping facts about the same value and, for an
    /// exclusive relation receiving a true fact, every other true fact.
    pub fn add(&mut self, relation: Relation, value: Value, truth_value: bool, support: Support) {
        let evict_true = truth_value && self.exclusive.is_exclusive(relation);
        let facts = self.properties.values.entry(relation).or_default();
        facts.retain(|f| !(f.value == value || (evict_true && f.truth_value)));
        facts.push(Fact::new(value, truth_value, support));
    }

    /// Fold another fact list in, then keep only the first true fact if
    /// there is one.
    pub fn merge(&mut self, relation: Relation, facts: &[Fact], support: &Support) {
        self.rawadd(relation, facts, Some(support));
        let list = self.properties.values.entry(relation).or_default();
        if let Some(first_true) = list.iter().position(|f| f.truth_value) {
            let kept = list.swap_remove(first_true);
            *list = vec![kept];
        }
    }

    /// Replace the fact list with a copy of `facts`, optionally stamped with
    /// extra support.
    pub fn rawset(&mut self, relation: Relation, facts: &[Fact], support: Option<&Support>) {
        let copied = Self::stamp(facts, support);
        self.properties.values.insert(relation, copied);
    }

    /// Append a copy of `facts`, optionally stamped with extra support.
    pub fn rawadd(&mut self, relation: Relation, facts: &[Fact], support: Option<&Support>) {
        let copied = Self::stamp(facts, support);
        self.properties
            .values
            .entry(relation)
            .or_default()
            .extend(copied);
    }

    fn stamp(facts: &[Fact], support: Option<&Support>) -> Vec<Fact> {
        facts
            .iter()
            .cloned()
            .map(|f| match support {
                Some(extra) => f.with_support(extra),
                None => f,
            })
            .collect()
    }
}
