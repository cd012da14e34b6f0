//! The temporal belief store.
//!
//! [`Knowledge`] keeps one [`BeliefTable`] per timestep. Every update deep
//! copies the previous table, applies the event to the copy and then gives
//! each registered rule a chance to react, so earlier snapshots never change.

mod config;
mod question;
mod story;

pub use config::*;
pub use question::*;
pub use story::*;

use babi_world::{EntityId, Relation, World};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{ActionKnowledge, BeliefTable, Exclusivity, KnowledgeError, Rule, Support, Value};

/// Versioned belief state plus the story that produced it.
#[derive(Debug, Default)]
pub struct Knowledge {
    t: usize,
    tables: BTreeMap<usize, BeliefTable>,
    story: Story,
    rules: Vec<Box<dyn Rule>>,
    exclusive: Exclusivity,
}

impl Knowledge {
    /// Empty store, timestep 0, nothing exclusive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with rules that are active from the first update.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_config(config: &KnowledgeConfig) -> Self {
        Self {
            exclusive: config.exclusivity(),
            ..Self::default()
        }
    }

    /// Takes effect from the next update; existing snapshots keep theirs.
    pub fn set_exclusive(&mut self, relation: Relation, exclusive: bool) {
        self.exclusive.set(relation, exclusive);
    }

    pub fn is_exclusive(&self, relation: Relation) -> bool {
        self.exclusive.is_exclusive(relation)
    }

    /// Record one event and return the new timestep.
    ///
    /// A clause whose knowledge update fails leaves the store untouched. A
    /// failing rule aborts the update after the new timestep is recorded.
    pub fn update(&mut self, world: &mut World, event: impl Into<Event>) -> Result<usize, KnowledgeError> {
        let t = self.t + 1;
        let mut table = match self.tables.get(&self.t) {
            Some(previous) => previous.clone(),
            None => BeliefTable::default(),
        };
        table.set_exclusivity(self.exclusive.clone());

        let entry = match event.into() {
            Event::Clause(clause) => {
                clause.action.update_knowledge(world, &mut table, &clause)?;
                StoryEntry::Clause(clause)
            }
            Event::Rule(rule) => {
                debug!(rule = rule.name(), timestep = t, "rule registered");
                let entry = StoryEntry::Rule {
                    name: rule.name().to_string(),
                };
                self.rules.push(rule);
                entry
            }
        };

        debug!(timestep = t, event = %entry, "timestep advanced");
        self.story.insert(t, entry);
        self.tables.insert(t, table);
        self.t = t;

        self.fire_rules(world, t)?;
        Ok(t)
    }

    fn fire_rules(&mut self, world: &mut World, t: usize) -> Result<(), KnowledgeError> {
        let entry = self.story.get(&t).ok_or(KnowledgeError::UnsetTimestep(t))?;
        let table = self
            .tables
            .get_mut(&t)
            .ok_or(KnowledgeError::UnsetTimestep(t))?;

        for rule in self.rules.iter_mut() {
            if !rule.is_applicable(entry, table, &self.story) {
                continue;
            }
            debug!(rule = rule.name(), timestep = t, "rule fired");
            rule.perform(world)?;
            rule.update_knowledge(world, table, entry)?;
        }
        Ok(())
    }

    /// Latest timestep; 0 before the first update.
    pub fn timestep(&self) -> usize {
        self.t
    }

    pub fn current(&self) -> Result<&BeliefTable, KnowledgeError> {
        self.table(self.t)
    }

    pub fn table(&self, t: usize) -> Result<&BeliefTable, KnowledgeError> {
        self.tables.get(&t).ok_or(KnowledgeError::UnsetTimestep(t))
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// The distinct successive values of `relation` for `entity`, with the
    /// support of each. See [`Knowledge::value_history`].
    pub fn get_value_history(
        &self,
        world: &World,
        entity: &EntityId,
        relation: Relation,
    ) -> Result<Vec<(Value, Support)>, KnowledgeError> {
        self.value_history(world, entity, relation, true)
    }

    /// Walk every timestep from 1 and collect the single true value of
    /// `relation`. Timesteps where it is unknown are skipped and a value
    /// equal to the previous one is not repeated.
    ///
    /// With `resolve_holder`, a value naming an actor is replaced by that
    /// actor's own value (one hop only), so an object held by someone is
    /// reported where that someone is.
    pub fn value_history(
        &self,
        world: &World,
        entity: &EntityId,
        relation: Relation,
        resolve_holder: bool,
    ) -> Result<Vec<(Value, Support)>, KnowledgeError> {
        let mut history: Vec<(Value, Support)> = Vec::new();
        for t in 1..=self.t {
            let table = self.table(t)?;
            let Some((value, support)) = table.entity(entity).get_value(relation)? else {
                continue;
            };
            let mut value = value.clone();
            let mut support = support.clone();

            let holder = value
                .as_entity()
                .filter(|id| world.entity(id).map_or(false, |e| e.is_actor))
                .cloned();
            if resolve_holder {
                if let Some(holder) = holder {
                    match table.entity(&holder).get_value(relation)? {
                        Some((held_in, extra)) => {
                            value = held_in.clone();
                            support.extend(extra.iter().copied());
                        }
                        None => continue,
                    }
                }
            }

            if history.last().map_or(true, |(last, _)| *last != value) {
                history.push((value, support));
            }
        }
        Ok(history)
    }

    /// Where `entity` is now, looking through whoever holds it.
    pub fn where_is(&self, world: &World, entity: &EntityId) -> Result<Option<Question>, KnowledgeError> {
        let table = self.current()?;
        let Some((value, support)) = table.entity(entity).get_value(Relation::IsIn)? else {
            return Ok(None);
        };
        let mut answer = value.clone();
        let mut support = support.clone();

        let holder = answer
            .as_entity()
            .filter(|id| world.entity(id).map_or(false, |e| e.is_actor))
            .cloned();
        if let Some(holder) = holder {
            match table.entity(&holder).get_value(Relation::IsIn)? {
                Some((held_in, extra)) => {
                    answer = held_in.clone();
                    support.extend(extra.iter().copied());
                }
                None => return Ok(None),
            }
        }

        Ok(Some(Question {
            kind: QuestionKind::WhereIs,
            args: vec![Value::from(entity), answer],
            support,
        }))
    }

    /// Every place `entity` has been, oldest first.
    pub fn where_was(&self, world: &World, entity: &EntityId) -> Result<Option<Question>, KnowledgeError> {
        let history = self.get_value_history(world, entity, Relation::IsIn)?;
        if history.is_empty() {
            return Ok(None);
        }
        let mut args = vec![Value::from(entity)];
        let mut support = Support::new();
        for (value, because) in history {
            args.push(value);
            support.extend(because);
        }
        Ok(Some(Question {
            kind: QuestionKind::WhereWas,
            args,
            support,
        }))
    }
}

impl std::fmt::Display for Knowledge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (t, entry) in &self.story {
            writeln!(f, "{}: {}", t, entry)?;
        }
        Ok(())
    }
}
