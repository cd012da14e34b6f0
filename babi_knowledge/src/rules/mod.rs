//! Rules - reactive objects re-evaluated after every clause.
//!
//! A rule handed to [`Knowledge::update`](crate::Knowledge::update) is kept for
//! the rest of the story. After each later update, every registered rule is
//! asked whether it applies; if so it may change the world and then the new
//! belief table.

use babi_world::World;

use crate::{BeliefTable, KnowledgeError, Story, StoryEntry};

/// The rule capability. Every method has a do-nothing default.
pub trait Rule: std::fmt::Debug {
    /// Name recorded in the story when the rule is registered.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether the rule fires for `entry`, given the freshly updated table
    /// and the whole story so far.
    fn is_applicable(&self, _entry: &StoryEntry, _table: &BeliefTable, _story: &Story) -> bool {
        false
    }

    /// World mutation performed when the rule fires.
    fn perform(&mut self, _world: &mut World) -> Result<(), KnowledgeError> {
        Ok(())
    }

    /// Belief update performed after [`Rule::perform`].
    fn update_knowledge(
        &mut self,
        _world: &World,
        _table: &mut BeliefTable,
        _entry: &StoryEntry,
    ) -> Result<(), KnowledgeError> {
        Ok(())
    }
}

type Applicable = Box<dyn Fn(&StoryEntry, &BeliefTable, &Story) -> bool>;
type Perform = Box<dyn FnMut(&mut World) -> Result<(), KnowledgeError>>;
type UpdateKnowledge = Box<dyn FnMut(&World, &mut BeliefTable, &StoryEntry) -> Result<(), KnowledgeError>>;

/// A rule assembled from closures.
pub struct FnRule {
    name: String,
    applicable: Applicable,
    perform: Option<Perform>,
    update: Option<UpdateKnowledge>,
}

impl FnRule {
    /// Create a rule that fires whenever `applicable` says so and does nothing yet.
    pub fn new<F>(name: impl Into<String>, applicable: F) -> Self
    where
        F: Fn(&StoryEntry, &BeliefTable, &Story) -> bool + 'static,
    {
        Self {
            name: name.into(),
            applicable: Box::new(applicable),
            perform: None,
            update: None,
        }
    }

    /// Set the world mutation.
    pub fn with_perform<F>(mut self, perform: F) -> Self
    where
        F: FnMut(&mut World) -> Result<(), KnowledgeError> + 'static,
    {
        self.perform = Some(Box::new(perform));
        self
    }

    /// Set the belief update.
    pub fn with_update<F>(mut self, update: F) -> Self
    where
        F: FnMut(&World, &mut BeliefTable, &StoryEntry) -> Result<(), KnowledgeError> + 'static,
    {
        self.update = Some(Box::new(update));
        self
    }
}

impl std::fmt::Debug for FnRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("perform", &self.perform.is_some())
            .field("update", &self.update.is_some())
            .finish()
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_applicable(&self, entry: &StoryEntry, table: &BeliefTable, story: &Story) -> bool {
        (self.applicable)(entry, table, story)
    }

    fn perform(&mut self, world: &mut World) -> Result<(), KnowledgeError> {
        match self.perform.as_mut() {
            Some(perform) => perform(world),
            None => Ok(()),
        }
    }

    fn update_knowledge(
        &mut self,
        world: &World,
        table: &mut BeliefTable,
        entry: &StoryEntry,
    ) -> Result<(), KnowledgeError> {
        match self.update.as_mut() {
            Some(update) => update(world, table, entry),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Inert;

    impl Rule for Inert {}

    #[test]
    fn test_defaults_do_nothing() {
        let mut rule = Inert;
        let mut world = World::new();
        let mut table = BeliefTable::default();
        let entry = StoryEntry::Rule {
            name: "inert".to_string(),
        };

        assert!(!rule.is_applicable(&entry, &table, &Story::new()));
        rule.perform(&mut world).unwrap();
        rule.update_knowledge(&world, &mut table, &entry).unwrap();
        assert_eq!(table, BeliefTable::default());
        assert!(rule.name().ends_with("Inert"));
    }

    #[test]
    fn test_fn_rule() {
        let mut rule = FnRule::new("always", |_, _, _| true)
            .with_perform(|world| {
                world.create_entity("spawned")?;
                Ok(())
            });
        let mut world = World::new();
        let entry = StoryEntry::Rule {
            name: "always".to_string(),
        };

        assert_eq!(rule.name(), "always");
        assert!(rule.is_applicable(&entry, &BeliefTable::default(), &Story::new()));
        rule.perform(&mut world).unwrap();
        assert!(world.contains(&"spawned".into()));
        assert!(rule.perform(&mut world).is_err());
    }
}
