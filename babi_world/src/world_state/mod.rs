//! World state management - the entity registry, the action registry, and the
//! command-script loader that drives them.

mod command;

pub use command::split_command;

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{Action, ActionRegistry, Arg, Capability, Clause, ClauseId, Entity, EntityId, WorldError};

/// Id of the god entity every world starts with.
pub const GOD: &str = "god";

/// Unique identifier for a world instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for WorldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of every entity in a story, and of the actions that may act on them.
#[derive(Debug)]
pub struct World {
    id: WorldId,
    entities: BTreeMap<EntityId, Entity>,
    actions: ActionRegistry,
    next_clause: Cell<u64>,
}

impl World {
    /// Create a world with the standard actions and a `god` entity.
    pub fn new() -> Self {
        Self::with_actions(ActionRegistry::standard())
    }

    /// Create a world with a custom action registry.
    pub fn with_actions(actions: ActionRegistry) -> Self {
        let mut entities = BTreeMap::new();
        let god = Entity::new(GOD).with(Capability::God);
        entities.insert(god.id.clone(), god);
        Self {
            id: WorldId::new(),
            entities,
            actions,
            next_clause: Cell::new(0),
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Hand out the next clause id.
    pub fn next_clause_id(&self) -> ClauseId {
        let id = self.next_clause.get() + 1;
        self.next_clause.set(id);
        ClauseId(id)
    }

    pub fn god_id(&self) -> EntityId {
        EntityId::new(GOD)
    }

    pub fn god(&self) -> Option<&Entity> {
        self.entities.get(&self.god_id())
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Get entity by ID.
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get mutable entity by ID.
    pub fn entity_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Get entity by ID, failing if it does not exist.
    pub fn require(&self, id: &EntityId) -> Result<&Entity, WorldError> {
        self.entity(id)
            .ok_or_else(|| WorldError::UnknownEntity(id.clone()))
    }

    pub fn require_mut(&mut self, id: &EntityId) -> Result<&mut Entity, WorldError> {
        self.entities
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownEntity(id.clone()))
    }

    /// Register a fully built entity. Ids must be unique.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityId, WorldError> {
        if self.contains(&entity.id) {
            return Err(WorldError::DuplicateEntity(entity.id));
        }
        let id = entity.id.clone();
        debug!(entity = %id, "entity created");
        self.entities.insert(id.clone(), entity);
        Ok(id)
    }

    /// Register a plain thing under `id`.
    pub fn create_entity(&mut self, id: impl Into<String>) -> Result<EntityId, WorldError> {
        self.add_entity(Entity::new(id))
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// All entities matching a predicate.
    pub fn get<F>(&self, predicate: F) -> Vec<&Entity>
    where
        F: Fn(&Entity) -> bool,
    {
        self.entities.values().filter(|e| predicate(e)).collect()
    }

    /// Entities that can act and are also gods.
    pub fn actors(&self) -> Vec<&Entity> {
        self.get(|e| e.is_actor && e.is_god)
    }

    pub fn locations(&self) -> Vec<&Entity> {
        self.get(|e| e.is_location)
    }

    /// Things that can be picked up.
    pub fn objects(&self) -> Vec<&Entity> {
        self.get(|e| e.is_thing && e.is_gettable)
    }

    /// Build the clause for `<actor-id> <action-name> <arg>*` without performing it.
    pub fn parse_command(&self, command: &str) -> Result<Clause, WorldError> {
        let tokens = split_command(command)?;
        let mut tokens = tokens.iter();
        let actor = tokens.next().ok_or(WorldError::EmptyCommand)?;
        let actor = EntityId::new(actor.as_str());
        self.require(&actor)?;
        let action = tokens
            .next()
            .ok_or(WorldError::MissingArgument {
                action: "command",
                position: 1,
            })
            .and_then(|name| self.actions.resolve(name))?;
        let args = tokens.map(|token| Arg::resolve(self, token)).collect();
        Ok(Clause::new(self, true, actor, action, args))
    }

    /// Parse and perform a command, returning the clause that was performed.
    pub fn perform_command(&mut self, command: &str) -> Result<Clause, WorldError> {
        let clause = self.parse_command(command)?;
        clause.perform(self)?;
        Ok(clause)
    }

    /// Perform a named action as an asserted clause.
    pub fn perform_action(
        &mut self,
        action: &str,
        actor: &EntityId,
        args: Vec<Arg>,
    ) -> Result<Clause, WorldError> {
        let action: Action = self.actions.resolve(action)?;
        let clause = Clause::new(self, true, actor.clone(), action, args);
        clause.perform(self)?;
        Ok(clause)
    }

    /// Run a world script: every non-empty line not starting with `#` is a
    /// command issued by god.
    ///
    /// Stops at the first failing line.
    pub fn load_str(&mut self, script: &str) -> Result<Vec<Clause>, WorldError> {
        let mut performed = Vec::new();
        for (index, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.perform_command(&format!("{} {}", GOD, line)) {
                Ok(clause) => performed.push(clause),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "world script line failed");
                    return Err(WorldError::Script {
                        line: index + 1,
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(performed)
    }

    /// Read and run a world script from disk.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Vec<Clause>, WorldError> {
        let script = std::fs::read_to_string(path)?;
        self.load_str(&script)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_world() -> World {
        let mut world = World::new();
        world
            .add_entity(
                Entity::new("john")
                    .with(Capability::Actor)
                    .with_size(2),
            )
            .unwrap();
        world
            .add_entity(Entity::new("mary").with(Capability::Actor).with_size(2))
            .unwrap();
        world
            .add_entity(Entity::new("kitchen").with(Capability::Location).with_size(10))
            .unwrap();
        world
            .add_entity(Entity::new("garden").with(Capability::Location).with_size(10))
            .unwrap();
        world
            .add_entity(Entity::new("milk").with(Capability::Gettable).with_size(1))
            .unwrap();
        world
    }

    fn is_in(world: &World, id: &str) -> Option<EntityId> {
        world.entity(&id.into()).unwrap().is_in.clone()
    }

    fn carry(world: &World, id: &str) -> i64 {
        world.entity(&id.into()).unwrap().carry
    }

    #[test]
    fn test_new_world_has_god() {
        let world = World::new();
        assert!(world.god().unwrap().is_god);
        assert_eq!(world.actions().len(), 8);
    }

    #[test]
    fn test_duplicate_entity() {
        let mut world = build_world();
        assert!(matches!(
            world.create_entity("john"),
            Err(WorldError::DuplicateEntity(id)) if id.as_str() == "john"
        ));
        assert_eq!(world.entities().count(), 6);
    }

    #[test]
    fn test_load_script() {
        let mut world = build_world();
        let performed = world
            .load_str("# setup\nset john is_in kitchen\n\n  set milk is_in kitchen\n")
            .unwrap();
        assert_eq!(performed.len(), 2);
        assert_eq!(is_in(&world, "john"), Some("kitchen".into()));
        assert_eq!(carry(&world, "kitchen"), 3);
    }

    #[test]
    fn test_load_reports_failing_line() {
        let mut world = build_world();
        let err = world
            .load_str("set john is_in kitchen\nfly john\n")
            .unwrap_err();
        assert!(matches!(err, WorldError::Script { line: 2, .. }));
    }

    #[test]
    fn test_create_command() {
        let mut world = build_world();
        let clause = world.parse_command("god create hallway").unwrap();
        assert!(clause.is_valid(&world));
        clause.perform(&mut world).unwrap();
        assert!(world.contains(&"hallway".into()));

        let again = world.parse_command("god create hallway").unwrap();
        assert!(!again.is_valid(&world));
        assert!(again.perform(&mut world).is_err());
    }

    #[test]
    fn test_create_numeric_id() {
        let mut world = build_world();
        let clause = world.parse_command("god create 5").unwrap();
        assert_eq!(clause.args, vec![Arg::Number(5.0)]);
        assert!(clause.is_valid(&world));
        clause.perform(&mut world).unwrap();
        assert!(world.contains(&"5".into()));

        // Now "5" resolves to the entity and cannot be created again.
        let again = world.parse_command("god create 5").unwrap();
        assert!(!again.is_valid(&world));
    }

    #[test]
    fn test_get_and_drop() {
        let mut world = build_world();
        world
            .load_str("set john is_in kitchen\nset milk is_in kitchen")
            .unwrap();
        let kitchen_carry = carry(&world, "kitchen");

        let get = world.parse_command("john get milk").unwrap();
        assert!(get.is_valid(&world));
        get.perform(&mut world).unwrap();
        assert_eq!(is_in(&world, "milk"), Some("john".into()));
        assert_eq!(carry(&world, "john"), 1);

        let drop = world.parse_command("john drop milk").unwrap();
        assert!(drop.is_valid(&world));
        drop.perform(&mut world).unwrap();
        assert_eq!(is_in(&world, "milk"), Some("kitchen".into()));
        assert_eq!(carry(&world, "john"), 0);
        assert_eq!(carry(&world, "kitchen"), kitchen_carry);
    }

    #[test]
    fn test_get_requires_shared_location_and_capacity() {
        let mut world = build_world();
        world
            .load_str("set john is_in kitchen\nset milk is_in garden\nset milk size 3")
            .unwrap();
        assert!(!world.parse_command("john get milk").unwrap().is_valid(&world));

        world.load_str("set milk is_in kitchen").unwrap();
        assert!(!world.parse_command("john get milk").unwrap().is_valid(&world));

        world.load_str("set milk size 1").unwrap();
        assert!(world.parse_command("john get milk").unwrap().is_valid(&world));
        assert!(!world.parse_command("john get kitchen").unwrap().is_valid(&world));
    }

    #[test]
    fn test_get_with_huge_object_is_invalid() {
        let mut world = build_world();
        world
            .load_str("create apple\nset apple is_gettable\nset apple size 1\nset apple is_in kitchen\nset john is_in kitchen\nset milk is_in kitchen")
            .unwrap();
        world.perform_command("john get apple").unwrap();
        world.load_str("set milk size 9223372036854775807").unwrap();

        assert!(!world.parse_command("john get milk").unwrap().is_valid(&world));
    }

    #[test]
    fn test_get_from_source() {
        let mut world = build_world();
        world
            .load_str(
                "create box\nset box size 5\nset box is_in kitchen\nset john is_in kitchen\nset milk is_in box",
            )
            .unwrap();

        let get = world.parse_command("john get milk from box").unwrap();
        assert!(get.is_valid(&world));
        get.perform(&mut world).unwrap();
        assert_eq!(is_in(&world, "milk"), Some("john".into()));
        assert_eq!(carry(&world, "box"), 0);
        assert_eq!(carry(&world, "john"), 1);

        assert!(!world
            .parse_command("john get milk from garden")
            .unwrap()
            .is_valid(&world));
        assert!(!world
            .parse_command("john get milk with box")
            .unwrap()
            .is_valid(&world));
    }

    #[test]
    fn test_get_count() {
        let mut world = build_world();
        world
            .load_str("set john is_in kitchen\nset milk is_in garden")
            .unwrap();
        assert!(world.parse_command("john get milk count 2").unwrap().is_valid(&world));
        assert!(!world.parse_command("john get milk count two").unwrap().is_valid(&world));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let world = build_world();
        assert!(!world.parse_command("god set john size big").unwrap().is_valid(&world));
        assert!(!world.parse_command("god set john mood happy").unwrap().is_valid(&world));
        assert!(!world.parse_command("john set milk size 2").unwrap().is_valid(&world));
        assert!(world.parse_command("god set john size 3.9").unwrap().is_valid(&world));
    }

    #[test]
    fn test_set_values() {
        let mut world = build_world();
        world
            .load_str("set milk size 3.9\nset milk is_actor\nset john is_gettable false\nset kitchen n garden")
            .unwrap();
        let milk = world.entity(&"milk".into()).unwrap();
        assert_eq!(milk.size, 3);
        assert!(milk.is_actor);
        assert!(!world.entity(&"john".into()).unwrap().is_gettable);
        assert_eq!(
            world.entity(&"kitchen".into()).unwrap().neighbor(crate::Direction::N),
            Some(&"garden".into())
        );
    }

    #[test]
    fn test_set_is_in_moves_carry() {
        let mut world = build_world();
        world.load_str("set john is_in kitchen").unwrap();
        assert_eq!(carry(&world, "kitchen"), 2);
        world.load_str("set john is_in garden").unwrap();
        assert_eq!(carry(&world, "kitchen"), 0);
        assert_eq!(carry(&world, "garden"), 2);
    }

    #[test]
    fn test_set_dir() {
        let mut world = build_world();
        world
            .load_str("set_pos kitchen 0 0\nset_pos garden 1 0")
            .unwrap();

        let clause = world.parse_command("god set_dir kitchen e garden").unwrap();
        assert!(clause.is_valid(&world));
        clause.perform(&mut world).unwrap();
        assert_eq!(
            world.entity(&"kitchen".into()).unwrap().neighbor(crate::Direction::E),
            Some(&"garden".into())
        );
        assert_eq!(
            world.entity(&"garden".into()).unwrap().neighbor(crate::Direction::W),
            Some(&"kitchen".into())
        );
    }

    #[test]
    fn test_set_dir_geometry() {
        let mut world = build_world();
        world
            .load_str("set_pos kitchen 1 0\nset_pos garden 0 0 2")
            .unwrap();
        assert!(!world.parse_command("god set_dir kitchen e garden").unwrap().is_valid(&world));
        assert!(world.parse_command("god set_dir kitchen w garden").unwrap().is_valid(&world));
        assert!(world.parse_command("god set_dir kitchen u garden").unwrap().is_valid(&world));
        assert!(!world.parse_command("god set_dir kitchen nw garden").unwrap().is_valid(&world));
        assert!(!world.parse_command("god set_dir kitchen x garden").unwrap().is_valid(&world));
        assert!(!world.parse_command("god set_dir kitchen w milk").unwrap().is_valid(&world));
    }

    #[test]
    fn test_set_pos_defaults_z() {
        let mut world = build_world();
        world.load_str("set_pos kitchen 3 4").unwrap();
        assert_eq!(world.entity(&"kitchen".into()).unwrap().position(), Some((3, 4, 0)));
        assert!(!world.parse_command("god set_pos kitchen 3").unwrap().is_valid(&world));
    }

    #[test]
    fn test_teleport() {
        let mut world = build_world();
        world
            .load_str("set john is_god\nset john is_in kitchen")
            .unwrap();
        assert!(!world.parse_command("john teleport kitchen").unwrap().is_valid(&world));

        let clause = world.parse_command("john teleport garden").unwrap();
        assert!(clause.is_valid(&world));
        clause.perform(&mut world).unwrap();
        assert_eq!(is_in(&world, "john"), Some("garden".into()));
        assert_eq!(carry(&world, "kitchen"), 0);
        assert_eq!(carry(&world, "garden"), 2);
        assert!(!world.parse_command("mary teleport garden").unwrap().is_valid(&world));
    }

    #[test]
    fn test_give() {
        let mut world = build_world();
        world
            .load_str("set john is_in kitchen\nset mary is_in kitchen\nset milk is_in kitchen")
            .unwrap();
        world.perform_command("john get milk").unwrap();

        assert!(!world.parse_command("john give milk john").unwrap().is_valid(&world));
        let give = world.parse_command("john give milk mary").unwrap();
        assert!(give.is_valid(&world));
        give.perform(&mut world).unwrap();
        assert_eq!(is_in(&world, "milk"), Some("mary".into()));
        assert_eq!(carry(&world, "john"), 0);
        assert_eq!(carry(&world, "mary"), 1);

        world.load_str("set mary is_in garden").unwrap();
        assert!(!world.parse_command("mary give milk john").unwrap().is_valid(&world));
    }

    #[test]
    fn test_unknown_command_parts() {
        let world = build_world();
        assert!(matches!(world.parse_command(""), Err(WorldError::EmptyCommand)));
        assert!(matches!(
            world.parse_command("bob get milk"),
            Err(WorldError::UnknownEntity(_))
        ));
        assert!(matches!(
            world.parse_command("john fly"),
            Err(WorldError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_token_resolution() {
        let world = build_world();
        let clause = world.parse_command("god set_pos milk 2 \"3\"").unwrap();
        assert_eq!(
            clause.args,
            vec![Arg::entity("milk"), Arg::number(2.0), Arg::number(3.0)]
        );
        let clause = world.parse_command("god create \"big box\"").unwrap();
        assert_eq!(clause.args, vec![Arg::text("big box")]);
    }

    #[test]
    fn test_entity_serializes() {
        let world = build_world();
        let json = serde_json::to_value(world.entity(&"john".into()).unwrap()).unwrap();
        assert_eq!(json["is_actor"], true);
        assert_eq!(json["size"], 2);
    }
}
