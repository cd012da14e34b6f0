//! The action set: named, stateless operations over an actor and arguments.
//!
//! Every action answers two questions about the world:
//! - **validity**: may `actor` do this with these arguments right now?
//! - **effect**: how does the world change when it does?
//!
//! How an action is reflected in belief state lives with the belief store
//! (`babi_knowledge`), which extends [`Action`] with a knowledge update.

mod args;
mod effects;
mod validity;

pub use args::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::{EntityId, Relation, World, WorldError};

/// All actions known to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `get obj [from source | count n]`
    Get,
    /// `drop obj`
    Drop,
    /// `create id`
    Create,
    /// `set target relation [value]`
    Set,
    /// `set_dir a direction b`
    SetDir,
    /// `set_pos a x y [z]`
    SetPos,
    /// `teleport dest`
    Teleport,
    /// `give obj recipient`
    Give,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::Get,
        Action::Drop,
        Action::Give,
        Action::Teleport,
        Action::Create,
        Action::Set,
        Action::SetDir,
        Action::SetPos,
    ];

    /// The registry key of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Get => "get",
            Action::Drop => "drop",
            Action::Create => "create",
            Action::Set => "set",
            Action::SetDir => "set_dir",
            Action::SetPos => "set_pos",
            Action::Teleport => "teleport",
            Action::Give => "give",
        }
    }

    /// Check whether `actor` may perform this action with `args`.
    ///
    /// Never fails: missing or ill-typed arguments simply make the action invalid.
    pub fn is_valid(&self, world: &World, actor: &EntityId, args: &[Arg]) -> bool {
        match self {
            Action::Get => validity::get(world, actor, args),
            Action::Drop => validity::drop(world, actor, args),
            Action::Create => validity::create(world, actor, args),
            Action::Set => validity::set(world, actor, args),
            Action::SetDir => validity::set_dir(world, actor, args),
            Action::SetPos => validity::set_pos(world, actor, args),
            Action::Teleport => validity::teleport(world, actor, args),
            Action::Give => validity::give(world, actor, args),
        }
    }

    /// Apply the action's effect to the world.
    ///
    /// Validity is not checked here. An error is returned only when the
    /// arguments cannot be interpreted at all, or `create` hits an id in use.
    pub fn perform(&self, world: &mut World, actor: &EntityId, args: &[Arg]) -> Result<(), WorldError> {
        match self {
            Action::Get => effects::get(world, actor, args),
            Action::Drop => effects::drop(world, actor, args),
            Action::Create => effects::create(world, args),
            Action::Set => effects::set(world, args),
            Action::SetDir => effects::set_dir(world, args),
            Action::SetPos => effects::set_pos(world, args),
            Action::Teleport => effects::teleport(world, actor, args),
            Action::Give => effects::give(world, actor, args),
        }
    }

    /// The relation and value a `set` clause writes, as both the world and
    /// the belief store interpret it.
    pub fn set_target(args: &[Arg]) -> Result<(Relation, RelationValue), WorldError> {
        let relation = match args.get(1) {
            Some(arg @ (Arg::Text(_) | Arg::Entity(_))) => arg.to_string().parse::<Relation>()?,
            Some(other) => return Err(WorldError::UnknownRelation(other.to_string())),
            None => {
                return Err(WorldError::MissingArgument {
                    action: "set",
                    position: 1,
                })
            }
        };
        let value = RelationValue::coerce(relation, args.get(2))?;
        Ok((relation, value))
    }
}

impl FromStr for Action {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| WorldError::UnknownAction(s.to_string()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A value written to a relation by `set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationValue {
    Flag(bool),
    Number(i64),
    Entity(EntityId),
}

impl RelationValue {
    /// Interpret an optional argument as a value for `relation`.
    ///
    /// An omitted value means `true`; numbers are truncated to integers.
    pub fn coerce(relation: Relation, arg: Option<&Arg>) -> Result<Self, WorldError> {
        let invalid = |reason: &str| WorldError::InvalidArgument {
            action: "set",
            position: 2,
            reason: format!("{} for relation '{}'", reason, relation),
        };

        if relation.is_numeric() {
            return arg
                .and_then(Arg::as_number)
                .map(|n| RelationValue::Number(n.trunc() as i64))
                .ok_or_else(|| invalid("expected a number"));
        }
        if relation.is_link() {
            return arg
                .and_then(Arg::as_entity)
                .map(|id| RelationValue::Entity(id.clone()))
                .ok_or_else(|| invalid("expected an entity"));
        }
        match arg {
            None => Ok(RelationValue::Flag(true)),
            Some(Arg::Text(s)) if s == "true" => Ok(RelationValue::Flag(true)),
            Some(Arg::Text(s)) if s == "false" => Ok(RelationValue::Flag(false)),
            Some(Arg::Number(n)) => Ok(RelationValue::Flag(*n != 0.0)),
            Some(_) => Err(invalid("expected true or false")),
        }
    }
}

/// Explicit name -> action map handed to a [`World`].
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in action under its own name.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for action in Action::ALL {
            registry.register(action.name(), action);
        }
        registry
    }

    /// Register (or replace) an action under `name`.
    pub fn register(&mut self, name: impl Into<String>, action: Action) {
        self.actions.insert(name.into(), action);
    }

    pub fn get(&self, name: &str) -> Option<Action> {
        self.actions.get(name).copied()
    }

    /// Look up an action, failing for unknown names.
    pub fn resolve(&self, name: &str) -> Result<Action, WorldError> {
        self.get(name)
            .ok_or_else(|| WorldError::UnknownAction(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
