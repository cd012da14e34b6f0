//! The entity record: capability flags, sizes, coordinates, and links.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Capability, Direction, EntityId};

/// A named object in the world.
///
/// Links to other entities (`is_in`, neighbors) are stored as ids; the
/// [`World`](crate::World) owns every entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,

    // Capability flags
    pub is_actor: bool,
    pub is_god: bool,
    pub is_thing: bool,
    pub is_gettable: bool,
    pub is_location: bool,

    pub size: i64,
    /// Capacity currently occupied by held entities.
    pub carry: i64,

    /// Coordinates are unset until the entity is positioned.
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub z: Option<i64>,

    #[serde(default)]
    pub neighbors: BTreeMap<Direction, EntityId>,
    pub is_in: Option<EntityId>,
}

impl Entity {
    /// Create a plain thing with the given id and name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = EntityId::new(id);
        Self {
            name: id.0.clone(),
            id,
            is_actor: false,
            is_god: false,
            is_thing: true,
            is_gettable: false,
            is_location: false,
            size: 0,
            carry: 0,
            x: None,
            y: None,
            z: None,
            neighbors: BTreeMap::new(),
            is_in: None,
        }
    }

    /// Set a display name different from the id.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Turn a capability flag on.
    pub fn with(mut self, capability: Capability) -> Self {
        self.set_flag(capability, true);
        self
    }

    /// Turn a capability flag off.
    pub fn without(mut self, capability: Capability) -> Self {
        self.set_flag(capability, false);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn with_position(mut self, x: i64, y: i64, z: i64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.z = Some(z);
        self
    }

    pub fn flag(&self, capability: Capability) -> bool {
        match capability {
            Capability::Actor => self.is_actor,
            Capability::God => self.is_god,
            Capability::Thing => self.is_thing,
            Capability::Gettable => self.is_gettable,
            Capability::Location => self.is_location,
        }
    }

    pub fn set_flag(&mut self, capability: Capability, value: bool) {
        let slot = match capability {
            Capability::Actor => &mut self.is_actor,
            Capability::God => &mut self.is_god,
            Capability::Thing => &mut self.is_thing,
            Capability::Gettable => &mut self.is_gettable,
            Capability::Location => &mut self.is_location,
        };
        *slot = value;
    }

    /// Check whether this entity has room left for `other`.
    pub fn can_hold(&self, other: &Entity) -> bool {
        self.carry
            .checked_add(other.size)
            .is_some_and(|needed| self.size >= needed)
    }

    /// Coordinates, if all three are set.
    pub fn position(&self) -> Option<(i64, i64, i64)> {
        Some((self.x?, self.y?, self.z?))
    }

    pub fn neighbor(&self, direction: Direction) -> Option<&EntityId> {
        self.neighbors.get(&direction)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
