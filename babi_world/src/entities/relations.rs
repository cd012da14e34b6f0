//! Relation definitions: the closed set of properties an entity carries.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::WorldError;

/// Compass and vertical directions used for neighbor links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    U,
    D,
}

/// Single-axis components a direction is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
        Direction::U,
        Direction::D,
    ];

    /// The direction pointing back the other way.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
            Direction::U => Direction::D,
            Direction::D => Direction::U,
        }
    }

    /// One axis per letter of the direction's short name.
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            Direction::N => &[Axis::North],
            Direction::NE => &[Axis::North, Axis::East],
            Direction::E => &[Axis::East],
            Direction::SE => &[Axis::South, Axis::East],
            Direction::S => &[Axis::South],
            Direction::SW => &[Axis::South, Axis::West],
            Direction::W => &[Axis::West],
            Direction::NW => &[Axis::North, Axis::West],
            Direction::U => &[Axis::Up],
            Direction::D => &[Axis::Down],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::NE => "ne",
            Direction::E => "e",
            Direction::SE => "se",
            Direction::S => "s",
            Direction::SW => "sw",
            Direction::W => "w",
            Direction::NW => "nw",
            Direction::U => "u",
            Direction::D => "d",
        }
    }
}

impl Axis {
    /// Whether the offset `(dx, dy, dz)` from `a` to `b` points along this axis.
    pub fn holds(&self, dx: i64, dy: i64, dz: i64) -> bool {
        match self {
            Axis::North => dy > 0,
            Axis::South => dy < 0,
            Axis::East => dx > 0,
            Axis::West => dx < 0,
            Axis::Up => dz > 0,
            Axis::Down => dz < 0,
        }
    }
}

impl FromStr for Direction {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| WorldError::UnknownDirection(s.to_string()))
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    Actor,
    God,
    Thing,
    Gettable,
    Location,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Actor,
        Capability::God,
        Capability::Thing,
        Capability::Gettable,
        Capability::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Actor => "is_actor",
            Capability::God => "is_god",
            Capability::Thing => "is_thing",
            Capability::Gettable => "is_gettable",
            Capability::Location => "is_location",
        }
    }
}

/// Every property that may be written on an entity or believed about it.
///
/// Anything outside this set is rejected when parsed from a command.
/// Serialized as its script name, so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    IsIn,
    Size,
    X,
    Y,
    Z,
    Neighbor(Direction),
    Flag(Capability),
}

impl Relation {
    /// Relations whose values must be numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Relation::Size | Relation::X | Relation::Y | Relation::Z)
    }

    /// Relations whose values must be entities.
    pub fn is_link(&self) -> bool {
        matches!(self, Relation::IsIn | Relation::Neighbor(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::IsIn => "is_in",
            Relation::Size => "size",
            Relation::X => "x",
            Relation::Y => "y",
            Relation::Z => "z",
            Relation::Neighbor(direction) => direction.as_str(),
            Relation::Flag(capability) => capability.as_str(),
        }
    }
}

impl FromStr for Relation {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let relation = match s {
            "is_in" => Relation::IsIn,
            "size" => Relation::Size,
            "x" => Relation::X,
            "y" => Relation::Y,
            "z" => Relation::Z,
            other => {
                if let Ok(direction) = other.parse::<Direction>() {
                    Relation::Neighbor(direction)
                } else if let Some(capability) =
                    Capability::ALL.into_iter().find(|c| c.as_str() == other)
                {
                    Relation::Flag(capability)
                } else {
                    return Err(WorldError::UnknownRelation(other.to_string()));
                }
            }
        };
        Ok(relation)
    }
}

impl Serialize for Relation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Relation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
