//! # bAbI World
//!
//! The story world: entities, the action set, and clauses. This crate owns
//! every mutation of world state and knows nothing about beliefs; the belief
//! store in `babi_knowledge` observes the clauses produced here.

pub mod actions;
pub mod clause;
pub mod entities;
pub mod error;
pub mod world_state;

pub use actions::*;
pub use clause::*;
pub use entities::*;
pub use error::*;
pub use world_state::*;
