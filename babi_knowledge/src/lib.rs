//! # bAbI Knowledge
//!
//! The temporal belief store of the story world. This crate records what is
//! known after every clause of a story built with `babi_world`, keeps the
//! clauses that justify each belief, and lets reactive rules extend both the
//! world and the beliefs as the story unfolds.
//!
//! ## Core Components
//!
//! - **knowledge_base**: Facts, per-entity belief views and belief tables
//! - **updates**: How each action changes a belief table
//! - **rules**: Reactive rules evaluated after every update
//! - **store**: The versioned [`Knowledge`] store, its story and questions
//!
//! ## Design Philosophy
//!
//! - **Append-only**: Each timestep gets its own deep-copied table; old snapshots never change
//! - **Justified**: Every fact carries the set of clauses it was derived from
//! - **Single-writer**: One story, one store, updated in order

pub mod error;
pub mod knowledge_base;
pub mod rules;
pub mod store;
pub mod updates;

pub use error::*;
pub use knowledge_base::*;
pub use rules::*;
pub use store::*;
pub use updates::*;
