//! Knowledge Base module - the belief state of one timestep.
//!
//! The belief state consists of:
//! - **Facts**: a value, a truth value, and the clauses supporting it
//! - **Entity properties**: per-relation fact lists for one entity
//! - **Belief tables**: every entity's properties at one timestep

mod fact;
mod properties;
mod table;

pub use fact::*;
pub use properties::*;
pub use table::*;
