//! Clauses: concrete, truth-valued invocations of an action.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

use crate::actions::{entity_at, integer_at};
use crate::{Action, Arg, EntityId, World, WorldError, WorldId};

/// How many candidates [`Clause::sample_valid`] draws before giving up.
pub const SAMPLE_ATTEMPTS: usize = 100;

/// Monotonically increasing identifier of a clause within its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClauseId(pub u64);

impl std::fmt::Display for ClauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One timestamped event of the story: `actor` does (or does not do) `action`.
///
/// Equality and hashing go through [`ClauseId`] alone, so two clauses built
/// separately are always distinct members of a support set. Use
/// [`Clause::same_invocation`] to compare what two clauses say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub id: ClauseId,
    pub world: WorldId,
    pub truth_value: bool,
    pub actor: EntityId,
    pub action: Action,
    pub args: Vec<Arg>,
}

impl Clause {
    /// Create a clause, taking the next id from `world`.
    pub fn new(
        world: &World,
        truth_value: bool,
        actor: EntityId,
        action: Action,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            id: world.next_clause_id(),
            world: world.id(),
            truth_value,
            actor,
            action,
            args,
        }
    }

    /// Check the action's validity predicate against the current world.
    pub fn is_valid(&self, world: &World) -> bool {
        self.action.is_valid(world, &self.actor, &self.args)
    }

    /// Apply the action's effect, but only for asserted clauses.
    ///
    /// A denied clause exists to drive belief updates and never touches the
    /// world. Validity is not checked; callers gate on [`Clause::is_valid`].
    pub fn perform(&self, world: &mut World) -> Result<(), WorldError> {
        if !self.truth_value {
            return Ok(());
        }
        debug!(clause = %self.id, "{}", self);
        self.action.perform(world, &self.actor, &self.args)
    }

    /// The entity bound at argument `position`.
    pub fn entity_arg(&self, position: usize) -> Result<&EntityId, WorldError> {
        entity_at(&self.args, position, self.action.name())
    }

    /// The number bound at argument `position`, truncated to an integer.
    pub fn integer_arg(&self, position: usize) -> Result<i64, WorldError> {
        integer_at(&self.args, position, self.action.name())
    }

    /// Same world, actor and arguments (action and truth value are ignored).
    pub fn same_invocation(&self, other: &Clause) -> bool {
        self.world == other.world && self.actor == other.actor && self.args == other.args
    }

    /// Draw random clauses until one is valid, up to [`SAMPLE_ATTEMPTS`] times.
    ///
    /// One value is drawn from each pool per attempt. Returns `None` when the
    /// budget runs out or a pool is empty. Only the returned clause takes an
    /// id from the world; rejected candidates leave no trace.
    pub fn sample_valid<R: Rng + ?Sized>(
        world: &World,
        rng: &mut R,
        truth_values: &[bool],
        actors: &[EntityId],
        actions: &[Action],
        arg_pools: &[Vec<Arg>],
    ) -> Option<Clause> {
        for attempt in 0..SAMPLE_ATTEMPTS {
            let truth_value = *truth_values.choose(rng)?;
            let actor = actors.choose(rng)?.clone();
            let action = *actions.choose(rng)?;
            let args = arg_pools
                .iter()
                .map(|pool| pool.choose(rng).cloned())
                .collect::<Option<Vec<_>>>()?;

            if action.is_valid(world, &actor, &args) {
                let clause = Clause::new(world, truth_value, actor, action, args);
                trace!(attempt, clause = %clause.id, "sampled valid clause");
                return Some(clause);
            }
        }
        debug!(attempts = SAMPLE_ATTEMPTS, "no valid clause found");
        None
    }
}

impl PartialEq for Clause {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Clause {}

impl Hash for Clause {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.truth_value {
            f.write_str("not ")?;
        }
        write!(f, "{} {}", self.actor, self.action)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
