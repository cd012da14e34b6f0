//! How each action is reflected in belief state.

use babi_world::{Action, Clause, Direction, EntityId, Relation, World};

use crate::{support, BeliefTable, KnowledgeError, Support, Value};

/// Knowledge-update half of the action protocol.
pub trait ActionKnowledge {
    /// Record what `clause` tells us in `table`.
    fn update_knowledge(
        &self,
        world: &World,
        table: &mut BeliefTable,
        clause: &Clause,
    ) -> Result<(), KnowledgeError>;
}

impl ActionKnowledge for Action {
    fn update_knowledge(
        &self,
        _world: &World,
        table: &mut BeliefTable,
        clause: &Clause,
    ) -> Result<(), KnowledgeError> {
        let because = support([clause.id]);
        match self {
            Action::Get => get(table, clause, because),
            Action::Drop => drop(table, clause, because),
            Action::Create => Ok(()),
            Action::Set => set(table, clause, because),
            Action::SetDir => set_dir(table, clause, because),
            Action::SetPos => set_pos(table, clause, because),
            Action::Teleport => teleport(table, clause, because),
            Action::Give => give(table, clause, because),
        }
    }
}

fn get(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    if clause.truth_value {
        let obj = clause.entity_arg(0)?;
        table
            .entity_mut(obj)
            .set(Relation::IsIn, Value::from(&clause.actor), true, because);
    }
    Ok(())
}

fn drop(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    if !clause.truth_value {
        return Ok(());
    }
    let obj = clause.entity_arg(0)?;
    let carried = table.entity(&clause.actor).facts(Relation::IsIn).to_vec();
    let mut beliefs = table.entity_mut(obj);
    if carried.is_empty() {
        beliefs.rawset(Relation::IsIn, &[], None);
    } else {
        beliefs.rawset(Relation::IsIn, &carried, Some(&because));
    }
    Ok(())
}

fn set(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    let target = clause.entity_arg(0)?;
    let (relation, value) = Action::set_target(&clause.args)?;
    table
        .entity_mut(target)
        .set(relation, value.into(), clause.truth_value, because);
    Ok(())
}

fn set_dir(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    if !clause.truth_value {
        return Ok(());
    }
    let a = clause.entity_arg(0)?;
    let b = clause.entity_arg(2)?;
    let direction: Direction = clause
        .args
        .get(1)
        .map(|arg| arg.to_string())
        .unwrap_or_default()
        .parse()?;

    table
        .entity_mut(a)
        .add(Relation::Neighbor(direction), Value::from(b), true, because.clone());
    table
        .entity_mut(b)
        .add(Relation::Neighbor(direction.opposite()), Value::from(a), true, because);
    Ok(())
}

fn set_pos(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    let target = clause.entity_arg(0)?;
    let x = clause.integer_arg(1)?;
    let y = clause.integer_arg(2)?;
    let z = match clause.args.get(3) {
        Some(_) => clause.integer_arg(3)?,
        None => 0,
    };

    let mut beliefs = table.entity_mut(target);
    beliefs.set(Relation::X, Value::Int(x), true, because.clone());
    beliefs.set(Relation::Y, Value::Int(y), true, because.clone());
    beliefs.set(Relation::Z, Value::Int(z), true, because);
    Ok(())
}

fn teleport(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    if clause.truth_value {
        let dest = clause.entity_arg(0)?;
        table
            .entity_mut(&clause.actor)
            .set(Relation::IsIn, Value::from(dest), true, because);
    }
    Ok(())
}

/// The object ends up with the recipient, and giver and recipient learn
/// where the other one is. Nothing here depends on the clause's truth value.
fn give(table: &mut BeliefTable, clause: &Clause, because: Support) -> Result<(), KnowledgeError> {
    let obj = clause.entity_arg(0)?;
    let recipient = clause.entity_arg(1)?;
    let giver: &EntityId = &clause.actor;

    table
        .entity_mut(obj)
        .set(Relation::IsIn, Value::from(recipient), true, because.clone());

    let giver_facts = table.entity(giver).facts(Relation::IsIn).to_vec();
    let recipient_facts = table.entity(recipient).facts(Relation::IsIn).to_vec();
    table
        .entity_mut(giver)
        .merge(Relation::IsIn, &recipient_facts, &because);
    table
        .entity_mut(recipient)
        .merge(Relation::IsIn, &giver_facts, &because);
    Ok(())
}
