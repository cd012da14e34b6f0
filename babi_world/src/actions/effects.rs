//! World mutations, one per action. None of these check validity.

use super::{entity_at, integer_at, Action, Arg, RelationValue};
use crate::{Direction, EntityId, Relation, World, WorldError};

/// Move `delta` of carried capacity onto `holder`, if there is one.
fn shift_carry(world: &mut World, holder: Option<&EntityId>, delta: i64) -> Result<(), WorldError> {
    if let Some(holder) = holder {
        world.require_mut(holder)?.carry += delta;
    }
    Ok(())
}

pub(super) fn get(world: &mut World, actor: &EntityId, args: &[Arg]) -> Result<(), WorldError> {
    let obj = entity_at(args, 0, "get")?;
    let size = world.require(obj)?.size;

    world.require_mut(obj)?.is_in = Some(actor.clone());
    world.require_mut(actor)?.carry += size;

    if args.get(1).is_some_and(|a| a.is_word("from")) {
        let source = entity_at(args, 2, "get")?;
        world.require_mut(source)?.carry -= size;
    }
    Ok(())
}

pub(super) fn drop(world: &mut World, actor: &EntityId, args: &[Arg]) -> Result<(), WorldError> {
    let obj = entity_at(args, 0, "drop")?;
    let location = world.require(actor)?.is_in.clone();
    let size = world.require(obj)?.size;

    world.require_mut(obj)?.is_in = location;
    world.require_mut(actor)?.carry -= size;
    Ok(())
}

pub(super) fn create(world: &mut World, args: &[Arg]) -> Result<(), WorldError> {
    let id = match args.first() {
        Some(Arg::Text(id)) => id.clone(),
        Some(Arg::Entity(id)) => return Err(WorldError::DuplicateEntity(id.clone())),
        Some(other) => other.to_string(),
        None => {
            return Err(WorldError::MissingArgument {
                action: "create",
                position: 0,
            })
        }
    };
    world.create_entity(id)?;
    Ok(())
}

pub(super) fn set(world: &mut World, args: &[Arg]) -> Result<(), WorldError> {
    let target = entity_at(args, 0, "set")?;
    let (relation, value) = Action::set_target(args)?;

    match (relation, value) {
        (Relation::IsIn, RelationValue::Entity(container)) => {
            let entity = world.require(target)?;
            let (size, old) = (entity.size, entity.is_in.clone());
            world.require(&container)?;

            shift_carry(world, old.as_ref(), -size)?;
            shift_carry(world, Some(&container), size)?;
            world.require_mut(target)?.is_in = Some(container);
        }
        (Relation::Neighbor(direction), RelationValue::Entity(other)) => {
            world.require_mut(target)?.neighbors.insert(direction, other);
        }
        (Relation::Flag(capability), RelationValue::Flag(flag)) => {
            world.require_mut(target)?.set_flag(capability, flag);
        }
        (Relation::Size, RelationValue::Number(n)) => world.require_mut(target)?.size = n,
        (Relation::X, RelationValue::Number(n)) => world.require_mut(target)?.x = Some(n),
        (Relation::Y, RelationValue::Number(n)) => world.require_mut(target)?.y = Some(n),
        (Relation::Z, RelationValue::Number(n)) => world.require_mut(target)?.z = Some(n),
        (relation, value) => {
            return Err(WorldError::InvalidArgument {
                action: "set",
                position: 2,
                reason: format!("{:?} does not fit relation '{}'", value, relation),
            })
        }
    }
    Ok(())
}

pub(super) fn set_dir(world: &mut World, args: &[Arg]) -> Result<(), WorldError> {
    let a = entity_at(args, 0, "set_dir")?;
    let b = entity_at(args, 2, "set_dir")?;
    let direction = match args.get(1) {
        Some(arg) => arg.to_string().parse::<Direction>()?,
        None => {
            return Err(WorldError::MissingArgument {
                action: "set_dir",
                position: 1,
            })
        }
    };
    world.require(b)?;

    world.require_mut(a)?.neighbors.insert(direction, b.clone());
    world
        .require_mut(b)?
        .neighbors
        .insert(direction.opposite(), a.clone());
    Ok(())
}

pub(super) fn set_pos(world: &mut World, args: &[Arg]) -> Result<(), WorldError> {
    let target = entity_at(args, 0, "set_pos")?;
    let x = integer_at(args, 1, "set_pos")?;
    let y = integer_at(args, 2, "set_pos")?;
    let z = match args.get(3) {
        Some(_) => integer_at(args, 3, "set_pos")?,
        None => 0,
    };

    let entity = world.require_mut(target)?;
    entity.x = Some(x);
    entity.y = Some(y);
    entity.z = Some(z);
    Ok(())
}

pub(super) fn teleport(world: &mut World, actor: &EntityId, args: &[Arg]) -> Result<(), WorldError> {
    let dest = entity_at(args, 0, "teleport")?;
    world.require(dest)?;
    let entity = world.require(actor)?;
    let (size, old) = (entity.size, entity.is_in.clone());

    shift_carry(world, old.as_ref(), -size)?;
    world.require_mut(actor)?.is_in = Some(dest.clone());
    shift_carry(world, Some(dest), size)?;
    Ok(())
}

pub(super) fn give(world: &mut World, actor: &EntityId, args: &[Arg]) -> Result<(), WorldError> {
    let obj = entity_at(args, 0, "give")?;
    let recipient = entity_at(args, 1, "give")?;
    world.require(recipient)?;
    let size = world.require(obj)?.size;

    world.require_mut(obj)?.is_in = Some(recipient.clone());
    shift_carry(world, Some(actor), -size)?;
    shift_carry(world, Some(recipient), size)?;
    Ok(())
}
