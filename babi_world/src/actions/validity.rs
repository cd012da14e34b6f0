//! Validity predicates, one per action.

use super::{Action, Arg};
use crate::{Direction, Entity, EntityId, World};

fn entity<'w>(world: &'w World, args: &[Arg], position: usize) -> Option<&'w Entity> {
    args.get(position)
        .and_then(Arg::as_entity)
        .and_then(|id| world.entity(id))
}

/// Both entities stand in the same known place.
fn colocated(a: &Entity, b: &Entity) -> bool {
    a.is_in.is_some() && a.is_in == b.is_in
}

fn is_god(world: &World, actor: &EntityId) -> bool {
    world.entity(actor).is_some_and(|a| a.is_god)
}

pub(super) fn get(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let (Some(a), Some(obj)) = (world.entity(actor), entity(world, args, 0)) else {
        return false;
    };
    if !(a.is_actor && obj.is_thing && obj.is_gettable && a.can_hold(obj)) {
        return false;
    }

    match args.get(1) {
        None => colocated(a, obj),
        Some(keyword) if keyword.is_word("from") => {
            let Some(source) = entity(world, args, 2).filter(|s| s.is_thing) else {
                return false;
            };
            source.id != a.id
                && colocated(a, source)
                && source.is_in.as_ref() != Some(&a.id)
                && obj.is_in.as_ref() == Some(&source.id)
        }
        Some(keyword) if keyword.is_word("count") => {
            args.get(2).and_then(Arg::as_number).is_some()
        }
        Some(_) => false,
    }
}

pub(super) fn drop(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let (Some(a), Some(obj)) = (world.entity(actor), entity(world, args, 0)) else {
        return false;
    };
    a.is_actor && obj.is_thing && obj.is_in.as_ref() == Some(&a.id)
}

/// Any literal names a new entity; numbers are taken by their display form.
pub(super) fn create(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let id = match args.first() {
        Some(Arg::Text(id)) => id.clone(),
        Some(number @ Arg::Number(_)) => number.to_string(),
        Some(Arg::Entity(_)) | None => return false,
    };
    is_god(world, actor) && !world.contains(&EntityId::new(id))
}

pub(super) fn set(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    is_god(world, actor) && entity(world, args, 0).is_some() && Action::set_target(args).is_ok()
}

pub(super) fn set_dir(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    if !is_god(world, actor) {
        return false;
    }
    let (Some(a), Some(b)) = (entity(world, args, 0), entity(world, args, 2)) else {
        return false;
    };
    if !(a.is_thing && b.is_thing) {
        return false;
    }
    let Some(direction) = args
        .get(1)
        .and_then(|arg| arg.to_string().parse::<Direction>().ok())
    else {
        return false;
    };
    let (Some((ax, ay, az)), Some((bx, by, bz))) = (a.position(), b.position()) else {
        return false;
    };
    let (dx, dy, dz) = (bx - ax, by - ay, bz - az);
    direction.axes().iter().all(|axis| axis.holds(dx, dy, dz))
}

pub(super) fn set_pos(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let numeric = |position: usize| args.get(position).and_then(Arg::as_number).is_some();
    is_god(world, actor)
        && entity(world, args, 0).is_some()
        && numeric(1)
        && numeric(2)
        && (args.get(3).is_none() || numeric(3))
}

pub(super) fn teleport(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let (Some(a), Some(dest)) = (world.entity(actor), entity(world, args, 0)) else {
        return false;
    };
    a.is_actor && a.is_god && dest.is_thing && a.is_in.as_ref() != Some(&dest.id)
}

pub(super) fn give(world: &World, actor: &EntityId, args: &[Arg]) -> bool {
    let (Some(a), Some(obj), Some(recipient)) = (
        world.entity(actor),
        entity(world, args, 0),
        entity(world, args, 1),
    ) else {
        return false;
    };
    a.id != recipient.id && colocated(a, recipient) && obj.is_in.as_ref() == Some(&a.id)
}
