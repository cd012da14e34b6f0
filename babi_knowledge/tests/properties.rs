//! Property tests over randomly sampled stories.
//!
//! Each case seeds a `Pcg64`, samples valid clauses against a small world,
//! performs them and feeds them to the store, then checks the store's
//! invariants.

use babi_knowledge::{BeliefTable, Knowledge, KnowledgeConfig};
use babi_world::{Action, Arg, Capability, Clause, Entity, EntityId, Relation, World};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const PEOPLE: [&str; 2] = ["john", "mary"];
const PLACES: [&str; 3] = ["kitchen", "garden", "hallway"];
const THINGS: [&str; 2] = ["milk", "apple"];

fn world() -> World {
    let mut world = World::new();
    for id in PEOPLE {
        world
            .add_entity(Entity::new(id).with(Capability::Actor).with_size(3))
            .unwrap();
    }
    world
        .add_entity(
            Entity::new("wizard")
                .with(Capability::Actor)
                .with(Capability::God)
                .with_size(2),
        )
        .unwrap();
    for id in PLACES {
        world
            .add_entity(Entity::new(id).with(Capability::Location).with_size(100))
            .unwrap();
    }
    for id in THINGS {
        world
            .add_entity(Entity::new(id).with(Capability::Gettable).with_size(1))
            .unwrap();
    }
    world
        .load_str(
            "set john is_in kitchen
             set mary is_in kitchen
             set wizard is_in garden
             set milk is_in kitchen
             set apple is_in garden",
        )
        .unwrap();
    world
}

fn pool(ids: &[&str]) -> Vec<Arg> {
    ids.iter().map(|id| Arg::entity(*id)).collect()
}

fn total_carry(world: &World) -> i64 {
    world.entities().map(|e| e.carry).sum()
}

/// Size of whatever the clause moves.
fn moved_size(world: &World, clause: &Clause) -> i64 {
    let moved = match clause.action {
        Action::Teleport => Some(&clause.actor),
        _ => clause.args.first().and_then(Arg::as_entity),
    };
    moved
        .and_then(|id| world.entity(id))
        .map_or(0, |e| e.size)
}

/// Sample, perform and record `steps` clauses; returns each performed
/// clause with the total carry before and after it.
fn run_story(seed: u64, steps: usize) -> (World, Knowledge, Vec<(Clause, i64, i64)>) {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut world = world();
    let mut knowledge = Knowledge::with_config(&KnowledgeConfig::standard());

    let actors: Vec<EntityId> = ["john", "mary", "wizard"].into_iter().map(EntityId::new).collect();
    let everything: Vec<&str> = PEOPLE.iter().chain(&PLACES).chain(&THINGS).copied().collect();
    let mut performed = Vec::new();

    for _ in 0..steps {
        let sampled = if rng.gen_bool(0.3) {
            Clause::sample_valid(
                &world,
                &mut rng,
                &[true, false],
                &actors,
                &[Action::Give],
                &[pool(&THINGS), pool(&PEOPLE)],
            )
        } else {
            Clause::sample_valid(
                &world,
                &mut rng,
                &[true, true, false],
                &actors,
                &[Action::Get, Action::Drop, Action::Teleport],
                &[pool(&everything)],
            )
        };
        let Some(clause) = sampled else {
            continue;
        };

        let before = total_carry(&world);
        clause.perform(&mut world).unwrap();
        let after = total_carry(&world);
        knowledge.update(&mut world, clause.clone()).unwrap();
        performed.push((clause, before, after));
    }
    (world, knowledge, performed)
}

fn exclusive_ok(table: &BeliefTable) -> bool {
    table.entities().all(|id| {
        table
            .entity(id)
            .facts(Relation::IsIn)
            .iter()
            .filter(|f| f.truth_value)
            .count()
            <= 1
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exclusive_relation_has_one_true_value(seed in any::<u64>(), steps in 1usize..40) {
        let (_, knowledge, _) = run_story(seed, steps);
        for t in 1..=knowledge.timestep() {
            let table = knowledge.table(t).unwrap();
            prop_assert!(exclusive_ok(table));
            prop_assert!(table.find(Relation::IsIn, None).is_ok());
        }
    }

    #[test]
    fn earlier_snapshots_never_change(seed in any::<u64>(), steps in 1usize..40) {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut world = world();
        let mut knowledge = Knowledge::with_config(&KnowledgeConfig::standard());
        let actors: Vec<EntityId> = PEOPLE.into_iter().map(EntityId::new).collect();
        let mut snapshots: Vec<BeliefTable> = Vec::new();

        for _ in 0..steps {
            let Some(clause) = Clause::sample_valid(
                &world,
                &mut rng,
                &[true, false],
                &actors,
                &[Action::Get, Action::Drop],
                &[pool(&THINGS)],
            ) else {
                continue;
            };
            clause.perform(&mut world).unwrap();
            knowledge.update(&mut world, clause).unwrap();
            snapshots.push(knowledge.current().unwrap().clone());

            for (index, snapshot) in snapshots.iter().enumerate() {
                prop_assert_eq!(knowledge.table(index + 1).unwrap(), snapshot);
            }
        }
    }

    #[test]
    fn history_never_repeats(seed in any::<u64>(), steps in 1usize..40) {
        let (world, knowledge, _) = run_story(seed, steps);
        for id in PEOPLE.iter().chain(&THINGS).chain(&["wizard"]) {
            let id = EntityId::new(*id);
            for resolve in [true, false] {
                let history = knowledge.value_history(&world, &id, Relation::IsIn, resolve).unwrap();
                for pair in history.windows(2) {
                    prop_assert_ne!(&pair[0].0, &pair[1].0);
                }
            }
        }
    }

    #[test]
    fn carry_moves_by_at_most_the_moved_size(seed in any::<u64>(), steps in 1usize..40) {
        let (world, _, performed) = run_story(seed, steps);
        for (clause, before, after) in performed {
            let delta = (after - before).abs();
            let size = moved_size(&world, &clause);
            prop_assert!(delta == 0 || delta == size, "{}: carry moved by {}", clause, delta);
        }
    }

    #[test]
    fn sampling_without_valid_clause_gives_up(seed in any::<u64>()) {
        let world = world();
        let mut rng = Pcg64::seed_from_u64(seed);
        let before = world.next_clause_id();

        // Locations never act.
        let sampled = Clause::sample_valid(
            &world,
            &mut rng,
            &[true, false],
            &[EntityId::new("kitchen")],
            &[Action::Get, Action::Drop, Action::Give],
            &[pool(&THINGS), pool(&PEOPLE)],
        );
        prop_assert!(sampled.is_none());

        let after = world.next_clause_id();
        prop_assert_eq!(after.0, before.0 + 1);
    }
}
