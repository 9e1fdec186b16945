use routinex_core::ops::routine_ops;
use routinex_core::{Actor, MemoryStore, NewExerciseEntry, Routine};

pub const OWNER: &str = "userA";
pub const OTHER: &str = "userB";

/// Store with two catalog exercises and two known users
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.register_exercise("E1", "Squat").unwrap();
    store.register_exercise("E2", "Bench Press").unwrap();
    store.register_user(OWNER).unwrap();
    store.register_user(OTHER).unwrap();
    store
}

/// A routine owned by `OWNER` holding one E1 entry (10 x 3 @ 20kg)
#[allow(dead_code)]
pub fn routine_with_entry(store: &MemoryStore, name: &str) -> Routine {
    let owner = Actor::client(OWNER);
    let routine = routine_ops::create_routine(store, name, &owner).unwrap();
    routine_ops::add_exercise_entry(
        store,
        store,
        &routine.id,
        NewExerciseEntry::new("E1", 10, 3, 20.0),
        &owner,
    )
    .unwrap()
}
