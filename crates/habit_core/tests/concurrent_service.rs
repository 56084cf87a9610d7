use chrono::NaiveDate;
use habit_core::{FixedClock, HabitService, HabitStore, JsonFileStore, StoreHabitRepository};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const WORKERS: usize = 32;

#[test]
fn parallel_create_and_complete_lose_no_updates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let service = Arc::new(HabitService::new(
        StoreHabitRepository::new(JsonFileStore::new(&path)),
        FixedClock(today),
    ));
    let barrier = Arc::new(Barrier::new(WORKERS));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let habit = service.create_habit(&format!("habit-{worker}")).unwrap();
                service.complete_habit(&habit.id).unwrap();
                habit.id
            })
        })
        .collect();
    let ids: HashSet<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let stored = JsonFileStore::new(&path).read().unwrap();
    assert_eq!(stored.len(), WORKERS);
    assert_eq!(
        stored.iter().map(|h| h.id.clone()).collect::<HashSet<_>>(),
        ids
    );
    assert!(stored
        .iter()
        .all(|h| h.streak == 1 && h.last_completed == Some(today)));
}
