use chrono::NaiveDate;
use habit_core::{
    Clock, CompletionOutcome, HabitRepository, HabitService, HabitStore, JsonFileStore,
    StoreHabitRepository,
};
use std::cell::Cell;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Clock the test can move forward between calls.
struct SteppingClock(Cell<NaiveDate>);

impl SteppingClock {
    fn set(&self, date: NaiveDate) {
        self.0.set(date);
    }
}

impl Clock for SteppingClock {
    fn today(&self) -> NaiveDate {
        self.0.get()
    }
}

#[test]
fn create_complete_and_restart_trace() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("habits.json"));
    let clock = SteppingClock(Cell::new(day(2024, 6, 1)));
    let service = HabitService::new(StoreHabitRepository::new(&store), &clock);

    let habit = service.create_habit("Read").unwrap();
    assert_eq!(habit.streak, 0);

    let first = service.complete_habit(&habit.id).unwrap();
    assert_eq!(first.outcome, CompletionOutcome::Started);
    assert_eq!(first.habit.streak, 1);
    assert_eq!(first.habit.last_completed, Some(day(2024, 6, 1)));

    clock.set(day(2024, 6, 2));
    let second = service.complete_habit(&habit.id).unwrap();
    assert_eq!(second.outcome, CompletionOutcome::Extended(2));
    assert_eq!(second.habit.streak, 2);

    let repeat = service.complete_habit(&habit.id).unwrap();
    assert_eq!(repeat.outcome, CompletionOutcome::AlreadyCompleted);
    assert_eq!(repeat.habit, second.habit);

    clock.set(day(2024, 6, 5));
    let restarted = service.complete_habit(&habit.id).unwrap();
    assert_eq!(restarted.outcome, CompletionOutcome::Restarted);
    assert_eq!(restarted.habit.streak, 1);
    assert_eq!(restarted.habit.last_completed, Some(day(2024, 6, 5)));

    assert_eq!(store.read().unwrap(), vec![restarted.habit]);
}

#[test]
fn completion_only_touches_the_target_habit() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("habits.json"));
    let repo = StoreHabitRepository::new(&store);
    let clock = SteppingClock(Cell::new(day(2024, 6, 1)));
    let service = HabitService::new(StoreHabitRepository::new(&store), &clock);

    let a = service.create_habit("A").unwrap();
    let b = service.create_habit("B").unwrap();
    service.complete_habit(&b.id).unwrap();

    let habits = repo.list_habits().unwrap();
    assert_eq!(habits[0], a);
    assert_eq!(habits[1].streak, 1);
}

#[test]
fn same_day_repeat_does_not_rewrite_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.json");
    let store = JsonFileStore::new(&path);
    let repo = StoreHabitRepository::new(&store);

    let habit = repo
        .create_habit(&habit_core::Habit::with_id("h1", "Read").unwrap())
        .unwrap();
    repo.complete_habit(&habit.id, day(2024, 6, 1)).unwrap();

    // Replace the document with an equivalent compact form; a no-op completion
    // must leave these exact bytes in place.
    let compact = serde_json::to_string(&store.read().unwrap()).unwrap();
    std::fs::write(&path, &compact).unwrap();

    let repeat = repo.complete_habit(&habit.id, day(2024, 6, 1)).unwrap();
    assert_eq!(repeat.outcome, CompletionOutcome::AlreadyCompleted);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), compact);
}

#[test]
fn out_of_order_date_restarts_streak() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("habits.json"));
    let repo = StoreHabitRepository::new(&store);

    let habit = repo
        .create_habit(&habit_core::Habit::with_id("h1", "Read").unwrap())
        .unwrap();
    repo.complete_habit(&habit.id, day(2024, 6, 10)).unwrap();
    repo.complete_habit(&habit.id, day(2024, 6, 11)).unwrap();

    let earlier = repo.complete_habit(&habit.id, day(2024, 6, 9)).unwrap();
    assert_eq!(earlier.outcome, CompletionOutcome::Restarted);
    assert_eq!(earlier.habit.streak, 1);
    assert_eq!(earlier.habit.last_completed, Some(day(2024, 6, 9)));
}
