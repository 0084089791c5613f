use deskboard_core::db::open_db_in_memory;
use deskboard_core::store::{BoardStore, SqliteStore, ARCHIVE_LOAD_LIMIT};
use deskboard_core::{group_archived_batches, Task, TaskStatus};
use uuid::Uuid;

fn complete_tasks(titles: &[&str]) -> Vec<Task> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Task::new(*title, TaskStatus::Complete, i as i64))
        .collect()
}

#[test]
fn batches_load_newest_first_with_members_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let batch_a = Uuid::new_v4();
    let batch_b = Uuid::new_v4();
    store
        .archive_batch(&complete_tasks(&["a1", "a2"]), batch_a, 100)
        .unwrap();
    store
        .archive_batch(&complete_tasks(&["b1", "b2", "b3"]), batch_b, 200)
        .unwrap();

    let records = store.load_archived_tasks().unwrap();
    let batches = group_archived_batches(&records);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].batch_id, batch_b);
    assert_eq!(batches[0].archived_at, 200);
    let member_titles: Vec<&str> = batches[0].tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(member_titles, ["b1", "b2", "b3"]);

    assert_eq!(batches[1].batch_id, batch_a);
    let member_titles: Vec<&str> = batches[1].tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(member_titles, ["a1", "a2"]);
}

#[test]
fn archived_records_keep_the_original_creation_time() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let task = Task::new("old task", TaskStatus::Complete, 12345);
    store
        .archive_batch(std::slice::from_ref(&task), Uuid::new_v4(), 99999)
        .unwrap();

    let records = store.load_archived_tasks().unwrap();
    assert_eq!(records[0].id, task.id);
    assert_eq!(records[0].original_created_at, 12345);
    assert_eq!(records[0].archived_at, 99999);
}

#[test]
fn load_caps_at_the_most_recent_records() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    // Twelve batches of five: 60 records, 10 over the cap.
    for sweep in 0..12 {
        let titles: Vec<String> = (0..5).map(|i| format!("s{sweep}-t{i}")).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        store
            .archive_batch(&complete_tasks(&title_refs), Uuid::new_v4(), sweep * 1000)
            .unwrap();
    }

    let records = store.load_archived_tasks().unwrap();
    assert_eq!(records.len(), ARCHIVE_LOAD_LIMIT as usize);
    // Newest sweep first; the two oldest sweeps fell off.
    assert_eq!(records[0].archived_at, 11_000);
    assert!(records.iter().all(|r| r.archived_at >= 2000));
}

#[test]
fn empty_archive_loads_as_no_batches() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let records = store.load_archived_tasks().unwrap();
    assert!(records.is_empty());
    assert!(group_archived_batches(&records).is_empty());
}
