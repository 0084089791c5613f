use deskboard_core::db::open_db_in_memory;
use deskboard_core::store::{BoardStore, SqliteStore, StoreError};
use deskboard_core::{Task, TaskStatus};
use rusqlite::Connection;

/// Counts every insert/update/delete issued against `tasks` so the diffing
/// contract (only changed rows are written) is observable.
fn install_task_write_audit(conn: &Connection) {
    conn.execute_batch(
        "CREATE TEMP TABLE task_writes (op TEXT NOT NULL);
         CREATE TEMP TRIGGER audit_task_insert AFTER INSERT ON tasks
             BEGIN INSERT INTO task_writes (op) VALUES ('insert'); END;
         CREATE TEMP TRIGGER audit_task_update AFTER UPDATE ON tasks
             BEGIN INSERT INTO task_writes (op) VALUES ('update'); END;
         CREATE TEMP TRIGGER audit_task_delete AFTER DELETE ON tasks
             BEGIN INSERT INTO task_writes (op) VALUES ('delete'); END;",
    )
    .unwrap();
}

fn write_counts(conn: &Connection) -> (i64, i64, i64) {
    let count = |op: &str| -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM task_writes WHERE op = ?1;",
            [op],
            |row| row.get(0),
        )
        .unwrap()
    };
    (count("insert"), count("update"), count("delete"))
}

fn clear_audit(conn: &Connection) {
    conn.execute("DELETE FROM task_writes;", []).unwrap();
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteStore::try_new(&conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn tasks_roundtrip_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let tasks = vec![
        Task::new("second", TaskStatus::Todo, 200),
        Task::new("first", TaskStatus::InProgress, 100),
    ];
    store.save_tasks(&tasks).unwrap();

    let mut fresh = SqliteStore::try_new(&conn).unwrap();
    let loaded = fresh.load_tasks().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].title, "first");
    assert_eq!(loaded[1].title, "second");
}

#[test]
fn saving_the_loaded_sequence_issues_no_writes() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();
    store
        .save_tasks(&[
            Task::new("a", TaskStatus::Todo, 1),
            Task::new("b", TaskStatus::Complete, 2),
        ])
        .unwrap();

    install_task_write_audit(&conn);

    let mut fresh = SqliteStore::try_new(&conn).unwrap();
    let loaded = fresh.load_tasks().unwrap();
    fresh.save_tasks(&loaded).unwrap();

    assert_eq!(write_counts(&conn), (0, 0, 0));
}

#[test]
fn diff_save_issues_only_the_changed_rows() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let keep = Task::new("keep", TaskStatus::Todo, 1);
    let drop_me = Task::new("drop", TaskStatus::Todo, 2);
    let rename_me = Task::new("old title", TaskStatus::InProgress, 3);
    store
        .save_tasks(&[keep.clone(), drop_me.clone(), rename_me.clone()])
        .unwrap();

    install_task_write_audit(&conn);

    let mut renamed = rename_me.clone();
    renamed.title = "new title".to_string();
    let added = Task::new("added", TaskStatus::Complete, 4);
    store
        .save_tasks(&[keep.clone(), renamed.clone(), added.clone()])
        .unwrap();

    assert_eq!(write_counts(&conn), (1, 1, 1));

    let mut fresh = SqliteStore::try_new(&conn).unwrap();
    let loaded = fresh.load_tasks().unwrap();
    let titles: Vec<&str> = loaded.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["keep", "new title", "added"]);
}

#[test]
fn reorder_only_save_is_a_backend_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let a = Task::new("a", TaskStatus::Todo, 1);
    let b = Task::new("b", TaskStatus::Todo, 2);
    store.save_tasks(&[a.clone(), b.clone()]).unwrap();

    install_task_write_audit(&conn);

    // Same ids, same fields, different order: nothing to persist.
    store.save_tasks(&[b, a]).unwrap();
    assert_eq!(write_counts(&conn), (0, 0, 0));
}

#[test]
fn status_change_is_persisted_as_an_update() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteStore::try_new(&conn).unwrap();

    let mut task = Task::new("a", TaskStatus::Todo, 1);
    store.save_tasks(std::slice::from_ref(&task)).unwrap();

    install_task_write_audit(&conn);
    task.status = TaskStatus::Complete;
    store.save_tasks(std::slice::from_ref(&task)).unwrap();

    assert_eq!(write_counts(&conn), (0, 1, 0));
    clear_audit(&conn);

    let stored: String = conn
        .query_row("SELECT status FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, "complete");
}

#[test]
fn invalid_persisted_status_is_rejected_on_load() {
    let conn = open_db_in_memory().unwrap();
    conn.pragma_update(None, "ignore_check_constraints", true)
        .unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, status, created_at)
         VALUES ('8c5f9d8e-0000-0000-0000-000000000001', 'bad', 'done', 1);",
        [],
    )
    .unwrap();

    let mut store = SqliteStore::try_new(&conn).unwrap();
    let err = store.load_tasks().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}
