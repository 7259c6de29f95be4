use super::migrations::TABLE_NAME;
use crate::tasks::types::{Task, TaskId};
use rusqlite::{params, Connection, Row};

const STATUS_INCOMPLETE: i64 = 0;
const STATUS_COMPLETE: i64 = 1;

fn status_value(completed: bool) -> i64 {
    if completed {
        STATUS_COMPLETE
    } else {
        STATUS_INCOMPLETE
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let text: Option<String> = row.get(1)?;
    let status: Option<i64> = row.get(2)?;
    Ok(Task {
        id: TaskId(row.get(0)?),
        text: text.unwrap_or_default(),
        completed: status.unwrap_or(STATUS_INCOMPLETE) != 0,
    })
}

/// Insert a new incomplete task and return it with its generated id
pub fn insert_task(conn: &Connection, text: &str) -> rusqlite::Result<Task> {
    conn.execute(
        &format!("INSERT INTO {TABLE_NAME} (TASK, STATUS) VALUES (?1, ?2)"),
        params![text, STATUS_INCOMPLETE],
    )?;

    Ok(Task::new(TaskId(conn.last_insert_rowid()), text))
}

/// Replace the text of a task. Returns the number of rows touched.
pub fn update_task_text(conn: &Connection, id: TaskId, text: &str) -> rusqlite::Result<usize> {
    conn.execute(
        &format!("UPDATE {TABLE_NAME} SET TASK = ?1 WHERE ID = ?2"),
        params![text, id.0],
    )
}

/// Replace the completed flag of a task. Returns the number of rows touched.
pub fn update_task_status(
    conn: &Connection,
    id: TaskId,
    completed: bool,
) -> rusqlite::Result<usize> {
    conn.execute(
        &format!("UPDATE {TABLE_NAME} SET STATUS = ?1 WHERE ID = ?2"),
        params![status_value(completed), id.0],
    )
}

pub fn delete_task(conn: &Connection, id: TaskId) -> rusqlite::Result<usize> {
    conn.execute(
        &format!("DELETE FROM {TABLE_NAME} WHERE ID = ?1"),
        params![id.0],
    )
}

/// Read every task, oldest first.
pub fn select_all_tasks(conn: &Connection) -> rusqlite::Result<Vec<Task>> {
    let tx = conn.unchecked_transaction()?;

    let tasks = {
        let mut stmt = tx.prepare(&format!(
            "SELECT ID, TASK, STATUS FROM {TABLE_NAME} ORDER BY ID ASC"
        ))?;
        let rows = stmt.query_map([], task_from_row)?;
        rows.collect::<rusqlite::Result<Vec<Task>>>()?
    };

    tx.finish()?;
    Ok(tasks)
}
