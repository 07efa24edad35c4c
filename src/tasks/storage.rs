//! The only module that touches the `tasks` table.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::error::TaskError;
use super::model::{NewTask, TaskPatch, TaskRow, TaskStatus};

#[derive(Clone)]
pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a task and return the persisted record. The store assigns
    /// `id` and `created_at`; neither is ever mutated afterwards.
    pub async fn create(&self, task: NewTask) -> Result<TaskRow, TaskError> {
        let id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TaskRow {
            id,
            title: task.title,
            description: task.description,
            status: task.status.as_str().to_string(),
            created_at: now,
        })
    }

    /// All tasks, newest first. Ordering is part of the API contract — the
    /// UI renders the listing as-is. Insertion order breaks timestamp ties.
    pub async fn list(&self, filter: Option<TaskStatus>) -> Result<Vec<TaskRow>, TaskError> {
        let rows = if let Some(status) = filter {
            sqlx::query_as(
                "SELECT * FROM tasks WHERE status = ? ORDER BY created_at DESC, rowid DESC",
            )
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as("SELECT * FROM tasks ORDER BY created_at DESC, rowid DESC")
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows)
    }

    /// Apply only the fields present in `patch` and return the record
    /// post-application. A single UPDATE statement keeps same-id races at
    /// last-writer-wins without any read-modify-write window.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<TaskRow, TaskError> {
        let id = well_formed(id)?;
        let affected = sqlx::query(
            "UPDATE tasks SET
                 title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 status = COALESCE(?, status)
             WHERE id = ?",
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(&id)
        .execute(&self.pool)
        .await?
        .rows_affected();
        if affected == 0 {
            return Err(TaskError::NotFound);
        }

        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?;
        // A concurrent delete can win between the UPDATE and this read.
        row.ok_or(TaskError::NotFound)
    }

    /// Permanent and immediate — no soft delete.
    pub async fn delete(&self, id: &str) -> Result<(), TaskError> {
        let id = well_formed(id)?;
        let affected = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(&id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        if affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }
}

/// The store keys tasks by UUIDv4 strings, so anything that does not parse
/// as a UUID can never name a record and is rejected before touching the
/// pool. Lookups use the canonical hyphenated lowercase form.
fn well_formed(id: &str) -> Result<String, TaskError> {
    Uuid::parse_str(id)
        .map(|u| u.to_string())
        .map_err(|_| TaskError::InvalidId)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
