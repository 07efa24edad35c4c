use serde::{Deserialize, Serialize};

/// Two-state task lifecycle: a task is either still open or done.
/// The wire names are exactly `"Pending"` and `"Completed"` — the browser
/// UI matches on them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Exact-match parse. Anything else (wrong case included) is not a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TaskStatus::Pending),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// A persisted task as stored and as serialized to clients.
///
/// `id` is a UUIDv4 string assigned at insert; `created_at` is RFC3339 UTC.
/// Both are set exactly once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Normalized create payload: title already trimmed and non-empty,
/// status resolved. Only `validate_create` should produce one of these
/// on the request path.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl NewTask {
    /// Build a create payload, defaulting status to `Pending` when absent.
    pub fn new(title: String, description: Option<String>, status: Option<TaskStatus>) -> Self {
        Self {
            title,
            description,
            status: status.unwrap_or(TaskStatus::Pending),
        }
    }
}

/// Sparse update: only fields present in the request are applied, so an
/// omitted `description` never clears the stored one. `None` here means
/// "leave untouched", not "set to null".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_as_str() {
        for status in [TaskStatus::Pending, TaskStatus::Completed] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_parse_is_exact_match() {
        assert_eq!(TaskStatus::parse("pending"), None);
        assert_eq!(TaskStatus::parse("COMPLETED"), None);
        assert_eq!(TaskStatus::parse("Done"), None);
        assert_eq!(TaskStatus::parse(""), None);
    }

    #[test]
    fn status_serde_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"Pending\""
        );
        let parsed: TaskStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn new_task_defaults_to_pending() {
        let task = NewTask::new("Buy milk".to_string(), None, None);
        assert_eq!(task.status, TaskStatus::Pending);

        let done = NewTask::new("Done".to_string(), None, Some(TaskStatus::Completed));
        assert_eq!(done.status, TaskStatus::Completed);
    }

    #[test]
    fn task_row_serializes_created_at_as_camel_case() {
        let row = TaskRow {
            id: "x".into(),
            title: "t".into(),
            description: None,
            status: "Pending".into(),
            created_at: "2026-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
