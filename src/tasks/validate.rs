//! Gatekeeping for create and update payloads before any store interaction.
//!
//! Write paths are strict: a missing or blank title and any status outside
//! the enum are rejected. The read-path status filter is deliberately
//! lenient — an unrecognized value behaves as "no filter" instead of being
//! rejected, matching how the UI drops its filter when cleared.

use serde::Deserialize;

use super::error::TaskError;
use super::model::{NewTask, TaskPatch, TaskStatus};

/// Inbound body for `POST /api/tasks`. All fields optional at the parse
/// layer so validation (not deserialization) owns the error messages.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Inbound body for `PUT /api/tasks/{id}`. Every field optional; absent
/// fields are never applied (sparse-update contract).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

pub fn validate_create(req: CreateTaskRequest) -> Result<NewTask, TaskError> {
    let title = req.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(TaskError::validation("Title is required"));
    }
    let status = req
        .status
        .as_deref()
        .map(|s| TaskStatus::parse(s).ok_or_else(|| TaskError::validation("Invalid status value")))
        .transpose()?;
    Ok(NewTask::new(title.to_string(), req.description, status))
}

pub fn validate_update(req: UpdateTaskRequest) -> Result<TaskPatch, TaskError> {
    let mut patch = TaskPatch::default();
    if let Some(title) = req.title {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(TaskError::validation("Title cannot be empty"));
        }
        patch.title = Some(trimmed.to_string());
    }
    // Present-but-empty description is a real value; absent leaves the
    // stored one alone.
    patch.description = req.description;
    if let Some(status) = req.status.as_deref() {
        patch.status = Some(
            TaskStatus::parse(status).ok_or_else(|| TaskError::validation("Invalid status value"))?,
        );
    }
    Ok(patch)
}

/// Narrow a listing to one status only when the query value is exactly an
/// enum name; anything else means no filter.
pub fn parse_status_filter(query: Option<&str>) -> Option<TaskStatus> {
    query.and_then(TaskStatus::parse)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn create_trims_title() {
        let req = CreateTaskRequest {
            title: Some("  Buy milk  ".into()),
            ..Default::default()
        };
        let task = validate_create(req).unwrap();
        assert_eq!(task.title, "Buy milk");
    }

    #[test]
    fn create_defaults_status_to_pending() {
        let req = CreateTaskRequest {
            title: Some("Buy milk".into()),
            ..Default::default()
        };
        assert_eq!(validate_create(req).unwrap().status, TaskStatus::Pending);
    }

    #[test]
    fn create_accepts_explicit_status() {
        let req = CreateTaskRequest {
            title: Some("Done already".into()),
            status: Some("Completed".into()),
            ..Default::default()
        };
        assert_eq!(validate_create(req).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn create_rejects_missing_title() {
        let err = validate_create(CreateTaskRequest::default()).unwrap_err();
        assert!(matches!(err, TaskError::Validation(m) if m == "Title is required"));
    }

    #[test]
    fn create_rejects_unknown_status() {
        let req = CreateTaskRequest {
            title: Some("Buy milk".into()),
            status: Some("Archived".into()),
            ..Default::default()
        };
        let err = validate_create(req).unwrap_err();
        assert!(matches!(err, TaskError::Validation(m) if m == "Invalid status value"));
    }

    #[test]
    fn update_with_empty_body_touches_nothing() {
        let patch = validate_update(UpdateTaskRequest::default()).unwrap();
        assert_eq!(patch, TaskPatch::default());
    }

    #[test]
    fn update_rejects_blank_title() {
        let req = UpdateTaskRequest {
            title: Some("   ".into()),
            ..Default::default()
        };
        let err = validate_update(req).unwrap_err();
        assert!(matches!(err, TaskError::Validation(m) if m == "Title cannot be empty"));
    }

    #[test]
    fn update_rejects_unknown_status() {
        let req = UpdateTaskRequest {
            status: Some("InProgress".into()),
            ..Default::default()
        };
        assert!(validate_update(req).is_err());
    }

    #[test]
    fn update_distinguishes_absent_from_empty_description() {
        let absent = validate_update(UpdateTaskRequest::default()).unwrap();
        assert_eq!(absent.description, None);

        let emptied = validate_update(UpdateTaskRequest {
            description: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(emptied.description, Some(String::new()));
    }

    #[test]
    fn update_trims_title() {
        let patch = validate_update(UpdateTaskRequest {
            title: Some(" Walk dog ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(patch.title.as_deref(), Some("Walk dog"));
    }

    #[test]
    fn filter_accepts_only_exact_enum_names() {
        assert_eq!(parse_status_filter(Some("Pending")), Some(TaskStatus::Pending));
        assert_eq!(
            parse_status_filter(Some("Completed")),
            Some(TaskStatus::Completed)
        );
        assert_eq!(parse_status_filter(Some("pending")), None);
        assert_eq!(parse_status_filter(Some("anything")), None);
        assert_eq!(parse_status_filter(None), None);
    }

    proptest! {
        #[test]
        fn whitespace_only_titles_never_create(title in "[ \t\r\n]{0,16}") {
            let req = CreateTaskRequest {
                title: Some(title),
                ..Default::default()
            };
            prop_assert!(matches!(
                validate_create(req),
                Err(TaskError::Validation(_))
            ));
        }

        #[test]
        fn unknown_status_rejected_on_write_ignored_on_read(status in "[A-Za-z]{1,12}") {
            prop_assume!(status != "Pending" && status != "Completed");

            let create = CreateTaskRequest {
                title: Some("t".into()),
                status: Some(status.clone()),
                ..Default::default()
            };
            prop_assert!(validate_create(create).is_err());

            let update = UpdateTaskRequest {
                status: Some(status.clone()),
                ..Default::default()
            };
            prop_assert!(validate_update(update).is_err());

            prop_assert_eq!(parse_status_filter(Some(&status)), None);
        }
    }
}
