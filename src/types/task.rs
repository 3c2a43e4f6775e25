use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lifecycle of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Claimed,
    Running,
    Done,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Claimed => "CLAIMED",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Done => "DONE",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "PENDING" => Some(TaskStatus::Pending),
            "CLAIMED" => Some(TaskStatus::Claimed),
            "RUNNING" => Some(TaskStatus::Running),
            "DONE" => Some(TaskStatus::Done),
            "FAILED" => Some(TaskStatus::Failed),
            "CANCELLED" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }

    /// Transitions a client may request through a status update.
    /// PENDING -> CLAIMED happens only through a claim.
    #[must_use]
    pub const fn can_update_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        matches!(
            (self, next),
            (Claimed, Running)
                | (Claimed, Pending)
                | (Running, Done)
                | (Running, Failed)
                | (Failed, Pending)
                | (Pending | Claimed | Running | Failed, Cancelled)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex SHA-256 of the canonical JSON form of a task input.
/// serde_json maps keep keys sorted, so key order in the request is irrelevant.
#[must_use]
pub fn task_input_id(task_input: &serde_json::Value) -> String {
    let canonical = task_input.to_string();
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_through_str() {
        for s in ["PENDING", "CLAIMED", "RUNNING", "DONE", "FAILED", "CANCELLED"] {
            assert_eq!(TaskStatus::parse(s).unwrap().as_str(), s);
        }
        assert_eq!(TaskStatus::parse("pending"), None);
    }

    #[test]
    fn test_allowed_transitions() {
        use TaskStatus::*;
        assert!(Claimed.can_update_to(Running));
        assert!(Claimed.can_update_to(Pending));
        assert!(Running.can_update_to(Done));
        assert!(Running.can_update_to(Failed));
        assert!(Failed.can_update_to(Pending));
        assert!(Pending.can_update_to(Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        use TaskStatus::*;
        assert!(!Pending.can_update_to(Claimed));
        assert!(!Pending.can_update_to(Done));
        assert!(!Running.can_update_to(Running));
        assert!(!Done.can_update_to(Pending));
        assert!(!Cancelled.can_update_to(Pending));
        assert!(Done.is_terminal());
        assert!(!Failed.is_terminal());
    }

    #[test]
    fn test_task_input_id_ignores_key_order() {
        let a: serde_json::Value = serde_json::from_str(r#"{"run": 1, "lane": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"lane": 2, "run": 1}"#).unwrap();
        assert_eq!(task_input_id(&a), task_input_id(&b));
        assert_eq!(task_input_id(&a).len(), 64);
        assert_ne!(task_input_id(&a), task_input_id(&json!({"run": 2, "lane": 2})));
    }
}
