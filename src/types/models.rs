use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, TaskStatus};

/// A named, versioned pipeline definition. (name, version) is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub uri: String,
    pub version: String,
}

impl Pipeline {
    /// True if both values refer to the same pipeline release.
    #[must_use]
    pub fn same_release(&self, other: &Pipeline) -> bool {
        self.name == other.name && self.version == other.version
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(skip)]
    pub token: String,
    pub description: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Pipeline>,
    pub date_issued: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_revoked: Option<NaiveDate>,
}

impl Token {
    /// The revocation date, if the token is already revoked on `day`.
    /// A token is unusable from its revocation date onwards.
    #[must_use]
    pub fn revoked_as_of(&self, day: NaiveDate) -> Option<NaiveDate> {
        self.date_revoked.filter(|revoked| *revoked <= day)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub pipeline: Pipeline,
    pub task_input_id: String,
    pub task_input: serde_json::Value,
    pub status: TaskStatus,
    #[serde(skip)]
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a task's status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub task_id: String,
    pub token_id: String,
    pub status: TaskStatus,
    pub change: String,
    pub time: DateTime<Utc>,
}
