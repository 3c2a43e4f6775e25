mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::*;

/// Optional filters for task listings.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub pipeline_name: Option<String>,
    pub pipeline_version: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Store defines the database interface. Handlers receive it through
/// `AppState`; nothing holds a global connection.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Pipeline operations
    fn create_pipeline(&self, pipeline: &Pipeline) -> Result<()>;
    fn get_pipeline(&self, name: &str, version: &str) -> Result<Option<Pipeline>>;
    fn find_pipelines(&self, name: &str, version: Option<&str>) -> Result<Vec<Pipeline>>;
    fn list_pipelines(&self, uri: Option<&str>) -> Result<Vec<Pipeline>>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    /// Looks a token up by its exact string value, with its pipeline scope.
    fn get_token(&self, value: &str) -> Result<Option<Token>>;
    fn get_token_by_id(&self, id: &str) -> Result<Option<Token>>;
    fn list_tokens(&self) -> Result<Vec<Token>>;
    /// Sets date_revoked unless already set. Returns false if nothing changed.
    fn revoke_token(&self, id: &str, date: NaiveDate) -> Result<bool>;
    fn has_power_user_token(&self) -> Result<bool>;

    // Task operations
    fn create_task(&self, task: &Task, token_id: &str) -> Result<()>;
    fn get_task(&self, pipeline: &Pipeline, task_input_id: &str) -> Result<Option<Task>>;
    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
    fn claim_tasks(&self, pipeline: &Pipeline, limit: u32, token_id: &str) -> Result<Vec<Task>>;
    fn update_task_status(
        &self,
        task: &Task,
        status: TaskStatus,
        token_id: &str,
    ) -> Result<Task>;
    fn list_task_events(&self, task_id: &str) -> Result<Vec<Event>>;
}
