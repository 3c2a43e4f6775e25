use serde::Deserialize;

use crate::types::{Pipeline, TaskStatus};

#[derive(Debug, Default, Deserialize)]
pub struct ListPipelinesParams {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetPipelineParams {
    #[serde(default)]
    pub pipeline_version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListTasksParams {
    #[serde(default)]
    pub pipeline_name: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClaimParams {
    #[serde(default)]
    pub num_tasks: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub pipeline: Pipeline,
    pub task_input: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub pipeline: Pipeline,
    pub task_input: serde_json::Value,
    pub status: TaskStatus,
}
