use crate::server::response::ApiError;
use crate::types::Pipeline;

const MAX_FIELD_LEN: usize = 255;

fn validate_field(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("Pipeline {field} cannot be empty"));
    }
    if value.len() > MAX_FIELD_LEN {
        return Err(format!(
            "Pipeline {field} cannot exceed {MAX_FIELD_LEN} characters"
        ));
    }
    if value.chars().any(char::is_control) {
        return Err(format!("Pipeline {field} cannot contain control characters"));
    }
    Ok(())
}

pub fn validate_pipeline(pipeline: &Pipeline) -> Result<(), ApiError> {
    validate_field(&pipeline.name, "name")
        .and_then(|()| validate_field(&pipeline.version, "version"))
        .and_then(|()| validate_field(&pipeline.uri, "uri"))
        .map_err(ApiError::bad_request)
}

pub fn validate_task_input(task_input: &serde_json::Value) -> Result<(), ApiError> {
    if !task_input.is_object() {
        return Err(ApiError::bad_request("Task input must be a JSON object"));
    }
    Ok(())
}
