pub mod dto;
mod pipelines;
pub mod response;
mod router;
mod tasks;
pub mod validation;

pub use pipelines::pipeline_router;
pub use router::{AppState, create_router};
pub use tasks::task_router;
