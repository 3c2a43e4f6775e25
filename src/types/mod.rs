mod models;
mod permission;
mod task;

pub use models::*;
pub use permission::{Permission, Role, Scope};
pub use task::{TaskStatus, task_input_id};
