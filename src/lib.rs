//! # Porch
//!
//! Pipeline orchestration: a work-allocation and tracking service. Pipeline
//! runners register pipelines, queue tasks, claim them and report progress
//! over a JSON API authenticated by bearer tokens.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use porch::server::{AppState, create_router};
//! use porch::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/porch.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `porch` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
