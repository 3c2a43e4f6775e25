mod server;

pub use server::{CONFIG_FILE, ServerConfig};
