use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Optional config file, looked up inside the data directory.
pub const CONFIG_FILE: &str = "porch.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip)]
    pub data_dir: PathBuf,
}

impl ServerConfig {
    /// Loads `porch.toml` from `data_dir` if present, defaults otherwise.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let path = data_dir.join(CONFIG_FILE);

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<ServerConfig>(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        } else {
            ServerConfig::default()
        };

        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("porch.db")
    }

    #[must_use]
    pub fn admin_token_path(&self) -> PathBuf {
        self.data_dir.join(".admin_token")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
        }
    }
}
