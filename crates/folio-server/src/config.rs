use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use folio_cms::{CmsConfig, Environment};
use folio_validate::NameRules;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 4567;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `data/`, `users.toml` and `test/`.
    pub root: PathBuf,
    pub environment: Environment,
    pub name_rules: NameRules,
    pub extended_markdown: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            root: PathBuf::from("."),
            environment: Environment::Production,
            name_rules: NameRules::default(),
            extended_markdown: false,
        }
    }
}

impl ServerConfig {
    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    /// The service configuration this server runs with.
    pub fn cms_config(&self) -> CmsConfig {
        CmsConfig {
            root: self.root.clone(),
            environment: self.environment,
            name_rules: self.name_rules.clone(),
            extended_markdown: self.extended_markdown,
        }
    }
}
