use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use folio_validate::NameRules;
use serde::{Deserialize, Serialize};

/// Environment variable that selects the [`Environment`].
pub const ENV_VAR: &str = "FOLIO_ENV";

/// Which set of content and credentials to use under the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    /// Isolated content under `<root>/test`, for test suites.
    Test,
}

impl Environment {
    /// Read [`ENV_VAR`]. `None` when unset or unrecognised.
    pub fn from_env() -> Option<Self> {
        let value = std::env::var(ENV_VAR).ok()?;
        match value.parse() {
            Ok(environment) => Some(environment),
            Err(_) => {
                tracing::warn!("ignoring unrecognised {ENV_VAR}={value:?}");
                None
            }
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Test => write!(f, "test"),
        }
    }
}

/// Where Folio keeps its documents and credentials, and how it treats them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Root under which the environment's directories live.
    pub root: PathBuf,
    pub environment: Environment,
    /// Rules for names of newly created documents.
    pub name_rules: NameRules,
    /// Enable tables, strikethrough and task lists in markdown.
    pub extended_markdown: bool,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            environment: Environment::Production,
            name_rules: NameRules::default(),
            extended_markdown: false,
        }
    }
}

impl CmsConfig {
    pub fn new(root: impl Into<PathBuf>, environment: Environment) -> Self {
        Self {
            root: root.into(),
            environment,
            ..Self::default()
        }
    }

    fn environment_root(&self) -> PathBuf {
        match self.environment {
            Environment::Production => self.root.clone(),
            Environment::Test => self.root.join("test"),
        }
    }

    /// The content directory.
    pub fn data_dir(&self) -> PathBuf {
        self.environment_root().join("data")
    }

    /// The credential file.
    pub fn credentials_path(&self) -> PathBuf {
        self.environment_root().join("users.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = CmsConfig::default();
        assert_eq!(c.environment, Environment::Production);
        assert_eq!(c.data_dir(), PathBuf::from("./data"));
        assert_eq!(c.credentials_path(), PathBuf::from("./users.toml"));
        assert_eq!(c.name_rules, NameRules::default());
    }

    #[test]
    fn test_environment_is_isolated() {
        let c = CmsConfig::new("/srv/folio", Environment::Test);
        assert_eq!(c.data_dir(), PathBuf::from("/srv/folio/test/data"));
        assert_eq!(c.credentials_path(), PathBuf::from("/srv/folio/test/users.toml"));
    }

    #[test]
    fn environment_parsing() {
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Test));
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::Test.to_string(), "test");
    }

    #[test]
    fn config_from_toml() {
        let c: CmsConfig = toml::from_str(
            r#"
            root = "/var/lib/folio"
            environment = "test"
            extended_markdown = true

            [name_rules]
            allowed_extensions = ["md"]
            "#,
        )
        .unwrap();
        assert_eq!(c.environment, Environment::Test);
        assert!(c.extended_markdown);
        assert_eq!(c.name_rules.allowed_extensions, vec!["md".to_string()]);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c: CmsConfig = toml::from_str("root = \"/tmp/x\"").unwrap();
        assert_eq!(c.environment, Environment::Production);
        assert_eq!(c.name_rules, NameRules::default());
    }
}
