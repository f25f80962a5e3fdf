use crate::error::ConfigError;
use crate::types::TableName;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment keys read without a prefix.
const DB_KEYS: &[&str] = &["db_name", "db_user", "db_password", "db_host"];
const ENV_PREFIX: &str = "HOOKSINK_";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbSettings {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            name: "hooksink".to_string(),
            user: "hooksink".to_string(),
            password: String::new(),
            host: ".".to_string(),
        }
    }
}

impl DbSettings {
    /// SQLite file for these settings: `<host>/<name>.db`, or `<host>/<name>`
    /// when the name already has an extension.
    pub fn database_path(&self) -> PathBuf {
        let file = if Path::new(&self.name).extension().is_some() {
            self.name.clone()
        } else {
            format!("{}.db", self.name)
        };
        Path::new(&self.host).join(file)
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tables {
    pub alerts: TableName,
    pub telemetry: TableName,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            alerts: TableName::trusted("soalerts"),
            telemetry: TableName::trusted("telemetry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub db: DbSettings,
    pub tables: Tables,
    pub bind: String,
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: DbSettings::default(),
            tables: Tables::default(),
            bind: "0.0.0.0:5000".to_string(),
            log: "info".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file if given, then `DB_*` and `HOOKSINK_*`
    /// environment variables. Nested keys use `__`, e.g.
    /// `HOOKSINK_TABLES__ALERTS`.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(
                Env::raw()
                    .only(DB_KEYS)
                    .map(|key| {
                        key.as_str()
                            .to_ascii_lowercase()
                            .replacen("db_", "db.", 1)
                            .into()
                    }),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile {
                    path: path.display().to_string(),
                });
            }
        }
        Ok(Self::figment(path).extract()?)
    }
}
