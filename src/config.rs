use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use serenity::all::UserId;
use thiserror::Error;

use crate::help::BOT_HELP_PER_PAGE;
use crate::hey;
use crate::pagination::SessionSettings;

const PATH: &str = "./config.json";
const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Paging behaviour of the help command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HelpSettings {
    /// Commands per page for category and group help.
    pub per_page: usize,
    /// Commands per category sub-page for the full bot help.
    pub bot_help_per_page: usize,
    /// Idle time before a help session stops listening.
    pub session_timeout_secs: u64,
    /// How long an overlay stays up before the page comes back.
    pub overlay_timeout_secs: u64,
}

impl Default for HelpSettings {
    fn default() -> Self {
        Self {
            per_page: 4,
            bot_help_per_page: BOT_HELP_PER_PAGE,
            session_timeout_secs: 120,
            overlay_timeout_secs: 30,
        }
    }
}

impl HelpSettings {
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    pub fn page_settings(&self) -> SessionSettings {
        SessionSettings {
            per_page: self.per_page,
            overlay_timeout: Duration::from_secs(self.overlay_timeout_secs),
        }
    }

    pub fn bot_help_settings(&self) -> SessionSettings {
        SessionSettings {
            per_page: self.bot_help_per_page,
            ..self.page_settings()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigSettings {
    prefix: String,
    owners: Vec<u64>,
    help: HelpSettings,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            owners: Vec::new(),
            help: HelpSettings::default(),
        }
    }
}

impl ConfigSettings {
    pub fn get() -> Result<Self, ConfigError> {
        Self::load(Path::new(PATH))
    }

    /// Read the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Self::generate(path);
        }

        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let cfg: ConfigSettings =
            serde_json::from_str(data.as_str()).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn generate(path: &Path) -> Result<Self, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(io_err)?;

        let default_file = Self::default();
        let data = serde_json::to_string_pretty(&default_file).map_err(|source| {
            ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;

        write!(file, "{}", data).map_err(io_err)?;
        hey!("No config found, wrote the defaults to {}", path.display());

        Ok(default_file)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("prefix must not be empty".to_string()));
        }
        if self.help.per_page == 0 || self.help.bot_help_per_page == 0 {
            return Err(ConfigError::Invalid(
                "help page sizes must be at least 1".to_string(),
            ));
        }
        for timeout in [self.help.session_timeout_secs, self.help.overlay_timeout_secs] {
            if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
                return Err(ConfigError::Invalid(format!(
                    "help timeouts must be between 1 and {} seconds",
                    MAX_TIMEOUT_SECS
                )));
            }
        }
        Ok(())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_owner(&self, user: UserId) -> bool {
        self.owners.contains(&user.get())
    }

    pub fn help(&self) -> &HelpSettings {
        &self.help
    }
}
