// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Layered settings: built-in defaults, an optional TOML file, then
//! `FAMILYSPEND_*` environment variables (`__` between section and key,
//! e.g. `FAMILYSPEND_STORAGE__BACKEND=workbook`).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::db::APP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Workbook,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub backend: Backend,
    /// SQLite file or workbook directory; the platform data dir when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub profile: Option<String>,
    pub period: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: String,
    #[serde(default)]
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub storage: Storage,
    pub defaults: Defaults,
    pub logging: Logging,
}

impl Settings {
    /// Load settings. An explicit file must exist; the default
    /// `config.toml` in the platform config dir is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("storage.backend", "sqlite")?
            .set_default("defaults.period", "month")?
            .set_default("logging.level", "warn")?;

        match explicit {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        builder
            .add_source(
                Environment::with_prefix("FAMILYSPEND")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP.0, APP.1, APP.2).map(|p| p.config_dir().join("config.toml"))
}
