//! CLI Configuration

use crate::error::{Error, Result};
use crate::output::OutputFormat;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional defaults read from `~/.cgx/config[.<profile>].toml`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub controller: Option<String>,
    pub auth_token_file: Option<PathBuf>,
    pub include_hubs: Option<bool>,
    pub default_format: Option<String>,
}

impl Config {
    /// Load the profile file, or defaults when it does not exist
    pub fn load(profile: Option<&str>) -> Result<Self> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parsed `default_format`, if set
    pub fn format(&self) -> Result<Option<OutputFormat>> {
        self.default_format
            .as_deref()
            .map(|f| {
                OutputFormat::from_str(f, true)
                    .map_err(|_| Error::Config(format!("unknown default_format '{}'", f)))
            })
            .transpose()
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Cannot find home directory".into()))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".cgx").join(filename))
    }
}
