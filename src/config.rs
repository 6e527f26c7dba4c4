use crate::model::sort::SortableColumn;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_plantable_column() -> usize {
    1
}

fn default_sortable_columns() -> Vec<SortableColumn> {
    // Stack, Bruto, Processado
    vec![
        SortableColumn::numeric(2),
        SortableColumn::numeric(3),
        SortableColumn::numeric(4),
    ]
}

fn default_filter_control() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data file to show; the built-in guide when unset
    #[serde(default)]
    pub data_file: Option<String>,
    /// Column holding the plantable yes/no value
    #[serde(default = "default_plantable_column")]
    pub plantable_column: usize,
    /// Columns whose header sorts the table
    #[serde(default = "default_sortable_columns")]
    pub sortable_columns: Vec<SortableColumn>,
    /// Whether the filter control is offered at all
    #[serde(default = "default_filter_control")]
    pub filter_control: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            plantable_column: default_plantable_column(),
            sortable_columns: default_sortable_columns(),
            filter_control: default_filter_control(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".guia-lenhador"))
    }

    fn config_path(dir: &Path) -> PathBuf {
        dir.join("config.json")
    }

    /// Load `config.json` from `dir`
    ///
    /// `Ok(None)` when there is no file; an unreadable or invalid file is
    /// an error so callers can leave it alone.
    pub fn load_from(dir: &Path) -> anyhow::Result<Option<Config>> {
        let config_path = Self::config_path(dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid config {}", config_path.display()))?;
        Ok(Some(config))
    }

    /// Save the config to `dir`
    pub fn save_to(&self, dir: &Path) -> anyhow::Result<()> {
        // Create config directory if it doesn't exist
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(Self::config_path(dir), contents)?;

        Ok(())
    }
}
