use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Widget configuration
// ---------------------------------------------------------------------------

/// Widget configuration: window title and the fixed list of station CSV
/// files the navigator cycles through. Read from a JSON file, e.g.
///
/// ```json
/// { "title": "Station 1–3", "csv_files": ["data/station1_data.csv"] }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub csv_files: Vec<PathBuf>,
}

fn default_title() -> String {
    "Weathervane – Station Viewer".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config file {path:?} lists no CSV files")]
    NoSources { path: PathBuf },
}

impl WidgetConfig {
    /// Parse and validate a config file. An empty `csv_files` list is a
    /// configuration error: the widget would have nothing to navigate.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: WidgetConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        if config.csv_files.is_empty() {
            return Err(ConfigError::NoSources {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    /// No sources configured; files can still be opened via the dialog.
    pub fn empty() -> Self {
        WidgetConfig {
            title: default_title(),
            csv_files: Vec::new(),
        }
    }
}
