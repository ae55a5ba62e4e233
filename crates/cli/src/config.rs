//! `packscan.toml` configuration.
//!
//! Precedence: CLI flags, then an explicit `--config` file, then
//! `./packscan.toml`, then `<config_dir>/packscan/packscan.toml`, then
//! built-in defaults (the folder layout the scanning station has always
//! used).

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "excel_files";
const DEFAULT_DB_PATH: &str = "product_codes.db";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(input: &str) -> Result<Self, String> {
        toml::from_str(input).map_err(|e| format!("config parse error: {e}"))
    }

    /// Load from the explicit path when given (missing file is then an
    /// error), otherwise from the first candidate that exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = explicit {
            let input = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            return Self::from_toml(&input);
        }

        for candidate in Self::candidates() {
            if candidate.exists() {
                let input = std::fs::read_to_string(&candidate)
                    .map_err(|e| format!("cannot read {}: {e}", candidate.display()))?;
                return Self::from_toml(&input);
            }
        }
        Ok(FileConfig::default())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("packscan.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("packscan").join("packscan.toml"));
        }
        paths
    }
}

/// Effective settings after flag > file > default precedence.
#[derive(Debug)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

pub fn resolve(
    flag_data_dir: Option<PathBuf>,
    flag_db: Option<PathBuf>,
    file: FileConfig,
) -> Settings {
    Settings {
        data_dir: flag_data_dir
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        db_path: flag_db
            .or(file.db_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
    }
}
