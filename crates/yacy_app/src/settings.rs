use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;
use yacy_engine::ToolSettings;
use yacy_logging::{yacy_debug, yacy_info};

use crate::cli::Cli;

pub const DEFAULT_SETTINGS_FILENAME: &str = "yacy_search.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// On-disk settings. Every field is optional; absent fields keep the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    search_endpoint: Option<String>,
    result_count: Option<usize>,
    word_budget: Option<usize>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    redirect_limit: Option<usize>,
    max_bytes: Option<u64>,
}

impl SettingsFile {
    fn apply(self, settings: &mut ToolSettings) {
        if let Some(endpoint) = self.search_endpoint {
            settings.search_endpoint = endpoint;
        }
        if let Some(count) = self.result_count {
            settings.result_count = count;
        }
        if let Some(budget) = self.word_budget {
            settings.word_budget = budget;
        }
        if let Some(secs) = self.connect_timeout_secs {
            settings.fetch.connect_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = self.request_timeout_secs {
            settings.fetch.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(limit) = self.redirect_limit {
            settings.fetch.redirect_limit = limit;
        }
        if let Some(max_bytes) = self.max_bytes {
            settings.fetch.max_bytes = Some(max_bytes);
        }
    }
}

/// Values from the command line or environment; these win over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub result_count: Option<usize>,
    pub word_budget: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            endpoint: cli.endpoint.clone(),
            result_count: cli.results,
            word_budget: cli.word_budget,
            request_timeout_secs: cli.timeout_secs,
        }
    }
}

/// Layers defaults < settings file < overrides.
///
/// Without an explicit path, a missing `yacy_search.ron` in the working directory
/// is not an error. An explicit path must exist and parse.
pub fn load_settings(
    explicit_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<ToolSettings, SettingsError> {
    let mut settings = ToolSettings::default();

    let (path, required) = match explicit_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILENAME), false),
    };
    if let Some(file) = read_settings_file(&path, required)? {
        file.apply(&mut settings);
        yacy_info!("Loaded settings from {:?}", path);
    }

    if let Some(endpoint) = &overrides.endpoint {
        settings.search_endpoint = endpoint.clone();
    }
    if let Some(count) = overrides.result_count {
        settings.result_count = count;
    }
    if let Some(budget) = overrides.word_budget {
        settings.word_budget = budget;
    }
    if let Some(secs) = overrides.request_timeout_secs {
        settings.fetch.request_timeout = Some(Duration::from_secs(secs));
    }

    yacy_debug!("effective settings {:?}", settings);
    Ok(settings)
}

fn read_settings_file(path: &Path, required: bool) -> Result<Option<SettingsFile>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(None);
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .map(Some)
        .map_err(|err| SettingsError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}
