//! Run configuration files.

use std::path::Path;

use tracing::debug;

use hx_model::RunConfig;

use crate::error::{IngestError, Result};

/// Loads a [`RunConfig`] from a TOML file; absent keys keep their defaults.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let config: RunConfig = toml::from_str(&text).map_err(|e| IngestError::InvalidConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        workers = config.roster.len(),
        visit_status_filter = config.visit_status_filter,
        "loaded run configuration"
    );
    Ok(config)
}

/// The default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&RunConfig::default()).map_err(|e| IngestError::ConfigSerialize {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let text = default_config_toml().unwrap();
        assert!(text.contains("workers"));
        let parsed: RunConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, RunConfig::default());
    }
}
