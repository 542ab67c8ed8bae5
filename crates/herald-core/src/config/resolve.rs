//! Configuration file lookup and loading.

use std::fs;
use std::path::{Path, PathBuf};

use super::{ConfigError, ServerConfig, validate_config};

/// File names searched, in order, when no explicit path is given.
///
/// The operator override comes first so that a customized copy shadows the
/// shipped default.
pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["herald.custom.json", "herald.default.json"];

/// Where the configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit,
    /// Found the operator override file.
    Custom,
    /// Fell back to the shipped default file.
    Default,
}

/// Result of resolving the configuration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigResolution {
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Resolve the configuration file to read.
///
/// An explicit path is made absolute against the current directory. Otherwise
/// [`CONFIG_FILE_CANDIDATES`] are tried under `config_dir` and the first one that
/// exists wins. When neither exists the default path is returned so that the
/// subsequent read reports which file was expected.
pub fn resolve_config_path(explicit: Option<&Path>, config_dir: &Path) -> ConfigResolution {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        return ConfigResolution {
            path,
            source: ConfigSource::Explicit,
        };
    }

    let [custom, default] = CONFIG_FILE_CANDIDATES;
    let custom = config_dir.join(custom);
    if custom.exists() {
        return ConfigResolution {
            path: custom,
            source: ConfigSource::Custom,
        };
    }

    ConfigResolution {
        path: config_dir.join(default),
        source: ConfigSource::Default,
    }
}

/// Read and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let raw = fs::read(path).map_err(|e| ConfigError::ConfigIo {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    validate_config(&raw).map(|config| config.with_source(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str =
        r#"{"servers": [{"type": "admin", "port": 22281}, {"type": "client", "port": 22280}]}"#;

    #[test]
    fn explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("herald.custom.json"), VALID).unwrap();

        let explicit = dir.path().join("elsewhere.json");
        let resolution = resolve_config_path(Some(&explicit), dir.path());
        assert_eq!(resolution.source, ConfigSource::Explicit);
        assert_eq!(resolution.path, explicit);
    }

    #[test]
    fn relative_explicit_path_is_made_absolute() {
        let dir = TempDir::new().unwrap();
        let resolution = resolve_config_path(Some(Path::new("conf/herald.json")), dir.path());
        assert!(resolution.path.is_absolute());
        assert!(resolution.path.ends_with("conf/herald.json"));
    }

    #[test]
    fn custom_file_shadows_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("herald.custom.json"), VALID).unwrap();
        fs::write(dir.path().join("herald.default.json"), VALID).unwrap();

        let resolution = resolve_config_path(None, dir.path());
        assert_eq!(resolution.source, ConfigSource::Custom);
        assert!(resolution.path.ends_with("herald.custom.json"));
    }

    #[test]
    fn falls_back_to_default_even_when_missing() {
        let dir = TempDir::new().unwrap();
        let resolution = resolve_config_path(None, dir.path());
        assert_eq!(resolution.source, ConfigSource::Default);
        assert!(resolution.path.ends_with("herald.default.json"));
    }

    #[test]
    fn load_records_source_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("herald.default.json");
        fs::write(&path, VALID).unwrap();

        let config = load_config(&path).expect("load");
        assert_eq!(config.source(), Some(path.as_path()));
        assert_eq!(config.endpoints().len(), 2);
    }

    #[test]
    fn load_missing_file_is_config_io() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigIo { path: ref p, .. } if p == &path));
    }
}
