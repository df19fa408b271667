use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Port the reference movie service listens on.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Settings read from `config.toml`, all optional.
///
/// ```toml
/// base_url = "http://movies.internal:8080"
/// log_dir = "/var/log/movie-admin"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "movie-admin", "movie-admin")
    }

    /// `config.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `explicit`, which must exist, or from the default location,
    /// which may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command-line or environment value wins over the file.
    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = url;
        }
        self
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.cache_dir().to_path_buf()))
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(config.log_dir.is_none());
        assert_eq!(config.base_url().unwrap().port(), Some(8080));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://movies.test:9000\"").unwrap();
        writeln!(file, "log_dir = \"/tmp/movie-logs\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "http://movies.test:9000");
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/movie-logs"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_dir = \"/tmp/x\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_override_wins() {
        let config = Config::default().with_base_url(Some("http://other:1".to_string()));
        assert_eq!(config.base_url, "http://other:1");
        let config = config.with_base_url(None);
        assert_eq!(config.base_url, "http://other:1");
    }

    #[test]
    fn test_invalid_url() {
        let config = Config::default().with_base_url(Some("not a url".to_string()));
        assert!(matches!(
            config.base_url(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
