//! CLI configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via VGROUP_CONFIG or --config)
//! 3. Environment variables
//! 4. Command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vgroup_core::{CoreError, TransformOptions};

/// Extensions scanned when a directory is given on the command line.
const DEFAULT_EXTENSIONS: [&str; 10] = [
    "html", "js", "jsx", "ts", "tsx", "vue", "svelte", "astro", "md", "mdx",
];

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Delimiters used by the transformer.
    pub transform: TransformOptions,
    /// File discovery.
    pub files: FilesConfig,
}

impl Config {
    /// Loads configuration from `path` (if any), then applies environment
    /// variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let transform = &mut self.transform;
        for (key, slot) in [
            ("VGROUP_VARIANT_CHAR", &mut transform.variant_char),
            ("VGROUP_OPEN_CHAR", &mut transform.expand_open_char),
            ("VGROUP_CLOSE_CHAR", &mut transform.expand_close_char),
            ("VGROUP_SEPARATOR_CHAR", &mut transform.separator_char),
        ] {
            if let Some(value) = var(key) {
                match single_char(&value) {
                    Some(c) => *slot = c,
                    None => tracing::warn!(key, value = %value, "ignoring override, expected one character"),
                }
            }
        }

        if let Some(list) = var("VGROUP_EXTENSIONS") {
            self.files.extensions = list
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
    }

    /// Validates the combined configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transform.validate()?;
        Ok(())
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Extensions (without the dot) picked up when walking directories.
    pub extensions: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FilesConfig {
    /// Returns whether a file found while walking a directory is scanned.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("configuration validation failed: {0}")]
    Validation(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transform, TransformOptions::default());
        assert!(config.files.extensions.contains(&"html".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml("transform:\n  separator_char: '|'\n").unwrap();
        assert_eq!(config.transform.separator_char, '|');
        assert_eq!(config.transform.variant_char, ':');
        assert_eq!(config.files, FilesConfig::default());

        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "files:\n  extensions: [html]").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.files.extensions, vec!["html"]);
    }

    #[test]
    fn test_from_file_errors() {
        let err = Config::from_file("/nonexistent/vgroup.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transform:\n  variant_char: '::'").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("VGROUP_VARIANT_CHAR", "@"),
            ("VGROUP_OPEN_CHAR", "{"),
            ("VGROUP_CLOSE_CHAR", "}"),
            ("VGROUP_SEPARATOR_CHAR", "toolong"),
            ("VGROUP_EXTENSIONS", "html, .vue,,"),
        ]));

        assert_eq!(config.transform.variant_char, '@');
        assert_eq!(config.transform.expand_open_char, '{');
        assert_eq!(config.transform.expand_close_char, '}');
        assert_eq!(config.transform.separator_char, ',');
        assert_eq!(config.files.extensions, vec!["html", "vue"]);
    }

    #[test]
    fn test_validation_error() {
        let mut config = Config::default();
        config.transform.separator_char = ':';
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_accepts_extension() {
        let files = FilesConfig::default();
        assert!(files.accepts(Path::new("src/App.vue")));
        assert!(files.accepts(Path::new("index.HTML")));
        assert!(!files.accepts(Path::new("style.css")));
        assert!(!files.accepts(Path::new("Makefile")));
    }
}
