//! User configuration.
//!
//! Read from `$XDG_CONFIG_HOME/handcalc/config.toml` unless a path is given.
//! A missing file means defaults; a malformed one is an error.

use crate::calculator::ResultFormat;
use crate::recognition::RecognitionJoin;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// How `=` and evaluated expressions render their result.
    pub result_format: ResultFormat,
    /// How recognized text regions are combined.
    pub recognition_join: RecognitionJoin,
}

impl Config {
    /// Default location of the config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("handcalc").join("config.toml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("Invalid config file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().result_format, ResultFormat::Fixed);
        assert_eq!(
            Config::default().recognition_join,
            RecognitionJoin::AllRegions
        );
    }

    #[test]
    fn test_parse_values() {
        let config = Config::parse(
            r#"
            result-format = "shortest"
            recognition-join = "first-region"
            "#,
        )
        .unwrap();
        assert_eq!(config.result_format, ResultFormat::Shortest);
        assert_eq!(config.recognition_join, RecognitionJoin::FirstRegion);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Config::parse("result-format = \"scientific\"").is_err());
        assert!(Config::parse("colour = \"red\"").is_err());
        assert!(Config::parse("not toml").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("handcalc-no-such-dir/config.toml");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("handcalc-test-{}.toml", std::process::id()));
        fs::write(&path, "result-format = \"shortest\"\n").unwrap();
        let config = Config::load(Some(&path));
        fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().result_format, ResultFormat::Shortest);
    }
}
