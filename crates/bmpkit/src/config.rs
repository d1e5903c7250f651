use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use directories::ProjectDirs;
use log::{debug, warn};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "bmpkit.toml";

/// Filename prefixes for the outputs of `bmpkit all`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    pub rotated_right: String,
    pub rotated_left: String,
    pub blurred: String,
    pub box_blurred: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            rotated_right: "rotated_right_".to_owned(),
            rotated_left: "rotated_left_".to_owned(),
            blurred: "blurred_".to_owned(),
            box_blurred: "box_blurred_".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Gaussian sigma used when `--sigma` is not given.
    pub sigma: f64,
    /// Directory for `bmpkit all` outputs; the input's directory when unset.
    pub output_dir: Option<PathBuf>,
    pub outputs: OutputNames,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            sigma: 7.0,
            output_dir: None,
            outputs: OutputNames::default(),
        }
    }
}

impl CliConfig {
    /// Load the first config that parses, trying `explicit` first.
    ///
    /// An explicit path that cannot be read is an error; the implicit
    /// candidates are skipped silently when absent.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            return Self::parse(&contents)
                .with_context(|| format!("invalid config {}", path.display()));
        }

        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match Self::parse(&contents) {
                    Ok(cfg) => {
                        debug!("using config {}", path.display());
                        return Ok(cfg);
                    }
                    Err(err) => {
                        warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Ok(Self::default())
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(contents)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(dir) = exe_path.parent() {
                paths.push(dir.join(CONFIG_FILE_NAME));
            }
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "bmpkit", "bmpkit") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CliConfig::default();
        assert_eq!(cfg.sigma, 7.0);
        assert!(cfg.output_dir.is_none());
        assert_eq!(cfg.outputs.blurred, "blurred_");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(CliConfig::parse("").unwrap(), CliConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = CliConfig::parse(
            r#"
            sigma = 2.5
            output_dir = "out"

            [outputs]
            rotated_left = "ccw_"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.sigma, 2.5);
        assert_eq!(cfg.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cfg.outputs.rotated_left, "ccw_");
        assert_eq!(cfg.outputs.rotated_right, "rotated_right_");
    }

    #[test]
    fn test_bad_type_rejected() {
        assert!(CliConfig::parse("sigma = \"wide\"").is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/bmpkit.toml")));
        assert!(result.is_err());
    }
}
