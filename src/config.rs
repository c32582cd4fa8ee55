//! Configuration loading for casthi-lint
//!
//! Loads configuration from pyproject.toml [tool.casthi-lint] section

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Rules to enable (empty means all rules, or use ["ALL"])
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable
    #[serde(default)]
    pub disable: Vec<String>,

    /// Paths to exclude from linting
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Target Casthi versions for the run.
    ///
    /// Version gating only applies when exactly one version is listed;
    /// zero or several entries leave every rule enabled.
    #[serde(default, rename = "target-versions")]
    pub target_versions: Vec<String>,
}

/// Find pyproject.toml with [tool.casthi-lint] section, walking upward
pub fn find_config_pyproject_toml(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let pyproject = current.join("pyproject.toml");
        if pyproject.exists() {
            if let Ok(content) = std::fs::read_to_string(&pyproject) {
                if let Ok(value) = toml::from_str::<toml::Value>(&content) {
                    if let Some(tool) = value.get("tool") {
                        if tool.get("casthi-lint").is_some() {
                            return Some(pyproject);
                        }
                    }
                }
            }
        }

        current = current.parent()?;
    }
}

/// Load configuration from pyproject.toml
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            p.to_path_buf()
        } else {
            return None;
        }
    } else {
        find_config_pyproject_toml(&std::env::current_dir().ok()?)?
    };

    let content = std::fs::read_to_string(&config_path).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;

    let tool = value.get("tool")?;
    let casthi_lint = tool.get("casthi-lint")?;

    let config: Config = casthi_lint.clone().try_into().ok()?;

    Some(config)
}

/// Merge command line arguments with config file settings.
/// CLI arguments take precedence.
pub fn merge_config(
    config: Option<&Config>,
    cli_enable: &[String],
    cli_disable: &[String],
    cli_exclude: &[String],
    cli_target_versions: &[String],
) -> (Option<Vec<String>>, Vec<String>, Vec<String>) {
    let mut enable = None;
    let mut exclude = vec![];
    let mut target_versions = vec![];

    // Start with config file settings
    if let Some(cfg) = config {
        if !cfg.enable.is_empty() && cli_enable.is_empty() && cli_disable.is_empty() {
            if cfg.enable.contains(&"ALL".to_string()) {
                enable = Some(all_except(&cfg.disable));
            } else {
                enable = Some(cfg.enable.clone());
            }
        } else if !cfg.disable.is_empty() && cli_enable.is_empty() && cli_disable.is_empty() {
            enable = Some(all_except(&cfg.disable));
        }

        exclude.extend(cfg.exclude.iter().cloned());
        target_versions.extend(cfg.target_versions.iter().cloned());
    }

    // Apply CLI overrides
    if !cli_enable.is_empty() {
        if cli_enable.contains(&"ALL".to_string()) {
            enable = Some(all_except(cli_disable));
        } else {
            enable = Some(cli_enable.to_vec());
        }
    } else if !cli_disable.is_empty() {
        enable = Some(all_except(cli_disable));
    }

    if !cli_target_versions.is_empty() {
        target_versions = cli_target_versions.to_vec();
    }

    // Add CLI exclude patterns
    exclude.extend(cli_exclude.iter().cloned());

    // Add default excludes
    let defaults = vec![
        ".venv",
        "venv",
        "__pycache__",
        ".git",
        ".tox",
        "build",
        "dist",
        ".pytest_cache",
        ".ruff_cache",
        "node_modules",
        ".mypy_cache",
    ];
    for default in defaults {
        if !exclude.contains(&default.to_string()) {
            exclude.push(default.to_string());
        }
    }

    (enable, exclude, target_versions)
}

fn all_except(disabled: &[String]) -> Vec<String> {
    crate::rules::get_all_rule_ids()
        .into_iter()
        .filter(|r| !disabled.contains(r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_pyproject_toml() {
        let dir = TempDir::new().unwrap();
        let pyproject_path = dir.path().join("pyproject.toml");
        fs::write(
            &pyproject_path,
            "[tool.casthi-lint]\nexclude = [\"test\"]",
        )
        .unwrap();

        assert_eq!(
            find_config_pyproject_toml(dir.path()),
            Some(pyproject_path.clone())
        );

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        assert_eq!(find_config_pyproject_toml(&subdir), Some(pyproject_path));
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let pyproject_path = dir.path().join("pyproject.toml");

        let content = r#"
[tool.casthi-lint]
enable = ["CAS001", "CAS002"]
exclude = ["venv", "build"]
target-versions = ["14.0.1.0.0"]
"#;
        fs::write(&pyproject_path, content).unwrap();

        let config = load_config(Some(&pyproject_path)).unwrap();
        assert_eq!(config.enable, vec!["CAS001", "CAS002"]);
        assert_eq!(config.exclude, vec!["venv", "build"]);
        assert_eq!(config.target_versions, vec!["14.0.1.0.0"]);
    }

    #[test]
    fn test_merge_config() {
        let config = Config {
            enable: vec!["CAS001".to_string()],
            exclude: vec!["custom_dir".to_string()],
            target_versions: vec!["14.0.1.0.0".to_string()],
            ..Default::default()
        };

        let (enable, exclude, targets) = merge_config(
            Some(&config),
            &["CAS002".to_string()],
            &[],
            &["skip_me".to_string()],
            &[],
        );

        assert_eq!(enable, Some(vec!["CAS002".to_string()]));
        assert!(exclude.contains(&"custom_dir".to_string()));
        assert!(exclude.contains(&"skip_me".to_string()));
        assert!(exclude.contains(&".venv".to_string()));
        assert_eq!(targets, vec!["14.0.1.0.0"]);
    }

    #[test]
    fn test_cli_target_version_overrides_config() {
        let config = Config {
            target_versions: vec!["14.0.1.0.0".to_string()],
            ..Default::default()
        };

        let (_, _, targets) = merge_config(
            Some(&config),
            &[],
            &[],
            &[],
            &["16.0.0.0.0".to_string()],
        );

        assert_eq!(targets, vec!["16.0.0.0.0"]);
    }

    #[test]
    fn test_disable_expands_against_all_rules() {
        let (enable, _, _) = merge_config(None, &[], &["CAS002".to_string()], &[], &[]);
        let enabled = enable.unwrap();
        assert!(enabled.contains(&"CAS001".to_string()));
        assert!(!enabled.contains(&"CAS002".to_string()));
    }
}
