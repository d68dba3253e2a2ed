//! Configuration loading for Prakriti

mod schema;

pub use schema::{Config, DEFAULT_PRECISION};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".prakritirc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            let mut config = load_config_with_extends(&path, &mut HashSet::new())?;
            resolve_questions_path(&mut config, &path);
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends(config_path, &extends)?;
        let mut base = load_config_with_extends(&base_path, visited)?;
        resolve_questions_path(&mut base, &base_path);
        config.merge_from(base);
    }

    Ok(config)
}

/// Resolve an extends reference relative to the config that names it
fn resolve_extends(config_path: &Path, extends: &str) -> Result<PathBuf> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = config_dir.join(extends);

    // Ensure it has .json extension
    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }
    Ok(extends_path)
}

/// Relative question paths are relative to the config file that set them
fn resolve_questions_path(config: &mut Config, config_path: &Path) {
    let Some(questions) = config.questions.as_deref() else {
        return;
    };
    if questions.contains("://") || Path::new(questions).is_absolute() {
        return;
    }
    if let Some(dir) = config_path.parent() {
        config.questions = Some(dir.join(questions).display().to_string());
    }
}

/// Search for .prakritirc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default config written by `prakriti init`
pub fn default_config_json(questions: Option<&str>) -> Result<String> {
    let value = serde_json::json!({
        "questions": questions.unwrap_or("questions.txt"),
        "onInvalid": "fallback",
        "precision": DEFAULT_PRECISION,
    });
    let mut json = serde_json::to_string_pretty(&value).context("Failed to render config")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InvalidPolicy;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_no_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        // A stray config above the temp dir would be picked up; only check it loads
        assert!(load_config(&nested, None).is_ok());
    }

    #[test]
    fn test_found_in_parent_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "precision": 2 }"#).unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir_all(&nested).unwrap();
        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.precision(), 2);
    }

    #[test]
    fn test_missing_custom_path_errors() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_config_extends() {
        let dir = TempDir::new().unwrap();

        let base_path = dir.path().join("base.json");
        let mut base_file = fs::File::create(&base_path).unwrap();
        writeln!(
            base_file,
            r#"{{ "questions": "shared/questions.txt", "onInvalid": "error", "precision": 3 }}"#
        )
        .unwrap();

        let child_path = dir.path().join(CONFIG_FILENAME);
        fs::write(&child_path, r#"{ "extends": "./base", "precision": 0 }"#).unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.precision(), 0);
        assert_eq!(config.invalid_policy(), InvalidPolicy::Error);
        let questions = config.questions.unwrap();
        assert!(questions.ends_with("shared/questions.txt"));
        assert!(Path::new(&questions).is_absolute());
    }

    #[test]
    fn test_circular_extends_detected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "extends": "./a.json" }"#).unwrap();
        let err = load_config(dir.path(), Some(Path::new("a.json"))).unwrap_err();
        assert!(err.to_string().contains("Circular extends"));
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON in config"));
    }

    #[test]
    fn test_default_config_parses() {
        let json = default_config_json(Some("quiz.txt")).unwrap();
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.questions.as_deref(), Some("quiz.txt"));
        assert_eq!(config.invalid_policy(), InvalidPolicy::Fallback);
    }
}
