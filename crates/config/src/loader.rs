use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{Error, Result, env_subst::substitute_env, schema::AutocodeConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "autocode.toml",
    "autocode.yaml",
    "autocode.yml",
    "autocode.json",
];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<AutocodeConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./autocode.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/autocode/autocode.{toml,yaml,yml,json}` (user-global)
///
/// Returns the parsed config and the file it came from, or the defaults
/// and `None` when no file is found or the file fails to load.
pub fn discover_and_load() -> (AutocodeConfig, Option<PathBuf>) {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return (AutocodeConfig::default(), None);
    };
    debug!(path = %path.display(), "loading config");
    match load_config(&path) {
        Ok(cfg) => (cfg, Some(path)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            (AutocodeConfig::default(), None)
        },
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    find_config_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_config_in(&dir)))
}

fn find_config_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/autocode/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "autocode").map(|d| d.config_dir().to_path_buf())
}

/// Returns the path of an existing config file, or the default TOML path.
pub fn find_or_default_config_path() -> PathBuf {
    if let Some(path) = find_config_file() {
        return path;
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("autocode.toml")
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("toml")
}

fn parse_config(raw: &str, path: &Path) -> Result<AutocodeConfig> {
    match extension(path) {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn loads_each_supported_format() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("autocode.toml", "[validation]\nlatency_ms = 7\n"),
            ("autocode.yaml", "validation:\n  latency_ms: 7\n"),
            ("autocode.json", r#"{"validation": {"latency_ms": 7}}"#),
        ];
        for (name, body) in cases {
            let path = dir.path().join(name);
            std::fs::write(&path, body).unwrap();
            let cfg = load_config(&path).unwrap();
            assert_eq!(cfg.validation.latency_ms, 7, "{name}");
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocode.ini");
        std::fs::write(&path, "latency=1").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
