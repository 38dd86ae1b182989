use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TASKTRACK_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Task document location; overrides the platform default.
    #[serde(default)]
    pub tasks_path: Option<String>,
    /// User document location; overrides the platform default.
    #[serde(default)]
    pub users_path: Option<String>,
    /// Page size used by `list` when none is given on the command line.
    #[serde(default)]
    pub default_page_size: Option<usize>,
}

/// Config resolution never fails the process: a missing file yields
/// defaults silently, a corrupt file yields defaults plus a warning
/// for the caller to surface.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    crate::storage::json_store::default_data_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    load_config_with_fallback_from_path(&config_path())
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            warning: None,
        };
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            return ConfigLoad {
                config: Config::default(),
                warning: Some(format!("{}: {}", path.display(), err)),
            };
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => ConfigLoad {
            config,
            warning: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            warning: Some(format!("invalid JSON in {}: {}", path.display(), err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, load_config_with_fallback_from_path};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tasktrack-{nanos}-{file_name}"))
    }

    #[test]
    fn missing_config_yields_defaults_without_warning() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.warning.is_none());
    }

    #[test]
    fn corrupt_config_yields_defaults_with_warning() {
        let path = temp_path("corrupt-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert!(result.warning.is_some());
    }

    #[test]
    fn valid_config_is_read() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "tasks_path": "/tmp/tasks.json",
            "default_page_size": 50
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert!(result.warning.is_none());
        assert_eq!(result.config.tasks_path.as_deref(), Some("/tmp/tasks.json"));
        assert_eq!(result.config.users_path, None);
        assert_eq!(result.config.default_page_size, Some(50));
    }
}
