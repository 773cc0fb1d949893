#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use strum::IntoStaticStr;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendURL,
    ClientID,
    ConfigFile,
    IdToken,
    LaunchURL,
    StorageDir,
}

impl ConfigKey {
    /// Kebab-case name, used as the config file key and the CLI argument id.
    pub fn as_str(&self) -> &'static str {
        return self.into();
    }

    /// Keys that only make sense for a single run and are left out of the
    /// config file.
    fn is_runtime_only(&self) -> bool {
        return matches!(
            self,
            ConfigKey::ConfigFile | ConfigKey::IdToken | ConfigKey::LaunchURL
        );
    }
}

/// Root of everything the app writes to disk: logs, storage, and the default
/// config file on non-macOS systems.
pub fn cache_dir() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(|| return path::PathBuf::from("."))
        .join("workspaceai");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        #[cfg(not(target_os = "macos"))]
        let config_path = cache_dir().join("config.toml");
        #[cfg(target_os = "macos")]
        let config_path = std::env::var("HOME")
            .map(|home| return path::PathBuf::from(home).join(".config/workspaceai"))
            .unwrap_or_else(|_| return cache_dir())
            .join("config.toml");

        let storage_dir = cache_dir().join("storage");

        let res = match key {
            ConfigKey::BackendURL => "http://localhost:8000".to_string(),
            ConfigKey::ClientID => "".to_string(),
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::IdToken => "".to_string(),
            ConfigKey::LaunchURL => "".to_string(),
            ConfigKey::StorageDir => storage_dir.to_string_lossy().to_string(),
        };

        return res;
    }

    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    } else {
                        anyhow::bail!(format!(
                            "config.toml has an invalid value for key '{key}', expected a string"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            backend_url = Config::get(ConfigKey::BackendURL),
            client_id = Config::get(ConfigKey::ClientID),
            launch_url = Config::get(ConfigKey::LaunchURL),
            storage_dir = Config::get(ConfigKey::StorageDir),
            has_id_token = !Config::get(ConfigKey::IdToken).is_empty(),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key.is_runtime_only() {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
