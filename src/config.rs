use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Camera, MediaType, WorkType};

const APP_DIR: &str = ".sbp-generator";

/// Where the tool keeps its state under the user's home directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub clients_file: PathBuf,
    pub templates_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::from_root(home_dir.join(APP_DIR)))
    }

    pub fn from_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.json"),
            clients_file: root.join("data").join("clients.json"),
            templates_dir: root.join("templates"),
            root,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseDirectories {
    pub photography: String,
    pub videography: String,
    pub assets: String,
}

impl Default for BaseDirectories {
    fn default() -> Self {
        Self {
            photography: "PHOTO".to_string(),
            videography: "VIDEO".to_string(),
            assets: "Assets & Resources".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultOptions {
    pub include_capture_one: bool,
    pub include_proxies: bool,
    pub date_format: String,
}

impl Default for DefaultOptions {
    fn default() -> Self {
        Self {
            include_capture_one: false,
            include_proxies: false,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_directories: BaseDirectories,
    pub default_options: DefaultOptions,
    pub client_work_subfolder: String,
    pub personal_work_subfolder: String,
    pub default_cameras: Vec<Camera>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let camera = |name: &str, brand: &str| Camera {
            name: name.to_string(),
            brand: Some(brand.to_string()),
            model: None,
            notes: None,
        };

        Self {
            base_directories: BaseDirectories::default(),
            default_options: DefaultOptions::default(),
            client_work_subfolder: "Client Work".to_string(),
            personal_work_subfolder: "Personal Work".to_string(),
            default_cameras: vec![
                camera("Lumix", "Panasonic"),
                camera("DJI POCKET", "DJI"),
                camera("Fujifilm", "Fujifilm"),
                camera("Canon", "Canon"),
                camera("Sony", "Sony"),
                camera("Drone", "DJI"),
            ],
        }
    }
}

impl AppConfig {
    /// Reads the config file, writing the defaults first if it does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            let config = AppConfig::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_atomically(path, &content)?;
        log::debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    pub fn reset(path: &Path) -> Result<AppConfig> {
        let config = AppConfig::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn media_folder(&self, media: MediaType) -> &str {
        match media {
            MediaType::Photography => &self.base_directories.photography,
            MediaType::Videography => &self.base_directories.videography,
        }
    }

    pub fn work_folder(&self, work_type: WorkType) -> &str {
        match work_type {
            WorkType::Client => &self.client_work_subfolder,
            WorkType::Personal => &self.personal_work_subfolder,
        }
    }

    /// Every folder name that identifies `media`: the configured one first,
    /// then the historical names.
    pub fn media_folder_names(&self, media: MediaType) -> Vec<&str> {
        let mut names = vec![self.media_folder(media)];
        for legacy in media.legacy_folder_names() {
            if !names.contains(&legacy) {
                names.push(legacy);
            }
        }
        names
    }

    pub fn work_folder_names(&self, work_type: WorkType) -> Vec<&str> {
        let literal = match work_type {
            WorkType::Client => "Client Work",
            WorkType::Personal => "Personal Work",
        };
        let configured = self.work_folder(work_type);
        if configured == literal {
            vec![configured]
        } else {
            vec![configured, literal]
        }
    }
}

/// Replaces `path` as a whole: the content goes to a sibling temp file first.
pub(crate) fn write_atomically(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let reloaded = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(reloaded.base_directories.photography, "PHOTO");
        assert_eq!(reloaded.default_cameras.len(), 6);
    }

    #[test]
    fn test_partial_file_falls_back_per_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "base_directories": {"photography": "Photos"},
                "client_work_subfolder": "Clients"
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_or_create(&path).unwrap();
        assert_eq!(config.base_directories.photography, "Photos");
        assert_eq!(config.base_directories.videography, "VIDEO");
        assert_eq!(config.client_work_subfolder, "Clients");
        assert_eq!(config.personal_work_subfolder, "Personal Work");
        assert_eq!(config.default_options.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_reset_overwrites_customisations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.base_directories.videography = "Films".to_string();
        config.save(&path).unwrap();
        assert_eq!(
            AppConfig::load_or_create(&path).unwrap().base_directories.videography,
            "Films"
        );

        AppConfig::reset(&path).unwrap();
        assert_eq!(
            AppConfig::load_or_create(&path).unwrap().base_directories.videography,
            "VIDEO"
        );
        assert!(!temp_dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_folder_name_aliases() {
        let mut config = AppConfig::default();
        assert_eq!(
            config.media_folder_names(MediaType::Photography),
            vec!["PHOTO", "Photography"]
        );

        config.client_work_subfolder = "Clients".to_string();
        assert_eq!(
            config.work_folder_names(WorkType::Client),
            vec!["Clients", "Client Work"]
        );
        assert_eq!(
            config.work_folder_names(WorkType::Personal),
            vec!["Personal Work"]
        );
    }
}
