use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{GeneratorError, Result};

/// Declarative folder layout for one media type and work type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTemplate {
    #[serde(rename = "folders", default)]
    pub required: Vec<String>,
    #[serde(default, with = "ordered_map", skip_serializing_if = "Vec::is_empty")]
    pub subfolders: Vec<(String, Vec<String>)>,
    #[serde(rename = "optional_folders", default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<String>,
}

impl FolderTemplate {
    fn new(required: &[&str], subfolders: &[(&str, &[&str])], optional: &[&str]) -> Self {
        Self {
            required: required.iter().map(|s| s.to_string()).collect(),
            subfolders: subfolders
                .iter()
                .map(|(parent, children)| {
                    (
                        parent.to_string(),
                        children.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
            optional: optional.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Compiled-in layout for `name`; unknown names get an empty template.
    pub fn builtin(name: &str) -> Self {
        match name {
            "photography_client" => Self::new(
                &[
                    "RAW",
                    "Edited",
                    "Deliverables",
                    "Contracts & Briefs",
                    "Exports for Social-Print",
                ],
                &[],
                &["Capture One"],
            ),
            "photography_personal" => {
                Self::new(&["RAW", "Edited", "Exports for Social-Print"], &[], &[])
            }
            "videography_client" => Self::new(
                &[
                    "Footage",
                    "Edited",
                    "Deliverables",
                    "Contracts & Briefs",
                    "Exports",
                    "Thumbnail & Graphics",
                    "Audio",
                ],
                &[("Footage", &["RAW"])],
                &["Footage/Proxies"],
            ),
            "videography_personal" => Self::new(
                &["Footage", "Edited", "Exports", "Audio"],
                &[("Footage", &["RAW"])],
                &["Footage/Proxies"],
            ),
            "assets" => Self::new(
                &[
                    "Presets & Templates",
                    "Stock Footage & Images",
                    "Music & Sound Effects",
                ],
                &[
                    (
                        "Presets & Templates",
                        &[
                            "Lightroom Presets",
                            "LUTs for Video",
                            "Photoshop Templates",
                            "Final Cut Pro-Premiere Templates",
                        ],
                    ),
                    ("Stock Footage & Images", &["Videos", "Photos"]),
                    ("Music & Sound Effects", &["Licensed Music", "Sound Effects"]),
                ],
                &[],
            ),
            _ => Self::default(),
        }
    }
}

/// Templates come from `<override_dir>/<name>.json` when present, otherwise
/// from the compiled-in table.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    override_dir: Option<PathBuf>,
}

impl TemplateStore {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    pub fn builtin_only() -> Self {
        Self::default()
    }

    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", name)))
    }

    pub fn load(&self, name: &str) -> Result<FolderTemplate> {
        match self.template_path(name) {
            Some(path) if path.is_file() => Self::load_file(name, &path),
            _ => Ok(FolderTemplate::builtin(name)),
        }
    }

    fn load_file(name: &str, path: &Path) -> Result<FolderTemplate> {
        let content = fs::read_to_string(path).map_err(|source| GeneratorError::TemplateRead {
            name: name.to_string(),
            path: path.to_path_buf(),
            source,
        })?;

        let template =
            serde_json::from_str(&content).map_err(|source| GeneratorError::TemplateLoad {
                name: name.to_string(),
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded template '{}' from {}", name, path.display());
        Ok(template)
    }
}

/// JSON objects as ordered `(key, value)` pairs so template order survives a round trip.
mod ordered_map {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(pairs: &[(String, Vec<String>)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, Vec<String>)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<(String, Vec<String>)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of folder name to child folder names")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, Vec<String>>()? {
                    pairs.push((key, value));
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_videography_client() {
        let template = FolderTemplate::builtin("videography_client");
        assert_eq!(template.required[0], "Footage");
        assert_eq!(
            template.subfolders,
            vec![("Footage".to_string(), vec!["RAW".to_string()])]
        );
        assert_eq!(template.optional, vec!["Footage/Proxies".to_string()]);
    }

    #[test]
    fn test_unknown_template_is_empty() {
        let template = TemplateStore::builtin_only().load("audio_client").unwrap();
        assert_eq!(template, FolderTemplate::default());
    }

    #[test]
    fn test_override_file_wins_and_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("photography_personal.json"),
            r#"{
                "folders": ["Selects"],
                "subfolders": {"Zeta": ["1"], "Alpha": ["2", "3"]},
                "optional_folders": ["Capture One"]
            }"#,
        )
        .unwrap();

        let store = TemplateStore::new(Some(temp_dir.path().to_path_buf()));
        let template = store.load("photography_personal").unwrap();
        assert_eq!(template.required, vec!["Selects".to_string()]);
        let parents: Vec<&str> = template.subfolders.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(parents, vec!["Zeta", "Alpha"]);

        // other names still resolve to the compiled-in table
        let fallback = store.load("photography_client").unwrap();
        assert_eq!(fallback, FolderTemplate::builtin("photography_client"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let template: FolderTemplate = serde_json::from_str(r#"{"folders": ["A"]}"#).unwrap();
        assert_eq!(template.required, vec!["A".to_string()]);
        assert!(template.subfolders.is_empty());
        assert!(template.optional.is_empty());
    }

    #[test]
    fn test_unreadable_template_reports_read_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("assets.json"), [0xff, 0xfe, 0x00]).unwrap();

        let store = TemplateStore::new(Some(temp_dir.path().to_path_buf()));
        let err = store.load("assets").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read template 'assets'"));
        assert!(matches!(err, GeneratorError::TemplateRead { .. }));
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("assets.json"), "{ not json").unwrap();

        let store = TemplateStore::new(Some(temp_dir.path().to_path_buf()));
        match store.load("assets") {
            Err(GeneratorError::TemplateLoad { name, .. }) => assert_eq!(name, "assets"),
            other => panic!("expected TemplateLoad error, got {:?}", other),
        }
    }
}
