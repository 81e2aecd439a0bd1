use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::write_atomically;
use crate::errors::GeneratorError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    #[serde(with = "iso_datetime")]
    pub created_date: NaiveDateTime,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Client {
    pub fn new(name: &str, notes: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            created_date: Local::now().naive_local(),
            projects: Vec::new(),
            notes,
        }
    }
}

/// ISO-8601 timestamps. Naive local times are written; RFC 3339 values with an
/// offset are also accepted on read.
mod iso_datetime {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.format(FORMAT).to_string().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&s).map(|dt| dt.naive_local()))
            .map_err(serde::de::Error::custom)
    }
}

/// What project generation needs from wherever clients are kept.
pub trait ClientStore {
    fn list_names(&self) -> Vec<String>;
    /// Fails with `GeneratorError::DuplicateClient` when the name is taken.
    fn add(&mut self, name: &str, notes: Option<String>) -> Result<Client>;
    /// Returns false when the client is unknown.
    fn append_project(&mut self, client_name: &str, project_folder_name: &str) -> Result<bool>;
}

/// Clients keyed by name, persisted as one JSON object.
pub struct ClientRegistry {
    path: PathBuf,
    clients: BTreeMap<String, Client>,
}

impl ClientRegistry {
    /// Loads the registry. A corrupt file is treated as empty.
    pub fn open(path: &Path) -> Result<Self> {
        let clients = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match serde_json::from_str(&content) {
                Ok(clients) => clients,
                Err(e) => {
                    log::warn!("Could not load clients file {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            clients,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.clients)?;
        write_atomically(&self.path, &content)
    }

    pub fn get(&self, name: &str) -> Option<&Client> {
        self.clients.get(name)
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn update_notes(&mut self, name: &str, notes: Option<String>) -> Result<bool> {
        let Some(client) = self.clients.get_mut(name) else {
            return Ok(false);
        };
        client.notes = notes;
        self.save()?;
        Ok(true)
    }

    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if self.clients.remove(name).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Case-insensitive substring match on client names.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        self.clients
            .keys()
            .filter(|name| name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}

impl ClientStore for ClientRegistry {
    fn list_names(&self) -> Vec<String> {
        self.clients.keys().cloned().collect()
    }

    fn add(&mut self, name: &str, notes: Option<String>) -> Result<Client> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeneratorError::EmptyField {
                field: "Client name",
            }
            .into());
        }
        if self.clients.contains_key(name) {
            return Err(GeneratorError::DuplicateClient {
                name: name.to_string(),
            }
            .into());
        }

        let client = Client::new(name, notes);
        self.clients.insert(name.to_string(), client.clone());
        self.save()?;
        log::info!("Added client '{}'", name);
        Ok(client)
    }

    fn append_project(&mut self, client_name: &str, project_folder_name: &str) -> Result<bool> {
        let Some(client) = self.clients.get_mut(client_name) else {
            return Ok(false);
        };

        if !client.projects.iter().any(|p| p == project_folder_name) {
            client.projects.push(project_folder_name.to_string());
            self.save()?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_timestamps_with_and_without_offset() {
        let json = r#"{
            "Acme": {
                "name": "Acme",
                "created_date": "2024-03-01T10:15:30.123456",
                "projects": ["2024-03-01-Launch"],
                "notes": null
            },
            "Beta": {
                "name": "Beta",
                "created_date": "2024-03-02T08:00:00+02:00",
                "projects": [],
                "notes": "VIP"
            }
        }"#;
        let clients: BTreeMap<String, Client> = serde_json::from_str(json).unwrap();

        assert_eq!(
            clients["Acme"].created_date.format("%Y-%m-%d %H:%M").to_string(),
            "2024-03-01 10:15"
        );
        assert_eq!(
            clients["Beta"].created_date.format("%Y-%m-%d %H:%M").to_string(),
            "2024-03-02 08:00"
        );
        assert_eq!(clients["Beta"].notes.as_deref(), Some("VIP"));
    }

    #[test]
    fn test_written_timestamp_is_iso8601() {
        let client = Client::new("Acme", None);
        let value = serde_json::to_value(&client).unwrap();
        let stamp = value["created_date"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
