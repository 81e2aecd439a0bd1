use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{GeneratorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photography,
    Videography,
}

impl MediaType {
    pub const ALL: [MediaType; 2] = [MediaType::Photography, MediaType::Videography];

    /// Key used in `base_directories` and as the template name prefix.
    pub fn key(self) -> &'static str {
        match self {
            MediaType::Photography => "photography",
            MediaType::Videography => "videography",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MediaType::Photography => "Photo",
            MediaType::Videography => "Video",
        }
    }

    /// Folder names from earlier layouts that still identify this branch.
    pub fn legacy_folder_names(self) -> [&'static str; 2] {
        match self {
            MediaType::Photography => ["Photography", "PHOTO"],
            MediaType::Videography => ["Videography", "VIDEO"],
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the user asked for. `Both` never reaches the core; it is split into
/// one `ProjectConfig` per media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSelection {
    Single(MediaType),
    Both,
}

impl MediaSelection {
    pub fn media_types(self) -> Vec<MediaType> {
        match self {
            MediaSelection::Single(media) => vec![media],
            MediaSelection::Both => MediaType::ALL.to_vec(),
        }
    }

    pub fn includes(self, media: MediaType) -> bool {
        match self {
            MediaSelection::Single(selected) => selected == media,
            MediaSelection::Both => true,
        }
    }
}

impl FromStr for MediaSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "photo" | "photography" => Ok(MediaSelection::Single(MediaType::Photography)),
            "video" | "videography" => Ok(MediaSelection::Single(MediaType::Videography)),
            "both" => Ok(MediaSelection::Both),
            other => Err(format!("unknown project type '{}'", other)),
        }
    }
}

impl fmt::Display for MediaSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaSelection::Single(media) => write!(f, "{}", media),
            MediaSelection::Both => write!(f, "Both"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Client,
    Personal,
}

impl WorkType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkType::Client => "client",
            WorkType::Personal => "personal",
        }
    }
}

impl FromStr for WorkType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(WorkType::Client),
            "personal" => Ok(WorkType::Personal),
            other => Err(format!("unknown work type '{}'", other)),
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkType::Client => write!(f, "Client"),
            WorkType::Personal => write!(f, "Personal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraPurpose {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "BTS")]
    BehindTheScenes,
    #[serde(rename = "secondary")]
    Secondary,
    #[serde(rename = "drone")]
    Drone,
    #[serde(rename = "interview")]
    Interview,
    #[serde(rename = "detail")]
    Detail,
    #[serde(rename = "backup")]
    Backup,
}

impl CameraPurpose {
    pub const ALL: [CameraPurpose; 7] = [
        CameraPurpose::Main,
        CameraPurpose::BehindTheScenes,
        CameraPurpose::Secondary,
        CameraPurpose::Drone,
        CameraPurpose::Interview,
        CameraPurpose::Detail,
        CameraPurpose::Backup,
    ];

    /// Prefix used for camera folder names.
    pub fn token(self) -> &'static str {
        match self {
            CameraPurpose::Main => "main",
            CameraPurpose::BehindTheScenes => "BTS",
            CameraPurpose::Secondary => "secondary",
            CameraPurpose::Drone => "drone",
            CameraPurpose::Interview => "interview",
            CameraPurpose::Detail => "detail",
            CameraPurpose::Backup => "backup",
        }
    }

    pub fn valid_tokens() -> String {
        Self::ALL
            .iter()
            .map(|p| p.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for CameraPurpose {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_uppercase();

        if let Some(purpose) = Self::ALL
            .iter()
            .find(|p| p.token().to_uppercase() == wanted)
        {
            return Ok(*purpose);
        }

        match wanted.as_str() {
            "PRIMARY" => Ok(CameraPurpose::Main),
            "BEHIND" => Ok(CameraPurpose::BehindTheScenes),
            "SEC" => Ok(CameraPurpose::Secondary),
            "AERIAL" => Ok(CameraPurpose::Drone),
            _ => Err(GeneratorError::InvalidPurpose {
                value: s.trim().to_string(),
                valid: Self::valid_tokens(),
            }),
        }
    }
}

impl fmt::Display for CameraPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Camera {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GeneratorError::EmptyField {
                field: "Camera name",
            });
        }

        Ok(Self {
            name: name.to_string(),
            brand: None,
            model: None,
            notes: None,
        })
    }

    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = brand.filter(|b| !b.trim().is_empty());
        self
    }

    /// Spaces and underscores become hyphens; anything else outside
    /// `[A-Za-z0-9-]` is dropped.
    pub fn folder_name(&self) -> String {
        self.name
            .trim()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraAssignment {
    pub camera: Camera,
    pub purpose: CameraPurpose,
}

impl CameraAssignment {
    pub fn new(camera: Camera, purpose: CameraPurpose) -> Self {
        Self { camera, purpose }
    }

    pub fn folder_name(&self) -> String {
        format!("{}-{}", self.purpose.token(), self.camera.folder_name())
    }
}

/// Structural tiers that may already be present in the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipLevel {
    MediaType,
    WorkType,
    Client,
    Year,
}

impl SkipLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipLevel::MediaType => "media_type",
            SkipLevel::WorkType => "work_type",
            SkipLevel::Client => "client",
            SkipLevel::Year => "year",
        }
    }
}

impl fmt::Display for SkipLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A project as requested by the user, before it is split per media type.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    pub media: MediaSelection,
    pub work_type: WorkType,
    pub project_name: String,
    pub client_name: Option<String>,
    pub project_date: NaiveDate,
    pub base_path: Option<PathBuf>,
    pub include_capture_one: bool,
    pub include_proxies: bool,
    pub camera_assignments: Vec<CameraAssignment>,
    pub use_camera_folders: bool,
}

impl ProjectRequest {
    pub fn new(
        media: MediaSelection,
        work_type: WorkType,
        project_name: &str,
        project_date: NaiveDate,
    ) -> Self {
        Self {
            media,
            work_type,
            project_name: project_name.to_string(),
            client_name: None,
            project_date,
            base_path: None,
            include_capture_one: false,
            include_proxies: false,
            camera_assignments: Vec::new(),
            use_camera_folders: false,
        }
    }

    pub fn with_client(mut self, client_name: &str) -> Self {
        self.client_name = Some(client_name.to_string());
        self
    }

    pub fn with_cameras(mut self, assignments: Vec<CameraAssignment>) -> Self {
        self.use_camera_folders = !assignments.is_empty();
        self.camera_assignments = assignments;
        self
    }

    /// Trims names and rejects anything the core cannot work with.
    pub fn validate(&mut self) -> Result<()> {
        self.project_name = self.project_name.trim().to_string();
        if self.project_name.is_empty() {
            return Err(GeneratorError::EmptyField {
                field: "Project name",
            });
        }

        self.client_name = self
            .client_name
            .take()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if self.work_type == WorkType::Client && self.client_name.is_none() {
            return Err(GeneratorError::MissingClientName);
        }

        for assignment in &self.camera_assignments {
            if assignment.camera.name.trim().is_empty() {
                return Err(GeneratorError::EmptyField {
                    field: "Camera name",
                });
            }
        }
        ensure_unique_camera_folders(&self.camera_assignments)?;

        Ok(())
    }

    pub fn split(&self) -> Vec<ProjectConfig> {
        self.media
            .media_types()
            .into_iter()
            .map(|media_type| ProjectConfig {
                media_type,
                work_type: self.work_type,
                project_name: self.project_name.clone(),
                client_name: self.client_name.clone(),
                project_date: self.project_date,
                base_path: self.base_path.clone(),
                include_capture_one: self.include_capture_one,
                include_proxies: self.include_proxies,
                camera_assignments: self.camera_assignments.clone(),
                use_camera_folders: self.use_camera_folders,
            })
            .collect()
    }
}

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` project date.
pub fn parse_project_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).map_err(|_| {
        GeneratorError::InvalidDate {
            value: value.to_string(),
            expected: "YYYY-MM-DD",
        }
    })
}

/// Rejects assignments that would land in the same camera folder.
pub fn ensure_unique_camera_folders(assignments: &[CameraAssignment]) -> Result<()> {
    let mut seen = HashSet::new();
    for assignment in assignments {
        let folder = assignment.folder_name();
        if !seen.insert(folder.clone()) {
            return Err(GeneratorError::DuplicateCameraFolder { folder });
        }
    }
    Ok(())
}

/// One media type's worth of project settings.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub media_type: MediaType,
    pub work_type: WorkType,
    pub project_name: String,
    pub client_name: Option<String>,
    pub project_date: NaiveDate,
    pub base_path: Option<PathBuf>,
    pub include_capture_one: bool,
    pub include_proxies: bool,
    pub camera_assignments: Vec<CameraAssignment>,
    pub use_camera_folders: bool,
}

impl ProjectConfig {
    pub fn year(&self) -> i32 {
        self.project_date.year()
    }

    pub fn template_name(&self) -> String {
        format!("{}_{}", self.media_type.key(), self.work_type.as_str())
    }

    /// Camera sub-folders only apply to video projects with at least one assignment.
    pub fn wants_camera_folders(&self) -> bool {
        self.use_camera_folders
            && !self.camera_assignments.is_empty()
            && self.media_type == MediaType::Videography
    }
}
