use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::models::{MediaSelection, MediaType, SkipLevel, WorkType};

/// How many ancestors above the hierarchy root are searched for sibling media
/// folders when looking for client folders. The hierarchy root itself is
/// always searched.
pub const MAX_ANCESTOR_SEARCH: usize = 4;

/// Snapshot of what the working directory already says about the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryAnalysis {
    pub current_path: PathBuf,
    pub is_in_structure: bool,
    pub detected_type: Option<MediaType>,
    pub detected_work_type: Option<WorkType>,
    pub detected_client: Option<String>,
    pub detected_year: Option<i32>,
    /// Client folder names in discovery order, without duplicates.
    pub discovered_clients: Vec<String>,
    pub client_work_path: Option<PathBuf>,
    pub suggested_base: PathBuf,
    pub skip_levels: BTreeSet<SkipLevel>,
    pub use_smart_detection: bool,
    /// The media-type directory as it appears in `current_path`.
    pub media_dir: Option<PathBuf>,
    /// Work-type and year segments exactly as spelled on disk.
    pub work_segment: Option<String>,
    pub year_segment: Option<String>,
}

impl DirectoryAnalysis {
    /// Analysis of a path that is not inside any known hierarchy.
    pub fn outside(current_path: &Path) -> Self {
        Self {
            current_path: current_path.to_path_buf(),
            is_in_structure: false,
            detected_type: None,
            detected_work_type: None,
            detected_client: None,
            detected_year: None,
            discovered_clients: Vec::new(),
            client_work_path: None,
            suggested_base: current_path.to_path_buf(),
            skip_levels: BTreeSet::new(),
            use_smart_detection: false,
            media_dir: None,
            work_segment: None,
            year_segment: None,
        }
    }

    pub fn skips(&self, level: SkipLevel) -> bool {
        self.skip_levels.contains(&level)
    }

    pub fn with_smart_detection(mut self, enabled: bool) -> Self {
        self.use_smart_detection = enabled;
        self
    }

    /// True when smart detection was requested and there is something to detect.
    pub fn smart_detection_applies(&self) -> bool {
        self.use_smart_detection && self.is_in_structure
    }

    fn discover(&mut self, names: Vec<String>) {
        for name in names {
            if !self.discovered_clients.contains(&name) {
                self.discovered_clients.push(name);
            }
        }
    }
}

/// A client offered to the user, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCandidate {
    pub name: String,
    pub on_disk: bool,
    pub in_registry: bool,
    pub is_current: bool,
}

pub struct PathAnalyzer<'a> {
    config: &'a AppConfig,
}

impl<'a> PathAnalyzer<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Reads `current_path` left to right and stops at the first media-type folder.
    /// Never touches the filesystem except to list candidate client folders.
    pub fn analyze(&self, current_path: &Path) -> DirectoryAnalysis {
        let mut analysis = DirectoryAnalysis::outside(current_path);
        let components: Vec<Component> = current_path.components().collect();
        let segment_at = |index: usize| normal_segment(&components, index);

        for index in 0..components.len() {
            let Some(media) = segment_at(index).and_then(|name| self.match_media(name)) else {
                continue;
            };

            let media_dir: PathBuf = components[..=index].iter().collect();
            analysis.is_in_structure = true;
            analysis.detected_type = Some(media);
            analysis.suggested_base = if index == components.len() - 1 {
                current_path.to_path_buf()
            } else {
                components[..index].iter().collect()
            };
            analysis.skip_levels.insert(SkipLevel::MediaType);

            if let Some((work_type, segment)) = segment_at(index + 1)
                .and_then(|name| self.match_work(name).map(|work| (work, name)))
            {
                analysis.detected_work_type = Some(work_type);
                analysis.work_segment = Some(segment.to_string());
                analysis.skip_levels.insert(SkipLevel::WorkType);

                match work_type {
                    WorkType::Client => {
                        analysis.client_work_path = Some(media_dir.join(segment));
                        if let Some(client) = segment_at(index + 2) {
                            analysis.detected_client = Some(client.to_string());
                            analysis.skip_levels.insert(SkipLevel::Client);
                        }
                    }
                    WorkType::Personal => {
                        if let Some((year, segment)) = segment_at(index + 2)
                            .and_then(|name| parse_year(name).map(|year| (year, name)))
                        {
                            analysis.detected_year = Some(year);
                            analysis.year_segment = Some(segment.to_string());
                            analysis.skip_levels.insert(SkipLevel::Year);
                        }
                    }
                }
            }

            analysis.media_dir = Some(media_dir);
            break;
        }

        if let Some(client_work) = analysis.client_work_path.clone() {
            analysis.discover(list_subdirectories(&client_work));
        } else if let Some(media_dir) = analysis.media_dir.clone() {
            let hierarchy_root = media_dir.parent().unwrap_or(&media_dir);
            for client_work in self.client_work_candidates(current_path, hierarchy_root) {
                analysis.discover(list_subdirectories(&client_work));
            }
        }

        log::debug!(
            "Analyzed {}: in_structure={} skip={:?} clients={:?}",
            current_path.display(),
            analysis.is_in_structure,
            analysis.skip_levels,
            analysis.discovered_clients
        );
        analysis
    }

    /// Merges folders found on disk with registry entries that still have a
    /// folder somewhere under the hierarchy. Registry entries without one are dropped.
    pub fn reconcile_clients(
        &self,
        analysis: &DirectoryAnalysis,
        registry_names: &[String],
        media: MediaSelection,
    ) -> Vec<ClientCandidate> {
        let discovered: &[String] = if analysis.use_smart_detection {
            &analysis.discovered_clients
        } else {
            &[]
        };
        let current = analysis
            .detected_client
            .as_deref()
            .filter(|_| analysis.use_smart_detection);

        let root = analysis
            .media_dir
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(analysis.suggested_base.as_path());
        let existing: Vec<&String> = registry_names
            .iter()
            .filter(|name| self.client_folder_exists(root, name, media))
            .collect();

        let mut candidates: Vec<ClientCandidate> = Vec::new();
        for name in discovered.iter().chain(existing.iter().copied()) {
            if candidates.iter().any(|c| &c.name == name) {
                continue;
            }
            candidates.push(ClientCandidate {
                name: name.clone(),
                on_disk: discovered.contains(name),
                in_registry: registry_names.contains(name),
                is_current: current == Some(name.as_str()),
            });
        }
        candidates
    }

    fn client_folder_exists(&self, root: &Path, client: &str, media: MediaSelection) -> bool {
        MediaType::ALL
            .iter()
            .filter(|m| media.includes(**m))
            .flat_map(|m| self.config.media_folder_names(*m))
            .any(|media_folder| {
                self.config
                    .work_folder_names(WorkType::Client)
                    .iter()
                    .any(|work| root.join(media_folder).join(work).join(client).is_dir())
            })
    }

    fn match_media(&self, segment: &str) -> Option<MediaType> {
        MediaType::ALL
            .into_iter()
            .find(|media| self.config.media_folder_names(*media).contains(&segment))
    }

    fn match_work(&self, segment: &str) -> Option<WorkType> {
        [WorkType::Client, WorkType::Personal]
            .into_iter()
            .find(|work| self.config.work_folder_names(*work).contains(&segment))
    }

    fn existing_client_work(&self, parent: &Path) -> Option<PathBuf> {
        self.config
            .work_folder_names(WorkType::Client)
            .into_iter()
            .map(|name| parent.join(name))
            .find(|path| path.is_dir())
    }

    /// Client-work folders worth listing when the path itself did not name one:
    /// one directly below `current_path`, then one under each media folder of
    /// the hierarchy root and its nearest ancestors.
    fn client_work_candidates(
        &self,
        current_path: &Path,
        hierarchy_root: &Path,
    ) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = self.existing_client_work(current_path) {
            candidates.push(path);
        }

        let mut media_names: Vec<&str> = Vec::new();
        for media in MediaType::ALL {
            for name in self.config.media_folder_names(media) {
                if !media_names.contains(&name) {
                    media_names.push(name);
                }
            }
        }

        for ancestor in hierarchy_root.ancestors().take(MAX_ANCESTOR_SEARCH + 1) {
            for name in &media_names {
                let type_path = ancestor.join(name);
                if !type_path.is_dir() {
                    continue;
                }
                if let Some(path) = self.existing_client_work(&type_path) {
                    if !candidates.contains(&path) {
                        candidates.push(path);
                    }
                }
            }
        }
        candidates
    }
}

fn normal_segment<'p>(components: &[Component<'p>], index: usize) -> Option<&'p str> {
    match components.get(index) {
        Some(Component::Normal(name)) => name.to_str(),
        _ => None,
    }
}

fn parse_year(segment: &str) -> Option<i32> {
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Visible sub-directories of `dir` in listing order. Unreadable directories
/// yield nothing.
fn list_subdirectories(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping {} while listing clients: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect()
}
