use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::models::{ProjectConfig, SkipLevel, WorkType};
use crate::path_analyzer::DirectoryAnalysis;

/// Computes the directory a project folder is created in.
pub struct PathResolver<'a> {
    config: &'a AppConfig,
    default_root: PathBuf,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a AppConfig, default_root: PathBuf) -> Self {
        Self {
            config,
            default_root,
        }
    }

    /// Builds `root / media / work / (client | year)`.
    ///
    /// With smart detection, levels the working directory already contains are
    /// not recreated: the result walks through the existing folders as they are
    /// spelled on disk. A level only counts as present when it matches the
    /// project and every level above it was present too.
    pub fn resolve_base(&self, project: &ProjectConfig, analysis: &DirectoryAnalysis) -> PathBuf {
        let mut path;
        let mut anchored = false;

        if analysis.smart_detection_applies() {
            match analysis.media_dir.as_ref().filter(|_| {
                analysis.skips(SkipLevel::MediaType)
                    && analysis.detected_type == Some(project.media_type)
            }) {
                Some(media_dir) => {
                    path = media_dir.clone();
                    anchored = true;
                }
                None => {
                    path = hierarchy_root(analysis).to_path_buf();
                    push_segment(&mut path, self.config.media_folder(project.media_type));
                }
            }
        } else {
            path = project
                .base_path
                .clone()
                .unwrap_or_else(|| self.default_root.clone());
            push_segment(&mut path, self.config.media_folder(project.media_type));
        }

        anchored = anchored
            && analysis.skips(SkipLevel::WorkType)
            && analysis.detected_work_type == Some(project.work_type);
        match analysis.work_segment.as_deref().filter(|_| anchored) {
            Some(segment) => push_segment(&mut path, segment),
            None => push_segment(&mut path, self.config.work_folder(project.work_type)),
        }

        match project.work_type {
            WorkType::Client => {
                if let Some(client) = project.client_name.as_deref() {
                    push_segment(&mut path, client);
                }
            }
            WorkType::Personal => {
                let year = project.year();
                let on_disk = analysis.year_segment.as_deref().filter(|_| {
                    anchored
                        && analysis.skips(SkipLevel::Year)
                        && analysis.detected_year == Some(year)
                });
                match on_disk {
                    Some(segment) => push_segment(&mut path, segment),
                    None => push_segment(&mut path, &format!("{:04}", year)),
                }
            }
        }

        path
    }
}

/// Directory holding the media-type folders of the detected hierarchy.
fn hierarchy_root(analysis: &DirectoryAnalysis) -> &Path {
    analysis
        .media_dir
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(analysis.suggested_base.as_path())
}

fn push_segment(path: &mut PathBuf, segment: &str) {
    if !segment.is_empty() {
        path.push(segment);
    }
}
