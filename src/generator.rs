use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::client_registry::ClientStore;
use crate::config::AppConfig;
use crate::errors::{GeneratorError, Result};
use crate::materializer::materialize;
use crate::models::{MediaType, ProjectConfig, ProjectRequest, WorkType};
use crate::path_analyzer::DirectoryAnalysis;
use crate::path_resolver::PathResolver;
use crate::templates::{FolderTemplate, TemplateStore};

const ASSETS_TEMPLATE: &str = "assets";

/// Outcome of one generation run, accumulated across media types.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub success: bool,
    pub message: String,
    /// Every folder the templates asked for, in creation order.
    pub created_folders: Vec<PathBuf>,
    /// How many of `created_folders` did not exist before this run.
    pub newly_created: usize,
    /// Project root per media type.
    pub project_paths: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub project_folder_name: String,
    pub client_added: bool,
}

pub struct ProjectGenerator<'a> {
    config: &'a AppConfig,
    templates: &'a TemplateStore,
    default_root: PathBuf,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(config: &'a AppConfig, templates: &'a TemplateStore, default_root: PathBuf) -> Self {
        Self {
            config,
            templates,
            default_root,
        }
    }

    /// `<date>-<name>` for client work, the bare name for personal work.
    pub fn project_folder_name(&self, project: &ProjectConfig) -> Result<String> {
        match project.work_type {
            WorkType::Client => {
                let date = format_date(
                    project.project_date,
                    &self.config.default_options.date_format,
                )?;
                Ok(format!("{}-{}", date, project.project_name))
            }
            WorkType::Personal => Ok(project.project_name.clone()),
        }
    }

    /// Validates the request, then resolves and materializes one project per
    /// media type. Validation and template problems are returned as errors
    /// before anything is written. A filesystem failure part way through is
    /// reported as an unsuccessful run; folders created so far stay on disk
    /// and are listed in the report.
    pub fn generate(
        &self,
        request: &ProjectRequest,
        analysis: &DirectoryAnalysis,
    ) -> Result<GenerationReport> {
        let mut request = request.clone();
        request.validate()?;

        let projects = request.split();
        let mut report = GenerationReport::default();
        let Some(first) = projects.first() else {
            return Ok(report);
        };
        report.project_folder_name = self.project_folder_name(first)?;

        let templates = projects
            .iter()
            .map(|project| self.templates.load(&project.template_name()))
            .collect::<Result<Vec<FolderTemplate>>>()?;

        let resolver = PathResolver::new(self.config, self.default_root.clone());
        for (project, template) in projects.iter().zip(&templates) {
            let project_root = resolver
                .resolve_base(project, analysis)
                .join(&report.project_folder_name);
            log::info!(
                "Creating {} project at {}",
                project.media_type.key(),
                project_root.display()
            );

            match materialize(&project_root, template, project) {
                Ok(result) => {
                    report.newly_created += result.created.len();
                    report.created_folders.extend(result.ensured);
                    report.project_paths.push(project_root);
                }
                Err(e @ GeneratorError::Filesystem { .. }) => {
                    log::warn!("Project creation stopped: {}", e);
                    report.message = format!("Error creating project: {}", e);
                    return Ok(report);
                }
                Err(e) => return Err(e),
            }
        }

        report.success = true;
        report.message = format!(
            "Successfully created project: {}",
            report.project_folder_name
        );
        Ok(report)
    }

    /// Runs `generate` and records client projects in `store`. Registry
    /// problems never fail the run; they are added to the report's warnings.
    pub fn generate_and_record(
        &self,
        request: &ProjectRequest,
        analysis: &DirectoryAnalysis,
        store: &mut dyn ClientStore,
    ) -> Result<GenerationReport> {
        let mut report = self.generate(request, analysis)?;
        if !report.success || request.work_type != WorkType::Client {
            return Ok(report);
        }

        let Some(client) = request
            .client_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        else {
            return Ok(report);
        };

        if !store.list_names().iter().any(|name| name == client) {
            match store.add(client, None) {
                Ok(_) => report.client_added = true,
                Err(e) => {
                    let warning = match e.downcast_ref::<GeneratorError>() {
                        Some(GeneratorError::DuplicateClient { name }) => {
                            format!("Client '{}' already registered", name)
                        }
                        _ => format!("Could not add client '{}': {:#}", client, e),
                    };
                    report.warnings.push(warning);
                }
            }
        }

        match store.append_project(client, &report.project_folder_name) {
            Ok(true) => {}
            Ok(false) => report.warnings.push(format!(
                "Client '{}' is not in the registry; project not recorded",
                client
            )),
            Err(e) => report
                .warnings
                .push(format!("Could not record project for '{}': {:#}", client, e)),
        }

        Ok(report)
    }

    /// Lays out the shared assets folder under `base`, or the default root.
    pub fn generate_assets(&self, base: Option<&Path>) -> Result<GenerationReport> {
        let base = base.unwrap_or(self.default_root.as_path());
        let assets_root = base.join(&self.config.base_directories.assets);
        let template = self.templates.load(ASSETS_TEMPLATE)?;

        // Only the template matters; the project fields gate nothing here.
        let placeholder = ProjectConfig {
            media_type: MediaType::Photography,
            work_type: WorkType::Personal,
            project_name: ASSETS_TEMPLATE.to_string(),
            client_name: None,
            project_date: NaiveDate::MIN,
            base_path: None,
            include_capture_one: false,
            include_proxies: false,
            camera_assignments: Vec::new(),
            use_camera_folders: false,
        };

        let mut report = GenerationReport::default();
        match materialize(&assets_root, &template, &placeholder) {
            Ok(result) => {
                report.newly_created = result.created.len();
                report.created_folders = result.ensured;
            }
            Err(e @ GeneratorError::Filesystem { .. }) => {
                report.message = format!("Error creating assets structure: {}", e);
                return Ok(report);
            }
            Err(e) => return Err(e),
        }

        report.project_paths.push(assets_root.clone());
        report.success = true;
        report.message = format!("Assets structure ready at {}", assets_root.display());
        Ok(report)
    }
}

/// Formats `date` with a strftime pattern, rejecting patterns chrono cannot render.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    let invalid = || GeneratorError::InvalidDateFormat {
        pattern: pattern.to_string(),
    };

    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut formatted = String::new();
    write!(formatted, "{}", date.format_with_items(items.iter()))
        .map_err(|_| invalid())?;
    Ok(formatted)
}

#[cfg(test)]
mod tests;
