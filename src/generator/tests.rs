use super::*;
use crate::client_registry::Client;
use crate::models::{Camera, CameraAssignment, CameraPurpose, MediaSelection};
use crate::path_analyzer::PathAnalyzer;
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn client_request(media: MediaSelection) -> ProjectRequest {
    ProjectRequest::new(media, WorkType::Client, "Launch", date()).with_client("Acme")
}

/// Store whose `list_names` lags behind, so `add` reports a duplicate.
#[derive(Default)]
struct StaleStore {
    projects: Vec<(String, String)>,
    fail_append: bool,
}

impl ClientStore for StaleStore {
    fn list_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn add(&mut self, name: &str, _notes: Option<String>) -> anyhow::Result<Client> {
        Err(GeneratorError::DuplicateClient {
            name: name.to_string(),
        }
        .into())
    }

    fn append_project(&mut self, client_name: &str, project: &str) -> anyhow::Result<bool> {
        if self.fail_append {
            anyhow::bail!("disk full");
        }
        self.projects
            .push((client_name.to_string(), project.to_string()));
        Ok(true)
    }
}

#[test]
fn test_project_folder_name_by_work_type() {
    let config = AppConfig::default();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, PathBuf::from("/work"));

    let client = client_request(MediaSelection::Single(MediaType::Photography)).split();
    assert_eq!(
        generator.project_folder_name(&client[0]).unwrap(),
        "2024-03-01-Launch"
    );

    let personal = ProjectRequest::new(
        MediaSelection::Single(MediaType::Photography),
        WorkType::Personal,
        "Street",
        date(),
    )
    .split();
    assert_eq!(generator.project_folder_name(&personal[0]).unwrap(), "Street");
}

#[test]
fn test_custom_date_format() {
    let mut config = AppConfig::default();
    config.default_options.date_format = "%Y%m%d".to_string();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, PathBuf::from("/work"));

    let client = client_request(MediaSelection::Single(MediaType::Videography)).split();
    assert_eq!(
        generator.project_folder_name(&client[0]).unwrap(),
        "20240301-Launch"
    );
}

#[test]
fn test_format_date_rejects_bad_patterns() {
    assert_eq!(format_date(date(), "%d.%m.%Y").unwrap(), "01.03.2024");
    assert!(matches!(
        format_date(date(), "%Q"),
        Err(GeneratorError::InvalidDateFormat { .. })
    ));
    // a date has no time of day to print
    assert!(matches!(
        format_date(date(), "%Y-%H"),
        Err(GeneratorError::InvalidDateFormat { .. })
    ));
}

#[test]
fn test_validation_error_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::default();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, temp_dir.path().to_path_buf());

    let cameras = vec![
        CameraAssignment::new(Camera::new("DJI POCKET").unwrap(), CameraPurpose::BehindTheScenes),
        CameraAssignment::new(Camera::new("DJI_POCKET").unwrap(), CameraPurpose::BehindTheScenes),
    ];
    let request =
        client_request(MediaSelection::Single(MediaType::Videography)).with_cameras(cameras);
    let analysis = DirectoryAnalysis::outside(temp_dir.path());

    let err = generator.generate(&request, &analysis).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_duplicate_client_becomes_warning() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::default();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, temp_dir.path().to_path_buf());
    let analysis = PathAnalyzer::new(&config).analyze(temp_dir.path());

    let mut store = StaleStore::default();
    let report = generator
        .generate_and_record(
            &client_request(MediaSelection::Single(MediaType::Photography)),
            &analysis,
            &mut store,
        )
        .unwrap();

    assert!(report.success);
    assert!(!report.client_added);
    assert_eq!(report.warnings, vec!["Client 'Acme' already registered"]);
    assert_eq!(
        store.projects,
        vec![("Acme".to_string(), "2024-03-01-Launch".to_string())]
    );
}

#[test]
fn test_registry_failure_does_not_fail_generation() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::default();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, temp_dir.path().to_path_buf());
    let analysis = DirectoryAnalysis::outside(temp_dir.path());

    let mut store = StaleStore {
        fail_append: true,
        ..StaleStore::default()
    };
    let report = generator
        .generate_and_record(
            &client_request(MediaSelection::Single(MediaType::Photography)),
            &analysis,
            &mut store,
        )
        .unwrap();

    assert!(report.success);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[1].contains("disk full"));
    assert!(temp_dir
        .path()
        .join("PHOTO/Client Work/Acme/2024-03-01-Launch/RAW")
        .is_dir());
}

#[test]
fn test_assets_scaffold() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig::default();
    let templates = TemplateStore::builtin_only();
    let generator = ProjectGenerator::new(&config, &templates, PathBuf::from("/unused"));

    let report = generator.generate_assets(Some(temp_dir.path())).unwrap();
    let assets = temp_dir.path().join("Assets & Resources");

    assert!(report.success);
    assert_eq!(report.project_paths, vec![assets.clone()]);
    assert!(assets.join("Presets & Templates/LUTs for Video").is_dir());
    assert!(assets.join("Music & Sound Effects/Sound Effects").is_dir());
    assert_eq!(report.newly_created, report.created_folders.len());

    let again = generator.generate_assets(Some(temp_dir.path())).unwrap();
    assert_eq!(again.newly_created, 0);
}
