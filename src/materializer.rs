use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{GeneratorError, Result};
use crate::models::ProjectConfig;
use crate::templates::FolderTemplate;

const CAPTURE_ONE: &str = "Capture One";
const PROXIES: &str = "Proxies";
const RAW: &str = "RAW";

/// Folders below the project root a materialization touched, in creation
/// order. Intermediate folders of nested paths are listed before their children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
    /// Every folder the template asked for, whether or not it already existed.
    pub ensured: Vec<PathBuf>,
    /// The subset of `ensured` that did not exist before.
    pub created: Vec<PathBuf>,
}

impl Materialized {
    fn ensure(&mut self, path: PathBuf) -> Result<()> {
        if ensure_dir(&path)? {
            self.created.push(path.clone());
        }
        self.ensured.push(path);
        Ok(())
    }

    /// Ensures `relative` under `root` one level at a time, so intermediate
    /// folders are reported too. Levels already reported are skipped.
    fn ensure_nested(&mut self, root: &Path, relative: &str) -> Result<PathBuf> {
        let mut path = root.to_path_buf();
        for component in Path::new(relative).components() {
            path.push(component);
            if !self.ensured.contains(&path) {
                self.ensure(path.clone())?;
            }
        }
        Ok(path)
    }

    fn ensure_camera_folders(&mut self, parent: &Path, config: &ProjectConfig) -> Result<()> {
        for assignment in &config.camera_assignments {
            self.ensure(parent.join(assignment.folder_name()))?;
        }
        Ok(())
    }
}

/// Lays `template` out under `project_root`: required folders, then nested
/// ones, then optional ones the project opted into. Folders that already
/// exist are left alone. Stops at the first folder that cannot be created;
/// anything made before that stays on disk.
pub fn materialize(
    project_root: &Path,
    template: &FolderTemplate,
    config: &ProjectConfig,
) -> Result<Materialized> {
    let mut result = Materialized::default();
    let camera_folders = config.wants_camera_folders();

    for folder in &template.required {
        result.ensure_nested(project_root, folder)?;
    }

    for (parent, children) in &template.subfolders {
        let parent_path = result.ensure_nested(project_root, parent)?;

        for child in children {
            let child_path = result.ensure_nested(&parent_path, child)?;

            if camera_folders && child == RAW {
                result.ensure_camera_folders(&child_path, config)?;
            }
        }
    }

    for optional in &template.optional {
        let wanted = (optional.contains(CAPTURE_ONE) && config.include_capture_one)
            || (optional.contains(PROXIES) && config.include_proxies);
        if !wanted {
            continue;
        }

        let folder_path = result.ensure_nested(project_root, optional)?;

        if camera_folders && optional.contains(PROXIES) {
            result.ensure_camera_folders(&folder_path, config)?;
        }
    }

    Ok(result)
}

/// Returns whether the directory had to be created.
fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|source| GeneratorError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
