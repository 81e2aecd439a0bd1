use crate::errors::{GeneratorError, Result};
use crate::models::{ensure_unique_camera_folders, Camera, CameraAssignment, CameraPurpose};

const ASSIGNMENT_FORMAT: &str = "purpose:camera";

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', '_'], " ")
}

/// Finds a configured camera by name, ignoring case and `-`/`_` versus spaces.
pub fn find_camera<'a>(defaults: &'a [Camera], name: &str) -> Option<&'a Camera> {
    let key = lookup_key(name);
    defaults.iter().find(|camera| lookup_key(&camera.name) == key)
}

/// Parses `main:lumix,BTS:DJI POCKET` into camera assignments.
///
/// Cameras found in `defaults` keep their brand; other names become custom
/// cameras. Two entries that map to the same folder are rejected.
pub fn parse_camera_assignments(list: &str, defaults: &[Camera]) -> Result<Vec<CameraAssignment>> {
    let mut assignments = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((purpose, camera)) = entry.split_once(':') else {
            return Err(GeneratorError::InvalidCameraSpec {
                value: entry.to_string(),
                expected: ASSIGNMENT_FORMAT,
            });
        };

        let purpose: CameraPurpose = purpose.parse()?;
        let camera = match find_camera(defaults, camera) {
            Some(known) => known.clone(),
            None => Camera::new(camera)?,
        };
        assignments.push(CameraAssignment::new(camera, purpose));
    }

    ensure_unique_camera_folders(&assignments)?;
    Ok(assignments)
}
