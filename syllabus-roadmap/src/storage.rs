//! JSON persistence of roadmap tree snapshots.

use std::path::{Path, PathBuf};

use tracing::debug;

use syllabus_core::errors::{RoadmapError, RoadmapResult};

use crate::graph::Roadmap;
use crate::tree::RoadmapTree;

/// Write the roadmap's tree snapshot as pretty UTF-8 JSON, creating parent
/// directories. A roadmap without a root is written as `{}`.
pub fn save_roadmap(roadmap: &Roadmap, path: &Path) -> RoadmapResult<PathBuf> {
    let failed = |reason: String| RoadmapError::PersistenceFailed {
        path: path.display().to_string(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
    }
    let json = roadmap.to_tree_json()?;
    let content = serde_json::to_string_pretty(&json).map_err(|e| failed(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| failed(e.to_string()))?;

    debug!(path = %path.display(), nodes = roadmap.len(), "roadmap saved");
    Ok(path.to_path_buf())
}

/// Read a tree snapshot written by [`save_roadmap`] and rebuild the roadmap.
/// The result passes `check_integrity`.
pub fn load_roadmap(path: &Path) -> RoadmapResult<Roadmap> {
    let failed = |reason: String| RoadmapError::PersistenceFailed {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| failed(e.to_string()))?;
    if value.as_object().is_some_and(|o| o.is_empty()) {
        return Ok(Roadmap::new());
    }
    let tree: RoadmapTree = serde_json::from_value(value).map_err(|e| failed(e.to_string()))?;
    let roadmap = Roadmap::from_tree(&tree)?;

    debug!(path = %path.display(), nodes = roadmap.len(), "roadmap loaded");
    Ok(roadmap)
}
