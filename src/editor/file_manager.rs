//! File management for canvases
//!
//! Handles saving, loading, and modified-state tracking for flow graphs.

use crate::constants::file;
use crate::editor::viewport::Viewport;
use crate::nodes::FlowGraph;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Save file data structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: String,
    pub metadata: SaveMetadata,
    pub viewport: Viewport,
    pub graph: FlowGraph,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub created: String,
    pub modified: String,
    pub creator: String,
    #[serde(default)]
    pub description: String,
}

/// Tracks the open file and whether it has unsaved changes
#[derive(Debug, Default)]
pub struct FileManager {
    current_file_path: Option<PathBuf>,
    /// Creation time of the open file, kept across saves
    created: Option<String>,
    is_modified: bool,
}

impl FileManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.is_modified
    }

    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    /// Name for the window title, with `*` when modified
    pub fn display_name(&self, untitled: &str) -> String {
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(untitled);
        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    /// Forget the current file
    pub fn new_file(&mut self) {
        self.current_file_path = None;
        self.created = None;
        self.is_modified = false;
    }

    pub fn save_to_file(&mut self, file_path: &Path, graph: &FlowGraph, viewport: &Viewport) -> Result<(), String> {
        let now = chrono::Utc::now().to_rfc3339();
        let save_data = SaveData {
            version: file::FORMAT_VERSION.to_string(),
            metadata: SaveMetadata {
                created: self.created.clone().unwrap_or_else(|| now.clone()),
                modified: now,
                creator: file::CREATOR.to_string(),
                description: format!("Workflow with {} nodes", graph.len()),
            },
            viewport: *viewport,
            graph: graph.clone(),
        };

        let json_content = serde_json::to_string_pretty(&save_data)
            .map_err(|e| format!("Failed to serialize save data: {}", e))?;

        std::fs::write(file_path, json_content).map_err(|e| format!("Failed to write file: {}", e))?;

        log::info!("Saved {} nodes to {}", graph.len(), file_path.display());
        self.current_file_path = Some(file_path.to_path_buf());
        self.created = Some(save_data.metadata.created);
        self.is_modified = false;
        Ok(())
    }

    pub fn load_from_file(&mut self, file_path: &Path) -> Result<(FlowGraph, Viewport), String> {
        let file_content =
            std::fs::read_to_string(file_path).map_err(|e| format!("Failed to read file: {}", e))?;

        let save_data: SaveData =
            serde_json::from_str(&file_content).map_err(|e| format!("Failed to parse save file: {}", e))?;

        if save_data.version != file::FORMAT_VERSION {
            log::warn!(
                "{} has format version {}, expected {}",
                file_path.display(),
                save_data.version,
                file::FORMAT_VERSION
            );
        }

        // Zoom may have been edited by hand
        let mut viewport = save_data.viewport;
        viewport.zoom = crate::editor::viewport::clamp_zoom(viewport.zoom);

        log::info!("Loaded {} nodes from {}", save_data.graph.len(), file_path.display());
        self.current_file_path = Some(file_path.to_path_buf());
        self.created = Some(save_data.metadata.created);
        self.is_modified = false;
        Ok((save_data.graph, viewport))
    }

    /// Save to the current path; errors when there is none yet
    pub fn save_file(&mut self, graph: &FlowGraph, viewport: &Viewport) -> Result<(), String> {
        match self.current_file_path.clone() {
            Some(path) => self.save_to_file(&path, graph, viewport),
            None => Err("No file path set. Use save_as instead.".to_string()),
        }
    }

    /// Open file dialog and load the selected file. `Ok(None)` when cancelled.
    pub fn open_file_dialog(&mut self) -> Result<Option<(FlowGraph, Viewport)>, String> {
        match rfd::FileDialog::new().add_filter("JSON files", &["json"]).pick_file() {
            Some(path) => self.load_from_file(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Save-as dialog. `Ok(false)` when cancelled.
    pub fn save_as_file_dialog(&mut self, graph: &FlowGraph, viewport: &Viewport) -> Result<bool, String> {
        match rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .set_file_name("workflow.json")
            .save_file()
        {
            Some(path) => self.save_to_file(&path, graph, viewport).map(|_| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlacementConfig;
    use crate::nodes::NodeKind;
    use egui::{Pos2, Vec2};

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("flowcanvas-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut graph = FlowGraph::new();
        let config = PlacementConfig::default();
        let (a, _) = graph.place_node(NodeKind::Trigger, "Start", Pos2::ZERO, &config);
        let (b, _) = graph.place_node(NodeKind::Output, "End", Pos2::ZERO, &config);
        graph.add_connection(a, b).unwrap();
        let viewport = Viewport {
            pan_offset: Vec2::new(12.0, -8.0),
            zoom: 1.5,
        };

        let path = temp_path();
        let mut manager = FileManager::new();
        manager.mark_modified();
        manager.save_to_file(&path, &graph, &viewport).unwrap();
        assert!(!manager.has_unsaved_changes());

        let (loaded_graph, loaded_viewport) = FileManager::new().load_from_file(&path).unwrap();
        assert_eq!(loaded_graph, graph);
        assert_eq!(loaded_viewport, viewport);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_clamps_zoom() {
        let path = temp_path();
        let mut manager = FileManager::new();
        let viewport = Viewport {
            pan_offset: Vec2::ZERO,
            zoom: 2.0,
        };
        manager.save_to_file(&path, &FlowGraph::new(), &viewport).unwrap();
        let text = std::fs::read_to_string(&path).unwrap().replace("\"zoom\": 2.0", "\"zoom\": 40.0");
        std::fs::write(&path, text).unwrap();

        let (_, loaded) = manager.load_from_file(&path).unwrap();
        assert_eq!(loaded.zoom, crate::constants::zoom::MAX);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_errors_are_reported() {
        let mut manager = FileManager::new();
        assert!(manager.load_from_file(&temp_path()).is_err());

        let path = temp_path();
        std::fs::write(&path, "{ not json").unwrap();
        let err = manager.load_from_file(&path).unwrap_err();
        assert!(err.starts_with("Failed to parse save file"));
        assert!(manager.current_file_path().is_none());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut manager = FileManager::new();
        assert!(manager.save_file(&FlowGraph::new(), &Viewport::new()).is_err());
    }

    #[test]
    fn test_display_name() {
        let mut manager = FileManager::new();
        assert_eq!(manager.display_name("Untitled"), "Untitled");
        manager.mark_modified();
        assert_eq!(manager.display_name("Untitled"), "Untitled*");

        let path = temp_path();
        manager.save_to_file(&path, &FlowGraph::new(), &Viewport::new()).unwrap();
        assert!(manager.display_name("Untitled").starts_with("flowcanvas-"));
        manager.new_file();
        assert_eq!(manager.display_name("Untitled"), "Untitled");
        std::fs::remove_file(path).ok();
    }
}
