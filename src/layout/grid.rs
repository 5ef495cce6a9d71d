//! Grid quantization for node placement

use crate::constants::layout;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Rounds `value` to the nearest multiple of `cell`.
///
/// A non-positive or non-finite cell leaves the value untouched.
pub fn snap(value: f32, cell: f32) -> f32 {
    if !(cell.is_finite() && cell > 0.0) {
        return value;
    }
    (value / cell).round() * cell
}

/// Per-axis grid snapping that can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSnap {
    #[serde(with = "crate::nodes::serde_egui::vec2")]
    pub cell: Vec2,
    pub enabled: bool,
}

impl GridSnap {
    pub fn new(cell: Vec2, enabled: bool) -> Self {
        Self { cell, enabled }
    }

    /// Snaps each axis independently; identity when disabled
    pub fn snap_pos(&self, pos: Pos2) -> Pos2 {
        if !self.enabled {
            return pos;
        }
        Pos2::new(snap(pos.x, self.cell.x), snap(pos.y, self.cell.y))
    }
}

impl Default for GridSnap {
    fn default() -> Self {
        Self {
            cell: Vec2::new(layout::GRID_CELL_X, layout::GRID_CELL_Y),
            enabled: true,
        }
    }
}
