//! Centralized colors and dimensions for the canvas
//!
//! One palette per [`ThemeMode`]; widgets that egui draws itself follow
//! [`apply`].

use crate::context::ThemeMode;
use crate::nodes::{NodeKind, NodeStatus};
use egui::{Color32, Vec2};

/// Color palette for one theme mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colors {
    // Canvas
    pub canvas_background: Color32,
    pub grid_line: Color32,
    pub panel_background: Color32,

    // Nodes
    pub node_background: Color32,
    pub node_border: Color32,
    pub node_text: Color32,
    pub node_subtext: Color32,
    pub selection: Color32,
    pub locked_badge: Color32,

    // Connections
    pub connection_default: Color32,

    // Chat bubbles
    pub bubble_user: Color32,
    pub bubble_assistant: Color32,
}

impl Colors {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                canvas_background: Color32::from_rgb(24, 26, 31),
                grid_line: Color32::from_rgb(40, 44, 52),
                panel_background: Color32::from_rgb(22, 27, 34),
                node_background: Color32::from_rgb(45, 49, 58),
                node_border: Color32::from_rgb(70, 76, 88),
                node_text: Color32::from_rgb(230, 232, 236),
                node_subtext: Color32::from_rgb(150, 156, 168),
                selection: Color32::from_rgb(100, 150, 255),
                locked_badge: Color32::from_rgb(230, 180, 80),
                connection_default: Color32::from_rgb(200, 200, 200),
                bubble_user: Color32::from_rgb(52, 84, 140),
                bubble_assistant: Color32::from_rgb(48, 52, 60),
            },
            ThemeMode::Light => Self {
                canvas_background: Color32::from_rgb(246, 247, 249),
                grid_line: Color32::from_rgb(222, 225, 230),
                panel_background: Color32::from_rgb(255, 255, 255),
                node_background: Color32::from_rgb(255, 255, 255),
                node_border: Color32::from_rgb(200, 204, 212),
                node_text: Color32::from_rgb(30, 32, 36),
                node_subtext: Color32::from_rgb(100, 106, 118),
                selection: Color32::from_rgb(40, 110, 240),
                locked_badge: Color32::from_rgb(200, 140, 20),
                connection_default: Color32::from_rgb(120, 126, 138),
                bubble_user: Color32::from_rgb(210, 226, 255),
                bubble_assistant: Color32::from_rgb(236, 238, 242),
            },
        }
    }
}

/// Dimension constants
pub struct Dimensions {
    pub corner_radius: f32,
    pub border_width: f32,
    pub selected_border_width: f32,
    pub accent_width: f32,
    pub status_dot_radius: f32,
    pub connection_width: f32,
    pub palette_item_size: Vec2,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            corner_radius: 8.0,
            border_width: 1.0,
            selected_border_width: 2.5,
            accent_width: 4.0,
            status_dot_radius: 5.0,
            connection_width: 2.0,
            palette_item_size: Vec2::new(160.0, 36.0),
        }
    }
}

/// Accent color for a node kind, shared by both modes
pub fn kind_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Trigger => Color32::from_rgb(245, 158, 11),
        NodeKind::Action => Color32::from_rgb(59, 130, 246),
        NodeKind::Condition => Color32::from_rgb(168, 85, 247),
        NodeKind::Data => Color32::from_rgb(16, 185, 129),
        NodeKind::Schedule => Color32::from_rgb(236, 72, 153),
        NodeKind::Integration => Color32::from_rgb(14, 165, 233),
        NodeKind::Output => Color32::from_rgb(239, 68, 68),
    }
}

pub fn status_color(status: NodeStatus) -> Color32 {
    match status {
        NodeStatus::Idle => Color32::from_rgb(148, 163, 184),
        NodeStatus::Running => Color32::from_rgb(59, 130, 246),
        NodeStatus::Success => Color32::from_rgb(34, 197, 94),
        NodeStatus::Error => Color32::from_rgb(239, 68, 68),
        NodeStatus::Warning => Color32::from_rgb(234, 179, 8),
    }
}

/// Switches egui's own widgets to the matching visuals
pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
    let visuals = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_differ() {
        let dark = Colors::for_mode(ThemeMode::Dark);
        let light = Colors::for_mode(ThemeMode::Light);
        assert_ne!(dark.canvas_background, light.canvas_background);
        assert_ne!(dark.node_text, light.node_text);
    }

    #[test]
    fn test_kind_accents_are_distinct() {
        for (i, a) in NodeKind::ALL.iter().enumerate() {
            for b in &NodeKind::ALL[i + 1..] {
                assert_ne!(kind_color(*a), kind_color(*b));
            }
        }
    }
}
