//! Viewport management for pan/zoom operations
//!
//! Screen positions are local to the canvas area: `(0, 0)` is its top-left corner.

use crate::constants::{layout, zoom};
use crate::layout::{centroid, nodes_bounds};
use crate::nodes::Node;
use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Manages viewport state including pan and zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(with = "crate::nodes::serde_egui::vec2")]
    pub pan_offset: Vec2,
    pub zoom: f32,
}

impl Viewport {
    /// Creates a new viewport with default settings
    pub fn new() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Back to 100% with no pan
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Convert canvas coordinates to screen coordinates
    pub fn canvas_to_screen(&self, canvas_pos: Pos2) -> Pos2 {
        (canvas_pos.to_vec2() * self.zoom + self.pan_offset).to_pos2()
    }

    /// Convert screen coordinates to canvas coordinates
    pub fn screen_to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        ((screen_pos.to_vec2() - self.pan_offset) / self.zoom).to_pos2()
    }

    /// Sets the zoom, keeping the canvas point under `anchor` fixed on screen
    pub fn set_zoom_at(&mut self, anchor: Pos2, new_zoom: f32) {
        let old_zoom = self.zoom;
        self.zoom = clamp_zoom(new_zoom);

        let zoom_factor = self.zoom / old_zoom;
        let anchor = anchor.to_vec2();
        self.pan_offset = anchor - (anchor - self.pan_offset) * zoom_factor;
    }

    /// Zoom at a specific screen point by a multiplicative factor
    pub fn zoom_at_point(&mut self, anchor: Pos2, factor: f32) {
        self.set_zoom_at(anchor, self.zoom * factor);
    }

    /// One wheel tick: positive scroll zooms in, negative zooms out
    pub fn wheel_zoom(&mut self, anchor: Pos2, scroll_delta: f32) {
        if scroll_delta > 0.0 {
            self.zoom_at_point(anchor, zoom::WHEEL_IN_FACTOR);
        } else if scroll_delta < 0.0 {
            self.zoom_at_point(anchor, zoom::WHEEL_OUT_FACTOR);
        }
    }

    /// Toolbar zoom in
    pub fn zoom_in(&mut self, anchor: Pos2) {
        self.set_zoom_at(anchor, self.zoom + zoom::BUTTON_STEP);
    }

    /// Toolbar zoom out
    pub fn zoom_out(&mut self, anchor: Pos2) {
        self.set_zoom_at(anchor, self.zoom - zoom::BUTTON_STEP);
    }

    /// Apply pan offset
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Frames every node inside a container of `container` size.
    ///
    /// Never zooms in past 100%. Returns false and leaves the view alone when
    /// there are no nodes or the container has no area.
    pub fn fit_to_nodes(&mut self, nodes: &[Node], container: Vec2) -> bool {
        if !(container.x > 0.0 && container.y > 0.0) {
            return false;
        }
        let Some(bounds) = nodes_bounds(nodes, layout::FIT_PADDING) else {
            return false;
        };

        let fit = (container.x / bounds.width())
            .min(container.y / bounds.height())
            .min(zoom::FIT_MAX);
        self.zoom = fit.clamp(zoom::MIN, zoom::FIT_MAX);
        self.pan_offset = container * 0.5 - bounds.center().to_vec2() * self.zoom;
        true
    }

    /// Puts the centroid of the nodes in the middle of the container at the current zoom.
    ///
    /// With no nodes the pan resets to the origin.
    pub fn center_on_nodes(&mut self, nodes: &[Node], container: Vec2) {
        match centroid(nodes) {
            Some(center) => {
                self.pan_offset = container * 0.5 - center.to_vec2() * self.zoom;
            }
            None => self.pan_offset = Vec2::ZERO,
        }
    }

    /// Zoom as a whole percentage for the toolbar
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

/// Holds a zoom value inside the allowed range
pub fn clamp_zoom(value: f32) -> f32 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(zoom::MIN, zoom::MAX)
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
