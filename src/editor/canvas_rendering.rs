//! Painter-based rendering for the canvas: grid, connections, and nodes

use crate::context::Locale;
use crate::i18n;
use crate::nodes::{Connection, Node};
use crate::theme::{self, Colors, Dimensions};
use egui::epaint::CubicBezierShape;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};

/// Below this on-screen spacing the grid is skipped
const MIN_GRID_SPACING: f32 = 8.0;
/// Seconds for a pulse to travel an animated connection
const PULSE_PERIOD: f64 = 1.6;

/// Stateless drawing helpers. `transform_pos` maps canvas to screen space.
pub struct CanvasRenderer;

impl CanvasRenderer {
    /// Grid lines aligned to the snap cell
    pub fn render_grid(painter: &Painter, clip: Rect, cell: Vec2, zoom: f32, pan_offset: Vec2, color: Color32) {
        let step = cell * zoom;
        if step.x < MIN_GRID_SPACING || step.y < MIN_GRID_SPACING {
            return;
        }
        let stroke = Stroke::new(1.0, color);

        let mut x = clip.min.x + pan_offset.x.rem_euclid(step.x);
        while x <= clip.max.x {
            painter.line_segment([Pos2::new(x, clip.min.y), Pos2::new(x, clip.max.y)], stroke);
            x += step.x;
        }
        let mut y = clip.min.y + pan_offset.y.rem_euclid(step.y);
        while y <= clip.max.y {
            painter.line_segment([Pos2::new(clip.min.x, y), Pos2::new(clip.max.x, y)], stroke);
            y += step.y;
        }
    }

    /// Bezier from the right edge of `from` to the left edge of `to`.
    /// `time` drives the pulse on animated connections.
    pub fn render_connection(
        painter: &Painter,
        connection: &Connection,
        from: &Node,
        to: &Node,
        zoom: f32,
        time: f64,
        transform_pos: impl Fn(Pos2) -> Pos2,
    ) {
        let start = transform_pos(Pos2::new(from.position.x + from.size.x, from.center().y));
        let end = transform_pos(Pos2::new(to.position.x, to.center().y));
        let handle = ((end.x - start.x).abs() * 0.5).max(40.0 * zoom);

        let curve = CubicBezierShape::from_points_stroke(
            [start, start + Vec2::new(handle, 0.0), end - Vec2::new(handle, 0.0), end],
            false,
            Color32::TRANSPARENT,
            Stroke::new(Dimensions::default().connection_width * zoom, connection.color),
        );
        if connection.animated {
            let t = ((time % PULSE_PERIOD) / PULSE_PERIOD) as f32;
            painter.circle_filled(curve.sample(t), 4.0 * zoom, connection.color);
        }
        painter.add(curve);
    }

    /// Card with accent bar, icon, label, description, status dot, and lock badge
    pub fn render_node(
        painter: &Painter,
        node: &Node,
        colors: &Colors,
        locale: Locale,
        zoom: f32,
        transform_pos: impl Fn(Pos2) -> Pos2,
    ) {
        let dims = Dimensions::default();
        let rect = Rect::from_two_pos(transform_pos(node.position), transform_pos(node.position + node.size));
        let radius = dims.corner_radius * zoom;
        let accent = theme::kind_color(node.kind);

        painter.rect_filled(rect, radius, colors.node_background);

        let accent_rect = Rect::from_min_max(rect.min, Pos2::new(rect.min.x + dims.accent_width * zoom, rect.max.y));
        painter.rect_filled(accent_rect, radius, accent);

        let (border_width, border_color) = if node.flags.selected {
            (dims.selected_border_width, colors.selection)
        } else if node.flags.executing {
            (dims.selected_border_width, theme::status_color(node.status))
        } else {
            (dims.border_width, colors.node_border)
        };
        painter.rect_stroke(rect, radius, Stroke::new(border_width * zoom, border_color), StrokeKind::Inside);

        // Too small to read
        if zoom < 0.35 {
            return;
        }

        let pad = 12.0 * zoom;
        let (anchor, text_x) = if locale.is_rtl() {
            (Align2::RIGHT_TOP, rect.max.x - pad)
        } else {
            (Align2::LEFT_TOP, rect.min.x + pad + dims.accent_width * zoom)
        };

        let title = format!("{} {}", node.kind.icon(), node.label);
        painter.text(
            Pos2::new(text_x, rect.min.y + pad),
            anchor,
            title,
            FontId::proportional(15.0 * zoom),
            colors.node_text,
        );

        let subtitle = if node.description.is_empty() {
            i18n::kind_label(node.kind, locale).to_string()
        } else {
            node.description.clone()
        };
        painter.text(
            Pos2::new(text_x, rect.min.y + pad + 22.0 * zoom),
            anchor,
            subtitle,
            FontId::proportional(12.0 * zoom),
            colors.node_subtext,
        );

        let dot = if locale.is_rtl() {
            Pos2::new(rect.min.x + pad, rect.max.y - pad)
        } else {
            Pos2::new(rect.max.x - pad, rect.max.y - pad)
        };
        painter.circle_filled(dot, dims.status_dot_radius * zoom, theme::status_color(node.status));
        painter.text(
            dot + Vec2::new((if locale.is_rtl() { 10.0 } else { -10.0 }) * zoom, 0.0),
            if locale.is_rtl() { Align2::LEFT_CENTER } else { Align2::RIGHT_CENTER },
            i18n::status_label(node.status, locale),
            FontId::proportional(11.0 * zoom),
            colors.node_subtext,
        );

        if node.flags.locked {
            let corner = if locale.is_rtl() {
                Pos2::new(rect.min.x + pad, rect.min.y + pad)
            } else {
                Pos2::new(rect.max.x - pad, rect.min.y + pad)
            };
            painter.text(corner, Align2::CENTER_TOP, "🔒", FontId::proportional(12.0 * zoom), colors.locked_badge);
        }
    }

    /// Hint shown on an empty canvas
    pub fn render_empty_hint(painter: &Painter, rect: Rect, colors: &Colors, locale: Locale) {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            i18n::tr(locale, "canvas.empty"),
            FontId::proportional(16.0),
            colors.node_subtext,
        );
    }
}
