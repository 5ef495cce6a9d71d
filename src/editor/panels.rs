//! Toolbar, palette, node properties, delete confirmation, and chat panels
//!
//! Panels only draw and report what the user asked for; the editor applies
//! the returned actions.

use crate::context::{Locale, ThemeMode};
use crate::editor::input::Tool;
use crate::editor::interaction::DragPayload;
use crate::i18n::{self, tr};
use crate::nodes::{ConnectionId, Node, NodeId, NodeKind, NodeStatus};
use crate::services::{ChatRole, ChatSession};
use crate::theme::{self, Colors, Dimensions};
use egui::{Align, Color32, Layout, RichText, Ui};

/// Actions available from the toolbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    NewFile,
    Open,
    Save,
    SaveAs,
    ZoomIn,
    ZoomOut,
    ResetView,
    Fit,
    Center,
    ToggleSnap,
    ToggleGrid,
    SetTool(Tool),
    ToggleSidebar,
    ToggleChat,
    ToggleTheme,
    SetLocale(Locale),
}

/// What the toolbar needs to draw itself
pub struct ToolbarState<'a> {
    pub locale: Locale,
    pub title: &'a str,
    pub zoom_percent: u32,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    pub show_sidebar: bool,
    pub show_chat: bool,
    pub tool: Tool,
    pub theme: ThemeMode,
}

pub fn render_toolbar(ui: &mut Ui, state: &ToolbarState<'_>) -> Vec<ToolbarAction> {
    let locale = state.locale;
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.menu_button(tr(locale, "file.menu"), |ui| {
            for (key, action) in [
                ("file.new", ToolbarAction::NewFile),
                ("file.open", ToolbarAction::Open),
                ("file.save", ToolbarAction::Save),
                ("file.save_as", ToolbarAction::SaveAs),
            ] {
                if ui.button(tr(locale, key)).clicked() {
                    actions.push(action);
                    ui.close_menu();
                }
            }
        });
        ui.label(RichText::new(state.title).color(Color32::LIGHT_BLUE));
        ui.separator();

        if ui.button("−").on_hover_text(tr(locale, "toolbar.zoom_out")).clicked() {
            actions.push(ToolbarAction::ZoomOut);
        }
        if ui
            .button(format!("{}%", state.zoom_percent))
            .on_hover_text(tr(locale, "toolbar.reset"))
            .clicked()
        {
            actions.push(ToolbarAction::ResetView);
        }
        if ui.button("+").on_hover_text(tr(locale, "toolbar.zoom_in")).clicked() {
            actions.push(ToolbarAction::ZoomIn);
        }
        if ui.button(tr(locale, "toolbar.fit")).clicked() {
            actions.push(ToolbarAction::Fit);
        }
        if ui.button(tr(locale, "toolbar.center")).clicked() {
            actions.push(ToolbarAction::Center);
        }
        ui.separator();

        if ui
            .selectable_label(state.tool == Tool::Select, "⬉")
            .on_hover_text(tr(locale, "toolbar.select_tool"))
            .clicked()
        {
            actions.push(ToolbarAction::SetTool(Tool::Select));
        }
        if ui
            .selectable_label(state.tool == Tool::Pan, "✋")
            .on_hover_text(tr(locale, "toolbar.pan_tool"))
            .clicked()
        {
            actions.push(ToolbarAction::SetTool(Tool::Pan));
        }
        if ui.selectable_label(state.snap_to_grid, tr(locale, "toolbar.snap")).clicked() {
            actions.push(ToolbarAction::ToggleSnap);
        }
        if ui.selectable_label(state.show_grid, tr(locale, "toolbar.grid")).clicked() {
            actions.push(ToolbarAction::ToggleGrid);
        }
        if ui.selectable_label(state.show_sidebar, tr(locale, "toolbar.sidebar")).clicked() {
            actions.push(ToolbarAction::ToggleSidebar);
        }
        if ui.selectable_label(state.show_chat, tr(locale, "chat.title")).clicked() {
            actions.push(ToolbarAction::ToggleChat);
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            let icon = match state.theme {
                ThemeMode::Dark => "☀",
                ThemeMode::Light => "🌙",
            };
            if ui.button(icon).on_hover_text(tr(locale, "toolbar.theme")).clicked() {
                actions.push(ToolbarAction::ToggleTheme);
            }
            let other = match locale {
                Locale::English => Locale::Arabic,
                Locale::Arabic => Locale::English,
            };
            if ui.button(other.native_name()).clicked() {
                actions.push(ToolbarAction::SetLocale(other));
            }
        });
    });

    actions
}

/// Draggable node palette
pub fn render_palette(ui: &mut Ui, locale: Locale) {
    ui.heading(tr(locale, "palette.title"));
    ui.label(RichText::new(tr(locale, "palette.hint")).small().weak());
    ui.add_space(8.0);

    let size = Dimensions::default().palette_item_size;
    for kind in NodeKind::ALL {
        let id = ui.id().with(("palette", kind.key()));
        ui.dnd_drag_source(id, DragPayload::for_kind(kind), |ui| {
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, theme::kind_color(kind)))
                .corner_radius(6.0)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.set_min_size(size);
                    ui.label(
                        RichText::new(format!("{}  {}", kind.icon(), i18n::kind_label(kind, locale)))
                            .color(theme::kind_color(kind)),
                    );
                });
        });
        ui.add_space(4.0);
    }
}

/// Edits reported by the properties window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyAction {
    /// Label, description, or lock changed in place
    Edited,
    SetStatus(NodeStatus),
    Duplicate,
    Delete,
    Connect(NodeId),
    Disconnect(ConnectionId),
}

/// Properties of one node. `targets` are nodes it may connect to and
/// `links` its existing connections, both with display names.
pub fn render_properties(
    ui: &mut Ui,
    node: &mut Node,
    targets: &[(NodeId, String)],
    links: &[(ConnectionId, String)],
    locale: Locale,
) -> Vec<PropertyAction> {
    let mut actions = Vec::new();
    let locked = node.flags.locked;

    egui::Grid::new("node_properties").num_columns(2).show(ui, |ui| {
        ui.label(tr(locale, "node.label"));
        if ui
            .add_enabled(!locked, egui::TextEdit::singleline(&mut node.label))
            .changed()
        {
            actions.push(PropertyAction::Edited);
        }
        ui.end_row();

        ui.label(tr(locale, "node.description"));
        if ui
            .add_enabled(!locked, egui::TextEdit::multiline(&mut node.description).desired_rows(2))
            .changed()
        {
            actions.push(PropertyAction::Edited);
        }
        ui.end_row();

        ui.label(tr(locale, "node.status"));
        let mut status = node.status;
        ui.add_enabled_ui(!locked, |ui| {
            egui::ComboBox::from_id_salt("node_status")
                .selected_text(i18n::status_label(status, locale))
                .show_ui(ui, |ui| {
                    for option in NodeStatus::ALL {
                        ui.selectable_value(&mut status, option, i18n::status_label(option, locale));
                    }
                });
        });
        if status != node.status {
            actions.push(PropertyAction::SetStatus(status));
        }
        ui.end_row();

        ui.label(tr(locale, "node.locked"));
        if ui.checkbox(&mut node.flags.locked, "").changed() {
            actions.push(PropertyAction::Edited);
        }
        ui.end_row();
    });

    ui.separator();
    egui::ComboBox::from_id_salt("node_connect")
        .selected_text(tr(locale, "node.connect"))
        .show_ui(ui, |ui| {
            for (id, name) in targets {
                if ui.selectable_label(false, name).clicked() {
                    actions.push(PropertyAction::Connect(*id));
                }
            }
        });
    for (id, name) in links {
        ui.horizontal(|ui| {
            ui.label(format!("→ {}", name));
            if ui.small_button("✕").clicked() {
                actions.push(PropertyAction::Disconnect(*id));
            }
        });
    }

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(tr(locale, "node.duplicate")).clicked() {
            actions.push(PropertyAction::Duplicate);
        }
        if ui.add_enabled(!locked, egui::Button::new(tr(locale, "node.delete"))).clicked() {
            actions.push(PropertyAction::Delete);
        }
    });

    actions
}

/// Modal-style confirmation. `Some(true)` confirms, `Some(false)` cancels.
pub fn render_delete_dialog(ctx: &egui::Context, label: &str, locale: Locale) -> Option<bool> {
    let mut choice = None;
    egui::Window::new(tr(locale, "delete.title"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(RichText::new(label).strong());
            ui.label(tr(locale, "delete.confirm"));
            ui.horizontal(|ui| {
                if ui.button(tr(locale, "common.yes")).clicked() {
                    choice = Some(true);
                }
                if ui.button(tr(locale, "common.no")).clicked() {
                    choice = Some(false);
                }
            });
        });
    choice
}

/// Chat actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Send,
    Analyze,
    Clear,
    Archive,
}

pub fn render_chat(
    ui: &mut Ui,
    session: &ChatSession,
    draft: &mut String,
    busy: bool,
    colors: &Colors,
    locale: Locale,
) -> Option<ChatAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(tr(locale, "chat.title"));
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .add_enabled(!busy, egui::Button::new(tr(locale, "chat.clear")).small())
                .clicked()
            {
                action = Some(ChatAction::Clear);
            }
            if ui
                .add_enabled(!session.is_empty(), egui::Button::new(tr(locale, "chat.archive")).small())
                .clicked()
            {
                action = Some(ChatAction::Archive);
            }
        });
    });
    ui.separator();

    let input_height = 64.0;
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .max_height((ui.available_height() - input_height).max(0.0))
        .show(ui, |ui| {
            for message in session.messages() {
                // User bubbles sit at the end of the reading direction
                let user = message.role == ChatRole::User;
                let fill = if user { colors.bubble_user } else { colors.bubble_assistant };
                let align = if user != locale.is_rtl() { Align::Max } else { Align::Min };
                ui.with_layout(Layout::top_down(align), |ui| {
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(8.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_max_width(ui.available_width() * 0.85);
                            ui.label(RichText::new(&message.text).color(colors.node_text));
                            ui.label(
                                RichText::new(message.timestamp.format("%H:%M").to_string())
                                    .small()
                                    .color(colors.node_subtext),
                            );
                        });
                });
                ui.add_space(4.0);
            }
            if busy {
                ui.label(RichText::new(tr(locale, "chat.thinking")).italics().weak());
            }
        });

    ui.separator();
    let input = ui.add(
        egui::TextEdit::singleline(draft)
            .hint_text(tr(locale, "chat.placeholder"))
            .desired_width(f32::INFINITY),
    );
    let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    ui.horizontal(|ui| {
        let can_send = !busy && !draft.trim().is_empty();
        if ui.add_enabled(can_send, egui::Button::new(tr(locale, "chat.send"))).clicked()
            || (submitted && can_send)
        {
            action = Some(ChatAction::Send);
        }
        if ui
            .add_enabled(!busy, egui::Button::new(tr(locale, "chat.analyze")))
            .clicked()
        {
            action = Some(ChatAction::Analyze);
        }
    });

    action
}
