//! Canvas editor implementation

pub mod canvas_rendering;
pub mod file_manager;
pub mod input;
pub mod interaction;
pub mod panels;
pub mod viewport;
pub mod worker;

pub use canvas_rendering::CanvasRenderer;
pub use file_manager::FileManager;
pub use input::{GestureState, Tool};
pub use interaction::{DragPayload, InteractionManager};
pub use viewport::Viewport;
pub use worker::{AssistantEvent, AssistantJob, AssistantWorker};

use crate::context::{AppContext, Locale};
use crate::i18n::tr;
use crate::layout::Placement;
use crate::nodes::{FlowGraph, NodeId};
use crate::services::{ChatSession, KeyValueStore, MockAssistant, ResponseGenerator};
use crate::theme::{self, Colors};
use eframe::egui;
use egui::{PointerButton, Pos2, Rect, Sense, Vec2};
use panels::{ChatAction, PropertyAction, ToolbarAction, ToolbarState};

/// Main application state for the canvas editor
pub struct CanvasEditor {
    graph: FlowGraph,
    viewport: Viewport,
    gesture: GestureState,
    tool: Tool,
    interaction: InteractionManager,
    file_manager: FileManager,
    context: AppContext,
    store: Box<dyn KeyValueStore>,
    chat: ChatSession,
    chat_draft: String,
    show_chat: bool,
    worker: AssistantWorker,
    /// Size of the canvas area last frame, for toolbar fit and center
    canvas_size: Vec2,
    /// One-line notice shown under the canvas
    notice: Option<String>,
}

impl CanvasEditor {
    /// Editor backed by the mock assistant configured in `context`
    pub fn new(store: Box<dyn KeyValueStore>, context: AppContext) -> Self {
        let assistant = MockAssistant::new(context.assistant.clone());
        Self::with_assistant(store, context, Box::new(assistant))
    }

    pub fn with_assistant(
        store: Box<dyn KeyValueStore>,
        context: AppContext,
        assistant: Box<dyn ResponseGenerator + Send>,
    ) -> Self {
        let chat = ChatSession::restore(store.as_ref());
        log::info!(
            "Editor ready: language '{}', {} chat messages restored",
            context.locale.code(),
            chat.messages().len()
        );
        Self {
            graph: FlowGraph::new(),
            viewport: Viewport::new(),
            gesture: GestureState::new(),
            tool: Tool::default(),
            interaction: InteractionManager::new(),
            file_manager: FileManager::new(),
            context,
            store,
            chat,
            chat_draft: String::new(),
            show_chat: false,
            worker: AssistantWorker::spawn(assistant),
            canvas_size: Vec2::ZERO,
            notice: None,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    fn locale(&self) -> Locale {
        self.context.locale
    }

    fn save_preferences(&mut self) {
        if !self.context.save(self.store.as_mut()) {
            log::warn!("Some preferences could not be saved");
        }
    }

    fn report_placement(&mut self, placement: &Placement) {
        if placement.moved() {
            self.notice = Some(tr(self.locale(), "canvas.auto_moved").to_string());
        }
    }

    fn report_error(&mut self, message: String) {
        log::error!("{}", message);
        self.notice = Some(message);
    }

    pub fn new_file(&mut self) {
        self.graph = FlowGraph::new();
        self.viewport.reset();
        self.gesture.cancel();
        self.interaction.cancel_delete();
        self.file_manager.new_file();
    }

    fn open_file_dialog(&mut self) {
        match self.file_manager.open_file_dialog() {
            Ok(Some((graph, viewport))) => {
                self.graph = graph;
                self.viewport = viewport;
                self.gesture.cancel();
                self.interaction.cancel_delete();
            }
            Ok(None) => {}
            Err(err) => self.report_error(err),
        }
    }

    fn save_file(&mut self) {
        if self.file_manager.current_file_path().is_none() {
            self.save_as_file_dialog();
        } else if let Err(err) = self.file_manager.save_file(&self.graph, &self.viewport) {
            self.report_error(err);
        }
    }

    fn save_as_file_dialog(&mut self) {
        if let Err(err) = self.file_manager.save_as_file_dialog(&self.graph, &self.viewport) {
            self.report_error(err);
        }
    }

    fn apply_toolbar_action(&mut self, action: ToolbarAction) {
        let center = (self.canvas_size * 0.5).to_pos2();
        match action {
            ToolbarAction::NewFile => self.new_file(),
            ToolbarAction::Open => self.open_file_dialog(),
            ToolbarAction::Save => self.save_file(),
            ToolbarAction::SaveAs => self.save_as_file_dialog(),
            ToolbarAction::ZoomIn => self.viewport.zoom_in(center),
            ToolbarAction::ZoomOut => self.viewport.zoom_out(center),
            ToolbarAction::ResetView => self.viewport.reset(),
            ToolbarAction::Fit => {
                if !self.viewport.fit_to_nodes(&self.graph.nodes, self.canvas_size) {
                    log::debug!("Nothing to fit");
                }
            }
            ToolbarAction::Center => self.viewport.center_on_nodes(&self.graph.nodes, self.canvas_size),
            ToolbarAction::ToggleSnap => {
                self.context.canvas.snap_to_grid = !self.context.canvas.snap_to_grid;
                self.save_preferences();
            }
            ToolbarAction::ToggleGrid => {
                self.context.canvas.show_grid = !self.context.canvas.show_grid;
                self.save_preferences();
            }
            ToolbarAction::SetTool(tool) => self.tool = tool,
            ToolbarAction::ToggleSidebar => {
                self.context.canvas.show_sidebar = !self.context.canvas.show_sidebar;
                self.save_preferences();
            }
            ToolbarAction::ToggleChat => self.show_chat = !self.show_chat,
            ToolbarAction::ToggleTheme => {
                self.context.theme = self.context.theme.toggled();
                self.save_preferences();
            }
            ToolbarAction::SetLocale(locale) => {
                log::info!("Switching language to '{}'", locale.code());
                self.context.locale = locale;
                self.save_preferences();
            }
        }
    }

    fn apply_property_action(&mut self, node_id: NodeId, action: PropertyAction) {
        let config = self.context.canvas.placement_config();
        let result = match action {
            PropertyAction::Edited => Ok(()),
            PropertyAction::SetStatus(status) => self.graph.set_status(node_id, status),
            PropertyAction::Duplicate => self.graph.duplicate_node(node_id, &config).map(|(copy, placement)| {
                self.graph.select_only(copy);
                self.report_placement(&placement);
            }),
            PropertyAction::Delete => self.interaction.request_delete(&self.graph, node_id),
            PropertyAction::Connect(target) => self.graph.add_connection(node_id, target).map(|_| ()),
            PropertyAction::Disconnect(connection) => {
                self.graph.remove_connection(connection);
                Ok(())
            }
        };
        match result {
            Ok(()) if action != PropertyAction::Delete => self.file_manager.mark_modified(),
            Ok(()) => {}
            Err(err) => self.report_error(err.to_string()),
        }
    }

    fn send_chat(&mut self) {
        let locale = self.locale();
        let Some(prompt) = self.chat.push_user(&self.chat_draft).map(|m| m.text.clone()) else {
            return;
        };
        self.chat_draft.clear();
        let submitted = self.worker.submit(AssistantJob::Chat {
            prompt,
            locale,
            context: None,
        });
        if !submitted {
            self.chat.push_reply(
                Err(crate::services::ServiceError::Unavailable("assistant".to_string())),
                locale,
            );
        }
    }

    fn apply_chat_action(&mut self, action: ChatAction) {
        let locale = self.locale();
        match action {
            ChatAction::Send => self.send_chat(),
            ChatAction::Analyze => {
                self.worker.submit(AssistantJob::Analyze {
                    graph: self.graph.clone(),
                    locale,
                });
            }
            ChatAction::Clear => {
                // A pending reply would land in the emptied session
                if self.worker.is_busy() {
                    log::debug!("Ignoring chat clear while a reply is pending");
                    return;
                }
                self.chat.clear();
                self.chat.persist(self.store.as_mut());
            }
            ChatAction::Archive => {
                self.worker.submit(AssistantJob::Archive {
                    session: self.chat.clone(),
                    locale,
                });
            }
        }
    }

    /// Applies finished assistant work
    fn poll_worker(&mut self) {
        let locale = self.locale();
        for event in self.worker.poll() {
            match event {
                AssistantEvent::Reply(reply) => {
                    self.chat.push_reply(reply, locale);
                    self.chat.persist(self.store.as_mut());
                }
                AssistantEvent::Analysis(result) => {
                    self.chat.push_reply(result.map(|analysis| analysis.reply), locale);
                    self.chat.persist(self.store.as_mut());
                }
                AssistantEvent::Archived(Ok(id)) => log::info!("Conversation archived as {}", id),
                AssistantEvent::Archived(Err(err)) => self.report_error(err.to_string()),
            }
        }
    }

    /// Queues a delete confirmation for the selected node. Deletion is one
    /// node at a time, so a multi-selection only gets a notice.
    fn request_delete_selected(&mut self) {
        match self.graph.selected_ids().as_slice() {
            [] => {}
            [id] => {
                if let Err(err) = self.interaction.request_delete(&self.graph, *id) {
                    self.report_error(err.to_string());
                }
            }
            _ => self.notice = Some(tr(self.locale(), "delete.single").to_string()),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let (delete, duplicate, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace),
                i.modifiers.command && i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if delete {
            self.request_delete_selected();
        }
        if duplicate {
            let config = self.context.canvas.placement_config();
            if !self.interaction.duplicate_selected(&mut self.graph, &config).is_empty() {
                self.file_manager.mark_modified();
            }
        }
        if escape {
            self.gesture.cancel();
            self.interaction.cancel_delete();
            self.interaction.click_empty(&mut self.graph);
        }
    }

    /// Draws the canvas and routes pointer input to gestures, selection, and drops
    fn show_canvas(&mut self, ui: &mut egui::Ui, colors: &Colors) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        self.canvas_size = rect.size();
        let origin = rect.min.to_vec2();
        let locale = self.locale();
        let config = self.context.canvas.placement_config();
        let (modifiers, scroll, pointer, press_origin, time) = ui.input(|i| {
            (
                i.modifiers,
                i.raw_scroll_delta.y,
                i.pointer.interact_pos(),
                i.pointer.press_origin(),
                i.time,
            )
        });
        // Screen coordinates local to the canvas area
        let local = |pos: Pos2| pos - origin;

        if response.hovered() && scroll != 0.0 {
            if let Some(pointer) = pointer {
                self.viewport.wheel_zoom(local(pointer), scroll);
            }
        }

        if response.drag_started() {
            let start = press_origin.or(pointer).map(local);
            let button = [PointerButton::Primary, PointerButton::Middle, PointerButton::Secondary]
                .into_iter()
                .find(|button| response.drag_started_by(*button));
            if let (Some(start), Some(button)) = (start, button) {
                if input::is_pan_trigger(button, modifiers, self.tool) {
                    self.gesture.begin_pan(start, &self.viewport);
                } else if button == PointerButton::Primary {
                    if let Some(id) = self.graph.node_at(self.viewport.screen_to_canvas(start)) {
                        self.interaction
                            .click_node(&mut self.graph, id, input::is_multi_select(modifiers));
                        self.gesture.begin_node_drag(start, &self.viewport, &self.graph);
                    }
                }
            }
        }

        if response.dragged() {
            if let Some(pointer) = pointer {
                self.gesture.update(local(pointer), &mut self.viewport, &mut self.graph);
            }
        }

        if response.drag_stopped() {
            let dragged = self.gesture.is_dragging_nodes();
            let settled = self.gesture.end(&mut self.graph, &config);
            for (_, placement) in &settled {
                self.report_placement(placement);
            }
            if dragged {
                self.file_manager.mark_modified();
            }
        }

        if response.clicked() {
            if let Some(pointer) = pointer {
                let canvas_pos = self.viewport.screen_to_canvas(local(pointer));
                match self.graph.node_at(canvas_pos) {
                    Some(id) => self
                        .interaction
                        .click_node(&mut self.graph, id, input::is_multi_select(modifiers)),
                    None => self.interaction.click_empty(&mut self.graph),
                }
            }
        }

        if let Some(payload) = response.dnd_release_payload::<DragPayload>() {
            if let Some(pointer) = pointer {
                let canvas_pos = self.viewport.screen_to_canvas(local(pointer));
                match self
                    .interaction
                    .drop_payload(&mut self.graph, &payload, canvas_pos, &config, locale)
                {
                    Ok((_, placement)) => {
                        self.report_placement(&placement);
                        self.file_manager.mark_modified();
                    }
                    Err(err) => self.report_error(err),
                }
            }
        }

        if self.gesture.is_panning() || self.tool == input::Tool::Pan {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, colors.canvas_background);

        let zoom = self.viewport.zoom;
        let viewport = self.viewport;
        let transform_pos = |pos: Pos2| viewport.canvas_to_screen(pos) + origin;

        if self.context.canvas.show_grid {
            CanvasRenderer::render_grid(
                &painter,
                rect,
                self.context.canvas.grid_size,
                zoom,
                viewport.pan_offset,
                colors.grid_line,
            );
        }

        let mut animating = false;
        for connection in &self.graph.connections {
            if let (Some(from), Some(to)) = (self.graph.node(connection.from_node), self.graph.node(connection.to_node)) {
                animating |= connection.animated;
                CanvasRenderer::render_connection(&painter, connection, from, to, zoom, time, transform_pos);
            }
        }

        let visible = Rect::from_min_max(
            viewport.screen_to_canvas(Pos2::ZERO),
            viewport.screen_to_canvas(rect.size().to_pos2()),
        );
        for node in self.graph.nodes.iter().filter(|n| n.flags.visible) {
            if visible.intersects(node.get_rect()) {
                CanvasRenderer::render_node(&painter, node, colors, locale, zoom, transform_pos);
            }
        }

        if self.graph.is_empty() {
            CanvasRenderer::render_empty_hint(&painter, rect, colors, locale);
        }
        if animating {
            ui.ctx().request_repaint();
        }
    }

    /// Floating properties window for the single selected node
    fn show_properties(&mut self, ctx: &egui::Context) {
        let selected = self.graph.selected_ids();
        let [node_id] = selected.as_slice() else {
            return;
        };
        let node_id = *node_id;
        let locale = self.locale();

        let targets: Vec<(NodeId, String)> = self
            .graph
            .nodes
            .iter()
            .filter(|n| n.id != node_id)
            .filter(|n| {
                !self
                    .graph
                    .connections
                    .iter()
                    .any(|c| c.from_node == node_id && c.to_node == n.id)
            })
            .map(|n| (n.id, n.label.clone()))
            .collect();
        let links: Vec<_> = self
            .graph
            .connections
            .iter()
            .filter(|c| c.from_node == node_id)
            .filter_map(|c| self.graph.node(c.to_node).map(|to| (c.id, to.label.clone())))
            .collect();

        let Some(node) = self.graph.node_mut(node_id) else {
            return;
        };
        let mut actions = Vec::new();
        egui::Window::new(tr(locale, "node.properties"))
            .id(egui::Id::new("node_properties_window"))
            .default_width(260.0)
            .show(ctx, |ui| {
                actions = panels::render_properties(ui, node, &targets, &links, locale);
            });
        for action in actions {
            self.apply_property_action(node_id, action);
        }
    }

    fn show_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some(node_id) = self.interaction.pending_delete() else {
            return;
        };
        let label = self
            .graph
            .node(node_id)
            .map(|node| node.label.clone())
            .unwrap_or_default();
        match panels::render_delete_dialog(ctx, &label, self.locale()) {
            Some(true) => {
                if self.interaction.confirm_delete(&mut self.graph).is_some() {
                    self.file_manager.mark_modified();
                }
            }
            Some(false) => self.interaction.cancel_delete(),
            None => {}
        }
    }
}

impl eframe::App for CanvasEditor {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.worker.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        theme::apply(ctx, self.context.theme);
        let colors = Colors::for_mode(self.context.theme);
        let locale = self.locale();
        let title = self.file_manager.display_name(tr(locale, "file.untitled"));

        let actions = egui::TopBottomPanel::top("toolbar")
            .frame(egui::Frame::new().fill(colors.panel_background).inner_margin(6.0))
            .show(ctx, |ui| {
                let state = ToolbarState {
                    locale,
                    title: &title,
                    zoom_percent: self.viewport.zoom_percent(),
                    snap_to_grid: self.context.canvas.snap_to_grid,
                    show_grid: self.context.canvas.show_grid,
                    show_sidebar: self.context.canvas.show_sidebar,
                    show_chat: self.show_chat,
                    tool: self.tool,
                    theme: self.context.theme,
                };
                panels::render_toolbar(ui, &state)
            })
            .inner;
        for action in actions {
            self.apply_toolbar_action(action);
        }

        if let Some(notice) = self.notice.clone() {
            egui::TopBottomPanel::bottom("notice").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(notice);
                    if ui.small_button("✕").clicked() {
                        self.notice = None;
                    }
                });
            });
        }

        // The palette sits on the reading-start side
        if self.context.canvas.show_sidebar {
            let panel = if locale.is_rtl() {
                egui::SidePanel::right("palette")
            } else {
                egui::SidePanel::left("palette")
            };
            panel.resizable(false).default_width(190.0).show(ctx, |ui| {
                panels::render_palette(ui, locale);
            });
        }

        if self.show_chat {
            let panel = if locale.is_rtl() {
                egui::SidePanel::left("chat")
            } else {
                egui::SidePanel::right("chat")
            };
            let busy = self.worker.is_busy();
            let action = panel
                .default_width(320.0)
                .show(ctx, |ui| {
                    panels::render_chat(ui, &self.chat, &mut self.chat_draft, busy, &colors, locale)
                })
                .inner;
            if let Some(action) = action {
                self.apply_chat_action(action);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| self.show_canvas(ui, &colors));

        self.show_properties(ctx);
        self.show_delete_dialog(ctx);
        self.handle_shortcuts(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.gesture.cancel();
        self.worker.shutdown();
        self.save_preferences();
        if !self.chat.persist(self.store.as_mut()) {
            log::warn!("Chat history was not saved");
        }
        if self.file_manager.has_unsaved_changes() {
            log::warn!("Exiting with unsaved changes");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage;
    use crate::nodes::{Node, NodeKind, NodeStatus};
    use crate::services::{AssistantSettings, MemoryStore};

    fn editor() -> CanvasEditor {
        let assistant = MockAssistant::with_seed(AssistantSettings::instant(), 11);
        CanvasEditor::with_assistant(Box::new(MemoryStore::new()), AppContext::default(), Box::new(assistant))
    }

    #[test]
    fn test_toolbar_toggles_are_persisted() {
        let mut editor = editor();
        editor.apply_toolbar_action(ToolbarAction::ToggleSnap);
        editor.apply_toolbar_action(ToolbarAction::SetLocale(Locale::Arabic));
        assert!(!editor.context().canvas.snap_to_grid);

        let stored = editor.store.get(storage::LANGUAGE).unwrap();
        assert_eq!(stored.as_deref(), Some("\"ar\""));
    }

    #[test]
    fn test_toolbar_zoom_uses_canvas_center() {
        let mut editor = editor();
        editor.canvas_size = Vec2::new(800.0, 600.0);
        editor.apply_toolbar_action(ToolbarAction::ZoomIn);
        assert!((editor.viewport().zoom - 1.2).abs() < 1e-5);
        // The canvas center stays put
        let center = editor.viewport().screen_to_canvas(Pos2::new(400.0, 300.0));
        assert!((center - Pos2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_property_actions() {
        let mut editor = editor();
        let a = editor.graph.add_node(Node::new(NodeKind::Trigger, "a", Pos2::ZERO));
        let b = editor.graph.add_node(Node::new(NodeKind::Output, "b", Pos2::new(440.0, 0.0)));

        editor.apply_property_action(a, PropertyAction::Connect(b));
        editor.apply_property_action(a, PropertyAction::SetStatus(NodeStatus::Running));
        assert_eq!(editor.graph().connections.len(), 1);
        assert!(editor.graph().node(a).unwrap().flags.executing);
        assert!(editor.file_manager.has_unsaved_changes());

        editor.apply_property_action(a, PropertyAction::Connect(a));
        assert!(editor.notice.is_some());

        editor.apply_property_action(b, PropertyAction::Delete);
        assert_eq!(editor.interaction.pending_delete(), Some(b));
    }

    #[test]
    fn test_chat_round_trip_through_worker() {
        let mut editor = editor();
        editor.chat_draft = "hello".to_string();
        editor.apply_chat_action(ChatAction::Send);
        assert!(editor.chat_draft.is_empty());

        let event = editor.worker.wait(std::time::Duration::from_secs(5));
        match event {
            Some(AssistantEvent::Reply(reply)) => {
                editor.chat.push_reply(reply, Locale::English);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(editor.chat.messages().len(), 2);
    }

    #[test]
    fn test_delete_key_needs_single_selection() {
        let mut editor = editor();
        let a = editor.graph.add_node(Node::new(NodeKind::Trigger, "a", Pos2::ZERO));
        let b = editor.graph.add_node(Node::new(NodeKind::Output, "b", Pos2::new(440.0, 0.0)));
        editor.graph.select_only(a);
        editor.graph.toggle_selected(b);

        editor.request_delete_selected();
        assert_eq!(editor.interaction.pending_delete(), None);
        assert!(editor.notice.is_some());

        editor.graph.select_only(b);
        editor.request_delete_selected();
        assert_eq!(editor.interaction.pending_delete(), Some(b));
    }

    #[test]
    fn test_clear_waits_for_pending_reply() {
        let mut editor = editor();
        editor.chat_draft = "hello".to_string();
        editor.apply_chat_action(ChatAction::Send);
        assert!(editor.worker.is_busy());

        editor.apply_chat_action(ChatAction::Clear);
        assert_eq!(editor.chat.messages().len(), 1);

        assert!(editor.worker.wait(std::time::Duration::from_secs(5)).is_some());
        editor.apply_chat_action(ChatAction::Clear);
        assert!(editor.chat.is_empty());
    }

    #[test]
    fn test_failed_worker_leaves_apology_and_frees_chat() {
        struct Broken;
        impl ResponseGenerator for Broken {
            fn respond(
                &mut self,
                _message: &str,
                _locale: Locale,
                _context: Option<&str>,
            ) -> Result<String, crate::services::ServiceError> {
                panic!("generator failure");
            }
        }

        let mut editor =
            CanvasEditor::with_assistant(Box::new(MemoryStore::new()), AppContext::default(), Box::new(Broken));
        editor.chat_draft = "hello".to_string();
        editor.apply_chat_action(ChatAction::Send);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while editor.worker.is_busy() && std::time::Instant::now() < deadline {
            editor.poll_worker();
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert!(!editor.worker.is_busy());
        let messages = editor.chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, crate::services::chat::fallback_reply(Locale::English));
    }

    #[test]
    fn test_new_file_clears_canvas() {
        let mut editor = editor();
        editor.graph.add_node(Node::new(NodeKind::Data, "rows", Pos2::ZERO));
        editor.viewport.zoom = 2.0;
        editor.apply_toolbar_action(ToolbarAction::NewFile);
        assert!(editor.graph().is_empty());
        assert_eq!(*editor.viewport(), Viewport::new());
    }
}
