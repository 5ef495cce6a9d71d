//! FlowCanvas - bilingual node canvas for sketching automation workflows

use eframe::egui;
use flowcanvas::context::AppContext;
use flowcanvas::services::{FileStore, KeyValueStore, MemoryStore};
use flowcanvas::{theme, CanvasEditor};

/// Preferences file, or an in-memory store when the data directory is unusable
fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            log::info!("Preferences at {}", store.path().display());
            Box::new(store)
        }
        Err(err) => {
            log::warn!("Preferences will not persist: {}", err);
            Box::new(MemoryStore::new())
        }
    }
}

/// Language preference from the environment, e.g. `ar-SA,en;q=0.5` or `ar_SA.UTF-8`
fn language_hint() -> Option<String> {
    ["FLOWCANVAS_LANG", "LANGUAGE", "LANG"]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut store = open_store();
    let context = AppContext::load(store.as_mut(), language_hint().as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0])
            .with_app_id("com.flowcanvas.editor"),
        ..Default::default()
    };

    eframe::run_native(
        "FlowCanvas",
        options,
        Box::new(move |cc| {
            theme::apply(&cc.egui_ctx, context.theme);
            Ok(Box::new(CanvasEditor::new(store, context)))
        }),
    )
}
