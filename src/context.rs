//! Application context passed explicitly through the editor
//!
//! Language, theme, canvas, and assistant settings live here instead of in
//! globals. The context is loaded from and saved to a [`KeyValueStore`].

use crate::constants::{layout, storage};
use crate::layout::{GridSnap, PlacementConfig};
use crate::services::ai::AssistantSettings;
use crate::services::storage::{load_json, save_json, KeyValueStore};
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

/// Reading direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Arabic];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Arabic => "ar",
        }
    }

    /// Name of the language in itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Arabic => "العربية",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::English => TextDirection::LeftToRight,
            Locale::Arabic => TextDirection::RightToLeft,
        }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction() == TextDirection::RightToLeft
    }

    /// Matches a language tag such as `ar-SA` or `en_US.UTF-8` by its primary subtag
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_', '.'])
            .next()?
            .to_ascii_lowercase();
        Locale::ALL.into_iter().find(|locale| locale.code() == primary)
    }

    /// Picks the best supported language from an Accept-Language style list.
    ///
    /// Entries may carry `;q=` weights; the highest weight wins and ties go to
    /// the earlier entry. Falls back to English.
    pub fn negotiate(header: &str) -> Locale {
        let mut best: Option<(Locale, f32)> = None;
        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(locale) = parts.next().and_then(Locale::from_tag) else {
                continue;
            };
            let weight = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            if weight <= 0.0 {
                continue;
            }
            match best {
                Some((_, current)) if weight <= current => {}
                _ => best = Some((locale, weight)),
            }
        }
        best.map(|(locale, _)| locale).unwrap_or_default()
    }
}

/// Light or dark palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Runtime-adjustable canvas behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub snap_to_grid: bool,
    #[serde(with = "crate::nodes::serde_egui::vec2")]
    pub grid_size: Vec2,
    #[serde(with = "crate::nodes::serde_egui::vec2")]
    pub node_size: Vec2,
    pub collision_padding: f32,
    pub max_probes: u32,
    pub show_grid: bool,
    pub show_sidebar: bool,
}

impl CanvasSettings {
    pub fn placement_config(&self) -> PlacementConfig {
        PlacementConfig {
            grid: GridSnap::new(self.grid_size, self.snap_to_grid),
            node_size: self.node_size,
            padding: self.collision_padding,
            max_probes: self.max_probes,
        }
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            grid_size: Vec2::new(layout::GRID_CELL_X, layout::GRID_CELL_Y),
            node_size: Vec2::new(layout::NODE_WIDTH, layout::NODE_HEIGHT),
            collision_padding: layout::COLLISION_PADDING,
            max_probes: layout::MAX_PROBES,
            show_grid: true,
            show_sidebar: true,
        }
    }
}

/// Everything the editor needs to know about the user's preferences
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppContext {
    pub locale: Locale,
    pub theme: ThemeMode,
    pub canvas: CanvasSettings,
    pub assistant: AssistantSettings,
}

impl AppContext {
    /// Loads stored preferences, falling back to defaults for anything missing
    /// or unreadable. `language_hint` is consulted only when no language has
    /// been stored yet, and the negotiated choice is then persisted.
    pub fn load(store: &mut dyn KeyValueStore, language_hint: Option<&str>) -> Self {
        let locale = Self::resolve_locale(store, language_hint);
        Self {
            locale,
            theme: load_json(&*store, storage::THEME).unwrap_or_default(),
            canvas: load_json(&*store, storage::CANVAS_SETTINGS).unwrap_or_default(),
            assistant: load_json(&*store, storage::AI_SETTINGS).unwrap_or_default(),
        }
    }

    /// Stored language if present, otherwise negotiated from the hint and remembered
    pub fn resolve_locale(store: &mut dyn KeyValueStore, language_hint: Option<&str>) -> Locale {
        if let Some(locale) = load_json::<Locale>(&*store, storage::LANGUAGE) {
            return locale;
        }
        let locale = language_hint.map(Locale::negotiate).unwrap_or_default();
        log::info!("Negotiated language '{}'", locale.code());
        save_json(store, storage::LANGUAGE, &locale);
        locale
    }

    /// Best-effort save of every preference
    pub fn save(&self, store: &mut dyn KeyValueStore) -> bool {
        let saved = [
            save_json(store, storage::LANGUAGE, &self.locale),
            save_json(store, storage::THEME, &self.theme),
            save_json(store, storage::CANVAS_SETTINGS, &self.canvas),
            save_json(store, storage::AI_SETTINGS, &self.assistant),
        ];
        saved.iter().all(|ok| *ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("ar-SA"), Some(Locale::Arabic));
        assert_eq!(Locale::from_tag("en_US.UTF-8"), Some(Locale::English));
        assert_eq!(Locale::from_tag("AR"), Some(Locale::Arabic));
        assert_eq!(Locale::from_tag("fr-FR"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_negotiate_respects_weights() {
        assert_eq!(Locale::negotiate("ar-SA,ar;q=0.9,en;q=0.8"), Locale::Arabic);
        assert_eq!(Locale::negotiate("fr-FR, en;q=0.5, ar;q=0.7"), Locale::Arabic);
        assert_eq!(Locale::negotiate("en-GB, ar"), Locale::English);
        assert_eq!(Locale::negotiate("de, fr"), Locale::English);
        assert_eq!(Locale::negotiate("ar;q=0, en;q=0.1"), Locale::English);
        assert_eq!(Locale::negotiate(""), Locale::English);
    }

    #[test]
    fn test_arabic_is_right_to_left() {
        assert!(Locale::Arabic.is_rtl());
        assert_eq!(Locale::English.direction(), TextDirection::LeftToRight);
    }

    #[test]
    fn test_locale_is_negotiated_once_then_remembered() {
        let mut store = MemoryStore::new();
        assert_eq!(AppContext::resolve_locale(&mut store, Some("ar-EG")), Locale::Arabic);
        // a different hint later does not override the stored choice
        assert_eq!(AppContext::resolve_locale(&mut store, Some("en-US")), Locale::Arabic);
        assert_eq!(store.get(storage::LANGUAGE).unwrap().as_deref(), Some("\"ar\""));
    }

    #[test]
    fn test_context_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let mut context = AppContext::load(&mut store, None);
        assert_eq!(context.locale, Locale::English);
        assert_eq!(context.canvas, CanvasSettings::default());

        context.theme = ThemeMode::Light;
        context.canvas.snap_to_grid = false;
        context.canvas.show_sidebar = false;
        assert!(context.save(&mut store));

        let reloaded = AppContext::load(&mut store, Some("ar"));
        assert_eq!(reloaded, context);
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(storage::THEME, "\"sepia\"".to_string()).unwrap();
        store.set(storage::CANVAS_SETTINGS, "{not json".to_string()).unwrap();
        let context = AppContext::load(&mut store, None);
        assert_eq!(context.theme, ThemeMode::Dark);
        assert_eq!(context.canvas, CanvasSettings::default());
    }

    #[test]
    fn test_placement_config_follows_settings() {
        let settings = CanvasSettings {
            snap_to_grid: false,
            max_probes: 3,
            ..CanvasSettings::default()
        };
        let config = settings.placement_config();
        assert!(!config.grid.enabled);
        assert_eq!(config.max_probes, 3);
        assert_eq!(config.grid.cell, Vec2::new(220.0, 120.0));
    }
}
