//! Application-wide constants and default values
//!
//! Centralized location for the hard-coded canvas, layout, and storage values

/// Zoom limits and step sizes
pub mod zoom {
    /// Smallest zoom the canvas allows
    pub const MIN: f32 = 0.2;

    /// Largest zoom the canvas allows
    pub const MAX: f32 = 3.0;

    /// Additive step for the toolbar zoom buttons
    pub const BUTTON_STEP: f32 = 0.2;

    /// Multiplicative factor for one wheel tick towards the canvas
    pub const WHEEL_IN_FACTOR: f32 = 1.1;

    /// Multiplicative factor for one wheel tick away from the canvas
    pub const WHEEL_OUT_FACTOR: f32 = 0.9;

    /// Fit-to-screen never zooms in past this
    pub const FIT_MAX: f32 = 1.0;
}

/// Grid and placement defaults
pub mod layout {
    /// Horizontal grid cell (node width plus gap)
    pub const GRID_CELL_X: f32 = 220.0;

    /// Vertical grid cell (node height plus gap)
    pub const GRID_CELL_Y: f32 = 120.0;

    /// Logical node footprint used for collision checks
    pub const NODE_WIDTH: f32 = 200.0;
    pub const NODE_HEIGHT: f32 = 100.0;

    /// Padding added around a candidate box before testing overlap
    pub const COLLISION_PADDING: f32 = 10.0;

    /// Probes per direction before falling back
    pub const MAX_PROBES: u32 = 10;

    /// Columns in the node-count fallback layout
    pub const FALLBACK_COLUMNS: usize = 5;

    /// Padding around the node bounds when fitting to screen
    pub const FIT_PADDING: f32 = 100.0;
}

/// Keys used in the key-value store
pub mod storage {
    pub const LANGUAGE: &str = "language";
    pub const THEME: &str = "theme";
    pub const AI_SETTINGS: &str = "ai_settings";
    pub const CANVAS_SETTINGS: &str = "canvas_settings";
    pub const CHAT_HISTORY: &str = "chat_history";

    /// File name of the file-backed store inside the data directory
    pub const STORE_FILE: &str = "store.json";

    /// Directory name under the platform data directory
    pub const APP_DIR: &str = "flowcanvas";
}

/// Mock assistant defaults
pub mod assistant {
    /// Artificial latency bounds in milliseconds
    pub const MIN_DELAY_MS: u64 = 400;
    pub const MAX_DELAY_MS: u64 = 1200;

    /// Messages retained in the rolling history
    pub const HISTORY_LIMIT: usize = 20;

    /// Display name for the mock model
    pub const MODEL_NAME: &str = "gemini-mock";
}

/// Save file metadata
pub mod file {
    pub const FORMAT_VERSION: &str = "1.0";
    pub const CREATOR: &str = "FlowCanvas 0.1";
}
