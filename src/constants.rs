// Page-level constants used by the web frontend.

// Mount point and injected elements
pub const SCENE_CONTAINER_ID: &str = "scene";
pub const CANVAS_CLASS: &str = "scene-canvas";
pub const AUDIO_CONTAINER_CLASS: &str = "player-audio";
pub const DEBUG_BARS_CLASS: &str = "audio-dom-helper";
pub const PANEL_CLASS: &str = "equalizer-panel";
pub const PANEL_TITLE: &str = "Player Equalizer";

// Media
pub const AUDIO_MIME: &str = "audio/mpeg";

// Canvas clear color behind the plane
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

// Development builds get the amplitude bar overlay
pub const DEBUG_OVERLAY: bool = cfg!(debug_assertions);
