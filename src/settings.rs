use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Show player names under their markers.
    #[serde(default = "default_true")]
    pub show_names: bool,
    /// Allow freehand drawing while the tactics view is active. Off by
    /// default: in the tactics view empty-area presses would otherwise fight
    /// with ball and disc placement.
    #[serde(default)]
    pub draw_in_tactics: bool,
    /// Start in the tactics view instead of the match view.
    #[serde(default)]
    pub start_in_tactics_view: bool,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_names: true,
            draw_in_tactics: false,
            start_in_tactics_view: false,
            debug_logging: false,
            window_size: None,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
