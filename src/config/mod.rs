//! Editor configuration.
//!
//! Persistent settings for the canvas editor, stored as TOML. The connection
//! policy lives here rather than being hard-coded: the editor historically
//! accepted multiple incoming wires on one input port and even duplicate
//! (start, end) pairs, and whether that is desirable is a per-deployment
//! decision.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultExt};

/// Policy switches applied when a wire is released over an input port.
/// The defaults reproduce the editor's historical permissive behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectPolicy {
    /// Whether an input port may accept more than one incoming wire.
    pub allow_fan_in: bool,

    /// Whether a second wire with the same (start, end) port pair may be
    /// completed.
    pub allow_duplicates: bool,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            allow_fan_in: true,
            allow_duplicates: true,
        }
    }
}

/// Canvas presentation settings consumed by the host view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasSettings {
    /// Background grid step, in canvas units.
    pub grid_size: f32,

    /// Edge length of the square scene rectangle.
    pub scene_extent: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            scene_extent: 8000.0,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub connect: ConnectPolicy,
    pub canvas: CanvasSettings,
}

impl EditorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
