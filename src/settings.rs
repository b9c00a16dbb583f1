use crate::ring_gestures::db::PATTERNS_FILE;
use crate::ring_gestures::engine::Point;
use crate::ring_gestures::layout::RingLayout;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Number of nodes on the ring. Fixed for the lifetime of a surface.
    #[serde(default = "default_node_count")]
    pub node_count: usize,
    /// Thickness handed to the line sink for every segment.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f32,
    #[serde(default)]
    pub center: Point,
    #[serde(default = "default_ring_radius")]
    pub ring_radius: f32,
    /// Distance from a node's anchor within which the pointer counts as over it.
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,
    /// When enabled the logger is initialised at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Action library loaded at startup.
    #[serde(default = "default_library_path")]
    pub library_path: String,
}

fn default_node_count() -> usize {
    5
}

fn default_line_thickness() -> f32 {
    5.0
}

fn default_ring_radius() -> f32 {
    120.0
}

fn default_hit_radius() -> f32 {
    24.0
}

fn default_library_path() -> String {
    PATTERNS_FILE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            node_count: default_node_count(),
            line_thickness: default_line_thickness(),
            center: Point::default(),
            ring_radius: default_ring_radius(),
            hit_radius: default_hit_radius(),
            debug_logging: false,
            library_path: default_library_path(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn ring_layout(&self) -> RingLayout {
        RingLayout::new(self.node_count, self.center, self.ring_radius, self.hit_radius)
    }
}
