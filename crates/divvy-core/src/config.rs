// ABOUTME: Application configuration handling.
// ABOUTME: Loads window, divider and initial layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Axis, Color};

/// Ratio given to a split that does not name one
pub const DEFAULT_RATIO: f32 = 50.0;

fn default_ratio() -> f32 {
    DEFAULT_RATIO
}

/// Divider strip appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerSettings {
    /// Strip thickness in pixels, centered on the region boundary
    pub thickness: f32,
    /// Idle strip color (transparent by default so the regions meet directly)
    pub color: Color,
    /// Strip color while hovered or dragged
    pub hover_color: Color,
}

impl Default for DividerSettings {
    fn default() -> Self {
        Self {
            thickness: 4.0,
            color: Color::TRANSPARENT,
            hover_color: Color::LAVENDER,
        }
    }
}

/// A split in the initial layout description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    pub axis: Axis,
    /// Percentage of the container given to `first`
    #[serde(default = "default_ratio")]
    pub ratio: f32,
    pub first: Box<LayoutNode>,
    pub second: Box<LayoutNode>,
}

/// A leaf region in the initial layout description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNode {
    pub color: Color,
}

/// Initial layout: a binary tree of splits with colored regions at the leaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode {
    Split(SplitNode),
    Region(RegionNode),
}

impl LayoutNode {
    pub fn region(color: Color) -> Self {
        LayoutNode::Region(RegionNode { color })
    }

    pub fn split(axis: Axis, ratio: f32, first: LayoutNode, second: LayoutNode) -> Self {
        LayoutNode::Split(SplitNode {
            axis,
            ratio,
            first: Box::new(first),
            second: Box::new(second),
        })
    }

    /// Red sidebar on the left; the right side holds two columns, each split
    /// into a top and bottom pane.
    pub fn demo() -> Self {
        Self::split(
            Axis::Vertical,
            20.0,
            Self::region(Color::RED),
            Self::split(
                Axis::Vertical,
                DEFAULT_RATIO,
                Self::split(
                    Axis::Horizontal,
                    45.0,
                    Self::region(Color::BLUE),
                    Self::region(Color::GREEN),
                ),
                Self::split(
                    Axis::Horizontal,
                    55.0,
                    Self::region(Color::YELLOW),
                    Self::region(Color::VIOLET),
                ),
            ),
        )
    }

    /// Number of leaf regions
    pub fn region_count(&self) -> usize {
        match self {
            LayoutNode::Region(_) => 1,
            LayoutNode::Split(split) => split.first.region_count() + split.second.region_count(),
        }
    }
}

impl Default for LayoutNode {
    fn default() -> Self {
        Self::demo()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window dimensions
    pub window_width: u32,
    pub window_height: u32,

    /// Color behind every region
    pub background: Color,

    /// Divider strip settings
    pub divider: DividerSettings,

    /// Initial layout; dragged ratios are not written back
    pub layout: LayoutNode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1200,
            window_height: 800,
            background: Color::SLATE,
            divider: DividerSettings::default(),
            layout: LayoutNode::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

impl Config {
    /// Get the default config file path (~/.config/divvy/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("divvy").join("config.toml"))
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
