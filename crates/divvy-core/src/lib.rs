// ABOUTME: Shared types and configuration for divvy.
// ABOUTME: Defines colors, split axes, and config file handling.

pub mod axis;
pub mod color;
pub mod config;

pub use axis::Axis;
pub use color::{Color, ColorError};
pub use config::{Config, ConfigError, DividerSettings, LayoutNode, RegionNode, SplitNode};
