// ABOUTME: The two split axes and coordinate selection along them.
// ABOUTME: A vertical divider splits left/right, a horizontal divider top/bottom.

use serde::{Deserialize, Serialize};

/// Orientation of a divider.
///
/// Named after the divider strip, not the regions: a `Vertical` divider is a
/// vertical line with one region on its left and one on its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Pick the component of a point that moves this divider
    pub fn along(&self, x: f32, y: f32) -> f32 {
        match self {
            Axis::Vertical => x,
            Axis::Horizontal => y,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_divider_tracks_x() {
        assert_eq!(Axis::Vertical.along(12.0, 40.0), 12.0);
        assert_eq!(Axis::Horizontal.along(12.0, 40.0), 40.0);
    }
}
