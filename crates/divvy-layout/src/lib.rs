// ABOUTME: Split layout management for divvy.
// ABOUTME: Owns the split tree, divider drag sessions and per-frame measurement.

mod coalesce;
mod divider;
mod geometry;
mod ratio;
mod split;
mod tree;

pub use coalesce::FrameCoalescer;
pub use divider::{ratio_from_pointer, Divider, DividerState, DragSession};
pub use divvy_core::Axis;
pub use geometry::{Geometry, Measurement, Rect};
pub use ratio::{Ratio, RegionWeights, Side};
pub use split::AxisState;
pub use tree::{
    DividerRect, FrameReport, Layout, LayoutError, LayoutTree, NodeId, RegionId, SplitId,
};
