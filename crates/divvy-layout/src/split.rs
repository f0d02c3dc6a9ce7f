// ABOUTME: Per-split state: ratio, drag session and measured container geometry.
// ABOUTME: Each split owns its state outright; nested splits never share any of it.

use divvy_core::Axis;

use crate::divider::{Divider, DragSession};
use crate::geometry::{Geometry, Measurement, Rect};
use crate::ratio::{Ratio, RegionWeights};

#[derive(Debug, Clone)]
pub struct AxisState {
    axis: Axis,
    ratio: Ratio,
    divider: Divider,
    measurement: Measurement,
}

impl AxisState {
    pub fn new(axis: Axis, ratio: Ratio) -> Self {
        Self {
            axis,
            ratio,
            divider: Divider::new(),
            measurement: Measurement::default(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// Returns whether the ratio changed
    pub fn set_ratio(&mut self, ratio: Ratio) -> bool {
        if ratio == self.ratio {
            return false;
        }
        self.ratio = ratio;
        true
    }

    pub fn weights(&self) -> RegionWeights {
        RegionWeights::from(self.ratio)
    }

    pub fn is_dragging(&self) -> bool {
        self.divider.is_dragging()
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.divider.set_dragging(dragging);
    }

    pub fn anchor(&self) -> Option<f32> {
        self.divider.anchor()
    }

    pub fn set_anchor(&mut self, anchor: Option<f32>) {
        self.divider.set_anchor(anchor);
    }

    pub fn session(&self) -> Option<DragSession> {
        self.divider.session()
    }

    /// Container geometry as of the last frame
    pub fn geometry(&self) -> Geometry {
        self.measurement.geometry()
    }

    pub(crate) fn measure(&mut self, container: &Rect) -> Option<Geometry> {
        self.measurement.observe(container, self.axis)
    }

    pub(crate) fn press(&mut self, x: f32, y: f32) {
        self.divider.press(self.axis.along(x, y));
    }

    pub(crate) fn pointer_moved(&mut self, x: f32, y: f32) -> bool {
        self.divider.pointer_moved(self.axis.along(x, y))
    }

    pub(crate) fn release(&mut self) -> bool {
        self.divider.release()
    }

    /// Apply this frame's coalesced move, if any. Returns the new ratio when
    /// it changed.
    pub(crate) fn apply_frame(&mut self) -> Option<Ratio> {
        let geometry = self.measurement.geometry();
        let ratio = self.divider.take_frame_update(geometry)?;
        self.set_ratio(ratio).then_some(ratio)
    }
}
