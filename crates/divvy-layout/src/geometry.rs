// ABOUTME: Pixel rectangles and the measured geometry of split containers.
// ABOUTME: Measurement only reports a change when size or offset actually moved.

use divvy_core::Axis;

/// Rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Size along the axis a divider of `axis` moves on
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }

    /// Left or top edge, matching `extent`
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.x,
            Axis::Horizontal => self.y,
        }
    }

    /// Cut the rect at `fraction` of its extent along `axis`
    pub fn split(&self, axis: Axis, fraction: f32) -> (Rect, Rect) {
        match axis {
            Axis::Vertical => {
                let first = self.width * fraction;
                (
                    Rect::new(self.x, self.y, first, self.height),
                    Rect::new(self.x + first, self.y, self.width - first, self.height),
                )
            }
            Axis::Horizontal => {
                let first = self.height * fraction;
                (
                    Rect::new(self.x, self.y, self.width, first),
                    Rect::new(self.x, self.y + first, self.width, self.height - first),
                )
            }
        }
    }
}

/// Measured size and offset of a split container along its axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    /// Width (vertical divider) or height (horizontal divider)
    pub size: f32,
    /// Left (vertical divider) or top (horizontal divider) edge
    pub offset: f32,
}

impl Geometry {
    pub fn of(rect: &Rect, axis: Axis) -> Self {
        Self {
            size: rect.extent(axis),
            offset: rect.start(axis),
        }
    }

    /// A container this small cannot map a pointer to a percentage
    pub fn is_degenerate(&self) -> bool {
        !(self.size.is_finite() && self.offset.is_finite()) || self.size <= 0.0
    }
}

/// Last known geometry of one container, starting out unmeasured (zero)
#[derive(Debug, Clone, Default)]
pub struct Measurement {
    current: Geometry,
}

impl Measurement {
    pub fn geometry(&self) -> Geometry {
        self.current
    }

    /// Record a fresh reading. Returns the new geometry only when it differs
    /// from the previous one; identical readings are not written.
    pub fn observe(&mut self, rect: &Rect, axis: Axis) -> Option<Geometry> {
        let reading = Geometry::of(rect, axis);
        if reading == self.current {
            return None;
        }
        self.current = reading;
        Some(reading)
    }
}
