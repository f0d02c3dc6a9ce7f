// ABOUTME: Divider drag state machine (Idle <-> Dragging) and pointer-to-ratio math.
// ABOUTME: Pointer moves are coalesced so a ratio is computed at most once per frame.

use crate::coalesce::FrameCoalescer;
use crate::geometry::Geometry;
use crate::ratio::Ratio;

/// An active drag, anchored where the press happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer coordinate along the divider's axis at press time
    pub anchor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividerState {
    Idle,
    Dragging(DragSession),
}

/// Map a pointer coordinate to a ratio inside a container.
///
/// `delta = pointer - anchor`, the pointer position inside the container is
/// `anchor + delta - offset`, scaled against the container size. Returns
/// `None` for a container with no measurable extent.
pub fn ratio_from_pointer(anchor: f32, pointer: f32, geometry: Geometry) -> Option<Ratio> {
    if geometry.is_degenerate() {
        return None;
    }
    let delta = pointer - anchor;
    let position = anchor + delta - geometry.offset;
    Some(Ratio::new(position / geometry.size * 100.0))
}

/// Drag handling for one divider strip.
///
/// The active flag and the anchor are tracked separately, so an anchor at
/// coordinate zero is as valid as any other.
#[derive(Debug, Clone, Default)]
pub struct Divider {
    dragging: bool,
    anchor: Option<f32>,
    pending_move: FrameCoalescer<f32>,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DividerState {
        match (self.dragging, self.anchor) {
            (true, Some(anchor)) => DividerState::Dragging(DragSession { anchor }),
            _ => DividerState::Idle,
        }
    }

    pub fn session(&self) -> Option<DragSession> {
        match self.state() {
            DividerState::Dragging(session) => Some(session),
            DividerState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn anchor(&self) -> Option<f32> {
        self.anchor
    }

    /// Turning the flag off ends the session: the anchor and any queued move
    /// are cleared with it.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        if !dragging {
            self.anchor = None;
            self.pending_move.cancel();
        }
    }

    pub fn set_anchor(&mut self, anchor: Option<f32>) {
        self.anchor = anchor;
        if anchor.is_none() {
            self.pending_move.cancel();
        }
    }

    /// Idle -> Dragging. A press during a drag re-anchors it.
    pub fn press(&mut self, pointer: f32) {
        self.pending_move.cancel();
        self.dragging = true;
        self.anchor = Some(pointer);
    }

    /// Queue a move for the next frame. Ignored unless dragging.
    pub fn pointer_moved(&mut self, pointer: f32) -> bool {
        if self.session().is_none() {
            return false;
        }
        self.pending_move.push(pointer);
        true
    }

    /// Dragging -> Idle. Returns whether a drag was active.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.set_dragging(false);
        was_dragging
    }

    pub fn has_pending_move(&self) -> bool {
        self.pending_move.has_pending()
    }

    /// Frame callback: turn the latest queued move into a ratio
    pub fn take_frame_update(&mut self, geometry: Geometry) -> Option<Ratio> {
        let pointer = self.pending_move.take()?;
        let session = self.session()?;
        ratio_from_pointer(session.anchor, pointer, geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(size: f32, offset: f32) -> Geometry {
        Geometry { size, offset }
    }

    #[test]
    fn drag_to_eighty_percent() {
        let ratio = ratio_from_pointer(300.0, 800.0, container(1000.0, 0.0)).unwrap();
        assert!((ratio.percent() - 80.0).abs() < 0.001);
    }

    #[test]
    fn pointer_past_left_edge_clamps_to_zero() {
        let ratio = ratio_from_pointer(300.0, -200.0, container(1000.0, 0.0)).unwrap();
        assert_eq!(ratio, Ratio::MIN);
    }

    #[test]
    fn pointer_past_right_edge_clamps_to_hundred() {
        let ratio = ratio_from_pointer(300.0, 5000.0, container(1000.0, 0.0)).unwrap();
        assert_eq!(ratio, Ratio::MAX);
    }

    #[test]
    fn offset_container_subtracts_offset() {
        let ratio = ratio_from_pointer(400.0, 450.0, container(200.0, 400.0)).unwrap();
        assert!((ratio.percent() - 25.0).abs() < 0.001);
    }

    #[test]
    fn ratio_stays_in_range_for_any_delta() {
        let geometry = container(640.0, 120.0);
        for step in -200..200 {
            let pointer = step as f32 * 13.7;
            let ratio = ratio_from_pointer(250.0, pointer, geometry).unwrap();
            assert!((0.0..=100.0).contains(&ratio.percent()));
        }
    }

    #[test]
    fn sweep_is_monotonic() {
        let geometry = container(500.0, 100.0);
        let mut last = -1.0;
        for x in (100..=600).step_by(25) {
            let ratio = ratio_from_pointer(100.0, x as f32, geometry).unwrap().percent();
            assert!(ratio >= last);
            last = ratio;
        }
        assert!(ratio_from_pointer(100.0, 100.0, geometry).unwrap().percent() < 0.001);
        assert!(ratio_from_pointer(100.0, 600.0, geometry).unwrap().percent() > 99.999);
    }

    #[test]
    fn zero_sized_container_yields_nothing() {
        assert!(ratio_from_pointer(10.0, 20.0, container(0.0, 0.0)).is_none());
        assert!(ratio_from_pointer(10.0, 20.0, container(f32::NAN, 0.0)).is_none());
    }

    #[test]
    fn press_move_release_cycle() {
        let mut divider = Divider::new();
        assert_eq!(divider.state(), DividerState::Idle);

        divider.press(300.0);
        assert_eq!(
            divider.state(),
            DividerState::Dragging(DragSession { anchor: 300.0 })
        );

        assert!(divider.pointer_moved(800.0));
        let ratio = divider.take_frame_update(container(1000.0, 0.0));
        assert!((ratio.unwrap().percent() - 80.0).abs() < 0.001);

        assert!(divider.release());
        assert_eq!(divider.state(), DividerState::Idle);
        assert_eq!(divider.anchor(), None);
        assert!(!divider.release());
    }

    #[test]
    fn anchor_at_zero_is_a_real_drag() {
        let mut divider = Divider::new();
        divider.press(0.0);
        assert!(divider.is_dragging());
        assert!(divider.pointer_moved(250.0));
        let ratio = divider.take_frame_update(container(1000.0, 0.0)).unwrap();
        assert!((ratio.percent() - 25.0).abs() < 0.001);
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut divider = Divider::new();
        assert!(!divider.pointer_moved(500.0));
        assert!(divider.take_frame_update(container(1000.0, 0.0)).is_none());
    }

    #[test]
    fn moves_coalesce_to_latest() {
        let mut divider = Divider::new();
        divider.press(100.0);
        divider.pointer_moved(200.0);
        divider.pointer_moved(900.0);
        divider.pointer_moved(400.0);

        let ratio = divider.take_frame_update(container(1000.0, 0.0)).unwrap();
        assert!((ratio.percent() - 40.0).abs() < 0.001);
        // Nothing left for the following frame
        assert!(divider.take_frame_update(container(1000.0, 0.0)).is_none());
    }

    #[test]
    fn release_cancels_queued_move() {
        let mut divider = Divider::new();
        divider.press(100.0);
        divider.pointer_moved(700.0);
        divider.release();
        assert!(!divider.has_pending_move());
        assert!(divider.take_frame_update(container(1000.0, 0.0)).is_none());
    }

    #[test]
    fn degenerate_geometry_keeps_session() {
        let mut divider = Divider::new();
        divider.press(100.0);
        divider.pointer_moved(150.0);
        assert!(divider.take_frame_update(Geometry::default()).is_none());
        assert!(divider.is_dragging());
    }

    #[test]
    fn flag_without_anchor_is_idle() {
        let mut divider = Divider::new();
        divider.set_dragging(true);
        assert!(divider.is_dragging());
        assert_eq!(divider.session(), None);
        assert!(!divider.pointer_moved(10.0));

        divider.set_anchor(Some(0.0));
        assert_eq!(divider.session(), Some(DragSession { anchor: 0.0 }));

        divider.set_dragging(false);
        assert_eq!(divider.anchor(), None);
    }
}
