// ABOUTME: Binary split tree holding every region and divider of a window.
// ABOUTME: Supports splitting, closing, pixel layout, divider hit testing and drag routing.

use divvy_core::{Axis, Color, LayoutNode};
use slotmap::{new_key_type, SlotMap};

use crate::geometry::{Geometry, Rect};
use crate::ratio::{Ratio, Side};
use crate::split::AxisState;

new_key_type! { pub struct NodeId; }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitId(NodeId);

impl SplitId {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(NodeId);

impl RegionId {
    pub fn node(&self) -> NodeId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("{node:?} must be used within a {} split", .axis.label())]
    NoEnclosingSplit { node: NodeId, axis: Axis },

    #[error("{0:?} does not belong to this layout")]
    OutOfScope(NodeId),

    #[error("{0:?} is not a {1}")]
    WrongNodeKind(NodeId, &'static str),

    #[error("cannot close the last region")]
    LastRegion,
}

#[derive(Debug)]
enum NodeKind {
    Region,
    Split {
        state: AxisState,
        first: NodeId,
        second: NodeId,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Divider strip of one split, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerRect {
    pub split: SplitId,
    pub axis: Axis,
    pub rect: Rect,
}

/// Pixel placement of every region and divider for one viewport
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub regions: Vec<(RegionId, Rect)>,
    pub dividers: Vec<DividerRect>,
}

impl Layout {
    pub fn region_rect(&self, region: RegionId) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(id, _)| *id == region)
            .map(|(_, rect)| *rect)
    }

    pub fn divider_rect(&self, split: SplitId) -> Option<Rect> {
        self.dividers
            .iter()
            .find(|d| d.split == split)
            .map(|d| d.rect)
    }
}

/// What one frame changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub ratio_updates: Vec<(SplitId, Ratio)>,
    pub geometry_updates: Vec<(SplitId, Geometry)>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.ratio_updates.is_empty() && self.geometry_updates.is_empty()
    }
}

#[derive(Debug)]
pub struct LayoutTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl LayoutTree {
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node {
            parent: None,
            kind: NodeKind::Region,
        });
        Self { arena, root }
    }

    /// Build a tree from a layout description, returning each region's color
    pub fn from_config(desc: &LayoutNode) -> Result<(Self, Vec<(RegionId, Color)>), LayoutError> {
        let mut tree = Self::new();
        let mut colors = Vec::with_capacity(desc.region_count());
        let root = RegionId(tree.root);
        tree.build(root, desc, &mut colors)?;
        Ok((tree, colors))
    }

    fn build(
        &mut self,
        region: RegionId,
        desc: &LayoutNode,
        colors: &mut Vec<(RegionId, Color)>,
    ) -> Result<(), LayoutError> {
        match desc {
            LayoutNode::Region(leaf) => {
                colors.push((region, leaf.color));
                Ok(())
            }
            LayoutNode::Split(split) => {
                if !(0.0..=100.0).contains(&split.ratio) {
                    tracing::warn!(
                        "Split ratio {} outside 0..=100, clamping",
                        split.ratio
                    );
                }
                let (_, second) = self.split(region, split.axis, Ratio::new(split.ratio))?;
                self.build(region, &split.first, colors)?;
                self.build(second, &split.second, colors)
            }
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(|n| n.parent)
    }

    pub fn as_split(&self, node: NodeId) -> Result<SplitId, LayoutError> {
        match &self.node(node)?.kind {
            NodeKind::Split { .. } => Ok(SplitId(node)),
            NodeKind::Region => Err(LayoutError::WrongNodeKind(node, "split")),
        }
    }

    pub fn as_region(&self, node: NodeId) -> Result<RegionId, LayoutError> {
        match &self.node(node)?.kind {
            NodeKind::Region => Ok(RegionId(node)),
            NodeKind::Split { .. } => Err(LayoutError::WrongNodeKind(node, "region")),
        }
    }

    fn node(&self, node: NodeId) -> Result<&Node, LayoutError> {
        self.arena.get(node).ok_or(LayoutError::OutOfScope(node))
    }

    /// All regions, depth first
    pub fn regions(&self) -> Vec<RegionId> {
        let mut result = Vec::new();
        self.walk(self.root, &mut |id, kind| {
            if matches!(kind, NodeKind::Region) {
                result.push(RegionId(id));
            }
        });
        result
    }

    /// All splits, depth first (outer before inner)
    pub fn splits(&self) -> Vec<SplitId> {
        let mut result = Vec::new();
        self.walk(self.root, &mut |id, kind| {
            if matches!(kind, NodeKind::Split { .. }) {
                result.push(SplitId(id));
            }
        });
        result
    }

    fn walk(&self, id: NodeId, visit: &mut impl FnMut(NodeId, &NodeKind)) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        visit(id, &node.kind);
        if let NodeKind::Split { first, second, .. } = &node.kind {
            self.walk(*first, visit);
            self.walk(*second, visit);
        }
    }

    /// Split the given region. The region stays in place as the first child;
    /// returns the new split and the new second region.
    pub fn split(
        &mut self,
        region: RegionId,
        axis: Axis,
        ratio: Ratio,
    ) -> Result<(SplitId, RegionId), LayoutError> {
        let target = self.as_region(region.0)?;
        let parent = self.arena[target.0].parent;

        let split_id = self.arena.insert(Node {
            parent,
            kind: NodeKind::Split {
                state: AxisState::new(axis, ratio),
                first: target.0,
                second: target.0,
            },
        });
        let new_region = self.arena.insert(Node {
            parent: Some(split_id),
            kind: NodeKind::Region,
        });
        if let NodeKind::Split { second, .. } = &mut self.arena[split_id].kind {
            *second = new_region;
        }

        self.replace_child(parent, target.0, split_id);
        self.arena[target.0].parent = Some(split_id);

        tracing::debug!(
            "Split {:?} {} at {}%",
            target.0,
            axis.label(),
            ratio.percent()
        );
        Ok((SplitId(split_id), RegionId(new_region)))
    }

    /// Close a region. Its sibling takes the parent split's place and the
    /// split's drag session, pending move and measurement go with it.
    /// Returns the region that should receive focus.
    pub fn close(&mut self, region: RegionId) -> Result<RegionId, LayoutError> {
        let target = self.as_region(region.0)?;
        let Some(split_id) = self.arena[target.0].parent else {
            return Err(LayoutError::LastRegion);
        };
        let sibling = match &self.arena[split_id].kind {
            NodeKind::Split { first, second, .. } => {
                if *first == target.0 {
                    *second
                } else {
                    *first
                }
            }
            NodeKind::Region => return Err(LayoutError::WrongNodeKind(split_id, "split")),
        };
        let grandparent = self.arena[split_id].parent;

        self.replace_child(grandparent, split_id, sibling);
        self.arena[sibling].parent = grandparent;
        self.arena.remove(target.0);
        if let Some(removed) = self.arena.remove(split_id) {
            if let NodeKind::Split { state, .. } = removed.kind {
                if state.is_dragging() {
                    tracing::debug!("Dropped active drag on closed split {:?}", split_id);
                }
            }
        }

        Ok(self.first_region(sibling))
    }

    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                if let NodeKind::Split { first, second, .. } = &mut self.arena[parent].kind {
                    if *first == old {
                        *first = new;
                    } else if *second == old {
                        *second = new;
                    }
                }
            }
        }
    }

    fn first_region(&self, mut id: NodeId) -> RegionId {
        while let Some(Node {
            kind: NodeKind::Split { first, .. },
            ..
        }) = self.arena.get(id)
        {
            id = *first;
        }
        RegionId(id)
    }

    /// State of the nearest split of `axis` enclosing `node`. A split node
    /// counts as enclosing itself, since its divider lives inside it.
    pub fn axis_state(&self, node: NodeId, axis: Axis) -> Result<&AxisState, LayoutError> {
        let split = self.enclosing_split(node, axis)?;
        match &self.arena[split].kind {
            NodeKind::Split { state, .. } => Ok(state),
            NodeKind::Region => Err(LayoutError::WrongNodeKind(split, "split")),
        }
    }

    pub fn axis_state_mut(
        &mut self,
        node: NodeId,
        axis: Axis,
    ) -> Result<&mut AxisState, LayoutError> {
        let split = self.enclosing_split(node, axis)?;
        match &mut self.arena[split].kind {
            NodeKind::Split { state, .. } => Ok(state),
            NodeKind::Region => Err(LayoutError::WrongNodeKind(split, "split")),
        }
    }

    fn enclosing_split(&self, node: NodeId, axis: Axis) -> Result<NodeId, LayoutError> {
        self.node(node)?;
        let mut current = Some(node);
        while let Some(id) = current {
            let n = &self.arena[id];
            if let NodeKind::Split { state, .. } = &n.kind {
                if state.axis() == axis {
                    return Ok(id);
                }
            }
            current = n.parent;
        }
        Err(LayoutError::NoEnclosingSplit { node, axis })
    }

    pub fn split_state(&self, split: SplitId) -> Result<&AxisState, LayoutError> {
        match &self.node(split.0)?.kind {
            NodeKind::Split { state, .. } => Ok(state),
            NodeKind::Region => Err(LayoutError::WrongNodeKind(split.0, "split")),
        }
    }

    pub fn split_state_mut(&mut self, split: SplitId) -> Result<&mut AxisState, LayoutError> {
        let node = self
            .arena
            .get_mut(split.0)
            .ok_or(LayoutError::OutOfScope(split.0))?;
        match &mut node.kind {
            NodeKind::Split { state, .. } => Ok(state),
            NodeKind::Region => Err(LayoutError::WrongNodeKind(split.0, "split")),
        }
    }

    pub fn set_ratio(&mut self, split: SplitId, ratio: Ratio) -> Result<bool, LayoutError> {
        Ok(self.split_state_mut(split)?.set_ratio(ratio))
    }

    /// Which side of the nearest `axis` split the branch holding `region` sits on
    pub fn side_of(&self, region: RegionId, axis: Axis) -> Result<Side, LayoutError> {
        self.enclosing_side(region, axis).map(|(_, side)| side)
    }

    /// Flex weight of a region inside the nearest `axis` split: the ratio on
    /// the first side, its complement on the second.
    pub fn region_weight(&self, region: RegionId, axis: Axis) -> Result<f32, LayoutError> {
        let (split, side) = self.enclosing_side(region, axis)?;
        Ok(self.split_state(split)?.weights().get(side))
    }

    fn enclosing_side(&self, region: RegionId, axis: Axis) -> Result<(SplitId, Side), LayoutError> {
        let mut child = self.as_region(region.0)?.0;
        while let Some(parent) = self.arena[child].parent {
            if let NodeKind::Split { state, first, .. } = &self.arena[parent].kind {
                if state.axis() == axis {
                    let side = if *first == child { Side::First } else { Side::Second };
                    return Ok((SplitId(parent), side));
                }
            }
            child = parent;
        }
        Err(LayoutError::NoEnclosingSplit {
            node: region.0,
            axis,
        })
    }

    /// Place every region and divider inside `viewport`. Divider strips are
    /// `thickness` wide, centered on the boundary and drawn over both regions.
    pub fn layout(&self, viewport: Rect, thickness: f32) -> Layout {
        let mut layout = Layout::default();
        self.layout_node(self.root, viewport, thickness, &mut layout);
        layout
    }

    fn layout_node(&self, id: NodeId, rect: Rect, thickness: f32, out: &mut Layout) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Region => out.regions.push((RegionId(id), rect)),
            NodeKind::Split {
                state,
                first,
                second,
            } => {
                let axis = state.axis();
                let (first_rect, second_rect) = rect.split(axis, state.ratio().fraction());
                let half = thickness / 2.0;
                let strip = match axis {
                    Axis::Vertical => {
                        Rect::new(second_rect.x - half, rect.y, thickness, rect.height)
                    }
                    Axis::Horizontal => {
                        Rect::new(rect.x, second_rect.y - half, rect.width, thickness)
                    }
                };
                out.dividers.push(DividerRect {
                    split: SplitId(id),
                    axis,
                    rect: strip,
                });
                self.layout_node(*first, first_rect, thickness, out);
                self.layout_node(*second, second_rect, thickness, out);
            }
        }
    }

    /// Divider strip under a point; the innermost divider wins where strips
    /// overlap.
    pub fn divider_at(&self, x: f32, y: f32, viewport: Rect, thickness: f32) -> Option<SplitId> {
        self.layout(viewport, thickness)
            .dividers
            .iter()
            .rev()
            .find(|d| d.rect.contains(x, y))
            .map(|d| d.split)
    }

    /// Region under a point
    pub fn region_at(&self, x: f32, y: f32, viewport: Rect) -> Option<RegionId> {
        self.layout(viewport, 0.0)
            .regions
            .iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| *id)
    }

    /// Begin dragging a split's divider from a pointer position
    pub fn press(&mut self, split: SplitId, x: f32, y: f32) -> Result<(), LayoutError> {
        let state = self.split_state_mut(split)?;
        state.press(x, y);
        tracing::debug!(
            "Drag started on {:?} ({}) at {:?}",
            split,
            state.axis().label(),
            state.anchor()
        );
        Ok(())
    }

    /// Global pointer move: queued on every dragging divider for the next
    /// frame. Returns how many dividers took it.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> usize {
        let mut queued = 0;
        for node in self.arena.values_mut() {
            if let NodeKind::Split { state, .. } = &mut node.kind {
                if state.pointer_moved(x, y) {
                    queued += 1;
                }
            }
        }
        queued
    }

    /// Global pointer release: ends every drag. Returns how many ended.
    pub fn release(&mut self) -> usize {
        let mut ended = 0;
        for node in self.arena.values_mut() {
            if let NodeKind::Split { state, .. } = &mut node.kind {
                if state.release() {
                    ended += 1;
                }
            }
        }
        if ended > 0 {
            tracing::debug!("Drag ended on {} divider(s)", ended);
        }
        ended
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_axis().is_some()
    }

    /// Axis of a divider currently being dragged
    pub fn dragging_axis(&self) -> Option<Axis> {
        self.arena.values().find_map(|node| match &node.kind {
            NodeKind::Split { state, .. } if state.is_dragging() => Some(state.axis()),
            _ => None,
        })
    }

    /// Per-frame work: apply each divider's coalesced move using the geometry
    /// measured so far, then re-measure every split container.
    pub fn frame(&mut self, viewport: Rect) -> FrameReport {
        let mut report = FrameReport::default();

        for split in self.splits() {
            if let Ok(state) = self.split_state_mut(split) {
                if let Some(ratio) = state.apply_frame() {
                    tracing::debug!("{:?} ratio -> {:.2}%", split, ratio.percent());
                    report.ratio_updates.push((split, ratio));
                }
            }
        }

        let mut containers = Vec::new();
        self.collect_containers(self.root, viewport, &mut containers);
        for (split, rect) in containers {
            if let Ok(state) = self.split_state_mut(split) {
                if let Some(geometry) = state.measure(&rect) {
                    tracing::trace!(
                        "{:?} container now {}px at {}",
                        split,
                        geometry.size,
                        geometry.offset
                    );
                    report.geometry_updates.push((split, geometry));
                }
            }
        }

        report
    }

    fn collect_containers(&self, id: NodeId, rect: Rect, out: &mut Vec<(SplitId, Rect)>) {
        if let Some(Node {
            kind: NodeKind::Split {
                state,
                first,
                second,
            },
            ..
        }) = self.arena.get(id)
        {
            out.push((SplitId(id), rect));
            let (first_rect, second_rect) = rect.split(state.axis(), state.ratio().fraction());
            self.collect_containers(*first, first_rect, out);
            self.collect_containers(*second, second_rect, out);
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
