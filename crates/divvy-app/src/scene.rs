// ABOUTME: Turns a computed layout into the quads the renderer draws.
// ABOUTME: Also picks the pointer cursor for hovered and dragged dividers.

use std::collections::HashMap;

use winit::event::{ElementState, MouseButton};
use winit::window::CursorIcon;

use divvy_core::{Axis, Color, DividerSettings};
use divvy_layout::{Layout, RegionId, SplitId};
use divvy_renderer::Quad;

/// Colors handed to regions created at runtime
const PALETTE: [Color; 5] = [
    Color::RED,
    Color::BLUE,
    Color::GREEN,
    Color::YELLOW,
    Color::VIOLET,
];

pub fn palette_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Regions first, then divider strips on top. Every strip of `highlighted`
/// splits uses the hover color.
pub fn scene_quads(
    layout: &Layout,
    colors: &HashMap<RegionId, Color>,
    divider: &DividerSettings,
    highlighted: &[SplitId],
) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(layout.regions.len() + layout.dividers.len());

    for (region, rect) in &layout.regions {
        let Some(color) = colors.get(region) else {
            continue;
        };
        quads.push(Quad {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            color: *color,
        });
    }

    for strip in &layout.dividers {
        let color = if highlighted.contains(&strip.split) {
            divider.hover_color
        } else {
            divider.color
        };
        quads.push(Quad {
            x: strip.rect.x,
            y: strip.rect.y,
            width: strip.rect.width,
            height: strip.rect.height,
            color,
        });
    }

    quads
}

/// Resize cursor matching the direction a divider moves
pub fn cursor_for(axis: Option<Axis>) -> CursorIcon {
    match axis {
        Some(Axis::Vertical) => CursorIcon::EwResize,
        Some(Axis::Horizontal) => CursorIcon::NsResize,
        None => CursorIcon::Default,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press,
    Release,
}

/// Only the primary button starts a drag; releasing any button ends it
pub fn pointer_action(state: ElementState, button: MouseButton) -> Option<PointerAction> {
    match state {
        ElementState::Pressed if button == MouseButton::Left => Some(PointerAction::Press),
        ElementState::Pressed => None,
        ElementState::Released => Some(PointerAction::Release),
    }
}
