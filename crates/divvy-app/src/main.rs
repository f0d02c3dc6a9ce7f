// ABOUTME: Main application entry point.
// ABOUTME: Sets up window, event loop, and routes pointer input into the split layout.

mod scene;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState};
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

use divvy_core::{Axis, Color, Config};
use divvy_layout::{LayoutTree, Ratio, Rect, RegionId, SplitId};
use divvy_renderer::Renderer;

use scene::PointerAction;

const MAX_REGIONS: usize = 16;

struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    layout: LayoutTree,
    colors: HashMap<RegionId, Color>,
    config: Config,
    modifiers: ModifiersState,
    mouse_pos: (f64, f64),
    hovered: Option<SplitId>,
    cursor: CursorIcon,
    regions_created: usize,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let (layout, colors) = LayoutTree::from_config(&config.layout)?;
        tracing::info!(
            "Built layout: {} regions, {} dividers",
            colors.len(),
            layout.splits().len()
        );

        Ok(Self {
            window: None,
            renderer: None,
            layout,
            regions_created: colors.len(),
            colors: colors.into_iter().collect(),
            config,
            modifiers: ModifiersState::empty(),
            mouse_pos: (0.0, 0.0),
            hovered: None,
            cursor: CursorIcon::Default,
        })
    }

    fn viewport(&self) -> Rect {
        let Some(renderer) = &self.renderer else {
            return Rect::default();
        };
        let (width, height) = renderer.window_size();
        Rect::new(0.0, 0.0, width as f32, height as f32)
    }

    fn pointer(&self) -> (f32, f32) {
        (self.mouse_pos.0 as f32, self.mouse_pos.1 as f32)
    }

    /// Recompute the divider under the pointer and the cursor icon
    fn update_hover(&mut self) {
        let (x, y) = self.pointer();
        self.hovered =
            self.layout
                .divider_at(x, y, self.viewport(), self.config.divider.thickness);

        let axis = self.layout.dragging_axis().or_else(|| {
            self.hovered
                .and_then(|split| self.layout.split_state(split).ok())
                .map(|state| state.axis())
        });
        let cursor = scene::cursor_for(axis);
        if cursor != self.cursor {
            self.cursor = cursor;
            if let Some(window) = &self.window {
                window.set_cursor(cursor);
            }
        }
    }

    fn highlighted_splits(&self) -> Vec<SplitId> {
        let mut highlighted: Vec<SplitId> = self
            .layout
            .splits()
            .into_iter()
            .filter(|split| {
                self.layout
                    .split_state(*split)
                    .map(|state| state.is_dragging())
                    .unwrap_or(false)
            })
            .collect();
        if highlighted.is_empty() {
            highlighted.extend(self.hovered);
        }
        highlighted
    }

    fn render_frame(&mut self) {
        let viewport = self.viewport();

        // Apply this frame's coalesced drag moves, then re-measure containers
        let report = self.layout.frame(viewport);
        if !report.ratio_updates.is_empty() {
            tracing::trace!("Applied {} ratio update(s)", report.ratio_updates.len());
        }

        let layout = self.layout.layout(viewport, self.config.divider.thickness);
        let highlighted = self.highlighted_splits();
        let quads = scene::scene_quads(&layout, &self.colors, &self.config.divider, &highlighted);

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if let Err(e) = renderer.render(&quads) {
            tracing::error!("Render error: {}", e);
        }
    }

    /// Split the region under the pointer
    fn split_hovered_region(&mut self, axis: Axis) {
        if self.colors.len() >= MAX_REGIONS {
            tracing::warn!("Maximum region limit ({}) reached", MAX_REGIONS);
            return;
        }
        let (x, y) = self.pointer();
        let Some(region) = self.layout.region_at(x, y, self.viewport()) else {
            return;
        };
        match self.layout.split(region, axis, Ratio::default()) {
            Ok((_, new_region)) => {
                self.colors
                    .insert(new_region, scene::palette_color(self.regions_created));
                self.regions_created += 1;
                tracing::info!(
                    "Split {:?} {}, total regions: {}",
                    region,
                    axis.label(),
                    self.colors.len()
                );
            }
            Err(e) => tracing::error!("Failed to split region: {}", e),
        }
    }

    /// Close the region under the pointer
    fn close_hovered_region(&mut self) {
        let (x, y) = self.pointer();
        let Some(region) = self.layout.region_at(x, y, self.viewport()) else {
            return;
        };
        match self.layout.close(region) {
            Ok(_) => {
                self.colors.remove(&region);
                tracing::info!(
                    "Closed {:?}, remaining regions: {}",
                    region,
                    self.colors.len()
                );
            }
            Err(e) => tracing::warn!("Cannot close region: {}", e),
        }
        self.update_hover();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("divvy")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match pollster::block_on(Renderer::new(
            Arc::clone(&window),
            self.config.background,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Failed to create renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let physical_size = window.inner_size();
        tracing::info!(
            "Window created: {}x{} physical pixels, scale factor: {}",
            physical_size.width,
            physical_size.height,
            window.scale_factor()
        );

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_pos = (position.x, position.y);
                let (x, y) = self.pointer();
                // Moves are global while dragging; the layout queues them for
                // the next frame
                self.layout.pointer_moved(x, y);
                self.update_hover();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match scene::pointer_action(state, button) {
                    Some(PointerAction::Press) => {
                        if let Some(split) = self.hovered {
                            let (x, y) = self.pointer();
                            if let Err(e) = self.layout.press(split, x, y) {
                                tracing::warn!("Ignoring press on stale divider: {}", e);
                            }
                            self.update_hover();
                        }
                    }
                    Some(PointerAction::Release) => {
                        self.layout.release();
                        self.update_hover();
                    }
                    None => {}
                }
            }
            WindowEvent::Focused(false) => {
                // A release outside the window never reaches us
                if self.layout.release() > 0 {
                    tracing::debug!("Focus lost, ended drag");
                }
                self.update_hover();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let ctrl = self.modifiers.control_key();
                let shift = self.modifiers.shift_key();
                if !(ctrl && shift) {
                    return;
                }

                // Ctrl+Shift+V / H: split the region under the pointer
                // Ctrl+Shift+W: close it
                match &event.logical_key {
                    Key::Character(c) if c.eq_ignore_ascii_case("v") => {
                        self.split_hovered_region(Axis::Vertical);
                    }
                    Key::Character(c) if c.eq_ignore_ascii_case("h") => {
                        self.split_hovered_region(Axis::Horizontal);
                    }
                    Key::Character(c) if c.eq_ignore_ascii_case("w") => {
                        self.close_hovered_region();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting divvy");

    let config = Config::load_or_default();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
