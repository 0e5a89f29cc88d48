use std::time::Duration;

use orbital_core::{BBox, Orb, Palette, Point, Size};
use serde::{Deserialize, Serialize};

use crate::config::RendererConfig;

/// Camera and surface geometry for the current frame.
///
/// `offset` is always `anchor - center`. The fields are private so that every
/// change to the size or the anchor goes through a method that recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    size: Size,
    center: Point,
    anchor: Point,
    offset: Point,
    grid_size: f64,
    frame_rate_cap: u32,
    controls_visible: bool,
    palette: Palette,
}

impl ViewState {
    /// A view of `size` anchored at the world origin, controls hidden.
    pub fn new(size: Size, config: &RendererConfig) -> Self {
        let center = size.center();
        Self {
            size,
            center,
            anchor: Point::ORIGIN,
            offset: Point::ORIGIN - center,
            grid_size: config.grid_size,
            frame_rate_cap: config.frame_rate_cap,
            controls_visible: false,
            palette: config.palette,
        }
    }

    /// Apply a new surface size and camera anchor in one step.
    pub fn update(&mut self, size: Size, anchor: Point) {
        self.size = size;
        self.center = size.center();
        self.anchor = anchor;
        self.recompute_offset();
    }

    pub fn resize(&mut self, size: Size) {
        self.update(size, self.anchor);
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        self.update(self.size, anchor);
    }

    fn recompute_offset(&mut self) {
        self.offset = self.anchor - self.center;
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world - self.offset
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen + self.offset
    }

    /// True when the orb's bounding circle lies wholly outside the view on
    /// either axis. Orbs touching the edge count as visible.
    pub fn is_off_screen(&self, orb: &Orb) -> bool {
        let (p, r) = (orb.position, orb.radius);
        let (a, c) = (self.anchor, self.center);
        let off_x = p.x < a.x - c.x - r || p.x > a.x + c.x + r;
        let off_y = p.y < a.y - c.y - r || p.y > a.y + c.y + r;
        off_x || off_y
    }

    /// The visible region in world coordinates.
    pub fn visible_bounds(&self) -> BBox {
        BBox::new(self.anchor - self.center, self.anchor + self.center)
    }

    /// Screen position of the grid dot nearest the top-left corner.
    ///
    /// Each component lies in `(-grid_size, 0]`, so stepping by `grid_size`
    /// from here covers the surface and the pattern scrolls with the camera.
    pub fn grid_phase(&self) -> Point {
        let phase = self.offset.rem_euclid(self.grid_size);
        Point::new(-phase.x, -phase.y)
    }

    /// Minimum time between frames, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        match self.frame_rate_cap {
            0 => None,
            fps => Some(Duration::from_secs(1) / fps),
        }
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    pub fn toggle_controls(&mut self) -> bool {
        self.controls_visible = !self.controls_visible;
        self.controls_visible
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn frame_rate_cap(&self) -> u32 {
        self.frame_rate_cap
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
