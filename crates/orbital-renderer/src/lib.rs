//! # Orbital Renderer
//!
//! Immediate-mode 2D rendering for the game view. Each frame the game loop
//! calls [`Renderer::update_view_position`] to follow the player, then draws
//! the background grid, orbs, trail, fuel gauge and pause overlay through the
//! returned [`Frame`].
//!
//! Drawing goes through the [`Surface`] trait, so any canvas-like backend can
//! be plugged in. [`RecordingSurface`] captures calls as JSON-serializable
//! [`DrawCommand`]s for a frontend to replay, or for tests.

pub mod config;
pub mod error;
pub mod recording;
pub mod renderer;
pub mod surface;
pub mod viewport;

pub use config::RendererConfig;
pub use error::{RenderError, RenderResult};
pub use recording::{DrawCommand, RecordedFrame, RecordingSurface};
pub use renderer::{
    fuel_ratio, trail_opacity, BatchStats, Frame, FrameContext, FrameSummary, Renderer,
    SkippedElement,
};
pub use surface::{Filter, Surface, TextBaseline, ViewportSource};
pub use viewport::ViewState;
