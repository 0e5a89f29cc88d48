//! Drives the renderer against a recording surface for a fixed number of
//! frames and prints the last frame's draw commands as JSON.
//!
//! Usage: `orbital-headless [config.json] [frames]`

mod universe;

use std::env;
use std::error::Error;
use std::thread;

use orbital_core::Size;
use orbital_renderer::{FrameContext, RecordedFrame, RecordingSurface, Renderer, RendererConfig};
use serde::Serialize;

use crate::universe::Universe;

const DEFAULT_FRAMES: u64 = 240;
const VIEWPORT: Size = Size {
    width: 1280.0,
    height: 720.0,
};

#[derive(Serialize)]
struct Report {
    frames: u64,
    stars: usize,
    last_frame: RecordedFrame,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => RendererConfig::load(&path)?,
        None => RendererConfig::default(),
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };

    let mut universe = Universe::new(40, 120.0);
    let mut renderer = Renderer::new(RecordingSurface::new(VIEWPORT), &VIEWPORT, config)?;
    let pause_window = (frames / 2)..(frames / 2 + frames / 8);
    let mut last_frame = None;

    for tick in 0..frames {
        let paused = pause_window.contains(&tick);
        if paused != renderer.view().controls_visible() {
            renderer.set_controls_visible(paused);
            log::info!("Frame {tick}: {}", if paused { "paused" } else { "resumed" });
        }
        if !paused {
            universe.step();
        }

        let ctx = FrameContext {
            player: Some(&universe.player),
            paused,
        };
        let mut frame = renderer.update_view_position(&VIEWPORT, universe.player.position());
        let orbs = universe.visible_orbs(&frame.view().visible_bounds());
        frame.clear();
        let summary = frame.draw_all(&orbs, &ctx);
        if !summary.skipped.is_empty() {
            log::warn!("Frame {tick} degraded: {:?}", summary.skipped);
        }
        log::debug!("Frame {tick}: {}", serde_json::to_string(&summary)?);

        last_frame = Some(renderer.surface_mut().take_frame());
        if let Some(interval) = renderer.frame_interval() {
            thread::sleep(interval);
        }
    }

    if let Some(last_frame) = last_frame {
        let report = Report {
            frames,
            stars: universe.star_count(),
            last_frame,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
