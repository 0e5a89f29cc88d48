use std::f64::consts::TAU;
use std::time::Duration;

use orbital_core::{Orb, Player, Point, Trail};
use serde::{Deserialize, Serialize};

use crate::config::RendererConfig;
use crate::error::{RenderError, RenderResult};
use crate::surface::{Filter, Surface, TextBaseline, ViewportSource};
use crate::viewport::ViewState;

const TRAIL_BASE_OPACITY: f64 = 0.4;
const FUEL_TRACK_OPACITY: f64 = 0.7;
const FUEL_FILL_OPACITY: f64 = 0.8;

const CONTROLS_MARGIN: f64 = 30.0;
const CONTROLS_LINE_HEIGHT: f64 = 20.0;
const CONTROLS_FONT: &str = "bold 12px sans-serif";
const TITLE_FONT: &str = "bold 84px sans-serif";

/// Per-frame inputs owned by the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameContext<'a> {
    /// The active player, if any. Supplies the trail and fuel gauge.
    pub player: Option<&'a Player>,
    pub paused: bool,
}

impl<'a> FrameContext<'a> {
    pub fn running(player: Option<&'a Player>) -> Self {
        Self {
            player,
            paused: false,
        }
    }

    pub fn paused(player: Option<&'a Player>) -> Self {
        Self {
            player,
            paused: true,
        }
    }
}

/// A visual element left out of a frame and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum SkippedElement {
    /// No orb in the batch was on screen.
    EmptyBatch,
    /// No active player to take a trail from.
    Trail,
    FuelDisplay { reason: String },
}

/// What `draw_batch` put on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub orbs_on_screen: usize,
    pub player_drawn: bool,
    pub stars_drawn: usize,
    pub trail_particles_drawn: usize,
}

/// Outcome of one `draw_all` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub paused: bool,
    pub batch: BatchStats,
    pub fuel_drawn: bool,
    pub controls_drawn: bool,
    pub skipped: Vec<SkippedElement>,
}

/// Opacity of the trail particle at `index` (0 = newest) out of `count`.
///
/// Falls linearly from 0.4 and is floored at 0, so the oldest particles of a
/// long trail vanish instead of going negative.
pub fn trail_opacity(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (TRAIL_BASE_OPACITY - index as f64 / (2.0 * count as f64)).max(0.0)
}

/// Fraction of the tank that is full, in `[0, 1]`.
pub fn fuel_ratio(player: &Player) -> RenderResult<f64> {
    let max = player.max_fuel;
    if !(max.is_finite() && max > 0.0) {
        return Err(RenderError::InvalidFuelCapacity(max));
    }
    let ratio = player.fuel / max;
    if ratio.is_nan() {
        return Ok(0.0);
    }
    Ok(ratio.clamp(0.0, 1.0))
}

/// Owns the drawing surface and the camera.
pub struct Renderer<S: Surface> {
    surface: S,
    view: ViewState,
    config: RendererConfig,
}

impl<S: Surface> Renderer<S> {
    /// Bind `surface`, size it to the viewport, and anchor the camera at the
    /// world origin.
    pub fn new(
        mut surface: S,
        viewport: &impl ViewportSource,
        config: RendererConfig,
    ) -> RenderResult<Self> {
        config.validate()?;
        let size = viewport.viewport_size();
        surface.resize(size);
        let view = ViewState::new(size, &config);
        log::info!(
            "Renderer bound to {}x{} surface (grid {}, fps cap {})",
            size.width,
            size.height,
            config.grid_size,
            config.frame_rate_cap
        );
        Ok(Self {
            surface,
            view,
            config,
        })
    }

    /// Start a frame: re-read the viewport size, follow `anchor`, and hand
    /// back the handle all offset-dependent drawing goes through.
    pub fn update_view_position(
        &mut self,
        viewport: &impl ViewportSource,
        anchor: Point,
    ) -> Frame<'_, S> {
        let size = viewport.viewport_size();
        if size != self.view.size() {
            log::debug!("Viewport resized to {}x{}", size.width, size.height);
        }
        self.surface.resize(size);
        self.view.update(size, anchor);
        Frame { renderer: self }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn set_controls_visible(&mut self, visible: bool) {
        self.view.set_controls_visible(visible);
    }

    pub fn toggle_controls(&mut self) -> bool {
        self.view.toggle_controls()
    }

    pub fn frame_interval(&self) -> Option<Duration> {
        self.view.frame_interval()
    }
}

/// A single frame in progress. Borrowing the renderer mutably keeps every
/// draw call for the frame on this handle.
pub struct Frame<'a, S: Surface> {
    renderer: &'a mut Renderer<S>,
}

impl<S: Surface> Frame<'_, S> {
    pub fn view(&self) -> &ViewState {
        &self.renderer.view
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.renderer.view.world_to_screen(world)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.renderer.view.screen_to_world(screen)
    }

    pub fn is_off_screen(&self, orb: &Orb) -> bool {
        self.renderer.view.is_off_screen(orb)
    }

    pub fn clear(&mut self) {
        let size = self.renderer.view.size();
        self.renderer
            .surface
            .clear_rect(0.0, 0.0, size.width, size.height);
    }

    /// Paint the background and the scrolling dot grid. Returns the dot count.
    pub fn draw_background(&mut self) -> usize {
        let Renderer {
            surface,
            view,
            config,
        } = &mut *self.renderer;
        let size = view.size();
        let grid = view.grid_size();
        let palette = *view.palette();

        surface.set_fill_style(palette.background);
        surface.fill_rect(0.0, 0.0, size.width, size.height);

        surface.set_fill_style(palette.primary(1.0));
        let phase = view.grid_phase();
        let cols = ((size.width + grid) / grid).floor() as usize;
        let rows = ((size.height + grid) / grid).floor() as usize;
        for i in 0..=cols {
            let x = i as f64 * grid + phase.x;
            for j in 0..=rows {
                let y = j as f64 * grid + phase.y;
                surface.fill_rect(x, y, config.grid_dot, config.grid_dot);
            }
        }
        (cols + 1) * (rows + 1)
    }

    /// Draw the fading trail. Returns how many particles were visible.
    pub fn draw_trail(&mut self, trail: &Trail) -> usize {
        let count = trail.len();
        let thickness = self.renderer.config.trail_thickness;
        let palette = *self.renderer.view.palette();
        let mut drawn = 0;
        for (index, position) in trail.iter().enumerate() {
            let opacity = trail_opacity(index, count);
            if opacity <= 0.0 {
                break;
            }
            let screen = self.world_to_screen(*position);
            let surface = &mut self.renderer.surface;
            surface.set_fill_style(palette.primary(opacity));
            surface.fill_rect(
                screen.x - thickness / 2.0,
                screen.y - thickness / 2.0,
                thickness,
                thickness,
            );
            drawn += 1;
        }
        drawn
    }

    /// Append the orb's circle to the current path without filling it.
    pub fn draw_orb(&mut self, orb: &Orb) {
        let screen = self.world_to_screen(orb.position);
        let surface = &mut self.renderer.surface;
        surface.move_to(screen.x, screen.y);
        surface.arc(screen.x, screen.y, orb.radius, 0.0, TAU);
    }

    /// Draw the on-screen orbs: the player first, then its trail, then all
    /// stars in a single fill.
    pub fn draw_batch(&mut self, orbs: &[Orb], ctx: &FrameContext<'_>) -> BatchStats {
        let palette = *self.renderer.view.palette();
        let on_screen: Vec<&Orb> = orbs
            .iter()
            .filter(|orb| !self.is_off_screen(orb))
            .collect();
        let mut stats = BatchStats {
            orbs_on_screen: on_screen.len(),
            ..Default::default()
        };

        if let Some(player) = on_screen.first().filter(|orb| orb.is_player()) {
            self.renderer.surface.begin_path();
            self.renderer.surface.set_fill_style(palette.player);
            self.draw_orb(player);
            self.renderer.surface.fill();
            self.renderer.surface.close_path();
            stats.player_drawn = true;
        }

        match ctx.player {
            Some(player) => stats.trail_particles_drawn = self.draw_trail(&player.trail),
            None => log::debug!("No active player, trail skipped"),
        }

        let stars: Vec<&Orb> = on_screen
            .into_iter()
            .filter(|orb| !orb.is_player())
            .collect();
        if !stars.is_empty() {
            self.renderer.surface.begin_path();
            self.renderer.surface.set_fill_style(palette.star);
            for star in &stars {
                self.draw_orb(star);
            }
            self.renderer.surface.fill();
            self.renderer.surface.close_path();
        }
        stats.stars_drawn = stars.len();
        stats
    }

    /// Draw the instructions and paused banner if controls are visible.
    pub fn draw_controls(&mut self) -> bool {
        let Renderer {
            surface,
            view,
            config,
        } = &mut *self.renderer;
        if !view.controls_visible() {
            return false;
        }
        surface.set_fill_style(view.palette().primary(1.0));

        surface.set_font(CONTROLS_FONT);
        surface.set_text_baseline(TextBaseline::Top);
        for (k, line) in config.control_lines.iter().enumerate() {
            let y = CONTROLS_MARGIN + k as f64 * CONTROLS_LINE_HEIGHT;
            surface.fill_text(line, CONTROLS_MARGIN, y, None);
        }

        surface.set_font(TITLE_FONT);
        surface.set_text_baseline(TextBaseline::Middle);
        let max_width = (view.size().width - 2.0 * CONTROLS_MARGIN).max(0.0);
        surface.fill_text(
            &config.paused_title,
            CONTROLS_MARGIN,
            view.center().y,
            Some(max_width),
        );
        true
    }

    /// Draw the fuel gauge along the bottom edge. Returns the filled width.
    pub fn draw_fuel_display(&mut self, player: &Player) -> RenderResult<f64> {
        let ratio = fuel_ratio(player)?;
        let Renderer {
            surface,
            view,
            config,
        } = &mut *self.renderer;
        let size = view.size();
        let palette = view.palette();
        let track_width = size.width;
        let height = config.fuel_bar_height;
        let x = view.center().x - track_width / 2.0;
        let y = size.height - height;
        let fill_width = track_width * ratio;

        surface.begin_path();
        surface.set_stroke_style(palette.primary(FUEL_TRACK_OPACITY));
        surface.stroke_rect(x, y, track_width, height);
        surface.set_fill_style(palette.primary(FUEL_FILL_OPACITY));
        surface.fill_rect(x, y, fill_width, height);
        surface.stroke();
        surface.close_path();
        Ok(fill_width)
    }

    /// Draw the whole frame. A paused frame shows only the blurred entities;
    /// a running one adds the background and fuel gauge. Controls go on top
    /// either way.
    pub fn draw_all(&mut self, orbs: &[Orb], ctx: &FrameContext<'_>) -> FrameSummary {
        let mut summary = FrameSummary {
            paused: ctx.paused,
            ..Default::default()
        };

        if ctx.paused {
            let blur = self.renderer.config.blur_px;
            self.renderer.surface.set_filter(Filter::Blur(blur));
            summary.batch = self.draw_batch(orbs, ctx);
            self.renderer.surface.set_filter(Filter::None);
        } else {
            self.draw_background();
            summary.batch = self.draw_batch(orbs, ctx);
        }

        if summary.batch.orbs_on_screen == 0 {
            summary.skipped.push(SkippedElement::EmptyBatch);
        }
        if ctx.player.is_none() {
            summary.skipped.push(SkippedElement::Trail);
        }

        if !ctx.paused {
            match ctx.player {
                Some(player) => match self.draw_fuel_display(player) {
                    Ok(_) => summary.fuel_drawn = true,
                    Err(e) => {
                        log::warn!("Fuel display skipped: {e}");
                        summary.skipped.push(SkippedElement::FuelDisplay {
                            reason: e.to_string(),
                        });
                    }
                },
                None => summary.skipped.push(SkippedElement::FuelDisplay {
                    reason: "no active player".to_string(),
                }),
            }
        }

        summary.controls_drawn = self.draw_controls();
        summary
    }
}

#[cfg(test)]
mod tests {
    use orbital_core::{OrbKind, Size};

    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};

    fn renderer(width: f64, height: f64) -> Renderer<RecordingSurface> {
        let size = Size::new(width, height);
        Renderer::new(RecordingSurface::new(size), &size, RendererConfig::default()).unwrap()
    }

    fn player_at(x: f64, y: f64) -> Player {
        let mut player = Player::new(Point::new(x, y), 8.0, 100.0, 20);
        player.move_to(Point::new(x, y));
        player
    }

    #[test]
    fn test_new_sizes_surface() {
        let r = renderer(800.0, 600.0);
        assert_eq!(r.surface().size(), Size::new(800.0, 600.0));
        assert_eq!(r.view().offset(), Point::new(-400.0, -300.0));
        assert_eq!(r.frame_interval(), None);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RendererConfig {
            grid_size: -5.0,
            ..Default::default()
        };
        let result = Renderer::new(
            RecordingSurface::new(Size::default()),
            &Size::new(10.0, 10.0),
            config,
        );
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_update_view_follows_resize() {
        let mut r = renderer(800.0, 600.0);
        let frame = r.update_view_position(&Size::new(1024.0, 768.0), Point::new(10.0, 10.0));
        assert_eq!(frame.view().center(), Point::new(512.0, 384.0));
        assert_eq!(frame.world_to_screen(Point::new(10.0, 10.0)), Point::new(512.0, 384.0));
        assert_eq!(r.surface().size(), Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_clear_covers_surface() {
        let mut r = renderer(800.0, 600.0);
        r.update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN).clear();
        assert_eq!(
            r.surface().commands().last(),
            Some(&DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0
            })
        );
    }

    #[test]
    fn test_orb_at_origin_draws_at_center() {
        let mut r = renderer(800.0, 600.0);
        let mut frame = r.update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN);
        frame.draw_orb(&Orb::star(Point::ORIGIN, 4.0));
        assert_eq!(
            r.surface().commands(),
            &[
                DrawCommand::MoveTo { x: 400.0, y: 300.0 },
                DrawCommand::Arc {
                    x: 400.0,
                    y: 300.0,
                    radius: 4.0,
                    start_angle: 0.0,
                    end_angle: TAU
                },
            ]
        );
    }

    #[test]
    fn test_background_grid_starts_at_origin() {
        let mut r = renderer(800.0, 600.0);
        let dots = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_background();
        let palette = *r.view().palette();
        let background = r.surface().fill_rects_with(palette.background);
        assert_eq!(background.len(), 1);
        assert_eq!((background[0].width, background[0].height), (800.0, 600.0));

        let grid = r.surface().fill_rects_with(palette.primary(1.0));
        assert_eq!(grid.len(), dots);
        assert_eq!(dots, 18 * 14);
        assert_eq!((grid[0].x, grid[0].y), (0.0, 0.0));
        assert!(grid.iter().all(|d| d.width == 1.5 && d.height == 1.5));
        assert!(grid.iter().any(|d| d.x >= 800.0 && d.y >= 600.0));
    }

    #[test]
    fn test_background_grid_repeats_every_cell() {
        let dots_at = |anchor: Point| {
            let mut r = renderer(800.0, 600.0);
            r.update_view_position(&Size::new(800.0, 600.0), anchor)
                .draw_background();
            let primary = r.view().palette().primary(1.0);
            r.surface()
                .fill_rects_with(primary)
                .iter()
                .map(|d| (d.x, d.y))
                .collect::<Vec<_>>()
        };
        assert_eq!(dots_at(Point::ORIGIN), dots_at(Point::new(50.0, 0.0)));
        assert_eq!(dots_at(Point::ORIGIN), dots_at(Point::new(-100.0, 150.0)));
        let shifted = dots_at(Point::new(20.0, 0.0));
        assert_eq!(shifted[0], (-20.0, 0.0));
    }

    #[test]
    fn test_trail_fades_and_clamps() {
        let mut r = renderer(800.0, 600.0);
        let trail = Trail::from_newest(10, (0..10).map(|i| Point::new(i as f64, 0.0)));
        let drawn = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_trail(&trail);
        // 0.4 - i / 20 > 0 for i < 8.
        assert_eq!(drawn, 8);
        let rects = r.surface().painted_rects();
        assert_eq!(rects.len(), 8);
        assert_eq!((rects[0].x, rects[0].y), (399.0, 299.0));
        assert_eq!((rects[0].width, rects[0].height), (2.0, 2.0));
        let alphas: Vec<f64> = rects.iter().map(|r| r.color.unwrap().a).collect();
        assert!(alphas.windows(2).all(|w| w[0] >= w[1]));
        assert!((alphas[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_trail_opacity_edges() {
        assert_eq!(trail_opacity(0, 0), 0.0);
        assert!((trail_opacity(0, 1) - 0.4).abs() < 1e-12);
        assert_eq!(trail_opacity(99, 100), 0.0);
    }

    #[test]
    fn test_batch_draws_player_then_trail_then_stars() {
        let mut r = renderer(800.0, 600.0);
        let player = player_at(0.0, 0.0);
        let orbs = vec![
            player.orb,
            Orb::star(Point::new(50.0, 50.0), 3.0),
            Orb::star(Point::new(5000.0, 0.0), 3.0),
            Orb::star(Point::new(-100.0, 20.0), 6.0),
        ];
        let ctx = FrameContext::running(Some(&player));
        let stats = r
            .update_view_position(&Size::new(800.0, 600.0), player.position())
            .draw_batch(&orbs, &ctx);
        assert_eq!(
            stats,
            BatchStats {
                orbs_on_screen: 3,
                player_drawn: true,
                stars_drawn: 2,
                trail_particles_drawn: 1,
            }
        );

        let s = r.surface();
        assert_eq!(s.count(|c| *c == DrawCommand::Fill), 2);
        let player_style = DrawCommand::SetFillStyle {
            color: r.view().palette().player.to_string(),
        };
        let star_style = DrawCommand::SetFillStyle {
            color: r.view().palette().star.to_string(),
        };
        let player_at_idx = s.position(|c| *c == player_style).unwrap();
        let trail_idx = s.position(|c| matches!(c, DrawCommand::FillRect { .. })).unwrap();
        let star_idx = s.position(|c| *c == star_style).unwrap();
        assert!(player_at_idx < trail_idx && trail_idx < star_idx);

        // The far star is culled; the on-screen ones are the ones drawn.
        let arcs: Vec<(f64, f64)> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![(400.0, 300.0), (450.0, 350.0), (300.0, 320.0)]);
    }

    #[test]
    fn test_batch_all_off_screen_draws_nothing() {
        let mut r = renderer(800.0, 600.0);
        let orbs = vec![
            Orb::star(Point::new(10_000.0, 0.0), 3.0),
            Orb::new(OrbKind::Player, Point::new(0.0, -9_000.0), 8.0),
        ];
        let stats = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_batch(&orbs, &FrameContext::default());
        assert_eq!(stats, BatchStats::default());
        assert!(r.surface().commands().is_empty());
    }

    #[test]
    fn test_batch_player_not_first_is_not_drawn_as_star() {
        let mut r = renderer(800.0, 600.0);
        let orbs = vec![
            Orb::star(Point::new(10.0, 10.0), 3.0),
            Orb::new(OrbKind::Player, Point::ORIGIN, 8.0),
        ];
        let stats = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_batch(&orbs, &FrameContext::default());
        assert!(!stats.player_drawn);
        assert_eq!(stats.stars_drawn, 1);
    }

    #[test]
    fn test_fuel_width_tracks_fuel() {
        let mut r = renderer(800.0, 600.0);
        let mut player = player_at(0.0, 0.0);
        let mut frame = r.update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN);

        player.fuel = 0.0;
        assert_eq!(frame.draw_fuel_display(&player).unwrap(), 0.0);
        player.fuel = 50.0;
        assert_eq!(frame.draw_fuel_display(&player).unwrap(), 400.0);
        player.fuel = 100.0;
        assert_eq!(frame.draw_fuel_display(&player).unwrap(), 800.0);
        player.fuel = 250.0;
        assert_eq!(frame.draw_fuel_display(&player).unwrap(), 800.0);

        assert!(r.surface().commands().contains(&DrawCommand::StrokeRect {
            x: 0.0,
            y: 595.0,
            width: 800.0,
            height: 5.0
        }));
    }

    #[test]
    fn test_fuel_rejects_zero_capacity() {
        let mut r = renderer(800.0, 600.0);
        let mut player = player_at(0.0, 0.0);
        player.max_fuel = 0.0;
        let result = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_fuel_display(&player);
        assert!(matches!(result, Err(RenderError::InvalidFuelCapacity(m)) if m == 0.0));
        assert!(r.surface().commands().is_empty());
    }

    #[test]
    fn test_controls_hidden_by_default() {
        let mut r = renderer(800.0, 600.0);
        let drawn = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_controls();
        assert!(!drawn);
        assert!(r.surface().commands().is_empty());
    }

    #[test]
    fn test_controls_layout() {
        let mut r = renderer(800.0, 600.0);
        r.set_controls_visible(true);
        r.update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_controls();
        let texts: Vec<(String, f64, f64, Option<f64>)> = r
            .surface()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText {
                    text,
                    x,
                    y,
                    max_width,
                } => Some((text.clone(), *x, *y, *max_width)),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[0], ("[ARROW KEYS]: BOOST".to_string(), 30.0, 30.0, None));
        assert_eq!(texts[2].2, 70.0);
        assert_eq!(texts[3], ("GAME PAUSED".to_string(), 30.0, 300.0, Some(740.0)));
    }

    #[test]
    fn test_draw_all_running_order() {
        let mut r = renderer(800.0, 600.0);
        r.set_controls_visible(true);
        let player = player_at(0.0, 0.0);
        let orbs = vec![player.orb, Orb::star(Point::new(30.0, 0.0), 2.0)];
        let summary = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_all(&orbs, &FrameContext::running(Some(&player)));
        assert!(summary.fuel_drawn && summary.controls_drawn);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.batch.stars_drawn, 1);

        let s = r.surface();
        assert_eq!(s.count(|c| matches!(c, DrawCommand::SetFilter { .. })), 0);
        let background = s.position(|c| matches!(c, DrawCommand::FillRect { .. })).unwrap();
        let stars = s.position(|c| *c == DrawCommand::Fill).unwrap();
        let fuel = s.position(|c| matches!(c, DrawCommand::StrokeRect { .. })).unwrap();
        let text = s.position(|c| matches!(c, DrawCommand::FillText { .. })).unwrap();
        assert!(background < stars && stars < fuel && fuel < text);
    }

    #[test]
    fn test_draw_all_paused_blurs_entities_only() {
        let mut r = renderer(800.0, 600.0);
        r.set_controls_visible(true);
        let player = player_at(0.0, 0.0);
        let orbs = vec![player.orb];
        let summary = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_all(&orbs, &FrameContext::paused(Some(&player)));
        assert!(summary.paused && !summary.fuel_drawn && summary.controls_drawn);

        let s = r.surface();
        assert_eq!(
            s.commands().first(),
            Some(&DrawCommand::SetFilter {
                filter: Filter::Blur(5.0)
            })
        );
        let unblur = s
            .position(|c| *c == DrawCommand::SetFilter { filter: Filter::None })
            .unwrap();
        let text = s.position(|c| matches!(c, DrawCommand::FillText { .. })).unwrap();
        assert!(unblur < text);
        assert_eq!(s.count(|c| matches!(c, DrawCommand::StrokeRect { .. })), 0);
        let background = r.view().palette().background;
        assert!(s.fill_rects_with(background).is_empty());
    }

    #[test]
    fn test_draw_all_degrades_on_bad_data() {
        let mut r = renderer(800.0, 600.0);
        let mut player = player_at(0.0, 0.0);
        player.max_fuel = f64::NAN;
        let summary = r
            .update_view_position(&Size::new(800.0, 600.0), Point::new(1e6, 1e6))
            .draw_all(&[player.orb], &FrameContext::running(Some(&player)));
        assert!(!summary.fuel_drawn);
        assert_eq!(summary.skipped[0], SkippedElement::EmptyBatch);
        assert!(matches!(summary.skipped[1], SkippedElement::FuelDisplay { .. }));

        let summary = r
            .update_view_position(&Size::new(800.0, 600.0), Point::ORIGIN)
            .draw_all(&[], &FrameContext::default());
        assert_eq!(
            summary.skipped,
            vec![
                SkippedElement::EmptyBatch,
                SkippedElement::Trail,
                SkippedElement::FuelDisplay {
                    reason: "no active player".to_string()
                },
            ]
        );
    }
}
