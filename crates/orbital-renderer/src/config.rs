use std::fs;
use std::path::Path;

use orbital_core::Palette;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Smallest accepted grid spacing. The background issues one `fill_rect` per
/// dot, so the dot count grows with the inverse square of the spacing.
pub const MIN_GRID_SIZE: f64 = 4.0;

/// Tunables for the renderer. Every field has a default, so a config file
/// only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Spacing of background grid dots, in pixels.
    pub grid_size: f64,
    /// Side of each grid dot.
    pub grid_dot: f64,
    /// Frames per second. 0 means uncapped.
    pub frame_rate_cap: u32,
    /// Side of each trail particle square.
    pub trail_thickness: f64,
    pub fuel_bar_height: f64,
    /// Blur radius applied to the paused scene.
    pub blur_px: f64,
    pub palette: Palette,
    /// Instruction lines shown on the pause overlay.
    pub control_lines: Vec<String>,
    pub paused_title: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            grid_dot: 1.5,
            frame_rate_cap: 0,
            trail_thickness: 2.0,
            fuel_bar_height: 5.0,
            blur_px: 5.0,
            palette: Palette::default(),
            control_lines: vec![
                "[ARROW KEYS]: BOOST".to_string(),
                "[SPACE]: ZERO GRAVITY".to_string(),
                "[SHIFT]: REVERSE GRAVITY".to_string(),
            ],
            paused_title: "GAME PAUSED".to_string(),
        }
    }
}

impl RendererConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.grid_size.is_finite() && self.grid_size >= MIN_GRID_SIZE) {
            return Err(RenderError::InvalidConfig(format!(
                "grid_size must be at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        let non_negative = [
            ("grid_dot", self.grid_dot),
            ("trail_thickness", self.trail_thickness),
            ("fuel_bar_height", self.fuel_bar_height),
            ("blur_px", self.blur_px),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.grid_dot > self.grid_size {
            return Err(RenderError::InvalidConfig(format!(
                "grid_dot {} is larger than grid_size {}",
                self.grid_dot, self.grid_size
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded renderer config from {}", path.display());
        Ok(config)
    }
}
