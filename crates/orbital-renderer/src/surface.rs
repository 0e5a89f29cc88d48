use orbital_core::{Rgba, Size};
use serde::{Deserialize, Serialize};

/// Vertical text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
}

/// Post-effect applied to subsequent draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "px", rename_all = "lowercase")]
pub enum Filter {
    None,
    Blur(f64),
}

/// An immediate-mode 2D drawing backend.
///
/// Path calls (`move_to`, `arc`) accumulate into the current path until
/// `fill` or `stroke`; rectangle and text calls paint immediately.
pub trait Surface {
    fn size(&self) -> Size;
    fn resize(&mut self, size: Size);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, color: Rgba);
    fn set_stroke_style(&mut self, color: Rgba);
    fn set_font(&mut self, font: &str);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>);
    fn set_filter(&mut self, filter: Filter);
}

/// Where the current window or canvas size comes from. Polled every frame.
pub trait ViewportSource {
    fn viewport_size(&self) -> Size;
}

impl ViewportSource for Size {
    fn viewport_size(&self) -> Size {
        *self
    }
}
