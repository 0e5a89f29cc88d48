use orbital_core::{Rgba, Size};
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::surface::{Filter, Surface, TextBaseline};

/// One surface call, in a form a frontend canvas can replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    ClosePath,
    MoveTo { x: f64, y: f64 },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Fill,
    Stroke,
    SetFillStyle { color: String },
    SetStrokeStyle { color: String },
    SetFont { font: String },
    SetTextBaseline { baseline: TextBaseline },
    FillText {
        text: String,
        x: f64,
        y: f64,
        max_width: Option<f64>,
    },
    SetFilter { filter: Filter },
}

/// A filled rectangle together with the fill style active when it was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Option<Rgba>,
}

/// Complete frame data handed from Rust to a replaying frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

/// A headless surface that records every call instead of painting.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    fill_style: Option<Rgba>,
    commands: Vec<DrawCommand>,
    painted: Vec<PaintedRect>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            fill_style: None,
            commands: Vec::new(),
            painted: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded frame, leaving the surface ready for the next one.
    pub fn take_frame(&mut self) -> RecordedFrame {
        self.painted.clear();
        RecordedFrame {
            size: self.size,
            commands: std::mem::take(&mut self.commands),
        }
    }

    pub fn to_json(&self) -> RenderResult<String> {
        let frame = RecordedFrame {
            size: self.size,
            commands: self.commands.clone(),
        };
        Ok(serde_json::to_string(&frame)?)
    }

    /// Every `fill_rect` so far, with its fill color.
    pub fn painted_rects(&self) -> &[PaintedRect] {
        &self.painted
    }

    /// `fill_rect` calls made while `color` was the fill style.
    pub fn fill_rects_with(&self, color: Rgba) -> Vec<PaintedRect> {
        self.painted
            .iter()
            .filter(|r| r.color == Some(color))
            .copied()
            .collect()
    }

    /// Position of the first command matching `pred`.
    pub fn position(&self, pred: impl Fn(&DrawCommand) -> bool) -> Option<usize> {
        self.commands.iter().position(pred)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.push(DrawCommand::Resize {
                width: size.width,
                height: size.height,
            });
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.painted.push(PaintedRect {
            x,
            y,
            width,
            height,
            color: self.fill_style,
        });
        self.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::StrokeRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.fill_style = Some(color);
        self.push(DrawCommand::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.push(DrawCommand::SetStrokeStyle {
            color: color.to_string(),
        });
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::SetFont {
            font: font.to_string(),
        });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::SetTextBaseline { baseline });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            max_width,
        });
    }

    fn set_filter(&mut self, filter: Filter) {
        self.push(DrawCommand::SetFilter { filter });
    }
}
