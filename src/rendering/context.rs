use crate::{
    core::geo::Point,
    layers::marker::MarkerIcon,
    rendering::{
        glyphs::{max_chars, text_width, FONT_HEIGHT},
        style::Color,
        surface::Surface,
    },
};

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Opaque fill of the whole surface
    Clear { color: Color },
    HorizontalLine { y: u32, color: Color },
    VerticalLine { x: u32, color: Color },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Ring {
        center: Point,
        radius: f64,
        width: f64,
        color: Color,
    },
    Rect {
        min: Point,
        width: u32,
        height: u32,
        color: Color,
    },
    Icon {
        center: Point,
        icon: MarkerIcon,
        color: Color,
    },
    /// Single line of text centered on `center`, cut to `max_width` pixels
    Text {
        center: Point,
        text: String,
        max_width: u32,
        color: Color,
    },
}

/// Display list for one frame. Commands are recorded back to front and
/// replayed onto a [`Surface`] by [`RenderContext::rasterize`].
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    pub drawing_queue: Vec<DrawCommand>,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            drawing_queue: Vec::new(),
        }
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
    }

    pub fn clear(&mut self, color: Color) {
        self.drawing_queue.push(DrawCommand::Clear { color });
    }

    pub fn render_grid(&mut self, spacing: u32, color: Color) {
        if spacing == 0 {
            return;
        }
        for x in (0..self.width).step_by(spacing as usize) {
            self.drawing_queue.push(DrawCommand::VerticalLine { x, color });
        }
        for y in (0..self.height).step_by(spacing as usize) {
            self.drawing_queue.push(DrawCommand::HorizontalLine { y, color });
        }
    }

    pub fn render_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.drawing_queue.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn render_ring(&mut self, center: Point, radius: f64, width: f64, color: Color) {
        self.drawing_queue.push(DrawCommand::Ring {
            center,
            radius,
            width,
            color,
        });
    }

    pub fn render_rect(&mut self, min: Point, width: u32, height: u32, color: Color) {
        self.drawing_queue.push(DrawCommand::Rect {
            min,
            width,
            height,
            color,
        });
    }

    pub fn render_icon(&mut self, center: Point, icon: MarkerIcon, color: Color) {
        self.drawing_queue.push(DrawCommand::Icon {
            center,
            icon,
            color,
        });
    }

    pub fn render_text(&mut self, center: Point, text: &str, max_width: u32, color: Color) {
        self.drawing_queue.push(DrawCommand::Text {
            center,
            text: text.to_string(),
            max_width,
            color,
        });
    }

    /// Replays the queue onto `surface`
    pub fn rasterize(&self, surface: &mut Surface) {
        for command in &self.drawing_queue {
            match command {
                DrawCommand::Clear { color } => surface.fill(*color),
                DrawCommand::HorizontalLine { y, color } => {
                    surface.fill_rect(0, i64::from(*y), surface.width(), 1, *color)
                }
                DrawCommand::VerticalLine { x, color } => {
                    surface.fill_rect(i64::from(*x), 0, 1, surface.height(), *color)
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(*center, *radius, *color),
                DrawCommand::Ring {
                    center,
                    radius,
                    width,
                    color,
                } => surface.stroke_circle(*center, *radius, *width, *color),
                DrawCommand::Rect {
                    min,
                    width,
                    height,
                    color,
                } => surface.fill_rect(
                    min.x.round() as i64,
                    min.y.round() as i64,
                    *width,
                    *height,
                    *color,
                ),
                DrawCommand::Icon {
                    center,
                    icon,
                    color,
                } => surface.draw_icon(*center, *icon, *color),
                DrawCommand::Text {
                    center,
                    text,
                    max_width,
                    color,
                } => {
                    let visible: String = text.chars().take(max_chars(*max_width)).collect();
                    let width = text_width(visible.chars().count());
                    let left = (center.x - f64::from(width) / 2.0).round() as i64;
                    let top = (center.y - f64::from(FONT_HEIGHT) / 2.0).round() as i64;
                    surface.draw_text(left, top, &visible, *color);
                }
            }
        }
    }
}
