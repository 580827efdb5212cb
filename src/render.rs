//! Drawing. The scene is described against the [`Surface`] trait so the
//! controller state can be rendered to a canvas or to a recorder in tests.

use rand::Rng;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::controller::{Controller, InputMode};
use crate::crosshair::{ARM_LENGTH, LINE_WIDTH};
use crate::error::{Error, Result};

pub const DOT_COLOR: &str = "red";
pub const CROSSHAIR_COLOR: &str = "black";

pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn draw_disc(&mut self, x: f64, y: f64, radius: f64, color: &str) -> Result<()>;
    fn draw_crosshair(&mut self, x: f64, y: f64);
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn draw_disc(&mut self, x: f64, y: f64, radius: f64, color: &str) -> Result<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)
            .map_err(Error::from_js)?;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    fn draw_crosshair(&mut self, x: f64, y: f64) {
        self.ctx.set_stroke_style_str(CROSSHAIR_COLOR);
        self.ctx.set_line_width(LINE_WIDTH);
        line(&self.ctx, x - ARM_LENGTH, y, x + ARM_LENGTH, y);
        line(&self.ctx, x, y - ARM_LENGTH, x, y + ARM_LENGTH);
    }
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

/// Full redraw: clear, then the current dot, then the crosshair on top.
pub fn draw_scene<S: Surface, R: Rng>(surface: &mut S, controller: &Controller<R>) -> Result<()> {
    surface.clear();
    let Some(dot) = controller.dot() else {
        return Ok(());
    };
    surface.draw_disc(dot.x, dot.y, dot.radius, DOT_COLOR)?;
    if controller.mode() == InputMode::CapturedPointer {
        if let Some(c) = controller.crosshair() {
            surface.draw_crosshair(c.x, c.y);
        }
    }
    Ok(())
}
