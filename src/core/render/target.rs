//=========================================================================
// Render Target
//=========================================================================
//
// Drawing surface abstraction used by render layers.
//
// Architecture:
//   RenderLayer draw fn → &mut dyn RenderTarget → backend
//                                                  ├─ HeadlessTarget
//                                                  └─ RecordingTarget
//
// The engine never creates a GPU context itself; a backend that can put
// pixels on screen implements this trait and is handed to the engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Adds `amount` to each color channel, saturating at 255. Alpha is kept.
    pub fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle in screen pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns `true` if the point lies inside (edges inclusive).
    pub fn contains(&self, (px, py): (f32, f32)) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

//=== RenderTarget ========================================================

/// Backend surface that render layers draw on.
pub trait RenderTarget {
    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn outline_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` centred in `bounds`.
    fn draw_label(&mut self, text: &str, bounds: Rect, color: Color);

    /// Makes the finished frame visible.
    fn present(&mut self);

    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);
}

//=== DrawCommand =========================================================

/// A single call received by a [`RecordingTarget`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rect, Color),
    OutlineRect(Rect, Color),
    Label(String, Rect, Color),
    Present,
}

/// Shared handle to the commands captured by a [`RecordingTarget`].
pub type DrawLog = Rc<RefCell<Vec<DrawCommand>>>;

//=== RecordingTarget =====================================================

/// Target that records every draw call instead of rasterizing it.
///
/// Clone the [`DrawLog`] before handing the target to the engine to keep
/// inspecting frames afterwards.
///
/// # Example
///
/// ```
/// use conquest_engine::core::render::{Color, DrawCommand, RecordingTarget, RenderTarget};
///
/// let mut target = RecordingTarget::new(640, 480);
/// let log = target.log();
///
/// target.clear(Color::BLACK);
/// target.present();
///
/// assert_eq!(*log.borrow(), [DrawCommand::Clear(Color::BLACK), DrawCommand::Present]);
/// ```
pub struct RecordingTarget {
    size: (u32, u32),
    commands: DrawLog,
}

impl RecordingTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            commands: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a handle to the recorded commands.
    pub fn log(&self) -> DrawLog {
        Rc::clone(&self.commands)
    }

    fn record(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self, color: Color) {
        self.record(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::FillRect(rect, color));
    }

    fn outline_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::OutlineRect(rect, color));
    }

    fn draw_label(&mut self, text: &str, bounds: Rect, color: Color) {
        self.record(DrawCommand::Label(text.to_owned(), bounds, color));
    }

    fn present(&mut self) {
        self.record(DrawCommand::Present);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

//=== HeadlessTarget ======================================================

/// Target that discards draw calls and only counts presented frames.
///
/// Default backend when no rasterizer is supplied.
pub struct HeadlessTarget {
    size: (u32, u32),
    frames: u64,
    draw_calls: usize,
}

impl HeadlessTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            frames: 0,
            draw_calls: 0,
        }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderTarget for HeadlessTarget {
    fn clear(&mut self, _color: Color) {
        self.draw_calls += 1;
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.draw_calls += 1;
    }

    fn outline_rect(&mut self, _rect: Rect, _color: Color) {
        self.draw_calls += 1;
    }

    fn draw_label(&mut self, _text: &str, _bounds: Rect, _color: Color) {
        self.draw_calls += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
        trace!(target: "render", "Frame {} presented ({} draw calls)", self.frames, self.draw_calls);
        self.draw_calls = 0;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
