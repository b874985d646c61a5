//=========================================================================
// Button
//=========================================================================
//
// Clickable labelled box that carries a MenuSignal.
//
// Label metrics are approximated from a fixed glyph cell since text
// shaping belongs to the render backend.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event_bus::MenuSignal;
use crate::core::render::{Color, Rect, RenderTarget};

//=== Constants ===========================================================

pub(crate) const GLYPH_WIDTH: f32 = 14.0;
pub(crate) const GLYPH_HEIGHT: f32 = 28.0;

const PADDING: f32 = 10.0;
const HOVER_LIGHTEN: u8 = 50;
const BORDER: Color = Color::rgb(200, 200, 200);

//=== Button ==============================================================

#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    signal: MenuSignal,
    bounds: Rect,
    base_color: Color,
    current_color: Color,
    hovered: bool,
}

impl Button {
    /// Creates a button horizontally centred on `center_x` with its top
    /// edge at `y`.
    pub fn new(label: impl Into<String>, signal: MenuSignal, center_x: f32, y: f32, color: Color) -> Self {
        let label = label.into();
        let w = label.chars().count() as f32 * GLYPH_WIDTH + 2.0 * PADDING;
        let h = GLYPH_HEIGHT + 2.0 * PADDING;

        Self {
            label,
            signal,
            bounds: Rect::new(center_x - w / 2.0, y, w, h),
            base_color: color,
            current_color: color,
            hovered: false,
        }
    }

    /// Updates the highlight for the cursor at `mouse` and returns whether
    /// the button is hovered.
    ///
    /// Buttons without a signal never hover.
    pub fn hover(&mut self, mouse: (f32, f32)) -> bool {
        self.hovered = self.signal != MenuSignal::None && self.bounds.contains(mouse);
        self.current_color = if self.hovered {
            self.base_color.lighten(HOVER_LIGHTEN)
        } else {
            self.base_color
        };
        self.hovered
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        let Rect { x, y, w, h } = self.bounds;

        target.fill_rect(self.bounds, self.current_color);
        target.outline_rect(self.bounds, BORDER);
        target.draw_label(
            &self.label,
            Rect::new(x + PADDING, y + PADDING, w - 2.0 * PADDING, h - 2.0 * PADDING),
            Color::WHITE,
        );
    }

    //--- Accessors --------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn signal(&self) -> MenuSignal {
        self.signal
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.current_color
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
