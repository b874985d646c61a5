//=========================================================================
// Render System
//=========================================================================
//
// Layered 2D drawing over a pluggable render target.
//
// Architecture:
//   RenderService
//     ├─ target: Box<dyn RenderTarget>
//     └─ layers: Vec<RenderLayer> (bottom → top, ≤ 32)
//
// Flow:
//   begin_frame() → clear → present() → layer draws → target.present()
//
//=========================================================================

//=== Module Declarations =================================================

mod render_service;
mod target;

//=== Public API ==========================================================

pub use render_service::{RenderError, RenderFn, RenderService, MAX_LAYER_NAME_LEN, MAX_RENDER_LAYERS};
pub use target::{Color, DrawCommand, DrawLog, HeadlessTarget, Rect, RecordingTarget, RenderTarget};
