//=========================================================================
// Render Service
//=========================================================================
//
// Fixed-capacity stack of named draw layers over a render target.
//
// Architecture:
//   add / insert / remove_* → layers: Vec<RenderLayer> (≤ MAX_RENDER_LAYERS)
//                                   ↓
//   begin_frame() → clear(black)
//   present()     → draw each layer in order → target.present()
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{Color, RenderTarget};

//=== Constants ===========================================================

/// Maximum number of simultaneous render layers.
pub const MAX_RENDER_LAYERS: usize = 32;

/// Longest layer name kept, in bytes. Longer names are truncated.
pub const MAX_LAYER_NAME_LEN: usize = 31;

//=== RenderError =========================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("render layer stack is full ({} layers)", MAX_RENDER_LAYERS)]
    CapacityExceeded,

    #[error("insert position {position} is past the end of {len} layers")]
    PositionOutOfRange { position: usize, len: usize },
}

//=== RenderLayer =========================================================

/// Draw callback. Captures whatever data it needs to draw.
pub type RenderFn = Box<dyn FnMut(&mut dyn RenderTarget)>;

struct RenderLayer {
    name: String,
    draw: RenderFn,
}

fn truncate_name(name: &str) -> String {
    if name.len() <= MAX_LAYER_NAME_LEN {
        return name.to_owned();
    }

    let mut end = MAX_LAYER_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_owned()
}

//=== RenderService =======================================================

/// Owns the render target and the ordered list of draw layers.
///
/// Layers draw bottom to top in array order. States rebuild the list on
/// every transition via [`remove_all`](Self::remove_all).
///
/// # Example
///
/// ```
/// use conquest_engine::core::render::{Color, DrawCommand, RecordingTarget, RenderService};
///
/// let target = RecordingTarget::new(800, 600);
/// let log = target.log();
/// let mut render = RenderService::new(Box::new(target));
///
/// render.add(|t| t.clear(Color::WHITE), "background").unwrap();
/// render.begin_frame();
/// render.present();
///
/// assert_eq!(
///     *log.borrow(),
///     [
///         DrawCommand::Clear(Color::BLACK),
///         DrawCommand::Clear(Color::WHITE),
///         DrawCommand::Present,
///     ]
/// );
/// ```
pub struct RenderService {
    target: Box<dyn RenderTarget>,
    layers: Vec<RenderLayer>,
}

impl RenderService {
    pub fn new(target: Box<dyn RenderTarget>) -> Self {
        Self {
            target,
            layers: Vec::with_capacity(MAX_RENDER_LAYERS),
        }
    }

    //--- Layer Management -------------------------------------------------

    /// Appends a layer on top. Returns its index.
    pub fn add<F>(&mut self, draw: F, name: &str) -> Result<usize, RenderError>
    where
        F: FnMut(&mut dyn RenderTarget) + 'static,
    {
        if self.layers.len() >= MAX_RENDER_LAYERS {
            warn!("Cannot add render layer '{}': stack is full", name);
            return Err(RenderError::CapacityExceeded);
        }

        self.layers.push(RenderLayer {
            name: truncate_name(name),
            draw: Box::new(draw),
        });
        debug!("Added render layer '{}' at {}", name, self.layers.len() - 1);
        Ok(self.layers.len() - 1)
    }

    /// Inserts a layer at `position`, shifting later layers up.
    ///
    /// `position == len()` appends.
    pub fn insert<F>(&mut self, draw: F, name: &str, position: usize) -> Result<(), RenderError>
    where
        F: FnMut(&mut dyn RenderTarget) + 'static,
    {
        let len = self.layers.len();
        if position > len {
            warn!("Cannot insert render layer '{}' at {} (len {})", name, position, len);
            return Err(RenderError::PositionOutOfRange { position, len });
        }
        if len >= MAX_RENDER_LAYERS {
            warn!("Cannot insert render layer '{}': stack is full", name);
            return Err(RenderError::CapacityExceeded);
        }

        self.layers.insert(
            position,
            RenderLayer {
                name: truncate_name(name),
                draw: Box::new(draw),
            },
        );
        debug!("Inserted render layer '{}' at {}", name, position);
        Ok(())
    }

    /// Removes the layer at `index`. Out-of-range indices are ignored.
    pub fn remove_by_index(&mut self, index: usize) {
        if index < self.layers.len() {
            let layer = self.layers.remove(index);
            debug!("Removed render layer '{}' from {}", layer.name, index);
        }
    }

    /// Removes the first layer named `name`. Unknown names are ignored.
    pub fn remove_by_name(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            self.remove_by_index(index);
        }
    }

    /// Drops every layer.
    pub fn remove_all(&mut self) {
        self.layers.clear();
    }

    //--- Frame ------------------------------------------------------------

    /// Clears the target to the default background.
    pub fn begin_frame(&mut self) {
        self.target.clear(Color::BLACK);
    }

    /// Draws every layer bottom to top, then presents the frame.
    pub fn present(&mut self) {
        let target = self.target.as_mut();
        for layer in &mut self.layers {
            (layer.draw)(&mut *target);
        }
        self.target.present();
    }

    //--- Queries ----------------------------------------------------------

    /// Layer names, bottom to top.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Size of the underlying target in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.target.size()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
