//=========================================================================
// Input Buffer
//
// Input gathered on the platform thread between two redraws.
//
// - key and button edges keep their arrival order; a repeated edge is
//   dropped when it immediately follows itself
// - cursor motion only keeps its latest position
//
// At each redraw the buffer is turned into one `PlatformEvent::Inputs`.
//=========================================================================

//=== Standard Library Imports ============================================
use std::mem::{discriminant, take};

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;
use crate::core::platform_bridge::PlatformEvent;

//=== InputBuffer Struct ==================================================
#[derive(Debug, Default)]
pub struct InputBuffer {
    edges: Vec<InputEvent>,
    latest: Vec<InputEvent>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `event` by kind: continuous events overwrite, edges queue.
    pub fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            let kind = discriminant(&event);
            match self.latest.iter_mut().find(|e| discriminant(&**e) == kind) {
                Some(slot) => *slot = event,
                None => self.latest.push(event),
            }
        } else if self.edges.last() != Some(&event) {
            self.edges.push(event);
        }
    }

    /// Empties the buffer into a channel message. `None` if nothing came in.
    pub fn take_event(&mut self) -> Option<PlatformEvent> {
        if self.is_empty() {
            return None;
        }
        Some(PlatformEvent::Inputs {
            discrete: take(&mut self.edges),
            continuous: take(&mut self.latest),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.latest.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};

    fn taken(buffer: &mut InputBuffer) -> (Vec<InputEvent>, Vec<InputEvent>) {
        match buffer.take_event() {
            Some(PlatformEvent::Inputs { discrete, continuous }) => (discrete, continuous),
            other => panic!("expected inputs, got {:?}", other),
        }
    }

    #[test]
    fn click_sequence_survives_in_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::MouseButtonDown(MouseButton::Left));
        buffer.push(InputEvent::KeyDown(KeyCode::Escape));
        buffer.push(InputEvent::MouseButtonUp(MouseButton::Left));

        let (edges, motion) = taken(&mut buffer);
        assert_eq!(
            edges,
            [
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::KeyDown(KeyCode::Escape),
                InputEvent::MouseButtonUp(MouseButton::Left),
            ]
        );
        assert!(motion.is_empty());
    }

    #[test]
    fn back_to_back_duplicate_edges_collapse() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyUp(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));

        let (edges, _) = taken(&mut buffer);
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn cursor_keeps_last_position_only() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push(InputEvent::KeyDown(KeyCode::Space));
        buffer.push(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        let (edges, motion) = taken(&mut buffer);
        assert_eq!(edges, [InputEvent::KeyDown(KeyCode::Space)]);
        assert_eq!(motion, [InputEvent::MouseMoved { x: 20.0, y: 30.0 }]);
    }

    #[test]
    fn taking_empties_the_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.take_event().is_none());

        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        assert!(buffer.take_event().is_some());

        assert!(buffer.is_empty());
        assert!(buffer.take_event().is_none());
    }
}
