//=========================================================================
// Event Collector
//=========================================================================
//
// Game-loop side of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input_batches → TickControl
//
// At most MAX_EVENTS_PER_FRAME messages are taken per frame; the rest
// wait for the next one. All waiting is left to the frame pacer.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Whether the game loop should keep going after this frame's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains platform messages into per-frame input batches.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
        }
    }

    /// Collects the messages pending for this frame.
    ///
    /// Returns [`TickControl::Exit`] once the window is closed or the
    /// platform side hung up. Input batched before the close request is
    /// kept so the last frame still sees it.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();

        for received in 0..MAX_EVENTS_PER_FRAME {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => return TickControl::Continue,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "platform", "Platform channel disconnected");
                    return TickControl::Exit;
                }
            };

            match event {
                PlatformEvent::Inputs { discrete, continuous } => {
                    let batches = [discrete, continuous].into_iter().filter(|b| !b.is_empty());
                    self.input_batches.extend(batches);
                }
                PlatformEvent::WindowClosed => {
                    debug!(target: "platform", "Window close received after {} messages", received);
                    return TickControl::Exit;
                }
            }
        }

        warn!(
            target: "platform",
            "Event queue backlog: {} messages left for the next frame",
            self.receiver.len()
        );
        TickControl::Continue
    }

    /// Input batches of the last collected frame, in arrival order.
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use crate::core::input::{KeyCode, MouseButton};

    fn inputs(discrete: Vec<InputEvent>, continuous: Vec<InputEvent>) -> PlatformEvent {
        PlatformEvent::Inputs { discrete, continuous }
    }

    fn key(code: KeyCode) -> PlatformEvent {
        inputs(vec![InputEvent::KeyDown(code)], vec![])
    }

    #[test]
    fn idle_channel_continues_with_no_input() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn batches_keep_edges_before_motion_and_skip_empty_halves() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(inputs(
            vec![InputEvent::MouseButtonDown(MouseButton::Left)],
            vec![InputEvent::MouseMoved { x: 1.0, y: 2.0 }],
        ))
        .unwrap();
        tx.send(inputs(vec![], vec![])).unwrap();
        tx.send(key(KeyCode::KeyA)).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.batches(),
            [
                vec![InputEvent::MouseButtonDown(MouseButton::Left)],
                vec![InputEvent::MouseMoved { x: 1.0, y: 2.0 }],
                vec![InputEvent::KeyDown(KeyCode::KeyA)],
            ]
        );

        collector.collect_frame();
        assert!(collector.batches().is_empty(), "previous frame must be cleared");
    }

    #[test]
    fn close_keeps_the_input_sent_before_it() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key(KeyCode::Space)).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
        assert_eq!(collector.batches(), [vec![InputEvent::KeyDown(KeyCode::Space)]]);
    }

    #[test]
    fn backlog_is_spread_over_frames() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..MAX_EVENTS_PER_FRAME + 5 {
            tx.send(key(KeyCode::KeyW)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }

    #[test]
    fn hang_up_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
