//=========================================================================
// Transition Queue
//=========================================================================
//
// Pending state changes.
//
// Event listeners queue target states here while a frame is running.
// The state manager applies them right after input dispatch.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::GameState;

//=== Transition Queue ====================================================

/// FIFO of requested target states.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: VecDeque<GameState>,
}

/// Queue shared between the state manager and the listeners feeding it.
pub type SharedTransitionQueue = Rc<RefCell<TransitionQueue>>;

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a transition to be applied at the next dispatch point.
    pub fn push(&mut self, target: GameState) {
        self.queue.push_back(target);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Oldest pending transition.
    pub fn pop(&mut self) -> Option<GameState> {
        self.queue.pop_front()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_request_order() {
        let mut queue = TransitionQueue::new();
        queue.push(GameState::Play);
        queue.push(GameState::Pause);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(GameState::Play));
        assert_eq!(queue.pop(), Some(GameState::Pause));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
