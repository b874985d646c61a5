//=========================================================================
// Computation Stack
//=========================================================================
//
// Priority-ordered list of named per-frame callbacks (the frame scheduler).
//
// Architecture:
//   push(name, fn, priority) → sorted Vec (descending priority, FIFO ties)
//                                   ↓
//   execute(ctx) → fn(ctx) for each layer, top to bottom
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== ComputationLayer ====================================================

/// Callback invoked once per frame with the shared context.
pub type ComputationFn<C> = Box<dyn FnMut(&mut C)>;

/// A named, prioritized per-frame callback.
pub struct ComputationLayer<C> {
    name: String,
    priority: i32,
    func: ComputationFn<C>,
}

impl<C> ComputationLayer<C> {
    /// Layer name, unique by convention (removal matches the first one).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Higher priority runs earlier.
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

//=== ComputationStack ====================================================

/// Ordered pipeline of per-frame callbacks.
///
/// Layers are kept sorted by descending priority. A layer pushed with a
/// priority equal to existing layers lands after all of them, so equal
/// priorities run in registration order.
///
/// # Example
///
/// ```
/// use conquest_engine::core::compute::ComputationStack;
///
/// let mut stack = ComputationStack::<Vec<&'static str>>::new();
/// stack.push("present", |log| log.push("present"), 100);
/// stack.push("input", |log| log.push("input"), 300);
///
/// let mut log = Vec::new();
/// stack.execute(&mut log);
/// assert_eq!(log, ["input", "present"]);
/// ```
pub struct ComputationStack<C> {
    layers: Vec<ComputationLayer<C>>,
}

impl<C> ComputationStack<C> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    //--- Mutation ---------------------------------------------------------

    /// Inserts a layer before the first layer of strictly lower priority.
    pub fn push<F>(&mut self, name: &str, func: F, priority: i32)
    where
        F: FnMut(&mut C) + 'static,
    {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.priority < priority)
            .unwrap_or(self.layers.len());

        debug!("Pushing computation layer '{}' (priority {}) at {}", name, priority, index);

        self.layers.insert(
            index,
            ComputationLayer {
                name: name.to_owned(),
                priority,
                func: Box::new(func),
            },
        );
    }

    /// Removes the first layer named `name`. Unknown names are ignored.
    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.layers.iter().position(|layer| layer.name == name) {
            self.layers.remove(index);
            debug!("Removed computation layer '{}'", name);
        }
    }

    /// Drops every layer.
    pub fn destroy(&mut self) {
        debug!("Destroying computation stack ({} layers)", self.layers.len());
        self.layers.clear();
    }

    //--- Execution --------------------------------------------------------

    /// Runs every layer in stack order with the shared context.
    ///
    /// Layers cannot touch the stack while it runs: `execute` holds the
    /// only mutable borrow.
    pub fn execute(&mut self, context: &mut C) {
        for layer in &mut self.layers {
            trace!("Executing computation layer '{}'", layer.name);
            (layer.func)(context);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Layer names in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Iterates layers in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &ComputationLayer<C>> {
        self.layers.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|layer| layer.name == name)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<C> Default for ComputationStack<C> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    type Trace = Vec<String>;

    fn recorder(stack: &mut ComputationStack<Trace>, name: &'static str, priority: i32) {
        stack.push(name, move |trace: &mut Trace| trace.push(name.to_owned()), priority);
    }

    fn run(stack: &mut ComputationStack<Trace>) -> Trace {
        let mut trace = Trace::new();
        stack.execute(&mut trace);
        trace
    }

    #[test]
    fn empty_stack_executes_nothing() {
        let mut stack = ComputationStack::<Trace>::new();
        assert!(stack.is_empty());
        assert!(run(&mut stack).is_empty());
    }

    #[test]
    fn equal_priorities_keep_push_order() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "A", 300);
        recorder(&mut stack, "B", 300);
        recorder(&mut stack, "C", 100);

        assert_eq!(run(&mut stack), ["A", "B", "C"]);
    }

    #[test]
    fn higher_priority_runs_first_regardless_of_push_order() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "present", 100);
        recorder(&mut stack, "render", 200);
        recorder(&mut stack, "input", 300);

        assert_eq!(run(&mut stack), ["input", "render", "present"]);
    }

    #[test]
    fn interleaved_ties_are_fifo() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "low1", 1);
        recorder(&mut stack, "high1", 5);
        recorder(&mut stack, "low2", 1);
        recorder(&mut stack, "mid", 3);
        recorder(&mut stack, "high2", 5);

        assert_eq!(run(&mut stack), ["high1", "high2", "mid", "low1", "low2"]);
    }

    #[test]
    fn negative_priorities_sort_last() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "neg", -10);
        recorder(&mut stack, "zero", 0);

        assert_eq!(stack.names(), ["zero", "neg"]);
    }

    #[test]
    fn execution_order_is_non_increasing() {
        let mut stack = ComputationStack::new();
        for (name, priority) in [("a", 3), ("b", 7), ("c", 3), ("d", 9), ("e", 7), ("f", 0)] {
            recorder(&mut stack, name, priority);
        }

        let priorities: Vec<i32> = stack.iter().map(|l| l.priority()).collect();
        assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(run(&mut stack), ["d", "b", "e", "a", "c", "f"]);
    }

    #[test]
    fn remove_by_name() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "input", 300);
        recorder(&mut stack, "render", 200);

        stack.remove("input");

        assert_eq!(run(&mut stack), ["render"]);
        assert!(!stack.contains("input"));
    }

    #[test]
    fn remove_absent_name_is_noop() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "input", 300);
        recorder(&mut stack, "render", 200);

        stack.remove("missing");

        assert_eq!(stack.names(), ["input", "render"]);
    }

    #[test]
    fn remove_only_first_duplicate() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "dup", 2);
        recorder(&mut stack, "other", 2);
        recorder(&mut stack, "dup", 1);

        stack.remove("dup");

        assert_eq!(stack.names(), ["other", "dup"]);
        assert_eq!(stack.iter().last().map(|l| l.priority()), Some(1));
    }

    #[test]
    fn destroy_drops_all_layers() {
        let mut stack = ComputationStack::new();
        recorder(&mut stack, "a", 1);
        recorder(&mut stack, "b", 2);

        stack.destroy();

        assert_eq!(stack.len(), 0);
        assert!(run(&mut stack).is_empty());
    }

    #[test]
    fn layers_can_keep_state_between_frames() {
        let mut stack = ComputationStack::<u32>::new();
        let mut calls = 0;
        stack.push("counter", move |total: &mut u32| {
            calls += 1;
            *total = calls;
        }, 0);

        let mut total = 0;
        stack.execute(&mut total);
        stack.execute(&mut total);

        assert_eq!(total, 2);
    }
}
