//=========================================================================
// Actions
//=========================================================================
//
// Logical input actions the game reacts to.
//
// Raw keys and buttons never reach game code directly; the action mapper
// turns them into one of these first.
//
//=========================================================================

//=== Action ==============================================================

/// High-level command produced by one or more bound inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    None,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Confirm,
    Cancel,
    /// Raised by the window close button as well as any bound key.
    Quit,
}

impl Action {
    /// Every action that can be bound, in declaration order.
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Confirm,
        Action::Cancel,
        Action::Quit,
    ];
}

//=========================================================================
// Unit Tests
//=========================================================================
