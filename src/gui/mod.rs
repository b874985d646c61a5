//=========================================================================
// GUI
//=========================================================================
//
// Immediate-mode menu widgets drawn through a RenderTarget.
//
// Architecture:
//   Menu
//     ├─ buttons: Vec<Button>
//     └─ bus: Rc<RefCell<EventBus>> → "menu_signals"
//
//=========================================================================

//=== Module Declarations =================================================

mod button;
mod menu;

//=== Public API ==========================================================

pub use button::Button;
pub use menu::{Menu, MenuScreen};
