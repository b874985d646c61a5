//=========================================================================
// Services
//=========================================================================
//
// Service locator shared by every computation layer and game state.
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;

//=== Public API ==========================================================

pub use registry::{ServiceError, ServiceRegistry, ServiceType};
