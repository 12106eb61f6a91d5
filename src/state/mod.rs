// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod cart_store;

pub use reactivity::*;
pub use cart_store::*;
