// ============================================================================
// DOM MODULE - Helpers para manipulación DOM
// ============================================================================

pub mod registry;

#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
pub mod builder;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod catalog;
#[cfg(target_arch = "wasm32")]
pub mod page_surface;

pub use registry::*;

#[cfg(target_arch = "wasm32")]
pub use element::*;
#[cfg(target_arch = "wasm32")]
pub use builder::*;
#[cfg(target_arch = "wasm32")]
pub use events::*;
#[cfg(target_arch = "wasm32")]
pub use catalog::*;
#[cfg(target_arch = "wasm32")]
pub use page_surface::*;
