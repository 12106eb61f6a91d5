// Views: DOM del navegador sobre los viewmodels

pub mod cart_view;

#[cfg(target_arch = "wasm32")]
pub mod quantity_modal_view;
#[cfg(target_arch = "wasm32")]
pub mod code_entry_view;
#[cfg(target_arch = "wasm32")]
pub mod submission_view;
#[cfg(target_arch = "wasm32")]
pub mod pagination_view;

pub use cart_view::{apply_row_action, cart_view_model, CartRow, CartSummary, CartViewModel, RowAction};

#[cfg(target_arch = "wasm32")]
pub use cart_view::CartView;
#[cfg(target_arch = "wasm32")]
pub use quantity_modal_view::QuantityModalView;
#[cfg(target_arch = "wasm32")]
pub use code_entry_view::CodeEntryView;
#[cfg(target_arch = "wasm32")]
pub use submission_view::SubmissionView;
#[cfg(target_arch = "wasm32")]
pub use pagination_view::PaginationView;
