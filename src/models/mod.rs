pub mod cart;
pub mod shipment;
pub mod navigation;

pub use cart::{
    clamp_quantity, parse_quantity, Cart, CartEntry, CartLine, CartSnapshot,
    PersistedCartRecord, SubmissionLine, PLACEHOLDER_NAME,
};
pub use shipment::{BatchItem, BatchRequest, BatchResponse, ProductRef, ShipmentMetadata};
pub use navigation::{strip_fragment, NavigationState};

/// Producto capturado al abrir el modal de cantidad
pub type PendingSelection = ProductRef;
