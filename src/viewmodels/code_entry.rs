// ============================================================================
// CODE ENTRY VIEWMODEL - Agregar producto escribiendo/escaneando su código
// ============================================================================
// Orden de resolución:
//   1. filas del listado visible (match exacto de data-code)
//   2. búsqueda remota (solo si está habilitada)
//   3. "No existe el producto"
// ============================================================================

use crate::models::ProductRef;
use crate::services::InventoryApi;
use crate::state::CartStore;
use crate::viewmodels::status_banner::StatusMessage;

/// Productos presentes en el listado que se ve en pantalla
pub trait VisibleCatalog {
    fn find_by_code(&self, code: &str) -> Option<ProductRef>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionSource {
    VisibleList,
    RemoteLookup,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Entrada vacía tras recortar espacios
    Ignored,
    Added {
        product: ProductRef,
        source: ResolutionSource,
    },
    NotFound {
        code: String,
    },
    /// Producto resuelto pero el carrito no aceptó la línea
    Rejected {
        code: String,
    },
}

impl EntryOutcome {
    pub fn status_message(&self) -> Option<StatusMessage> {
        match self {
            EntryOutcome::Ignored => None,
            EntryOutcome::Added { .. } => Some(StatusMessage::ok("Producto agregado")),
            EntryOutcome::NotFound { .. } => Some(StatusMessage::error("No existe el producto")),
            EntryOutcome::Rejected { .. } => {
                Some(StatusMessage::error("No se pudo agregar el producto"))
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct CodeEntryForm {
    remote_lookup_enabled: bool,
}

impl CodeEntryForm {
    pub fn new(remote_lookup_enabled: bool) -> Self {
        Self {
            remote_lookup_enabled,
        }
    }

    /// Resuelve el código y agrega una unidad al carrito
    pub async fn submit<A>(
        &self,
        raw_code: &str,
        catalog: &dyn VisibleCatalog,
        api: &A,
        store: &CartStore,
    ) -> EntryOutcome
    where
        A: InventoryApi + ?Sized,
    {
        let code = raw_code.trim();
        if code.is_empty() {
            return EntryOutcome::Ignored;
        }

        if let Some(product) = catalog.find_by_code(code) {
            return added(product, ResolutionSource::VisibleList, store);
        }

        if self.remote_lookup_enabled {
            match api.lookup_product(code).await {
                Ok(value) => {
                    if let Some(product) = ProductRef::from_lookup(&value, code) {
                        return added(product, ResolutionSource::RemoteLookup, store);
                    }
                    log::warn!("⚠️ [CODE] Respuesta de búsqueda sin forma de producto para {}", code);
                }
                // Los errores de búsqueda equivalen a "no existe"
                Err(e) => log::warn!("⚠️ [CODE] Búsqueda remota falló para {}: {}", code, e),
            }
        }

        log::info!("🔍 [CODE] Producto no encontrado: {}", code);
        EntryOutcome::NotFound {
            code: code.to_string(),
        }
    }
}

/// `Added` solo si el carrito realmente cambió
fn added(product: ProductRef, source: ResolutionSource, store: &CartStore) -> EntryOutcome {
    if !store.add_one(&product.code, &product.name) {
        log::warn!("⚠️ [CODE] El carrito rechazó {:?}", product.code);
        return EntryOutcome::Rejected { code: product.code };
    }
    log::info!("➕ [CODE] {} agregado ({:?})", product.code, source);
    EntryOutcome::Added { product, source }
}
