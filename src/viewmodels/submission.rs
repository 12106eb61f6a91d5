// ============================================================================
// SUBMISSION VIEWMODEL - Registrar la salida (POST del lote)
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::config::PageConfig;
use crate::models::{BatchRequest, ShipmentMetadata};
use crate::services::{ApiError, InventoryApi};
use crate::state::CartStore;

pub const EMPTY_CART_NOTICE: &str = "No hay productos en la salida.";
pub const DEFAULT_FAILURE_REASON: &str = "Error al registrar salida.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Carrito vacío: no se hizo ningún request
    EmptyCart,
    /// Ya hay un envío en curso
    InFlight,
    /// Salida registrada; el carrito quedó vacío
    Recorded {
        registrados: u32,
        errores: Vec<String>,
    },
    /// El servidor respondió con error; el carrito se conserva
    Rejected { reason: String },
    /// Fallo de red o respuesta ilegible; el carrito se conserva
    Failed { reason: String },
}

impl SubmissionOutcome {
    /// Texto del aviso bloqueante que se muestra al operador
    pub fn notice(&self) -> Option<String> {
        match self {
            SubmissionOutcome::EmptyCart => Some(EMPTY_CART_NOTICE.to_string()),
            SubmissionOutcome::InFlight => None,
            SubmissionOutcome::Recorded {
                registrados,
                errores,
            } => {
                let mut text = format!("Salida registrada.\nLíneas procesadas: {}", registrados);
                for error in errores {
                    text.push_str("\n- ");
                    text.push_str(error);
                }
                Some(text)
            }
            SubmissionOutcome::Rejected { reason } | SubmissionOutcome::Failed { reason } => {
                Some(format!("Error: {}", reason))
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct SubmissionController {
    in_flight: Rc<Cell<bool>>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub async fn submit<A>(
        &self,
        metadata: ShipmentMetadata,
        store: &CartStore,
        api: &A,
        page: &PageConfig,
    ) -> SubmissionOutcome
    where
        A: InventoryApi + ?Sized,
    {
        if self.in_flight.get() {
            log::warn!("⚠️ [SUBMIT] Envío en curso, se ignora el segundo click");
            return SubmissionOutcome::InFlight;
        }

        let snapshot = store.snapshot();
        if snapshot.is_empty() {
            return SubmissionOutcome::EmptyCart;
        }

        let request = BatchRequest::from_snapshot(&snapshot, metadata);
        let guard = InFlightGuard::engage(&self.in_flight);
        let result = api.submit_batch(&request, page).await;
        drop(guard);

        match result {
            Ok(response) => {
                log::info!("✅ [SUBMIT] Salida registrada: {} líneas", response.registrados);
                store.clear();
                SubmissionOutcome::Recorded {
                    registrados: response.registrados,
                    errores: response.errores,
                }
            }
            Err(ApiError::Http { status, body }) => {
                log::error!("❌ [SUBMIT] HTTP {}: {}", status, body);
                let reason = if body.trim().is_empty() {
                    DEFAULT_FAILURE_REASON.to_string()
                } else {
                    body
                };
                SubmissionOutcome::Rejected { reason }
            }
            // El detalle técnico queda solo en el log
            Err(e) => {
                log::error!("❌ [SUBMIT] {}", e);
                SubmissionOutcome::Failed {
                    reason: DEFAULT_FAILURE_REASON.to_string(),
                }
            }
        }
    }
}

/// Marca el envío en curso; se libera también si el future se descarta
struct InFlightGuard(Rc<Cell<bool>>);

impl InFlightGuard {
    fn engage(flag: &Rc<Cell<bool>>) -> Self {
        flag.set(true);
        Self(flag.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
