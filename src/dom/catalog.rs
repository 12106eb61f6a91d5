// ============================================================================
// DOM CATALOG - Productos del listado visible (`.product-row`)
// ============================================================================

use crate::dom::{get_attribute, query_selector_all};
use crate::models::ProductRef;
use crate::utils::constants::{DATA_CODE_ATTR, DATA_NAME_ATTR, PRODUCT_ROW_SELECTOR};
use crate::viewmodels::VisibleCatalog;

/// Busca en las filas del listado que está en pantalla ahora mismo
#[derive(Debug, Default, Clone, Copy)]
pub struct DomCatalog;

impl VisibleCatalog for DomCatalog {
    fn find_by_code(&self, code: &str) -> Option<ProductRef> {
        let rows = match query_selector_all(None, PRODUCT_ROW_SELECTOR) {
            Ok(rows) => rows,
            Err(e) => {
                log::warn!("⚠️ [CATALOG] No se pudo leer el listado: {:?}", e);
                return None;
            }
        };
        rows.iter().find_map(|row| {
            let row_code = get_attribute(row, DATA_CODE_ATTR)?;
            if row_code != code {
                return None;
            }
            let name = get_attribute(row, DATA_NAME_ATTR).unwrap_or_default();
            Some(ProductRef::new(row_code, name))
        })
    }
}
