use serde::{Deserialize, Serialize};

/// Estado guardado en cada entrada del historial.
/// `ajax` marca las entradas creadas por la paginación sin recarga.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub ajax: bool,
    pub url: String,
}

impl NavigationState {
    pub fn ajax(url: impl Into<String>) -> Self {
        Self {
            ajax: true,
            url: url.into(),
        }
    }

    /// Entrada inicial de la página (cargada por el navegador)
    pub fn initial(url: impl Into<String>) -> Self {
        Self {
            ajax: false,
            url: url.into(),
        }
    }
}

/// URL sin el fragmento `#...`
pub fn strip_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(idx) => &url[..idx],
        None => url,
    }
}
