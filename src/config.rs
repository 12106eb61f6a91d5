// ============================================================================
// CONFIG - Configuración de compilación + configuración de la página
// ============================================================================

use serde::{Deserialize, Serialize};

/// Nombre de header anti-CSRF cuando la página no declara uno
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub submit_url: String,
    pub lookup_base_url: String,
    pub remote_lookup_enabled: bool,
    pub cart_storage_key: String,
    pub status_message_ms: u32,
    pub status_fade_ms: u32,
    pub regions: RegionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_url: "/salidas/registrar-lote".to_string(),
            lookup_base_url: "/api/productos".to_string(),
            remote_lookup_enabled: false,
            cart_storage_key: "salida_cart".to_string(),
            status_message_ms: 2000,
            status_fade_ms: 200,
            regions: RegionConfig::default(),
        }
    }
}

/// IDs de las regiones que la paginación AJAX reemplaza
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub product_list_id: String,
    pub pagination_id: String,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            product_list_id: "productList".to_string(),
            pagination_id: "pagination".to_string(),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            submit_url: option_env!("SUBMIT_URL")
                .map(str::to_string)
                .unwrap_or(defaults.submit_url),
            lookup_base_url: option_env!("LOOKUP_BASE_URL")
                .map(str::to_string)
                .unwrap_or(defaults.lookup_base_url),
            remote_lookup_enabled: option_env!("REMOTE_LOOKUP")
                .map(parse_flag)
                .unwrap_or(defaults.remote_lookup_enabled),
            cart_storage_key: option_env!("CART_STORAGE_KEY")
                .map(str::to_string)
                .unwrap_or(defaults.cart_storage_key),
            status_message_ms: option_env!("STATUS_MESSAGE_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.status_message_ms),
            status_fade_ms: option_env!("STATUS_FADE_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.status_fade_ms),
            regions: defaults.regions,
        }
    }

    /// URL de búsqueda de un producto (código codificado para la URL)
    pub fn lookup_url(&self, code: &str) -> String {
        format!(
            "{}/{}",
            self.lookup_base_url.trim_end_matches('/'),
            urlencoding::encode(code)
        )
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Configuración entregada por la página (metadatos emitidos por el servidor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub csrf_header: String,
    pub csrf_token: String,
}

impl PageConfig {
    /// Construye la configuración a partir de los `<meta>` leídos de la página
    pub fn from_meta(token: Option<String>, header: Option<String>) -> Self {
        let csrf_header = header
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_CSRF_HEADER.to_string());
        Self {
            csrf_header,
            csrf_token: token.unwrap_or_default(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::from_meta(None, None)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_url_encodes_code() {
        let config = AppConfig::default();
        assert_eq!(config.lookup_url("ABC 12/3"), "/api/productos/ABC%2012%2F3");
        assert_eq!(config.lookup_url("7501"), "/api/productos/7501");
    }

    #[test]
    fn page_config_falls_back_to_default_header() {
        let page = PageConfig::from_meta(Some("tok".into()), Some("   ".into()));
        assert_eq!(page.csrf_header, DEFAULT_CSRF_HEADER);
        assert_eq!(page.csrf_token, "tok");

        let page = PageConfig::from_meta(None, Some("X-XSRF".into()));
        assert_eq!(page.csrf_header, "X-XSRF");
        assert_eq!(page.csrf_token, "");
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn remote_lookup_disabled_by_default() {
        assert!(!AppConfig::default().remote_lookup_enabled);
    }
}
