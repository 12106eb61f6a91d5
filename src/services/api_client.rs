// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::PageConfig;
use crate::models::{BatchRequest, BatchResponse};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    /// Respuesta no exitosa; `body` es el texto devuelto por el servidor
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Endpoints que usa la página de salidas
#[async_trait(?Send)]
pub trait InventoryApi {
    /// POST del lote con el token anti-CSRF de la página
    async fn submit_batch(
        &self,
        request: &BatchRequest,
        page: &PageConfig,
    ) -> Result<BatchResponse, ApiError>;

    /// GET de un producto por código; devuelve el JSON sin interpretar
    async fn lookup_product(&self, code: &str) -> Result<Value, ApiError>;

    /// GET del HTML completo de otra página del listado
    async fn fetch_page(&self, url: &str) -> Result<String, ApiError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::ApiClient;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{ApiError, InventoryApi};
    use crate::config::{AppConfig, PageConfig};
    use crate::models::{BatchRequest, BatchResponse};
    use async_trait::async_trait;
    use gloo_net::http::{Request, Response};
    use serde_json::Value;

    /// Cliente API - SOLO comunicación HTTP (stateless)
    #[derive(Clone)]
    pub struct ApiClient {
        config: AppConfig,
    }

    impl ApiClient {
        pub fn new(config: &AppConfig) -> Self {
            Self {
                config: config.clone(),
            }
        }
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| response.status_text());
        ApiError::Http { status, body }
    }

    #[async_trait(?Send)]
    impl InventoryApi for ApiClient {
        async fn submit_batch(
            &self,
            request: &BatchRequest,
            page: &PageConfig,
        ) -> Result<BatchResponse, ApiError> {
            log::info!("📤 [API] Enviando lote de {} líneas", request.items.len());

            let response = Request::post(&self.config.submit_url)
                .header(&page.csrf_header, &page.csrf_token)
                .json(request)
                .map_err(|e| ApiError::Parse(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(error_from(response).await);
            }

            response
                .json::<BatchResponse>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        }

        async fn lookup_product(&self, code: &str) -> Result<Value, ApiError> {
            let url = self.config.lookup_url(code);
            let response = Request::get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(error_from(response).await);
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        }

        async fn fetch_page(&self, url: &str) -> Result<String, ApiError> {
            let response = Request::get(url)
                .header("X-Requested-With", "XMLHttpRequest")
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            if !response.ok() {
                return Err(error_from(response).await);
            }

            response
                .text()
                .await
                .map_err(|e| ApiError::Parse(e.to_string()))
        }
    }
}
