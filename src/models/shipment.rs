use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::cart::{CartSnapshot, PLACEHOLDER_NAME};

/// Ítem del lote enviado a `/salidas/registrar-lote`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub codigo: String,
    pub cantidad: u32,
}

/// Metadatos libres que acompañan la salida
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShipmentMetadata {
    pub motivo: String,
    pub referencia: String,
    pub usuario: String,
}

impl ShipmentMetadata {
    pub fn new(motivo: &str, referencia: &str, usuario: &str) -> Self {
        Self {
            motivo: motivo.trim().to_string(),
            referencia: referencia.trim().to_string(),
            usuario: usuario.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub items: Vec<BatchItem>,
    pub motivo: String,
    pub referencia: String,
    pub usuario: String,
}

impl BatchRequest {
    pub fn from_snapshot(snapshot: &CartSnapshot, metadata: ShipmentMetadata) -> Self {
        let items = snapshot
            .submission_lines()
            .into_iter()
            .map(|line| BatchItem {
                codigo: line.code,
                cantidad: line.quantity,
            })
            .collect();
        Self {
            items,
            motivo: metadata.motivo,
            referencia: metadata.referencia,
            usuario: metadata.usuario,
        }
    }
}

/// Respuesta del servidor a una salida registrada
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub registrados: u32,
    #[serde(default)]
    pub movimiento_id: Option<i64>,
    #[serde(default)]
    pub errores: Vec<String>,
}

/// Producto resuelto por código
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductRef {
    pub code: String,
    pub name: String,
}

impl ProductRef {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Interpreta la respuesta de `/api/productos/{codigo}`.
    /// Solo un objeto JSON es aceptado; los campos ausentes o en blanco caen a
    /// valores por defecto.
    pub fn from_lookup(value: &Value, requested_code: &str) -> Option<Self> {
        let object = value.as_object()?;
        let code = object
            .get("codigoBarras")
            .and_then(non_blank)
            .unwrap_or_else(|| requested_code.to_string());
        let name = object
            .get("nombre")
            .and_then(non_blank)
            .unwrap_or_else(|| PLACEHOLDER_NAME.to_string());
        Some(Self { code, name })
    }
}

fn non_blank(value: &Value) -> Option<String> {
    scalar_to_string(value).filter(|s| !s.trim().is_empty())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cart::Cart;
    use serde_json::json;

    #[test]
    fn batch_request_serializes_wire_shape() {
        let mut cart = Cart::new();
        cart.add("750", "Leche", 2);
        cart.add("751", "Pan", 1);
        let request = BatchRequest::from_snapshot(
            &cart.snapshot(),
            ShipmentMetadata::new(" merma ", "", " ana "),
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "items": [{"codigo": "750", "cantidad": 2}, {"codigo": "751", "cantidad": 1}],
                "motivo": "merma",
                "referencia": "",
                "usuario": "ana"
            })
        );
    }

    #[test]
    fn batch_response_tolerates_missing_optional_fields() {
        let response: BatchResponse = serde_json::from_str(r#"{"registrados": 2}"#).unwrap();
        assert_eq!(response.registrados, 2);
        assert!(response.errores.is_empty());

        let response: BatchResponse =
            serde_json::from_str(r#"{"ok":true,"registrados":1,"movimientoId":42,"errores":["x"]}"#)
                .unwrap();
        assert_eq!(response.movimiento_id, Some(42));
        assert_eq!(response.errores, vec!["x".to_string()]);
    }

    #[test]
    fn lookup_falls_back_on_missing_fields() {
        let product = ProductRef::from_lookup(&json!({"nombre": "Arroz"}), "123").unwrap();
        assert_eq!(product, ProductRef::new("123", "Arroz"));

        let product = ProductRef::from_lookup(&json!({"codigoBarras": 789}), "123").unwrap();
        assert_eq!(product, ProductRef::new("789", PLACEHOLDER_NAME));
    }

    #[test]
    fn lookup_treats_blank_fields_as_missing() {
        let product =
            ProductRef::from_lookup(&json!({"codigoBarras": "", "nombre": "Sal"}), "555").unwrap();
        assert_eq!(product, ProductRef::new("555", "Sal"));

        let product =
            ProductRef::from_lookup(&json!({"codigoBarras": "  ", "nombre": " \t"}), "555").unwrap();
        assert_eq!(product, ProductRef::new("555", PLACEHOLDER_NAME));
    }

    #[test]
    fn lookup_rejects_non_objects() {
        assert!(ProductRef::from_lookup(&json!([1, 2]), "1").is_none());
        assert!(ProductRef::from_lookup(&json!("x"), "1").is_none());
        assert!(ProductRef::from_lookup(&Value::Null, "1").is_none());
    }
}
