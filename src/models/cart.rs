use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Nombre mostrado cuando no se conoce el nombre del producto
pub const PLACEHOLDER_NAME: &str = "Producto";

/// Línea del carrito (un código de producto y su cantidad)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub code: String,
    pub name: String,
    pub quantity: u32,
}

/// Valor guardado por código dentro del carrito
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub name: String,
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: u32,
}

/// Línea tal como se envía al servidor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionLine {
    pub code: String,
    pub quantity: u32,
}

/// Copia inmutable del carrito
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn submission_lines(&self) -> Vec<SubmissionLine> {
        self.lines
            .iter()
            .map(|line| SubmissionLine {
                code: line.code.clone(),
                quantity: line.quantity,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Forma persistida: secuencia ordenada de pares `[código, {name, qty}]`
pub type PersistedCartRecord = Vec<(String, CartEntry)>;

/// Carrito ordenado por inserción. Los métodos devuelven `true` si hubo cambio.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    lines: IndexMap<String, CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suma `quantity` a la línea existente o crea una nueva
    pub fn add(&mut self, code: &str, name: &str, quantity: u32) -> bool {
        let code = code.trim();
        if code.is_empty() {
            return false;
        }
        let quantity = quantity.max(1);

        match self.lines.get_mut(code) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None => {
                self.lines.insert(
                    code.to_string(),
                    CartEntry {
                        name: display_name(name),
                        quantity,
                    },
                );
            }
        }
        true
    }

    pub fn set_quantity(&mut self, code: &str, quantity: i64) -> bool {
        match self.lines.get_mut(code) {
            Some(entry) => {
                let clamped = clamp_quantity(quantity);
                let changed = entry.quantity != clamped;
                entry.quantity = clamped;
                changed
            }
            None => false,
        }
    }

    pub fn increment(&mut self, code: &str) -> bool {
        match self.lines.get_mut(code) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Resta una unidad sin bajar de 1 (nunca elimina la línea)
    pub fn decrement(&mut self, code: &str) -> bool {
        match self.lines.get_mut(code) {
            Some(entry) if entry.quantity > 1 => {
                entry.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, code: &str) -> bool {
        self.lines.shift_remove(code).is_some()
    }

    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        true
    }

    pub fn get(&self, code: &str) -> Option<CartLine> {
        self.lines.get(code).map(|entry| CartLine {
            code: code.to_string(),
            name: entry.name.clone(),
            quantity: entry.quantity,
        })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lines.contains_key(code)
    }

    /// Número de códigos distintos
    pub fn kinds(&self) -> usize {
        self.lines.len()
    }

    /// Suma de cantidades
    pub fn units(&self) -> u64 {
        self.lines.values().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.lines.iter().map(|(code, entry)| CartLine {
            code: code.clone(),
            name: entry.name.clone(),
            quantity: entry.quantity,
        })
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines().collect(),
        }
    }

    pub fn to_record(&self) -> PersistedCartRecord {
        self.lines
            .iter()
            .map(|(code, entry)| (code.clone(), entry.clone()))
            .collect()
    }

    /// Reconstruye el carrito desde el registro persistido.
    /// Un código repetido conserva su posición original y toma el último valor.
    pub fn from_record(record: PersistedCartRecord) -> Self {
        let mut cart = Self::new();
        for (code, entry) in record {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            cart.lines.insert(
                code.to_string(),
                CartEntry {
                    name: display_name(&entry.name),
                    quantity: entry.quantity.max(1),
                },
            );
        }
        cart
    }
}

fn display_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name.to_string()
    }
}

pub fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, i64::from(u32::MAX)) as u32
}

/// Interpreta una cantidad escrita por el operador.
/// Toma el prefijo entero (como parseInt), inválido o menor a 1 → 1.
pub fn parse_quantity(raw: &str) -> u32 {
    let raw = raw.trim();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() || negative {
        return 1;
    }
    match digits.parse::<u64>() {
        Ok(value) => value.clamp(1, u64::from(u32::MAX)) as u32,
        // Desborda u64: el valor es enorme
        Err(_) => u32::MAX,
    }
}
