// ============================================================================
// STATUS BANNER - Mensaje transitorio bajo el formulario de código
// ============================================================================
// Cada `show` genera un token nuevo; un fade/clear con token viejo se ignora,
// así un mensaje nuevo reinicia el temporizador del anterior.
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Ok,
    Error,
}

impl MessageKind {
    /// Clase CSS aplicada al contenedor del mensaje
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Ok => "ok",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Ok,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatusBanner {
    generation: u64,
    current: Option<StatusMessage>,
    visible: bool,
}

impl StatusBanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Muestra un mensaje y devuelve el token para programar el fade
    pub fn show(&mut self, message: StatusMessage) -> u64 {
        self.generation += 1;
        self.current = Some(message);
        self.visible = true;
        self.generation
    }

    /// Oculta el mensaje si `token` sigue siendo el vigente
    pub fn fade(&mut self, token: u64) -> bool {
        if token != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    /// Borra el texto si `token` sigue siendo el vigente
    pub fn clear(&mut self, token: u64) -> bool {
        if token != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        self.visible = false;
        true
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_then_clear() {
        let mut banner = StatusBanner::new();
        let token = banner.show(StatusMessage::ok("Producto agregado"));
        assert!(banner.is_visible());
        assert!(banner.fade(token));
        assert_eq!(banner.current().unwrap().text, "Producto agregado");
        assert!(banner.clear(token));
        assert!(banner.current().is_none());
    }

    #[test]
    fn newer_message_preempts_pending_fade() {
        let mut banner = StatusBanner::new();
        let first = banner.show(StatusMessage::ok("Producto agregado"));
        let second = banner.show(StatusMessage::error("No existe el producto"));

        assert!(!banner.fade(first));
        assert!(!banner.clear(first));
        assert!(banner.is_visible());
        assert_eq!(banner.current().unwrap().kind, MessageKind::Error);

        assert!(banner.fade(second));
        assert!(banner.clear(second));
    }
}
