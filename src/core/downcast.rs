//! Typ-gelöschter Zugriff auf Store-Zustände und Event-Payloads.

use std::any::Any;

/// Liefert `&dyn Any` für Downcasts auf den konkreten Typ.
///
/// Achtung bei `Box<dyn …>`: immer auf den Inhalt dereferenzieren
/// (`(**boxed).as_any()`), sonst greift die Blanket-Impl für die Box selbst.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
