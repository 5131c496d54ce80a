//! Diskriminatoren für Stores und Events.

use std::fmt;

/// Art eines Events.
///
/// Die Werte `0..FIRST_DOMAIN` sind reserviert (NOOP, UNDO, REDO), alle
/// anwendungsspezifischen Events beginnen bei [`EventKind::FIRST_DOMAIN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKind(pub u32);

impl EventKind {
    /// Nichts passiert (leere Queue, fehlgeschlagenes Event)
    pub const NOOP: EventKind = EventKind(0);
    /// Eingebautes Undo-Event
    pub const UNDO: EventKind = EventKind(1);
    /// Eingebautes Redo-Event
    pub const REDO: EventKind = EventKind(2);
    /// Erste frei verwendbare Event-Art
    pub const FIRST_DOMAIN: EventKind = EventKind(3);

    /// Undo/Redo verdrängen alle anderen Events desselben Ticks.
    pub fn is_priority(self) -> bool {
        self < Self::FIRST_DOMAIN
    }

    /// Gibt `true` zurück für anwendungsspezifische (rückgängig machbare) Events.
    pub fn is_domain(self) -> bool {
        !self.is_priority()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NOOP => write!(f, "NOOP"),
            Self::UNDO => write!(f, "UNDO"),
            Self::REDO => write!(f, "REDO"),
            EventKind(kind) => write!(f, "#{kind}"),
        }
    }
}

/// Art eines Stores (eindeutig pro Transaction-System).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKind(pub u32);

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store#{}", self.0)
    }
}
