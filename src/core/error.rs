//! Fehlertypen des Transaktions-Kerns.

use super::{EventKind, StoreKind};

/// Verletzungen des Aufruf-Vertrags zwischen Host und Transaction-System.
///
/// Ein fehlgeschlagenes `execute` ist **kein** Fehler in diesem Sinne: es wird
/// still verworfen und erscheint im Flush-Ergebnis als [`EventKind::NOOP`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    /// Zwei Stores mit derselben Art würden sich gegenseitig überschreiben
    #[error("Store {0} ist bereits registriert")]
    DuplicateStore(StoreKind),
    /// Store wurde beim Zusammenbau des Systems nicht registriert
    #[error("Store {0} ist nicht registriert")]
    UnknownStore(StoreKind),
    /// Store existiert, hält aber einen anderen Zustandstyp
    #[error("Store {kind} hält keinen Zustand vom Typ {expected}")]
    StoreTypeMismatch {
        kind: StoreKind,
        expected: &'static str,
    },
    /// NOOP kann nicht als Event eingereiht werden
    #[error("NOOP-Events können nicht erzeugt werden")]
    NoopEvent,
    /// Metadaten einer Domain-Art ohne Spawner
    #[error("Event {kind} ({description}) hat keinen Spawner")]
    MissingSpawner {
        kind: EventKind,
        description: &'static str,
    },
    /// Spawner liefert einen anderen Payload-Typ als angefordert
    #[error("Event {kind} ({description}) erzeugt keinen Payload vom Typ {expected}")]
    PayloadTypeMismatch {
        kind: EventKind,
        description: &'static str,
        expected: &'static str,
    },
    /// Pro Tick darf höchstens ein gewöhnliches Event eingereiht werden
    #[error("{count} gewöhnliche Events im selben Tick eingereiht, alle verworfen")]
    MultipleEventsQueued { count: usize },
}
