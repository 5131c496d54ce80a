//! Events: benannte Mutationsanfragen mit eigenem Payload.
//!
//! Ein Event wird über [`crate::TransactionSystem::spawn_event`] in die Queue
//! gestellt, beim nächsten Flush ausgeführt und landet bei Erfolg in der
//! History. Der Payload gehört exklusiv dem Event und wird genau einmal
//! freigegeben (`Drop`): sofort beim Verwerfen oder zusammen mit der History.

use super::downcast::AsAny;
use super::{EventKind, StoreRegistry};
use std::fmt::Debug;

/// Anwendungsspezifischer Payload eines Events.
///
/// `execute` wendet die Mutation an und meldet Erfolg; bei `false` wird das
/// Event verworfen, als wäre es nie passiert. `execute` muss daher entweder
/// vollständig mutieren oder gar nicht.
pub trait EventPayload: AsAny + Debug {
    /// Vorwärts-Mutation. Wird auch von REDO erneut aufgerufen.
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool;

    /// Inverse Mutation gegen den bereits gespeicherten Payload.
    ///
    /// Standard: keine Inverse (das Event wird beim Undo übersprungen, ohne
    /// Zustand zu ändern).
    fn undo(&mut self, stores: &mut StoreRegistry) {
        let _ = stores;
        log::warn!("Event ohne Undo-Operation rückgängig gemacht: {self:?}");
    }

    /// Führt einen neueren Payload derselben Art in diesen History-Eintrag
    /// zusammen (Multi-Frame-Gesten wie Slider-Drags).
    ///
    /// Nur für Events mit `multi_frame = true` relevant. Der ältere
    /// "Vorher"-Wert bleibt erhalten, der neuere "Nachher"-Wert gewinnt.
    fn coalesce(&mut self, newer: &dyn EventPayload) {
        let _ = newer;
    }
}

/// Statische Beschreibung einer Event-Art (vom Host bereitgestellt).
#[derive(Debug)]
pub struct EventMetadata {
    /// Lesbare Bezeichnung (Logging, Menü-Labels)
    pub description: &'static str,
    /// Aufeinanderfolgende Events dieser Art werden zu einem History-Eintrag
    pub multi_frame: bool,
    /// Erzeugt einen leeren Payload; `None` nur für die eingebauten Arten
    pub spawner: Option<fn() -> Box<dyn EventPayload>>,
}

impl EventMetadata {
    /// Metadaten des eingebauten Undo-Events
    pub const UNDO: EventMetadata = EventMetadata {
        description: "Undo",
        multi_frame: false,
        spawner: None,
    };

    /// Metadaten des eingebauten Redo-Events
    pub const REDO: EventMetadata = EventMetadata {
        description: "Redo",
        multi_frame: false,
        spawner: None,
    };

    /// Metadaten für eine anwendungsspezifische Event-Art.
    pub const fn domain(
        description: &'static str,
        multi_frame: bool,
        spawner: fn() -> Box<dyn EventPayload>,
    ) -> Self {
        Self {
            description,
            multi_frame,
            spawner: Some(spawner),
        }
    }
}

pub(crate) static UNDO_METADATA: EventMetadata = EventMetadata::UNDO;
pub(crate) static REDO_METADATA: EventMetadata = EventMetadata::REDO;

/// Payload eines Events: Undo/Redo sind parameterlose Marker, alles andere
/// trägt einen typ-gelöschten Anwendungs-Payload.
#[derive(Debug)]
pub enum Payload {
    /// Marker des eingebauten Undo-Events
    Undo,
    /// Marker des eingebauten Redo-Events
    Redo,
    /// Anwendungsspezifischer Payload
    Domain(Box<dyn EventPayload>),
}

impl Payload {
    /// Downcast auf den konkreten Payload-Typ (nur `Domain`).
    pub fn downcast_ref<T: EventPayload>(&self) -> Option<&T> {
        match self {
            Payload::Domain(inner) => (**inner).as_any().downcast_ref::<T>(),
            Payload::Undo | Payload::Redo => None,
        }
    }

    /// Veränderlicher Downcast auf den konkreten Payload-Typ (nur `Domain`).
    pub fn downcast_mut<T: EventPayload>(&mut self) -> Option<&mut T> {
        match self {
            Payload::Domain(inner) => (**inner).as_any_mut().downcast_mut::<T>(),
            Payload::Undo | Payload::Redo => None,
        }
    }

    /// Gibt `true` zurück, wenn der Payload vom Typ `T` ist.
    pub fn is<T: EventPayload>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

/// Ein eingereihtes oder bereits ausgeführtes Event.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    meta: &'static EventMetadata,
    payload: Payload,
}

impl Event {
    pub(crate) fn new(kind: EventKind, meta: &'static EventMetadata, payload: Payload) -> Self {
        Self {
            kind,
            meta,
            payload,
        }
    }

    /// Art des Events
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Statische Metadaten (Beschreibung, Multi-Frame-Flag)
    pub fn meta(&self) -> &'static EventMetadata {
        self.meta
    }

    /// Lesbare Bezeichnung aus den Metadaten
    pub fn description(&self) -> &'static str {
        self.meta.description
    }

    /// Lesender Zugriff auf den Payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub(crate) fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Vorwärts-Mutation eines Domain-Events.
    ///
    /// Undo/Redo-Marker werden vom Transaction-System selbst aufgelöst und
    /// sind hier ein No-op mit `false`.
    pub(crate) fn execute_domain(&mut self, stores: &mut StoreRegistry) -> bool {
        match &mut self.payload {
            Payload::Domain(inner) => inner.execute(stores),
            Payload::Undo | Payload::Redo => false,
        }
    }

    /// Inverse Mutation eines Domain-Events.
    pub(crate) fn undo_domain(&mut self, stores: &mut StoreRegistry) {
        if let Payload::Domain(inner) = &mut self.payload {
            inner.undo(stores);
        }
    }

    /// Übernimmt einen neueren Payload derselben Art (Multi-Frame).
    pub(crate) fn coalesce_from(&mut self, newer: &Event) {
        debug_assert_eq!(self.kind, newer.kind);
        if let (Payload::Domain(target), Payload::Domain(source)) =
            (&mut self.payload, &newer.payload)
        {
            target.coalesce(&**source);
        }
    }
}
