//! Transaction-System: besitzt alle Stores, die Event-Queue und die History.
//!
//! Pro Tick ruft der Host genau einmal [`TransactionSystem::flush`] auf. Der
//! Flush löst die Queue in höchstens eine History-wirksame Aktion auf:
//! - UNDO/REDO in der Queue gewinnen, alle anderen Events des Ticks verfallen
//! - sonst wird das einzige gewöhnliche Event ausgeführt (Multi-Frame-Events
//!   derselben Art werden dabei in den letzten History-Eintrag gefaltet und
//!   melden `NOOP`, da kein neuer Eintrag entsteht)
//! - danach ist die Queue immer leer

use super::undo_redo;
use crate::core::event::{REDO_METADATA, UNDO_METADATA};
use crate::core::{
    Event, EventKind, EventMetadata, EventPayload, History, Payload, StoreKind, StoreMetadata,
    StoreRegistry, TransactionError,
};
use crate::shared::TransactionOptions;
use std::any::{type_name, Any};

/// Zentrale Datenhaltung für Stores, Queue und History.
///
/// Abbau-Reihenfolge (Feld-Reihenfolge): Stores, Queue, History.
pub struct TransactionSystem {
    stores: StoreRegistry,
    queue: Vec<Event>,
    history: History,
    log_event_descriptions: bool,
}

impl Default for TransactionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSystem {
    /// Erstellt ein leeres System mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(&TransactionOptions::default())
    }

    /// Erstellt ein leeres System mit den übergebenen Optionen.
    pub fn with_options(options: &TransactionOptions) -> Self {
        Self {
            stores: StoreRegistry::new(),
            queue: Vec::new(),
            history: History::with_capacity(options.history_capacity),
            log_event_descriptions: options.log_event_descriptions,
        }
    }

    // ── Stores ──────────────────────────────────────────────────────

    /// Registriert einen Store. Jede Art darf nur einmal vorkommen.
    pub fn spawn_store(
        &mut self,
        meta: &'static StoreMetadata,
        kind: StoreKind,
    ) -> Result<(), TransactionError> {
        self.stores.spawn(meta, kind)
    }

    /// Lesender Zugriff auf einen Store-Zustand (z.B. für Renderer).
    ///
    /// # Panics
    /// Wenn der Store nicht registriert ist oder einen anderen Typ hält.
    pub fn store_data<T: Any>(&self, kind: StoreKind) -> &T {
        self.stores.data(kind)
    }

    /// Schreibender Zugriff auf einen Store-Zustand außerhalb eines Events.
    ///
    /// Änderungen auf diesem Weg landen nicht in der History.
    ///
    /// # Panics
    /// Wenn der Store nicht registriert ist oder einen anderen Typ hält.
    pub fn store_data_mut<T: Any>(&mut self, kind: StoreKind) -> &mut T {
        self.stores.data_mut(kind)
    }

    /// Wie [`store_data`](Self::store_data), aber mit Fehler statt Panic.
    pub fn try_store_data<T: Any>(&self, kind: StoreKind) -> Result<&T, TransactionError> {
        self.stores.try_data(kind)
    }

    /// Alle registrierten Stores
    pub fn stores(&self) -> &StoreRegistry {
        &self.stores
    }

    // ── Events ──────────────────────────────────────────────────────

    /// Reiht ein Event ein und liefert dessen Payload zum Befüllen.
    ///
    /// Für UNDO/REDO werden die eingebauten Metadaten verwendet, `meta` wird
    /// ignoriert. Ausgeführt wird erst beim nächsten [`flush`](Self::flush).
    pub fn spawn_event(
        &mut self,
        meta: &'static EventMetadata,
        kind: EventKind,
    ) -> Result<&mut Payload, TransactionError> {
        let event = match kind {
            EventKind::NOOP => return Err(TransactionError::NoopEvent),
            EventKind::UNDO => Event::new(kind, &UNDO_METADATA, Payload::Undo),
            EventKind::REDO => Event::new(kind, &REDO_METADATA, Payload::Redo),
            _ => Event::new(kind, meta, Payload::Domain(Self::spawn_payload(meta, kind)?)),
        };
        Ok(self.enqueue(event))
    }

    /// Typisierte Variante von [`spawn_event`](Self::spawn_event).
    ///
    /// Der Payload-Typ wird vor dem Einreihen geprüft; bei Abweichung bleibt
    /// die Queue unverändert.
    pub fn spawn_event_as<T: EventPayload>(
        &mut self,
        meta: &'static EventMetadata,
        kind: EventKind,
    ) -> Result<&mut T, TransactionError> {
        let mismatch = TransactionError::PayloadTypeMismatch {
            kind,
            description: meta.description,
            expected: type_name::<T>(),
        };
        if kind == EventKind::NOOP {
            return Err(TransactionError::NoopEvent);
        }
        if kind.is_priority() {
            return Err(mismatch);
        }

        let payload = Self::spawn_payload(meta, kind)?;
        if !(*payload).as_any().is::<T>() {
            return Err(mismatch);
        }

        self.enqueue(Event::new(kind, meta, Payload::Domain(payload)))
            .downcast_mut::<T>()
            .ok_or(mismatch)
    }

    /// Reiht ein UNDO ein.
    pub fn spawn_undo(&mut self) {
        self.enqueue(Event::new(EventKind::UNDO, &UNDO_METADATA, Payload::Undo));
    }

    /// Reiht ein REDO ein.
    pub fn spawn_redo(&mut self) {
        self.enqueue(Event::new(EventKind::REDO, &REDO_METADATA, Payload::Redo));
    }

    fn spawn_payload(
        meta: &'static EventMetadata,
        kind: EventKind,
    ) -> Result<Box<dyn EventPayload>, TransactionError> {
        let spawner = meta.spawner.ok_or(TransactionError::MissingSpawner {
            kind,
            description: meta.description,
        })?;
        Ok(spawner())
    }

    fn enqueue(&mut self, event: Event) -> &mut Payload {
        self.queue.push(event);
        let last = self.queue.len() - 1;
        self.queue[last].payload_mut()
    }

    /// Anzahl der seit dem letzten Flush eingereihten Events
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    // ── Flush ───────────────────────────────────────────────────────

    /// Löst die Queue auf (einmal pro Tick).
    ///
    /// Gibt die Art des aufgezeichneten Events zurück, oder `NOOP`, wenn
    /// kein neuer Eintrag entstand (leere Queue, fehlgeschlagenes Event,
    /// in den letzten Eintrag gefaltetes Multi-Frame-Event).
    /// Mehr als ein gewöhnliches Event im selben Tick ist ein Fehler des
    /// Aufrufers: alle werden ohne Ausführung verworfen.
    pub fn flush(&mut self) -> Result<EventKind, TransactionError> {
        if self.queue.is_empty() {
            return Ok(EventKind::NOOP);
        }

        let mut queue = std::mem::take(&mut self.queue);
        let result = self.resolve(&mut queue);

        // Übrig gebliebene Events verwerfen, Allokation wiederverwenden
        queue.clear();
        self.queue = queue;
        result
    }

    fn resolve(&mut self, queue: &mut Vec<Event>) -> Result<EventKind, TransactionError> {
        if let Some(position) = queue.iter().position(|event| event.kind().is_priority()) {
            let priority = queue.remove(position);
            let result = self.resolve_priority(priority);
            if !queue.is_empty() {
                log::debug!(
                    "{} Event(s) zugunsten von Undo/Redo verworfen",
                    queue.len()
                );
            }
            return Ok(result);
        }

        match queue.len() {
            1 => match queue.pop() {
                Some(event) => Ok(self.resolve_ordinary(event)),
                None => Ok(EventKind::NOOP),
            },
            count => {
                log::error!(
                    "{} gewöhnliche Events im selben Tick eingereiht, alle verworfen",
                    count
                );
                Err(TransactionError::MultipleEventsQueued { count })
            }
        }
    }

    fn resolve_priority(&mut self, event: Event) -> EventKind {
        let executed = match event.kind() {
            EventKind::UNDO => undo_redo::execute_undo(&mut self.history, &mut self.stores),
            EventKind::REDO => undo_redo::execute_redo(&mut self.history, &mut self.stores),
            _ => false,
        };

        if executed {
            self.record(event)
        } else {
            EventKind::NOOP
        }
    }

    fn resolve_ordinary(&mut self, mut event: Event) -> EventKind {
        let coalesce = event.meta().multi_frame
            && self
                .history
                .last()
                .is_some_and(|last| last.kind() == event.kind());

        if !event.execute_domain(&mut self.stores) {
            log::debug!("Event fehlgeschlagen, verworfen: {}", event.description());
            return EventKind::NOOP;
        }

        if !coalesce {
            return self.record(event);
        }

        // Multi-Frame: in den letzten Eintrag falten, eigener Payload verfällt
        if let Some(last) = self.history.last_mut() {
            last.coalesce_from(&event);
        }
        if self.log_event_descriptions {
            log::debug!("        {} (zusammengeführt)", event.description());
        }
        EventKind::NOOP
    }

    fn record(&mut self, event: Event) -> EventKind {
        let kind = event.kind();
        if self.log_event_descriptions {
            log::debug!("        {}", event.description());
        }
        self.history.push(event);
        kind
    }

    /// Flush mit Fehler-Logging für die Host-Update-Schleife.
    pub fn on_update(&mut self) -> EventKind {
        match self.flush() {
            Ok(kind) => kind,
            Err(err) => {
                log::error!("Flush fehlgeschlagen: {err}");
                EventKind::NOOP
            }
        }
    }

    // ── History ─────────────────────────────────────────────────────

    /// Read-only Sicht auf die History
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Prüft, ob ein UNDO im nächsten Tick etwas bewirken würde.
    pub fn can_undo(&self) -> bool {
        self.history.last_valid_index(true).is_some()
    }

    /// Prüft, ob ein REDO im nächsten Tick etwas bewirken würde.
    pub fn can_redo(&self) -> bool {
        self.history.last_valid_index(false).is_some()
    }

    /// Beschreibung des Events, das ein UNDO treffen würde (Menü-Label).
    pub fn undo_description(&self) -> Option<&'static str> {
        self.history.last_valid_event(true).map(Event::description)
    }

    /// Beschreibung des Events, das ein REDO treffen würde (Menü-Label).
    pub fn redo_description(&self) -> Option<&'static str> {
        self.history.last_valid_event(false).map(Event::description)
    }
}

impl Drop for TransactionSystem {
    fn drop(&mut self) {
        log::debug!(
            "Transaction-System abgebaut: {} Store(s), {} eingereihte Event(s), {} History-Einträge",
            self.stores.len(),
            self.queue.len(),
            self.history.len()
        );
    }
}

#[cfg(test)]
mod tests;
