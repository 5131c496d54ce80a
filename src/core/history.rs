//! Append-only History aller erfolgreich ausgeführten Events.
//!
//! Es gibt keinen getrennten Undo- und Redo-Stack: UNDO/REDO werden selbst als
//! Marker angehängt, die aktuelle Position wird bei jeder Anfrage durch
//! Rückwärtszählen über das gesamte Log rekonstruiert.

use super::{Event, EventKind};

/// Geordnete, nie gekürzte Folge ausgeführter Events.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Event>,
}

impl History {
    /// Erstellt eine leere History.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Erstellt eine leere History mit reservierter Kapazität.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Hängt ein erfolgreich ausgeführtes Event an.
    pub(crate) fn push(&mut self, event: Event) {
        self.entries.push(event);
    }

    /// Anzahl der Einträge (inkl. Undo/Redo-Marker)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn noch nichts ausgeführt wurde.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Jüngster Eintrag
    pub fn last(&self) -> Option<&Event> {
        self.entries.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Event> {
        self.entries.last_mut()
    }

    /// Eintrag an Position `index` (0 = ältester)
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.entries.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Event> {
        self.entries.get_mut(index)
    }

    /// Iteriert vom ältesten zum jüngsten Eintrag.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.entries.iter()
    }

    /// Arten aller Einträge, älteste zuerst.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.entries.iter().map(Event::kind).collect()
    }

    /// Sucht das Event, das ein UNDO (`undoing = true`) bzw. REDO als
    /// nächstes treffen würde, und liefert dessen Index.
    ///
    /// Läuft vom jüngsten zum ältesten Eintrag und zählt Undo-Marker,
    /// Redo-Marker und echte Events:
    /// - Undo: erstes echtes Event mit `echte > undos - redos`
    /// - Redo: erstes echtes Event mit `echte == undos - redos`
    /// - Sobald `redos >= undos` an einem echten Event gilt, ist nichts
    ///   mehr wiederherstellbar.
    ///
    /// Ist `redos > undos`, gilt die Differenz als unerreichbar: keiner der
    /// beiden Vergleiche trifft zu.
    pub fn last_valid_index(&self, undoing: bool) -> Option<usize> {
        let mut undo_count: usize = 0;
        let mut redo_count: usize = 0;
        let mut real_event_count: usize = 0;

        for (index, event) in self.entries.iter().enumerate().rev() {
            match event.kind() {
                EventKind::UNDO => undo_count += 1,
                EventKind::REDO => redo_count += 1,
                _ => {
                    real_event_count += 1;

                    let pending = undo_count.checked_sub(redo_count);
                    let found = match pending {
                        Some(pending) if undoing => real_event_count > pending,
                        Some(pending) => real_event_count == pending,
                        None => false,
                    };
                    if found {
                        return Some(index);
                    }

                    if redo_count >= undo_count {
                        // nichts mehr wiederherzustellen
                        return None;
                    }
                }
            }
        }

        None
    }

    /// Wie [`last_valid_index`](Self::last_valid_index), liefert das Event.
    pub fn last_valid_event(&self, undoing: bool) -> Option<&Event> {
        self.last_valid_index(undoing)
            .and_then(|index| self.entries.get(index))
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
