//! Konkrete Events der Beispiel-Widgets und ihre statische Registry.

use super::store::{GuiStore, STORE_KIND_GUI};
use crate::core::{EventKind, EventMetadata, EventPayload, Payload, StoreRegistry};
use crate::{TransactionError, TransactionSystem};

/// Checkbox #1 umschalten (beginnt direkt nach REDO)
pub const EVENT_KIND_GUI_TOGGLE_CHK: EventKind = EventKind::FIRST_DOMAIN;
/// Listen-Operation (Update/Append/Pop)
pub const EVENT_KIND_GUI_ARR: EventKind = EventKind(4);
/// Slider ziehen (Multi-Frame)
pub const EVENT_KIND_GUI_SLIDER: EventKind = EventKind(5);
/// Anzahl belegter Event-Arten inkl. der reservierten
pub const EVENT_KIND_COUNT: usize = 6;

/// Registry aller Event-Arten, indiziert über die Art.
static EVENT_REGISTRY: [EventMetadata; EVENT_KIND_COUNT] = [
    EventMetadata {
        description: "Noop",
        multi_frame: false,
        spawner: None,
    },
    EventMetadata::UNDO,
    EventMetadata::REDO,
    EventMetadata::domain("Toggle GUI Checkbox #1", false, || {
        Box::new(ToggleCheckbox::default())
    }),
    EventMetadata::domain("GUI Array Operation", false, || {
        Box::new(ArrayOperation::default())
    }),
    EventMetadata::domain("Drag GUI Slider", true, || Box::new(SliderDrag::default())),
];

/// Metadaten zu einer Event-Art, `None` für unbekannte Arten.
pub fn event_metadata(kind: EventKind) -> Option<&'static EventMetadata> {
    EVENT_REGISTRY.get(kind.0 as usize)
}

/// Reiht ein Event der Art ein und liefert den Payload zum Befüllen.
pub fn spawn_event_from_kind(
    system: &mut TransactionSystem,
    kind: EventKind,
) -> Result<&mut Payload, TransactionError> {
    let meta = event_metadata(kind).ok_or(TransactionError::MissingSpawner {
        kind,
        description: "unbekannt",
    })?;
    system.spawn_event(meta, kind)
}

/// Typisierte Variante von [`spawn_event_from_kind`].
pub fn spawn_typed<T: EventPayload>(
    system: &mut TransactionSystem,
    kind: EventKind,
) -> Result<&mut T, TransactionError> {
    let meta = event_metadata(kind).ok_or(TransactionError::MissingSpawner {
        kind,
        description: "unbekannt",
    })?;
    system.spawn_event_as::<T>(meta, kind)
}

// ── Checkbox ────────────────────────────────────────────────────────

/// Setzt die Checkbox auf `value`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleCheckbox {
    /// Neuer Wert (vom Aufrufer gesetzt)
    pub value: bool,
    /// Wert vor der Ausführung (für Undo)
    pub value_before: bool,
}

impl EventPayload for ToggleCheckbox {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        let data = stores.data_mut::<GuiStore>(STORE_KIND_GUI);
        self.value_before = data.chk;
        data.chk = self.value;
        log::trace!("Checkbox auf {} gesetzt", self.value);
        true
    }

    fn undo(&mut self, stores: &mut StoreRegistry) {
        stores.data_mut::<GuiStore>(STORE_KIND_GUI).chk = self.value_before;
        log::trace!("Checkbox zurück auf {}", self.value_before);
    }
}

// ── Liste ───────────────────────────────────────────────────────────

/// Art der Listen-Mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOperation {
    /// Wert an Index ersetzen
    Update,
    /// Wert anhängen
    #[default]
    Append,
    /// Letzten Wert entfernen
    Pop,
}

/// Mutiert die dynamische Liste im GUI-Store.
///
/// Schlägt fehl (und wird verworfen), wenn Eingaben fehlen, der Index
/// außerhalb liegt oder von einer leeren Liste gepoppt wird.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayOperation {
    /// Art der Mutation
    pub op: ListOperation,
    /// Neuer Wert (Update, Append)
    pub value: Option<u32>,
    /// Ziel-Index (Update)
    pub idx: Option<usize>,
    /// Vorheriger Wert (Update, Pop), wird bei Ausführung gesetzt
    pub value_before: Option<u32>,
}

impl EventPayload for ArrayOperation {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        let arr = &mut stores.data_mut::<GuiStore>(STORE_KIND_GUI).arr;

        match self.op {
            ListOperation::Update => {
                let (Some(idx), Some(value)) = (self.idx, self.value) else {
                    return false;
                };
                let Some(slot) = arr.get_mut(idx) else {
                    log::debug!("Update außerhalb der Liste: Index {idx}");
                    return false;
                };
                self.value_before = Some(*slot);
                *slot = value;
            }
            ListOperation::Append => {
                let Some(value) = self.value else {
                    return false;
                };
                arr.push(value);
            }
            ListOperation::Pop => {
                let Some(popped) = arr.pop() else {
                    log::debug!("Pop auf leerer Liste");
                    return false;
                };
                self.value_before = Some(popped);
            }
        }

        true
    }

    fn undo(&mut self, stores: &mut StoreRegistry) {
        let arr = &mut stores.data_mut::<GuiStore>(STORE_KIND_GUI).arr;

        match self.op {
            ListOperation::Update => {
                if let (Some(idx), Some(before)) = (self.idx, self.value_before) {
                    if let Some(slot) = arr.get_mut(idx) {
                        *slot = before;
                    }
                }
            }
            ListOperation::Append => {
                arr.pop();
            }
            ListOperation::Pop => {
                if let Some(before) = self.value_before {
                    arr.push(before);
                }
            }
        }
    }
}

// ── Slider ──────────────────────────────────────────────────────────

/// Setzt die Slider-Position; ein ganzer Drag ergibt einen Undo-Schritt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderDrag {
    /// Neue Position (vom Aufrufer gesetzt)
    pub value: f32,
    /// Position vor Beginn der Geste
    pub value_before: f32,
}

impl EventPayload for SliderDrag {
    fn execute(&mut self, stores: &mut StoreRegistry) -> bool {
        let data = stores.data_mut::<GuiStore>(STORE_KIND_GUI);
        self.value_before = data.slider;
        data.slider = self.value;
        true
    }

    fn undo(&mut self, stores: &mut StoreRegistry) {
        stores.data_mut::<GuiStore>(STORE_KIND_GUI).slider = self.value_before;
    }

    fn coalesce(&mut self, newer: &dyn EventPayload) {
        if let Some(newer) = newer.as_any().downcast_ref::<SliderDrag>() {
            self.value = newer.value;
        }
    }
}
