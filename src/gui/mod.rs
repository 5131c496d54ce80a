//! Referenz-Registry: GUI-Store und die zugehörigen Events.
//!
//! Zeigt, wie ein Host Stores und Event-Arten über statische Metadaten an den
//! Transaktions-Kern anschließt, ohne den Kern selbst zu verändern.

pub mod events;
pub mod store;

pub use events::{
    event_metadata, spawn_event_from_kind, spawn_typed, ArrayOperation, ListOperation, SliderDrag,
    ToggleCheckbox, EVENT_KIND_COUNT, EVENT_KIND_GUI_ARR, EVENT_KIND_GUI_SLIDER,
    EVENT_KIND_GUI_TOGGLE_CHK,
};
pub use store::{spawn_gui_store, GuiStore, GUI_STORE_METADATA, STORE_KIND_GUI};
