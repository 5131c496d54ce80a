//! GUI-Store: Zustand der Beispiel-Widgets (Checkbox, Liste, Slider).

use crate::core::{StoreKind, StoreMetadata};
use crate::{TransactionError, TransactionSystem};

/// Art des GUI-Stores
pub const STORE_KIND_GUI: StoreKind = StoreKind(1);

/// Zustand der Beispiel-Widgets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuiStore {
    /// Wert der Checkbox #1
    pub chk: bool,
    /// Dynamische Liste
    pub arr: Vec<u32>,
    /// Slider-Position (0.0 … 1.0)
    pub slider: f32,
}

/// Metadaten des GUI-Stores
pub static GUI_STORE_METADATA: StoreMetadata = StoreMetadata {
    description: "GUI-Zustand",
    spawner: || Box::new(GuiStore::default()),
};

/// Registriert den GUI-Store im übergebenen System.
pub fn spawn_gui_store(system: &mut TransactionSystem) -> Result<(), TransactionError> {
    system.spawn_store(&GUI_STORE_METADATA, STORE_KIND_GUI)
}
