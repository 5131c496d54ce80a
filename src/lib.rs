//! Violet Transaction Core.
//! Transaktionaler Zustandskern für Immediate-Mode-Editoren: Stores, Event-Queue,
//! Append-only-History und Undo/Redo als gewöhnliche Events.

pub mod app;
pub mod core;
pub mod gui;
pub mod shared;

pub use app::TransactionSystem;
pub use core::{
    Event, EventKind, EventMetadata, EventPayload, History, Payload, StoreKind, StoreMetadata,
    StoreRegistry, StoreState, TransactionError,
};
pub use shared::TransactionOptions;
