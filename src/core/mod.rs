//! Core-Typen des Transaktions-Kerns: Arten, Stores, Events, History.

mod downcast;
pub mod error;
pub mod event;
pub mod history;
pub mod kind;
pub mod store;

pub use downcast::AsAny;
pub use error::TransactionError;
pub use event::{Event, EventMetadata, EventPayload, Payload};
pub use history::History;
pub use kind::{EventKind, StoreKind};
pub use store::{Store, StoreMetadata, StoreRegistry, StoreState};
