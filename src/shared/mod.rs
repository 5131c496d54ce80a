//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die sowohl vom Transaction-System als auch
//! vom Host (Logging) gelesen werden.
pub mod options;

pub use options::TransactionOptions;
pub use options::{HISTORY_CAPACITY, LOG_LEVEL};
