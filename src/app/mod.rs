//! Application-Layer: Transaction-System, Undo/Redo und aktiver System-Handle.

pub mod active;
pub mod transaction_system;
mod undo_redo;

pub use active::{is_active, on_update, set_active, take_active, with_active};
pub use transaction_system::TransactionSystem;
