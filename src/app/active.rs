//! Prozessweit aktives Transaction-System für die Host-Update-Schleife.
//!
//! Das System ist single-threaded; der Handle liegt deshalb thread-lokal.
//! Innerhalb von Events wird das System nie über diesen Handle erreicht,
//! Stores kommen dort als Parameter an.

use super::TransactionSystem;
use crate::core::EventKind;
use std::cell::RefCell;

thread_local! {
    static ACTIVE_SYSTEM: RefCell<Option<TransactionSystem>> = const { RefCell::new(None) };
}

/// Macht `system` zum aktiven System und gibt das bisherige zurück.
pub fn set_active(system: TransactionSystem) -> Option<TransactionSystem> {
    ACTIVE_SYSTEM.with(|active| active.borrow_mut().replace(system))
}

/// Entfernt das aktive System (z.B. zum Abbau beim Beenden).
pub fn take_active() -> Option<TransactionSystem> {
    ACTIVE_SYSTEM.with(|active| active.borrow_mut().take())
}

/// Gibt `true` zurück, wenn ein System aktiv ist.
pub fn is_active() -> bool {
    ACTIVE_SYSTEM.with(|active| active.borrow().is_some())
}

/// Führt `f` auf dem aktiven System aus.
///
/// `None`, wenn kein System aktiv ist oder der Handle bereits ausgeliehen ist
/// (verschachtelter Aufruf).
pub fn with_active<R>(f: impl FnOnce(&mut TransactionSystem) -> R) -> Option<R> {
    ACTIVE_SYSTEM.with(|active| {
        let Ok(mut guard) = active.try_borrow_mut() else {
            log::error!("Aktives Transaction-System ist bereits ausgeliehen");
            return None;
        };
        guard.as_mut().map(f)
    })
}

/// Tick des aktiven Systems: Queue auflösen, Ergebnis zurückgeben.
pub fn on_update() -> Option<EventKind> {
    with_active(TransactionSystem::on_update)
}
