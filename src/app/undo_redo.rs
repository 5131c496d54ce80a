//! Eingebaute UNDO/REDO-Events.
//!
//! Beide mutieren keinen Store direkt, sondern suchen über
//! [`History::last_valid_index`] ein früheres Event und spielen es rückwärts
//! (`undo`) bzw. erneut vorwärts (`execute`) gegen dessen gespeicherten
//! Payload ab. Bei Erfolg landen sie selbst als Marker in der History.

use crate::core::{History, StoreRegistry};

/// Macht das jüngste noch nicht rückgängig gemachte Event rückgängig.
///
/// Gibt `false` zurück, wenn nichts rückgängig zu machen ist; das UNDO wird
/// dann nicht aufgezeichnet.
pub(crate) fn execute_undo(history: &mut History, stores: &mut StoreRegistry) -> bool {
    let Some(target) = history
        .last_valid_index(true)
        .and_then(|index| history.get_mut(index))
    else {
        log::debug!("Undo: nichts zu tun");
        return false;
    };

    debug_assert!(target.kind().is_domain());
    target.undo_domain(stores);
    log::info!("Undo ausgeführt: {}", target.description());
    true
}

/// Führt das zuletzt rückgängig gemachte Event erneut aus.
///
/// Gibt `false` zurück, wenn der Redo-Horizont erschöpft ist.
pub(crate) fn execute_redo(history: &mut History, stores: &mut StoreRegistry) -> bool {
    let Some(target) = history
        .last_valid_index(false)
        .and_then(|index| history.get_mut(index))
    else {
        log::debug!("Redo: nichts zu tun");
        return false;
    };

    debug_assert!(target.kind().is_domain());
    if !target.execute_domain(stores) {
        log::warn!(
            "Redo: erneute Ausführung meldet Fehler ({})",
            target.description()
        );
    }
    log::info!("Redo ausgeführt: {}", target.description());
    true
}
