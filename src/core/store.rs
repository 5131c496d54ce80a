//! Stores: benannte Container für genau einen Anwendungszustand.
//!
//! Stores werden einmalig beim Zusammenbau des Transaction-Systems angelegt
//! und leben bis zu dessen Abbau. Mutiert werden sie ausschließlich aus
//! `execute`/`undo` eines Events heraus.

use super::downcast::AsAny;
use super::{StoreKind, TransactionError};
use indexmap::IndexMap;
use std::any::{type_name, Any};
use std::fmt::Debug;

/// Beliebiger Anwendungszustand, der in einem Store liegen kann.
///
/// Automatisch für jeden `'static`-Typ mit `Debug` implementiert.
pub trait StoreState: AsAny + Debug {}

impl<T: Any + Debug> StoreState for T {}

/// Statische Beschreibung einer Store-Art (vom Host bereitgestellt).
#[derive(Debug)]
pub struct StoreMetadata {
    /// Lesbare Bezeichnung (Logging)
    pub description: &'static str,
    /// Erzeugt die initiale Instanz des Zustands
    pub spawner: fn() -> Box<dyn StoreState>,
}

/// Ein registrierter Store mit seiner Instanz.
#[derive(Debug)]
pub struct Store {
    kind: StoreKind,
    meta: &'static StoreMetadata,
    instance: Box<dyn StoreState>,
}

impl Store {
    fn spawn(meta: &'static StoreMetadata, kind: StoreKind) -> Self {
        Self {
            kind,
            meta,
            instance: (meta.spawner)(),
        }
    }

    /// Art des Stores
    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Lesbare Bezeichnung aus den Metadaten
    pub fn description(&self) -> &'static str {
        self.meta.description
    }

    /// Typ-gelöschte Sicht auf den Zustand (z.B. für Debug-Ausgaben).
    pub fn instance(&self) -> &dyn StoreState {
        &*self.instance
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        log::debug!("Store {} abgebaut ({})", self.kind, self.meta.description);
    }
}

/// Alle Stores eines Transaction-Systems in Erzeugungsreihenfolge.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: IndexMap<StoreKind, Store>,
}

impl StoreRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self {
            stores: IndexMap::new(),
        }
    }

    /// Legt einen neuen Store über den Spawner der Metadaten an.
    ///
    /// Zwei Stores derselben Art sind ein Integrationsfehler des Hosts.
    pub fn spawn(
        &mut self,
        meta: &'static StoreMetadata,
        kind: StoreKind,
    ) -> Result<(), TransactionError> {
        if self.stores.contains_key(&kind) {
            return Err(TransactionError::DuplicateStore(kind));
        }
        self.stores.insert(kind, Store::spawn(meta, kind));
        log::debug!("Store {} angelegt ({})", kind, meta.description);
        Ok(())
    }

    /// Lesender Zugriff auf den Zustand eines Stores.
    ///
    /// # Panics
    /// Wenn der Store nicht registriert ist oder einen anderen Typ hält.
    pub fn data<T: Any>(&self, kind: StoreKind) -> &T {
        match self.try_data(kind) {
            Ok(data) => data,
            Err(err) => panic!("Store-Zugriff fehlgeschlagen: {err}"),
        }
    }

    /// Schreibender Zugriff auf den Zustand eines Stores.
    ///
    /// # Panics
    /// Wenn der Store nicht registriert ist oder einen anderen Typ hält.
    pub fn data_mut<T: Any>(&mut self, kind: StoreKind) -> &mut T {
        match self.try_data_mut(kind) {
            Ok(data) => data,
            Err(err) => panic!("Store-Zugriff fehlgeschlagen: {err}"),
        }
    }

    /// Wie [`data`](Self::data), aber mit Fehler statt Panic.
    pub fn try_data<T: Any>(&self, kind: StoreKind) -> Result<&T, TransactionError> {
        let store = self
            .stores
            .get(&kind)
            .ok_or(TransactionError::UnknownStore(kind))?;
        (*store.instance)
            .as_any()
            .downcast_ref::<T>()
            .ok_or(TransactionError::StoreTypeMismatch {
                kind,
                expected: type_name::<T>(),
            })
    }

    /// Wie [`data_mut`](Self::data_mut), aber mit Fehler statt Panic.
    pub fn try_data_mut<T: Any>(&mut self, kind: StoreKind) -> Result<&mut T, TransactionError> {
        let store = self
            .stores
            .get_mut(&kind)
            .ok_or(TransactionError::UnknownStore(kind))?;
        (*store.instance)
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(TransactionError::StoreTypeMismatch {
                kind,
                expected: type_name::<T>(),
            })
    }

    /// Prüft, ob ein Store der Art registriert ist.
    pub fn contains(&self, kind: StoreKind) -> bool {
        self.stores.contains_key(&kind)
    }

    /// Alle Store-Arten in Erzeugungsreihenfolge.
    pub fn kinds(&self) -> impl Iterator<Item = StoreKind> + '_ {
        self.stores.keys().copied()
    }

    /// Iteriert über alle Stores in Erzeugungsreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &Store> {
        self.stores.values()
    }

    /// Anzahl registrierter Stores
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Gibt `true` zurück, wenn kein Store registriert ist.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
