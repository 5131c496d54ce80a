//! Zentrale Konfiguration für das Transaction-System.
//!
//! `TransactionOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

/// Anfangskapazität der History (Einträge, keine Obergrenze).
pub const HISTORY_CAPACITY: usize = 256;
/// Standard-Log-Level des Demo-Hosts.
pub const LOG_LEVEL: &str = "info";

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `violet_transaction.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionOptions {
    /// Reservierte Anfangskapazität der History
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Beschreibung jedes aufgezeichneten Events auf Debug-Level loggen
    #[serde(default = "default_log_event_descriptions")]
    pub log_event_descriptions: bool,
    /// Log-Level für `env_logger` (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            log_event_descriptions: true,
            log_level: LOG_LEVEL.to_string(),
        }
    }
}

fn default_history_capacity() -> usize {
    HISTORY_CAPACITY
}

fn default_log_event_descriptions() -> bool {
    true
}

fn default_log_level() -> String {
    LOG_LEVEL.to_string()
}

impl TransactionOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("violet_transaction"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("violet_transaction.toml")
    }

    /// Übersetzt `log_level` in einen Filter; unbekannte Werte → `Info`.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}
