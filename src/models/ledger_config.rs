//! # src/models/ledger_config.rs
//!
//! Definiert das Regelwerk, nach dem das Ledger Käufe und Einlösungen
//! bewertet. Die Konfiguration wird beim Aufbau des Ledgers einmal geladen
//! (typischerweise aus einer TOML-Datei) und danach nicht mehr verändert ;
//! bereits gekaufte Karten behalten den bei ihrem Kauf berechneten
//! Ablaufzeitpunkt.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Die Standard-Gültigkeitsdauer neuer Gutscheine in Tagen.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// Der Standard-Mindestkaufwert in der kleinsten unteilbaren Einheit.
pub const DEFAULT_MINIMUM_VALUE: u64 = 1_000_000_000_000_000;

/// Das Regelwerk des Gutschein-Ledgers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    /// Gültigkeitsdauer neuer Gutscheine in Tagen, gerechnet ab Kaufzeitpunkt.
    /// `None` bedeutet: Gutscheine laufen nie ab (Variante ohne Ablaufdatum).
    #[serde(default = "default_validity")]
    pub validity_period_days: Option<u32>,
    /// Der kleinste zulässige Kaufwert. Käufe darunter werden abgewiesen.
    #[serde(default = "default_minimum_value")]
    pub minimum_value: u64,
}

fn default_validity() -> Option<u32> {
    Some(DEFAULT_VALIDITY_DAYS)
}

fn default_minimum_value() -> u64 {
    DEFAULT_MINIMUM_VALUE
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            validity_period_days: default_validity(),
            minimum_value: default_minimum_value(),
        }
    }
}

impl LedgerConfig {
    /// Die Gültigkeitsdauer als `chrono::Duration`; `None`, wenn Gutscheine
    /// nie ablaufen sollen.
    pub fn validity_period(&self) -> Option<Duration> {
        self.validity_period_days
            .map(|days| Duration::days(i64::from(days)))
    }
}
