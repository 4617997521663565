//! # src/error.rs
//!
//! Definiert den zentralen Fehlertyp für die gesamte giftcard_core-Bibliothek.
//! Verwendet `thiserror` zur einfachen Erstellung von aussagekräftigen Fehlern
//! und zur automatischen Konvertierung von untergeordneten Fehlertypen.

use crate::models::fingerprint::FingerprintParseError;
use crate::services::ledger_engine::LedgerError;
use thiserror::Error;

/// Der zentrale Fehlertyp für alle Operationen in der `giftcard_core`-Bibliothek.
///
/// Dieser Enum fasst Fehler aus allen Modulen (Ledger, Identität,
/// Konfiguration, Serialisierung) an einem Ort zusammen und bildet die
/// einheitliche Fehler-API der Bibliothek. Transport- und Wallet-Fehler
/// (abgebrochene Autorisierung, fehlende Deckung) gehören bewusst nicht
/// hierher; sie entstehen bei den externen Kollaborateuren.
#[derive(Error, Debug)]
pub enum GiftCardCoreError {
    /// Ein Regelverstoß im Gutschein-Ledger (Kauf- oder Einlöseregel verletzt).
    /// Kapselt den spezifischeren `LedgerError`-Typ.
    #[error("Ledger Error: {0}")]
    Ledger(#[from] LedgerError),

    /// Ein übergebener Fingerprint-String war nicht wohlgeformt.
    #[error("Fingerprint Parse Error: {0}")]
    FingerprintParse(#[from] FingerprintParseError),

    /// Ein Fehler bei der Verarbeitung von JSON (Serialisierung oder Deserialisierung).
    #[error("JSON Processing Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ein Fehler bei der Deserialisierung von TOML (z.B. beim Laden des Regelwerks).
    #[error("TOML Deserialization Error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Ein allgemeiner Fehler, der für verschiedene Zwecke verwendet werden kann.
    #[error("Generic error: {0}")]
    Generic(String),
}

impl GiftCardCoreError {
    /// Gibt den enthaltenen `LedgerError` zurück, falls dieser Fehler einer ist.
    /// Erleichtert Aufrufern das gezielte Reagieren auf einzelne Regelverstöße.
    pub fn as_ledger_error(&self) -> Option<&LedgerError> {
        match self {
            GiftCardCoreError::Ledger(inner) => Some(inner),
            _ => None,
        }
    }
}
