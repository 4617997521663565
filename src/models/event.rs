//! # src/models/event.rs
//!
//! Definiert die Ereignisse, die das Ledger bei erfolgreichen Kommandos
//! nach außen meldet. Pro erfolgreichem Kauf bzw. erfolgreicher Einlösung
//! wird genau ein Ereignis erzeugt, bei Fehlschlägen keines. Die Ereignisse
//! sind reine Daten; wie sie transportiert werden (Queue, Callback, Log),
//! entscheidet der Konsument.

use crate::models::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};

/// Ein beobachtbares Ereignis des Gutschein-Ledgers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Ein Gutschein wurde gekauft.
    GiftCardPurchased {
        fingerprint: Fingerprint,
        value: u128,
        buyer: String,
    },
    /// Ein Gutschein wurde eingelöst.
    GiftCardRedeemed {
        fingerprint: Fingerprint,
        value: u128,
        redeemer: String,
    },
}

impl LedgerEvent {
    /// Der Fingerprint, auf den sich das Ereignis bezieht.
    pub fn fingerprint(&self) -> Fingerprint {
        match self {
            LedgerEvent::GiftCardPurchased { fingerprint, .. }
            | LedgerEvent::GiftCardRedeemed { fingerprint, .. } => *fingerprint,
        }
    }
}
