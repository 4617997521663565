//! # src/models/gift_card.rs
//!
//! Definiert die Kern-Datenstruktur eines Gutscheins im Ledger sowie die
//! abgeleiteten Status-Ansichten für Abfragen. Ein `GiftCard`-Eintrag wird
//! genau einmal durch einen erfolgreichen Kauf erzeugt und danach höchstens
//! einmal mutiert (das Einlösen setzt `redeemed`). Einträge werden nie
//! gelöscht; auch eingelöste oder abgelaufene Karten bleiben für
//! Audit-Zwecke abfragbar.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Ein einzelner Gutschein, wie er im Ledger unter seinem Fingerprint liegt.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GiftCard {
    /// Der Wert der Karte in der kleinsten unteilbaren Einheit.
    /// Wird beim Kauf genau einmal gesetzt und ist danach unveränderlich.
    pub value: u128,
    /// Der Zeitpunkt des Kaufs. Unveränderlich.
    pub purchase_time: DateTime<Utc>,
    /// Der Ablaufzeitpunkt: `purchase_time + Gültigkeitsdauer`. Unveränderlich.
    /// Die Einlösung ist bis einschließlich dieses Zeitpunkts erlaubt.
    pub expiration_time: DateTime<Utc>,
    /// `false` bei Erzeugung; wechselt genau einmal auf `true` und nie zurück.
    pub redeemed: bool,
    /// Die Identität des Käufers. Nur für Audit-Zwecke, nicht für die Validierung.
    pub buyer: String,
    /// Die Identität des Einlösers, sobald die Karte eingelöst wurde.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redeemer: Option<String>,
}

impl GiftCard {
    /// Die verbleibende Gültigkeitsdauer relativ zu `now`, auf null geklemmt.
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Duration {
        let remaining = self.expiration_time - now;
        if remaining < Duration::zero() {
            Duration::zero()
        } else {
            remaining
        }
    }
}

/// Die vollständige, klassifizierte Status-Ansicht eines Fingerprints zu
/// einem gegebenen Zeitpunkt. Die Klassifikation ist eine reine Funktion
/// von Kartenzustand und Zeit; `Expired` ist kein gespeichertes Flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardStatus {
    /// Für diesen Fingerprint wurde nie ein Kauf verbucht.
    NonExistent,
    /// Die Karte wurde bereits eingelöst (Endzustand).
    Redeemed {
        value: u128,
        purchase_time: DateTime<Utc>,
        expiration_time: DateTime<Utc>,
    },
    /// Die Karte ist uneingelöst, aber der Ablaufzeitpunkt liegt strikt in
    /// der Vergangenheit (`now > expiration_time`).
    Expired {
        value: u128,
        purchase_time: DateTime<Utc>,
        expiration_time: DateTime<Utc>,
    },
    /// Die Karte ist uneingelöst und noch (oder genau jetzt noch) einlösbar.
    Valid {
        value: u128,
        purchase_time: DateTime<Utc>,
        expiration_time: DateTime<Utc>,
        /// `max(0, expiration_time - now)` in Sekunden.
        time_remaining_secs: i64,
        /// `true` genau dann, wenn `0 < time_remaining <= 3 Tage`.
        expiring_soon: bool,
    },
}

impl CardStatus {
    /// Bequemer Zugriff auf den Kartenwert; `0` für `NonExistent`.
    pub fn value(&self) -> u128 {
        match self {
            CardStatus::NonExistent => 0,
            CardStatus::Redeemed { value, .. }
            | CardStatus::Expired { value, .. }
            | CardStatus::Valid { value, .. } => *value,
        }
    }

    /// `true`, wenn die Ansicht eine einlösbare Karte beschreibt.
    pub fn is_valid(&self) -> bool {
        matches!(self, CardStatus::Valid { .. })
    }
}
