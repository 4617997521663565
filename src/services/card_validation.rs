//! # src/services/card_validation.rs
//!
//! Reine Klassifikationslogik: bildet einen Kartenzustand und einen
//! Zeitpunkt auf die Status-Ansicht ab. Hier wird nichts mutiert und keine
//! Uhr gelesen; der Zeitpunkt kommt immer vom Aufrufer, damit die Regeln
//! deterministisch testbar sind.

use crate::models::gift_card::{CardStatus, GiftCard};
use chrono::{DateTime, Duration, Utc};

/// Das Warnfenster in Sekunden: eine uneingelöste, gültige Karte gilt als
/// "läuft bald ab", wenn ihre Restlaufzeit höchstens so lang ist.
pub const EXPIRING_SOON_WINDOW_SECS: i64 = 3 * 24 * 60 * 60;

/// Das Warnfenster als `Duration` (drei Tage).
pub fn expiring_soon_window() -> Duration {
    Duration::seconds(EXPIRING_SOON_WINDOW_SECS)
}

/// Prüft, ob eine Karte zum Zeitpunkt `now` abgelaufen ist.
///
/// Die Grenze ist strikt: genau am Ablaufzeitpunkt (`now == expiration_time`)
/// ist die Karte noch gültig und einlösbar, erst danach abgelaufen.
pub fn is_expired(card: &GiftCard, now: DateTime<Utc>) -> bool {
    now > card.expiration_time
}

/// Prüft, ob eine Karte im Warnfenster vor ihrem Ablauf liegt.
///
/// `true` genau dann, wenn `0 < Restlaufzeit <= Warnfenster`.
/// Am und nach dem Ablaufzeitpunkt (Restlaufzeit null) ist das Ergebnis
/// `false`; dort meldet die Klassifikation ohnehin `Expired` bzw. eine
/// Restlaufzeit von null.
pub fn is_expiring_soon(card: &GiftCard, now: DateTime<Utc>) -> bool {
    let remaining = card.time_remaining(now);
    remaining > Duration::zero() && remaining <= expiring_soon_window()
}

/// Klassifiziert einen Ledger-Eintrag (oder dessen Abwesenheit) zu einem
/// Zeitpunkt.
///
/// Reihenfolge der Klassifikation:
/// 1. Kein Eintrag → `NonExistent`.
/// 2. `redeemed` → `Redeemed` (Endzustand, unabhängig von der Zeit).
/// 3. `now > expiration_time` → `Expired`. Eine abgelaufene Karte darf nie
///    als `Valid` mit auf null geklemmter Restlaufzeit erscheinen.
/// 4. Sonst → `Valid` mit Restlaufzeit und Warnflag.
pub fn classify(card: Option<&GiftCard>, now: DateTime<Utc>) -> CardStatus {
    let card = match card {
        None => return CardStatus::NonExistent,
        Some(card) => card,
    };

    if card.redeemed {
        return CardStatus::Redeemed {
            value: card.value,
            purchase_time: card.purchase_time,
            expiration_time: card.expiration_time,
        };
    }

    if is_expired(card, now) {
        return CardStatus::Expired {
            value: card.value,
            purchase_time: card.purchase_time,
            expiration_time: card.expiration_time,
        };
    }

    CardStatus::Valid {
        value: card.value,
        purchase_time: card.purchase_time,
        expiration_time: card.expiration_time,
        time_remaining_secs: card.time_remaining(now).num_seconds(),
        expiring_soon: is_expiring_soon(card, now),
    }
}
