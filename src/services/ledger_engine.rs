use crate::error::GiftCardCoreError;
use crate::models::fingerprint::Fingerprint;
use crate::models::gift_card::GiftCard;
use crate::models::event::LedgerEvent;
use crate::models::ledger_config::LedgerConfig;
use crate::services::card_validation::is_expired;

use chrono::{DateTime, Utc};
use std::fmt;

// Definiert die Fehler, die im `ledger_engine`-Modul auftreten können.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An der Systemgrenze wurde ein leerer Code übergeben.
    EmptyCode,
    /// Der Null-Fingerprint ist als Kaufschlüssel nicht zugelassen.
    InvalidFingerprint,
    /// Der Kaufwert war nicht positiv.
    InvalidAmount,
    /// Der Kaufwert lag unter dem konfigurierten Mindestwert.
    BelowMinimum { minimum: u64, offered: u128 },
    /// Für diesen Fingerprint existiert bereits ein Gutschein.
    /// Codes sind Einmal-Identitäten und werden nie wiederverwendet.
    AlreadyExists,
    /// Für diesen Fingerprint wurde nie ein Gutschein gekauft.
    NotFound,
    /// Der Gutschein wurde bereits eingelöst.
    AlreadyRedeemed,
    /// Die Einlösefrist ist abgelaufen.
    Expired { expiration_time: DateTime<Utc> },
    /// Ein allgemeiner Fehler mit einer Beschreibung.
    Generic(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LedgerError::EmptyCode => write!(f, "Gift card code must not be empty."),
            LedgerError::InvalidFingerprint => {
                write!(f, "The all-zero fingerprint is not a valid gift card key.")
            }
            LedgerError::InvalidAmount => write!(f, "Gift card value must be positive."),
            LedgerError::BelowMinimum { minimum, offered } => {
                write!(f, "Gift card value below minimum: offered {}, minimum {}", offered, minimum)
            }
            LedgerError::AlreadyExists => {
                write!(f, "A gift card with this code already exists.")
            }
            LedgerError::NotFound => write!(f, "Gift card does not exist."),
            LedgerError::AlreadyRedeemed => {
                write!(f, "This gift card has already been redeemed.")
            }
            LedgerError::Expired { expiration_time } => {
                write!(f, "This gift card expired on {}.", expiration_time.to_rfc3339())
            }
            LedgerError::Generic(s) => write!(f, "Ledger Error: {}", s),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Nimmt einen TOML-String entgegen und deserialisiert ihn in ein `LedgerConfig`-Struct.
/// Prüft anschließend, dass das Regelwerk in sich schlüssig ist.
pub fn load_ledger_config(toml_str: &str) -> Result<LedgerConfig, GiftCardCoreError> {
    let mut config: LedgerConfig = toml::from_str(toml_str)?;
    // TOML kennt kein `null`; `validity_period_days = 0` steht in einer
    // Konfigurationsdatei für die Variante ohne Ablaufdatum.
    if config.validity_period_days == Some(0) {
        config.validity_period_days = None;
    }
    if config.minimum_value == 0 {
        return Err(LedgerError::Generic(
            "minimum_value must be at least 1.".to_string(),
        )
        .into());
    }
    Ok(config)
}

/// Serialisiert eine Status-Ansicht oder einen Gutschein in einen formatierten JSON-String.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, GiftCardCoreError> {
    let json_str = serde_json::to_string_pretty(value)?;
    Ok(json_str)
}

/// Prüft einen Kaufversuch und erzeugt bei Erfolg den neuen Gutschein samt
/// Kauf-Ereignis. Diese Funktion ist rein: sie sieht nur den (eventuell)
/// vorhandenen Eintrag für den Fingerprint; das atomare
/// Prüfen-und-Einfügen gegenüber nebenläufigen Käufen übernimmt der
/// aufrufende `GiftCardLedger` unter seinem Shard-Lock.
///
/// # Arguments
/// * `fingerprint` - Der Fingerprint des Codes, unter dem gekauft wird.
/// * `existing` - Der aktuell im Ledger liegende Eintrag für diesen Fingerprint, falls vorhanden.
/// * `value` - Der Kaufwert in der kleinsten unteilbaren Einheit.
/// * `buyer` - Die Identität des Käufers (nur Audit).
/// * `now` - Der injizierte Kaufzeitpunkt.
/// * `config` - Das Regelwerk (Mindestwert, Gültigkeitsdauer).
///
/// # Returns
/// Ein `Result` mit dem neuen `GiftCard`-Eintrag und dem zugehörigen `LedgerEvent`.
pub fn purchase_card(
    fingerprint: Fingerprint,
    existing: Option<&GiftCard>,
    value: u128,
    buyer: &str,
    now: DateTime<Utc>,
    config: &LedgerConfig,
) -> Result<(GiftCard, LedgerEvent), GiftCardCoreError> {
    // 1. Der Null-Fingerprint ist reserviert und nie ein gültiger Schlüssel.
    if fingerprint.is_zero() {
        return Err(LedgerError::InvalidFingerprint.into());
    }

    // 2. Einmal-Identität: ein Fingerprint mit Eintrag ist für immer vergeben,
    //    auch wenn die Karte eingelöst oder abgelaufen ist. Diese Prüfung
    //    kommt vor der Wertprüfung: ein Zweitkauf meldet immer
    //    `AlreadyExists`, egal welcher Wert geboten wurde.
    if existing.is_some() {
        return Err(LedgerError::AlreadyExists.into());
    }

    // 3. Wertprüfung: erst "überhaupt positiv", dann der konfigurierte Mindestwert.
    if value == 0 {
        return Err(LedgerError::InvalidAmount.into());
    }
    if value < u128::from(config.minimum_value) {
        return Err(LedgerError::BelowMinimum {
            minimum: config.minimum_value,
            offered: value,
        }
        .into());
    }

    // 4. Ablaufzeitpunkt berechnen. Ohne konfigurierte Gültigkeitsdauer
    //    (Variante ohne Ablaufdatum) läuft die Karte nie ab.
    let expiration_time = match config.validity_period() {
        Some(period) => now
            .checked_add_signed(period)
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
        None => DateTime::<Utc>::MAX_UTC,
    };

    let card = GiftCard {
        value,
        purchase_time: now,
        expiration_time,
        redeemed: false,
        buyer: buyer.to_string(),
        redeemer: None,
    };

    let event = LedgerEvent::GiftCardPurchased {
        fingerprint,
        value,
        buyer: buyer.to_string(),
    };

    Ok((card, event))
}

/// Prüft einen Einlöseversuch und setzt bei Erfolg das `redeemed`-Flag.
///
/// Die Vorbedingungen werden in fester Reihenfolge geprüft, jede bricht
/// sofort ab:
/// 1. Eintrag vorhanden; sonst `NotFound`.
/// 2. Noch nicht eingelöst; sonst `AlreadyRedeemed`.
/// 3. `now <= expiration_time`; sonst `Expired`. Die Grenze ist inklusiv:
///    genau am Ablaufzeitpunkt ist die Einlösung noch erlaubt.
///
/// Wie beim Kauf gilt: die Atomarität gegenüber nebenläufigen Einlösungen
/// desselben Fingerprints stellt der `GiftCardLedger` sicher.
///
/// # Arguments
/// * `fingerprint` - Der Fingerprint des einzulösenden Codes.
/// * `card` - Der Ledger-Eintrag für diesen Fingerprint, falls vorhanden.
/// * `redeemer` - Die Identität des Einlösers (nur Audit).
/// * `now` - Der injizierte Einlösezeitpunkt.
///
/// # Returns
/// Ein `Result` mit dem eingelösten Wert und dem zugehörigen `LedgerEvent`.
pub fn redeem_card(
    fingerprint: Fingerprint,
    card: Option<&mut GiftCard>,
    redeemer: &str,
    now: DateTime<Utc>,
) -> Result<(u128, LedgerEvent), GiftCardCoreError> {
    let card = match card {
        None => return Err(LedgerError::NotFound.into()),
        Some(card) => card,
    };

    if card.redeemed {
        return Err(LedgerError::AlreadyRedeemed.into());
    }

    if is_expired(card, now) {
        return Err(LedgerError::Expired {
            expiration_time: card.expiration_time,
        }
        .into());
    }

    card.redeemed = true;
    card.redeemer = Some(redeemer.to_string());

    let event = LedgerEvent::GiftCardRedeemed {
        fingerprint,
        value: card.value,
        redeemer: redeemer.to_string(),
    };

    Ok((card.value, event))
}
