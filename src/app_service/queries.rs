//! # src/app_service/queries.rs
//!
//! Enthält alle reinen Lese-Operationen (Queries) des `LedgerService`
//! sowie den typisierten Abfrage-Dispatch und die menschenlesbare
//! Status-Beschreibung für Clients.

use super::{LedgerQuery, LedgerService, QueryResponse};
use crate::error::GiftCardCoreError;
use crate::models::fingerprint::Fingerprint;
use crate::models::gift_card::CardStatus;
use crate::services::code_identity;
use crate::services::utils::{format_time_remaining, format_timestamp};
use chrono::{DateTime, Duration, Utc};

impl LedgerService {
    // --- Datenabfragen (Queries) ---

    /// Klassifiziert den Fingerprint zum aktuellen Zeitpunkt der Service-Uhr.
    pub fn check_status(&self, fingerprint: &Fingerprint) -> Result<CardStatus, GiftCardCoreError> {
        self.ledger.status(fingerprint, self.now())
    }

    /// Komfort-Variante von [`check_status`](Self::check_status) für Clients,
    /// die den Klartext-Code vorliegen haben. Der Code wird bereinigt und
    /// nur sein Fingerprint weitergereicht.
    pub fn check_code(&self, code: &str) -> Result<CardStatus, GiftCardCoreError> {
        let fingerprint = code_identity::fingerprint(code.trim());
        self.check_status(&fingerprint)
    }

    /// Der Wert des Gutscheins; `0` für nicht existierende Fingerprints.
    pub fn get_gift_card_value(&self, fingerprint: &Fingerprint) -> Result<u128, GiftCardCoreError> {
        self.ledger.value_of(fingerprint)
    }

    /// `true`, wenn der Gutschein existiert und eingelöst wurde.
    pub fn is_redeemed(&self, fingerprint: &Fingerprint) -> Result<bool, GiftCardCoreError> {
        self.ledger.is_redeemed(fingerprint)
    }

    /// `true`, wenn der Gutschein existiert und abgelaufen ist.
    pub fn is_expired(&self, fingerprint: &Fingerprint) -> Result<bool, GiftCardCoreError> {
        self.ledger.is_expired(fingerprint, self.now())
    }

    /// Der Kaufzeitpunkt; `None` für nicht existierende Fingerprints.
    pub fn get_purchase_time(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<DateTime<Utc>>, GiftCardCoreError> {
        self.ledger.purchase_time(fingerprint)
    }

    /// Der Ablaufzeitpunkt; `None` für nicht existierende Fingerprints.
    pub fn get_expiration_time(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<DateTime<Utc>>, GiftCardCoreError> {
        self.ledger.expiration_time(fingerprint)
    }

    /// Führt eine typisierte Abfrage aus.
    pub fn handle_query(&self, query: LedgerQuery) -> Result<QueryResponse, GiftCardCoreError> {
        match query {
            LedgerQuery::Status { fingerprint } => {
                Ok(QueryResponse::Status(self.check_status(&fingerprint)?))
            }
            LedgerQuery::Value { fingerprint } => {
                Ok(QueryResponse::Value(self.get_gift_card_value(&fingerprint)?))
            }
            LedgerQuery::IsRedeemed { fingerprint } => {
                Ok(QueryResponse::Flag(self.is_redeemed(&fingerprint)?))
            }
            LedgerQuery::IsExpired { fingerprint } => {
                Ok(QueryResponse::Flag(self.is_expired(&fingerprint)?))
            }
            LedgerQuery::PurchaseTime { fingerprint } => {
                Ok(QueryResponse::Timestamp(self.get_purchase_time(&fingerprint)?))
            }
            LedgerQuery::ExpirationTime { fingerprint } => {
                Ok(QueryResponse::Timestamp(self.get_expiration_time(&fingerprint)?))
            }
        }
    }
}

/// Formatiert eine Status-Ansicht als mehrzeiligen, menschenlesbaren Text,
/// so wie ihn ein Client seinem Nutzer anzeigen würde.
pub fn describe_status(status: &CardStatus) -> String {
    match status {
        CardStatus::NonExistent => "Status: Gift card does not exist".to_string(),
        CardStatus::Redeemed { value, .. } => {
            format!("Status: Already redeemed\nValue: {}", value)
        }
        CardStatus::Expired {
            value,
            expiration_time,
            ..
        } => format!(
            "Status: Expired\nValue: {}\nExpired on: {}",
            value,
            format_timestamp(*expiration_time)
        ),
        CardStatus::Valid {
            value,
            purchase_time,
            expiration_time,
            time_remaining_secs,
            expiring_soon,
        } => {
            let headline = if *expiring_soon {
                "Status: Valid (Expiring Soon!)"
            } else {
                "Status: Valid"
            };
            format!(
                "{}\nValue: {}\nPurchased: {}\nExpires: {}\nTime remaining: {}",
                headline,
                value,
                format_timestamp(*purchase_time),
                format_timestamp(*expiration_time),
                format_time_remaining(Duration::seconds(*time_remaining_secs))
            )
        }
    }
}
