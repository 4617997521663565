//! # giftcard_core
//!
//! Die Kernlogik eines Gutscheinkarten-Systems mit geheimen Codes.
//! Diese Bibliothek stellt die Code-Fingerprints, die autoritative
//! Ledger-Zustandsmaschine und die Kauf-/Einlöse-/Ablaufregeln bereit,
//! unabhängig von Wallet, Transport und Oberfläche.

// Deklariert die Hauptmodule der Bibliothek und macht sie öffentlich.
pub mod app_service;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;

// Re-exportiert die wichtigsten öffentlichen Typen für eine einfachere Nutzung.
// Anstatt `giftcard_core::models::gift_card::GiftCard` können Benutzer nun `giftcard_lib::GiftCard` schreiben.

// Modelle
pub use models::event::LedgerEvent;
pub use models::fingerprint::{Fingerprint, FingerprintParseError, FINGERPRINT_LEN};
pub use models::gift_card::{CardStatus, GiftCard};
pub use models::ledger_config::{LedgerConfig, DEFAULT_MINIMUM_VALUE, DEFAULT_VALIDITY_DAYS};

// Fehler
pub use error::GiftCardCoreError;

// Ledger und Fassade
pub use app_service::{
    describe_status, CommandReceipt, LedgerCommand, LedgerQuery, LedgerService, PurchaseReceipt,
    QueryResponse, RedeemReceipt,
};
pub use ledger::GiftCardLedger;

// Services
pub use services::card_validation::{classify, is_expired, is_expiring_soon};
pub use services::code_identity::{fingerprint, generate_code};
pub use services::ledger_engine::{load_ledger_config, to_json, LedgerError};
pub use services::utils::{Clock, ManualClock, SystemClock};
