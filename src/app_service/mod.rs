//! # src/app_service/mod.rs
//!
//! Definiert den `LedgerService`, eine Fassade über dem `GiftCardLedger`,
//! die das Kommando/Abfrage-Protokoll für Clients bereitstellt.
//!
//! Diese Schicht zieht die Systemgrenze: sie nimmt beim Einlösen den
//! Klartext-Code entgegen, bereinigt ihn und bildet ihn auf seinen
//! Fingerprint ab, bevor irgendetwas das Ledger erreicht; der Code selbst
//! wird zu keinem Zeitpunkt gespeichert. Außerdem liefert sie die Uhr für
//! alle Gültigkeitsentscheidungen und sammelt die Ereignisse erfolgreicher
//! Kommandos in einer abholbaren Warteschlange.

mod command_handler;
mod queries;

pub use queries::describe_status;

use crate::ledger::GiftCardLedger;
use crate::models::event::LedgerEvent;
use crate::models::fingerprint::Fingerprint;
use crate::models::gift_card::CardStatus;
use crate::models::ledger_config::LedgerConfig;
use crate::services::utils::{Clock, SystemClock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Die Quittung eines erfolgreichen Kaufs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// Der Fingerprint, unter dem die Karte verbucht wurde.
    pub fingerprint: Fingerprint,
    /// Der verbuchte Wert.
    pub value: u128,
    /// Der Kaufzeitpunkt.
    pub purchase_time: DateTime<Utc>,
    /// Der daraus berechnete Ablaufzeitpunkt.
    pub expiration_time: DateTime<Utc>,
}

/// Die Quittung einer erfolgreichen Einlösung. Der Wert ist der Betrag,
/// den die externe Settlement-Schicht an den Einlöser transferiert.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RedeemReceipt {
    /// Der Fingerprint der eingelösten Karte.
    pub fingerprint: Fingerprint,
    /// Der eingelöste Wert.
    pub value: u128,
}

/// Ein schreibendes Kommando an das Ledger, validiert an der Grenze,
/// bevor es die Engine erreicht.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// Kauf eines Gutscheins. Der Käufer kennt den Code und übergibt nur
    /// dessen Fingerprint; der Zahlwert wird out-of-band transferiert.
    Purchase {
        fingerprint: Fingerprint,
        value: u128,
        buyer: String,
    },
    /// Einlösung eines Gutscheins. Hier kommt der Klartext-Code über die
    /// Grenze; er ist das Credential und wird erst hier gehasht.
    Redeem { code: String, redeemer: String },
}

/// Eine lesende Abfrage an das Ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum LedgerQuery {
    Status { fingerprint: Fingerprint },
    Value { fingerprint: Fingerprint },
    IsRedeemed { fingerprint: Fingerprint },
    IsExpired { fingerprint: Fingerprint },
    PurchaseTime { fingerprint: Fingerprint },
    ExpirationTime { fingerprint: Fingerprint },
}

/// Das Ergebnis eines erfolgreich ausgeführten Kommandos.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "receipt", rename_all = "snake_case")]
pub enum CommandReceipt {
    Purchased(PurchaseReceipt),
    Redeemed(RedeemReceipt),
}

/// Das Ergebnis einer Abfrage.
// Adjazent getaggt, weil die Varianten rohe Werte (Zahl, Bool) tragen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "response", content = "data", rename_all = "snake_case")]
pub enum QueryResponse {
    Status(CardStatus),
    Value(u128),
    Flag(bool),
    /// `None`, wenn für den Fingerprint kein Eintrag existiert.
    Timestamp(Option<DateTime<Utc>>),
}

/// Die `LedgerService`-Fassade.
///
/// Hält den Ledger, die Uhr und die Ereignis-Warteschlange zusammen und
/// ist die einzige Schnittstelle, über die Clients das System ansprechen.
pub struct LedgerService {
    /// Der autoritative Gutschein-Bestand.
    ledger: Arc<GiftCardLedger>,
    /// Die Uhr, aus der jede Gültigkeitsentscheidung ihr `now` bezieht.
    clock: Arc<dyn Clock>,
    /// Ereignisse erfolgreicher Kommandos, in Verbuchungsreihenfolge.
    events: Mutex<VecDeque<LedgerEvent>>,
}

impl LedgerService {
    /// Initialisiert einen Service mit leerem Ledger und Systemuhr.
    pub fn new(config: LedgerConfig) -> Self {
        LedgerService::with_clock(config, Arc::new(SystemClock))
    }

    /// Initialisiert einen Service mit einer injizierten Uhr. Tests steuern
    /// darüber beliebige Zeitpunkte an.
    pub fn with_clock(config: LedgerConfig, clock: Arc<dyn Clock>) -> Self {
        LedgerService {
            ledger: Arc::new(GiftCardLedger::new(config)),
            clock,
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Direkter Zugriff auf den Ledger, z.B. um ihn mit weiteren
    /// Service-Instanzen zu teilen.
    pub fn ledger(&self) -> Arc<GiftCardLedger> {
        Arc::clone(&self.ledger)
    }

    /// Holt alle seit dem letzten Abruf angefallenen Ereignisse ab.
    /// Pro erfolgreichem Kommando liegt genau ein Ereignis in der Queue,
    /// fehlgeschlagene Kommandos hinterlassen keines.
    pub fn drain_events(&self) -> Vec<LedgerEvent> {
        let mut queue = self.events.lock().unwrap_or_else(|e| e.into_inner());
        queue.drain(..).collect()
    }

    /// Der aktuelle Zeitpunkt aus Sicht des Services.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Reiht ein Ereignis in die Warteschlange ein.
    fn push_event(&self, event: LedgerEvent) {
        let mut queue = self.events.lock().unwrap_or_else(|e| e.into_inner());
        queue.push_back(event);
    }
}
