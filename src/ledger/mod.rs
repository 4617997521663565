//! # src/ledger/mod.rs
//!
//! Definiert den `GiftCardLedger`, den alleinigen Halter des autoritativen
//! Gutschein-Zustands. Aller Schreibzugriff läuft durch die beiden atomaren
//! Kommandos `purchase` und `redeem`; es gibt keinen globalen/statischen
//! Zustand; der Ledger wird als explizites Objekt an seine Nutzer gereicht.
//!
//! ## Nebenläufigkeit
//!
//! Der Bestand ist in Shards partitioniert; jeder Shard ist eine
//! `RwLock<HashMap<Fingerprint, GiftCard>>`. Ein Kommando nimmt genau das
//! Write-Lock des Shards, in dem sein Fingerprint liegt. Damit sind
//! Existenzprüfung und Einfügen (bzw. Prüfkette und `redeemed`-Flip) pro
//! Fingerprint unteilbar: von N gleichzeitigen Käufen desselben Codes
//! gelingt genau einer, von N gleichzeitigen Einlösungen ebenso.
//! Operationen auf Fingerprints in verschiedenen Shards blockieren einander
//! nicht. Abfragen nehmen nur das Read-Lock und liefern einen Schnappschuss.

use crate::error::GiftCardCoreError;
use crate::models::event::LedgerEvent;
use crate::models::fingerprint::Fingerprint;
use crate::models::gift_card::{CardStatus, GiftCard};
use crate::models::ledger_config::LedgerConfig;
use crate::services::card_validation::{classify, is_expired};
use crate::services::ledger_engine::{self, LedgerError};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// Anzahl der Shards. Der Fingerprint ist ein gleichverteilter Hash, das
/// führende Byte genügt daher als Shard-Index.
const SHARD_COUNT: usize = 32;

type Shard = RwLock<HashMap<Fingerprint, GiftCard>>;

/// Der autoritative, nebenläufig nutzbare Gutschein-Bestand.
pub struct GiftCardLedger {
    shards: Vec<Shard>,
    config: LedgerConfig,
}

impl GiftCardLedger {
    /// Erstellt einen leeren Ledger mit dem übergebenen Regelwerk.
    pub fn new(config: LedgerConfig) -> Self {
        let shards = (0..SHARD_COUNT).map(|_| RwLock::new(HashMap::new())).collect();
        GiftCardLedger { shards, config }
    }

    /// Das Regelwerk, mit dem dieser Ledger arbeitet.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn shard(&self, fingerprint: &Fingerprint) -> &Shard {
        let index = usize::from(fingerprint.as_bytes()[0]) % SHARD_COUNT;
        &self.shards[index]
    }

    fn poisoned() -> GiftCardCoreError {
        LedgerError::Generic("ledger shard lock poisoned".to_string()).into()
    }

    // --- Kommandos ---

    /// Verbucht einen Kauf. Existenzprüfung und Einfügen geschehen unteilbar
    /// unter dem Write-Lock des zuständigen Shards.
    ///
    /// # Returns
    /// Den neu angelegten `GiftCard`-Eintrag (als Schnappschuss) und das
    /// genau einmal erzeugte Kauf-Ereignis.
    pub fn purchase(
        &self,
        fingerprint: Fingerprint,
        value: u128,
        buyer: &str,
        now: DateTime<Utc>,
    ) -> Result<(GiftCard, LedgerEvent), GiftCardCoreError> {
        let mut cards = self
            .shard(&fingerprint)
            .write()
            .map_err(|_| Self::poisoned())?;

        let (card, event) = ledger_engine::purchase_card(
            fingerprint,
            cards.get(&fingerprint),
            value,
            buyer,
            now,
            &self.config,
        )?;

        cards.insert(fingerprint, card.clone());
        Ok((card, event))
    }

    /// Verbucht eine Einlösung. Die Prüfkette und das Setzen des
    /// `redeemed`-Flags geschehen unteilbar unter dem Write-Lock des
    /// zuständigen Shards.
    ///
    /// # Returns
    /// Den eingelösten Wert (zur Abwicklung durch die externe
    /// Settlement-Schicht) und das genau einmal erzeugte Einlöse-Ereignis.
    pub fn redeem(
        &self,
        fingerprint: Fingerprint,
        redeemer: &str,
        now: DateTime<Utc>,
    ) -> Result<(u128, LedgerEvent), GiftCardCoreError> {
        let mut cards = self
            .shard(&fingerprint)
            .write()
            .map_err(|_| Self::poisoned())?;

        ledger_engine::redeem_card(fingerprint, cards.get_mut(&fingerprint), redeemer, now)
    }

    // --- Abfragen (nur Lesezugriff, Schnappschuss-Semantik) ---

    /// Klassifiziert den Fingerprint zum Zeitpunkt `now`.
    pub fn status(
        &self,
        fingerprint: &Fingerprint,
        now: DateTime<Utc>,
    ) -> Result<CardStatus, GiftCardCoreError> {
        let cards = self
            .shard(fingerprint)
            .read()
            .map_err(|_| Self::poisoned())?;
        Ok(classify(cards.get(fingerprint), now))
    }

    /// Liefert einen Schnappschuss des Eintrags, falls vorhanden.
    pub fn get_card(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<GiftCard>, GiftCardCoreError> {
        let cards = self
            .shard(fingerprint)
            .read()
            .map_err(|_| Self::poisoned())?;
        Ok(cards.get(fingerprint).cloned())
    }

    /// Der Wert des Gutscheins; `0`, wenn kein Eintrag existiert.
    /// Nicht-Existenz ist ein gültiger Zustand, kein Fehler.
    pub fn value_of(&self, fingerprint: &Fingerprint) -> Result<u128, GiftCardCoreError> {
        Ok(self.get_card(fingerprint)?.map_or(0, |card| card.value))
    }

    /// `true`, wenn der Gutschein existiert und bereits eingelöst wurde.
    pub fn is_redeemed(&self, fingerprint: &Fingerprint) -> Result<bool, GiftCardCoreError> {
        Ok(self
            .get_card(fingerprint)?
            .map_or(false, |card| card.redeemed))
    }

    /// `true`, wenn der Gutschein existiert und zum Zeitpunkt `now`
    /// abgelaufen ist. Für nicht existierende Fingerprints `false`.
    pub fn is_expired(
        &self,
        fingerprint: &Fingerprint,
        now: DateTime<Utc>,
    ) -> Result<bool, GiftCardCoreError> {
        Ok(self
            .get_card(fingerprint)?
            .map_or(false, |card| is_expired(&card, now)))
    }

    /// Der Kaufzeitpunkt, falls ein Eintrag existiert.
    pub fn purchase_time(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<DateTime<Utc>>, GiftCardCoreError> {
        Ok(self.get_card(fingerprint)?.map(|card| card.purchase_time))
    }

    /// Der Ablaufzeitpunkt, falls ein Eintrag existiert.
    pub fn expiration_time(
        &self,
        fingerprint: &Fingerprint,
    ) -> Result<Option<DateTime<Utc>>, GiftCardCoreError> {
        Ok(self.get_card(fingerprint)?.map(|card| card.expiration_time))
    }

    /// Die Gesamtzahl der jemals verbuchten Gutscheine (Audit-Sicht;
    /// Einträge werden nie gelöscht).
    pub fn card_count(&self) -> Result<usize, GiftCardCoreError> {
        let mut count = 0;
        for shard in &self.shards {
            count += shard.read().map_err(|_| Self::poisoned())?.len();
        }
        Ok(count)
    }
}

impl Default for GiftCardLedger {
    fn default() -> Self {
        GiftCardLedger::new(LedgerConfig::default())
    }
}
