//! # src/app_service/command_handler.rs
//!
//! Enthält die schreibenden Aktionen (Commands) des `LedgerService`:
//! Kauf und Einlösung, jeweils mit Ereignis-Erzeugung, sowie den
//! typisierten Kommando-Dispatch.

use super::{CommandReceipt, LedgerCommand, LedgerService, PurchaseReceipt, RedeemReceipt};
use crate::error::GiftCardCoreError;
use crate::models::fingerprint::Fingerprint;
use crate::services::code_identity;
use crate::services::ledger_engine::LedgerError;

impl LedgerService {
    // --- Aktionen (Commands) ---

    /// Kauft einen Gutschein unter dem übergebenen Fingerprint.
    ///
    /// Der Aufrufer hat den Fingerprint bereits client-seitig aus dem Code
    /// berechnet; der Klartext-Code verlässt beim Kauf nie den Käufer.
    ///
    /// # Arguments
    /// * `fingerprint` - Der Fingerprint des Gutschein-Codes.
    /// * `value` - Der Kaufwert in der kleinsten unteilbaren Einheit
    ///   (entspricht dem out-of-band transferierten Betrag).
    /// * `buyer` - Die Identität des Käufers (liefert der Identity-Provider).
    ///
    /// # Returns
    /// Eine `PurchaseReceipt` mit Kauf- und Ablaufzeitpunkt.
    ///
    /// # Errors
    /// `InvalidFingerprint`, `InvalidAmount`, `BelowMinimum` oder
    /// `AlreadyExists`, jeweils als eigener Fehlerwert.
    pub fn buy(
        &self,
        fingerprint: Fingerprint,
        value: u128,
        buyer: &str,
    ) -> Result<PurchaseReceipt, GiftCardCoreError> {
        let now = self.now();
        let (card, event) = self.ledger.purchase(fingerprint, value, buyer, now)?;
        self.push_event(event);

        Ok(PurchaseReceipt {
            fingerprint,
            value: card.value,
            purchase_time: card.purchase_time,
            expiration_time: card.expiration_time,
        })
    }

    /// Löst einen Gutschein über seinen Klartext-Code ein.
    ///
    /// Der Code wird hier an der Grenze bereinigt (umgebender Leerraum
    /// entfernt), auf Nicht-Leere geprüft und auf seinen Fingerprint
    /// abgebildet; erst der Fingerprint erreicht das Ledger.
    ///
    /// # Arguments
    /// * `code` - Der geheime Gutschein-Code, wie vom Nutzer eingegeben.
    /// * `redeemer` - Die Identität des Einlösers.
    ///
    /// # Returns
    /// Eine `RedeemReceipt` mit dem Wert, den die Settlement-Schicht
    /// auszahlen muss.
    ///
    /// # Errors
    /// `EmptyCode`, `NotFound`, `AlreadyRedeemed` oder `Expired`, jeweils
    /// als eigener Fehlerwert.
    pub fn redeem(&self, code: &str, redeemer: &str) -> Result<RedeemReceipt, GiftCardCoreError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyCode.into());
        }

        let fingerprint = code_identity::fingerprint(trimmed);
        let now = self.now();
        let (value, event) = self.ledger.redeem(fingerprint, redeemer, now)?;
        self.push_event(event);

        Ok(RedeemReceipt { fingerprint, value })
    }

    /// Führt ein typisiertes Kommando aus.
    ///
    /// Dies ist die eine Stelle, an der das lose Kommando-Format externer
    /// Aufrufer auf die beiden Aktionen abgebildet wird; ungültige Varianten
    /// existieren per Konstruktion nicht.
    pub fn handle_command(
        &self,
        command: LedgerCommand,
    ) -> Result<CommandReceipt, GiftCardCoreError> {
        match command {
            LedgerCommand::Purchase {
                fingerprint,
                value,
                buyer,
            } => Ok(CommandReceipt::Purchased(self.buy(fingerprint, value, &buyer)?)),
            LedgerCommand::Redeem { code, redeemer } => {
                Ok(CommandReceipt::Redeemed(self.redeem(&code, &redeemer)?))
            }
        }
    }
}
