// run with: cargo run --example playground
//! # playground.rs
//!
//! Zeigt den gesamten Lebenszyklus eines Gutscheins:
//! 1. Erzeugung eines geheimen Codes und seines Fingerprints.
//! 2. Kauf der Karte über den Fingerprint.
//! 3. Statusabfragen über den Lebenszyklus hinweg, mit manuell gestellter Uhr.
//! 4. Fehlgeschlagener Zweitkauf desselben Codes.
//! 5. Einlösung, fehlgeschlagene Zweit-Einlösung und Ablauf-Verhalten.
//
// Ausführen mit: cargo run --example playground

use chrono::{Duration, TimeZone, Utc};
use giftcard_lib::{
    describe_status, fingerprint, generate_code, LedgerConfig, LedgerService, ManualClock,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- GIFT CARD LIFECYCLE PLAYGROUND ---");

    // --- SETUP ---
    // Uhr auf einen festen Zeitpunkt stellen, damit der Ablauf nachvollziehbar ist.
    let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(t0));
    let service = LedgerService::with_clock(LedgerConfig::default(), clock.clone());

    // --- SCHRITT 1: Code und Fingerprint ---
    println!("\n--- SCHRITT 1: Erzeuge einen geheimen Code ---");
    let code = generate_code(16);
    let fp = fingerprint(&code);
    println!("Code (geheim!): {}", code);
    println!("Fingerprint:    {}", fp);

    // --- SCHRITT 2: Kauf ---
    println!("\n--- SCHRITT 2: Kaufe die Karte ---");
    let receipt = service.buy(fp, 5_000_000_000_000_000, "alice")?;
    println!(
        "✅ Gekauft: Wert {}, läuft ab am {}",
        receipt.value,
        receipt.expiration_time.to_rfc3339()
    );

    // --- SCHRITT 3: Zweitkauf desselben Codes schlägt fehl ---
    println!("\n--- SCHRITT 3: Zweitkauf desselben Codes ---");
    match service.buy(fp, 5_000_000_000_000_000, "bob") {
        Err(e) => println!("❌ Erwartet abgewiesen: {}", e),
        Ok(_) => println!("!!! Das hätte nicht klappen dürfen."),
    }

    // --- SCHRITT 4: Status kurz vor Ablauf ---
    println!("\n--- SCHRITT 4: Status zwei Tage vor Ablauf ---");
    clock.set(receipt.expiration_time - Duration::days(2));
    let status = service.check_status(&fp)?;
    println!("{}", describe_status(&status));

    // --- SCHRITT 5: Einlösung ---
    println!("\n--- SCHRITT 5: Löse die Karte ein ---");
    let redeem_receipt = service.redeem(&code, "carol")?;
    println!("✅ Eingelöst: Wert {}", redeem_receipt.value);

    match service.redeem(&code, "carol") {
        Err(e) => println!("❌ Zweite Einlösung abgewiesen: {}", e),
        Ok(_) => println!("!!! Das hätte nicht klappen dürfen."),
    }

    // --- SCHRITT 6: Ereignisse ---
    println!("\n--- SCHRITT 6: Angefallene Ereignisse ---");
    for event in service.drain_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
