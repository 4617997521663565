//! # giftcard-cli.rs
//!
//! Ein Kommandozeilen-Tool rund um Gutschein-Codes und deren Fingerprints.
//!
//! ## Befehle:
//! - `generate-code`: Erzeugt einen neuen geheimen Gutschein-Code samt Fingerprint.
//! - `fingerprint`: Berechnet den Ledger-Fingerprint eines gegebenen Codes.
//! - `demo`: Spielt einen kompletten Kauf/Status/Einlöse-Zyklus im Speicher durch.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use giftcard_lib::app_service::describe_status;
use giftcard_lib::services::code_identity::{self, DEFAULT_CODE_LEN};
use giftcard_lib::{to_json, LedgerConfig, LedgerService};

/// Das Haupt-Struct für das CLI-Tool, das von `clap` geparst wird.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Definiert die verfügbaren Unterbefehle.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Erzeugt einen neuen geheimen Gutschein-Code und gibt dessen Fingerprint aus.
    GenerateCode {
        /// Länge des Codes (mindestens 8 Zeichen).
        #[arg(short, long, default_value_t = DEFAULT_CODE_LEN)]
        length: usize,
    },

    /// Berechnet den Fingerprint eines gegebenen Codes.
    Fingerprint {
        /// Der geheime Gutschein-Code.
        code: String,
    },

    /// Spielt einen kompletten Lebenszyklus (Kauf, Status, Einlösung) im Speicher durch.
    Demo {
        /// Kaufwert in der kleinsten unteilbaren Einheit.
        #[arg(short, long, default_value_t = 2_000_000_000_000_000)]
        value: u64,
    },
}

/// Hauptfunktion des Programms.
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateCode { length } => generate_code(length),
        Commands::Fingerprint { code } => print_fingerprint(&code),
        Commands::Demo { value } => run_demo(u128::from(value)),
    }
}

/// Logik für den `generate-code`-Befehl.
fn generate_code(length: usize) -> Result<()> {
    let code = code_identity::generate_code(length);
    let fingerprint = code_identity::fingerprint(&code);

    println!("Code:        {}", code);
    println!("Fingerprint: {}", fingerprint);
    println!("Kurzform:    {}", fingerprint.short_form());
    println!();
    println!("Der Code ist das Einlöse-Credential. Nur den Fingerprint weitergeben!");
    Ok(())
}

/// Logik für den `fingerprint`-Befehl.
fn print_fingerprint(code: &str) -> Result<()> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        bail!("Der Code darf nicht leer sein.");
    }
    println!("{}", code_identity::fingerprint(trimmed));
    Ok(())
}

/// Logik für den `demo`-Befehl: ein kompletter Zyklus gegen einen
/// frischen In-Memory-Ledger mit Systemuhr.
fn run_demo(value: u128) -> Result<()> {
    let service = LedgerService::new(LedgerConfig::default());

    let code = code_identity::generate_code(DEFAULT_CODE_LEN);
    let fingerprint = code_identity::fingerprint(&code);
    println!("Neuer Code: {} (Fingerprint {})", code, fingerprint.short_form());

    let receipt = service.buy(fingerprint, value, "demo-buyer")?;
    println!("Gekauft. Quittung:\n{}", to_json(&receipt)?);

    let status = service.check_status(&fingerprint)?;
    println!("\n{}\n", describe_status(&status));

    let redeem_receipt = service.redeem(&code, "demo-redeemer")?;
    println!("Eingelöst: Wert {}", redeem_receipt.value);

    let status_after = service.check_status(&fingerprint)?;
    println!("\n{}\n", describe_status(&status_after));

    println!("Ereignisse:");
    for event in service.drain_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
