//! # Tests für die `LedgerService`-Fassade (Kommando/Abfrage-Grenze)
//!
//! Hier wird die Systemgrenze geprüft: Klartext-Codes werden nur beim
//! Einlösen übergeben, an der Grenze bereinigt und gehasht; Ereignisse
//! fallen genau einmal pro erfolgreichem Kommando an.

use chrono::{DateTime, Duration, TimeZone, Utc};
use giftcard_lib::{
    describe_status, fingerprint, CardStatus, CommandReceipt, LedgerCommand, LedgerConfig,
    LedgerError, LedgerEvent, LedgerQuery, LedgerService, ManualClock, QueryResponse,
};
use std::sync::Arc;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

/// Service mit manuell gestellter Uhr und kleinen Testwerten.
fn setup_service() -> (LedgerService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let service = LedgerService::with_clock(
        LedgerConfig {
            validity_period_days: Some(30),
            minimum_value: 1,
        },
        clock.clone(),
    );
    (service, clock)
}

#[test]
fn test_buy_and_redeem_via_plaintext_code() {
    let (service, clock) = setup_service();
    let code = "TESTCODE123";
    let fp = fingerprint(code);

    let receipt = service.buy(fp, 100, "buyer-1").unwrap();
    assert_eq!(receipt.value, 100);
    assert_eq!(receipt.purchase_time, t0());
    assert_eq!(receipt.expiration_time, t0() + Duration::days(30));

    clock.advance(Duration::days(3));

    // Eingelöst wird mit dem Klartext-Code; die Fassade hasht ihn.
    let redeem_receipt = service.redeem(code, "redeemer-1").unwrap();
    assert_eq!(redeem_receipt.fingerprint, fp);
    assert_eq!(redeem_receipt.value, 100);

    assert!(service.is_redeemed(&fp).unwrap());
}

#[test]
fn test_redeem_trims_incidental_whitespace() {
    let (service, _clock) = setup_service();
    let code = "WHITESPACE-CODE";
    service.buy(fingerprint(code), 100, "buyer-1").unwrap();

    // Der Nutzer hat den Code mit umgebendem Leerraum eingefügt.
    let receipt = service.redeem("  WHITESPACE-CODE \n", "redeemer-1").unwrap();
    assert_eq!(receipt.value, 100);
}

#[test]
fn test_redeem_rejects_empty_code() {
    let (service, _clock) = setup_service();

    for empty in ["", "   ", "\t\n"] {
        let err = service.redeem(empty, "redeemer-1").unwrap_err();
        assert!(matches!(
            err.as_ledger_error(),
            Some(LedgerError::EmptyCode)
        ));
    }

    // Insbesondere wurde nie der Fingerprint des leeren Strings nachgeschlagen.
    assert!(service.drain_events().is_empty());
}

#[test]
fn test_events_are_emitted_exactly_once_per_successful_command() {
    let (service, _clock) = setup_service();
    let code = "EVENTS-CODE";
    let fp = fingerprint(code);

    // Fehlschlag: kein Ereignis.
    assert!(service.redeem(code, "early-bird").is_err());
    assert!(service.drain_events().is_empty());

    service.buy(fp, 100, "buyer-1").unwrap();
    // Zweitkauf schlägt fehl: weiterhin nur das eine Kauf-Ereignis.
    assert!(service.buy(fp, 100, "buyer-2").is_err());

    service.redeem(code, "redeemer-1").unwrap();
    // Zweit-Einlösung schlägt fehl: weiterhin nur das eine Einlöse-Ereignis.
    assert!(service.redeem(code, "redeemer-2").is_err());

    let events = service.drain_events();
    assert_eq!(
        events,
        vec![
            LedgerEvent::GiftCardPurchased {
                fingerprint: fp,
                value: 100,
                buyer: "buyer-1".to_string(),
            },
            LedgerEvent::GiftCardRedeemed {
                fingerprint: fp,
                value: 100,
                redeemer: "redeemer-1".to_string(),
            },
        ]
    );

    // Die Queue ist nach dem Abholen leer.
    assert!(service.drain_events().is_empty());
}

#[test]
fn test_queries_on_absent_fingerprint_return_zero_view() {
    let (service, _clock) = setup_service();
    let fp = fingerprint("NEVER-SOLD");

    assert_eq!(service.get_gift_card_value(&fp).unwrap(), 0);
    assert!(!service.is_redeemed(&fp).unwrap());
    assert!(!service.is_expired(&fp).unwrap());
    assert_eq!(service.get_purchase_time(&fp).unwrap(), None);
    assert_eq!(service.get_expiration_time(&fp).unwrap(), None);
    assert_eq!(service.check_status(&fp).unwrap(), CardStatus::NonExistent);
}

#[test]
fn test_typed_command_dispatch() {
    let (service, _clock) = setup_service();
    let code = "DISPATCH-CODE";
    let fp = fingerprint(code);

    let receipt = service
        .handle_command(LedgerCommand::Purchase {
            fingerprint: fp,
            value: 100,
            buyer: "buyer-1".to_string(),
        })
        .unwrap();
    match receipt {
        CommandReceipt::Purchased(purchase) => assert_eq!(purchase.value, 100),
        other => panic!("Expected purchase receipt, got {:?}", other),
    }

    let receipt = service
        .handle_command(LedgerCommand::Redeem {
            code: code.to_string(),
            redeemer: "redeemer-1".to_string(),
        })
        .unwrap();
    match receipt {
        CommandReceipt::Redeemed(redeem) => {
            assert_eq!(redeem.fingerprint, fp);
            assert_eq!(redeem.value, 100);
        }
        other => panic!("Expected redeem receipt, got {:?}", other),
    }
}

#[test]
fn test_typed_query_dispatch() {
    let (service, clock) = setup_service();
    let fp = fingerprint("QUERY-CODE");
    service.buy(fp, 100, "buyer-1").unwrap();

    assert_eq!(
        service.handle_query(LedgerQuery::Value { fingerprint: fp }).unwrap(),
        QueryResponse::Value(100)
    );
    assert_eq!(
        service
            .handle_query(LedgerQuery::IsRedeemed { fingerprint: fp })
            .unwrap(),
        QueryResponse::Flag(false)
    );
    assert_eq!(
        service
            .handle_query(LedgerQuery::PurchaseTime { fingerprint: fp })
            .unwrap(),
        QueryResponse::Timestamp(Some(t0()))
    );
    assert_eq!(
        service
            .handle_query(LedgerQuery::ExpirationTime { fingerprint: fp })
            .unwrap(),
        QueryResponse::Timestamp(Some(t0() + Duration::days(30)))
    );

    // Nach Verstellen der Uhr hinter den Ablaufzeitpunkt kippt IsExpired.
    assert_eq!(
        service
            .handle_query(LedgerQuery::IsExpired { fingerprint: fp })
            .unwrap(),
        QueryResponse::Flag(false)
    );
    clock.set(t0() + Duration::days(30) + Duration::seconds(1));
    assert_eq!(
        service
            .handle_query(LedgerQuery::IsExpired { fingerprint: fp })
            .unwrap(),
        QueryResponse::Flag(true)
    );

    match service
        .handle_query(LedgerQuery::Status { fingerprint: fp })
        .unwrap()
    {
        QueryResponse::Status(CardStatus::Expired { value, .. }) => assert_eq!(value, 100),
        other => panic!("Expected expired status, got {:?}", other),
    }
}

#[test]
fn test_command_round_trips_through_json() {
    // Die Kommandos sind das Wire-Format der Grenze und müssen sich
    // verlustfrei serialisieren lassen.
    let command = LedgerCommand::Redeem {
        code: "JSON-CODE".to_string(),
        redeemer: "redeemer-1".to_string(),
    };
    let json = serde_json::to_string(&command).unwrap();
    let back: LedgerCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(command, back);
}

#[test]
fn test_check_code_and_status_description() {
    let (service, clock) = setup_service();
    let code = "DESCRIBE-CODE";
    service.buy(fingerprint(code), 100, "buyer-1").unwrap();

    // Kurz vor Ablauf: Beschreibung warnt.
    clock.set(t0() + Duration::days(28));
    let status = service.check_code(code).unwrap();
    let text = describe_status(&status);
    assert!(text.contains("Expiring Soon"), "got: {}", text);
    assert!(text.contains("Time remaining: 2 day(s)"), "got: {}", text);

    // Unbekannter Code: Nicht-Existenz in Textform.
    let missing = service.check_code("NO-SUCH-CODE").unwrap();
    assert_eq!(describe_status(&missing), "Status: Gift card does not exist");
}
