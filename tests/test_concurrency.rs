//! # Nebenläufigkeitstests für den Gutschein-Ledger
//!
//! Prüft die Kernzusage aus dem Nebenläufigkeitsmodell: Kauf und Einlösung
//! verhalten sich pro Fingerprint wie unter einem exklusiven Lock; von N
//! gleichzeitigen Käufen desselben Codes gelingt genau einer, von N
//! gleichzeitigen Einlösungen ebenso, und Operationen auf verschiedenen
//! Fingerprints behindern sich nicht.

use chrono::{DateTime, Duration, TimeZone, Utc};
use giftcard_lib::{fingerprint, GiftCardLedger, LedgerConfig, LedgerError};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 16;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
}

fn test_ledger() -> Arc<GiftCardLedger> {
    Arc::new(GiftCardLedger::new(LedgerConfig {
        validity_period_days: Some(30),
        minimum_value: 1,
    }))
}

#[test]
fn test_concurrent_purchases_of_same_fingerprint_yield_exactly_one_success() {
    let ledger = test_ledger();
    let fp = fingerprint("RACE-PURCHASE");
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Alle Threads starten so gleichzeitig wie möglich.
                barrier.wait();
                ledger.purchase(fp, 100, &format!("buyer-{}", i), t0())
            })
        })
        .collect();

    let mut successes = 0;
    let mut already_exists = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(_) => successes += 1,
            Err(e) => {
                assert!(matches!(
                    e.as_ledger_error(),
                    Some(LedgerError::AlreadyExists)
                ));
                already_exists += 1;
            }
        }
    }

    assert_eq!(successes, 1, "Exactly one concurrent purchase may win");
    assert_eq!(already_exists, THREADS - 1);
    assert_eq!(ledger.card_count().unwrap(), 1);
}

#[test]
fn test_concurrent_redeems_of_same_fingerprint_yield_exactly_one_success() {
    let ledger = test_ledger();
    let fp = fingerprint("RACE-REDEEM");
    ledger.purchase(fp, 500, "alice", t0()).unwrap();

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ledger.redeem(fp, &format!("redeemer-{}", i), t0() + Duration::days(1))
            })
        })
        .collect();

    let mut successes = 0;
    let mut already_redeemed = 0;
    for handle in handles {
        match handle.join().unwrap() {
            Ok((value, _event)) => {
                assert_eq!(value, 500);
                successes += 1;
            }
            Err(e) => {
                assert!(matches!(
                    e.as_ledger_error(),
                    Some(LedgerError::AlreadyRedeemed)
                ));
                already_redeemed += 1;
            }
        }
    }

    assert_eq!(successes, 1, "Exactly one concurrent redeem may win");
    assert_eq!(already_redeemed, THREADS - 1);

    // Genau der eine Gewinner steht als Einlöser im Eintrag.
    let card = ledger.get_card(&fp).unwrap().unwrap();
    assert!(card.redeemed);
    assert!(card.redeemer.is_some());
}

#[test]
fn test_concurrent_operations_on_distinct_fingerprints_all_succeed() {
    let ledger = test_ledger();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let fp = fingerprint(&format!("DISTINCT-{}", i));
                barrier.wait();
                ledger.purchase(fp, 100 + i as u128, &format!("buyer-{}", i), t0())?;
                ledger.redeem(fp, &format!("redeemer-{}", i), t0() + Duration::days(1))
            })
        })
        .collect();

    for handle in handles {
        let (value, _event) = handle.join().unwrap().unwrap();
        assert!(value >= 100);
    }
    assert_eq!(ledger.card_count().unwrap(), THREADS);
}

#[test]
fn test_interleaved_status_reads_see_consistent_snapshots() {
    // Leser laufen parallel zu Schreibern und dürfen nur die Zustände
    // NonExistent, Valid oder Redeemed beobachten; nie etwas Halbes.
    let ledger = test_ledger();
    let fp = fingerprint("SNAPSHOT");
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let readers: Vec<_> = (0..THREADS)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..100 {
                    let status = ledger.status(&fp, t0()).unwrap();
                    let value = status.value();
                    assert!(
                        value == 0 || value == 500,
                        "Observed a partially written value: {}",
                        value
                    );
                }
            })
        })
        .collect();

    let writer = {
        let ledger = Arc::clone(&ledger);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            ledger.purchase(fp, 500, "alice", t0()).unwrap();
            ledger.redeem(fp, "bob", t0()).unwrap();
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}
