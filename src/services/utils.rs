//! # utils.rs
//!
//! Enthält allgemeine Hilfsfunktionen rund um Zeit: die injizierbare Uhr
//! für das Ledger sowie Formatierungen für Zeitstempel und Restlaufzeiten.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// The clock the ledger reads `now` from.
///
/// Expiration decisions are a pure function of the injected instant, so any
/// test can drive the engine through arbitrary points in time by supplying
/// its own implementation. Production code uses [`SystemClock`].
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock, backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests. Starts at the instant it is constructed with
/// and only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualClock {
            current: Mutex::new(start),
        }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Advances the clock by `delta` (may be negative).
    pub fn advance(&self, delta: Duration) {
        let mut guard = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *guard += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Formats an instant as ISO 8601 in UTC with microsecond precision,
/// e.g. `2026-03-01T09:30:00.000000Z`.
///
/// # Arguments
///
/// * `instant` - The instant to format.
///
/// # Returns
///
/// A string in the format YYYY-MM-DDTHH:MM:SS.ffffffZ.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Formats a remaining validity span for human consumption.
///
/// Mirrors the granularity users expect from the client: days and hours while
/// more than a day remains, hours and minutes below that, bare minutes at the
/// end, and the literal `"Expired"` once nothing remains.
///
/// # Arguments
///
/// * `remaining` - The remaining span; anything non-positive counts as expired.
pub fn format_time_remaining(remaining: Duration) -> String {
    let total_secs = remaining.num_seconds();
    if total_secs <= 0 {
        return "Expired".to_string();
    }

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;

    if days > 0 {
        format!("{} day(s), {} hour(s)", days, hours)
    } else if hours > 0 {
        format!("{} hour(s), {} minute(s)", hours, minutes)
    } else {
        format!("{} minute(s)", minutes)
    }
}
