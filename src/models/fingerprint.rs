//! # src/models/fingerprint.rs
//!
//! Definiert den `Fingerprint`-Typ: die feste, 32 Byte lange Kennung, unter
//! der ein Gutschein im Ledger geführt wird. Der Fingerprint wird einmalig
//! aus dem geheimen Code abgeleitet (siehe `services::code_identity`) und ist
//! nicht auf den Code zurückrechenbar; der Klartext-Code selbst wird
//! nirgends gespeichert.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Die Länge eines Fingerprints in Bytes.
pub const FINGERPRINT_LEN: usize = 32;

/// Der eindeutige, anonyme Schlüssel eines Gutscheins im Ledger.
///
/// Zwei verschiedene Codes ergeben praktisch nie denselben Fingerprint,
/// derselbe Code ergibt immer denselben. Dargestellt wird der Fingerprint
/// als `0x`-präfigierter Hex-String (Kleinbuchstaben).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Erzeugt einen Fingerprint direkt aus 32 Rohbytes.
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Fingerprint(bytes)
    }

    /// Gibt die Rohbytes des Fingerprints zurück.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Prüft, ob alle Bytes null sind. Der Null-Fingerprint ist als
    /// Kaufschlüssel ungültig und wird vom Ledger abgewiesen.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Eine gekürzte Base58-Darstellung für Logs und CLI-Ausgaben,
    /// analog zur Kurzform von Hashes im restlichen System.
    pub fn short_form(&self) -> String {
        let encoded = bs58::encode(&self.0).into_string();
        let head: String = encoded.chars().take(8).collect();
        format!("{}…", head)
    }
}

/// Fehler beim Parsen eines Fingerprints aus einem Hex-String.
#[derive(Debug, PartialEq, Eq)]
pub enum FingerprintParseError {
    /// Der String enthielt ungültige Hex-Zeichen.
    InvalidHex,
    /// Die dekodierte Länge war nicht exakt 32 Bytes.
    InvalidLength(usize),
}

impl fmt::Display for FingerprintParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FingerprintParseError::InvalidHex => write!(f, "Fingerprint is not valid hex."),
            FingerprintParseError::InvalidLength(n) => {
                write!(f, "Fingerprint must be {} bytes, got {}.", FINGERPRINT_LEN, n)
            }
        }
    }
}

impl std::error::Error for FingerprintParseError {}

impl FromStr for Fingerprint {
    type Err = FingerprintParseError;

    /// Akzeptiert Hex mit oder ohne `0x`-Präfix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|_| FingerprintParseError::InvalidHex)?;
        let arr: [u8; FINGERPRINT_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| FingerprintParseError::InvalidLength(bytes.len()))?;
        Ok(Fingerprint(arr))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

// Serde-Darstellung als Hex-String, damit Fingerprints in JSON-Ansichten
// lesbar bleiben und als Map-Schlüssel taugen.
impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}
