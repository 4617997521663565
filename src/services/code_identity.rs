//! # src/services/code_identity.rs
//!
//! Leitet aus einem geheimen Gutschein-Code die feste Ledger-Kennung ab.
//! Der Besitz des Klartext-Codes ist das Einlöse-Credential; das Ledger
//! kennt ausschließlich den daraus abgeleiteten Fingerprint.

// Kryptografischer Hash (Keccak-256)
use sha3::{Digest, Keccak256};

use crate::models::fingerprint::{Fingerprint, FINGERPRINT_LEN};
use rand::Rng;

/// Das Alphabet für generierte Gutschein-Codes. Bewusst ohne leicht
/// verwechselbare Zeichen (0/O, 1/I/l).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Die Standardlänge generierter Codes.
pub const DEFAULT_CODE_LEN: usize = 16;

/// Computes the ledger fingerprint of a secret code.
///
/// The code is hashed as its UTF-8 bytes with Keccak-256, yielding a
/// deterministic 32-byte digest. The function is stateless and side-effect
/// free: identical input always produces identical output, and recovering
/// the code from the digest is computationally infeasible.
///
/// No validation happens at this layer; an empty string is technically
/// hashable. Callers reject empty input before deriving a fingerprint
/// (business rule, not an identity-function failure), and trim incidental
/// whitespace beforehand.
///
/// # Arguments
///
/// * `code` - The secret code as entered by the user, already trimmed.
///
/// # Returns
///
/// The 32-byte `Fingerprint` of the code.
pub fn fingerprint(code: &str) -> Fingerprint {
    let mut hasher = Keccak256::new();
    hasher.update(code.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; FINGERPRINT_LEN];
    bytes.copy_from_slice(&digest);
    Fingerprint::from_bytes(bytes)
}

/// Generates a random gift-card code for issuers.
///
/// # Arguments
///
/// * `len` - The desired code length; lengths below 8 are raised to 8 so a
///   generated code never ends up trivially guessable.
///
/// # Returns
///
/// A random code over an unambiguous alphanumeric alphabet.
pub fn generate_code(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}
