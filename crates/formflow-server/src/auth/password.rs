// SPDX-License-Identifier: Apache-2.0

//! Salted PBKDF2-HMAC-SHA256 password hashes.
//!
//! Stored as `pbkdf2-sha256$<iterations>$<salt hex>$<digest hex>`.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2-sha256";
pub const DEFAULT_ITERATIONS: u32 = 10_000;

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; 32] {
    let mut key = [0_u8; 32];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Hashes `password` with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str, iterations: u32) -> String {
    let salt = uuid::Uuid::new_v4();
    let digest = derive(password.as_bytes(), salt.as_bytes(), iterations.max(1));
    format!(
        "{SCHEME}${}${}${}",
        iterations.max(1),
        hex::encode(salt.as_bytes()),
        hex::encode(digest)
    )
}

/// False for any mismatch, including unreadable stored hashes.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    let (Ok(iterations), Ok(salt), Ok(expected)) = (
        iterations.parse::<u32>(),
        hex::decode(salt),
        hex::decode(expected),
    ) else {
        return false;
    };
    constant_time_eq(&derive(password.as_bytes(), &salt, iterations.max(1)), &expected)
}
