//! Password hashing for local accounts.
//!
//! PBKDF2-HMAC-SHA256 with a random per-user salt. Hashes and salts are
//! stored hex-encoded.

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

/// Size of the random salt (16 bytes).
pub const SALT_SIZE: usize = 16;

/// Length of the derived key (32 bytes, one SHA-256 output).
const CREDENTIAL_LEN: usize = 32;

/// Iteration count used outside of tests.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 100_000;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Stored form of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash {
    pub hash_hex: String,
    pub salt_hex: String,
}

/// Derives and verifies password hashes.
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::with_iterations(DEFAULT_PBKDF2_ITERATIONS)
    }

    /// A zero count is raised to one.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: NonZeroU32::new(iterations).unwrap_or(NonZeroU32::MIN),
            rng: SystemRandom::new(),
        }
    }

    /// Hash `password` under a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<PasswordHash> {
        let mut salt = [0u8; SALT_SIZE];
        self.rng
            .fill(&mut salt)
            .map_err(|_| anyhow::anyhow!("Failed to generate salt"))?;

        let mut derived = Zeroizing::new([0u8; CREDENTIAL_LEN]);
        pbkdf2::derive(
            PBKDF2_ALG,
            self.iterations,
            &salt,
            password.as_bytes(),
            derived.as_mut(),
        );

        Ok(PasswordHash {
            hash_hex: hex::encode(derived.as_ref()),
            salt_hex: hex::encode(salt),
        })
    }

    /// Constant-time check of `password` against a stored hash.
    ///
    /// Errors only when the stored values are not valid hex.
    pub fn verify(&self, password: &str, stored: &PasswordHash) -> Result<bool> {
        let salt = hex::decode(&stored.salt_hex).context("Invalid salt encoding")?;
        let expected = hex::decode(&stored.hash_hex).context("Invalid hash encoding")?;

        Ok(pbkdf2::verify(
            PBKDF2_ALG,
            self.iterations,
            &salt,
            password.as_bytes(),
            &expected,
        )
        .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
