// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PBKDF2-SHA256 password hashing.
//!
//! Hashes are encoded as `pbkdf2:sha256:<iterations>$<salt_hex>$<hash_hex>`
//! so the iteration count can be raised without invalidating old hashes.

use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const CREDENTIAL_LEN: usize = digest::SHA256_OUTPUT_LEN;
const SALT_LEN: usize = 16;
const SCHEME_PREFIX: &str = "pbkdf2:sha256:";

/// Password hasher with a configured work factor for new hashes.
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Result<Self, PasswordError> {
        let iterations = NonZeroU32::new(iterations).ok_or(PasswordError::ZeroIterations)?;
        Ok(Self {
            iterations,
            rng: SystemRandom::new(),
        })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| PasswordError::Random)?;

        let mut credential = [0u8; CREDENTIAL_LEN];
        pbkdf2::derive(
            PBKDF2_ALG,
            self.iterations,
            &salt,
            password.as_bytes(),
            &mut credential,
        );

        Ok(format!(
            "{}{}${}${}",
            SCHEME_PREFIX,
            self.iterations,
            hex::encode(salt),
            hex::encode(credential)
        ))
    }

    /// Verify a password against an encoded hash (constant time).
    ///
    /// Malformed hashes verify as `false`.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let Some((iterations, salt, expected)) = decode_hash(encoded) else {
            tracing::warn!("Stored password hash is malformed");
            return false;
        };

        pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &expected).is_ok()
    }
}

fn decode_hash(encoded: &str) -> Option<(NonZeroU32, Vec<u8>, Vec<u8>)> {
    let rest = encoded.strip_prefix(SCHEME_PREFIX)?;

    let parts: Vec<&str> = rest.splitn(3, '$').collect();
    if parts.len() != 3 {
        return None;
    }

    let iterations = NonZeroU32::new(parts[0].parse().ok()?)?;
    let salt = hex::decode(parts[1]).ok()?;
    let expected = hex::decode(parts[2]).ok()?;
    if expected.len() != CREDENTIAL_LEN {
        return None;
    }

    Some((iterations, salt, expected))
}

/// Errors from password hashing.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("PBKDF2 iteration count must be non-zero")]
    ZeroIterations,

    #[error("System random number generator failed")]
    Random,
}
