//! Monoalphabetic Substitution
//!
//! The full 256-entry table is the deduplicated base key followed by the
//! rest of the byte alphabet, shuffled with a generator seeded from the base
//! key. The same base key always yields the same table.

use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionKey {
    forward: [u8; 256],
    reverse: [u8; 256],
}

impl SubstitutionKey {
    pub fn generate(base_key: &str) -> Result<Self> {
        let base = base_bytes(base_key)?;

        let mut used = [false; 256];
        for &b in &base {
            used[b as usize] = true;
        }
        let mut remaining: Vec<u8> = (0u8..=255).filter(|&b| !used[b as usize]).collect();

        let seed: u64 = base.iter().map(|&b| u64::from(b)).sum();
        let mut rng = StdRng::seed_from_u64(seed);
        remaining.shuffle(&mut rng);

        let mut forward = [0u8; 256];
        for (slot, b) in forward.iter_mut().zip(base.iter().chain(remaining.iter())) {
            *slot = *b;
        }

        let mut reverse = [0u8; 256];
        for (plain, &cipher) in forward.iter().enumerate() {
            reverse[cipher as usize] = plain as u8;
        }

        Ok(Self { forward, reverse })
    }

    /// Cipher byte for each plain byte
    pub fn table(&self) -> &[u8; 256] {
        &self.forward
    }

    pub fn encrypt(&self, text: &[u8]) -> Vec<u8> {
        text.iter().map(|&b| self.forward[b as usize]).collect()
    }

    pub fn decrypt(&self, text: &[u8]) -> Vec<u8> {
        text.iter().map(|&b| self.reverse[b as usize]).collect()
    }
}

/// A base key needs at least one character in the 8-bit range.
pub fn validate_substitution_key(base_key: &str) -> Result<()> {
    base_bytes(base_key).map(|_| ())
}

pub fn substitution_encrypt(text: &[u8], base_key: &str) -> Result<Vec<u8>> {
    Ok(SubstitutionKey::generate(base_key)?.encrypt(text))
}

pub fn substitution_decrypt(text: &[u8], base_key: &str) -> Result<Vec<u8>> {
    Ok(SubstitutionKey::generate(base_key)?.decrypt(text))
}

/// 8-bit chars of the base key, first occurrence only.
fn base_bytes(base_key: &str) -> Result<Vec<u8>> {
    let mut seen = [false; 256];
    let mut out = Vec::new();
    for b in base_key.chars().filter_map(|c| u8::try_from(u32::from(c)).ok()) {
        if !seen[b as usize] {
            seen[b as usize] = true;
            out.push(b);
        }
    }

    if out.is_empty() {
        return Err(Error::InvalidSubstitutionKey(
            "must contain at least one 8-bit character".into(),
        ));
    }
    Ok(out)
}
