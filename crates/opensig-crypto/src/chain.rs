use opensig_types::Pseudonym;
use serde::{Deserialize, Serialize};

use crate::provider::CryptoProvider;
use crate::seed::ChainSeed;

/// The deterministic pseudonym generator for one document on one network.
///
/// hash_0 = SHA-256(seed); hash_i = SHA-256(seed ∥ hash_{i-1}).
///
/// Modeled as an arena: an append-only vector of computed pseudonyms plus
/// a separate cursor marking the highest index handed out. Entries are
/// computed lazily on demand and never recomputed; the cursor can move
/// freely over the cached prefix without discarding it. The whole state
/// is plain data, so a chain can be serialized for persistence/resume.
///
/// The same seed always yields the same infinite sequence, which is what
/// lets any party independently recompute and search for a document's
/// signatures without exchanging state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HashChain {
    seed: ChainSeed,
    hashes: Vec<Pseudonym>,
    cursor: Option<usize>,
}

impl HashChain {
    /// A fresh chain with nothing consumed.
    pub fn new(seed: ChainSeed) -> Self {
        Self {
            seed,
            hashes: Vec::new(),
            cursor: None,
        }
    }

    /// The next `n` pseudonyms past the cursor, extending the cache as
    /// needed and advancing the cursor to the last one returned.
    pub fn next(&mut self, n: usize, crypto: &dyn CryptoProvider) -> &[Pseudonym] {
        let start = self.cursor.map_or(0, |c| c + 1);
        let needed = start + n;
        while self.hashes.len() < needed {
            let digest = match self.hashes.last() {
                None => crypto.sha256(self.seed.as_bytes()),
                Some(prev) => {
                    let mut input = Vec::with_capacity(64);
                    input.extend_from_slice(self.seed.as_bytes());
                    input.extend_from_slice(prev.as_bytes());
                    crypto.sha256(&input)
                }
            };
            self.hashes.push(Pseudonym::from_bytes(digest));
        }
        if n > 0 {
            self.cursor = Some(needed - 1);
        }
        &self.hashes[start..needed]
    }

    /// Move the cursor without discarding cached entries. `None` rewinds
    /// to the pristine state; `Some(i)` must point into the cached prefix.
    pub fn reset(&mut self, index: Option<usize>) {
        debug_assert!(index.map_or(true, |i| i < self.hashes.len()));
        self.cursor = index;
    }

    /// Move the cursor back by one position, for retrying a failed
    /// publication with the same pseudonym.
    pub fn rewind(&mut self) {
        self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
    }

    /// Index of `pseudonym` within the cached prefix.
    pub fn index_of(&self, pseudonym: &Pseudonym) -> Option<usize> {
        self.hashes.iter().position(|h| h == pseudonym)
    }

    /// Highest index handed out so far; `None` if nothing was consumed.
    pub fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    /// The pseudonym at the cursor.
    pub fn current(&self) -> Option<&Pseudonym> {
        self.cursor.and_then(|c| self.hashes.get(c))
    }

    /// The cached pseudonym at index `i`, if already computed.
    pub fn at(&self, i: usize) -> Option<&Pseudonym> {
        self.hashes.get(i)
    }

    /// Number of pseudonyms computed so far.
    pub fn cached_len(&self) -> usize {
        self.hashes.len()
    }

    pub fn seed(&self) -> &ChainSeed {
        &self.seed
    }
}
