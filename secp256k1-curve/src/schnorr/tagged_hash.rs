//! BIP340 tagged hashes: `SHA256(SHA256(tag) ‖ SHA256(tag) ‖ data)`.
//!
//! The 64-byte tag prefix fills exactly one SHA-256 block, so a hasher that
//! has absorbed it can be cloned and reused for every later hash under the
//! same tag.

use sha2::{Digest, Sha256};

#[cfg(feature = "std")]
use {
    core::fmt,
    once_cell::sync::Lazy,
    std::{boxed::Box, collections::HashMap, sync::RwLock},
};

/// Computes the tagged hash of the concatenation of `msgs` under `tag`.
///
/// With the `std` feature the primed hasher for each tag is cached in
/// [`TaggedHasher::global`]; otherwise the prefix is recomputed per call.
pub fn tagged_hash(tag: &[u8], msgs: &[&[u8]]) -> [u8; 32] {
    let mut hasher = tagged_hasher(tag);

    for msg in msgs {
        hasher.update(msg);
    }

    hasher.finalize().into()
}

/// Hasher primed with the prefix for `tag`, taken from the global cache when
/// one is available.
pub(super) fn tagged_hasher(tag: &[u8]) -> Sha256 {
    #[cfg(feature = "std")]
    {
        TaggedHasher::global().hasher(tag)
    }

    #[cfg(not(feature = "std"))]
    {
        primed(tag)
    }
}

fn primed(tag: &[u8]) -> Sha256 {
    let tag_hash = Sha256::digest(tag);
    let mut digest = Sha256::new();
    digest.update(tag_hash);
    digest.update(tag_hash);
    digest
}

/// Thread-safe cache of SHA-256 states primed with BIP340 tag prefixes.
///
/// Entries are inserted on first use of a tag and never evicted. Two threads
/// racing on the same new tag may both compute the prefix; the second insert
/// is discarded.
#[cfg(feature = "std")]
#[derive(Default)]
pub struct TaggedHasher {
    prefixes: RwLock<HashMap<Box<[u8]>, Sha256>>,
}

#[cfg(feature = "std")]
static GLOBAL: Lazy<TaggedHasher> = Lazy::new(TaggedHasher::new);

#[cfg(feature = "std")]
impl TaggedHasher {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache used by [`tagged_hash`] and the Schnorr signer and
    /// verifier.
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Fresh hasher that has already absorbed the prefix for `tag`.
    pub fn hasher(&self, tag: &[u8]) -> Sha256 {
        {
            let prefixes = self.prefixes.read().unwrap_or_else(|e| e.into_inner());
            if let Some(hasher) = prefixes.get(tag) {
                return hasher.clone();
            }
        }

        let hasher = primed(tag);
        let mut prefixes = self.prefixes.write().unwrap_or_else(|e| e.into_inner());
        prefixes
            .entry(tag.into())
            .or_insert_with(|| hasher.clone());
        hasher
    }

    /// Tagged hash of the concatenation of `msgs`.
    pub fn hash(&self, tag: &[u8], msgs: &[&[u8]]) -> [u8; 32] {
        let mut hasher = self.hasher(tag);

        for msg in msgs {
            hasher.update(msg);
        }

        hasher.finalize().into()
    }

    /// Number of cached tags.
    pub fn len(&self) -> usize {
        self.prefixes.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no tag has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "std")]
impl fmt::Debug for TaggedHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedHasher")
            .field("tags", &self.len())
            .finish()
    }
}
