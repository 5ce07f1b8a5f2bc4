//! Hasher used for the network's id-keyed maps and sets, grounded
//! verbatim on the teacher's `genes::GeneHasher` (`seahash::SeaHasher`
//! behind `BuildHasher`), which the teacher reaches for instead of the
//! default SipHash to avoid paying DoS-resistance overhead on internal,
//! non-adversarial integer keys.

use std::hash::BuildHasher;

use seahash::SeaHasher;

#[derive(Debug, Clone, Default)]
pub struct GeneHasher;

impl BuildHasher for GeneHasher {
    type Hasher = SeaHasher;

    fn build_hasher(&self) -> Self::Hasher {
        Self::Hasher::new()
    }
}
