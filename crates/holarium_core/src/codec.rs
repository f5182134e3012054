//! Deterministic derivation of holographic vectors from arbitrary bytes.
//!
//! A 32-bit FNV-1a signature seeds a linear-congruential sequence that
//! sparsely fills the 512 dimensions. Identical input bytes always yield a
//! bit-identical vector, which lets vectors double as stable content keys.

use holarium_data::{HolographicVector, DIMENSIONS};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const LCG_MASK: u32 = 0x7fff_ffff;

/// Streaming FNV-1a over the input bytes.
pub fn hash_bytes(input: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in input {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The 31-bit linear-congruential sequence used for the sparse fill.
struct Lcg {
    seed: u32,
}

impl Lcg {
    fn new(seed: u32) -> Self {
        Self { seed }
    }

    fn next(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & LCG_MASK;
        self.seed
    }
}

/// Derives a holographic vector from raw bytes.
///
/// Roughly one dimension in ten becomes active, with a value in
/// [-1.0, 0.999]; the rest stay zero. Empty input is valid and hashes to
/// the FNV offset basis.
pub fn generate(input: &[u8]) -> HolographicVector {
    let mut vector = HolographicVector {
        signature: hash_bytes(input),
        valid: true,
        ..Default::default()
    };

    let mut lcg = Lcg::new(vector.signature);
    for i in 0..DIMENSIONS {
        let seed = lcg.next();
        if seed % 10 == 0 {
            vector.data[i] = ((seed % 2000) as f32 - 1000.0) / 1000.0;
            vector.active_dimensions += 1;
        }
    }
    vector
}

/// Derives a vector from a text label, hashing the trailing NUL byte as
/// the original kernel did, so vocabulary signatures stay compatible.
pub fn generate_label(label: &str) -> HolographicVector {
    let mut bytes = Vec::with_capacity(label.len() + 1);
    bytes.extend_from_slice(label.as_bytes());
    bytes.push(0);
    generate(&bytes)
}
