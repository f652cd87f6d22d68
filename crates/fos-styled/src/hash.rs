//! String hashing for style identifiers
//!
//! The default primitive is the classic `string-hash`: a djb2 variant
//! that walks UTF-16 code units from the end, so the same input string
//! hashes the same here as in a server pass using that function.

/// Hash primitive used to shorten identifiers
pub trait StyleHasher {
    /// Deterministic hash of `input`, rendered as a short string
    fn hash(&self, input: &str) -> String;
}

/// Default hasher (`string-hash`)
#[derive(Debug, Clone, Copy, Default)]
pub struct StringHash;

impl StyleHasher for StringHash {
    fn hash(&self, input: &str) -> String {
        string_hash(input).to_string()
    }
}

/// `h = h * 33 ^ unit` over UTF-16 units in reverse, seeded with 5381
pub fn string_hash(input: &str) -> u32 {
    let units: Vec<u16> = input.encode_utf16().collect();
    units.iter()
        .rev()
        .fold(5381u32, |h, &unit| h.wrapping_mul(33) ^ u32::from(unit))
}
