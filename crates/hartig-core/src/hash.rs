//! Plan fingerprints: blake3 over the JSON serialization of a value.
//!
//! Used to key cached explain renderings; equal explain trees hash equal
//! because object keys serialize in insertion order.

use std::fmt;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }

    /// First 12 hex digits, enough to tell plans apart in logs.
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl From<blake3::Hash> for Hash256 {
    fn from(h: blake3::Hash) -> Self {
        Hash256(h.into())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Stream the JSON encoding of `v` straight into the hasher.
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256> {
    let mut hasher = Hasher::new();
    serde_json::to_writer(&mut hasher, v)?;
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_trees_hash_equal() {
        let a = hash_serde(&json!({"type": "Source", "parameters": {}})).unwrap();
        let b = hash_serde(&json!({"type": "Source", "parameters": {}})).unwrap();
        let c = hash_serde(&json!({"type": "Union", "parameters": {}})).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_hex().len(), 64);
        assert!(a.to_hex().starts_with(&a.short()));
    }

    #[test]
    fn matches_direct_blake3_of_json() {
        let v = json!({"k": [1, 2]});
        let bytes = serde_json::to_vec(&v).unwrap();
        assert_eq!(hash_serde(&v).unwrap(), Hash256::from(blake3::hash(&bytes)));
    }
}
