use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Stable identifier for a mutant, derived from where and how the source was changed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MutantHash(#[serde(serialize_with = "serialize_hash")] [u8; 32]);

fn serialize_hash<S>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(hash))
}

impl MutantHash {
    /// Hash an ordered list of parts. Parts are length-prefixed so that
    /// ("ab", "c") and ("a", "bc") never collide.
    pub fn of_parts(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        MutantHash(hasher.finalize().into())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 hex characters, enough to tell mutants apart in listings
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl fmt::Display for MutantHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_length_prefixed() {
        assert_ne!(
            MutantHash::of_parts(&["ab", "c"]),
            MutantHash::of_parts(&["a", "bc"])
        );
    }

    #[test]
    fn hex_forms() {
        let hash = MutantHash::of_parts(&["src/Foo.php", "NewObject", "42"]);
        assert_eq!(hash.to_hex().len(), 64);
        assert_eq!(hash.to_string(), hash.to_hex());
        assert!(hash.to_hex().starts_with(&hash.short()));
        assert_eq!(
            serde_json::to_string(&hash).unwrap(),
            format!("\"{}\"", hash.to_hex())
        );
    }
}
