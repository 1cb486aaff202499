use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::Block;

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Canonical byte encoding of a block: compact JSON with every object's
/// keys sorted, so equal content always encodes identically.
pub fn canonical_bytes(block: &Block) -> Vec<u8> {
    let value = serde_json::to_value(block).expect("serialize block");
    serde_json::to_vec(&canonicalize(value)).expect("serialize canonical block")
}

/// SHA-256 digest of the block's canonical encoding.
pub fn hash(block: &Block) -> String {
    sha256_hex(&canonical_bytes(block))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
