use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A sealed batch of transactions linked to its predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp in milliseconds (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64, // Proof-of-Work nonce
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: Utc::now().timestamp_millis(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// Seal a block at the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp_millis(),
            transactions,
            proof,
            previous_hash,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    #[test]
    fn genesis_uses_seed_values() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, GENESIS_PROOF);
        assert_eq!(b.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(b.transactions.is_empty());
        assert!(b.is_genesis());
    }

    #[test]
    fn renders_with_expected_field_names() {
        let tx = Transaction::new("a", "b", Number::from(5u64)).unwrap();
        let b = Block::new(2, vec![tx], 35293, "abc".into());
        let value = serde_json::to_value(&b).unwrap();

        assert_eq!(value["index"], 2);
        assert_eq!(value["proof"], 35293);
        assert_eq!(value["previous_hash"], "abc");
        assert_eq!(value["transactions"][0]["sender"], "a");
        assert_eq!(value["transactions"][0]["recipient"], "b");
        assert_eq!(value["transactions"][0]["amount"], 5);
        assert!(value["timestamp"].is_i64());
        assert!(!b.is_genesis());
    }
}
