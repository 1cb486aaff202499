pub mod block;
pub mod hasher;
pub mod ledger;
pub mod pow;

pub use block::Block;
pub use ledger::{Ledger, LedgerConfig};
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Reward paid to the miner of each block.
pub const BASE_REWARD: u64 = 1;

/// Proof carried by the genesis block; not checked against the puzzle.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block. Never a real digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
