use thiserror::Error;

/// Errors surfaced by the ledger engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("chain has no blocks")]
    EmptyChain,

    #[error("proof-of-work search was cancelled")]
    MiningCancelled,
}

/// First problem found while walking a chain. Returned as a report by
/// `Ledger::audit_chain`, never raised by mining.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    #[error("genesis block is malformed")]
    MalformedGenesis,

    #[error("block at position {position} has index {found}")]
    IndexMismatch { position: usize, found: u64 },

    #[error("block #{index} does not link to the hash of its predecessor")]
    BrokenLink { index: u64 },

    #[error("block #{index} carries a proof that does not meet the difficulty")]
    InvalidProof { index: u64 },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
