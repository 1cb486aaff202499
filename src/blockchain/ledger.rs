use log::{debug, info, warn};
use serde_json::Number;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use super::{BASE_REWARD, Block, DEFAULT_DIFFICULTY, GENESIS_PROOF, ProofOfWork, hasher};
use crate::error::{IntegrityViolation, LedgerError, Result};
use crate::transaction::{Transaction, TransactionPool};

/// Engine settings chosen once per process (or per test).
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Leading zero hex characters a proof digest needs.
    pub difficulty: u32,
    /// Amount paid to the miner of each block.
    pub reward: Number,
    /// Workers sharing one nonce search.
    pub mining_threads: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            reward: Number::from(BASE_REWARD),
            mining_threads: 1,
        }
    }
}

/// In-memory append-only chain with its pending transaction pool.
///
/// Mining calls are serialized by `mining`; the chain write lock is only
/// held for the final push, so readers observe either the chain before a
/// block was sealed or after, never in between.
#[derive(Debug)]
pub struct Ledger {
    chain: RwLock<Vec<Block>>,
    pool: TransactionPool,
    pow: ProofOfWork,
    reward: Number,
    mining: Mutex<()>,
    /// Raised by `cancel_mining`; observed by every proof search.
    cancel: AtomicBool,
}

impl Ledger {
    /// Initialize a new ledger with a genesis block.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_chain(vec![Block::genesis()], config)
    }

    fn with_chain(blocks: Vec<Block>, config: LedgerConfig) -> Self {
        Self {
            pool: TransactionPool::new(blocks.len()),
            chain: RwLock::new(blocks),
            pow: ProofOfWork::new(config.difficulty).with_threads(config.mining_threads),
            reward: config.reward,
            mining: Mutex::new(()),
            cancel: AtomicBool::new(false),
        }
    }

    /// Queue a transfer for the next block. Returns the index of the block
    /// it will be sealed into.
    pub fn submit_transaction(
        &self,
        sender: &str,
        recipient: &str,
        amount: Number,
    ) -> Result<u64> {
        let tx = Transaction::new(sender, recipient, amount)?;
        self.pool.enqueue(tx)
    }

    /// Seal the pending transactions into a new block, paying `miner`.
    ///
    /// Fails with `MiningCancelled` once [`Ledger::cancel_mining`] has been
    /// called. Cancellation is observed before the pool is drained, so
    /// neither the pool nor the chain change.
    pub fn mine_next_block(&self, miner: &str) -> Result<Block> {
        let miner = miner.trim();
        if miner.is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "miner identity is required".into(),
            ));
        }

        let _writer = self.mining.lock().expect("mutex poisoned");
        let last = self.last()?;

        debug!(
            "MINER - searching proof for block #{} (difficulty={}, threads={})",
            last.index + 1,
            self.pow.difficulty(),
            self.pow.threads()
        );
        let proof = match self.pow.mine(last.proof, &self.cancel) {
            Some(proof) => proof,
            None => {
                warn!("MINER - search for block #{} cancelled", last.index + 1);
                return Err(LedgerError::MiningCancelled);
            }
        };

        let previous_hash = hasher::hash(&last);
        let mut transactions = vec![Transaction::reward(miner, self.reward.clone())];
        transactions.extend(self.pool.drain());
        let block = Block::new(last.index + 1, transactions, proof, previous_hash);

        self.chain
            .write()
            .expect("rwlock poisoned")
            .push(block.clone());

        info!(
            "MINER - sealed block #{} (proof={}, txs={}, hash={})",
            block.index,
            block.proof,
            block.transactions.len(),
            hasher::hash(&block)
        );
        Ok(block)
    }

    /// Abort the search in flight and refuse later ones. Used on shutdown.
    pub fn cancel_mining(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Whether every link and proof in the chain holds.
    pub fn validate_chain(&self) -> bool {
        self.audit_chain().is_ok()
    }

    /// Walk the chain and report the first violation found.
    pub fn audit_chain(&self) -> std::result::Result<(), IntegrityViolation> {
        let chain = self.chain.read().expect("rwlock poisoned");
        audit_blocks(&chain, &self.pow).inspect_err(|violation| {
            warn!("CHAIN - integrity check failed: {violation}");
        })
    }

    /// Most recent block.
    pub fn last(&self) -> Result<Block> {
        self.chain
            .read()
            .expect("rwlock poisoned")
            .last()
            .cloned()
            .ok_or(LedgerError::EmptyChain)
    }

    /// Owned copy of the chain.
    pub fn chain_snapshot(&self) -> Vec<Block> {
        self.chain.read().expect("rwlock poisoned").clone()
    }

    pub fn length(&self) -> usize {
        self.chain.read().expect("rwlock poisoned").len()
    }

    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty()
    }

    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.pool.snapshot()
    }

    pub fn pending_len(&self) -> usize {
        self.pool.len()
    }
}

/// Check genesis shape, index sequence, hash links and proofs of `blocks`.
/// An empty slice has no genesis and is reported as malformed.
pub fn audit_blocks(
    blocks: &[Block],
    pow: &ProofOfWork,
) -> std::result::Result<(), IntegrityViolation> {
    let genesis = blocks.first().ok_or(IntegrityViolation::MalformedGenesis)?;
    if !genesis.is_genesis() || genesis.proof != GENESIS_PROOF {
        return Err(IntegrityViolation::MalformedGenesis);
    }

    for (i, pair) in blocks.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        let position = i + 2;

        if current.index != position as u64 {
            return Err(IntegrityViolation::IndexMismatch {
                position,
                found: current.index,
            });
        }
        if current.previous_hash != hasher::hash(prev) {
            return Err(IntegrityViolation::BrokenLink {
                index: current.index,
            });
        }
        if !pow.valid_proof(prev.proof, current.proof) {
            return Err(IntegrityViolation::InvalidProof {
                index: current.index,
            });
        }
    }

    Ok(())
}
