use log::debug;
use std::sync::Mutex;

use super::model::Transaction;
use crate::error::Result;

#[derive(Debug)]
struct PoolState {
    pending: Vec<Transaction>,
    /// Index of the block the pending transactions will be sealed into.
    next_index: u64,
}

/// Pending transactions waiting for the next sealed block.
///
/// Every operation takes the same mutex, so a drain is a single step
/// relative to concurrent enqueues: a transaction lands either in the
/// drained batch or in the pool that remains, never both. The index
/// handed back by `enqueue` is read under that lock too, so it always
/// names the block the transaction ends up in.
#[derive(Debug)]
pub struct TransactionPool {
    state: Mutex<PoolState>,
}

impl TransactionPool {
    /// Empty pool for a chain currently holding `chain_length` blocks.
    pub fn new(chain_length: usize) -> Self {
        Self {
            state: Mutex::new(PoolState {
                pending: Vec::new(),
                next_index: Self::peek_next_index(chain_length),
            }),
        }
    }

    /// Index of the block pending transactions join on a chain of
    /// `chain_length` blocks.
    pub fn peek_next_index(chain_length: usize) -> u64 {
        chain_length as u64 + 1
    }

    /// Validate and append `tx`, returning the index of the block it will
    /// be sealed into. The pool is left untouched on error.
    pub fn enqueue(&self, tx: Transaction) -> Result<u64> {
        tx.validate()?;
        let mut state = self.state.lock().expect("mutex poisoned");
        state.pending.push(tx);
        debug!(
            "POOL - enqueued transaction for block #{} (size: {})",
            state.next_index,
            state.pending.len()
        );
        Ok(state.next_index)
    }

    /// Take every pending transaction, in insertion order, and clear the
    /// pool. Each drain seals one block, so later enqueues target the
    /// block after it.
    pub fn drain(&self) -> Vec<Transaction> {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.next_index += 1;
        let batch = std::mem::take(&mut state.pending);
        debug!(
            "POOL - drained {} transactions (next block #{})",
            batch.len(),
            state.next_index
        );
        batch
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("mutex poisoned").pending.len()
    }

    /// Copy of the pending transactions for read-only reporting.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.state.lock().expect("mutex poisoned").pending.clone()
    }
}
