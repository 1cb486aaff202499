use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{LedgerError, Result};

/// Sender used for network-issued (mining reward) transactions.
pub const NETWORK_SENDER: &str = "0";

/// A value transfer waiting for, or sealed into, a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    /// Kept as the JSON number it was submitted as (integer or decimal).
    pub amount: Number,
}

impl Transaction {
    /// Build a transaction after checking its fields are well formed.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Number,
    ) -> Result<Self> {
        let tx = Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        };
        tx.validate()?;
        Ok(tx)
    }

    /// Reward paid to `miner` for sealing a block.
    pub fn reward(miner: &str, amount: Number) -> Self {
        Self {
            sender: NETWORK_SENDER.to_string(),
            recipient: miner.to_string(),
            amount,
        }
    }

    /// Structural checks only; no balances or signatures.
    pub fn validate(&self) -> Result<()> {
        if self.sender.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction("sender is required".into()));
        }
        if self.recipient.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "recipient is required".into(),
            ));
        }
        match self.amount.as_f64() {
            Some(v) if v >= 0.0 => Ok(()),
            Some(_) => Err(LedgerError::InvalidTransaction(
                "amount must be non-negative".into(),
            )),
            None => Err(LedgerError::InvalidTransaction(
                "amount must be numeric".into(),
            )),
        }
    }
}
