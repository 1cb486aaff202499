use crate::blockchain::{Block, Ledger};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Shared application state: the one ledger of this process plus the
/// identity that collects its mining rewards.
pub struct AppState {
    pub ledger: Ledger,
    pub node_id: String,
}

impl AppState {
    pub fn new(ledger: Ledger, node_id: String) -> Self {
        Self { ledger, node_id }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
    pub hash: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_id: String,
    pub height: usize,
    pub pending: usize,
}

#[derive(Serialize)]
pub struct DifficultyResponse {
    pub difficulty: u32,
}

/* ---------- TX API Models ---------- */

/// Every field is optional so a missing one becomes a 400 with a
/// readable message instead of a deserialization failure.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub node_id: String,
    pub height: usize,
    pub difficulty: u32,
    pub mempool_size: usize,
    pub last_interval_ms: Option<i64>,
}
