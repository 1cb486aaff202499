use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};

use super::models::{
    AppState, ChainResponse, DifficultyResponse, MineResponse, ValidateResponse,
};
use crate::blockchain::hasher;
use crate::error::LedgerError;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.chain_snapshot();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let valid = state.ledger.validate_chain();
    let violation = if valid {
        None
    } else {
        state.ledger.audit_chain().err()
    };
    HttpResponse::Ok().json(ValidateResponse {
        valid,
        length: state.ledger.length(),
        difficulty: state.ledger.difficulty(),
        violation: violation.map(|v| v.to_string()),
    })
}

/// Mine a new block from the pending transactions, rewarding this node.
/// The proof-of-work search runs on the blocking pool so other requests
/// keep being served meanwhile.
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    let outcome = web::block(move || worker.ledger.mine_next_block(&worker.node_id)).await;

    match outcome {
        Ok(Ok(block)) => {
            let hash = hasher::hash(&block);
            info!("GET /mine/ - forged block #{} ({})", block.index, hash);
            HttpResponse::Ok().json(MineResponse {
                message: "New Block Forged",
                index: block.index,
                transactions: block.transactions,
                proof: block.proof,
                previous_hash: block.previous_hash,
                hash,
            })
        }
        Ok(Err(LedgerError::MiningCancelled)) => {
            HttpResponse::ServiceUnavailable().body("mining cancelled: node is shutting down")
        }
        Ok(Err(e)) => {
            warn!("GET /mine/ - failed: {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
        Err(e) => {
            warn!("GET /mine/ - mining task failed: {e}");
            HttpResponse::InternalServerError().body("mining task failed")
        }
    }
}

/// Get the PoW difficulty this node mines and validates with.
#[get("/difficulty/")]
pub async fn get_difficulty(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(DifficultyResponse {
        difficulty: state.ledger.difficulty(),
    })
}
