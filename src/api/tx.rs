use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};
use serde_json::Value;

use super::models::{AppState, MempoolResponse, NewTxRequest, NewTxResponse};

/// Submit a new transaction into the pool.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (Some(sender), Some(recipient), Some(amount)) = (sender, recipient, amount) else {
        warn!("POST /transactions/new/ - rejected: missing values");
        return HttpResponse::BadRequest().body("Missing values");
    };
    let Value::Number(amount) = amount else {
        warn!("POST /transactions/new/ - rejected: non-numeric amount");
        return HttpResponse::BadRequest().body("amount must be numeric");
    };

    match state.ledger.submit_transaction(&sender, &recipient, amount) {
        Ok(index) => {
            info!("POST /transactions/new/ - {sender} -> {recipient} queued for block {index}");
            HttpResponse::Created().json(NewTxResponse {
                message: format!("Transaction will be added to Block {index}"),
                index,
            })
        }
        Err(e) => {
            warn!("POST /transactions/new/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

/// List the transactions waiting for the next block.
#[get("/mempool/")]
pub async fn get_mempool(state: web::Data<AppState>) -> impl Responder {
    let transactions = state.ledger.pending_transactions();
    debug!("GET /mempool/ - {} pending", transactions.len());
    HttpResponse::Ok().json(MempoolResponse {
        size: transactions.len(),
        transactions,
    })
}
