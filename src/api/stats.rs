use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let chain = state.ledger.chain_snapshot();

    let last_interval_ms = match chain.as_slice() {
        [.., older, newer] => Some((newer.timestamp - older.timestamp).max(0)),
        _ => None,
    };

    HttpResponse::Ok().json(StatsResponse {
        node_id: state.node_id.clone(),
        height: chain.len(),
        difficulty: state.ledger.difficulty(),
        mempool_size: state.ledger.pending_len(),
        last_interval_ms,
    })
}
