use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

/// Liveness plus a glance at the node: chain height and pool size.
#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        node_id: state.node_id.clone(),
        height: state.ledger.length(),
        pending: state.ledger.pending_len(),
    })
}
