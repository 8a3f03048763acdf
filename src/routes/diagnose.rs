use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use crate::core::Matcher;
use crate::extraction;
use crate::models::{
    DiagnoseRequest, DiagnoseResponse, ErrorResponse, ExtractRequest, ExtractResponse,
    HealthResponse,
};
use crate::services::{ProgramStore, ProgramStoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProgramStore>,
    pub matcher: Matcher,
}

/// Configure all diagnosis-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/diagnose", web::post().to(diagnose))
        .route("/extract", web::post().to(extract));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.is_ok();
    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Diagnose endpoint
///
/// POST /api/v1/diagnose
///
/// Scores the active program snapshot against the submitted profile and
/// returns tiered recommendations with per-dimension breakdowns.
async fn diagnose(
    state: web::Data<AppState>,
    req: web::Json<DiagnoseRequest>,
) -> impl Responder {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4();

    let programs = match state.store.fetch_active_programs().await {
        Ok(programs) => programs,
        Err(e) => {
            tracing::error!("Failed to fetch program snapshot: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch programs".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let result = state.matcher.match_programs(&programs, &req.profile);

    tracing::info!(
        request_id = %request_id,
        analyzed = result.total_analyzed,
        matched = result.all.len(),
        knocked_out = result.knocked_out,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Diagnosis complete"
    );

    HttpResponse::Ok().json(DiagnoseResponse {
        result,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}

/// Extract endpoint
///
/// POST /api/v1/extract
///
/// Runs eligibility extraction over a raw text record; with `save: true`
/// the result is persisted to the program row.
async fn extract(state: web::Data<AppState>, req: web::Json<ExtractRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let extraction = extraction::extract_program(&req.raw);

    let saved = if req.save {
        match state.store.save_extraction(&req.program_id, &extraction).await {
            Ok(()) => true,
            Err(ProgramStoreError::NotFound(id)) => {
                return HttpResponse::NotFound().json(ErrorResponse {
                    error: "Program not found".to_string(),
                    message: id,
                    status_code: 404,
                });
            }
            Err(e) => {
                tracing::error!("Failed to save extraction for {}: {}", req.program_id, e);
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to save extraction".to_string(),
                    message: e.to_string(),
                    status_code: 500,
                });
            }
        }
    } else {
        false
    };

    HttpResponse::Ok().json(ExtractResponse {
        program_id: req.program_id.clone(),
        extraction,
        saved,
    })
}
