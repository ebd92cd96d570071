use axum::{
    Router,
    routing::{get, post},
    response::IntoResponse,
    http::StatusCode,
    extract::{Path, State, Multipart},
    Json,
};
use catalog::{
    Aggregate, AnalysisReport, DatasetLoader, Entry, FreePaidRatio, LoadError, PeakYear,
};
use crate::models::{CreateSessionResponse, SessionMeta};
use crate::storage::{Session, SessionStore};
use std::io::Cursor;
use std::sync::Arc;
use tracing::{info, debug, warn, error, instrument};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
}

type ApiError = (StatusCode, String);

pub fn create_routes() -> Router {
    let state = AppState {
        store: Arc::new(SessionStore::new()),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_meta).delete(delete_session))
        .route("/sessions/:id/report", get(get_report))
        .route("/sessions/:id/free-paid", get(get_free_paid))
        .route("/sessions/:id/peak-year", get(get_peak_year))
        .route("/sessions/:id/most-expensive", get(get_most_expensive))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[instrument(skip(state, multipart))]
async fn create_session(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateSessionResponse>, ApiError> {
    info!("Received catalog upload");

    let mut file_data = Vec::new();
    let mut filename = String::new();

    while let Some(field) = multipart.next_field().await
        .map_err(|e| {
            error!("Multipart error: {}", e);
            (StatusCode::BAD_REQUEST, format!("Multipart error: {}", e))
        })?
    {
        if field.name() == Some("file") {
            filename = field.file_name().unwrap_or("unknown").to_string();
            info!("Receiving file: {}", filename);

            let data = field.bytes().await
                .map_err(|e| {
                    error!("Failed to read file data: {}", e);
                    (StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
                })?;
            file_data = data.to_vec();
            debug!("File data received: {} bytes", file_data.len());
        }
    }

    if file_data.is_empty() {
        error!("No file data provided in request");
        return Err((StatusCode::BAD_REQUEST, "No file provided".to_string()));
    }

    let report = DatasetLoader::new()
        .load_from_reader(Box::new(Cursor::new(file_data)))
        .map_err(|e| {
            error!("Load error for file '{}': {}", filename, e);
            load_error_response(e)
        })?;

    let rejected_rows = report.rejected_rows();
    let session = state.store.create_session(&filename, report);
    info!(
        "Created session {} with {} entries ({} rows rejected, {} sessions open)",
        session.id,
        session.dataset.len(),
        rejected_rows,
        state.store.len()
    );

    Ok(Json(CreateSessionResponse {
        session_id: session.id.clone(),
        entry_count: session.dataset.len(),
        rejected_rows,
        warnings: session.warnings.clone(),
    }))
}

fn load_error_response(e: LoadError) -> ApiError {
    match e {
        LoadError::MissingColumn(_) | LoadError::Csv(_) => {
            (StatusCode::BAD_REQUEST, format!("Load error: {}", e))
        }
        LoadError::FileAccess { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Load error: {}", e))
        }
    }
}

fn find_session(state: &AppState, session_id: &str) -> Result<Arc<Session>, ApiError> {
    state.store.get_session(session_id).ok_or_else(|| {
        warn!("Session not found: {}", session_id);
        (StatusCode::NOT_FOUND, format!("Session not found: {}", session_id))
    })
}

async fn get_meta(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionMeta>, ApiError> {
    let session = find_session(&state, &session_id)?;
    Ok(Json(SessionMeta::from_session(&session)))
}

#[instrument(skip(state))]
async fn get_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let session = find_session(&state, &session_id)?;
    debug!("Building report over {} entries", session.dataset.len());

    Ok(Json(AnalysisReport::from_entries(
        session.dataset.entries(),
        session.warnings.len(),
    )))
}

async fn get_free_paid(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<FreePaidRatio>, ApiError> {
    let session = find_session(&state, &session_id)?;
    Ok(Json(catalog::free_paid_ratio(session.dataset.entries())))
}

async fn get_peak_year(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Aggregate<PeakYear>>, ApiError> {
    let session = find_session(&state, &session_id)?;
    Ok(Json(catalog::peak_release_year(session.dataset.entries())))
}

async fn get_most_expensive(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Aggregate<Entry>>, ApiError> {
    let session = find_session(&state, &session_id)?;
    Ok(Json(
        catalog::most_expensive(session.dataset.entries()).map(Entry::clone),
    ))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_session(&session_id) {
        info!("Deleted session {}", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("Session not found: {}", session_id)))
    }
}
