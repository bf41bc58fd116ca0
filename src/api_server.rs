// Axum API Server Module
//
// Purpose: REST API over the disease knowledge base (validate/resolve/diagnose)
// plus the image analysis endpoint combining classifier + weather lookups.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::analysis::AnalysisReport;
use crate::auth::{CallerIdentity, TokenRegistry};
use crate::clients::{AgroMonitoringClient, ClientError, DiseaseClassifier, RoboflowClassifier, WeatherProvider};
use crate::config::ServiceConfig;
use crate::diagnosis::{DiagnosisEngine, PredictionCandidate};
use crate::knowledge_base::KnowledgeBase;
use crate::resolver::{DiseaseResolver, Resolution};
use crate::utils::normalize_label;
use crate::validator::PredictionValidator;
use crate::weather::WeatherReport;

/// Upload limit for analyze/debug requests
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Labels accepted by one batch resolve request
const MAX_BATCH_LABELS: usize = 1_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub kb: Arc<KnowledgeBase>,
    pub classifier: Arc<dyn DiseaseClassifier>,
    pub weather: Arc<dyn WeatherProvider>,
    pub tokens: Arc<TokenRegistry>,
    /// Resolve responses keyed by normalized label
    pub cache: Cache<String, serde_json::Value>,
    /// Weather keyed by coordinates rounded to 2 decimals
    pub weather_cache: Cache<String, WeatherReport>,
    pub enable_debug_routes: bool,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let kb = match &config.knowledge_base_path {
            Some(path) => {
                tracing::info!("Loading knowledge base from {}...", path.display());
                KnowledgeBase::from_json_file(path)
                    .with_context(|| format!("Failed to load knowledge base {}", path.display()))?
            }
            None => {
                tracing::info!("Using embedded knowledge base...");
                KnowledgeBase::builtin()
            }
        };
        tracing::info!("Knowledge base ready ({} diseases, {} crop keywords)", kb.len(), kb.crop_keywords().len());

        tracing::info!("Initializing classifier client...");
        let classifier = RoboflowClassifier::new(&config.classifier).context("Failed to build classifier client")?;

        tracing::info!("Initializing weather client...");
        let weather = AgroMonitoringClient::new(&config.weather).context("Failed to build weather client")?;

        let state = Self::with_services(
            Arc::new(kb),
            Arc::new(classifier),
            Arc::new(weather),
            TokenRegistry::new(config.api_tokens.clone()),
        )
        .with_debug_routes(config.enable_debug_routes);

        Ok(state)
    }

    /// Assemble state from already-built collaborators
    pub fn with_services(
        kb: Arc<KnowledgeBase>,
        classifier: Arc<dyn DiseaseClassifier>,
        weather: Arc<dyn WeatherProvider>,
        tokens: TokenRegistry,
    ) -> Self {
        tracing::info!("Initializing Moka caches...");
        let cache = Cache::builder()
            .max_capacity(10_000) // 10K entries
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();
        let weather_cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(600)) // 10 min TTL
            .build();

        Self {
            kb,
            classifier,
            weather,
            tokens: Arc::new(tokens),
            cache,
            weather_cache,
            enable_debug_routes: false,
        }
    }

    pub fn with_debug_routes(mut self, enabled: bool) -> Self {
        self.enable_debug_routes = enabled;
        self
    }

    /// Weather at (lat, lon), served from cache within the TTL
    async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherReport, ClientError> {
        let key = format!("{:.2},{:.2}", lat, lon);
        if let Some(cached) = self.weather_cache.get(&key).await {
            tracing::debug!("Weather cache hit: {}", key);
            return Ok(cached);
        }

        let report = self.weather.current(lat, lon).await?;
        self.weather_cache.insert(key, report.clone()).await;
        Ok(report)
    }
}

// ============================================================================
// Router Setup
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        // Knowledge base endpoints
        // resolve routes are registered before :key so they are not captured by it
        .route("/api/diseases", get(list_diseases))
        .route("/api/diseases/resolve", get(resolve_label))
        .route("/api/diseases/resolve/batch", post(resolve_batch))
        .route("/api/diseases/validate", post(validate_prediction))
        .route("/api/diseases/:key", get(get_disease))
        .route("/api/diagnose", post(diagnose_candidates));

    if state.enable_debug_routes {
        tracing::warn!("Debug routes enabled: /debug/test-disease");
        router = router.route("/debug/test-disease", post(debug_test_disease));
    }

    router
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Crop Disease Detection API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Image + coordinates -> diagnosis, weather and planting advice
async fn analyze(
    State(state): State<AppState>,
    CallerIdentity(user): CallerIdentity,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let upload = AnalyzeUpload::read(multipart).await?;

    let image = upload.image.ok_or_else(|| AppError::BadRequest("Missing image file".to_string()))?;
    let (lat_raw, lon_raw) = match (upload.lat, upload.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(AppError::BadRequest("Missing lat/lon".to_string())),
    };
    let lat = parse_coordinate(&lat_raw, "lat", 90.0)?;
    let lon = parse_coordinate(&lon_raw, "lon", 180.0)?;

    tracing::info!("Analyze request from {} at {},{} ({} bytes)", user, lat_raw, lon_raw, image.len());
    let start = std::time::Instant::now();

    let weather = state.current_weather(lat, lon).await?;
    let classification = state.classifier.classify(image).await?;
    let diagnosis = DiagnosisEngine::new(&state.kb).diagnose(&classification.candidates);

    tracing::info!(
        "Analysis for {} complete in {:?}: {} (verified: {})",
        user,
        start.elapsed(),
        diagnosis.candidate_label,
        diagnosis.verified
    );

    Ok(Json(AnalysisReport::build(&user, &lat_raw, &lon_raw, weather, diagnosis)))
}

/// Raw classifier output next to the processed diagnosis
async fn debug_test_disease(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let upload = AnalyzeUpload::read(multipart).await?;
    let image = upload.image.ok_or_else(|| AppError::BadRequest("Missing image file".to_string()))?;

    let classification = state.classifier.classify(image).await?;
    let diagnosis = DiagnosisEngine::new(&state.kb).diagnose(&classification.candidates);

    Ok(Json(serde_json::json!({
        "raw_classifier_response": classification.raw,
        "processed_result": diagnosis,
    })))
}

async fn list_diseases(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "rows": state.kb.len(),
        "data": state.kb.diseases(),
    }))
}

async fn get_disease(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state
        .kb
        .get(&normalize_label(&key))
        .ok_or_else(|| AppError::NotFound(format!("Disease {} not found", key)))?;

    Ok(Json(serde_json::to_value(record).map_err(|e| AppError::Internal(e.to_string()))?))
}

#[derive(Deserialize, Debug)]
struct ResolveQuery {
    label: Option<String>,
}

async fn resolve_label(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = format!("resolve:{}", params.label.as_deref().map(normalize_label).unwrap_or_default());
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit: {}", cache_key);
        return Ok(Json(cached));
    }

    let resolution = DiseaseResolver::new(&state.kb).resolve(params.label.as_deref());
    let body = serde_json::to_value(&resolution).map_err(|e| AppError::Internal(e.to_string()))?;
    state.cache.insert(cache_key, body.clone()).await;

    Ok(Json(body))
}

#[derive(Deserialize, Debug)]
struct BatchResolveRequest {
    labels: Vec<String>,
}

/// Resolve many labels at once
///
/// Matching is CPU-bound, so the batch runs on rayon inside `spawn_blocking`
/// rather than on the async workers.
async fn resolve_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchResolveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    use rayon::prelude::*;

    if req.labels.len() > MAX_BATCH_LABELS {
        return Err(AppError::BadRequest(format!(
            "Too many labels: {} (max {})",
            req.labels.len(),
            MAX_BATCH_LABELS
        )));
    }

    let start = std::time::Instant::now();
    let count = req.labels.len();
    let kb = Arc::clone(&state.kb);

    let results: Vec<Resolution<'static>> = tokio::task::spawn_blocking(move || {
        let resolver = DiseaseResolver::new(&kb);
        req.labels
            .par_iter()
            .map(|label| resolver.resolve_label(label).into_owned())
            .collect()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Rayon task failed: {}", e)))?;

    let unresolved = results.iter().filter(|r| r.is_fallback()).count();
    tracing::info!("Batch resolve of {} labels in {:?} ({} unresolved)", count, start.elapsed(), unresolved);

    Ok(Json(serde_json::json!({
        "rows": results.len(),
        "unresolved": unresolved,
        "data": results,
        "query_time_us": start.elapsed().as_micros(),
    })))
}

#[derive(Deserialize, Debug)]
struct ValidateRequest {
    label: String,
    confidence: f64,
}

async fn validate_prediction(
    State(state): State<AppState>,
    Json(req): Json<ValidateRequest>,
) -> impl IntoResponse {
    Json(PredictionValidator::new(&state.kb).validate(&req.label, req.confidence))
}

#[derive(Deserialize, Debug)]
struct DiagnoseRequest {
    #[serde(default)]
    candidates: Vec<PredictionCandidate>,
}

async fn diagnose_candidates(
    State(state): State<AppState>,
    Json(req): Json<DiagnoseRequest>,
) -> impl IntoResponse {
    Json(DiagnosisEngine::new(&state.kb).diagnose(&req.candidates))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Fields of an analyze/debug multipart upload
#[derive(Default)]
struct AnalyzeUpload {
    image: Option<Vec<u8>>,
    lat: Option<String>,
    lon: Option<String>,
}

impl AnalyzeUpload {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut upload = AnalyzeUpload::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                    if !bytes.is_empty() {
                        upload.image = Some(bytes.to_vec());
                    }
                }
                "lat" | "lon" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        if name == "lat" {
                            upload.lat = Some(text);
                        } else {
                            upload.lon = Some(text);
                        }
                    }
                }
                other => tracing::debug!("Ignoring multipart field '{}'", other),
            }
        }

        Ok(upload)
    }
}

fn parse_coordinate(raw: &str, name: &str, limit: f64) -> Result<f64, AppError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(AppError::BadRequest(format!("Invalid {}: {}", name, raw))),
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        tracing::error!("Upstream call failed: {}", err);
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
