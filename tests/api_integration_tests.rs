// API Integration Tests
//
// Purpose: Exercise every endpoint through the router with fake classifier
// and weather services (no network).
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use crop_diagnosis::auth::TokenRegistry;
    use crop_diagnosis::clients::{Classification, ClientError, DiseaseClassifier, WeatherProvider};
    use crop_diagnosis::{create_router, AppState, KnowledgeBase, PredictionCandidate, WeatherReport};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt; // for oneshot

    const TOKEN: &str = "test-token";
    const BOUNDARY: &str = "----crop-diagnosis-test";

    struct FakeClassifier {
        candidates: Vec<PredictionCandidate>,
        fail: bool,
    }

    #[async_trait]
    impl DiseaseClassifier for FakeClassifier {
        async fn classify(&self, _image: Vec<u8>) -> Result<Classification, ClientError> {
            if self.fail {
                return Err(ClientError::Status {
                    service: "Roboflow API",
                    status: 500,
                    body: "model offline".to_string(),
                });
            }
            let raw = serde_json::json!({
                "predictions": self.candidates.iter()
                    .map(|c| serde_json::json!({"class": c.label, "confidence": c.confidence}))
                    .collect::<Vec<_>>()
            });
            Ok(Classification { candidates: self.candidates.clone(), raw })
        }
    }

    #[derive(Default)]
    struct FakeWeather {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for FakeWeather {
        async fn current(&self, _lat: f64, _lon: f64) -> Result<WeatherReport, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherReport {
                description: "clear sky".to_string(),
                temperature_celsius: Some(24.5),
            })
        }
    }

    // Helper: Create test app state
    fn create_state(candidates: Vec<PredictionCandidate>, fail: bool) -> (AppState, Arc<FakeWeather>) {
        let weather = Arc::new(FakeWeather::default());
        let tokens = TokenRegistry::new(HashMap::from([(TOKEN.to_string(), "farmer@example.com".to_string())]));
        let state = AppState::with_services(
            Arc::new(KnowledgeBase::builtin()),
            Arc::new(FakeClassifier { candidates, fail }),
            weather.clone(),
            tokens,
        );
        (state, weather)
    }

    fn create_test_app(candidates: Vec<PredictionCandidate>) -> axum::Router {
        create_router(create_state(candidates, false).0)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // Helper: Build a multipart body from (name, value) text fields and an optional image
    fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = image {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"leaf.jpg\"\r\n\
                     Content-Type: image/jpeg\r\n\r\n",
                    BOUNDARY
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY));
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn wheat_rust() -> Vec<PredictionCandidate> {
        vec![PredictionCandidate::new("Wheat Rust", 0.82)]
    }

    // =========================================================================
    // Section 1: Health + Banner
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app(vec![]);
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_index_banner() {
        let app = create_test_app(vec![]);
        let body = json_response(app.oneshot(get("/")).await.unwrap()).await;
        assert_eq!(body["message"], "Crop Disease Detection API");
        assert!(body["version"].is_string());
    }

    // =========================================================================
    // Section 2: Analyze
    // =========================================================================

    #[tokio::test]
    async fn test_analyze_requires_token() {
        let app = create_test_app(wheat_rust());
        let body = multipart_body(&[("lat", "-1.28"), ("lon", "36.82")], Some(b"jpeg"));

        let response = app.clone().oneshot(upload_request("/analyze", None, body.clone())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.oneshot(upload_request("/analyze", Some("nope"), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_rejects_incomplete_uploads() {
        let app = create_test_app(wheat_rust());

        let cases = [
            multipart_body(&[("lat", "-1.28"), ("lon", "36.82")], None),
            multipart_body(&[("lat", "-1.28")], Some(b"jpeg")),
            multipart_body(&[("lat", "north"), ("lon", "36.82")], Some(b"jpeg")),
            multipart_body(&[("lat", "-1.28"), ("lon", "200")], Some(b"jpeg")),
        ];
        for body in cases {
            let response = app.clone().oneshot(upload_request("/analyze", Some(TOKEN), body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_analyze_verified_report() {
        let (state, weather) = create_state(wheat_rust(), false);
        let app = create_router(state);

        for _ in 0..2 {
            let body = multipart_body(&[("lat", "-1.28"), ("lon", "36.82")], Some(b"jpeg"));
            let response = app.clone().oneshot(upload_request("/analyze", Some(TOKEN), body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let report = json_response(response).await;
            assert_eq!(report["user"], "farmer@example.com");
            assert_eq!(report["location"], "-1.28,36.82");
            assert_eq!(report["recommendation"], "Suitable for planting");
            assert_eq!(report["weather"], "clear sky");
            assert_eq!(report["temperature_celsius"], 24.5);
            assert_eq!(report["diseaseName"], "Wheat Rust");
            assert_eq!(report["cropEnglishName"], "Wheat");
            assert_eq!(report["verified"], true);
            assert!(report.get("warning").is_none());
            assert!(!report["prevention"].as_array().unwrap().is_empty());
        }

        // second request served from the weather cache
        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_unverified_carries_warning() {
        let app = create_test_app(vec![PredictionCandidate::new("tomato_something_unknown", 0.9)]);
        let body = multipart_body(&[("lat", "10"), ("lon", "10")], Some(b"jpeg"));

        let report = json_response(app.oneshot(upload_request("/analyze", Some(TOKEN), body)).await.unwrap()).await;
        assert_eq!(report["verified"], false);
        assert_eq!(report["cropEnglishName"], "Tomato");
        assert!(report["warning"].as_str().unwrap().contains("agricultural officer"));
    }

    #[tokio::test]
    async fn test_analyze_classifier_failure_is_bad_gateway() {
        let app = create_router(create_state(vec![], true).0);
        let body = multipart_body(&[("lat", "10"), ("lon", "10")], Some(b"jpeg"));

        let response = app.oneshot(upload_request("/analyze", Some(TOKEN), body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_response(response).await;
        assert_eq!(body["error"], "Roboflow API HTTP Error: 500 - model offline");
    }

    // =========================================================================
    // Section 3: Debug route
    // =========================================================================

    #[tokio::test]
    async fn test_debug_route_disabled_by_default() {
        let app = create_test_app(wheat_rust());
        let body = multipart_body(&[], Some(b"jpeg"));
        let response = app.oneshot(upload_request("/debug/test-disease", None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_debug_route_returns_raw_and_processed() {
        let state = create_state(wheat_rust(), false).0.with_debug_routes(true);
        let app = create_router(state);
        let body = multipart_body(&[], Some(b"jpeg"));

        let response = app.oneshot(upload_request("/debug/test-disease", None, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["raw_classifier_response"]["predictions"][0]["class"], "Wheat Rust");
        assert_eq!(body["processed_result"]["record"]["key"], "wheat_rust");
        assert_eq!(body["processed_result"]["verified"], true);
    }

    // =========================================================================
    // Section 4: Knowledge base endpoints
    // =========================================================================

    #[tokio::test]
    async fn test_list_and_get_diseases() {
        let app = create_test_app(vec![]);

        let body = json_response(app.clone().oneshot(get("/api/diseases")).await.unwrap()).await;
        assert_eq!(body["rows"], 23);
        assert_eq!(body["data"][0]["key"], "corn_leaf_blight");

        let response = app.clone().oneshot(get("/api/diseases/WHEAT_RUST")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_response(response).await["crop_scientific_name"], "Triticum aestivum");

        let response = app.oneshot(get("/api/diseases/not_a_disease")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resolve_endpoint() {
        let app = create_test_app(vec![]);

        let body = json_response(app.clone().oneshot(get("/api/diseases/resolve?label=Corn_Blight")).await.unwrap()).await;
        assert_eq!(body["record"]["key"], "corn_leaf_blight");
        assert_eq!(body["matched_by"], "alias");

        // cached response is identical
        let again = json_response(app.clone().oneshot(get("/api/diseases/resolve?label=corn-blight")).await.unwrap()).await;
        assert_eq!(again, body);

        let body = json_response(app.oneshot(get("/api/diseases/resolve")).await.unwrap()).await;
        assert_eq!(body["matched_by"], "fallback");
        assert_eq!(body["record"]["crop_common_name"], "Unknown Crop");
    }

    #[tokio::test]
    async fn test_batch_resolve() {
        let app = create_test_app(vec![]);
        let req = json_request(
            "/api/diseases/resolve/batch",
            serde_json::json!({"labels": ["wheat_rust", "Rice Blast", "xyzabc123", "onion_purple_blotch"]}),
        );

        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["rows"], 4);
        assert_eq!(body["unresolved"], 1);
        assert_eq!(body["data"][0]["matched_by"], "exact_key");
        assert_eq!(body["data"][1]["record"]["key"], "rice_leaf_blast");
        assert_eq!(body["data"][2]["matched_by"], "fallback");
        assert_eq!(body["data"][3]["record"]["crop_common_name"], "Onion");

        let too_many: Vec<String> = (0..1_001).map(|i| format!("label_{}", i)).collect();
        let req = json_request("/api/diseases/resolve/batch", serde_json::json!({ "labels": too_many }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validate_endpoint() {
        let app = create_test_app(vec![]);

        let req = json_request("/api/diseases/validate", serde_json::json!({"label": "Sigatoka", "confidence": 0.45}));
        let body = json_response(app.clone().oneshot(req).await.unwrap()).await;
        assert_eq!(body["is_valid"], true);
        assert_eq!(body["trust_level"], "valid_low_confidence");

        let req = json_request("/api/diseases/validate", serde_json::json!({"label": "Sigatoka", "confidence": 0.2}));
        let body = json_response(app.oneshot(req).await.unwrap()).await;
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["reason"], "Confidence too low (< 30%)");
    }

    #[tokio::test]
    async fn test_diagnose_endpoint() {
        let app = create_test_app(vec![]);

        let req = json_request(
            "/api/diagnose",
            serde_json::json!({"candidates": [
                {"label": "mystery", "confidence": 0.9},
                {"label": "bean_rust", "confidence": 0.7}
            ]}),
        );
        let body = json_response(app.clone().oneshot(req).await.unwrap()).await;
        assert_eq!(body["candidate_label"], "bean_rust");
        assert_eq!(body["verified"], true);
        assert_eq!(body["matched_by"], "exact_key");

        let req = json_request("/api/diagnose", serde_json::json!({"candidates": []}));
        let body = json_response(app.oneshot(req).await.unwrap()).await;
        assert_eq!(body["candidate_label"], "Unknown Disease");
        assert_eq!(body["details"], "No predictions from model.");
    }
}
