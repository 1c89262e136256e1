// Integration tests for the SWOT engine and HTTP routes

use actix_web::{http::header::ContentType, http::StatusCode, test, web, App};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::Arc;
use swot_engine::core::{
    predictor::{FittedPredictor, NEUTRAL_PROBABILITY},
    ForestParams, SwotEngine, TrainingParams,
};
use swot_engine::models::{Category, Metric, StartupInput};
use swot_engine::routes::{self, analysis::MISSING_FIELDS, AppState};
use swot_engine::services::ResultCache;

fn test_params() -> TrainingParams {
    TrainingParams {
        forest: ForestParams {
            n_trees: 20,
            ..ForestParams::default()
        },
        ..TrainingParams::default()
    }
}

static ENGINE: Lazy<SwotEngine> =
    Lazy::new(|| SwotEngine::new(&test_params()).expect("engine should train"));

fn fintech() -> StartupInput {
    StartupInput::new("FinTech", "US", "SMB", "B2B payments")
}

fn app_state() -> AppState {
    AppState {
        engine: ENGINE.clone(),
        cache: Arc::new(ResultCache::new(100, 60)),
    }
}

#[::core::prelude::v1::test]
fn test_integration_fintech_scenario() {
    let result = ENGINE.analyze(&fintech());

    assert_eq!(result.overall_score, 8.5);
    assert_eq!(result.component_scores.strengths, 47.0);
    assert_eq!(result.component_scores.weaknesses, 33.8);
    assert_eq!(result.component_scores.opportunities, 35.0);
    assert_eq!(result.component_scores.threats, 46.7);
    assert!((0.0..=100.0).contains(&result.success_probability));
    assert_eq!(result.recommendations.len(), 4);
}

#[::core::prelude::v1::test]
fn test_integration_repeated_runs_are_identical() {
    let first = ENGINE.analyze(&fintech());
    for _ in 0..5 {
        assert_eq!(ENGINE.analyze(&fintech()), first);
    }
}

#[::core::prelude::v1::test]
fn test_integration_independent_engines_agree() {
    // Two separately trained engines stand in for two process starts
    let params = TrainingParams {
        samples: 300,
        forest: ForestParams {
            n_trees: 10,
            ..ForestParams::default()
        },
        ..TrainingParams::default()
    };
    let a = SwotEngine::new(&params).unwrap();
    let b = SwotEngine::new(&params).unwrap();

    assert_eq!(a.predictor(), b.predictor());
    assert_eq!(a.analyze(&fintech()), b.analyze(&fintech()));
}

#[::core::prelude::v1::test]
fn test_integration_empty_input_uses_defaults() {
    let result = ENGINE.analyze(&StartupInput::default());
    let explicit = ENGINE.analyze(&StartupInput::new("SaaS", "US", "", ""));

    assert_eq!(result, explicit);
    assert_eq!(result.overall_score, 6.7);
    assert!((0.0..=100.0).contains(&result.success_probability));
    for category in Category::ALL {
        assert!((2..=4).contains(&result.swot_analysis.get(category).len()));
    }
    assert_eq!(
        result.swot_analysis.threats[0],
        "Intense competition from established players"
    );
}

#[::core::prelude::v1::test]
fn test_integration_unknown_industry() {
    let input = StartupInput::new("Underwater Basket Weaving", "Mars", "", "");
    let features = ENGINE.predictor().features(&input);
    assert_eq!(features[0], 0.0);
    assert_eq!(features[1], 0.0);

    let result = ENGINE.analyze(&input);
    assert!((0.0..=100.0).contains(&result.success_probability));
    assert_eq!(result.overall_score, 0.0);
}

#[::core::prelude::v1::test]
fn test_integration_model_quality() {
    let report = ENGINE.predictor().report();
    assert_eq!(report.training_samples, 800);
    assert_eq!(report.validation_samples, 200);
    // The label is a smooth function of the features, so the forest should explain most of it
    assert!(report.r2.unwrap() > 0.5, "r2 = {:?}", report.r2);
}

#[::core::prelude::v1::test]
fn test_integration_result_serializes_to_contract() {
    let value = serde_json::to_value(ENGINE.analyze(&fintech())).unwrap();

    for field in [
        "overall_score",
        "success_probability",
        "component_scores",
        "swot_analysis",
        "metrics",
        "recommendations",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    for metric in Metric::ALL {
        assert!(value["metrics"][metric.name()].is_number());
    }
    for category in ["strengths", "weaknesses", "opportunities", "threats"] {
        assert!(value["component_scores"][category].is_number());
        assert!(value["swot_analysis"][category].is_array());
    }
}

#[::core::prelude::v1::test]
fn test_integration_broken_predictor_degrades_to_neutral() {
    let trained = ENGINE.predictor();
    let broken = FittedPredictor::from_parts(
        trained.encoders().clone(),
        Default::default(),
        trained.forest().clone(),
        *trained.report(),
    );
    let engine = SwotEngine::from_predictor(broken);

    let result = engine.analyze(&fintech());
    assert_eq!(result.success_probability, NEUTRAL_PROBABILITY);
    assert_eq!(result.overall_score, 8.5);
}

#[actix_web::test]
async fn test_integration_swot_analysis_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/swot-analysis")
        .set_json(json!({
            "industry": "FinTech",
            "location": "US",
            "audience": "SMB",
            "description": "B2B payments"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["overall_score"], json!(8.5));
    assert_eq!(body["analysis_method"], "ml_model");
    assert_eq!(body["metadata"]["analysisType"], "comprehensive_swot_analysis");
    assert_eq!(body["metadata"]["industry"], "FinTech");
    assert_eq!(body["metadata"]["cacheKey"].as_str().unwrap().len(), 32);
    assert!(body["recommendations"].as_array().unwrap().len() <= 5);
}

#[actix_web::test]
async fn test_integration_results_are_cached() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let payload = json!({"industry": "EdTech", "location": "Asia", "audience": "Students"});

    let first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/swot-analysis").set_json(&payload).to_request(),
    )
    .await;
    let second: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/swot-analysis").set_json(&payload).to_request(),
    )
    .await;
    assert_eq!(first["metadata"]["analysisId"], second["metadata"]["analysisId"]);

    let mut fresh_payload = payload.clone();
    fresh_payload["forceFresh"] = json!(true);
    let fresh: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/api/v1/swot-analysis").set_json(&fresh_payload).to_request(),
    )
    .await;
    assert_ne!(first["metadata"]["analysisId"], fresh["metadata"]["analysisId"]);
    assert_eq!(first["overall_score"], fresh["overall_score"]);
    assert_eq!(first["success_probability"], fresh["success_probability"]);

    let health: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/health").to_request(),
    )
    .await;
    assert_eq!(health["status"], "operational");
    assert_eq!(health["service"], "swot-analysis");
    assert_eq!(health["cacheSize"], json!(1));
    assert_eq!(health["cacheTtlSecs"], json!(60));
    assert_eq!(health["model"]["trees"], json!(20));
}

#[actix_web::test]
async fn test_integration_rejects_missing_fields() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/swot-analysis")
        .set_json(json!({"industry": "FinTech", "location": "US", "audience": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], json!(400));
    assert_eq!(body["error"], MISSING_FIELDS);
}

#[actix_web::test]
async fn test_integration_absent_and_non_object_bodies_get_missing_fields() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    for payload in [
        json!({"industry": "FinTech", "location": "US"}),
        json!(["FinTech", "US", "SMB"]),
        json!("FinTech"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/swot-analysis")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {payload}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], MISSING_FIELDS, "payload {payload}");
    }
}

#[actix_web::test]
async fn test_integration_rejects_malformed_json() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state()))
            .app_data(routes::json_config())
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/swot-analysis")
        .insert_header(ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}
