//! Smoke tests for the product-search and vehicle-lookup flows.
//!
//! External services are pointed at an unroutable local port, so every
//! upstream call fails fast and the deterministic fallback paths are what
//! these tests observe.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use camber::config::Config;
use camber::state::SharedState;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path =
        std::env::temp_dir().join(format!("camber-search-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.server.secure_cookies = false;
    config.vehicle_data.base_url = "http://127.0.0.1:9".to_string();
    config.recommender.base_url = "http://127.0.0.1:9".to_string();

    let state = Arc::new(
        SharedState::new(config)
            .await
            .expect("failed to create app state"),
    );

    camber::api::router(state).await
}

fn search_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/products/search")
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_product_search_serves_exact_fallback_results() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "vehicleType": "car",
        "year": "2018",
        "make": "Toyota",
        "model": "Camry",
        "mileage": "60000",
        "partSearch": "brake pads"
    });

    let response = app.clone().oneshot(search_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let results: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let results = results.as_array().unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["name"], "Premium brake pads for 2018 Toyota Camry");
    assert_eq!(results[1]["name"], "OEM Replacement brake pads");
    assert_eq!(results[2]["name"], "Economy brake pads Kit");
    assert_eq!(results[0]["conditionRating"].as_i64().unwrap(), 85);
    assert_eq!(results[1]["conditionRating"].as_i64().unwrap(), 92);
    assert_eq!(results[2]["conditionRating"].as_i64().unwrap(), 78);
    assert_eq!(results[0]["estimatedPrice"], "$79.99");
    assert_eq!(results[1]["estimatedPrice"], "$129.99");
    assert_eq!(results[2]["estimatedPrice"], "$59.99");

    for result in results {
        assert!(!result["id"].as_str().unwrap().is_empty());
        assert!(!result["description"].as_str().unwrap().is_empty());
        assert!(
            result["imageUrl"]
                .as_str()
                .unwrap()
                .starts_with("https://images.unsplash.com/")
        );
        let rating = result["conditionRating"].as_i64().unwrap();
        assert!((0..=100).contains(&rating));
    }
}

#[tokio::test]
async fn test_product_search_fallback_is_reproducible() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "vehicleType": "truck",
        "year": "2015",
        "make": "Ford",
        "model": "F-150",
        "mileage": "120000",
        "partSearch": "alternator"
    });

    let first = app.clone().oneshot(search_request(&body)).await.unwrap();
    let second = app.clone().oneshot(search_request(&body)).await.unwrap();

    let first_bytes = first.into_body().collect().await.unwrap().to_bytes();
    let second_bytes = second.into_body().collect().await.unwrap().to_bytes();

    assert_eq!(first_bytes, second_bytes);
}

#[tokio::test]
async fn test_product_search_validates_required_fields() {
    let app = spawn_app().await;

    // mileage is the only optional field
    let body = serde_json::json!({
        "vehicleType": "car",
        "year": "2018",
        "make": "Toyota",
        "model": "Camry",
        "partSearch": "wiper blades"
    });
    let response = app.clone().oneshot(search_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({
        "vehicleType": "car",
        "year": "2018",
        "make": "Toyota",
        "model": "Camry",
        "mileage": "60000"
    });
    let response = app.clone().oneshot(search_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(error["error"].as_str().unwrap().contains("partSearch"));
}

#[tokio::test]
async fn test_last_search_blob_readback_through_session() {
    let app = spawn_app().await;

    // Nothing recorded yet
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/products/last-search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = serde_json::json!({
        "vehicleType": "motorcycle",
        "year": "2021",
        "make": "Honda",
        "model": "CB500F",
        "mileage": "9000",
        "partSearch": "chain kit"
    });
    let response = app.clone().oneshot(search_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("search should establish a session")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/products/last-search")
                .header("Cookie", cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let blob: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(blob["type"], "motorcycle");
    assert_eq!(blob["year"], "2021");
    assert_eq!(blob["make"], "Honda");
    assert_eq!(blob["model"], "CB500F");
    assert_eq!(blob["mileage"], "9000 miles");
}

#[tokio::test]
async fn test_vehicle_makes_fallback_list() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vehicle/makes?vehicleType=car&year=2018")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let makes: Vec<String> = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        makes,
        vec![
            "Toyota",
            "Honda",
            "Ford",
            "Chevrolet",
            "BMW",
            "Mercedes-Benz",
            "Audi",
            "Nissan"
        ]
    );

    // Missing params are a validation error, not a fallback
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vehicle/makes?vehicleType=car")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_vehicle_models_fallback_lists() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vehicle/models?vehicleType=car&year=2018&make=Toyota")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let models: Vec<String> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(models, vec!["Camry", "Corolla", "RAV4", "Highlander", "Tacoma"]);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/vehicle/models?vehicleType=car&year=2018&make=Peugeot")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let models: Vec<String> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        models,
        vec!["Model 1", "Model 2", "Model 3", "Model 4", "Model 5"]
    );
}
