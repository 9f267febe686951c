//! End-to-end tests against a real PostgreSQL database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p web -- --ignored

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::{Value, json};
use storage::Database;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let db = Database::new(&url, 5).await.expect("pool creation failed");
    db.run_migrations().await.expect("migrations failed");
    web::app(db)
}

/// Short random name that fits every name column
fn unique_name() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn unique_national_id() -> String {
    format!("{:011}", Uuid::new_v4().as_u128() % 100_000_000_000)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a category and a training center, returning their names
async fn seed_references(app: &Router) -> (String, String) {
    let category = unique_name();
    let response = send(app, "POST", "/categoria", Some(json!({ "nome": category }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let center = unique_name();
    let response = send(
        app,
        "POST",
        "/centros_treinamento",
        Some(json!({ "nome": center, "endereco": "Rua X, Q02", "proprietario": "Marcos" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    (category, center)
}

fn athlete_payload(name: &str, national_id: &str, category: &str, center: &str) -> Value {
    json!({
        "nome": name,
        "cpf": national_id,
        "idade": 25,
        "peso": 75.5,
        "altura": 1.70,
        "sexo": "M",
        "categoria": { "nome": category },
        "centros_treinamento": { "nome": center }
    })
}

#[tokio::test]
#[ignore = "requires database"]
async fn category_duplicate_name_conflicts() {
    let app = test_app().await;
    let name = unique_name();

    let response = send(&app, "POST", "/categoria", Some(json!({ "nome": name }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["nome"], name.as_str());

    let response = send(&app, "POST", "/categoria", Some(json!({ "nome": name }))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains(&name));

    let response = send(&app, "GET", "/categoria", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let categories = body_json(response).await;
    let matching = categories
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["nome"] == name.as_str())
        .count();
    assert_eq!(matching, 1);

    let uri = format!("/categoria/{}", created["id"].as_str().unwrap());
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_category_and_center_are_not_found() {
    let app = test_app().await;

    let uri = format!("/categoria/{}", Uuid::new_v4());
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let uri = format!("/centros_treinamento/{}", Uuid::new_v4());
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn training_center_duplicate_name_conflicts() {
    let app = test_app().await;
    let payload = json!({ "nome": unique_name(), "endereco": "Rua X", "proprietario": "Ana" });

    let response = send(&app, "POST", "/centros_treinamento", Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["endereco"], "Rua X");
    assert_eq!(created["proprietario"], "Ana");

    let response = send(&app, "POST", "/centros_treinamento", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
#[ignore = "requires database"]
async fn athlete_lifecycle() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;
    let national_id = unique_national_id();

    let response = send(
        &app,
        "POST",
        "/atletas",
        Some(athlete_payload("Joao", &national_id, &category, &center)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["categoria"]["nome"], category.as_str());
    assert_eq!(created["centros_treinamento"]["nome"], center.as_str());
    assert!(created["created_at"].is_string());

    let uri = format!("/atletas/{}", created["id"].as_str().unwrap());
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = send(&app, "PATCH", &uri, Some(json!({ "idade": 30 }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["idade"], 30);
    assert_eq!(updated["nome"], created["nome"]);
    assert_eq!(updated["peso"], created["peso"]);
    assert_eq!(updated["altura"], created["altura"]);

    let response = send(&app, "PATCH", &uri, Some(json!({ "peso": 82.5 }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["peso"], 82.5);
    assert_eq!(updated["idade"], 30);
    assert_eq!(updated["cpf"], national_id.as_str());

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn athlete_ids_are_fresh() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;

    let mut ids = std::collections::HashSet::new();
    for _ in 0..3 {
        let response = send(
            &app,
            "POST",
            "/atletas",
            Some(athlete_payload("Maria", &unique_national_id(), &category, &center)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let id = body_json(response).await["id"].as_str().unwrap().to_string();
        assert!(ids.insert(id));
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn athlete_with_unknown_category_is_rejected() {
    let app = test_app().await;
    let (_, center) = seed_references(&app).await;
    let name = unique_name();

    let response = send(
        &app,
        "POST",
        "/atletas",
        Some(athlete_payload(&name, &unique_national_id(), "Ghost", &center)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains("Ghost"));

    let uri = format!("/atletas?nome={name}");
    let page = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(page["total"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn athlete_with_unknown_center_is_rejected() {
    let app = test_app().await;
    let (category, _) = seed_references(&app).await;

    let response = send(
        &app,
        "POST",
        "/atletas",
        Some(athlete_payload("Joao", &unique_national_id(), &category, "Nowhere")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn athlete_duplicate_national_id_conflicts() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;
    let national_id = unique_national_id();
    let payload = athlete_payload("Joao", &national_id, &category, &center);

    let response = send(&app, "POST", "/atletas", Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app, "POST", "/atletas", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let error = body_json(response).await;
    assert!(error["error"].as_str().unwrap().contains(&national_id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_filters_by_exact_name_in_reduced_view() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;
    let name = unique_name();

    for athlete_name in [name.clone(), name.clone(), format!("{name}x")] {
        let response = send(
            &app,
            "POST",
            "/atletas",
            Some(athlete_payload(&athlete_name, &unique_national_id(), &category, &center)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/atletas?nome={name}");
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["limit"], 50);
    assert_eq!(page["offset"], 0);

    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["nome"], name.as_str());
        assert!(item.get("cpf").is_none());
        assert!(item.get("peso").is_none());
    }

    let uri = format!("/atletas?nome={name}&limit=1&offset=1");
    let page = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_filters_by_national_id() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;
    let national_id = unique_national_id();

    let response = send(
        &app,
        "POST",
        "/atletas",
        Some(athlete_payload("Joao", &national_id, &category, &center)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/atletas?cpf={national_id}");
    let page = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn patch_unknown_athlete_is_not_found() {
    let app = test_app().await;
    let uri = format!("/atletas/{}", Uuid::new_v4());

    let response = send(&app, "PATCH", &uri, Some(json!({ "idade": 30 }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn concurrent_patches_keep_each_others_fields() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;

    let response = send(
        &app,
        "POST",
        "/atletas",
        Some(athlete_payload("Joao", &unique_national_id(), &category, &center)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let uri = format!("/atletas/{}", created["id"].as_str().unwrap());

    for round in 0..20 {
        let name = format!("N{round}");
        let age = 40 + round;

        let (renamed, aged) = tokio::join!(
            send(&app, "PATCH", &uri, Some(json!({ "nome": name }))),
            send(&app, "PATCH", &uri, Some(json!({ "idade": age }))),
        );
        assert_eq!(renamed.status(), StatusCode::OK);
        assert_eq!(aged.status(), StatusCode::OK);

        let current = body_json(send(&app, "GET", &uri, None).await).await;
        assert_eq!(current["nome"], name.as_str(), "round {round}");
        assert_eq!(current["idade"], age, "round {round}");
        assert_eq!(current["peso"], created["peso"]);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_accepts_plural_training_center_key() {
    let app = test_app().await;
    let (category, center) = seed_references(&app).await;

    let payload = json!({
        "nome": "Joao",
        "cpf": unique_national_id(),
        "idade": 28,
        "peso": 80.0,
        "altura": 1.75,
        "sexo": "M",
        "categoria": { "nome": category },
        "centros_treinamento": { "nome": center }
    });
    let response = send(&app, "POST", "/atletas", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["centros_treinamento"]["nome"], center.as_str());
}
