use std::net::SocketAddr;

use jsonwebtoken::{encode, EncodingKey, Header};
use migration::MigratorTrait;
use reqwest::StatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

const SECRET: &str = "test-secret";

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

/// Serve the real router on an ephemeral port over a fresh in-memory database.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;

    let mut cfg = configs::AppConfig::default();
    cfg.auth.jwt_secret = SECRET.into();
    let state = server::build_state(db, &cfg)?;
    let app = server::routes::build_router(state, cors());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()), client: reqwest::Client::new() })
}

fn admin_token() -> String {
    let exp = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_secs() + 600;
    encode(&Header::default(), &json!({"sub": "admin", "exp": exp}), &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
    let method = reqwest::Method::from_bytes(method.as_bytes())?;
    let mut req = app.client.request(method, format!("{}{}", app.base_url, uri));
    if let Some(t) = token {
        req = req.bearer_auth(t);
    }
    if let Some(b) = body {
        req = req.json(&b);
    }
    let resp = req.send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_and_openapi_are_public() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/models/{id}/repairs").is_some());
    Ok(())
}

#[tokio::test]
async fn mutations_require_valid_bearer() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = send(&app, "POST", "/brands", Some(json!({"name": "Acme"})), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, "POST", "/brands", Some(json!({"name": "Acme"})), Some("garbage")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/bookings", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // reads stay public
    let (status, body) = send(&app, "GET", "/brands", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn price_resolution_end_to_end() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = admin_token();
    let t = Some(token.as_str());

    let (status, brand) = send(&app, "POST", "/brands", Some(json!({"name": "Acme", "logo": "A"})), t).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, model) = send(&app, "POST", "/models", Some(json!({"brandId": brand["id"], "name": "X1", "deviceKind": "phone"})), t).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/repairs", Some(json!({"name": "Battery", "durationMinutes": 45})), t).await?;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/models/{}/repairs", model["id"].as_str().unwrap());
    let (status, resolved) = send(&app, "GET", &uri, None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["modelName"], "X1");
    assert_eq!(resolved["entries"].as_array().unwrap().len(), 1);
    assert_eq!(resolved["entries"][0]["name"], "Battery");
    assert!(resolved["entries"][0]["price"].is_null());
    assert_eq!(resolved["entries"][0]["hidden"], false);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"reparaties": [{"typeNaam": "Battery", "prijs": 49}]})), t).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, resolved) = send(&app, "GET", &uri, None, None).await?;
    assert_eq!(resolved["entries"][0]["price"], 49.0);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"reparaties": [{"typeNaam": "Lens", "prijs": 10}]})), t).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    Ok(())
}

#[tokio::test]
async fn duplicate_repair_type_conflicts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = admin_token();
    let t = Some(token.as_str());
    let (status, _) = send(&app, "POST", "/repairs", Some(json!({"name": "Scherm reparatie"})), t).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/repairs", Some(json!({"name": "Scherm reparatie"})), t).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (_, list) = send(&app, "GET", "/repairs", None, None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn reorder_brands_validates_permutation() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = admin_token();
    let t = Some(token.as_str());
    let mut ids = Vec::new();
    for name in ["Apple", "Samsung", "Google"] {
        let (_, b) = send(&app, "POST", "/brands", Some(json!({"name": name})), t).await?;
        ids.push(b["id"].clone());
    }

    let (status, _) = send(&app, "PUT", "/brands/reorder", Some(json!({"order": [ids[0], ids[1]]})), t).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/brands/reorder", Some(json!({"order": [ids[2], ids[0], ids[1]]})), t).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, brands) = send(&app, "GET", "/brands", None, None).await?;
    let names: Vec<_> = brands.as_array().unwrap().iter().map(|b| (b["name"].as_str().unwrap().to_string(), b["orderIndex"].as_i64().unwrap())).collect();
    assert_eq!(names, vec![("Google".into(), 0), ("Apple".into(), 1), ("Samsung".into(), 2)]);

    let (status, body) = send(&app, "PUT", "/brands/reorder", Some(json!({"order": "nope"})), t).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    Ok(())
}

#[tokio::test]
async fn booking_is_public_and_listed_for_admins() -> anyhow::Result<()> {
    let app = start_server().await?;
    let token = admin_token();
    let t = Some(token.as_str());
    let (_, brand) = send(&app, "POST", "/brands", Some(json!({"name": "Acme"})), t).await?;
    let (_, model) = send(&app, "POST", "/models", Some(json!({"brandId": brand["id"], "name": "X1"})), t).await?;
    let (_, repair) = send(&app, "POST", "/repairs", Some(json!({"name": "Battery"})), t).await?;

    let booking = json!({
        "modelId": model["id"],
        "repairTypeIds": [repair["id"]],
        "customerName": "Jan",
        "email": "jan@example.nl"
    });
    let (status, created) = send(&app, "POST", "/booking", Some(booking), None).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["priceOnRequest"], true);
    assert_eq!(created["lines"][0]["repairName"], "Battery");

    let (status, contact) = send(&app, "POST", "/contact", Some(json!({"name": "Jan", "email": "jan@example.nl", "message": "Hello"})), None).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contact["message"], "Hello");

    let (status, list) = send(&app, "GET", "/bookings", None, t).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}
