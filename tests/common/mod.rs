#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use profile_api::app::{build_router, build_state};
use profile_api::config::{AppEnv, Config, PublicKeySource};
use profile_api::services::auth::KeyKind;
use profile_api::state::AppState;

pub const ISSUER: &str = "https://auth.example.test";
pub const AUDIENCE: &str = "profile-api";

const ED_PRIVATE: &str = include_str!("../fixtures/ed25519_private.pem");
const ED_PUBLIC: &str = include_str!("../fixtures/ed25519_public.pem");
const OTHER_ED_PRIVATE: &str = include_str!("../fixtures/ed25519_other_private.pem");

pub fn config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        sqids_min_length: 10,
        sqids_alphabet: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            .to_string(),
        auth_issuer: ISSUER.to_string(),
        auth_audience: AUDIENCE.to_string(),
        access_token_leeway_seconds: 30,
        access_jwt_key_kind: KeyKind::Ed25519,
        access_jwt_public_key: PublicKeySource::Pem(ED_PUBLIC.to_string()),
        search_default_page_size: 20,
        search_max_page_size: 100,
        search_pool_size: 50,
    }
}

pub fn app() -> (Router, AppState) {
    let config = config();
    let state = build_state(&config).unwrap();
    (build_router(state.clone(), &config), state)
}

pub fn claims(sub: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": sub,
        "iat": now,
        "exp": now + 600,
        "scope": "profiles:read profiles:search",
    })
}

fn sign_with(private_pem: &str, claims: &Value) -> String {
    let key = EncodingKey::from_ed_pem(private_pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::EdDSA), claims, &key).unwrap()
}

pub fn token(claims: &Value) -> String {
    sign_with(ED_PRIVATE, claims)
}

pub fn foreign_token(claims: &Value) -> String {
    sign_with(OTHER_ED_PRIVATE, claims)
}

pub fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, bearer: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
