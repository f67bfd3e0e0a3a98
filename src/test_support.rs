//! In-process stand-in for the PricePulse backend, used by unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::api::ApiClient;
use crate::models::Product;
use crate::session::SessionStore;
use crate::storage::DurableStorage;
use crate::AppState;

pub const EMAIL: &str = "a@b.com";
pub const PASSWORD: &str = "pw";
pub const TOKEN: &str = "t1";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// Endpoints that can be told to answer 500
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    Profile,
    ListProducts,
    DeleteProduct,
    CreateProduct,
    History,
}

struct Shared {
    calls: Mutex<Vec<RecordedCall>>,
    faults: Mutex<HashSet<Fault>>,
    accounts: Mutex<Vec<(String, String)>>,
    products: Mutex<Vec<Product>>,
}

pub struct MockBackend {
    pub base_url: String,
    shared: Arc<Shared>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared {
            calls: Mutex::new(Vec::new()),
            faults: Mutex::new(HashSet::new()),
            accounts: Mutex::new(vec![(EMAIL.to_string(), PASSWORD.to_string())]),
            products: Mutex::new(fixture_products()),
        });

        let router = Router::new().fallback(handle).with_state(Arc::clone(&shared));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            shared,
        }
    }

    /// Fresh API client with its own empty storage directory
    pub fn client(&self) -> (ApiClient, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionStore::new(DurableStorage::new(dir.path()));
        let api = ApiClient::new(&self.base_url, Duration::from_secs(5), session).unwrap();
        (api, dir)
    }

    /// Fresh application state with its own empty storage directory
    pub fn app_state(&self) -> (AppState, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::build(&self.base_url, Duration::from_secs(5), DurableStorage::new(dir.path()))
            .unwrap();
        (state, dir)
    }

    pub fn fail(&self, fault: Fault) {
        self.shared.faults.lock().unwrap().insert(fault);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.shared.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| format!("{} {}", c.method, c.path))
            .collect()
    }

    pub fn product_ids(&self) -> Vec<i64> {
        self.shared.products.lock().unwrap().iter().map(|p| p.id).collect()
    }
}

pub fn fixture_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Electric Kettle".to_string(),
            url: "https://www.amazon.in/dp/B0001".to_string(),
            current_price: 1299.0,
            target_price: Some(999.0),
            last_updated: "2024-03-01T10:30:00".to_string(),
        },
        Product {
            id: 2,
            name: "Noise Cancelling Headphones".to_string(),
            url: "https://www.amazon.in/dp/B0002".to_string(),
            current_price: 8999.5,
            target_price: None,
            last_updated: "2024-03-02T08:00:00".to_string(),
        },
        Product {
            id: 3,
            name: "Desk Lamp".to_string(),
            url: "https://www.amazon.in/dp/B0003".to_string(),
            current_price: 749.0,
            target_price: Some(700.0),
            last_updated: "2024-03-03T18:45:00".to_string(),
        },
    ]
}

fn product_json(product: &Product) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "url": product.url,
        "current_price": product.current_price,
        "target_price": product.target_price,
        "last_updated": product.last_updated,
    })
}

fn form_field(body: &str, name: &str) -> Option<String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.replace("%40", "@"))
}

fn detail(status: StatusCode, detail: Value) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    };
    let authorization = header_value(header::AUTHORIZATION);
    let path = uri.path().to_string();

    shared.calls.lock().unwrap().push(RecordedCall {
        method: method.to_string(),
        path: path.clone(),
        authorization: authorization.clone(),
        content_type: header_value(header::CONTENT_TYPE),
        body: body.clone(),
    });

    let faulted = |fault: Fault| shared.faults.lock().unwrap().contains(&fault);
    let has_bearer = authorization.as_deref().map_or(false, |a| a.starts_with("Bearer "));

    match (method.as_str(), path.as_str()) {
        ("POST", "/token") => {
            let username = form_field(&body, "username").unwrap_or_default();
            let password = form_field(&body, "password").unwrap_or_default();
            let known = shared
                .accounts
                .lock()
                .unwrap()
                .iter()
                .any(|(email, pw)| *email == username && *pw == password);
            if known {
                Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
            } else {
                detail(StatusCode::UNAUTHORIZED, json!("Incorrect username or password"))
            }
        }
        ("GET", "/users/me") => {
            if faulted(Fault::Profile) {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            if authorization.as_deref() != Some("Bearer t1") {
                return detail(StatusCode::UNAUTHORIZED, json!("Could not validate credentials"));
            }
            Json(json!({ "id": 1, "email": EMAIL, "username": "ab", "is_active": true })).into_response()
        }
        ("POST", "/register") => {
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let email = request["email"].as_str().unwrap_or_default().to_string();
            let password = request["password"].as_str().unwrap_or_default().to_string();
            if email.is_empty() {
                return detail(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!([{ "loc": ["body", "email"], "msg": "value is not a valid email address" }]),
                );
            }
            let mut accounts = shared.accounts.lock().unwrap();
            if accounts.iter().any(|(known, _)| *known == email) {
                return detail(StatusCode::BAD_REQUEST, json!("Email already registered"));
            }
            accounts.push((email.clone(), password));
            Json(json!({
                "id": accounts.len(),
                "email": email,
                "username": request["username"],
                "is_active": true,
            }))
            .into_response()
        }
        (_, p) if p.starts_with("/products") && !has_bearer => {
            detail(StatusCode::UNAUTHORIZED, json!("Not authenticated"))
        }
        ("GET", "/products/") => {
            if faulted(Fault::ListProducts) {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            let products = shared.products.lock().unwrap();
            Json(Value::Array(products.iter().map(product_json).collect())).into_response()
        }
        ("POST", "/products/") => {
            if faulted(Fault::CreateProduct) {
                return detail(StatusCode::BAD_REQUEST, json!("Invalid URL"));
            }
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let mut products = shared.products.lock().unwrap();
            let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            products.push(Product {
                id,
                name: String::new(),
                url: request["url"].as_str().unwrap_or_default().to_string(),
                current_price: 0.0,
                target_price: request["target_price"].as_f64(),
                last_updated: "2024-03-04T00:00:00".to_string(),
            });
            Json(json!({ "product_id": id })).into_response()
        }
        (m, p) if p.starts_with("/products/") => {
            let Ok(id) = p.trim_start_matches("/products/").parse::<i64>() else {
                return StatusCode::NOT_FOUND.into_response();
            };
            match m {
                "DELETE" => {
                    if faulted(Fault::DeleteProduct) {
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                    let mut products = shared.products.lock().unwrap();
                    let before = products.len();
                    products.retain(|p| p.id != id);
                    if products.len() == before {
                        detail(StatusCode::NOT_FOUND, json!("Product not found"))
                    } else {
                        StatusCode::NO_CONTENT.into_response()
                    }
                }
                "GET" => {
                    if faulted(Fault::History) {
                        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                    }
                    let products = shared.products.lock().unwrap();
                    match products.iter().find(|p| p.id == id) {
                        Some(product) => Json(json!({
                            "product": {
                                "name": product.name,
                                "current_price": product.current_price,
                                "target_price": product.target_price,
                                "image_url": null,
                            },
                            "price_history": [
                                { "timestamp": "2024-02-28T10:00:00", "price": 1499.0 },
                                { "timestamp": "2024-02-29T10:00:00", "price": 1399.0 },
                                { "timestamp": "2024-03-01T10:00:00", "price": product.current_price },
                            ],
                        }))
                        .into_response(),
                        None => detail(StatusCode::NOT_FOUND, json!("Product not found")),
                    }
                }
                _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
            }
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
