#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post, put},
};
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};
use tokio::net::TcpListener;
use tower::Layer;
use wedding_invite::config::Config;
use wedding_invite::routes::site_router;
use wedding_invite::server::build_state;
use wedding_invite::state::AppState;

pub const ADMIN_TOKEN: &str = "tok-valid";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_SECRET: &str = "FM2026";
/// Rejected by the stub API as a duplicate even though no listed guest uses it.
pub const RESERVED_CODE: &str = "RESERVADO-01";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// In-memory stand-in for the invitation API.
#[derive(Clone, Default)]
pub struct StubApi {
    guests: Arc<Mutex<Vec<Value>>>,
}

impl StubApi {
    pub fn with_guests(guests: Vec<Value>) -> Self {
        Self {
            guests: Arc::new(Mutex::new(guests)),
        }
    }

    pub fn guests(&self) -> Vec<Value> {
        self.guests.lock().unwrap().clone()
    }

    pub fn guest_by_code(&self, code: &str) -> Option<Value> {
        self.guests()
            .into_iter()
            .find(|g| g["codigo"] == code)
    }
}

pub fn stub_guest(id: i64, code: &str, name: &str, adults: u32, children: u32) -> Value {
    json!({
        "id": id,
        "uuid": format!("6f1c2a1e-0000-4000-8000-{id:012}"),
        "codigo": code,
        "nombres": name,
        "max_adultos": adults,
        "max_ninos": children,
        "max_personas": adults + children,
        "cantidad_adultos": adults,
        "cantidad_ninos": children,
        "estado": "pendiente",
        "confirmacion": null,
        "fecha_confirmacion": null
    })
}

pub fn default_guests() -> Vec<Value> {
    vec![
        stub_guest(1, "FM2026-001", "Familia Pérez", 2, 1),
        stub_guest(2, "FM2026-002", "Ana Torres", 1, 0),
    ]
}

fn stub_event() -> Value {
    json!({
        "nombres_novios": "Fernando y María",
        "fecha": "17 de enero de 2026",
        "dia_semana": "Sábado",
        "fecha_limite_rsvp": "20 de diciembre",
        "dress_code": "Formal",
        "ceremonia": {
            "lugar": "Parroquia San José",
            "hora": "3:00 PM",
            "direccion": "Calle 5 #10"
        },
        "recepcion": {
            "lugar": "Hacienda Los Olivos",
            "hora": "7:00 PM",
            "direccion": "Av. Central 123"
        },
        "padres": {
            "novio": { "padre": "Jorge Martínez", "madre": "Lucía Gómez" },
            "novia": { "padre": "Ramón López", "madre": "Elena Ruiz" }
        }
    })
}

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

type StubResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn check_token(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {ADMIN_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Token inválido o expirado")),
    }
}

async fn guest_by_code(State(api): State<StubApi>, Path(code): Path<String>) -> StubResult {
    api.guest_by_code(&code)
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Código no válido"))
}

async fn complete_data(State(api): State<StubApi>, Path(uuid): Path<String>) -> StubResult {
    let guest = api
        .guests()
        .into_iter()
        .find(|g| g["uuid"] == uuid.as_str())
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Invitado no encontrado"))?;

    Ok(Json(json!({
        "evento": stub_event(),
        "invitados": [guest],
        "padres": {}
    })))
}

async fn rsvp(
    State(api): State<StubApi>,
    Path(uuid): Path<String>,
    Json(body): Json<Value>,
) -> StubResult {
    let mut guests = api.guests.lock().unwrap();
    let guest = guests
        .iter_mut()
        .find(|g| g["uuid"] == uuid.as_str())
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Invitado no encontrado"))?;

    if guest["estado"] != "pendiente" {
        return Err(detail(StatusCode::BAD_REQUEST, "Ya has respondido"));
    }

    if body["confirmacion"] == "si" {
        let adults = body["cantidad_adultos"]
            .as_u64()
            .unwrap_or(0)
            .min(guest["max_adultos"].as_u64().unwrap_or(0));
        let children = body["cantidad_ninos"]
            .as_u64()
            .unwrap_or(0)
            .min(guest["max_ninos"].as_u64().unwrap_or(0));
        guest["estado"] = json!("confirmado");
        guest["confirmacion"] = json!("Si, asistiremos.");
        guest["cantidad_adultos"] = json!(adults);
        guest["cantidad_ninos"] = json!(children);
    } else {
        guest["estado"] = json!("rechazado");
        guest["confirmacion"] = json!("No podremos asistir");
        guest["cantidad_adultos"] = json!(0);
        guest["cantidad_ninos"] = json!(0);
    }
    guest["fecha_confirmacion"] = json!("2025-12-01T18:30:00");

    Ok(Json(guest.clone()))
}

async fn event() -> Json<Value> {
    Json(stub_event())
}

async fn login(Json(body): Json<Value>) -> StubResult {
    if body["username"] == ADMIN_USER
        && body["password"] == ADMIN_PASSWORD
        && body["secret_code"] == ADMIN_SECRET
    {
        Ok(Json(json!({ "access_token": ADMIN_TOKEN, "token_type": "bearer" })))
    } else {
        Err(detail(StatusCode::UNAUTHORIZED, "Credenciales incorrectas"))
    }
}

async fn list_guests(State(api): State<StubApi>, headers: HeaderMap) -> StubResult {
    check_token(&headers)?;
    Ok(Json(Value::Array(api.guests())))
}

async fn create_guest(
    State(api): State<StubApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResult {
    check_token(&headers)?;

    let mut guests = api.guests.lock().unwrap();
    let code = body["codigo"].as_str().unwrap_or_default().to_string();
    if code == RESERVED_CODE || guests.iter().any(|g| g["codigo"] == code.as_str()) {
        return Err(detail(StatusCode::BAD_REQUEST, "El código ya existe"));
    }

    let id = guests
        .iter()
        .filter_map(|g| g["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let adults = body["max_adultos"].as_u64().unwrap_or(0) as u32;
    let children = body["max_ninos"].as_u64().unwrap_or(0) as u32;
    let name = body["nombres"].as_str().unwrap_or_default();

    let guest = stub_guest(id, &code, name, adults, children);
    guests.push(guest.clone());

    Ok(Json(guest))
}

async fn update_guest(
    State(api): State<StubApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> StubResult {
    check_token(&headers)?;

    let mut guests = api.guests.lock().unwrap();
    let guest = guests
        .iter_mut()
        .find(|g| g["id"] == id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Invitado no encontrado"))?;

    for field in ["nombres", "max_adultos", "max_ninos", "max_personas", "estado"] {
        if let Some(value) = body.get(field) {
            guest[field] = value.clone();
        }
    }
    if body["estado"] == "pendiente" {
        guest["confirmacion"] = Value::Null;
        guest["fecha_confirmacion"] = Value::Null;
    }

    Ok(Json(guest.clone()))
}

async fn delete_guest(
    State(api): State<StubApi>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> StubResult {
    check_token(&headers)?;

    let mut guests = api.guests.lock().unwrap();
    let before = guests.len();
    guests.retain(|g| g["id"] != id);
    if guests.len() == before {
        return Err(detail(StatusCode::NOT_FOUND, "Invitado no encontrado"));
    }

    Ok(Json(json!({ "message": "Invitado eliminado" })))
}

async fn stats(State(api): State<StubApi>, headers: HeaderMap) -> StubResult {
    check_token(&headers)?;

    let guests = api.guests();
    let count = |estado: &str| guests.iter().filter(|g| g["estado"] == estado).count();
    let confirmed: Vec<&Value> = guests.iter().filter(|g| g["estado"] == "confirmado").collect();
    let sum = |field: &str| {
        confirmed
            .iter()
            .filter_map(|g| g[field].as_u64())
            .sum::<u64>()
    };

    Ok(Json(json!({
        "total": guests.len(),
        "confirmados": count("confirmado"),
        "pendientes": count("pendiente"),
        "rechazados": count("rechazado"),
        "total_adultos_confirmados": sum("cantidad_adultos"),
        "total_ninos_confirmados": sum("cantidad_ninos")
    })))
}

static NO_PROXY: Once = Once::new();

/// Spawns the stub API on an ephemeral port and returns its base URL.
pub async fn spawn_stub_api(api: StubApi) -> String {
    NO_PROXY.call_once(|| {
        // SAFETY: Set once, before any client in this test binary is built
        unsafe {
            std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route("/api/invitado-codigo/{code}", get(guest_by_code))
        .route("/api/datos-completos/{uuid}", get(complete_data))
        .route("/api/invitado/{uuid}/rsvp", post(rsvp))
        .route("/api/evento", get(event))
        .route("/api/auth/login", post(login))
        .route("/api/admin/invitados", get(list_guests).post(create_guest))
        .route(
            "/api/admin/invitados/{id}",
            put(update_guest).delete(delete_guest),
        )
        .route("/api/admin/estadisticas", get(stats))
        .with_state(api);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_api() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        api_base_url: api_base_url.to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        public_base_url: "https://boda.example.com".to_string(),
        event_starts_at: Utc::now() + Duration::days(30),
        event_duration_hours: 11,
        code_prefix: "FM2026".to_string(),
        cookie_secure: false,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
    }
}

pub fn create_test_state(config: &Config) -> AppState {
    build_state(config).unwrap()
}

pub fn test_server(state: AppState) -> TestServer {
    let app = site_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Stub API with the default guests, plus a site server talking to it.
pub async fn setup() -> (StubApi, TestServer) {
    setup_with(default_guests(), Utc::now() + Duration::days(30)).await
}

pub async fn setup_with(guests: Vec<Value>, event_starts_at: DateTime<Utc>) -> (StubApi, TestServer) {
    let api = StubApi::with_guests(guests);
    let base_url = spawn_stub_api(api.clone()).await;

    let mut config = test_config(&base_url);
    config.event_starts_at = event_starts_at;

    (api, test_server(create_test_state(&config)))
}

pub fn admin_cookie() -> String {
    format!("admin_token={ADMIN_TOKEN}")
}
